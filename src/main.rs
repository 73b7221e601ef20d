use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use parley::application::ports::ConversationRepository;
use parley::infrastructure::llm::ProviderFactory;
use parley::infrastructure::observability::{TracingConfig, init_tracing};
use parley::infrastructure::persistence::InMemoryConversationRepository;
use parley::infrastructure::storage::UploadStaging;
use parley::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load().context("Failed to load settings")?;
    init_tracing(&TracingConfig::from_settings(&settings));

    let gateway = Arc::new(
        ProviderFactory::create(&settings.provider).context("Failed to create provider")?,
    );
    let conversation_repository: Arc<dyn ConversationRepository> =
        Arc::new(InMemoryConversationRepository::new());
    let upload_staging = Arc::new(
        UploadStaging::new(settings.uploads.dir.clone(), settings.uploads.max_bytes())
            .with_context(|| format!("Failed to prepare {}", settings.uploads.dir.display()))?,
    );

    let addr = settings
        .server
        .socket_addr()
        .context("Invalid server address")?;

    let state = AppState::new(gateway, conversation_repository, upload_staging, settings);
    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
