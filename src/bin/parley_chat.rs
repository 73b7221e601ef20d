use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use parley::client::{
    ChatApi, ChatSession, DisplayMessage, HttpChatApi, ImageAttachment, Sender,
};
use parley::domain::Persona;
use parley::infrastructure::observability::{TracingConfig, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "parley-chat", about = "Terminal chat client for a parley server", version)]
struct ChatCli {
    /// Base URL of the parley server.
    #[arg(long, env = "PARLEY_URL", default_value = "http://localhost:5000")]
    url: String,

    /// Persona to start with (gpt, claude, llama, gemini).
    #[arg(long, default_value = "gpt")]
    model: Persona,

    /// Attach a sentiment analysis to every reply.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    sentiment: bool,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

enum Command {
    Say(String),
    Model(Option<String>),
    Image(PathBuf, String),
    Sentiment,
    Embed(String),
    Clear,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  /model [gpt|claude|llama|gemini]  show or switch persona
  /image <path> [prompt]            attach an image; the next send analyses it
  /sentiment                        toggle sentiment analysis
  /embed <text>                     show an embedding summary
  /clear                            start over
  /quit                             exit";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(&TracingConfig {
        default_directives: "warn".to_string(),
        ..TracingConfig::default()
    });

    let args = ChatCli::parse();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()
        .context("Failed to build HTTP client")?;
    let api: Arc<dyn ChatApi> = Arc::new(HttpChatApi::new(http, args.url.clone()));

    let mut session = ChatSession::new(Arc::clone(&api));
    session.set_persona(args.model);
    if args.sentiment {
        session.toggle_sentiment();
    }

    println!(
        "Connected to {} as {}. Type /help for commands.",
        args.url,
        session.persona().display_name()
    );
    for message in session.messages() {
        render(message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse(&line) {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Clear => {
                session.clear();
                for message in session.messages() {
                    render(message);
                }
            }
            Command::Sentiment => {
                let enabled = session.toggle_sentiment();
                println!("Sentiment analysis {}", if enabled { "on" } else { "off" });
            }
            Command::Model(None) => {
                println!("Current persona: {}", session.persona().display_name());
            }
            Command::Model(Some(id)) => match id.parse::<Persona>() {
                Ok(persona) => {
                    session.set_persona(persona);
                    println!("Switched to {}", persona.display_name());
                }
                Err(e) => println!("{e}"),
            },
            Command::Image(path, prompt) => match load_image(&path).await {
                Ok(image) => {
                    session.attach_image(image);
                    if prompt.is_empty() {
                        println!("Attached {}. Type a prompt to analyse it.", path.display());
                    } else {
                        send(&mut session, &prompt).await;
                    }
                }
                Err(e) => println!("{e:#}"),
            },
            Command::Embed(text) => match api.generate_embedding(&text).await {
                Ok(reply) => {
                    let preview: Vec<String> = reply
                        .embedding
                        .values
                        .iter()
                        .take(5)
                        .map(|v| format!("{v:.4}"))
                        .collect();
                    println!(
                        "{} dimensions [{}, ...]",
                        reply.embedding.dimensions(),
                        preview.join(", ")
                    );
                    if let Some(note) = reply.note {
                        println!("note: {note}");
                    }
                }
                Err(e) => println!("error: {e}"),
            },
            Command::Say(text) => send(&mut session, &text).await,
        }
    }

    Ok(())
}

async fn send(session: &mut ChatSession, text: &str) {
    match session.send(text).await {
        Ok(Some(reply)) => render(reply),
        Ok(None) => {}
        Err(e) => println!("error: {e}"),
    }
}

fn parse(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Say(line.to_string());
    };

    let (name, argument) = rest
        .split_once(char::is_whitespace)
        .map(|(n, a)| (n, a.trim()))
        .unwrap_or((rest, ""));

    match name {
        "quit" | "exit" => Command::Quit,
        "clear" => Command::Clear,
        "sentiment" => Command::Sentiment,
        "help" => Command::Help,
        "model" if argument.is_empty() => Command::Model(None),
        "model" => Command::Model(Some(argument.to_string())),
        "embed" => Command::Embed(argument.to_string()),
        "image" => {
            let (path, prompt) = argument
                .split_once(char::is_whitespace)
                .map(|(p, rest)| (p, rest.trim()))
                .unwrap_or((argument, ""));
            Command::Image(PathBuf::from(path), prompt.to_string())
        }
        _ => Command::Help,
    }
}

async fn load_image(path: &Path) -> Result<ImageAttachment> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(ImageAttachment { file_name, bytes })
}

fn render(message: &DisplayMessage) {
    let speaker = match (message.sender, message.model) {
        (Sender::User, _) => "you".to_string(),
        (Sender::Assistant, Some(persona)) => persona.display_name().to_string(),
        (Sender::Assistant, None) => "assistant".to_string(),
    };

    if let Some(label) = &message.analysis {
        println!("[{label}]");
    }
    println!("{speaker}: {}", message.content);
    if let Some(sentiment) = &message.sentiment {
        println!(
            "  sentiment: {} ({:.2}) {}",
            sentiment.sentiment, sentiment.score, sentiment.explanation
        );
    }
}
