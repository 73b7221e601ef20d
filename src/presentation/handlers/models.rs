use axum::Json;
use serde::Serialize;

use crate::domain::Persona;

#[derive(Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelEntry>,
}

#[derive(Serialize)]
pub struct ModelEntry {
    pub id: String,
    pub name: String,
}

pub async fn models_handler() -> Json<ModelsResponse> {
    let models = Persona::ALL
        .iter()
        .map(|persona| ModelEntry {
            id: persona.as_str().to_string(),
            name: persona.display_name().to_string(),
        })
        .collect();

    Json(ModelsResponse { models })
}
