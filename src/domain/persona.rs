use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named preset selecting the assistant's system prompt and simulated voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    #[default]
    Gpt,
    Claude,
    Llama,
    Gemini,
}

impl Persona {
    pub const ALL: [Persona; 4] = [
        Persona::Gpt,
        Persona::Claude,
        Persona::Llama,
        Persona::Gemini,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Gpt => "gpt",
            Persona::Claude => "claude",
            Persona::Llama => "llama",
            Persona::Gemini => "gemini",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::Gpt => "GPT-4 Turbo",
            Persona::Claude => "Claude 3 Opus",
            Persona::Llama => "Llama 3",
            Persona::Gemini => "Gemini Pro",
        }
    }

    /// Resolves a caller-supplied model id. Anything unrecognised falls back
    /// to the default persona.
    pub fn from_model_id(model: Option<&str>) -> Self {
        model
            .and_then(|m| m.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gpt" => Ok(Persona::Gpt),
            "claude" => Ok(Persona::Claude),
            "llama" => Ok(Persona::Llama),
            "gemini" => Ok(Persona::Gemini),
            other => Err(format!(
                "Invalid model: {}. Expected: gpt, claude, llama, or gemini",
                other
            )),
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
