use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NO_EXPLANATION: &str = "No explanation provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            other => Err(format!("Invalid sentiment: {}", other)),
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub sentiment: SentimentLabel,
    pub score: f64,
    pub explanation: String,
}

impl SentimentAnalysis {
    /// Builds an analysis with the score clamped to `[-1, 1]`.
    pub fn new(sentiment: SentimentLabel, score: f64, explanation: impl Into<String>) -> Self {
        let score = if score.is_finite() {
            score.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        Self {
            sentiment,
            score,
            explanation: explanation.into(),
        }
    }

    pub fn neutral(explanation: impl Into<String>) -> Self {
        Self::new(SentimentLabel::Neutral, 0.0, explanation)
    }

    /// Reads a provider's structured answer field by field. Any field that is
    /// missing or has the wrong shape takes its neutral default, so malformed
    /// payloads still yield a usable analysis.
    pub fn from_payload(payload: &str) -> Self {
        let value: Value = serde_json::from_str(payload).unwrap_or(Value::Null);

        let sentiment = value
            .get("sentiment")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let score = value.get("score").and_then(Value::as_f64).unwrap_or(0.0);
        let explanation = value
            .get("explanation")
            .and_then(Value::as_str)
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(NO_EXPLANATION);

        Self::new(sentiment, score, explanation)
    }
}

impl Default for SentimentAnalysis {
    fn default() -> Self {
        Self::neutral(NO_EXPLANATION)
    }
}
