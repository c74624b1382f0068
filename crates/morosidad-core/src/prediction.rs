#![forbid(unsafe_code)]

//! Prediction responses and the result view model.

use serde::{Deserialize, Serialize};

use crate::decimal::to_fixed;
use crate::error::ClientError;

/// Predicted outcome class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    NoMoroso,
    Moroso,
}

impl Outcome {
    /// Map the server's binary indicator; anything but `1` is "no moroso".
    #[must_use]
    pub const fn from_class(class: i64) -> Self {
        if class == 1 { Self::Moroso } else { Self::NoMoroso }
    }

    /// Style class for the status badge.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Moroso => "badge moroso",
            Self::NoMoroso => "badge no-moroso",
        }
    }
}

/// Body of a successful `POST /predecir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediccion: i64,
    pub prediccion_texto: String,
    pub probabilidad_no_moroso: f64,
    pub probabilidad_moroso: f64,
    pub riesgo: String,
    pub recomendacion: String,
    pub timestamp: String,
}

impl PredictionResult {
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        Outcome::from_class(self.prediccion)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Extract the `error` text of a failure body, tolerating non-JSON bodies.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
}

/// Interpret a finished prediction exchange.
pub fn decode_prediction_response(status: u16, body: &str) -> Result<PredictionResult, ClientError> {
    if !(200..300).contains(&status) {
        return Err(ClientError::Server {
            status,
            message: error_message(body),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Format a probability in `[0, 1]` as a percentage with two decimals.
#[must_use]
pub fn percent_label(probability: f64) -> String {
    format!("{}%", to_fixed(probability * 100.0, 2))
}

/// Style class derived from a risk label: lowercased, spaces as hyphens.
#[must_use]
pub fn risk_class(label: &str) -> String {
    label.to_lowercase().replace(' ', "-")
}

/// Everything the result panel displays, ready for the DOM adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub headline: String,
    pub outcome: Outcome,
    pub badge_class: &'static str,
    pub prob_no_moroso_label: String,
    pub prob_moroso_label: String,
    /// CSS width of the "no moroso" bar; applied after the animation delay.
    pub no_moroso_bar_width: String,
    pub moroso_bar_width: String,
    pub risk_label: String,
    pub risk_class: String,
    pub recommendation: String,
    pub timestamp: String,
}

impl ResultView {
    #[must_use]
    pub fn from_result(result: &PredictionResult) -> Self {
        let outcome = result.outcome();
        let no_moroso = percent_label(result.probabilidad_no_moroso);
        let moroso = percent_label(result.probabilidad_moroso);
        Self {
            headline: result.prediccion_texto.clone(),
            outcome,
            badge_class: outcome.badge_class(),
            no_moroso_bar_width: no_moroso.clone(),
            moroso_bar_width: moroso.clone(),
            prob_no_moroso_label: no_moroso,
            prob_moroso_label: moroso,
            risk_label: result.riesgo.clone(),
            risk_class: risk_class(&result.riesgo),
            recommendation: result.recomendacion.clone(),
            timestamp: result.timestamp.clone(),
        }
    }
}
