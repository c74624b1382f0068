#![forbid(unsafe_code)]

//! Aggregate statistics snapshot and its view model.

use serde::{Deserialize, Serialize};

use crate::decimal::to_fixed;
use crate::error::ClientError;
use crate::prediction::error_message;

/// Text shown when no prediction has been recorded yet.
pub const NO_LAST_PREDICTION: &str = "N/A";

/// Body of `GET /api/estadisticas`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSnapshot {
    pub total: Option<u64>,
    pub no_morosos: Option<u64>,
    pub morosos: Option<u64>,
    pub prob_moroso_promedio: Option<f64>,
    pub ultima_prediccion: Option<String>,
}

/// Interpret a finished statistics exchange.
pub fn decode_stats_response(status: u16, body: &str) -> Result<StatsSnapshot, ClientError> {
    if !(200..300).contains(&status) {
        return Err(ClientError::Server {
            status,
            message: error_message(body),
        });
    }
    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTone {
    Positive,
    Negative,
}

/// One horizontal proportional bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub tone: BarTone,
    /// Share of the total, `0..=100` for consistent counts.
    pub percent: f64,
}

impl Bar {
    /// Label with one decimal, e.g. `80.0%`.
    #[must_use]
    pub fn percent_label(&self) -> String {
        format!("{}%", to_fixed(self.percent, 1))
    }

    /// CSS width value.
    #[must_use]
    pub fn width_css(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Two-category bar visualization plus the total summary.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub no_morosos: Bar,
    pub morosos: Bar,
    pub total: u64,
}

impl BarChart {
    /// Compute each category's share of `total`, which is floored at 1.
    #[must_use]
    pub fn from_counts(no_morosos: u64, morosos: u64, total: u64) -> Self {
        let denominator = total.max(1) as f64;
        Self {
            no_morosos: Bar {
                label: "No Morosos",
                tone: BarTone::Positive,
                percent: no_morosos as f64 / denominator * 100.0,
            },
            morosos: Bar {
                label: "Morosos",
                tone: BarTone::Negative,
                percent: morosos as f64 / denominator * 100.0,
            },
            total,
        }
    }

    pub fn bars(&self) -> [&Bar; 2] {
        [&self.no_morosos, &self.morosos]
    }
}

/// Everything the statistics panel displays.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    pub total: String,
    pub no_morosos: String,
    pub morosos: String,
    pub prob_promedio: String,
    pub ultima_prediccion: String,
    pub chart: BarChart,
}

impl StatsView {
    #[must_use]
    pub fn from_snapshot(snapshot: &StatsSnapshot) -> Self {
        let total = snapshot.total.unwrap_or(0);
        let no_morosos = snapshot.no_morosos.unwrap_or(0);
        let morosos = snapshot.morosos.unwrap_or(0);
        let average = snapshot.prob_moroso_promedio.unwrap_or(0.0);
        let last = snapshot
            .ultima_prediccion
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_LAST_PREDICTION);
        Self {
            total: total.to_string(),
            no_morosos: no_morosos.to_string(),
            morosos: morosos.to_string(),
            prob_promedio: format!("{}%", to_fixed(average * 100.0, 1)),
            ultima_prediccion: last.to_owned(),
            chart: BarChart::from_counts(no_morosos, morosos, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn eighty_twenty_split() {
        let chart = BarChart::from_counts(80, 20, 100);
        assert_eq!(chart.no_morosos.percent_label(), "80.0%");
        assert_eq!(chart.morosos.percent_label(), "20.0%");
        assert_eq!(chart.no_morosos.width_css(), "80%");
    }

    #[test]
    fn zero_total_renders_zero_percent() {
        let chart = BarChart::from_counts(0, 0, 0);
        for bar in chart.bars() {
            assert!(bar.percent.is_finite());
            assert_eq!(bar.percent_label(), "0.0%");
        }
        assert_eq!(chart.total, 0);
    }

    #[test]
    fn half_tenth_shares_round_up() {
        let chart = BarChart::from_counts(15, 1, 16);
        assert_eq!(chart.no_morosos.percent_label(), "93.8%");
        assert_eq!(chart.morosos.percent_label(), "6.3%");

        let view = StatsView::from_snapshot(&StatsSnapshot {
            total: Some(16),
            no_morosos: Some(15),
            morosos: Some(1),
            prob_moroso_promedio: Some(0.0625),
            ultima_prediccion: None,
        });
        assert_eq!(view.prob_promedio, "6.3%");
    }

    #[test]
    fn empty_snapshot_defaults_everything() {
        let snapshot: StatsSnapshot = serde_json::from_str("{}").unwrap();
        let view = StatsView::from_snapshot(&snapshot);
        assert_eq!(view.total, "0");
        assert_eq!(view.prob_promedio, "0.0%");
        assert_eq!(view.ultima_prediccion, "N/A");
    }

    #[test]
    fn full_snapshot_view() {
        let body = r#"{"total":4,"morosos":1,"no_morosos":3,
            "prob_moroso_promedio":0.3,"ultima_prediccion":"2026-10-19 09:15:00"}"#;
        let view = StatsView::from_snapshot(&decode_stats_response(200, body).unwrap());
        assert_eq!(view.total, "4");
        assert_eq!(view.morosos, "1");
        assert_eq!(view.prob_promedio, "30.0%");
        assert_eq!(view.ultima_prediccion, "2026-10-19 09:15:00");
        assert_eq!(view.chart.no_morosos.percent_label(), "75.0%");
    }

    #[test]
    fn null_last_prediction_is_not_available() {
        let body = r#"{"total":0,"morosos":0,"no_morosos":0,"ultima_prediccion":null}"#;
        let view = StatsView::from_snapshot(&decode_stats_response(200, body).unwrap());
        assert_eq!(view.ultima_prediccion, "N/A");
    }

    #[test]
    fn server_error_carries_message() {
        let err = decode_stats_response(500, r#"{"error":"disk"}"#).unwrap_err();
        assert_eq!(
            err,
            ClientError::Server {
                status: 500,
                message: Some("disk".into()),
            }
        );
    }
}
