#![forbid(unsafe_code)]

//! Element ids the page markup provides.
//!
//! Form input ids are not listed here; they come from
//! [`morosidad_core::FieldId::dom_id`].

pub const FORM: &str = "prediccion-form";
pub const LOADING: &str = "loading";
pub const RESULT_CONTAINER: &str = "resultado-container";
pub const RESULT_TITLE: &str = "resultado-titulo";
pub const RESULT_BADGE: &str = "resultado-badge";
pub const PROB_NO_MOROSO: &str = "prob-no-moroso";
pub const PROB_MOROSO: &str = "prob-moroso";
pub const PROB_NO_MOROSO_BAR: &str = "prob-no-moroso-bar";
pub const PROB_MOROSO_BAR: &str = "prob-moroso-bar";
pub const RISK_LEVEL: &str = "nivel-riesgo";
pub const RECOMMENDATION: &str = "texto-recomendacion";
pub const TIMESTAMP: &str = "timestamp";

pub const STATS_TOTAL: &str = "total-predicciones";
pub const STATS_NO_MOROSOS: &str = "no-morosos";
pub const STATS_MOROSOS: &str = "morosos";
pub const STATS_AVERAGE: &str = "prob-promedio";
pub const STATS_LAST: &str = "ultima-prediccion";
pub const STATS_CHART: &str = "prediccionesChart";
