#![forbid(unsafe_code)]

//! Form snapshots, validation and payload construction.
//!
//! The page adapter copies raw `<input>`/`<select>` values into a
//! [`FormSnapshot`]; everything after that is a pure function of the
//! snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decimal::to_fixed;
use crate::error::PayloadError;
use crate::field::{FieldId, FieldKind};

/// Border color applied to a field that failed validation.
pub const ERROR_BORDER_COLOR: &str = "#e74c3c";
/// Border color applied to a field that passed validation.
pub const SUCCESS_BORDER_COLOR: &str = "#27ae60";
/// Aggregate message shown when any numeric field is invalid.
pub const INVALID_FORM_MESSAGE: &str =
    "Por favor, complete todos los campos numéricos con valores válidos (números positivos).";

/// Raw string values of the applicant form, keyed by field.
///
/// Missing entries read as the empty string, which is what an untouched
/// input reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    values: BTreeMap<FieldId, String>,
}

impl FormSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Current raw value of `field`.
    #[must_use]
    pub fn get(&self, field: FieldId) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }
}

impl FromIterator<(FieldId, String)> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = (FieldId, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Parse a raw input value as a finite number.
///
/// Surrounding whitespace is ignored. Empty, non-numeric and non-finite
/// inputs yield `None`.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Why a numeric field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Empty,
    NotNumeric,
    Negative,
}

/// Visual marker applied to a validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMark {
    Valid,
    Invalid(InvalidReason),
}

impl FieldMark {
    #[must_use]
    pub const fn border_color(self) -> &'static str {
        match self {
            Self::Valid => SUCCESS_BORDER_COLOR,
            Self::Invalid(_) => ERROR_BORDER_COLOR,
        }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Outcome of validating every field in [`FieldId::VALIDATED_NUMERIC`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    marks: Vec<(FieldId, FieldMark)>,
    first_negative: Option<FieldId>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.marks.iter().all(|(_, mark)| mark.is_valid())
    }

    /// Per-field markers in check order.
    #[must_use]
    pub fn marks(&self) -> &[(FieldId, FieldMark)] {
        &self.marks
    }

    #[must_use]
    pub fn mark(&self, field: FieldId) -> Option<FieldMark> {
        self.marks
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, mark)| *mark)
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.marks
            .iter()
            .filter(|(_, mark)| !mark.is_valid())
            .map(|(field, _)| *field)
    }

    #[must_use]
    pub const fn first_negative(&self) -> Option<FieldId> {
        self.first_negative
    }

    /// Blocking message for the first negative field, if any.
    #[must_use]
    pub fn negative_message(&self) -> Option<String> {
        self.first_negative
            .map(|field| format!("El campo {} no puede ser negativo.", field.label()))
    }
}

fn check_numeric(raw: &str) -> FieldMark {
    if raw.trim().is_empty() {
        return FieldMark::Invalid(InvalidReason::Empty);
    }
    match parse_number(raw) {
        None => FieldMark::Invalid(InvalidReason::NotNumeric),
        Some(value) if value < 0.0 => FieldMark::Invalid(InvalidReason::Negative),
        Some(_) => FieldMark::Valid,
    }
}

/// Validate the numeric fields of `form`.
#[must_use]
pub fn validate(form: &FormSnapshot) -> ValidationReport {
    let mut first_negative = None;
    let marks = FieldId::VALIDATED_NUMERIC
        .into_iter()
        .map(|field| {
            let mark = check_numeric(form.get(field));
            if mark == FieldMark::Invalid(InvalidReason::Negative) && first_negative.is_none() {
                first_negative = Some(field);
            }
            (field, mark)
        })
        .collect();
    ValidationReport {
        marks,
        first_negative,
    }
}

/// JSON body of `POST /predecir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub edad: i64,
    pub genero: String,
    pub zona: String,
    pub tipo_empleo: String,
    pub antiguedad: i64,
    pub ingresos: f64,
    pub score_crediticio: f64,
    pub pagos_previos: i64,
    pub creditos_previos: i64,
    pub monto_credito: f64,
    pub plazo_meses: i64,
    pub destino_credito: String,
    pub tipo_garantia: String,
    pub valor_garantia: f64,
    pub precio_soya: f64,
    pub precio_vino: f64,
    pub uso_productos: i64,
}

struct Reader<'a> {
    form: &'a FormSnapshot,
}

impl Reader<'_> {
    fn number(&self, field: FieldId) -> Result<f64, PayloadError> {
        let raw = self.form.get(field);
        if raw.trim().is_empty() {
            return Err(PayloadError::Missing(field));
        }
        parse_number(raw).ok_or_else(|| PayloadError::NotNumeric {
            field,
            value: raw.to_owned(),
        })
    }

    fn int(&self, field: FieldId) -> Result<i64, PayloadError> {
        debug_assert_eq!(field.kind(), FieldKind::Integer);
        // `as` saturates out-of-range values.
        Ok(self.number(field)?.trunc() as i64)
    }

    fn float(&self, field: FieldId) -> Result<f64, PayloadError> {
        debug_assert_eq!(field.kind(), FieldKind::Float);
        self.number(field)
    }

    fn text(&self, field: FieldId) -> String {
        self.form.get(field).to_owned()
    }
}

impl ApplicantProfile {
    /// Cast every field of `form` to its declared type.
    ///
    /// Integers are truncated toward zero; categorical values pass through
    /// verbatim.
    pub fn from_form(form: &FormSnapshot) -> Result<Self, PayloadError> {
        let r = Reader { form };
        Ok(Self {
            edad: r.int(FieldId::Edad)?,
            genero: r.text(FieldId::Genero),
            zona: r.text(FieldId::Zona),
            tipo_empleo: r.text(FieldId::TipoEmpleo),
            antiguedad: r.int(FieldId::Antiguedad)?,
            ingresos: r.float(FieldId::Ingresos)?,
            score_crediticio: r.float(FieldId::ScoreCrediticio)?,
            pagos_previos: r.int(FieldId::PagosPrevios)?,
            creditos_previos: r.int(FieldId::CreditosPrevios)?,
            monto_credito: r.float(FieldId::MontoCredito)?,
            plazo_meses: r.int(FieldId::PlazoMeses)?,
            destino_credito: r.text(FieldId::DestinoCredito),
            tipo_garantia: r.text(FieldId::TipoGarantia),
            valor_garantia: r.float(FieldId::ValorGarantia)?,
            precio_soya: r.float(FieldId::PrecioSoya)?,
            precio_vino: r.float(FieldId::PrecioVino)?,
            uso_productos: r.int(FieldId::UsoProductos)?,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Normalize a currency amount: keep digits and dots, render two decimals.
///
/// Returns `None` when nothing numeric remains, in which case the input is
/// left untouched.
#[must_use]
pub fn normalize_currency(raw: &str) -> Option<String> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if kept.is_empty() {
        return None;
    }
    // Leading numeric prefix: digits with at most one dot.
    let mut seen_dot = false;
    let end = kept
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' {
                if seen_dot {
                    return true;
                }
                seen_dot = true;
            }
            false
        })
        .map_or(kept.len(), |(idx, _)| idx);
    let value = parse_number(&kept[..end])?;
    Some(to_fixed(value, 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_form() -> FormSnapshot {
        FormSnapshot::new()
            .with(FieldId::Edad, "35")
            .with(FieldId::Genero, "M")
            .with(FieldId::Zona, "Urbana")
            .with(FieldId::TipoEmpleo, "Dependiente")
            .with(FieldId::Antiguedad, "8")
            .with(FieldId::Ingresos, "4500.00")
            .with(FieldId::ScoreCrediticio, "720")
            .with(FieldId::PagosPrevios, "3")
            .with(FieldId::CreditosPrevios, "2")
            .with(FieldId::MontoCredito, "50000")
            .with(FieldId::PlazoMeses, "24")
            .with(FieldId::DestinoCredito, "Consumo")
            .with(FieldId::TipoGarantia, "Vehiculo")
            .with(FieldId::ValorGarantia, "55000.00")
            .with(FieldId::PrecioSoya, "420.50")
            .with(FieldId::PrecioVino, "48.00")
            .with(FieldId::UsoProductos, "2")
    }

    #[test]
    fn parse_number_rejects_blank_garbage_and_non_finite() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("doce"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn valid_form_passes_with_success_marks() {
        let report = validate(&valid_form());
        assert!(report.is_valid());
        assert_eq!(report.marks().len(), FieldId::VALIDATED_NUMERIC.len());
        assert_eq!(report.first_negative(), None);
        assert_eq!(
            report.mark(FieldId::Edad).map(FieldMark::border_color),
            Some(SUCCESS_BORDER_COLOR)
        );
    }

    #[test]
    fn each_failure_kind_is_marked() {
        let form = valid_form()
            .with(FieldId::Edad, "")
            .with(FieldId::Ingresos, "mucho")
            .with(FieldId::PrecioVino, "-1");
        let report = validate(&form);
        assert!(!report.is_valid());
        assert_eq!(
            report.mark(FieldId::Edad),
            Some(FieldMark::Invalid(InvalidReason::Empty))
        );
        assert_eq!(
            report.mark(FieldId::Ingresos),
            Some(FieldMark::Invalid(InvalidReason::NotNumeric))
        );
        assert_eq!(
            report.mark(FieldId::PrecioVino),
            Some(FieldMark::Invalid(InvalidReason::Negative))
        );
        assert_eq!(
            report.invalid_fields().collect::<Vec<_>>(),
            vec![FieldId::Edad, FieldId::Ingresos, FieldId::PrecioVino]
        );
    }

    #[test]
    fn first_negative_wins_the_message() {
        let form = valid_form()
            .with(FieldId::PagosPrevios, "-2")
            .with(FieldId::MontoCredito, "-100");
        let report = validate(&form);
        assert_eq!(report.first_negative(), Some(FieldId::PagosPrevios));
        assert_eq!(
            report.negative_message().as_deref(),
            Some("El campo Pagos Previos no puede ser negativo.")
        );
    }

    #[test]
    fn term_is_not_validated_but_must_parse_for_payload() {
        let form = valid_form().with(FieldId::PlazoMeses, "");
        assert!(validate(&form).is_valid());
        assert_eq!(
            ApplicantProfile::from_form(&form),
            Err(PayloadError::Missing(FieldId::PlazoMeses))
        );
    }

    #[test]
    fn payload_truncates_integers_and_keeps_floats() {
        let form = valid_form()
            .with(FieldId::Edad, "35.9")
            .with(FieldId::Ingresos, "4500.75");
        let profile = ApplicantProfile::from_form(&form).unwrap();
        assert_eq!(profile.edad, 35);
        assert_eq!(profile.ingresos, 4500.75);
        assert_eq!(profile.tipo_garantia, "Vehiculo");

        let json: serde_json::Value = serde_json::from_str(&profile.to_json().unwrap()).unwrap();
        assert_eq!(json["edad"], serde_json::json!(35));
        assert_eq!(json["plazo_meses"], serde_json::json!(24));
        assert_eq!(json["precio_soya"], serde_json::json!(420.5));
        assert_eq!(json.as_object().unwrap().len(), 17);
    }

    #[test]
    fn currency_normalization_matches_page_helper() {
        assert_eq!(normalize_currency("$ 1,234.5").as_deref(), Some("1234.50"));
        assert_eq!(normalize_currency("12.3.4").as_deref(), Some("12.30"));
        assert_eq!(normalize_currency("abc"), None);
        assert_eq!(normalize_currency("."), None);
    }
}
