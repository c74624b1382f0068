#![forbid(unsafe_code)]

//! Field-assist suggestions. None of these affect validation.

use crate::decimal::to_fixed;
use crate::field::{FieldId, TipoEmpleo, TipoGarantia};
use crate::form::parse_number;

/// Suggested monthly income for an employment category.
#[must_use]
pub const fn suggested_income(tipo: TipoEmpleo) -> u32 {
    match tipo {
        TipoEmpleo::Dependiente => 4500,
        TipoEmpleo::Independiente => 4000,
        TipoEmpleo::Agricola => 3500,
        TipoEmpleo::Gobierno => 5000,
    }
}

/// Income to fill in after the employment type changes.
///
/// Only fires when the income field is empty and the selection is a known
/// category.
#[must_use]
pub fn income_for_selection(selected: &str, current_income: &str) -> Option<String> {
    if !current_income.is_empty() {
        return None;
    }
    let tipo = selected.parse::<TipoEmpleo>().ok()?;
    Some(suggested_income(tipo).to_string())
}

/// Placeholder hint for an empty market-price field on focus.
#[must_use]
pub fn price_hint(field: FieldId, current: &str) -> Option<&'static str> {
    if !current.is_empty() {
        return None;
    }
    match field {
        FieldId::PrecioSoya => Some("Valor sugerido: 420.90"),
        FieldId::PrecioVino => Some("Valor sugerido: 48.08"),
        _ => None,
    }
}

/// Collateral-to-loan multiplier for a selected collateral type.
///
/// Unrecognized selections use `1.0`.
#[must_use]
pub fn collateral_multiplier(selected: &str) -> f64 {
    match selected.parse::<TipoGarantia>() {
        Ok(TipoGarantia::Inmueble) => 1.2,
        Ok(TipoGarantia::Vehiculo) => 1.1,
        Ok(TipoGarantia::Ninguna) => 0.8,
        Err(_) => 1.0,
    }
}

/// Collateral value to fill in when the loan amount loses focus.
///
/// Requires a loan amount, a selected collateral type and an empty
/// collateral value. The result has two decimals.
#[must_use]
pub fn collateral_for_amount(
    amount: &str,
    collateral_type: &str,
    current_collateral: &str,
) -> Option<String> {
    if amount.is_empty() || collateral_type.is_empty() || !current_collateral.is_empty() {
        return None;
    }
    let amount = parse_number(amount)?;
    Some(to_fixed(amount * collateral_multiplier(collateral_type), 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_fills_only_empty_field() {
        assert_eq!(income_for_selection("Gobierno", "").as_deref(), Some("5000"));
        assert_eq!(income_for_selection("Agricola", "").as_deref(), Some("3500"));
        assert_eq!(income_for_selection("Gobierno", "1200"), None);
        assert_eq!(income_for_selection("", ""), None);
        assert_eq!(income_for_selection("Jubilado", ""), None);
    }

    #[test]
    fn price_hints_only_for_empty_price_fields() {
        assert_eq!(
            price_hint(FieldId::PrecioSoya, ""),
            Some("Valor sugerido: 420.90")
        );
        assert_eq!(
            price_hint(FieldId::PrecioVino, ""),
            Some("Valor sugerido: 48.08")
        );
        assert_eq!(price_hint(FieldId::PrecioVino, "50"), None);
        assert_eq!(price_hint(FieldId::Ingresos, ""), None);
    }

    #[test]
    fn collateral_suggestion_per_type() {
        assert_eq!(
            collateral_for_amount("1000", "Inmueble", "").as_deref(),
            Some("1200.00")
        );
        assert_eq!(
            collateral_for_amount("1000", "Vehiculo", "").as_deref(),
            Some("1100.00")
        );
        assert_eq!(
            collateral_for_amount("1000", "Ninguna", "").as_deref(),
            Some("800.00")
        );
        assert_eq!(
            collateral_for_amount("1000", "Maquinaria", "").as_deref(),
            Some("1000.00")
        );
    }

    #[test]
    fn collateral_suggestion_preconditions() {
        assert_eq!(collateral_for_amount("", "Inmueble", ""), None);
        assert_eq!(collateral_for_amount("1000", "", ""), None);
        assert_eq!(collateral_for_amount("1000", "Inmueble", "900"), None);
        assert_eq!(collateral_for_amount("mil", "Inmueble", ""), None);
    }
}
