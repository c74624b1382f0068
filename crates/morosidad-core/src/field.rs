#![forbid(unsafe_code)]

//! Applicant form fields and the categorical option sets.
//!
//! Every field is addressed by a [`FieldId`] whose DOM id and JSON key are
//! the same snake_case identifier (`edad`, `tipo_empleo`, ...).

use core::fmt;
use core::str::FromStr;

/// Semantic type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Whole number; parsed values are truncated toward zero.
    Integer,
    /// Floating point number, preserved as entered.
    Float,
    /// Free categorical string taken from a `<select>`.
    Category,
}

/// One applicant form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    Edad,
    Genero,
    Zona,
    TipoEmpleo,
    Antiguedad,
    Ingresos,
    ScoreCrediticio,
    PagosPrevios,
    CreditosPrevios,
    MontoCredito,
    PlazoMeses,
    DestinoCredito,
    TipoGarantia,
    ValorGarantia,
    PrecioSoya,
    PrecioVino,
    UsoProductos,
}

impl FieldId {
    /// All fields in payload order.
    pub const ALL: [Self; 17] = [
        Self::Edad,
        Self::Genero,
        Self::Zona,
        Self::TipoEmpleo,
        Self::Antiguedad,
        Self::Ingresos,
        Self::ScoreCrediticio,
        Self::PagosPrevios,
        Self::CreditosPrevios,
        Self::MontoCredito,
        Self::PlazoMeses,
        Self::DestinoCredito,
        Self::TipoGarantia,
        Self::ValorGarantia,
        Self::PrecioSoya,
        Self::PrecioVino,
        Self::UsoProductos,
    ];

    /// Numeric fields checked before submission, in check order.
    ///
    /// `plazo_meses` is a `<select>` on the page and is not part of this set.
    pub const VALIDATED_NUMERIC: [Self; 11] = [
        Self::Edad,
        Self::Antiguedad,
        Self::Ingresos,
        Self::ScoreCrediticio,
        Self::PagosPrevios,
        Self::CreditosPrevios,
        Self::MontoCredito,
        Self::ValorGarantia,
        Self::PrecioSoya,
        Self::PrecioVino,
        Self::UsoProductos,
    ];

    /// DOM element id, also the JSON key in the prediction payload.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Edad => "edad",
            Self::Genero => "genero",
            Self::Zona => "zona",
            Self::TipoEmpleo => "tipo_empleo",
            Self::Antiguedad => "antiguedad",
            Self::Ingresos => "ingresos",
            Self::ScoreCrediticio => "score_crediticio",
            Self::PagosPrevios => "pagos_previos",
            Self::CreditosPrevios => "creditos_previos",
            Self::MontoCredito => "monto_credito",
            Self::PlazoMeses => "plazo_meses",
            Self::DestinoCredito => "destino_credito",
            Self::TipoGarantia => "tipo_garantia",
            Self::ValorGarantia => "valor_garantia",
            Self::PrecioSoya => "precio_soya",
            Self::PrecioVino => "precio_vino",
            Self::UsoProductos => "uso_productos",
        }
    }

    /// Human-readable label used in user-facing messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edad => "Edad",
            Self::Genero => "Género",
            Self::Zona => "Zona",
            Self::TipoEmpleo => "Tipo de Empleo",
            Self::Antiguedad => "Antigüedad Laboral (años)",
            Self::Ingresos => "Ingresos Mensuales",
            Self::ScoreCrediticio => "Score Crediticio",
            Self::PagosPrevios => "Pagos Previos",
            Self::CreditosPrevios => "Créditos Previos",
            Self::MontoCredito => "Monto del Crédito",
            Self::PlazoMeses => "Plazo (meses)",
            Self::DestinoCredito => "Destino del Crédito",
            Self::TipoGarantia => "Tipo de Garantía",
            Self::ValorGarantia => "Valor de la Garantía",
            Self::PrecioSoya => "Precio de la Soya",
            Self::PrecioVino => "Precio del Vino",
            Self::UsoProductos => "Uso de Productos",
        }
    }

    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Edad
            | Self::Antiguedad
            | Self::PagosPrevios
            | Self::CreditosPrevios
            | Self::PlazoMeses
            | Self::UsoProductos => FieldKind::Integer,
            Self::Ingresos
            | Self::ScoreCrediticio
            | Self::MontoCredito
            | Self::ValorGarantia
            | Self::PrecioSoya
            | Self::PrecioVino => FieldKind::Float,
            Self::Genero
            | Self::Zona
            | Self::TipoEmpleo
            | Self::DestinoCredito
            | Self::TipoGarantia => FieldKind::Category,
        }
    }

    /// Look a field up by its DOM id.
    #[must_use]
    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.dom_id() == id)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

/// Error returned when a categorical value is outside its option set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} option: {value:?}")]
pub struct UnknownOption {
    pub field: FieldId,
    pub value: String,
}

macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident for $field:expr => { $($variant:ident = $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownOption {
                        field: $field,
                        value: s.to_owned(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

option_set! {
    /// Applicant gender.
    Genero for FieldId::Genero => { Masculino = "M", Femenino = "F" }
}

option_set! {
    /// Residence zone.
    Zona for FieldId::Zona => { Urbana = "Urbana", Rural = "Rural" }
}

option_set! {
    /// Employment category.
    TipoEmpleo for FieldId::TipoEmpleo => {
        Dependiente = "Dependiente",
        Independiente = "Independiente",
        Agricola = "Agricola",
        Gobierno = "Gobierno",
    }
}

option_set! {
    /// Declared use of the loan.
    DestinoCredito for FieldId::DestinoCredito => {
        Consumo = "Consumo",
        Comercial = "Comercial",
        Agricola = "Agricola",
    }
}

option_set! {
    /// Collateral backing the loan.
    TipoGarantia for FieldId::TipoGarantia => {
        Ninguna = "Ninguna",
        Vehiculo = "Vehiculo",
        Inmueble = "Inmueble",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_ids_round_trip() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::from_dom_id(field.dom_id()), Some(field));
        }
        assert_eq!(FieldId::from_dom_id("nombre"), None);
    }

    #[test]
    fn validated_set_is_numeric_and_excludes_term() {
        for field in FieldId::VALIDATED_NUMERIC {
            assert_ne!(field.kind(), FieldKind::Category, "{field}");
        }
        assert!(!FieldId::VALIDATED_NUMERIC.contains(&FieldId::PlazoMeses));
    }

    #[test]
    fn option_sets_parse_exact_values() {
        assert_eq!("Gobierno".parse::<TipoEmpleo>(), Ok(TipoEmpleo::Gobierno));
        assert_eq!("Inmueble".parse::<TipoGarantia>(), Ok(TipoGarantia::Inmueble));
        assert_eq!("F".parse::<Genero>(), Ok(Genero::Femenino));
        let err = "gobierno".parse::<TipoEmpleo>().unwrap_err();
        assert_eq!(err.field, FieldId::TipoEmpleo);
        assert_eq!(DestinoCredito::ALL.len(), 3);
    }
}
