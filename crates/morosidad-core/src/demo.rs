#![forbid(unsafe_code)]

//! Canned applicant profiles for the demo page.
//!
//! Staging a profile writes it into the handoff slot; the form page picks it
//! up on its next load.

use thiserror::Error;

use crate::form::ApplicantProfile;
use crate::handoff::{HandoffError, HandoffSlot, PrefilledProfile, TransientStore};

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("no demo profile at index {0}")]
    UnknownProfile(usize),
    #[error(transparent)]
    Handoff(#[from] HandoffError),
}

/// A named example applicant.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoProfile {
    pub name: &'static str,
    pub profile: ApplicantProfile,
}

impl DemoProfile {
    /// Flatten into the handoff's field-id → value mapping.
    #[must_use]
    pub fn to_prefilled(&self) -> PrefilledProfile {
        let mut prefilled = PrefilledProfile::default();
        let p = &self.profile;
        prefilled.insert("edad", p.edad);
        prefilled.insert("genero", p.genero.as_str());
        prefilled.insert("zona", p.zona.as_str());
        prefilled.insert("tipo_empleo", p.tipo_empleo.as_str());
        prefilled.insert("antiguedad", p.antiguedad);
        prefilled.insert("ingresos", p.ingresos);
        prefilled.insert("score_crediticio", p.score_crediticio);
        prefilled.insert("pagos_previos", p.pagos_previos);
        prefilled.insert("creditos_previos", p.creditos_previos);
        prefilled.insert("monto_credito", p.monto_credito);
        prefilled.insert("plazo_meses", p.plazo_meses);
        prefilled.insert("destino_credito", p.destino_credito.as_str());
        prefilled.insert("tipo_garantia", p.tipo_garantia.as_str());
        prefilled.insert("valor_garantia", p.valor_garantia);
        prefilled.insert("precio_soya", p.precio_soya);
        prefilled.insert("precio_vino", p.precio_vino);
        prefilled.insert("uso_productos", p.uso_productos);
        prefilled
    }
}

#[allow(clippy::too_many_arguments)]
fn applicant(
    edad: i64,
    genero: &str,
    zona: &str,
    tipo_empleo: &str,
    antiguedad: i64,
    ingresos: f64,
    score_crediticio: f64,
    pagos_previos: i64,
    creditos_previos: i64,
    monto_credito: f64,
    plazo_meses: i64,
    destino_credito: &str,
    tipo_garantia: &str,
    valor_garantia: f64,
    precio_soya: f64,
    precio_vino: f64,
    uso_productos: i64,
) -> ApplicantProfile {
    ApplicantProfile {
        edad,
        genero: genero.into(),
        zona: zona.into(),
        tipo_empleo: tipo_empleo.into(),
        antiguedad,
        ingresos,
        score_crediticio,
        pagos_previos,
        creditos_previos,
        monto_credito,
        plazo_meses,
        destino_credito: destino_credito.into(),
        tipo_garantia: tipo_garantia.into(),
        valor_garantia,
        precio_soya,
        precio_vino,
        uso_productos,
    }
}

/// The demo page's example applicants, in display order.
#[must_use]
pub fn demo_profiles() -> Vec<DemoProfile> {
    vec![
        DemoProfile {
            name: "Perfil Moderado",
            profile: applicant(
                35, "M", "Urbana", "Dependiente", 8, 4500.0, 720.0, 3, 2, 50_000.0, 24,
                "Consumo", "Vehiculo", 55_000.0, 420.5, 48.0, 2,
            ),
        },
        DemoProfile {
            name: "Alto Riesgo",
            profile: applicant(
                22, "F", "Rural", "Independiente", 1, 2000.0, 550.0, 0, 0, 80_000.0, 48,
                "Comercial", "Ninguna", 10_000.0, 380.0, 55.0, 0,
            ),
        },
        DemoProfile {
            name: "Bajo Riesgo",
            profile: applicant(
                45, "M", "Urbana", "Gobierno", 20, 8000.0, 810.0, 5, 8, 30_000.0, 12,
                "Consumo", "Inmueble", 120_000.0, 430.0, 45.0, 4,
            ),
        },
    ]
}

/// Write demo profile `index` into `slot` for the form page to consume.
pub fn stage_demo_profile<S: TransientStore + ?Sized>(
    index: usize,
    slot: &HandoffSlot<PrefilledProfile>,
    store: &mut S,
) -> Result<&'static str, DemoError> {
    let demo = demo_profiles()
        .into_iter()
        .nth(index)
        .ok_or(DemoError::UnknownProfile(index))?;
    slot.offer(store, &demo.to_prefilled())?;
    tracing::info!(index, name = demo.name, "demo profile staged");
    Ok(demo.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormSnapshot, validate};
    use crate::field::FieldId;
    use crate::handoff::MemoryStore;

    #[test]
    fn every_demo_profile_passes_validation_and_round_trips() {
        for demo in demo_profiles() {
            let form: FormSnapshot = demo
                .to_prefilled()
                .field_values()
                .into_iter()
                .filter_map(|(id, value)| FieldId::from_dom_id(&id).map(|field| (field, value)))
                .collect();
            assert!(validate(&form).is_valid(), "{}", demo.name);
            assert_eq!(ApplicantProfile::from_form(&form).unwrap(), demo.profile);
        }
    }

    #[test]
    fn staging_writes_the_slot() {
        let mut store = MemoryStore::new();
        let slot = HandoffSlot::new("perfilPrecargado");
        assert_eq!(stage_demo_profile(1, &slot, &mut store).unwrap(), "Alto Riesgo");
        let staged = slot.take(&mut store).unwrap().unwrap();
        assert_eq!(staged, demo_profiles()[1].to_prefilled());
    }

    #[test]
    fn unknown_index_is_rejected() {
        let mut store = MemoryStore::new();
        let slot = HandoffSlot::new("perfilPrecargado");
        assert!(matches!(
            stage_demo_profile(9, &slot, &mut store),
            Err(DemoError::UnknownProfile(9))
        ));
        assert!(!store.contains("perfilPrecargado"));
    }
}
