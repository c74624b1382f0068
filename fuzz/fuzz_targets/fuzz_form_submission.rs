#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use morosidad_core::form::validate;
use morosidad_core::{
    ApplicantProfile, ClientConfig, FieldId, FormEffect, FormMsg, FormSnapshot, PredictionForm,
};

#[derive(Arbitrary, Debug)]
struct Submission {
    // One raw value per field, in payload order; missing entries stay empty.
    values: Vec<String>,
    resubmit: bool,
}

fuzz_target!(|input: Submission| {
    let form: FormSnapshot = FieldId::ALL
        .into_iter()
        .zip(input.values)
        .collect();

    let report = validate(&form);
    let payload = ApplicantProfile::from_form(&form);

    let mut controller = PredictionForm::new(ClientConfig::default());
    let effects = controller.update(FormMsg::Submit(form.clone()));
    let posted = effects
        .iter()
        .filter(|effect| matches!(effect, FormEffect::SubmitPrediction { .. }))
        .count();

    // A request goes out exactly when validation passes and the payload builds.
    assert_eq!(posted, usize::from(report.is_valid() && payload.is_ok()));
    if posted == 0 {
        assert!(
            effects
                .iter()
                .any(|effect| matches!(effect, FormEffect::Alert(_)))
        );
    }

    if input.resubmit && posted == 1 {
        assert!(controller.update(FormMsg::Submit(form)).is_empty());
    }
});
