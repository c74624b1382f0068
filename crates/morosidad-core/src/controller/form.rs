#![forbid(unsafe_code)]

//! Prediction form controller.

use core::time::Duration;

use crate::assist;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::field::FieldId;
use crate::form::{ApplicantProfile, FieldMark, FormSnapshot, INVALID_FORM_MESSAGE, validate};
use crate::handoff::{HandoffError, HandoffSlot, PrefilledProfile, TransientStore};
use crate::prediction::{PredictionResult, ResultView};

/// Background applied to fields the page filled in for the user.
pub const HIGHLIGHT_BACKGROUND: &str = "#fffacd";
/// Acknowledgment shown after a pre-filled profile was loaded.
pub const PREFILL_LOADED_MESSAGE: &str = "✅ Datos del perfil de ejemplo cargados. \
Puedes modificarlos o hacer clic en \"Predecir Morosidad\".";

/// Which of the mutually exclusive page states is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Input,
    Loading,
    Result,
}

/// User and network events the form reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMsg {
    Submit(FormSnapshot),
    PredictionSettled(Result<PredictionResult, ClientError>),
    EmploymentTypeChanged {
        selected: String,
        income: String,
    },
    PriceFieldFocused {
        field: FieldId,
        current: String,
    },
    LoanAmountBlurred {
        amount: String,
        collateral_type: String,
        collateral_value: String,
    },
    Reset,
    Print,
}

/// Side effects for the page adapter to apply, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEffect {
    /// Set the value of the element with this id.
    SetValue { id: String, value: String },
    /// Paint [`HIGHLIGHT_BACKGROUND`] behind the element.
    Highlight { id: String },
    ClearHighlight { id: String },
    MarkField { field: FieldId, mark: FieldMark },
    SetPlaceholder { field: FieldId, text: &'static str },
    /// Blocking message.
    Alert(String),
    SetLoadingVisible(bool),
    SetResultVisible(bool),
    /// `POST` the JSON body; the adapter answers with
    /// [`FormMsg::PredictionSettled`].
    SubmitPrediction { endpoint: String, body: String },
    /// Fill headline, badge, labels, risk, recommendation and timestamp.
    RenderResult(ResultView),
    SetBarWidths { no_moroso: String, moroso: String },
    /// Show the result container and smooth-scroll it into view.
    RevealResult,
    ResetFields,
    ScrollToTop,
    Print,
    After {
        delay: Duration,
        effect: Box<FormEffect>,
    },
}

impl FormEffect {
    fn after(delay: Duration, effect: Self) -> Self {
        Self::After {
            delay,
            effect: Box::new(effect),
        }
    }
}

/// State of the prediction form page.
#[derive(Debug, Clone)]
pub struct PredictionForm {
    config: ClientConfig,
    handoff: HandoffSlot<PrefilledProfile>,
    mode: DisplayMode,
    /// The in-flight prediction was reset away; its answer is dropped.
    discard_pending: bool,
    last_result: Option<PredictionResult>,
}

impl PredictionForm {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let handoff = HandoffSlot::new(config.handoff_key.clone());
        Self {
            config,
            handoff,
            mode: DisplayMode::Input,
            discard_pending: false,
            last_result: None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&PredictionResult> {
        self.last_result.as_ref()
    }

    /// Consume a pending pre-filled profile, if the store holds one.
    ///
    /// A malformed entry is dropped with a warning and nothing is filled.
    pub fn page_ready<S: TransientStore + ?Sized>(&mut self, store: &mut S) -> Vec<FormEffect> {
        match self.handoff.take(store) {
            Ok(Some(profile)) => self.prefill(&profile),
            Ok(None) => Vec::new(),
            Err(err @ HandoffError::Malformed { .. }) => {
                tracing::warn!(error = %err, "discarding pre-filled profile");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "pre-filled profile unavailable");
                Vec::new()
            }
        }
    }

    fn prefill(&self, profile: &PrefilledProfile) -> Vec<FormEffect> {
        let highlight = self.config.prefill_highlight();
        let mut effects = Vec::new();
        for (id, value) in profile.field_values() {
            effects.push(FormEffect::SetValue {
                id: id.clone(),
                value,
            });
            effects.push(FormEffect::Highlight { id: id.clone() });
            effects.push(FormEffect::after(highlight, FormEffect::ClearHighlight { id }));
        }
        effects.push(FormEffect::Alert(PREFILL_LOADED_MESSAGE.into()));
        effects.push(FormEffect::ScrollToTop);
        effects
    }

    pub fn update(&mut self, msg: FormMsg) -> Vec<FormEffect> {
        match msg {
            FormMsg::Submit(form) => self.submit(&form),
            FormMsg::PredictionSettled(outcome) => self.settle(outcome),
            FormMsg::EmploymentTypeChanged { selected, income } => {
                self.fill_assist(FieldId::Ingresos, assist::income_for_selection(&selected, &income))
            }
            FormMsg::PriceFieldFocused { field, current } => assist::price_hint(field, &current)
                .map(|text| vec![FormEffect::SetPlaceholder { field, text }])
                .unwrap_or_default(),
            FormMsg::LoanAmountBlurred {
                amount,
                collateral_type,
                collateral_value,
            } => self.fill_assist(
                FieldId::ValorGarantia,
                assist::collateral_for_amount(&amount, &collateral_type, &collateral_value),
            ),
            FormMsg::Reset => self.reset(),
            FormMsg::Print => vec![FormEffect::Print],
        }
    }

    fn reset(&mut self) -> Vec<FormEffect> {
        let mut effects = Vec::new();
        if self.mode == DisplayMode::Loading {
            // Stay in Loading until the request settles so it remains the
            // only one outstanding.
            tracing::debug!("reset while a prediction is in flight");
            self.discard_pending = true;
            effects.push(FormEffect::SetLoadingVisible(false));
        } else {
            self.mode = DisplayMode::Input;
        }
        effects.extend([
            FormEffect::SetResultVisible(false),
            FormEffect::ResetFields,
            FormEffect::ScrollToTop,
        ]);
        effects
    }

    fn fill_assist(&self, field: FieldId, suggestion: Option<String>) -> Vec<FormEffect> {
        let Some(value) = suggestion else {
            return Vec::new();
        };
        let id = field.dom_id().to_owned();
        tracing::debug!(field = %field, value = %value, "assist suggestion applied");
        vec![
            FormEffect::SetValue {
                id: id.clone(),
                value,
            },
            FormEffect::Highlight { id: id.clone() },
            FormEffect::after(
                self.config.assist_highlight(),
                FormEffect::ClearHighlight { id },
            ),
        ]
    }

    fn submit(&mut self, form: &FormSnapshot) -> Vec<FormEffect> {
        if self.mode == DisplayMode::Loading {
            tracing::debug!("submit ignored while a prediction is in flight");
            return Vec::new();
        }

        let report = validate(form);
        let mut effects: Vec<FormEffect> = report
            .marks()
            .iter()
            .map(|&(field, mark)| FormEffect::MarkField { field, mark })
            .collect();
        if let Some(message) = report.negative_message() {
            effects.push(FormEffect::Alert(message));
        }
        if !report.is_valid() {
            tracing::debug!(
                invalid = report.invalid_fields().count(),
                "form rejected by validation"
            );
            effects.push(FormEffect::Alert(INVALID_FORM_MESSAGE.into()));
            return effects;
        }

        let body = match ApplicantProfile::from_form(form)
            .map_err(ClientError::from)
            .and_then(|profile| profile.to_json().map_err(ClientError::from))
        {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, "could not build prediction payload");
                effects.push(FormEffect::Alert(err.user_message()));
                return effects;
            }
        };

        self.mode = DisplayMode::Loading;
        effects.extend([
            FormEffect::SetLoadingVisible(true),
            FormEffect::SetResultVisible(false),
            FormEffect::SubmitPrediction {
                endpoint: self.config.predict_endpoint.clone(),
                body,
            },
        ]);
        effects
    }

    fn settle(&mut self, outcome: Result<PredictionResult, ClientError>) -> Vec<FormEffect> {
        if self.discard_pending {
            self.discard_pending = false;
            self.mode = DisplayMode::Input;
            tracing::debug!(ok = outcome.is_ok(), "dropping prediction settled after reset");
            return Vec::new();
        }
        match outcome {
            Ok(result) => {
                tracing::debug!(
                    prediccion = result.prediccion,
                    riesgo = %result.riesgo,
                    "prediction received"
                );
                let view = ResultView::from_result(&result);
                let widths = FormEffect::SetBarWidths {
                    no_moroso: view.no_moroso_bar_width.clone(),
                    moroso: view.moroso_bar_width.clone(),
                };
                self.mode = DisplayMode::Result;
                self.last_result = Some(result);
                vec![
                    FormEffect::SetLoadingVisible(false),
                    FormEffect::RenderResult(view),
                    FormEffect::after(self.config.bar_animation_delay(), widths),
                    FormEffect::RevealResult,
                ]
            }
            Err(err) => {
                tracing::warn!(error = %err, "prediction request failed");
                self.mode = DisplayMode::Input;
                vec![
                    FormEffect::SetLoadingVisible(false),
                    FormEffect::Alert(err.user_message()),
                ]
            }
        }
    }
}
