#![forbid(unsafe_code)]

//! Binds [`PredictionForm`] to the page and applies its effects.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use morosidad_core::controller::form::HIGHLIGHT_BACKGROUND;
use morosidad_core::{ClientConfig, FieldId, FormEffect, FormMsg, FormSnapshot, PredictionForm};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlFormElement;

use crate::storage::SessionStore;
use crate::{dom, dom_ids, http};

thread_local! {
    static MOUNTED: RefCell<Option<Rc<FormPage>>> = const { RefCell::new(None) };
}

pub struct FormPage {
    controller: RefCell<PredictionForm>,
}

impl FormPage {
    /// Attach listeners, consume a pending pre-filled profile and remember
    /// the page for the global actions.
    pub fn mount(config: ClientConfig) -> Result<Rc<Self>, JsValue> {
        let page = Rc::new(Self {
            controller: RefCell::new(PredictionForm::new(config)),
        });
        page.bind()?;

        let effects = match SessionStore::open() {
            Ok(mut store) => page.controller.borrow_mut().page_ready(&mut store),
            Err(err) => {
                tracing::warn!(error = %err, "pre-filled profile unavailable");
                Vec::new()
            }
        };
        page.apply(effects);

        MOUNTED.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&page)));
        tracing::info!("prediction form mounted");
        Ok(page)
    }

    pub fn current() -> Option<Rc<Self>> {
        MOUNTED.with(|slot| slot.borrow().clone())
    }

    pub fn dispatch(self: &Rc<Self>, msg: FormMsg) {
        let effects = self.controller.borrow_mut().update(msg);
        self.apply(effects);
    }

    fn bind(self: &Rc<Self>) -> Result<(), JsValue> {
        if let Some(form) = dom::element(dom_ids::FORM) {
            let page = Rc::downgrade(self);
            dom::listen(&form, "submit", move |event| {
                event.prevent_default();
                with_page(&page, |page| page.dispatch(FormMsg::Submit(read_form())));
            })?;
        }

        if let Some(select) = dom::element(FieldId::TipoEmpleo.dom_id()) {
            let page = Rc::downgrade(self);
            dom::listen(&select, "change", move |_| {
                with_page(&page, |page| {
                    page.dispatch(FormMsg::EmploymentTypeChanged {
                        selected: dom::field_value(FieldId::TipoEmpleo.dom_id()),
                        income: dom::field_value(FieldId::Ingresos.dom_id()),
                    });
                });
            })?;
        }

        for field in [FieldId::PrecioSoya, FieldId::PrecioVino] {
            if let Some(input) = dom::element(field.dom_id()) {
                let page = Rc::downgrade(self);
                dom::listen(&input, "focus", move |_| {
                    with_page(&page, |page| {
                        page.dispatch(FormMsg::PriceFieldFocused {
                            field,
                            current: dom::field_value(field.dom_id()),
                        });
                    });
                })?;
            }
        }

        if let Some(amount) = dom::element(FieldId::MontoCredito.dom_id()) {
            let page = Rc::downgrade(self);
            dom::listen(&amount, "blur", move |_| {
                with_page(&page, |page| {
                    page.dispatch(FormMsg::LoanAmountBlurred {
                        amount: dom::field_value(FieldId::MontoCredito.dom_id()),
                        collateral_type: dom::field_value(FieldId::TipoGarantia.dom_id()),
                        collateral_value: dom::field_value(FieldId::ValorGarantia.dom_id()),
                    });
                });
            })?;
        }
        Ok(())
    }

    fn apply(self: &Rc<Self>, effects: Vec<FormEffect>) {
        for effect in effects {
            self.apply_one(effect);
        }
    }

    fn apply_one(self: &Rc<Self>, effect: FormEffect) {
        match effect {
            FormEffect::SetValue { id, value } => dom::set_field_value(&id, &value),
            FormEffect::Highlight { id } => {
                dom::set_style(&id, "background-color", HIGHLIGHT_BACKGROUND);
            }
            FormEffect::ClearHighlight { id } => dom::set_style(&id, "background-color", ""),
            FormEffect::MarkField { field, mark } => {
                dom::set_style(field.dom_id(), "border-color", mark.border_color());
            }
            FormEffect::SetPlaceholder { field, text } => dom::set_placeholder(field.dom_id(), text),
            FormEffect::Alert(message) => dom::alert(&message),
            FormEffect::SetLoadingVisible(visible) => dom::set_visible(dom_ids::LOADING, visible),
            FormEffect::SetResultVisible(visible) => {
                dom::set_visible(dom_ids::RESULT_CONTAINER, visible);
            }
            FormEffect::SubmitPrediction { endpoint, body } => {
                let page = Rc::clone(self);
                spawn_local(async move {
                    let outcome = http::post_prediction(&endpoint, &body).await;
                    page.dispatch(FormMsg::PredictionSettled(outcome));
                });
            }
            FormEffect::RenderResult(view) => {
                dom::set_text(dom_ids::RESULT_TITLE, &view.headline);
                if let Some(badge) = dom::element(dom_ids::RESULT_BADGE) {
                    badge.set_text_content(Some(&view.headline));
                    badge.set_class_name(view.badge_class);
                }
                dom::set_text(dom_ids::PROB_NO_MOROSO, &view.prob_no_moroso_label);
                dom::set_text(dom_ids::PROB_MOROSO, &view.prob_moroso_label);
                if let Some(risk) = dom::element(dom_ids::RISK_LEVEL) {
                    risk.set_text_content(Some(&view.risk_label));
                    risk.set_class_name(&view.risk_class);
                }
                dom::set_text(dom_ids::RECOMMENDATION, &view.recommendation);
                dom::set_text(dom_ids::TIMESTAMP, &view.timestamp);
            }
            FormEffect::SetBarWidths { no_moroso, moroso } => {
                dom::set_style(dom_ids::PROB_NO_MOROSO_BAR, "width", &no_moroso);
                dom::set_style(dom_ids::PROB_MOROSO_BAR, "width", &moroso);
            }
            FormEffect::RevealResult => {
                dom::set_visible(dom_ids::RESULT_CONTAINER, true);
                dom::scroll_into_view(dom_ids::RESULT_CONTAINER);
            }
            FormEffect::ResetFields => {
                if let Some(form) = dom::element(dom_ids::FORM)
                    .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
                {
                    form.reset();
                }
            }
            FormEffect::ScrollToTop => dom::scroll_to_top(),
            FormEffect::Print => {
                if let Ok(window) = dom::window() {
                    let _ = window.print();
                }
            }
            FormEffect::After { delay, effect } => {
                let page = Rc::clone(self);
                if let Err(err) = dom::set_timeout(delay, move || page.apply_one(*effect)) {
                    tracing::warn!(error = %dom::describe(&err), "could not schedule deferred effect");
                }
            }
        }
    }
}

fn with_page(page: &Weak<FormPage>, f: impl FnOnce(&Rc<FormPage>)) {
    if let Some(page) = page.upgrade() {
        f(&page);
    }
}

/// Raw values of every form field, in payload order.
fn read_form() -> FormSnapshot {
    FieldId::ALL
        .into_iter()
        .map(|field| (field, dom::field_value(field.dom_id())))
        .collect()
}
