#![forbid(unsafe_code)]

//! Binds [`StatsPanel`] to the statistics page.
//!
//! A short browser interval feeds elapsed time into the panel's clock; the
//! panel decides when a refresh is due.

use core::time::Duration;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use morosidad_core::{ClientConfig, StatsEffect, StatsMsg, StatsPanel};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlButtonElement;
use web_time::Instant;

use crate::{dom, dom_ids, http, markup};

/// Upper bound on how late a refresh may fire.
const TICK: Duration = Duration::from_millis(250);

struct StatsPage {
    panel: RefCell<StatsPanel>,
    mounted_at: Instant,
    interval: Cell<Option<i32>>,
    ticker: RefCell<Option<Closure<dyn FnMut()>>>,
    button: RefCell<Option<HtmlButtonElement>>,
}

impl StatsPage {
    fn dispatch(self: &Rc<Self>, msg: StatsMsg) {
        let effects = self.panel.borrow_mut().update(msg);
        self.apply(effects);
    }

    fn tick(self: &Rc<Self>) {
        let effects = self.panel.borrow_mut().set_time(self.mounted_at.elapsed());
        self.apply(effects);
    }

    fn apply(self: &Rc<Self>, effects: Vec<StatsEffect>) {
        for effect in effects {
            self.apply_one(effect);
        }
    }

    fn apply_one(self: &Rc<Self>, effect: StatsEffect) {
        let button = self.button.borrow().clone();
        self.apply_to(effect, button);
    }

    /// Apply `effect`, with button feedback going to `button`. Deferred
    /// effects keep the button current when they were scheduled.
    fn apply_to(self: &Rc<Self>, effect: StatsEffect, button: Option<HtmlButtonElement>) {
        match effect {
            StatsEffect::Fetch { endpoint, origin } => {
                let page = Rc::clone(self);
                spawn_local(async move {
                    let result = http::get_stats(&endpoint).await;
                    page.dispatch(StatsMsg::Refreshed { origin, result });
                });
            }
            StatsEffect::Render(view) => {
                dom::set_text(dom_ids::STATS_TOTAL, &view.total);
                dom::set_text(dom_ids::STATS_NO_MOROSOS, &view.no_morosos);
                dom::set_text(dom_ids::STATS_MOROSOS, &view.morosos);
                dom::set_text(dom_ids::STATS_AVERAGE, &view.prob_promedio);
                dom::set_text(dom_ids::STATS_LAST, &view.ultima_prediccion);
                if let Some(chart) = dom::element(dom_ids::STATS_CHART) {
                    chart.set_outer_html(&markup::chart_html(&view.chart));
                }
            }
            StatsEffect::SetRefreshButton { label, disabled } => {
                if let Some(button) = button {
                    button.set_text_content(Some(&label));
                    button.set_disabled(disabled);
                }
            }
            StatsEffect::After { delay, effect } => {
                let page = Rc::clone(self);
                if let Err(err) = dom::set_timeout(delay, move || page.apply_to(*effect, button)) {
                    tracing::warn!(error = %dom::describe(&err), "could not schedule deferred effect");
                }
            }
        }
    }

    fn stop(&self) {
        if let Some(id) = self.interval.take() {
            if let Ok(window) = dom::window() {
                window.clear_interval_with_handle(id);
            }
        }
        self.ticker.borrow_mut().take();
        self.panel.borrow_mut().unmount();
    }
}

/// Running statistics panel. Dropping the handle does not stop it; call
/// `stop()`.
#[wasm_bindgen]
pub struct StatsHandle {
    inner: Rc<StatsPage>,
}

impl StatsHandle {
    pub fn mount(config: ClientConfig) -> Result<Self, JsValue> {
        let tick = TICK.min(config.stats_refresh_interval());
        let page = Rc::new(StatsPage {
            panel: RefCell::new(StatsPanel::new(config)),
            mounted_at: Instant::now(),
            interval: Cell::new(None),
            ticker: RefCell::new(None),
            button: RefCell::new(None),
        });

        let weak = Rc::downgrade(&page);
        let ticker = Closure::<dyn FnMut()>::new(move || {
            if let Some(page) = weak.upgrade() {
                page.tick();
            }
        });
        let id = dom::window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            ticker.as_ref().unchecked_ref(),
            dom::millis(tick),
        )?;
        page.interval.set(Some(id));
        *page.ticker.borrow_mut() = Some(ticker);

        let effects = page.panel.borrow_mut().mount();
        page.apply(effects);
        Ok(Self { inner: page })
    }
}

#[wasm_bindgen]
impl StatsHandle {
    /// Stop periodic refreshing. Fetches already in flight still render.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Fetch now. When `button` is given it shows progress feedback.
    ///
    /// Ignored while an earlier manual refresh is pending, so the button
    /// that started it is the one whose label gets restored.
    pub fn refresh(&self, button: Option<HtmlButtonElement>) {
        if self.inner.panel.borrow().manual_refresh_pending() {
            tracing::debug!("manual refresh already pending");
            return;
        }
        let button_label = button
            .as_ref()
            .and_then(|button| button.text_content())
            .unwrap_or_default();
        *self.inner.button.borrow_mut() = button;
        self.inner.dispatch(StatsMsg::ManualRefresh { button_label });
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.panel.borrow().is_mounted()
    }

    /// Number of failed fetches since mount.
    pub fn failures(&self) -> f64 {
        self.inner.panel.borrow().failures() as f64
    }
}
