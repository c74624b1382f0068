#![forbid(unsafe_code)]

//! `fetch` client for the prediction and statistics endpoints.

use morosidad_core::prediction::decode_prediction_response;
use morosidad_core::stats::decode_stats_response;
use morosidad_core::{ClientError, PredictionResult, StatsSnapshot};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::dom;

fn transport(err: JsValue) -> ClientError {
    ClientError::Transport(dom::describe(&err))
}

/// Perform one request and return the status and the body text.
async fn exchange(method: &str, url: &str, body: Option<&str>) -> Result<(u16, String), ClientError> {
    let init = RequestInit::new();
    init.set_method(method);
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(body));
    }
    let request = Request::new_with_str_and_init(url, &init).map_err(transport)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(transport)?;
    }

    let window = dom::window().map_err(transport)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;
    let text = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?;
    let status = response.status();
    tracing::debug!(method, url, status, "request settled");
    Ok((status, text.as_string().unwrap_or_default()))
}

pub async fn post_prediction(endpoint: &str, body: &str) -> Result<PredictionResult, ClientError> {
    let (status, text) = exchange("POST", endpoint, Some(body)).await?;
    decode_prediction_response(status, &text)
}

pub async fn get_stats(endpoint: &str) -> Result<StatsSnapshot, ClientError> {
    let (status, text) = exchange("GET", endpoint, None).await?;
    decode_stats_response(status, &text)
}
