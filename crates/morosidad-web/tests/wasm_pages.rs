#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Event, HtmlButtonElement, HtmlInputElement, HtmlSelectElement};

wasm_bindgen_test_configure!(run_in_browser);

const FORM_MARKUP: &str = r#"
<form id="prediccion-form">
  <select id="tipo_empleo">
    <option value="">--</option>
    <option value="Dependiente">Dependiente</option>
    <option value="Gobierno">Gobierno</option>
  </select>
  <input id="ingresos" type="number">
  <input id="monto_credito" type="number">
  <select id="tipo_garantia">
    <option value="">--</option>
    <option value="Inmueble">Inmueble</option>
  </select>
  <input id="valor_garantia" type="number">
  <input id="precio_soya" type="number">
</form>
"#;

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn input(id: &str) -> HtmlInputElement {
    document().get_element_by_id(id).unwrap().dyn_into().unwrap()
}

fn select(id: &str) -> HtmlSelectElement {
    document().get_element_by_id(id).unwrap().dyn_into().unwrap()
}

fn fire(id: &str, kind: &str) {
    let target = document().get_element_by_id(id).unwrap();
    target.dispatch_event(&Event::new(kind).unwrap()).unwrap();
}

#[wasm_bindgen_test]
fn currency_helper_normalizes_amounts() {
    assert_eq!(morosidad_web::formatear_moneda("$1,234.5"), "1234.50");
    assert_eq!(morosidad_web::formatear_moneda("abc"), "abc");
}

#[wasm_bindgen_test]
fn form_assists_fill_empty_fields() {
    document().body().unwrap().set_inner_html(FORM_MARKUP);
    morosidad_web::mount_prediction_form(None).unwrap();

    select("tipo_empleo").set_value("Gobierno");
    fire("tipo_empleo", "change");
    assert_eq!(input("ingresos").value(), "5000");

    select("tipo_garantia").set_value("Inmueble");
    input("monto_credito").set_value("1000");
    fire("monto_credito", "blur");
    assert_eq!(input("valor_garantia").value(), "1200.00");

    fire("precio_soya", "focus");
    assert_eq!(input("precio_soya").placeholder(), "Valor sugerido: 420.90");
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let err = morosidad_web::mount_statistics_panel(Some(
        r#"{"stats_refresh_interval_ms": 0}"#.to_owned(),
    ));
    assert!(err.is_err());
}

#[wasm_bindgen_test]
fn statistics_panel_stops() {
    let handle = morosidad_web::mount_statistics_panel(None).unwrap();
    assert!(handle.is_running());
    handle.stop();
    assert!(!handle.is_running());
}

#[wasm_bindgen_test]
fn pending_manual_refresh_keeps_its_button() {
    let handle = morosidad_web::mount_statistics_panel(None).unwrap();
    let button: HtmlButtonElement = document()
        .create_element("button")
        .unwrap()
        .dyn_into()
        .unwrap();
    button.set_text_content(Some("🔄 Actualizar"));

    handle.refresh(Some(button.clone()));
    assert_eq!(button.text_content().as_deref(), Some("Actualizando..."));
    assert!(button.disabled());

    // A buttonless refresh while the first is pending changes nothing.
    handle.refresh(None);
    assert_eq!(button.text_content().as_deref(), Some("Actualizando..."));
    assert!(button.disabled());
    handle.stop();
}
