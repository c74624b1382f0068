#![no_main]

use libfuzzer_sys::fuzz_target;
use morosidad_core::{ClientConfig, MemoryStore, PredictionForm, TransientStore};

fuzz_target!(|data: &[u8]| {
    // Whatever another page left behind, the form consumes it exactly once.
    let config = ClientConfig::default();
    let key = config.handoff_key.clone();
    let mut store = MemoryStore::new();
    store
        .set_item(&key, &String::from_utf8_lossy(data))
        .expect("memory store never fails");

    let mut form = PredictionForm::new(config);
    let _ = form.page_ready(&mut store);
    assert!(!store.contains(&key));
    assert!(form.page_ready(&mut store).is_empty());
});
