#![no_main]

use libfuzzer_sys::fuzz_target;
use morosidad_core::prediction::decode_prediction_response;
use morosidad_core::stats::decode_stats_response;
use morosidad_core::{ResultView, StatsView};

fuzz_target!(|data: &[u8]| {
    // First two bytes pick the status code; the rest is the body.
    if data.len() < 2 {
        return;
    }
    let status = 100 + u16::from_le_bytes([data[0], data[1]]) % 500;
    let body = String::from_utf8_lossy(&data[2..]);

    match decode_prediction_response(status, &body) {
        Ok(result) => {
            let view = ResultView::from_result(&result);
            assert!(!view.risk_class.contains(' '));
        }
        Err(err) => {
            assert!(!err.user_message().is_empty());
        }
    }

    if let Ok(snapshot) = decode_stats_response(status, &body) {
        let view = StatsView::from_snapshot(&snapshot);
        for bar in view.chart.bars() {
            assert!(!bar.percent.is_nan());
        }
    }
});
