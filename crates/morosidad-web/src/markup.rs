#![forbid(unsafe_code)]

//! HTML for the statistics bar visualization.
//!
//! The chart container is replaced wholesale on every refresh, so the output
//! carries its own wrapper element with [`crate::dom_ids::STATS_CHART`].

use core::fmt::Write as _;

use morosidad_core::stats::{Bar, BarTone};
use morosidad_core::BarChart;

use crate::dom_ids;

const TRACK_STYLE: &str =
    "background: #ecf0f1; height: 40px; border-radius: 20px; overflow: hidden;";

fn gradient(tone: BarTone) -> &'static str {
    match tone {
        BarTone::Positive => "linear-gradient(90deg, #27ae60, #2ecc71)",
        BarTone::Negative => "linear-gradient(90deg, #e74c3c, #c0392b)",
    }
}

fn write_bar(out: &mut String, bar: &Bar) {
    let _ = write!(
        out,
        "<div style=\"margin-bottom: 30px;\">\
<div style=\"display: flex; justify-content: space-between; margin-bottom: 10px;\">\
<span style=\"font-weight: bold;\">{label}</span>\
<span style=\"font-weight: bold;\">{percent}</span>\
</div>\
<div style=\"{TRACK_STYLE}\">\
<div style=\"background: {gradient}; height: 100%; width: {width}; transition: width 1s ease;\"></div>\
</div>\
</div>",
        label = bar.label,
        percent = bar.percent_label(),
        gradient = gradient(bar.tone),
        width = bar.width_css(),
    );
}

/// Full replacement markup for the chart container.
#[must_use]
pub fn chart_html(chart: &BarChart) -> String {
    let mut out = String::with_capacity(1536);
    let _ = write!(
        out,
        "<div id=\"{}\"><div style=\"max-width: 600px; margin: 20px auto;\">",
        dom_ids::STATS_CHART
    );
    for bar in chart.bars() {
        write_bar(&mut out, bar);
    }
    let _ = write!(
        out,
        "<div style=\"text-align: center; margin-top: 30px; padding: 20px; \
background: #f8f9fa; border-radius: 10px;\">\
<p style=\"font-size: 1.2em; margin: 0;\">\
<strong>Total de Evaluaciones:</strong> {}</p></div></div></div>",
        chart.total
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_carries_both_bars_in_order() {
        let html = chart_html(&BarChart::from_counts(80, 20, 100));
        let positive = html.find("No Morosos").expect("positive bar");
        let negative = html.rfind(">Morosos<").expect("negative bar");
        assert!(positive < negative);
        assert!(html.contains(">80.0%<"));
        assert!(html.contains(">20.0%<"));
        assert!(html.contains("width: 80%;"));
        assert!(html.contains("#27ae60, #2ecc71"));
        assert!(html.contains("#e74c3c, #c0392b"));
        assert!(html.contains("<strong>Total de Evaluaciones:</strong> 100</p>"));
    }

    #[test]
    fn chart_keeps_its_container_id() {
        let html = chart_html(&BarChart::from_counts(0, 0, 0));
        assert!(html.starts_with("<div id=\"prediccionesChart\">"));
        assert_eq!(html.matches(">0.0%<").count(), 2);
        assert!(html.contains("</strong> 0</p>"));
        assert!(html.ends_with("</div></div></div>"));
    }
}
