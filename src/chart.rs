//! JavaScript interop for Chart.js visualization.
//! Provides Rust bindings to chart helper functions defined in chart_helpers.js.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/chart_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = initBalanceChart)]
    pub fn init_balance_chart(canvas_id: &str, left_label: &str, right_label: &str);

    #[wasm_bindgen(js_name = updateBalanceChart)]
    fn update_balance_chart_js(left_kg: f64, right_kg: f64, over_limit: bool);
}

/// Redraw both side totals; bars turn red once the crew exceeds the safe limit.
pub fn update_balance_chart(left_kg: f64, right_kg: f64, over_limit: bool) {
    update_balance_chart_js(left_kg, right_kg, over_limit);
}
