//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Chart.js glue lives in `assets/js/production-charts.js` and is
//! evaluated once Chart.js is on the page. Its functions are exposed via
//! `window.*`; this module serializes chart state and calls those globals.

// Embed the Chart.js glue at compile time
static PRODUCTION_CHARTS_JS: &str = include_str!("../assets/js/production-charts.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('OPF JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize the chart glue with a wait-for-Chart.js polling loop.
///
/// The glue is stored on `window` and evaluated at global scope by indirect
/// eval once `Chart` exists, so its function declarations become globals.
pub fn init_charts() {
    let store_js = format!(
        "window.__opfChartScripts = {};",
        serde_json::to_string(PRODUCTION_CHARTS_JS).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__opfChartsReady || window.__opfChartsPending) return;
            window.__opfChartsPending = true;
            var waitForChart = setInterval(function() {
                if (typeof Chart !== 'undefined') {
                    clearInterval(waitForChart);
                    (0, eval)(window.__opfChartScripts);
                    delete window.__opfChartScripts;
                    if (typeof renderProductionChart !== 'undefined') window.renderProductionChart = renderProductionChart;
                    if (typeof createProductionChart !== 'undefined') window.createProductionChart = createProductionChart;
                    if (typeof destroyProductionChart !== 'undefined') window.destroyProductionChart = destroyProductionChart;
                    window.__opfChartsReady = true;
                    console.log('OPF charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Run `call` once the glue is loaded and the canvas exists.
fn when_ready(canvas_id: &str, function: &str, call: &str) {
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__opfChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById('{canvas_id}')) {{
                    clearInterval(poll);
                    try {{
                        {call}
                    }} catch(e) {{ console.error('[OPF] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Draw `state_json` on the canvas, updating the existing chart in place.
///
/// `state_json` must be a serialized `ChartState`; it is inlined as a JS
/// object literal.
pub fn render_chart(canvas_id: &str, state_json: &str) {
    when_ready(
        canvas_id,
        "renderProductionChart",
        &format!("window.renderProductionChart('{canvas_id}', {state_json});"),
    );
}

/// Create a brand new chart on the canvas. The caller must destroy the
/// previous one first.
pub fn create_chart(canvas_id: &str, state_json: &str) {
    when_ready(
        canvas_id,
        "createProductionChart",
        &format!("window.createProductionChart('{canvas_id}', {state_json});"),
    );
}

/// Destroy the chart bound to the canvas and release it.
pub fn destroy_chart(canvas_id: &str) {
    call_js(&format!(
        "if (window.destroyProductionChart) window.destroyProductionChart('{}');",
        canvas_id
    ));
}
