//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Chart.js adapter lives in `assets/js/irradiance-chart.js` and is
//! evaluated as a global script (no ES modules), exposed via `window.*`.
//! This module serializes arguments and calls those globals.

static IRRADIANCE_CHART_JS: &str = include_str!("../assets/js/irradiance-chart.js");

/// Quote `s` as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('SIP JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize the chart adapter once Chart.js has loaded.
///
/// The adapter is evaluated at global scope via indirect eval, then its
/// functions are promoted to `window.*` explicitly.
pub fn init_charts() {
    let store_js = format!("window.__sipChartScripts = {};", js_string(IRRADIANCE_CHART_JS));
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__sipChartsReady) return;
            var waitForChart = setInterval(function() {
                if (typeof Chart !== 'undefined') {
                    clearInterval(waitForChart);
                    if (window.__sipChartsReady) return;
                    (0, eval)(window.__sipChartScripts);
                    delete window.__sipChartScripts;
                    if (typeof renderIrradianceChart !== 'undefined') window.renderIrradianceChart = renderIrradianceChart;
                    if (typeof destroyIrradianceChart !== 'undefined') window.destroyIrradianceChart = destroyIrradianceChart;
                    if (typeof saveIrradianceChartImage !== 'undefined') window.saveIrradianceChartImage = saveIrradianceChartImage;
                    window.__sipChartsReady = true;
                    console.log('SIP charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Script that queues `config_json` for `container_id` and draws it once
/// Chart.js, the adapter and the container all exist.
///
/// Only the latest config per container is kept in `window.__sipPending`,
/// and at most one poll runs per container. Destroying the chart clears the
/// pending config, so a queued render never draws after a reset.
fn render_chart_js(container_id: &str, config_json: &str) -> String {
    let id = js_string(container_id);
    let config = js_string(config_json);
    format!(
        r#"
        (function() {{
            window.__sipPending = window.__sipPending || {{}};
            window.__sipPolls = window.__sipPolls || {{}};
            window.__sipPending[{id}] = {config};
            if (window.__sipPolls[{id}]) return;
            window.__sipPolls[{id}] = setInterval(function() {{
                if (window.__sipChartsReady &&
                    typeof window.renderIrradianceChart !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(window.__sipPolls[{id}]);
                    delete window.__sipPolls[{id}];
                    var pending = window.__sipPending[{id}];
                    delete window.__sipPending[{id}];
                    if (pending === undefined) return;
                    try {{
                        window.renderIrradianceChart({id}, pending);
                    }} catch(e) {{ console.error('[SIP] renderIrradianceChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    )
}

fn destroy_chart_js(container_id: &str) -> String {
    let id = js_string(container_id);
    format!(
        "if (window.__sipPending) {{ delete window.__sipPending[{id}]; }} \
         if (window.destroyIrradianceChart) {{ window.destroyIrradianceChart({id}); }} \
         else {{ var el = document.getElementById({id}); if (el) el.innerHTML = ''; }}"
    )
}

/// Replace the chart in `container_id` with one built from `config_json`.
pub fn render_chart(container_id: &str, config_json: &str) {
    call_js(&render_chart_js(container_id, config_json));
}

/// Destroy the chart in the given container, drop any queued render, and
/// clear the container.
pub fn destroy_chart(container_id: &str) {
    call_js(&destroy_chart_js(container_id));
}

/// Download the chart in `container_id` as a PNG named `file_name`.
///
/// Returns `false` when no chart is drawn there yet.
pub fn save_chart_image(container_id: &str, file_name: &str) -> bool {
    let code = format!(
        "(function() {{ try {{ return !!(window.saveIrradianceChartImage && \
         window.saveIrradianceChartImage({}, {})); }} \
         catch(e) {{ console.warn('SIP chart image failed:', e); return false; }} }})()",
        js_string(container_id),
        js_string(file_name)
    );
    js_sys::eval(&code)
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
