//! Browser implementation of [`ChartView`].

use crate::js_bridge;
use dioxus::prelude::*;
use sip_chart::chartjs::to_chart_config;
use sip_chart::controller::ChartView;
use sip_chart::descriptor::RenderDescriptor;

/// Draws descriptors with Chart.js into a container element and reports
/// errors through the page's error signal.
pub struct JsChartView {
    container_id: &'static str,
    error_msg: Signal<Option<String>>,
}

impl JsChartView {
    pub fn new(container_id: &'static str, error_msg: Signal<Option<String>>) -> Self {
        Self {
            container_id,
            error_msg,
        }
    }

    pub fn container_id(&self) -> &'static str {
        self.container_id
    }
}

impl ChartView for JsChartView {
    fn apply(&mut self, descriptor: &RenderDescriptor) {
        let config = to_chart_config(descriptor);
        match serde_json::to_string(&config) {
            Ok(json) => js_bridge::render_chart(self.container_id, &json),
            Err(e) => log::error!("Failed to serialize chart config: {}", e),
        }
    }

    fn show_error(&mut self, message: &str) {
        self.error_msg.set(Some(message.to_string()));
    }

    fn destroy(&mut self) {
        js_bridge::destroy_chart(self.container_id);
    }
}
