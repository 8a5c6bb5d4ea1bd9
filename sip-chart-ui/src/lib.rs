//! Dioxus components and Chart.js bridge for the solar irradiance portal.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Chart.js adapter via `js_sys::eval()`
//! - `view`: [`view::JsChartView`], the browser [`sip_chart::controller::ChartView`]
//! - `fetch`: backend and geocoding calls through `web_sys` fetch
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Form and chart RSX components

pub mod components;
pub mod fetch;
pub mod js_bridge;
pub mod state;
pub mod view;
