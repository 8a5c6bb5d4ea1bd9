//! Chart presentation for irradiance data.
//!
//! - `descriptor`: immutable render descriptors and the payloads they are built from
//! - `present`: [`present::render`], a pure function of (payload, plot mode)
//! - `chartjs`: descriptor → Chart.js configuration JSON
//! - `controller`: [`controller::ChartController`] owning one [`controller::ChartView`]
//! - `pipeline`: response body → descriptor for a validated request
//!
//! Nothing in this crate touches the DOM, so it builds and tests natively.

pub mod chartjs;
pub mod controller;
pub mod descriptor;
pub mod pipeline;
pub mod present;
