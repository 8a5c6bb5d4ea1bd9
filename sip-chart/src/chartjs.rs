//! Chart.js configuration for a render descriptor.
//!
//! The browser adapter passes the returned JSON straight to `new Chart(...)`.
//! Functions cannot travel through JSON, so legend filtering is expressed as
//! a list of hidden labels (`plugins.legend.hiddenLabels`) that the adapter
//! turns into a `labels.filter` callback.

use crate::descriptor::{ChartDescriptor, Dataset, Fill, RenderDescriptor, XAxis, YAxis};
use serde_json::{json, Map, Value};

/// Tick formats for each time unit (date-fns tokens).
fn display_formats() -> Value {
    json!({
        "hour": "HH:mm",
        "day": "MMM d",
        "month": "MMM yyyy",
    })
}

fn fill_value(fill: Fill) -> Value {
    match fill {
        Fill::None => Value::Bool(false),
        Fill::ToNext => Value::String("+1".to_string()),
    }
}

fn dataset_config(dataset: &Dataset) -> Value {
    json!({
        "label": dataset.label,
        "data": dataset.points,
        "borderColor": dataset.border_color,
        "backgroundColor": dataset.background_color,
        "borderWidth": dataset.border_width,
        "pointRadius": dataset.point_radius,
        "tension": dataset.tension,
        "fill": fill_value(dataset.fill),
        "order": dataset.order,
    })
}

fn x_scale(axis: &XAxis) -> Value {
    match axis {
        XAxis::Time { unit, title } => json!({
            "type": "time",
            "time": {
                "unit": unit.as_str(),
                "displayFormats": display_formats(),
            },
            "title": { "display": true, "text": title },
            "grid": { "display": false },
        }),
        XAxis::Category { title, .. } => json!({
            "type": "category",
            "title": { "display": true, "text": title },
            "grid": { "display": false },
        }),
    }
}

fn y_scale(axis: &YAxis) -> Value {
    let mut scale = Map::new();
    scale.insert("title".into(), json!({ "display": true, "text": axis.title }));
    scale.insert("beginAtZero".into(), Value::Bool(axis.begin_at_zero));
    if let Some(min) = axis.suggested_min {
        scale.insert("suggestedMin".into(), json!(min));
    }
    if let Some(max) = axis.suggested_max {
        scale.insert("suggestedMax".into(), json!(max));
    }
    Value::Object(scale)
}

fn chart_config(chart: &ChartDescriptor) -> Value {
    let mut data = Map::new();
    if let XAxis::Category { labels, .. } = &chart.x_axis {
        data.insert("labels".into(), json!(labels));
    }
    data.insert(
        "datasets".into(),
        Value::Array(chart.datasets.iter().map(dataset_config).collect()),
    );
    let hidden: Vec<&str> = chart
        .datasets
        .iter()
        .filter(|d| !d.show_in_legend)
        .map(|d| d.label.as_str())
        .collect();

    json!({
        "type": "line",
        "data": data,
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "interaction": { "mode": "index", "intersect": false },
            "plugins": {
                "legend": {
                    "display": chart.show_legend,
                    "position": "top",
                    "hiddenLabels": hidden,
                },
                "title": { "display": false },
            },
            "scales": {
                "x": x_scale(&chart.x_axis),
                "y": y_scale(&chart.y_axis),
            },
        },
    })
}

/// Translate a descriptor into a complete Chart.js configuration object.
///
/// The empty state is a chart with no datasets whose title plugin shows the
/// message.
pub fn to_chart_config(descriptor: &RenderDescriptor) -> Value {
    match descriptor {
        RenderDescriptor::Chart(chart) => chart_config(chart),
        RenderDescriptor::Empty { message, .. } => json!({
            "type": "line",
            "data": { "labels": [], "datasets": [] },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "legend": { "display": false },
                    "title": { "display": true, "text": message },
                },
            },
        }),
    }
}
