//! Reusable Dioxus RSX components for the irradiance portal.

mod chart_container;
mod chart_header;
mod date_range_picker;
mod error_display;
mod gti_controls;
mod loading_spinner;
mod location_picker;
mod mode_selector;
mod source_selector;
mod year_range_picker;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use date_range_picker::DateRangePicker;
pub use error_display::ErrorDisplay;
pub use gti_controls::GtiControls;
pub use loading_spinner::LoadingSpinner;
pub use location_picker::LocationPicker;
pub use mode_selector::ModeSelector;
pub use source_selector::SourceSelector;
pub use year_range_picker::YearRangePicker;
