//! Owner of the single chart on the page.

use crate::descriptor::{ChartPayload, RenderDescriptor};
use crate::present::{render, PresentError};
use log::info;
use sip_core::granularity::PlotMode;

/// The rendering surface a [`ChartController`] drives.
///
/// Implementations are thin: they draw exactly what the descriptor says and
/// keep no chart state of their own between calls.
pub trait ChartView {
    /// Replace whatever is shown with `descriptor`.
    fn apply(&mut self, descriptor: &RenderDescriptor);

    /// Show a user-facing error without touching the chart.
    fn show_error(&mut self, message: &str);

    /// Tear the chart down entirely.
    fn destroy(&mut self);
}

/// Holds one view and the descriptor it currently shows.
#[derive(Debug)]
pub struct ChartController<V: ChartView> {
    view: V,
    current: Option<RenderDescriptor>,
}

impl<V: ChartView> ChartController<V> {
    pub fn new(view: V) -> Self {
        ChartController {
            view,
            current: None,
        }
    }

    /// Render `payload` and hand the result to the view.
    ///
    /// The descriptor is computed before the view is touched, so on error
    /// the previous chart stays as it was.
    pub fn show(&mut self, payload: &ChartPayload, mode: PlotMode) -> Result<&RenderDescriptor, PresentError> {
        let descriptor = render(payload, mode)?;
        Ok(self.apply(descriptor))
    }

    /// Apply an already-built descriptor.
    pub fn apply(&mut self, descriptor: RenderDescriptor) -> &RenderDescriptor {
        self.view.apply(&descriptor);
        self.current.insert(descriptor)
    }

    pub fn show_error(&mut self, message: &str) {
        self.view.show_error(message);
    }

    /// Destroy the chart, as on form reset.
    pub fn reset(&mut self) {
        info!("Resetting chart");
        self.view.destroy();
        self.current = None;
    }

    pub fn current(&self) -> Option<&RenderDescriptor> {
        self.current.as_ref()
    }

    /// Whether a drawn chart is on screen (not nothing, not the no-data state).
    pub fn has_chart(&self) -> bool {
        self.current.as_ref().is_some_and(|d| !d.is_empty())
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}
