use crate::chart::{PieSpec, ScatterSpec, payload_scatter, success_pie};
use crate::color::ColorMap;
use crate::data::filter::{SiteSelection, filtered_indices};
use crate::data::model::LaunchDataset;

/// Fixed bounds of the payload range control, in kilograms.
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
/// Slider step, in kilograms.
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded before the window opens and never mutated; the
/// selection and payload range are the only values the UI changes, and the
/// chart specs are rebuilt from the pure chart functions whenever they do.
pub struct AppState {
    /// Loaded dataset (read-only for the process lifetime).
    pub dataset: LaunchDataset,

    /// Current dropdown selection.
    pub selected_site: SiteSelection,

    /// Current payload range `[low, high]` in kg.
    pub payload_range: [f64; 2],

    /// Indices of launches passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Success pie for the current selection (cached).
    pub pie: PieSpec,

    /// Payload scatter for the current selection and range (cached).
    pub scatter: ScatterSpec,

    /// Booster-category colours, fixed at startup.
    pub color_map: ColorMap,
}

impl AppState {
    /// Build the initial state: everything selected, range spanning the
    /// dataset's payload bounds.
    pub fn new(dataset: LaunchDataset) -> Self {
        let color_map = ColorMap::new(&dataset.booster_categories);
        let selected_site = SiteSelection::All;
        let payload_range = [dataset.min_payload, dataset.max_payload];

        let mut state = AppState {
            visible_indices: Vec::new(),
            pie: success_pie(&dataset, &selected_site),
            scatter: payload_scatter(&dataset, &selected_site, (payload_range[0], payload_range[1])),
            dataset,
            selected_site,
            payload_range,
            color_map,
        };
        state.visible_indices = filtered_indices(
            &state.dataset,
            &state.selected_site,
            state.range_tuple(),
        );
        state
    }

    fn range_tuple(&self) -> (f64, f64) {
        (self.payload_range[0], self.payload_range[1])
    }

    /// Recompute the cached indices and chart specs.  Called whenever a
    /// control changes; both chart functions are pure, so this is the whole
    /// of the dashboard's reactivity.
    fn rebuild_charts(&mut self) {
        self.visible_indices =
            filtered_indices(&self.dataset, &self.selected_site, self.range_tuple());
        self.pie = success_pie(&self.dataset, &self.selected_site);
        self.scatter = payload_scatter(&self.dataset, &self.selected_site, self.range_tuple());
    }

    /// Change the site selection and refresh both charts.
    pub fn set_site(&mut self, selection: SiteSelection) {
        if self.selected_site != selection {
            log::debug!("site selection -> {}", selection.label());
            self.selected_site = selection;
            self.rebuild_charts();
        }
    }

    /// Change the payload range and refresh the scatter.
    pub fn set_payload_range(&mut self, range: [f64; 2]) {
        if self.payload_range != range {
            log::debug!("payload range -> [{:.0}, {:.0}] kg", range[0], range[1]);
            self.payload_range = range;
            self.rebuild_charts();
        }
    }

    /// Restore the default selection and the full payload span.
    pub fn reset(&mut self) {
        self.selected_site = SiteSelection::All;
        self.payload_range = [self.dataset.min_payload, self.dataset.max_payload];
        self.rebuild_charts();
    }
}
