use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{pie_series, ChartSeries};
use crate::data::model::{LaunchDataset, PayloadRange, SelectionState, SiteSelection};
use crate::data::scatter::{assemble_scatter, ScatterSeries};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The chart series are outputs only: each control change replaces the
/// affected series wholesale from the dataset and the new selection.
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub dataset: Arc<LaunchDataset>,

    /// Current control values.
    pub selection: SelectionState,

    /// Observed payload `(min, max)`, the sliders' extent.
    pub payload_bounds: (f64, f64),

    pub slider_step: f64,

    /// Pie chart data for the current site.
    pub pie: ChartSeries,

    /// Scatter chart data for the current site and payload range.
    pub scatter: ScatterSeries,

    /// Booster category colours for the scatter chart.
    pub booster_colors: ColorMap,

    /// Text typed into the site selector's search box.
    pub site_search: String,
}

impl AppState {
    pub fn new(dataset: Arc<LaunchDataset>, slider_step: f64) -> Self {
        if dataset.is_empty() {
            log::warn!("Dataset has no launch records; charts will stay empty");
        }
        let selection = SelectionState::initial(&dataset);
        let payload_bounds = (selection.payload.lo, selection.payload.hi);
        let booster_colors = ColorMap::new(dataset.booster_categories());

        let mut state = Self {
            dataset,
            selection,
            payload_bounds,
            slider_step,
            pie: ChartSeries::new(),
            scatter: ScatterSeries::new(),
            booster_colors,
            site_search: String::new(),
        };
        state.refresh_pie();
        state.refresh_scatter();
        state
    }

    /// Site selector changed: both charts depend on it.
    pub fn set_site(&mut self, site: SiteSelection) {
        if site == self.selection.site {
            return;
        }
        log::debug!("Site selection → {site}");
        self.selection.site = site;
        self.refresh_pie();
        self.refresh_scatter();
    }

    /// Payload selector changed: only the scatter chart depends on it.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.selection.payload {
            return;
        }
        log::debug!("Payload range → [{}, {}]", range.lo, range.hi);
        self.selection.payload = range;
        self.refresh_scatter();
    }

    /// Move the lower bound; drags the upper bound along if it is passed.
    pub fn set_payload_lo(&mut self, lo: f64) {
        let hi = self.selection.payload.hi.max(lo);
        self.set_payload_range(PayloadRange::new(lo, hi));
    }

    /// Move the upper bound; drags the lower bound along if it is passed.
    pub fn set_payload_hi(&mut self, hi: f64) {
        let lo = self.selection.payload.lo.min(hi);
        self.set_payload_range(PayloadRange::new(lo, hi));
    }

    /// Sites offered by the selector: those containing the search text,
    /// case-insensitively, in dataset order. An empty search offers all.
    pub fn matching_sites(&self) -> Vec<&str> {
        let needle = self.site_search.trim().to_lowercase();
        self.dataset
            .sites()
            .iter()
            .filter(|site| needle.is_empty() || site.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    fn refresh_pie(&mut self) {
        self.pie = pie_series(self.dataset.records(), &self.selection.site);
    }

    fn refresh_scatter(&mut self) {
        self.scatter = assemble_scatter(
            self.dataset.records(),
            &self.selection.site,
            self.selection.payload,
        );
    }

    pub fn pie_title(&self) -> String {
        match &self.selection.site {
            SiteSelection::All => "Total Successful Launches by Site".to_string(),
            SiteSelection::Site(site) => format!("Success vs Failure for {site}"),
        }
    }

    pub fn scatter_title(&self) -> String {
        format!(
            "Correlation between Payload and Launch Success for {}",
            self.selection.site
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::Slice;
    use crate::data::model::LaunchRecord;

    fn state() -> AppState {
        let records = vec![
            LaunchRecord::new(0, "X", 4000.0, "v1.1", 1).unwrap(),
            LaunchRecord::new(1, "X", 5000.0, "FT", 0).unwrap(),
            LaunchRecord::new(2, "Y", 6000.0, "FT", 1).unwrap(),
            LaunchRecord::new(3, "Y", 9600.0, "B5", 1).unwrap(),
        ];
        AppState::new(Arc::new(LaunchDataset::from_records(records)), 1000.0)
    }

    #[test]
    fn starts_with_everything_selected() {
        let s = state();
        assert_eq!(s.selection.site, SiteSelection::All);
        assert_eq!(s.payload_bounds, (4000.0, 9600.0));
        assert_eq!(s.scatter.len(), 4);
        assert_eq!(s.pie.len(), 2);
        assert_eq!(s.pie_title(), "Total Successful Launches by Site");
    }

    #[test]
    fn site_change_refreshes_both_charts() {
        let mut s = state();
        s.set_site(SiteSelection::Site("X".into()));
        assert_eq!(
            s.pie,
            vec![
                Slice { label: "Failure".into(), value: 1 },
                Slice { label: "Success".into(), value: 1 },
            ]
        );
        assert_eq!(s.scatter.len(), 2);
        assert_eq!(s.pie_title(), "Success vs Failure for X");
        assert_eq!(
            s.scatter_title(),
            "Correlation between Payload and Launch Success for X"
        );
    }

    #[test]
    fn payload_change_leaves_pie_alone() {
        let mut s = state();
        let pie_before = s.pie.clone();
        s.set_payload_range(PayloadRange::new(4500.0, 6000.0));
        assert_eq!(s.pie, pie_before);
        assert_eq!(s.scatter.len(), 2);
    }

    #[test]
    fn bounds_never_cross() {
        let mut s = state();
        s.set_payload_hi(5000.0);
        s.set_payload_lo(7000.0);
        assert_eq!(s.selection.payload, PayloadRange::new(7000.0, 7000.0));
        s.set_payload_hi(4000.0);
        assert_eq!(s.selection.payload, PayloadRange::new(4000.0, 4000.0));
        assert_eq!(s.scatter.len(), 1);
    }

    #[test]
    fn reselecting_gives_the_same_charts() {
        let mut s = state();
        let (pie, scatter) = (s.pie.clone(), s.scatter.clone());
        s.set_site(SiteSelection::Site("Y".into()));
        s.set_site(SiteSelection::All);
        assert_eq!(s.pie, pie);
        assert_eq!(s.scatter, scatter);
    }

    #[test]
    fn site_search_narrows_the_options() {
        let mut s = state();
        assert_eq!(s.matching_sites(), ["X", "Y"]);
        s.site_search = " y ".into();
        assert_eq!(s.matching_sites(), ["Y"]);
        s.site_search = "launchpad".into();
        assert!(s.matching_sites().is_empty());
        // Searching filters the options only, never the charts.
        assert_eq!(s.selection.site, SiteSelection::All);
        assert_eq!(s.scatter.len(), 4);
    }

    #[test]
    fn unknown_site_empties_both_charts() {
        let mut s = state();
        s.set_site(SiteSelection::Site("Z".into()));
        assert!(s.pie.is_empty());
        assert!(s.scatter.is_empty());
    }
}
