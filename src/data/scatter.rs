use super::filter::{filter_by_payload, resolve_site};
use super::model::{LaunchRecord, Outcome, PayloadRange, SiteSelection};

/// One scatter point: payload on x, outcome class on y, coloured by booster.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
    /// Shown on hover.
    pub site: String,
}

impl ScatterPoint {
    pub fn xy(&self) -> [f64; 2] {
        [self.payload_mass_kg, f64::from(self.outcome.class())]
    }
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(rec: &LaunchRecord) -> Self {
        ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_category: rec.booster_category.clone(),
            site: rec.site.clone(),
        }
    }
}

pub type ScatterSeries = Vec<ScatterPoint>;

/// Payload filter, then site filter; one point per surviving record.
pub fn assemble_scatter(
    records: &[LaunchRecord],
    selection: &SiteSelection,
    range: PayloadRange,
) -> ScatterSeries {
    let in_range = filter_by_payload(records, range);
    resolve_site(in_range, selection)
        .into_iter()
        .map(ScatterPoint::from)
        .collect()
}
