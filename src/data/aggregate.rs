use super::filter::resolve_site;
use super::model::{LaunchRecord, Outcome, SiteSelection};

// ---------------------------------------------------------------------------
// Pie chart series
// ---------------------------------------------------------------------------

/// One labelled value of a proportion chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    pub label: String,
    pub value: u64,
}

impl Slice {
    fn new(label: impl Into<String>, value: u64) -> Self {
        Slice {
            label: label.into(),
            value,
        }
    }
}

pub type ChartSeries = Vec<Slice>;

/// Aggregate an already-resolved subset for the pie chart.
///
/// * `All` → successes per site, one slice per site in first-seen order. A
///   site with no successes is still listed, with value 0.
/// * `Site(_)` → `Failure` then `Success` counts; zero counts are omitted.
pub fn aggregate<'a, I>(subset: I, selection: &SiteSelection) -> ChartSeries
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    match selection {
        SiteSelection::All => successes_by_site(subset),
        SiteSelection::Site(_) => outcome_counts(subset),
    }
}

/// Resolve the site, then aggregate: the whole pie chart computation.
pub fn pie_series(records: &[LaunchRecord], selection: &SiteSelection) -> ChartSeries {
    aggregate(resolve_site(records, selection), selection)
}

fn successes_by_site<'a, I>(subset: I) -> ChartSeries
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut series: ChartSeries = Vec::new();
    for rec in subset {
        let add = u64::from(rec.outcome.is_success());
        match series.iter_mut().find(|s| s.label == rec.site) {
            Some(slice) => slice.value += add,
            None => series.push(Slice::new(rec.site.clone(), add)),
        }
    }
    series
}

fn outcome_counts<'a, I>(subset: I) -> ChartSeries
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let (mut failures, mut successes) = (0u64, 0u64);
    for rec in subset {
        match rec.outcome {
            Outcome::Failure => failures += 1,
            Outcome::Success => successes += 1,
        }
    }

    [(Outcome::Failure, failures), (Outcome::Success, successes)]
        .into_iter()
        .filter(|&(_, n)| n > 0)
        .map(|(outcome, n)| Slice::new(outcome.label(), n))
        .collect()
}

/// Sum of all slice values (the pie's total).
pub fn series_total(series: &[Slice]) -> u64 {
    series.iter().map(|s| s.value).sum()
}
