use std::collections::BTreeSet;
use std::fmt;

use super::error::DatasetError;

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_BOOSTER: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";

/// Columns every input file must provide, in the order errors report them.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_SITE, COL_PAYLOAD, COL_BOOSTER, COL_CLASS];

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (0 = failure, 1 = success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value, used as the scatter chart's y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl TryFrom<i64> for Outcome {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(other),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    /// Always finite and `>= 0`.
    pub payload_mass_kg: f64,
    pub booster_category: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    /// Build a record, checking the row-level invariants.
    ///
    /// `row` is the zero-based data row and only feeds error messages.
    pub fn new(
        row: usize,
        site: impl Into<String>,
        payload_mass_kg: f64,
        booster_category: impl Into<String>,
        class: i64,
    ) -> Result<Self, DatasetError> {
        let site = site.into();
        if site.trim().is_empty() {
            return Err(DatasetError::EmptySite { row });
        }
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(DatasetError::InvalidPayload {
                row,
                value: payload_mass_kg,
            });
        }
        let outcome =
            Outcome::try_from(class).map_err(|value| DatasetError::InvalidClass { row, value })?;

        Ok(LaunchRecord {
            site,
            payload_mass_kg,
            booster_category: booster_category.into(),
            outcome,
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed lookups for the controls.
///
/// Immutable once built; the UI shares it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster categories, sorted.
    booster_categories: BTreeSet<String>,
}

impl LaunchDataset {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();

        for rec in &records {
            if !sites.iter().any(|s| *s == rec.site) {
                sites.push(rec.site.clone());
            }
            booster_categories.insert(rec.booster_category.clone());
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// Observed `(min, max)` payload mass, `None` when there are no records.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.records.iter().map(|r| r.payload_mass_kg);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Selection – what the controls currently show
// ---------------------------------------------------------------------------

/// Site selector value: every site, or one specific site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Token the selector uses for "all sites".
    pub const WILDCARD: &'static str = "ALL";

    pub fn from_token(token: &str) -> Self {
        if token == Self::WILDCARD {
            SiteSelection::All
        } else {
            SiteSelection::Site(token.to_string())
        }
    }

    pub fn token(&self) -> &str {
        match self {
            SiteSelection::All => Self::WILDCARD,
            SiteSelection::Site(s) => s,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteSelection::All)
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Closed payload interval `[lo, hi]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub lo: f64,
    pub hi: f64,
}

impl PayloadRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        PayloadRange { lo, hi }
    }

    /// Inclusive at both ends. An inverted range contains nothing.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.lo <= payload_mass_kg && payload_mass_kg <= self.hi
    }
}

/// Snapshot of both controls, rebuilt by the UI on every interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl SelectionState {
    /// Initial selection: all sites over the full observed payload range.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        let (lo, hi) = dataset.payload_bounds().unwrap_or((0.0, 0.0));
        SelectionState {
            site: SiteSelection::All,
            payload: PayloadRange::new(lo, hi),
        }
    }
}
