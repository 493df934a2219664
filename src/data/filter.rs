use super::model::{LaunchRecord, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Record predicates: borrowed views over the immutable dataset
// ---------------------------------------------------------------------------

/// Records relevant to the selected site, in their original order.
///
/// `All` passes everything through. A site with no records (including one
/// that doesn't exist in the data) yields an empty view.
pub fn resolve_site<'a, I>(records: I, selection: &SiteSelection) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    match selection {
        SiteSelection::All => records.into_iter().collect(),
        SiteSelection::Site(site) => records
            .into_iter()
            .filter(|rec| rec.site == *site)
            .collect(),
    }
}

/// Records with `lo <= payload <= hi`.
pub fn filter_by_payload<'a, I>(records: I, range: PayloadRange) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .collect()
}
