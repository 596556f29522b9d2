use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Site selection – the dropdown value
// ---------------------------------------------------------------------------

/// Which launch site the dashboard is focused on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    /// All launch sites.
    #[default]
    All,
    /// A single launch site by name.
    Site(String),
}

impl SiteSelection {
    /// Whether a record from `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(name) => name == site,
        }
    }

    /// Text shown in the dropdown for this selection.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(name) => name,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter predicate: site + inclusive payload range
// ---------------------------------------------------------------------------

/// Return indices of launches that pass the site selection and whose payload
/// mass lies within `[low, high]` (bounds inclusive).
///
/// An inverted range (`low > high`) matches nothing; that is a valid state
/// the range sliders can reach, not an error.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    (low, high): (f64, f64),
) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            selection.matches(&rec.site)
                && rec.payload_mass_kg >= low
                && rec.payload_mass_kg <= high
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn dataset() -> LaunchDataset {
        let rows = [
            ("A", 500.0, Outcome::Success),
            ("A", 2500.0, Outcome::Success),
            ("A", 4000.0, Outcome::Failure),
            ("B", 2500.0, Outcome::Failure),
            ("B", 6000.0, Outcome::Failure),
            ("B", 9600.0, Outcome::Failure),
        ];
        LaunchDataset::from_records(
            rows.iter()
                .map(|&(site, payload, outcome)| LaunchRecord {
                    site: site.to_string(),
                    payload_mass_kg: payload,
                    outcome,
                    booster_version: "FT".to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn full_range_all_sites_keeps_everything() {
        let ds = dataset();
        let idx = filtered_indices(&ds, &SiteSelection::All, (0.0, 10_000.0));
        assert_eq!(idx, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = dataset();
        let idx = filtered_indices(&ds, &SiteSelection::All, (2500.0, 6000.0));
        assert_eq!(idx, vec![1, 2, 3, 4]);
    }

    #[test]
    fn site_selection_restricts_rows() {
        let ds = dataset();
        let sel = SiteSelection::Site("B".to_string());
        let idx = filtered_indices(&ds, &sel, (0.0, 10_000.0));
        assert!(idx.iter().all(|&i| ds.records[i].site == "B"));
        assert_eq!(idx.len(), 3);
    }

    #[test]
    fn inverted_range_is_empty() {
        let ds = dataset();
        assert!(filtered_indices(&ds, &SiteSelection::All, (6000.0, 2500.0)).is_empty());
    }

    #[test]
    fn unknown_site_is_empty() {
        let ds = dataset();
        let sel = SiteSelection::Site("no-such-site".to_string());
        assert!(filtered_indices(&ds, &sel, (0.0, 10_000.0)).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = dataset();
        let sel = SiteSelection::Site("A".to_string());
        let first = filtered_indices(&ds, &sel, (500.0, 4000.0));
        let second = filtered_indices(&ds, &sel, (500.0, 4000.0));
        assert_eq!(first, second);
    }
}
