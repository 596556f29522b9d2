use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Outcome – the binary launch result
// ---------------------------------------------------------------------------

/// Launch outcome as recorded in the `class` column (0 = failure, 1 = success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

/// Raised when the `class` column holds anything other than 0 or 1.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("outcome class must be 0 or 1, got {0}")]
pub struct InvalidOutcome(pub i64);

impl TryFrom<i64> for Outcome {
    type Error = InvalidOutcome;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(InvalidOutcome(other)),
        }
    }
}

impl Outcome {
    /// The raw `class` value this outcome was parsed from.
    pub fn class(self) -> i64 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site name.
    pub site: String,
    /// Payload mass in kilograms (non-negative).
    pub payload_mass_kg: f64,
    /// Success / failure of the launch.
    pub outcome: Outcome,
    /// Booster version category (e.g. "v1.0", "FT", "B5").
    pub booster_version: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with values derived once at load.
///
/// Immutable after construction; the UI only ever reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchDataset {
    /// All launches (rows), in file order.
    pub records: Vec<LaunchRecord>,
    /// Distinct launch sites, most frequent first (ties keep file order).
    pub launch_sites: Vec<String>,
    /// Distinct booster version categories in first-seen order.
    pub booster_categories: Vec<String>,
    /// Smallest payload mass across all records (0.0 when empty).
    pub min_payload: f64,
    /// Largest payload mass across all records (0.0 when empty).
    pub max_payload: f64,
}

impl LaunchDataset {
    /// Build the derived site/booster lists and payload bounds from the rows.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        // First-seen order, then a stable sort by descending count. Same
        // ordering a frequency table of the site column produces.
        let mut site_counts: Vec<(String, usize)> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();

        for rec in &records {
            match site_counts.iter_mut().find(|(site, _)| *site == rec.site) {
                Some((_, n)) => *n += 1,
                None => site_counts.push((rec.site.clone(), 1)),
            }
            if !booster_categories.contains(&rec.booster_version) {
                booster_categories.push(rec.booster_version.clone());
            }
        }
        site_counts.sort_by(|a, b| b.1.cmp(&a.1));
        let launch_sites = site_counts.into_iter().map(|(site, _)| site).collect();

        let (min_payload, max_payload) = if records.is_empty() {
            (0.0, 0.0)
        } else {
            records.iter().map(|r| r.payload_mass_kg).fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), p| (lo.min(p), hi.max(p)),
            )
        };

        LaunchDataset {
            records,
            launch_sites,
            booster_categories,
            min_payload,
            max_payload,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of successful launches across all sites.
    pub fn total_successes(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome.is_success())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, payload: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome,
            booster_version: booster.to_string(),
        }
    }

    #[test]
    fn outcome_from_class() {
        assert_eq!(Outcome::try_from(0), Ok(Outcome::Failure));
        assert_eq!(Outcome::try_from(1), Ok(Outcome::Success));
        assert_eq!(Outcome::try_from(2), Err(InvalidOutcome(2)));
        assert_eq!(Outcome::try_from(-1), Err(InvalidOutcome(-1)));
    }

    #[test]
    fn sites_ordered_by_frequency_then_first_seen() {
        let ds = LaunchDataset::from_records(vec![
            record("B", 100.0, Outcome::Success, "FT"),
            record("A", 200.0, Outcome::Failure, "FT"),
            record("A", 300.0, Outcome::Success, "v1.0"),
            record("C", 400.0, Outcome::Success, "FT"),
        ]);
        // A appears twice; B and C tie at one launch and keep file order.
        assert_eq!(ds.launch_sites, vec!["A", "B", "C"]);
        assert_eq!(ds.booster_categories, vec!["FT", "v1.0"]);
    }

    #[test]
    fn payload_bounds() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success, "FT"),
            record("A", 9600.0, Outcome::Failure, "FT"),
            record("B", 0.0, Outcome::Success, "FT"),
        ]);
        assert_eq!(ds.min_payload, 0.0);
        assert_eq!(ds.max_payload, 9600.0);
    }

    #[test]
    fn empty_dataset_has_zero_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.min_payload, 0.0);
        assert_eq!(ds.max_payload, 0.0);
        assert!(ds.launch_sites.is_empty());
    }

    #[test]
    fn total_successes_counts_class_one_only() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 1.0, Outcome::Success, "FT"),
            record("A", 2.0, Outcome::Failure, "FT"),
            record("B", 3.0, Outcome::Success, "FT"),
        ]);
        assert_eq!(ds.total_successes(), 2);
    }
}
