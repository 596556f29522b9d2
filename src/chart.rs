use crate::data::filter::{SiteSelection, filtered_indices};
use crate::data::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Chart specs – plotted data, independent of egui_plot
// ---------------------------------------------------------------------------

/// One pie wedge: label plus its (non-negative) value.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// A pie chart: title plus slices in display order.  Zero-valued slices are
/// kept so callers can tell "present with no successes" from "absent".
#[derive(Debug, Clone, PartialEq)]
pub struct PieSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieSpec {
    /// Sum of all slice values.
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Whether there is anything to draw.
    pub fn is_empty(&self) -> bool {
        self.total() <= 0.0
    }
}

/// One scatter series: every point of a single booster version category.
/// Points are `[payload_mass_kg, class]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    pub points: Vec<[f64; 2]>,
}

/// A scatter chart: one series per booster version category, in the
/// dataset's category order so colors stay stable across filter changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpec {
    pub title: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterSpec {
    /// Number of plotted points across all series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Pie aggregator
// ---------------------------------------------------------------------------

/// Build the success pie for the current site selection.
///
/// * `All` – one slice per site (dataset site order), valued by its number
///   of successful launches.
/// * `Site(s)` – a Failure slice and a Success slice, each counted from its
///   own outcome class.  The counts are keyed by [`Outcome`], so an absent
///   class simply yields a zero slice rather than a mislabeled one.
///
/// An unknown site produces all-zero slices, never an error.
pub fn success_pie(dataset: &LaunchDataset, selection: &SiteSelection) -> PieSpec {
    match selection {
        SiteSelection::All => {
            let slices = dataset
                .launch_sites
                .iter()
                .map(|site| {
                    let successes = dataset
                        .records
                        .iter()
                        .filter(|r| r.site == *site && r.outcome.is_success())
                        .count();
                    PieSlice {
                        label: site.clone(),
                        value: successes as f64,
                    }
                })
                .collect();

            PieSpec {
                title: "Total Success Launches by Site".to_string(),
                slices,
            }
        }
        SiteSelection::Site(site) => {
            let mut failures = 0usize;
            let mut successes = 0usize;
            for rec in dataset.records.iter().filter(|r| r.site == *site) {
                match rec.outcome {
                    Outcome::Failure => failures += 1,
                    Outcome::Success => successes += 1,
                }
            }

            PieSpec {
                title: format!("Total Success Launches for {site}"),
                slices: vec![
                    PieSlice {
                        label: Outcome::Failure.label().to_string(),
                        value: failures as f64,
                    },
                    PieSlice {
                        label: Outcome::Success.label().to_string(),
                        value: successes as f64,
                    },
                ],
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter filter
// ---------------------------------------------------------------------------

/// Build the payload-vs-outcome scatter for the current selection and
/// payload range (bounds inclusive; an inverted range is simply empty).
///
/// One point per surviving record, grouped by booster version category.
/// Categories with no surviving points are omitted.
pub fn payload_scatter(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    payload_range: (f64, f64),
) -> ScatterSpec {
    let indices = filtered_indices(dataset, selection, payload_range);

    let series = dataset
        .booster_categories
        .iter()
        .filter_map(|category| {
            let points: Vec<[f64; 2]> = indices
                .iter()
                .map(|&i| &dataset.records[i])
                .filter(|r| r.booster_version == *category)
                .map(|r| [r.payload_mass_kg, r.outcome.class() as f64])
                .collect();

            (!points.is_empty()).then(|| ScatterSeries {
                category: category.clone(),
                points,
            })
        })
        .collect();

    ScatterSpec {
        title: "Payload vs. Launch Outcome".to_string(),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn record(site: &str, payload: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome,
            booster_version: booster.to_string(),
        }
    }

    /// Site A: 2 successes + 1 failure.  Site B: 3 failures.
    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("A", 500.0, Outcome::Success, "v1.0"),
            record("A", 2500.0, Outcome::Success, "FT"),
            record("A", 4000.0, Outcome::Failure, "FT"),
            record("B", 2500.0, Outcome::Failure, "v1.1"),
            record("B", 6000.0, Outcome::Failure, "FT"),
            record("B", 9600.0, Outcome::Failure, "B4"),
        ])
    }

    fn site(name: &str) -> SiteSelection {
        SiteSelection::Site(name.to_string())
    }

    #[test]
    fn all_sites_pie_counts_successes_per_site() {
        let ds = dataset();
        let pie = success_pie(&ds, &SiteSelection::All);
        assert_eq!(pie.title, "Total Success Launches by Site");
        // Sites tie at three launches each, so file order is kept, and the
        // zero-success site keeps its slice.
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.slices[0].label, "A");
        assert_eq!(pie.slices[0].value, 2.0);
        assert_eq!(pie.slices[1].label, "B");
        assert_eq!(pie.slices[1].value, 0.0);
    }

    #[test]
    fn all_sites_pie_sums_to_total_successes() {
        let ds = dataset();
        let pie = success_pie(&ds, &SiteSelection::All);
        assert_eq!(pie.total(), ds.total_successes() as f64);
    }

    #[test]
    fn single_site_pie_maps_outcomes_to_labels() {
        let ds = dataset();
        let pie = success_pie(&ds, &site("A"));
        assert_eq!(pie.title, "Total Success Launches for A");
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.slices[0].label, "Failure");
        assert_eq!(pie.slices[0].value, 1.0);
        assert_eq!(pie.slices[1].label, "Success");
        assert_eq!(pie.slices[1].value, 2.0);
    }

    #[test]
    fn single_site_pie_with_one_class_absent() {
        let ds = dataset();
        // Site B has no successes; the Success slice must still be the
        // success slice, at zero.
        let pie = success_pie(&ds, &site("B"));
        assert_eq!(pie.slices[0].label, "Failure");
        assert_eq!(pie.slices[0].value, 3.0);
        assert_eq!(pie.slices[1].label, "Success");
        assert_eq!(pie.slices[1].value, 0.0);
        assert!(!pie.is_empty());
    }

    #[test]
    fn unknown_site_pie_is_empty_not_an_error() {
        let ds = dataset();
        let pie = success_pie(&ds, &site("no-such-site"));
        assert!(pie.is_empty());
        assert_eq!(pie.slices.len(), 2);
    }

    #[test]
    fn scatter_keeps_all_records_over_the_full_range() {
        let ds = dataset();
        let spec = payload_scatter(&ds, &SiteSelection::All, (0.0, 10_000.0));
        assert_eq!(spec.point_count(), 6);
    }

    #[test]
    fn scatter_respects_site_and_range() {
        let ds = dataset();
        let spec = payload_scatter(&ds, &site("A"), (500.0, 2500.0));
        assert_eq!(spec.point_count(), 2);
        for series in &spec.series {
            for point in &series.points {
                assert!(point[0] >= 500.0 && point[0] <= 2500.0);
                assert!(point[1] == 0.0 || point[1] == 1.0);
            }
        }
    }

    #[test]
    fn scatter_groups_points_by_booster_category() {
        let ds = dataset();
        let spec = payload_scatter(&ds, &SiteSelection::All, (0.0, 10_000.0));
        let categories: Vec<&str> = spec.series.iter().map(|s| s.category.as_str()).collect();
        // Dataset category order (first seen), empty categories omitted.
        assert_eq!(categories, vec!["v1.0", "FT", "v1.1", "B4"]);
        let ft = spec.series.iter().find(|s| s.category == "FT").unwrap();
        assert_eq!(ft.points.len(), 3);
    }

    #[test]
    fn inverted_range_yields_empty_scatter() {
        let ds = dataset();
        let spec = payload_scatter(&ds, &SiteSelection::All, (6000.0, 500.0));
        assert!(spec.is_empty());
        assert_eq!(spec.point_count(), 0);
    }

    #[test]
    fn chart_builders_are_pure() {
        let ds = dataset();
        let sel = site("A");
        assert_eq!(success_pie(&ds, &sel), success_pie(&ds, &sel));
        assert_eq!(
            payload_scatter(&ds, &sel, (0.0, 5000.0)),
            payload_scatter(&ds, &sel, (0.0, 5000.0))
        );
    }
}
