//! Display-ready view of the current dataset under the current filters.
//!
//! [`DashboardReport::build`] is a pure function of its inputs and is
//! rebuilt from scratch on every frame; nothing here is cached or mutated.

use crate::config::DashboardConfig;
use crate::data::codec::{write_csv, CodecError};
use crate::data::filter::{count_field, filter_records, FilterSpec};
use crate::data::model::{Dataset, Field, TomatoRecord};
use crate::stats::{
    histogram, linear_fit, mean_and_variance, shape_stats, smallest_by, Histogram, LinearFit,
    MeanVariance, ShapeStats,
};

/// Marker shown in place of a statistic that has no data behind it.
pub const UNAVAILABLE: &str = "–";

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub defective: usize,
    /// Share of defective records in percent, `None` without records.
    pub defect_pct: Option<f64>,
    pub diameter: Option<MeanVariance>,
    pub weight: Option<MeanVariance>,
}

impl Summary {
    pub fn from_rows(rows: &[&TomatoRecord], affirmative_defect: &str) -> Self {
        let count = rows.len();
        let defective = rows
            .iter()
            .filter(|r| r.defect.as_deref() == Some(affirmative_defect))
            .count();
        let defect_pct = (count > 0).then(|| defective as f64 / count as f64 * 100.0);

        Summary {
            count,
            defective,
            defect_pct,
            diameter: mean_and_variance(&column(rows, |r| r.diameter_mm)),
            weight: mean_and_variance(&column(rows, |r| r.weight_g)),
        }
    }

    pub fn defect_pct_label(&self) -> String {
        match self.defect_pct {
            Some(pct) => format!("{pct:.1}%"),
            None => UNAVAILABLE.to_string(),
        }
    }

    pub fn diameter_labels(&self) -> (String, String) {
        mean_variance_labels(self.diameter)
    }

    pub fn weight_labels(&self) -> (String, String) {
        mean_variance_labels(self.weight)
    }
}

/// `(mean, variance)` with two decimals, or the unavailable marker.
fn mean_variance_labels(mv: Option<MeanVariance>) -> (String, String) {
    match mv {
        Some(mv) => (format!("{:.2}", mv.mean), format!("{:.2}", mv.variance)),
        None => (UNAVAILABLE.to_string(), UNAVAILABLE.to_string()),
    }
}

/// Fixed one-decimal rendering used by the records table.
pub fn one_decimal(v: f64) -> String {
    format!("{v:.1}")
}

fn column(rows: &[&TomatoRecord], pick: impl Fn(&TomatoRecord) -> f64) -> Vec<f64> {
    rows.iter().map(|r| pick(r)).collect()
}

// ---------------------------------------------------------------------------
// Scatter + regression
// ---------------------------------------------------------------------------

/// Diameter/weight points with the fitted line drawn across the diameter range.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterView {
    pub points: Vec<[f64; 2]>,
    pub fit: LinearFit,
    /// Line endpoints at the smallest and largest diameter.
    pub line: [[f64; 2]; 2],
}

impl ScatterView {
    pub fn new(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.is_empty() {
            return None;
        }
        let fit = linear_fit(xs, ys);
        let x_min = crate::stats::nan_min(xs);
        let x_max = crate::stats::nan_max(xs);
        Some(ScatterView {
            points: xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect(),
            fit,
            line: [[x_min, fit.predict(x_min)], [x_max, fit.predict(x_max)]],
        })
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Everything the dashboard draws, derived from one dataset and one filter.
#[derive(Debug, Clone)]
pub struct DashboardReport<'a> {
    /// Records passing the filters, in file order. Also the export set.
    pub rows: Vec<&'a TomatoRecord>,
    /// Export header, see [`Dataset::export_columns`].
    pub columns: Vec<String>,
    pub summary: Summary,
    pub shift_counts: Vec<(String, usize)>,
    pub supplier_counts: Vec<(String, usize)>,
    pub quality_counts: Vec<(String, usize)>,
    pub defect_counts: Vec<(String, usize)>,
    pub diameter_histogram: Histogram,
    pub weight_histogram: Histogram,
    pub scatter: Option<ScatterView>,
    pub diameter_shape: Option<ShapeStats>,
    pub weight_shape: Option<ShapeStats>,
    /// Smallest tomatoes by diameter.
    pub smallest: Vec<&'a TomatoRecord>,
}

impl<'a> DashboardReport<'a> {
    pub fn build(dataset: &'a Dataset, filters: &FilterSpec, config: &DashboardConfig) -> Self {
        let rows = filter_records(&dataset.records, filters);
        let diameters = column(&rows, |r| r.diameter_mm);
        let weights = column(&rows, |r| r.weight_g);
        let bins = config.histogram_bins;

        DashboardReport {
            summary: Summary::from_rows(&rows, &config.affirmative_defect),
            shift_counts: count_field(rows.iter().copied(), Field::Shift),
            supplier_counts: count_field(rows.iter().copied(), Field::SupplierLot),
            quality_counts: count_field(rows.iter().copied(), Field::QualityCategory),
            defect_counts: count_field(rows.iter().copied(), Field::Defect),
            diameter_histogram: histogram(&diameters, bins),
            weight_histogram: histogram(&weights, bins),
            scatter: ScatterView::new(&diameters, &weights),
            diameter_shape: shape_stats(&diameters),
            weight_shape: shape_stats(&weights),
            smallest: smallest_by(&rows, config.smallest_count, |r| r.diameter_mm),
            rows,
            columns: dataset.export_columns(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Category counts for one of the four categorical fields.
    pub fn counts(&self, field: Field) -> &[(String, usize)] {
        match field {
            Field::Shift => &self.shift_counts,
            Field::SupplierLot => &self.supplier_counts,
            Field::QualityCategory => &self.quality_counts,
            Field::Defect => &self.defect_counts,
            _ => &[],
        }
    }

    /// The filtered rows as export text.
    pub fn export_csv(&self) -> Result<String, CodecError> {
        write_csv(&self.columns, self.rows.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::codec::parse_csv;
    use crate::data::filter::Selection;
    use approx::assert_relative_eq;

    const CSV: &str = "id_tomate,fecha,turno,lote_proveedor,categoria_calidad,defecto,\
        diametro_mm,peso_g\n\
        1,2024-05-02,Mañana,L01,Primera,No,10,50\n\
        2,2024-05-02,Tarde,L02,Segunda,Sí,20,60\n\
        3,2024-05-03,Mañana,L01,Primera,No,30,70\n";

    #[test]
    fn summarises_unfiltered_rows() {
        let ds = parse_csv(CSV).unwrap();
        let config = DashboardConfig::default();
        let report = DashboardReport::build(&ds, &FilterSpec::default(), &config);

        assert_eq!(report.summary.count, 3);
        let d = report.summary.diameter.unwrap();
        assert_relative_eq!(d.mean, 20.0);
        assert_relative_eq!(d.variance, 100.0);
        assert_eq!(report.summary.defective, 1);
        assert_eq!(report.summary.defect_pct_label(), "33.3%");
        assert_eq!(
            report.summary.weight_labels(),
            ("60.00".to_string(), "100.00".to_string())
        );

        assert_eq!(
            report.counts(Field::Shift),
            &[("Mañana".to_string(), 2), ("Tarde".to_string(), 1)]
        );
        assert_eq!(report.diameter_histogram.counts.len(), 10);
        assert_eq!(report.diameter_histogram.counts.iter().sum::<usize>(), 3);

        let scatter = report.scatter.as_ref().unwrap();
        assert_relative_eq!(scatter.fit.slope, 1.0, epsilon = 1e-12);
        assert_relative_eq!(scatter.fit.intercept, 40.0, epsilon = 1e-9);
        assert_eq!(scatter.line[0][0], 10.0);
        assert_eq!(scatter.line[1][0], 30.0);

        let smallest: Vec<f64> = report.smallest.iter().map(|r| r.diameter_mm).collect();
        assert_eq!(smallest, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn filter_matching_nothing_reports_unavailable() {
        let ds = parse_csv(CSV).unwrap();
        let filters = FilterSpec {
            shift: Selection::Exact("Noche".into()),
            ..Default::default()
        };
        let report = DashboardReport::build(&ds, &filters, &DashboardConfig::default());

        assert!(report.is_empty());
        assert_eq!(report.summary.count, 0);
        assert_eq!(report.summary.defect_pct, None);
        assert_eq!(report.summary.defect_pct_label(), UNAVAILABLE);
        assert_eq!(
            report.summary.diameter_labels(),
            (UNAVAILABLE.to_string(), UNAVAILABLE.to_string())
        );
        assert!(report.shift_counts.is_empty());
        assert!(report.diameter_histogram.counts.is_empty());
        assert!(report.scatter.is_none());
        assert!(report.diameter_shape.is_none());
        assert_eq!(report.export_csv().unwrap(), "");
    }

    #[test]
    fn export_contains_only_filtered_rows() {
        let ds = parse_csv(CSV).unwrap();
        let filters = FilterSpec {
            defect: Selection::Exact("Sí".into()),
            ..Default::default()
        };
        let report = DashboardReport::build(&ds, &filters, &DashboardConfig::default());
        let text = report.export_csv().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("\"2\",\"2024-05-02\",\"Tarde\""));
    }

    #[test]
    fn export_header_follows_the_file_not_the_first_visible_row() {
        let csv = "turno,id_tomate,defecto,peso_g\n\
            Mañana,1\n\
            Tarde,2,Sí,97.4\n";
        let ds = parse_csv(csv).unwrap();
        let filters = FilterSpec {
            shift: Selection::Exact("Mañana".into()),
            ..Default::default()
        };
        let report = DashboardReport::build(&ds, &filters, &DashboardConfig::default());
        assert_eq!(
            report.export_csv().unwrap(),
            "\"turno\",\"id_tomate\",\"defecto\",\"peso_g\",\"diametro_mm\"\n\
             \"Mañana\",\"1\",\"\",\"NaN\",\"NaN\""
        );
    }

    #[test]
    fn affirmative_token_comes_from_config() {
        let ds = parse_csv(CSV).unwrap();
        let config = DashboardConfig {
            affirmative_defect: "No".into(),
            ..Default::default()
        };
        let report = DashboardReport::build(&ds, &FilterSpec::default(), &config);
        assert_eq!(report.summary.defective, 2);
    }

    #[test]
    fn malformed_weight_poisons_weight_stats_only() {
        let csv = "id_tomate,turno,diametro_mm,peso_g\n1,Mañana,50,abc\n2,Mañana,52,101\n";
        let ds = parse_csv(csv).unwrap();
        let config = DashboardConfig::default();
        let report = DashboardReport::build(&ds, &FilterSpec::default(), &config);
        assert!(report.summary.weight.unwrap().mean.is_nan());
        assert_relative_eq!(report.summary.diameter.unwrap().mean, 51.0);
        assert_eq!(report.summary.weight_labels().0, "NaN");
    }

    #[test]
    fn one_decimal_rounds_for_the_table() {
        assert_eq!(one_decimal(61.26), "61.3");
        assert_eq!(one_decimal(118.0), "118.0");
    }
}
