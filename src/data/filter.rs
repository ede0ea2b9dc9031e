use std::collections::HashMap;
use std::hash::Hash;

use super::model::{Field, TomatoRecord};

// ---------------------------------------------------------------------------
// Filter predicate: one equality selection per categorical field
// ---------------------------------------------------------------------------

/// Selection for a single categorical field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// No constraint.
    #[default]
    All,
    /// Keep only records whose value equals this one exactly.
    Exact(String),
}

impl Selection {
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Exact(wanted) => value == Some(wanted.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::All => "All",
            Selection::Exact(v) => v,
        }
    }
}

/// The four filter pickers of the dashboard, combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub shift: Selection,
    pub supplier_lot: Selection,
    pub quality_category: Selection,
    pub defect: Selection,
}

impl FilterSpec {
    /// Selection for one of the categorical fields.
    pub fn selection(&self, field: Field) -> Option<&Selection> {
        match field {
            Field::Shift => Some(&self.shift),
            Field::SupplierLot => Some(&self.supplier_lot),
            Field::QualityCategory => Some(&self.quality_category),
            Field::Defect => Some(&self.defect),
            _ => None,
        }
    }

    pub fn selection_mut(&mut self, field: Field) -> Option<&mut Selection> {
        match field {
            Field::Shift => Some(&mut self.shift),
            Field::SupplierLot => Some(&mut self.supplier_lot),
            Field::QualityCategory => Some(&mut self.quality_category),
            Field::Defect => Some(&mut self.defect),
            _ => None,
        }
    }

    pub fn matches(&self, record: &TomatoRecord) -> bool {
        self.shift.matches(record.shift.as_deref())
            && self.supplier_lot.matches(record.supplier_lot.as_deref())
            && self.quality_category.matches(record.quality_category.as_deref())
            && self.defect.matches(record.defect.as_deref())
    }

    /// Whether every picker is set to "All".
    pub fn is_unconstrained(&self) -> bool {
        *self == FilterSpec::default()
    }
}

/// Return the records that pass all four selections, in their original order.
///
/// The source is only borrowed, so the result can be filtered again.
pub fn filter_records<'a, I>(rows: I, spec: &FilterSpec) -> Vec<&'a TomatoRecord>
where
    I: IntoIterator<Item = &'a TomatoRecord>,
{
    rows.into_iter().filter(|r| spec.matches(r)).collect()
}

// ---------------------------------------------------------------------------
// Categorical counting
// ---------------------------------------------------------------------------

/// Count rows per key in one pass. Categories come out in the order they
/// were first seen.
pub fn count_by<'a, R, K, I, F>(rows: I, mut key: F) -> Vec<(K, usize)>
where
    R: 'a + ?Sized,
    I: IntoIterator<Item = &'a R>,
    K: Eq + Hash + Clone,
    F: FnMut(&'a R) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for row in rows {
        let k = key(row);
        match slots.get(&k) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(k.clone(), counts.len());
                counts.push((k, 1));
            }
        }
    }
    counts
}

/// Per-category counts of a categorical field, labelling absent values.
pub fn count_field<'a, I>(rows: I, field: Field) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a TomatoRecord>,
{
    count_by(rows, |r: &TomatoRecord| {
        r.text(field).unwrap_or(MISSING_LABEL).to_string()
    })
}

/// Category label used for records that lack the field.
pub const MISSING_LABEL: &str = "(missing)";

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: f64, shift: &str, lot: &str, defect: &str) -> TomatoRecord {
        TomatoRecord {
            id,
            shift: Some(shift.to_string()),
            supplier_lot: Some(lot.to_string()),
            quality_category: Some("Primera".to_string()),
            defect: Some(defect.to_string()),
            diameter_mm: 60.0,
            weight_g: 110.0,
            ..Default::default()
        }
    }

    fn rows() -> Vec<TomatoRecord> {
        vec![
            record(1.0, "Mañana", "L01", "No"),
            record(2.0, "Tarde", "L01", "Sí"),
            record(3.0, "Mañana", "L02", "Sí"),
            record(4.0, "Noche", "L02", "No"),
            record(5.0, "Mañana", "L01", "Sí"),
        ]
    }

    fn ids(rows: &[&TomatoRecord]) -> Vec<f64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn default_spec_keeps_everything_in_order() {
        let data = rows();
        let kept = filter_records(&data, &FilterSpec::default());
        assert_eq!(ids(&kept), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn selections_combine_with_and() {
        let data = rows();
        let spec = FilterSpec {
            shift: Selection::Exact("Mañana".into()),
            defect: Selection::Exact("Sí".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&data, &spec)), vec![3.0, 5.0]);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let data = rows();
        let spec = FilterSpec {
            supplier_lot: Selection::Exact("L01".into()),
            ..Default::default()
        };
        let once = filter_records(&data, &spec);
        let twice = filter_records(once.iter().copied(), &spec);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn unknown_value_matches_nothing() {
        let data = rows();
        let spec = FilterSpec {
            shift: Selection::Exact("Madrugada".into()),
            ..Default::default()
        };
        assert!(filter_records(&data, &spec).is_empty());
        assert_eq!(data.len(), 5);
    }

    #[test]
    fn absent_field_fails_exact_selection() {
        let r = TomatoRecord::default();
        assert!(FilterSpec::default().matches(&r));
        assert!(!Selection::Exact("No".into()).matches(r.defect.as_deref()));
    }

    #[test]
    fn counts_follow_first_occurrence_and_sum_to_len() {
        let data = rows();
        let counts = count_field(&data, Field::Shift);
        assert_eq!(
            counts,
            vec![
                ("Mañana".to_string(), 3),
                ("Tarde".to_string(), 1),
                ("Noche".to_string(), 1),
            ]
        );
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, data.len());
    }

    #[test]
    fn count_by_accepts_any_key() {
        let words = ["b", "a", "b", "c", "b"];
        let counts = count_by(words.iter(), |w: &&str| w.len());
        assert_eq!(counts, vec![(1, 5)]);
        assert!(count_field(&[] as &[TomatoRecord], Field::Defect).is_empty());
    }
}
