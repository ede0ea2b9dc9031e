use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Field – the known columns of a tomato inspection CSV
// ---------------------------------------------------------------------------

/// One of the eight columns every inspection file is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Id,
    Date,
    Shift,
    SupplierLot,
    QualityCategory,
    Defect,
    DiameterMm,
    WeightG,
}

impl Field {
    /// All fields in canonical column order.
    pub const ALL: [Field; 8] = [
        Field::Id,
        Field::Date,
        Field::Shift,
        Field::SupplierLot,
        Field::QualityCategory,
        Field::Defect,
        Field::DiameterMm,
        Field::WeightG,
    ];

    /// The four categorical fields that can be filtered and counted.
    pub const CATEGORICAL: [Field; 4] = [
        Field::Shift,
        Field::SupplierLot,
        Field::QualityCategory,
        Field::Defect,
    ];

    /// Column name as it appears in the CSV header.
    pub fn header(self) -> &'static str {
        match self {
            Field::Id => "id_tomate",
            Field::Date => "fecha",
            Field::Shift => "turno",
            Field::SupplierLot => "lote_proveedor",
            Field::QualityCategory => "categoria_calidad",
            Field::Defect => "defecto",
            Field::DiameterMm => "diametro_mm",
            Field::WeightG => "peso_g",
        }
    }

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Date => "Date",
            Field::Shift => "Shift",
            Field::SupplierLot => "Supplier lot",
            Field::QualityCategory => "Quality",
            Field::Defect => "Defect",
            Field::DiameterMm => "Diameter (mm)",
            Field::WeightG => "Weight (g)",
        }
    }

    pub fn from_header(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.header() == name)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Field::Id | Field::DiameterMm | Field::WeightG)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// TomatoRecord – one row of the inspection file
// ---------------------------------------------------------------------------

/// A single inspected tomato.
///
/// Numeric fields hold `f64::NAN` when the cell was missing or not a number,
/// so a bad cell poisons every aggregate it enters instead of being dropped.
/// Text fields are `None` when the row was shorter than the header.
#[derive(Debug, Clone, PartialEq)]
pub struct TomatoRecord {
    pub id: f64,
    pub date: Option<String>,
    pub shift: Option<String>,
    pub supplier_lot: Option<String>,
    pub quality_category: Option<String>,
    pub defect: Option<String>,
    pub diameter_mm: f64,
    pub weight_g: f64,
    /// Columns outside the known schema, in header order.
    pub extra: Vec<(String, String)>,
}

impl Default for TomatoRecord {
    fn default() -> Self {
        Self {
            id: f64::NAN,
            date: None,
            shift: None,
            supplier_lot: None,
            quality_category: None,
            defect: None,
            diameter_mm: f64::NAN,
            weight_g: f64::NAN,
            extra: Vec::new(),
        }
    }
}

impl TomatoRecord {
    /// Text value of a non-numeric field.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Date => self.date.as_deref(),
            Field::Shift => self.shift.as_deref(),
            Field::SupplierLot => self.supplier_lot.as_deref(),
            Field::QualityCategory => self.quality_category.as_deref(),
            Field::Defect => self.defect.as_deref(),
            Field::Id | Field::DiameterMm | Field::WeightG => None,
        }
    }

    /// Numeric value of a numeric field.
    pub fn number(&self, field: Field) -> Option<f64> {
        match field {
            Field::Id => Some(self.id),
            Field::DiameterMm => Some(self.diameter_mm),
            Field::WeightG => Some(self.weight_g),
            _ => None,
        }
    }

    pub(crate) fn set_text(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Date => &mut self.date,
            Field::Shift => &mut self.shift,
            Field::SupplierLot => &mut self.supplier_lot,
            Field::QualityCategory => &mut self.quality_category,
            Field::Defect => &mut self.defect,
            Field::Id | Field::DiameterMm | Field::WeightG => return,
        };
        *slot = Some(value);
    }

    pub(crate) fn set_number(&mut self, field: Field, value: f64) {
        match field {
            Field::Id => self.id = value,
            Field::DiameterMm => self.diameter_mm = value,
            Field::WeightG => self.weight_g = value,
            _ => {}
        }
    }

    /// Cell value for a column name, rendered the way it is exported.
    pub fn value(&self, column: &str) -> Option<String> {
        match Field::from_header(column) {
            Some(f) if f.is_numeric() => self.number(f).map(format_number),
            Some(f) => self.text(f).map(str::to_string),
            None => self
                .extra
                .iter()
                .rev()
                .find(|(k, _)| k == column)
                .map(|(_, v)| v.clone()),
        }
    }

    /// The id as shown in tables: integral ids without a fraction.
    pub fn id_label(&self) -> String {
        format_number(self.id)
    }
}

/// Shortest plain rendering of a number (`12`, `12.5`, `NaN`).
pub fn format_number(v: f64) -> String {
    if v == f64::INFINITY {
        "Infinity".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded file
// ---------------------------------------------------------------------------

/// All records of one loaded file, in CSV row order, with the distinct
/// values of each categorical field pre-computed for the filter pickers.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<TomatoRecord>,
    /// Header names in file order.
    pub columns: Vec<String>,
    pub unique_values: BTreeMap<Field, BTreeSet<String>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<TomatoRecord>) -> Self {
        let mut unique_values: BTreeMap<Field, BTreeSet<String>> = BTreeMap::new();
        for field in Field::CATEGORICAL {
            let values = records
                .iter()
                .filter_map(|r| r.text(field))
                .map(str::to_string)
                .collect();
            unique_values.insert(field, values);
        }
        Dataset {
            records,
            columns,
            unique_values,
        }
    }

    /// Distinct values of a categorical field, sorted.
    pub fn options(&self, field: Field) -> impl Iterator<Item = &str> {
        self.unique_values
            .get(&field)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Export header: file columns in file order (first occurrence of a
    /// repeated name), then any numeric column the file did not carry.
    pub fn export_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::with_capacity(self.columns.len() + 3);
        for name in &self.columns {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }
        for field in Field::ALL.into_iter().filter(|f| f.is_numeric()) {
            if !columns.iter().any(|c| c == field.header()) {
                columns.push(field.header().to_string());
            }
        }
        columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
