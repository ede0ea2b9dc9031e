use csv::{QuoteStyle, StringRecord, Terminator, Trim};
use thiserror::Error;

use super::model::{Dataset, Field, TomatoRecord};

/// Failures of the CSV codec itself. Bad cell contents are not errors:
/// they become `NaN` and flow into the statistics.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("reading CSV header")]
    Header(#[source] csv::Error),
    #[error("reading CSV row {row}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("writing CSV")]
    Write(#[source] csv::Error),
    #[error("flushing CSV output")]
    Flush(#[source] std::io::Error),
    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

/// Parse an inspection file. The first line names the columns; every
/// following line becomes one record, cells matched to headers by position.
///
/// * Surrounding whitespace of the whole text is dropped, so blank lines
///   before the header or after the last row never become records.
/// * Headers and cells are trimmed; `\n` and `\r\n` line ends both work.
/// * Short rows leave the missing fields absent (numeric ones become `NaN`).
/// * Extra cells past the header are ignored.
/// * Quoted cells are unquoted, so output of [`write_csv`] reads back.
pub fn parse_csv(text: &str) -> Result<Dataset, CodecError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.trim().as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(CodecError::Header)?
        .iter()
        .map(str::to_string)
        .collect();
    let fields: Vec<Option<Field>> = columns.iter().map(|c| Field::from_header(c)).collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|source| CodecError::Row {
            row: row_no + 1,
            source,
        })?;
        records.push(build_record(&columns, &fields, &row));
    }

    Ok(Dataset::new(columns, records))
}

fn build_record(columns: &[String], fields: &[Option<Field>], row: &StringRecord) -> TomatoRecord {
    let mut record = TomatoRecord::default();
    for (idx, (name, field)) in columns.iter().zip(fields).enumerate() {
        let cell = row.get(idx);
        match field {
            Some(f) if f.is_numeric() => record.set_number(*f, coerce_number(cell)),
            Some(f) => {
                if let Some(c) = cell {
                    record.set_text(*f, c.to_string());
                }
            }
            None => {
                if let Some(c) = cell {
                    record.extra.push((name.clone(), c.to_string()));
                }
            }
        }
    }
    record
}

/// Lenient numeric coercion.
///
/// A missing cell is `NaN`, an empty cell is `0`, and anything that is not a
/// decimal, exponent, `Infinity` or `0x`/`0o`/`0b` literal is `NaN`.
pub fn coerce_number(cell: Option<&str>) -> f64 {
    let Some(raw) = cell else {
        return f64::NAN;
    };
    let s = raw.trim();
    match s {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let lower = s.to_ascii_lowercase();
    if let Some(v) = parse_prefixed_integer(&lower) {
        return v;
    }
    // Rust accepts "inf" / "nan" spellings that are not numbers here.
    if lower.contains("inf") || lower.contains("nan") {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_prefixed_integer(s: &str) -> Option<f64> {
    let (digits, radix) = if let Some(d) = s.strip_prefix("0x") {
        (d, 16)
    } else if let Some(d) = s.strip_prefix("0o") {
        (d, 8)
    } else if let Some(d) = s.strip_prefix("0b") {
        (d, 2)
    } else {
        return None;
    };
    if digits.starts_with('+') {
        return Some(f64::NAN);
    }
    Some(
        u64::from_str_radix(digits, radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN),
    )
}

// ---------------------------------------------------------------------------
// Serialize
// ---------------------------------------------------------------------------

/// Serialize records for export under `columns` (see
/// [`Dataset::export_columns`]).
///
/// Every row gets a cell for every column, empty when the record has no
/// value. Every header and cell is wrapped in double quotes (embedded quotes
/// doubled) and rows are joined by `\n` with no trailing newline. No rows
/// gives an empty string.
pub fn write_csv<'a, I>(columns: &[String], rows: I) -> Result<String, CodecError>
where
    I: IntoIterator<Item = &'a TomatoRecord>,
{
    let mut rows = rows.into_iter().peekable();
    if rows.peek().is_none() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns).map_err(CodecError::Write)?;
    for row in rows {
        let cells = columns.iter().map(|c| row.value(c).unwrap_or_default());
        writer.write_record(cells).map_err(CodecError::Write)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CodecError::Flush(e.into_error()))?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
