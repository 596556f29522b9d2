use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

/// Required column names, as written by the upstream export.
const COL_SITE: &str = "Launch Site";
const COL_PAYLOAD: &str = "Payload Mass (kg)";
const COL_CLASS: &str = "class";
const COL_BOOSTER: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four required columns (primary format)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat scalar columns of the same names
///
/// Extra columns are ignored in every format.  A missing column, an
/// unparsable cell, a negative payload mass, or an outcome class outside
/// {0, 1} is an error; the caller treats load errors as fatal.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            read_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Validate one parsed row.  All three loaders funnel through here.
fn build_record(
    site: String,
    payload_mass_kg: f64,
    class: i64,
    booster_version: String,
    row: usize,
) -> Result<LaunchRecord> {
    if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
        bail!("Row {row}: payload mass must be a non-negative number, got {payload_mass_kg}");
    }
    let outcome = Outcome::try_from(class).with_context(|| format!("Row {row}"))?;

    Ok(LaunchRecord {
        site,
        payload_mass_kg,
        outcome,
        booster_version,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let site_idx = required_column(&headers, COL_SITE)?;
    let payload_idx = required_column(&headers, COL_PAYLOAD)?;
    let class_idx = required_column(&headers, COL_CLASS)?;
    let booster_idx = required_column(&headers, COL_BOOSTER)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let site = record.get(site_idx).unwrap_or("").to_string();
        let booster = record.get(booster_idx).unwrap_or("").to_string();

        let payload_cell = record.get(payload_idx).unwrap_or("").trim();
        let payload: f64 = payload_cell.parse().with_context(|| {
            format!("Row {row_no}, '{COL_PAYLOAD}': '{payload_cell}' is not a number")
        })?;

        let class_cell = record.get(class_idx).unwrap_or("").trim();
        let class: i64 = class_cell.parse().with_context(|| {
            format!("Row {row_no}, '{COL_CLASS}': '{class_cell}' is not an integer")
        })?;

        records.push(build_record(site, payload, class, booster, row_no)?);
    }

    Ok(LaunchDataset::from_records(records))
}

fn required_column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("missing '{name}' column"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One record of the records-oriented JSON export.  Unknown keys are ignored
/// by serde, mirroring the CSV loader's treatment of extra columns.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    class: i64,
    #[serde(rename = "Booster Version Category")]
    booster_version: String,
}

fn read_json(text: &str) -> Result<LaunchDataset> {
    let rows: Vec<JsonRecord> = serde_json::from_str(text).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(row_no, r)| {
            build_record(r.site, r.payload_mass_kg, r.class, r.booster_version, row_no)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of flat launch records.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): strings may arrive as Utf8 or
/// LargeUtf8, and the numeric columns as 64- or 32-bit types.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let site_idx = schema
            .index_of(COL_SITE)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{COL_SITE}' column"))?;
        let payload_idx = schema
            .index_of(COL_PAYLOAD)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{COL_PAYLOAD}' column"))?;
        let class_idx = schema
            .index_of(COL_CLASS)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{COL_CLASS}' column"))?;
        let booster_idx = schema
            .index_of(COL_BOOSTER)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{COL_BOOSTER}' column"))?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();

            let site = string_value(batch.column(site_idx), row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_SITE}'"))?;
            let payload = f64_value(batch.column(payload_idx), row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_PAYLOAD}'"))?;
            let class = i64_value(batch.column(class_idx), row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_CLASS}'"))?;
            let booster = string_value(batch.column(booster_idx), row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_BOOSTER}'"))?;

            records.push(build_record(site, payload, class, booster, row_no)?);
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn string_value(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected a string column, got {other:?}"),
    }
}

fn f64_value(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => Ok(i64_value(col, row)? as f64),
        other => bail!("Expected a float column, got {other:?}"),
    }
}

fn i64_value(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        other => bail!("Expected an integer column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version Category
1,CCAFS LC-40,0,0,v1.0
2,CCAFS LC-40,1,525,v1.0
3,VAFB SLC-4E,1,500,v1.1
4,KSC LC-39A,1,5300,FT
";

    #[test]
    fn csv_parses_and_ignores_extra_columns() {
        let ds = read_csv(GOOD_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.records[1].site, "CCAFS LC-40");
        assert_eq!(ds.records[1].payload_mass_kg, 525.0);
        assert!(ds.records[1].outcome.is_success());
        assert_eq!(ds.records[3].booster_version, "FT");
        assert_eq!(ds.min_payload, 0.0);
        assert_eq!(ds.max_payload, 5300.0);
        assert_eq!(ds.launch_sites[0], "CCAFS LC-40");
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let csv = "Launch Site,class\nCCAFS LC-40,1\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Payload Mass (kg)"));
    }

    #[test]
    fn csv_bad_class_is_an_error() {
        let csv = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,3,100,v1.0
";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn csv_negative_payload_is_an_error() {
        let csv = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,1,-5,v1.0
";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn csv_unparsable_payload_is_an_error() {
        let csv = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,1,heavy,v1.0
";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("heavy"));
    }

    #[test]
    fn json_records_parse() {
        let text = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 3600.0,
             "class": 1, "Booster Version Category": "FT", "Flight Number": 30},
            {"Launch Site": "CCAFS SLC-40", "Payload Mass (kg)": 2500.0,
             "class": 0, "Booster Version Category": "B4"}
        ]"#;
        let ds = read_json(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].site, "KSC LC-39A");
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
        assert_eq!(ds.booster_categories, vec!["FT", "B4"]);
    }

    #[test]
    fn json_bad_class_is_an_error() {
        let text = r#"[{"Launch Site": "A", "Payload Mass (kg)": 1.0,
                        "class": 7, "Booster Version Category": "FT"}]"#;
        assert!(read_json(text).is_err());
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let err = load_file(Path::new("launches.pkl")).unwrap_err();
        assert!(err.to_string().contains(".pkl"));
    }
}
