use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DatasetError;
use super::model::{
    LaunchDataset, LaunchRecord, COL_BOOSTER, COL_CLASS, COL_PAYLOAD, COL_SITE, REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the four launch columns
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – the same column names, numeric columns of any int/float width
///
/// Any missing column or out-of-domain value fails the whole load.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launch records from {} ({} sites: {:?})",
        dataset.len(),
        path.display(),
        dataset.sites().len(),
        dataset.sites()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per line.
/// Column order is free and extra columns are ignored.
fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &str| -> Result<usize, DatasetError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    };
    let site_idx = column(COL_SITE)?;
    let payload_idx = column(COL_PAYLOAD)?;
    let booster_idx = column(COL_BOOSTER)?;
    let class_idx = column(COL_CLASS)?;

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let payload = parse_payload(cell(payload_idx), row)?;
        let class = parse_class(cell(class_idx), row)?;

        records.push(LaunchRecord::new(
            row,
            cell(site_idx),
            payload,
            cell(booster_idx),
            class,
        )?);
    }

    Ok(LaunchDataset::from_records(records))
}

fn parse_payload(s: &str, row: usize) -> Result<f64, DatasetError> {
    s.parse::<f64>().map_err(|_| invalid(row, COL_PAYLOAD, s))
}

/// `class` is an integer flag; `1.0`-style floats written by dataframe tools
/// are accepted when integral.
fn parse_class(s: &str, row: usize) -> Result<i64, DatasetError> {
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    match s.parse::<f64>() {
        Ok(f) => integral(f).ok_or_else(|| invalid(row, COL_CLASS, s)),
        Err(_) => Err(invalid(row, COL_CLASS, s)),
    }
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

fn invalid(row: usize, column: &str, value: impl ToString) -> DatasetError {
    DatasetError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0",
///     "class": 0
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (row, value) in rows.iter().enumerate() {
        let obj = value
            .as_object()
            .with_context(|| format!("Row {row} is not a JSON object"))?;

        let site = json_string(obj, COL_SITE, row)?;
        let booster = json_string(obj, COL_BOOSTER, row)?;
        let payload = json_field(obj, COL_PAYLOAD)?;
        let payload = payload
            .as_f64()
            .ok_or_else(|| invalid(row, COL_PAYLOAD, payload))?;
        let class = json_field(obj, COL_CLASS)?;
        let class = class
            .as_i64()
            .or_else(|| class.as_f64().and_then(integral))
            .ok_or_else(|| invalid(row, COL_CLASS, class))?;

        records.push(LaunchRecord::new(row, site, payload, booster, class)?);
    }

    Ok(LaunchDataset::from_records(records))
}

fn json_field<'a>(
    obj: &'a Map<String, JsonValue>,
    column: &str,
) -> Result<&'a JsonValue, DatasetError> {
    obj.get(column)
        .ok_or_else(|| DatasetError::MissingColumn(column.to_string()))
}

fn json_string(
    obj: &Map<String, JsonValue>,
    column: &str,
    row: usize,
) -> Result<String, DatasetError> {
    let value = json_field(obj, column)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(row, column, value))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the four launch columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): text columns may be Utf8, LargeUtf8 or
/// dictionary-encoded (Pandas categoricals), numbers any of
/// Int32 / Int64 / Float32 / Float64.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    // Checked on the file schema so a file without row groups still fails.
    let schema = builder.schema().clone();
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = schema
            .index_of(name)
            .map_err(|_| DatasetError::MissingColumn(name.to_string()))?;
    }
    let [site_idx, payload_idx, booster_idx, class_idx] = indices;

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = text_column(batch.column(site_idx), COL_SITE)?;
        let booster_col = text_column(batch.column(booster_idx), COL_BOOSTER)?;
        let payload_col = batch.column(payload_idx);
        let class_col = batch.column(class_idx);

        for i in 0..batch.num_rows() {
            let row = row_offset + i;
            let site =
                extract_string(&site_col, i).ok_or_else(|| invalid(row, COL_SITE, "null"))?;
            let booster =
                extract_string(&booster_col, i).ok_or_else(|| invalid(row, COL_BOOSTER, "null"))?;
            let payload = extract_f64(payload_col, i)
                .with_context(|| format!("Row {row}: failed to read '{COL_PAYLOAD}'"))?;
            let class = extract_f64(class_col, i)
                .with_context(|| format!("Row {row}: failed to read '{COL_CLASS}'"))?;
            let class = integral(class).ok_or_else(|| invalid(row, COL_CLASS, class))?;

            records.push(LaunchRecord::new(row, site, payload, booster, class)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

/// Normalise a text column (LargeUtf8, Dictionary<_, Utf8>, ...) to Utf8.
fn text_column(col: &ArrayRef, name: &str) -> Result<ArrayRef> {
    if col.data_type() == &DataType::Utf8 {
        return Ok(Arc::clone(col));
    }
    cast(col.as_ref(), &DataType::Utf8)
        .with_context(|| format!("column '{name}' of type {:?} is not text", col.data_type()))
}

/// Extract a string cell from a Utf8 column; `None` when null.
fn extract_string(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    col.as_string_opt::<i32>()
        .map(|s| s.value(row).to_string())
}

/// Extract a numeric cell as `f64` from any supported int/float column.
fn extract_f64(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        other => bail!("Expected an integer or float column, got {other:?}"),
    };
    value.context("column type does not match its array")
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{DictionaryArray, LargeStringArray, StringArray};
    use arrow::datatypes::{Field, Int32Type, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    fn dataset_error(err: &anyhow::Error) -> &DatasetError {
        err.downcast_ref::<DatasetError>()
            .unwrap_or_else(|| panic!("expected DatasetError, got {err:#}"))
    }

    #[test]
    fn loads_csv_with_extra_and_reordered_columns() {
        let file = csv_file(
            "Flight Number,class,Launch Site,Booster Version Category,Payload Mass (kg)\n\
             1,0,CCAFS LC-40,v1.0,0\n\
             2,1,VAFB SLC-4E,FT,9600.0\n\
             3,1.0,CCAFS LC-40,B4,2296\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["CCAFS LC-40".to_string(), "VAFB SLC-4E".to_string()]);
        assert_eq!(ds.payload_bounds(), Some((0.0, 9600.0)));
        assert!(ds.records()[2].outcome.is_success());
    }

    #[test]
    fn csv_missing_class_column_fails() {
        let file = csv_file(
            "Launch Site,Payload Mass (kg),Booster Version Category\n\
             CCAFS LC-40,500,v1.0\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            dataset_error(&err),
            DatasetError::MissingColumn(c) if c == "class"
        ));
    }

    #[test]
    fn csv_bad_class_names_the_row() {
        let file = csv_file(
            "Launch Site,Payload Mass (kg),Booster Version Category,class\n\
             CCAFS LC-40,500,v1.0,1\n\
             CCAFS LC-40,600,v1.0,2\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            dataset_error(&err),
            DatasetError::InvalidClass { row: 1, value: 2 }
        ));
        assert!(format!("{err:#}").contains("row 1"));
    }

    #[test]
    fn csv_negative_payload_fails() {
        let file = csv_file(
            "Launch Site,Payload Mass (kg),Booster Version Category,class\n\
             KSC LC-39A,-5,FT,1\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            dataset_error(&err),
            DatasetError::InvalidPayload { row: 0, .. }
        ));
    }

    #[test]
    fn csv_unparsable_payload_fails() {
        let file = csv_file(
            "Launch Site,Payload Mass (kg),Booster Version Category,class\n\
             KSC LC-39A,heavy,FT,1\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            dataset_error(&err),
            DatasetError::InvalidValue { row: 0, column, value } if column == COL_PAYLOAD && value == "heavy"
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("does_not_exist.csv")).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn loads_json_records() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[
                {{"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490.0,
                  "Booster Version Category": "FT", "class": 1}},
                {{"Launch Site": "CCAFS SLC-40", "Payload Mass (kg)": 3600,
                  "Booster Version Category": "B5", "class": 0.0}}
            ]"#
        )
        .unwrap();
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].payload_mass_kg, 3600.0);
        assert!(!ds.records()[1].outcome.is_success());
    }

    #[test]
    fn json_missing_site_fails() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"Payload Mass (kg)": 1.0, "Booster Version Category": "FT", "class": 1}}]"#
        )
        .unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(dataset_error(&err), DatasetError::MissingColumn(c) if c == COL_SITE));
    }

    fn parquet_file(fields: Vec<Field>, columns: Vec<ArrayRef>) -> NamedTempFile {
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let out = std::fs::File::create(file.path()).unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        if batch.num_rows() > 0 {
            writer.write(&batch).unwrap();
        }
        writer.close().unwrap();
        file
    }

    #[test]
    fn loads_parquet_written_by_arrow() {
        let file = parquet_file(
            vec![
                Field::new(COL_SITE, DataType::Utf8, false),
                Field::new(COL_PAYLOAD, DataType::Float64, false),
                Field::new(COL_BOOSTER, DataType::Utf8, false),
                Field::new(COL_CLASS, DataType::Int64, false),
            ],
            vec![
                Arc::new(StringArray::from(vec!["VAFB SLC-4E", "KSC LC-39A"])),
                Arc::new(Float64Array::from(vec![500.0, 15600.0])),
                Arc::new(StringArray::from(vec!["v1.1", "B5"])),
                Arc::new(Int64Array::from(vec![0, 1])),
            ],
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.sites(), ["VAFB SLC-4E".to_string(), "KSC LC-39A".to_string()]);
        assert_eq!(ds.payload_bounds(), Some((500.0, 15600.0)));
    }

    #[test]
    fn empty_parquet_without_launch_columns_fails() {
        let file = parquet_file(
            vec![Field::new("Flight Number", DataType::Int64, false)],
            vec![Arc::new(Int64Array::from(Vec::<i64>::new()))],
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            dataset_error(&err),
            DatasetError::MissingColumn(c) if c == COL_SITE
        ));
    }

    #[test]
    fn loads_parquet_with_narrow_and_large_types() {
        let file = parquet_file(
            vec![
                Field::new(COL_SITE, DataType::LargeUtf8, false),
                Field::new(COL_PAYLOAD, DataType::Float32, false),
                Field::new(COL_BOOSTER, DataType::Utf8, false),
                Field::new(COL_CLASS, DataType::Int32, false),
            ],
            vec![
                Arc::new(LargeStringArray::from(vec!["CCAFS LC-40", "KSC LC-39A"])),
                Arc::new(Float32Array::from(vec![677.0, 2490.5])),
                Arc::new(StringArray::from(vec!["v1.0", "FT"])),
                Arc::new(Int32Array::from(vec![0, 1])),
            ],
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.sites(), ["CCAFS LC-40".to_string(), "KSC LC-39A".to_string()]);
        assert_eq!(ds.payload_bounds(), Some((677.0, 2490.5)));
        assert!(!ds.records()[0].outcome.is_success());
        assert!(ds.records()[1].outcome.is_success());
    }

    #[test]
    fn loads_parquet_with_categorical_site() {
        let sites: DictionaryArray<Int32Type> =
            vec!["KSC LC-39A", "VAFB SLC-4E", "KSC LC-39A"].into_iter().collect();
        let file = parquet_file(
            vec![
                Field::new(COL_SITE, sites.data_type().clone(), false),
                Field::new(COL_PAYLOAD, DataType::Float64, false),
                Field::new(COL_BOOSTER, DataType::Utf8, false),
                Field::new(COL_CLASS, DataType::Int64, false),
            ],
            vec![
                Arc::new(sites),
                Arc::new(Float64Array::from(vec![3000.0, 9600.0, 5300.0])),
                Arc::new(StringArray::from(vec!["FT", "FT", "B5"])),
                Arc::new(Int64Array::from(vec![1, 1, 0])),
            ],
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[0].site, "KSC LC-39A");
        assert_eq!(ds.sites(), ["KSC LC-39A".to_string(), "VAFB SLC-4E".to_string()]);
    }
}
