//! Dataset loading and table writing

use anyhow::{bail, Context, Result};
use case_table::{Dataset, Table, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Supported file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Format::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            _ => bail!("Unsupported file format: {}", path.display()),
        }
    }
}

/// Load raw records from a `.csv` or `.json` file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let format = Format::of(path)?;
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let dataset = match format {
        Format::Csv => read_csv(reader),
        Format::Json => read_json(reader),
    }
    .with_context(|| format!("Failed to parse {}", path.display()))?;

    debug!(
        "Loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );
    Ok(dataset)
}

/// Read a CSV with a header row, inferring each cell's type
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let mut table = Table::new(headers.iter())?;

    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to parse CSV record {}", line + 1))?;
        table.push_row(record.iter().map(Value::parse_field).collect())?;
    }
    Ok(table)
}

/// Read a JSON array of flat objects
pub fn read_json<R: Read>(reader: R) -> Result<Dataset> {
    let objects: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_reader(reader).context("Expected a JSON array of objects")?;

    let mut records = Vec::with_capacity(objects.len());
    for (idx, object) in objects.into_iter().enumerate() {
        let mut record = Vec::with_capacity(object.len());
        for (column, raw) in object {
            let value: Value = serde_json::from_value(raw)
                .with_context(|| format!("Unsupported value for {} in record {}", column, idx))?;
            record.push((column, value));
        }
        records.push(record);
    }
    Ok(Table::from_records(records))
}

/// Write a table as `.csv` or `.json`, creating parent directories
pub fn write_table<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = Format::of(path)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    match format {
        Format::Csv => write_csv(table, writer),
        Format::Json => write_json(table, writer),
    }
    .with_context(|| format!("Failed to write {}", path.display()))
}

/// Write a table as CSV; nulls become empty cells
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(table.columns())?;
    for record in table.records() {
        writer.write_record(record.values().iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a table as a JSON array of objects in column order
pub fn write_json<W: Write>(table: &Table, mut writer: W) -> Result<()> {
    let mut objects = Vec::with_capacity(table.len());
    for record in table.records() {
        let mut object = serde_json::Map::new();
        for (column, value) in table.columns().iter().zip(record.values()) {
            object.insert(column.clone(), serde_json::to_value(value)?);
        }
        objects.push(serde_json::Value::Object(object));
    }
    serde_json::to_writer_pretty(&mut writer, &objects)?;
    writer.flush()?;
    Ok(())
}
