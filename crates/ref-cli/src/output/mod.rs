use ref_core::Field;
use ref_core::responses::PositionedRecord;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Columns shown for records in table mode, after `#` and `id`.
const RECORD_COLUMNS: [Field; 6] = [
    Field::Title,
    Field::Campaign,
    Field::MainSubject,
    Field::Keywords,
    Field::Description,
    Field::Path,
];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_key_values(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a response that carries records: JSON modes print `value`, table
/// mode prints one row per record.
pub fn output_records<T: Serialize>(
    value: &T,
    records: &[PositionedRecord],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_record_table(records));
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output(value, format),
    }
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

pub fn render_record_table(records: &[PositionedRecord]) -> String {
    if records.is_empty() {
        return String::from("(no records)");
    }

    let mut headers = vec!["#", "id"];
    headers.extend(RECORD_COLUMNS.iter().map(|field| field.as_str()));

    let rows = records
        .iter()
        .map(|entry| {
            let mut row = vec![entry.position.to_string(), entry.record.id.to_string()];
            row.extend(
                RECORD_COLUMNS
                    .iter()
                    .map(|field| entry.record.get(*field).to_string()),
            );
            row
        })
        .collect::<Vec<_>>();

    table::render_rows(&headers, &rows, options())
}

fn render_key_values<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let rows = match serde_json::to_value(value)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| vec![key, value_to_cell(&value)])
            .collect::<Vec<_>>(),
        scalar => vec![vec![String::from("value"), value_to_cell(&scalar)]],
    };
    Ok(table::render_rows(&["key", "value"], &rows, options()))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
