//! JSON shape and schema tests for the record model and CLI responses.

use pretty_assertions::assert_eq;
use ref_core::responses::{PositionedRecord, SearchResultsResponse};
use ref_core::{Field, Record, RecordFields, RecordId, SearchColumn};
use schemars::schema_for;

fn sample() -> Record {
    Record::new(
        RecordId::from_seq(7),
        RecordFields::default()
            .with(Field::Title, "Corrida noturna")
            .with(Field::Campaign, "Verão Estiloso")
            .with(Field::Category, "REPORTAGEM")
            .with(Field::Place, "musicnonstop.uol.com.br")
            .with(Field::MainSubject, "CORRIDA")
            .with(Field::Path, "https://example.com/corrida")
            .with(Field::Description, "Night run, city lights")
            .with(Field::Language, "pt")
            .with(Field::Keywords, "corrida noite cidade"),
    )
}

#[test]
fn record_serializes_flat_with_id() {
    let value = serde_json::to_value(sample()).unwrap();
    assert_eq!(value["id"], "ref-00000007");
    assert_eq!(value["main_subject"], "CORRIDA");
    assert_eq!(value["keywords"], "corrida noite cidade");
    assert!(value.get("fields").is_none());
}

#[test]
fn record_json_roundtrip() {
    let record = sample();
    let json = serde_json::to_string(&record).unwrap();
    let back: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn values_follow_column_order() {
    let record = sample();
    let values = record.fields.values();
    assert_eq!(values[0], "Corrida noturna");
    assert_eq!(values[4], "CORRIDA");
    assert_eq!(values[8], "corrida noite cidade");
}

#[test]
fn search_response_carries_positions() {
    let response = SearchResultsResponse {
        column: SearchColumn::Campaign,
        term: "verão".into(),
        case_sensitive: false,
        results: vec![PositionedRecord {
            position: 3,
            record: sample(),
        }],
        total_results: 1,
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["column"], "campaign");
    assert_eq!(value["results"][0]["position"], 3);
    assert_eq!(value["results"][0]["id"], "ref-00000007");
}

#[test]
fn record_schema_lists_all_fields() {
    let schema = serde_json::to_value(schema_for!(Record)).unwrap();
    let properties = schema["properties"]
        .as_object()
        .expect("record schema should have properties");
    for field in Field::ALL {
        assert!(
            properties.contains_key(field.as_str()),
            "schema missing {field}"
        );
    }
    assert!(properties.contains_key("id"));
}
