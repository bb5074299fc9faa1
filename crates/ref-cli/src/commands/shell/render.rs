use std::fmt::Write as _;

use ref_core::responses::StoreStatusResponse;
use ref_core::{Field, Record, RecordFields};

/// Fields shown on a result card, in display order.
const CARD_FIELDS: [(Field, &str); 6] = [
    (Field::MainSubject, "main subject"),
    (Field::Title, "title"),
    (Field::Campaign, "campaign"),
    (Field::Description, "description"),
    (Field::Keywords, "keywords"),
    (Field::Path, "link"),
];

pub fn result_cards(records: &[&Record]) -> String {
    let mut out = String::new();
    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            out.push_str("---\n");
        }
        let _ = writeln!(out, "Result {}  [{}]", index + 1, record.id);
        for (field, label) in CARD_FIELDS {
            let _ = writeln!(out, "  {label:<13} {}", record.get(field));
        }
    }
    out.trim_end().to_string()
}

pub fn all_fields(fields: &RecordFields) -> String {
    let mut out = String::new();
    for field in Field::ALL {
        let value = fields.get(field);
        let shown = if value.trim().is_empty() { "(empty)" } else { value };
        let _ = writeln!(out, "  {:<13} {shown}", field.as_str());
    }
    out.trim_end().to_string()
}

pub fn status(status: &StoreStatusResponse, user: &str) -> String {
    let synced = status
        .last_synced_at
        .map_or_else(|| String::from("never"), |at| at.to_rfc3339());
    format!(
        "user:        {user}\nlocation:    {}\nfile found:  {}\nrecords:     {}\nin sync:     {}\nlast synced: {synced}",
        status.location, status.file_present, status.records, status.in_sync
    )
}

pub const HELP: &str = "\
column <c>              pick the search column: main_subject, campaign, keywords, description
case on|off             toggle case-sensitive matching
find <term>             search the chosen column
show                    list the last results again
edit <n>                start editing result n (then: set field=value ..., save, cancel)
edit <n> field=value..  change fields of result n and save at once
delete <n>              ask to delete result n (then: yes or no)
add field=value ...     register a new reference (all nine fields required)
reload                  read refs.csv again
status                  where the file lives and whether it is saved
logout | quit           end the session";
