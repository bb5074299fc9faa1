use ref_core::responses::PositionedRecord;
use ref_core::{Field, Record, RecordFields};

use crate::cli::root_commands::FieldArgs;

/// Copy every flag that was given onto `base`.
#[must_use]
pub fn overlay(mut base: RecordFields, args: &FieldArgs) -> RecordFields {
    let given = [
        (Field::Title, &args.title),
        (Field::Campaign, &args.campaign),
        (Field::Category, &args.category),
        (Field::Place, &args.place),
        (Field::MainSubject, &args.main_subject),
        (Field::Path, &args.path),
        (Field::Description, &args.description),
        (Field::Language, &args.language),
        (Field::Keywords, &args.keywords),
    ];
    for (field, value) in given {
        if let Some(value) = value {
            base.set(field, value.as_str());
        }
    }
    base
}

/// Whether at least one field flag was passed.
#[must_use]
pub fn any_given(args: &FieldArgs) -> bool {
    [
        &args.title,
        &args.campaign,
        &args.category,
        &args.place,
        &args.main_subject,
        &args.path,
        &args.description,
        &args.language,
        &args.keywords,
    ]
    .iter()
    .any(|value| value.is_some())
}

/// Parse `field=value` words, e.g. `title=Summer` or `main_subject=ESTILO`.
pub fn parse_assignments<S: AsRef<str>>(words: &[S]) -> anyhow::Result<Vec<(Field, String)>> {
    words
        .iter()
        .map(|word| {
            let word = word.as_ref();
            let (name, value) = word
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("expected field=value, got '{word}'"))?;
            let field: Field = name.parse()?;
            Ok((field, value.to_string()))
        })
        .collect()
}

/// Apply parsed assignments onto `base`.
#[must_use]
pub fn apply(mut base: RecordFields, assignments: &[(Field, String)]) -> RecordFields {
    for (field, value) in assignments {
        base.set(*field, value.as_str());
    }
    base
}

#[must_use]
pub fn positioned(position: usize, record: &Record) -> PositionedRecord {
    PositionedRecord {
        position,
        record: record.clone(),
    }
}
