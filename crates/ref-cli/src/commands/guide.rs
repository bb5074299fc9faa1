use ref_core::validation::{MAX_KEYWORDS, MIN_KEYWORDS};
use ref_core::{Field, SearchColumn};

use crate::cli::GlobalFlags;

/// Handle `refs guide`.
pub fn handle(_flags: &GlobalFlags) -> anyhow::Result<()> {
    println!("{}", guide_text());
    Ok(())
}

fn field_hint(field: Field) -> &'static str {
    match field {
        Field::Title => "title of the reference being registered",
        Field::Campaign => "name of the campaign in progress",
        Field::Category => "kind of reference (e.g. POST, REPORTAGEM, TEXTO)",
        Field::Place => "where the link points (e.g. INSTAGRAM, FACEBOOK, a site name)",
        Field::MainSubject => "a single word for the idea (e.g. CORRIDA, ESTILO, JUVENTUDE)",
        Field::Path => "link to the referenced publication",
        Field::Description => "short text describing the reference",
        Field::Language => "language of the reference",
        Field::Keywords => "words that capture the main idea",
    }
}

#[must_use]
pub fn guide_text() -> String {
    let mut out = String::from("SEARCHING\n\nA search looks for a piece of text inside one of four columns:\n");
    for column in SearchColumn::ALL {
        out.push_str(&format!("  - {:<13} {}\n", column.as_str(), column.label()));
    }
    out.push_str(
        "\nMatching ignores letter case unless --case-sensitive is given.\n\
         Example: refs search campaign \"verão\"\n\
         \nREGISTERING\n\nEvery field is required when registering or editing a reference:\n",
    );
    for field in Field::ALL {
        out.push_str(&format!(
            "  - {:<13} {:<18} {}\n",
            field.as_str(),
            field.header(),
            field_hint(field)
        ));
    }
    out.push_str(&format!(
        "\nKeywords must hold {MIN_KEYWORDS} to {MAX_KEYWORDS} words separated by spaces.\n\
         Tip: a generative AI assistant can help draft the fields of a new reference.\n\
         \nUse `refs shell` to search, then edit or delete results by number."
    ));
    out
}
