use ref_core::{Field, SearchColumn};

use crate::commands::shared::fields::parse_assignments;

/// One line typed at the `refs>` prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Column(SearchColumn),
    Case(bool),
    Find(String),
    Show,
    /// Open result `number` for editing; with assignments, apply and save at once.
    Edit {
        number: usize,
        assignments: Vec<(Field, String)>,
    },
    Set(Vec<(Field, String)>),
    Save,
    Cancel,
    Delete(usize),
    Yes,
    No,
    Add(Vec<(Field, String)>),
    Reload,
    Status,
    Help,
    Logout,
    Quit,
}

/// Split a line into words. Single or double quotes group words; a
/// backslash escapes the next character.
pub fn split_words(line: &str) -> anyhow::Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (ch, quote) {
            ('\\', _) => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("line ends with a lone backslash"))?;
                current.push(escaped);
                in_word = true;
            }
            (q, None) if q == '"' || q == '\'' => {
                quote = Some(q);
                in_word = true;
            }
            (q, Some(open)) if q == open => quote = None,
            (c, None) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (c, _) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(open) = quote {
        anyhow::bail!("unclosed {open} quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse a prompt line. Blank lines yield `None`.
pub fn parse(line: &str) -> anyhow::Result<Option<ShellCommand>> {
    let words = split_words(line)?;
    let Some((head, rest)) = words.split_first() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "column" | "col" => {
            let [name] = rest else {
                anyhow::bail!("usage: column <main_subject|campaign|keywords|description>");
            };
            ShellCommand::Column(name.parse()?)
        }
        "case" => match rest {
            [flag] if flag.eq_ignore_ascii_case("on") => ShellCommand::Case(true),
            [flag] if flag.eq_ignore_ascii_case("off") => ShellCommand::Case(false),
            _ => anyhow::bail!("usage: case on|off"),
        },
        "find" | "search" => {
            if rest.is_empty() {
                anyhow::bail!("usage: find <term>");
            }
            ShellCommand::Find(rest.join(" "))
        }
        "show" | "results" => ShellCommand::Show,
        "edit" => {
            let (number, assignments) = rest
                .split_first()
                .ok_or_else(|| anyhow::anyhow!("usage: edit <n> [field=value ...]"))?;
            ShellCommand::Edit {
                number: parse_number(number)?,
                assignments: parse_assignments(assignments)?,
            }
        }
        "set" => {
            if rest.is_empty() {
                anyhow::bail!("usage: set field=value ...");
            }
            ShellCommand::Set(parse_assignments(rest)?)
        }
        "save" => ShellCommand::Save,
        "cancel" => ShellCommand::Cancel,
        "delete" | "rm" => {
            let [number] = rest else {
                anyhow::bail!("usage: delete <n>");
            };
            ShellCommand::Delete(parse_number(number)?)
        }
        "yes" | "y" => ShellCommand::Yes,
        "no" | "n" => ShellCommand::No,
        "add" => {
            if rest.is_empty() {
                anyhow::bail!("usage: add title=... campaign=... (all nine fields)");
            }
            ShellCommand::Add(parse_assignments(rest)?)
        }
        "reload" => ShellCommand::Reload,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "logout" => ShellCommand::Logout,
        "quit" | "exit" => ShellCommand::Quit,
        other => anyhow::bail!("unknown command '{other}' (type help)"),
    };
    Ok(Some(command))
}

/// Result numbers are 1-based, as displayed.
fn parse_number(raw: &str) -> anyhow::Result<usize> {
    match raw.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(number),
        _ => anyhow::bail!("'{raw}' is not a result number (results start at 1)"),
    }
}
