//! Interactive session state.
//!
//! Everything the shell remembers between lines lives in [`UiState`]: the
//! chosen column, case mode, last term, the ids behind the numbered results,
//! and any edit or delete awaiting confirmation. [`Session::execute`] is the
//! only place it changes, one command at a time.

use anyhow::Context;
use ref_core::{Field, Record, RecordFields, RecordId, SearchColumn};
use ref_search::SearchQuery;
use ref_service::{MutationError, MutationService};
use ref_store::RemoteFileBackend;

use super::parse::ShellCommand;
use super::render;
use crate::commands::shared::fields::apply;

/// A result opened for editing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingEdit {
    pub id: RecordId,
    pub draft: RecordFields,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub column: Option<SearchColumn>,
    pub case_sensitive: bool,
    pub last_term: Option<String>,
    /// Ids behind result numbers; result `n` is `results[n - 1]`.
    pub results: Vec<RecordId>,
    pub editing: Option<PendingEdit>,
    pub pending_delete: Option<RecordId>,
}

impl UiState {
    fn clear_pending(&mut self) {
        self.editing = None;
        self.pending_delete = None;
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Logout,
    Quit,
}

impl Reply {
    fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

pub struct Session<B> {
    service: MutationService<B>,
    state: UiState,
    username: String,
    /// Set while the store has never loaded; writes are refused meanwhile.
    load_error: Option<String>,
}

impl<B: RemoteFileBackend> Session<B> {
    pub fn new(
        service: MutationService<B>,
        username: impl Into<String>,
        case_sensitive: bool,
        load_error: Option<String>,
    ) -> Self {
        Self {
            service,
            state: UiState {
                case_sensitive,
                ..UiState::default()
            },
            username: username.into(),
            load_error,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &UiState {
        &self.state
    }

    #[must_use]
    pub const fn service(&self) -> &MutationService<B> {
        &self.service
    }

    pub async fn execute(&mut self, command: ShellCommand) -> anyhow::Result<Reply> {
        match command {
            ShellCommand::Column(column) => {
                self.state.column = Some(column);
                self.state.last_term = None;
                self.state.results.clear();
                self.state.clear_pending();
                Ok(Reply::Text(format!(
                    "Searching by {} ({column}). Type find <term>.",
                    column.label()
                )))
            }
            ShellCommand::Case(on) => {
                self.state.case_sensitive = on;
                Ok(Reply::text(if on {
                    "Case-sensitive search on."
                } else {
                    "Case-sensitive search off."
                }))
            }
            ShellCommand::Find(term) => self.find(term),
            ShellCommand::Show => Ok(Reply::Text(self.render_results())),
            ShellCommand::Edit {
                number,
                assignments,
            } => self.edit(number, &assignments).await,
            ShellCommand::Set(assignments) => {
                let edit = self
                    .state
                    .editing
                    .as_mut()
                    .context("nothing is being edited; use edit <n> first")?;
                edit.draft = apply(edit.draft.clone(), &assignments);
                Ok(Reply::Text(render::all_fields(&edit.draft)))
            }
            ShellCommand::Save => self.save_edit().await,
            ShellCommand::Cancel => {
                let had_pending =
                    self.state.editing.is_some() || self.state.pending_delete.is_some();
                self.state.clear_pending();
                Ok(Reply::text(if had_pending {
                    "Cancelled."
                } else {
                    "Nothing to cancel."
                }))
            }
            ShellCommand::Delete(number) => {
                let id = self.result_id(number)?;
                let title = self.record(&id)?.fields.title.clone();
                self.state.editing = None;
                self.state.pending_delete = Some(id);
                Ok(Reply::Text(format!(
                    "Delete '{title}'? This cannot be undone. Type yes or no."
                )))
            }
            ShellCommand::Yes => self.confirm_delete().await,
            ShellCommand::No => {
                let reply = if self.state.pending_delete.take().is_some() {
                    "Deletion cancelled."
                } else {
                    "Nothing to confirm."
                };
                Ok(Reply::text(reply))
            }
            ShellCommand::Add(assignments) => self.add(&assignments).await,
            ShellCommand::Reload => {
                let count = self.service.reload().await?;
                self.load_error = None;
                self.state.clear_pending();
                self.rerun_search();
                Ok(Reply::Text(format!("Loaded {count} records.")))
            }
            ShellCommand::Status => {
                let mut text = render::status(&self.service.store().status(), &self.username);
                if let Some(error) = &self.load_error {
                    text.push_str(&format!("\nload error:  {error}"));
                }
                Ok(Reply::Text(text))
            }
            ShellCommand::Help => Ok(Reply::text(render::HELP)),
            ShellCommand::Logout => Ok(Reply::Logout),
            ShellCommand::Quit => Ok(Reply::Quit),
        }
    }

    fn find(&mut self, term: String) -> anyhow::Result<Reply> {
        let column = self
            .state
            .column
            .context("pick a column first: column main_subject|campaign|keywords|description")?;
        let query = SearchQuery::new(column, term, self.state.case_sensitive)?;

        self.state.results = self
            .service
            .search(&query)
            .into_iter()
            .map(|(_, record)| record.id.clone())
            .collect();
        self.state.last_term = Some(query.term().to_string());
        self.state.clear_pending();

        if self.state.results.is_empty() {
            return Ok(Reply::text("No results found."));
        }
        Ok(Reply::Text(format!(
            "Results for '{}' in {column}:\n{}",
            query.term(),
            self.render_results()
        )))
    }

    async fn edit(&mut self, number: usize, assignments: &[(Field, String)]) -> anyhow::Result<Reply> {
        let id = self.result_id(number)?;
        let current = self.record(&id)?.fields.clone();
        self.state.pending_delete = None;

        if assignments.is_empty() {
            let text = format!(
                "Editing result {number}:\n{}\nUse set field=value ..., then save or cancel.",
                render::all_fields(&current)
            );
            self.state.editing = Some(PendingEdit { id, draft: current });
            return Ok(Reply::Text(text));
        }

        self.require_loaded()?;
        self.state.editing = None;
        self.service.update(&id, apply(current, assignments)).await?;
        self.rerun_search();
        Ok(Reply::text("Reference updated."))
    }

    async fn save_edit(&mut self) -> anyhow::Result<Reply> {
        self.require_loaded()?;
        let edit = self
            .state
            .editing
            .clone()
            .context("nothing is being edited; use edit <n> first")?;

        match self.service.update(&edit.id, edit.draft).await {
            Ok(_) => {
                self.state.editing = None;
                self.rerun_search();
                Ok(Reply::text("Reference updated."))
            }
            // Keep the draft open so the user can fix it.
            Err(error @ MutationError::Validation(_)) => Err(error.into()),
            Err(error) => {
                self.state.editing = None;
                self.rerun_search();
                Err(error.into())
            }
        }
    }

    async fn confirm_delete(&mut self) -> anyhow::Result<Reply> {
        self.require_loaded()?;
        let Some(id) = self.state.pending_delete.take() else {
            return Ok(Reply::text("Nothing to confirm."));
        };
        let result = self.service.delete(&id).await;
        self.rerun_search();
        result?;
        Ok(Reply::text("Reference deleted."))
    }

    async fn add(&mut self, assignments: &[(Field, String)]) -> anyhow::Result<Reply> {
        self.require_loaded()?;
        let record = self
            .service
            .create(apply(RecordFields::default(), assignments))
            .await?;
        self.rerun_search();
        Ok(Reply::Text(format!(
            "Reference registered:\n{}",
            render::all_fields(&record.fields)
        )))
    }

    fn require_loaded(&self) -> anyhow::Result<()> {
        match &self.load_error {
            Some(error) => anyhow::bail!(
                "refs file could not be loaded ({error}); run reload before changing anything"
            ),
            None => Ok(()),
        }
    }

    /// Refresh result ids after the store changed, keeping column and term.
    fn rerun_search(&mut self) {
        let (Some(column), Some(term)) = (self.state.column, self.state.last_term.clone()) else {
            return;
        };
        match SearchQuery::new(column, term, self.state.case_sensitive) {
            Ok(query) => {
                self.state.results = self
                    .service
                    .search(&query)
                    .into_iter()
                    .map(|(_, record)| record.id.clone())
                    .collect();
            }
            Err(_) => self.state.results.clear(),
        }
    }

    fn result_id(&self, number: usize) -> anyhow::Result<RecordId> {
        number
            .checked_sub(1)
            .and_then(|index| self.state.results.get(index))
            .cloned()
            .with_context(|| {
                format!(
                    "no result {number}; there are {} results (run find first)",
                    self.state.results.len()
                )
            })
    }

    fn record(&self, id: &RecordId) -> anyhow::Result<&Record> {
        self.service
            .store()
            .get(id)
            .with_context(|| format!("record {id} is no longer in the store"))
    }

    fn render_results(&self) -> String {
        let records: Vec<&Record> = self
            .state
            .results
            .iter()
            .filter_map(|id| self.service.store().get(id))
            .collect();
        if records.is_empty() {
            return String::from("No results.");
        }
        render::result_cards(&records)
    }
}
