use super::super::state::App;
use super::Effect;
use crate::error::SyncResult;
use crate::lookup::{LookupResult, LookupStatus, validate_query};
use crate::wordbook::AddOutcome;
use tracing::{debug, info, warn};

const MISSING_FIELDS_NOTICE: &str = "Enter both the original and the translation.";

impl App {
    pub(super) fn handle_wordbook_add_submitted(&mut self, effects: &mut Vec<Effect>) {
        let source = self.wordbook_form.source.trim().to_string();
        let translation = self.wordbook_form.translation.trim().to_string();
        if source.is_empty() || translation.is_empty() {
            self.wordbook_form.notice = Some(MISSING_FIELDS_NOTICE.to_string());
            return;
        }

        match self.wordbook.add_entry(&source, &translation) {
            AddOutcome::Added => {
                self.wordbook_form.source.clear();
                self.wordbook_form.translation.clear();
                self.wordbook_form.notice = None;
                effects.push(Effect::SaveWordbook);
            }
            AddOutcome::Duplicate => {
                self.wordbook_form.notice = Some(format!("'{source}' is already in the wordbook."));
            }
            AddOutcome::Empty => {
                self.wordbook_form.notice = Some(MISSING_FIELDS_NOTICE.to_string());
            }
        }
    }

    pub(super) fn handle_wordbook_toggle_learned(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if self.wordbook.toggle_learned(index) {
            effects.push(Effect::SaveWordbook);
        } else {
            warn!(index, "Toggle for a missing wordbook entry");
        }
    }

    pub(super) fn handle_wordbook_delete(&mut self, index: usize, effects: &mut Vec<Effect>) {
        match self.wordbook.delete(index) {
            Some(entry) => {
                info!(word = %entry.source_text, "Removed word");
                effects.push(Effect::SaveWordbook);
            }
            None => warn!(index, "Delete for a missing wordbook entry"),
        }
    }

    pub(super) fn handle_lookup_submitted(&mut self, effects: &mut Vec<Effect>) {
        let word = match validate_query(&self.lookup.query) {
            Ok(word) => word.to_string(),
            Err(message) => {
                self.lookup.status = LookupStatus::Failed(message.to_string());
                return;
            }
        };
        let request_id = self.lookup.begin_request(&word);
        effects.push(Effect::Lookup { request_id, word });
    }

    /// Apply a lookup result unless a newer request superseded it.
    pub(super) fn handle_lookup_finished(
        &mut self,
        request_id: u64,
        result: SyncResult<Option<LookupResult>>,
    ) {
        if self.lookup.status.pending_id() != Some(request_id) {
            debug!(request_id, "Dropping superseded lookup result");
            return;
        }
        let word = match &self.lookup.status {
            LookupStatus::Pending { word, .. } => word.clone(),
            _ => String::new(),
        };
        self.lookup.status = match result {
            Ok(Some(found)) => LookupStatus::Found(found),
            Ok(None) => LookupStatus::NotFound(format!("No entry found for '{word}'.")),
            Err(err) => {
                warn!(%word, "Lookup failed: {err}");
                LookupStatus::Failed(err.to_string())
            }
        };
    }
}
