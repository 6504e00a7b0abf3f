//! Proposal form
//!
//! Input model for the "add proposal" form. The note field enforces its
//! character limit on every input, and submission checks the fields the
//! backend refuses to store without.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::ProposalFields;

/// Maximum note length, in characters
pub const NOTE_MAX_CHARS: usize = 1500;

/// Longest prefix of `text` with at most `max` characters
pub fn char_prefix(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Note textarea with its live character counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteField {
    text: String,
}

impl NoteField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content with the textarea's current value, cut at the limit
    pub fn input(&mut self, value: &str) -> &str {
        self.text = char_prefix(value, NOTE_MAX_CHARS).to_string();
        &self.text
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters, never above the limit
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Counter label, e.g. `"42/1500"`
    pub fn counter(&self) -> String {
        format!("{}/{}", self.len(), NOTE_MAX_CHARS)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Raw values of the add-proposal form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalForm {
    pub project_number: String,
    pub summary: String,
    pub originating_chamber: String,
    pub review_form: String,
    pub thematic_axis: String,
    pub status: String,
    pub analysis_applicable: String,
    pub analysis_deadline: String,
    pub analysis_done: String,
    pub analysis_document: Option<String>,
    pub cnm_position: String,
    pub priority: String,
    pub note: NoteField,
}

impl ProposalForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to an empty form; the counter reads `0/1500` again
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate and build the payload for the given area
    pub fn submit(&self, area: Option<&str>) -> Result<ProposalFields, ValidationError> {
        let area = area
            .filter(|a| !a.trim().is_empty())
            .ok_or(ValidationError::NoActiveArea)?;

        let required = [
            ("numero_projeto", &self.project_number),
            ("ementa", &self.summary),
            ("casa_iniciadora", &self.originating_chamber),
            ("forma_apreciacao", &self.review_form),
            ("situacao", &self.status),
            ("cabe_analise", &self.analysis_applicable),
            ("analise_realizada", &self.analysis_done),
            ("posicionamento_cnm", &self.cnm_position),
            ("prioridade", &self.priority),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }

        Ok(ProposalFields {
            project_number: self.project_number.trim().to_string(),
            summary: self.summary.trim().to_string(),
            originating_chamber: self.originating_chamber.clone(),
            review_form: self.review_form.clone(),
            thematic_axis: self.thematic_axis.clone(),
            status: self.status.clone(),
            analysis_applicable: self.analysis_applicable.clone(),
            analysis_deadline: self.analysis_deadline.clone(),
            analysis_done: self.analysis_done.clone(),
            analysis_document: self
                .analysis_document
                .clone()
                .filter(|d| !d.trim().is_empty()),
            cnm_position: self.cnm_position.clone(),
            priority: self.priority.clone(),
            note: char_prefix(self.note.text(), NOTE_MAX_CHARS).to_string(),
            technical_area: area.to_string(),
        })
    }
}
