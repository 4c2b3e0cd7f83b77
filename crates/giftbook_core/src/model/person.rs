//! Person record and its owned idea list.
//!
//! # Responsibility
//! - Define the person shape stored in the people snapshot.
//! - Provide idea-list helpers used by the store mutations.
//!
//! # Invariants
//! - `id` is unique across the collection and immutable.
//! - `ideas` keeps insertion order; a missing or `null` list decodes empty.

use crate::model::birthday::{Birthday, BirthdayParseError};
use crate::model::idea::{Idea, IdeaId};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable identifier of one tracked person.
pub type PersonId = Uuid;

/// A tracked individual with a date of birth and gift ideas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Textual `MM/DD/YYYY` date of birth as entered.
    pub dob: String,
    #[serde(default, deserialize_with = "ideas_or_empty")]
    pub ideas: Vec<Idea>,
}

impl Person {
    /// Creates a person with a generated id and no ideas.
    pub fn new(name: impl Into<String>, dob: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, dob)
    }

    /// Creates a person with a caller-provided id and no ideas.
    pub fn with_id(id: PersonId, name: impl Into<String>, dob: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            dob: dob.into(),
            ideas: Vec::new(),
        }
    }

    /// Parses the birthday sort key from `dob`.
    pub fn birthday(&self) -> Result<Birthday, BirthdayParseError> {
        Birthday::parse(&self.dob)
    }

    pub fn idea(&self, idea_id: IdeaId) -> Option<&Idea> {
        self.ideas.iter().find(|idea| idea.id == idea_id)
    }

    pub fn has_idea(&self, idea_id: IdeaId) -> bool {
        self.idea(idea_id).is_some()
    }

    /// Removes one idea by id. Returns whether anything was removed.
    pub(crate) fn remove_idea(&mut self, idea_id: IdeaId) -> bool {
        let before = self.ideas.len();
        self.ideas.retain(|idea| idea.id != idea_id);
        self.ideas.len() != before
    }
}

fn ideas_or_empty<'de, D>(deserializer: D) -> Result<Vec<Idea>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Idea>>::deserialize(deserializer)?.unwrap_or_default())
}
