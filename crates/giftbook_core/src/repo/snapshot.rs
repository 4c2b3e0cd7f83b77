//! People snapshot codec.
//!
//! # Responsibility
//! - Encode the whole people collection as one JSON array.
//! - Decode a stored snapshot back into people, rejecting broken identity.
//!
//! # Invariants
//! - Decoding an encoded snapshot reproduces ids, field values and order.
//! - Person ids are unique; idea ids are unique within their owner.
//! - Idea dimensions are finite; JSON has no encoding for NaN or infinity.
//!
//! Wire shape:
//! `[{"id","name","dob","ideas":[{"id","text","img","width","height"}]}]`

use crate::model::idea::IdeaId;
use crate::model::person::{Person, PersonId};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Well-known storage key holding the people snapshot.
pub const PEOPLE_SNAPSHOT_KEY: &str = "people";

pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    DuplicatePersonId(PersonId),
    DuplicateIdeaId { person_id: PersonId, idea_id: IdeaId },
    NonFiniteDimensions { person_id: PersonId, idea_id: IdeaId },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid people snapshot: {err}"),
            Self::DuplicatePersonId(id) => write!(f, "duplicate person id in snapshot: {id}"),
            Self::DuplicateIdeaId { person_id, idea_id } => write!(
                f,
                "duplicate idea id {idea_id} in snapshot for person {person_id}"
            ),
            Self::NonFiniteDimensions { person_id, idea_id } => write!(
                f,
                "idea {idea_id} of person {person_id} has non-finite dimensions"
            ),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializes the full collection into snapshot text.
///
/// # Errors
/// - `NonFiniteDimensions` when an idea's width or height would not decode.
pub fn encode_snapshot(people: &[Person]) -> SnapshotResult<String> {
    check_dimensions(people)?;
    Ok(serde_json::to_string(people)?)
}

/// Parses snapshot text into the people collection.
///
/// # Errors
/// - `Json` when the text is not a valid people array.
/// - `DuplicatePersonId` / `DuplicateIdeaId` when identity is ambiguous.
pub fn decode_snapshot(raw: &str) -> SnapshotResult<Vec<Person>> {
    let people: Vec<Person> = serde_json::from_str(raw)?;
    check_identity(&people)?;
    Ok(people)
}

fn check_identity(people: &[Person]) -> SnapshotResult<()> {
    let mut person_ids = HashSet::with_capacity(people.len());
    for person in people {
        if !person_ids.insert(person.id) {
            return Err(SnapshotError::DuplicatePersonId(person.id));
        }
        let mut idea_ids = HashSet::with_capacity(person.ideas.len());
        for idea in &person.ideas {
            if !idea_ids.insert(idea.id) {
                return Err(SnapshotError::DuplicateIdeaId {
                    person_id: person.id,
                    idea_id: idea.id,
                });
            }
        }
    }
    Ok(())
}

// serde_json writes NaN and infinity as `null`, which then fails to decode.
fn check_dimensions(people: &[Person]) -> SnapshotResult<()> {
    for person in people {
        for idea in &person.ideas {
            if !(idea.width.is_finite() && idea.height.is_finite()) {
                return Err(SnapshotError::NonFiniteDimensions {
                    person_id: person.id,
                    idea_id: idea.id,
                });
            }
        }
    }
    Ok(())
}
