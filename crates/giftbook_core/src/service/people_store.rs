//! People store: the single source of truth for people and gift ideas.
//!
//! # Responsibility
//! - Own the in-memory collection and mutate it through a fixed operation set.
//! - Notify subscribers after each applied change.
//! - Mirror the full collection to key-value storage after every mutation.
//!
//! # Invariants
//! - In-memory state is authoritative; a failed write never rolls it back.
//! - Operations on unknown ids are no-ops, never errors.
//! - Stored order is insertion order; birthday order is a derived view.
//! - A failed write marks the store dirty until a later write succeeds.

use crate::model::idea::{Idea, IdeaId};
use crate::model::person::{Person, PersonId};
use crate::repo::kv_store::{KeyValueStore, StorageError};
use crate::repo::snapshot::{decode_snapshot, encode_snapshot, SnapshotError, PEOPLE_SNAPSHOT_KEY};
use crate::service::observer::{ObserverRegistry, StoreEvent, SubscriptionId};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Snapshot persistence failure. The in-memory change it followed stands.
#[derive(Debug)]
pub enum StoreError {
    Encode(SnapshotError),
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode people snapshot: {err}"),
            Self::Storage(err) => write!(f, "failed to persist people snapshot: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<SnapshotError> for StoreError {
    fn from(value: SnapshotError) -> Self {
        Self::Encode(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Outcome of one mutation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    /// Target id missing (or already present for adds); state untouched.
    /// Never paired with an error, even when a pending retry write fails.
    Unchanged,
}

/// Owned people collection with snapshot persistence.
pub struct PeopleStore<S: KeyValueStore> {
    storage: S,
    key: String,
    people: Vec<Person>,
    observers: ObserverRegistry,
    dirty: bool,
}

impl<S: KeyValueStore> PeopleStore<S> {
    /// Creates an empty store persisting under the `people` key.
    ///
    /// Call `load` before first use to restore the previous session.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, PEOPLE_SNAPSHOT_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            people: Vec::new(),
            observers: ObserverRegistry::default(),
            dirty: false,
        }
    }

    /// Replaces in-memory state with the persisted snapshot.
    ///
    /// Missing, unreadable or undecodable snapshots all yield an empty
    /// collection. Returns the number of people loaded.
    pub fn load(&mut self) -> usize {
        let started_at = Instant::now();
        let people = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => match decode_snapshot(&raw) {
                Ok(people) => people,
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=fallback reason=decode_failed bytes={} error={err}",
                        raw.len()
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("event=store_load module=store status=fallback reason=read_failed error={err}");
                Vec::new()
            }
        };

        self.people = people;
        self.dirty = false;
        let count = self.people.len();
        info!(
            "event=store_load module=store status=ok count={count} duration_ms={}",
            started_at.elapsed().as_millis()
        );

        self.observers
            .notify(&StoreEvent::Loaded { count }, &self.people);
        count
    }

    /// Current collection in insertion order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Appends a person. A person whose id is already stored is ignored.
    pub fn add_person(&mut self, person: Person) -> StoreResult<Mutation> {
        if self.position(person.id).is_some() {
            debug!(
                "event=add_person module=store status=skipped reason=duplicate_id person_id={}",
                person.id
            );
            return self.finish(None);
        }

        let id = person.id;
        self.people.push(person);
        self.finish(Some(StoreEvent::PersonAdded(id)))
    }

    /// Removes a person and every idea they own.
    pub fn remove_person(&mut self, person_id: PersonId) -> StoreResult<Mutation> {
        let Some(index) = self.position(person_id) else {
            return self.finish(None);
        };

        self.people.remove(index);
        self.finish(Some(StoreEvent::PersonRemoved(person_id)))
    }

    /// Appends an idea to the matching person's list.
    pub fn add_idea(&mut self, person_id: PersonId, idea: Idea) -> StoreResult<Mutation> {
        let Some(index) = self.position(person_id) else {
            return self.finish(None);
        };
        if self.people[index].has_idea(idea.id) {
            return self.finish(None);
        }

        let idea_id = idea.id;
        self.people[index].ideas.push(idea);
        self.finish(Some(StoreEvent::IdeaAdded { person_id, idea_id }))
    }

    /// Removes one idea from the matching person.
    pub fn remove_idea(&mut self, person_id: PersonId, idea_id: IdeaId) -> StoreResult<Mutation> {
        let removed = self
            .position(person_id)
            .is_some_and(|index| self.people[index].remove_idea(idea_id));
        if !removed {
            return self.finish(None);
        }

        self.finish(Some(StoreEvent::IdeaRemoved { person_id, idea_id }))
    }

    /// Looks up one person together with their ideas.
    pub fn person_ideas(&self, person_id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == person_id)
    }

    /// People ordered by birthday month and day, ignoring the year.
    ///
    /// Ties keep insertion order. People whose `dob` cannot be parsed come
    /// last, also in insertion order.
    pub fn people_by_birthday(&self) -> Vec<&Person> {
        sort_by_birthday(&self.people)
    }

    /// Writes the current snapshot now.
    pub fn persist(&mut self) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = encode_snapshot(&self.people)
            .map_err(StoreError::from)
            .and_then(|snapshot| {
                self.storage
                    .set_item(&self.key, &snapshot)
                    .map_err(StoreError::from)
            });

        match result {
            Ok(()) => {
                self.dirty = false;
                debug!(
                    "event=store_persist module=store status=ok count={} duration_ms={}",
                    self.people.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                self.dirty = true;
                error!(
                    "event=store_persist module=store status=error count={} duration_ms={} error={err}",
                    self.people.len(),
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    /// Waits until storage has made every accepted write durable.
    pub fn flush(&mut self) -> StoreResult<()> {
        if let Err(err) = self.storage.flush() {
            self.dirty = true;
            error!("event=store_flush module=store status=error error={err}");
            return Err(err.into());
        }
        Ok(())
    }

    /// Whether the last write failed and the snapshot is stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Registers a change callback, invoked after each applied change.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&StoreEvent, &[Person]) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Returns whether `id` was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, person_id: PersonId) -> Option<usize> {
        self.people.iter().position(|p| p.id == person_id)
    }

    /// Notifies and persists after a mutation attempt.
    ///
    /// Unchanged calls only write when an earlier write failed, and a failed
    /// retry stays dirty without turning the no-op into an error.
    fn finish(&mut self, event: Option<StoreEvent>) -> StoreResult<Mutation> {
        let Some(event) = event else {
            if self.dirty {
                if let Err(err) = self.persist() {
                    warn!("event=store_retry module=store status=deferred error={err}");
                }
            }
            return Ok(Mutation::Unchanged);
        };

        self.observers.notify(&event, &self.people);
        self.persist()?;
        Ok(Mutation::Applied)
    }
}

/// Stable sort of `people` by `(month, day)` of their birthday.
pub fn sort_by_birthday(people: &[Person]) -> Vec<&Person> {
    let mut keyed: Vec<_> = people
        .iter()
        .map(|person| (person.birthday().ok(), person))
        .collect();

    let malformed = keyed.iter().filter(|(birthday, _)| birthday.is_none()).count();
    if malformed > 0 {
        warn!("event=birthday_sort module=store status=degraded malformed_dob_count={malformed}");
    }

    keyed.sort_by_key(|(birthday, _)| (birthday.is_none(), *birthday));
    keyed.into_iter().map(|(_, person)| person).collect()
}
