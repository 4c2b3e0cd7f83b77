//! Change notifications for people store subscribers.

use crate::model::idea::IdeaId;
use crate::model::person::{Person, PersonId};

/// What changed in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Loaded { count: usize },
    PersonAdded(PersonId),
    PersonRemoved(PersonId),
    IdeaAdded { person_id: PersonId, idea_id: IdeaId },
    IdeaRemoved { person_id: PersonId, idea_id: IdeaId },
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&StoreEvent, &[Person])>;

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, callback: Callback) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Calls subscribers in registration order.
    pub(crate) fn notify(&mut self, event: &StoreEvent, people: &[Person]) {
        for (_, callback) in &mut self.entries {
            callback(event, people);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
