use std::collections::HashMap;

use super::{Entity, Error, Id, Result, Tag};

/// Identity map over one entity type.
///
/// Holds at most one representative per row id. It is owned by whatever
/// scope owns the connection and passed explicitly; it is not process-wide
/// state. The map is authoritative: `claim` lets `save` refuse to overwrite
/// an entry held by a different live instance.
#[derive(Debug)]
pub struct Registry<T> {
    entries: HashMap<Id, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry { entries: HashMap::new() }
    }
}

impl<T: Entity> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `entity` as the in-memory representative of its row.
    pub fn register(&mut self, entity: &T) -> Result<()> {
        let id = entity.id().ok_or(Error::NotPersisted)?;
        self.entries.insert(id, entity.clone());
        Ok(())
    }

    /// Check that `tag` may take the entry for `id`. Succeeds when the id is
    /// unclaimed or already held by the same lineage.
    pub fn claim(&self, id: Id, tag: Tag) -> Result<()> {
        match self.entries.get(&id) {
            Some(owner) if owner.tag() != tag => Err(Error::AlreadyRegistered(id)),
            _ => Ok(()),
        }
    }

    pub fn remove(&mut self, id: Id) -> Result<T> {
        self.entries.remove(&id).ok_or(Error::NotRegistered(id))
    }

    pub fn get(&self, id: Id) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
