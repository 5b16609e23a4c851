use std::sync::atomic::{AtomicU64, Ordering};

use super::{Connection, Id, Registry, Result};

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

/// Identifies one in-memory lineage of an entity.
///
/// Clones keep the tag of the instance they were cloned from, so a registry
/// entry and the instance that registered it compare equal. Hydrating a row
/// from storage allocates a fresh tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tag(u64);

impl Tag {
    pub fn next() -> Tag {
        Tag(NEXT_TAG.fetch_add(1, Ordering::Relaxed))
    }
}

/// The `TryFrom<&Row>` bound is the trusted construction path: values coming
/// back out of storage were validated on the way in and are not re-checked.
pub trait Entity:
    Clone + for<'a> TryFrom<&'a rusqlite::Row<'a>, Error = rusqlite::Error> + Sized
{
    fn id(&self) -> Option<Id>;
    fn tag(&self) -> Tag;

    fn find(db: &Connection, id: Id) -> Result<Option<Self>>;
    fn save(&mut self, db: &Connection, registry: &mut Registry<Self>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_ne;

    #[test]
    fn tags_are_unique() {
        assert_ne!(Tag::next(), Tag::next());
    }
}
