//! Id Type module
//!
//! Typed identifiers for persisted entities. An [`Identifier<T>`] wraps the raw key of
//! an entity of type `T`; two identifiers are equal when their raw keys are equal, and the
//! owner type keeps ids of different entities from being mixed up at compile time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Any domain object that carries an identifier once it has been persisted
pub trait Identifiable: Sized {
    /// Raw key type (i64, Uuid, String, ...)
    type Key: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// The identifier, or `None` before the entity was first stored
    fn id(&self) -> Option<Identifier<Self>>;
}

/// Entities whose identifier is assigned by the storage backend on insert
pub trait AssignId: Identifiable {
    fn assign_id(&mut self, id: Identifier<Self>);
}

/// Immutable, typed identifier of one stored entity
pub struct Identifier<T: Identifiable> {
    raw: T::Key,
    _owner: PhantomData<fn() -> T>,
}

impl<T: Identifiable> Identifier<T> {
    pub fn new(raw: T::Key) -> Self {
        Self {
            raw,
            _owner: PhantomData,
        }
    }

    /// The wrapped key
    pub fn raw(&self) -> &T::Key {
        &self.raw
    }

    pub fn into_raw(self) -> T::Key {
        self.raw
    }

    /// Name of the entity type this identifier belongs to
    pub fn owner_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T: Identifiable> Clone for Identifier<T> {
    fn clone(&self) -> Self {
        Self::new(self.raw.clone())
    }
}

impl<T: Identifiable> Copy for Identifier<T> where T::Key: Copy {}

impl<T: Identifiable> PartialEq for Identifier<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: Identifiable> Eq for Identifier<T> {}

impl<T: Identifiable> Hash for Identifier<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T: Identifiable> PartialOrd for Identifier<T>
where
    T::Key: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Identifiable> Ord for Identifier<T>
where
    T::Key: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T: Identifiable> Debug for Identifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owner = self.owner_type().rsplit("::").next().unwrap_or_default();
        write!(f, "Identifier<{}>({:?})", owner, self.raw)
    }
}

impl<T: Identifiable> Display for Identifier<T>
where
    T::Key: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.raw, f)
    }
}

impl<T: Identifiable> Serialize for Identifier<T>
where
    T::Key: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de, T: Identifiable> Deserialize<'de> for Identifier<T>
where
    T::Key: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::Key::deserialize(deserializer).map(Identifier::new)
    }
}
