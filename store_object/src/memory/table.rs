//! Keyed entity storage for the in-memory backend

use crate::errors::{ConstraintKind, PersistenceError};
use crate::id_type::{AssignId, Identifiable, Identifier};
use std::collections::HashMap;
use uuid::Uuid;

/// Keys the in-memory backend can generate on insert
pub trait GeneratedKey: Sized {
    /// The key following `previous` (the last generated one, if any)
    fn next_key(previous: Option<&Self>) -> Self;
}

macro_rules! sequential_key {
    ($($ty:ty),*) => {
        $(
            impl GeneratedKey for $ty {
                fn next_key(previous: Option<&Self>) -> Self {
                    previous.map_or(1, |last| last + 1)
                }
            }
        )*
    };
}

sequential_key!(i32, i64, u32, u64);

impl GeneratedKey for Uuid {
    fn next_key(_previous: Option<&Self>) -> Self {
        Uuid::new_v4()
    }
}

impl GeneratedKey for String {
    fn next_key(_previous: Option<&Self>) -> Self {
        Uuid::new_v4().to_string()
    }
}

/// One collection of entities, iterated in insertion order
#[derive(Debug, Clone)]
pub struct MemoryTable<E: Identifiable> {
    rows: HashMap<E::Key, (u64, E)>,
    inserted: u64,
    last_key: Option<E::Key>,
}

impl<E: Identifiable> Default for MemoryTable<E> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            inserted: 0,
            last_key: None,
        }
    }
}

impl<E: Identifiable> AsMut<MemoryTable<E>> for MemoryTable<E> {
    fn as_mut(&mut self) -> &mut MemoryTable<E> {
        self
    }
}

impl<E: Identifiable + Clone> MemoryTable<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &Identifier<E>) -> Option<&E> {
        self.rows.get(id.raw()).map(|(_, entity)| entity)
    }

    pub fn contains(&self, id: &Identifier<E>) -> bool {
        self.rows.contains_key(id.raw())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Entities in insertion order
    pub fn values(&self) -> Vec<&E> {
        let mut rows: Vec<&(u64, E)> = self.rows.values().collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, entity)| entity).collect()
    }

    /// Insert a new entity, generating an id when it has none
    ///
    /// Fails with a primary key violation when the entity's id is already taken.
    pub fn insert(&mut self, entity: &E) -> Result<E, PersistenceError>
    where
        E: AssignId,
        E::Key: GeneratedKey,
    {
        let mut stored = entity.clone();
        let key = match entity.id() {
            Some(id) if self.contains(&id) => {
                return Err(PersistenceError::integrity(
                    ConstraintKind::PrimaryKey,
                    format!("{:?} is already stored", id),
                ));
            }
            Some(id) => id.into_raw(),
            None => {
                let key = self.generate_key();
                stored.assign_id(Identifier::new(key.clone()));
                key
            }
        };

        self.inserted += 1;
        self.rows.insert(key, (self.inserted, stored.clone()));
        Ok(stored)
    }

    /// Replace a stored entity, keeping its insertion position
    pub fn replace(&mut self, entity: &E) -> Result<E, PersistenceError> {
        let id = entity
            .id()
            .ok_or_else(|| PersistenceError::NotFound("entity has no identifier".to_string()))?;
        match self.rows.get_mut(id.raw()) {
            Some((_, slot)) => {
                *slot = entity.clone();
                Ok(entity.clone())
            }
            None => Err(PersistenceError::NotFound(format!("{:?}", id))),
        }
    }

    pub fn remove(&mut self, id: &Identifier<E>) -> Option<E> {
        self.rows.remove(id.raw()).map(|(_, entity)| entity)
    }

    /// Remove every entity matching `predicate`; returns how many were removed
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&E) -> bool) -> u64 {
        let before = self.rows.len();
        self.rows.retain(|_, (_, entity)| !predicate(entity));
        (before - self.rows.len()) as u64
    }

    /// Drop all entities; generated keys keep counting from where they were
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    fn generate_key(&mut self) -> E::Key
    where
        E::Key: GeneratedKey,
    {
        let mut key = E::Key::next_key(self.last_key.as_ref());
        while self.rows.contains_key(&key) {
            key = E::Key::next_key(Some(&key));
        }
        self.last_key = Some(key.clone());
        key
    }
}
