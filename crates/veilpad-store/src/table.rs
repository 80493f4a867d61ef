//! Arena-backed record tables.
//!
//! A table is a `Vec` of records in insertion order plus a map from record
//! id to arena position. Nothing is ever removed, so positions never move.

use std::collections::HashMap;

use uuid::Uuid;
use veilpad_types::{Participant, Presale, Token};

/// A record with a stable identifier.
pub trait Record {
    fn id(&self) -> Uuid;
}

impl Record for Token {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Presale {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Participant {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Append-only arena with an id index.
#[derive(Debug)]
pub struct Table<T> {
    rows: Vec<T>,
    index: HashMap<Uuid, usize>,
}

impl<T: Record + Clone> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// A v4 id not yet used by this table.
    pub fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    /// Append a record. Returns `None` (and stores nothing) if the id is taken.
    pub fn insert(&mut self, record: T) -> Option<&T> {
        let id = record.id();
        if self.index.contains_key(&id) {
            return None;
        }
        let position = self.rows.len();
        self.rows.push(record);
        self.index.insert(id, position);
        self.rows.get(position)
    }

    pub fn get(&self, id: &Uuid) -> Option<&T> {
        self.index.get(id).and_then(|&position| self.rows.get(position))
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut T> {
        match self.index.get(id) {
            Some(&position) => self.rows.get_mut(position),
            None => None,
        }
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    /// Clones of the records matching `filter`, sorted by `key` descending.
    ///
    /// Equal keys come out most recently inserted first.
    pub fn newest_first<K, F, P>(&self, filter: P, key: F) -> Vec<T>
    where
        K: Ord,
        F: Fn(&T) -> K,
        P: Fn(&T) -> bool,
    {
        let mut matched: Vec<&T> = self.rows.iter().rev().filter(|row| filter(row)).collect();
        matched.sort_by(|a, b| key(b).cmp(&key(a)));
        matched.into_iter().cloned().collect()
    }
}

impl<T: Record + Clone> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
