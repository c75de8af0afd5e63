//! Insertion-ordered member sets
//!
//! Context collections hold shared members keyed by their equality key, so
//! uniqueness is a property of the structure rather than a scan before
//! every mutation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ContextError, Result};

/// Something that can be registered in a context
pub trait Member {
    /// Human readable kind, used in logs and errors
    const KIND: &'static str;

    /// Equality key; two members with the same key are the same member
    fn key(&self) -> &str;
}

/// A set of shared members that iterates in insertion order
pub struct MemberSet<T> {
    items: Vec<Arc<T>>,
    index: HashMap<String, usize>,
}

impl<T: Member> MemberSet<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a set from members that must not repeat a key
    pub fn try_from_members<I>(members: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<T>>,
    {
        let mut set = Self::new();
        for member in members {
            if set.contains_key(member.key()) {
                return Err(ContextError::DuplicateMember {
                    kind: T::KIND,
                    name: member.key().to_string(),
                });
            }
            set.insert(member);
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Membership by equality key, not by identity
    pub fn contains(&self, member: &T) -> bool {
        self.contains_key(member.key())
    }

    pub fn get(&self, key: &str) -> Option<&Arc<T>> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<T>> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|m| m.key())
    }

    /// Append a member. Returns false and drops it if the key is taken.
    pub fn insert(&mut self, member: Arc<T>) -> bool {
        if self.contains(&member) {
            return false;
        }
        self.index.insert(member.key().to_string(), self.items.len());
        self.items.push(member);
        true
    }

    /// Remove the member sharing `member`'s key
    pub fn remove(&mut self, member: &T) -> Option<Arc<T>> {
        let pos = self.index.remove(member.key())?;
        let removed = self.items.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(removed)
    }
}

impl<T: Member> Default for MemberSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MemberSet<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T: Member + fmt::Debug> fmt::Debug for MemberSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<'a, T: Member> IntoIterator for &'a MemberSet<T> {
    type Item = &'a Arc<T>;
    type IntoIter = std::slice::Iter<'a, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
