use std::collections::BTreeMap;

use crate::bodies::{Body, Fixture};
use crate::contacts::Contact;
use crate::core::{BodyHandle, ContactHandle, FixtureHandle};
use crate::error::PhysicsError;
use crate::Result;

/// A typed identifier minted by a [`Storage`]
pub trait Handle: Copy + Ord + std::fmt::Debug {
    /// Human readable name of the resource, used in error messages
    const KIND: &'static str;

    /// Wraps a raw id
    fn from_raw(id: u32) -> Self;
}

impl Handle for BodyHandle {
    const KIND: &'static str = "Body";

    fn from_raw(id: u32) -> Self {
        BodyHandle(id)
    }
}

impl Handle for FixtureHandle {
    const KIND: &'static str = "Fixture";

    fn from_raw(id: u32) -> Self {
        FixtureHandle(id)
    }
}

impl Handle for ContactHandle {
    const KIND: &'static str = "Contact";

    fn from_raw(id: u32) -> Self {
        ContactHandle(id)
    }
}

/// Arena storage addressed by stable handles.
///
/// Handles are never reused, and iteration follows handle order so that
/// traversals are deterministic.
#[derive(Debug, Clone)]
pub struct Storage<H: Handle, T> {
    items: BTreeMap<H, T>,
    next_id: u32,
}

/// Storage for bodies
pub type BodyStorage = Storage<BodyHandle, Body>;

/// Storage for fixtures
pub type FixtureStorage = Storage<FixtureHandle, Fixture>;

/// Storage for contacts
pub type ContactStorage = Storage<ContactHandle, Contact>;

impl<H: Handle, T> Storage<H, T> {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1, // Start at 1, so 0 can represent invalid handle
        }
    }

    /// Adds an item to the storage and returns its handle
    pub fn add(&mut self, item: T) -> H {
        let handle = H::from_raw(self.next_id);
        self.next_id += 1;
        self.items.insert(handle, item);
        handle
    }

    /// Gets a reference to an item by its handle
    pub fn get(&self, handle: H) -> Option<&T> {
        self.items.get(&handle)
    }

    /// Gets a mutable reference to an item by its handle
    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.items.get_mut(&handle)
    }

    /// Gets an item by its handle, returning an error if not found
    pub fn try_get(&self, handle: H) -> Result<&T> {
        self.get(handle).ok_or_else(|| Self::not_found(handle))
    }

    /// Gets a mutable reference to an item by its handle, returning an error if not found
    pub fn try_get_mut(&mut self, handle: H) -> Result<&mut T> {
        self.items.get_mut(&handle).ok_or_else(|| Self::not_found(handle))
    }

    /// Removes an item from the storage
    pub fn remove(&mut self, handle: H) -> Option<T> {
        self.items.remove(&handle)
    }

    /// Returns whether the storage holds an item for this handle
    pub fn contains(&self, handle: H) -> bool {
        self.items.contains_key(&handle)
    }

    /// Returns the number of items in the storage
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears all items from the storage
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns all handles in ascending order
    pub fn handles(&self) -> Vec<H> {
        self.items.keys().copied().collect()
    }

    /// Returns an iterator over all items
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.items.iter().map(|(h, item)| (*h, item))
    }

    /// Returns a mutable iterator over all items
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (H, &mut T)> + '_ {
        self.items.iter_mut().map(|(h, item)| (*h, item))
    }

    fn not_found(handle: H) -> PhysicsError {
        PhysicsError::ResourceNotFound(format!("{} with handle {:?} not found", H::KIND, handle))
    }
}

impl<H: Handle, T> Default for Storage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}
