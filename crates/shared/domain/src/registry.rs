//! Slice registry for modular features.
//! A type-erased container for the pre-initialized state of each feature slice.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;

/// Marker trait for feature state that can be shared across threads.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// A container for an initialized feature.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub name: &'static str,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), name: std::any::type_name::<T>(), state: Box::new(state) }
    }

    #[must_use]
    pub fn downcast<T: FeatureSlice>(&self) -> Option<&T> {
        self.state.as_any().downcast_ref::<T>()
    }
}

/// Every initialized slice, one per concrete type.
#[derive(Debug, Default)]
pub struct SliceRegistry {
    slices: HashMap<TypeId, InitializedSlice>,
}

impl SliceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a slice, returning the one it replaced.
    pub fn insert(&mut self, slice: InitializedSlice) -> Option<InitializedSlice> {
        self.slices.insert(slice.id, slice)
    }

    #[must_use]
    pub fn get<T: FeatureSlice>(&self) -> Option<&T> {
        self.slices.get(&TypeId::of::<T>()).and_then(InitializedSlice::downcast::<T>)
    }

    /// Registered slice type names, sorted (for diagnostics).
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.slices.values().map(|slice| slice.name).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.len()
    }
}

impl FromIterator<InitializedSlice> for SliceRegistry {
    fn from_iter<I: IntoIterator<Item = InitializedSlice>>(iter: I) -> Self {
        let mut registry = Self::new();
        for slice in iter {
            registry.insert(slice);
        }
        registry
    }
}
