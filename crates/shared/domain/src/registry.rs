//! Feature slice registry.
//! A type-erased holder for the state each slice builds at startup.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// State owned by a feature slice, shared across request handlers.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Exposes the concrete type for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// A slice after initialization, keyed by its concrete type.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), state: Box::new(state) }
    }

    /// Borrows the state as `T` when the slice holds one.
    #[must_use]
    pub fn downcast_ref<T: FeatureSlice>(&self) -> Option<&T> {
        self.state.as_any().downcast_ref::<T>()
    }
}
