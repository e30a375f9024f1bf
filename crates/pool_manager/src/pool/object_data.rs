//! Pool records and spawn requests

use super::handle::PoolHandle;
use crate::foundation::math::Transform;
use crate::world::{ClassRef, ObjectId};

/// State of a pooled object as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PoolObjectState {
    /// The handle does not address any pooled object
    #[default]
    None,
    /// Taken from its pool: visible, colliding and ticking
    Active,
    /// Sitting in its pool: hidden, not colliding and not ticking
    Inactive,
}

/// Record describing one pooled slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolObjectData {
    /// Handle the slot is currently addressed by
    pub handle: PoolHandle,
    /// Object owned by the pool through this slot
    pub object: ObjectId,
    /// Whether the object is currently taken
    pub is_active: bool,
}

impl PoolObjectData {
    /// Record for a freshly constructed, taken object
    pub fn new_active(handle: PoolHandle, object: ObjectId) -> Self {
        Self {
            handle,
            object,
            is_active: true,
        }
    }

    /// Active or inactive
    pub fn state(&self) -> PoolObjectState {
        if self.is_active {
            PoolObjectState::Active
        } else {
            PoolObjectState::Inactive
        }
    }
}

/// Callback receiving the record of a newly constructed object
pub type SpawnCallback<'a> = Box<dyn FnOnce(&PoolObjectData) + 'a>;

/// Optional hooks around the two construction phases
///
/// `on_pre_registered` runs after the object exists but before its deferred
/// construction finishes; `on_post_spawned` runs once construction is done.
/// Each runs at most once, in that order. A take that reuses a pooled object
/// constructs nothing and runs neither.
#[derive(Default)]
pub struct SpawnCallbacks<'a> {
    /// Runs before the second construction phase
    pub on_pre_registered: Option<SpawnCallback<'a>>,
    /// Runs after the second construction phase
    pub on_post_spawned: Option<SpawnCallback<'a>>,
}

impl<'a> SpawnCallbacks<'a> {
    /// No callbacks
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the pre-registration callback
    pub fn on_pre_registered(mut self, callback: impl FnOnce(&PoolObjectData) + 'a) -> Self {
        self.on_pre_registered = Some(Box::new(callback));
        self
    }

    /// Set the post-spawn callback
    pub fn on_post_spawned(mut self, callback: impl FnOnce(&PoolObjectData) + 'a) -> Self {
        self.on_post_spawned = Some(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for SpawnCallbacks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpawnCallbacks")
            .field("on_pre_registered", &self.on_pre_registered.is_some())
            .field("on_post_spawned", &self.on_post_spawned.is_some())
            .finish()
    }
}

/// Everything a factory needs to construct one object
#[derive(Debug)]
pub struct SpawnRequest<'a> {
    /// Class to construct
    pub class: ClassRef,
    /// Initial placement
    pub transform: Transform,
    /// Handle assigned by the pool before construction
    pub handle: PoolHandle,
    /// Construction hooks
    pub callbacks: SpawnCallbacks<'a>,
}
