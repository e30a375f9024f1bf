//! Object pooling
//!
//! Recycles heavyweight objects instead of constructing and destroying them
//! over and over. A [`PoolManager`] routes requests to one [`PoolRegistry`]
//! per class; each registry asks its class's [`PoolFactory`] to construct,
//! wake up, put to sleep and finally destroy objects.

pub mod factory;
pub mod handle;
pub mod manager;
pub mod object_data;
pub mod registry;

#[cfg(test)]
mod tests;

pub use factory::{ActorFactory, ObjectFactory, PoolFactory};
pub use handle::{HandleAllocator, PoolHandle};
pub use manager::{ClassPoolStats, PoolManager, PoolManagerError, PoolManagerStats};
pub use object_data::{PoolObjectData, PoolObjectState, SpawnCallback, SpawnCallbacks, SpawnRequest};
pub use registry::{PoolRegistry, PoolRegistryStats};
