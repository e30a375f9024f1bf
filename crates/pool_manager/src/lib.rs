//! # Pool Manager
//!
//! Handle-based pooling of engine objects. Objects are taken from and
//! returned to per-class pools instead of being constructed and destroyed on
//! demand; only session teardown destroys them.
//!
//! ## Features
//!
//! - **Per-class pools**: one registry per class, created on first use
//! - **Factories**: per-class strategies for construction, destruction and
//!   the taken/returned presentation, with plain object and actor variants
//! - **Stable handles**: callers hold handles, never object references
//! - **Deferred construction**: new objects join their pool before their
//!   construction logic finishes
//! - **Configurable**: TOML/RON settings for relocation and warm-up
//!
//! ## Quick Start
//!
//! ```rust
//! use pool_manager::prelude::*;
//!
//! static ROCKET: ObjectClass = ObjectClass::new("Rocket", &ACTOR);
//!
//! let mut pools = PoolManager::new();
//! pools.register_factory(ActorFactory::new()).unwrap();
//! pools.initialize(SceneWorld::new()).unwrap();
//!
//! let rocket = pools.take_from_pool(&ROCKET, &Transform::identity());
//! pools.return_to_pool(rocket);
//!
//! // Reuses the returned rocket instead of constructing a new one
//! let again = pools.take_from_pool(&ROCKET, &Transform::from_position(Vec3::new(0.0, 0.0, 5.0)));
//! assert_eq!(pools.world().unwrap().constructed_count(), 1);
//! assert!(pools.is_active(again));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod pool;
pub mod world;

/// Common imports for pool users
pub mod prelude {
    pub use crate::{
        config::{Config, PoolSettings},
        foundation::math::{Quat, Transform, Vec3},
        pool::{
            ActorFactory, ObjectFactory, PoolFactory, PoolHandle, PoolManager, PoolManagerError,
            PoolObjectData, PoolObjectState, SpawnCallbacks,
        },
        world::{ClassRef, ObjectClass, ObjectId, ObjectWorld, SceneWorld, ACTOR, OBJECT},
    };
}
