//! Object factories
//!
//! A factory knows how to build, destroy, wake up and put to sleep objects of
//! one class and every class deriving from it. Pools own the objects; the
//! factory owns nothing and only translates pool transitions into calls on
//! the hosting [`ObjectWorld`].

pub mod actor;
pub mod object;

pub use actor::ActorFactory;
pub use object::ObjectFactory;

use super::object_data::{PoolObjectData, PoolObjectState, SpawnRequest};
use crate::config::PoolSettings;
use crate::foundation::math::Transform;
use crate::world::{ClassRef, ObjectId, ObjectWorld};

/// Per-class strategy used by a [`PoolRegistry`](super::PoolRegistry)
///
/// Every object goes through `Constructed -> Active <-> Inactive`, and only
/// pool teardown moves it on to destroyed. `Constructed` happens once per
/// object: [`spawn_now`](Self::spawn_now) builds it in two phases so the pool
/// can register it before its deferred construction runs.
pub trait PoolFactory {
    /// Class handled by this factory, subclasses included
    fn object_class(&self) -> ClassRef;

    /// Short name used in diagnostics
    fn name(&self) -> &'static str {
        let path = std::any::type_name::<Self>();
        path.rsplit("::").next().unwrap_or(path)
    }

    /// Adopt the settings of the manager the factory is registered with
    fn configure(&mut self, _settings: &PoolSettings) {}

    /// First construction phase; `None` when the runtime produced no object
    fn begin_spawn(&self, world: &mut dyn ObjectWorld, class: ClassRef, transform: &Transform) -> Option<ObjectId>;

    /// Second construction phase, run after the object was pre-registered
    fn finish_spawn(&self, _world: &mut dyn ObjectWorld, _object: ObjectId, _transform: &Transform) {}

    /// Construct one object for `request`
    ///
    /// The record handed to both callbacks is active and carries the
    /// pre-assigned handle.
    ///
    /// # Panics
    ///
    /// If the requested class is not handled by this factory, or if the
    /// runtime fails to construct the object.
    fn spawn_now(&self, world: &mut dyn ObjectWorld, request: SpawnRequest<'_>) -> ObjectId {
        let SpawnRequest { class, transform, handle, callbacks } = request;

        assert!(
            class.is_child_of(self.object_class()),
            "[{}::spawn_now] class '{}' is not a '{}' class",
            self.name(),
            class,
            self.object_class()
        );

        let Some(object) = self.begin_spawn(world, class, &transform) else {
            panic!("[{}::spawn_now] '{}' was not spawned", self.name(), class);
        };

        let data = PoolObjectData::new_active(handle, object);

        if let Some(on_pre_registered) = callbacks.on_pre_registered {
            on_pre_registered(&data);
        }

        self.finish_spawn(world, object, &transform);

        if let Some(on_post_spawned) = callbacks.on_post_spawned {
            on_post_spawned(&data);
        }

        object
    }

    /// Permanently destroy an object instead of returning it to its pool
    ///
    /// # Panics
    ///
    /// If the object is no longer valid.
    fn destroy(&self, world: &mut dyn ObjectWorld, object: ObjectId);

    /// Wake up a pooled object that is being taken again
    fn on_take_from_pool(&self, _world: &mut dyn ObjectWorld, _object: ObjectId, _transform: &Transform) {}

    /// Put an object to sleep as it goes back to its pool
    fn on_return_to_pool(&self, _world: &mut dyn ObjectWorld, _object: ObjectId) {}

    /// Apply the presentation for `new_state`; applying a state twice is the
    /// same as applying it once
    fn on_changed_state_in_pool(&self, _world: &mut dyn ObjectWorld, _new_state: PoolObjectState, _object: ObjectId) {}
}

impl std::fmt::Debug for dyn PoolFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(self.name())
            .field("object_class", &self.object_class().name())
            .finish()
    }
}
