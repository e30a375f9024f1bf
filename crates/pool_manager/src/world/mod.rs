//! Hosting object runtime
//!
//! The pool never owns objects directly. Construction, destruction and every
//! presentation change are delegated to an [`ObjectWorld`]; the pool only
//! sequences these calls. [`SceneWorld`] is an in-memory runtime used by the
//! demo and the tests.

pub mod class;
pub mod scene;

pub use class::{ClassRef, ObjectClass, ACTOR, OBJECT};
pub use scene::{PresentationFlags, SceneObject, SceneWorld};

use crate::foundation::math::{Transform, Vec3};

slotmap::new_key_type! {
    /// Reference to an object living in an [`ObjectWorld`]
    pub struct ObjectId;
}

/// Runtime that hosts the objects handed out by the pool
///
/// Methods taking an [`ObjectId`] may assume the id was produced by this
/// world; behaviour for ids of destroyed objects is up to the implementation
/// except for [`is_valid`](Self::is_valid), which must report `false`.
pub trait ObjectWorld {
    /// Construct a plain, non-spatial object
    fn new_object(&mut self, class: ClassRef) -> Option<ObjectId>;

    /// First construction phase of an actor: the object exists and is placed
    /// but its construction logic has not run yet
    fn begin_spawn_actor(&mut self, class: ClassRef, transform: &Transform) -> Option<ObjectId>;

    /// Second construction phase of an actor: run the deferred construction
    fn finish_spawn_actor(&mut self, actor: ObjectId, transform: &Transform);

    /// Permanently destroy a plain object
    fn destroy_object(&mut self, object: ObjectId);

    /// Permanently destroy an actor
    fn destroy_actor(&mut self, actor: ObjectId);

    /// Whether the object exists and has not been destroyed
    fn is_valid(&self, object: ObjectId) -> bool;

    /// Replace the actor's whole transform
    fn set_actor_transform(&mut self, actor: ObjectId, transform: &Transform);

    /// Move the actor without touching rotation or scale
    fn set_actor_location(&mut self, actor: ObjectId, location: Vec3);

    /// Hide or show the actor
    fn set_actor_hidden(&mut self, actor: ObjectId, hidden: bool);

    /// Enable or disable collision for the actor
    fn set_actor_collision_enabled(&mut self, actor: ObjectId, enabled: bool);

    /// Enable or disable per-frame updates for the actor
    fn set_actor_tick_enabled(&mut self, actor: ObjectId, enabled: bool);
}
