//! Cross-module pool scenarios


use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::math::{Transform, Vec3};
use crate::world::{ClassRef, ObjectId, ObjectWorld, SceneWorld};

/// Scene world that also reports destructions through a shared counter,
/// readable after the world itself is gone
pub(super) struct TrackedWorld {
    pub(super) scene: SceneWorld,
    pub(super) destroyed: Rc<Cell<usize>>,
}

impl TrackedWorld {
    pub(super) fn new() -> (Self, Rc<Cell<usize>>) {
        let destroyed = Rc::new(Cell::new(0));
        let world = Self {
            scene: SceneWorld::new(),
            destroyed: Rc::clone(&destroyed),
        };
        (world, destroyed)
    }
}

impl ObjectWorld for TrackedWorld {
    fn new_object(&mut self, class: ClassRef) -> Option<ObjectId> {
        self.scene.new_object(class)
    }

    fn begin_spawn_actor(&mut self, class: ClassRef, transform: &Transform) -> Option<ObjectId> {
        self.scene.begin_spawn_actor(class, transform)
    }

    fn finish_spawn_actor(&mut self, actor: ObjectId, transform: &Transform) {
        self.scene.finish_spawn_actor(actor, transform);
    }

    fn destroy_object(&mut self, object: ObjectId) {
        self.destroyed.set(self.destroyed.get() + 1);
        self.scene.destroy_object(object);
    }

    fn destroy_actor(&mut self, actor: ObjectId) {
        self.destroyed.set(self.destroyed.get() + 1);
        self.scene.destroy_actor(actor);
    }

    fn is_valid(&self, object: ObjectId) -> bool {
        self.scene.is_valid(object)
    }

    fn set_actor_transform(&mut self, actor: ObjectId, transform: &Transform) {
        self.scene.set_actor_transform(actor, transform);
    }

    fn set_actor_location(&mut self, actor: ObjectId, location: Vec3) {
        self.scene.set_actor_location(actor, location);
    }

    fn set_actor_hidden(&mut self, actor: ObjectId, hidden: bool) {
        self.scene.set_actor_hidden(actor, hidden);
    }

    fn set_actor_collision_enabled(&mut self, actor: ObjectId, enabled: bool) {
        self.scene.set_actor_collision_enabled(actor, enabled);
    }

    fn set_actor_tick_enabled(&mut self, actor: ObjectId, enabled: bool) {
        self.scene.set_actor_tick_enabled(actor, enabled);
    }
}
