//! In-memory object runtime
//!
//! Stores every object in a slot map and records the presentation state the
//! pool applies to it, which makes pool behaviour observable without a real
//! engine behind it.

use bitflags::bitflags;
use slotmap::SlotMap;

use super::{ClassRef, ObjectId, ObjectWorld};
use crate::foundation::math::{Transform, Vec3};

bitflags! {
    /// Presentation and construction state of a scene object
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PresentationFlags: u8 {
        /// Not rendered
        const HIDDEN = 1 << 0;
        /// Takes part in collision queries
        const COLLISION = 1 << 1;
        /// Receives per-frame updates
        const TICK = 1 << 2;
        /// Construction logic has completed
        const CONSTRUCTED = 1 << 3;
    }
}

/// One object stored in a [`SceneWorld`]
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Class the object was constructed as
    pub class: ClassRef,
    /// Current placement (identity for plain objects)
    pub transform: Transform,
    /// Current presentation state
    pub flags: PresentationFlags,
    /// Spawned as an actor rather than a plain object
    pub is_actor: bool,
}

impl SceneObject {
    /// Visible, colliding and ticking
    pub fn is_fully_enabled(&self) -> bool {
        !self.flags.contains(PresentationFlags::HIDDEN)
            && self.flags.contains(PresentationFlags::COLLISION | PresentationFlags::TICK)
    }

    /// Hidden, not colliding and not ticking
    pub fn is_fully_disabled(&self) -> bool {
        self.flags.contains(PresentationFlags::HIDDEN)
            && !self.flags.intersects(PresentationFlags::COLLISION | PresentationFlags::TICK)
    }

    /// Whether the second construction phase has run
    pub fn is_constructed(&self) -> bool {
        self.flags.contains(PresentationFlags::CONSTRUCTED)
    }
}

/// Slot-map backed [`ObjectWorld`]
#[derive(Debug, Default)]
pub struct SceneWorld {
    objects: SlotMap<ObjectId, SceneObject>,
    constructed: usize,
    destroyed: usize,
    refuse_construction: bool,
}

impl SceneWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a live object
    pub fn get(&self, object: ObjectId) -> Option<&SceneObject> {
        self.objects.get(object)
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the world holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects constructed since the world was created
    pub fn constructed_count(&self) -> usize {
        self.constructed
    }

    /// Objects destroyed since the world was created
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// Live objects that are currently visible
    pub fn visible_count(&self) -> usize {
        self.objects
            .values()
            .filter(|object| !object.flags.contains(PresentationFlags::HIDDEN))
            .count()
    }

    /// Make every following construction fail, as a runtime out of resources would
    pub fn set_refuse_construction(&mut self, refuse: bool) {
        self.refuse_construction = refuse;
    }

    fn insert(&mut self, object: SceneObject) -> Option<ObjectId> {
        if self.refuse_construction {
            log::warn!("SceneWorld refused to construct {}", object.class);
            return None;
        }

        self.constructed += 1;
        Some(self.objects.insert(object))
    }

    fn remove(&mut self, object: ObjectId) {
        if self.objects.remove(object).is_some() {
            self.destroyed += 1;
        } else {
            log::warn!("SceneWorld asked to destroy unknown object {:?}", object);
        }
    }

    fn with_actor(&mut self, actor: ObjectId, apply: impl FnOnce(&mut SceneObject)) {
        match self.objects.get_mut(actor) {
            Some(object) if object.is_actor => apply(object),
            Some(object) => log::warn!("{:?} is a plain {}, not an actor", actor, object.class),
            None => log::warn!("SceneWorld has no actor {:?}", actor),
        }
    }
}

impl ObjectWorld for SceneWorld {
    fn new_object(&mut self, class: ClassRef) -> Option<ObjectId> {
        self.insert(SceneObject {
            class,
            transform: Transform::identity(),
            flags: PresentationFlags::CONSTRUCTED,
            is_actor: false,
        })
    }

    fn begin_spawn_actor(&mut self, class: ClassRef, transform: &Transform) -> Option<ObjectId> {
        self.insert(SceneObject {
            class,
            transform: transform.clone(),
            flags: PresentationFlags::COLLISION | PresentationFlags::TICK,
            is_actor: true,
        })
    }

    fn finish_spawn_actor(&mut self, actor: ObjectId, transform: &Transform) {
        self.with_actor(actor, |object| {
            object.transform = transform.clone();
            object.flags.insert(PresentationFlags::CONSTRUCTED);
        });
    }

    fn destroy_object(&mut self, object: ObjectId) {
        self.remove(object);
    }

    fn destroy_actor(&mut self, actor: ObjectId) {
        self.remove(actor);
    }

    fn is_valid(&self, object: ObjectId) -> bool {
        self.objects.contains_key(object)
    }

    fn set_actor_transform(&mut self, actor: ObjectId, transform: &Transform) {
        self.with_actor(actor, |object| object.transform = transform.clone());
    }

    fn set_actor_location(&mut self, actor: ObjectId, location: Vec3) {
        self.with_actor(actor, |object| object.transform.position = location);
    }

    fn set_actor_hidden(&mut self, actor: ObjectId, hidden: bool) {
        self.with_actor(actor, |object| object.flags.set(PresentationFlags::HIDDEN, hidden));
    }

    fn set_actor_collision_enabled(&mut self, actor: ObjectId, enabled: bool) {
        self.with_actor(actor, |object| object.flags.set(PresentationFlags::COLLISION, enabled));
    }

    fn set_actor_tick_enabled(&mut self, actor: ObjectId, enabled: bool) {
        self.with_actor(actor, |object| object.flags.set(PresentationFlags::TICK, enabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{ACTOR, OBJECT};

    #[test]
    fn test_deferred_actor_spawn() {
        let mut world = SceneWorld::new();
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));

        let actor = world.begin_spawn_actor(&ACTOR, &transform).unwrap();
        assert!(!world.get(actor).unwrap().is_constructed());

        world.finish_spawn_actor(actor, &transform);
        let object = world.get(actor).unwrap();
        assert!(object.is_constructed());
        assert!(object.is_fully_enabled());
        assert_eq!(object.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(world.constructed_count(), 1);
    }

    #[test]
    fn test_presentation_flags() {
        let mut world = SceneWorld::new();
        let actor = world.begin_spawn_actor(&ACTOR, &Transform::identity()).unwrap();

        world.set_actor_hidden(actor, true);
        world.set_actor_collision_enabled(actor, false);
        world.set_actor_tick_enabled(actor, false);

        assert!(world.get(actor).unwrap().is_fully_disabled());
        assert_eq!(world.visible_count(), 0);
    }

    #[test]
    fn test_actor_setters_ignore_plain_objects() {
        let mut world = SceneWorld::new();
        let object = world.new_object(&OBJECT).unwrap();

        world.set_actor_hidden(object, true);

        assert!(!world.get(object).unwrap().flags.contains(PresentationFlags::HIDDEN));
    }

    #[test]
    fn test_destroy_invalidates() {
        let mut world = SceneWorld::new();
        let object = world.new_object(&OBJECT).unwrap();
        assert!(world.is_valid(object));

        world.destroy_object(object);

        assert!(!world.is_valid(object));
        assert_eq!(world.destroyed_count(), 1);
        assert!(world.is_empty());
    }

    #[test]
    fn test_refused_construction() {
        let mut world = SceneWorld::new();
        world.set_refuse_construction(true);

        assert!(world.new_object(&OBJECT).is_none());
        assert!(world.begin_spawn_actor(&ACTOR, &Transform::identity()).is_none());
        assert_eq!(world.constructed_count(), 0);
    }
}
