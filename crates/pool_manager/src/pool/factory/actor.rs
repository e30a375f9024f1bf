//! Factory for actors
//!
//! Actors are spawned with deferred construction so the pool can register
//! them before their construction logic runs. Returned actors are hidden,
//! stop colliding and ticking, and by default are parked far away: some
//! runtimes do not mirror the collision switch to every observer, and an
//! actor out of reach cannot be hit regardless.

use super::PoolFactory;
use crate::config::PoolSettings;
use crate::foundation::math::{far_away_location, Transform, Vec3};
use crate::pool::object_data::PoolObjectState;
use crate::world::{ClassRef, ObjectId, ObjectWorld, ACTOR};

/// Pools actors placed in the world
#[derive(Debug, Clone)]
pub struct ActorFactory {
    class: ClassRef,
    return_location: Vec3,
    relocate_on_return: bool,
}

impl ActorFactory {
    /// Factory for every actor class, parking returned actors far away
    pub fn new() -> Self {
        Self {
            class: &ACTOR,
            return_location: far_away_location(),
            relocate_on_return: true,
        }
    }

    /// Factory configured from session settings
    pub fn from_settings(settings: &PoolSettings) -> Self {
        let mut factory = Self::new();
        factory.configure(settings);
        factory
    }

    /// Restrict the factory to `class` and its subclasses
    ///
    /// # Panics
    ///
    /// If `class` is not an actor class.
    pub fn for_class(mut self, class: ClassRef) -> Self {
        assert!(
            class.is_child_of(&ACTOR),
            "[ActorFactory::for_class] '{}' is not an actor class",
            class
        );
        self.class = class;
        self
    }

    /// Where returned actors are parked
    pub fn with_return_location(mut self, location: Vec3) -> Self {
        self.return_location = location;
        self
    }

    /// Park returned actors, or only hide them
    pub fn with_relocation(mut self, enabled: bool) -> Self {
        self.relocate_on_return = enabled;
        self
    }

    /// Where returned actors are parked
    pub fn return_location(&self) -> Vec3 {
        self.return_location
    }
}

impl Default for ActorFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolFactory for ActorFactory {
    fn object_class(&self) -> ClassRef {
        self.class
    }

    /// Settings replace any placement options given to the builder
    fn configure(&mut self, settings: &PoolSettings) {
        self.return_location = settings.return_location();
        self.relocate_on_return = settings.relocate_on_return;
    }

    fn begin_spawn(&self, world: &mut dyn ObjectWorld, class: ClassRef, transform: &Transform) -> Option<ObjectId> {
        world.begin_spawn_actor(class, transform)
    }

    fn finish_spawn(&self, world: &mut dyn ObjectWorld, actor: ObjectId, transform: &Transform) {
        world.finish_spawn_actor(actor, transform);
    }

    fn destroy(&self, world: &mut dyn ObjectWorld, actor: ObjectId) {
        assert!(world.is_valid(actor), "[ActorFactory::destroy] actor {:?} is no longer valid", actor);
        world.destroy_actor(actor);
    }

    fn on_take_from_pool(&self, world: &mut dyn ObjectWorld, actor: ObjectId, transform: &Transform) {
        world.set_actor_transform(actor, transform);
    }

    fn on_return_to_pool(&self, world: &mut dyn ObjectWorld, actor: ObjectId) {
        if self.relocate_on_return {
            world.set_actor_location(actor, self.return_location);
        }
    }

    fn on_changed_state_in_pool(&self, world: &mut dyn ObjectWorld, new_state: PoolObjectState, actor: ObjectId) {
        let activate = new_state == PoolObjectState::Active;

        world.set_actor_hidden(actor, !activate);
        world.set_actor_collision_enabled(actor, activate);
        world.set_actor_tick_enabled(actor, activate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::object_data::{SpawnCallbacks, SpawnRequest};
    use crate::pool::PoolHandle;
    use crate::world::{ObjectClass, SceneWorld, OBJECT};
    use std::cell::RefCell;
    use std::rc::Rc;

    static TURRET: ObjectClass = ObjectClass::new("Turret", &ACTOR);
    static SAVE_GAME: ObjectClass = ObjectClass::new("SaveGame", &OBJECT);

    fn spawn(factory: &ActorFactory, world: &mut SceneWorld, position: Vec3) -> ObjectId {
        factory.spawn_now(
            world,
            SpawnRequest {
                class: &TURRET,
                transform: Transform::from_position(position),
                handle: PoolHandle::invalid(),
                callbacks: SpawnCallbacks::none(),
            },
        )
    }

    /// Scene world that logs construction calls into a shared journal
    struct JournalWorld {
        inner: SceneWorld,
        journal: Rc<RefCell<Vec<&'static str>>>,
    }

    impl ObjectWorld for JournalWorld {
        fn new_object(&mut self, class: ClassRef) -> Option<ObjectId> {
            self.inner.new_object(class)
        }
        fn begin_spawn_actor(&mut self, class: ClassRef, transform: &Transform) -> Option<ObjectId> {
            self.journal.borrow_mut().push("begin");
            self.inner.begin_spawn_actor(class, transform)
        }
        fn finish_spawn_actor(&mut self, actor: ObjectId, transform: &Transform) {
            self.journal.borrow_mut().push("finish");
            self.inner.finish_spawn_actor(actor, transform);
        }
        fn destroy_object(&mut self, object: ObjectId) {
            self.inner.destroy_object(object);
        }
        fn destroy_actor(&mut self, actor: ObjectId) {
            self.inner.destroy_actor(actor);
        }
        fn is_valid(&self, object: ObjectId) -> bool {
            self.inner.is_valid(object)
        }
        fn set_actor_transform(&mut self, actor: ObjectId, transform: &Transform) {
            self.inner.set_actor_transform(actor, transform);
        }
        fn set_actor_location(&mut self, actor: ObjectId, location: Vec3) {
            self.inner.set_actor_location(actor, location);
        }
        fn set_actor_hidden(&mut self, actor: ObjectId, hidden: bool) {
            self.inner.set_actor_hidden(actor, hidden);
        }
        fn set_actor_collision_enabled(&mut self, actor: ObjectId, enabled: bool) {
            self.inner.set_actor_collision_enabled(actor, enabled);
        }
        fn set_actor_tick_enabled(&mut self, actor: ObjectId, enabled: bool) {
            self.inner.set_actor_tick_enabled(actor, enabled);
        }
    }

    #[test]
    fn test_callbacks_straddle_deferred_construction() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut world = JournalWorld {
            inner: SceneWorld::new(),
            journal: Rc::clone(&journal),
        };
        let factory = ActorFactory::new();
        let handle = PoolHandle::invalid();

        let object = factory.spawn_now(
            &mut world,
            SpawnRequest {
                class: &TURRET,
                transform: Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
                handle,
                callbacks: SpawnCallbacks::none()
                    .on_pre_registered(|data| {
                        assert!(data.is_active);
                        assert_eq!(data.handle, handle);
                        journal.borrow_mut().push("pre");
                    })
                    .on_post_spawned(|_| journal.borrow_mut().push("post")),
            },
        );

        assert_eq!(*journal.borrow(), vec!["begin", "pre", "finish", "post"]);
        let spawned = world.inner.get(object).unwrap();
        assert!(spawned.is_constructed());
        assert!(spawned.is_actor);
        assert_eq!(spawned.class, &TURRET);
    }

    #[test]
    fn test_state_change_is_idempotent() {
        let mut world = SceneWorld::new();
        let factory = ActorFactory::new();
        let actor = spawn(&factory, &mut world, Vec3::zeros());

        factory.on_changed_state_in_pool(&mut world, PoolObjectState::Active, actor);
        let once = world.get(actor).unwrap().flags;
        factory.on_changed_state_in_pool(&mut world, PoolObjectState::Active, actor);
        let twice = world.get(actor).unwrap().flags;

        assert_eq!(once, twice);
        assert!(world.get(actor).unwrap().is_fully_enabled());

        factory.on_changed_state_in_pool(&mut world, PoolObjectState::Inactive, actor);
        factory.on_changed_state_in_pool(&mut world, PoolObjectState::Inactive, actor);
        assert!(world.get(actor).unwrap().is_fully_disabled());
    }

    #[test]
    fn test_return_parks_actor() {
        let mut world = SceneWorld::new();
        let factory = ActorFactory::new();
        let actor = spawn(&factory, &mut world, Vec3::new(3.0, 4.0, 5.0));

        factory.on_return_to_pool(&mut world, actor);

        assert_eq!(world.get(actor).unwrap().transform.position, far_away_location());
    }

    #[test]
    fn test_return_without_relocation_keeps_position() {
        let mut world = SceneWorld::new();
        let factory = ActorFactory::new().with_relocation(false);
        let actor = spawn(&factory, &mut world, Vec3::new(3.0, 4.0, 5.0));

        factory.on_return_to_pool(&mut world, actor);

        assert_eq!(world.get(actor).unwrap().transform.position, Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_take_reapplies_transform() {
        let mut world = SceneWorld::new();
        let factory = ActorFactory::new();
        let actor = spawn(&factory, &mut world, Vec3::zeros());
        let target = Transform::from_position(Vec3::new(-7.0, 2.0, 0.5));

        factory.on_take_from_pool(&mut world, actor, &target);

        assert_eq!(world.get(actor).unwrap().transform, target);
    }

    #[test]
    fn test_from_settings() {
        let settings = PoolSettings::default()
            .with_return_location(Vec3::new(0.0, -10_000.0, 0.0))
            .with_relocation(false);

        let factory = ActorFactory::from_settings(&settings);

        assert_eq!(factory.return_location(), Vec3::new(0.0, -10_000.0, 0.0));
        assert!(!factory.relocate_on_return);
    }

    #[test]
    #[should_panic(expected = "is not an actor class")]
    fn test_for_class_rejects_plain_objects() {
        let _ = ActorFactory::new().for_class(&SAVE_GAME);
    }

    #[test]
    #[should_panic(expected = "is no longer valid")]
    fn test_destroy_invalid_actor_panics() {
        let mut world = SceneWorld::new();
        let factory = ActorFactory::new();
        let actor = spawn(&factory, &mut world, Vec3::zeros());

        world.destroy_actor(actor);
        factory.destroy(&mut world, actor);
    }
}
