//! Factory for plain, non-spatial objects

use super::PoolFactory;
use crate::foundation::math::Transform;
use crate::world::{ClassRef, ObjectId, ObjectWorld, OBJECT};

/// Pools objects that have no placement or presentation
///
/// Construction is single-phase, and taking or returning an object changes
/// nothing on it; the pool record's active flag is the whole state.
#[derive(Debug, Clone, Copy)]
pub struct ObjectFactory {
    class: ClassRef,
}

impl ObjectFactory {
    /// Factory for every class deriving from the root object class
    pub fn new() -> Self {
        Self::for_class(&OBJECT)
    }

    /// Factory for `class` and its subclasses only
    pub fn for_class(class: ClassRef) -> Self {
        Self { class }
    }
}

impl Default for ObjectFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolFactory for ObjectFactory {
    fn object_class(&self) -> ClassRef {
        self.class
    }

    fn begin_spawn(&self, world: &mut dyn ObjectWorld, class: ClassRef, _transform: &Transform) -> Option<ObjectId> {
        world.new_object(class)
    }

    fn destroy(&self, world: &mut dyn ObjectWorld, object: ObjectId) {
        assert!(world.is_valid(object), "[ObjectFactory::destroy] object {:?} is no longer valid", object);
        world.destroy_object(object);
    }
}
