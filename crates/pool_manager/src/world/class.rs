//! Object class descriptors
//!
//! Classes form a single-inheritance tree rooted at [`OBJECT`]. They are
//! declared as statics and compared by name, so every class name must be
//! unique within a process.

/// Reference to a statically declared class
pub type ClassRef = &'static ObjectClass;

/// Descriptor for one concrete kind of object
#[derive(Debug)]
pub struct ObjectClass {
    name: &'static str,
    parent: Option<ClassRef>,
}

/// Root class every other class derives from
pub static OBJECT: ObjectClass = ObjectClass::root("Object");

/// Base class for spatial objects placed in the world
pub static ACTOR: ObjectClass = ObjectClass::new("Actor", &OBJECT);

impl ObjectClass {
    /// Declare a class without a parent
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// Declare a class deriving from `parent`
    pub const fn new(name: &'static str, parent: ClassRef) -> Self {
        Self { name, parent: Some(parent) }
    }

    /// Class name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Direct parent, `None` for a root class
    pub fn parent(&self) -> Option<ClassRef> {
        self.parent
    }

    /// This class followed by each of its ancestors, nearest first
    pub fn lineage(&'static self) -> impl Iterator<Item = ClassRef> {
        std::iter::successors(Some(self), |class| class.parent)
    }

    /// Whether this class is `other` or derives from it
    pub fn is_child_of(&'static self, other: &ObjectClass) -> bool {
        self.lineage().any(|class| class == other)
    }
}

impl PartialEq for ObjectClass {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ObjectClass {}

impl std::hash::Hash for ObjectClass {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl std::fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static PAWN: ObjectClass = ObjectClass::new("Pawn", &ACTOR);
    static SETTINGS_ASSET: ObjectClass = ObjectClass::new("SettingsAsset", &OBJECT);

    #[test]
    fn test_lineage_walks_to_root() {
        let names: Vec<_> = PAWN.lineage().map(ObjectClass::name).collect();
        assert_eq!(names, vec!["Pawn", "Actor", "Object"]);
    }

    #[test]
    fn test_is_child_of() {
        assert!(PAWN.is_child_of(&PAWN));
        assert!(PAWN.is_child_of(&ACTOR));
        assert!(PAWN.is_child_of(&OBJECT));
        assert!(!ACTOR.is_child_of(&PAWN));
        assert!(!SETTINGS_ASSET.is_child_of(&ACTOR));
    }

    #[test]
    fn test_root_has_no_parent() {
        assert!(OBJECT.parent().is_none());
        assert_eq!(ACTOR.parent(), Some(&OBJECT));
    }
}
