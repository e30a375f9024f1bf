//! Pool Manager
//!
//! Routes take/return requests to one [`PoolRegistry`] per class, creating
//! registries on first use. All registries share one handle allocator, so a
//! handle alone is enough to find the pool that owns it.
//!
//! A manager is explicitly owned by whoever runs the world session: the
//! session starts with [`PoolManager::initialize`] and ends with
//! [`PoolManager::deinitialize`] (or when the manager is dropped), which
//! destroys every pooled object.
//!
//! # Usage
//!
//! ```rust
//! use pool_manager::prelude::*;
//!
//! static BULLET: ObjectClass = ObjectClass::new("Bullet", &ACTOR);
//!
//! let mut pools = PoolManager::new();
//! pools.register_factory(ActorFactory::new()).unwrap();
//! pools.initialize(SceneWorld::new()).unwrap();
//!
//! let bullet = pools.take_from_pool(&BULLET, &Transform::from_position(Vec3::new(0.0, 1.0, 0.0)));
//! assert!(pools.is_active(bullet));
//!
//! pools.return_to_pool(bullet);
//! assert_eq!(pools.object_state(bullet), PoolObjectState::Inactive);
//!
//! let world = pools.deinitialize().unwrap();
//! assert!(world.is_empty());
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use super::factory::PoolFactory;
use super::handle::{HandleAllocator, PoolHandle};
use super::object_data::{PoolObjectState, SpawnCallbacks};
use super::registry::PoolRegistry;
use crate::config::{ConfigError, PoolSettings};
use crate::foundation::math::Transform;
use crate::world::{ClassRef, ObjectId, ObjectWorld, SceneWorld};

/// Errors that can occur during pool management
#[derive(thiserror::Error, Debug)]
pub enum PoolManagerError {
    /// Another factory already handles this class
    #[error("A factory for class '{class}' is already registered")]
    FactoryAlreadyRegistered {
        /// The class both factories handle
        class: &'static str,
    },

    /// `initialize` was called while a session is running
    #[error("Pool manager already has a world; deinitialize it first")]
    WorldAlreadyInitialized,

    /// A class name did not resolve to any known class
    #[error("No class named '{0}' is known to the pool manager")]
    UnknownClass(String),

    /// A known class that no registered factory can build
    #[error("No registered factory can build class '{0}'")]
    NoFactory(String),

    /// Settings failed validation
    #[error("Invalid pool settings: {0}")]
    Config(#[from] ConfigError),
}

/// Object counts for one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPoolStats {
    /// Class name
    pub class: &'static str,
    /// Taken objects
    pub active: usize,
    /// Objects waiting for reuse
    pub inactive: usize,
}

/// Statistics for the pool manager
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolManagerStats {
    /// Number of registries
    pub pools: usize,
    /// Taken objects across all pools
    pub active_objects: usize,
    /// Objects waiting for reuse across all pools
    pub inactive_objects: usize,
    /// Objects constructed since the manager was created
    pub total_constructed: u64,
    /// Takes served without construction
    pub total_reused: u64,
    /// Successful returns
    pub total_returned: u64,
    /// Objects destroyed by pool teardown
    pub total_destroyed: u64,
    /// Per-class breakdown, sorted by class name
    pub per_class: Vec<ClassPoolStats>,
}

impl PoolManagerStats {
    /// Every pooled object, active or not
    pub fn total_objects(&self) -> usize {
        self.active_objects + self.inactive_objects
    }
}

/// Facade over every per-class pool of one world session
pub struct PoolManager<W: ObjectWorld = SceneWorld> {
    world: Option<W>,
    factories: Vec<Rc<dyn PoolFactory>>,
    classes: HashMap<&'static str, ClassRef>,
    pools: HashMap<ClassRef, PoolRegistry>,
    handles: HandleAllocator,
    settings: PoolSettings,
}

impl<W: ObjectWorld> PoolManager<W> {
    /// Create a manager with default settings and no world
    pub fn new() -> Self {
        Self::with_settings(PoolSettings::default())
    }

    /// Create a manager with the given settings and no world
    pub fn with_settings(settings: PoolSettings) -> Self {
        Self {
            world: None,
            factories: Vec::new(),
            classes: HashMap::new(),
            pools: HashMap::new(),
            handles: HandleAllocator::new(),
            settings,
        }
    }

    /// Register the factory for a class and its subclasses
    ///
    /// A class is served by the factory registered for its nearest ancestor.
    /// The factory is configured with the manager's settings first.
    pub fn register_factory(&mut self, mut factory: impl PoolFactory + 'static) -> Result<(), PoolManagerError> {
        let class = factory.object_class();
        if self.factories.iter().any(|existing| existing.object_class() == class) {
            return Err(PoolManagerError::FactoryAlreadyRegistered { class: class.name() });
        }

        factory.configure(&self.settings);

        log::info!("Registered {} for class {}", factory.name(), class);
        self.register_class(class);
        self.factories.push(Rc::new(factory));
        Ok(())
    }

    /// Make a class and its ancestors resolvable by name
    pub fn register_class(&mut self, class: ClassRef) {
        for ancestor in class.lineage() {
            self.classes.entry(ancestor.name()).or_insert(ancestor);
        }
    }

    /// Look up a registered class by name
    pub fn find_class(&self, name: &str) -> Option<ClassRef> {
        self.classes.get(name).copied()
    }

    /// Start a session on `world` and apply the prespawn settings
    pub fn initialize(&mut self, world: W) -> Result<(), PoolManagerError> {
        if self.world.is_some() {
            return Err(PoolManagerError::WorldAlreadyInitialized);
        }
        self.settings.validate()?;

        let prespawn = self
            .settings
            .prespawn
            .iter()
            .map(|entry| {
                let class = self
                    .find_class(&entry.class)
                    .ok_or_else(|| PoolManagerError::UnknownClass(entry.class.clone()))?;
                if Self::factory_for(&self.factories, class).is_none() {
                    return Err(PoolManagerError::NoFactory(entry.class.clone()));
                }
                Ok((class, entry.count))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.world = Some(world);
        log::info!("Pool manager initialized with {} factories", self.factories.len());

        for (class, count) in prespawn {
            self.prespawn(class, count);
        }
        Ok(())
    }

    /// End the session: destroy every pooled object and hand the world back
    pub fn deinitialize(&mut self) -> Option<W> {
        if self.world.is_some() {
            let destroyed = self.empty_all_pools();
            log::info!("Pool manager deinitialized, destroyed {} pooled objects", destroyed);
        }
        self.world.take()
    }

    /// Whether a session is running
    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    /// World of the running session
    pub fn world(&self) -> Option<&W> {
        self.world.as_ref()
    }

    /// Mutable world of the running session
    pub fn world_mut(&mut self) -> Option<&mut W> {
        self.world.as_mut()
    }

    /// Session settings
    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    /// Registry for `class`, created on first use
    ///
    /// # Panics
    ///
    /// If no registered factory handles `class`.
    pub fn get_or_create_registry(&mut self, class: ClassRef) -> &mut PoolRegistry {
        Self::registry_for(
            &mut self.pools,
            &mut self.classes,
            &self.factories,
            &self.handles,
            self.settings.capacity_warning,
            class,
        )
    }

    fn registry_for<'p>(
        pools: &'p mut HashMap<ClassRef, PoolRegistry>,
        classes: &mut HashMap<&'static str, ClassRef>,
        factories: &[Rc<dyn PoolFactory>],
        handles: &HandleAllocator,
        capacity_warning: usize,
        class: ClassRef,
    ) -> &'p mut PoolRegistry {
        pools.entry(class).or_insert_with(|| {
            let Some(factory) = Self::factory_for(factories, class) else {
                panic!("[PoolManager::get_or_create_registry] no factory handles class '{}'", class);
            };

            for ancestor in class.lineage() {
                classes.entry(ancestor.name()).or_insert(ancestor);
            }

            log::info!("Created pool for {} using {}", class, factory.name());
            PoolRegistry::new(class, Rc::clone(factory), handles.clone()).with_capacity_warning(capacity_warning)
        })
    }

    fn factory_for(factories: &[Rc<dyn PoolFactory>], class: ClassRef) -> Option<&Rc<dyn PoolFactory>> {
        class
            .lineage()
            .find_map(|ancestor| factories.iter().find(|factory| factory.object_class() == ancestor))
    }

    fn require_world<'w>(world: &'w mut Option<W>, operation: &str) -> &'w mut W {
        match world {
            Some(world) => world,
            None => panic!("[PoolManager::{}] world is null; call initialize first", operation),
        }
    }

    /// Take an object of `class` placed at `transform`
    ///
    /// # Panics
    ///
    /// If no session is running or no factory handles `class`.
    pub fn take_from_pool(&mut self, class: ClassRef, transform: &Transform) -> PoolHandle {
        self.take_from_pool_with_callbacks(class, transform, SpawnCallbacks::none())
    }

    /// Take an object, running `callbacks` if one has to be constructed
    ///
    /// # Panics
    ///
    /// If no session is running or no factory handles `class`.
    pub fn take_from_pool_with_callbacks(
        &mut self,
        class: ClassRef,
        transform: &Transform,
        callbacks: SpawnCallbacks<'_>,
    ) -> PoolHandle {
        let world = Self::require_world(&mut self.world, "take_from_pool");
        let registry = Self::registry_for(
            &mut self.pools,
            &mut self.classes,
            &self.factories,
            &self.handles,
            self.settings.capacity_warning,
            class,
        );
        registry.take(world, transform, callbacks)
    }

    /// Return the object addressed by `handle` to its pool
    ///
    /// Unknown, stale and already returned handles are ignored. Returns
    /// whether an object was deactivated.
    pub fn return_to_pool(&mut self, handle: PoolHandle) -> bool {
        let Some(registry) = self.pools.values_mut().find(|registry| registry.contains(handle)) else {
            log::trace!("Ignoring return of {}: no pool owns it", handle);
            return false;
        };

        let world = Self::require_world(&mut self.world, "return_to_pool");
        registry.return_object(world, handle)
    }

    /// Construct `count` inactive objects of `class` ahead of time
    ///
    /// # Panics
    ///
    /// If no session is running or no factory handles `class`.
    pub fn prespawn(&mut self, class: ClassRef, count: usize) -> Vec<PoolHandle> {
        let world = Self::require_world(&mut self.world, "prespawn");
        let registry = Self::registry_for(
            &mut self.pools,
            &mut self.classes,
            &self.factories,
            &self.handles,
            self.settings.capacity_warning,
            class,
        );
        registry.prespawn(world, count)
    }

    /// Force the object addressed by `handle` into `state`
    ///
    /// Returns whether the state changed; unknown handles are ignored.
    pub fn set_object_state(&mut self, handle: PoolHandle, state: PoolObjectState) -> bool {
        let Some(registry) = self.pools.values_mut().find(|registry| registry.contains(handle)) else {
            return false;
        };

        let world = Self::require_world(&mut self.world, "set_object_state");
        registry.set_state(world, handle, state)
    }

    /// Return every taken object of `class`
    ///
    /// Returns the number of objects returned.
    pub fn return_all(&mut self, class: ClassRef) -> usize {
        let Some(registry) = self.pools.get_mut(class) else {
            return 0;
        };

        let active: Vec<PoolHandle> = registry
            .records()
            .filter(|record| record.is_active)
            .map(|record| record.handle)
            .collect();

        let world = Self::require_world(&mut self.world, "return_all");
        active
            .into_iter()
            .filter(|handle| registry.return_object(world, *handle))
            .count()
    }

    /// Destroy every object pooled for `class`
    ///
    /// The pool stays registered and behaves as empty afterwards. Returns the
    /// number of destroyed objects.
    pub fn empty_pool(&mut self, class: ClassRef) -> usize {
        let Some(registry) = self.pools.get_mut(class) else {
            return 0;
        };
        if registry.is_empty() {
            return 0;
        }

        let world = Self::require_world(&mut self.world, "empty_pool");
        registry.clear(world)
    }

    /// Destroy every pooled object of every class
    pub fn empty_all_pools(&mut self) -> usize {
        let Some(world) = self.world.as_mut() else {
            return 0;
        };

        self.pools.values_mut().map(|registry| registry.clear(world)).sum()
    }

    /// State of the object addressed by `handle`
    pub fn object_state(&self, handle: PoolHandle) -> PoolObjectState {
        self.owner_of(handle)
            .map_or(PoolObjectState::None, |registry| registry.state_of(handle))
    }

    /// Whether `handle` addresses a taken object
    pub fn is_active(&self, handle: PoolHandle) -> bool {
        self.object_state(handle) == PoolObjectState::Active
    }

    /// Object addressed by `handle`
    pub fn find_object(&self, handle: PoolHandle) -> Option<ObjectId> {
        self.owner_of(handle)?.find(handle).map(|record| record.object)
    }

    /// Current handle of a pooled object
    pub fn find_handle(&self, object: ObjectId) -> Option<PoolHandle> {
        self.pools
            .values()
            .find_map(|registry| registry.find_by_object(object))
            .map(|record| record.handle)
    }

    /// Class of the pool owning `handle`
    pub fn class_of(&self, handle: PoolHandle) -> Option<ClassRef> {
        self.owner_of(handle).map(PoolRegistry::class)
    }

    fn owner_of(&self, handle: PoolHandle) -> Option<&PoolRegistry> {
        self.pools.values().find(|registry| registry.contains(handle))
    }

    /// Registry for `class`, if one was created
    pub fn registry(&self, class: ClassRef) -> Option<&PoolRegistry> {
        self.pools.get(class)
    }

    /// Every registry
    pub fn registries(&self) -> impl Iterator<Item = &PoolRegistry> {
        self.pools.values()
    }

    /// Snapshot of pool statistics
    pub fn stats(&self) -> PoolManagerStats {
        let mut stats = PoolManagerStats {
            pools: self.pools.len(),
            ..PoolManagerStats::default()
        };

        for registry in self.pools.values() {
            let active = registry.active_count();
            let inactive = registry.inactive_count();
            let counters = registry.stats();

            stats.active_objects += active;
            stats.inactive_objects += inactive;
            stats.total_constructed += counters.constructed;
            stats.total_reused += counters.reused;
            stats.total_returned += counters.returned;
            stats.total_destroyed += counters.destroyed;
            stats.per_class.push(ClassPoolStats {
                class: registry.class().name(),
                active,
                inactive,
            });
        }

        stats.per_class.sort_by_key(|entry| entry.class);
        stats
    }
}

impl<W: ObjectWorld> Default for PoolManager<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: ObjectWorld> Drop for PoolManager<W> {
    fn drop(&mut self) {
        // A panic while unwinding would abort
        if std::thread::panicking() {
            return;
        }
        self.deinitialize();
    }
}

impl<W: ObjectWorld> std::fmt::Debug for PoolManager<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolManager")
            .field("initialized", &self.world.is_some())
            .field("factories", &self.factories)
            .field("pools", &self.pools.values().collect::<Vec<_>>())
            .finish()
    }
}
