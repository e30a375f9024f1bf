//! Per-class pool registry
//!
//! Owns the records of every object constructed for one class and drives
//! each of them through its lifecycle using the class's factory.

use std::collections::HashMap;
use std::rc::Rc;

use super::factory::PoolFactory;
use super::handle::{HandleAllocator, PoolHandle};
use super::object_data::{PoolObjectData, PoolObjectState, SpawnCallbacks, SpawnRequest};
use crate::foundation::math::Transform;
use crate::world::{ClassRef, ObjectId, ObjectWorld};

/// Counters for one registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolRegistryStats {
    /// Objects constructed by the factory
    pub constructed: u64,
    /// Takes served by an inactive record
    pub reused: u64,
    /// Successful returns
    pub returned: u64,
    /// Objects destroyed on clear
    pub destroyed: u64,
}

/// Pool of every object of one class
///
/// Records keep their construction order, which is also the scan order when
/// looking for an inactive record to reuse. Handle lookups go through an
/// index holding only the current handle of each record.
pub struct PoolRegistry {
    class: ClassRef,
    factory: Rc<dyn PoolFactory>,
    handles: HandleAllocator,
    records: Vec<PoolObjectData>,
    index: HashMap<PoolHandle, usize>,
    capacity_warning: usize,
    capacity_warned: bool,
    stats: PoolRegistryStats,
}

impl PoolRegistry {
    /// Create an empty pool for `class`
    ///
    /// # Panics
    ///
    /// If `factory` does not handle `class`.
    pub fn new(class: ClassRef, factory: Rc<dyn PoolFactory>, handles: HandleAllocator) -> Self {
        assert!(
            class.is_child_of(factory.object_class()),
            "[PoolRegistry::new] {} cannot build '{}'",
            factory.name(),
            class
        );

        Self {
            class,
            factory,
            handles,
            records: Vec::new(),
            index: HashMap::new(),
            capacity_warning: 0,
            capacity_warned: false,
            stats: PoolRegistryStats::default(),
        }
    }

    /// Warn once when the pool grows past `threshold` objects (0 = never)
    pub fn with_capacity_warning(mut self, threshold: usize) -> Self {
        self.capacity_warning = threshold;
        self
    }

    /// Take an object, reusing an inactive one when possible
    ///
    /// The returned handle always addresses an active record. `callbacks`
    /// only run when a new object has to be constructed.
    pub fn take(
        &mut self,
        world: &mut dyn ObjectWorld,
        transform: &Transform,
        callbacks: SpawnCallbacks<'_>,
    ) -> PoolHandle {
        if let Some(index) = self.records.iter().position(|record| !record.is_active) {
            let handle = self.handles.allocate();
            let object = self.records[index].object;
            let previous = std::mem::replace(&mut self.records[index].handle, handle);
            self.index.remove(&previous);
            self.index.insert(handle, index);

            self.factory.on_take_from_pool(world, object, transform);
            self.factory.on_changed_state_in_pool(world, PoolObjectState::Active, object);
            self.records[index].is_active = true;
            self.stats.reused += 1;

            log::trace!("Reused {} {:?} as {} (was {})", self.class, object, handle, previous);
            return handle;
        }

        self.spawn(world, transform, callbacks)
    }

    /// Construct a new object and register it as active
    fn spawn(&mut self, world: &mut dyn ObjectWorld, transform: &Transform, callbacks: SpawnCallbacks<'_>) -> PoolHandle {
        let handle = self.handles.allocate();
        let SpawnCallbacks { on_pre_registered, on_post_spawned } = callbacks;

        // The record joins the pool before the deferred construction runs
        let records = &mut self.records;
        let index = &mut self.index;
        let request = SpawnRequest {
            class: self.class,
            transform: transform.clone(),
            handle,
            callbacks: SpawnCallbacks {
                on_pre_registered: Some(Box::new(move |data: &PoolObjectData| {
                    index.insert(data.handle, records.len());
                    records.push(*data);
                    if let Some(on_pre_registered) = on_pre_registered {
                        on_pre_registered(data);
                    }
                })),
                on_post_spawned,
            },
        };
        let object = self.factory.spawn_now(world, request);

        let registered = self.find(handle).is_some_and(|record| record.object == object);
        assert!(
            registered,
            "[PoolRegistry::take] {} did not pre-register {} for '{}'",
            self.factory.name(),
            handle,
            self.class
        );

        self.stats.constructed += 1;
        log::debug!("Constructed {} {:?} as {} ({} pooled)", self.class, object, handle, self.records.len());

        if self.capacity_warning > 0 && self.records.len() > self.capacity_warning && !self.capacity_warned {
            self.capacity_warned = true;
            log::warn!(
                "Pool for {} grew past {} objects; check that objects are returned",
                self.class,
                self.capacity_warning
            );
        }

        handle
    }

    /// Return an object to the pool
    ///
    /// Unknown, stale and already returned handles are ignored. Returns
    /// whether the object was deactivated.
    pub fn return_object(&mut self, world: &mut dyn ObjectWorld, handle: PoolHandle) -> bool {
        let Some(index) = self.index_of(handle) else {
            log::trace!("Ignoring return of {} to {} pool: not found", handle, self.class);
            return false;
        };

        let record = self.records[index];
        if !record.is_active {
            log::trace!("Ignoring return of {} to {} pool: already inactive", handle, self.class);
            return false;
        }

        self.factory.on_changed_state_in_pool(world, PoolObjectState::Inactive, record.object);
        self.factory.on_return_to_pool(world, record.object);
        self.records[index].is_active = false;
        self.stats.returned += 1;

        log::trace!("Returned {} {:?} ({})", self.class, record.object, handle);
        true
    }

    /// Force an object into `state` without taking or returning it through a caller
    ///
    /// Activation keeps the current placement and handle; deactivation is the
    /// same as [`return_object`](Self::return_object). Returns whether the
    /// state changed.
    pub fn set_state(&mut self, world: &mut dyn ObjectWorld, handle: PoolHandle, state: PoolObjectState) -> bool {
        match state {
            PoolObjectState::None => false,
            PoolObjectState::Inactive => self.return_object(world, handle),
            PoolObjectState::Active => {
                let Some(index) = self.index_of(handle) else {
                    return false;
                };
                if self.records[index].is_active {
                    return false;
                }

                let object = self.records[index].object;
                self.factory.on_changed_state_in_pool(world, PoolObjectState::Active, object);
                self.records[index].is_active = true;
                true
            }
        }
    }

    /// Construct `count` objects and leave them inactive in the pool
    ///
    /// Returns the handles of the new records.
    pub fn prespawn(&mut self, world: &mut dyn ObjectWorld, count: usize) -> Vec<PoolHandle> {
        let handles: Vec<PoolHandle> = (0..count)
            .map(|_| {
                let handle = self.spawn(world, &Transform::identity(), SpawnCallbacks::none());
                self.return_object(world, handle);
                handle
            })
            .collect();

        log::debug!("Prespawned {} {} objects ({} pooled)", count, self.class, self.records.len());
        handles
    }

    /// Destroy every object and forget every record
    ///
    /// Returns the number of destroyed objects.
    pub fn clear(&mut self, world: &mut dyn ObjectWorld) -> usize {
        let records = std::mem::take(&mut self.records);
        self.index.clear();

        for record in &records {
            self.factory.destroy(world, record.object);
        }

        self.stats.destroyed += records.len() as u64;
        self.capacity_warned = false;

        if !records.is_empty() {
            log::debug!("Cleared {} pool: destroyed {} objects", self.class, records.len());
        }
        records.len()
    }

    fn index_of(&self, handle: PoolHandle) -> Option<usize> {
        self.index.get(&handle).copied()
    }

    /// Record addressed by `handle`
    pub fn find(&self, handle: PoolHandle) -> Option<&PoolObjectData> {
        self.index_of(handle).map(|index| &self.records[index])
    }

    /// Record owning `object`
    pub fn find_by_object(&self, object: ObjectId) -> Option<&PoolObjectData> {
        self.records.iter().find(|record| record.object == object)
    }

    /// State of the object addressed by `handle`
    pub fn state_of(&self, handle: PoolHandle) -> PoolObjectState {
        self.find(handle).map_or(PoolObjectState::None, PoolObjectData::state)
    }

    /// Whether `handle` addresses a record of this pool
    pub fn contains(&self, handle: PoolHandle) -> bool {
        self.index_of(handle).is_some()
    }

    /// Every record, in scan order
    pub fn records(&self) -> impl Iterator<Item = &PoolObjectData> {
        self.records.iter()
    }

    /// Number of pooled objects, active or not
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the pool holds no objects
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of taken objects
    pub fn active_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_active).count()
    }

    /// Number of objects waiting for reuse
    pub fn inactive_count(&self) -> usize {
        self.len() - self.active_count()
    }

    /// Class pooled by this registry
    pub fn class(&self) -> ClassRef {
        self.class
    }

    /// Factory building this registry's objects
    pub fn factory(&self) -> &Rc<dyn PoolFactory> {
        &self.factory
    }

    /// Lifetime counters
    pub fn stats(&self) -> &PoolRegistryStats {
        &self.stats
    }
}

impl std::fmt::Debug for PoolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("class", &self.class.name())
            .field("factory", &self.factory)
            .field("records", &self.records)
            .field("stats", &self.stats)
            .finish()
    }
}
