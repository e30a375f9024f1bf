//! Pool handles
//!
//! Callers address pooled objects through handles, never through object
//! references. Handles come from one allocator per manager, so they are
//! unique across every pool of that manager.

use std::cell::Cell;
use std::rc::Rc;

/// Handle to one pooled slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolHandle(u64);

impl PoolHandle {
    /// Create an invalid pool handle
    pub fn invalid() -> Self {
        Self(u64::MAX)
    }

    /// Check if this handle is valid
    pub fn is_valid(&self) -> bool {
        self.0 != u64::MAX
    }

    /// Raw handle value
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl Default for PoolHandle {
    fn default() -> Self {
        Self::invalid()
    }
}

impl std::fmt::Display for PoolHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#invalid")
        }
    }
}

/// Source of fresh handles, shared by every pool of one manager
///
/// Cloning yields another view of the same counter.
#[derive(Debug, Clone, Default)]
pub struct HandleAllocator {
    next_id: Rc<Cell<u64>>,
}

impl HandleAllocator {
    /// Create an allocator starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new unique handle
    ///
    /// # Panics
    ///
    /// If every id below the invalid sentinel has been handed out.
    pub fn allocate(&self) -> PoolHandle {
        let id = self.next_id.get();
        assert!(id != u64::MAX, "[HandleAllocator::allocate] handle space exhausted");
        self.next_id.set(id + 1);
        PoolHandle(id)
    }

    #[cfg(test)]
    fn starting_at(id: u64) -> Self {
        Self {
            next_id: Rc::new(Cell::new(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_handle() {
        assert!(!PoolHandle::invalid().is_valid());
        assert_eq!(PoolHandle::default(), PoolHandle::invalid());
        assert_eq!(PoolHandle::invalid().to_string(), "#invalid");
    }

    #[test]
    fn test_clones_share_counter() {
        let allocator = HandleAllocator::new();
        let other = allocator.clone();

        let a = allocator.allocate();
        let b = other.allocate();
        let c = allocator.allocate();

        assert!(a.is_valid() && b.is_valid() && c.is_valid());
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(c.id(), 2);
    }

    #[test]
    fn test_last_handle_before_sentinel_is_valid() {
        let allocator = HandleAllocator::starting_at(u64::MAX - 1);
        assert!(allocator.allocate().is_valid());
    }

    #[test]
    #[should_panic(expected = "handle space exhausted")]
    fn test_exhausted_allocator_panics() {
        let allocator = HandleAllocator::starting_at(u64::MAX - 1);
        allocator.allocate();
        allocator.allocate();
    }
}
