//! # Object Identifiers
//!
//! Identifiers handed out by the world when an object is registered:
//! - An index into the world's slot table
//! - A generation counter so a recycled slot never answers to a stale ID

/// World-assigned identifier of a registered object.
///
/// The ID is split into two parts:
/// - Lower 32 bits: Slot index
/// - Upper 32 bits: Generation counter for detecting stale references
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Creates an ID from slot index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Null/invalid object ID, also used for "no dealer".
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this ID is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_parts() {
        let id = ObjectId::new(12345, 678);
        assert_eq!(id.index(), 12345);
        assert_eq!(id.generation(), 678);
        assert!(!id.is_null());
    }

    #[test]
    fn test_null_id() {
        assert!(ObjectId::NULL.is_null());
        assert_eq!(ObjectId::default(), ObjectId::NULL);
    }

    #[test]
    fn test_generation_distinguishes_reuse() {
        assert_ne!(ObjectId::new(3, 1), ObjectId::new(3, 2));
    }
}
