//! Copy-on-write platter buffers
//!
//! Backing storage for heap arrays in which a buffer is shared by value
//! until the first mutation. Reads go straight to the shared buffer; any
//! mutating operation first uniquifies: if the buffer has more than one
//! referent it is replaced by an owned deep copy, then mutated.
//!
//! The load-program operator exploits this: installing a shared reference
//! as array 0 is a reference-count bump instead of a linear copy.
//!
//! The machine is single-threaded, so plain `Rc` reference counts suffice.
//! A multi-threaded variant would substitute `Arc` and a compare-and-set
//! uniquify.

use std::rc::Rc;
use um32_spec::Platter;

/// Reference-counted platter buffer with uniquify-on-mutate
#[derive(Debug, Clone)]
pub struct CowVec {
    data: Rc<Vec<Platter>>,
}

impl CowVec {
    /// Fresh zeroed buffer of `len` platters
    pub fn zeroed(len: usize) -> Self {
        CowVec {
            data: Rc::new(vec![0; len]),
        }
    }

    pub fn from_vec(words: Vec<Platter>) -> Self {
        CowVec {
            data: Rc::new(words),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Platter> {
        self.data.get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Platter] {
        &self.data
    }

    /// Write one element, uniquifying first if the buffer is shared.
    ///
    /// Caller guarantees bounds.
    #[inline]
    pub fn set(&mut self, index: usize, value: Platter) {
        Rc::make_mut(&mut self.data)[index] = value;
    }

    /// Empty the buffer.
    ///
    /// A shared buffer is swapped for a fresh empty one so other referents
    /// keep the old contents; a unique buffer is cleared in place.
    pub fn clear(&mut self) {
        match Rc::get_mut(&mut self.data) {
            Some(owned) => owned.clear(),
            None => self.data = Rc::new(Vec::new()),
        }
    }

    /// Share the buffer: a reference-count bump, no copy.
    pub fn share(&self) -> Self {
        CowVec {
            data: Rc::clone(&self.data),
        }
    }

    /// Owned copy of the current contents, independent of all referents.
    pub fn deep_copy(&self) -> Self {
        CowVec {
            data: Rc::new(self.data.as_ref().clone()),
        }
    }

    /// Current referent count (exposed for tests)
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed() {
        let buf = CowVec::zeroed(4);
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_share_bumps_ref_count() {
        let buf = CowVec::from_vec(vec![1, 2, 3]);
        assert_eq!(buf.ref_count(), 1);
        let shared = buf.share();
        assert_eq!(buf.ref_count(), 2);
        assert_eq!(shared.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_set_uniquifies_shared_buffer() {
        let original = CowVec::from_vec(vec![10, 20, 30]);
        let mut shared = original.share();

        shared.set(1, 99);

        // Mutation detached the sharer; the original is untouched
        assert_eq!(shared.as_slice(), &[10, 99, 30]);
        assert_eq!(original.as_slice(), &[10, 20, 30]);
        assert_eq!(original.ref_count(), 1);
        assert_eq!(shared.ref_count(), 1);
    }

    #[test]
    fn test_set_in_place_when_unique() {
        let mut buf = CowVec::from_vec(vec![1, 2]);
        buf.set(0, 5);
        assert_eq!(buf.as_slice(), &[5, 2]);
        assert_eq!(buf.ref_count(), 1);
    }

    #[test]
    fn test_clear_shared_keeps_other_referents() {
        let original = CowVec::from_vec(vec![7, 8]);
        let mut shared = original.share();

        shared.clear();

        assert!(shared.is_empty());
        assert_eq!(original.as_slice(), &[7, 8]);
    }

    #[test]
    fn test_clear_unique_in_place() {
        let mut buf = CowVec::from_vec(vec![7, 8]);
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let original = CowVec::from_vec(vec![1, 2, 3]);
        let mut copy = original.deep_copy();
        assert_eq!(original.ref_count(), 1);

        copy.set(0, 100);
        assert_eq!(original.as_slice(), &[1, 2, 3]);
        assert_eq!(copy.as_slice(), &[100, 2, 3]);
    }

    #[test]
    fn test_get_bounds() {
        let buf = CowVec::from_vec(vec![42]);
        assert_eq!(buf.get(0), Some(42));
        assert_eq!(buf.get(1), None);
    }
}
