//! Array heap for the UM-32
//!
//! The heap owns every array; registers and the execution finger hold only
//! integer handles and indices, never pointers. Handle 0 is reserved for
//! the executing program and is never placed on the free list.
//!
//! Freed handles are recycled LIFO: the most recently abandoned handle is
//! the next one allocation returns. The heap grows by appending only when
//! the free list is empty, so the appended handle equals the prior total
//! count.

use crate::cow::CowVec;
use crate::error::{Result, RuntimeError};
use um32_spec::{Platter, PROGRAM_HANDLE};

/// Heap of platter arrays addressed by integer handles
#[derive(Debug)]
pub struct ArrayHeap {
    /// Every array ever allocated, indexed by handle. Abandoned slots are
    /// cleared and their handles sit on the free list until reuse.
    arrays: Vec<CowVec>,

    /// LIFO pool of handles available for reuse
    free_list: Vec<Platter>,

    /// Load-program installs a shared reference instead of a deep copy
    share_on_load: bool,
}

impl ArrayHeap {
    /// Create a heap whose array 0 holds the given program.
    pub fn new(program: Vec<Platter>, share_on_load: bool) -> Self {
        ArrayHeap {
            arrays: vec![CowVec::from_vec(program)],
            free_list: Vec::new(),
            share_on_load,
        }
    }

    /// Allocate a fresh array of `size` zero platters.
    ///
    /// Reuses the most recently abandoned handle when one is available,
    /// otherwise appends. The returned handle is never 0.
    pub fn allocate(&mut self, size: Platter) -> Platter {
        match self.free_list.pop() {
            Some(handle) => {
                self.arrays[handle as usize] = CowVec::zeroed(size as usize);
                handle
            }
            None => {
                self.arrays.push(CowVec::zeroed(size as usize));
                (self.arrays.len() - 1) as Platter
            }
        }
    }

    /// Release the array at `handle` and recycle the handle.
    ///
    /// The storage is emptied immediately, so a later reuse of the handle
    /// always starts from zeroed contents.
    pub fn abandon(&mut self, handle: Platter) -> Result<()> {
        if handle == PROGRAM_HANDLE {
            return Err(RuntimeError::AbandonProgramArray);
        }
        if handle as usize >= self.arrays.len() {
            return Err(RuntimeError::InvalidHandle { handle });
        }
        self.arrays[handle as usize].clear();
        self.free_list.push(handle);
        Ok(())
    }

    /// Read element `index` of the array at `handle`.
    pub fn load(&self, handle: Platter, index: Platter) -> Result<Platter> {
        let array = self.array(handle)?;
        array
            .get(index as usize)
            .ok_or(RuntimeError::IndexOutOfBounds {
                handle,
                index,
                len: array.len(),
            })
    }

    /// Write `value` into element `index` of the array at `handle`.
    pub fn store(&mut self, handle: Platter, index: Platter, value: Platter) -> Result<()> {
        let array = self.array_mut(handle)?;
        if index as usize >= array.len() {
            return Err(RuntimeError::IndexOutOfBounds {
                handle,
                index,
                len: array.len(),
            });
        }
        array.set(index as usize, value);
        Ok(())
    }

    /// Replace array 0 with a value-level copy of the array at `handle`.
    ///
    /// A no-op on contents when `handle` is 0. With `share_on_load` the
    /// program array becomes a shared reference and physical separation is
    /// deferred until either side mutates; otherwise the copy is made
    /// eagerly. Either way, later amendments to one side never affect the
    /// other.
    pub fn load_program(&mut self, handle: Platter) -> Result<()> {
        if handle == PROGRAM_HANDLE {
            return Ok(());
        }
        let source = self.array(handle)?;
        self.arrays[PROGRAM_HANDLE as usize] = if self.share_on_load {
            source.share()
        } else {
            source.deep_copy()
        };
        Ok(())
    }

    /// Length of the array at `handle`.
    ///
    /// No operator consumes this; it exists for tooling and embedders.
    pub fn length(&self, handle: Platter) -> Result<Platter> {
        Ok(self.array(handle)?.len() as Platter)
    }

    /// Direct view of the program array, for the fetch path.
    #[inline]
    pub fn program(&self) -> &[Platter] {
        self.arrays[PROGRAM_HANDLE as usize].as_slice()
    }

    /// Total number of heap slots, live or recyclable (including array 0)
    pub fn array_count(&self) -> usize {
        self.arrays.len()
    }

    /// Number of handles waiting on the free list
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    fn array(&self, handle: Platter) -> Result<&CowVec> {
        self.arrays
            .get(handle as usize)
            .ok_or(RuntimeError::InvalidHandle { handle })
    }

    fn array_mut(&mut self, handle: Platter) -> Result<&mut CowVec> {
        self.arrays
            .get_mut(handle as usize)
            .ok_or(RuntimeError::InvalidHandle { handle })
    }
}
