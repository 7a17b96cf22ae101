//! Chunked slab allocator with generational handles.

use crate::error::{Error, Result};
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object stored in a `TypedArena<T>`.
///
/// A handle stays valid until the object it was issued for is freed. Freed slots are reused, but
/// every reuse bumps the slot's generation, so a stale handle never aliases the new occupant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
    generation: u64,
}

#[derive(Clone, Copy)]
struct Position {
    chunk_index: usize,
    block_index: usize,
}

#[derive(Clone)]
enum Block<T> {
    Occupied { generation: u64, value: T },
    Vacant { generation: u64, next: Option<Position> },
}

/// A fast allocator that only allocates a single type of object.
///
/// Objects are stored in fixed-size chunks so growing the arena never moves existing objects.
/// Deallocated blocks are chained into a free list and handed out again by later allocations. The
/// underlying storage is plain `Vec`s, so there is no unsafe code.
///
/// # Examples
///
/// ```
/// use splay_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1).unwrap();
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), Ok(2));
/// assert_eq!(arena.get(x), None);
/// ```
#[derive(Clone)]
pub struct TypedArena<T> {
    head: Option<Position>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
    limit: Option<usize>,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>` with a specific number of objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// // creates a new TypedArena<T> that contains a maximum of 1024 u32's per chunk
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
            capacity: 0,
            limit: None,
        }
    }

    /// Constructs a new, empty `TypedArena<T>` that refuses to hold more than `limit` objects at
    /// once.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    /// use splay_collections::Error;
    ///
    /// let mut arena = TypedArena::with_capacity_limit(16, 1);
    /// assert!(arena.allocate(0).is_ok());
    /// assert_eq!(arena.allocate(1), Err(Error::CapacityExceeded(1)));
    /// ```
    pub fn with_capacity_limit(chunk_size: usize, limit: usize) -> Self {
        let mut arena = Self::new(chunk_size);
        arena.limit = Some(limit);
        arena
    }

    fn block(&self, handle: Handle) -> Option<&Block<T>> {
        self.chunks
            .get(handle.chunk_index)
            .and_then(|chunk| chunk.get(handle.block_index))
    }

    fn block_mut(&mut self, handle: Handle) -> Option<&mut Block<T>> {
        self.chunks
            .get_mut(handle.chunk_index)
            .and_then(|chunk| chunk.get_mut(handle.block_index))
    }

    /// Allocates an object in the typed arena and returns a `Handle` to it. The handle can later
    /// be used to retrieve mutable and immutable references to the object, and to deallocate it.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0).unwrap();
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Result<Handle> {
        if let Some(limit) = self.limit {
            if self.len >= limit {
                return Err(Error::CapacityExceeded(limit));
            }
        }

        if self.len == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.len += 1;

        match self.head.take() {
            None => {
                let chunk_count = self.chunks.len();
                let last_chunk = &mut self.chunks[chunk_count - 1];
                last_chunk.push(Block::Occupied {
                    generation: 0,
                    value,
                });
                Ok(Handle {
                    chunk_index: chunk_count - 1,
                    block_index: last_chunk.len() - 1,
                    generation: 0,
                })
            },
            Some(position) => {
                let block = &mut self.chunks[position.chunk_index][position.block_index];
                let (generation, next) = match *block {
                    Block::Vacant { generation, next } => (generation, next),
                    Block::Occupied { .. } => unreachable!(),
                };
                *block = Block::Occupied { generation, value };
                self.head = next;
                Ok(Handle {
                    chunk_index: position.chunk_index,
                    block_index: position.block_index,
                    generation,
                })
            },
        }
    }

    /// Deallocates an object in the typed arena and returns the object.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidHandle` if the handle was never issued by this arena and
    /// `Error::StaleHandle` if the object it referred to was already freed.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    /// use splay_collections::Error;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0).unwrap();
    /// assert_eq!(arena.free(x), Ok(0));
    /// assert_eq!(arena.free(x), Err(Error::StaleHandle));
    /// ```
    pub fn free(&mut self, handle: Handle) -> Result<T> {
        let head = self.head;
        let block = self.block_mut(handle).ok_or(Error::InvalidHandle)?;
        match *block {
            Block::Occupied { generation, .. } if generation == handle.generation => {},
            _ => return Err(Error::StaleHandle),
        }

        let old_block = mem::replace(
            block,
            Block::Vacant {
                generation: handle.generation.wrapping_add(1),
                next: head,
            },
        );
        self.len -= 1;
        self.head = Some(Position {
            chunk_index: handle.chunk_index,
            block_index: handle.block_index,
        });
        match old_block {
            Block::Occupied { value, .. } => Ok(value),
            Block::Vacant { .. } => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the typed arena. Returns `None` if the
    /// handle does not correspond to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.block(handle) {
            Some(Block::Occupied { generation, value }) if *generation == handle.generation => {
                Some(value)
            },
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the typed arena. Returns `None` if the handle
    /// does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0).unwrap();
    /// *arena.get_mut(x).unwrap() = 5;
    /// assert_eq!(arena.get(x), Some(&5));
    /// ```
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.block_mut(handle) {
            Some(Block::Occupied { generation, value }) if *generation == handle.generation => {
                Some(value)
            },
            _ => None,
        }
    }

    /// Returns `true` if the handle refers to a live object.
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object and releases all chunks. Handles issued before the call become invalid.
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.len = 0;
        self.capacity = 0;
    }

    /// Returns an iterator over all live objects and their handles, in storage order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.chunks
            .iter_mut()
            .enumerate()
            .flat_map(|(chunk_index, chunk)| {
                chunk.iter_mut().enumerate().filter_map(move |(block_index, block)| {
                    match block {
                        Block::Occupied { generation, value } => Some((
                            Handle {
                                chunk_index,
                                block_index,
                                generation: *generation,
                            },
                            value,
                        )),
                        Block::Vacant { .. } => None,
                    }
                })
            })
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
