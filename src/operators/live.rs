//! # Live-buffer set.
//!
//! Ordered collection of open buffers. Storage is a slab of slots threaded by
//! an intrusive doubly-linked list, so any buffer can be removed in O(1) while
//! iteration and draining still follow creation order.
//!
//! ```text
//! slots:  [0: b2] [1: free] [2: b0] [3: b1]
//! list:   head ─► 2 ─► 3 ─► 0 ◄─ tail        free: [1]
//! ```
//!
//! ## Rules
//! - A [`BufferId`] names one buffer for its whole life; a reused slot gets a
//!   new generation, so stale ids never match.
//! - `remove(id)` succeeds at most once per id (a buffer is flushed at most once).
//! - `pop_oldest()` drains in creation order (FIFO).

use std::fmt;

use crate::subscription::Subscription;

/// One open buffer and the token owning its closing subscription.
#[derive(Debug)]
pub(crate) struct Buffer<T> {
    pub(crate) values: Vec<T>,
    pub(crate) closing: Subscription,
}

/// Handle of a buffer inside a [`LiveBuffers`] set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BufferId {
    index: usize,
    generation: u64,
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Node<T> {
    buffer: Buffer<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    node: Option<Node<T>>,
}

/// Creation-ordered set of open buffers with O(1) removal.
#[derive(Debug)]
pub(crate) struct LiveBuffers<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> LiveBuffers<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Appends a buffer at the tail and returns its id.
    pub(crate) fn open(&mut self, values: Vec<T>, closing: Subscription) -> BufferId {
        let node = Node {
            buffer: Buffer { values, closing },
            prev: self.tail,
            next: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };

        match self.tail.and_then(|t| self.slots[t].node.as_mut()) {
            Some(last) => last.next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;

        BufferId {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Removes the buffer with `id`, if it is still live.
    pub(crate) fn remove(&mut self, id: BufferId) -> Option<Buffer<T>> {
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        self.unlink(id.index)
    }

    /// Removes the earliest-created live buffer.
    pub(crate) fn pop_oldest(&mut self) -> Option<Buffer<T>> {
        let head = self.head?;
        self.unlink(head)
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    fn unlink(&mut self, index: usize) -> Option<Buffer<T>> {
        let slot = &mut self.slots[index];
        let node = slot.node.take()?;
        slot.generation += 1;
        self.free.push(index);
        self.len -= 1;

        match node.prev.and_then(|p| self.slots[p].node.as_mut()) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|n| self.slots[n].node.as_mut()) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node.buffer)
    }
}

impl<T: Clone> LiveBuffers<T> {
    /// Appends `value` to every live buffer, in creation order.
    pub(crate) fn push_all(&mut self, value: &T) {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let Some(node) = self.slots[index].node.as_mut() else {
                break;
            };
            node.buffer.values.push(value.clone());
            cursor = node.next;
        }
    }
}
