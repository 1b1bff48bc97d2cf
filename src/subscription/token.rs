//! # Subscription: composable, idempotent teardown handle
//!
//! A [`Subscription`] represents "work that can be torn down". Tokens compose into
//! trees: closing a parent closes every child currently attached to it, then runs
//! the parent's own teardown.
//!
//! ## Rules
//! - `close()` is idempotent; the teardown runs **exactly once**.
//! - Children are closed before the token's own teardown runs.
//! - Adding a child to an already-closed token closes the child immediately.
//! - Adding an already-closed child is a no-op.
//! - A closed child detaches itself from every parent, so long-lived parents do
//!   not accumulate dead children.
//! - Cycles are forbidden (caller discipline; not checked at runtime).
//!
//! ## Diagram
//! ```text
//! overall ─┬─► openings subscriber
//!          ├─► main subscriber
//!          ├─► closing #1 ──► closing subscriber #1
//!          └─► closing #2 ──► closing subscriber #2
//!
//! overall.close() → closes every branch (depth-first), then runs overall teardown
//! closing #1.close() → tears down only that branch and detaches it from overall
//! ```
//!
//! ## Example
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use streamvisor::Subscription;
//!
//! let hits = Rc::new(Cell::new(0));
//! let parent = Subscription::new();
//! let h = hits.clone();
//! parent.add_teardown(move || h.set(h.get() + 1));
//!
//! parent.close();
//! parent.close(); // no-op
//! assert_eq!(hits.get(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use super::guard::SubscriptionGuard;

/// Global id counter for subscription identity.
static SUBSCRIPTION_SEQ: AtomicU64 = AtomicU64::new(0);

type Teardown = Box<dyn FnOnce()>;

struct Node {
    id: u64,
    closed: Cell<bool>,
    children: RefCell<HashMap<u64, Subscription>>,
    parents: RefCell<Vec<Weak<Node>>>,
    teardown: RefCell<Option<Teardown>>,
}

/// Cancellation token with child composition.
///
/// Cheap to clone: clones share the same underlying node.
#[derive(Clone)]
pub struct Subscription {
    node: Rc<Node>,
}

impl Subscription {
    /// Creates an open token without a teardown.
    #[must_use]
    pub fn new() -> Self {
        Self::from_teardown(None)
    }

    /// Creates an open token that runs `teardown` when closed.
    #[must_use]
    pub fn with_teardown(teardown: impl FnOnce() + 'static) -> Self {
        Self::from_teardown(Some(Box::new(teardown)))
    }

    fn from_teardown(teardown: Option<Teardown>) -> Self {
        Self {
            node: Rc::new(Node {
                id: SUBSCRIPTION_SEQ.fetch_add(1, Ordering::Relaxed),
                closed: Cell::new(false),
                children: RefCell::new(HashMap::new()),
                parents: RefCell::new(Vec::new()),
                teardown: RefCell::new(teardown),
            }),
        }
    }

    /// Unique id of this token (shared by all clones).
    #[inline]
    pub fn id(&self) -> u64 {
        self.node.id
    }

    /// True once [`close`](Self::close) has been called.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.node.closed.get()
    }

    /// Number of children currently attached.
    pub fn child_count(&self) -> usize {
        self.node.children.borrow().len()
    }

    /// Registers `child` as a dependent of this token.
    ///
    /// - `child` already closed → no-op.
    /// - `self` already closed → `child` is closed immediately.
    pub fn add(&self, child: &Subscription) {
        if child.is_closed() || Rc::ptr_eq(&self.node, &child.node) {
            return;
        }
        if self.is_closed() {
            child.close();
            return;
        }

        let prev = self
            .node
            .children
            .borrow_mut()
            .insert(child.node.id, child.clone());
        if prev.is_none() {
            child
                .node
                .parents
                .borrow_mut()
                .push(Rc::downgrade(&self.node));
        }
    }

    /// Attaches a new child whose only job is to run `teardown`.
    ///
    /// Returns the child so the caller can remove or close it early.
    pub fn add_teardown(&self, teardown: impl FnOnce() + 'static) -> Subscription {
        let child = Subscription::with_teardown(teardown);
        self.add(&child);
        child
    }

    /// Detaches `child` without closing it.
    pub fn remove(&self, child: &Subscription) {
        let removed = self.node.children.borrow_mut().remove(&child.node.id);
        if removed.is_some() {
            let me = Rc::as_ptr(&self.node);
            child
                .node
                .parents
                .borrow_mut()
                .retain(|p| !std::ptr::eq(p.as_ptr(), me));
        }
    }

    /// Closes this token.
    ///
    /// On the first call: marks closed, detaches from parents, closes a snapshot
    /// of the children, then runs the teardown. Later calls do nothing.
    pub fn close(&self) {
        if self.node.closed.replace(true) {
            return;
        }

        let parents = std::mem::take(&mut *self.node.parents.borrow_mut());
        for parent in parents {
            if let Some(parent) = parent.upgrade() {
                parent.children.borrow_mut().remove(&self.node.id);
            }
        }

        let children: Vec<Subscription> = std::mem::take(&mut *self.node.children.borrow_mut())
            .into_values()
            .collect();
        for child in children {
            child.close();
        }

        let teardown = self.node.teardown.borrow_mut().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    /// Wraps the token in a guard that closes it on drop.
    #[must_use]
    pub fn drop_guard(self) -> SubscriptionGuard {
        SubscriptionGuard::new(self)
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Subscription {}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.node.id)
            .field("closed", &self.is_closed())
            .field("children", &self.child_count())
            .finish()
    }
}
