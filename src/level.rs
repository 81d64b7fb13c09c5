use std::{borrow::Borrow, cmp::Ordering, iter::FusedIterator};

// ////////////////////////////////////////////////////////////////////////////
// NodeRef
// ////////////////////////////////////////////////////////////////////////////

/// A handle to a node owned by some [`Level`].
///
/// Handles are how a node refers to its counterpart one level down. They never
/// own anything: the node stays owned by its level's arena and a handle to it
/// is just its slot and the generation of that slot at the time the handle
/// was made. Removing a node bumps the generation of its slot, so an old
/// handle can always be told apart from a live one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeRef {
    slot: usize,
    generation: u32,
}

// ////////////////////////////////////////////////////////////////////////////
// Node
// ////////////////////////////////////////////////////////////////////////////

/// One occurrence of a key on one level.
#[derive(Clone, Debug)]
struct Node<T> {
    key: T,
    // Slot of the next node in the same level.  Forward links always point at
    // live slots.
    next: Option<usize>,
    // The node with the same key one level below.  Absent on level 0.
    down: Option<NodeRef>,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

// ////////////////////////////////////////////////////////////////////////////
// Search
// ////////////////////////////////////////////////////////////////////////////

/// Outcome of [`Level::search`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Search {
    /// The key is present on this level.
    Found,
    /// The key is not present on this level.
    ///
    /// If the search passed a node with a link to the level below, `hint` is
    /// that link: a node whose key is smaller than the one searched for, from
    /// which the search on the level below can start.
    Missing { hint: Option<NodeRef> },
}

// ////////////////////////////////////////////////////////////////////////////
// Level
// ////////////////////////////////////////////////////////////////////////////

/// A single level of the skipset: an ascending, singly-linked chain of nodes.
///
/// The level owns all of its nodes through an arena of slots. Vacated slots
/// are recycled for later insertions.
#[derive(Clone, Debug)]
pub(crate) struct Level<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    len: usize,
}

impl<T> Default for Level<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Level<T> {
    /// Create an empty level.
    pub(crate) fn new() -> Self {
        Level {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Number of nodes in the chain.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Drop every node of the chain.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.len = 0;
    }

    /// Iterate over the keys of the chain in ascending order.
    pub(crate) fn iter(&self) -> Keys<'_, T> {
        Keys {
            level: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn get(&self, slot: usize) -> Option<&Node<T>> {
        self.slots.get(slot)?.node.as_ref()
    }

    /// Point the forward link of the node in `slot` at `next`.
    fn link(&mut self, slot: usize, next: Option<usize>) {
        if let Some(node) = self.slots.get_mut(slot).and_then(|s| s.node.as_mut()) {
            node.next = next;
        }
    }

    /// Look up the node behind `node`, provided it is still alive.
    fn resolve(&self, node: NodeRef) -> Option<&Node<T>> {
        let slot = self.slots.get(node.slot)?;
        if slot.generation == node.generation {
            slot.node.as_ref()
        } else {
            None
        }
    }

    fn handle(&self, slot: usize) -> Option<NodeRef> {
        self.slots.get(slot).map(|s| NodeRef {
            slot,
            generation: s.generation,
        })
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        if let Some(slot) = self.free.pop() {
            if let Some(s) = self.slots.get_mut(slot) {
                s.node = Some(node);
                return slot;
            }
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        self.slots.len() - 1
    }

    fn release(&mut self, slot: usize) -> Option<Node<T>> {
        let s = self.slots.get_mut(slot)?;
        let node = s.node.take()?;
        s.generation = s.generation.wrapping_add(1);
        self.free.push(slot);
        Some(node)
    }
}

impl<T> Level<T>
where
    T: Ord,
{
    /// Insert `key` into the chain, keeping it in ascending order, and give
    /// the new node `down` as its link to the level below.
    ///
    /// Returns a handle to the new node, or `None` if the chain already holds
    /// `key`, in which case the level is left untouched.
    pub(crate) fn insert(&mut self, key: T, down: Option<NodeRef>) -> Option<NodeRef> {
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let Some(node) = self.get(slot) else {
                break;
            };
            match node.key.cmp(&key) {
                Ordering::Less => {
                    prev = Some(slot);
                    cursor = node.next;
                }
                Ordering::Equal => return None,
                Ordering::Greater => break,
            }
        }

        let slot = self.alloc(Node {
            key,
            next: cursor,
            down,
        });
        match prev {
            Some(prev) => self.link(prev, Some(slot)),
            None => self.head = Some(slot),
        }
        self.len += 1;
        self.handle(slot)
    }

    /// Unlink and drop the node holding `key`, if there is one.
    ///
    /// Returns whether a node was removed.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let Some(node) = self.get(slot) else {
                return false;
            };
            match node.key.borrow().cmp(key) {
                Ordering::Less => {
                    prev = Some(slot);
                    cursor = node.next;
                }
                Ordering::Equal => {
                    let next = node.next;
                    match prev {
                        Some(prev) => self.link(prev, next),
                        None => self.head = next,
                    }
                    self.release(slot);
                    self.len -= 1;
                    return true;
                }
                Ordering::Greater => return false,
            }
        }
        false
    }

    /// Look for `key`, starting at `start` if given and at the head otherwise.
    ///
    /// A `start` which no longer refers to a live node of this level, or whose
    /// key is greater than `key`, is ignored and the search starts at the
    /// head instead. Hints only ever make the search shorter, they never
    /// change its outcome.
    pub(crate) fn search<Q>(&self, key: &Q, start: Option<NodeRef>) -> Search
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = start
            .and_then(|start| {
                let node = self.resolve(start)?;
                (node.key.borrow() <= key).then_some(start.slot)
            })
            .or(self.head);

        let mut last: Option<&Node<T>> = None;
        while let Some(slot) = cursor {
            let Some(node) = self.get(slot) else {
                break;
            };
            match node.key.borrow().cmp(key) {
                Ordering::Less => {
                    last = Some(node);
                    cursor = node.next;
                }
                Ordering::Equal => return Search::Found,
                Ordering::Greater => break,
            }
        }
        Search::Missing {
            hint: last.and_then(|node| node.down),
        }
    }
}

#[cfg(test)]
impl<T> Level<T> {
    /// The keys of the chain along with the link of each node to the level
    /// below.
    pub(crate) fn links(&self) -> Vec<(&T, Option<NodeRef>)> {
        let mut links = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(node) = cursor.and_then(|slot| self.get(slot)) {
            links.push((&node.key, node.down));
            cursor = node.next;
        }
        links
    }

    /// The key held by `node`, if it is still alive.
    pub(crate) fn key_of(&self, node: NodeRef) -> Option<&T> {
        self.resolve(node).map(|n| &n.key)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Keys
// ////////////////////////////////////////////////////////////////////////////

/// Ascending iterator over the keys of a [`Level`].
pub(crate) struct Keys<'a, T> {
    level: &'a Level<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Keys<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.level.get(self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Keys<'_, T> {}

impl<T> FusedIterator for Keys<'_, T> {}
