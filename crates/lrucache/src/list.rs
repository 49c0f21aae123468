//! Recency list backed by a slab of nodes
//!
//! Nodes live in a `Vec` and link to each other by slot index, so a
//! [`NodeRef`] stays valid while its node is moved around the list. Freed
//! slots go on a free list and are reused by later pushes; every slot carries
//! a generation so a handle to a freed slot is caught instead of silently
//! aliasing whatever was stored there next.

/// Stable handle to a node in a [`RecencyList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    slot: usize,
    generation: u32,
}

impl NodeRef {
    /// Slab slot this handle points at
    pub(crate) fn slot(&self) -> usize {
        self.slot
    }
}

struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Doubly-linked list ordered from most recently used (head) to least
/// recently used (tail)
///
/// The list has no notion of keys. Callers hold on to the [`NodeRef`]
/// returned by [`push_front`](Self::push_front) and hand it back to
/// reposition or remove the entry in O(1).
///
/// # Panics
///
/// Every operation taking a [`NodeRef`] panics if the handle is stale (its
/// node was removed) or does not belong to this list.
pub struct RecencyList<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list has no nodes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most recently used node
    pub fn head(&self) -> Option<NodeRef> {
        self.head.map(|slot| self.node_ref(slot))
    }

    /// Least recently used node
    pub fn tail(&self) -> Option<NodeRef> {
        self.tail.map(|slot| self.node_ref(slot))
    }

    /// Insert `value` as the new head
    pub fn push_front(&mut self, value: T) -> NodeRef {
        let slot = self.alloc_slot();
        self.slots[slot].node = Some(Node {
            value,
            prev: None,
            next: None,
        });
        self.link_front(slot);
        self.len += 1;

        self.node_ref(slot)
    }

    /// Move `node` to the head. No-op if it already is the head.
    pub fn move_to_front(&mut self, node: NodeRef) {
        let slot = self.check(node);
        if self.head == Some(slot) {
            return;
        }

        self.unlink(slot);
        self.link_front(slot);
    }

    /// Detach `node` and return its value
    pub fn remove(&mut self, node: NodeRef) -> T {
        let slot = self.check(node);
        self.unlink(slot);
        self.release(slot)
    }

    /// Detach the tail and return its value
    pub fn pop_back(&mut self) -> Option<T> {
        let slot = self.tail?;
        self.unlink(slot);
        Some(self.release(slot))
    }

    /// Borrow the value held by `node`
    pub fn get(&self, node: NodeRef) -> &T {
        let slot = self.check(node);
        &self.node(slot).value
    }

    /// Mutably borrow the value held by `node`
    pub fn get_mut(&mut self, node: NodeRef) -> &mut T {
        let slot = self.check(node);
        &mut self.node_mut(slot).value
    }

    /// Iterate from head (most recent) to tail (least recent)
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Drop every node
    ///
    /// Slots are kept and their generations bumped, so handles taken before
    /// the clear stay detectable as stale.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if entry.node.take().is_some() {
                entry.generation = entry.generation.wrapping_add(1);
            }
            self.free_list.push(slot);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn node_ref(&self, slot: usize) -> NodeRef {
        NodeRef {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    fn check(&self, node: NodeRef) -> usize {
        match self.slots.get(node.slot) {
            Some(slot) if slot.generation == node.generation && slot.node.is_some() => node.slot,
            _ => panic!("stale or foreign node reference: {:?}", node),
        }
    }

    fn node(&self, slot: usize) -> &Node<T> {
        match &self.slots[slot].node {
            Some(node) => node,
            None => unreachable!("linked slot {} is free", slot),
        }
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        match &mut self.slots[slot].node {
            Some(node) => node,
            None => unreachable!("linked slot {} is free", slot),
        }
    }

    fn link_front(&mut self, slot: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(slot);
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head) => self.node_mut(head).prev = Some(slot),
            None => self.tail = Some(slot),
        }

        self.head = Some(slot);
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = {
            let node = self.node(slot);
            (node.prev, node.next)
        };

        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }

        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    fn alloc_slot(&mut self) -> usize {
        if let Some(slot) = self.free_list.pop() {
            slot
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: None,
            });
            self.slots.len() - 1
        }
    }

    fn release(&mut self, slot: usize) -> T {
        let entry = &mut self.slots[slot];
        let node = match entry.node.take() {
            Some(node) => node,
            None => unreachable!("released slot {} twice", slot),
        };
        entry.generation = entry.generation.wrapping_add(1);
        self.free_list.push(slot);
        self.len -= 1;

        node.value
    }
}

/// Iterator over a [`RecencyList`], head to tail
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
