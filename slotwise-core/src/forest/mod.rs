//! Disjoint-set forest over time slots, augmented with an available slot.
//!
//! Slots are stored in a flat arena and refer to their parents by index. Each
//! set describes a run of consumed slots together with the one slot in that
//! run that is still free; the root of the set records which slot that is.
//! Non-root records hold a possibly stale copy that is refreshed whenever
//! [`SlotForest::find`] compresses a path through them.

use std::num::NonZeroUsize;

/// One unit-time slot record in a [`SlotForest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    parent: usize,
    rank: u8,
    available_slot: usize,
}

impl Slot {
    const fn singleton(index: usize) -> Self {
        Self {
            parent: index,
            rank: 0,
            available_slot: index,
        }
    }

    /// Index of this slot's parent; equal to its own index for roots.
    #[must_use]
    pub const fn parent(&self) -> usize {
        self.parent
    }

    /// Upper bound on the height of the tree rooted here.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    /// Recorded available slot.
    ///
    /// Only authoritative on roots. Resolve through
    /// [`SlotForest::available_slot`] for anything else.
    #[must_use]
    pub const fn available_slot(&self) -> usize {
        self.available_slot
    }
}

/// Union-find forest whose sets each own exactly one free time slot.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use slotwise_core::SlotForest;
///
/// let slots = NonZeroUsize::new(4).expect("non-zero");
/// let mut forest = SlotForest::new(slots);
/// assert_eq!(forest.find(2), 2);
///
/// // Slot 2 is taken: fold it into the set owning slot 1.
/// forest.unite(2, 1);
/// assert_eq!(forest.available_slot(2), 1);
/// assert_eq!(forest.set_count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct SlotForest {
    slots: Vec<Slot>,
    sets: usize,
}

impl SlotForest {
    /// Creates `len` singleton sets, each slot being its own available slot.
    #[must_use]
    pub fn new(len: NonZeroUsize) -> Self {
        Self {
            slots: (0..len.get()).map(Slot::singleton).collect(),
            sets: len.get(),
        }
    }

    /// Number of slots tracked by the forest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`; a forest holds at least one slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of disjoint sets, which equals the number of free slots.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Returns the raw record for `index` without resolving its root.
    ///
    /// # Panics
    /// Panics when `index` is outside the forest.
    #[must_use]
    pub fn slot(&self, index: usize) -> &Slot {
        self.check_index(index);
        &self.slots[index]
    }

    /// Returns the root of the set containing `index`.
    ///
    /// Every record on the path is re-pointed at the root and receives the
    /// root's available slot, so a later read at any of them sees the current
    /// value without walking the tree again.
    ///
    /// # Panics
    /// Panics when `index` is outside the forest.
    pub fn find(&mut self, index: usize) -> usize {
        self.check_index(index);

        let mut root = index;
        while self.slots[root].parent != root {
            root = self.slots[root].parent;
        }

        let available = self.slots[root].available_slot;
        let mut node = index;
        while node != root {
            let next = self.slots[node].parent;
            let record = &mut self.slots[node];
            record.parent = root;
            record.available_slot = available;
            node = next;
        }

        root
    }

    /// Returns the free slot of the set containing `index`.
    ///
    /// # Panics
    /// Panics when `index` is outside the forest.
    pub fn available_slot(&mut self, index: usize) -> usize {
        let root = self.find(index);
        self.slots[root].available_slot
    }

    /// Merges the sets containing `consumed` and `survivor`.
    ///
    /// The merged set keeps the available slot of `survivor`'s set. Returns
    /// the root of the merged set.
    ///
    /// # Panics
    /// Panics when either index is outside the forest.
    pub fn unite(&mut self, consumed: usize, survivor: usize) -> usize {
        let consumed_root = self.find(consumed);
        let survivor_root = self.find(survivor);
        self.link(consumed_root, survivor_root)
    }

    /// Links two roots by rank.
    ///
    /// A taller `consumed` tree adopts `survivor` and takes over its available
    /// slot. Otherwise `consumed` hangs under `survivor`, whose available slot
    /// is already the right one, and `survivor` grows when ranks tie.
    pub(crate) fn link(&mut self, consumed: usize, survivor: usize) -> usize {
        debug_assert_eq!(self.slots[consumed].parent, consumed, "link needs roots");
        debug_assert_eq!(self.slots[survivor].parent, survivor, "link needs roots");
        if consumed == survivor {
            return survivor;
        }

        self.sets -= 1;
        let consumed_rank = self.slots[consumed].rank;
        let survivor_rank = self.slots[survivor].rank;
        if consumed_rank > survivor_rank {
            self.slots[survivor].parent = consumed;
            self.slots[consumed].available_slot = self.slots[survivor].available_slot;
            consumed
        } else {
            self.slots[consumed].parent = survivor;
            if consumed_rank == survivor_rank {
                self.slots[survivor].rank = survivor_rank.saturating_add(1);
            }
            survivor
        }
    }

    /// Resolved available slot for every slot index, in index order.
    ///
    /// Only path shape changes; every set keeps its available slot.
    pub fn representatives(&mut self) -> Vec<usize> {
        let len = self.len();
        (0..len).map(|index| self.available_slot(index)).collect()
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.slots.len(),
            "slot {index} is outside a forest of {} slots",
            self.slots.len()
        );
    }
}
