use core::{
    mem,
    ops::{Index, IndexMut},
};

/// Stable handle to a slot in an [`Arena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<NodeId> },
}

/// Slot storage for tree nodes.
///
/// Removed slots are chained into a free list and reused by later insertions, so a `NodeId` stays
/// valid until the value behind it is removed.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Option<NodeId>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn insert(&mut self, value: T) -> NodeId {
        self.len += 1;

        match self.free {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id.index()], Slot::Occupied(value));
                match slot {
                    Slot::Vacant { next_free } => self.free = next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                }
                id
            }

            None => {
                let index = u32::try_from(self.slots.len()).expect("arena exceeded u32::MAX slots");
                self.slots.push(Slot::Occupied(value));
                NodeId(index)
            }
        }
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> T {
        let slot = &mut self.slots[id.index()];
        if let Slot::Vacant { .. } = slot {
            panic!("removed vacant arena slot {id:?}");
        }

        let vacant = Slot::Vacant {
            next_free: self.free,
        };

        match mem::replace(slot, vacant) {
            Slot::Occupied(value) => {
                self.free = Some(id);
                self.len -= 1;
                value
            }
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        match &self.slots[id.index()] {
            Slot::Occupied(value) => value,
            Slot::Vacant { .. } => panic!("dangling arena handle {id:?}"),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match &mut self.slots[id.index()] {
            Slot::Occupied(value) => value,
            Slot::Vacant { .. } => panic!("dangling arena handle {id:?}"),
        }
    }
}
