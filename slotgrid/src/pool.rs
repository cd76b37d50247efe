use alloc::vec::Vec;

use crate::Vec2;

/// A reusable view owned by the host (a widget, a scene node, a terminal cell block...).
///
/// The pool only toggles visibility and positions the view; what it displays is bound through
/// the grid's `on_show`/`on_hide` callbacks.
pub trait SlotHandle {
    fn set_active(&mut self, active: bool);

    /// Moves the view to `position` (top-left, relative to the content origin) with `size`.
    fn place(&mut self, position: Vec2, size: Vec2);

    /// Returns `false` once the host destroyed the underlying view behind our back.
    fn is_alive(&self) -> bool {
        true
    }
}

/// Produces new slot views on demand.
///
/// Returning `None` (e.g. no template is available) leaves the slot vacant; the grid then shows
/// nothing but keeps computing geometry.
pub trait SlotFactory<H> {
    fn create(&mut self, slot_index: usize, cell_size: Vec2) -> Option<H>;
}

impl<H, F> SlotFactory<H> for F
where
    F: FnMut(usize, Vec2) -> Option<H>,
{
    fn create(&mut self, slot_index: usize, cell_size: Vec2) -> Option<H> {
        self(slot_index, cell_size)
    }
}

/// One entry of the pool.
#[derive(Clone, Debug)]
pub struct Slot<H> {
    handle: Option<H>,
    active: bool,
    position: Vec2,
}

impl<H> Slot<H> {
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_vacant(&self) -> bool {
        self.handle.is_none()
    }
}

/// A grow-only pool of slots addressed by a stable index.
///
/// Slots are never destroyed or reindexed: `0..len()` stays valid for the pool's lifetime.
#[derive(Clone, Debug)]
pub struct SlotPool<H> {
    slots: Vec<Slot<H>>,
}

impl<H> Default for SlotPool<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> SlotPool<H> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot_index: usize) -> Option<&Slot<H>> {
        self.slots.get(slot_index)
    }

    pub fn handle(&self, slot_index: usize) -> Option<&H> {
        self.slots.get(slot_index)?.handle.as_ref()
    }

    pub fn handle_mut(&mut self, slot_index: usize) -> Option<&mut H> {
        self.slots.get_mut(slot_index)?.handle.as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot<H>> {
        self.slots.iter()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Returns `true` when every slot in `0..n` holds a live handle.
    pub fn is_ready(&self, n: usize) -> bool {
        n <= self.slots.len() && self.slots[..n].iter().all(|s| s.handle.is_some())
    }
}

impl<H: SlotHandle> SlotPool<H> {
    /// Grows the pool to at least `n` slots and fills vacant entries in `0..n`.
    ///
    /// New slots start inactive. Returns the number of handles created.
    pub fn ensure_capacity(
        &mut self,
        n: usize,
        factory: &mut dyn SlotFactory<H>,
        cell_size: Vec2,
    ) -> usize {
        if n > self.slots.len() {
            self.slots.resize_with(n, || Slot {
                handle: None,
                active: false,
                position: Vec2::ZERO,
            });
        }

        let mut created = 0usize;
        for (slot_index, slot) in self.slots[..n].iter_mut().enumerate() {
            if slot.handle.is_some() {
                continue;
            }
            let Some(mut handle) = factory.create(slot_index, cell_size) else {
                vwarn!(slot_index, "slot factory returned no handle");
                continue;
            };
            handle.set_active(false);
            handle.place(slot.position, cell_size);
            slot.handle = Some(handle);
            slot.active = false;
            created += 1;
        }
        if created > 0 {
            vdebug!(created, len = self.slots.len(), "SlotPool::ensure_capacity");
        }
        created
    }

    /// Shows a slot. No-op (returns `false`) if it is already active, vacant or out of range.
    pub fn activate(&mut self, slot_index: usize) -> bool {
        self.set_active(slot_index, true)
    }

    /// Hides a slot. No-op (returns `false`) if it is already inactive, vacant or out of range.
    pub fn deactivate(&mut self, slot_index: usize) -> bool {
        self.set_active(slot_index, false)
    }

    fn set_active(&mut self, slot_index: usize, active: bool) -> bool {
        let Some(slot) = self.slots.get_mut(slot_index) else {
            return false;
        };
        let Some(handle) = slot.handle.as_mut() else {
            return false;
        };
        if slot.active == active {
            return false;
        }
        slot.active = active;
        handle.set_active(active);
        true
    }

    /// Deactivates every slot at `from..`.
    pub fn deactivate_from(&mut self, from: usize) -> usize {
        let mut n = 0usize;
        for slot_index in from..self.slots.len() {
            if self.deactivate(slot_index) {
                n += 1;
            }
        }
        n
    }

    pub fn place(&mut self, slot_index: usize, position: Vec2, size: Vec2) {
        let Some(slot) = self.slots.get_mut(slot_index) else {
            return;
        };
        slot.position = position;
        if let Some(handle) = slot.handle.as_mut() {
            handle.place(position, size);
        }
    }

    /// Re-applies `size` to every live handle, keeping positions.
    pub fn resize_all(&mut self, size: Vec2) {
        for slot in &mut self.slots {
            if let Some(handle) = slot.handle.as_mut() {
                handle.place(slot.position, size);
            }
        }
    }

    /// Drops handles whose view was destroyed externally, leaving vacant entries behind.
    ///
    /// Vacant entries are refilled by the next [`Self::ensure_capacity`].
    pub fn prune_dead(&mut self) -> usize {
        let mut pruned = 0usize;
        for slot in &mut self.slots {
            if slot.handle.as_ref().is_some_and(|h| !h.is_alive()) {
                slot.handle = None;
                slot.active = false;
                pruned += 1;
            }
        }
        if pruned > 0 {
            vwarn!(pruned, "SlotPool: pruned destroyed slot handles");
        }
        pruned
    }
}
