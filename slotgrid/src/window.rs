use alloc::collections::VecDeque;

/// One binding of a data index to a pool slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowEntry {
    pub data_index: usize,
    pub slot_index: usize,
}

/// A closed interval `[first, last]` of data indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowBounds {
    pub first: usize,
    pub last: usize,
}

impl WindowBounds {
    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first) + 1
    }

    pub fn contains(&self, data_index: usize) -> bool {
        (self.first..=self.last).contains(&data_index)
    }
}

/// A single recycling step: `evicted` left the window and its slot now holds `bound`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recycle {
    pub evicted: WindowEntry,
    pub bound: WindowEntry,
}

/// The contiguous run of data indexes currently bound to slots, in ascending order.
#[derive(Clone, Debug, Default)]
pub struct VisibleWindow {
    entries: VecDeque<WindowEntry>,
}

impl VisibleWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<WindowEntry> {
        self.entries.front().copied()
    }

    pub fn last(&self) -> Option<WindowEntry> {
        self.entries.back().copied()
    }

    pub fn bounds(&self) -> Option<WindowBounds> {
        Some(WindowBounds {
            first: self.first()?.data_index,
            last: self.last()?.data_index,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = WindowEntry> + '_ {
        self.entries.iter().copied()
    }

    /// Slot currently bound to `data_index`. O(1) thanks to contiguity.
    pub fn slot_of(&self, data_index: usize) -> Option<usize> {
        let first = self.first()?.data_index;
        let offset = data_index.checked_sub(first)?;
        self.entries.get(offset).map(|e| e.slot_index)
    }

    /// Empties the window, handing back the old entries in ascending order.
    pub fn drain(&mut self) -> impl Iterator<Item = WindowEntry> + '_ {
        self.entries.drain(..)
    }

    /// Appends the next index. It must follow the current last one.
    pub fn push_back(&mut self, entry: WindowEntry) {
        debug_assert!(
            self.last()
                .is_none_or(|last| last.data_index + 1 == entry.data_index),
            "VisibleWindow: push_back breaks contiguity (last={:?}, next={})",
            self.last(),
            entry.data_index
        );
        self.entries.push_back(entry);
    }

    /// Moves the window toward `target`, recycling one slot per step.
    ///
    /// Scrolling forward evicts from the front and binds `last + 1` at the back; scrolling
    /// backward evicts from the back and binds `first - 1` at the front. The window length never
    /// changes, and the walk stops as soon as either edge reaches its target, so the window
    /// stays clamped inside the data set. Returns the number of recycled slots.
    pub fn shift_to(&mut self, target: WindowBounds, mut on_recycle: impl FnMut(Recycle)) -> usize {
        let Some(current) = self.bounds() else {
            return 0;
        };

        let mut steps = 0usize;
        if target.first > current.first {
            while let (Some(first), Some(last)) = (self.first(), self.last()) {
                if !(first.data_index < target.first && last.data_index < target.last) {
                    break;
                }
                self.entries.pop_front();
                let bound = WindowEntry {
                    data_index: last.data_index + 1,
                    slot_index: first.slot_index,
                };
                self.entries.push_back(bound);
                on_recycle(Recycle {
                    evicted: first,
                    bound,
                });
                steps += 1;
            }
        } else if target.first < current.first {
            while let (Some(first), Some(last)) = (self.first(), self.last()) {
                if !(last.data_index > target.last && first.data_index > target.first) {
                    break;
                }
                self.entries.pop_back();
                let bound = WindowEntry {
                    data_index: first.data_index - 1,
                    slot_index: last.slot_index,
                };
                self.entries.push_front(bound);
                on_recycle(Recycle {
                    evicted: last,
                    bound,
                });
                steps += 1;
            }
        }
        steps
    }

    /// Checks contiguity and slot uniqueness. Intended for tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        let contiguous = self
            .entries
            .iter()
            .zip(self.entries.iter().skip(1))
            .all(|(a, b)| a.data_index + 1 == b.data_index);
        let unique_slots = self.entries.iter().enumerate().all(|(i, a)| {
            self.entries
                .iter()
                .skip(i + 1)
                .all(|b| b.slot_index != a.slot_index)
        });
        contiguous && unique_slots
    }
}
