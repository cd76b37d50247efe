use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Identifies one subscription in a [`Subscribers`] list.
///
/// Ids carry the channel of the list that issued them, so an owner with several lists can
/// route an id back to the right one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId {
    channel: u32,
    seq: u64,
}

impl SubscriptionId {
    pub fn channel(self) -> u32 {
        self.channel
    }
}

/// An ordered list of event subscribers.
///
/// Subscribers are invoked in insertion order. Removing one (by id) leaves the order of the
/// others untouched.
pub struct Subscribers<F: ?Sized> {
    channel: u32,
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<F>)>,
}

impl<F: ?Sized> Subscribers<F> {
    pub fn new() -> Self {
        Self::on_channel(0)
    }

    /// A list whose ids are tagged with `channel`. Owners of several lists give each a distinct
    /// channel.
    pub fn on_channel(channel: u32) -> Self {
        Self {
            channel,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }

    pub fn subscribe(&mut self, f: Box<F>) -> SubscriptionId {
        let id = SubscriptionId {
            channel: self.channel,
            seq: self.next_id,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, f));
        id
    }

    /// Removes a subscription. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if id.channel != self.channel {
            return false;
        }
        let Some(pos) = self.entries.iter().position(|(i, _)| *i == id) else {
            return false;
        };
        self.entries.remove(pos);
        true
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.entries.iter().any(|(i, _)| *i == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates subscribers in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut F> {
        self.entries.iter_mut().map(|(_, f)| &mut **f)
    }
}

impl<F: ?Sized> Default for Subscribers<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for Subscribers<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("channel", &self.channel)
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}
