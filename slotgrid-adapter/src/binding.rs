use alloc::rc::Rc;
use core::cell::Cell;

use slotgrid::{Align, ScrollHost, SlotHandle, SubscriptionId, Vec2, VirtualGrid};

use crate::{
    DraggableControl, Easing, MoveDirection, PointerEvent, ScrollAnchor, ScrollProxyBar, Tween,
    apply_anchor, capture_first_visible_anchor,
};

/// A framework-neutral controller that keeps a [`VirtualGrid`] and a [`ScrollProxyBar`] in
/// sync and provides common adapter workflows (anchoring, tween-driven scrolling).
///
/// Bar value 0 shows the first line and 1 the last; pick a `LeftToRight`/`TopToBottom` bar for
/// a list that starts at the left/top. Adapters drive it by calling:
/// - the pointer methods and `on_move` when the bar receives input
/// - `on_scroll` when the host reports a content move (e.g. wheel or touch drag)
/// - `tick(now_ms)` each frame (bar hold-repeat, tweens, host polling)
///
/// The binding listens to the bar's value-changed event, so values set straight on the bar
/// (through [`Self::bar_mut`]) reach the grid on the next `tick` or `sync_bar`.
#[derive(Debug)]
pub struct ScrollBinding<H, S> {
    grid: VirtualGrid<H, S>,
    bar: ScrollProxyBar,
    tween: Option<Tween>,
    pending: Rc<Cell<Option<f32>>>,
    subscription: SubscriptionId,
}

impl<H: SlotHandle, S: ScrollHost> ScrollBinding<H, S> {
    pub fn new(grid: VirtualGrid<H, S>, mut bar: ScrollProxyBar) -> Self {
        let pending = Rc::new(Cell::new(None));
        let subscription = {
            let pending = Rc::clone(&pending);
            bar.on_value_changed(move |value| pending.set(Some(value)))
        };
        let mut b = Self {
            grid,
            bar,
            tween: None,
            pending,
            subscription,
        };
        b.write_bar();
        b
    }

    pub fn grid(&self) -> &VirtualGrid<H, S> {
        &self.grid
    }

    /// Mutable access to the grid. Call [`Self::sync_bar`] after changing its layout.
    pub fn grid_mut(&mut self) -> &mut VirtualGrid<H, S> {
        &mut self.grid
    }

    pub fn bar(&self) -> &ScrollProxyBar {
        &self.bar
    }

    pub fn bar_mut(&mut self) -> &mut ScrollProxyBar {
        &mut self.bar
    }

    /// Splits the binding; the bar no longer reports to the grid.
    pub fn into_parts(mut self) -> (VirtualGrid<H, S>, ScrollProxyBar) {
        self.bar.unsubscribe(self.subscription);
        (self.grid, self.bar)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Brings the two sides together: a bar value changed since the last sync moves the grid,
    /// then the bar's thumb size and value are recomputed from the grid without notifying bar
    /// subscribers.
    pub fn sync_bar(&mut self) {
        if !self.apply_bar_value() {
            self.write_bar();
        }
    }

    fn write_bar(&mut self) {
        self.bar.set_size(self.grid.visible_fraction());
        self.bar
            .set_value_without_notify(self.grid.normalized_position());
    }

    /// Moves the grid to the last value the bar reported, if any. Cancels any active tween.
    fn apply_bar_value(&mut self) -> bool {
        let Some(value) = self.pending.take() else {
            return false;
        };
        vtrace!(value, "ScrollBinding: bar moved the grid");
        self.cancel_animation();
        self.grid.set_normalized_position(value);
        self.write_bar();
        true
    }

    /// Grid-side commands supersede a bar value that has not been applied yet.
    fn discard_bar_value(&mut self) {
        self.pending.set(None);
    }

    /// Call this when the host reports a content position change (e.g. user wheel/drag).
    ///
    /// This cancels any active tween. Returns the number of recycled slots.
    pub fn on_scroll(&mut self, position: Vec2) -> usize {
        self.discard_bar_value();
        self.cancel_animation();
        let recycled = self.grid.on_content_moved(position);
        self.write_bar();
        recycled
    }

    pub fn pointer_down(&mut self, event: PointerEvent, now_ms: u64) -> bool {
        let changed = self.bar.pointer_down(event, now_ms);
        self.apply_bar_value();
        changed
    }

    pub fn begin_drag(&mut self, event: PointerEvent) {
        self.bar.begin_drag(event);
    }

    pub fn drag(&mut self, event: PointerEvent) -> bool {
        let changed = self.bar.drag(event);
        self.apply_bar_value();
        changed
    }

    pub fn end_drag(&mut self, event: PointerEvent) {
        self.bar.end_drag(event);
    }

    pub fn pointer_up(&mut self, event: PointerEvent) {
        self.bar.pointer_up(event);
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.bar.pointer_moved(position);
    }

    /// Keyboard/gamepad stepping through the bar. Returns `false` when the move was not handled.
    pub fn on_move(&mut self, direction: MoveDirection) -> bool {
        let handled = self.bar.on_move(direction);
        self.apply_bar_value();
        handled
    }

    /// Advances the binding.
    ///
    /// - Polls the host (viewport and content position).
    /// - Runs a due bar hold-repeat step, then applies any new bar value to the grid.
    /// - If a tween is active, moves the grid and returns the new scroll distance.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        self.grid.update();
        self.bar.tick(now_ms);
        if self.apply_bar_value() {
            return None;
        }

        let Some(tween) = self.tween else {
            self.write_bar();
            return None;
        };

        self.grid.scroll_to_distance(tween.sample(now_ms));
        if tween.is_done(now_ms) {
            self.tween = None;
        }
        self.write_bar();
        Some(self.grid.scroll_distance())
    }

    /// Scrolls to an index immediately (no animation).
    ///
    /// Returns the applied scroll distance.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> f32 {
        self.discard_bar_value();
        self.cancel_animation();
        self.grid.scroll_to_index(index, align);
        self.write_bar();
        self.grid.scroll_distance()
    }

    /// Starts a tween to an index (adapter-driven).
    ///
    /// Returns the clamped target distance.
    pub fn start_tween_to_index(
        &mut self,
        index: usize,
        align: Align,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> f32 {
        let to = self.grid.scroll_distance_for_index(index, align);
        self.start_tween_to_distance(to, now_ms, duration_ms, easing)
    }

    /// Starts a tween to a scroll distance (adapter-driven).
    ///
    /// Returns the clamped target distance.
    pub fn start_tween_to_distance(
        &mut self,
        distance: f32,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> f32 {
        self.discard_bar_value();
        let to = distance.clamp(0.0, self.grid.max_scroll_distance());
        let from = self.grid.scroll_distance();
        match self.tween.as_mut() {
            Some(tween) => tween.retarget(now_ms, to, duration_ms),
            None => self.tween = Some(Tween::new(from, to, now_ms, duration_ms, easing)),
        }
        to
    }

    pub fn capture_first_visible_anchor(&self) -> Option<ScrollAnchor> {
        capture_first_visible_anchor(&self.grid)
    }

    /// Applies a previously captured anchor by adjusting the scroll distance.
    ///
    /// This cancels any active tween.
    pub fn apply_anchor(
        &mut self,
        anchor: &ScrollAnchor,
        old_to_new: impl FnMut(usize) -> Option<usize>,
    ) -> bool {
        self.discard_bar_value();
        self.cancel_animation();
        let applied = apply_anchor(&mut self.grid, anchor, old_to_new);
        self.write_bar();
        applied
    }
}
