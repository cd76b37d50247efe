use alloc::boxed::Box;
use core::fmt;

use slotgrid::math;
use slotgrid::{ScrollAxis, SubscriptionId, Subscribers, Vec2};

use crate::HoldRepeat;

/// Default thumb size (fraction of the track).
pub const DEFAULT_BAR_SIZE: f32 = 0.2;

const VALUE_CHANNEL: u32 = 0;
const END_DRAG_CHANNEL: u32 = 1;

/// Which way the bar's value grows along its track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarDirection {
    #[default]
    LeftToRight,
    RightToLeft,
    BottomToTop,
    TopToBottom,
}

impl BarDirection {
    pub fn axis(self) -> ScrollAxis {
        match self {
            Self::LeftToRight | Self::RightToLeft => ScrollAxis::Horizontal,
            Self::BottomToTop | Self::TopToBottom => ScrollAxis::Vertical,
        }
    }

    /// `true` when value 0 sits at the far end of the track (right or top).
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::RightToLeft | Self::TopToBottom)
    }
}

/// Keyboard/gamepad navigation input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// A pointer event in track-local coordinates (origin at the track's lower-left, y up).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerEvent {
    pub position: Vec2,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn primary(position: Vec2) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
        }
    }
}

/// Press / drag / release capability of a pointer-driven control.
///
/// Methods that can move the value return `true` when the (stepped) value changed.
pub trait DraggableControl {
    fn pointer_down(&mut self, event: PointerEvent, now_ms: u64) -> bool;
    fn begin_drag(&mut self, event: PointerEvent);
    fn drag(&mut self, event: PointerEvent) -> bool;
    fn end_drag(&mut self, event: PointerEvent);
    fn pointer_up(&mut self, event: PointerEvent);
}

/// Configuration for [`ScrollProxyBar`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarOptions {
    /// Number of discrete values; 0 or 1 means continuous.
    pub number_of_steps: u32,
    pub direction: BarDirection,
    pub value: f32,
    pub size: f32,
    /// Minimum time between press-and-hold steps; 0 steps on every tick.
    pub repeat_interval_ms: u64,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            number_of_steps: 0,
            direction: BarDirection::default(),
            value: 0.0,
            size: DEFAULT_BAR_SIZE,
            repeat_interval_ms: 0,
        }
    }
}

impl BarOptions {
    pub fn with_number_of_steps(mut self, number_of_steps: u32) -> Self {
        self.number_of_steps = number_of_steps;
        self
    }

    pub fn with_direction(mut self, direction: BarDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.value = math::clamp01(value);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = math::clamp01(size);
        self
    }

    pub fn with_repeat_interval_ms(mut self, repeat_interval_ms: u64) -> Self {
        self.repeat_interval_ms = repeat_interval_ms;
        self
    }
}

/// Snaps `value` to one of `steps` evenly spaced levels in `[0, 1]`.
///
/// With fewer than two steps the value is only clamped.
pub fn quantize(value: f32, steps: u32) -> f32 {
    let value = math::clamp01(value);
    if steps > 1 {
        let n = (steps - 1) as f32;
        math::round(value * n) / n
    } else {
        value
    }
}

/// A draggable, steppable proxy scrollbar.
///
/// The bar knows nothing about the list it drives: it owns a normalized value and a thumb size
/// and reports value changes to its subscribers. Geometry is headless; the host tells the bar
/// its track size and renders the thumb from [`Self::thumb_span`].
pub struct ScrollProxyBar {
    value: f32,
    size: f32,
    number_of_steps: u32,
    direction: BarDirection,
    track: Vec2,
    interactable: bool,
    dragging: bool,
    drag_offset: f32,
    repeat: HoldRepeat,
    on_value_changed: Subscribers<dyn FnMut(f32)>,
    on_end_drag: Subscribers<dyn FnMut()>,
}

impl fmt::Debug for ScrollProxyBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollProxyBar")
            .field("value", &self.value)
            .field("size", &self.size)
            .field("number_of_steps", &self.number_of_steps)
            .field("direction", &self.direction)
            .field("track", &self.track)
            .field("interactable", &self.interactable)
            .field("dragging", &self.dragging)
            .field("repeat", &self.repeat)
            .finish_non_exhaustive()
    }
}

impl ScrollProxyBar {
    /// Creates a bar over a track of size `track`.
    pub fn new(options: BarOptions, track: Vec2) -> Self {
        Self {
            value: math::clamp01(options.value),
            size: math::clamp01(options.size),
            number_of_steps: options.number_of_steps,
            direction: options.direction,
            track,
            interactable: true,
            dragging: false,
            drag_offset: 0.0,
            repeat: HoldRepeat::new(options.repeat_interval_ms),
            on_value_changed: Subscribers::on_channel(VALUE_CHANNEL),
            on_end_drag: Subscribers::on_channel(END_DRAG_CHANNEL),
        }
    }

    /// The stepped value in `[0, 1]`.
    pub fn value(&self) -> f32 {
        quantize(self.value, self.number_of_steps)
    }

    /// The last value set, before stepping.
    pub fn raw_value(&self) -> f32 {
        self.value
    }

    /// Sets the value and notifies subscribers if the stepped value changed.
    pub fn set_value(&mut self, value: f32) -> bool {
        self.set(value, true)
    }

    /// Sets the value without notifying subscribers (list-to-bar sync).
    pub fn set_value_without_notify(&mut self, value: f32) -> bool {
        self.set(value, false)
    }

    fn set(&mut self, input: f32, notify: bool) -> bool {
        let prev = self.value();
        self.value = math::clamp01(input);
        let next = self.value();
        if prev == next {
            return false;
        }
        if notify {
            vtrace!(value = next, "ScrollProxyBar: value changed");
            self.notify_value(next);
        }
        true
    }

    fn notify_value(&mut self, value: f32) {
        for f in self.on_value_changed.iter_mut() {
            f(value);
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_size(&mut self, size: f32) -> bool {
        let size = math::clamp01(size);
        if self.size == size {
            return false;
        }
        self.size = size;
        true
    }

    pub fn number_of_steps(&self) -> u32 {
        self.number_of_steps
    }

    /// Changes the step count, re-stepping (and notifying) the current value.
    pub fn set_number_of_steps(&mut self, number_of_steps: u32) -> bool {
        if self.number_of_steps == number_of_steps {
            return false;
        }
        let prev = self.value();
        self.number_of_steps = number_of_steps;
        let next = self.value();
        if prev != next {
            self.notify_value(next);
        }
        true
    }

    /// Keyboard/hold step: one level when stepped, 0.1 when continuous.
    pub fn step_size(&self) -> f32 {
        if self.number_of_steps > 1 {
            1.0 / (self.number_of_steps - 1) as f32
        } else {
            0.1
        }
    }

    pub fn direction(&self) -> BarDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: BarDirection) -> bool {
        if self.direction == direction {
            return false;
        }
        vdebug!(?direction, "ScrollProxyBar::set_direction");
        self.direction = direction;
        true
    }

    pub fn axis(&self) -> ScrollAxis {
        self.direction.axis()
    }

    pub fn is_reversed(&self) -> bool {
        self.direction.is_reversed()
    }

    pub fn track_size(&self) -> Vec2 {
        self.track
    }

    pub fn set_track_size(&mut self, track: Vec2) {
        self.track = track;
    }

    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    /// Disabling the bar cancels any drag or hold in progress.
    pub fn set_interactable(&mut self, interactable: bool) {
        self.interactable = interactable;
        if !interactable {
            self.dragging = false;
            self.repeat.release();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// `true` while a press-and-hold (not turned into a drag) is in progress.
    pub fn is_held(&self) -> bool {
        self.repeat.is_pressed()
    }

    pub fn set_repeat_interval_ms(&mut self, interval_ms: u64) {
        self.repeat.set_interval_ms(interval_ms);
    }

    pub fn on_value_changed(&mut self, f: impl FnMut(f32) + 'static) -> SubscriptionId {
        self.on_value_changed.subscribe(Box::new(f))
    }

    /// Subscribes to drag completion.
    pub fn on_end_drag(&mut self, f: impl FnMut() + 'static) -> SubscriptionId {
        self.on_end_drag.subscribe(Box::new(f))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match id.channel() {
            VALUE_CHANNEL => self.on_value_changed.unsubscribe(id),
            END_DRAG_CHANNEL => self.on_end_drag.unsubscribe(id),
            _ => false,
        }
    }

    /// The thumb's normalized `[start, end]` along the track.
    pub fn thumb_span(&self) -> (f32, f32) {
        let movement = self.value() * (1.0 - self.size);
        if self.is_reversed() {
            (1.0 - movement - self.size, 1.0 - movement)
        } else {
            (movement, movement + self.size)
        }
    }

    /// The thumb rectangle in track coordinates, as `(min, max)` corners.
    pub fn thumb_rect(&self) -> (Vec2, Vec2) {
        let axis = self.axis();
        let extent = self.track.along(axis);
        let (start, end) = self.thumb_span();
        (
            Vec2::ZERO.with_along(axis, start * extent),
            self.track.with_along(axis, end * extent),
        )
    }

    pub fn thumb_contains(&self, point: Vec2) -> bool {
        let (min, max) = self.thumb_rect();
        (min.x..=max.x).contains(&point.x) && (min.y..=max.y).contains(&point.y)
    }

    fn thumb_center(&self) -> f32 {
        let (start, end) = self.thumb_span();
        (start + end) * 0.5 * self.track.along(self.axis())
    }

    fn may_drag(&self, event: &PointerEvent) -> bool {
        self.interactable && event.button == PointerButton::Primary
    }

    /// Updates the held pointer position while a press-and-hold is active.
    pub fn pointer_moved(&mut self, position: Vec2) {
        if self.repeat.is_pressed() {
            self.repeat.move_to(position);
        }
    }

    /// Runs one press-and-hold step when due: moves the value by `size` toward the held pointer,
    /// unless the pointer is over the thumb.
    ///
    /// With coarse steps the thumb can jump past the pointer; stepping then stops instead of
    /// bouncing between two levels.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.repeat.poll(now_ms) {
            return false;
        }
        let point = self.repeat.point();
        if self.thumb_contains(point) {
            return false;
        }
        let before = point.along(self.axis()) < self.thumb_center();
        let toward_higher = before == self.is_reversed();
        if !self.repeat.steer(toward_higher) {
            return false;
        }
        let next = if toward_higher {
            self.value() + self.size
        } else {
            self.value() - self.size
        };
        self.set(next, true)
    }

    /// Keyboard/gamepad stepping along the bar's axis.
    ///
    /// Returns `false` (not handled) for moves across the axis or when not interactable.
    pub fn on_move(&mut self, direction: MoveDirection) -> bool {
        if !self.interactable {
            return false;
        }
        let step = self.step_size();
        let delta = match (direction, self.axis()) {
            (MoveDirection::Left, ScrollAxis::Horizontal)
            | (MoveDirection::Down, ScrollAxis::Vertical) => -step,
            (MoveDirection::Right, ScrollAxis::Horizontal)
            | (MoveDirection::Up, ScrollAxis::Vertical) => step,
            _ => return false,
        };
        let delta = if self.is_reversed() { -delta } else { delta };
        self.set(self.value() + delta, true);
        true
    }

    fn update_drag(&mut self, position: Vec2) -> bool {
        let axis = self.axis();
        let extent = self.track.along(axis);
        let remaining = extent * (1.0 - self.size);
        if !(remaining > 0.0) {
            return false;
        }
        let corner = position.along(axis) - self.drag_offset - extent * self.size * 0.5;
        let v = corner / remaining;
        let v = if self.is_reversed() { 1.0 - v } else { v };
        self.set(v, true)
    }
}

impl DraggableControl for ScrollProxyBar {
    /// Starts press-and-hold stepping; the first step happens immediately.
    fn pointer_down(&mut self, event: PointerEvent, now_ms: u64) -> bool {
        if !self.may_drag(&event) {
            return false;
        }
        self.repeat.press(event.position);
        self.tick(now_ms)
    }

    /// Grabbing the thumb keeps the grab point under the pointer; grabbing the track centers
    /// the thumb on the pointer.
    fn begin_drag(&mut self, event: PointerEvent) {
        self.repeat.release();
        if !self.may_drag(&event) {
            return;
        }
        self.dragging = true;
        self.drag_offset = if self.thumb_contains(event.position) {
            event.position.along(self.axis()) - self.thumb_center()
        } else {
            0.0
        };
    }

    fn drag(&mut self, event: PointerEvent) -> bool {
        if !self.dragging || !self.may_drag(&event) {
            return false;
        }
        self.update_drag(event.position)
    }

    fn end_drag(&mut self, _event: PointerEvent) {
        self.dragging = false;
        for f in self.on_end_drag.iter_mut() {
            f();
        }
    }

    fn pointer_up(&mut self, _event: PointerEvent) {
        self.repeat.release();
    }
}
