use alloc::boxed::Box;
use core::fmt;

use crate::math;
use crate::{GridGeometry, GridLayout, ScrollAxis, Vec2, WindowBounds};

/// The scroll container hosting the grid.
///
/// Positions are the content's anchored position inside the viewport. Moving content left
/// (negative x) or up (positive y, anchor space grows upward) reveals later indexes, matching
/// the usual retained-mode UI convention.
pub trait ScrollHost {
    fn viewport_size(&self) -> Vec2;
    fn content_position(&self) -> Vec2;
    fn set_content_position(&mut self, position: Vec2);
    /// Applies the scrollable content bounds computed by the grid.
    fn set_content_size(&mut self, size: Vec2);
}

/// A content-position write the grid wants to perform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub current: Vec2,
    pub requested: Vec2,
    pub origin: Vec2,
    pub axis: ScrollAxis,
    /// Distance between two lines along `axis`.
    pub line_stride: f32,
    /// Distance from the content origin to the first line (the leading padding).
    pub line_start: f32,
    /// Largest scroll distance that keeps the viewport filled.
    pub max_distance: f32,
}

impl ScrollRequest {
    /// Scroll distance from the origin that `requested` corresponds to.
    pub fn requested_distance(&self) -> f32 {
        axis_distance(self.axis, self.origin, self.requested)
    }

    /// The content position at `distance` from the origin, keeping the requested cross
    /// coordinate.
    pub fn position_at(&self, distance: f32) -> Vec2 {
        axis_position(self.axis, self.origin, self.requested, distance)
    }
}

fn axis_distance(axis: ScrollAxis, origin: Vec2, position: Vec2) -> f32 {
    match axis {
        ScrollAxis::Horizontal => origin.x - position.x,
        ScrollAxis::Vertical => position.y - origin.y,
    }
}

fn axis_position(axis: ScrollAxis, origin: Vec2, base: Vec2, distance: f32) -> Vec2 {
    match axis {
        ScrollAxis::Horizontal => Vec2::new(origin.x - distance, base.y),
        ScrollAxis::Vertical => Vec2::new(base.x, origin.y + distance),
    }
}

/// Intercepts every content-position write (e.g. to snap to lines).
///
/// The override decides the final position and applies it through `apply`; it may also apply
/// nothing, leaving the host untouched.
pub trait ScrollOverride {
    fn intercept(&mut self, request: ScrollRequest, apply: &mut dyn FnMut(Vec2));
}

/// Maps content positions to "items passed" and owns position/size write-back to the host.
pub struct ScrollOffsetBridge {
    origin: Vec2,
    last_processed: Option<Vec2>,
    min_move_sq: f32,
    scroll_override: Option<Box<dyn ScrollOverride>>,
}

impl fmt::Debug for ScrollOffsetBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollOffsetBridge")
            .field("origin", &self.origin)
            .field("last_processed", &self.last_processed)
            .field("min_move_sq", &self.min_move_sq)
            .field("has_override", &self.scroll_override.is_some())
            .finish()
    }
}

impl ScrollOffsetBridge {
    pub fn new(origin: Vec2, min_move_sq: f32) -> Self {
        Self {
            origin,
            last_processed: None,
            min_move_sq,
            scroll_override: None,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
        self.last_processed = None;
    }

    pub fn min_move_sq(&self) -> f32 {
        self.min_move_sq
    }

    pub fn set_min_move_sq(&mut self, min_move_sq: f32) {
        self.min_move_sq = min_move_sq;
    }

    /// How far content has travelled from its origin along `axis` (positive = later items).
    pub fn distance(&self, axis: ScrollAxis, position: Vec2) -> f32 {
        axis_distance(axis, self.origin, position)
    }

    /// The content position that is `distance` away from the origin, keeping `base`'s cross
    /// coordinate.
    pub fn position_for_distance(&self, axis: ScrollAxis, base: Vec2, distance: f32) -> Vec2 {
        axis_position(axis, self.origin, base, distance)
    }

    /// Number of items fully scrolled past at `position` (a multiple of the line length).
    pub fn passed_item_count(
        &self,
        position: Vec2,
        geometry: &GridGeometry,
        layout: &GridLayout,
        item_count: usize,
    ) -> usize {
        let axis = geometry.axis;
        let stride = geometry.stride(axis);
        if !(stride.is_finite() && stride > 0.0) {
            return 0;
        }
        let raw = self.distance(axis, position);
        let lines = math::floor_to_usize((raw - geometry.padding.leading(axis)) / stride)
            .min(layout.main_count());
        lines.saturating_mul(layout.cross_count()).min(item_count)
    }

    /// The window `[passed, min(passed + capacity, item_count) - 1]` for `position`.
    ///
    /// Returns `None` when nothing can be shown. Past the end, `first` is pulled back to `last`.
    pub fn window_bounds(
        &self,
        position: Vec2,
        geometry: &GridGeometry,
        layout: &GridLayout,
        item_count: usize,
        capacity: usize,
    ) -> Option<WindowBounds> {
        if item_count == 0 || capacity == 0 {
            return None;
        }
        let first = self.passed_item_count(position, geometry, layout, item_count);
        let last = first.saturating_add(capacity).min(item_count) - 1;
        Some(WindowBounds {
            first: first.min(last),
            last,
        })
    }

    /// Hysteresis guard: `true` once content moved at least `sqrt(min_move_sq)` since the last
    /// processed position.
    pub fn should_recompute(&self, position: Vec2) -> bool {
        match self.last_processed {
            None => true,
            Some(last) => (position - last).length_squared() >= self.min_move_sq,
        }
    }

    pub fn mark_processed(&mut self, position: Vec2) {
        self.last_processed = Some(position);
    }

    pub fn last_processed(&self) -> Option<Vec2> {
        self.last_processed
    }

    /// Largest useful scroll distance: content extent minus viewport extent, at least 0.
    pub fn max_distance(axis: ScrollAxis, content_size: Vec2, viewport: Vec2) -> f32 {
        (content_size.along(axis) - viewport.along(axis)).max(0.0)
    }

    /// Scroll position in `[0, 1]`; 0 when the content fits the viewport.
    pub fn normalized(
        &self,
        axis: ScrollAxis,
        position: Vec2,
        content_size: Vec2,
        viewport: Vec2,
    ) -> f32 {
        let max = Self::max_distance(axis, content_size, viewport);
        if max <= 0.0 {
            return 0.0;
        }
        math::clamp01(self.distance(axis, position) / max)
    }

    pub fn set_override(&mut self, scroll_override: Option<Box<dyn ScrollOverride>>) {
        self.scroll_override = scroll_override;
    }

    pub fn has_override(&self) -> bool {
        self.scroll_override.is_some()
    }

    /// Writes a content position to the host, deferring to the override when one is set.
    pub fn write_position<S: ScrollHost>(&mut self, host: &mut S, request: ScrollRequest) {
        vtrace!(
            x = request.requested.x,
            y = request.requested.y,
            "ScrollOffsetBridge::write_position"
        );
        match self.scroll_override.as_mut() {
            Some(scroll_override) => {
                scroll_override.intercept(request, &mut |p| host.set_content_position(p));
            }
            None => host.set_content_position(request.requested),
        }
    }

    /// Applies the content extent computed by the geometry model.
    pub fn write_content_size<S: ScrollHost>(&self, host: &mut S, size: Vec2) {
        host.set_content_size(size);
    }
}
