use slotgrid::math;
use slotgrid::{ScrollOverride, ScrollRequest, Vec2};

/// A [`ScrollOverride`] that snaps every requested position to the nearest whole line.
///
/// Distances are clamped to `[0, max_distance]`, so the end of the content stays reachable
/// even when it is not line-aligned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellSnap;

impl CellSnap {
    /// The line-aligned distance closest to `request`'s.
    pub fn snapped_distance(request: &ScrollRequest) -> f32 {
        let distance = request.requested_distance();
        let stride = request.line_stride;
        if !(stride.is_finite() && stride > 0.0) {
            return distance;
        }
        let lines = math::round((distance - request.line_start) / stride);
        let snapped = request.line_start + lines * stride;
        snapped.clamp(0.0, request.max_distance.max(0.0))
    }
}

impl ScrollOverride for CellSnap {
    fn intercept(&mut self, request: ScrollRequest, apply: &mut dyn FnMut(Vec2)) {
        let distance = Self::snapped_distance(&request);
        vtrace!(
            requested = request.requested_distance(),
            snapped = distance,
            "CellSnap::intercept"
        );
        apply(request.position_at(distance));
    }
}
