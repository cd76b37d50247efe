use crate::Vec2;

/// Viewport extent at the time of a snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub size: Vec2,
}

/// Scroll distance from the content origin along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub distance: f32,
}

/// Viewport and scroll snapshot of a [`VirtualGrid`](crate::VirtualGrid).
///
/// Restoring one reapplies the viewport size, then the scroll distance.
/// With `feature = "serde"` it can be persisted across sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub viewport: ViewportState,
    pub scroll: ScrollState,
}
