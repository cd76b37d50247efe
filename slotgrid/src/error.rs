use crate::ScrollAxis;

/// A grid configuration the geometry model cannot lay out.
///
/// These are reported once at recompute time; the grid keeps a padding-only layout and an
/// empty window until the configuration is fixed.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("cell size plus spacing along {axis:?} must be positive (got {stride})")]
    NonPositiveStride { axis: ScrollAxis, stride: f32 },

    #[error("viewport extent along {axis:?} is not finite (got {extent})")]
    NonFiniteViewport { axis: ScrollAxis, extent: f32 },
}
