use crate::{Constraint, GridGeometry, Padding, ScrollAxis, Vec2};

/// Default hysteresis: content must move at least one unit before the window is recomputed.
pub const DEFAULT_MIN_MOVE_SQ: f32 = 1.0;

/// Configuration for [`crate::VirtualGrid`].
///
/// Plain data; update it through `VirtualGrid::set_options`/`update_options` (or the
/// individual setters), which decide whether a relayout and window rebuild is needed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOptions {
    pub item_count: usize,
    pub cell_size: Vec2,
    pub spacing: Vec2,
    pub padding: Padding,
    pub constraint: Constraint,
    pub axis: ScrollAxis,
    /// Squared distance content has to move before the window is recomputed.
    pub min_move_sq: f32,
}

impl Default for GridOptions {
    fn default() -> Self {
        let geometry = GridGeometry::default();
        Self {
            item_count: 0,
            cell_size: geometry.cell_size,
            spacing: geometry.spacing,
            padding: geometry.padding,
            constraint: geometry.constraint,
            axis: geometry.axis,
            min_move_sq: DEFAULT_MIN_MOVE_SQ,
        }
    }
}

impl GridOptions {
    /// Options for a vertical, flexible grid of `item_count` cells of `cell_size`.
    pub fn new(item_count: usize, cell_size: Vec2) -> Self {
        Self {
            item_count,
            cell_size,
            ..Self::default()
        }
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_cell_size(mut self, cell_size: Vec2) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_spacing(mut self, spacing: Vec2) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the constraint; fixed counts are floored to 1.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint.sanitized();
        self
    }

    pub fn with_axis(mut self, axis: ScrollAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_min_move_sq(mut self, min_move_sq: f32) -> Self {
        self.min_move_sq = min_move_sq.max(0.0);
        self
    }

    /// The geometry model described by these options.
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry {
            cell_size: self.cell_size,
            spacing: self.spacing,
            padding: self.padding,
            constraint: self.constraint.sanitized(),
            axis: self.axis,
        }
    }

    /// `true` when switching from `self` to `other` changes the layout.
    pub(crate) fn layout_differs(&self, other: &Self) -> bool {
        self.item_count != other.item_count || self.geometry() != other.geometry()
    }
}
