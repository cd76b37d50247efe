//! Pure grid geometry: cell counts, content extent and per-index positions.

use crate::math;
use crate::{Constraint, LayoutError, Padding, ScrollAxis, Vec2};

/// Slack added before flooring the flexible cross-axis count, so a viewport that fits exactly
/// `N` cells does not round down to `N - 1`.
pub const FIT_EPSILON: f32 = 0.001;

/// The layout parameters of a uniform grid.
///
/// All methods are pure: identical inputs always produce identical outputs, which lets the
/// window controller reposition a single recycled slot without recomputing the whole layout.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGeometry {
    pub cell_size: Vec2,
    pub spacing: Vec2,
    pub padding: Padding,
    pub constraint: Constraint,
    pub axis: ScrollAxis,
}

/// The result of [`GridGeometry::layout`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    /// Size the host must give the scrollable content.
    pub content_size: Vec2,
    pub axis: ScrollAxis,
}

impl GridLayout {
    /// Number of lines along the scroll axis (rows for vertical lists).
    pub fn main_count(&self) -> usize {
        match self.axis {
            ScrollAxis::Horizontal => self.columns,
            ScrollAxis::Vertical => self.rows,
        }
    }

    /// Number of cells per line (columns for vertical lists).
    pub fn cross_count(&self) -> usize {
        match self.axis {
            ScrollAxis::Horizontal => self.rows,
            ScrollAxis::Vertical => self.columns,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }
}

/// How many cells one viewport needs, including the overscan line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleCells {
    pub columns: usize,
    pub rows: usize,
}

impl VisibleCells {
    pub fn capacity(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_size: Vec2::new(100.0, 100.0),
            spacing: Vec2::ZERO,
            padding: Padding::ZERO,
            constraint: Constraint::Flexible,
            axis: ScrollAxis::Vertical,
        }
    }
}

impl GridGeometry {
    /// Distance between the starts of two neighbouring cells along `axis`.
    pub fn stride(&self, axis: ScrollAxis) -> f32 {
        self.cell_size.along(axis) + self.spacing.along(axis)
    }

    fn checked_stride(&self, axis: ScrollAxis) -> Result<f32, LayoutError> {
        let stride = self.stride(axis);
        if stride.is_finite() && stride > 0.0 {
            Ok(stride)
        } else {
            Err(LayoutError::NonPositiveStride { axis, stride })
        }
    }

    /// Computes columns, rows and content size for `item_count` items in `viewport`.
    pub fn layout(&self, item_count: usize, viewport: Vec2) -> Result<GridLayout, LayoutError> {
        let axis = self.axis;
        let cross_axis = axis.cross();
        let main_stride = self.checked_stride(axis)?;

        let (columns, rows) = match self.constraint.sanitized() {
            Constraint::FixedColumnCount(n) => (n, item_count.div_ceil(n)),
            Constraint::FixedRowCount(n) => (item_count.div_ceil(n), n),
            Constraint::Flexible => {
                let cross_stride = self.checked_stride(cross_axis)?;
                let extent = viewport.along(cross_axis);
                if !extent.is_finite() {
                    return Err(LayoutError::NonFiniteViewport {
                        axis: cross_axis,
                        extent,
                    });
                }
                let fit = (extent - self.padding.total(cross_axis)
                    + self.spacing.along(cross_axis)
                    + FIT_EPSILON)
                    / cross_stride;
                let cross = math::floor_to_usize(fit).max(1);
                let main = item_count.div_ceil(cross);
                match axis {
                    ScrollAxis::Vertical => (cross, main),
                    ScrollAxis::Horizontal => (main, cross),
                }
            }
        };

        let main_count = match axis {
            ScrollAxis::Horizontal => columns,
            ScrollAxis::Vertical => rows,
        };
        let main_extent = self.padding.total(axis) + main_stride * main_count as f32;
        let content_size = Vec2::ZERO
            .with_along(axis, main_extent)
            .with_along(cross_axis, viewport.along(cross_axis));

        Ok(GridLayout {
            columns,
            rows,
            content_size,
            axis,
        })
    }

    /// A layout with no cells: just the padding along the scroll axis.
    pub fn empty_layout(&self, viewport: Vec2) -> GridLayout {
        let axis = self.axis;
        let content_size = Vec2::ZERO
            .with_along(axis, self.padding.total(axis))
            .with_along(axis.cross(), viewport.along(axis.cross()));
        GridLayout {
            columns: 0,
            rows: 0,
            content_size,
            axis,
        }
    }

    /// Top-left position of the cell holding `index` (y-down, relative to the content origin).
    pub fn position_of(&self, index: usize, layout: &GridLayout) -> Vec2 {
        let (col, row) = match self.axis.start_axis() {
            ScrollAxis::Horizontal => {
                let per_line = layout.columns.max(1);
                (index % per_line, index / per_line)
            }
            ScrollAxis::Vertical => {
                let per_line = layout.rows.max(1);
                (index / per_line, index % per_line)
            }
        };
        Vec2::new(
            self.padding.left + self.stride(ScrollAxis::Horizontal) * col as f32,
            self.padding.top + self.stride(ScrollAxis::Vertical) * row as f32,
        )
    }

    /// Index of the line (along the scroll axis) that holds `index`.
    pub fn line_of(&self, index: usize, layout: &GridLayout) -> usize {
        index / layout.cross_count().max(1)
    }

    /// Distance from the content origin to the leading edge of `line`.
    pub fn line_start(&self, line: usize) -> f32 {
        self.padding.leading(self.axis) + self.stride(self.axis) * line as f32
    }

    /// Cells needed to cover `viewport`, with one extra line of overscan on the scroll axis.
    ///
    /// The cross-axis count is the layout's, so a contiguous run of `capacity` indexes starting
    /// on a line boundary always covers whole lines.
    pub fn visible_cells(&self, viewport: Vec2, layout: &GridLayout) -> VisibleCells {
        let axis = self.axis;
        let stride = self.stride(axis);
        if !(stride.is_finite() && stride > 0.0) {
            return VisibleCells::default();
        }
        let lines = (viewport.along(axis) - self.padding.leading(axis)) / stride;
        let main = math::ceil_to_usize(lines).max(1) + 1;
        let cross = layout.cross_count().max(1);
        match axis {
            ScrollAxis::Vertical => VisibleCells {
                columns: cross,
                rows: main,
            },
            ScrollAxis::Horizontal => VisibleCells {
                columns: main,
                rows: cross,
            },
        }
    }
}
