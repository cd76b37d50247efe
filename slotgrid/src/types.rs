/// A 2D vector used for sizes, spacings and positions (logical pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the component along `axis`.
    pub fn along(self, axis: ScrollAxis) -> f32 {
        match axis {
            ScrollAxis::Horizontal => self.x,
            ScrollAxis::Vertical => self.y,
        }
    }

    /// Returns a copy with the component along `axis` replaced.
    pub fn with_along(self, axis: ScrollAxis, value: f32) -> Self {
        match axis {
            ScrollAxis::Horizontal => Self { x: value, ..self },
            ScrollAxis::Vertical => Self { y: value, ..self },
        }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }
}

impl core::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Insets on the four sides of the content rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Padding {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Inset before the first cell along `axis` (left or top).
    pub fn leading(&self, axis: ScrollAxis) -> f32 {
        match axis {
            ScrollAxis::Horizontal => self.left,
            ScrollAxis::Vertical => self.top,
        }
    }

    /// Sum of both insets along `axis`.
    pub fn total(&self, axis: ScrollAxis) -> f32 {
        match axis {
            ScrollAxis::Horizontal => self.left + self.right,
            ScrollAxis::Vertical => self.top + self.bottom,
        }
    }
}

/// The axis along which content scrolls (and cells are virtualized).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAxis {
    Horizontal,
    #[default]
    Vertical,
}

impl ScrollAxis {
    /// The other axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// The axis cells are filled along first.
    ///
    /// Vertical lists fill row by row, horizontal lists column by column, so that a run of
    /// consecutive indexes always covers whole lines perpendicular to the scroll direction.
    pub fn start_axis(self) -> Self {
        self.cross()
    }
}

/// Policy fixing one grid dimension independent of viewport size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// The cross-axis cell count follows the viewport.
    #[default]
    Flexible,
    FixedColumnCount(usize),
    FixedRowCount(usize),
}

impl Constraint {
    /// Returns the constraint with its count floored to 1.
    pub fn sanitized(self) -> Self {
        match self {
            Self::Flexible => Self::Flexible,
            Self::FixedColumnCount(n) => Self::FixedColumnCount(n.max(1)),
            Self::FixedRowCount(n) => Self::FixedRowCount(n.max(1)),
        }
    }
}

/// Where an index should land when scrolling to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
}
