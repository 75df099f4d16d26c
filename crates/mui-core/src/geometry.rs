#![forbid(unsafe_code)]

//! Points-based geometry used by gestures and translations.

/// Layout axis a single-axis interaction moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// Project a vector onto this axis.
    #[inline]
    #[must_use]
    pub const fn component(self, v: Vector) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Build a vector that is `value` along this axis and zero across it.
    #[inline]
    #[must_use]
    pub const fn vector(self, value: f64) -> Vector {
        match self {
            Self::Horizontal => Vector::new(value, 0.0),
            Self::Vertical => Vector::new(0.0, value),
        }
    }

    /// The other axis.
    #[inline]
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A 2D vector in points (translation, velocity).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A frame size in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Length along `axis`.
    #[inline]
    #[must_use]
    pub const fn extent(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_and_vector_are_inverse_on_axis() {
        let v = Axis::Vertical.vector(7.0);
        assert_eq!(v, Vector::new(0.0, 7.0));
        assert_eq!(Axis::Vertical.component(v), 7.0);
        assert_eq!(Axis::Horizontal.component(v), 0.0);
    }

    #[test]
    fn cross_flips() {
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
        assert_eq!(Axis::Vertical.cross(), Axis::Horizontal);
    }

    #[test]
    fn size_extent() {
        let size = Size::new(320.0, 44.0);
        assert_eq!(size.extent(Axis::Horizontal), 320.0);
        assert_eq!(size.extent(Axis::Vertical), 44.0);
    }

    #[test]
    fn vector_arithmetic() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(0.5, -1.0);
        assert_eq!(a + b, Vector::new(1.5, 1.0));
        assert_eq!(a - b, Vector::new(0.5, 3.0));
    }
}
