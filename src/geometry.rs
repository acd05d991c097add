//! Fundamental geometric types for bridge modelling.

use nalgebra::Vector2;

/// Two dimensional vector used for positions and member forces.
///
/// Direction information is exposed through the trigonometric accessors
/// rather than an explicit angle, which is all the force-balance solve needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    /// Component along the global X axis.
    pub x: f64,
    /// Component along the global Y axis.
    pub y: f64,
}

impl Vec2 {
    /// Create a [`Vec2`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the vector into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Euclidean length of the vector.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.to_vector().norm()
    }

    /// Sine of the direction angle, `y / |v|`.
    #[must_use]
    pub fn sin(self) -> f64 {
        self.y / self.magnitude()
    }

    /// Cosine of the direction angle, `x / |v|`.
    #[must_use]
    pub fn cos(self) -> f64 {
        self.x / self.magnitude()
    }

    /// Tangent of the direction angle, `y / x`.
    #[must_use]
    pub fn tan(self) -> f64 {
        self.y / self.x
    }

    /// Resize the vector so its length equals `length`, keeping its direction.
    ///
    /// A negative `length` flips the direction. The result is non-finite when
    /// the vector has zero magnitude.
    #[must_use]
    pub fn scaled(self, length: f64) -> Self {
        self * (length / self.magnitude())
    }

    /// Component-wise midpoint between two vectors.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// True when both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Vector2<f64>> for Vec2 {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Vec2> for Vector2<f64> {
    fn from(value: Vec2) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Vec2`] instances.
///
/// # Examples
/// ```
/// use archspan::vec2;
///
/// let origin = vec2(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn vec2(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

/// Reference curve of the bridge deck: a downward parabola with its peak at
/// `x = span` and passing through height zero at `x = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchProfile {
    /// Divisor applied to the squared-span difference; larger values flatten
    /// the arch. Must be positive for a meaningful bridge.
    height_scale: f64,
    /// Full horizontal extent of the bridge in model units.
    span: f64,
}

impl ArchProfile {
    /// Create a profile from its height divisor and span.
    #[must_use]
    pub const fn new(height_scale: f64, span: f64) -> Self {
        Self { height_scale, span }
    }

    /// Height divisor of the parabola.
    #[must_use]
    pub const fn height_scale(&self) -> f64 {
        self.height_scale
    }

    /// Full horizontal extent of the bridge.
    #[must_use]
    pub const fn span(&self) -> f64 {
        self.span
    }

    /// Deck height at horizontal position `x`.
    ///
    /// Evaluable for any real `x` but only meaningful on `0 <= x <= span`.
    #[must_use]
    pub fn height(&self, x: f64) -> f64 {
        let highest = self.span * self.span;
        let diff = (self.span - x) * (self.span - x);
        (highest - diff) / self.height_scale
    }

    /// Peak deck height, reached at `x = span`.
    #[must_use]
    pub fn peak_height(&self) -> f64 {
        self.height(self.span)
    }

    /// The fixed central anchor every joint ties back to, at `(span, 0)`.
    #[must_use]
    pub fn hub(&self) -> Vec2 {
        Vec2::new(self.span, 0.0)
    }
}
