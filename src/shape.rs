//! Collision volumes: axis-aligned rectangles and circles.

use crate::{error::ShapeError, Fp, Vector2f, PI};

/// Largest radius a `Circlef` may hold.
pub const MAX_RADIUS: Fp = 500.0;

// ---------- Rectangle ---------- //

/// An axis-aligned box occupying `[position, position + size)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectanglef {
    /// Minimum corner.
    pub position: Vector2f,
    /// Width and height, never negative.
    pub size: Vector2f,
}
impl Rectanglef {
    #[inline]
    pub fn new(position: Vector2f, size: Vector2f) -> Rectanglef {
        assert!(size.x >= 0.0 && size.y >= 0.0, "negative rectangle size {}", size);
        Rectanglef { position, size }
    }
    #[inline]
    pub fn from_xywh(x: Fp, y: Fp, width: Fp, height: Fp) -> Rectanglef {
        Rectanglef::new(Vector2f::new(x, y), Vector2f::new(width, height))
    }
    pub fn builder() -> RectBuilder {
        RectBuilder::default()
    }

    #[inline]
    pub fn min(&self) -> Vector2f {
        self.position
    }
    #[inline]
    pub fn max(&self) -> Vector2f {
        self.position + self.size
    }
    #[inline]
    pub fn width(&self) -> Fp {
        self.size.x
    }
    #[inline]
    pub fn height(&self) -> Fp {
        self.size.y
    }

    #[inline]
    pub fn translate(self, offset: Vector2f) -> Rectanglef {
        Rectanglef {
            position: self.position + offset,
            size: self.size,
        }
    }
}

/// Fallible, keyword-style rectangle construction.
///
/// A position may be given whole or per component, as may a size, but not both ways at once.
/// Components left unset default to zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectBuilder {
    position: Option<Vector2f>,
    x: Option<Fp>,
    y: Option<Fp>,
    size: Option<Vector2f>,
    width: Option<Fp>,
    height: Option<Fp>,
}
impl RectBuilder {
    pub fn position(mut self, position: Vector2f) -> Self {
        self.position = Some(position);
        self
    }
    pub fn x(mut self, x: Fp) -> Self {
        self.x = Some(x);
        self
    }
    pub fn y(mut self, y: Fp) -> Self {
        self.y = Some(y);
        self
    }
    pub fn size(mut self, size: Vector2f) -> Self {
        self.size = Some(size);
        self
    }
    pub fn width(mut self, width: Fp) -> Self {
        self.width = Some(width);
        self
    }
    pub fn height(mut self, height: Fp) -> Self {
        self.height = Some(height);
        self
    }

    pub fn build(self) -> Result<Rectanglef, ShapeError> {
        let position = match (self.position, self.x, self.y) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => return Err(ShapeError::PositionConflict),
            (Some(p), None, None) => p,
            (None, x, y) => Vector2f::new(x.unwrap_or(0.0), y.unwrap_or(0.0)),
        };
        let size = match (self.size, self.width, self.height) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => return Err(ShapeError::SizeConflict),
            (Some(s), None, None) => s,
            (None, w, h) => Vector2f::new(w.unwrap_or(0.0), h.unwrap_or(0.0)),
        };

        if size.x < 0.0 || size.y < 0.0 {
            return Err(ShapeError::NegativeSize(size));
        }
        Ok(Rectanglef { position, size })
    }
}

// ---------- Circle ---------- //

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circlef {
    /// Centre.
    pub position: Vector2f,
    radius: Fp,
}
impl Circlef {
    /// `radius` is folded into `0..=MAX_RADIUS`, see `set_radius`.
    pub fn new(position: Vector2f, radius: Fp) -> Circlef {
        let mut circle = Circlef { position, radius: 1.0 };
        circle.set_radius(radius);
        circle
    }

    #[inline]
    pub fn radius(&self) -> Fp {
        self.radius
    }
    pub fn set_radius(&mut self, radius: Fp) {
        //! Negative radii are made positive, anything above `MAX_RADIUS` saturates.
        self.radius = radius.abs().min(MAX_RADIUS);
    }

    #[inline]
    pub fn diameter(&self) -> Fp {
        self.radius * 2.0
    }
    pub fn set_diameter(&mut self, diameter: Fp) {
        //! Negative diameters are made positive. Diameters above `MAX_RADIUS` snap to
        //! `2 * MAX_RADIUS` before halving, so a diameter of 600 gives the largest circle
        //! rather than a radius of 300.
        let mut diameter = diameter.abs();
        if diameter > MAX_RADIUS {
            diameter = MAX_RADIUS * 2.0;
        }
        self.radius = diameter / 2.0;
    }

    #[inline]
    pub fn area(&self) -> Fp {
        PI * self.radius * self.radius
    }
    #[inline]
    pub fn circumference(&self) -> Fp {
        2.0 * PI * self.radius
    }

    #[inline]
    pub fn bounding_box(&self) -> Rectanglef {
        let splat = Vector2f::splat(self.radius);
        Rectanglef {
            position: self.position - splat,
            size: splat * 2.0,
        }
    }
}
impl Default for Circlef {
    fn default() -> Self {
        Circlef {
            position: Vector2f::ZERO,
            radius: 1.0,
        }
    }
}

// ---------- Shape ---------- //

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect(Rectanglef),
    Circle(Circlef),
}
impl Shape {
    #[inline]
    pub fn position(&self) -> Vector2f {
        //! Minimum corner of a rectangle, centre of a circle.
        match self {
            Shape::Rect(r) => r.position,
            Shape::Circle(c) => c.position,
        }
    }
    #[inline]
    pub fn size(&self) -> Vector2f {
        //! Extents of the shape's bounding box.
        match self {
            Shape::Rect(r) => r.size,
            Shape::Circle(c) => Vector2f::splat(c.diameter()),
        }
    }
    #[inline]
    pub fn bounding_box(&self) -> Rectanglef {
        match self {
            Shape::Rect(r) => *r,
            Shape::Circle(c) => c.bounding_box(),
        }
    }

    #[inline]
    pub fn translate(&mut self, offset: Vector2f) {
        match self {
            Shape::Rect(r) => r.position += offset,
            Shape::Circle(c) => c.position += offset,
        }
    }
}

impl From<Rectanglef> for Shape {
    fn from(rect: Rectanglef) -> Self {
        Shape::Rect(rect)
    }
}
impl From<Circlef> for Shape {
    fn from(circle: Circlef) -> Self {
        Shape::Circle(circle)
    }
}
