//! Discrete (non-swept) overlap tests between shapes.
//!
//! These answer "are these touching right now?", for checks outside of the solver such as
//! triggers or editor tooling. Moving bodies are handled by the `swept` module instead.

use crate::shape::{Circlef, Rectanglef, Shape};

// ---------- Pairwise tests ---------- //

#[inline]
pub fn rect_to_rect(a: &Rectanglef, b: &Rectanglef) -> bool {
    //! Returns whether two rectangles overlap. Rectangles that only share an edge do not.
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    !(a_min.y >= b_max.y // above
        || a_max.y <= b_min.y // below
        || a_min.x >= b_max.x // right
        || a_max.x <= b_min.x) // left
}

#[inline]
pub fn circle_to_circle(a: &Circlef, b: &Circlef) -> bool {
    //! Returns whether two circles overlap, tangent circles included.
    let rad = a.radius() + b.radius();
    (a.position - b.position).length_squared() <= rad * rad
}

#[inline]
pub fn rect_to_circle(rect: &Rectanglef, circle: &Circlef) -> bool {
    //! Returns whether the circle's centre lies strictly closer than its radius to the rectangle.
    let closest = circle.position.clamp(rect.min(), rect.max());
    (circle.position - closest).length() < circle.radius()
}

#[inline]
pub fn shape_test(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Rect(r1), Shape::Rect(r2)) => rect_to_rect(r1, r2),
        (Shape::Circle(c1), Shape::Circle(c2)) => circle_to_circle(c1, c2),
        (Shape::Rect(r), Shape::Circle(c)) | (Shape::Circle(c), Shape::Rect(r)) => rect_to_circle(r, c),
    }
}

// ---------- Overlap ---------- //

pub trait Overlap {
    fn rect_test(&self, rect: &Rectanglef) -> bool;
    fn circle_test(&self, circle: &Circlef) -> bool;

    fn shape_test(&self, shape: &Shape) -> bool {
        match shape {
            Shape::Rect(r) => self.rect_test(r),
            Shape::Circle(c) => self.circle_test(c),
        }
    }
}

impl Overlap for Rectanglef {
    #[inline]
    fn rect_test(&self, rect: &Rectanglef) -> bool {
        rect_to_rect(self, rect)
    }
    #[inline]
    fn circle_test(&self, circle: &Circlef) -> bool {
        rect_to_circle(self, circle)
    }
}
impl Overlap for Circlef {
    #[inline]
    fn rect_test(&self, rect: &Rectanglef) -> bool {
        rect_to_circle(rect, self)
    }
    #[inline]
    fn circle_test(&self, circle: &Circlef) -> bool {
        circle_to_circle(self, circle)
    }
}
impl Overlap for Shape {
    fn rect_test(&self, rect: &Rectanglef) -> bool {
        match self {
            Shape::Rect(r) => r.rect_test(rect),
            Shape::Circle(c) => c.rect_test(rect),
        }
    }
    fn circle_test(&self, circle: &Circlef) -> bool {
        match self {
            Shape::Rect(r) => r.circle_test(circle),
            Shape::Circle(c) => c.circle_test(circle),
        }
    }
}
