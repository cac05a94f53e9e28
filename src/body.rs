use crate::{
    probe::{NoProbe, Probe},
    shape::{Rectanglef, Shape},
    swept, Fp, Vector2f,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Moves by its velocity, clamped against everything else.
    Dynamic,
    /// Level geometry. Never moves, but obstructs dynamic bodies.
    Static,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// Collider
    shape: Shape,
    /// Velocity, in units per tick
    velocity: Vector2f,
    kind: BodyKind,
}
impl RigidBody {
    pub fn dynamic(shape: impl Into<Shape>) -> RigidBody {
        RigidBody {
            shape: shape.into(),
            velocity: Vector2f::ZERO,
            kind: BodyKind::Dynamic,
        }
    }
    pub fn fixed(shape: impl Into<Shape>) -> RigidBody {
        RigidBody {
            shape: shape.into(),
            velocity: Vector2f::ZERO,
            kind: BodyKind::Static,
        }
    }

    #[inline]
    pub fn position(&self) -> Vector2f {
        self.shape.position()
    }
    #[inline]
    pub fn size(&self) -> Vector2f {
        self.shape.size()
    }
    #[inline]
    pub fn bounds(&self) -> Rectanglef {
        //! The box this body sweeps and is swept against.
        self.shape.bounding_box()
    }
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
    #[inline]
    pub fn kind(&self) -> BodyKind {
        self.kind
    }
    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    #[inline]
    pub fn velocity(&self) -> Vector2f {
        self.velocity
    }
    #[inline]
    pub fn set_velocity(&mut self, velocity: Vector2f) {
        self.velocity = velocity;
    }

    pub fn teleport(&mut self, offset: Vector2f) {
        //! Moves the body without any collision checks.
        self.shape.translate(offset);
    }

    pub fn solve<'a, I, P>(&self, obstacles: I, probe: &mut P) -> Fp
    where
        I: IntoIterator<Item = &'a Rectanglef>,
        P: Probe + ?Sized,
    {
        //! Returns the fraction of this tick's velocity the body can travel. Static bodies never move.
        if self.is_static() {
            return 1.0;
        }
        swept::time_of_impact_probed(&self.bounds(), self.velocity, obstacles, probe)
    }

    pub fn integrate(&mut self, fraction: Fp) {
        //! Scales velocity by `fraction` and moves by the result.
        if self.is_static() {
            return;
        }
        self.velocity *= fraction;
        self.shape.translate(self.velocity);
    }

    pub fn update<'a, I>(&mut self, dt: Fp, obstacles: I)
    where
        I: IntoIterator<Item = &'a Rectanglef>,
    {
        //! Advances one tick against `obstacles`, which must not include this body.
        //!
        //! `dt` does not scale the motion: velocity is already per tick.
        let fraction = self.solve(obstacles, &mut NoProbe);
        log::trace!("dt {}: clamped velocity {} by {}", dt, self.velocity, fraction);
        self.integrate(fraction);
    }
}
