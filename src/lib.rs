//! Collision and motion core for a 2D platformer.
//!
//! Bodies are axis-aligned boxes (or circles, treated by their bounding box when moving).
//! Each tick, every dynamic body asks the swept solver how much of its velocity it can
//! apply before first touching another body, scales its velocity by that fraction and moves.

pub mod body;
pub mod clock;
pub mod config;
pub mod error;
pub mod narrow;
pub mod probe;
pub mod shape;
pub mod swept;
pub mod world;

pub use body::{BodyKind, RigidBody};
pub use clock::TickClock;
pub use config::WorldConfig;
pub use error::{ConfigError, ShapeError, WorldError};
pub use probe::{Contact, LogProbe, NoProbe, Probe};
pub use shape::{Circlef, RectBuilder, Rectanglef, Shape};
pub use world::{BodyHandle, Commands, World};

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(feature = "f64")]
pub type Fp = f64;

/// Componentwise 2D vector. Arithmetic against another vector or a scalar broadcast to
/// both components returns a new vector; `+=` and friends are the in-place forms.
///
/// Division follows IEEE-754: dividing by a zero component yields an infinity (or NaN for `0/0`).
#[cfg(not(feature = "f64"))]
pub type Vector2f = glam::Vec2;
#[cfg(feature = "f64")]
pub type Vector2f = glam::DVec2;

pub(crate) const PI: Fp = std::f64::consts::PI as Fp;
