//! Swept AABB time of impact.
//!
//! Rather than testing where a box ends up, each axis is measured in "fractions of this tick's
//! velocity": how far along its motion the mover's leading edge reaches an obstacle (entry) and
//! how far until its trailing edge leaves it (exit). The overlap of both axes' windows is the
//! span during which the boxes intersect. Fast movers can't tunnel through thin obstacles this way.

use crate::{
    probe::{Contact, NoProbe, Probe},
    shape::Rectanglef,
    Fp, Vector2f,
};

/// Entry and exit times of a sweep that hits, per axis, plus the combined entry time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub entry: Vector2f,
    pub exit: Vector2f,
    /// Fraction of the velocity that can be travelled before touching, in `0..=1`.
    pub time: Fp,
}

// ---------- Sweep Helper Functions ---------- //

#[inline]
fn axis_times(vel: Fp, c_min: Fp, c_max: Fp, o_min: Fp, o_max: Fp) -> Option<(Fp, Fp)> {
    //! Returns the entry and exit times along one axis, or `None` if the boxes can never meet on it.
    if vel == 0.0 {
        // a still axis constrains nothing, but only while the boxes already overlap on it
        if c_min < o_max && c_max > o_min {
            Some((Fp::NEG_INFINITY, Fp::INFINITY))
        } else {
            None
        }
    } else {
        let (entry, exit) = if vel > 0.0 {
            (o_min - c_max, o_max - c_min)
        } else {
            (o_max - c_min, o_min - c_max)
        };
        Some((entry / vel, exit / vel))
    }
}

// ---------- Sweep ---------- //

pub fn sweep(collider: &Rectanglef, velocity: Vector2f, obstacle: &Rectanglef) -> Option<Sweep> {
    //! Sweeps `collider` along `velocity` against a static `obstacle`.
    //! Returns `None` if the full velocity can be applied without touching it.
    let (c_min, c_max) = (collider.min(), collider.max());
    let (o_min, o_max) = (obstacle.min(), obstacle.max());

    let (tx_entry, tx_exit) = axis_times(velocity.x, c_min.x, c_max.x, o_min.x, o_max.x)?;
    let (ty_entry, ty_exit) = axis_times(velocity.y, c_min.y, c_max.y, o_min.y, o_max.y)?;

    let entry = Fp::max(tx_entry, ty_entry);
    let exit = Fp::min(tx_exit, ty_exit);
    if entry > exit || (tx_entry < 0.0 && ty_entry < 0.0) || tx_entry > 1.0 || ty_entry > 1.0 {
        return None;
    }

    Some(Sweep {
        entry: Vector2f::new(tx_entry, ty_entry),
        exit: Vector2f::new(tx_exit, ty_exit),
        time: entry,
    })
}

#[inline]
pub fn time_of_impact<'a, I>(collider: &Rectanglef, velocity: Vector2f, obstacles: I) -> Fp
where
    I: IntoIterator<Item = &'a Rectanglef>,
{
    //! Returns the largest fraction of `velocity`, in `0..=1`, that `collider` can move without
    //! penetrating any of `obstacles`. `1.0` if nothing is in the way.
    time_of_impact_probed(collider, velocity, obstacles, &mut NoProbe)
}

pub fn time_of_impact_probed<'a, I, P>(collider: &Rectanglef, velocity: Vector2f, obstacles: I, probe: &mut P) -> Fp
where
    I: IntoIterator<Item = &'a Rectanglef>,
    P: Probe + ?Sized,
{
    //! `time_of_impact`, reporting every constraining obstacle to `probe`.
    let mut earliest: Fp = 1.0;
    for (index, obstacle) in obstacles.into_iter().enumerate() {
        if let Some(sweep) = sweep(collider, velocity, obstacle) {
            probe.contact(&Contact {
                index,
                collider: *collider,
                obstacle: *obstacle,
                velocity,
                sweep,
            });
            if sweep.time < earliest {
                earliest = sweep.time;
            }
        }
    }
    earliest
}
