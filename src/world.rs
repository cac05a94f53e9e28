//! The simulation world: an arena of bodies addressed by stable handles.

use crate::{
    body::RigidBody,
    clock::TickClock,
    config::WorldConfig,
    error::{ConfigError, WorldError},
    narrow,
    probe::{LogProbe, NoProbe, Probe},
    shape::Rectanglef,
    Fp, Vector2f,
};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};

/// Stable reference to a body in a `World`. Never reused after the body is despawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(u32);

impl BodyHandle {
    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }
}
impl Display for BodyHandle {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------- Commands ---------- //

#[derive(Debug)]
enum Command {
    Spawn(BodyHandle, RigidBody),
    Despawn(BodyHandle),
}

/// Registration changes requested while a tick is in progress.
///
/// They are applied in order once every body has been updated, so the set of bodies never
/// changes mid-tick.
#[derive(Debug)]
pub struct Commands {
    next_handle: u32,
    queue: Vec<Command>,
}
impl Commands {
    fn new(next_handle: u32) -> Commands {
        Commands { next_handle, queue: vec![] }
    }

    pub fn spawn(&mut self, body: RigidBody) -> BodyHandle {
        //! Reserves a handle now; the body joins the world at the end of the tick.
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.queue.push(Command::Spawn(handle, body));
        handle
    }
    pub fn despawn(&mut self, handle: BodyHandle) {
        self.queue.push(Command::Despawn(handle));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// ---------- World ---------- //

pub struct World {
    bodies: IndexMap<BodyHandle, RigidBody, FnvBuildHasher>,
    next_handle: u32,
    clock: TickClock,
    probe: Box<dyn Probe>,
}

impl World {
    pub fn new(config: WorldConfig) -> Result<World, ConfigError> {
        config.validate()?;
        let clock = TickClock::new(config.ticks_per_second, config.max_frameskip);
        let probe: Box<dyn Probe> = if config.trace_contacts {
            Box::new(LogProbe::default())
        } else {
            Box::new(NoProbe)
        };

        Ok(World {
            bodies: IndexMap::with_hasher(FnvBuildHasher::default()),
            next_handle: 0,
            clock,
            probe,
        })
    }

    pub fn set_probe(&mut self, probe: impl Probe + 'static) {
        self.probe = Box::new(probe);
    }

    // ---------- Registration ---------- //

    pub fn spawn(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.insert(handle, body);
        handle
    }
    fn insert(&mut self, handle: BodyHandle, body: RigidBody) {
        log::debug!("spawned {:?} body {} at {}", body.kind(), handle, body.position());
        self.bodies.insert(handle, body);
    }

    pub fn despawn(&mut self, handle: BodyHandle) -> Result<RigidBody, WorldError> {
        // shift_remove keeps the update order of the remaining bodies stable
        let body = self.bodies.shift_remove(&handle).ok_or(WorldError::UnknownBody(handle))?;
        log::debug!("despawned body {}", handle);
        Ok(body)
    }

    fn apply(&mut self, commands: Commands) {
        self.next_handle = commands.next_handle;
        for command in commands.queue {
            match command {
                Command::Spawn(handle, body) => self.insert(handle, body),
                Command::Despawn(handle) => {
                    if let Err(e) = self.despawn(handle) {
                        log::warn!("queued despawn ignored: {}", e);
                    }
                }
            }
        }
    }

    // ---------- Access ---------- //

    #[inline]
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(&handle)
    }
    #[inline]
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(&handle)
    }
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(&handle)
    }
    pub fn len(&self) -> usize {
        self.bodies.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter().map(|(h, b)| (*h, b))
    }

    pub fn position(&self, handle: BodyHandle) -> Result<Vector2f, WorldError> {
        self.get(handle).map(RigidBody::position).ok_or(WorldError::UnknownBody(handle))
    }
    pub fn size(&self, handle: BodyHandle) -> Result<Vector2f, WorldError> {
        self.get(handle).map(RigidBody::size).ok_or(WorldError::UnknownBody(handle))
    }
    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vector2f) -> Result<(), WorldError> {
        let body = self.get_mut(handle).ok_or(WorldError::UnknownBody(handle))?;
        body.set_velocity(velocity);
        Ok(())
    }

    pub fn overlapping(&self, handle: BodyHandle) -> Result<Vec<BodyHandle>, WorldError> {
        //! Returns every other body whose shape currently overlaps this one's.
        let body = self.get(handle).ok_or(WorldError::UnknownBody(handle))?;
        Ok(self
            .bodies
            .iter()
            .filter(|(h, other)| **h != handle && narrow::shape_test(body.shape(), other.shape()))
            .map(|(h, _)| *h)
            .collect())
    }

    // ---------- Simulation ---------- //

    #[inline]
    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn step(&mut self, dt: Fp) {
        self.step_with(dt, |_, _, _| {});
    }

    pub fn step_with<F>(&mut self, dt: Fp, mut hook: F)
    where
        F: FnMut(BodyHandle, &RigidBody, &mut Commands),
    {
        //! Runs one tick, then calls `hook` on every body in update order. Changes queued on the
        //! `Commands` apply after the last body.
        //!
        //! Every body is solved against the others' positions from the start of the tick.
        //! Two dynamic bodies moving into each other can therefore overlap afterwards.
        let snapshot: Vec<(BodyHandle, Rectanglef)> = self.bodies.iter().map(|(h, b)| (*h, b.bounds())).collect();

        let probe = &mut *self.probe;
        let fractions: Vec<Fp> = self
            .bodies
            .iter()
            .map(|(handle, body)| {
                let obstacles = snapshot.iter().filter(|(h, _)| h != handle).map(|(_, r)| r);
                let fraction = body.solve(obstacles, &mut *probe);
                if fraction < 1.0 {
                    log::trace!("body {} clamped to {} of velocity {} (dt {})", handle, fraction, body.velocity(), dt);
                }
                fraction
            })
            .collect();

        let mut commands = Commands::new(self.next_handle);
        for ((handle, body), fraction) in self.bodies.iter_mut().zip(fractions) {
            body.integrate(fraction);
            hook(*handle, body, &mut commands);
        }
        self.apply(commands);
    }

    pub fn advance(&mut self, elapsed: f64) -> u32 {
        //! Feeds `elapsed` seconds to the clock and steps once per tick that falls due.
        let due = self.clock.advance(elapsed);
        let dt = self.clock.tick_length();
        for _ in 0..due {
            self.step(dt);
        }
        due
    }
}

impl Default for World {
    fn default() -> Self {
        World {
            bodies: IndexMap::with_hasher(FnvBuildHasher::default()),
            next_handle: 0,
            clock: TickClock::new(60, 5),
            probe: Box::new(NoProbe),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{probe::Contact, shape::Circlef};
    use std::{cell::RefCell, rc::Rc};

    fn square(x: Fp, y: Fp) -> Rectanglef {
        Rectanglef::from_xywh(x, y, 10.0, 10.0)
    }

    #[test]
    fn spawn_and_read() {
        let mut world = World::default();
        let a = world.spawn(RigidBody::dynamic(square(0.0, 0.0)));
        let b = world.spawn(RigidBody::fixed(square(20.0, 0.0)));
        assert_ne!(a, b);
        assert_eq!(world.len(), 2);
        assert_eq!(world.position(b), Ok(Vector2f::new(20.0, 0.0)));
        assert_eq!(world.size(a), Ok(Vector2f::new(10.0, 10.0)));
        assert_eq!(world.iter().map(|(h, _)| h).collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn despawn() {
        let mut world = World::default();
        let a = world.spawn(RigidBody::dynamic(square(0.0, 0.0)));
        let b = world.spawn(RigidBody::fixed(square(20.0, 0.0)));
        assert!(world.despawn(b).is_ok());
        assert_eq!(world.despawn(b), Err(WorldError::UnknownBody(b)));
        assert_eq!(world.position(b), Err(WorldError::UnknownBody(b)));
        assert_eq!(world.set_velocity(b, Vector2f::ONE), Err(WorldError::UnknownBody(b)));

        // the obstacle is gone, so nothing clamps the mover
        world.set_velocity(a, Vector2f::new(20.0, 0.0)).unwrap();
        world.step(1.0 / 60.0);
        assert_eq!(world.position(a), Ok(Vector2f::new(20.0, 0.0)));

        // handles are never reused
        let c = world.spawn(RigidBody::dynamic(square(0.0, 0.0)));
        assert!(c != a && c != b);
    }

    #[test]
    fn tick_integration() {
        let mut world = World::default();
        let a = world.spawn(RigidBody::dynamic(square(0.0, 0.0)));
        world.set_velocity(a, Vector2f::new(10.0, 0.0)).unwrap();
        world.step(1.0 / 60.0);
        assert_eq!(world.position(a), Ok(Vector2f::new(10.0, 0.0)));
        assert_eq!(world.get(a).unwrap().velocity(), Vector2f::new(10.0, 0.0));
    }

    #[test]
    fn blocked_by_wall() {
        let mut world = World::default();
        let a = world.spawn(RigidBody::dynamic(square(0.0, 0.0)));
        world.spawn(RigidBody::fixed(square(20.0, 0.0)));
        world.set_velocity(a, Vector2f::new(20.0, 0.0)).unwrap();

        world.step(1.0 / 60.0);
        assert_eq!(world.position(a), Ok(Vector2f::new(10.0, 0.0)));
        assert_eq!(world.get(a).unwrap().velocity(), Vector2f::new(10.0, 0.0));

        world.step(1.0 / 60.0);
        assert_eq!(world.position(a), Ok(Vector2f::new(10.0, 0.0)));
    }

    #[test]
    fn walking_on_tiles() {
        let mut world = World::default();
        for i in 0..10 {
            world.spawn(RigidBody::fixed(square(i as Fp * 10.0, 0.0)));
        }
        let player = world.spawn(RigidBody::dynamic(square(0.0, 10.0)));
        for _ in 0..5 {
            world.set_velocity(player, Vector2f::new(4.0, 0.0)).unwrap();
            world.step(1.0 / 60.0);
        }
        assert_eq!(world.position(player), Ok(Vector2f::new(20.0, 10.0)));
    }

    #[test]
    fn simultaneous_motion_can_overlap() {
        // both bodies solve against where the other was at the start of the tick
        let mut world = World::default();
        let a = world.spawn(RigidBody::dynamic(square(0.0, 0.0)));
        let b = world.spawn(RigidBody::dynamic(square(40.0, 0.0)));
        world.set_velocity(a, Vector2f::new(20.0, 0.0)).unwrap();
        world.set_velocity(b, Vector2f::new(-20.0, 0.0)).unwrap();
        world.step(1.0 / 60.0);

        assert_eq!(world.position(a), Ok(Vector2f::new(20.0, 0.0)));
        assert_eq!(world.position(b), Ok(Vector2f::new(20.0, 0.0)));
        assert_eq!(world.overlapping(a), Ok(vec![b]));
    }

    #[test]
    fn update_order_does_not_matter() {
        let run = |reverse: bool| {
            let mut bodies = vec![
                (square(0.0, 0.0), Vector2f::new(30.0, 0.0)),
                (square(25.0, 0.0), Vector2f::new(10.0, 0.0)),
            ];
            if reverse {
                bodies.reverse();
            }
            let mut world = World::default();
            for (rect, velocity) in bodies {
                let handle = world.spawn(RigidBody::dynamic(rect));
                world.set_velocity(handle, velocity).unwrap();
            }
            world.step(1.0 / 60.0);

            let mut positions: Vec<Vector2f> = world.iter().map(|(_, b)| b.position()).collect();
            positions.sort_by(|p1, p2| p1.x.partial_cmp(&p2.x).unwrap());
            positions
        };
        assert_eq!(run(false), run(true));
        assert_eq!(run(false), vec![Vector2f::new(15.0, 0.0), Vector2f::new(35.0, 0.0)]);
    }

    #[test]
    fn commands_apply_after_tick() {
        let mut world = World::default();
        let a = world.spawn(RigidBody::dynamic(square(0.0, 0.0)));
        let wall = world.spawn(RigidBody::fixed(square(20.0, 0.0)));
        world.set_velocity(a, Vector2f::new(20.0, 0.0)).unwrap();

        let mut spawned = None;
        let mut visited = vec![];
        world.step_with(1.0 / 60.0, |handle, _, commands| {
            visited.push(handle);
            if handle == a {
                // right in a's path, but it only joins once the tick is over
                spawned = Some(commands.spawn(RigidBody::fixed(square(12.0, 0.0))));
                commands.despawn(wall);
            }
        });
        let spawned = spawned.unwrap();

        assert_eq!(visited, vec![a, wall]);
        assert!(world.contains(spawned));
        assert!(!world.contains(wall));
        assert_eq!(world.position(a), Ok(Vector2f::new(10.0, 0.0)));
        assert_eq!(world.overlapping(a), Ok(vec![spawned]));

        // the new handle doesn't collide with ones spawned later
        let next = world.spawn(RigidBody::dynamic(square(100.0, 100.0)));
        assert!(next != spawned && next != a && next != wall);
    }

    #[test]
    fn queued_despawn_of_unknown_body() {
        let mut world = World::default();
        let a = world.spawn(RigidBody::dynamic(square(0.0, 0.0)));
        world.despawn(a).unwrap();
        let b = world.spawn(RigidBody::dynamic(square(0.0, 0.0)));
        world.step_with(1.0, |_, _, commands| commands.despawn(a));
        assert_eq!(world.len(), 1);
        assert!(world.contains(b));
    }

    #[test]
    fn overlapping_shapes() {
        let mut world = World::default();
        let a = world.spawn(RigidBody::fixed(square(0.0, 0.0)));
        let b = world.spawn(RigidBody::fixed(Circlef::new(Vector2f::new(12.0, 5.0), 3.0)));
        let c = world.spawn(RigidBody::fixed(square(10.0, 0.0))); // shares an edge with a
        world.spawn(RigidBody::fixed(Circlef::new(Vector2f::new(50.0, 50.0), 3.0)));

        assert_eq!(world.overlapping(a), Ok(vec![b]));
        assert_eq!(world.overlapping(b), Ok(vec![a, c]));
    }

    #[test]
    fn advance_runs_due_ticks() {
        let config = WorldConfig { ticks_per_second: 10, ..Default::default() };
        let mut world = World::new(config).unwrap();
        let a = world.spawn(RigidBody::dynamic(square(0.0, 0.0)));
        world.set_velocity(a, Vector2f::new(1.0, 0.0)).unwrap();

        assert_eq!(world.advance(0.25), 2);
        assert_eq!(world.position(a), Ok(Vector2f::new(2.0, 0.0)));
        assert_eq!(world.clock().ticks(), 2);
    }

    #[test]
    fn invalid_config() {
        let config = WorldConfig { ticks_per_second: 0, ..Default::default() };
        assert_eq!(World::new(config).err(), Some(ConfigError::ZeroTickRate));
    }

    #[test]
    fn probe_sees_contacts() {
        let contacts = Rc::new(RefCell::new(vec![]));
        let sink = contacts.clone();

        let mut world = World::default();
        let a = world.spawn(RigidBody::dynamic(square(0.0, 0.0)));
        world.spawn(RigidBody::fixed(square(20.0, 0.0)));
        world.set_probe(move |c: &Contact| sink.borrow_mut().push(c.sweep.time));
        world.set_velocity(a, Vector2f::new(20.0, 0.0)).unwrap();
        world.step(1.0 / 60.0);

        assert_eq!(*contacts.borrow(), vec![0.5]);
    }
}
