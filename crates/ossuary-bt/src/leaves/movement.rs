use ossuary_core::math::delta_angle;
use ossuary_core::{
    DeterministicRng, EntityId, Grabbing, Navigation, PathStatus, Shared, Spatial, SpatialMut,
    TargetRef, TickContext, Vec3,
};

use crate::bt::{Node, Status};

const WANDER_STREAM: u64 = 0x5741_4e44;
const ROTATE_STREAM: u64 = 0x524f_5441;

enum Goal {
    Target(TargetRef),
    Route { points: Vec<Vec3>, index: usize },
}

/// Walks to a target entity or around a waypoint route.
///
/// The destination is requested once and only re-requested when an entity target has moved
/// further than the arrival distance from where it was requested. Reaching a waypoint succeeds
/// and moves on to the next one, wrapping at the end of the route.
pub struct MoveTo {
    goal: Goal,
    arrival: f32,
    requested: Option<Vec3>,
}

impl MoveTo {
    pub fn target(target: impl Into<TargetRef>, arrival: f32) -> Self {
        Self {
            goal: Goal::Target(target.into()),
            arrival,
            requested: None,
        }
    }

    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn route(points: Vec<Vec3>, arrival: f32) -> Self {
        assert!(!points.is_empty(), "a route needs at least one waypoint");
        Self {
            goal: Goal::Route { points, index: 0 },
            arrival,
            requested: None,
        }
    }

    /// Waypoint the agent is currently heading for (routes only).
    pub fn waypoint(&self) -> Option<usize> {
        match &self.goal {
            Goal::Route { index, .. } => Some(*index),
            Goal::Target(_) => None,
        }
    }

    fn destination<W: Spatial + Shared>(&self, world: &W) -> Option<Vec3> {
        match &self.goal {
            Goal::Target(target) => world.position(target.resolve(world)?),
            Goal::Route { points, index } => points.get(*index).copied(),
        }
    }

    fn arrive(&mut self) {
        self.requested = None;
        if let Goal::Route { points, index } = &mut self.goal {
            *index = (*index + 1) % points.len();
        }
    }
}

impl<W> Node<W> for MoveTo
where
    W: Spatial + Navigation + Shared + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let (Some(pos), Some(dest)) = (world.position(agent), self.destination(world)) else {
            self.requested = None;
            return Status::Failure;
        };

        if pos.distance(dest) < self.arrival {
            self.arrive();
            return Status::Success;
        }

        let stale = self
            .requested
            .map_or(true, |at| at.distance(dest) > self.arrival);
        if stale {
            tracing::trace!(%agent, ?dest, "requesting destination");
            world.set_destination(agent, dest);
            self.requested = Some(dest);
        }

        if world.path_status(agent) == PathStatus::Invalid {
            self.requested = None;
            return Status::Failure;
        }
        Status::Running
    }
}

/// Walks to the throwable cached by [`crate::ThrowableInView`] (or [`super::FocusOnSound`])
/// until it is within grab range.
#[derive(Debug, Clone, Default)]
pub struct MoveToNearestThrowable {
    requested: Option<Vec3>,
}

impl MoveToNearestThrowable {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<W> Node<W> for MoveToNearestThrowable
where
    W: Spatial + Navigation + Grabbing + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let found = world.nearest_throwable(agent).and_then(|t| world.position(t));
        let (Some(pos), Some(dest), Some(profile)) =
            (world.position(agent), found, world.grab_profile(agent))
        else {
            self.requested = None;
            return Status::Failure;
        };

        if pos.distance(dest) < profile.grab_range {
            self.requested = None;
            return Status::Success;
        }

        let stale = self
            .requested
            .map_or(true, |at| at.distance(dest) > profile.grab_range);
        if stale {
            world.set_destination(agent, dest);
            self.requested = Some(dest);
        }

        if world.path_status(agent) == PathStatus::Invalid {
            self.requested = None;
            return Status::Failure;
        }
        Status::Running
    }
}

/// Shared walk-to-a-ray-hit state of [`MoveForward`] and [`RandomWalk`].
#[derive(Debug, Clone)]
struct RayWalk {
    arrival: f32,
    destination: Option<Vec3>,
}

impl RayWalk {
    fn new(arrival: f32) -> Self {
        Self {
            arrival,
            destination: None,
        }
    }

    fn drive<W>(&mut self, agent: EntityId, world: &mut W, direction: Vec3) -> Status
    where
        W: Spatial + Navigation,
    {
        if self.destination.is_none() {
            let Some(pos) = world.position(agent) else {
                return Status::Failure;
            };
            let Some(hit) = world.raycast(pos, direction, agent) else {
                return Status::Failure;
            };
            tracing::trace!(%agent, point = ?hit.point, "walking to ray hit");
            world.set_destination(agent, hit.point);
            self.destination = Some(hit.point);
        }

        if world.path_status(agent) == PathStatus::Invalid {
            self.destination = None;
            return Status::Failure;
        }
        match world.remaining_distance(agent) {
            Some(left) if left < self.arrival => {
                self.destination = None;
                Status::Success
            }
            Some(_) => Status::Running,
            None => {
                self.destination = None;
                Status::Failure
            }
        }
    }
}

/// Walks to whatever is straight ahead.
#[derive(Debug, Clone)]
pub struct MoveForward {
    walk: RayWalk,
}

impl MoveForward {
    pub fn new(arrival: f32) -> Self {
        Self {
            walk: RayWalk::new(arrival),
        }
    }
}

impl<W> Node<W> for MoveForward
where
    W: Spatial + Navigation + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let forward = world.forward(agent).unwrap_or(Vec3::FORWARD);
        self.walk.drive(agent, world, forward)
    }
}

/// Walks to whatever lies in a random horizontal direction.
///
/// The direction is drawn from the agent's stream for the current tick, so a replay with the
/// same seed wanders the same way.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    walk: RayWalk,
}

impl RandomWalk {
    pub fn new(arrival: f32) -> Self {
        Self {
            walk: RayWalk::new(arrival),
        }
    }
}

impl<W> Node<W> for RandomWalk
where
    W: Spatial + Navigation + 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let mut rng = ctx.rng_for_agent(agent, WANDER_STREAM ^ ctx.tick);
        let x = rng.next_f32_range(-1.0, 1.0);
        let z = rng.next_f32_range(-1.0, 1.0);
        let direction = Vec3::new(x, 0.0, z).normalized().unwrap_or(Vec3::FORWARD);
        self.walk.drive(agent, world, direction)
    }
}

/// Checks that the target sits on walkable ground and stores it as the agent's current target.
#[derive(Debug, Clone, Copy)]
pub struct SetTarget {
    pub target: TargetRef,
    pub sample_distance: f32,
}

impl SetTarget {
    pub fn new(target: impl Into<TargetRef>, sample_distance: f32) -> Self {
        Self {
            target: target.into(),
            sample_distance,
        }
    }
}

impl<W> Node<W> for SetTarget
where
    W: Spatial + Navigation + Shared + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let Some(at) = self.target.resolve(world).and_then(|t| world.position(t)) else {
            return Status::Failure;
        };
        match world.sample_position(at, self.sample_distance) {
            Some(point) => {
                world.set_current_target(agent, point);
                Status::Success
            }
            None => {
                tracing::trace!(%agent, "target is not on walkable ground");
                Status::Failure
            }
        }
    }
}

/// Turns the agent by a random 120..210 degrees, at most `turn_rate` degrees per second.
#[derive(Debug, Clone)]
pub struct Rotate {
    turn_rate: f32,
    min_degrees: f32,
    max_degrees: f32,
    target_yaw: Option<f32>,
}

impl Rotate {
    pub fn new(turn_rate: f32) -> Self {
        Self {
            turn_rate,
            min_degrees: 120.0,
            max_degrees: 210.0,
            target_yaw: None,
        }
    }

    pub fn with_range(mut self, min_degrees: f32, max_degrees: f32) -> Self {
        self.min_degrees = min_degrees;
        self.max_degrees = max_degrees;
        self
    }
}

impl<W> Node<W> for Rotate
where
    W: SpatialMut + 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let Some(forward) = world.forward(agent) else {
            self.target_yaw = None;
            return Status::Failure;
        };
        let yaw = forward.yaw_degrees();
        let (lo, hi) = (self.min_degrees, self.max_degrees);
        let target = *self.target_yaw.get_or_insert_with(|| {
            let mut rng = ctx.rng_for_agent(agent, ROTATE_STREAM ^ ctx.tick);
            yaw + rng.next_f32_range(lo, hi)
        });

        let remaining = delta_angle(yaw, target);
        let step = self.turn_rate * ctx.dt_seconds;
        if remaining.abs() <= step.max(0.1) {
            world.set_forward(agent, Vec3::from_yaw_degrees(target));
            self.target_yaw = None;
            return Status::Success;
        }

        let turned = yaw + step.copysign(remaining);
        world.set_forward(agent, Vec3::from_yaw_degrees(turned));
        Status::Running
    }
}
