use ossuary_core::{
    EntityId, Grabbing, Hearing, Shared, Spatial, SpatialMut, TargetRef, Throwables, TickContext,
    Vec3,
};

use crate::bt::{Node, Status};

/// Picks up the throwable cached in the agent's nearest-throwable slot.
///
/// Fails when nothing is cached, when the object is already in someone's hand, or when the
/// agent is holding something else. Picking up what is already in hand succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pickup;

impl<W> Node<W> for Pickup
where
    W: Grabbing + Throwables + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let (Some(throwable), Some(profile)) =
            (world.nearest_throwable(agent), world.grab_profile(agent))
        else {
            return Status::Failure;
        };
        match world.held_throwable(agent) {
            Some(held) if held == throwable => return Status::Success,
            Some(_) => return Status::Failure,
            None => {}
        }
        if world.is_held(throwable) != Some(false) {
            return Status::Failure;
        }

        world.attach(throwable, agent, profile.hand, profile.hold_rotation);
        world.set_held(throwable, true);
        world.set_held_throwable(agent, Some(throwable));
        tracing::trace!(%agent, %throwable, "picked up");
        Status::Success
    }
}

/// Lets go of whatever the agent holds. Succeeds with empty hands too.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropHeld;

impl<W> Node<W> for DropHeld
where
    W: Grabbing + Throwables + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        if let Some(held) = world.held_throwable(agent) {
            world.set_held(held, false);
            world.detach(held);
            world.set_held_throwable(agent, None);
        }
        Status::Success
    }
}

/// Releases the held object with an impulse of the agent's throw strength toward the target.
///
/// A target that cannot be resolved falls back to throwing straight ahead.
#[derive(Debug, Clone, Copy)]
pub struct Throw {
    pub target: TargetRef,
}

impl Throw {
    pub fn at(target: impl Into<TargetRef>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl<W> Node<W> for Throw
where
    W: Spatial + Grabbing + Throwables + Shared + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let (Some(held), Some(profile), Some(pos)) = (
            world.held_throwable(agent),
            world.grab_profile(agent),
            world.position(agent),
        ) else {
            return Status::Failure;
        };

        let aimed = self
            .target
            .resolve(world)
            .and_then(|t| world.position(t))
            .and_then(|at| (at - pos).normalized());
        let direction = aimed
            .or_else(|| world.forward(agent))
            .unwrap_or(Vec3::FORWARD);

        world.detach(held);
        world.apply_impulse(held, direction * profile.throw_strength);
        world.set_held(held, false);
        world.set_throwing(agent, false);
        world.set_held_throwable(agent, None);
        tracing::trace!(%agent, %held, "thrown");
        Status::Success
    }
}

/// Turns the agent to face the target on the ground plane.
#[derive(Debug, Clone, Copy)]
pub struct Aim {
    pub target: TargetRef,
}

impl Aim {
    pub fn at(target: impl Into<TargetRef>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl<W> Node<W> for Aim
where
    W: SpatialMut + Shared + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let Some(at) = self.target.resolve(world).and_then(|t| world.position(t)) else {
            return Status::Failure;
        };
        let Some(pos) = world.position(agent) else {
            return Status::Failure;
        };
        if let Some(facing) = (at - pos).horizontal().normalized() {
            world.set_forward(agent, facing);
        }
        Status::Success
    }
}

/// Makes the closest heard sound the agent's grab candidate, if it can be picked up.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusOnSound;

impl<W> Node<W> for FocusOnSound
where
    W: Hearing + Grabbing + Throwables + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let Some(source) = world.closest_sound(agent) else {
            return Status::Failure;
        };
        if !world.is_throwable(source) || world.is_held(source) != Some(false) {
            return Status::Failure;
        }
        world.set_nearest_throwable(agent, Some(source));
        Status::Success
    }
}
