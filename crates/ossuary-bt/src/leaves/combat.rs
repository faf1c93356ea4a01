use ossuary_core::{Combat, EntityId, Shared, TargetRef, TickContext};

use crate::bt::{Node, Status};

/// Deals the agent's attack damage to the target.
#[derive(Debug, Clone, Copy)]
pub struct Attack {
    pub target: TargetRef,
}

impl Attack {
    pub fn new(target: impl Into<TargetRef>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl<W> Node<W> for Attack
where
    W: Combat + Shared + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let Some(target) = self.target.resolve(world) else {
            return Status::Failure;
        };
        let (Some(damage), Some(health)) = (world.attack_damage(agent), world.health(target))
        else {
            return Status::Failure;
        };
        world.set_health(target, health.saturating_sub(damage));
        tracing::trace!(%agent, %target, damage, "attacked");
        Status::Success
    }
}
