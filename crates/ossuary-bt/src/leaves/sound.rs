use ossuary_core::{EntityId, Hearing, Shared, TickContext};

use crate::bt::{Node, Status};

/// Starts emitting and lists the agent among the current sounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeSound;

impl<W> Node<W> for MakeSound
where
    W: Hearing + Shared + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        world.set_making_sound(agent, true);
        world.registry_mut().add_sound(agent);
        Status::Success
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StopSound;

impl<W> Node<W> for StopSound
where
    W: Hearing + Shared + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        world.set_making_sound(agent, false);
        world.registry_mut().remove_sound(agent);
        Status::Success
    }
}
