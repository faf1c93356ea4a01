use std::borrow::Cow;

use ossuary_core::{EntityId, Presentation, TickContext};

use crate::bt::{Node, Status};

/// Sets the agent's overhead label.
#[derive(Debug, Clone)]
pub struct DisplayText {
    text: Cow<'static, str>,
}

impl DisplayText {
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self { text: text.into() }
    }
}

impl<W> Node<W> for DisplayText
where
    W: Presentation + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        world.display_text(agent, &self.text);
        Status::Success
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlayParticles;

impl<W> Node<W> for PlayParticles
where
    W: Presentation + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        world.set_particles(agent, true);
        Status::Success
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StopParticles;

impl<W> Node<W> for StopParticles
where
    W: Presentation + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        world.set_particles(agent, false);
        Status::Success
    }
}

#[derive(Debug, Clone)]
pub struct PlayAnimation {
    animation: Cow<'static, str>,
}

impl PlayAnimation {
    pub fn new(animation: impl Into<Cow<'static, str>>) -> Self {
        Self {
            animation: animation.into(),
        }
    }
}

impl<W> Node<W> for PlayAnimation
where
    W: Presentation + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        world.play_animation(agent, &self.animation);
        Status::Success
    }
}

/// Writes a message to the `tracing` log at info level. Works on any world.
#[derive(Debug, Clone)]
pub struct Log {
    message: Cow<'static, str>,
}

impl Log {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<W: 'static> Node<W> for Log {
    fn tick(&mut self, ctx: &TickContext, agent: EntityId, _world: &mut W) -> Status {
        tracing::info!(%agent, tick = ctx.tick, "{}", self.message);
        Status::Success
    }
}
