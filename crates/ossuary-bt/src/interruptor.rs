use ossuary_core::{EntityId, TickContext};

use crate::bt::{BoxedNode, Node, Status};

/// Cancels its child while a condition holds.
///
/// Every tick the condition runs first. If it succeeds, the optional on-exit node runs once
/// (its status is ignored) and the interruptor fails without ticking the child, which keeps
/// whatever progress it had. Otherwise the child is ticked and its status passed through.
pub struct Interruptor<W>
where
    W: 'static,
{
    condition: BoxedNode<W>,
    child: BoxedNode<W>,
    on_exit: Option<BoxedNode<W>>,
}

impl<W> Interruptor<W>
where
    W: 'static,
{
    pub fn new(condition: BoxedNode<W>, child: BoxedNode<W>) -> Self {
        Self {
            condition,
            child,
            on_exit: None,
        }
    }

    /// Cleanup run on every interrupted tick (stop particles, stop a sound, ...).
    pub fn with_on_exit(mut self, on_exit: BoxedNode<W>) -> Self {
        self.on_exit = Some(on_exit);
        self
    }
}

impl<W> Node<W> for Interruptor<W>
where
    W: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        if self.condition.tick(ctx, agent, world) == Status::Success {
            if let Some(on_exit) = self.on_exit.as_mut() {
                on_exit.tick(ctx, agent, world);
            }
            tracing::debug!(%agent, tick = ctx.tick, "interrupted");
            return Status::Failure;
        }

        self.child.tick(ctx, agent, world)
    }
}
