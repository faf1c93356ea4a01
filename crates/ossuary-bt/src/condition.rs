//! Conditional nodes: a predicate gating an optional child.
//!
//! The same predicate works two ways. Guarding a child (`predicate.guard(child)`), a false
//! predicate fails the node without touching the child. Bare (`predicate.bare()`), the node just
//! reports the predicate, which is the shape an [`crate::Interruptor`] expects as its condition.

use std::marker::PhantomData;

use ossuary_core::{Combat, EntityId, Grabbing, Lifecycle, PrefabId, Throwables, TickContext};

use crate::bt::{BoxedNode, Node, Status};

/// A yes/no question about the world, asked once per tick.
///
/// Takes the world mutably because some predicates cache what they found (nearest throwable,
/// closest sound) on the agent for the subtree they guard.
pub trait Predicate<W>: 'static
where
    W: 'static,
{
    fn check(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> bool;

    fn bare(self) -> Conditional<W, Self>
    where
        Self: Sized,
    {
        Conditional::new(self)
    }

    fn guard(self, child: BoxedNode<W>) -> Conditional<W, Self>
    where
        Self: Sized,
    {
        Conditional::guarding(self, child)
    }
}

pub struct Conditional<W, P>
where
    W: 'static,
{
    predicate: P,
    child: Option<BoxedNode<W>>,
    _world: PhantomData<fn(&mut W)>,
}

impl<W, P> Conditional<W, P>
where
    W: 'static,
    P: Predicate<W>,
{
    /// Predicate-only form: `Success` when the predicate holds, `Failure` otherwise.
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            child: None,
            _world: PhantomData,
        }
    }

    pub fn guarding(predicate: P, child: BoxedNode<W>) -> Self {
        Self {
            predicate,
            child: Some(child),
            _world: PhantomData,
        }
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }
}

impl<W, P> Node<W> for Conditional<W, P>
where
    W: 'static,
    P: Predicate<W>,
{
    fn tick(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        if !self.predicate.check(ctx, agent, world) {
            return Status::Failure;
        }
        match self.child.as_mut() {
            Some(child) => child.tick(ctx, agent, world),
            None => Status::Success,
        }
    }
}

/// Compares a boolean read from the world against the wanted value.
pub struct FlagCheck<F> {
    read: F,
    wanted: bool,
}

impl<F> FlagCheck<F> {
    pub fn new(read: F, wanted: bool) -> Self {
        Self { read, wanted }
    }
}

impl<W, F> Predicate<W> for FlagCheck<F>
where
    W: 'static,
    F: FnMut(&W, EntityId) -> bool + 'static,
{
    fn check(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> bool {
        (self.read)(world, agent) == self.wanted
    }
}

/// Arbitrary read-only predicate.
pub struct Check<F> {
    cond: F,
}

impl<F> Check<F> {
    pub fn new(cond: F) -> Self {
        Self { cond }
    }
}

impl<W, F> Predicate<W> for Check<F>
where
    W: 'static,
    F: FnMut(&TickContext, EntityId, &W) -> bool + 'static,
{
    fn check(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> bool {
        (self.cond)(ctx, agent, &*world)
    }
}

/// The agent has been flagged to split.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShouldSplit;

impl<W> Predicate<W> for ShouldSplit
where
    W: Lifecycle + 'static,
{
    fn check(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> bool {
        world.should_split(agent)
    }
}

/// The agent's throwing flag equals `wanted`.
#[derive(Debug, Clone, Copy)]
pub struct IsThrowing {
    pub wanted: bool,
}

impl IsThrowing {
    pub fn new(wanted: bool) -> Self {
        Self { wanted }
    }
}

impl<W> Predicate<W> for IsThrowing
where
    W: Grabbing + 'static,
{
    fn check(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> bool {
        world.is_throwing(agent) == self.wanted
    }
}

/// The agent, itself a throwable, is (or is not) being held. Non-throwables never match.
#[derive(Debug, Clone, Copy)]
pub struct IsHeld {
    pub wanted: bool,
}

impl IsHeld {
    pub fn new(wanted: bool) -> Self {
        Self { wanted }
    }
}

impl<W> Predicate<W> for IsHeld
where
    W: Throwables + 'static,
{
    fn check(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> bool {
        world.is_held(agent) == Some(self.wanted)
    }
}

/// The object the agent holds was spawned from `kind`. Fails with empty hands.
#[derive(Debug, Clone, Copy)]
pub struct HeldKind {
    pub kind: PrefabId,
}

impl HeldKind {
    pub fn new(kind: PrefabId) -> Self {
        Self { kind }
    }
}

impl<W> Predicate<W> for HeldKind
where
    W: Grabbing + Lifecycle + 'static,
{
    fn check(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> bool {
        let Some(held) = world.held_throwable(agent) else {
            return false;
        };
        if world.prefab(held) == Some(self.kind) {
            true
        } else {
            tracing::trace!(%agent, %held, wanted = %self.kind, "held object is a different kind");
            false
        }
    }
}

/// A collision was reported for the agent this step with `speed >= min_speed`.
/// A hit at exactly the threshold counts.
#[derive(Debug, Clone, Copy)]
pub struct Impacted {
    pub min_speed: f32,
}

impl Impacted {
    pub fn new(min_speed: f32) -> Self {
        Self { min_speed }
    }
}

impl<W> Predicate<W> for Impacted
where
    W: Combat + 'static,
{
    fn check(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> bool {
        world
            .impact(agent)
            .is_some_and(|impact| impact.occurred && impact.speed >= self.min_speed)
    }
}
