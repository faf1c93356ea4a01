//! Owning trees per agent and ticking a whole population of them.

use std::collections::{BTreeMap, BTreeSet};

use ossuary_core::{AgentId, EntityId, Lifecycle, Shared, TickContext};
use ossuary_tools::{TraceEvent, Tracer};

use crate::bt::{BoxedNode, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrainConfig {
    pub think_every_ticks: u32,
    pub think_offset_ticks: u32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            think_every_ticks: 1,
            think_offset_ticks: 0,
        }
    }
}

impl BrainConfig {
    /// Spread agents that think every `think_every_ticks` across ticks by their id.
    pub fn deterministic(agent: impl AgentId, think_every_ticks: u32) -> Self {
        let every = think_every_ticks.max(1);
        let offset = (agent.stable_id() % (every as u64)) as u32;
        Self {
            think_every_ticks: every,
            think_offset_ticks: offset,
        }
    }

    pub fn should_think(&self, tick: u64) -> bool {
        let every = self.think_every_ticks.max(1) as u64;
        ((tick + (self.think_offset_ticks as u64)) % every) == 0
    }
}

/// A root node plus the status it returned last.
pub struct Tree<W>
where
    W: 'static,
{
    root: BoxedNode<W>,
    last: Option<Status>,
}

impl<W> Tree<W>
where
    W: 'static,
{
    pub fn new(root: BoxedNode<W>) -> Self {
        Self { root, last: None }
    }

    pub fn tick(&mut self, ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let status = self.root.tick(ctx, agent, world);
        self.last = Some(status);
        status
    }

    /// `None` until the first tick.
    pub fn last_status(&self) -> Option<Status> {
        self.last
    }
}

pub struct Brain<W>
where
    W: 'static,
{
    pub agent: EntityId,
    pub config: BrainConfig,
    pub tree: Tree<W>,
    last_think: Option<u64>,
}

impl<W> Brain<W>
where
    W: 'static,
{
    pub fn new(agent: EntityId, root: BoxedNode<W>) -> Self {
        Self {
            agent,
            config: BrainConfig::default(),
            tree: Tree::new(root),
            last_think: None,
        }
    }

    /// Ticks the tree if this is one of the agent's thinking ticks.
    ///
    /// The tree sees `dt` as the time since this agent last thought, so waits and turn rates
    /// keep simulated time whatever the cadence. The first think covers a single step.
    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) -> Option<Status> {
        if !self.config.should_think(ctx.tick) {
            return None;
        }
        let steps = self
            .last_think
            .map_or(1, |last| ctx.tick.saturating_sub(last).max(1));
        self.last_think = Some(ctx.tick);

        let think = TickContext {
            dt_seconds: ctx.dt_seconds * steps as f32,
            ..*ctx
        };
        Some(self.tree.tick(&think, self.agent, world))
    }
}

/// Builds the tree for a newly registered entity, or `None` if it does not think.
pub type TreeFactory<W> = Box<dyn FnMut(&W, EntityId) -> Option<BoxedNode<W>>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub ticked: usize,
    pub removed: usize,
    pub adopted: usize,
}

/// One brain per registered agent, kept in step with the registry.
///
/// Each tick walks a snapshot of the spawned set in id order, so entities spawned or destroyed
/// by a tree mid-scan never shift which agents get ticked. Brains of dead or deregistered
/// agents are dropped after the scan, and newly registered agents are adopted then too; they
/// think for the first time on the following tick.
pub struct Population<W>
where
    W: 'static,
{
    brains: BTreeMap<EntityId, Brain<W>>,
    inert: BTreeSet<EntityId>,
    factory: TreeFactory<W>,
    think_every: u32,
    tracer: Tracer,
}

impl<W> Population<W>
where
    W: Lifecycle + Shared + 'static,
{
    pub fn new(factory: TreeFactory<W>) -> Self {
        Self {
            brains: BTreeMap::new(),
            inert: BTreeSet::new(),
            factory,
            think_every: 1,
            tracer: Tracer::new(),
        }
    }

    pub fn with_think_every(mut self, ticks: u32) -> Self {
        self.think_every = ticks.max(1);
        self
    }

    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    pub fn len(&self) -> usize {
        self.brains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brains.is_empty()
    }

    pub fn contains(&self, agent: EntityId) -> bool {
        self.brains.contains_key(&agent)
    }

    pub fn brain(&self, agent: EntityId) -> Option<&Brain<W>> {
        self.brains.get(&agent)
    }

    /// Registers every spawned entity that has a tree, without ticking anything.
    pub fn adopt(&mut self, ctx: &TickContext, world: &W) -> usize {
        let candidates: Vec<EntityId> = world
            .registry()
            .spawned()
            .filter(|id| !self.brains.contains_key(id) && !self.inert.contains(id))
            .collect();

        let mut adopted = 0;
        for agent in candidates {
            if !world.is_alive(agent) {
                continue;
            }
            match (self.factory)(world, agent) {
                Some(root) => {
                    let mut brain = Brain::new(agent, root);
                    brain.config = BrainConfig::deterministic(agent, self.think_every);
                    self.brains.insert(agent, brain);
                    self.tracer
                        .emit(TraceEvent::new(ctx.tick, "population.adopt").with_entity(agent));
                    tracing::debug!(%agent, "adopted");
                    adopted += 1;
                }
                None => {
                    self.inert.insert(agent);
                }
            }
        }
        adopted
    }

    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) -> TickReport {
        let snapshot: Vec<EntityId> = world.registry().spawned().collect();
        let mut dead = Vec::new();
        let mut ticked = 0;

        for agent in snapshot {
            let Some(brain) = self.brains.get_mut(&agent) else {
                continue;
            };
            if !world.is_alive(agent) {
                dead.push(agent);
                continue;
            }
            if let Some(status) = brain.tick(ctx, world) {
                ticked += 1;
                self.tracer
                    .emit(TraceEvent::new(ctx.tick, status.trace_tag()).with_entity(agent));
            }
        }

        for agent in dead {
            world.registry_mut().forget(agent);
        }

        let mut removed_ids = Vec::new();
        self.brains.retain(|&agent, _| {
            let keep = world.registry().is_spawned(agent) && world.is_alive(agent);
            if !keep {
                removed_ids.push(agent);
            }
            keep
        });
        for agent in &removed_ids {
            self.tracer
                .emit(TraceEvent::new(ctx.tick, "population.remove").with_entity(*agent));
            tracing::debug!(%agent, "removed");
        }
        self.inert
            .retain(|&id| world.registry().is_spawned(id) && world.is_alive(id));

        let adopted = self.adopt(ctx, world);

        TickReport {
            ticked,
            removed: removed_ids.len(),
            adopted,
        }
    }
}
