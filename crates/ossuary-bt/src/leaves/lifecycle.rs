//! Single-tick leaves that create and destroy entities and keep the registry in step.

use ossuary_core::{
    EntityId, Grabbing, Lifecycle, PrefabId, Shared, Spatial, SpatialMut, Throwables, TickContext,
    Vec3,
};

use crate::bt::{Node, Status};

/// Throwable parts appear this far above the splitting body, one unit in front of it.
const PART_LIFT: f32 = 0.72;

fn register<W>(world: &mut W, entity: EntityId)
where
    W: Throwables + Shared,
{
    let throwable = world.is_throwable(entity);
    let registry = world.registry_mut();
    registry.add_spawned(entity);
    if throwable {
        registry.add_throwable(entity);
    }
}

fn remove<W>(world: &mut W, entity: EntityId)
where
    W: Lifecycle + Shared,
{
    world.registry_mut().forget(entity);
    world.destroy(entity);
}

/// Replaces the agent with its split parts.
///
/// Every part is spawned at the agent, registered (throwables in both lists) and, if it is a
/// throwable, lifted in front of the body. The original is then deregistered and destroyed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Split;

impl<W> Node<W> for Split
where
    W: SpatialMut + Throwables + Lifecycle + Shared + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        if !world.is_alive(agent) {
            return Status::Failure;
        }
        let parts = world.split_parts(agent);
        if parts.is_empty() {
            return Status::Failure;
        }
        let Some(pos) = world.position(agent) else {
            return Status::Failure;
        };
        let forward = world.forward(agent).unwrap_or(Vec3::FORWARD);

        let mut spawned = Vec::with_capacity(parts.len());
        for part in parts {
            let Some(id) = world.spawn(part, pos, forward) else {
                tracing::warn!(%agent, %part, "split part failed to spawn");
                continue;
            };
            if world.is_throwable(id) {
                world.set_position(id, pos + Vec3::UP * PART_LIFT + forward);
            }
            register(world, id);
            spawned.push(id);
        }

        remove(world, agent);
        tracing::info!(%agent, parts = ?spawned, "split");
        Status::Success
    }
}

/// Merges the agent with the object it holds when that object is a `kind` and both agree on
/// the merge result. The result is spawned at the agent; both originals are consumed.
#[derive(Debug, Clone, Copy)]
pub struct Merge {
    pub kind: PrefabId,
}

impl Merge {
    pub fn with(kind: PrefabId) -> Self {
        Self { kind }
    }
}

impl<W> Node<W> for Merge
where
    W: Spatial + Grabbing + Throwables + Lifecycle + Shared + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let Some(held) = world.held_throwable(agent) else {
            return Status::Failure;
        };
        if world.prefab(held) != Some(self.kind) {
            return Status::Failure;
        }
        let result = match (world.merge_result(agent), world.merge_result(held)) {
            (Some(a), Some(b)) if a == b => a,
            _ => {
                tracing::trace!(%agent, %held, "merge results disagree");
                return Status::Failure;
            }
        };
        let Some(pos) = world.position(agent) else {
            return Status::Failure;
        };
        let forward = world.forward(agent).unwrap_or(Vec3::FORWARD);

        let Some(merged) = world.spawn(result, pos, forward) else {
            tracing::warn!(%agent, %result, "merge result failed to spawn");
            return Status::Failure;
        };
        register(world, merged);

        world.set_held_throwable(agent, None);
        remove(world, held);
        remove(world, agent);
        tracing::info!(%agent, %held, %merged, "merged");
        Status::Success
    }
}

/// Counts a kill, then deregisters and destroys the agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct KillSpawnable;

impl<W> Node<W> for KillSpawnable
where
    W: Lifecycle + Shared + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        if !world.is_alive(agent) {
            return Status::Failure;
        }
        world.registry_mut().add_kill();
        remove(world, agent);
        tracing::info!(%agent, kills = world.registry().kill_count(), "killed");
        Status::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnAt {
    /// Wherever the ticking agent stands.
    Agent,
    Point(Vec3),
}

/// Spawns a one-off effect. The new entity is not registered and gets no tree.
#[derive(Debug, Clone, Copy)]
pub struct SpawnPrefab {
    pub prefab: PrefabId,
    pub at: SpawnAt,
}

impl SpawnPrefab {
    pub fn new(prefab: PrefabId, at: SpawnAt) -> Self {
        Self { prefab, at }
    }
}

impl<W> Node<W> for SpawnPrefab
where
    W: Spatial + Lifecycle + 'static,
{
    fn tick(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> Status {
        let position = match self.at {
            SpawnAt::Agent => world.position(agent),
            SpawnAt::Point(point) => Some(point),
        };
        let Some(position) = position else {
            return Status::Failure;
        };
        let forward = world.forward(agent).unwrap_or(Vec3::FORWARD);
        Status::from_bool(world.spawn(self.prefab, position, forward).is_some())
    }
}
