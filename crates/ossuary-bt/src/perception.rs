//! Predicates that look at the surroundings: sight of a target, throwables in reach, sounds in
//! earshot. The last two remember what they found on the agent so the guarded subtree can act on
//! it without searching again.

use ossuary_core::{
    EntityId, Grabbing, Hearing, Lifecycle, PrefabId, Shared, Spatial, TargetRef, Throwables,
    TickContext, Vec3,
};

use crate::condition::Predicate;

/// Target within `[min_range, max_range]`, inside the forward cone, and first on the ray.
#[derive(Debug, Clone, Copy)]
pub struct TargetInView {
    pub target: TargetRef,
    pub min_range: f32,
    pub max_range: f32,
    /// Minimum `forward · direction`; `0.8` is roughly a 37 degree half-angle.
    pub cone_dot: f32,
}

impl TargetInView {
    pub fn new(
        target: impl Into<TargetRef>,
        min_range: f32,
        max_range: f32,
        cone_dot: f32,
    ) -> Self {
        Self {
            target: target.into(),
            min_range,
            max_range,
            cone_dot,
        }
    }
}

impl<W> Predicate<W> for TargetInView
where
    W: Spatial + Shared + 'static,
{
    fn check(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> bool {
        let Some(target) = self.target.resolve(world) else {
            return false;
        };
        if target == agent {
            return false;
        }
        let (Some(pos), Some(forward), Some(target_pos)) = (
            world.position(agent),
            world.forward(agent),
            world.position(target),
        ) else {
            return false;
        };

        let offset = target_pos - pos;
        let distance = offset.length();
        if distance < self.min_range || distance > self.max_range {
            return false;
        }
        let Some(dir) = offset.normalized() else {
            // Standing on top of the target counts as seeing it.
            return true;
        };
        if forward.dot(dir) < self.cone_dot {
            return false;
        }

        match world.raycast(pos, dir, agent) {
            Some(hit) => hit.entity == Some(target),
            None => false,
        }
    }
}

/// Nearest registry throwable that is not held, within the agent's grab range and inside its
/// forward arc. The winner is written to the agent's nearest-throwable slot; on a miss the slot
/// is cleared.
#[derive(Debug, Clone, Copy)]
pub struct ThrowableInView {
    pub cone_dot: f32,
    /// Restrict the search to throwables spawned from this prefab.
    pub only: Option<PrefabId>,
}

impl ThrowableInView {
    pub fn new(cone_dot: f32) -> Self {
        Self {
            cone_dot,
            only: None,
        }
    }

    pub fn only(mut self, kind: PrefabId) -> Self {
        self.only = Some(kind);
        self
    }
}

impl<W> Predicate<W> for ThrowableInView
where
    W: Spatial + Grabbing + Throwables + Lifecycle + Shared + 'static,
{
    fn check(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> bool {
        let found = nearest_throwable(world, agent, self.cone_dot, self.only);
        world.set_nearest_throwable(agent, found);
        if found.is_none() {
            tracing::trace!(%agent, "no throwable in view");
        }
        found.is_some()
    }
}

fn nearest_throwable<W>(
    world: &W,
    agent: EntityId,
    cone_dot: f32,
    only: Option<PrefabId>,
) -> Option<EntityId>
where
    W: Spatial + Grabbing + Throwables + Lifecycle + Shared,
{
    let pos = world.position(agent)?;
    let forward = world.forward(agent)?;
    let reach = world.grab_profile(agent)?.grab_range;

    let mut best: Option<(EntityId, f32)> = None;
    for candidate in world.registry().throwables() {
        if candidate == agent || world.is_held(candidate) != Some(false) {
            continue;
        }
        if only.is_some() && world.prefab(candidate) != only {
            continue;
        }
        let Some(at) = world.position(candidate) else {
            continue;
        };
        let offset = at - pos;
        let distance = offset.length();
        if distance > reach {
            continue;
        }
        let in_arc = offset
            .normalized()
            .map_or(true, |dir| forward.dot(dir) >= cone_dot);
        if !in_arc {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(id, _)| id)
}

/// Closest registered sound whose range overlaps the listener's hearing range. The result,
/// including "nothing", is cached as the listener's closest sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundInRange;

impl<W> Predicate<W> for SoundInRange
where
    W: Spatial + Hearing + Shared + 'static,
{
    fn check(&mut self, _ctx: &TickContext, agent: EntityId, world: &mut W) -> bool {
        let found = closest_sound(world, agent);
        world.set_closest_sound(agent, found);
        found.is_some()
    }
}

fn closest_sound<W>(world: &W, listener: EntityId) -> Option<EntityId>
where
    W: Spatial + Hearing + Shared,
{
    let pos: Vec3 = world.position(listener)?;
    let hearing = world.hearing_range(listener)?;

    let mut best: Option<(EntityId, f32)> = None;
    for source in world.registry().sounds() {
        if source == listener {
            continue;
        }
        let (Some(at), Some(range)) = (world.position(source), world.sound_range(source)) else {
            continue;
        };
        let distance = pos.distance(at);
        if distance >= hearing + range {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((source, distance));
        }
    }
    best.map(|(id, _)| id)
}
