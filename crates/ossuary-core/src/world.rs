//! Capability contracts a world must provide for tree nodes to act on it.
//!
//! Nodes only bound on the traits they use. Every query takes an [`EntityId`] and answers
//! `None` (or `false`) for entities that do not exist or lack the capability, so a destroyed
//! body turns into an ordinary `Failure` instead of a fault.

use crate::{EntityId, PrefabId, Registry, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// `None` when the ray stopped on level geometry rather than an entity.
    pub entity: Option<EntityId>,
    pub point: Vec3,
    pub distance: f32,
}

pub trait Spatial {
    fn position(&self, entity: EntityId) -> Option<Vec3>;

    /// Unit facing direction.
    fn forward(&self, entity: EntityId) -> Option<Vec3>;

    /// First thing hit by a ray from `origin` along `direction`, ignoring `ignore`.
    fn raycast(&self, origin: Vec3, direction: Vec3, ignore: EntityId) -> Option<RayHit>;
}

pub trait SpatialMut: Spatial {
    fn set_forward(&mut self, entity: EntityId, forward: Vec3);

    /// Teleport. Navigation state is left alone.
    fn set_position(&mut self, entity: EntityId, position: Vec3);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathStatus {
    /// A full path to the destination exists.
    Complete,
    /// The destination is unreachable but the agent can get closer.
    Partial,
    /// No path (or no navigation at all).
    Invalid,
}

/// Path-planning handle of a navigating agent.
pub trait Navigation {
    /// Request a path. The returned status is also what [`Navigation::path_status`] reports
    /// until the next request.
    fn set_destination(&mut self, agent: EntityId, destination: Vec3) -> PathStatus;

    fn path_status(&self, agent: EntityId) -> PathStatus;

    /// Distance left along the current path.
    fn remaining_distance(&self, agent: EntityId) -> Option<f32>;

    /// Nearest navigable point within `max_distance` of `point`.
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;

    fn current_target(&self, agent: EntityId) -> Option<Vec3>;

    fn set_current_target(&mut self, agent: EntityId, target: Vec3);

    /// Fixed patrol route assigned when the agent was created.
    fn patrol_route(&self, agent: EntityId) -> Vec<Vec3>;
}

/// Most recent collision reported by the physics layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Impact {
    pub occurred: bool,
    pub speed: f32,
}

/// Damage targets and attackers.
pub trait Combat {
    fn health(&self, entity: EntityId) -> Option<i32>;

    fn set_health(&mut self, entity: EntityId, health: i32);

    fn attack_damage(&self, entity: EntityId) -> Option<i32>;

    fn impact(&self, entity: EntityId) -> Option<Impact>;
}

/// Fixed grab parameters of an agent that can hold throwables.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GrabProfile {
    /// Local offset of the held object relative to the holder.
    pub hand: Vec3,
    /// Local euler rotation (degrees) of the held object.
    pub hold_rotation: Vec3,
    pub throw_strength: f32,
    pub grab_range: f32,
}

pub trait Grabbing {
    fn grab_profile(&self, agent: EntityId) -> Option<GrabProfile>;

    fn nearest_throwable(&self, agent: EntityId) -> Option<EntityId>;

    fn set_nearest_throwable(&mut self, agent: EntityId, throwable: Option<EntityId>);

    fn held_throwable(&self, agent: EntityId) -> Option<EntityId>;

    fn set_held_throwable(&mut self, agent: EntityId, throwable: Option<EntityId>);

    fn is_throwing(&self, agent: EntityId) -> bool;

    fn set_throwing(&mut self, agent: EntityId, throwing: bool);
}

pub trait Throwables {
    fn is_throwable(&self, entity: EntityId) -> bool;

    /// `None` when `entity` is not a live throwable.
    fn is_held(&self, throwable: EntityId) -> Option<bool>;

    fn set_held(&mut self, throwable: EntityId, held: bool);

    /// Parent `throwable` to `holder` at a local offset and make it kinematic.
    fn attach(&mut self, throwable: EntityId, holder: EntityId, offset: Vec3, rotation: Vec3);

    /// Unparent and hand the body back to physics.
    fn detach(&mut self, throwable: EntityId);

    fn apply_impulse(&mut self, throwable: EntityId, impulse: Vec3);
}

/// Listeners and sound emitters.
pub trait Hearing {
    fn hearing_range(&self, listener: EntityId) -> Option<f32>;

    fn sound_range(&self, emitter: EntityId) -> Option<f32>;

    fn closest_sound(&self, listener: EntityId) -> Option<EntityId>;

    fn set_closest_sound(&mut self, listener: EntityId, emitter: Option<EntityId>);

    fn set_making_sound(&mut self, emitter: EntityId, making_sound: bool);
}

/// Entity creation and destruction plus split/merge data.
///
/// Spawning does not touch the [`Registry`]; bookkeeping is the caller's job.
pub trait Lifecycle {
    fn spawn(&mut self, prefab: PrefabId, position: Vec3, forward: Vec3) -> Option<EntityId>;

    fn destroy(&mut self, entity: EntityId);

    fn is_alive(&self, entity: EntityId) -> bool;

    fn prefab(&self, entity: EntityId) -> Option<PrefabId>;

    fn should_split(&self, entity: EntityId) -> bool;

    fn split_parts(&self, entity: EntityId) -> Vec<PrefabId>;

    fn merge_result(&self, entity: EntityId) -> Option<PrefabId>;
}

pub trait Presentation {
    fn display_text(&mut self, entity: EntityId, text: &str);

    fn set_particles(&mut self, entity: EntityId, playing: bool);

    fn play_animation(&mut self, entity: EntityId, animation: &str);
}

/// Access to the shared registry.
pub trait Shared {
    fn registry(&self) -> &Registry;

    fn registry_mut(&mut self) -> &mut Registry;
}

/// Everything the full node library can ask of a world.
pub trait World:
    SpatialMut + Navigation + Combat + Grabbing + Throwables + Hearing + Lifecycle + Presentation + Shared
{
}

impl<T> World for T where
    T: SpatialMut
        + Navigation
        + Combat
        + Grabbing
        + Throwables
        + Hearing
        + Lifecycle
        + Presentation
        + Shared
{
}

/// Who a node aims at, resolved every tick so a respawned player is picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRef {
    Entity(EntityId),
    /// The registry's player singleton.
    Player,
}

impl TargetRef {
    pub fn resolve<W: Shared + ?Sized>(self, world: &W) -> Option<EntityId> {
        match self {
            TargetRef::Entity(id) => Some(id),
            TargetRef::Player => world.registry().player(),
        }
    }
}

impl From<EntityId> for TargetRef {
    fn from(value: EntityId) -> Self {
        TargetRef::Entity(value)
    }
}
