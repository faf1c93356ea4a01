//! Prefab names shared by the archetype trees and the worlds that spawn them.

use crate::PrefabId;

/// Skeleton with its head attached. Splits into [`SKELETON_HEAD`] + [`HEADLESS_BODY`].
pub const SKELETON: PrefabId = PrefabId("RiggedSkeleton");
/// Body that lost its head; hunts for throwables and merges back with a head.
pub const HEADLESS_BODY: PrefabId = PrefabId("RiggedSkeletonHeadless");
/// Detached head; a throwable that periodically screams.
pub const SKELETON_HEAD: PrefabId = PrefabId("SkeletonHead");
/// Inert throwable scattered in the level.
pub const ROCK: PrefabId = PrefabId("Rock");
/// The player-controlled entity.
pub const PLAYER: PrefabId = PrefabId("Player");
/// One-shot particle burst left behind when an enemy dies.
pub const DEATH_PARTICLES: PrefabId = PrefabId("DeathParticles");

/// Every prefab above, in a stable order.
pub const ALL: [PrefabId; 6] = [
    SKELETON,
    HEADLESS_BODY,
    SKELETON_HEAD,
    ROCK,
    PLAYER,
    DEATH_PARTICLES,
];

pub fn by_name(name: &str) -> Option<PrefabId> {
    ALL.into_iter().find(|p| p.name() == name)
}
