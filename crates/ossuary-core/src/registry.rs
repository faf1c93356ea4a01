use std::collections::BTreeSet;

use crate::EntityId;

/// Cross-agent lookup of live entities: everything spawned, everything that can be thrown,
/// every entity currently emitting sound, and the player.
///
/// Sets are ordered so scans (agent update order, nearest-candidate tie breaks) are
/// deterministic. Adding an entity twice is a no-op; removing an absent entity returns `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    spawned: BTreeSet<EntityId>,
    throwables: BTreeSet<EntityId>,
    sounds: BTreeSet<EntityId>,
    player: Option<EntityId>,
    kill_count: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_spawned(&mut self, entity: EntityId) -> bool {
        self.spawned.insert(entity)
    }

    pub fn remove_spawned(&mut self, entity: EntityId) -> bool {
        self.spawned.remove(&entity)
    }

    pub fn is_spawned(&self, entity: EntityId) -> bool {
        self.spawned.contains(&entity)
    }

    pub fn spawned(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.spawned.iter().copied()
    }

    pub fn spawned_len(&self) -> usize {
        self.spawned.len()
    }

    pub fn add_throwable(&mut self, entity: EntityId) -> bool {
        self.throwables.insert(entity)
    }

    pub fn remove_throwable(&mut self, entity: EntityId) -> bool {
        self.throwables.remove(&entity)
    }

    pub fn throwables(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.throwables.iter().copied()
    }

    pub fn add_sound(&mut self, entity: EntityId) -> bool {
        self.sounds.insert(entity)
    }

    pub fn remove_sound(&mut self, entity: EntityId) -> bool {
        self.sounds.remove(&entity)
    }

    pub fn sounds(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.sounds.iter().copied()
    }

    pub fn set_player(&mut self, player: Option<EntityId>) {
        self.player = player;
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn add_kill(&mut self) {
        self.kill_count = self.kill_count.saturating_add(1);
    }

    pub fn kill_count(&self) -> u32 {
        self.kill_count
    }

    /// Drop every entry from every list. Used when an entity is gone for good.
    pub fn forget(&mut self, entity: EntityId) {
        self.spawned.remove(&entity);
        self.throwables.remove(&entity);
        self.sounds.remove(&entity);
        if self.player == Some(entity) {
            self.player = None;
        }
    }

    /// Bulk reset for a scene restart. The player reference survives.
    pub fn clear(&mut self) {
        self.spawned.clear();
        self.throwables.clear();
        self.sounds.clear();
        self.kill_count = 0;
    }
}
