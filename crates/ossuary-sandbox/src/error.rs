use ossuary_core::EntityId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("unknown prefab `{0}`")]
    UnknownPrefab(String),

    #[error("no live entity {0}")]
    UnknownEntity(EntityId),

    #[error("{0} has no template in this arena")]
    MissingTemplate(String),
}
