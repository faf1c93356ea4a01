//! Deterministic, engine-agnostic primitives shared by the behaviour-tree engine and the worlds
//! it runs against.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod error;
pub mod math;
pub mod prefab;
pub mod registry;
pub mod rng;
pub mod tick;
pub mod world;

pub use agent::{AgentId, EntityId, PrefabId};
pub use error::ConfigError;
pub use math::Vec3;
pub use registry::Registry;
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::TickContext;
pub use world::{
    Combat, GrabProfile, Grabbing, Hearing, Impact, Lifecycle, Navigation, PathStatus,
    Presentation, RayHit, Shared, Spatial, SpatialMut, TargetRef, Throwables, World,
};
