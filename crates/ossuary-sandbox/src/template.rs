//! What a freshly spawned body of each prefab looks like.

use ossuary_core::{prefab, GrabProfile, PrefabId, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub prefab: PrefabId,
    pub radius: f32,
    /// Blocks rays and can be hit by thrown bodies.
    pub solid: bool,
    /// Walking speed; `None` for bodies without navigation.
    pub speed: Option<f32>,
    pub health: Option<i32>,
    pub damage: Option<i32>,
    pub grab: Option<GrabProfile>,
    /// Initial value of the throwing flag for grabbers.
    pub throwing: bool,
    pub throwable: bool,
    pub hearing_range: Option<f32>,
    pub sound_range: Option<f32>,
    pub split_parts: Vec<PrefabId>,
    pub merge_result: Option<PrefabId>,
    /// Number of random waypoints rolled for the patrol route at spawn.
    pub patrol_points: usize,
    /// Seconds until the arena removes the body on its own; `None` lives until destroyed.
    pub lifetime: Option<f32>,
}

impl Template {
    fn inert(prefab: PrefabId, radius: f32) -> Self {
        Self {
            prefab,
            radius,
            solid: true,
            speed: None,
            health: None,
            damage: None,
            grab: None,
            throwing: false,
            throwable: false,
            hearing_range: None,
            sound_range: None,
            split_parts: Vec::new(),
            merge_result: None,
            patrol_points: 0,
            lifetime: None,
        }
    }

    pub fn skeleton() -> Self {
        Self {
            speed: Some(3.5),
            health: Some(1),
            damage: Some(1),
            split_parts: vec![prefab::SKELETON_HEAD, prefab::HEADLESS_BODY],
            patrol_points: 4,
            ..Self::inert(prefab::SKELETON, 0.5)
        }
    }

    pub fn headless_body() -> Self {
        Self {
            speed: Some(3.5),
            health: Some(1),
            damage: Some(1),
            grab: Some(GrabProfile {
                hand: Vec3::new(0.23, 0.14, 0.8),
                hold_rotation: Vec3::new(-2.5, 353.0, -3.0),
                throw_strength: 30.0,
                grab_range: 2.0,
            }),
            throwing: true,
            hearing_range: Some(10.0),
            merge_result: Some(prefab::SKELETON),
            ..Self::inert(prefab::HEADLESS_BODY, 0.5)
        }
    }

    pub fn skeleton_head() -> Self {
        Self {
            throwable: true,
            sound_range: Some(15.0),
            merge_result: Some(prefab::SKELETON),
            ..Self::inert(prefab::SKELETON_HEAD, 0.25)
        }
    }

    pub fn rock() -> Self {
        Self {
            throwable: true,
            ..Self::inert(prefab::ROCK, 0.25)
        }
    }

    pub fn player() -> Self {
        Self {
            speed: Some(10.0),
            health: Some(1),
            grab: Some(GrabProfile {
                hand: Vec3::new(0.89, -0.65, 1.6),
                hold_rotation: Vec3::new(-19.0, 200.0, -7.0),
                throw_strength: 30.0,
                grab_range: 4.0,
            }),
            ..Self::inert(prefab::PLAYER, 0.5)
        }
    }

    pub fn death_particles() -> Self {
        Self {
            solid: false,
            lifetime: Some(2.0),
            ..Self::inert(prefab::DEATH_PARTICLES, 0.0)
        }
    }

    /// One template per known prefab, in [`prefab::ALL`] order.
    pub fn defaults() -> Vec<Template> {
        vec![
            Self::skeleton(),
            Self::headless_body(),
            Self::skeleton_head(),
            Self::rock(),
            Self::player(),
            Self::death_particles(),
        ]
    }
}
