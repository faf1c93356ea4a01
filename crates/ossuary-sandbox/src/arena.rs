use std::collections::BTreeMap;

use ossuary_core::{
    prefab, Combat, DeterministicRng, EntityId, GrabProfile, Grabbing, Hearing, Impact, Lifecycle,
    Navigation, PathStatus, Presentation, PrefabId, RayHit, Registry, Shared, Spatial, SpatialMut,
    SplitMix64, Throwables, Vec3,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ArenaError, Template};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArenaConfig {
    /// The walkable floor spans `[-half_extent, half_extent]` on x and z.
    pub half_extent: f32,
    /// Fraction of a thrown body's speed lost per second.
    pub drag: f32,
    /// Thrown bodies slower than this come to rest.
    pub rest_speed: f32,
    /// The player loses one health per hit faster than this.
    pub player_damage_speed: f32,
    /// Seed for patrol routes and random spawn points.
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_extent: 60.0,
            drag: 1.5,
            rest_speed: 0.1,
            player_damage_speed: 5.0,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Nav {
    speed: f32,
    destination: Option<Vec3>,
    status: PathStatus,
    current_target: Option<Vec3>,
    blocked: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Grab {
    profile: GrabProfile,
    nearest: Option<EntityId>,
    held: Option<EntityId>,
    throwing: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Held {
    holder: EntityId,
    offset: Vec3,
    rotation: Vec3,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Throwable {
    held: bool,
    parent: Option<Held>,
    /// Whoever let go of it last; a throw never hits its own thrower.
    last_holder: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq)]
struct Listener {
    range: f32,
    closest: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq)]
struct Sound {
    range: f32,
    making: bool,
}

/// Everything the arena knows about one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub prefab: PrefabId,
    pub position: Vec3,
    pub forward: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub solid: bool,
    pub health: Option<i32>,
    pub damage: Option<i32>,
    pub impact: Impact,
    pub should_split: bool,
    pub split_parts: Vec<PrefabId>,
    pub merge_result: Option<PrefabId>,
    pub patrol: Vec<Vec3>,
    pub text: String,
    pub particles: bool,
    pub animation: Option<String>,
    nav: Option<Nav>,
    grab: Option<Grab>,
    throwable: Option<Throwable>,
    listener: Option<Listener>,
    sound: Option<Sound>,
    expires_in: Option<f32>,
}

impl Body {
    /// Seconds left before the arena reaps this body, for short-lived effects.
    pub fn expires_in(&self) -> Option<f32> {
        self.expires_in
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.nav.as_ref().and_then(|n| n.destination)
    }

    pub fn is_making_sound(&self) -> bool {
        self.sound.as_ref().is_some_and(|s| s.making)
    }

    pub fn holder(&self) -> Option<EntityId> {
        self.throwable
            .as_ref()
            .and_then(|t| t.parent.as_ref())
            .map(|p| p.holder)
    }

    /// Local euler rotation the holder attached it with.
    pub fn hold_rotation(&self) -> Option<Vec3> {
        self.throwable
            .as_ref()
            .and_then(|t| t.parent.as_ref())
            .map(|p| p.rotation)
    }

    fn is_carried(&self) -> bool {
        self.holder().is_some()
    }
}

/// Holder-local offset (x right, y up, z forward) to a world-space offset.
fn local_to_world(forward: Vec3, offset: Vec3) -> Vec3 {
    let f = forward.horizontal().normalize_or_zero();
    let right = Vec3::new(f.z, 0.0, -f.x);
    right * offset.x + Vec3::UP * offset.y + f * offset.z
}

/// Ray parameter of the first intersection with a sphere, if any is ahead of the origin.
fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    let t = if near >= 0.0 { near } else { -b + root };
    (t >= 0.0).then_some(t)
}

pub struct Arena {
    config: ArenaConfig,
    templates: BTreeMap<PrefabId, Template>,
    bodies: BTreeMap<EntityId, Body>,
    registry: Registry,
    next_id: u64,
    rng: SplitMix64,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}

impl Arena {
    pub fn new(config: ArenaConfig) -> Self {
        let templates = Template::defaults()
            .into_iter()
            .map(|t| (t.prefab, t))
            .collect();
        Self {
            config,
            templates,
            bodies: BTreeMap::new(),
            registry: Registry::new(),
            next_id: 1,
            rng: SplitMix64::new(config.seed),
        }
    }

    /// Replace (or add) the template used for `template.prefab`.
    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.insert(template.prefab, template);
        self
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn body(&self, entity: EntityId) -> Option<&Body> {
        self.bodies.get(&entity)
    }

    pub fn body_mut(&mut self, entity: EntityId) -> Option<&mut Body> {
        self.bodies.get_mut(&entity)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (EntityId, &Body)> + '_ {
        self.bodies.iter().map(|(id, b)| (*id, b))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Spawn and register the way a level would: the player becomes the registry's player,
    /// bodies that walk or scream are listed as spawned, throwables as throwables.
    pub fn spawn_registered(
        &mut self,
        prefab: PrefabId,
        position: Vec3,
    ) -> Result<EntityId, ArenaError> {
        let template = self
            .templates
            .get(&prefab)
            .ok_or_else(|| ArenaError::MissingTemplate(prefab.name().to_string()))?;
        let thinks = template.speed.is_some() || template.sound_range.is_some();
        let throwable = template.throwable;

        let id = self
            .spawn(prefab, position, Vec3::FORWARD)
            .ok_or_else(|| ArenaError::MissingTemplate(prefab.name().to_string()))?;

        if prefab == prefab::PLAYER {
            self.registry.set_player(Some(id));
        } else if thinks {
            self.registry.add_spawned(id);
        }
        if throwable {
            self.registry.add_throwable(id);
        }
        Ok(id)
    }

    pub fn spawn_named(&mut self, name: &str, position: Vec3) -> Result<EntityId, ArenaError> {
        let prefab =
            prefab::by_name(name).ok_or_else(|| ArenaError::UnknownPrefab(name.to_string()))?;
        self.spawn_registered(prefab, position)
    }

    /// Uniform point on the floor.
    pub fn random_point(&mut self) -> Vec3 {
        let e = self.config.half_extent;
        let x = self.rng.next_f32_range(-e, e);
        let z = self.rng.next_f32_range(-e, e);
        Vec3::new(x, 0.0, z)
    }

    pub fn set_impact(&mut self, entity: EntityId, impact: Impact) -> Result<(), ArenaError> {
        self.live_mut(entity)?.impact = impact;
        Ok(())
    }

    pub fn set_should_split(&mut self, entity: EntityId, split: bool) -> Result<(), ArenaError> {
        self.live_mut(entity)?.should_split = split;
        Ok(())
    }

    pub fn set_patrol(&mut self, entity: EntityId, route: Vec<Vec3>) -> Result<(), ArenaError> {
        self.live_mut(entity)?.patrol = route;
        Ok(())
    }

    /// Make every path request of `entity` come back invalid.
    pub fn set_nav_blocked(&mut self, entity: EntityId, blocked: bool) -> Result<(), ArenaError> {
        let body = self.live_mut(entity)?;
        if let Some(nav) = body.nav.as_mut() {
            nav.blocked = blocked;
            if blocked {
                nav.destination = None;
                nav.status = PathStatus::Invalid;
            }
        }
        Ok(())
    }

    fn live_mut(&mut self, entity: EntityId) -> Result<&mut Body, ArenaError> {
        self.bodies
            .get_mut(&entity)
            .ok_or(ArenaError::UnknownEntity(entity))
    }

    fn clamp_to_floor(&self, point: Vec3) -> Vec3 {
        let e = self.config.half_extent;
        Vec3::new(point.x.clamp(-e, e), point.y, point.z.clamp(-e, e))
    }

    /// Distance along `dir` (unit) from `origin` to the arena wall, if the ray leaves the floor.
    fn wall_distance(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let e = self.config.half_extent;
        let axis = |o: f32, d: f32| -> Option<f32> {
            if d > f32::EPSILON {
                Some((e - o) / d)
            } else if d < -f32::EPSILON {
                Some((-e - o) / d)
            } else {
                None
            }
        };
        let t = match (axis(origin.x, dir.x), axis(origin.z, dir.z)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        t.filter(|t| *t >= 0.0)
    }

    /// Advance movement and physics by `dt` seconds.
    ///
    /// Impacts from the previous step are cleared first, so an impact is visible to trees for
    /// exactly one tick. Bodies whose lifetime ran out are destroyed before anything moves.
    pub fn step(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            body.impact = Impact::default();
        }
        self.expire(dt);
        self.walk(dt);
        self.slide(dt);
        self.carry();
        self.hurt_player();
    }

    fn expire(&mut self, dt: f32) {
        let mut expired = Vec::new();
        for (id, body) in &mut self.bodies {
            if let Some(left) = body.expires_in.as_mut() {
                *left -= dt;
                if *left <= 0.0 {
                    expired.push(*id);
                }
            }
        }
        for id in expired {
            tracing::trace!(entity = %id, "effect expired");
            self.destroy(id);
        }
    }

    fn walk(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            let Some(nav) = body.nav.as_ref() else {
                continue;
            };
            let Some(dest) = nav.destination else {
                continue;
            };
            let to = Vec3::new(dest.x, body.position.y, dest.z) - body.position;
            let left = to.length();
            let reach = nav.speed * dt;
            if left <= reach {
                body.position = Vec3::new(dest.x, body.position.y, dest.z);
            } else if let Some(dir) = to.normalized() {
                body.position += dir * reach;
                body.forward = dir;
            }
        }
    }

    fn slide(&mut self, dt: f32) {
        let e = self.config.half_extent;
        let keep = (1.0 - self.config.drag * dt).max(0.0);
        let rest = self.config.rest_speed;

        let moving: Vec<EntityId> = self
            .bodies
            .iter()
            .filter(|(_, b)| !b.is_carried() && b.velocity.length() > rest)
            .map(|(id, _)| *id)
            .collect();

        for id in moving {
            let Some(body) = self.bodies.get_mut(&id) else {
                continue;
            };
            let speed = body.velocity.length();
            let mut next = body.position + body.velocity * dt;
            if next.x.abs() > e {
                next.x = next.x.clamp(-e, e);
                body.velocity.x = 0.0;
            }
            if next.z.abs() > e {
                next.z = next.z.clamp(-e, e);
                body.velocity.z = 0.0;
            }
            body.position = next;
            body.velocity = body.velocity * keep;
            if body.velocity.length() < rest {
                body.velocity = Vec3::ZERO;
            }
            let radius = body.radius;
            let thrower = body.throwable.as_ref().and_then(|t| t.last_holder);

            let victim = self.bodies.iter().find_map(|(&other, b)| {
                let hittable = other != id
                    && Some(other) != thrower
                    && b.solid
                    && b.health.is_some()
                    && !b.is_carried();
                let touching = hittable
                    && next.horizontal().distance(b.position.horizontal()) < radius + b.radius;
                touching.then_some(other)
            });

            if let Some(victim) = victim {
                tracing::trace!(projectile = %id, %victim, speed, "impact");
                if let Some(b) = self.bodies.get_mut(&victim) {
                    b.impact = Impact {
                        occurred: true,
                        speed,
                    };
                }
                if let Some(b) = self.bodies.get_mut(&id) {
                    b.impact = Impact {
                        occurred: true,
                        speed,
                    };
                    b.velocity = Vec3::ZERO;
                }
            }
        }
    }

    fn carry(&mut self) {
        let carried: Vec<(EntityId, Held)> = self
            .bodies
            .iter()
            .filter_map(|(id, b)| {
                let parent = b.throwable.as_ref()?.parent.clone()?;
                Some((*id, parent))
            })
            .collect();

        for (id, held) in carried {
            let Some((pos, forward)) = self
                .bodies
                .get(&held.holder)
                .map(|h| (h.position, h.forward))
            else {
                continue;
            };
            if let Some(body) = self.bodies.get_mut(&id) {
                body.position = pos + local_to_world(forward, held.offset);
                body.forward = forward;
            }
        }
    }

    fn hurt_player(&mut self) {
        let Some(player) = self.registry.player() else {
            return;
        };
        let threshold = self.config.player_damage_speed;
        if let Some(body) = self.bodies.get_mut(&player) {
            if body.impact.occurred && body.impact.speed > threshold {
                if let Some(health) = body.health.as_mut() {
                    *health -= 1;
                    tracing::debug!(%player, health = *health, "player hit");
                }
            }
        }
    }
}

impl Spatial for Arena {
    fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.bodies.get(&entity).map(|b| b.position)
    }

    fn forward(&self, entity: EntityId) -> Option<Vec3> {
        self.bodies.get(&entity).map(|b| b.forward)
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, ignore: EntityId) -> Option<RayHit> {
        let dir = direction.normalized()?;
        let mut best = self.wall_distance(origin, dir).map(|t| RayHit {
            entity: None,
            point: origin + dir * t,
            distance: t,
        });

        for (&id, body) in &self.bodies {
            if id == ignore || !body.solid || body.is_carried() {
                continue;
            }
            let Some(t) = ray_sphere(origin, dir, body.position, body.radius) else {
                continue;
            };
            if best.map_or(true, |hit| t < hit.distance) {
                best = Some(RayHit {
                    entity: Some(id),
                    point: origin + dir * t,
                    distance: t,
                });
            }
        }
        best
    }
}

impl SpatialMut for Arena {
    fn set_forward(&mut self, entity: EntityId, forward: Vec3) {
        if let (Some(body), Some(f)) = (self.bodies.get_mut(&entity), forward.normalized()) {
            body.forward = f;
        }
    }

    fn set_position(&mut self, entity: EntityId, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(&entity) {
            body.position = position;
        }
    }
}

impl Navigation for Arena {
    fn set_destination(&mut self, agent: EntityId, destination: Vec3) -> PathStatus {
        let clamped = self.clamp_to_floor(destination);
        let Some(nav) = self.bodies.get_mut(&agent).and_then(|b| b.nav.as_mut()) else {
            return PathStatus::Invalid;
        };
        if nav.blocked {
            nav.destination = None;
            nav.status = PathStatus::Invalid;
            return nav.status;
        }
        nav.status = if clamped == destination {
            PathStatus::Complete
        } else {
            PathStatus::Partial
        };
        nav.destination = Some(clamped);
        nav.status
    }

    fn path_status(&self, agent: EntityId) -> PathStatus {
        self.bodies
            .get(&agent)
            .and_then(|b| b.nav.as_ref())
            .map_or(PathStatus::Invalid, |n| n.status)
    }

    fn remaining_distance(&self, agent: EntityId) -> Option<f32> {
        let body = self.bodies.get(&agent)?;
        let nav = body.nav.as_ref()?;
        Some(nav.destination.map_or(0.0, |d| {
            body.position.horizontal().distance(d.horizontal())
        }))
    }

    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        let clamped = self.clamp_to_floor(point);
        let floor = Vec3::new(clamped.x, 0.0, clamped.z);
        (point.horizontal().distance(floor) <= max_distance).then_some(floor)
    }

    fn current_target(&self, agent: EntityId) -> Option<Vec3> {
        self.bodies.get(&agent)?.nav.as_ref()?.current_target
    }

    fn set_current_target(&mut self, agent: EntityId, target: Vec3) {
        if let Some(nav) = self.bodies.get_mut(&agent).and_then(|b| b.nav.as_mut()) {
            nav.current_target = Some(target);
        }
    }

    fn patrol_route(&self, agent: EntityId) -> Vec<Vec3> {
        self.bodies
            .get(&agent)
            .map(|b| b.patrol.clone())
            .unwrap_or_default()
    }
}

impl Combat for Arena {
    fn health(&self, entity: EntityId) -> Option<i32> {
        self.bodies.get(&entity)?.health
    }

    fn set_health(&mut self, entity: EntityId, health: i32) {
        if let Some(slot) = self.bodies.get_mut(&entity).and_then(|b| b.health.as_mut()) {
            *slot = health;
        }
    }

    fn attack_damage(&self, entity: EntityId) -> Option<i32> {
        self.bodies.get(&entity)?.damage
    }

    fn impact(&self, entity: EntityId) -> Option<Impact> {
        self.bodies.get(&entity).map(|b| b.impact)
    }
}

impl Arena {
    fn grab(&self, agent: EntityId) -> Option<&Grab> {
        self.bodies.get(&agent)?.grab.as_ref()
    }

    fn grab_mut(&mut self, agent: EntityId) -> Option<&mut Grab> {
        self.bodies.get_mut(&agent)?.grab.as_mut()
    }

    fn throwable_mut(&mut self, entity: EntityId) -> Option<&mut Throwable> {
        self.bodies.get_mut(&entity)?.throwable.as_mut()
    }
}

impl Grabbing for Arena {
    fn grab_profile(&self, agent: EntityId) -> Option<GrabProfile> {
        self.grab(agent).map(|g| g.profile)
    }

    fn nearest_throwable(&self, agent: EntityId) -> Option<EntityId> {
        self.grab(agent)?.nearest
    }

    fn set_nearest_throwable(&mut self, agent: EntityId, throwable: Option<EntityId>) {
        if let Some(grab) = self.grab_mut(agent) {
            grab.nearest = throwable;
        }
    }

    fn held_throwable(&self, agent: EntityId) -> Option<EntityId> {
        self.grab(agent)?.held
    }

    fn set_held_throwable(&mut self, agent: EntityId, throwable: Option<EntityId>) {
        if let Some(grab) = self.grab_mut(agent) {
            grab.held = throwable;
        }
    }

    fn is_throwing(&self, agent: EntityId) -> bool {
        self.grab(agent).is_some_and(|g| g.throwing)
    }

    fn set_throwing(&mut self, agent: EntityId, throwing: bool) {
        if let Some(grab) = self.grab_mut(agent) {
            grab.throwing = throwing;
        }
    }
}

impl Throwables for Arena {
    fn is_throwable(&self, entity: EntityId) -> bool {
        self.bodies
            .get(&entity)
            .is_some_and(|b| b.throwable.is_some())
    }

    fn is_held(&self, throwable: EntityId) -> Option<bool> {
        self.bodies.get(&throwable)?.throwable.as_ref().map(|t| t.held)
    }

    fn set_held(&mut self, throwable: EntityId, held: bool) {
        if let Some(t) = self.throwable_mut(throwable) {
            t.held = held;
        }
    }

    fn attach(&mut self, throwable: EntityId, holder: EntityId, offset: Vec3, rotation: Vec3) {
        let Some((pos, forward)) = self.bodies.get(&holder).map(|h| (h.position, h.forward))
        else {
            return;
        };
        let Some(body) = self.bodies.get_mut(&throwable) else {
            return;
        };
        let Some(t) = body.throwable.as_mut() else {
            return;
        };
        t.parent = Some(Held {
            holder,
            offset,
            rotation,
        });
        body.velocity = Vec3::ZERO;
        body.position = pos + local_to_world(forward, offset);
        body.forward = forward;
    }

    fn detach(&mut self, throwable: EntityId) {
        if let Some(t) = self.throwable_mut(throwable) {
            if let Some(parent) = t.parent.take() {
                t.last_holder = Some(parent.holder);
            }
        }
    }

    fn apply_impulse(&mut self, throwable: EntityId, impulse: Vec3) {
        if let Some(body) = self.bodies.get_mut(&throwable) {
            if !body.is_carried() {
                body.velocity += impulse;
            }
        }
    }
}

impl Hearing for Arena {
    fn hearing_range(&self, listener: EntityId) -> Option<f32> {
        self.bodies.get(&listener)?.listener.as_ref().map(|l| l.range)
    }

    fn sound_range(&self, emitter: EntityId) -> Option<f32> {
        self.bodies.get(&emitter)?.sound.as_ref().map(|s| s.range)
    }

    fn closest_sound(&self, listener: EntityId) -> Option<EntityId> {
        self.bodies.get(&listener)?.listener.as_ref()?.closest
    }

    fn set_closest_sound(&mut self, listener: EntityId, emitter: Option<EntityId>) {
        if let Some(l) = self
            .bodies
            .get_mut(&listener)
            .and_then(|b| b.listener.as_mut())
        {
            l.closest = emitter;
        }
    }

    fn set_making_sound(&mut self, emitter: EntityId, making_sound: bool) {
        if let Some(s) = self.bodies.get_mut(&emitter).and_then(|b| b.sound.as_mut()) {
            s.making = making_sound;
        }
    }
}

impl Lifecycle for Arena {
    fn spawn(&mut self, prefab: PrefabId, position: Vec3, forward: Vec3) -> Option<EntityId> {
        let template = self.templates.get(&prefab)?.clone();
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let patrol = (0..template.patrol_points)
            .map(|_| self.random_point())
            .collect();

        let body = Body {
            prefab,
            position,
            forward: forward.horizontal().normalized().unwrap_or(Vec3::FORWARD),
            velocity: Vec3::ZERO,
            radius: template.radius,
            solid: template.solid,
            health: template.health,
            damage: template.damage,
            impact: Impact::default(),
            should_split: false,
            split_parts: template.split_parts,
            merge_result: template.merge_result,
            patrol,
            text: String::new(),
            particles: false,
            animation: None,
            nav: template.speed.map(|speed| Nav {
                speed,
                destination: None,
                status: PathStatus::Invalid,
                current_target: None,
                blocked: false,
            }),
            grab: template.grab.map(|profile| Grab {
                profile,
                nearest: None,
                held: None,
                throwing: template.throwing,
            }),
            throwable: template.throwable.then(Throwable::default),
            listener: template.hearing_range.map(|range| Listener {
                range,
                closest: None,
            }),
            sound: template.sound_range.map(|range| Sound {
                range,
                making: false,
            }),
            expires_in: template.lifetime,
        };
        self.bodies.insert(id, body);
        tracing::trace!(entity = %id, %prefab, "spawned");
        Some(id)
    }

    fn destroy(&mut self, entity: EntityId) {
        if self.bodies.remove(&entity).is_none() {
            return;
        }
        for body in self.bodies.values_mut() {
            if let Some(grab) = body.grab.as_mut() {
                if grab.nearest == Some(entity) {
                    grab.nearest = None;
                }
                if grab.held == Some(entity) {
                    grab.held = None;
                }
            }
            if let Some(l) = body.listener.as_mut() {
                if l.closest == Some(entity) {
                    l.closest = None;
                }
            }
            if let Some(t) = body.throwable.as_mut() {
                if t.parent.as_ref().is_some_and(|p| p.holder == entity) {
                    t.parent = None;
                    t.held = false;
                }
                if t.last_holder == Some(entity) {
                    t.last_holder = None;
                }
            }
        }
        tracing::trace!(%entity, "destroyed");
    }

    fn is_alive(&self, entity: EntityId) -> bool {
        self.bodies.contains_key(&entity)
    }

    fn prefab(&self, entity: EntityId) -> Option<PrefabId> {
        self.bodies.get(&entity).map(|b| b.prefab)
    }

    fn should_split(&self, entity: EntityId) -> bool {
        self.bodies.get(&entity).is_some_and(|b| b.should_split)
    }

    fn split_parts(&self, entity: EntityId) -> Vec<PrefabId> {
        self.bodies
            .get(&entity)
            .map(|b| b.split_parts.clone())
            .unwrap_or_default()
    }

    fn merge_result(&self, entity: EntityId) -> Option<PrefabId> {
        self.bodies.get(&entity)?.merge_result
    }
}

impl Presentation for Arena {
    fn display_text(&mut self, entity: EntityId, text: &str) {
        if let Some(body) = self.bodies.get_mut(&entity) {
            if body.text != text {
                body.text = text.to_string();
            }
        }
    }

    fn set_particles(&mut self, entity: EntityId, playing: bool) {
        if let Some(body) = self.bodies.get_mut(&entity) {
            body.particles = playing;
        }
    }

    fn play_animation(&mut self, entity: EntityId, animation: &str) {
        if let Some(body) = self.bodies.get_mut(&entity) {
            body.animation = Some(animation.to_string());
        }
    }
}

impl Shared for Arena {
    fn registry(&self) -> &Registry {
        &self.registry
    }

    fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}
