use ossuary_core::{
    prefab, Combat, Grabbing, Lifecycle, Navigation, PathStatus, Shared, Spatial, Throwables, Vec3,
};
use ossuary_sandbox::{Arena, ArenaConfig, ArenaError};

fn arena() -> Arena {
    Arena::new(ArenaConfig {
        half_extent: 20.0,
        ..ArenaConfig::default()
    })
}

#[test]
fn raycast_hits_the_nearest_body_and_skips_the_caster() {
    let mut arena = arena();
    let caster = arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    let near = arena
        .spawn_registered(prefab::SKELETON, Vec3::new(0.0, 0.0, 5.0))
        .unwrap();
    let _far = arena
        .spawn_registered(prefab::SKELETON, Vec3::new(0.0, 0.0, 10.0))
        .unwrap();

    let hit = arena.raycast(Vec3::ZERO, Vec3::FORWARD, caster).unwrap();
    assert_eq!(hit.entity, Some(near));
    assert!((hit.distance - 4.5).abs() < 1e-4, "{}", hit.distance);
}

#[test]
fn raycast_stops_at_the_wall_when_nothing_is_in_the_way() {
    let arena = arena();
    let hit = arena
        .raycast(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), ossuary_core::EntityId(99))
        .unwrap();
    assert_eq!(hit.entity, None);
    assert!((hit.point.x - 20.0).abs() < 1e-4);
}

#[test]
fn walking_reaches_the_destination() {
    let mut arena = arena();
    let agent = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    let status = arena.set_destination(agent, Vec3::new(3.0, 0.0, 0.0));
    assert_eq!(status, PathStatus::Complete);
    assert_eq!(arena.path_status(agent), PathStatus::Complete);

    for _ in 0..10 {
        arena.step(0.1);
    }
    let pos = arena.position(agent).unwrap();
    assert!((pos.x - 3.0).abs() < 1e-4, "{pos:?}");
    assert_eq!(arena.remaining_distance(agent), Some(0.0));
}

#[test]
fn destinations_off_the_floor_are_partial() {
    let mut arena = arena();
    let agent = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    let status = arena.set_destination(agent, Vec3::new(100.0, 0.0, 0.0));
    assert_eq!(status, PathStatus::Partial);
    assert_eq!(arena.body(agent).unwrap().destination(), Some(Vec3::new(20.0, 0.0, 0.0)));
}

#[test]
fn blocked_navigation_is_invalid() {
    let mut arena = arena();
    let agent = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    arena.set_nav_blocked(agent, true).unwrap();
    assert_eq!(
        arena.set_destination(agent, Vec3::new(1.0, 0.0, 0.0)),
        PathStatus::Invalid
    );
}

#[test]
fn thrown_rock_reports_an_impact_on_the_body_it_hits() {
    let mut arena = arena();
    let thrower = arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    let victim = arena
        .spawn_registered(prefab::SKELETON, Vec3::new(0.0, 0.0, 3.0))
        .unwrap();
    let rock = arena
        .spawn_registered(prefab::ROCK, Vec3::new(0.0, 0.0, 0.8))
        .unwrap();

    arena.attach(rock, thrower, Vec3::new(0.0, 0.0, 0.8), Vec3::ZERO);
    arena.detach(rock);
    arena.apply_impulse(rock, Vec3::new(0.0, 0.0, 30.0));

    let mut hit = None;
    for _ in 0..10 {
        arena.step(0.02);
        let impact = arena.impact(victim).unwrap();
        if impact.occurred {
            hit = Some(impact);
            break;
        }
    }
    let impact = hit.expect("rock should reach the skeleton");
    assert!(impact.speed >= 5.0);
    assert!(!arena.impact(thrower).unwrap().occurred);

    arena.step(0.02);
    assert!(!arena.impact(victim).unwrap().occurred, "impacts last one step");
}

#[test]
fn held_bodies_follow_their_holder() {
    let mut arena = arena();
    let holder = arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    let rock = arena
        .spawn_registered(prefab::ROCK, Vec3::new(1.0, 0.0, 0.0))
        .unwrap();
    arena.attach(rock, holder, Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO);
    arena.set_destination(holder, Vec3::new(5.0, 0.0, 0.0));
    for _ in 0..5 {
        arena.step(0.1);
    }

    let holder_pos = arena.position(holder).unwrap();
    let rock_pos = arena.position(rock).unwrap();
    assert!((rock_pos.distance(holder_pos) - 1.0).abs() < 1e-3);
    assert_eq!(arena.body(rock).unwrap().holder(), Some(holder));
}

#[test]
fn destroy_clears_references_to_the_entity() {
    let mut arena = arena();
    let body = arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    let rock = arena
        .spawn_registered(prefab::ROCK, Vec3::new(0.0, 0.0, 1.0))
        .unwrap();
    arena.set_nearest_throwable(body, Some(rock));
    arena.set_held_throwable(body, Some(rock));

    arena.destroy(rock);
    assert!(!arena.is_alive(rock));
    assert_eq!(arena.nearest_throwable(body), None);
    assert_eq!(arena.held_throwable(body), None);
}

#[test]
fn spawning_registers_by_role() {
    let mut arena = arena();
    let player = arena.spawn_registered(prefab::PLAYER, Vec3::ZERO).unwrap();
    let rock = arena.spawn_registered(prefab::ROCK, Vec3::ZERO).unwrap();
    let head = arena
        .spawn_registered(prefab::SKELETON_HEAD, Vec3::ZERO)
        .unwrap();

    let registry = arena.registry();
    assert_eq!(registry.player(), Some(player));
    assert!(!registry.is_spawned(rock));
    assert!(registry.is_spawned(head));
    assert_eq!(registry.throwables().collect::<Vec<_>>(), vec![rock, head]);
}

#[test]
fn unknown_prefab_names_are_rejected() {
    let mut arena = arena();
    assert_eq!(
        arena.spawn_named("Dragon", Vec3::ZERO),
        Err(ArenaError::UnknownPrefab("Dragon".to_string()))
    );
    assert!(arena.spawn_named("Rock", Vec3::ZERO).is_ok());
}

#[test]
fn skeletons_get_a_patrol_route_on_the_floor() {
    let mut arena = arena();
    let skeleton = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    let route = arena.patrol_route(skeleton);
    assert_eq!(route.len(), 4);
    assert!(route.iter().all(|p| p.x.abs() <= 20.0 && p.z.abs() <= 20.0));
}

#[test]
fn death_particles_expire_after_their_lifetime() {
    let mut arena = arena();
    let rock = arena.spawn_registered(prefab::ROCK, Vec3::ZERO).unwrap();
    let effect = arena
        .spawn(prefab::DEATH_PARTICLES, Vec3::new(2.0, 0.0, 0.0), Vec3::FORWARD)
        .unwrap();
    assert_eq!(arena.body(effect).unwrap().expires_in(), Some(2.0));

    for _ in 0..3 {
        arena.step(0.5);
    }
    assert!(arena.is_alive(effect));

    arena.step(0.5);
    assert!(!arena.is_alive(effect));
    assert!(arena.is_alive(rock), "bodies without a lifetime stay");
    assert_eq!(arena.len(), 1);
}
