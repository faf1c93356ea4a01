use ossuary_bt::{
    Check, FlagCheck, HeldKind, Impacted, IsHeld, IsThrowing, Predicate, ShouldSplit,
    SoundInRange, TargetInView, ThrowableInView,
};
use ossuary_core::{
    prefab, EntityId, Grabbing, Hearing, Impact, Shared, Throwables, TargetRef, TickContext, Vec3,
};
use ossuary_sandbox::Arena;

fn ctx() -> TickContext {
    TickContext::new(0, 0.1, 7)
}

fn holds<P: Predicate<Arena>>(mut predicate: P, agent: EntityId, arena: &mut Arena) -> bool {
    predicate.check(&ctx(), agent, arena)
}

fn player_in_view() -> TargetInView {
    TargetInView::new(TargetRef::Player, 0.0, 50.0, 0.8)
}

#[test]
fn target_in_front_and_in_range_is_seen() {
    let mut arena = Arena::default();
    let skeleton = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    arena
        .spawn_registered(prefab::PLAYER, Vec3::new(0.0, 0.0, 10.0))
        .unwrap();

    assert!(holds(player_in_view(), skeleton, &mut arena));
}

#[test]
fn target_behind_or_too_far_is_not_seen() {
    let mut arena = Arena::default();
    let skeleton = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    let player = arena
        .spawn_registered(prefab::PLAYER, Vec3::new(0.0, 0.0, -10.0))
        .unwrap();
    assert!(!holds(player_in_view(), skeleton, &mut arena));

    arena.body_mut(player).unwrap().position = Vec3::new(0.0, 0.0, 55.0);
    assert!(!holds(player_in_view(), skeleton, &mut arena));

    let long_sight = TargetInView::new(player, 0.0, 60.0, 0.8);
    assert!(holds(long_sight, skeleton, &mut arena));
}

#[test]
fn target_behind_a_body_is_not_seen() {
    let mut arena = Arena::default();
    let skeleton = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    arena
        .spawn_registered(prefab::SKELETON, Vec3::new(0.0, 0.0, 5.0))
        .unwrap();
    arena
        .spawn_registered(prefab::PLAYER, Vec3::new(0.0, 0.0, 10.0))
        .unwrap();

    assert!(!holds(player_in_view(), skeleton, &mut arena));
}

#[test]
fn missing_player_is_never_seen() {
    let mut arena = Arena::default();
    let skeleton = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    assert!(!holds(player_in_view(), skeleton, &mut arena));
}

#[test]
fn throwable_in_view_picks_the_nearest_free_one() {
    let mut arena = Arena::default();
    let body = arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    let far = arena
        .spawn_registered(prefab::ROCK, Vec3::new(0.0, 0.0, 1.5))
        .unwrap();
    let near = arena
        .spawn_registered(prefab::ROCK, Vec3::new(0.1, 0.0, 1.0))
        .unwrap();

    assert!(holds(ThrowableInView::new(0.8), body, &mut arena));
    assert_eq!(arena.nearest_throwable(body), Some(near));

    arena.set_held(near, true);
    assert!(holds(ThrowableInView::new(0.8), body, &mut arena));
    assert_eq!(arena.nearest_throwable(body), Some(far));
}

#[test]
fn throwable_in_view_clears_the_slot_on_a_miss() {
    let mut arena = Arena::default();
    let body = arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    let behind = arena
        .spawn_registered(prefab::ROCK, Vec3::new(0.0, 0.0, -1.0))
        .unwrap();
    arena.set_nearest_throwable(body, Some(behind));

    assert!(!holds(ThrowableInView::new(0.8), body, &mut arena));
    assert_eq!(arena.nearest_throwable(body), None);
}

#[test]
fn throwable_in_view_can_filter_by_kind() {
    let mut arena = Arena::default();
    let body = arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    arena
        .spawn_registered(prefab::ROCK, Vec3::new(0.0, 0.0, 1.0))
        .unwrap();
    let head = arena
        .spawn_registered(prefab::SKELETON_HEAD, Vec3::new(0.0, 0.0, 1.8))
        .unwrap();

    let heads_only = ThrowableInView::new(0.8).only(prefab::SKELETON_HEAD);
    assert!(holds(heads_only, body, &mut arena));
    assert_eq!(arena.nearest_throwable(body), Some(head));
}

#[test]
fn sound_in_range_caches_the_closest_source() {
    let mut arena = Arena::default();
    let body = arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    let far = arena
        .spawn_registered(prefab::SKELETON_HEAD, Vec3::new(20.0, 0.0, 0.0))
        .unwrap();
    let near = arena
        .spawn_registered(prefab::SKELETON_HEAD, Vec3::new(0.0, 0.0, -12.0))
        .unwrap();
    let silent = arena
        .spawn_registered(prefab::SKELETON_HEAD, Vec3::new(1.0, 0.0, 0.0))
        .unwrap();
    arena.registry_mut().add_sound(far);
    arena.registry_mut().add_sound(near);

    assert!(holds(SoundInRange, body, &mut arena));
    assert_eq!(arena.closest_sound(body), Some(near));
    assert_ne!(arena.closest_sound(body), Some(silent));

    arena.registry_mut().remove_sound(far);
    arena.registry_mut().remove_sound(near);
    assert!(!holds(SoundInRange, body, &mut arena));
    assert_eq!(arena.closest_sound(body), None);
}

#[test]
fn sound_beyond_both_ranges_is_not_heard() {
    let mut arena = Arena::default();
    let body = arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    // hearing 10 + sound 15
    let head = arena
        .spawn_registered(prefab::SKELETON_HEAD, Vec3::new(25.0, 0.0, 0.0))
        .unwrap();
    arena.registry_mut().add_sound(head);

    assert!(!holds(SoundInRange, body, &mut arena));
}

#[test]
fn impact_must_reach_the_threshold() {
    let mut arena = Arena::default();
    let skeleton = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();

    arena
        .set_impact(skeleton, Impact { occurred: true, speed: 4.9 })
        .unwrap();
    assert!(!holds(Impacted::new(5.0), skeleton, &mut arena));

    arena
        .set_impact(skeleton, Impact { occurred: true, speed: 5.0 })
        .unwrap();
    assert!(holds(Impacted::new(5.0), skeleton, &mut arena));

    arena
        .set_impact(skeleton, Impact { occurred: false, speed: 50.0 })
        .unwrap();
    assert!(!holds(Impacted::new(5.0), skeleton, &mut arena));
}

#[test]
fn held_checks_follow_the_throwable_state() {
    let mut arena = Arena::default();
    let head = arena
        .spawn_registered(prefab::SKELETON_HEAD, Vec3::ZERO)
        .unwrap();
    let skeleton = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();

    assert!(holds(IsHeld::new(false), head, &mut arena));
    arena.set_held(head, true);
    assert!(holds(IsHeld::new(true), head, &mut arena));
    assert!(!holds(IsHeld::new(false), skeleton, &mut arena), "not a throwable");
}

#[test]
fn held_kind_compares_the_prefab_in_hand() {
    let mut arena = Arena::default();
    let body = arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    let rock = arena.spawn_registered(prefab::ROCK, Vec3::ZERO).unwrap();

    assert!(!holds(HeldKind::new(prefab::ROCK), body, &mut arena));
    arena.set_held_throwable(body, Some(rock));
    assert!(holds(HeldKind::new(prefab::ROCK), body, &mut arena));
    assert!(!holds(HeldKind::new(prefab::SKELETON_HEAD), body, &mut arena));
}

#[test]
fn flag_predicates_compare_against_the_wanted_value() {
    let mut arena = Arena::default();
    let body = arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    let skeleton = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();

    assert!(holds(IsThrowing::new(true), body, &mut arena));
    arena.set_throwing(body, false);
    assert!(holds(IsThrowing::new(false), body, &mut arena));

    assert!(!holds(ShouldSplit, skeleton, &mut arena));
    arena.set_should_split(skeleton, true).unwrap();
    assert!(holds(ShouldSplit, skeleton, &mut arena));

    let splitting = |w: &Arena, id: EntityId| ossuary_core::Lifecycle::should_split(w, id);
    assert!(holds(FlagCheck::new(splitting, true), skeleton, &mut arena));
    assert!(!holds(FlagCheck::new(splitting, false), skeleton, &mut arena));
}

#[test]
fn check_sees_the_tick_context() {
    let mut arena = Arena::default();
    let skeleton = arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    let odd_tick = Check::new(|ctx: &TickContext, _: EntityId, _: &Arena| ctx.tick % 2 == 1);
    assert!(!holds(odd_tick, skeleton, &mut arena));
}
