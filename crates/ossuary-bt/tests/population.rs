use std::cell::Cell;
use std::rc::Rc;

use ossuary_bt::{archetypes, BoxedNode, Population, Status, TickReport, Tuning};
use ossuary_core::{prefab, EntityId, Hearing, Impact, Lifecycle, Shared, TickContext, Vec3};
use ossuary_sandbox::Arena;
use ossuary_tools::Tracer;

fn enemies() -> Population<Arena> {
    let tuning = Tuning::default();
    Population::new(Box::new(move |world: &Arena, agent: EntityId| {
        archetypes::build(world, agent, &tuning)
    }))
}

struct Sim {
    arena: Arena,
    population: Population<Arena>,
    ctx: TickContext,
}

impl Sim {
    fn new(population: Population<Arena>) -> Self {
        Self {
            arena: Arena::default(),
            population,
            ctx: TickContext::new(0, 0.1, 3),
        }
    }

    fn tick(&mut self) -> TickReport {
        let report = self.population.tick(&self.ctx, &mut self.arena);
        self.ctx = self.ctx.next();
        report
    }
}

#[test]
fn agents_think_from_the_tick_after_adoption() {
    let mut sim = Sim::new(enemies());
    let a = sim.arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    let b = sim
        .arena
        .spawn_registered(prefab::SKELETON, Vec3::new(10.0, 0.0, 0.0))
        .unwrap();

    assert_eq!(
        sim.tick(),
        TickReport {
            ticked: 0,
            removed: 0,
            adopted: 2
        }
    );
    assert!(sim.population.contains(a) && sim.population.contains(b));
    assert_eq!(sim.population.brain(a).unwrap().tree.last_status(), None);

    let report = sim.tick();
    assert_eq!(report.ticked, 2);
    assert_eq!(
        sim.population.brain(a).unwrap().tree.last_status(),
        Some(Status::Running),
        "patrolling"
    );
}

#[test]
fn a_killed_agent_does_not_stop_the_rest_of_the_scan() {
    let mut sim = Sim::new(enemies());
    let ids: Vec<EntityId> = (0..3)
        .map(|i| {
            sim.arena
                .spawn_registered(prefab::SKELETON, Vec3::new(i as f32 * 5.0, 0.0, 0.0))
                .unwrap()
        })
        .collect();
    sim.tick();

    sim.arena
        .set_impact(
            ids[0],
            Impact {
                occurred: true,
                speed: 10.0,
            },
        )
        .unwrap();
    let report = sim.tick();

    assert_eq!(report.ticked, 3);
    assert_eq!(report.removed, 1);
    assert_eq!(report.adopted, 0, "death particles do not think");
    assert!(!sim.arena.is_alive(ids[0]));
    assert_eq!(sim.arena.registry().kill_count(), 1);
    assert!(!sim.population.contains(ids[0]));
    assert_eq!(sim.population.len(), 2);
}

#[test]
fn split_parts_are_adopted_in_the_same_tick() {
    let mut sim = Sim::new(enemies());
    let skeleton = sim.arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    sim.arena
        .spawn_registered(prefab::PLAYER, Vec3::new(0.0, 0.0, 5.0))
        .unwrap();
    sim.tick();

    let report = sim.tick();
    assert_eq!(
        report,
        TickReport {
            ticked: 1,
            removed: 1,
            adopted: 2
        }
    );
    assert!(!sim.arena.is_alive(skeleton));

    let kinds: Vec<_> = sim
        .arena
        .registry()
        .spawned()
        .filter_map(|id| sim.arena.prefab(id))
        .collect();
    assert_eq!(kinds, vec![prefab::SKELETON_HEAD, prefab::HEADLESS_BODY]);
    assert_eq!(sim.population.len(), 2);
}

#[test]
fn entities_without_a_tree_are_asked_once() {
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    let population = Population::new(Box::new(
        move |_: &Arena, _: EntityId| -> Option<BoxedNode<Arena>> {
            seen.set(seen.get() + 1);
            None
        },
    ));
    let mut sim = Sim::new(population);
    sim.arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();

    for _ in 0..3 {
        let report = sim.tick();
        assert_eq!(report.adopted, 0);
        assert_eq!(report.ticked, 0);
    }
    assert!(sim.population.is_empty());
    assert_eq!(calls.get(), 1);
}

#[test]
fn tracer_records_adoption_and_statuses() {
    let mut sim = Sim::new(enemies().with_tracer(Tracer::new().with_log()));
    let skeleton = sim.arena.spawn_registered(prefab::SKELETON, Vec3::ZERO).unwrap();
    sim.tick();
    sim.tick();

    let log = sim.population.tracer().log().unwrap();
    let adopted: Vec<_> = log.with_tag("population.adopt").collect();
    assert_eq!(adopted.len(), 1);
    assert_eq!(adopted[0].tick, 0);
    assert_eq!(adopted[0].a, skeleton.0);
    assert_eq!(log.with_tag("tree.running").count(), 1);
}

#[test]
fn headless_body_merges_with_its_screaming_head() {
    let mut sim = Sim::new(enemies());
    let body = sim
        .arena
        .spawn_registered(prefab::HEADLESS_BODY, Vec3::ZERO)
        .unwrap();
    let head = sim
        .arena
        .spawn_registered(prefab::SKELETON_HEAD, Vec3::new(0.0, 0.0, 1.5))
        .unwrap();
    sim.arena.set_making_sound(head, true);
    sim.arena.registry_mut().add_sound(head);
    sim.tick();

    let report = sim.tick();
    assert_eq!(
        report,
        TickReport {
            ticked: 1,
            removed: 2,
            adopted: 1
        }
    );
    assert!(!sim.arena.is_alive(body));
    assert!(!sim.arena.is_alive(head));

    let spawned: Vec<EntityId> = sim.arena.registry().spawned().collect();
    assert_eq!(spawned.len(), 1);
    assert_eq!(sim.arena.prefab(spawned[0]), Some(prefab::SKELETON));
    assert_eq!(sim.arena.registry().sounds().count(), 0);
    assert!(sim.population.contains(spawned[0]));
}
