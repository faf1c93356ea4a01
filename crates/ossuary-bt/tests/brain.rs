use std::cell::RefCell;
use std::rc::Rc;

use ossuary_bt::leaves::Wait;
use ossuary_bt::{Brain, BrainConfig, Node, NodeExt, Status};
use ossuary_core::{EntityId, TickContext};

#[derive(Debug, Default)]
struct NullWorld;

/// Remembers the `dt` of every tick it receives.
struct DtLog(Rc<RefCell<Vec<f32>>>);

impl Node<NullWorld> for DtLog {
    fn tick(&mut self, ctx: &TickContext, _agent: EntityId, _world: &mut NullWorld) -> Status {
        self.0.borrow_mut().push(ctx.dt_seconds);
        Status::Running
    }
}

fn every(ticks: u32) -> BrainConfig {
    BrainConfig {
        think_every_ticks: ticks,
        think_offset_ticks: 0,
    }
}

/// Simulation tick on which a one-second wait first succeeds at `dt` = 0.25.
fn one_second_wait_finishes_on(config: BrainConfig) -> Option<u64> {
    let mut brain = Brain::new(EntityId(1), Wait::seconds(1.0).boxed());
    brain.config = config;
    let mut world = NullWorld;
    let mut ctx = TickContext::new(0, 0.25, 0);
    for _ in 0..32 {
        if brain.tick(&ctx, &mut world) == Some(Status::Success) {
            return Some(ctx.tick);
        }
        ctx = ctx.next();
    }
    None
}

#[test]
fn waits_keep_simulated_time_under_a_slow_cadence() {
    assert_eq!(one_second_wait_finishes_on(every(1)), Some(3));
    assert_eq!(one_second_wait_finishes_on(every(2)), Some(4));
    assert_eq!(one_second_wait_finishes_on(every(4)), Some(4));
}

#[test]
fn tree_dt_covers_the_steps_since_the_last_think() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut brain = Brain::new(EntityId(7), DtLog(log.clone()).boxed());
    brain.config = every(3);
    let mut world = NullWorld;
    let mut ctx = TickContext::new(0, 0.25, 0);

    let mut thought = Vec::new();
    for _ in 0..10 {
        if brain.tick(&ctx, &mut world).is_some() {
            thought.push(ctx.tick);
        }
        ctx = ctx.next();
    }

    assert_eq!(thought, vec![0, 3, 6, 9]);
    assert_eq!(*log.borrow(), vec![0.25, 0.75, 0.75, 0.75]);
}

#[test]
fn default_cadence_passes_dt_through() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut brain = Brain::new(EntityId(2), DtLog(log.clone()).boxed());
    let mut world = NullWorld;
    let mut ctx = TickContext::new(5, 0.1, 0);
    for _ in 0..3 {
        assert_eq!(brain.tick(&ctx, &mut world), Some(Status::Running));
        ctx = ctx.next();
    }
    assert_eq!(*log.borrow(), vec![0.1, 0.1, 0.1]);
}

#[test]
fn deterministic_offsets_spread_agents_across_ticks() {
    let a = BrainConfig::deterministic(EntityId(4), 2);
    let b = BrainConfig::deterministic(EntityId(5), 2);
    assert!(a.should_think(0) && !a.should_think(1));
    assert!(!b.should_think(0) && b.should_think(1));
}
