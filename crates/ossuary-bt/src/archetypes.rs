//! The enemy trees, one per prefab.
//!
//! Every tree targets [`TargetRef::Player`], so a player that respawns under a new id is picked
//! up without rebuilding anything.

use ossuary_core::{prefab, EntityId, TargetRef, Vec3, World};

use crate::bt::{BoxedNode, NodeExt};
use crate::composite::{Selector, Sequence, SuccessParallel};
use crate::condition::{HeldKind, Impacted, IsHeld, Predicate};
use crate::interruptor::Interruptor;
use crate::leaves::{
    Aim, DisplayText, DropHeld, FocusOnSound, KillSpawnable, MakeSound, Merge, MoveTo,
    MoveToNearestThrowable, Pickup, PlayParticles, RandomWalk, SpawnAt, SpawnPrefab, Split,
    StopParticles, StopSound, Throw, Wait,
};
use crate::perception::{SoundInRange, TargetInView, ThrowableInView};
use crate::tuning::Tuning;

fn seq<W: 'static>(children: Vec<BoxedNode<W>>) -> BoxedNode<W> {
    Sequence::new(children).boxed()
}

fn player_in_view(tuning: &Tuning) -> TargetInView {
    TargetInView::new(
        TargetRef::Player,
        tuning.view_min_range,
        tuning.view_max_range,
        tuning.view_cone_dot,
    )
}

/// Tree for `agent`, chosen by its prefab. `None` for prefabs that do not think.
pub fn build<W>(world: &W, agent: EntityId, tuning: &Tuning) -> Option<BoxedNode<W>>
where
    W: World + 'static,
{
    let kind = world.prefab(agent)?;
    if kind == prefab::SKELETON {
        Some(skeleton(world.patrol_route(agent), tuning))
    } else if kind == prefab::HEADLESS_BODY {
        Some(headless_body(tuning))
    } else if kind == prefab::SKELETON_HEAD {
        Some(head(tuning))
    } else {
        None
    }
}

/// Patrols until it sees the player, then splits into a head and a headless body.
pub fn skeleton<W>(route: Vec<Vec3>, tuning: &Tuning) -> BoxedNode<W>
where
    W: World + 'static,
{
    let patrol = if route.is_empty() {
        RandomWalk::new(tuning.wander_arrival_distance).boxed()
    } else {
        MoveTo::route(route, tuning.route_arrival_distance).boxed()
    };

    SuccessParallel::new(vec![
        player_in_view(tuning)
            .guard(seq(vec![
                DisplayText::new("Splitting").boxed(),
                Split.boxed(),
            ]))
            .boxed(),
        Interruptor::new(
            player_in_view(tuning).bare().boxed(),
            seq(vec![DisplayText::new("Patrolling").boxed(), patrol]),
        )
        .boxed(),
        death(tuning, false),
    ])
    .boxed()
}

/// Throws whatever it finds at the player and goes after its head when it hears it scream.
pub fn headless_body<W>(tuning: &Tuning) -> BoxedNode<W>
where
    W: World + 'static,
{
    let throw_at_player = |tuning: &Tuning| -> Vec<BoxedNode<W>> {
        vec![
            Aim::at(TargetRef::Player).boxed(),
            Wait::seconds(tuning.throw_wait_seconds).boxed(),
            Throw::at(TargetRef::Player).boxed(),
            Wait::seconds(tuning.throw_wait_seconds).boxed(),
        ]
    };

    let reunite = SoundInRange
        .guard(seq(vec![
            DisplayText::new("Hearing Sound").boxed(),
            FocusOnSound.boxed(),
            MoveToNearestThrowable::new().boxed(),
            Pickup.boxed(),
            HeldKind::new(prefab::SKELETON_HEAD)
                .guard(Merge::with(prefab::SKELETON_HEAD).boxed())
                .boxed(),
        ]))
        .boxed();

    let mut fetch = vec![
        DisplayText::new("Throwing").boxed(),
        MoveToNearestThrowable::new().boxed(),
        Pickup.boxed(),
    ];
    fetch.extend(throw_at_player(tuning));
    let fetch_and_throw = ThrowableInView::new(tuning.throwable_cone_dot)
        .guard(seq(fetch))
        .boxed();

    let wander = Interruptor::new(
        SoundInRange.bare().boxed(),
        Interruptor::new(
            player_in_view(tuning).bare().boxed(),
            seq(vec![
                DisplayText::new("Random Walking").boxed(),
                RandomWalk::new(tuning.wander_arrival_distance).boxed(),
            ]),
        )
        .boxed(),
    )
    .boxed();

    let throw_held = player_in_view(tuning)
        .guard(seq(throw_at_player(tuning)))
        .boxed();

    SuccessParallel::new(vec![
        Selector::new(vec![reunite, fetch_and_throw, wander, throw_held]).boxed(),
        death(tuning, true),
    ])
    .boxed()
}

/// Screams on a loop while lying around; goes quiet the moment it is picked up.
pub fn head<W>(tuning: &Tuning) -> BoxedNode<W>
where
    W: World + 'static,
{
    let scream = seq(vec![
        Wait::seconds(tuning.scream_wait_seconds).boxed(),
        MakeSound.boxed(),
        PlayParticles.boxed(),
        Wait::seconds(tuning.scream_wait_seconds).boxed(),
        StopParticles.boxed(),
        StopSound.boxed(),
    ]);

    Interruptor::new(IsHeld::new(true).bare().boxed(), scream)
        .with_on_exit(seq(vec![StopParticles.boxed(), StopSound.boxed()]))
        .boxed()
}

fn death<W>(tuning: &Tuning, drops_held: bool) -> BoxedNode<W>
where
    W: World + 'static,
{
    let mut steps: Vec<BoxedNode<W>> = Vec::new();
    if drops_held {
        steps.push(DisplayText::new("I've Been hit").boxed());
    }
    steps.push(SpawnPrefab::new(prefab::DEATH_PARTICLES, SpawnAt::Agent).boxed());
    if drops_held {
        steps.push(DropHeld.boxed());
    }
    steps.push(KillSpawnable.boxed());

    Impacted::new(tuning.impact_speed_threshold)
        .guard(seq(steps))
        .boxed()
}
