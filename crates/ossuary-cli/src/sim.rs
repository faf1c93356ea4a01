//! A headless scene: the arena, its enemy population and the spawner that keeps it topped up.

use anyhow::{Context, Result};

use ossuary_bt::{archetypes, Population, TickReport, Tuning};
use ossuary_core::{prefab, Combat, EntityId, Shared, TickContext};
use ossuary_sandbox::{Arena, ArenaConfig};
use ossuary_tools::{TraceLog, Tracer};

use crate::config::SimConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub ticks: u64,
    pub kills: u32,
    pub spawned: usize,
    pub respawned: usize,
    pub player_health: Option<i32>,
}

pub struct Sim {
    arena: Arena,
    population: Population<Arena>,
    ctx: TickContext,
    base_population: usize,
    respawned: usize,
}

impl Sim {
    pub fn new(config: &SimConfig, trace: bool) -> Result<Self> {
        let mut arena = Arena::new(ArenaConfig {
            seed: config.seed,
            ..config.arena
        });

        if let Some(at) = config.player {
            arena
                .spawn_registered(prefab::PLAYER, at)
                .context("Failed to spawn the player")?;
        }
        for _ in 0..config.enemies {
            let at = arena.random_point();
            arena.spawn_registered(prefab::SKELETON, at)?;
        }
        for _ in 0..config.rocks {
            let at = arena.random_point();
            arena.spawn_registered(prefab::ROCK, at)?;
        }
        for spawn in &config.spawns {
            arena
                .spawn_named(&spawn.prefab, spawn.at)
                .with_context(|| format!("Failed to spawn {} at {:?}", spawn.prefab, spawn.at))?;
        }

        let tuning: Tuning = config.tuning;
        let mut tracer = Tracer::new();
        if trace {
            tracer = tracer.with_log();
        }
        let population = Population::new(Box::new(move |world: &Arena, agent: EntityId| {
            archetypes::build(world, agent, &tuning)
        }))
        .with_think_every(config.think_every_ticks)
        .with_tracer(tracer);

        tracing::info!(
            bodies = arena.len(),
            spawned = arena.registry().spawned_len(),
            seed = config.seed,
            "scene ready"
        );

        Ok(Self {
            arena,
            population,
            ctx: TickContext::new(0, config.dt_seconds, config.seed),
            base_population: config.base_population,
            respawned: 0,
        })
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn tick(&self) -> u64 {
        self.ctx.tick
    }

    /// One simulation tick: trees, then physics, then the spawner.
    pub fn step(&mut self) -> Result<TickReport> {
        let report = self.population.tick(&self.ctx, &mut self.arena);
        self.arena.step(self.ctx.dt_seconds);
        self.respawn()?;
        tracing::trace!(tick = self.ctx.tick, ?report, "stepped");
        self.ctx = self.ctx.next();
        Ok(report)
    }

    fn respawn(&mut self) -> Result<()> {
        let registry = self.arena.registry();
        let wanted = self.base_population + registry.kill_count() as usize;
        if registry.spawned_len() < wanted {
            let at = self.arena.random_point();
            let id = self.arena.spawn_registered(prefab::SKELETON, at)?;
            self.respawned += 1;
            tracing::debug!(entity = %id, tick = self.ctx.tick, "spawned reinforcement");
        }
        Ok(())
    }

    pub fn player_alive(&self) -> bool {
        match self.arena.registry().player() {
            Some(player) => self.arena.health(player).map_or(true, |hp| hp > 0),
            None => true,
        }
    }

    pub fn summary(&self) -> Summary {
        let registry = self.arena.registry();
        Summary {
            ticks: self.ctx.tick,
            kills: registry.kill_count(),
            spawned: registry.spawned_len(),
            respawned: self.respawned,
            player_health: registry.player().and_then(|p| self.arena.health(p)),
        }
    }

    pub fn take_trace(&mut self) -> Option<TraceLog> {
        self.population.tracer_mut().take_log()
    }
}
