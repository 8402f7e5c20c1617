use std::collections::HashMap;

use glam::Vec2;
use instant::Instant;

use crate::cat::animation::Pose;
use crate::config::SimConfig;
use crate::ecs::systems;
use crate::iso;
use crate::room::{Item, Room};

/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;

// ---------------------------------------------------------------------------
// Tick timing
// ---------------------------------------------------------------------------

/// Wall-clock cost of the ticks run since the last summary.
struct TickStats {
    ticks_since_log: u32,
    tick_time_sum: f64,
    tick_time_max: f64,
}

impl TickStats {
    fn new() -> Self {
        Self {
            ticks_since_log: 0,
            tick_time_sum: 0.0,
            tick_time_max: 0.0,
        }
    }

    fn record(&mut self, dt: f64) {
        self.ticks_since_log += 1;
        self.tick_time_sum += dt;
        self.tick_time_max = self.tick_time_max.max(dt);
    }

    fn take(&mut self) -> Option<(f64, f64)> {
        if self.ticks_since_log == 0 {
            return None;
        }
        let avg_ms = self.tick_time_sum / self.ticks_since_log as f64 * 1000.0;
        let max_ms = self.tick_time_max * 1000.0;
        *self = Self::new();
        Some((avg_ms, max_ms))
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Headless driver: owns the room and feeds it ticks.
pub struct App {
    room: Room,
    config: SimConfig,

    // RNG (shared, deterministic per seed)
    rng: fastrand::Rng,

    // Fixed timestep
    last_frame_time: Option<Instant>,
    accumulator: f64,
    tick_count: u64,

    tick_stats: TickStats,
}

impl App {
    pub fn new(config: SimConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let room = Room::furnished(&config, &mut rng)?;
        Ok(Self {
            room,
            config,
            rng,
            last_frame_time: None,
            accumulator: 0.0,
            tick_count: 0,
            tick_stats: TickStats::new(),
        })
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    fn finished(&self) -> bool {
        self.tick_count >= self.config.ticks
    }

    /// One simulation tick plus the periodic chores around it.
    pub fn step(&mut self) {
        let feed_every = self.config.feed_every;
        if feed_every > 0 && self.tick_count > 0 && self.tick_count % feed_every == 0 {
            self.drop_food();
        }

        let started = Instant::now();
        systems::tick(&mut self.room, &mut self.rng);
        self.tick_stats.record(started.elapsed().as_secs_f64());
        self.tick_count += 1;

        if self.config.summary_every > 0 && self.tick_count % self.config.summary_every == 0 {
            self.log_summary();
        }
    }

    /// Run fixed-timestep simulation ticks for `dt` seconds of wall time.
    fn run_fixed_update(&mut self, dt: f64) {
        let tick_rate = self.config.tick_seconds();
        self.accumulator += dt;

        if self.accumulator > MAX_ACCUMULATOR {
            self.accumulator = MAX_ACCUMULATOR;
        }

        while self.accumulator >= tick_rate && !self.finished() {
            self.step();
            self.accumulator -= tick_rate;
        }
    }

    /// Drive the room until the configured tick count is reached.
    pub fn run_to_end(&mut self) {
        if !self.config.realtime {
            while !self.finished() {
                self.step();
            }
            return;
        }

        let frame = std::time::Duration::from_secs_f64(self.config.tick_seconds());
        while !self.finished() {
            let now = Instant::now();
            if let Some(last) = self.last_frame_time {
                self.run_fixed_update(now.duration_since(last).as_secs_f64());
            }
            self.last_frame_time = Some(now);
            std::thread::sleep(frame);
        }
    }

    /// Drop a fresh bowl the same way a user would: at a display-space point.
    fn drop_food(&mut self) {
        let cell = self.room.random_interior_cell(&mut self.rng);
        let screen = iso::to_screen(cell.as_vec2() + Vec2::splat(0.5));
        match self.room.drop_item(Item::Food, screen) {
            Ok(_) => log::info!("Tick {}: fresh food at ({}, {})", self.tick_count, cell.x, cell.y),
            Err(e) => log::warn!("Tick {}: could not drop food: {e}", self.tick_count),
        }
    }

    /// How many cats are in each pose right now.
    pub fn pose_counts(&self) -> HashMap<Pose, usize> {
        let mut counts = HashMap::new();
        for view in self.room.cat_views() {
            *counts.entry(view.pose).or_insert(0) += 1;
        }
        counts
    }

    fn log_summary(&mut self) {
        let counts = self.pose_counts();
        let line = [Pose::Idle, Pose::Walking, Pose::Eating, Pose::Sleeping, Pose::Playing]
            .iter()
            .map(|pose| format!("{}: {}", pose.label(), counts.get(pose).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join(" | ");
        log::info!("Tick {} | {} | food left: {}", self.tick_count, line, self.room.food().len());

        if let Some((avg_ms, max_ms)) = self.tick_stats.take() {
            log::debug!("tick cost avg: {:.3}ms | max: {:.3}ms", avg_ms, max_ms);
        }
    }

    fn log_roster(&self) {
        for view in self.room.cat_views() {
            match view.needs {
                Some(needs) => log::info!(
                    "{} ({}) at ({:.1}, {:.1}): {} | hunger {:.0} | tiredness {:.0}",
                    view.name,
                    view.kind.label(),
                    view.position.x,
                    view.position.y,
                    view.pose.label(),
                    needs.hunger,
                    needs.tiredness,
                ),
                None => log::info!(
                    "{} ({}) at ({:.1}, {:.1}): {}",
                    view.name,
                    view.kind.label(),
                    view.position.x,
                    view.position.y,
                    view.pose.label(),
                ),
            }
        }
    }
}

/// Entry point: furnish the room and run it.
pub fn run(config: SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config)?;
    log::info!(
        "Running {} ticks at {} Hz{}",
        app.config.ticks,
        app.config.tick_rate,
        if app.config.realtime { " (realtime)" } else { "" }
    );
    app.run_to_end();
    log::info!("Finished after {} ticks", app.tick_count);
    app.log_roster();
    Ok(())
}
