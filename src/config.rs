use clap::{Parser, ValueEnum};

use crate::error::ConfigError;

/// Smallest room side that leaves a usable interior for spawning and wandering.
pub const MIN_ROOM_SIDE: u32 = 5;

const DEFAULT_ROOM_WIDTH: u32 = 16;
const DEFAULT_ROOM_HEIGHT: u32 = 12;
const DEFAULT_CAT_COUNT: usize = 4;
const DEFAULT_STALE_FOOD: usize = 2;
const DEFAULT_BEDS: usize = 2;
const DEFAULT_TICKS: u64 = 3600;
const DEFAULT_TICK_RATE: u32 = 60;
const DEFAULT_FEED_EVERY: u64 = 600;
const DEFAULT_SUMMARY_EVERY: u64 = 300;

/// Which generation of cat rules to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Ruleset {
    /// No needs, short play sessions, no cooldown.
    Classic,
    /// Hunger and tiredness gate play and sleep; play has a cooldown.
    Needs,
}

impl Ruleset {
    pub fn tracks_needs(self) -> bool {
        matches!(self, Ruleset::Needs)
    }

    /// Length of a play session in ticks.
    pub fn play_ticks(self) -> u32 {
        match self {
            Ruleset::Classic => 120,
            Ruleset::Needs => 300,
        }
    }

    /// Ticks a cat must wait after playing before it can play again.
    pub fn play_cooldown_ticks(self) -> u32 {
        match self {
            Ruleset::Classic => 0,
            Ruleset::Needs => 300,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Ruleset::Classic => "classic",
            Ruleset::Needs => "needs",
        }
    }
}

/// Headless playroom simulation.
#[derive(Debug, Clone, Parser)]
#[command(name = "catroom", version, about)]
pub struct SimConfig {
    /// Room width in tiles (walls included).
    #[arg(long, default_value_t = DEFAULT_ROOM_WIDTH)]
    pub width: u32,
    /// Room height in tiles (walls included).
    #[arg(long, default_value_t = DEFAULT_ROOM_HEIGHT)]
    pub height: u32,
    /// Number of cats.
    #[arg(long, default_value_t = DEFAULT_CAT_COUNT)]
    pub cats: usize,
    /// Leftover (stale) food already in the room at start.
    #[arg(long, default_value_t = DEFAULT_STALE_FOOD)]
    pub stale_food: usize,
    /// Beds placed at start.
    #[arg(long, default_value_t = DEFAULT_BEDS)]
    pub beds: usize,
    #[arg(long, value_enum, default_value_t = Ruleset::Needs)]
    pub ruleset: Ruleset,
    /// RNG seed. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Ticks to simulate before exiting.
    #[arg(long, default_value_t = DEFAULT_TICKS)]
    pub ticks: u64,
    /// Simulation ticks per second.
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    pub tick_rate: u32,
    /// Pace ticks against the wall clock instead of running flat out.
    #[arg(long)]
    pub realtime: bool,
    /// Drop fresh food at a random cell every N ticks (0 = never).
    #[arg(long, default_value_t = DEFAULT_FEED_EVERY)]
    pub feed_every: u64,
    /// Log an activity summary every N ticks (0 = never).
    #[arg(long, default_value_t = DEFAULT_SUMMARY_EVERY)]
    pub summary_every: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_ROOM_WIDTH,
            height: DEFAULT_ROOM_HEIGHT,
            cats: DEFAULT_CAT_COUNT,
            stale_food: DEFAULT_STALE_FOOD,
            beds: DEFAULT_BEDS,
            ruleset: Ruleset::Needs,
            seed: None,
            ticks: DEFAULT_TICKS,
            tick_rate: DEFAULT_TICK_RATE,
            realtime: false,
            feed_every: DEFAULT_FEED_EVERY,
            summary_every: DEFAULT_SUMMARY_EVERY,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_ROOM_SIDE || self.height < MIN_ROOM_SIDE {
            return Err(ConfigError::RoomTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_ROOM_SIDE,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }

    /// Seconds per tick.
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }
}
