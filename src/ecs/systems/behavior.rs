use glam::Vec2;

use crate::config::Ruleset;
use crate::ecs::components::{Activity, Appearance, Cat, Indicators, Needs, Position, NEED_MAX};
use crate::room::Room;

use super::{feeding, interaction, movement, resting};

/// Hunger gained every tick.
const HUNGER_PER_TICK: f32 = 0.005;
/// Tiredness gained every tick spent awake.
const TIREDNESS_PER_TICK: f32 = 0.003;
/// Tiredness slept off every tick in bed.
const REST_PER_TICK: f32 = 0.15;
/// Hunger eaten away every tick at the bowl.
const FEED_PER_TICK: f32 = 1.2;

/// Whether a stage consumed the cat's tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Done,
}

pub type Stage = fn(&mut Turn<'_>) -> Flow;

/// The behavior cascade, highest priority first. The first stage returning
/// `Flow::Done` ends the cat's tick; the order decides every contested claim.
pub const CASCADE: [(&str, Stage); 10] = [
    ("bookkeeping", bookkeeping),
    ("timers", timers),
    ("eat_nearby", feeding::eat_nearby),
    ("claim_fresh_food", feeding::claim_fresh),
    ("drop_stale_target", feeding::drop_stale_target),
    ("start_play", interaction::start_play),
    ("seek_bed", resting::seek_bed),
    ("wait", movement::wait),
    ("arrive", movement::arrive),
    ("walk", movement::walk),
];

/// One cat's turn: a working copy of its components plus read access to the
/// rest of the room. Other entities are mutated in place through the ECS.
pub struct Turn<'a> {
    pub entity: hecs::Entity,
    pub cat: Cat,
    pub pos: Vec2,
    pub needs: Option<Needs>,
    pub appearance: Appearance,
    pub indicators: Indicators,
    pub ecs: &'a hecs::World,
    pub food: &'a [hecs::Entity],
    pub beds: &'a [hecs::Entity],
    pub cats: &'a [hecs::Entity],
    pub width: u32,
    pub height: u32,
    pub ruleset: Ruleset,
    pub rng: &'a mut fastrand::Rng,
}

impl<'a> Turn<'a> {
    /// Copy a cat's components out of the room. `None` if it is not a cat.
    pub fn load(room: &'a Room, entity: hecs::Entity, rng: &'a mut fastrand::Rng) -> Option<Self> {
        let ecs = room.ecs();
        let cat = *ecs.get::<&Cat>(entity).ok()?;
        let pos = ecs.get::<&Position>(entity).ok()?.0;
        let appearance = *ecs.get::<&Appearance>(entity).ok()?;
        let indicators = *ecs.get::<&Indicators>(entity).ok()?;
        let needs = ecs.get::<&Needs>(entity).ok().map(|needs| *needs);

        Some(Self {
            entity,
            cat,
            pos,
            needs,
            appearance,
            indicators,
            ecs,
            food: room.food(),
            beds: room.beds(),
            cats: room.cats(),
            width: room.width(),
            height: room.height(),
            ruleset: room.ruleset(),
            rng,
        })
    }

    /// Write the working copy back.
    pub fn store(self) {
        if let Ok(mut cat) = self.ecs.get::<&mut Cat>(self.entity) {
            *cat = self.cat;
        }
        if let Ok(mut pos) = self.ecs.get::<&mut Position>(self.entity) {
            pos.0 = self.pos;
        }
        if let Ok(mut appearance) = self.ecs.get::<&mut Appearance>(self.entity) {
            *appearance = self.appearance;
        }
        if let Ok(mut indicators) = self.ecs.get::<&mut Indicators>(self.entity) {
            *indicators = self.indicators;
        }
        if let (Some(needs), Ok(mut slot)) = (self.needs, self.ecs.get::<&mut Needs>(self.entity)) {
            *slot = needs;
        }
    }
}

/// Advance one cat by one tick.
pub fn update_cat(room: &Room, entity: hecs::Entity, rng: &mut fastrand::Rng) {
    let Some(mut turn) = Turn::load(room, entity, rng) else {
        return;
    };
    for (name, stage) in CASCADE {
        if stage(&mut turn) == Flow::Done {
            log::trace!("cat {:?}: {}", entity, name);
            break;
        }
    }
    turn.store();
}

/// Needs drift and indicator upkeep. Never ends the tick.
fn bookkeeping(turn: &mut Turn<'_>) -> Flow {
    let sleeping = turn.cat.is_sleeping();
    if let Some(needs) = turn.needs.as_mut() {
        needs.hunger = (needs.hunger + HUNGER_PER_TICK).min(NEED_MAX);
        if !sleeping {
            needs.tiredness = (needs.tiredness + TIREDNESS_PER_TICK).min(NEED_MAX);
        }
    }
    turn.cat.play_cooldown = turn.cat.play_cooldown.saturating_sub(1);
    turn.indicators.reconcile(&turn.cat);
    Flow::Continue
}

/// Run down whatever timed activity the cat is in. While one runs, nothing
/// else happens, except that fresh food pulls a sleeping cat out of bed.
fn timers(turn: &mut Turn<'_>) -> Flow {
    match turn.cat.activity {
        Activity::Idle => Flow::Continue,
        Activity::Playing { partner, remaining } => {
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                turn.cat.activity = Activity::Idle;
                turn.cat.play_cooldown = turn.ruleset.play_cooldown_ticks();
                turn.indicators.play = false;
                interaction::end_partner_play(turn.ecs, turn.cats, partner, turn.entity, turn.ruleset);
                log::debug!("cat {:?} done playing", turn.entity);
            } else {
                turn.cat.activity = Activity::Playing { partner, remaining };
            }
            Flow::Done
        }
        Activity::Sleeping { bed, remaining } => {
            if turn.cat.target_food.is_none() && feeding::fresh_food_waiting(turn) {
                resting::wake_up(&mut turn.cat, turn.ecs);
                turn.indicators.sleep = false;
                log::debug!("cat {:?} woken by fresh food", turn.entity);
                return Flow::Continue;
            }
            if let Some(needs) = turn.needs.as_mut() {
                needs.tiredness = (needs.tiredness - REST_PER_TICK).max(0.0);
            }
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                resting::wake_up(&mut turn.cat, turn.ecs);
                turn.indicators.sleep = false;
                log::debug!("cat {:?} woke up", turn.entity);
            } else {
                turn.cat.activity = Activity::Sleeping { bed, remaining };
            }
            Flow::Done
        }
        Activity::Eating { remaining } => {
            if let Some(needs) = turn.needs.as_mut() {
                needs.hunger = (needs.hunger - FEED_PER_TICK).max(0.0);
            }
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                turn.cat.activity = Activity::Idle;
                turn.cat.target_food = None;
                if let Some(needs) = turn.needs.as_mut() {
                    needs.hunger = 0.0;
                }
                log::debug!("cat {:?} finished eating", turn.entity);
            } else {
                turn.cat.activity = Activity::Eating { remaining };
            }
            Flow::Done
        }
    }
}
