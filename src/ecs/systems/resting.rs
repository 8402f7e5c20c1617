use crate::cat::animation::AnimationCue;
use crate::ecs::components::{Activity, Bed, Cat};

use super::behavior::{Flow, Turn};

/// Cats under the needs ruleset only lie down once tiredness passes this.
const SLEEPY_THRESHOLD: f32 = 50.0;
/// Nap length in ticks (3 to 6 s).
const SLEEP_TICKS_MIN: u32 = 180;
const SLEEP_TICKS_MAX: u32 = 360;

/// End a nap and free the bed. Returns whether the cat was asleep.
pub fn wake_up(cat: &mut Cat, ecs: &hecs::World) -> bool {
    let Activity::Sleeping { bed, .. } = cat.activity else {
        return false;
    };
    if let Ok(mut bed) = ecs.get::<&mut Bed>(bed) {
        bed.occupied = false;
    }
    cat.activity = Activity::Idle;
    true
}

/// Curl up in the first free bed within reach.
pub fn seek_bed(turn: &mut Turn<'_>) -> Flow {
    if turn.cat.is_sleeping() || turn.cat.target_food.is_some() {
        return Flow::Continue;
    }
    if let Some(needs) = turn.needs {
        if needs.tiredness <= SLEEPY_THRESHOLD {
            return Flow::Continue;
        }
    }
    for &entity in turn.beds {
        let Ok(mut bed) = turn.ecs.get::<&mut Bed>(entity) else {
            continue;
        };
        if bed.occupied || !bed.check_proximity(turn.pos) {
            continue;
        }
        bed.occupied = true;
        turn.cat.activity = Activity::Sleeping {
            bed: entity,
            remaining: turn.rng.u32(SLEEP_TICKS_MIN..SLEEP_TICKS_MAX),
        };
        turn.cat.moving = false;
        turn.appearance.cue = AnimationCue::Idle;
        turn.indicators.sleep = true;
        log::debug!("cat {:?} fell asleep in bed {:?}", turn.entity, entity);
        return Flow::Done;
    }
    Flow::Continue
}
