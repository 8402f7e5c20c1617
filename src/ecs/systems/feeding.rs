use crate::cat::animation::AnimationCue;
use crate::ecs::components::{Activity, Food};

use super::behavior::{Flow, Turn};
use super::resting;

/// Ticks spent at the bowl (1.5 s).
pub const EATING_TICKS: u32 = 90;

/// Eat the first food within reach, in registry order.
pub fn eat_nearby(turn: &mut Turn<'_>) -> Flow {
    if turn.cat.is_eating() {
        return Flow::Continue;
    }
    for &entity in turn.food {
        let Ok(mut food) = turn.ecs.get::<&mut Food>(entity) else {
            continue;
        };
        if !food.check_proximity(turn.pos) {
            continue;
        }
        food.consume();
        drop(food);

        // Ate something other than what we were running to: let it go.
        if let Some(target) = turn.cat.target_food.take() {
            if target != entity {
                release_claim(turn.ecs, target);
            }
        }
        turn.cat.activity = Activity::Eating {
            remaining: EATING_TICKS,
        };
        turn.cat.moving = false;
        turn.appearance.cue = AnimationCue::Idle;
        turn.indicators.sleep = false;
        log::debug!("cat {:?} eating food {:?}", turn.entity, entity);
        return Flow::Done;
    }
    Flow::Continue
}

/// Any fresh food nobody has claimed yet?
pub fn fresh_food_waiting(turn: &Turn<'_>) -> bool {
    turn.food.iter().any(|&entity| {
        turn.ecs
            .get::<&Food>(entity)
            .map_or(false, |food| food.is_claimable())
    })
}

/// Claim the first unclaimed fresh food and head for it. Wakes a sleeping cat.
pub fn claim_fresh(turn: &mut Turn<'_>) -> Flow {
    if turn.cat.target_food.is_some() {
        return Flow::Continue;
    }
    for &entity in turn.food {
        let Ok(mut food) = turn.ecs.get::<&mut Food>(entity) else {
            continue;
        };
        if !food.is_claimable() {
            continue;
        }
        food.claimed = true;
        let cell = food.cell;
        drop(food);

        if resting::wake_up(&mut turn.cat, turn.ecs) {
            turn.indicators.sleep = false;
        }
        turn.cat.target_food = Some(entity);
        turn.cat.target = cell.as_vec2();
        turn.cat.wait_timer = 0;
        log::debug!(
            "cat {:?} claimed food {:?} at ({}, {})",
            turn.entity,
            entity,
            cell.x,
            cell.y
        );
        break;
    }
    Flow::Continue
}

/// Forget a target that someone else ate or that has been cleared away.
pub fn drop_stale_target(turn: &mut Turn<'_>) -> Flow {
    if let Some(target) = turn.cat.target_food {
        let stale = turn
            .ecs
            .get::<&Food>(target)
            .map_or(true, |food| food.eaten);
        if stale {
            turn.cat.target_food = None;
            log::debug!("cat {:?} lost its food {:?}", turn.entity, target);
        }
    }
    Flow::Continue
}

fn release_claim(ecs: &hecs::World, entity: hecs::Entity) {
    if let Ok(mut food) = ecs.get::<&mut Food>(entity) {
        if !food.eaten {
            food.claimed = false;
        }
    }
}
