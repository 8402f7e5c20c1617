use glam::Vec2;

use crate::cat::animation::AnimationCue;

use super::behavior::{Flow, Turn};

/// Stroll speed in tiles per tick.
pub const WALK_SPEED: f32 = 0.02;
/// Speed when running to fresh food.
pub const RUN_SPEED: f32 = 0.04;
/// A target closer than this counts as reached.
const ARRIVAL_RADIUS: f32 = 0.05;
/// Pause at each wander target (1 to 3 s).
const WAIT_TICKS_MIN: u32 = 60;
const WAIT_TICKS_MAX: u32 = 180;

/// Uniform random interior cell; the outer ring of wall tiles is excluded.
pub fn wander_target(width: u32, height: u32, rng: &mut fastrand::Rng) -> Vec2 {
    Vec2::new(
        (1 + rng.u32(0..width.saturating_sub(2).max(1))) as f32,
        (1 + rng.u32(0..height.saturating_sub(2).max(1))) as f32,
    )
}

/// Linger after reaching a wander target.
pub fn wait(turn: &mut Turn<'_>) -> Flow {
    if turn.cat.wait_timer == 0 {
        return Flow::Continue;
    }
    turn.cat.wait_timer -= 1;
    if turn.cat.moving {
        turn.cat.moving = false;
        turn.appearance.cue = AnimationCue::Idle;
    }
    Flow::Done
}

/// Stop at the target. Food targets are let go (the bowl is eaten next tick);
/// wander targets roll a new destination and a pause.
pub fn arrive(turn: &mut Turn<'_>) -> Flow {
    if turn.pos.distance(turn.cat.target) >= ARRIVAL_RADIUS {
        return Flow::Continue;
    }
    // A chased bowl sits on the target cell, so eat_nearby normally fires
    // well before this. Only a target moved off its bowl gets here.
    if turn.cat.target_food.take().is_none() {
        turn.cat.target = wander_target(turn.width, turn.height, turn.rng);
        turn.cat.wait_timer = turn.rng.u32(WAIT_TICKS_MIN..WAIT_TICKS_MAX);
    }
    turn.cat.moving = false;
    turn.appearance.cue = AnimationCue::Idle;
    Flow::Done
}

/// Straight line toward the target. No pathfinding: furniture is walked over.
pub fn walk(turn: &mut Turn<'_>) -> Flow {
    if !turn.cat.moving {
        turn.cat.moving = true;
        turn.appearance.cue = AnimationCue::Walk;
        turn.indicators.sleep = false;
    }

    let speed = if turn.cat.target_food.is_some() {
        RUN_SPEED
    } else {
        WALK_SPEED
    };
    let delta = turn.cat.target - turn.pos;
    turn.pos += delta.normalize_or_zero() * speed;

    if delta.x < 0.0 {
        turn.appearance.flipped = true;
    } else if delta.x > 0.0 {
        turn.appearance.flipped = false;
    }
    Flow::Done
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Ruleset;
    use crate::ecs::components::{Appearance, Cat, CatKind};
    use crate::ecs::systems::behavior::update_cat;
    use crate::room::Room;
    use glam::IVec2;

    fn room_with_cat(pos: Vec2, target: Vec2) -> (Room, hecs::Entity) {
        let mut room = Room::new(16, 12, Ruleset::Classic).unwrap();
        let cat = room.spawn_cat(pos, CatKind::Classical, "Boots".into());
        room.ecs().get::<&mut Cat>(cat).unwrap().target = target;
        (room, cat)
    }

    #[test]
    fn wander_targets_stay_off_the_walls() {
        let mut rng = fastrand::Rng::with_seed(21);
        for _ in 0..500 {
            let target = wander_target(16, 12, &mut rng);
            assert!((1.0..=14.0).contains(&target.x));
            assert!((1.0..=10.0).contains(&target.y));
            assert_eq!(target, target.round());
        }
    }

    #[test]
    fn walks_in_a_straight_line_at_walk_speed() {
        let mut rng = fastrand::Rng::with_seed(21);
        let (room, cat) = room_with_cat(Vec2::new(2.0, 2.0), Vec2::new(5.0, 6.0));

        update_cat(&room, cat, &mut rng);

        let pos = room.position(cat).unwrap();
        let expected = Vec2::new(2.0, 2.0) + Vec2::new(3.0, 4.0) / 5.0 * WALK_SPEED;
        assert!(pos.distance(expected) < 1e-6);
        let view = &room.cat_views()[0];
        assert!(room.cat(cat).unwrap().moving);
        assert_eq!(view.cue, AnimationCue::Walk);
        assert!(!view.flipped);
    }

    #[test]
    fn faces_left_when_heading_left() {
        let mut rng = fastrand::Rng::with_seed(21);
        let (room, cat) = room_with_cat(Vec2::new(8.0, 5.0), Vec2::new(2.0, 5.0));
        update_cat(&room, cat, &mut rng);
        assert!(room.ecs().get::<&Appearance>(cat).unwrap().flipped);
    }

    #[test]
    fn reaching_a_wander_target_rolls_a_pause_and_a_new_target() {
        let mut rng = fastrand::Rng::with_seed(21);
        let (room, cat) = room_with_cat(Vec2::new(4.0, 4.0), Vec2::new(4.01, 4.0));

        update_cat(&room, cat, &mut rng);

        let state = room.cat(cat).unwrap();
        assert!((WAIT_TICKS_MIN..WAIT_TICKS_MAX).contains(&state.wait_timer));
        assert!(!state.moving);
        assert_eq!(room.position(cat), Some(Vec2::new(4.0, 4.0)));
    }

    #[test]
    fn waiting_cats_stay_put() {
        let mut rng = fastrand::Rng::with_seed(21);
        let (room, cat) = room_with_cat(Vec2::new(4.0, 4.0), Vec2::new(9.0, 4.0));
        {
            let mut state = room.ecs().get::<&mut Cat>(cat).unwrap();
            state.wait_timer = 2;
            state.moving = true;
        }

        update_cat(&room, cat, &mut rng);
        let state = room.cat(cat).unwrap();
        assert_eq!(state.wait_timer, 1);
        assert!(!state.moving);
        assert_eq!(room.position(cat), Some(Vec2::new(4.0, 4.0)));

        update_cat(&room, cat, &mut rng);
        update_cat(&room, cat, &mut rng);
        assert!(room.position(cat).unwrap().x > 4.0);
    }

    #[test]
    fn runs_to_claimed_food() {
        let mut rng = fastrand::Rng::with_seed(21);
        let (mut room, cat) = room_with_cat(Vec2::new(2.0, 5.0), Vec2::new(2.0, 5.0));
        room.place_food(IVec2::new(10, 5)).unwrap();

        update_cat(&room, cat, &mut rng);

        let pos = room.position(cat).unwrap();
        assert!((pos.x - (2.0 + RUN_SPEED)).abs() < 1e-6);
        assert_eq!(pos.y, 5.0);
    }

    #[test]
    fn walking_cat_eventually_arrives() {
        let mut rng = fastrand::Rng::with_seed(21);
        let (room, cat) = room_with_cat(Vec2::new(2.0, 2.0), Vec2::new(3.0, 2.0));
        for _ in 0..60 {
            update_cat(&room, cat, &mut rng);
            if room.cat(cat).unwrap().wait_timer > 0 {
                break;
            }
        }
        let pos = room.position(cat).unwrap();
        assert!(pos.distance(Vec2::new(3.0, 2.0)) < ARRIVAL_RADIUS);
    }

    #[test]
    fn arriving_away_from_the_bowl_lets_the_food_target_go() {
        let mut rng = fastrand::Rng::with_seed(21);
        let (mut room, cat) = room_with_cat(Vec2::new(4.0, 4.0), Vec2::new(4.0, 4.0));
        let food = room.place_food(IVec2::new(10, 8)).unwrap();
        room.ecs().get::<&mut Cat>(cat).unwrap().target_food = Some(food);

        update_cat(&room, cat, &mut rng);

        let state = room.cat(cat).unwrap();
        assert_eq!(state.target_food, None);
        assert_eq!(state.target, Vec2::new(4.0, 4.0));
        assert_eq!(state.wait_timer, 0);
        assert!(!state.moving);
    }
}
