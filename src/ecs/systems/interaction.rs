use crate::cat::animation::AnimationCue;
use crate::config::Ruleset;
use crate::ecs::components::{Activity, Appearance, Cat, Indicators, Needs, Position};

use super::behavior::{Flow, Turn};

/// Cats closer than this bump into each other and start playing.
const PLAY_RADIUS: f32 = 0.3;
/// Too hungry to play (needs ruleset).
const PLAY_MAX_HUNGER: f32 = 70.0;
/// Too tired to play (needs ruleset).
const PLAY_MAX_TIREDNESS: f32 = 80.0;

/// Whether a cat is free to start a play session.
///
/// Busy cats (eating, sleeping, already playing, running to food) are out,
/// as are cats on cooldown or, when needs are tracked, hungry or tired ones.
pub fn can_play(cat: &Cat, needs: Option<&Needs>) -> bool {
    if !matches!(cat.activity, Activity::Idle) {
        return false;
    }
    if cat.play_cooldown > 0 || cat.target_food.is_some() {
        return false;
    }
    needs.map_or(true, |needs| {
        needs.hunger < PLAY_MAX_HUNGER && needs.tiredness < PLAY_MAX_TIREDNESS
    })
}

/// Sessions end together: whichever partner's timer runs out first also
/// ends the other's. A partner still waiting for its turn this tick is left
/// one tick on the clock so its own timer stage closes the session; one that
/// already went is stopped here.
pub fn end_partner_play(
    ecs: &hecs::World,
    cats: &[hecs::Entity],
    partner: hecs::Entity,
    cat: hecs::Entity,
    ruleset: Ruleset,
) {
    let Ok(mut state) = ecs.get::<&mut Cat>(partner) else {
        return;
    };
    if state.play_partner() != Some(cat) {
        return;
    }
    let order = |entity: hecs::Entity| cats.iter().position(|&other| other == entity);
    let still_to_go = matches!((order(partner), order(cat)), (Some(p), Some(c)) if p > c);
    if still_to_go {
        state.activity = Activity::Playing {
            partner: cat,
            remaining: 1,
        };
        return;
    }

    state.activity = Activity::Idle;
    state.play_cooldown = ruleset.play_cooldown_ticks();
    drop(state);
    if let Ok(mut indicators) = ecs.get::<&mut Indicators>(partner) {
        indicators.play = false;
    }
}

/// Bump into the first free cat within reach and start playing together.
pub fn start_play(turn: &mut Turn<'_>) -> Flow {
    if !can_play(&turn.cat, turn.needs.as_ref()) {
        return Flow::Continue;
    }
    for &other in turn.cats {
        if other == turn.entity {
            continue;
        }
        let Ok(mut query) = turn
            .ecs
            .query_one::<(&mut Cat, &Position, &mut Appearance, &mut Indicators, Option<&Needs>)>(other)
        else {
            continue;
        };
        let Some((partner, partner_pos, appearance, indicators, needs)) = query.get() else {
            continue;
        };
        if !can_play(partner, needs) || turn.pos.distance(partner_pos.0) >= PLAY_RADIUS {
            continue;
        }

        let remaining = turn.ruleset.play_ticks();
        partner.activity = Activity::Playing {
            partner: turn.entity,
            remaining,
        };
        partner.moving = false;
        appearance.cue = AnimationCue::Walk;
        indicators.sleep = false;
        indicators.play = true;

        turn.cat.activity = Activity::Playing {
            partner: other,
            remaining,
        };
        turn.cat.moving = false;
        turn.appearance.cue = AnimationCue::Walk;
        turn.indicators.sleep = false;
        turn.indicators.play = true;
        log::debug!("cats {:?} and {:?} started playing", turn.entity, other);
        return Flow::Done;
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::CatKind;
    use crate::ecs::systems::behavior::update_cat;
    use crate::room::Room;
    use glam::{IVec2, Vec2};

    fn pair(ruleset: Ruleset, gap: f32) -> (Room, hecs::Entity, hecs::Entity) {
        let mut room = Room::new(16, 12, ruleset).unwrap();
        let a = room.spawn_cat(Vec2::new(5.0, 5.0), CatKind::Tiger, "Pumpkin".into());
        let b = room.spawn_cat(Vec2::new(5.0 + gap, 5.0), CatKind::White, "Marble".into());
        (room, a, b)
    }

    #[test]
    fn bumping_cats_play_together() {
        let mut rng = fastrand::Rng::with_seed(4);
        let (room, a, b) = pair(Ruleset::Classic, 0.2);

        update_cat(&room, a, &mut rng);

        let (cat_a, cat_b) = (room.cat(a).unwrap(), room.cat(b).unwrap());
        assert_eq!(cat_a.play_partner(), Some(b));
        assert_eq!(cat_b.play_partner(), Some(a));
        assert_eq!(cat_a.play_timer(), 120);
        assert_eq!(cat_b.play_timer(), 120);
        let views = room.cat_views();
        assert!(views.iter().all(|view| view.indicators.play));
        assert!(views.iter().all(|view| view.cue == AnimationCue::Walk));
    }

    #[test]
    fn cats_just_out_of_reach_do_not_play() {
        let mut rng = fastrand::Rng::with_seed(4);
        let (room, a, b) = pair(Ruleset::Classic, 0.3);
        update_cat(&room, a, &mut rng);
        assert!(!room.cat(a).unwrap().is_playing());
        assert!(!room.cat(b).unwrap().is_playing());
    }

    #[test]
    fn sleeping_and_eating_cats_are_left_alone() {
        let mut rng = fastrand::Rng::with_seed(4);
        let (mut room, a, b) = pair(Ruleset::Classic, 0.1);
        let bed = room.spawn_bed(IVec2::new(9, 9));
        room.ecs().get::<&mut Cat>(b).unwrap().activity = Activity::Sleeping { bed, remaining: 50 };
        update_cat(&room, a, &mut rng);
        assert!(!room.cat(a).unwrap().is_playing());

        room.ecs().get::<&mut Cat>(b).unwrap().activity = Activity::Eating { remaining: 50 };
        update_cat(&room, a, &mut rng);
        assert!(!room.cat(a).unwrap().is_playing());
        assert!(room.cat(b).unwrap().is_eating());
    }

    #[test]
    fn cooldown_blocks_play() {
        let mut rng = fastrand::Rng::with_seed(4);
        let (room, a, b) = pair(Ruleset::Needs, 0.1);
        room.ecs().get::<&mut Cat>(b).unwrap().play_cooldown = 10;
        update_cat(&room, a, &mut rng);
        assert!(!room.cat(a).unwrap().is_playing());
    }

    #[test]
    fn hungry_or_tired_cats_do_not_play() {
        for needs in [
            Needs { hunger: 70.0, tiredness: 0.0 },
            Needs { hunger: 0.0, tiredness: 80.0 },
        ] {
            let mut rng = fastrand::Rng::with_seed(4);
            let (room, a, b) = pair(Ruleset::Needs, 0.1);
            *room.ecs().get::<&mut Needs>(b).unwrap() = needs;
            update_cat(&room, a, &mut rng);
            assert!(!room.cat(a).unwrap().is_playing());
        }
    }

    #[test]
    fn first_eligible_cat_in_list_order_is_the_partner() {
        let mut rng = fastrand::Rng::with_seed(4);
        let mut room = Room::new(16, 12, Ruleset::Needs).unwrap();
        let a = room.spawn_cat(Vec2::new(5.0, 5.0), CatKind::Tiger, "A".into());
        let far = room.spawn_cat(Vec2::new(5.25, 5.0), CatKind::Black, "B".into());
        let near = room.spawn_cat(Vec2::new(5.05, 5.0), CatKind::Brown, "C".into());

        update_cat(&room, a, &mut rng);

        assert_eq!(room.cat(a).unwrap().play_partner(), Some(far));
        assert_eq!(room.cat(far).unwrap().play_timer(), 300);
        assert!(!room.cat(near).unwrap().is_playing());
    }

    #[test]
    fn partners_stop_playing_in_the_same_tick() {
        let mut rng = fastrand::Rng::with_seed(4);
        let (mut room, a, b) = pair(Ruleset::Needs, 0.1);
        crate::ecs::systems::tick(&mut room, &mut rng);
        assert!(room.cat(a).unwrap().is_playing());

        let mut ticks = 1;
        while room.cat(a).unwrap().is_playing() || room.cat(b).unwrap().is_playing() {
            crate::ecs::systems::tick(&mut room, &mut rng);
            let (cat_a, cat_b) = (room.cat(a).unwrap(), room.cat(b).unwrap());
            assert_eq!(cat_a.is_playing(), cat_b.is_playing());
            ticks += 1;
        }
        assert_eq!(ticks, 300);
        assert_eq!(room.cat(a).unwrap().play_cooldown, 300);
        assert_eq!(room.cat(b).unwrap().play_cooldown, 300);
    }

    #[test]
    fn session_ends_for_a_partner_later_in_order_without_moving_it() {
        let mut rng = fastrand::Rng::with_seed(4);
        let (room, first, second) = pair(Ruleset::Needs, 0.1);
        {
            let mut state = room.ecs().get::<&mut Cat>(first).unwrap();
            state.activity = Activity::Playing { partner: second, remaining: 1 };
        }
        {
            let mut state = room.ecs().get::<&mut Cat>(second).unwrap();
            state.activity = Activity::Playing { partner: first, remaining: 5 };
            state.target = Vec2::new(10.0, 5.0);
        }

        let start = room.position(second);
        update_cat(&room, first, &mut rng);
        assert_eq!(room.cat(second).unwrap().play_timer(), 1);

        update_cat(&room, second, &mut rng);
        let (cat_a, cat_b) = (room.cat(first).unwrap(), room.cat(second).unwrap());
        assert!(!cat_a.is_playing());
        assert!(!cat_b.is_playing());
        assert_eq!(cat_a.play_cooldown, 300);
        assert_eq!(cat_b.play_cooldown, 300);
        assert_eq!(room.position(second), start);
    }

    #[test]
    fn sessions_running_out_together_end_in_place() {
        let mut rng = fastrand::Rng::with_seed(4);
        let (mut room, first, second) = pair(Ruleset::Needs, 0.1);
        for (cat, partner) in [(first, second), (second, first)] {
            let mut state = room.ecs().get::<&mut Cat>(cat).unwrap();
            state.activity = Activity::Playing { partner, remaining: 1 };
            state.target = Vec2::new(10.0, 5.0);
        }

        let start = [room.position(first), room.position(second)];
        crate::ecs::systems::tick(&mut room, &mut rng);

        for cat in [first, second] {
            let state = room.cat(cat).unwrap();
            assert!(!state.is_playing());
            assert_eq!(state.play_cooldown, 300);
        }
        assert_eq!([room.position(first), room.position(second)], start);
    }
}
