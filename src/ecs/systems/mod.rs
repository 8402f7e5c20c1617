pub mod behavior;
pub mod feeding;
pub mod interaction;
pub mod movement;
pub mod resting;

use crate::room::Room;

/// Run one fixed simulation tick.
///
/// Cats update strictly one after another in registry order, so every
/// contested claim resolves the same way for the same room and seed.
pub fn tick(room: &mut Room, rng: &mut fastrand::Rng) {
    // 1. Clear away bowls emptied last tick
    let cleared = room.collect_eaten_food();
    if cleared > 0 {
        log::trace!("cleared {} empty bowls", cleared);
    }

    // 2. Behavior cascade, one cat at a time
    let room: &Room = room;
    for &cat in room.cats() {
        behavior::update_cat(room, cat, rng);
    }
}
