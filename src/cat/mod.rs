pub mod animation;

use glam::Vec2;

use crate::ecs::components::{Cat, CatKind, Needs};
use crate::ecs::systems::movement;
use crate::room::Room;

/// Spawn a batch of cats at random interior cells with random looks and an
/// initial wander target.
pub fn spawn_cats(room: &mut Room, count: usize, rng: &mut fastrand::Rng) {
    let (width, height) = (room.width(), room.height());

    for _ in 0..count {
        // Keep two tiles clear of the walls when the room allows it.
        let pos = Vec2::new(spawn_coord(width, rng), spawn_coord(height, rng));
        let kind = CatKind::ALL[rng.usize(0..CatKind::ALL.len())];
        let cat = room.spawn_cat(pos, kind, name_for(kind, rng));

        if let Ok(mut state) = room.ecs().get::<&mut Cat>(cat) {
            state.target = movement::wander_target(width, height, rng);
        }
        if let Ok(mut needs) = room.ecs().get::<&mut Needs>(cat) {
            *needs = random_needs(rng);
        }
    }
}

fn spawn_coord(side: u32, rng: &mut fastrand::Rng) -> f32 {
    if side > 4 {
        (2 + rng.u32(0..side - 4)) as f32
    } else {
        1.0
    }
}

/// Cats start a little peckish and somewhere between rested and drowsy.
fn random_needs(rng: &mut fastrand::Rng) -> Needs {
    Needs {
        hunger: rng.f32() * 30.0,
        tiredness: 20.0 + rng.f32() * 40.0,
    }
}

/// Names that suit a particular coat.
fn coat_names(kind: CatKind) -> &'static [&'static str] {
    match kind {
        CatKind::Batman => &["Bruce", "Robin", "Gotham"],
        CatKind::Black => &["Salem", "Onyx", "Licorice", "Shadow"],
        CatKind::Brown => &["Cocoa", "Hazel", "Toffee"],
        CatKind::Classical => &["Whiskers", "Mittens", "Felix"],
        CatKind::Demonic => &["Beelzebub", "Ember", "Havoc"],
        CatKind::Egypt => &["Cleo", "Ramses", "Bastet"],
        CatKind::Siamese => &["Chai", "Latte", "Suki"],
        CatKind::ThreeColor => &["Patches", "Calico", "Confetti"],
        CatKind::Tiger => &["Stripes", "Rajah", "Pumpkin"],
        CatKind::White => &["Snow", "Marble", "Cotton"],
        CatKind::Xmas => &["Jingle", "Holly", "Tinsel"],
    }
}

/// Names any cat can get.
const COMMON_NAMES: &[&str] = &[
    "Luna", "Mochi", "Noodle", "Biscuit", "Pepper", "Tofu", "Beans", "Nugget", "Waffles", "Ziggy",
];

/// Pick a name, usually one that suits the coat, sometimes with a title.
fn name_for(kind: CatKind, rng: &mut fastrand::Rng) -> String {
    const TITLES: &[&str] = &["Sir", "Lady", "Captain", "Little", "Princess"];

    let pool = if rng.u8(0..3) == 0 {
        COMMON_NAMES
    } else {
        coat_names(kind)
    };
    let name = pool[rng.usize(0..pool.len())];
    if rng.u8(0..5) == 0 {
        format!("{} {}", TITLES[rng.usize(0..TITLES.len())], name)
    } else {
        name.to_string()
    }
}
