use glam::{IVec2, Vec2};

use crate::cat::animation::AnimationCue;

/// Food closer than this to a cat gets eaten.
pub const FOOD_REACH: f32 = 0.5;
/// Beds have a wider catch radius than food: a cat only has to wander near one.
pub const BED_REACH: f32 = 1.0;
/// Upper bound for hunger and tiredness.
pub const NEED_MAX: f32 = 100.0;

/// Current position in grid units. Continuous while a cat is moving.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// A bowl of food sitting on a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub cell: IVec2,
    pub eaten: bool,
    /// Placed by the user. Only fresh food lures cats from across the room.
    pub fresh: bool,
    /// A cat has committed to walking over and eating it.
    pub claimed: bool,
}

impl Food {
    pub fn new(cell: IVec2, fresh: bool) -> Self {
        Self {
            cell,
            eaten: false,
            fresh,
            claimed: false,
        }
    }

    pub fn check_proximity(&self, pos: Vec2) -> bool {
        !self.eaten && self.cell.as_vec2().distance(pos) < FOOD_REACH
    }

    /// Idempotent. The driver drops eaten food from the registry.
    pub fn consume(&mut self) {
        if !self.eaten {
            self.eaten = true;
            self.claimed = false;
        }
    }

    /// Fresh, uneaten and nobody is on the way.
    pub fn is_claimable(&self) -> bool {
        self.fresh && !self.claimed && !self.eaten
    }
}

/// A bed on a grid cell. Knows whether it is taken, not by whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bed {
    pub cell: IVec2,
    pub occupied: bool,
}

impl Bed {
    pub fn new(cell: IVec2) -> Self {
        Self {
            cell,
            occupied: false,
        }
    }

    pub fn check_proximity(&self, pos: Vec2) -> bool {
        self.cell.as_vec2().distance(pos) < BED_REACH
    }
}

/// What a cat is busy with. Timed activities carry their remaining ticks and
/// the handle of the resource or partner involved, so a cat can never be in
/// two of them at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Wandering, waiting, or walking to a target.
    Idle,
    Eating { remaining: u32 },
    Sleeping { bed: hecs::Entity, remaining: u32 },
    Playing { partner: hecs::Entity, remaining: u32 },
}

/// Behavior state of a cat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cat {
    pub activity: Activity,
    /// Where the cat is walking to.
    pub target: Vec2,
    /// Set while running to claimed fresh food.
    pub target_food: Option<hecs::Entity>,
    /// Pause after reaching a wander target (ticks).
    pub wait_timer: u32,
    /// Ticks until the cat may play again.
    pub play_cooldown: u32,
    pub moving: bool,
}

impl Cat {
    /// A cat standing still at `pos`.
    pub fn new(pos: Vec2) -> Self {
        Self {
            activity: Activity::Idle,
            target: pos,
            target_food: None,
            wait_timer: 0,
            play_cooldown: 0,
            moving: false,
        }
    }

    pub fn is_eating(&self) -> bool {
        matches!(self.activity, Activity::Eating { .. })
    }

    pub fn is_sleeping(&self) -> bool {
        matches!(self.activity, Activity::Sleeping { .. })
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.activity, Activity::Playing { .. })
    }

    pub fn eating_timer(&self) -> u32 {
        match self.activity {
            Activity::Eating { remaining } => remaining,
            _ => 0,
        }
    }

    pub fn sleep_timer(&self) -> u32 {
        match self.activity {
            Activity::Sleeping { remaining, .. } => remaining,
            _ => 0,
        }
    }

    pub fn play_timer(&self) -> u32 {
        match self.activity {
            Activity::Playing { remaining, .. } => remaining,
            _ => 0,
        }
    }

    pub fn current_bed(&self) -> Option<hecs::Entity> {
        match self.activity {
            Activity::Sleeping { bed, .. } => Some(bed),
            _ => None,
        }
    }

    pub fn play_partner(&self) -> Option<hecs::Entity> {
        match self.activity {
            Activity::Playing { partner, .. } => Some(partner),
            _ => None,
        }
    }
}

/// Slow-moving needs, only tracked under the needs ruleset. Both in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Needs {
    pub hunger: f32,
    pub tiredness: f32,
}

/// Sprite set a cat is drawn with. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatKind {
    Batman,
    Black,
    Brown,
    Classical,
    Demonic,
    Egypt,
    Siamese,
    ThreeColor,
    Tiger,
    White,
    Xmas,
}

impl CatKind {
    pub const ALL: [CatKind; 11] = [
        Self::Batman,
        Self::Black,
        Self::Brown,
        Self::Classical,
        Self::Demonic,
        Self::Egypt,
        Self::Siamese,
        Self::ThreeColor,
        Self::Tiger,
        Self::White,
        Self::Xmas,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Batman => "batman",
            Self::Black => "black",
            Self::Brown => "brown",
            Self::Classical => "classical",
            Self::Demonic => "demonic",
            Self::Egypt => "egypt",
            Self::Siamese => "siamese",
            Self::ThreeColor => "three-color",
            Self::Tiger => "tiger",
            Self::White => "white",
            Self::Xmas => "xmas",
        }
    }
}

/// How the renderer should draw the cat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub kind: CatKind,
    /// Mirrored horizontally (last moved left).
    pub flipped: bool,
    pub cue: AnimationCue,
}

impl Appearance {
    pub fn new(kind: CatKind) -> Self {
        Self {
            kind,
            flipped: false,
            cue: AnimationCue::Idle,
        }
    }
}

/// Overhead markers: "Zzzz" while asleep, "!" while playing, and the stats
/// panel when the user has pinned this cat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indicators {
    pub sleep: bool,
    pub play: bool,
    pub stats_pinned: bool,
}

impl Indicators {
    /// Bring the markers in line with the cat's flags.
    pub fn reconcile(&mut self, cat: &Cat) {
        self.sleep = cat.is_sleeping() && !cat.moving;
        self.play = cat.is_playing();
    }

    /// Stats show while pinned and for the length of a play session.
    pub fn show_stats(&self) -> bool {
        self.stats_pinned || self.play
    }
}

/// Cat name for logs and tooltips.
#[derive(Debug, Clone)]
pub struct CatName(pub String);
