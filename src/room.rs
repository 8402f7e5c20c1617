use glam::{IVec2, Vec2};

use crate::cat::{self, animation::AnimationCue, animation::Pose};
use crate::config::{Ruleset, SimConfig, MIN_ROOM_SIDE};
use crate::ecs::components::{
    Appearance, Bed, Cat, CatKind, CatName, Food, Indicators, Needs, Position,
};
use crate::ecs::systems::resting;
use crate::error::{ConfigError, PlacementError};
use crate::iso;

/// Setup furniture keeps this far from other furniture (tiles).
const SETUP_SPACING: f32 = 2.0;
/// Attempts at finding a spaced cell before giving up on an item.
const SETUP_ATTEMPTS: usize = 50;
/// Setup furniture stays this many tiles away from the walls.
const SETUP_MARGIN: u32 = 3;

/// Something the user can drag into the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Food,
    Bed,
}

/// Everything a renderer needs to draw one cat.
#[derive(Debug, Clone)]
pub struct CatView {
    pub entity: hecs::Entity,
    pub name: String,
    pub kind: CatKind,
    pub position: Vec2,
    pub screen: Vec2,
    pub depth: f32,
    pub pose: Pose,
    pub flipped: bool,
    pub cue: AnimationCue,
    pub indicators: Indicators,
    pub needs: Option<Needs>,
}

/// The playroom: entity storage plus the ordered registries the cats scan.
///
/// Registry order matters. Contested food, beds and play partners go to
/// whoever comes first, so lists are append-only except for removals.
pub struct Room {
    ecs: hecs::World,
    cats: Vec<hecs::Entity>,
    food: Vec<hecs::Entity>,
    beds: Vec<hecs::Entity>,
    width: u32,
    height: u32,
    ruleset: Ruleset,
    pinned: Option<hecs::Entity>,
}

impl Room {
    /// An empty room. Walls take the outer ring of tiles.
    pub fn new(width: u32, height: u32, ruleset: Ruleset) -> Result<Self, ConfigError> {
        if width < MIN_ROOM_SIDE || height < MIN_ROOM_SIDE {
            return Err(ConfigError::RoomTooSmall {
                width,
                height,
                min: MIN_ROOM_SIDE,
            });
        }
        Ok(Self {
            ecs: hecs::World::new(),
            cats: Vec::new(),
            food: Vec::new(),
            beds: Vec::new(),
            width,
            height,
            ruleset,
            pinned: None,
        })
    }

    /// The starting scenario: spaced beds and leftover food, then the cats.
    pub fn furnished(config: &SimConfig, rng: &mut fastrand::Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut room = Self::new(config.width, config.height, config.ruleset)?;
        let mut taken: Vec<IVec2> = Vec::new();

        for _ in 0..config.beds {
            match room.spaced_cell(&taken, rng) {
                Some(cell) => {
                    room.spawn_bed(cell);
                    taken.push(cell);
                }
                None => log::warn!("No room left for another bed"),
            }
        }
        for _ in 0..config.stale_food {
            match room.spaced_cell(&taken, rng) {
                Some(cell) => {
                    room.spawn_food(cell, false);
                    taken.push(cell);
                }
                None => log::warn!("No room left for more food"),
            }
        }

        cat::spawn_cats(&mut room, config.cats, rng);
        log::info!(
            "Furnished {}x{} room: {} cats, {} beds, {} food ({} rules)",
            room.width,
            room.height,
            room.cats.len(),
            room.beds.len(),
            room.food.len(),
            room.ruleset.label(),
        );
        Ok(room)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    /// Entity storage. Components are behind runtime borrow checks, so
    /// `get::<&mut T>` works through a shared reference.
    pub fn ecs(&self) -> &hecs::World {
        &self.ecs
    }

    pub fn cats(&self) -> &[hecs::Entity] {
        &self.cats
    }

    pub fn food(&self) -> &[hecs::Entity] {
        &self.food
    }

    pub fn beds(&self) -> &[hecs::Entity] {
        &self.beds
    }

    pub fn cat(&self, entity: hecs::Entity) -> Option<Cat> {
        self.ecs.get::<&Cat>(entity).ok().map(|cat| *cat)
    }

    pub fn food_item(&self, entity: hecs::Entity) -> Option<Food> {
        self.ecs.get::<&Food>(entity).ok().map(|food| *food)
    }

    pub fn bed(&self, entity: hecs::Entity) -> Option<Bed> {
        self.ecs.get::<&Bed>(entity).ok().map(|bed| *bed)
    }

    pub fn position(&self, entity: hecs::Entity) -> Option<Vec2> {
        self.ecs.get::<&Position>(entity).ok().map(|pos| pos.0)
    }

    pub fn needs(&self, entity: hecs::Entity) -> Option<Needs> {
        self.ecs.get::<&Needs>(entity).ok().map(|needs| *needs)
    }

    /// Add a cat standing still at `pos`. Needs start at zero.
    pub fn spawn_cat(&mut self, pos: Vec2, kind: CatKind, name: String) -> hecs::Entity {
        let entity = self.ecs.spawn((
            Position(pos),
            Cat::new(pos),
            Appearance::new(kind),
            Indicators::default(),
            CatName(name),
        ));
        if self.ruleset.tracks_needs() {
            let _ = self.ecs.insert_one(entity, Needs::default());
        }
        self.cats.push(entity);
        entity
    }

    /// Put food down without placement checks.
    pub fn spawn_food(&mut self, cell: IVec2, fresh: bool) -> hecs::Entity {
        let entity = self.ecs.spawn((Food::new(cell, fresh),));
        self.food.push(entity);
        entity
    }

    /// Put a bed down without placement checks.
    pub fn spawn_bed(&mut self, cell: IVec2) -> hecs::Entity {
        let entity = self.ecs.spawn((Bed::new(cell),));
        self.beds.push(entity);
        entity
    }

    /// Whether the user may drop something on `cell` (interior, walls excluded).
    pub fn is_placeable(&self, cell: IVec2) -> bool {
        cell.x >= 1
            && cell.y >= 1
            && cell.x <= self.width as i32 - 2
            && cell.y <= self.height as i32 - 2
    }

    fn check_placeable(&self, cell: IVec2) -> Result<(), PlacementError> {
        if self.is_placeable(cell) {
            Ok(())
        } else {
            Err(PlacementError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// User drops fresh food. Any free cat will come running.
    pub fn place_food(&mut self, cell: IVec2) -> Result<hecs::Entity, PlacementError> {
        self.check_placeable(cell)?;
        let entity = self.spawn_food(cell, true);
        log::debug!("Fresh food placed at ({}, {})", cell.x, cell.y);
        Ok(entity)
    }

    pub fn place_bed(&mut self, cell: IVec2) -> Result<hecs::Entity, PlacementError> {
        self.check_placeable(cell)?;
        let entity = self.spawn_bed(cell);
        log::debug!("Bed placed at ({}, {})", cell.x, cell.y);
        Ok(entity)
    }

    /// Drop an item at a display-space point.
    pub fn drop_item(&mut self, item: Item, screen: Vec2) -> Result<hecs::Entity, PlacementError> {
        let cell = iso::to_grid(screen);
        match item {
            Item::Food => self.place_food(cell),
            Item::Bed => self.place_bed(cell),
        }
    }

    /// Pick a bed up and put it down elsewhere. Whoever slept in it wakes up,
    /// and the bed goes to the back of the scan order.
    pub fn move_bed(&mut self, bed: hecs::Entity, cell: IVec2) -> Result<(), PlacementError> {
        let index = self.bed_index(bed)?;
        self.check_placeable(cell)?;
        self.wake_sleepers_in(bed);

        if let Ok(mut state) = self.ecs.get::<&mut Bed>(bed) {
            state.cell = cell;
            state.occupied = false;
        }
        let entity = self.beds.remove(index);
        self.beds.push(entity);
        log::debug!("Bed moved to ({}, {})", cell.x, cell.y);
        Ok(())
    }

    pub fn remove_bed(&mut self, bed: hecs::Entity) -> Result<(), PlacementError> {
        let index = self.bed_index(bed)?;
        self.wake_sleepers_in(bed);
        self.beds.remove(index);
        if self.ecs.despawn(bed).is_err() {
            log::warn!("Bed {:?} was registered but already despawned", bed);
        }
        log::debug!("Bed {:?} removed", bed);
        Ok(())
    }

    fn bed_index(&self, bed: hecs::Entity) -> Result<usize, PlacementError> {
        self.beds
            .iter()
            .position(|&entity| entity == bed)
            .ok_or(PlacementError::UnknownBed(bed))
    }

    fn wake_sleepers_in(&self, bed: hecs::Entity) {
        for &entity in &self.cats {
            if let Ok(mut cat) = self.ecs.get::<&mut Cat>(entity) {
                if cat.current_bed() == Some(bed) {
                    resting::wake_up(&mut cat, &self.ecs);
                    log::debug!("Cat {:?} woken: bed was moved", entity);
                }
            }
        }
    }

    /// Drop eaten food from the registry. Returns how many went.
    pub fn collect_eaten_food(&mut self) -> usize {
        let ecs = &self.ecs;
        let mut eaten = Vec::new();
        self.food.retain(|&entity| {
            let keep = ecs.get::<&Food>(entity).map_or(false, |food| !food.eaten);
            if !keep {
                eaten.push(entity);
            }
            keep
        });
        for &entity in &eaten {
            if self.ecs.despawn(entity).is_err() {
                log::warn!("Food {:?} was registered but already despawned", entity);
            }
        }
        eaten.len()
    }

    /// Click a cat to pin its stats; click it again to unpin. Only one cat is
    /// pinned at a time. Returns whether `cat` ends up pinned.
    pub fn toggle_stats(&mut self, cat: hecs::Entity) -> bool {
        if let Some(previous) = self.pinned.take() {
            self.set_pinned(previous, false);
            if previous == cat {
                return false;
            }
        }
        if self.set_pinned(cat, true) {
            self.pinned = Some(cat);
            true
        } else {
            false
        }
    }

    /// Click on empty floor.
    pub fn clear_stats(&mut self) {
        if let Some(previous) = self.pinned.take() {
            self.set_pinned(previous, false);
        }
    }

    fn set_pinned(&self, cat: hecs::Entity, pinned: bool) -> bool {
        match self.ecs.get::<&mut Indicators>(cat) {
            Ok(mut indicators) => {
                indicators.stats_pinned = pinned;
                true
            }
            Err(_) => false,
        }
    }

    /// Render snapshot of every cat, in registry order.
    pub fn cat_views(&self) -> Vec<CatView> {
        let mut views = Vec::with_capacity(self.cats.len());
        for &entity in &self.cats {
            let Ok(mut query) = self
                .ecs
                .query_one::<(&Position, &Cat, &Appearance, &Indicators, &CatName, Option<&Needs>)>(
                    entity,
                )
            else {
                continue;
            };
            let Some((pos, cat, appearance, indicators, name, needs)) = query.get() else {
                continue;
            };
            views.push(CatView {
                entity,
                name: name.0.clone(),
                kind: appearance.kind,
                position: pos.0,
                screen: iso::to_screen(pos.0),
                depth: iso::depth(iso::CAT_DEPTH, pos.0),
                pose: Pose::of(cat),
                flipped: appearance.flipped,
                cue: appearance.cue,
                indicators: *indicators,
                needs: needs.copied(),
            });
        }
        views
    }

    /// Uniformly random placeable cell.
    pub fn random_interior_cell(&self, rng: &mut fastrand::Rng) -> IVec2 {
        IVec2::new(
            1 + rng.i32(0..self.width as i32 - 2),
            1 + rng.i32(0..self.height as i32 - 2),
        )
    }

    /// Random cell away from the walls and at least `SETUP_SPACING` from
    /// everything in `taken`.
    fn spaced_cell(&self, taken: &[IVec2], rng: &mut fastrand::Rng) -> Option<IVec2> {
        let margin = if self.width > 2 * SETUP_MARGIN && self.height > 2 * SETUP_MARGIN {
            SETUP_MARGIN
        } else {
            1
        };
        for _ in 0..SETUP_ATTEMPTS {
            let cell = IVec2::new(
                (margin + rng.u32(0..self.width - 2 * margin)) as i32,
                (margin + rng.u32(0..self.height - 2 * margin)) as i32,
            );
            let clear = taken
                .iter()
                .all(|other| other.as_vec2().distance(cell.as_vec2()) >= SETUP_SPACING);
            if clear {
                return Some(cell);
            }
        }
        None
    }
}
