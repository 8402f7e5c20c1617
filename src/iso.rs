//! Isometric projection between room grid coordinates and display space.
//! Only renderers and the placement layer use this; the behavior core works
//! purely in grid units.

use glam::{IVec2, Vec2};

/// Tile footprint in display pixels.
pub const TILE_WIDTH: f32 = 64.0;
pub const TILE_HEIGHT: f32 = 32.0;

/// Depth base for floor items (food, beds).
pub const ITEM_DEPTH: f32 = 50.0;
/// Depth base for cats, so they always draw above floor items on the same tile.
pub const CAT_DEPTH: f32 = 100.0;

const HALF_W: f32 = TILE_WIDTH / 2.0;
const HALF_H: f32 = TILE_HEIGHT / 2.0;

/// Grid coordinates to display coordinates.
pub fn to_screen(grid: Vec2) -> Vec2 {
    Vec2::new((grid.x - grid.y) * HALF_W, (grid.x + grid.y) * HALF_H)
}

/// Display coordinates to the grid cell containing them.
pub fn to_grid(screen: Vec2) -> IVec2 {
    let gx = (screen.x / HALF_W + screen.y / HALF_H) / 2.0;
    let gy = (screen.y / HALF_H - screen.x / HALF_W) / 2.0;
    IVec2::new(gx.floor() as i32, gy.floor() as i32)
}

/// Painter's-order key: larger draws later.
pub fn depth(base: f32, grid: Vec2) -> f32 {
    base + grid.x + grid.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_origin() {
        assert_eq!(to_screen(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(to_grid(Vec2::ZERO), IVec2::ZERO);
    }

    #[test]
    fn axes_project_diagonally() {
        assert_eq!(to_screen(Vec2::new(1.0, 0.0)), Vec2::new(32.0, 16.0));
        assert_eq!(to_screen(Vec2::new(0.0, 1.0)), Vec2::new(-32.0, 16.0));
    }

    #[test]
    fn cell_centres_survive_the_round_trip() {
        for (x, y) in [(3, 4), (1, 1), (14, 10), (7, 2)] {
            let centre = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            assert_eq!(to_grid(to_screen(centre)), IVec2::new(x, y));
        }
    }

    #[test]
    fn points_left_of_origin_floor_to_negative_cells() {
        assert_eq!(to_grid(Vec2::new(-40.0, 0.0)), IVec2::new(-1, 0));
    }

    #[test]
    fn cats_sort_above_items_on_the_same_tile() {
        let tile = Vec2::new(4.0, 4.0);
        assert!(depth(CAT_DEPTH, tile) > depth(ITEM_DEPTH, tile));
        assert!(depth(ITEM_DEPTH, Vec2::new(5.0, 5.0)) > depth(ITEM_DEPTH, tile));
    }
}
