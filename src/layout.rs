//! Maze-to-geometry conversion
//!
//! Turns a tile grid into axis-aligned wall colliders. Maze rows count down
//! from the top of the scene while world y points up, so vertical positions
//! are flipped through the scene height.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MARBLE_CLEARANCE, WALL_THICKNESS_DIVISOR};
use crate::maze::{Maze, Tile};

/// An axis-aligned wall collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallRect {
    /// Center position
    pub center: Vec2,
    /// Half extents
    pub half: Vec2,
}

impl WallRect {
    /// Build from top-left and bottom-right corners (world coords, y up)
    pub fn from_corners(top_left: Vec2, bottom_right: Vec2) -> Self {
        let size = Vec2::new(bottom_right.x - top_left.x, top_left.y - bottom_right.y);
        let center = Vec2::new(
            top_left.x + size.x / 2.0,
            bottom_right.y + size.y / 2.0,
        );
        Self {
            center,
            half: size / 2.0,
        }
    }

    /// Lower-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    /// Upper-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Closest point on the rect to `p` (`p` itself when inside)
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    /// Check if a point is inside the rect (edges inclusive)
    pub fn contains_point(&self, p: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }
}

/// Scene-dependent tile measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneMetrics {
    /// Scene size in world units
    pub scene: Vec2,
    pub tile_w: f32,
    pub tile_h: f32,
    pub wall_thickness: f32,
}

impl SceneMetrics {
    /// Derive tile measurements by scaling the maze grid into the scene
    pub fn for_maze(scene: Vec2, maze: &Maze) -> Self {
        let tile_w = scene.x / maze.width as f32;
        let tile_h = scene.y / maze.height as f32;
        let wall_thickness = tile_w.min(tile_h) / WALL_THICKNESS_DIVISOR;
        Self {
            scene,
            tile_w,
            tile_h,
            wall_thickness,
        }
    }

    /// World rect covering a whole tile
    pub fn tile_rect(&self, x: u32, y: u32) -> WallRect {
        let tx = self.tile_w * x as f32;
        let ty = self.tile_h * y as f32;
        WallRect::from_corners(
            Vec2::new(tx, self.scene.y - ty),
            Vec2::new(tx + self.tile_w, self.scene.y - (ty + self.tile_h)),
        )
    }
}

/// Emit wall colliders for one tile's set flags (up to four)
pub fn tile_walls(m: &SceneMetrics, tile: &Tile) -> Vec<WallRect> {
    let mut walls = Vec::new();
    let tx = m.tile_w * tile.x as f32;
    let ty = m.tile_h * tile.y as f32;
    let (w, h, t) = (m.tile_w, m.tile_h, m.wall_thickness);
    // Tile y counts down from the top; world y is up
    let flip = |y: f32| m.scene.y - y;

    if tile.walls.bottom {
        walls.push(WallRect::from_corners(
            Vec2::new(tx, flip(ty + h - t)),
            Vec2::new(tx + w, flip(ty + h)),
        ));
    }
    if tile.walls.left {
        walls.push(WallRect::from_corners(
            Vec2::new(tx, flip(ty)),
            Vec2::new(tx + t, flip(ty + h)),
        ));
    }
    if tile.walls.top {
        walls.push(WallRect::from_corners(
            Vec2::new(tx, flip(ty)),
            Vec2::new(tx + w, flip(ty + t)),
        ));
    }
    if tile.walls.right {
        walls.push(WallRect::from_corners(
            Vec2::new(tx + w - t, flip(ty)),
            Vec2::new(tx + w, flip(ty + h)),
        ));
    }

    walls
}

/// Convert the whole maze into wall colliders
pub fn build_walls(m: &SceneMetrics, maze: &Maze) -> Vec<WallRect> {
    let mut walls = Vec::new();
    for tile in &maze.tiles {
        walls.extend(tile_walls(m, tile));
    }
    walls
}

/// Four containment walls along the scene edges
pub fn border_walls(scene: Vec2, thickness: f32) -> [WallRect; 4] {
    [
        // Bottom
        WallRect::from_corners(Vec2::new(0.0, thickness), Vec2::new(scene.x, 0.0)),
        // Top
        WallRect::from_corners(
            Vec2::new(0.0, scene.y),
            Vec2::new(scene.x, scene.y - thickness),
        ),
        // Left
        WallRect::from_corners(
            Vec2::new(0.0, scene.y - thickness),
            Vec2::new(thickness, thickness),
        ),
        // Right
        WallRect::from_corners(
            Vec2::new(scene.x - thickness, scene.y - thickness),
            Vec2::new(scene.x, thickness),
        ),
    ]
}

/// Marble spawn center and radius for this scene
///
/// The marble starts in the top-left corner, sized to fit a tile opening
/// with a little clearance.
pub fn marble_spawn(m: &SceneMetrics) -> (Vec2, f32) {
    let pos = Vec2::new(m.wall_thickness, m.scene.y - m.wall_thickness);
    let diameter =
        m.tile_w.min(m.tile_h) - m.wall_thickness * 2.0 - MARBLE_CLEARANCE;
    // Degenerate scenes (tiles thinner than their walls) still get a marble
    (pos, diameter.max(1.0) / 2.0)
}

/// World rect of the maze's goal cell
pub fn goal_rect(m: &SceneMetrics, maze: &Maze) -> Option<WallRect> {
    maze.goal.map(|(x, y)| m.tile_rect(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::TileWalls;
    use proptest::prelude::*;

    fn square_maze(width: u32, height: u32) -> Maze {
        Maze {
            name: "test".into(),
            width,
            height,
            goal: None,
            tiles: Vec::new(),
        }
    }

    fn metrics_100() -> SceneMetrics {
        // 100x100 scene over a 10x10 grid: 10x10 tiles, walls 2 thick
        SceneMetrics::for_maze(Vec2::splat(100.0), &square_maze(10, 10))
    }

    fn tile(x: u32, y: u32, walls: TileWalls) -> Tile {
        Tile { x, y, walls }
    }

    #[test]
    fn test_metrics_for_maze() {
        let m = metrics_100();
        assert_eq!(m.tile_w, 10.0);
        assert_eq!(m.tile_h, 10.0);
        assert_eq!(m.wall_thickness, 2.0);
    }

    #[test]
    fn test_wall_rect_from_corners() {
        let rect = WallRect::from_corners(Vec2::new(20.0, 62.0), Vec2::new(30.0, 60.0));
        assert_eq!(rect.center, Vec2::new(25.0, 61.0));
        assert_eq!(rect.half, Vec2::new(5.0, 1.0));
        assert_eq!(rect.min(), Vec2::new(20.0, 60.0));
        assert_eq!(rect.max(), Vec2::new(30.0, 62.0));
    }

    #[test]
    fn test_bottom_wall_coordinates() {
        let m = metrics_100();
        let walls = tile_walls(
            &m,
            &tile(2, 3, TileWalls { bottom: true, ..Default::default() }),
        );
        assert_eq!(walls.len(), 1);
        // Tile (2,3) spans screen y 30..40, so its bottom wall sits at
        // world y 60..62, full tile width
        assert_eq!(walls[0].min(), Vec2::new(20.0, 60.0));
        assert_eq!(walls[0].max(), Vec2::new(30.0, 62.0));
    }

    #[test]
    fn test_left_wall_coordinates() {
        let m = metrics_100();
        let walls = tile_walls(
            &m,
            &tile(2, 3, TileWalls { left: true, ..Default::default() }),
        );
        assert_eq!(walls[0].min(), Vec2::new(20.0, 60.0));
        assert_eq!(walls[0].max(), Vec2::new(22.0, 70.0));
    }

    #[test]
    fn test_top_wall_coordinates() {
        let m = metrics_100();
        let walls = tile_walls(
            &m,
            &tile(2, 3, TileWalls { top: true, ..Default::default() }),
        );
        assert_eq!(walls[0].min(), Vec2::new(20.0, 68.0));
        assert_eq!(walls[0].max(), Vec2::new(30.0, 70.0));
    }

    #[test]
    fn test_right_wall_coordinates() {
        let m = metrics_100();
        let walls = tile_walls(
            &m,
            &tile(2, 3, TileWalls { right: true, ..Default::default() }),
        );
        assert_eq!(walls[0].min(), Vec2::new(28.0, 60.0));
        assert_eq!(walls[0].max(), Vec2::new(30.0, 70.0));
    }

    #[test]
    fn test_closed_tile_emits_four_walls() {
        let m = metrics_100();
        let walls = tile_walls(&m, &tile(0, 0, TileWalls::CLOSED));
        assert_eq!(walls.len(), 4);
    }

    #[test]
    fn test_build_walls_counts_set_flags() {
        let m = metrics_100();
        let mut maze = square_maze(10, 10);
        maze.tiles = vec![
            tile(0, 0, TileWalls { top: true, left: true, ..Default::default() }),
            tile(5, 5, TileWalls::CLOSED),
            tile(9, 9, TileWalls::default()),
        ];
        assert_eq!(build_walls(&m, &maze).len(), 6);
    }

    #[test]
    fn test_border_walls_hug_scene_edges() {
        let [bottom, top, left, right] = border_walls(Vec2::splat(100.0), 5.0);
        assert_eq!(bottom.min(), Vec2::new(0.0, 0.0));
        assert_eq!(bottom.max(), Vec2::new(100.0, 5.0));
        assert_eq!(top.min(), Vec2::new(0.0, 95.0));
        assert_eq!(top.max(), Vec2::new(100.0, 100.0));
        // Side walls fit between the horizontal ones
        assert_eq!(left.min(), Vec2::new(0.0, 5.0));
        assert_eq!(left.max(), Vec2::new(5.0, 95.0));
        assert_eq!(right.min(), Vec2::new(95.0, 5.0));
        assert_eq!(right.max(), Vec2::new(100.0, 95.0));
    }

    #[test]
    fn test_marble_spawn() {
        let m = metrics_100();
        let (pos, radius) = marble_spawn(&m);
        assert_eq!(pos, Vec2::new(2.0, 98.0));
        // Diameter: 10 - 2*2 - 1 = 5
        assert_eq!(radius, 2.5);
    }

    #[test]
    fn test_goal_rect() {
        let m = metrics_100();
        let mut maze = square_maze(10, 10);
        assert!(goal_rect(&m, &maze).is_none());

        maze.goal = Some((9, 0));
        let goal = goal_rect(&m, &maze).unwrap();
        assert_eq!(goal.min(), Vec2::new(90.0, 90.0));
        assert_eq!(goal.max(), Vec2::new(100.0, 100.0));
    }

    proptest! {
        #[test]
        fn prop_walls_stay_inside_their_tile(
            width in 1u32..32,
            height in 1u32..32,
            px in 0u32..32,
            py in 0u32..32,
            top in any::<bool>(),
            bottom in any::<bool>(),
            left in any::<bool>(),
            right in any::<bool>(),
        ) {
            let x = px % width;
            let y = py % height;
            let t = tile(x, y, TileWalls { top, bottom, left, right });
            let mut maze = square_maze(width, height);
            maze.tiles = vec![t];

            let m = SceneMetrics::for_maze(Vec2::new(750.0, 1334.0), &maze);
            prop_assert!(m.wall_thickness > 0.0);

            let bounds = m.tile_rect(x, y);
            let walls = tile_walls(&m, &t);
            prop_assert_eq!(walls.len(), t.walls.count());

            let eps = 1e-3;
            for wall in walls {
                prop_assert!(wall.half.x > 0.0 && wall.half.y > 0.0);
                prop_assert!(wall.min().x >= bounds.min().x - eps);
                prop_assert!(wall.min().y >= bounds.min().y - eps);
                prop_assert!(wall.max().x <= bounds.max().x + eps);
                prop_assert!(wall.max().y <= bounds.max().y + eps);
            }
        }
    }
}
