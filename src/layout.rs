//! Where the container, results table and counter sit, in board units.
//!
//! The default 7-row board reproduces the classic frame: a 6.5 x 8 container
//! centered at (-3, -0.5), the table at (-3, 3.7) and the counter at (4, -0.6).
//! Larger boards grow the container and push the table and counter outward.

use bevy::prelude::*;
use galton_board::{BoardSettings, Lattice};
use glam::Vec2;

const CONTAINER_SIZE: Vec2 = Vec2::new(6.5, 8.0);
const CONTAINER_CENTER: Vec2 = Vec2::new(-3.0, -0.5);
/// Clearance around the outermost collision points and stack tops.
const CONTAINER_MARGIN: Vec2 = Vec2::new(0.45, 0.2);
const TABLE_GAP: f32 = 0.2;
pub const CELL_WIDTH: f32 = 0.65;
pub const CELL_HEIGHT: f32 = 0.45;
const COUNTER_MIN_X: f32 = 4.0;
/// Room the "Items count:" label needs left of the counter.
const COUNTER_LABEL_WIDTH: f32 = 3.75;
const COUNTER_DROP: f32 = 0.1;
const FRAME_PADDING: f32 = 0.3;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    pub container: Rect,
    pub table_center: Vec2,
    pub counter: Vec2,
    /// Everything drawn; the camera fits this.
    pub bounds: Rect,
}

impl SceneLayout {
    pub fn new(settings: &BoardSettings) -> Self {
        let points = Lattice::new(settings).collision_points();
        let mut board = Rect::from_center_size(settings.particle_start(), Vec2::ZERO);
        for point in points.iter().flatten() {
            board = board.union_point(*point);
        }
        if let Some(last_row) = points.last() {
            for point in last_row {
                board = board.union_point(*point + Vec2::Y * settings.bin_rise);
            }
        }
        let board = Rect::from_corners(board.min - CONTAINER_MARGIN, board.max + CONTAINER_MARGIN);

        let container =
            Rect::from_center_size(CONTAINER_CENTER, CONTAINER_SIZE).union(board);

        let table_center = Vec2::new(container.center().x, container.max.y + TABLE_GAP);
        let counter = Vec2::new(
            COUNTER_MIN_X.max(container.max.x + COUNTER_LABEL_WIDTH),
            container.center().y - COUNTER_DROP,
        );

        let table_width = settings.bin_count() as f32 * CELL_WIDTH;
        let table = Rect::from_center_size(table_center, Vec2::new(table_width, CELL_HEIGHT));
        let counter_area = Rect::from_corners(
            counter - Vec2::new(COUNTER_LABEL_WIDTH, CELL_HEIGHT),
            counter + Vec2::new(1.0, CELL_HEIGHT),
        );
        let bounds = container.union(table).union(counter_area).inflate(FRAME_PADDING);

        Self {
            container,
            table_center,
            counter,
            bounds,
        }
    }

    pub fn cell_x(&self, index: usize, bins: usize) -> f32 {
        self.table_center.x + (index as f32 - (bins as f32 - 1.0) / 2.0) * CELL_WIDTH
    }
}
