//! Drawing adapter
//!
//! The engine never touches a drawing surface directly. Hosts implement
//! [`Renderer`] (Canvas 2D in the browser, a recorder for headless runs) and
//! the engine calls it with tile polygons and styles.

pub mod board;

pub use board::{TileStyle, draw_board, draw_flash};

use glam::Vec2;

/// Anything that can draw a filled, stroked, closed polygon
pub trait Renderer {
    fn draw_tile(&mut self, polygon: &[Vec2], fill: &str, stroke: &str, stroke_width: f32);
}

/// One recorded `draw_tile` call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub polygon: Vec<Vec2>,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f32,
}

/// Renderer that keeps every call, for headless hosts and tests
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls drawn with the highlight stroke
    pub fn flashes(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| c.stroke == crate::consts::FLASH_STROKE)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn draw_tile(&mut self, polygon: &[Vec2], fill: &str, stroke: &str, stroke_width: f32) {
        log::trace!("draw_tile fill={} stroke={} width={}", fill, stroke, stroke_width);
        self.calls.push(DrawCall {
            polygon: polygon.to_vec(),
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            stroke_width,
        });
    }
}
