//! Board drawing on top of [`Renderer`]

use super::Renderer;
use crate::consts::*;
use crate::sim::{Board, Tile};

/// Fill and outline for one tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: f32,
}

impl TileStyle {
    /// Resting look: tile color, thin black outline
    pub fn neutral(tile: &Tile) -> Self {
        Self {
            fill: tile.color.as_str(),
            stroke: NEUTRAL_STROKE,
            stroke_width: NEUTRAL_STROKE_WIDTH,
        }
    }

    /// Highlighted look: tile color, thick white outline
    pub fn flash(tile: &Tile) -> Self {
        Self {
            fill: tile.color.as_str(),
            stroke: FLASH_STROKE,
            stroke_width: FLASH_STROKE_WIDTH,
        }
    }
}

fn draw_styled<R: Renderer + ?Sized>(renderer: &mut R, tile: &Tile, style: TileStyle) {
    renderer.draw_tile(&tile.vertices, style.fill, style.stroke, style.stroke_width);
}

/// Redraw every tile in its neutral style
pub fn draw_board<R: Renderer + ?Sized>(renderer: &mut R, board: &Board) {
    for tile in &board.tiles {
        draw_styled(renderer, tile, TileStyle::neutral(tile));
    }
}

/// Draw a single tile highlighted
pub fn draw_flash<R: Renderer + ?Sized>(renderer: &mut R, tile: &Tile) {
    draw_styled(renderer, tile, TileStyle::flash(tile));
}
