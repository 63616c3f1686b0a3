//! Board geometry for the radial tile layout
//!
//! The board is a fan of `n` triangles around a shared center. Tile `i` spans
//! the angles `[i * TAU / n, (i + 1) * TAU / n)`; its vertices are the two
//! outer points on the rim followed by the center as the apex.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::Anomaly;
use crate::{TileColor, polar_to_cartesian};

/// Slack for points that sit on a shared edge
const EDGE_EPSILON: f32 = 1e-6;

/// One triangular wedge of the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub index: usize,
    pub color: TileColor,
    /// Start angle of the wedge (radians, in [0, TAU))
    pub theta_start: f32,
    /// End angle of the wedge (radians)
    pub theta_end: f32,
    /// `[outer_start, outer_end, apex]`
    pub vertices: [Vec2; 3],
}

impl Tile {
    /// The shared apex (board center)
    #[inline]
    pub fn apex(&self) -> Vec2 {
        self.vertices[2]
    }

    pub fn is_degenerate(&self) -> bool {
        barycentric(Vec2::ZERO, &self.vertices).is_none()
    }

    /// Centroid of the triangle (always strictly inside a non-degenerate tile)
    pub fn centroid(&self) -> Vec2 {
        let [a, b, c] = self.vertices;
        (a + b + c) / 3.0
    }
}

/// Build `n` tiles around `center`, each reaching `outer_radius`
pub fn build_board(n: usize, center: Vec2, outer_radius: f32) -> Vec<Tile> {
    if n == 0 {
        return Vec::new();
    }
    let step = std::f32::consts::TAU / n as f32;

    (0..n)
        .map(|i| {
            let theta_start = step * i as f32;
            let theta_end = theta_start + step;
            let outer_start = center + polar_to_cartesian(outer_radius, theta_start);
            let outer_end = center + polar_to_cartesian(outer_radius, theta_end);
            Tile {
                index: i,
                color: TileColor::for_index(i),
                theta_start,
                theta_end,
                vertices: [outer_start, outer_end, center],
            }
        })
        .collect()
}

/// Barycentric weights `(u, v)` of `point` relative to triangle `[a, b, c]`,
/// where `u` weighs edge `a -> c` and `v` weighs edge `a -> b`.
///
/// Returns `None` when the triangle has no area.
fn barycentric(point: Vec2, triangle: &[Vec2; 3]) -> Option<(f32, f32)> {
    let [a, b, c] = *triangle;
    let v0 = c - a;
    let v1 = b - a;
    let v2 = point - a;

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    // Collinear or coincident vertices; NaN coordinates land here too
    if !(denom.abs() > f32::EPSILON * dot00 * dot11) {
        return None;
    }

    let u = (dot11 * dot02 - dot01 * dot12) / denom;
    let v = (dot00 * dot12 - dot01 * dot02) / denom;
    Some((u, v))
}

/// True iff `point` lies inside or on the boundary of the tile's triangle.
///
/// A zero-area tile contains nothing.
pub fn hit_test(point: Vec2, tile: &Tile) -> bool {
    match barycentric(point, &tile.vertices) {
        Some((u, v)) => u >= -EDGE_EPSILON && v >= -EDGE_EPSILON && u + v <= 1.0 + EDGE_EPSILON,
        None => false,
    }
}

/// First tile (by index) containing `point`
pub fn locate_tile(point: Vec2, tiles: &[Tile]) -> Option<usize> {
    tiles
        .iter()
        .find(|tile| hit_test(point, tile))
        .map(|tile| tile.index)
}

/// The whole board: tiles plus the parameters they were built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub center: Vec2,
    pub outer_radius: f32,
    pub tiles: Vec<Tile>,
}

impl Board {
    pub fn new(n: usize, center: Vec2, outer_radius: f32) -> Self {
        Self {
            center,
            outer_radius,
            tiles: build_board(n, center, outer_radius),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Tile under a board-local point
    pub fn locate(&self, point: Vec2) -> Option<usize> {
        locate_tile(point, &self.tiles)
    }

    /// Report the first tile that cannot be hit
    pub fn validate(&self) -> Result<(), Anomaly> {
        match self.tiles.iter().find(|t| t.is_degenerate()) {
            Some(tile) => Err(Anomaly::GeometryDegenerate { tile: tile.index }),
            None => Ok(()),
        }
    }
}
