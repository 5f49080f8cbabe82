//! Weighted particle in (x, y, size) state space.

use condtrack_core::Rect;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate square object region with its likelihood.
///
/// Equality and ordering look at the weight only; position, size and the
/// object flag never take part in comparisons.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sample {
    x: i32,
    y: i32,
    size: i32,
    weight: f64,
    is_object: bool,
}

impl Sample {
    /// Create an unevaluated sample (weight 0) centred at `(x, y)`.
    pub const fn new(x: i32, y: i32, size: i32) -> Self {
        Self {
            x,
            y,
            size,
            weight: 0.0,
            is_object: false,
        }
    }

    #[inline]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    #[inline]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    #[inline]
    pub const fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    pub fn set_size(&mut self, size: i32) {
        self.size = size;
    }

    #[inline]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    #[inline]
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    #[inline]
    pub const fn is_object(&self) -> bool {
        self.is_object
    }

    #[inline]
    pub fn set_object(&mut self, is_object: bool) {
        self.is_object = is_object;
    }

    /// Square of side `size` centred at `(x, y)`.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.size / 2,
            self.y - self.size / 2,
            self.size,
            self.size,
        )
    }

    /// Comparator sorting by ascending weight.
    pub fn ascending_by_weight(a: &Self, b: &Self) -> Ordering {
        a.weight.total_cmp(&b.weight)
    }

    /// Comparator sorting by descending weight.
    pub fn descending_by_weight(a: &Self, b: &Self) -> Ordering {
        b.weight.total_cmp(&a.weight)
    }
}

/// Sentinel sample at the origin with weight 1.
impl Default for Sample {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            size: 0,
            weight: 1.0,
            is_object: false,
        }
    }
}

impl PartialEq for Sample {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight
    }
}

impl PartialOrd for Sample {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.weight.partial_cmp(&other.weight)
    }
}
