//! Synthetic clip: a bright square bouncing around a dark frame.

use condtrack_core::{Image, Rect};

/// Generates frames together with their ground-truth object box.
pub struct SyntheticClip {
    pub width: u32,
    pub height: u32,
    pub object_size: i32,
    /// Object velocity in pixels per frame.
    pub velocity: (i32, i32),
    pub foreground: u8,
    pub background: u8,
}

impl SyntheticClip {
    pub fn new(width: u32, height: u32) -> Self {
        let object_size = (width.min(height) / 5).max(2) as i32;
        Self {
            width,
            height,
            object_size,
            velocity: (3, 2),
            foreground: 230,
            background: 20,
        }
    }

    /// Ground-truth box of the object in frame `index`.
    pub fn object_at(&self, index: u32) -> Rect {
        let span_x = (self.width as i32 - self.object_size).max(0);
        let span_y = (self.height as i32 - self.object_size).max(0);
        let x = bounce(span_x / 4 + self.velocity.0 * index as i32, span_x);
        let y = bounce(span_y / 4 + self.velocity.1 * index as i32, span_y);
        Rect::new(x, y, self.object_size, self.object_size)
    }

    pub fn frame(&self, index: u32) -> (Image, Rect) {
        let object = self.object_at(index);
        let image = Image::with_square(
            self.width,
            self.height,
            object,
            self.foreground,
            self.background,
        );
        (image, object)
    }
}

/// Reflect `pos` into `[0, span]`.
fn bounce(pos: i32, span: i32) -> i32 {
    if span == 0 {
        return 0;
    }
    let period = 2 * span;
    let p = pos.rem_euclid(period);
    if p <= span {
        p
    } else {
        period - p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_stays_in_frame() {
        let clip = SyntheticClip::new(160, 120);
        let bounds = Rect::from_size(160, 120);
        for i in 0..500 {
            assert!(bounds.contains(clip.object_at(i)));
        }
    }

    #[test]
    fn test_bounce_reflects() {
        assert_eq!(bounce(5, 10), 5);
        assert_eq!(bounce(12, 10), 8);
        assert_eq!(bounce(20, 10), 0);
        assert_eq!(bounce(-3, 10), 3);
    }
}
