//! Sprite sheets and draw commands

use crate::sim::Rect;

/// Which sheet a draw samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetId {
    Bat,
    Spikes,
}

/// A horizontal strip of equally sized frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    pub width: f64,
    pub height: f64,
    pub frames: u32,
}

impl SpriteSheet {
    pub fn new(width: f64, height: f64, frames: u32) -> Self {
        Self {
            width,
            height,
            frames,
        }
    }

    pub fn frame_width(&self) -> f64 {
        self.width / self.frames.max(1) as f64
    }

    /// Source rectangle of `frame`, clamped to the last frame
    pub fn frame_rect(&self, frame: u32) -> Rect {
        let frame = frame.min(self.frames.saturating_sub(1));
        let w = self.frame_width();
        Rect::new(frame as f64 * w, 0.0, w, self.height)
    }
}

/// Read-only sheet handles the renderer draws from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheets {
    pub bat: SpriteSheet,
    pub spikes: SpriteSheet,
}

impl Default for SpriteSheets {
    /// Bat: five 32x32 frames. Spikes: six frames.
    fn default() -> Self {
        Self {
            bat: SpriteSheet::new(160.0, 32.0, 5),
            spikes: SpriteSheet::new(384.0, 256.0, 6),
        }
    }
}

/// One blit: clip `src` from a sheet and place it scaled at `dst`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub sheet: SheetId,
    pub src: Rect,
    pub dst: Rect,
    pub flip_x: bool,
    pub flip_y: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rect_clamps() {
        let sheet = SpriteSheet::new(160.0, 32.0, 5);
        assert_eq!(sheet.frame_rect(2), Rect::new(64.0, 0.0, 32.0, 32.0));
        assert_eq!(sheet.frame_rect(9), Rect::new(128.0, 0.0, 32.0, 32.0));
    }
}
