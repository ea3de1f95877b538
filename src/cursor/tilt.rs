//! Profile image tilt
//!
//! Maps the pointer position over a rectangle (the hero profile image) to a
//! small 3-D rotation so the image leans toward the pointer.

use serde::{Deserialize, Serialize};

/// Tilt gains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiltConfig {
    /// Degrees about X per unit of vertical offset (edges are at 0.5)
    #[serde(default = "default_gain_x")]
    pub rotate_x_gain: f64,

    /// Degrees about Y per unit of horizontal offset
    #[serde(default = "default_gain_y")]
    pub rotate_y_gain: f64,
}

fn default_gain_x() -> f64 {
    10.0
}
fn default_gain_y() -> f64 {
    16.0
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            rotate_x_gain: default_gain_x(),
            rotate_y_gain: default_gain_y(),
        }
    }
}

/// Element rectangle in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// Rotation in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tilt {
    /// Rotation about the X axis
    pub rotate_x: f64,
    /// Rotation about the Y axis
    pub rotate_y: f64,
}

/// Tilt state for one element
#[derive(Debug, Clone, Default)]
pub struct TiltTracker {
    config: TiltConfig,
    tilt: Tilt,
}

impl TiltTracker {
    /// Create a tracker at rest
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            tilt: Tilt::default(),
        }
    }

    /// Pointer moved to `(x, y)` while over `rect`
    pub fn on_pointer_move(&mut self, x: f64, y: f64, rect: Rect) -> Tilt {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return self.tilt;
        }

        // Normalized offset from the centre, -0.5..0.5
        let nx = (x - rect.left) / rect.width - 0.5;
        let ny = (y - rect.top) / rect.height - 0.5;

        // Pointer below centre leans the top edge away
        self.tilt = Tilt {
            rotate_x: ny * -self.config.rotate_x_gain,
            rotate_y: nx * self.config.rotate_y_gain,
        };
        self.tilt
    }

    /// Pointer left the element
    pub fn on_pointer_leave(&mut self) -> Tilt {
        self.tilt = Tilt::default();
        self.tilt
    }

    /// Current tilt
    pub fn tilt(&self) -> Tilt {
        self.tilt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect {
        left: 100.0,
        top: 100.0,
        width: 200.0,
        height: 200.0,
    };

    #[test]
    fn test_centre_is_flat() {
        let mut tilt = TiltTracker::default();
        assert_eq!(tilt.on_pointer_move(200.0, 200.0, RECT), Tilt::default());
    }

    #[test]
    fn test_corner() {
        let mut tilt = TiltTracker::default();
        let t = tilt.on_pointer_move(300.0, 100.0, RECT);
        // Top-right: x = +0.5, y = -0.5
        assert!((t.rotate_x - 5.0).abs() < 1e-9);
        assert!((t.rotate_y - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_leave_resets() {
        let mut tilt = TiltTracker::default();
        tilt.on_pointer_move(120.0, 280.0, RECT);
        assert_ne!(tilt.tilt(), Tilt::default());
        assert_eq!(tilt.on_pointer_leave(), Tilt::default());
    }

    #[test]
    fn test_degenerate_rect_keeps_tilt() {
        let mut tilt = TiltTracker::default();
        let before = tilt.on_pointer_move(300.0, 300.0, RECT);
        let empty = Rect {
            width: 0.0,
            ..RECT
        };
        assert_eq!(tilt.on_pointer_move(0.0, 0.0, empty), before);
    }
}
