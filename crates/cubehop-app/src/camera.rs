//! Follow camera.
//!
//! The simulation publishes where the camera wants to be; the rig eases
//! toward that point so jumps and respawns don't jerk the view. Easing is
//! exponential and settles within roughly `smoothing_secs`.

use glam::Vec3;
use serde::Serialize;

/// Camera placement for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    position: Option<Vec3>,
    offset: Vec3,
    smoothing_secs: f32,
}

/// Time constants per smoothing window: after `smoothing_secs` about 98%
/// of the gap is closed.
const SETTLE_RATE: f32 = 4.0;

impl CameraRig {
    pub fn new(offset: Vec3, smoothing_secs: f32) -> Self {
        Self {
            position: None,
            offset,
            smoothing_secs,
        }
    }

    /// Jump straight to the desired position for `target`.
    pub fn snap_to(&mut self, target: Vec3) -> CameraPose {
        let position = target + self.offset;
        self.position = Some(position);
        CameraPose {
            position,
            look_at: target,
        }
    }

    /// Ease toward `target + offset` over `dt` seconds and look at `target`.
    /// The first update after construction snaps.
    pub fn update(&mut self, target: Vec3, dt: f32) -> CameraPose {
        let Some(current) = self.position else {
            return self.snap_to(target);
        };
        if self.smoothing_secs <= 0.0 {
            return self.snap_to(target);
        }

        let desired = target + self.offset;
        let alpha = 1.0 - (-SETTLE_RATE * dt / self.smoothing_secs).exp();
        let position = current.lerp(desired, alpha);
        self.position = Some(position);

        CameraPose {
            position,
            look_at: target,
        }
    }

    pub fn position(&self) -> Option<Vec3> {
        self.position
    }
}
