//! Tilt sources standing in for the device accelerometer.

use std::f64::consts::TAU;

use cyborg_core::types::Acceleration;

/// Something that can be polled for the current device acceleration.
pub trait MotionSource {
    /// Reading at host time `t`, or `None` once updates have stopped.
    fn sample(&mut self, t: f64) -> Option<Acceleration>;
}

/// Rocks the device left and right on a sine wave, lying face up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedTilt {
    /// Peak sideways acceleration in g.
    pub amplitude: f32,
    pub period_secs: f64,
    /// Stop reporting after this many seconds.
    pub stop_after: Option<f64>,
}

impl Default for ScriptedTilt {
    fn default() -> Self {
        Self {
            amplitude: 0.3,
            period_secs: 4.0,
            stop_after: None,
        }
    }
}

impl MotionSource for ScriptedTilt {
    fn sample(&mut self, t: f64) -> Option<Acceleration> {
        if self.stop_after.is_some_and(|stop| t >= stop) {
            return None;
        }
        let phase = TAU * t / self.period_secs;
        Some(Acceleration::new(
            self.amplitude * phase.sin() as f32,
            0.0,
            -1.0,
        ))
    }
}

/// A device with no accelerometer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMotion;

impl MotionSource for NoMotion {
    fn sample(&mut self, _t: f64) -> Option<Acceleration> {
        None
    }
}
