//! Per-tick animation: path following, heading, leg swing and torso motion.
//!
//! One call to [`Figure::update`] advances everything time dependent in a
//! single deterministic pass. Torso sway/bounce/lean/tilt are not stored; they
//! are sampled at draw time from the same phase that drives the legs, so the
//! torso stays locked to the footstep cadence.

use std::f32::consts::{PI, TAU};

use serde::Deserialize;

use crate::figure::Figure;
use crate::math::heading_deg;
use crate::spline::{catmull_rom, ControlPath};

/// Parameter offset of the lookahead sample used for the heading.
pub const HEADING_LOOKAHEAD: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GaitParams {
    /// Peak leg swing in degrees.
    pub leg_amplitude_deg: f32,
    /// Leg cycles per second per unit of path speed.
    pub cadence_per_speed: f32,
}

impl Default for GaitParams {
    fn default() -> Self { Self { leg_amplitude_deg: 30.0, cadence_per_speed: 1.0 } }
}

impl GaitParams {
    pub fn leg_frequency(&self, speed: f32) -> f32 { self.cadence_per_speed * speed }
}

/// Amplitudes of the torso's secondary motion.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TorsoTuning {
    pub sway_amplitude: f32,
    /// Degrees.
    pub lean_amplitude: f32,
    /// Degrees.
    pub hip_tilt_amplitude: f32,
}

impl Default for TorsoTuning {
    fn default() -> Self { Self { sway_amplitude: 0.1, lean_amplitude: 5.0, hip_tilt_amplitude: 5.0 } }
}

pub fn phase(frequency: f32, time: f32) -> f32 { TAU * frequency * time }

/// Leg angles in degrees, half a cycle apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegSwing {
    pub left: f32,
    pub right: f32,
}

impl LegSwing {
    pub fn at(amplitude: f32, frequency: f32, time: f32) -> Self {
        let p = phase(frequency, time);
        Self { left: amplitude * p.sin(), right: amplitude * (p + PI).sin() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsoMotion {
    /// Lateral offset.
    pub sway_x: f32,
    /// Vertical offset, a quarter cycle behind the sway.
    pub bounce_y: f32,
    /// Forward lean in degrees (about X).
    pub lean: f32,
    /// Hip tilt in degrees (about Z).
    pub hip_tilt: f32,
}

impl TorsoMotion {
    pub fn sample(tuning: &TorsoTuning, frequency: f32, time: f32) -> Self {
        let p = phase(frequency, time);
        let (s, c) = p.sin_cos();
        Self {
            sway_x: tuning.sway_amplitude * s,
            bounce_y: tuning.sway_amplitude * 0.5 * c,
            lean: tuning.lean_amplitude * s,
            hip_tilt: tuning.hip_tilt_amplitude * s,
        }
    }
}

impl Figure {
    pub fn leg_frequency(&self) -> f32 { self.gait.leg_frequency(self.speed) }

    /// Sway frequency always tracks the leg frequency.
    pub fn sway_frequency(&self) -> f32 { self.leg_frequency() }

    pub fn torso_motion(&self) -> TorsoMotion {
        TorsoMotion::sample(&self.tuning, self.sway_frequency(), self.time)
    }

    /// Advance the animation by `delta` seconds.
    ///
    /// Time always accumulates. With fewer than four control points nothing
    /// else changes: position, heading and leg angles keep their last values.
    pub fn update(&mut self, delta: f32) {
        self.time += delta;

        if !self.path.is_followable() {
            log::trace!("update: {} control points, holding pose at t={:.3}", self.path.len(), self.time);
            return;
        }

        self.path_t = self.path.advance(self.path_t, self.speed * delta);
        let (idx, t) = ControlPath::locate(self.path_t);
        let Some([p0, p1, p2, p3]) = self.path.window(idx) else { return };

        self.position = catmull_rom(p0, p1, p2, p3, t);
        let ahead = catmull_rom(p0, p1, p2, p3, t + HEADING_LOOKAHEAD);
        self.angle_y = heading_deg(ahead - self.position);

        let swing = LegSwing::at(self.gait.leg_amplitude_deg, self.leg_frequency(), self.time);
        self.left_leg.angle = swing.left;
        self.right_leg.angle = swing.right;

        log::trace!(
            "update: t={:.3} path_t={:.3} seg={} pos=({:.2}, {:.2}, {:.2}) heading={:.1}",
            self.time, self.path_t, idx, self.position.x, self.position.y, self.position.z, self.angle_y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn diamond() -> ControlPath {
        ControlPath::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, -1.0),
        ])
    }

    #[test]
    fn short_path_freezes_pose_but_time_runs() {
        let mut f = Figure::new();
        f.set_path(ControlPath::new(vec![Vec3::X, Vec3::Y, Vec3::Z]));
        let (pos, heading) = (f.position(), f.heading());
        for _ in 0..25 {
            f.update(0.1);
        }
        assert_eq!(f.position(), pos);
        assert_eq!(f.heading(), heading);
        assert_eq!(f.path_t, 0.0);
        assert_eq!(f.left_leg.angle, 0.0);
        assert!((f.time - 2.5).abs() < 1e-5);
    }

    #[test]
    fn shortened_path_holds_last_followed_pose() {
        let mut f = Figure::new();
        f.set_path(diamond());
        for _ in 0..3 {
            f.update(0.1);
        }
        let (pos, heading) = (f.position(), f.heading());
        let (left, right) = (f.left_leg.angle, f.right_leg.angle);
        assert_ne!(pos, Vec3::ZERO);
        assert_ne!(left, 0.0);

        f.set_path(ControlPath::new(diamond().points()[..3].to_vec()));
        let before = f.time;
        for _ in 0..20 {
            f.update(0.05);
        }
        assert_eq!(f.position(), pos);
        assert_eq!(f.heading(), heading);
        assert_eq!((f.left_leg.angle, f.right_leg.angle), (left, right));
        assert!((f.time - before - 1.0).abs() < 1e-5);
    }

    #[test]
    fn huge_step_does_not_overflow_indices() {
        let mut f = Figure::new();
        f.set_path(diamond());
        f.speed = 1e20;
        f.update(1.0);
        assert!(f.position().is_finite());
        f.update(1.0);
        assert!(f.position().is_finite());
    }

    #[test]
    fn negative_speed_walks_backwards_within_range() {
        let mut f = Figure::new();
        f.set_path(diamond());
        f.speed = -1.0;
        for _ in 0..10 {
            f.update(0.5);
            assert!((0.0..=f.path().span()).contains(&f.path_t));
            let p = f.position();
            assert!(p.x.abs() <= 3.0 && p.z.abs() <= 3.0);
        }
    }

    #[test]
    fn empty_path_is_not_an_error() {
        let mut f = Figure::new();
        f.update(1.0);
        assert_eq!(f.time, 1.0);
        assert_eq!(f.position(), Vec3::ZERO);
    }

    #[test]
    fn reaching_parameter_one_lands_on_window_start() {
        let mut f = Figure::new();
        f.set_path(diamond());
        f.speed = 1.0;
        f.update(1.0);
        // span is 1 and the wrap only triggers strictly past it
        assert_eq!(f.path_t, 1.0);
        // segment 1 at t=0 evaluates to the second point of window(1), i.e. index 2
        assert_eq!(f.position(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(f.position(), diamond().window(1).unwrap()[1]);
        // tangent there runs from index 1 toward index 3, i.e. along -Z
        assert!((f.heading().abs() - 180.0).abs() < 2.0);
    }

    #[test]
    fn start_of_path_faces_along_tangent() {
        let mut f = Figure::new();
        f.set_path(diamond());
        f.update(0.0);
        assert_eq!(f.position(), Vec3::new(1.0, 0.0, 1.0));
        // tangent at index 1 is (p2 - p0) / 2 = +X
        assert!((f.heading() - 90.0).abs() < 2.0);
    }

    #[test]
    fn path_parameter_wraps() {
        let mut f = Figure::new();
        f.set_path(diamond());
        f.update(0.75);
        f.update(0.5);
        assert!((f.path_t - 0.25).abs() < 1e-6);
    }

    #[test]
    fn legs_are_half_a_cycle_apart() {
        let mut f = Figure::new();
        f.set_path(diamond());
        f.speed = 0.7;
        for _ in 0..200 {
            f.update(0.013);
            assert!((f.right_leg.angle + f.left_leg.angle).abs() < 1e-3);
            assert!(f.left_leg.angle.abs() <= f.gait.leg_amplitude_deg + 1e-4);
        }
    }

    #[test]
    fn leg_swing_peaks_at_quarter_cycle() {
        let swing = LegSwing::at(30.0, 1.0, 0.25);
        assert!((swing.left - 30.0).abs() < 1e-4);
        assert!((swing.right + 30.0).abs() < 1e-4);
    }

    #[test]
    fn sway_frequency_follows_speed() {
        let mut f = Figure::new();
        f.speed = 2.5;
        assert_eq!(f.sway_frequency(), 2.5);
        f.gait.cadence_per_speed = 2.0;
        assert_eq!(f.sway_frequency(), 5.0);
    }

    #[test]
    fn torso_motion_shares_phase() {
        let tuning = TorsoTuning::default();
        let m = TorsoMotion::sample(&tuning, 1.0, 0.25);
        assert!((m.sway_x - 0.1).abs() < 1e-6);
        assert!(m.bounce_y.abs() < 1e-6);
        assert!((m.lean - 5.0).abs() < 1e-5);
        assert!((m.hip_tilt - 5.0).abs() < 1e-5);
        let rest = TorsoMotion::sample(&tuning, 1.0, 0.0);
        assert_eq!(rest.bounce_y, 0.05);
    }
}
