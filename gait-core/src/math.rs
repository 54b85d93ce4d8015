//! Vector and transform helpers shared by the path follower and the draw pass.
//!
//! Positions use `glam::Vec3` directly; it already provides the value-type
//! arithmetic the animation needs (add, sub, scalar scale, negation).
//! Angles in this crate are stored in degrees and converted here.

pub use glam::{Mat4, Vec3};
use serde::Serialize;

/// Linear RGB in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const GRID: Color = Color::rgb(0.6, 0.6, 0.6);
    pub const CLEAR: Color = Color::rgb(0.8, 0.8, 0.8);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self { Self { r, g, b } }

    pub fn to_rgba(self) -> [f32; 4] { [self.r, self.g, self.b, 1.0] }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), 255]
    }
}

/// Heading in degrees of a direction on the ground plane.
/// 0° faces +Z and the angle grows toward +X.
pub fn heading_deg(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z).to_degrees()
}

pub fn rotation_x_deg(deg: f32) -> Mat4 { Mat4::from_rotation_x(deg.to_radians()) }
pub fn rotation_y_deg(deg: f32) -> Mat4 { Mat4::from_rotation_y(deg.to_radians()) }
pub fn rotation_z_deg(deg: f32) -> Mat4 { Mat4::from_rotation_z(deg.to_radians()) }

pub fn translation(x: f32, y: f32, z: f32) -> Mat4 { Mat4::from_translation(Vec3::new(x, y, z)) }
