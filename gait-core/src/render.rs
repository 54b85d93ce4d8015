//! Boundary to whatever draws the figure.
//!
//! The core never touches a graphics API. A draw pass produces a sequence of
//! [`DrawCommand`]s; a backend either consumes them one at a time through
//! [`RenderSink`] or uploads them in bulk via [`pack_instances`].

use crate::math::{Color, Mat4, Vec3};
use bytemuck::{Pod, Zeroable};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    Torso,
    LeftLeg,
    RightLeg,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Unit cube centred on the origin; the transform carries the scale.
    Cube,
    /// World-space segment; drawn with the command's transform applied.
    Line { from: Vec3, to: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub part: PartKind,
    pub transform: Mat4,
    pub primitive: Primitive,
    pub color: Color,
}

pub trait RenderSink {
    fn draw(&mut self, cmd: DrawCommand);
}

impl RenderSink for Vec<DrawCommand> {
    fn draw(&mut self, cmd: DrawCommand) { self.push(cmd); }
}

/// Counts commands without keeping them.
#[derive(Debug, Default)]
pub struct CountingSink {
    pub cubes: usize,
    pub lines: usize,
}

impl RenderSink for CountingSink {
    fn draw(&mut self, cmd: DrawCommand) {
        match cmd.primitive {
            Primitive::Cube => self.cubes += 1,
            Primitive::Line { .. } => self.lines += 1,
        }
    }
}

/// Per-instance data for a cube batch: column-major model matrix then RGBA.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [f32; 16],
    pub color: [f32; 4],
}

impl From<&DrawCommand> for InstanceRaw {
    fn from(cmd: &DrawCommand) -> Self {
        Self { model: cmd.transform.to_cols_array(), color: cmd.color.to_rgba() }
    }
}

/// Pack the cube commands into an upload-ready byte buffer. Lines are skipped.
pub fn pack_instances(cmds: &[DrawCommand]) -> Vec<u8> {
    let instances: Vec<InstanceRaw> = cmds
        .iter()
        .filter(|c| matches!(c.primitive, Primitive::Cube))
        .map(InstanceRaw::from)
        .collect();
    bytemuck::cast_slice(&instances).to_vec()
}

/// Serializable view of one drawn cube.
#[derive(Debug, Clone, Serialize)]
pub struct PartPose {
    pub part: PartKind,
    /// World position of the cube centre.
    pub center: [f32; 3],
    pub model: [f32; 16],
    pub color: Color,
}

/// One frame's worth of figure state plus its cube draws, for JSON dumps.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub time: f32,
    pub path_t: f32,
    pub heading_deg: f32,
    pub position: [f32; 3],
    pub left_leg_deg: f32,
    pub right_leg_deg: f32,
    pub parts: Vec<PartPose>,
}

impl FrameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string(self) }
}

pub fn poses(cmds: &[DrawCommand]) -> Vec<PartPose> {
    cmds.iter()
        .filter(|c| matches!(c.primitive, Primitive::Cube))
        .map(|c| PartPose {
            part: c.part,
            center: c.transform.transform_point3(Vec3::ZERO).to_array(),
            model: c.transform.to_cols_array(),
            color: c.color,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(part: PartKind, at: Vec3, color: Color) -> DrawCommand {
        DrawCommand { part, transform: Mat4::from_translation(at), primitive: Primitive::Cube, color }
    }

    #[test]
    fn packs_only_cubes() {
        let cmds = vec![
            cube(PartKind::Torso, Vec3::new(1.0, 2.0, 3.0), Color::BLUE),
            DrawCommand {
                part: PartKind::Grid,
                transform: Mat4::IDENTITY,
                primitive: Primitive::Line { from: Vec3::ZERO, to: Vec3::X },
                color: Color::GRID,
            },
            cube(PartKind::LeftLeg, Vec3::ZERO, Color::RED),
        ];
        let bytes = pack_instances(&cmds);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<InstanceRaw>());
        let back: Vec<InstanceRaw> = bytemuck::pod_collect_to_vec(&bytes);
        assert_eq!(&back[0].model[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(back[1].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn counting_sink_splits_primitives() {
        let mut sink = CountingSink::default();
        sink.draw(cube(PartKind::Torso, Vec3::ZERO, Color::BLUE));
        sink.draw(DrawCommand {
            part: PartKind::Grid,
            transform: Mat4::IDENTITY,
            primitive: Primitive::Line { from: Vec3::ZERO, to: Vec3::Z },
            color: Color::GRID,
        });
        assert_eq!((sink.cubes, sink.lines), (1, 1));
    }

    #[test]
    fn snapshot_serializes_part_names() {
        let snap = FrameSnapshot {
            frame: 3,
            time: 0.5,
            path_t: 0.5,
            heading_deg: 90.0,
            position: [1.0, 0.0, 0.0],
            left_leg_deg: 0.0,
            right_leg_deg: 0.0,
            parts: poses(&[cube(PartKind::RightLeg, Vec3::new(0.25, 0.0, 0.0), Color::GREEN)]),
        };
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"right_leg\""));
        assert!(json.contains("\"frame\":3"));
    }
}
