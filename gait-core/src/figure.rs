//! The walking figure: a torso and two legs placed on a closed path.

use crate::gait::{GaitParams, TorsoTuning};
use crate::math::{rotation_x_deg, rotation_y_deg, rotation_z_deg, translation, Color, Vec3};
use crate::part::Part;
use crate::render::{PartKind, RenderSink};
use crate::spline::ControlPath;

pub const DEFAULT_TORSO: (f32, f32) = (2.0, 1.0);
pub const DEFAULT_LEG: (f32, f32) = (1.5, 0.5);
pub const DEFAULT_PATH_SPACING: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct Figure {
    pub torso: Part,
    pub left_leg: Part,
    pub right_leg: Part,

    /// Total simulated seconds.
    pub time: f32,
    /// Spline parameter along `path`.
    pub path_t: f32,
    /// Path traversal rate, in parameter units per second.
    pub speed: f32,
    pub(crate) angle_y: f32,
    pub(crate) position: Vec3,

    pub(crate) path: ControlPath,
    /// Spacing value read from the path source. Stored, not used for motion.
    pub path_spacing: f32,

    pub tuning: TorsoTuning,
    pub gait: GaitParams,
}

impl Default for Figure {
    fn default() -> Self { Self::new() }
}

impl Figure {
    pub fn new() -> Self {
        Self {
            torso: Part::new(DEFAULT_TORSO.0, DEFAULT_TORSO.1),
            left_leg: Part::new(DEFAULT_LEG.0, DEFAULT_LEG.1),
            right_leg: Part::new(DEFAULT_LEG.0, DEFAULT_LEG.1),
            time: 0.0,
            path_t: 0.0,
            speed: 1.0,
            angle_y: 0.0,
            position: Vec3::ZERO,
            path: ControlPath::default(),
            path_spacing: DEFAULT_PATH_SPACING,
            tuning: TorsoTuning::default(),
            gait: GaitParams::default(),
        }
    }

    /// World position from the last followed tick.
    pub fn position(&self) -> Vec3 { self.position }

    /// Heading in degrees; 0° faces +Z.
    pub fn heading(&self) -> f32 { self.angle_y }

    pub fn path(&self) -> &ControlPath { &self.path }

    pub fn control_points(&self) -> &[Vec3] { self.path.points() }

    /// Replace the control points. The path parameter is left as is.
    pub fn set_path(&mut self, path: ControlPath) {
        log::debug!("figure path set: {} control points (followable: {})", path.len(), path.is_followable());
        self.path = path;
    }

    /// Emit the figure's draws for the current state.
    ///
    /// The root frame sits at the path position offset by sway and rotated to
    /// the heading. The torso is lifted by half its length, then leaned and
    /// tilted. The legs hang a quarter torso width either side of the root
    /// and only carry their swing angle.
    pub fn draw(&self, sink: &mut dyn RenderSink) {
        let motion = self.torso_motion();
        let root = translation(self.position.x + motion.sway_x, motion.bounce_y, self.position.z)
            * rotation_y_deg(self.angle_y);

        let torso_frame = root
            * translation(0.0, self.torso.length / 2.0, 0.0)
            * rotation_x_deg(motion.lean)
            * rotation_z_deg(motion.hip_tilt);
        self.torso.compose(torso_frame, PartKind::Torso, Color::BLUE, sink);

        let hip = self.torso.width / 4.0;
        self.left_leg.compose(root * translation(-hip, 0.0, 0.0), PartKind::LeftLeg, Color::RED, sink);
        self.right_leg.compose(root * translation(hip, 0.0, 0.0), PartKind::RightLeg, Color::GREEN, sink);
    }
}
