//! One explicitly owned figure plus the camera and ground it is viewed with.
//!
//! The host calls [`Scene::frame`] once per frame: one tick with the
//! measured delta, then one draw.

use crate::config::{AssetPaths, CameraConfig, GridConfig, SceneConfig};
use crate::error::LoadError;
use crate::figure::Figure;
use crate::loader;
use crate::math::{Color, Mat4, Vec3};
use crate::render::{self, DrawCommand, FrameSnapshot, PartKind, Primitive, RenderSink};

/// Camera that trails the figure from behind and above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera { pub cfg: CameraConfig }

impl FollowCamera {
    pub fn eye(&self, figure: &Figure) -> Vec3 { figure.position() + Vec3::from_array(self.cfg.offset) }

    pub fn target(&self, figure: &Figure) -> Vec3 {
        let p = figure.position();
        Vec3::new(p.x, self.cfg.target_height, p.z)
    }

    pub fn view(&self, figure: &Figure) -> Mat4 {
        Mat4::look_at_rh(self.eye(figure), self.target(figure), Vec3::Y)
    }

    /// Perspective projection for a `width` x `height` viewport; a zero
    /// height is treated as one.
    pub fn projection(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width as f32 / height.max(1) as f32;
        Mat4::perspective_rh_gl(self.cfg.fov_y_deg.to_radians(), aspect, self.cfg.near, self.cfg.far)
    }
}

/// Square reference grid on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundGrid { pub cfg: GridConfig }

impl GroundGrid {
    pub fn lines(&self) -> Vec<(Vec3, Vec3)> {
        let GridConfig { half_extent: h, step } = self.cfg;
        if step <= 0.0 || h < 0.0 { return Vec::new(); }
        // last line stays at or inside the extent
        let count = (2.0 * h / step + 1e-4).floor() as i32;
        let mut out = Vec::with_capacity(2 * (count as usize + 1));
        for i in 0..=count {
            let x = -h + i as f32 * step;
            out.push((Vec3::new(x, 0.0, -h), Vec3::new(x, 0.0, h)));
        }
        for i in 0..=count {
            let z = -h + i as f32 * step;
            out.push((Vec3::new(-h, 0.0, z), Vec3::new(h, 0.0, z)));
        }
        out
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        for (from, to) in self.lines() {
            sink.draw(DrawCommand {
                part: PartKind::Grid,
                transform: Mat4::IDENTITY,
                primitive: Primitive::Line { from, to },
                color: Color::GRID,
            });
        }
    }
}

/// Outcome of loading the asset files. Either failure still leaves a usable
/// scene with default geometry or a static figure.
#[derive(Debug)]
pub struct AssetStatus {
    pub geometry: Result<(), LoadError>,
    pub path: Result<(), LoadError>,
}

impl AssetStatus {
    pub fn is_ok(&self) -> bool { self.geometry.is_ok() && self.path.is_ok() }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub figure: Figure,
    pub camera: FollowCamera,
    pub grid: GroundGrid,
    pub clear_color: Color,
    frame: u64,
}

impl Default for Scene {
    fn default() -> Self { Self::from_config(&SceneConfig::default()) }
}

impl Scene {
    pub fn new(figure: Figure) -> Self {
        let cfg = SceneConfig::default();
        Self {
            figure,
            camera: FollowCamera { cfg: cfg.camera },
            grid: GroundGrid { cfg: cfg.grid },
            clear_color: Color::CLEAR,
            frame: 0,
        }
    }

    pub fn from_config(cfg: &SceneConfig) -> Self {
        let mut figure = Figure::new();
        cfg.apply(&mut figure);
        Self { camera: FollowCamera { cfg: cfg.camera }, grid: GroundGrid { cfg: cfg.grid }, ..Self::new(figure) }
    }

    /// Load geometry then path. Failures are logged and reported, never fatal.
    pub fn load_assets(&mut self, assets: &AssetPaths) -> AssetStatus {
        let geometry = loader::load_geometry(&mut self.figure, &assets.torso, &assets.left_leg, &assets.right_leg);
        if let Err(e) = &geometry { log::error!("loading geometry: {e}"); }
        let path = loader::load_path(&mut self.figure, &assets.path);
        if let Err(e) = &path { log::error!("loading path: {e}"); }
        AssetStatus { geometry, path }
    }

    pub fn frame_index(&self) -> u64 { self.frame }

    pub fn tick(&mut self, delta: f32) { self.figure.update(delta); }

    /// Ground grid first, then the figure. Does not modify the scene.
    pub fn draw(&self, sink: &mut dyn RenderSink) {
        self.grid.draw(sink);
        self.figure.draw(sink);
    }

    /// One full frame: tick, then draw.
    pub fn frame(&mut self, delta: f32, sink: &mut dyn RenderSink) {
        self.tick(delta);
        self.draw(sink);
        self.frame += 1;
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let mut cmds: Vec<DrawCommand> = Vec::new();
        self.figure.draw(&mut cmds);
        let f = &self.figure;
        FrameSnapshot {
            frame: self.frame,
            time: f.time,
            path_t: f.path_t,
            heading_deg: f.heading(),
            position: f.position().to_array(),
            left_leg_deg: f.left_leg.angle,
            right_leg_deg: f.right_leg.angle,
            parts: render::poses(&cmds),
        }
    }
}
