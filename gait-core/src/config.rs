//! Scene configuration loaded from YAML. Every section is optional.

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

use crate::figure::Figure;
use crate::gait::{GaitParams, TorsoTuning};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub assets: AssetPaths,
    pub motion: Motion,
    pub torso: TorsoTuning,
    pub gait: GaitParams,
    pub camera: CameraConfig,
    pub grid: GridConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub torso: PathBuf,
    pub left_leg: PathBuf,
    pub right_leg: PathBuf,
    pub path: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            torso: "torso.txt".into(),
            left_leg: "left_leg.txt".into(),
            right_leg: "right_leg.txt".into(),
            path: "path.txt".into(),
        }
    }
}

impl AssetPaths {
    /// Resolve relative paths against `base`.
    pub fn relative_to(&self, base: &std::path::Path) -> Self {
        let join = |p: &PathBuf| if p.is_absolute() { p.clone() } else { base.join(p) };
        Self {
            torso: join(&self.torso),
            left_leg: join(&self.left_leg),
            right_leg: join(&self.right_leg),
            path: join(&self.path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Motion {
    pub speed: f32,
}

impl Default for Motion {
    fn default() -> Self { Self { speed: 1.0 } }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position relative to the figure.
    pub offset: [f32; 3],
    /// Height of the look-at point above the ground.
    pub target_height: f32,
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { offset: [0.0, 5.0, 15.0], target_height: 1.0, fov_y_deg: 45.0, near: 0.1, far: 100.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub half_extent: f32,
    pub step: f32,
}

impl Default for GridConfig {
    fn default() -> Self { Self { half_extent: 20.0, step: 1.0 } }
}

impl SceneConfig {
    /// Copy motion and tuning values onto a figure. Geometry and path come
    /// from the asset files, not from here.
    pub fn apply(&self, figure: &mut Figure) {
        figure.speed = self.motion.speed;
        figure.tuning = self.torso;
        figure.gait = self.gait;
    }
}

pub fn load_from_yaml_str(s: &str) -> Result<SceneConfig> {
    let cfg: SceneConfig = serde_yaml::from_str(s)?;
    Ok(cfg)
}

pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<SceneConfig> {
    let data = std::fs::read_to_string(path)?;
    load_from_yaml_str(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = load_from_yaml_str("motion:\n  speed: 2.0\ntorso:\n  lean_amplitude: 8.0\n").unwrap();
        assert_eq!(cfg.motion.speed, 2.0);
        assert_eq!(cfg.torso.lean_amplitude, 8.0);
        assert_eq!(cfg.torso.sway_amplitude, 0.1);
        assert_eq!(cfg.gait.leg_amplitude_deg, 30.0);
        assert_eq!(cfg.assets.path, PathBuf::from("path.txt"));
        assert_eq!(cfg.camera.offset, [0.0, 5.0, 15.0]);
    }

    #[test]
    fn empty_document_is_default() {
        let cfg = load_from_yaml_str("{}").unwrap();
        assert_eq!(cfg.grid, GridConfig::default());
        assert_eq!(cfg.assets, AssetPaths::default());
    }

    #[test]
    fn apply_sets_motion_and_tuning() {
        let cfg = load_from_yaml_str("motion: { speed: 0.5 }\ngait: { cadence_per_speed: 2.0 }\n").unwrap();
        let mut f = Figure::new();
        cfg.apply(&mut f);
        assert_eq!(f.speed, 0.5);
        assert_eq!(f.sway_frequency(), 1.0);
    }

    #[test]
    fn relative_assets_join_base() {
        let assets = AssetPaths { path: "/abs/path.txt".into(), ..AssetPaths::default() };
        let resolved = assets.relative_to(std::path::Path::new("/data"));
        assert_eq!(resolved.torso, PathBuf::from("/data/torso.txt"));
        assert_eq!(resolved.path, PathBuf::from("/abs/path.txt"));
    }

    #[test]
    fn bad_yaml_is_an_error() {
        assert!(load_from_yaml_str("motion: [1, 2").is_err());
    }
}
