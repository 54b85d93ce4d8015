//! Plain-text geometry and path sources.
//!
//! Geometry: `length width`. Path: a spacing value followed by any number of
//! `x y z` triples. Tokens are whitespace separated; reading stops at the
//! first token that is not a number, and whatever was read up to that point
//! is kept.

use std::path::Path;

use crate::error::LoadError;
use crate::figure::Figure;
use crate::math::Vec3;
use crate::part::{Dimensions, Part};
use crate::spline::ControlPath;

/// Leading numeric tokens of `text`.
pub fn numbers(text: &str) -> impl Iterator<Item = f32> + '_ {
    text.split_whitespace().map_while(|tok| tok.parse::<f32>().ok())
}

/// `None` unless both values are present.
pub fn parse_dimensions(text: &str) -> Option<Dimensions> {
    let mut it = numbers(text);
    Some(Dimensions { length: it.next()?, width: it.next()? })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    /// `None` when the first token is missing or not a number; no points are
    /// read in that case.
    pub spacing: Option<f32>,
    pub points: Vec<Vec3>,
}

pub fn parse_path(text: &str) -> PathData {
    let mut it = numbers(text);
    let Some(spacing) = it.next() else { return PathData::default() };
    let mut points = Vec::new();
    while let (Some(x), Some(y), Some(z)) = (it.next(), it.next(), it.next()) {
        points.push(Vec3::new(x, y, z));
    }
    PathData { spacing: Some(spacing), points }
}

/// Read a whole source. Only a failure to open or read is an error; bytes
/// that are not UTF-8 are replaced and left to the parser.
pub fn read_source(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path)
        .map_err(|source| LoadError::Unavailable { path: path.to_path_buf(), source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn load_part(part: &mut Part, path: &Path) -> Result<(), LoadError> {
    let text = read_source(path)?;
    match parse_dimensions(&text) {
        Some(dims) => {
            log::debug!("{}: length={} width={}", path.display(), dims.length, dims.width);
            part.set_dimensions(dims);
        }
        None => log::warn!("{}: expected `length width`, keeping {:?}", path.display(), part.dimensions()),
    }
    Ok(())
}

/// Load torso, left leg and right leg dimensions, in that order.
///
/// Stops at the first source that cannot be opened. Parts loaded before the
/// failure keep their new dimensions.
pub fn load_geometry(
    figure: &mut Figure,
    torso: impl AsRef<Path>,
    left_leg: impl AsRef<Path>,
    right_leg: impl AsRef<Path>,
) -> Result<(), LoadError> {
    load_part(&mut figure.torso, torso.as_ref())?;
    load_part(&mut figure.left_leg, left_leg.as_ref())?;
    load_part(&mut figure.right_leg, right_leg.as_ref())?;
    Ok(())
}

/// Load the spacing value and control points, replacing any previous points.
/// Fewer than four points is accepted; the figure just won't move.
pub fn load_path(figure: &mut Figure, path: impl AsRef<Path>) -> Result<(), LoadError> {
    let path = path.as_ref();
    let data = parse_path(&read_source(path)?);
    match data.spacing {
        Some(spacing) => figure.path_spacing = spacing,
        None => log::warn!("{}: missing spacing value", path.display()),
    }
    if data.points.len() < crate::spline::MIN_CONTROL_POINTS {
        log::warn!("{}: only {} control points, path will not be followed", path.display(), data.points.len());
    }
    figure.set_path(ControlPath::new(data.points));
    Ok(())
}
