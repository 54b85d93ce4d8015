//! Catmull-Rom evaluation over a closed loop of control points.

use crate::math::Vec3;

/// Minimum number of control points before a path can be followed.
pub const MIN_CONTROL_POINTS: usize = 4;

/// Sample the Catmull-Rom segment between `p1` and `p2` at `t`.
///
/// `p0` and `p3` only shape the tangents. `t = 0` returns `p1` and `t = 1`
/// returns `p2`; values outside `[0, 1]` extrapolate along the same cubic.
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Ordered control points treated as a closed loop: lookahead indices wrap
/// back to the start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlPath {
    points: Vec<Vec3>,
}

impl ControlPath {
    pub fn new(points: Vec<Vec3>) -> Self { Self { points } }

    pub fn points(&self) -> &[Vec3] { &self.points }

    pub fn len(&self) -> usize { self.points.len() }

    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// True once there are enough points for four-point interpolation.
    pub fn is_followable(&self) -> bool { self.points.len() >= MIN_CONTROL_POINTS }

    /// Length of the parameter range, `len - 3`. Zero when not followable.
    pub fn span(&self) -> f32 {
        if self.is_followable() { (self.points.len() - 3) as f32 } else { 0.0 }
    }

    /// Advance a path parameter and wrap it by one span when it runs past
    /// either end.
    ///
    /// Only a single span is added or subtracted per call, so an advance
    /// larger than the span leaves the parameter beyond the range. Window lookups stay in
    /// bounds regardless because every index is taken modulo the point count.
    pub fn advance(&self, path_t: f32, step: f32) -> f32 {
        let span = self.span();
        let next = path_t + step;
        if next > span {
            next - span
        } else if next < 0.0 {
            next + span
        } else {
            next
        }
    }

    /// The four points around segment `idx`, each index taken modulo the
    /// point count. `None` for an empty path.
    pub fn window(&self, idx: usize) -> Option<[Vec3; 4]> {
        let n = self.points.len();
        if n == 0 { return None; }
        let base = idx % n;
        let at = |k: usize| self.points[(base + k) % n];
        Some([at(0), at(1), at(2), at(3)])
    }

    /// Split `path_t` into its segment index and local parameter.
    pub fn locate(path_t: f32) -> (usize, f32) {
        let idx = path_t.max(0.0).trunc();
        (idx as usize, path_t - idx)
    }

    /// Position at `path_t`, or `None` while the path is not followable.
    pub fn sample(&self, path_t: f32) -> Option<Vec3> {
        if !self.is_followable() { return None; }
        let (idx, t) = Self::locate(path_t);
        let [p0, p1, p2, p3] = self.window(idx)?;
        Some(catmull_rom(p0, p1, p2, p3, t))
    }
}

impl From<Vec<Vec3>> for ControlPath {
    fn from(points: Vec<Vec3>) -> Self { Self::new(points) }
}
