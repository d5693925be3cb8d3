// Closed motion path: a control polygon refined by Chaikin subdivision and
// sampled as a periodic piecewise-linear curve.

use glam::Vec4;
use super::curve::chaikin;
use super::error::{GeometryError, GeometryResult};

/// Control points of the default path (z = 0 plane, w = 1).
pub const DEFAULT_CONTROL_POINTS: [[f32; 3]; 6] = [
    [-8.0,  8.0, 0.0],
    [ 2.0,  4.0, 0.0],
    [ 6.0,  6.0, 0.0],
    [10.0, -8.0, 0.0],
    [ 2.0, -2.0, 0.0],
    [-6.0, -2.0, 0.0],
];

pub struct PathSampler {
    control: Vec<Vec4>,
    level: u32,
    /// `chaikin(control, level)`. Replaced wholesale whenever `level` changes.
    refined: Vec<Vec4>,
}

impl PathSampler {
    /// Build a sampler at subdivision level 0.
    /// Fails if `control` is empty, since there would be nothing to sample.
    pub fn new(control: Vec<Vec4>) -> GeometryResult<Self> {
        if control.is_empty() {
            return Err(GeometryError::EmptyPolygon);
        }
        Ok(Self::from_control(control))
    }

    /// Shared constructor; `control` is known to be non-empty.
    fn from_control(control: Vec<Vec4>) -> Self {
        let refined = control.clone();
        Self { control, level: 0, refined }
    }

    /// Set the subdivision level and rebuild the refined polygon.
    /// Negative levels clamp to 0.
    pub fn set_subdivisions(&mut self, n: i32) {
        self.level = n.max(0) as u32;
        self.refined = chaikin(&self.control, self.level);
        log::debug!("path level {} -> {} points", self.level, self.refined.len());
    }

    /// Point at normalized position `pos` along the path.
    ///
    /// The path has period 1: `pos` and `pos + k` map to the same point for any
    /// integer `k`, and negative positions wrap forward.
    pub fn point_at(&self, pos: f32) -> Vec4 {
        let m = self.refined.len();
        // Wrap into [0, 1] before scaling so huge or negative positions
        // never reach an integer cast out of range.
        let x = pos.rem_euclid(1.0) * m as f32;
        let i = x.floor();
        let frac = x - i;
        // Rounding in rem_euclid can land exactly on m.
        let i = i as usize % m;
        let a = self.refined[i];
        let b = self.refined[(i + 1) % m];
        a.lerp(b, frac)
    }

    pub fn level(&self) -> u32 { self.level }

    pub fn control_points(&self) -> &[Vec4] { &self.control }

    /// Refined points in loop order, ready for a line-loop draw.
    pub fn points(&self) -> &[Vec4] { &self.refined }
}

impl Default for PathSampler {
    fn default() -> Self {
        Self::from_control(
            DEFAULT_CONTROL_POINTS
                .iter()
                .map(|&[x, y, z]| Vec4::new(x, y, z, 1.0))
                .collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec4_eq(a: Vec4, b: Vec4) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-4);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-4);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-4);
        assert_relative_eq!(a.w, b.w, epsilon = 1e-4);
    }

    #[test]
    fn empty_control_polygon_is_rejected() {
        assert!(matches!(PathSampler::new(Vec::new()), Err(GeometryError::EmptyPolygon)));
    }

    #[test]
    fn default_path_level_one() {
        let mut path = PathSampler::default();
        path.set_subdivisions(1);

        let p0 = Vec4::new(-8.0, 8.0, 0.0, 1.0);
        let p1 = Vec4::new(2.0, 4.0, 0.0, 1.0);
        assert_eq!(path.points().len(), 12);
        assert_vec4_eq(path.points()[0], p0.lerp(p1, 0.25));
        assert_vec4_eq(path.points()[1], p0.lerp(p1, 0.75));
    }

    #[test]
    fn negative_level_clamps_to_zero() {
        let mut path = PathSampler::default();
        path.set_subdivisions(3);
        path.set_subdivisions(-2);
        assert_eq!(path.level(), 0);
        assert_eq!(path.points(), path.control_points());
    }

    #[test]
    fn level_is_recomputed_from_control_polygon() {
        let mut path = PathSampler::default();
        path.set_subdivisions(3);
        path.set_subdivisions(2);
        assert_eq!(path.points().len(), 6 * 4);
    }

    #[test]
    fn start_and_end_coincide() {
        let mut path = PathSampler::default();
        for n in 0..4 {
            path.set_subdivisions(n);
            assert_vec4_eq(path.point_at(0.0), path.point_at(1.0));
        }
    }

    #[test]
    fn samples_hit_control_points_at_level_zero() {
        let path = PathSampler::default();
        let pts = path.control_points().to_vec();
        for (k, &p) in pts.iter().enumerate() {
            assert_vec4_eq(path.point_at(k as f32 / 6.0), p);
        }
    }

    #[test]
    fn interpolates_between_points() {
        let path = PathSampler::default();
        let p0 = Vec4::new(-8.0, 8.0, 0.0, 1.0);
        let p1 = Vec4::new(2.0, 4.0, 0.0, 1.0);
        assert_vec4_eq(path.point_at(0.5 / 6.0), p0.lerp(p1, 0.5));
    }

    #[test]
    fn negative_and_large_positions_wrap() {
        let path = PathSampler::default();
        assert_vec4_eq(path.point_at(-0.25), path.point_at(0.75));
        assert_vec4_eq(path.point_at(2.4), path.point_at(0.4));
    }

    #[test]
    fn extreme_positions_stay_on_path() {
        let mut path = PathSampler::default();
        path.set_subdivisions(2);
        let pts = path.points();
        for pos in [1.0e19, -1.0e19, f32::MAX, f32::MIN] {
            let p = path.point_at(pos);
            assert!(p.is_finite(), "pos {pos} gave {p}");
            // Any sample lies on some segment of the refined loop, so it
            // stays inside the loop's bounding box.
            let (lo, hi) = pts.iter().fold((pts[0], pts[0]), |(lo, hi), &q| (lo.min(q), hi.max(q)));
            assert!(p.cmpge(lo - Vec4::splat(1e-3)).all() && p.cmple(hi + Vec4::splat(1e-3)).all());
        }
    }

    #[test]
    fn default_matches_explicit_construction() {
        let control = DEFAULT_CONTROL_POINTS
            .iter()
            .map(|&[x, y, z]| Vec4::new(x, y, z, 1.0))
            .collect();
        let explicit = PathSampler::new(control).unwrap();
        let default = PathSampler::default();
        assert_eq!(explicit.points(), default.points());
        assert_eq!(explicit.level(), default.level());
    }

    #[test]
    fn single_point_path_is_constant() {
        let p = Vec4::new(1.0, 2.0, 3.0, 1.0);
        let path = PathSampler::new(vec![p]).unwrap();
        assert_vec4_eq(path.point_at(0.3), p);
        assert_vec4_eq(path.point_at(-7.9), p);
    }
}
