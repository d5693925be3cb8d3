// Chaikin corner-cutting for closed polygons.
//
// Each pass replaces every edge (a, b) of the loop with two points at 1/4 and
// 3/4 along it. The last vertex pairs with the first, so the result stays a
// closed loop and each pass exactly doubles the point count:
//   6 points → 12 → 24 → 48 ...

use glam::Vec4;

/// Weights of the two points cut from each edge.
const CUT_NEAR: f32 = 0.25;
const CUT_FAR: f32 = 0.75;

/// One corner-cutting pass over a closed loop.
fn chaikin_pass(points: &[Vec4]) -> Vec<Vec4> {
    let n = points.len();
    let mut out = Vec::with_capacity(n * 2);
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % n];
        out.push(a.lerp(b, CUT_NEAR));
        out.push(a.lerp(b, CUT_FAR));
    }
    out
}

/// Refine a closed polygon with `levels` passes of Chaikin subdivision.
/// `levels = 0` returns a copy of the input.
pub fn chaikin(polygon: &[Vec4], levels: u32) -> Vec<Vec4> {
    let mut current = polygon.to_vec();
    for _ in 0..levels {
        current = chaikin_pass(&current);
    }
    current
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec4> {
        vec![
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(4.0, 0.0, 0.0, 1.0),
            Vec4::new(4.0, 4.0, 0.0, 1.0),
            Vec4::new(0.0, 4.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn zero_levels_is_identity() {
        let p = square();
        assert_eq!(chaikin(&p, 0), p);
    }

    #[test]
    fn each_level_doubles_point_count() {
        let p = square();
        for n in 0..6 {
            assert_eq!(chaikin(&p, n).len(), p.len() << n);
        }
    }

    #[test]
    fn closing_edge_is_cut() {
        let out = chaikin(&square(), 1);
        // Last pair comes from the edge (0,4) → (0,0).
        assert_eq!(out[6], Vec4::new(0.0, 3.0, 0.0, 1.0));
        assert_eq!(out[7], Vec4::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn homogeneous_weight_is_kept() {
        for p in chaikin(&square(), 3) {
            assert_eq!(p.w, 1.0);
        }
    }

    #[test]
    fn empty_polygon_stays_empty() {
        assert!(chaikin(&[], 3).is_empty());
    }
}
