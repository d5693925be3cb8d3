// Geodesic tessellation of a tetrahedron or cube.
//
// Each base face is split recursively into 4 triangles at the edge midpoints.
// New midpoints are pushed out to the unit sphere, so repeated levels turn the
// flat polyhedron into a sphere approximation:
//
//             a
//            /\
//       ab  /__\  ac
//          /\  /\
//         /__\/__\
//        b   bc   c
//
// Triangle count after n levels: base_triangles * 4^n
//   Tetrahedron: 4 → 16 → 64 → 256 → 1024
//   Cube:       12 → 48 → 192 → 768 → 3072

use glam::{Vec3, Vec4};
use super::mesh::Mesh;

// ============================================================================
// BASE SHAPES
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BaseShape {
    #[default]
    Tetrahedron,
    Cube,
}

impl BaseShape {
    pub fn toggled(self) -> Self {
        match self {
            Self::Tetrahedron => Self::Cube,
            Self::Cube => Self::Tetrahedron,
        }
    }

    /// Number of triangles before any subdivision.
    pub fn base_triangles(self) -> usize {
        match self {
            Self::Tetrahedron => 4,
            Self::Cube => 12,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Tetrahedron => "tetrahedron",
            Self::Cube => "cube",
        }
    }
}

/// Regular tetrahedron inscribed in the unit sphere.
const TETRA_A: Vec4 = Vec4::new(0.0, 0.0, -1.0, 1.0);
const TETRA_B: Vec4 = Vec4::new(0.0, 0.942809, 0.333333, 1.0);
const TETRA_C: Vec4 = Vec4::new(-0.816497, -0.471405, 0.333333, 1.0);
const TETRA_D: Vec4 = Vec4::new(0.816497, -0.471405, 0.333333, 1.0);

/// Axis-aligned unit cube centred on the origin.
const CUBE: [Vec4; 8] = [
    Vec4::new(-0.5, -0.5,  0.5, 1.0), // 0 front-bottom-left
    Vec4::new(-0.5,  0.5,  0.5, 1.0), // 1 front-top-left
    Vec4::new( 0.5,  0.5,  0.5, 1.0), // 2 front-top-right
    Vec4::new( 0.5, -0.5,  0.5, 1.0), // 3 front-bottom-right
    Vec4::new(-0.5, -0.5, -0.5, 1.0), // 4 back-bottom-left
    Vec4::new(-0.5,  0.5, -0.5, 1.0), // 5 back-top-left
    Vec4::new( 0.5,  0.5, -0.5, 1.0), // 6 back-top-right
    Vec4::new( 0.5, -0.5, -0.5, 1.0), // 7 back-bottom-right
];

/// Corner quadruples of the six cube faces.
const CUBE_QUADS: [[usize; 4]; 6] = [
    [0, 1, 2, 3], // front
    [1, 0, 4, 5], // left
    [7, 6, 5, 4], // back
    [3, 2, 6, 7], // right
    [2, 1, 5, 6], // top
    [0, 3, 7, 4], // bottom
];

// ============================================================================
// NORMALS
// ============================================================================

/// Newell face normal of a triangle: (p1 - p0) × (p2 - p1).
/// Not normalized; magnitude is twice the triangle area. w = 0.
pub fn newell(p0: Vec4, p1: Vec4, p2: Vec4) -> Vec4 {
    let u = (p1 - p0).truncate();
    let v = (p2 - p1).truncate();
    u.cross(v).extend(0.0)
}

/// Radial normal used for smooth shading: the vertex position negated, w = 0.
fn radial(p: Vec4) -> Vec4 {
    (-p.truncate()).extend(0.0)
}

/// Midpoint of `a` and `b` with the direction pushed onto the unit sphere.
/// The homogeneous weight is interpolated, not normalized.
fn sphere_midpoint(a: Vec4, b: Vec4) -> Vec4 {
    let mid = a.lerp(b, 0.5);
    let dir: Vec3 = mid.truncate().normalize_or_zero();
    dir.extend(mid.w)
}

// ============================================================================
// RECURSIVE SUBDIVISION
// ============================================================================

fn emit_triangle(mesh: &mut Mesh, a: Vec4, b: Vec4, c: Vec4) {
    mesh.push_triangle([a, b, c], [radial(a), radial(b), radial(c)], newell(a, b, c));
}

/// Split (a, b, c) `depth` times, appending the leaf triangles to `mesh`.
fn divide(mesh: &mut Mesh, a: Vec4, b: Vec4, c: Vec4, depth: u32) {
    if depth == 0 {
        emit_triangle(mesh, a, b, c);
        return;
    }
    let ab = sphere_midpoint(a, b);
    let ac = sphere_midpoint(a, c);
    let bc = sphere_midpoint(b, c);

    divide(mesh, a, ab, ac, depth - 1);
    divide(mesh, ab, b, bc, depth - 1);
    divide(mesh, bc, c, ac, depth - 1);
    divide(mesh, ab, bc, ac, depth - 1);
}

fn tetrahedron(mesh: &mut Mesh, depth: u32) {
    let (a, b, c, d) = (TETRA_A, TETRA_B, TETRA_C, TETRA_D);
    divide(mesh, a, b, c, depth);
    divide(mesh, d, c, b, depth);
    divide(mesh, a, d, b, depth);
    divide(mesh, a, c, d, depth);
}

/// Quad (p0, p1, p2, p3) split along the 0–2 diagonal.
fn quad(mesh: &mut Mesh, [p0, p1, p2, p3]: [Vec4; 4], depth: u32) {
    divide(mesh, p0, p2, p1, depth);
    divide(mesh, p0, p3, p2, depth);
}

fn cube(mesh: &mut Mesh, depth: u32) {
    for face in CUBE_QUADS {
        quad(mesh, face.map(|i| CUBE[i]), depth);
    }
}

/// Tessellate `shape` at `level` into a fresh mesh.
pub fn tessellate(shape: BaseShape, level: u32) -> Mesh {
    let mut mesh = Mesh::new();
    match shape {
        BaseShape::Tetrahedron => tetrahedron(&mut mesh, level),
        BaseShape::Cube => cube(&mut mesh, level),
    }
    mesh
}

// ============================================================================
// TESSELLATOR
// ============================================================================

/// Owns a base shape, a level, and the mesh derived from them.
/// Any change rebuilds the mesh from the base vertices.
pub struct Tessellator {
    shape: BaseShape,
    level: u32,
    mesh:  Mesh,
}

impl Tessellator {
    /// Build the mesh for `shape` at `level`. Negative levels clamp to 0,
    /// as in `set_subdivisions`.
    pub fn new(shape: BaseShape, level: i32) -> Self {
        let mut t = Self { shape, level: 0, mesh: Mesh::new() };
        t.set_subdivisions(level);
        t
    }

    /// Set the subdivision level and rebuild. Negative levels clamp to 0.
    pub fn set_subdivisions(&mut self, n: i32) {
        self.level = n.max(0) as u32;
        self.rebuild();
    }

    /// Swap tetrahedron ↔ cube and rebuild.
    pub fn switch_shape(&mut self) {
        self.shape = self.shape.toggled();
        self.rebuild();
    }

    pub fn set_shape(&mut self, shape: BaseShape) {
        if shape != self.shape {
            self.shape = shape;
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        self.mesh = tessellate(self.shape, self.level);
        log::debug!(
            "tessellated {} level {} -> {} triangles",
            self.shape.name(),
            self.level,
            self.mesh.triangle_count()
        );
    }

    pub fn shape(&self) -> BaseShape { self.shape }
    pub fn level(&self) -> u32 { self.level }
    pub fn mesh(&self) -> &Mesh { &self.mesh }

    pub fn positions(&self) -> &[Vec4] { self.mesh.positions() }
    pub fn smooth_normals(&self) -> &[Vec4] { self.mesh.smooth_normals() }
    pub fn flat_normals(&self) -> &[Vec4] { self.mesh.flat_normals() }

    pub fn triangle_count(&self) -> usize { self.mesh.triangle_count() }
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new(BaseShape::default(), 0)
    }
}
