// Triangle soup produced by the tessellator, plus its GPU-side layouts.
//
// Three parallel arrays indexed by triangle-vertex ordinal:
//   positions[i]       vertex position (w = 1)
//   smooth_normals[i]  per-vertex radial normal (w = 0), used for Phong
//   flat_normals[i]    per-triangle Newell normal (w = 0), used for Gouraud
// Every 3 consecutive entries form one triangle. No index buffer: triangles do
// not share vertices, which keeps the flat normals per-face.

use glam::Vec4;
use super::error::{GeometryError, GeometryResult};
use super::shape_state::ShadingMode;

// ============================================================================
// GPU VERTICES
// ============================================================================

/// Shaded-pass vertex: homogeneous position and the active normal field.
///   @location(0) position: vec4<f32>
///   @location(1) normal:   vec4<f32>
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 4],
    pub normal:   [f32; 4],
}

impl GpuVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Position-only vertex for line passes (wireframe overlay and the path loop).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 4],
}

impl LineVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Expand a closed loop into a line list: (p0,p1), (p1,p2), ..., (pn-1,p0).
pub fn line_loop(points: &[Vec4]) -> Vec<LineVertex> {
    let n = points.len();
    let mut out = Vec::with_capacity(n * 2);
    for i in 0..n {
        out.push(LineVertex { position: points[i].to_array() });
        out.push(LineVertex { position: points[(i + 1) % n].to_array() });
    }
    out
}

// ============================================================================
// MESH
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    positions:      Vec<Vec4>,
    smooth_normals: Vec<Vec4>,
    flat_normals:   Vec<Vec4>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a mesh from arrays built elsewhere, checking they are parallel
    /// and hold whole triangles. The tessellator appends through
    /// `push_triangle`, which keeps both properties by construction.
    pub fn from_parts(
        positions: Vec<Vec4>,
        smooth_normals: Vec<Vec4>,
        flat_normals: Vec<Vec4>,
    ) -> GeometryResult<Self> {
        if positions.len() != smooth_normals.len() || positions.len() != flat_normals.len() {
            return Err(GeometryError::MismatchedArrays {
                positions: positions.len(),
                smooth: smooth_normals.len(),
                flat: flat_normals.len(),
            });
        }
        if positions.len() % 3 != 0 {
            return Err(GeometryError::IncompleteTriangle(positions.len()));
        }
        Ok(Self { positions, smooth_normals, flat_normals })
    }

    /// Append one triangle with its per-vertex smooth normals and a single
    /// face normal shared by all three corners.
    pub fn push_triangle(&mut self, corners: [Vec4; 3], smooth: [Vec4; 3], flat: Vec4) {
        self.positions.extend_from_slice(&corners);
        self.smooth_normals.extend_from_slice(&smooth);
        self.flat_normals.extend_from_slice(&[flat; 3]);
    }

    pub fn positions(&self) -> &[Vec4] { &self.positions }
    pub fn smooth_normals(&self) -> &[Vec4] { &self.smooth_normals }
    pub fn flat_normals(&self) -> &[Vec4] { &self.flat_normals }

    pub fn triangle_count(&self) -> usize { self.positions.len() / 3 }

    /// Interleave positions with the normal field `shading` lights with.
    pub fn gpu_vertices(&self, shading: ShadingMode) -> Vec<GpuVertex> {
        self.positions.iter()
            .zip(shading.normals(self))
            .map(|(p, n)| GpuVertex {
                position: p.to_array(),
                normal:   n.to_array(),
            })
            .collect()
    }

    /// Outline of every triangle as a line list, 6 vertices per triangle.
    pub fn wireframe_lines(&self) -> Vec<LineVertex> {
        let mut out = Vec::with_capacity(self.positions.len() * 2);
        for tri in self.positions.chunks_exact(3) {
            out.extend(line_loop(tri));
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn unit_triangle() -> [Vec4; 3] {
        [
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn push_triangle_repeats_flat_normal() {
        let mut mesh = Mesh::new();
        let tri = unit_triangle();
        let face = Vec4::new(0.0, 0.0, 1.0, 0.0);
        mesh.push_triangle(tri, tri.map(|p| -p), face);

        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.flat_normals(), &[face; 3]);
        assert_eq!(mesh.smooth_normals()[1], -tri[1]);
    }

    #[test]
    fn from_parts_rejects_mismatched_lengths() {
        let tri = unit_triangle().to_vec();
        let result = Mesh::from_parts(tri.clone(), tri.clone(), tri[..2].to_vec());
        assert!(matches!(
            result,
            Err(GeometryError::MismatchedArrays { positions: 3, smooth: 3, flat: 2 })
        ));
    }

    #[test]
    fn from_parts_rejects_partial_triangles() {
        let pts = vec![Vec4::W; 4];
        let result = Mesh::from_parts(pts.clone(), pts.clone(), pts);
        assert_eq!(result, Err(GeometryError::IncompleteTriangle(4)));
    }

    #[test]
    fn from_parts_accepts_whole_triangles() {
        let tri = unit_triangle().to_vec();
        let mesh = Mesh::from_parts(tri.clone(), tri.clone(), tri.clone()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions(), &tri[..]);
    }

    #[test]
    fn gpu_vertices_interleave_selected_normals() {
        let mut mesh = Mesh::new();
        let tri = unit_triangle();
        mesh.push_triangle(tri, tri.map(|p| -p), Vec4::Z);

        let flat = mesh.gpu_vertices(ShadingMode::Gouraud);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[2].position, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(flat[2].normal, [0.0, 0.0, 1.0, 0.0]);

        let smooth = mesh.gpu_vertices(ShadingMode::Phong);
        assert_eq!(smooth.len(), 3);
        for (v, n) in smooth.iter().zip(mesh.smooth_normals()) {
            assert_eq!(v.normal, n.to_array());
        }
        assert_eq!(smooth[1].normal, [-1.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn wireframe_closes_each_triangle() {
        let mut mesh = Mesh::new();
        let tri = unit_triangle();
        mesh.push_triangle(tri, tri, Vec4::Z);
        mesh.push_triangle(tri, tri, Vec4::Z);

        let lines = mesh.wireframe_lines();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[5].position, tri[0].to_array());
    }

    #[test]
    fn line_loop_wraps() {
        let tri = unit_triangle();
        let lines = line_loop(&tri);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4].position, tri[2].to_array());
        assert_eq!(lines[5].position, tri[0].to_array());
    }
}
