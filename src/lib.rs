// Procedural geometry for the path viewer: Chaikin-refined motion paths and
// geodesic tessellation of a tetrahedron or cube.

pub mod engine;
