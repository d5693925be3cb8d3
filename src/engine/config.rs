// Viewer tunables. Everything the render loop and input handler need that is
// not geometry lives here, so tests and the binary share one source of truth.

use glam::{Vec3, Vec4};

/// Light and material terms for the shaded passes.
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    /// w = 0 marks a directional light.
    pub light_position:    Vec4,
    pub light_ambient:     Vec4,
    pub light_diffuse:     Vec4,
    pub light_specular:    Vec4,
    pub material_ambient:  Vec4,
    pub material_diffuse:  Vec4,
    pub material_specular: Vec4,
    pub shininess:         f32,
}

impl Lighting {
    pub fn ambient_product(&self) -> Vec4 { self.light_ambient * self.material_ambient }
    pub fn diffuse_product(&self) -> Vec4 { self.light_diffuse * self.material_diffuse }
    pub fn specular_product(&self) -> Vec4 { self.light_specular * self.material_specular }
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            light_position:    Vec4::new(30.0, 10.0, 10.0, 0.0),
            light_ambient:     Vec4::new(0.2, 0.2, 0.2, 1.0),
            light_diffuse:     Vec4::ONE,
            light_specular:    Vec4::ONE,
            material_ambient:  Vec4::new(1.0, 0.0, 1.0, 1.0),
            material_diffuse:  Vec4::new(1.0, 0.8, 0.0, 1.0),
            material_specular: Vec4::ONE,
            shininess:         20.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Mesh subdivision level at startup.
    pub initial_mesh_level: u32,
    /// Path subdivision level at startup.
    pub initial_path_level: u32,
    /// Upper bound for the mesh level (4^n triangle growth).
    pub max_mesh_level: u32,
    /// Upper bound for the path level (2^n point growth).
    pub max_path_level: u32,

    /// Path parameter advance per frame. One lap = 1 / step frames.
    pub animation_step: f32,
    /// Mesh spin about Y per frame, in degrees.
    pub spin_step_deg: f32,
    /// Uniform scale applied to the unit-sized mesh.
    pub mesh_scale: f32,

    /// Eye position in the default (fixed) camera mode.
    pub eye: Vec3,
    /// Eye position in follow mode, which looks at the mesh.
    pub follow_eye: Vec3,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,

    pub clear_color: wgpu::Color,
    /// Colour of the path loop and the wireframe overlay.
    pub line_color: Vec4,
    pub lighting: Lighting,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_mesh_level: 4,
            initial_path_level: 0,
            max_mesh_level: 7,
            max_path_level: 10,
            animation_step: 0.001,
            spin_step_deg: 0.2,
            mesh_scale: 2.0,
            eye: Vec3::new(0.0, 0.0, 20.0),
            follow_eye: Vec3::new(0.0, 0.0, 5.0),
            fov_deg: 50.0,
            near: 0.1,
            far: 40.0,
            clear_color: wgpu::Color::BLACK,
            line_color: Vec4::ONE,
            lighting: Lighting::default(),
        }
    }
}

impl ViewerConfig {
    /// Step a level by `delta`, keeping it inside `[0, max]`.
    pub fn step_level(current: u32, delta: i32, max: u32) -> u32 {
        (current as i64 + delta as i64).clamp(0, max as i64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_level_clamps_both_ends() {
        assert_eq!(ViewerConfig::step_level(0, -1, 7), 0);
        assert_eq!(ViewerConfig::step_level(3, 1, 7), 4);
        assert_eq!(ViewerConfig::step_level(7, 1, 7), 7);
    }

    #[test]
    fn initial_levels_within_caps() {
        let cfg = ViewerConfig::default();
        assert!(cfg.initial_mesh_level <= cfg.max_mesh_level);
        assert!(cfg.initial_path_level <= cfg.max_path_level);
    }

    #[test]
    fn lighting_products_are_componentwise() {
        let l = Lighting::default();
        assert_eq!(l.ambient_product(), Vec4::new(0.2, 0.0, 0.2, 1.0));
        assert_eq!(l.diffuse_product(), Vec4::new(1.0, 0.8, 0.0, 1.0));
    }
}
