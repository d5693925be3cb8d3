// Rendering-mode selector: which passes to draw and which normals to bind.
// Three independent axes, each toggled by one key. The renderer reads it every
// frame; only a shape change requires the tessellator to rebuild.

use glam::Vec4;
use super::mesh::Mesh;
use super::tessellate::BaseShape;

/// How many wireframe passes accompany the shaded mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WireframeLevel {
    /// Shaded only.
    #[default]
    Shaded,
    /// Shaded with a wireframe overlay.
    ShadedWireframe,
    /// Wireframe only.
    Wireframe,
}

impl WireframeLevel {
    /// Shaded → ShadedWireframe → Wireframe → Shaded.
    pub fn next(self) -> Self {
        match self {
            Self::Shaded => Self::ShadedWireframe,
            Self::ShadedWireframe => Self::Wireframe,
            Self::Wireframe => Self::Shaded,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Self::Shaded => 0,
            Self::ShadedWireframe => 1,
            Self::Wireframe => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShadingMode {
    /// Lighting evaluated per vertex against the flat (Newell) normals.
    #[default]
    Gouraud,
    /// Lighting evaluated per fragment against the smooth (radial) normals.
    Phong,
}

impl ShadingMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Gouraud => Self::Phong,
            Self::Phong => Self::Gouraud,
        }
    }

    /// The normal field this mode binds.
    pub fn normals(self, mesh: &Mesh) -> &[Vec4] {
        match self {
            Self::Gouraud => mesh.flat_normals(),
            Self::Phong => mesh.smooth_normals(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Gouraud => "Gouraud",
            Self::Phong => "Phong",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeState {
    pub wireframe: WireframeLevel,
    pub shading:   ShadingMode,
    pub shape:     BaseShape,
}

impl ShapeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cycle_wireframe(&mut self) -> WireframeLevel {
        self.wireframe = self.wireframe.next();
        self.wireframe
    }

    pub fn toggle_shading(&mut self) -> ShadingMode {
        self.shading = self.shading.toggled();
        self.shading
    }

    /// Flip the base shape. The caller must rebuild its tessellator with the
    /// returned shape.
    pub fn toggle_shape(&mut self) -> BaseShape {
        self.shape = self.shape.toggled();
        self.shape
    }

    pub fn draws_shaded(&self) -> bool {
        self.wireframe != WireframeLevel::Wireframe
    }

    pub fn draws_wireframe(&self) -> bool {
        self.wireframe != WireframeLevel::Shaded
    }

    /// Short mode tag shown in the HUD, e.g. "(Phong + WF)".
    pub fn label(&self) -> String {
        match self.wireframe {
            WireframeLevel::Wireframe => "(Wireframe)".to_string(),
            WireframeLevel::ShadedWireframe => format!("({} + WF)", self.shading.name()),
            WireframeLevel::Shaded => format!("({})", self.shading.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::tessellate::tessellate;

    #[test]
    fn wireframe_cycles_with_period_three() {
        let mut state = ShapeState::new();
        assert_eq!(state.wireframe.index(), 0);
        assert_eq!(state.cycle_wireframe().index(), 1);
        assert_eq!(state.cycle_wireframe().index(), 2);
        assert_eq!(state.cycle_wireframe(), WireframeLevel::Shaded);
    }

    #[test]
    fn pass_selection_follows_wireframe_level() {
        let mut state = ShapeState::new();
        assert!(state.draws_shaded() && !state.draws_wireframe());
        state.cycle_wireframe();
        assert!(state.draws_shaded() && state.draws_wireframe());
        state.cycle_wireframe();
        assert!(!state.draws_shaded() && state.draws_wireframe());
    }

    #[test]
    fn axes_toggle_independently() {
        let mut state = ShapeState::new();
        state.cycle_wireframe();
        assert_eq!(state.toggle_shading(), ShadingMode::Phong);
        assert_eq!(state.toggle_shape(), BaseShape::Cube);
        assert_eq!(state.wireframe, WireframeLevel::ShadedWireframe);

        assert_eq!(state.toggle_shading(), ShadingMode::Gouraud);
        assert_eq!(state.toggle_shape(), BaseShape::Tetrahedron);
        assert_eq!(state.shading, ShadingMode::Gouraud);
    }

    #[test]
    fn labels() {
        let mut state = ShapeState::new();
        assert_eq!(state.label(), "(Gouraud)");
        state.toggle_shading();
        assert_eq!(state.label(), "(Phong)");
        state.cycle_wireframe();
        assert_eq!(state.label(), "(Phong + WF)");
        state.toggle_shading();
        assert_eq!(state.label(), "(Gouraud + WF)");
        state.cycle_wireframe();
        assert_eq!(state.label(), "(Wireframe)");
    }

    #[test]
    fn shading_mode_selects_normal_field() {
        let mesh = tessellate(BaseShape::Cube, 1);
        assert_eq!(ShadingMode::Gouraud.normals(&mesh), mesh.flat_normals());
        assert_eq!(ShadingMode::Phong.normals(&mesh), mesh.smooth_normals());
    }
}
