// Keyboard handling for the viewer.
// Abstracts winit key presses into a queue of viewer commands drained once per
// frame. Only fresh presses count; held-key repeats are ignored.

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MeshLevelUp,
    MeshLevelDown,
    PathLevelUp,
    PathLevelDown,
    CycleWireframe,
    ToggleShading,
    SwitchShape,
    ToggleAnimation,
    FlipCulling,
    ToggleFollow,
    ToggleOverlay,
}

/// Key bindings, in the order they are listed in the HUD.
pub const BINDINGS: &[(KeyCode, Command, &str)] = &[
    (KeyCode::KeyE, Command::MeshLevelUp,     "E/Q  mesh subdivisions +/-"),
    (KeyCode::KeyQ, Command::MeshLevelDown,   ""),
    (KeyCode::KeyI, Command::PathLevelUp,     "I/J  path subdivisions +/-"),
    (KeyCode::KeyJ, Command::PathLevelDown,   ""),
    (KeyCode::KeyW, Command::CycleWireframe,  "W    wireframe mode"),
    (KeyCode::KeyS, Command::ToggleShading,   "S    Gouraud / Phong"),
    (KeyCode::KeyR, Command::SwitchShape,     "R    tetrahedron / cube"),
    (KeyCode::KeyA, Command::ToggleAnimation, "A    pause animation"),
    (KeyCode::KeyD, Command::FlipCulling,     "D    flip face culling"),
    (KeyCode::KeyF, Command::ToggleFollow,    "F    follow mesh"),
    (KeyCode::F3,   Command::ToggleOverlay,   "F3   toggle HUD"),
];

pub fn command_for_key(key: KeyCode) -> Option<Command> {
    BINDINGS.iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, cmd, _)| *cmd)
}

pub struct InputState {
    pending: Vec<Command>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Feed a winit WindowEvent into the input state.
    pub fn process_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if event.state == ElementState::Pressed && !event.repeat {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(cmd) = command_for_key(key) {
                        self.pending.push(cmd);
                    }
                }
            }
        }
    }

    /// Take the commands queued since the last call, in press order.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
