use tracing::{debug, info};

use crate::config::AppConfig;
use crate::model::{Block, BlockPos, Camera, VoxelGrid};

use super::block_editor::{BlockEditor, EditAction};
use super::camera_controller::CameraController;
use super::input::{InputEvent, InputQueue, InputState, Key, MouseButton};

/// Owned game context: world, camera and the input consumed each frame.
pub struct Game {
    pub grid: VoxelGrid,
    pub camera: Camera,
    pub controller: CameraController,
    pub editor: BlockEditor,
    pub input: InputState,
    pub queue: InputQueue,
    pointer_captured: bool,
    exit_requested: bool,
}

impl Game {
    pub fn new(config: &AppConfig) -> Self {
        let grid = VoxelGrid::with_platform(config.platform_radius, config.platform_y, Block::Textured);
        info!(blocks = grid.len(), "generated startup platform");

        let mut camera = Camera::new(config.width, config.height);
        camera.fov_y = config.fov_y;

        Self {
            grid,
            camera,
            controller: CameraController::new(config.move_speed, config.mouse_sensitivity),
            editor: BlockEditor::new(Block::Textured),
            input: InputState::new(),
            queue: InputQueue::new(),
            pointer_captured: false,
            exit_requested: false,
        }
    }

    /// Queue an event from a platform callback.
    pub fn push_event(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    pub fn on_pointer_delta(&mut self, dx: f32, dy: f32) {
        self.push_event(InputEvent::PointerDelta { dx, dy });
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        self.push_event(InputEvent::MouseButton { button, pressed });
    }

    /// Drain queued input, then move for every held key.
    pub fn update_frame(&mut self) {
        let events: Vec<InputEvent> = self.queue.drain().collect();
        for event in events {
            self.handle_event(event);
        }
        self.controller.update_movement(&mut self.camera, &self.input);
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(Key::Move(key)) => self.input.press(key),
            InputEvent::KeyUp(Key::Move(key)) => self.input.release(key),
            InputEvent::KeyDown(Key::Escape) | InputEvent::ExitRequested => {
                self.exit_requested = true;
            }
            InputEvent::KeyUp(Key::Escape) => {}
            InputEvent::PointerDelta { dx, dy } => {
                if self.pointer_captured {
                    self.controller.on_pointer_delta(&mut self.camera, dx, dy);
                }
            }
            InputEvent::MouseButton { button, pressed: true } => {
                if let Some(action) = EditAction::from_button(button) {
                    self.edit(action);
                }
            }
            InputEvent::MouseButton { pressed: false, .. } => {}
            InputEvent::PointerCaptured(captured) => {
                debug!(captured, "pointer capture changed");
                if captured && !self.pointer_captured {
                    self.controller.reset_pointer();
                }
                self.pointer_captured = captured;
            }
            InputEvent::FocusLost => self.input.clear_keys(),
        }
    }

    fn edit(&mut self, action: EditAction) -> Option<BlockPos> {
        let direction = self.camera.forward();
        self.editor.apply(&mut self.grid, self.camera.eye, direction, action)
    }

    /// Cell under the crosshair that a destroy would remove.
    pub fn target(&self) -> Option<BlockPos> {
        BlockEditor::target(&self.grid, self.camera.eye, self.camera.forward())
    }

    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
