// CONTROLLER: input, edits and the per-frame update
pub mod input;
pub mod camera_controller;
pub mod block_editor;
pub mod game;

pub use input::{InputEvent, InputQueue, InputState, Key, KeyBindings, MouseButton, MoveKey};
pub use camera_controller::CameraController;
pub use block_editor::{BlockEditor, EditAction};
pub use game::Game;
