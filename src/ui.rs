use egui::Context;
use winit::window::Window;

use crate::controller::Game;

/// Tessellated overlay ready for the renderer.
pub struct UiOutput {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// Frames-per-second over one-second windows
#[derive(Debug, Default)]
pub struct FrameStats {
    frame_count: u32,
    elapsed: f32,
    fps: f32,
}

impl FrameStats {
    pub fn tick(&mut self, dt: f32) {
        self.frame_count += 1;
        self.elapsed += dt;
        if self.elapsed >= 1.0 {
            self.fps = self.frame_count as f32 / self.elapsed;
            self.frame_count = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Text shown in the debug panel
pub fn debug_lines(game: &Game, fps: f32) -> Vec<String> {
    let eye = game.camera.eye;
    let target = match game.target() {
        Some(pos) => format!("{}, {}, {}", pos.0, pos.1, pos.2),
        None => "-".to_string(),
    };
    vec![
        format!("FPS: {fps:.0}"),
        format!("Pos: {:.1}, {:.1}, {:.1}", eye.x, eye.y, eye.z),
        format!("Yaw: {:.1} Pitch: {:.1}", game.camera.yaw, game.camera.pitch),
        format!("Blocks: {}", game.grid.len()),
        format!("Target: {target}"),
    ]
}

/// Read-only egui overlay: crosshair plus a debug panel.
pub struct DebugOverlay {
    ctx: Context,
    state: egui_winit::State,
    pub stats: FrameStats,
}

impl DebugOverlay {
    pub fn new(window: &Window) -> Self {
        let ctx = Context::default();
        let state = egui_winit::State::new(ctx.clone(), egui::ViewportId::ROOT, window, None, None, None);
        Self {
            ctx,
            state,
            stats: FrameStats::default(),
        }
    }

    pub fn run(&mut self, window: &Window, game: &Game) -> UiOutput {
        let raw_input = self.state.take_egui_input(window);
        let lines = debug_lines(game, self.stats.fps());
        let output = self.ctx.run(raw_input, |ctx| {
            draw_crosshair(ctx);
            draw_debug_panel(ctx, &lines);
        });
        self.state.handle_platform_output(window, output.platform_output);

        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        UiOutput {
            primitives,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }
}

fn draw_crosshair(ctx: &Context) {
    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::TOP, egui::Id::new("crosshair")));
    let center = ctx.available_rect().center();
    let size = 8.0;
    let stroke = egui::Stroke::new(1.5, egui::Color32::WHITE);
    painter.line_segment(
        [egui::Pos2::new(center.x - size, center.y), egui::Pos2::new(center.x + size, center.y)],
        stroke,
    );
    painter.line_segment(
        [egui::Pos2::new(center.x, center.y - size), egui::Pos2::new(center.x, center.y + size)],
        stroke,
    );
}

fn draw_debug_panel(ctx: &Context, lines: &[String]) {
    egui::Area::new(egui::Id::new("debug"))
        .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(egui::Color32::from_black_alpha(140))
                .inner_margin(6.0)
                .show(ui, |ui| {
                    for line in lines {
                        ui.label(egui::RichText::new(line).small().color(egui::Color32::WHITE));
                    }
                    ui.separator();
                    ui.label(egui::RichText::new("WASD move, Space/Shift up/down").small());
                    ui.label(egui::RichText::new("LMB destroy, RMB place, Esc quit").small());
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_frame_stats() {
        let mut stats = FrameStats::default();
        for _ in 0..59 {
            stats.tick(1.0 / 60.0);
        }
        assert_eq!(stats.fps(), 0.0);
        stats.tick(1.0 / 60.0 + 0.001);
        assert_abs_diff_eq!(stats.fps(), 60.0, epsilon = 0.5);
    }

    #[test]
    fn test_debug_lines() {
        let game = Game::new(&AppConfig::default());
        let lines = debug_lines(&game, 59.6);
        assert_eq!(lines[0], "FPS: 60");
        assert_eq!(lines[1], "Pos: 0.0, 0.0, 3.0");
        assert_eq!(lines[3], "Blocks: 121");
        assert_eq!(lines[4], "Target: -");
    }
}
