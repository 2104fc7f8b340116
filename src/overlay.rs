use egui::{Align2, Color32, CornerRadius, Id, LayerId, Margin, Order, Pos2, Rect, RichText, Shape, Stroke, Vec2};

use crate::context::{ViewerCommand, ViewerContext};
use crate::effects::{ConfettiParticle, CountdownFields, LoadingIndicator};
use crate::math::hex_to_srgb;

const ACCENT: Color32 = Color32::from_rgb(0x61, 0x88, 0xea);
const PANEL_FILL: Color32 = Color32::from_rgba_premultiplied(20, 20, 20, 200);
const FIELD_LABELS: [&str; 4] = ["Days", "Hours", "Minutes", "Seconds"];

/// Draw every page effect for this frame and collect button presses
pub fn draw(ctx: &egui::Context, viewer: &ViewerContext) -> Vec<ViewerCommand> {
    let mut commands = Vec::new();

    if let Some(confetti) = &viewer.confetti {
        draw_confetti(ctx, confetti.particles());
    }
    if let Some(countdown) = &viewer.countdown {
        draw_countdown(ctx, countdown.fields());
    }
    draw_controls(ctx, viewer, &mut commands);
    draw_loading(ctx, &viewer.loading, viewer.viewport.logical_size());

    commands
}

fn draw_controls(ctx: &egui::Context, viewer: &ViewerContext, commands: &mut Vec<ViewerCommand>) {
    egui::Window::new("Controls")
        .title_bar(false)
        .resizable(false)
        .anchor(Align2::CENTER_BOTTOM, Vec2::new(0.0, -20.0))
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let toggle = egui::Button::new(RichText::new(viewer.auto_rotate_label()).size(14.0));
                if ui.add(toggle).clicked() {
                    commands.push(ViewerCommand::ToggleAutoRotate);
                }
                if ui.button(RichText::new("Reset Camera").size(14.0)).clicked() {
                    commands.push(ViewerCommand::ResetCamera);
                }
            });
        });
}

fn draw_countdown(ctx: &egui::Context, fields: &CountdownFields) {
    egui::Window::new("Countdown")
        .title_bar(false)
        .resizable(false)
        .anchor(Align2::CENTER_TOP, Vec2::new(0.0, 20.0))
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (value, label) in fields.as_array().into_iter().zip(FIELD_LABELS) {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(value).size(32.0).strong().color(Color32::WHITE));
                        ui.label(RichText::new(label).size(11.0).color(Color32::GRAY));
                    });
                    ui.add_space(12.0);
                }
            });
        });
}

fn draw_loading(ctx: &egui::Context, loading: &LoadingIndicator, logical_size: [f32; 2]) {
    if loading.is_hidden() {
        return;
    }
    let opacity = loading.opacity();
    let screen = Rect::from_min_size(Pos2::ZERO, Vec2::new(logical_size[0], logical_size[1]));

    egui::Area::new(Id::new("loading"))
        .order(Order::Foreground)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .interactable(false)
        .show(ctx, |ui| {
            ui.painter()
                .rect_filled(screen, CornerRadius::ZERO, Color32::from_black_alpha((230.0 * opacity) as u8));
            ui.set_opacity(opacity);
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new().size(48.0).color(ACCENT));
                ui.label(RichText::new("Loading...").size(16.0).color(Color32::WHITE));
            });
        });
}

fn draw_confetti(ctx: &egui::Context, particles: &[ConfettiParticle]) {
    if particles.is_empty() {
        return;
    }
    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("confetti")));
    for particle in particles {
        let [r, g, b] = hex_to_srgb(particle.color).map(|c| (c * 255.0).round() as u8);
        let alpha = (particle.opacity().clamp(0.0, 1.0) * 255.0) as u8;
        let points = particle.corners().map(|[x, y]| Pos2::new(x, y)).to_vec();
        painter.add(Shape::convex_polygon(
            points,
            Color32::from_rgba_unmultiplied(r, g, b, alpha),
            Stroke::NONE,
        ));
    }
}

fn panel_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(PANEL_FILL)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(12))
}
