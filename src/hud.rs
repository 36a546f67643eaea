use crate::core::{OrbitSample, SpeedPreset};

/// Values the overlay shows for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudState {
    pub fps: f32,
    pub show_fps: bool,
    pub speed_controls: bool,
    pub speed: f64,
    pub active_preset: Option<SpeedPreset>,
    pub simulated_days: f64,
    pub angle_degrees: f64,
}

impl HudState {
    pub fn new(fps: f32, orbit: &OrbitSample, show_fps: bool, speed_controls: bool) -> Self {
        Self {
            fps,
            show_fps,
            speed_controls,
            speed: orbit.speed,
            active_preset: SpeedPreset::from_multiplier(orbit.speed),
            simulated_days: orbit.simulated_days(),
            angle_degrees: orbit.angle_degrees(),
        }
    }
}

pub fn format_multiplier(speed: f64) -> String {
    if speed.fract() == 0.0 && speed.abs() < 1e15 {
        format!("{}x", speed as i64)
    } else {
        format!("{speed:.2}x")
    }
}

pub fn format_days(days: f64) -> String {
    format!("{days:.2} d")
}

pub fn format_angle(degrees: f64) -> String {
    format!("{degrees:.1}°")
}

/// Draw the overlay; returns the preset whose button was clicked
pub fn draw(ctx: &egui::Context, state: &HudState) -> Option<SpeedPreset> {
    if state.show_fps {
        egui::Window::new("FPS")
            .title_bar(false)
            .resizable(false)
            .fixed_pos(egui::pos2(10.0, 10.0))
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("{:.0}", state.fps))
                        .size(48.0)
                        .color(egui::Color32::from_rgb(74, 158, 255)),
                );
                ui.label(
                    egui::RichText::new("FPS")
                        .size(12.0)
                        .color(egui::Color32::GRAY),
                );
            });
    }

    if !state.speed_controls {
        return None;
    }

    let mut clicked = None;
    egui::Window::new("Time")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for preset in SpeedPreset::ALL {
                    let active = state.active_preset == Some(preset);
                    if ui.add(egui::Button::new(preset.label()).selected(active)).clicked() {
                        clicked = Some(preset);
                    }
                }
            });
            ui.separator();
            egui::Grid::new("orbit_readout").num_columns(2).show(ui, |ui| {
                ui.label("Speed");
                ui.label(format_multiplier(state.speed));
                ui.end_row();
                ui.label("Elapsed");
                ui.label(format_days(state.simulated_days));
                ui.end_row();
                ui.label("Moon angle");
                ui.label(format_angle(state.angle_degrees));
                ui.end_row();
            });
        });

    clicked
}
