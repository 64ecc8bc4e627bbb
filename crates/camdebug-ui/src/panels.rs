//! The status panel.

use std::path::Path;
use std::time::Duration;

use egui::{CollapsingHeader, Color32, ComboBox, Context, DragValue, RichText, SidePanel, Ui};

use camdebug_core::{AxisDirection, CameraSample, Options, Vec3, VectorLayout};

/// What the poller is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No sample has been read yet (missing or empty file).
    Waiting,
    /// The last poll produced a sample.
    Live,
    /// Polling is paused by the user.
    Paused,
    /// The last poll failed; the previous sample is still shown.
    Error,
}

impl PollState {
    /// Returns display name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PollState::Waiting => "waiting",
            PollState::Live => "live",
            PollState::Paused => "paused",
            PollState::Error => "error",
        }
    }

    fn color(self) -> Color32 {
        match self {
            PollState::Waiting => Color32::from_rgb(150, 150, 150),
            PollState::Live => Color32::from_rgb(40, 150, 60),
            PollState::Paused => Color32::from_rgb(200, 140, 0),
            PollState::Error => Color32::from_rgb(200, 40, 40),
        }
    }
}

/// Read-only information shown in the panel.
#[derive(Debug, Clone, Copy)]
pub struct StatusInfo<'a> {
    pub data_path: &'a Path,
    pub state: PollState,
    pub since_update: Option<Duration>,
    pub sample: Option<CameraSample>,
    pub last_error: Option<&'a str>,
    pub samples_read: u64,
}

/// Viewer state the panel can toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerControls {
    pub paused: bool,
    pub orthographic: bool,
}

/// What the user asked for this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelResponse {
    /// Any option changed; geometry must be rebuilt.
    pub options_changed: bool,
    /// The up direction changed; the camera must be reoriented.
    pub up_changed: bool,
    pub refit_requested: bool,
    pub screenshot_requested: bool,
    /// Width of the panel in points.
    pub width: f32,
}

/// Builds the status panel on the left of the window.
pub fn build_status_panel(
    ctx: &Context,
    info: &StatusInfo<'_>,
    options: &mut Options,
    controls: &mut ViewerControls,
) -> PanelResponse {
    let mut response = PanelResponse::default();

    let panel = SidePanel::left("camdebug_status_panel")
        .default_width(260.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("camdebug");
            ui.separator();

            build_source_section(ui, info);
            ui.separator();
            build_sample_section(ui, info.sample);
            ui.separator();
            build_display_section(ui, options, &mut response);
            build_view_section(ui, options, controls, &mut response);
        });

    response.width = panel.response.rect.width();
    response
}

fn build_source_section(ui: &mut Ui, info: &StatusInfo<'_>) {
    ui.label(RichText::new(info.data_path.display().to_string()).monospace());
    ui.horizontal(|ui| {
        ui.label("Status:");
        ui.colored_label(info.state.color(), info.state.label());
    });
    ui.label(format!(
        "Last update: {}",
        info.since_update
            .map_or_else(|| "never".to_string(), format_elapsed)
    ));
    ui.label(format!("Samples read: {}", info.samples_read));
    if let Some(error) = info.last_error {
        ui.colored_label(PollState::Error.color(), error);
    }
}

fn build_sample_section(ui: &mut Ui, sample: Option<CameraSample>) {
    let Some(sample) = sample else {
        ui.label("No sample yet");
        return;
    };

    ui.label(RichText::new(format!("u  {}", format_vec3(sample.u))).monospace());
    ui.label(RichText::new(format!("v  {}", format_vec3(sample.v))).monospace());
    ui.label(format!(
        "|u| = {:.4}   |v| = {:.4}",
        sample.u.length(),
        sample.v.length()
    ));
    ui.label(match sample.angle_degrees() {
        Some(angle) => format!("angle(u, v) = {angle:.2}°"),
        None => "angle(u, v) undefined".to_string(),
    });
}

fn build_display_section(ui: &mut Ui, options: &mut Options, response: &mut PanelResponse) {
    CollapsingHeader::new("Display")
        .default_open(true)
        .show(ui, |ui| {
            let mut changed = false;
            changed |= ui.checkbox(&mut options.show_axes, "Reference axes").changed();
            changed |= ui.checkbox(&mut options.show_u, "u").changed();
            changed |= ui.checkbox(&mut options.show_v, "v").changed();
            changed |= ui.checkbox(&mut options.show_cross, "u × v").changed();
            changed |= ui.checkbox(&mut options.arrow_heads, "Arrowheads").changed();

            ComboBox::from_label("Layout")
                .selected_text(options.vector_layout.name())
                .show_ui(ui, |ui| {
                    for layout in [VectorLayout::PositionDirection, VectorLayout::FromOrigin] {
                        changed |= ui
                            .selectable_value(&mut options.vector_layout, layout, layout.name())
                            .changed();
                    }
                });

            ui.horizontal(|ui| {
                ui.label("v scale:");
                changed |= ui
                    .add(
                        DragValue::new(&mut options.direction_scale)
                            .speed(0.05)
                            .range(-100.0..=100.0),
                    )
                    .changed();
            });

            response.options_changed |= changed;
        });
}

fn build_view_section(
    ui: &mut Ui,
    options: &mut Options,
    controls: &mut ViewerControls,
    response: &mut PanelResponse,
) {
    CollapsingHeader::new("View")
        .default_open(true)
        .show(ui, |ui| {
            ui.checkbox(&mut controls.paused, "Pause polling (P)");
            ui.checkbox(&mut controls.orthographic, "Orthographic");

            ComboBox::from_label("Up")
                .selected_text(options.up_direction.name())
                .show_ui(ui, |ui| {
                    for dir in AxisDirection::ALL {
                        response.up_changed |= ui
                            .selectable_value(&mut options.up_direction, dir, dir.name())
                            .changed();
                    }
                });

            ui.horizontal(|ui| {
                ui.label("Background:");
                let mut color = options.background_color.to_array();
                if ui.color_edit_button_rgb(&mut color).changed() {
                    options.background_color = Vec3::from_array(color);
                }
            });

            ui.horizontal(|ui| {
                if ui.button("Reset view (R)").clicked() {
                    response.refit_requested = true;
                }
                if ui.button("Screenshot (S)").clicked() {
                    response.screenshot_requested = true;
                }
            });
        });
}

/// Formats a vector with fixed precision and aligned signs.
#[must_use]
pub fn format_vec3(v: Vec3) -> String {
    format!("[{:+.4}, {:+.4}, {:+.4}]", v.x, v.y, v.z)
}

/// Formats an elapsed time for the status line.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f32();
    if secs < 1.0 {
        format!("{} ms ago", elapsed.as_millis())
    } else if secs < 60.0 {
        format!("{secs:.1} s ago")
    } else {
        format!("{} min ago", elapsed.as_secs() / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vec3() {
        assert_eq!(
            format_vec3(Vec3::new(1.0, -0.5, 0.0)),
            "[+1.0000, -0.5000, +0.0000]"
        );
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(250)), "250 ms ago");
        assert_eq!(format_elapsed(Duration::from_millis(2500)), "2.5 s ago");
        assert_eq!(format_elapsed(Duration::from_secs(185)), "3 min ago");
    }

    #[test]
    fn test_poll_state_labels() {
        assert_eq!(PollState::Live.label(), "live");
        assert_eq!(PollState::Error.label(), "error");
    }

    #[test]
    fn test_panel_builds_without_changes() {
        let ctx = Context::default();
        let mut options = Options::default();
        let mut controls = ViewerControls::default();
        let sample = CameraSample::new(Vec3::X, Vec3::Y);
        let info = StatusInfo {
            data_path: Path::new("camera_out.txt"),
            state: PollState::Live,
            since_update: Some(Duration::from_millis(40)),
            sample: Some(sample),
            last_error: None,
            samples_read: 3,
        };

        let mut response = PanelResponse::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = build_status_panel(ctx, &info, &mut options, &mut controls);
        });

        assert!(!response.options_changed);
        assert!(!response.refit_requested);
        assert!(response.width > 0.0);
        assert_eq!(options, Options::default());
    }
}
