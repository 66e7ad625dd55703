mod dialogs;

use crate::config::AppConfig;
use crate::output::NativeDirectoryChooser;
use crate::preview::{PreviewSurface, RepeatingTimer};
use crate::session::{is_valid_label, CameraSlot, CaptureError, Controller, CounterError};
use eframe::egui;
use std::time::Instant;

const PREVIEW_WIDTH: f32 = 480.0;

/// Widget state for one camera column
struct CameraPanel {
    preview: PreviewSurface,
    label_input: String,
    counter_input: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    LabelEdited(usize),
    SetCounter(usize),
}

pub struct CaptureApp {
    controller: Controller,
    panels: Vec<CameraPanel>,
    timer: RepeatingTimer,
    chooser: NativeDirectoryChooser,
}

impl CaptureApp {
    pub fn new(controller: Controller, config: &AppConfig) -> Self {
        let panels = controller
            .slots()
            .iter()
            .map(|slot| CameraPanel {
                preview: PreviewSurface::new(slot.index()),
                label_input: slot.label().to_string(),
                counter_input: slot.counter().to_string(),
            })
            .collect();

        Self {
            controller,
            panels,
            timer: RepeatingTimer::start(config.preview_interval, Instant::now()),
            chooser: NativeDirectoryChooser,
        }
    }

    fn refresh_previews(&mut self, ctx: &egui::Context) {
        if !self.timer.poll(Instant::now()) {
            return;
        }
        for (position, frame) in self.controller.read_previews() {
            if let Some(panel) = self.panels.get_mut(position) {
                panel.preview.push(ctx, &frame);
            }
        }
    }

    fn capture(&mut self) {
        match self.controller.capture() {
            Ok(report) => {
                if !report.failed_reads.is_empty() {
                    tracing::warn!(
                        "Failed to capture image from camera(s) {:?}",
                        report.failed_reads
                    );
                }
            }
            Err(CaptureError::OutputDirectoryUnset) => {
                tracing::warn!("Please choose a directory first.");
            }
            Err(e @ CaptureError::InvalidLabel { .. }) => {
                tracing::warn!("{}", e);
                dialogs::show_error(
                    "Invalid Folder Name",
                    &format!("Invalid expression - please enter a valid face type.\n\n{}", e),
                );
            }
            Err(e) => {
                let message = format!("{:#}", anyhow::Error::new(e));
                tracing::error!("Capture failed: {}", message);
                dialogs::show_error("Capture Failed", &message);
            }
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::LabelEdited(position) => {
                let Some(panel) = self.panels.get_mut(position) else {
                    return;
                };
                self.controller.label_edited(position, &panel.label_input);
                panel.counter_input = "1".to_string();
            }
            Action::SetCounter(position) => {
                let Some(panel) = self.panels.get(position) else {
                    return;
                };
                match self.controller.set_counter(position, &panel.counter_input) {
                    Ok(_) => {}
                    Err(e @ CounterError::NotANumber(_)) => {
                        tracing::warn!("{}", e);
                        dialogs::show_error(
                            "Invalid Input",
                            "Please enter a valid number for the counter.",
                        );
                    }
                    Err(e) => {
                        tracing::warn!("{}", e);
                        dialogs::show_error("Invalid Counter", &e.to_string());
                    }
                }
            }
        }
    }

    fn teardown(&mut self) {
        if self.timer.is_cancelled() {
            return;
        }
        self.timer.cancel();
        self.controller.shutdown();
        tracing::info!("Application closed.");
    }
}

impl eframe::App for CaptureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.teardown();
            return;
        }

        self.refresh_previews(ctx);

        let mut actions = Vec::new();
        let mut choose_directory = false;
        let mut capture = false;

        egui::TopBottomPanel::bottom("shared_controls").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                choose_directory = ui.button("Choose Save Directory").clicked();
                capture = ui
                    .button(if self.panels.len() > 1 {
                        "Capture Images"
                    } else {
                        "Capture Image"
                    })
                    .clicked();
                match self.controller.output_dir() {
                    Some(dir) => ui.label(format!("Saving to {}", dir.display())),
                    None => ui.weak("No save directory chosen"),
                };
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal_top(|ui| {
                for (position, (panel, slot)) in self
                    .panels
                    .iter_mut()
                    .zip(self.controller.slots())
                    .enumerate()
                {
                    ui.vertical(|ui| {
                        actions.extend(camera_column(ui, position, panel, slot));
                    });
                    ui.separator();
                }
            });
        });

        for action in actions {
            self.apply(action);
        }
        if choose_directory {
            self.controller.choose_output_dir(&mut self.chooser);
        }
        if capture {
            self.capture();
        }

        if let Some(wait) = self.timer.remaining(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}

impl Drop for CaptureApp {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn label_field_id(position: usize) -> egui::Id {
    egui::Id::new(("category_label", position))
}

fn camera_column(
    ui: &mut egui::Ui,
    position: usize,
    panel: &mut CameraPanel,
    slot: &CameraSlot,
) -> Vec<Action> {
    let mut actions = Vec::new();

    ui.heading(format!("Camera {}", slot.index()));
    match panel.preview.texture() {
        Some(texture) => {
            ui.add(egui::Image::new(texture).max_width(PREVIEW_WIDTH));
        }
        None if slot.is_open() => {
            ui.weak("Waiting for frames...");
        }
        None => {
            ui.colored_label(egui::Color32::RED, "Camera unavailable");
        }
    }

    ui.label("Enter folder name (valid: sad, smile, neutral):");
    let invalid = !panel.label_input.is_empty() && !is_valid_label(&panel.label_input);
    let mut label_field =
        egui::TextEdit::singleline(&mut panel.label_input).id(label_field_id(position));
    if invalid {
        label_field = label_field.text_color(egui::Color32::LIGHT_RED);
    }
    let response = ui.add(label_field);
    // Any key release in the field counts as an edit, like a key-up binding
    let key_released = response.has_focus()
        && ui.input(|i| {
            i.events
                .iter()
                .any(|event| matches!(event, egui::Event::Key { pressed: false, .. }))
        });
    if response.changed() || key_released {
        actions.push(Action::LabelEdited(position));
    }

    ui.label(format!("Image Counter: {}", slot.counter()));

    ui.label("Set Counter Manually:");
    ui.text_edit_singleline(&mut panel.counter_input);
    if ui.button("Update Counter").clicked() {
        actions.push(Action::SetCounter(position));
    }

    actions
}
