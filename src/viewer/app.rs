//! Main application state and UI.

use std::path::PathBuf;

use egui::{CentralPanel, TopBottomPanel};

use crate::config::{self, AppConfig};
use crate::events::{DialogId, MenuCommand, Reaction, UiEvent};
use crate::session::Session;
use crate::window::{self, WindowGeometry};

use super::settings::Settings;
use super::stage::{Stage, SUPPORTED_EXTENSIONS};

// Per-cell backdrop, the original viewer's clear color.
const CELL_FILL: egui::Color32 = egui::Color32::from_rgb(0x33, 0x57, 0x74);
const CELL_FILL_EMPTY: egui::Color32 = egui::Color32::from_rgb(0x26, 0x41, 0x57);

/// Main viewer application
pub struct ViewerApp {
    session: Session,
    stage: Stage,
    settings: Settings,
    geometry: WindowGeometry,
    needs_desktop_fit: bool,
    pending_file: Option<PathBuf>,
    status_message: String,
    is_fullscreen: bool,
}

impl ViewerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        geometry: WindowGeometry,
        needs_desktop_fit: bool,
        initial_file: Option<PathBuf>,
    ) -> Self {
        let mut stage = Stage::new();
        let session = Session::new(config, &mut stage, geometry.width, geometry.height);
        Self {
            session,
            stage,
            settings: Settings::load(),
            geometry,
            needs_desktop_fit,
            pending_file: initial_file,
            status_message: "Ready".into(),
            is_fullscreen: geometry.fullscreen,
        }
    }

    /// Route one UI event through the dispatcher and carry out whatever
    /// reaction comes back.
    fn apply(&mut self, ctx: &egui::Context, event: UiEvent) {
        let before = self.session.slots().occupied_count();
        let loaded_path = match &event {
            UiEvent::FileSelected { path, .. } => Some(path.clone()),
            _ => None,
        };

        let reaction = self.session.handle(&mut self.stage, event);

        // Success is silent in the dispatcher; the frontend still updates
        // the status bar and the recent-files list.
        if self.session.slots().occupied_count() > before {
            if let Some(path) = loaded_path {
                self.status_message = format!("Loaded {}", path.display());
                self.settings.add_recent(path);
                self.settings.save();
            }
        }

        match reaction {
            Some(Reaction::OpenMeshDialog(DialogId::AddMesh)) => self.open_mesh_dialog(ctx),
            Some(Reaction::ShowError { title, message }) => {
                self.status_message = message.clone();
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title(&title)
                    .set_description(&message)
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
            Some(Reaction::Shutdown) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            None => {}
        }
    }

    fn open_mesh_dialog(&mut self, ctx: &egui::Context) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Choose Mesh")
            .add_filter("Mesh", SUPPORTED_EXTENSIONS)
            .add_filter("All files", &["*"]);
        if let Some(dir) = &self.settings.last_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.settings.last_dir = path.parent().map(|p| p.to_path_buf());
            self.apply(
                ctx,
                UiEvent::FileSelected {
                    dialog: DialogId::AddMesh,
                    path,
                },
            );
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        // Collect recent files to avoid borrow issues
        let recent: Vec<PathBuf> = self.settings.recent_files().into_iter().cloned().collect();

        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Add Mesh...").clicked() {
                    self.apply(ctx, UiEvent::MenuItem(MenuCommand::AddMesh));
                    ui.close();
                }

                if !recent.is_empty() {
                    ui.menu_button("Recent", |ui| {
                        for path in &recent {
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().to_string())
                                .unwrap_or_else(|| path.display().to_string());
                            if ui.button(&name).clicked() {
                                self.pending_file = Some(path.clone());
                                ui.close();
                            }
                        }
                        ui.separator();
                        if ui.button("Clear Recent").clicked() {
                            self.settings.recent_files.clear();
                            self.settings.save();
                            ui.close();
                        }
                    });
                }

                ui.separator();
                if ui.button("Close Last Mesh").clicked() {
                    self.apply(ctx, UiEvent::MenuItem(MenuCommand::CloseLast));
                    ui.close();
                }
                if ui.button("Close All Mesh").clicked() {
                    self.apply(ctx, UiEvent::MenuItem(MenuCommand::CloseAll));
                    ui.close();
                }

                ui.separator();
                if ui.button("Exit").clicked() {
                    self.apply(ctx, UiEvent::MenuItem(MenuCommand::Exit));
                }
            });

            ui.menu_button("View", |ui| {
                if ui.checkbox(&mut self.is_fullscreen, "Fullscreen").changed() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.is_fullscreen));
                    ui.close();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    let text = format!(
                        "{}\n\n{}\nBuild: {}",
                        config::DESCRIPTION,
                        config::LICENSE,
                        env!("MDVIEW_BUILD_DATE"),
                    );
                    rfd::MessageDialog::new()
                        .set_level(rfd::MessageLevel::Info)
                        .set_title("About Mdview")
                        .set_description(text.as_str())
                        .set_buttons(rfd::MessageButtons::Ok)
                        .show();
                    ui.close();
                }
            });
        });
    }

    /// Paint the split-screen grid into the central panel.
    ///
    /// Cell rectangles follow the panel size, so the layout recomputes on
    /// every resize. Occupied cells come from the session's draw list, the
    /// same passes a real engine would render through each slot's camera.
    fn grid_panel(&mut self, ui: &mut egui::Ui) {
        let panel = ui.available_rect_before_wrap();
        self.session.resize(
            panel.width().max(1.0) as u32,
            panel.height().max(1.0) as u32,
        );

        let painter = ui.painter();

        for cell in self.session.cells() {
            let rect = egui::Rect::from_min_size(
                egui::pos2(
                    panel.min.x + cell.rect.x as f32,
                    panel.min.y + cell.rect.y as f32,
                ),
                egui::vec2(cell.rect.width as f32, cell.rect.height as f32),
            );
            let occupied = self
                .session
                .slots()
                .slot(cell.index)
                .is_some_and(|s| s.is_occupied());
            let fill = if occupied { CELL_FILL } else { CELL_FILL_EMPTY };
            painter.rect_filled(rect.shrink(1.0), 0.0, fill);

            if !occupied {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Empty",
                    egui::FontId::default(),
                    egui::Color32::GRAY,
                );
            }
        }

        for pass in self.session.draw_list() {
            let rect = egui::Rect::from_min_size(
                egui::pos2(
                    panel.min.x + pass.rect.x as f32,
                    panel.min.y + pass.rect.y as f32,
                ),
                egui::vec2(pass.rect.width as f32, pass.rect.height as f32),
            );

            let name = self
                .session
                .slots()
                .slot(pass.cell)
                .and_then(|slot| slot.mesh())
                .and_then(|node| self.stage.node(node))
                .map(|node| node.display_name())
                .unwrap_or_else(|| "?".into());
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                name,
                egui::FontId::default(),
                egui::Color32::WHITE,
            );

            if let Some(camera) = self.stage.camera(pass.camera) {
                painter.text(
                    egui::pos2(rect.min.x + 6.0, rect.max.y - 16.0),
                    egui::Align2::LEFT_BOTTOM,
                    format!(
                        "cam ({:.0}, {:.0}, {:.0})",
                        camera.position.x, camera.position.y, camera.position.z
                    ),
                    egui::FontId::monospace(10.0),
                    egui::Color32::LIGHT_GRAY,
                );
            }
        }
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(&self.status_message);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "{}/{} slots",
                    self.session.slots().occupied_count(),
                    self.session.slots().capacity()
                ));
            });
        });
    }
}

impl eframe::App for ViewerApp {
    fn on_exit(&mut self) {
        self.geometry.save();
        self.settings.save();
        log::info!(
            "window closed, last resolution: {}x{}",
            self.geometry.width,
            self.geometry.height
        );
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // First run only: fit the freshly opened window to the desktop,
        // now that the monitor size is known. One shot; if the probe
        // fails the preferred size stays.
        if self.needs_desktop_fit {
            if let Some(size) = ctx.input(|i| i.viewport().monitor_size) {
                let config = self.session.config();
                let (w, h) = window::fit(
                    size.x as u32,
                    size.y as u32,
                    config.preferred_width,
                    config.preferred_height,
                );
                log::info!(
                    "fitted window to desktop {}x{}: {}x{}",
                    size.x as u32,
                    size.y as u32,
                    w,
                    h
                );
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                    w as f32, h as f32,
                )));
            }
            self.needs_desktop_fit = false;
        }

        if let Some(path) = self.pending_file.take() {
            self.apply(
                ctx,
                UiEvent::FileSelected {
                    dialog: DialogId::AddMesh,
                    path,
                },
            );
        }

        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ctx, ui);
        });

        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.status_bar(ui);
        });

        CentralPanel::default().show(ctx, |ui| {
            self.grid_panel(ui);
        });

        // Track window geometry for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().inner_rect {
                self.geometry.width = rect.width() as u32;
                self.geometry.height = rect.height() as u32;
            }
            if let Some(fullscreen) = i.viewport().fullscreen {
                self.is_fullscreen = fullscreen;
                self.geometry.fullscreen = fullscreen;
            }
        });
    }
}
