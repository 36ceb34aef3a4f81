//! Application state and the frame loop.
//!
//! `PlannerApp` owns the single shelf board, the drag state machine, the
//! three form states and the visualization state, and passes them down to
//! the view modules; nothing lives in globals. The board is persisted in
//! eframe storage and restored once at startup.

use chrono::{DateTime, Local};
use log::{info, warn};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use shelf_core::Vec2f;
use shelf_core::board::ShelfBoard;
use shelf_core::config::PlannerConfig;
use shelf_core::interaction::DragController;
use shelf_core::text::title_case;

use crate::backend::{BackendClient, BackendResponse};
use crate::board_view::RenameEdit;
use crate::forms::{BulkForm, PlaygroundForm, PredictForm};
use crate::viz::VizState;

const BOARD_STORAGE_KEY: &str = "shelf_board";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum MainTab {
    #[default]
    #[strum(serialize = "Raf Düzeni")]
    Board,
    #[strum(serialize = "Görselleştirme")]
    Visualization,
}

/// Destructive actions wait for a confirmation dialog
pub enum PendingConfirm {
    DeleteShelf(u32),
    ClearAll,
}

struct StatusLine {
    text: String,
    at: DateTime<Local>,
}

pub struct PlannerApp {
    config: PlannerConfig,
    pub(crate) backend: BackendClient,

    pub(crate) board: ShelfBoard,
    pub(crate) drag: DragController,
    pub(crate) selected: Option<u32>,
    pub(crate) rename: Option<RenameEdit>,
    /// Canvas size of the previous frame, used before the canvas is laid out
    pub(crate) last_container: Vec2f,

    pub(crate) predict: PredictForm,
    pub(crate) bulk: BulkForm,
    pub(crate) playground: PlaygroundForm,
    pub(crate) viz: VizState,

    pub(crate) main_tab: MainTab,
    pub(crate) alert: Option<String>,
    pub(crate) pending_confirm: Option<PendingConfirm>,
    status: Option<StatusLine>,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: PlannerConfig) -> Self {
        // One-time migration of the previously persisted board into this
        // session's single board instance
        let board = cc
            .storage
            .and_then(|storage| storage.get_string(BOARD_STORAGE_KEY))
            .and_then(|json| match serde_json::from_str::<ShelfBoard>(&json) {
                Ok(board) => {
                    info!("restored {} shelves from storage", board.len());
                    Some(board)
                }
                Err(e) => {
                    warn!("could not restore the stored board: {e}");
                    None
                }
            })
            .unwrap_or_default();

        let backend = BackendClient::spawn(&config);
        let predict = PredictForm {
            model: config.defaults.model,
            ..Default::default()
        };
        let bulk = BulkForm {
            model: config.defaults.model,
            ..Default::default()
        };
        let playground = PlaygroundForm {
            model: config.defaults.model,
            goal: config.defaults.goal,
            ..Default::default()
        };

        Self {
            config,
            backend,
            board,
            drag: DragController::new(),
            selected: None,
            rename: None,
            last_container: Vec2f::new(800.0, 500.0),
            predict,
            bulk,
            playground,
            viz: VizState::default(),
            main_tab: MainTab::default(),
            alert: None,
            pending_confirm: None,
            status: None,
        }
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>) {
        let text = text.into();
        info!("{text}");
        self.status = Some(StatusLine {
            text,
            at: Local::now(),
        });
    }

    fn handle_response(&mut self, response: BackendResponse) {
        match response {
            BackendResponse::Predict(result) => {
                self.predict.in_flight = false;
                match result {
                    Ok(r) => {
                        if let Some(error) = r.error {
                            self.predict.error = Some(error);
                        } else if let Some(prediction) = r.prediction {
                            self.predict.result = Some(title_case(&prediction));
                            self.set_status("Tahmin tamamlandı");
                        } else {
                            self.predict.error =
                                Some("Bilinmeyen bir hata oluştu.".to_string());
                        }
                    }
                    Err(e) => self.predict.error = Some(e),
                }
            }
            BackendResponse::Bulk(result) => {
                self.bulk.in_flight = false;
                match result {
                    Ok(r) => {
                        if let Some(error) = &r.error {
                            let mut message = error.clone();
                            if let Some(note) =
                                r.association_analysis.as_ref().and_then(|a| a.message.clone())
                            {
                                message.push_str(&format!(" (Birliktelik Analizi Notu: {note})"));
                            }
                            self.bulk.error = Some(message);
                        } else {
                            self.set_status(format!(
                                "Toplu tahmin tamamlandı ({} fiş)",
                                r.results.len()
                            ));
                            self.bulk.response = Some(r);
                        }
                    }
                    Err(e) => self.bulk.error = Some(e),
                }
            }
            BackendResponse::Playground(result) => {
                self.playground.in_flight = false;
                match result {
                    Ok(r) => {
                        if let Some(error) = &r.error {
                            let mut message = error.clone();
                            if let Some(note) =
                                r.association_analysis.as_ref().and_then(|a| a.message.clone())
                            {
                                message.push_str(&format!(" (Birliktelik Analizi Notu: {note})"));
                            }
                            self.playground.error = Some(message);
                        } else {
                            if let Some(payload) = r.visualization_data.clone() {
                                self.viz.set_payload(payload);
                            }
                            self.set_status(format!(
                                "Öneri alındı ({} raf)",
                                r.recommendations.len()
                            ));
                            self.playground.response = Some(r);
                        }
                    }
                    Err(e) => self.playground.error = Some(e),
                }
            }
        }
    }

    fn any_in_flight(&self) -> bool {
        self.predict.in_flight || self.bulk.in_flight || self.playground.in_flight
    }

    fn draw_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };
        egui::Window::new("Uyarı")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("Tamam").clicked() {
                    self.alert = None;
                }
            });
    }

    fn draw_confirm(&mut self, ctx: &egui::Context) {
        let Some(pending) = &self.pending_confirm else {
            return;
        };
        let question = match pending {
            PendingConfirm::DeleteShelf(id) => {
                let name = self
                    .board
                    .shelf(*id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| format!("Raf {id}"));
                format!("{name} silinsin mi?")
            }
            PendingConfirm::ClearAll => "Tüm raflar silinsin mi?".to_string(),
        };

        egui::Window::new("Onay")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(question);
                ui.horizontal(|ui| {
                    if ui.button("Evet").clicked() {
                        match self.pending_confirm.take() {
                            Some(PendingConfirm::DeleteShelf(id)) => {
                                if self.board.remove_shelf(id) {
                                    self.set_status("Raf silindi");
                                }
                                if self.selected == Some(id) {
                                    self.selected = None;
                                }
                            }
                            Some(PendingConfirm::ClearAll) => {
                                self.board.clear();
                                self.selected = None;
                                self.set_status("Tüm raflar temizlendi");
                            }
                            None => {}
                        }
                    }
                    if ui.button("İptal").clicked() {
                        self.pending_confirm = None;
                    }
                });
            });
    }
}

impl eframe::App for PlannerApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(&self.board) {
            Ok(json) => storage.set_string(BOARD_STORAGE_KEY, json),
            Err(e) => warn!("could not persist the board: {e}"),
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Some(response) = self.backend.try_recv() {
            self.handle_response(response);
        }

        // A lost pointer-up (window focus gone mid-gesture) must not leave
        // a shelf stuck in a dragging state
        if !ctx.input(|i| i.focused) {
            self.drag.abort();
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Raf Planlayıcı");
                ui.separator();
                for tab in MainTab::iter() {
                    ui.selectable_value(&mut self.main_tab, tab, tab.to_string());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(self.config.backend.base_url.as_str())
                            .small()
                            .weak(),
                    );
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.status {
                    Some(status) => {
                        ui.label(format!(
                            "{} — {}",
                            status.at.format("%H:%M:%S"),
                            status.text
                        ));
                    }
                    None => {
                        ui.label(egui::RichText::new("Hazır").weak());
                    }
                }
                if self.any_in_flight() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.spinner();
                    });
                }
            });
        });

        egui::SidePanel::right("forms_panel")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| {
                self.draw_forms_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| match self.main_tab {
            MainTab::Board => self.draw_board_view(ui),
            MainTab::Visualization => self.draw_viz_view(ui),
        });

        self.draw_alert(ctx);
        self.draw_confirm(ctx);

        if self.any_in_flight() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
