use client_core::{PageOutcome, PageTicket, TableController};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::panels::{self, TableAction};

pub struct ArtworkTableApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    table: TableController,
    status: String,
    last_error: Option<UiError>,
    api_base_url: String,
}

impl ArtworkTableApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        page_size: u32,
        api_base_url: String,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            table: TableController::new(page_size),
            status: "Starting...".to_string(),
            last_error: None,
            api_base_url,
        };
        let ticket = app.table.on_page_change(0);
        app.request_fetch(ticket);
        app
    }

    fn request_fetch(&mut self, ticket: PageTicket) {
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchPage { ticket },
            &mut self.status,
        ) {
            self.table.abandon_page_transition(ticket);
            self.last_error = Some(UiError::from_message(
                UiErrorContext::General,
                self.status.clone(),
            ));
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    if self.last_error.is_none() {
                        self.status = message;
                    }
                }
                UiEvent::PageLoaded { ticket, result } => {
                    match self.table.complete_page_transition(ticket, result) {
                        PageOutcome::Applied => {
                            self.last_error = None;
                            self.status = format!("Loaded page {}", ticket.page);
                        }
                        PageOutcome::Failed(err) => {
                            let err = UiError::from_source_error(UiErrorContext::LoadPage, &err);
                            self.status = err.status_line();
                            self.last_error = Some(err);
                        }
                        PageOutcome::Stale => {}
                    }
                }
                UiEvent::Error(err) => {
                    self.status = err.status_line();
                    self.last_error = Some(err);
                }
            }
        }
    }

    fn apply_action(&mut self, action: TableAction) {
        match action {
            TableAction::ToggleRow(id, checked) => self.table.toggle_row(id, checked),
            TableAction::TogglePage(checked) => self.table.toggle_page(checked),
            TableAction::Deselect(id) => self.table.deselect(id),
            TableAction::ClearAll => self.table.clear_all(),
            TableAction::ChangePage(page_index) => {
                let ticket = self.table.on_page_change(page_index);
                self.request_fetch(ticket);
            }
        }
    }
}

impl eframe::App for ArtworkTableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut actions = Vec::new();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::new()
                    .fill(ctx.style().visuals.panel_fill)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                panels::top_bar(
                    ui,
                    &self.api_base_url,
                    &self.status,
                    self.last_error.is_some(),
                );
            });
        egui::TopBottomPanel::bottom("page_navigator")
            .frame(
                egui::Frame::new()
                    .fill(ctx.style().visuals.panel_fill)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| panels::page_navigator(ui, &self.table, &mut actions));
        egui::SidePanel::right("selection_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| panels::selection_panel(ui, &self.table, &mut actions));
        egui::CentralPanel::default()
            .show(ctx, |ui| panels::artwork_grid(ui, &self.table, &mut actions));

        for action in actions {
            self.apply_action(action);
        }

        if self.table.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
