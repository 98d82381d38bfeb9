//! Panel renderers. They read the table state and report user intent as
//! `TableAction`s; nothing here mutates the controller.

use client_core::{PaginatorState, TableController};
use shared::domain::{ArtworkId, ArtworkRecord};

const PAGE_WINDOW: u32 = 5;
const CELL_MAX_CHARS: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    ToggleRow(ArtworkId, bool),
    TogglePage(bool),
    Deselect(ArtworkId),
    ClearAll,
    /// Zero-based page index, as reported by the navigator.
    ChangePage(u32),
}

/// Page numbers shown between the prev/next buttons, centered on `current`
/// where the page count allows.
pub fn page_window(current: u32, page_count: u32, width: u32) -> Vec<u32> {
    let count = page_count.max(1);
    let width = width.clamp(1, count);
    let current = current.clamp(1, count);
    let mut start = current.saturating_sub(width / 2).max(1);
    if start + width - 1 > count {
        start = count - width + 1;
    }
    (start..start + width).collect()
}

pub fn showing_label(paginator: PaginatorState, rows_on_page: usize) -> String {
    let total = paginator.total_records;
    if rows_on_page == 0 {
        return if total == 0 {
            "No records".to_string()
        } else {
            format!("No records on this page ({total} total)")
        };
    }
    let first = paginator.first_index + 1;
    let last = paginator.first_index + rows_on_page as u64;
    format!("Showing {first}–{last} of {total}")
}

/// Collapses whitespace and shortens long values for a single grid cell.
pub fn cell_text(value: &str, max_chars: usize) -> String {
    let flat = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut short: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}

pub fn top_bar(ui: &mut egui::Ui, api_base_url: &str, status: &str, is_error: bool) {
    ui.horizontal(|ui| {
        ui.heading("Artworks");
        ui.separator();
        ui.label(egui::RichText::new(api_base_url).weak().small());
    });
    let status_text = egui::RichText::new(status).small();
    if is_error {
        ui.label(status_text.color(ui.visuals().error_fg_color));
    } else {
        ui.label(status_text.weak());
    }
}

pub fn selection_panel(ui: &mut egui::Ui, table: &TableController, actions: &mut Vec<TableAction>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("Selected ({})", table.selected_count())).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(table.selected_count() > 0, egui::Button::new("Clear All"))
                .clicked()
            {
                actions.push(TableAction::ClearAll);
            }
        });
    });
    ui.separator();

    if table.selection().is_empty() {
        ui.label(egui::RichText::new("No selections yet.").weak());
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("selection_list")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for id in table.selection().iter() {
                ui.horizontal(|ui| {
                    ui.label(format!("#{id}"));
                    if ui.small_button("✕").on_hover_text("Remove").clicked() {
                        actions.push(TableAction::Deselect(id));
                    }
                });
            }
        });
}

pub fn artwork_grid(ui: &mut egui::Ui, table: &TableController, actions: &mut Vec<TableAction>) {
    if table.is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(format!("Loading page {}…", table.current_page()));
        });
    }

    egui::ScrollArea::both()
        .id_salt("artwork_grid")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("artworks")
                .striped(true)
                .num_columns(7)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    let mut all_selected = table.all_on_page_selected();
                    if ui
                        .add_enabled(
                            !table.rows().is_empty(),
                            egui::Checkbox::without_text(&mut all_selected),
                        )
                        .changed()
                    {
                        actions.push(TableAction::TogglePage(all_selected));
                    }
                    for header in ["ID", "Title", "Artist", "Origin", "Inscriptions", "Date Range"] {
                        ui.label(egui::RichText::new(header).strong());
                    }
                    ui.end_row();

                    for record in table.rows() {
                        artwork_row(ui, record, table.is_row_selected(record.id), actions);
                        ui.end_row();
                    }
                });

            if table.rows().is_empty() && !table.is_loading() {
                ui.add_space(8.0);
                ui.label(egui::RichText::new("No artworks to show.").weak());
            }
        });
}

fn artwork_row(
    ui: &mut egui::Ui,
    record: &ArtworkRecord,
    selected: bool,
    actions: &mut Vec<TableAction>,
) {
    let mut checked = selected;
    if ui.add(egui::Checkbox::without_text(&mut checked)).changed() {
        actions.push(TableAction::ToggleRow(record.id, checked));
    }
    ui.label(record.id.to_string());
    for value in [
        record.title.as_str(),
        record.artist_display.as_str(),
        record.place_of_origin.as_str(),
        record.inscriptions.as_str(),
    ] {
        let response = ui.label(cell_text(value, CELL_MAX_CHARS));
        if value.chars().count() > CELL_MAX_CHARS {
            response.on_hover_text(value);
        }
    }
    ui.label(record.date_range_label());
}

pub fn page_navigator(ui: &mut egui::Ui, table: &TableController, actions: &mut Vec<TableAction>) {
    let paginator = table.paginator();
    let page_count = paginator.page_count();
    let current = table.current_page();

    ui.horizontal(|ui| {
        let can_go_back = current > 1;
        let can_go_forward = current < page_count;

        if ui.add_enabled(can_go_back, egui::Button::new("« First")).clicked() {
            actions.push(TableAction::ChangePage(0));
        }
        if ui.add_enabled(can_go_back, egui::Button::new("‹ Prev")).clicked() {
            actions.push(TableAction::ChangePage(current - 2));
        }
        for page in page_window(current, page_count, PAGE_WINDOW) {
            if ui
                .selectable_label(page == current, page.to_string())
                .clicked()
            {
                actions.push(TableAction::ChangePage(page - 1));
            }
        }
        if ui.add_enabled(can_go_forward, egui::Button::new("Next ›")).clicked() {
            actions.push(TableAction::ChangePage(current));
        }
        if ui.add_enabled(can_go_forward, egui::Button::new("Last »")).clicked() {
            actions.push(TableAction::ChangePage(page_count - 1));
        }

        ui.separator();
        ui.label(showing_label(paginator, table.rows().len()));
    });
}
