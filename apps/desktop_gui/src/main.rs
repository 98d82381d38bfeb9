use clap::Parser;
use client_core::config;
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime};
use controller::events::UiEvent;
use ui::ArtworkTableApp;

#[derive(Parser, Debug)]
#[command(name = "desktop_gui", about = "Desktop table view of the public artwork listing")]
struct Args {
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: Option<u32>,
}

/// `RUST_LOG` when set and valid, otherwise `info`.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter(log_filter()).init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    tracing::info!(api = %settings.api_base_url, page_size = settings.page_size, "starting desktop gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let page_size = settings.page_size;
    let api_base_url = settings.api_base_url.clone();
    runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Artworks")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([820.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Artworks",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ArtworkTableApp::new(
                cmd_tx,
                ui_rx,
                page_size,
                api_base_url,
            )))
        }),
    )
}
