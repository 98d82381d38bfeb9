//! Backend worker: owns the tokio runtime and the artwork source.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::{ArtworkSource, ClientSettings, HttpArtworkSource};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: ClientSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let source: Arc<dyn ArtworkSource> = match HttpArtworkSource::from_settings(&settings) {
            Ok(source) => Arc::new(source),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                tracing::error!("failed to build artwork source: {err}");
                return;
            }
        };
        run_worker(cmd_rx, ui_tx, source);
    })
}

fn run_worker(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    source: Arc<dyn ArtworkSource>,
) {
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build runtime: {err}"),
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    runtime.block_on(async move {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::FetchPage { ticket } => {
                    // One task per ticket; overlapping fetches may finish in
                    // any order and the UI drops the stale ones.
                    let source = Arc::clone(&source);
                    let ui_tx = ui_tx.clone();
                    tokio::spawn(async move {
                        let result = source.fetch_page(ticket.page, ticket.page_size).await;
                        if ui_tx.send(UiEvent::PageLoaded { ticket, result }).is_err() {
                            tracing::debug!(token = ticket.token, "ui closed before page arrived");
                        }
                    });
                }
            }
        }
        tracing::info!("backend command channel closed; worker exiting");
    });
}
