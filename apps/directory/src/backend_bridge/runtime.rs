//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{resolve_navbar, DirectoryProvider, ProfileProvider};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{UiError, UiErrorContext, UiEvent},
};

/// Collaborators the worker needs to answer commands.
#[derive(Clone)]
pub struct Backend {
    pub directory: Arc<dyn DirectoryProvider>,
    pub profiles: Arc<dyn ProfileProvider>,
    pub asset_base: String,
}

fn forward(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => tracing::warn!("ui event queue full; dropping backend event"),
        Err(TrySendError::Disconnected(_)) => tracing::debug!("ui loop gone; dropping backend event"),
    }
}

/// Spawns the backend worker thread. Every command runs as its own task, so
/// a slow fetch never holds up a later one.
pub fn launch(
    backend: Backend,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                forward(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                return;
            }
        };

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend received command");
                let backend = backend.clone();
                let ui_tx = ui_tx.clone();
                match cmd {
                    BackendCommand::Fetch(request) => {
                        tokio::spawn(async move {
                            let outcome = backend.directory.fetch(&request.target).await;
                            forward(
                                &ui_tx,
                                UiEvent::Fetched {
                                    ticket: request.ticket,
                                    outcome,
                                },
                            );
                        });
                    }
                    BackendCommand::CheckSession { token } => {
                        tokio::spawn(async move {
                            let indicator = resolve_navbar(
                                backend.profiles.as_ref(),
                                token.as_deref(),
                                &backend.asset_base,
                            )
                            .await;
                            forward(&ui_tx, UiEvent::Navbar(indicator));
                        });
                    }
                }
            }
            tracing::debug!("command queue closed; backend worker exiting");
        });
    })
}
