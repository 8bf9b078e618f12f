//! Application state: single-owner, main-thread only.
//!
//! The loader thread communicates via channels. The admin session exists only
//! while the console screen is mounted.

use std::sync::mpsc::{Receiver, Sender};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use propdesk_core::AppConfig;

use crate::admin::AdminSession;
use crate::loader::{LoaderCommand, LoaderResponse};

/// Which top-level screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Console,
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Detail {
        title: String,
        fields: Vec<(String, String)>,
    },
}

/// Whether keystrokes edit the search box or drive the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub screen: Screen,
    pub overlay: Overlay,
    pub input_mode: InputMode,
    pub config: AppConfig,
    pub session: Option<AdminSession>,

    // Loader communication
    pub loader_tx: Sender<LoaderCommand>,
    pub loader_rx: Receiver<LoaderResponse>,
    next_request: u64,

    pub status_message: Option<(String, StatusLevel)>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        loader_tx: Sender<LoaderCommand>,
        loader_rx: Receiver<LoaderResponse>,
    ) -> Self {
        Self {
            running: true,
            screen: Screen::Home,
            overlay: Overlay::None,
            input_mode: InputMode::Normal,
            config,
            session: None,
            loader_tx,
            loader_rx,
            next_request: 1,
            status_message: None,
        }
    }

    /// Clock used for date buckets.
    pub fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    /// Mount the console: fresh session, fresh filters, and a load request.
    pub fn enter_console(&mut self) {
        let request = self.next_request;
        self.next_request += 1;
        match AdminSession::new(request, &self.config) {
            Ok(session) => {
                self.session = Some(session);
                self.screen = Screen::Console;
                self.input_mode = InputMode::Normal;
                let sent = self.loader_tx.send(LoaderCommand::Load {
                    request,
                    config: self.config.sample.clone(),
                });
                if sent.is_err() {
                    warn!(request, "loader is gone");
                    self.set_error("Loader stopped; data unavailable");
                } else {
                    info!(request, "console mounted");
                    self.set_status("Loading...");
                }
            }
            Err(e) => {
                warn!(error = %e, "could not build admin session");
                self.set_error(format!("Console unavailable: {e}"));
            }
        }
    }

    /// Unmount the console. All filter, search, sort and selection state goes
    /// with the session.
    pub fn leave_console(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(request = session.request, "console unmounted");
        }
        self.screen = Screen::Home;
        self.overlay = Overlay::None;
        self.input_mode = InputMode::Normal;
    }

    pub fn handle_loader_response(&mut self, resp: LoaderResponse) {
        match resp {
            LoaderResponse::Loaded { request, set } => {
                let Some(session) = self.session.as_mut().filter(|s| s.request == request)
                else {
                    debug!(request, "dropping stale load");
                    return;
                };
                let summary = format!(
                    "Loaded {} accounts, {} payouts, {} alerts",
                    set.accounts.len(),
                    set.payouts.len(),
                    set.alerts.len()
                );
                session.load(*set);
                self.set_status(summary);
            }
        }
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
