//! Background loader thread: builds the console's datasets off the UI thread.
//!
//! Communication with the main loop is via `mpsc` channels. Every load carries
//! the request id of the admin session that asked for it, so a response that
//! arrives after the session was discarded can be dropped.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use propdesk_core::config::SampleConfig;
use propdesk_core::sample::{sample_set, SampleSet};

/// Commands sent from the UI to the loader.
#[derive(Debug)]
pub enum LoaderCommand {
    Load { request: u64, config: SampleConfig },
    Shutdown,
}

/// Responses sent from the loader back to the UI.
#[derive(Debug)]
pub enum LoaderResponse {
    Loaded { request: u64, set: Box<SampleSet> },
}

pub fn spawn_loader(
    rx: Receiver<LoaderCommand>,
    tx: Sender<LoaderResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("propdesk-loader".into())
        .spawn(move || loader_loop(rx, tx))
}

fn loader_loop(rx: Receiver<LoaderCommand>, tx: Sender<LoaderResponse>) {
    loop {
        match rx.recv() {
            Ok(LoaderCommand::Shutdown) | Err(_) => break,
            Ok(LoaderCommand::Load { request, config }) => {
                debug!(request, delay_ms = config.load_delay_ms, "loading datasets");
                if config.load_delay_ms > 0 {
                    thread::sleep(Duration::from_millis(config.load_delay_ms));
                }
                let set = sample_set(&config, Utc::now());
                info!(
                    request,
                    accounts = set.accounts.len(),
                    payouts = set.payouts.len(),
                    alerts = set.alerts.len(),
                    "datasets ready"
                );
                if tx
                    .send(LoaderResponse::Loaded {
                        request,
                        set: Box::new(set),
                    })
                    .is_err()
                {
                    break;
                }
            }
        }
    }
    debug!("loader stopped");
}
