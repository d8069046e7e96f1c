use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

use crate::config::DataSource;
use crate::loader::load_dataset;
use crate::state::Delta;

/// Run the one ingestion step on a background thread and report back through `tx`.
pub fn spawn_loader(tx: Sender<Delta>, source: DataSource) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!("[INFO] Loading {source}")));
        let started = Instant::now();
        match load_dataset(&source) {
            Ok(dataset) => {
                log::info!("dataset ready in {} ms", started.elapsed().as_millis());
                let _ = tx.send(Delta::DatasetLoaded(Arc::new(dataset)));
            }
            Err(err) => {
                log::error!("dataset load failed: {err}");
                let _ = tx.send(Delta::LoadFailed(err.to_string()));
            }
        }
    })
}
