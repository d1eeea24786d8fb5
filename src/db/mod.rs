use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context};
use log::{error, info};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, oneshot};

pub mod helpers;
mod migrations;
pub mod models;
mod repositories;

use crate::error::{CoreError, CoreResult};
use migrations::run_migrations;

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

/// What happened to the shot list. Emitted after the write has
/// committed, so subscribers re-reading the repository see the change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ShotEventKind {
    Recorded,
    TasteUpdated,
    Deleted,
}

/// Broadcast payload for live shot-list updates. Purely a refresh
/// signal; consumers fetch fresh snapshots themselves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShotEvent {
    pub shot_id: String,
    pub bean_id: String,
    pub kind: ShotEventKind,
}

struct DatabaseInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
    shot_events: broadcast::Sender<ShotEvent>,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                error!("Failed to send shutdown to DB thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join DB thread: {join_err:?}");
            }
        }
    }
}

/// Handle to the SQLite store. All access funnels through a dedicated
/// worker thread; callers hand in closures and await the reply, which
/// keeps rusqlite off the async executor and serializes writers.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
    db_path: Arc<PathBuf>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })
                .map_err(CoreError::Unknown)?;
        }

        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("dialin-db".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(Err(CoreError::Storage(err)));
                        return;
                    }
                };

                if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                    error!("Failed to enable WAL mode: {err}");
                }

                let init_result = run_migrations(&mut conn);
                if ready_tx.send(init_result).is_err() {
                    error!("DB initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        DbCommand::Shutdown => break,
                    }
                }

                info!("Database thread shutting down");
            })
            .map_err(|err| {
                CoreError::Unknown(anyhow!("failed to spawn database worker thread: {err}"))
            })?;

        ready_rx
            .recv()
            .map_err(|_| {
                CoreError::Unknown(anyhow!("database worker exited before signaling readiness"))
            })??;

        info!("Database initialized at {}", db_path.as_path().display());

        let (shot_events, _) = broadcast::channel(64);

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
                shot_events,
            }),
            db_path: Arc::new(db_path),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Passive subscription to shot-list changes. Lagging receivers drop
    /// old events rather than block the writer.
    pub fn subscribe_shots(&self) -> broadcast::Receiver<ShotEvent> {
        self.inner.shot_events.subscribe()
    }

    pub(crate) fn notify_shots(&self, event: ShotEvent) {
        // Send only fails when nobody is subscribed, which is fine.
        let _ = self.inner.shot_events.send(event);
    }

    pub async fn execute<F, T>(&self, task: F) -> CoreResult<T>
    where
        F: FnOnce(&mut Connection) -> CoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("DB caller dropped before receiving result");
            }
        }));

        sender.send(command).map_err(|err| {
            CoreError::Unknown(anyhow!("failed to send command to DB thread: {err}"))
        })?;

        reply_rx
            .await
            .map_err(|_| CoreError::Unknown(anyhow!("database thread terminated unexpectedly")))?
    }
}
