use std::any::Any;

use rusqlite::Connection;
use tokio::sync::{mpsc, oneshot};

use cryptohist_core::errors::{Error, Result};

// Type alias for the job to be executed by the writer actor. It takes a
// mutable reference to the connection and returns a core Result.
type Job<T> = Box<dyn FnOnce(&mut Connection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
///
/// `rusqlite::Connection` is not `Sync` and SQLite allows one writer at a
/// time anyway, so all store access funnels through a single background task
/// that owns the connection. Handles are cheap to clone; jobs execute
/// serially in submission order, which serializes transaction commits from
/// concurrent backfill drivers.
#[derive(Clone)]
pub struct WriteHandle {
    // Each job is a boxed closure, and a oneshot sender is used for the
    // reply. Box<dyn Any + Send> erases the job's return type.
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's connection.
    ///
    /// The job owns its transaction boundaries; the actor adds none of its
    /// own. The quote writer needs that control for its stop-at-sentinel and
    /// skip-duplicate policies.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| Error::Unexpected("database writer stopped".to_string()))?;

        ret_rx
            .await
            .map_err(|_| Error::Unexpected("database writer dropped the reply".to_string()))?
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer job returned an unexpected type"))
            })
    }
}

/// Spawns a background task that acts as the single writer to the database.
/// The actor owns the connection for its whole lifetime and terminates when
/// the last [`WriteHandle`] is dropped.
pub fn spawn_writer(conn: Connection) -> WriteHandle {
    #[allow(clippy::type_complexity)]
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(64);

    tokio::spawn(async move {
        let mut conn = conn;
        while let Some((job, reply_tx)) = rx.recv().await {
            let result = job(&mut conn);
            // Ignore send errors: the requester may have been cancelled.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
