//! Sweep Task
//!
//! Background task that periodically runs the engine's maintenance pass.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::RecordCache;
use crate::engine::IncidentService;

/// Spawns a background task that calls [`IncidentService::sweep`] every
/// `interval`.
///
/// The first sweep runs one full interval after spawning. Each pass takes
/// the engine's write lock, so requests wait while it runs.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let service = Arc::new(IncidentService::from_config(&config));
/// let sweep_handle = spawn_sweep_task(service.clone(), Duration::from_secs(86_400));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<C>(service: Arc<IncidentService<C>>, interval: Duration) -> JoinHandle<()>
where
    C: RecordCache + 'static,
{
    tokio::spawn(async move {
        info!(
            "Starting sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let report = service.sweep().await;
            debug!(
                expired = report.expired,
                evicted = report.evicted,
                inconsistencies = report.inconsistencies,
                "Scheduled sweep complete"
            );
        }
    })
}
