/// Background task system for handling network operations without blocking UI
use log::{debug, error};
use sheet_records::Record;
use sheet_source::RecordSource;
use std::{fmt, sync::Arc};
use tokio::sync::mpsc;

/// Results from background task execution
/// These are sent back to the main loop and converted to Actions
#[derive(Debug)]
pub enum TaskResult {
    /// Record list fetched (request_id, result)
    RecordsLoaded(u64, Result<Vec<Record>, String>),
}

/// Background tasks that can be executed asynchronously
pub enum BackgroundTask {
    FetchRecords {
        request_id: u64,
        source: Arc<dyn RecordSource>,
    },
}

impl fmt::Debug for BackgroundTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundTask::FetchRecords { request_id, source } => f
                .debug_struct("FetchRecords")
                .field("request_id", request_id)
                .field("endpoint", &source.endpoint())
                .finish(),
        }
    }
}

/// Background task worker that processes tasks without blocking UI
pub fn start_task_worker(
    mut task_rx: mpsc::UnboundedReceiver<BackgroundTask>,
    result_tx: mpsc::UnboundedSender<TaskResult>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(task) = task_rx.recv().await {
            process_task(task, &result_tx).await;
        }
    })
}

async fn process_task(task: BackgroundTask, result_tx: &mpsc::UnboundedSender<TaskResult>) {
    match task {
        BackgroundTask::FetchRecords { request_id, source } => {
            let endpoint = source.endpoint().to_string();
            debug!("Fetch #{} started: GET {}", request_id, endpoint);

            // The HTTP client blocks, keep it off the async workers
            let result = match tokio::task::spawn_blocking(move || source.fetch()).await {
                Ok(Ok(records)) => {
                    debug!("Fetch #{} loaded {} records", request_id, records.len());
                    Ok(records)
                }
                Ok(Err(err)) => {
                    error!("Fetch #{} from {} failed: {}", request_id, endpoint, err);
                    Err(err.to_string())
                }
                Err(join_err) => {
                    error!("Fetch #{} task panicked: {}", request_id, join_err);
                    Err(format!("Fetch task failed: {}", join_err))
                }
            };

            let _ = result_tx.send(TaskResult::RecordsLoaded(request_id, result));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sheet_source::FetchError;

    struct FixedSource(Result<Vec<Record>, FetchError>);

    impl RecordSource for FixedSource {
        fn endpoint(&self) -> &str {
            "memory://fixed"
        }

        fn fetch(&self) -> Result<Vec<Record>, FetchError> {
            self.0.clone()
        }
    }

    fn fetch_task(request_id: u64, result: Result<Vec<Record>, FetchError>) -> BackgroundTask {
        BackgroundTask::FetchRecords {
            request_id,
            source: Arc::new(FixedSource(result)),
        }
    }

    #[tokio::test]
    async fn test_successful_fetch_reports_records() {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let (result_tx, mut result_rx) = mpsc::unbounded_channel();
        let worker = start_task_worker(task_rx, result_tx);

        let record: Record = serde_json::from_value(json!({"id": 1, "name": "SUM"})).unwrap();
        task_tx.send(fetch_task(7, Ok(vec![record]))).unwrap();

        match result_rx.recv().await.unwrap() {
            TaskResult::RecordsLoaded(id, Ok(records)) => {
                assert_eq!(id, 7);
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].text("name"), "SUM");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        worker.abort();
    }

    #[tokio::test]
    async fn test_failed_fetch_reports_message() {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let (result_tx, mut result_rx) = mpsc::unbounded_channel();
        let worker = start_task_worker(task_rx, result_tx);

        task_tx
            .send(fetch_task(
                2,
                Err(FetchError::Network("connection refused".into())),
            ))
            .unwrap();

        match result_rx.recv().await.unwrap() {
            TaskResult::RecordsLoaded(id, Err(message)) => {
                assert_eq!(id, 2);
                assert_eq!(message, "Network error: connection refused");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        worker.abort();
    }

    #[test]
    fn test_debug_shows_endpoint() {
        let task = fetch_task(3, Ok(Vec::new()));
        let text = format!("{task:?}");
        assert!(text.contains("memory://fixed"));
        assert!(text.contains("request_id: 3"));
    }
}
