/// Effect system for Redux architecture
/// Reducers return (State, Vec<Effect>) where Effects describe side effects to perform
/// The update() function executes these effects
use ::log::{debug, info};
use anyhow::Result;
use sheet_source::HttpRecordSource;
use std::sync::Arc;

use crate::{App, actions::Action, config::ENDPOINT_ENV_VAR, task::BackgroundTask};

/// Effects that reducers can request to be performed
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Load .env file if the endpoint override is not already set
    LoadEnvFile,

    /// Build the record source from config (must happen after LoadEnvFile)
    InitializeSource,

    /// Hand one fetch to the background worker
    FetchRecords { request_id: u64 },

    /// Batch multiple effects
    Batch(Vec<Effect>),
}

impl Effect {
    /// Create a batch of effects
    pub fn batch(effects: Vec<Effect>) -> Self {
        Effect::Batch(effects)
    }
}

/// Execute an effect and return follow-up actions to dispatch
/// This maintains clean architecture by avoiding direct action dispatching from effects
pub async fn execute_effect(app: &mut App, effect: Effect) -> Result<Vec<Action>> {
    let mut follow_up_actions = Vec::new();

    match effect {
        Effect::LoadEnvFile => {
            if std::env::var(ENDPOINT_ENV_VAR).is_err() {
                match dotenvy::dotenv() {
                    Ok(path) => debug!("Loaded .env file from: {:?}", path),
                    // Not an error, the configured endpoint is used instead
                    Err(_) => debug!(".env file not found, using configured endpoint"),
                }
            }
        }

        Effect::InitializeSource => {
            let config = &app.store.state().config;
            let endpoint = config.resolved_endpoint();
            info!("Using record endpoint {}", endpoint);
            app.source = Some(Arc::new(HttpRecordSource::new(
                endpoint,
                config.fetch_options(),
            )));
        }

        Effect::FetchRecords { request_id } => match app.source.clone() {
            Some(source) => {
                debug!(
                    "Queueing fetch #{} from {}",
                    request_id,
                    source.endpoint()
                );
                if app
                    .task_tx
                    .send(BackgroundTask::FetchRecords { request_id, source })
                    .is_err()
                {
                    follow_up_actions.push(Action::RecordsLoaded(
                        request_id,
                        Err("Background worker is not running".to_string()),
                    ));
                }
            }
            None => {
                follow_up_actions.push(Action::RecordsLoaded(
                    request_id,
                    Err("Record source not initialized".to_string()),
                ));
            }
        },

        Effect::Batch(effects) => {
            for effect in effects {
                let actions = Box::pin(execute_effect(app, effect)).await?;
                follow_up_actions.extend(actions);
            }
        }
    }

    Ok(follow_up_actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use sheet_records::Record;
    use sheet_source::{FetchError, RecordSource};
    use tokio::sync::mpsc;

    struct EmptySource;

    impl RecordSource for EmptySource {
        fn endpoint(&self) -> &str {
            "memory://empty"
        }

        fn fetch(&self) -> Result<Vec<Record>, FetchError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_fetch_without_source_fails_the_request() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let (task_tx, _task_rx) = mpsc::unbounded_channel();
        let mut app = App::new(action_tx, task_tx, AppState::default());

        let actions = execute_effect(&mut app, Effect::FetchRecords { request_id: 4 })
            .await
            .unwrap();

        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], Action::RecordsLoaded(4, Err(_))));
    }

    #[tokio::test]
    async fn test_fetch_queues_background_task() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let (task_tx, mut task_rx) = mpsc::unbounded_channel();
        let mut app = App::new(action_tx, task_tx, AppState::default());
        app.source = Some(Arc::new(EmptySource));

        let actions = execute_effect(
            &mut app,
            Effect::batch(vec![Effect::batch(vec![Effect::FetchRecords { request_id: 1 }])]),
        )
        .await
        .unwrap();

        assert!(actions.is_empty());
        match task_rx.try_recv().unwrap() {
            BackgroundTask::FetchRecords { request_id, source } => {
                assert_eq!(request_id, 1);
                assert_eq!(source.endpoint(), "memory://empty");
            }
        }
    }

    #[tokio::test]
    async fn test_initialize_source_uses_config_endpoint() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let (task_tx, _task_rx) = mpsc::unbounded_channel();
        let mut state = AppState::default();
        state.config.endpoint = "http://localhost:9/functions".into();
        let mut app = App::new(action_tx, task_tx, state);

        execute_effect(&mut app, Effect::InitializeSource)
            .await
            .unwrap();

        let source = app.source.expect("source initialized");
        // The env override may be set on a developer machine
        if std::env::var(ENDPOINT_ENV_VAR).is_err() {
            assert_eq!(source.endpoint(), "http://localhost:9/functions");
        }
    }
}
