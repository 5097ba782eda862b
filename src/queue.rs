//! Queue contract between the engine and the workers that execute
//! translation tasks.
//!
//! `enqueue` accepts a task for eventual execution and returns immediately;
//! `run_now` executes inline and propagates the dispatcher's error. The
//! bundled Tokio queue spawns detached workers with the background retry
//! preset. The buffering queue holds tasks until drained, which keeps tests
//! deterministic.

use crate::dispatch::{Dispatcher, TranslationTask};
use crate::error::Result;
use crate::retry::{with_retry_if, RetryConfig};
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

pub trait TaskQueue: Send + Sync {
    /// Accept a task for later execution.
    fn enqueue(&self, task: TranslationTask) -> Result<()>;

    /// Execute a task immediately, without retry.
    fn run_now<'a>(&'a self, task: TranslationTask) -> BoxFuture<'a, Result<()>>;
}

/// Queue that runs each task on a detached Tokio worker.
///
/// Failures retry per the configured policy as long as they are transient;
/// exhausted tasks are logged and dropped, the next source change will
/// resubmit them. Must be used inside a Tokio runtime.
pub struct TokioTaskQueue {
    dispatcher: Arc<Dispatcher>,
    retry: RetryConfig,
}

impl TokioTaskQueue {
    pub fn new(dispatcher: Arc<Dispatcher>) -> TokioTaskQueue {
        TokioTaskQueue {
            dispatcher,
            retry: RetryConfig::background_task(),
        }
    }

    /// Override the retry policy for spawned workers.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

impl TaskQueue for TokioTaskQueue {
    fn enqueue(&self, task: TranslationTask) -> Result<()> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let retry = self.retry.clone();

        tokio::spawn(async move {
            let label = task.describe();
            let outcome = with_retry_if(
                &retry,
                &label,
                || dispatcher.dispatch(&task),
                |e| e.is_transient(),
            )
            .await;

            match outcome {
                Ok(_) => debug!("Translation task {} completed", label),
                Err(e) => error!("Translation task {} failed permanently: {}", label, e),
            }
        });

        Ok(())
    }

    fn run_now<'a>(&'a self, task: TranslationTask) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.dispatcher.dispatch(&task).await.map(|_| ()) })
    }
}

/// Queue that buffers tasks instead of running them.
///
/// Nothing executes until [`drain`](TestQueue::drain) is called, so a test
/// can assert on what was submitted, then run it all at a chosen moment.
pub struct TestQueue {
    dispatcher: Arc<Dispatcher>,
    pending: Mutex<Vec<TranslationTask>>,
}

impl TestQueue {
    pub fn new(dispatcher: Arc<Dispatcher>) -> TestQueue {
        TestQueue {
            dispatcher,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Number of buffered tasks.
    pub fn pending(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Locales of the buffered tasks, in submission order.
    pub fn pending_locales(&self) -> Vec<String> {
        self.pending
            .lock()
            .unwrap()
            .iter()
            .map(|task| task.locale.to_string())
            .collect()
    }

    /// Drop all buffered tasks without running them.
    pub fn clear(&self) {
        self.pending.lock().unwrap().clear();
    }

    /// Run every buffered task in submission order and return how many ran.
    ///
    /// The buffer is emptied up front, so a failing task does not stay
    /// queued; earlier successes remain merged.
    pub async fn drain(&self) -> Result<usize> {
        let tasks: Vec<TranslationTask> = self.pending.lock().unwrap().drain(..).collect();
        let count = tasks.len();
        for task in &tasks {
            self.dispatcher.dispatch(task).await?;
        }
        Ok(count)
    }
}

impl TaskQueue for TestQueue {
    fn enqueue(&self, task: TranslationTask) -> Result<()> {
        self.pending.lock().unwrap().push(task);
        Ok(())
    }

    fn run_now<'a>(&'a self, task: TranslationTask) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.dispatcher.dispatch(&task).await.map(|_| ()) })
    }
}
