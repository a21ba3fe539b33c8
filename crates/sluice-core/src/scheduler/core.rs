//! Scheduler core: admission, execution, retry, and batch awaiting.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::debug;

use super::record::{CompletedTask, TaskRecord};
use crate::action::Action;
use crate::config::SchedulerConfig;
use crate::error::{SchedulerError, TaskFailure};
use crate::events::{NoopObserver, Observer, SchedulerEvent};
use crate::ids::TaskId;
use crate::observability::{SchedulerCounts, SchedulerStats};

/// Mutable scheduler state.
///
/// All four containers plus the paused flag are touched from submissions,
/// completion callbacks, and pause/resume, so everything lives behind one
/// mutex and every transition happens with the lock held.
struct Inner<T> {
    /// Tasks waiting for admission, in FIFO order. Retries re-enter at the
    /// back.
    pending: VecDeque<TaskRecord<T>>,

    /// Ids of tasks currently executing.
    executing: HashSet<TaskId>,

    /// Finished tasks in completion order. Only ever grows.
    completed: Vec<CompletedTask<T>>,

    /// Ids present in `completed`, for batch membership checks.
    completed_ids: HashSet<TaskId>,

    /// While set, the admission pass admits nothing.
    paused: bool,

    /// Next task id to assign.
    next_task_id: u64,

    stats: SchedulerStats,
}

impl<T> Inner<T> {
    fn new(config: &SchedulerConfig) -> Self {
        Self {
            pending: VecDeque::new(),
            executing: HashSet::new(),
            completed: Vec::new(),
            completed_ids: HashSet::new(),
            paused: config.start_paused,
            next_task_id: 1,
            stats: SchedulerStats::default(),
        }
    }

    fn allocate_task_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_task_id);
        self.next_task_id += 1;
        id
    }

    fn push_completed(&mut self, task: CompletedTask<T>) {
        self.completed_ids.insert(task.id);
        self.completed.push(task);
    }
}

/// State shared between the scheduler handle, batch handles, and spawned
/// executions.
struct Shared<T> {
    config: SchedulerConfig,
    inner: Mutex<Inner<T>>,
    observer: Arc<dyn Observer>,

    /// Bumped on every terminal completion. Batch waiters re-check their id
    /// set on each change; the watch channel's version tracking makes the
    /// check-then-wait sequence lossless.
    epoch_tx: watch::Sender<u64>,
}

impl<T: Clone + Send + 'static> Shared<T> {
    /// Admission pass: move pending work into execution while the predicate
    /// holds (not paused, work pending, capacity free).
    ///
    /// Always called with the state lock held, which makes it safe to invoke
    /// from any number of racing completion callbacks: they serialize on the
    /// mutex and each sees the executing set the previous one left behind.
    fn admit(self: Arc<Self>, inner: &mut Inner<T>) {
        while !inner.paused
            && !inner.pending.is_empty()
            && self.config.has_capacity(inner.executing.len())
        {
            let Some(mut record) = inner.pending.pop_front() else {
                break;
            };
            record.start_attempt();
            inner.executing.insert(record.id);
            inner.stats.peak_executing = inner.stats.peak_executing.max(inner.executing.len());

            let attempt = record.attempt();
            debug!(id = %record.id, attempt, executing = inner.executing.len(), "task admitted");
            self.observer.observe(&SchedulerEvent::TaskStarted {
                id: record.id,
                attempt,
            });

            let shared = Arc::clone(&self);
            tokio::spawn(async move {
                let result = record.action.run().await;
                shared.settle(record, result).await;
            });
        }
    }

    /// Completion callback: record the outcome or re-queue for retry, then
    /// run another admission pass to backfill the freed capacity.
    async fn settle(self: Arc<Self>, mut record: TaskRecord<T>, result: Result<T, String>) {
        let finished = {
            let mut inner = self.inner.lock().await;
            inner.executing.remove(&record.id);

            let finished = match result {
                Ok(value) => {
                    debug!(id = %record.id, "task succeeded");
                    self.observer
                        .observe(&SchedulerEvent::TaskSucceeded { id: record.id });
                    inner.stats.total_succeeded += 1;
                    inner.push_completed(CompletedTask {
                        id: record.id,
                        attempts: record.attempt(),
                        result: Ok(value),
                    });
                    true
                }
                Err(_) if record.retries < self.config.max_retries => {
                    record.requeue();
                    debug!(id = %record.id, attempt = record.attempt(), "task re-queued for retry");
                    self.observer.observe(&SchedulerEvent::TaskRetried {
                        id: record.id,
                        attempt: record.attempt(),
                    });
                    inner.stats.total_retries += 1;
                    inner.pending.push_back(record);
                    false
                }
                Err(message) => {
                    let attempts = record.attempt();
                    debug!(id = %record.id, attempts, "task failed permanently");
                    self.observer.observe(&SchedulerEvent::TaskFailed {
                        id: record.id,
                        attempts,
                    });
                    inner.stats.total_failed += 1;
                    inner.push_completed(CompletedTask {
                        id: record.id,
                        attempts,
                        result: Err(TaskFailure {
                            id: record.id,
                            attempts,
                            message,
                        }),
                    });
                    true
                }
            };

            Arc::clone(&self).admit(&mut inner);
            finished
        };

        // Notify waiters outside the lock.
        if finished {
            self.epoch_tx.send_modify(|epoch| *epoch += 1);
        }
    }
}

/// Concurrency-limited task scheduler.
///
/// Runs submitted actions with at most `concurrency` in flight, retries
/// failures up to `max_retries` re-queues per task, and can be paused and
/// resumed externally. Cloning yields another handle to the same scheduler.
pub struct Scheduler<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Scheduler<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> Scheduler<T> {
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_observer(config, Arc::new(NoopObserver))
    }

    pub fn with_observer(config: SchedulerConfig, observer: Arc<dyn Observer>) -> Self {
        let inner = Inner::new(&config);
        let (epoch_tx, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                config,
                inner: Mutex::new(inner),
                observer,
                epoch_tx,
            }),
        }
    }

    /// Submit one action. Sugar for a single-element [`submit`](Self::submit).
    pub async fn submit_one<A>(&self, action: A) -> Result<Batch<T>, SchedulerError>
    where
        A: Action<T> + 'static,
    {
        self.submit([action]).await
    }

    /// Submit a batch of actions.
    ///
    /// Each action becomes a task with a fresh id and a zeroed retry count,
    /// appended to the pending list. If the scheduler is not paused, an
    /// admission pass runs before this returns. The returned [`Batch`] waits
    /// for exactly the ids created here, so overlapping `submit` calls do
    /// not disturb each other's completion accounting.
    pub async fn submit<A, I>(&self, actions: I) -> Result<Batch<T>, SchedulerError>
    where
        A: Action<T> + 'static,
        I: IntoIterator<Item = A>,
    {
        let mut inner = self.shared.inner.lock().await;

        let mut ids = Vec::new();
        for action in actions {
            let id = inner.allocate_task_id();
            inner.stats.total_submitted += 1;
            inner.pending.push_back(TaskRecord::new(id, Arc::new(action)));
            self.shared
                .observer
                .observe(&SchedulerEvent::TaskSubmitted { id });
            ids.push(id);
        }

        if ids.is_empty() {
            return Err(SchedulerError::EmptyBatch);
        }

        if inner.paused {
            debug!(tasks = ids.len(), "scheduler is paused, holding batch");
        } else {
            Arc::clone(&self.shared).admit(&mut inner);
        }

        Ok(Batch {
            shared: Arc::clone(&self.shared),
            ids,
        })
    }

    /// Stop admitting new work. Tasks already executing are unaffected.
    /// Idempotent.
    pub async fn pause(&self) {
        let mut inner = self.shared.inner.lock().await;
        if !inner.paused {
            inner.paused = true;
            debug!("scheduler paused");
            self.shared.observer.observe(&SchedulerEvent::Paused);
        }
    }

    /// Resume admission and immediately run an admission pass. Idempotent
    /// (resuming a running scheduler just re-triggers admission).
    pub async fn resume(&self) {
        let mut inner = self.shared.inner.lock().await;
        if inner.paused {
            inner.paused = false;
            debug!("scheduler resumed");
            self.shared.observer.observe(&SchedulerEvent::Resumed);
        }
        Arc::clone(&self.shared).admit(&mut inner);
    }

    /// Snapshot of task counts by state.
    pub async fn counts(&self) -> SchedulerCounts {
        let inner = self.shared.inner.lock().await;
        SchedulerCounts {
            pending: inner.pending.len(),
            executing: inner.executing.len(),
            succeeded: inner.completed.iter().filter(|c| c.result.is_ok()).count(),
            dead: inner.completed.iter().filter(|c| c.result.is_err()).count(),
        }
    }

    /// Lifetime totals.
    pub async fn stats(&self) -> SchedulerStats {
        let inner = self.shared.inner.lock().await;
        inner.stats.clone()
    }
}

/// Handle returned by [`Scheduler::submit`]: the completion target is the
/// exact set of task ids created by that call.
pub struct Batch<T> {
    shared: Arc<Shared<T>>,
    ids: Vec<TaskId>,
}

impl<T: Clone + Send + 'static> Batch<T> {
    /// Ids of the tasks in this batch, in submission order.
    pub fn task_ids(&self) -> &[TaskId] {
        &self.ids
    }

    /// Wait until every task in this batch has finished (including retries),
    /// then return the results in completion order.
    ///
    /// A terminal task failure shows up as an `Err` element; it never aborts
    /// the batch.
    pub async fn wait(self) -> Vec<Result<T, TaskFailure>> {
        let mut epoch_rx = self.shared.epoch_tx.subscribe();
        loop {
            // Mark the current epoch seen before checking, so a completion
            // that lands between the check and the wait still wakes us.
            epoch_rx.borrow_and_update();

            {
                let inner = self.shared.inner.lock().await;
                if self.ids.iter().all(|id| inner.completed_ids.contains(id)) {
                    self.shared
                        .observer
                        .observe(&SchedulerEvent::BatchCompleted {
                            tasks: self.ids.len(),
                        });
                    let wanted: HashSet<TaskId> = self.ids.iter().copied().collect();
                    return inner
                        .completed
                        .iter()
                        .filter(|c| wanted.contains(&c.id))
                        .map(|c| c.result.clone())
                        .collect();
                }
            }

            // The sender lives in `shared`, which this batch holds, so the
            // channel cannot close while we wait.
            let _ = epoch_rx.changed().await;
        }
    }
}
