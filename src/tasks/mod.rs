//! Task orchestration
//!
//! An install or scaffold cycle is a list of named, skippable,
//! potentially-failing steps. [`TaskList`] runs them in declared order
//! (or concurrently for independent batches), surfacing each title as a
//! progress spinner and aggregating failures.
//!
//! Predicates are re-evaluated when a task comes up for execution, not
//! when the list is built: an earlier task may have mutated the flags a
//! later task's `skip` check consumes.

use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;
use trellis_core::TrellisResult;

pub type TaskFuture = Pin<Box<dyn Future<Output = TrellisResult<()>> + Send>>;

type EnabledFn<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;
type SkipFn<C> = Box<dyn Fn(&C) -> Option<String> + Send + Sync>;
type RunFn<C> = Box<dyn Fn(&C) -> TaskFuture + Send + Sync>;

/// One named step of a pipeline.
///
/// The run closure is invoked at execution time with the shared context;
/// it reads whatever state it needs and returns the future performing the
/// actual work.
pub struct Task<C> {
    title: String,
    enabled: EnabledFn<C>,
    skip: SkipFn<C>,
    run: RunFn<C>,
}

impl<C> Task<C> {
    pub fn new<F, Fut>(title: impl Into<String>, run: F) -> Self
    where
        F: Fn(&C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TrellisResult<()>> + Send + 'static,
    {
        Self {
            title: title.into(),
            enabled: Box::new(|_| true),
            skip: Box::new(|_| None),
            run: Box::new(move |ctx| Box::pin(run(ctx))),
        }
    }

    /// Omit the task from execution and display entirely when the
    /// predicate returns false.
    pub fn enabled_if<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.enabled = Box::new(predicate);
        self
    }

    /// Skip the task, reporting the returned reason, when the check
    /// returns `Some`.
    pub fn skip_if<F>(mut self, check: F) -> Self
    where
        F: Fn(&C) -> Option<String> + Send + Sync + 'static,
    {
        self.skip = Box::new(check);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Execution options for a task batch.
#[derive(Debug, Clone, Copy)]
pub struct TaskOptions {
    /// Run independent tasks in parallel. Must stay `false` for manifest
    /// install flows, where each step depends on the previous one.
    pub concurrent: bool,
    /// Halt at the first failure. When `false`, remaining tasks still
    /// run and the first failure is reported at the end.
    pub exit_on_error: bool,
}

impl Default for TaskOptions {
    fn default() -> Self {
        Self {
            concurrent: false,
            exit_on_error: true,
        }
    }
}

/// An ordered batch of tasks sharing a context.
pub struct TaskList<C> {
    tasks: Vec<Task<C>>,
    options: TaskOptions,
}

impl<C: Sync> TaskList<C> {
    pub fn new(options: TaskOptions) -> Self {
        Self {
            tasks: Vec::new(),
            options,
        }
    }

    pub fn push(&mut self, task: Task<C>) {
        self.tasks.push(task);
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub async fn run(&self, ctx: &C) -> TrellisResult<()> {
        if self.options.concurrent {
            self.run_concurrent(ctx).await
        } else {
            self.run_sequential(ctx).await
        }
    }

    async fn run_sequential(&self, ctx: &C) -> TrellisResult<()> {
        let mut first_failure = None;

        for task in &self.tasks {
            if !(task.enabled)(ctx) {
                debug!(task = %task.title, "task disabled");
                continue;
            }
            if let Some(reason) = (task.skip)(ctx) {
                report_skipped(&task.title, &reason);
                continue;
            }

            let spinner = spinner(&task.title);
            match (task.run)(ctx).await {
                Ok(()) => spinner.finish_with_message(format!("✓ {}", task.title)),
                Err(e) => {
                    spinner.finish_with_message(format!("✗ {}", task.title));
                    if self.options.exit_on_error {
                        return Err(e);
                    }
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn run_concurrent(&self, ctx: &C) -> TrellisResult<()> {
        let mut pending = Vec::new();

        for task in &self.tasks {
            if !(task.enabled)(ctx) {
                debug!(task = %task.title, "task disabled");
                continue;
            }
            if let Some(reason) = (task.skip)(ctx) {
                report_skipped(&task.title, &reason);
                continue;
            }

            let future = (task.run)(ctx);
            let title = task.title.clone();
            pending.push(async move { (title, future.await) });
        }

        let results = join_all(pending).await;

        let mut first_failure = None;
        for (title, result) in results {
            match result {
                Ok(()) => println!("✓ {}", title),
                Err(e) => {
                    println!("✗ {}", title);
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn report_skipped(title: &str, reason: &str) {
    println!("- {} (skipped: {})", title, reason);
}

fn spinner(title: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(title.to_string());
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static spinner template"),
    );
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
