//! Timed word cycler.
//!
//! A [`WordCycler`] rotates through an ordered list on a fixed period and
//! publishes what should currently be on screen. Each instance owns a
//! [`RepeatingTask`]; the cycler's state lives inside that task and is only
//! observable through published [`CyclerState`] snapshots.
//!
//! # Transitions
//!
//! Every advance may be paired with an exit transition of the outgoing value
//! (see [`TransitionMode`]). The tick cadence is driven by the wall clock and
//! is never stretched by transitions, but transitions are single-flight: a
//! tick that lands while one is in flight is held as a single pending advance
//! and starts as soon as the current exit completes.
//!
//! # Degenerate input
//!
//! An empty list arms no timer and renders nothing. A single-item list keeps
//! its timer running but never visibly changes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::cycle::Cycle;
use crate::ticker::{RepeatingTask, Schedule, TickHandler};

/// How the outgoing value's exit transition is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionMode {
    /// No transition; the next value is current at the tick.
    Instant,
    /// The exit completes after the given duration, or earlier when
    /// acknowledged.
    Timed(Duration),
    /// The exit completes only when acknowledged by the presenter.
    Acknowledged,
}

impl TransitionMode {
    /// `Timed`, or `Instant` for a zero duration.
    pub fn timed(exit: Duration) -> Self {
        if exit.is_zero() {
            Self::Instant
        } else {
            Self::Timed(exit)
        }
    }
}

/// Rotation settings for one cycler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclerConfig {
    /// Time between advances.
    pub period: Duration,
    /// How exits complete.
    pub transition: TransitionMode,
}

impl CyclerConfig {
    pub fn new(period: Duration, transition: TransitionMode) -> Self {
        Self { period, transition }
    }

    /// Advance every `period` with no transitions.
    pub fn instant(period: Duration) -> Self {
        Self::new(period, TransitionMode::Instant)
    }
}

/// Snapshot of what a cycler is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclerState<T> {
    /// Index of `item` in the current list.
    pub index: usize,
    /// The displayed value.
    pub item: T,
    /// `true` while `item` is running its exit transition.
    pub transitioning: bool,
}

enum Command<T> {
    Replace {
        items: Option<Arc<[T]>>,
        force: bool,
    },
    AcknowledgeExit,
}

struct Flip<T> {
    cycle: Option<Cycle<T>>,
    transition: TransitionMode,
    exiting: bool,
    exit_deadline: Option<Instant>,
    pending: bool,
    state: watch::Sender<Option<CyclerState<T>>>,
}

impl<T: Clone> Flip<T> {
    fn snapshot(&self) -> Option<CyclerState<T>> {
        self.cycle.as_ref().map(|cycle| CyclerState {
            index: cycle.index(),
            item: cycle.current().clone(),
            transitioning: self.exiting,
        })
    }

    fn publish(&self) {
        self.state.send_replace(self.snapshot());
    }

    fn begin_exit(&mut self) {
        match self.transition {
            TransitionMode::Instant => {
                self.advance();
                return;
            }
            TransitionMode::Timed(exit) => self.exit_deadline = Some(Instant::now() + exit),
            TransitionMode::Acknowledged => {}
        }
        self.exiting = true;
        self.publish();
    }

    fn finish_exit(&mut self) {
        self.exiting = false;
        self.exit_deadline = None;
        self.advance();
        if self.pending {
            self.pending = false;
            self.begin_exit();
        }
    }

    fn advance(&mut self) {
        if let Some(cycle) = self.cycle.as_mut() {
            let index = cycle.advance();
            trace!(index, "cycler advanced");
        }
        self.publish();
    }
}

impl<T> TickHandler for Flip<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    type Command = Command<T>;

    fn on_tick(&mut self) {
        let Some(cycle) = self.cycle.as_ref() else {
            return;
        };
        if cycle.len() == 1 {
            return;
        }
        if self.exiting {
            self.pending = true;
            return;
        }
        self.begin_exit();
    }

    fn on_command(&mut self, command: Command<T>) -> Schedule {
        match command {
            Command::Replace { items, force } => {
                let unchanged = match (&self.cycle, &items) {
                    (Some(cycle), Some(items)) => cycle.has_items(items),
                    (None, None) => true,
                    _ => false,
                };
                if unchanged && !force {
                    return Schedule::Keep;
                }
                self.cycle = items.and_then(Cycle::new);
                self.exiting = false;
                self.exit_deadline = None;
                self.pending = false;
                debug!(
                    len = self.cycle.as_ref().map_or(0, Cycle::len),
                    "cycler reset to new list"
                );
                self.publish();
                Schedule::Restart
            }
            Command::AcknowledgeExit => {
                if self.exiting {
                    self.finish_exit();
                }
                Schedule::Keep
            }
        }
    }

    fn is_idle(&self) -> bool {
        self.cycle.is_none()
    }

    fn deadline(&self) -> Option<Instant> {
        self.exit_deadline
    }

    fn on_deadline(&mut self) {
        if self.exiting {
            self.finish_exit();
        } else {
            self.exit_deadline = None;
        }
    }
}

/// A running word cycler.
///
/// Dropping the handle cancels its timer.
pub struct WordCycler<T = String> {
    task: RepeatingTask<Command<T>>,
    state: watch::Receiver<Option<CyclerState<T>>>,
}

impl<T> WordCycler<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Start cycling through `items`, showing the first one immediately.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(items: impl Into<Arc<[T]>>, config: CyclerConfig) -> Self {
        let cycle = Cycle::new(items);
        let (tx, state) = watch::channel(None);
        let flip = Flip {
            cycle,
            transition: config.transition,
            exiting: false,
            exit_deadline: None,
            pending: false,
            state: tx,
        };
        flip.publish();
        let task = RepeatingTask::start("word-cycler", config.period, flip);
        Self { task, state }
    }

    /// The value currently on screen, or `None` when there is nothing to show.
    pub fn current(&self) -> Option<T> {
        self.state.borrow().as_ref().map(|s| s.item.clone())
    }

    /// Full snapshot of the displayed state.
    pub fn state(&self) -> Option<CyclerState<T>> {
        self.state.borrow().clone()
    }

    /// Watch the displayed state. The channel closes when the cycler stops.
    pub fn subscribe(&self) -> watch::Receiver<Option<CyclerState<T>>> {
        self.state.clone()
    }

    /// Switch to a new list.
    ///
    /// If the content differs from the current list, the cycler restarts at
    /// the first item of the new list with a fresh period. An empty list
    /// behaves like [`WordCycler::clear`].
    pub fn replace(&self, items: impl Into<Arc<[T]>>) {
        self.send_list(items.into(), false);
    }

    /// Restart at the first item of `items` with a fresh period, even when
    /// `items` matches the current list.
    pub fn reseed(&self, items: impl Into<Arc<[T]>>) {
        self.send_list(items.into(), true);
    }

    /// Stop rendering anything until a new list is supplied.
    pub fn clear(&self) {
        self.send(Command::Replace {
            items: None,
            force: false,
        });
    }

    /// Report that the outgoing value's exit transition has finished.
    pub fn acknowledge_exit(&self) {
        self.send(Command::AcknowledgeExit);
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    /// Cancel the timer. No state is published afterwards.
    pub fn stop(&mut self) {
        self.task.stop();
    }

    /// Cancel the timer and wait for the task to exit.
    pub async fn shutdown(self) {
        self.task.shutdown().await;
    }

    fn send_list(&self, items: Arc<[T]>, force: bool) {
        let items = if items.is_empty() { None } else { Some(items) };
        self.send(Command::Replace { items, force });
    }

    fn send(&self, command: Command<T>) {
        if !self.task.send(command) {
            debug!("command sent to stopped cycler ignored");
        }
    }
}

impl<T> std::fmt::Debug for WordCycler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordCycler")
            .field("task", &self.task.name())
            .finish_non_exhaustive()
    }
}
