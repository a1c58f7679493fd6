//! Repeating timer task with an explicit start/stop lifecycle.
//!
//! A [`RepeatingTask`] owns a spawned Tokio task that drives a
//! [`TickHandler`] on a fixed wall-clock period. The handler owns all of its
//! state; the outside world talks to it only through commands and observes it
//! through whatever channels the handler publishes on.
//!
//! The timer is released on every exit path: [`RepeatingTask::stop`],
//! [`RepeatingTask::shutdown`], and `Drop` all cancel the task.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Shortest period a task will run at. Tokio intervals reject zero.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// What a handler wants done with the period after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Leave the next tick where it is.
    Keep,
    /// Start a fresh period from now.
    Restart,
}

/// State machine driven by a [`RepeatingTask`].
///
/// All methods run on the task, one at a time, so implementations need no
/// locking.
pub trait TickHandler: Send + 'static {
    /// Messages accepted from the task's owner.
    type Command: Send + 'static;

    /// Called once per period while the handler is not idle.
    fn on_tick(&mut self);

    /// Called for every command sent through [`RepeatingTask::send`].
    fn on_command(&mut self, command: Self::Command) -> Schedule;

    /// While idle, no ticks are delivered.
    fn is_idle(&self) -> bool {
        false
    }

    /// Optional one-shot deadline, independent of the period.
    fn deadline(&self) -> Option<Instant> {
        None
    }

    /// Called when [`TickHandler::deadline`] is reached.
    fn on_deadline(&mut self) {}
}

/// Handle to a running repeating task.
#[derive(Debug)]
pub struct RepeatingTask<C> {
    name: &'static str,
    commands: mpsc::UnboundedSender<C>,
    stop: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl<C: Send + 'static> RepeatingTask<C> {
    /// Spawn `handler` on the current Tokio runtime, ticking every `period`.
    ///
    /// The first tick fires one full period after this call.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start<H>(name: &'static str, period: Duration, handler: H) -> Self
    where
        H: TickHandler<Command = C>,
    {
        let period = period.max(MIN_PERIOD);
        let first_tick = Instant::now() + period;
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (stop, stop_rx) = watch::channel(false);

        let handle = tokio::spawn(run(name, first_tick, period, handler, command_rx, stop_rx));

        #[allow(clippy::cast_possible_truncation)]
        let period_ms = period.as_millis() as u64;
        debug!(task = name, period_ms, "repeating task started");

        Self {
            name,
            commands,
            stop,
            handle: Some(handle),
        }
    }
}

impl<C> RepeatingTask<C> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Deliver a command to the handler. Returns `false` once the task is gone.
    pub fn send(&self, command: C) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the timer immediately. Idempotent.
    pub fn stop(&mut self) {
        let _ = self.stop.send(true);
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!(task = self.name, "repeating task stopped");
        }
    }

    /// Signal the task to stop and wait until it has exited.
    pub async fn shutdown(mut self) {
        let _ = self.stop.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl<C> Drop for RepeatingTask<C> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run<H: TickHandler>(
    name: &'static str,
    first_tick: Instant,
    period: Duration,
    mut handler: H,
    mut commands: mpsc::UnboundedReceiver<H::Command>,
    mut stop: watch::Receiver<bool>,
) {
    let mut interval = time::interval_at(first_tick, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let idle = handler.is_idle();
        let deadline = handler.deadline();

        tokio::select! {
            biased;

            _ = stop.changed() => break,
            command = commands.recv() => match command {
                Some(command) => {
                    if handler.on_command(command) == Schedule::Restart {
                        interval.reset();
                    }
                }
                None => break,
            },
            () = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                handler.on_deadline();
            }
            _ = interval.tick(), if !idle => handler.on_tick(),
        }
    }

    debug!(task = name, "repeating task exited");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Counter {
        ticks: Arc<AtomicU32>,
        idle: bool,
    }

    impl TickHandler for Counter {
        type Command = bool;

        fn on_tick(&mut self) {
            self.ticks.fetch_add(1, Ordering::SeqCst);
        }

        fn on_command(&mut self, idle: bool) -> Schedule {
            self.idle = idle;
            Schedule::Restart
        }

        fn is_idle(&self) -> bool {
            self.idle
        }
    }

    fn counter(idle: bool) -> (Counter, Arc<AtomicU32>) {
        let ticks = Arc::new(AtomicU32::new(0));
        (
            Counter {
                ticks: Arc::clone(&ticks),
                idle,
            },
            ticks,
        )
    }

    const PERIOD: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let (handler, ticks) = counter(false);
        let _task = RepeatingTask::start("counter", PERIOD, handler);

        time::sleep(PERIOD / 2).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        time::sleep(PERIOD * 3).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_timer() {
        let (handler, ticks) = counter(false);
        let mut task = RepeatingTask::start("counter", PERIOD, handler);

        time::sleep(PERIOD + PERIOD / 2).await;
        task.stop();
        assert!(!task.is_running());
        time::sleep(PERIOD * 10).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        assert!(!task.send(true));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_waits_for_exit() {
        let (handler, ticks) = counter(false);
        let task = RepeatingTask::start("counter", PERIOD, handler);
        task.shutdown().await;

        time::sleep(PERIOD * 5).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_timer() {
        let (handler, ticks) = counter(false);
        let task = RepeatingTask::start("counter", PERIOD, handler);
        drop(task);

        time::sleep(PERIOD * 5).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_handler_receives_no_ticks() {
        let (handler, ticks) = counter(true);
        let task = RepeatingTask::start("counter", PERIOD, handler);

        time::sleep(PERIOD * 5).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        // Waking up restarts the period from now.
        assert!(task.send(false));
        time::sleep(PERIOD / 2).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
        time::sleep(PERIOD).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_clamped() {
        let (handler, ticks) = counter(false);
        let _task = RepeatingTask::start("counter", Duration::ZERO, handler);

        time::sleep(Duration::from_millis(5) + Duration::from_micros(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 5);
    }
}
