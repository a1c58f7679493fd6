//! Language rotator: the coordinating clock of the hero.

use std::convert::Infallible;
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::cycle::Cycle;
use crate::language::Language;
use crate::ticker::{RepeatingTask, Schedule, TickHandler};

/// Default time each language stays active.
pub const DEFAULT_LANGUAGE_PERIOD: Duration = Duration::from_millis(2500);

struct Rotation {
    cycle: Cycle<Language>,
    current: watch::Sender<Language>,
}

impl TickHandler for Rotation {
    type Command = Infallible;

    fn on_tick(&mut self) {
        self.cycle.advance();
        let language = *self.cycle.current();
        debug!(language = language.key(), "active language rotated");
        self.current.send_if_modified(|current| {
            let changed = *current != language;
            *current = language;
            changed
        });
    }

    fn on_command(&mut self, command: Infallible) -> Schedule {
        match command {}
    }
}

/// Cycles the active language on a fixed period, wrapping around.
///
/// Dropping the rotator cancels its timer.
#[derive(Debug)]
pub struct LanguageRotator {
    task: RepeatingTask<Infallible>,
    current: watch::Receiver<Language>,
}

impl LanguageRotator {
    /// Rotate through every supported language.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(period: Duration) -> Self {
        Self::with_languages(&Language::ALL, period)
    }

    /// Rotate through `languages` in order. An empty list falls back to all
    /// supported languages.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn with_languages(languages: &[Language], period: Duration) -> Self {
        let cycle =
            Cycle::new(languages.to_vec()).unwrap_or_else(|| Cycle::from_array(Language::ALL));
        let (tx, current) = watch::channel(*cycle.current());
        let task = RepeatingTask::start(
            "language-rotator",
            period,
            Rotation {
                cycle,
                current: tx,
            },
        );
        Self { task, current }
    }

    /// The language currently active.
    pub fn current(&self) -> Language {
        *self.current.borrow()
    }

    /// Watch the active language. The channel closes when the rotator stops.
    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.current.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }

    /// Cancel the timer.
    pub fn stop(&mut self) {
        self.task.stop();
    }

    /// Cancel the timer and wait for the task to exit.
    pub async fn shutdown(self) {
        self.task.shutdown().await;
    }
}
