//! Per-room countdown state machine.
//!
//! One [`Countdown`] lives inside each room actor. The actor polls
//! [`Countdown::wait`] from its `tokio::select!` loop; the future pends
//! forever while the countdown is idle or paused, so the other branches
//! keep running.
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         signal = countdown.wait() => { /* tick, delay, expiry */ }
//!     }
//! }
//! ```
//!
//! Because the ticking future is owned and polled by the single room task,
//! cancel-then-restart (pause, resume, panic, advance) can never leave two
//! ticking runs alive, and a superseded run can never emit a stale tick.

use std::time::Duration;

use quizfire_protocol::QuestionKind;
use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, warn};

/// Normal tick period: one signal per second.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Accelerated tick period while panic mode is engaged.
pub const PANIC_TICK_PERIOD: Duration = Duration::from_millis(250);

/// Length of the pre-question delay window, in ticks.
pub const DELAY_TICKS: u64 = 3;

/// Panic mode is refused below this many remaining seconds for choice and
/// numeric questions.
pub const PANIC_THRESHOLD_CHOICE: u64 = 10;

/// Higher floor for open-ended questions — graders need a minimum window.
pub const PANIC_THRESHOLD_OPEN: u64 = 20;

/// A signal produced by the countdown. The caller decides what an
/// [`Expired`](CountdownSignal::Expired) means in context: the first
/// countdown of a session means "game may start", any later one means
/// "question timed out".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownSignal {
    /// One tick of the pre-question delay window.
    DelayTick(u64),
    /// The delay window ended; the main countdown begins now.
    QuestionBegins,
    /// One tick of the main countdown, carrying the remaining seconds.
    Tick(u64),
    /// The countdown reached zero.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Counting down the delay window before the main run.
    Delay { ticks_left: u64 },
    Running,
    Paused,
}

/// Countdown timer state for one room.
#[derive(Debug)]
pub struct Countdown {
    /// Duration (in whole seconds) applied on the *next* start.
    configured_secs: u64,
    /// Seconds left in the current run. Survives pause and panic.
    remaining: u64,
    phase: Phase,
    /// Panic mode is one-shot per ticking stretch; reset by `start` and
    /// cleared by `resume`.
    panic_engaged: bool,
    /// When the next signal fires. `None` while idle or paused.
    deadline: Option<TokioInstant>,
}

impl Countdown {
    /// Creates an idle countdown with the given initial duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            configured_secs: duration.as_secs(),
            remaining: 0,
            phase: Phase::Idle,
            panic_engaged: false,
            deadline: None,
        }
    }

    /// Updates the duration used by the next `start`. A running countdown
    /// is not affected.
    pub fn configure(&mut self, duration: Duration) {
        self.configured_secs = duration.as_secs();
    }

    /// Seconds remaining in the current run.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Whether the main countdown is actively ticking.
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Delay { .. })
    }

    /// Whether panic mode has been engaged during the current run.
    pub fn panic_engaged(&self) -> bool {
        self.panic_engaged
    }

    /// Cancels any current run and starts a fresh one from the configured
    /// duration. With `with_delay`, a fixed delay window ticks down first,
    /// ending with [`CountdownSignal::QuestionBegins`].
    pub fn start(&mut self, with_delay: bool) {
        self.remaining = self.configured_secs;
        self.panic_engaged = false;
        self.phase = if with_delay {
            Phase::Delay {
                ticks_left: DELAY_TICKS,
            }
        } else {
            Phase::Running
        };
        self.deadline = Some(TokioInstant::now() + TICK_PERIOD);
        debug!(
            secs = self.configured_secs,
            with_delay, "countdown started"
        );
    }

    /// Engages panic mode: same remaining time, faster ticks.
    ///
    /// Returns `false` (no-op) if panic mode was already engaged this run,
    /// if the countdown is not running, or if the remaining time is under
    /// the kind-dependent threshold.
    pub fn activate_panic(&mut self, kind: QuestionKind) -> bool {
        if self.panic_engaged || !matches!(self.phase, Phase::Running) {
            return false;
        }
        let threshold = match kind {
            QuestionKind::MultipleChoice | QuestionKind::NumericEstimate => {
                PANIC_THRESHOLD_CHOICE
            }
            QuestionKind::OpenEnded => PANIC_THRESHOLD_OPEN,
        };
        if self.remaining < threshold {
            debug!(
                remaining = self.remaining,
                threshold, "panic mode refused — under threshold"
            );
            return false;
        }
        self.panic_engaged = true;
        self.deadline = Some(TokioInstant::now() + PANIC_TICK_PERIOD);
        debug!(remaining = self.remaining, "panic mode engaged");
        true
    }

    /// Freezes the countdown. Returns the frozen remaining value, or `None`
    /// if nothing was running.
    pub fn pause(&mut self) -> Option<u64> {
        if !matches!(self.phase, Phase::Running) {
            return None;
        }
        self.phase = Phase::Paused;
        self.deadline = None;
        debug!(remaining = self.remaining, "countdown paused");
        Some(self.remaining)
    }

    /// Restarts ticking from the frozen remaining value at the normal
    /// period. Leaving a pause always returns to the normal cadence, so
    /// panic mode can be engaged again afterwards. No-op unless paused.
    pub fn resume(&mut self) {
        if !matches!(self.phase, Phase::Paused) {
            return;
        }
        self.phase = Phase::Running;
        self.panic_engaged = false;
        self.deadline = Some(TokioInstant::now() + TICK_PERIOD);
        debug!(remaining = self.remaining, "countdown resumed");
    }

    /// Cancels the current run. The countdown stays allocated and idle,
    /// ready for the next question.
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.deadline = None;
    }

    fn period(&self) -> Duration {
        if self.panic_engaged {
            PANIC_TICK_PERIOD
        } else {
            TICK_PERIOD
        }
    }

    /// Waits for the next signal. Pends forever while idle or paused.
    ///
    /// Cancel-safe: state is only mutated after the sleep completes, so a
    /// `select!` that takes another branch mid-sleep leaves the countdown
    /// exactly where it was.
    pub async fn wait(&mut self) -> CountdownSignal {
        let Some(deadline) = self.deadline else {
            // Idle or paused: never resolves, select! serves other branches.
            std::future::pending::<()>().await;
            unreachable!()
        };

        time::sleep_until(deadline).await;

        match self.phase {
            Phase::Delay { ticks_left } => {
                self.deadline = Some(TokioInstant::now() + TICK_PERIOD);
                if ticks_left > 0 {
                    self.phase = Phase::Delay {
                        ticks_left: ticks_left - 1,
                    };
                    CountdownSignal::DelayTick(ticks_left)
                } else {
                    self.phase = Phase::Running;
                    CountdownSignal::QuestionBegins
                }
            }
            Phase::Running => {
                if self.remaining > 0 {
                    let current = self.remaining;
                    self.remaining -= 1;
                    self.deadline = Some(TokioInstant::now() + self.period());
                    CountdownSignal::Tick(current)
                } else {
                    self.phase = Phase::Idle;
                    self.deadline = None;
                    CountdownSignal::Expired
                }
            }
            // A deadline with no active phase is a state-machine bug.
            // Log and park rather than crashing the room.
            Phase::Idle | Phase::Paused => {
                warn!(phase = ?self.phase, "countdown deadline in inactive phase");
                self.deadline = None;
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}
