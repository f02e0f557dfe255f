use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TimerEvent {
    Key(KeyEvent),
    Resize,
    /// One armed interval period elapsed
    Second,
    /// Nothing happened within the idle timeout
    Idle,
    /// The input source is gone; no key can arrive any more
    Disconnected,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait TimerEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TimerEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(TimerEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(TimerEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(%err, "terminal event reader stopped");
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn seconds() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TimerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TimerEvent>) -> Self {
        Self { rx }
    }
}

impl TimerEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

const IDLE_TIMEOUT: Duration = Duration::from_millis(250);

/// Runner that owns the single repeating interval and hands out one event at a time.
///
/// The interval lives in one `Option` slot, so arming twice never yields two
/// overlapping timers and disarming cancels the pending period.
pub struct Runner<E: TimerEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_deadline: Option<Instant>,
}

impl<E: TimerEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            next_deadline: None,
        }
    }

    /// Start the interval. The first `Second` arrives one full period from now.
    /// Already armed intervals keep their current deadline.
    pub fn arm(&mut self) {
        if self.next_deadline.is_none() {
            self.next_deadline = Some(Instant::now() + self.ticker.interval());
        }
    }

    /// Cancel the interval, dropping any partially elapsed period
    pub fn disarm(&mut self) {
        self.next_deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// When the pending `Second` is due, if armed
    pub fn deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    /// Arm or disarm so the interval runs exactly while `running` holds
    pub fn sync(&mut self, running: bool) {
        if running {
            self.arm();
        } else {
            self.disarm();
        }
    }

    /// Blocks until the next input event or interval deadline, whichever comes first.
    /// Returns `Idle` after a short timeout when disarmed so the caller can redraw,
    /// and `Disconnected` once the input source has hung up.
    pub fn step(&mut self) -> TimerEvent {
        let Some(deadline) = self.next_deadline else {
            return match self.event_source.recv_timeout(IDLE_TIMEOUT) {
                Ok(ev) => ev,
                Err(RecvTimeoutError::Timeout) => TimerEvent::Idle,
                Err(RecvTimeoutError::Disconnected) => TimerEvent::Disconnected,
            };
        };

        // behind schedule: pending input first, the second fires on the next call
        let wait = deadline.saturating_duration_since(Instant::now());
        match self.event_source.recv_timeout(wait) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.fire(deadline),
            Err(RecvTimeoutError::Disconnected) => TimerEvent::Disconnected,
        }
    }

    // next period counts from the previous deadline so seconds do not drift
    fn fire(&mut self, deadline: Instant) -> TimerEvent {
        self.next_deadline = Some(deadline + self.ticker.interval());
        TimerEvent::Second
    }
}
