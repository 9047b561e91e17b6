//! Injectable tick schedulers.
//!
//! A level does not own a timer directly; it hands its tick body to a
//! [`Scheduler`]. Gameplay uses the thread-backed [`IntervalScheduler`],
//! while tests drive ticks deterministically through a [`StepScheduler`]
//! instead of sleeping on the wall clock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::trace;

/// The tick body. Returns `false` when the scheduler should deactivate
/// (the level ended on this tick).
pub type TickFn = Box<dyn FnMut() -> bool + Send>;

/// Drives a level's NPC ticks.
pub trait Scheduler: Send {
    /// Activates the scheduler with the given tick body. No-op when already
    /// active.
    fn start(&mut self, tick: TickFn);

    /// Deactivates the scheduler. Idempotent. A tick already in progress
    /// runs to completion before this returns; no further tick starts.
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

/// Thread-backed scheduler invoking the tick body at a fixed interval.
pub struct IntervalScheduler {
    interval: Duration,
    cancel: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> IntervalScheduler {
        IntervalScheduler {
            interval,
            cancel: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&mut self, mut tick: TickFn) {
        if self.running.load(Ordering::Acquire) {
            return;
        }
        // Reap a thread that ended on its own before spawning a new one.
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }

        self.cancel.store(false, Ordering::Release);
        self.running.store(true, Ordering::Release);

        let cancel = Arc::clone(&self.cancel);
        let running = Arc::clone(&self.running);
        let interval = self.interval;
        self.handle = Some(thread::spawn(move || {
            trace!(?interval, "tick thread started");
            loop {
                thread::sleep(interval);
                if cancel.load(Ordering::Acquire) {
                    break;
                }
                if !tick() {
                    break;
                }
            }
            running.store(false, Ordering::Release);
            trace!("tick thread exited");
        }));
    }

    fn stop(&mut self) {
        self.cancel.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        self.running.store(false, Ordering::Release);
    }

    fn is_active(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

struct StepInner {
    tick: Option<TickFn>,
    active: bool,
}

/// Manually stepped scheduler for deterministic tests.
///
/// Holds the tick body until a [`StepHandle`] advances it; no thread, no
/// wall-clock waits.
pub struct StepScheduler {
    inner: Arc<Mutex<StepInner>>,
}

impl StepScheduler {
    pub fn new() -> StepScheduler {
        StepScheduler {
            inner: Arc::new(Mutex::new(StepInner { tick: None, active: false })),
        }
    }

    /// A handle for advancing ticks after the scheduler has been moved into
    /// a level.
    pub fn handle(&self) -> StepHandle {
        StepHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for StepScheduler {
    fn default() -> Self {
        StepScheduler::new()
    }
}

impl Scheduler for StepScheduler {
    fn start(&mut self, tick: TickFn) {
        let mut inner = self.inner.lock();
        if inner.active {
            return;
        }
        inner.tick = Some(tick);
        inner.active = true;
    }

    fn stop(&mut self) {
        self.inner.lock().active = false;
    }

    fn is_active(&self) -> bool {
        self.inner.lock().active
    }
}

/// Advances a [`StepScheduler`] one tick at a time.
#[derive(Clone)]
pub struct StepHandle {
    inner: Arc<Mutex<StepInner>>,
}

impl StepHandle {
    /// Runs a single tick if the scheduler is active. Returns whether the
    /// scheduler remains active afterwards.
    pub fn tick(&self) -> bool {
        let mut inner = self.inner.lock();
        if !inner.active {
            return false;
        }
        let Some(tick) = inner.tick.as_mut() else {
            return false;
        };
        let keep_going = tick();
        if !keep_going {
            inner.active = false;
        }
        keep_going
    }

    /// Runs up to `count` ticks, stopping early if the scheduler deactivates.
    pub fn ticks(&self, count: usize) {
        for _ in 0..count {
            if !self.tick() {
                break;
            }
        }
    }
}
