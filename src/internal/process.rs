//! The step-driven, single-threaded, cooperative process core shared by both solver back ends.
//!
//! A [`ProcessCore`] knows nothing about SAT formulas. It owns the running flag, the step
//! counter, a wall-clock [`Stopwatch`], and the observer list. It does not drive the loop
//! itself — each solver implements its own `start()` as `while self.process.is_running() {
//! self.do_step(); self.process.record_step(); self.notify_observers(); }`, calling back into
//! these primitives at each point. That keeps the "what does one step do" logic solver-specific
//! while sharing the bookkeeping around it.
use std::time::{Duration, Instant};

/// A handle an [`Observer`] uses to read a solver's public state and, if it decides to, cancel
/// the run. Constructed fresh by the solver for each notification round rather than held by the
/// observer between calls — this is what keeps observer and solver from needing a cyclic
/// reference to each other.
pub trait SolverHandle {
    fn steps_count(&self) -> u64;
    fn time_elapsed_ms(&self) -> u64;
    fn solutions_count(&self) -> usize;
    fn max_fitness(&self) -> f32;
    fn min_fitness(&self) -> f32;
    fn avg_fitness(&self) -> f32;
    /// GA-only; 0 for the exhaustive solver.
    fn generation(&self) -> u32;
    fn stop(&mut self);
}

/// Reacts to a solver's progress after every step. `notify` is called synchronously, on the
/// thread that called `start()`, once per step, in registration order.
pub trait Observer {
    fn notify(&mut self, handle: &mut dyn SolverHandle);

    /// Clears any accumulated high-water marks. Most observers are stateless and can use the
    /// default no-op.
    fn reset(&mut self) {}
}

/// An accumulated-total-plus-running-delta wall clock: `elapsed() == accumulated + (now -
/// started_at if currently timing else 0)`.
#[derive(Debug, Default)]
pub struct Stopwatch {
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Stopwatch::default()
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Idempotent: a second `stop()` with no intervening `start()` does nothing.
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += started_at.elapsed();
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started_at = None;
    }

    pub fn elapsed_ms(&self) -> u64 {
        let running = self.started_at.map(|t| t.elapsed()).unwrap_or_default();
        (self.accumulated + running).as_millis() as u64
    }
}

/// The process core proper: running flag, step counter, stopwatch, observer list.
pub struct ProcessCore {
    running: bool,
    steps: u64,
    stopwatch: Stopwatch,
    observers: Vec<Box<dyn Observer>>,
}

impl ProcessCore {
    pub fn new() -> Self {
        ProcessCore { running: false, steps: 0, stopwatch: Stopwatch::new(), observers: Vec::new() }
    }

    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    pub fn steps_count(&self) -> u64 {
        self.steps
    }

    pub fn time_elapsed_ms(&self) -> u64 {
        self.stopwatch.elapsed_ms()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Flips the running flag on and starts the stopwatch. Call once before a solver's step loop.
    pub fn begin(&mut self) {
        self.running = true;
        self.stopwatch.start();
    }

    /// Stops the stopwatch. Call once after a solver's step loop exits.
    pub fn end(&mut self) {
        self.stopwatch.stop();
    }

    pub fn record_step(&mut self) {
        self.steps += 1;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.steps = 0;
        self.stopwatch.reset();
        for observer in &mut self.observers {
            observer.reset();
        }
    }

    /// Temporarily hands ownership of the observer list to the caller, so a solver can iterate
    /// over its observers while also lending itself out as a `&mut dyn SolverHandle` — borrowing
    /// `self.process.observers` and `self` (the solver) mutably at the same time would otherwise
    /// conflict, since both ultimately reach into the same solver struct.
    pub fn take_observers(&mut self) -> Vec<Box<dyn Observer>> {
        std::mem::take(&mut self.observers)
    }

    pub fn restore_observers(&mut self, observers: Vec<Box<dyn Observer>>) {
        self.observers = observers;
    }
}

impl Default for ProcessCore {
    fn default() -> Self {
        Self::new()
    }
}
