//! Stock observers: two cancellation policies and three loggers, all implementing
//! [`Observer`](crate::internal::process::Observer).

use crate::internal::process::{Observer, SolverHandle};

/// Stops the solver once `time_elapsed_ms` exceeds `limit_ms`.
pub struct TimedStop {
    limit_ms: u64,
}

impl TimedStop {
    pub fn new(limit_ms: u64) -> Self {
        TimedStop { limit_ms }
    }
}

impl Observer for TimedStop {
    fn notify(&mut self, handle: &mut dyn SolverHandle) {
        if handle.time_elapsed_ms() > self.limit_ms {
            handle.stop();
        }
    }
}

/// Stops the solver once `solutions_count` reaches `threshold`.
pub struct SolutionsCountStop {
    threshold: usize,
}

impl SolutionsCountStop {
    pub fn new(threshold: usize) -> Self {
        SolutionsCountStop { threshold }
    }
}

impl Observer for SolutionsCountStop {
    fn notify(&mut self, handle: &mut dyn SolverHandle) {
        if handle.solutions_count() >= self.threshold {
            handle.stop();
        }
    }
}

/// Logs a line every time `max_fitness` strictly increases.
#[derive(Default)]
pub struct FitnessWatch {
    high_water_mark: f32,
}

impl Observer for FitnessWatch {
    fn notify(&mut self, handle: &mut dyn SolverHandle) {
        if handle.max_fitness() > self.high_water_mark {
            self.high_water_mark = handle.max_fitness();
            if handle.generation() > 0 {
                log::info!(
                    "gen {} max={:.3} avg={:.3} min={:.3} elapsed={}ms",
                    handle.generation(),
                    handle.max_fitness(),
                    handle.avg_fitness(),
                    handle.min_fitness(),
                    handle.time_elapsed_ms()
                );
            } else {
                log::info!(
                    "max={:.3} avg={:.3} min={:.3} elapsed={}ms",
                    handle.max_fitness(),
                    handle.avg_fitness(),
                    handle.min_fitness(),
                    handle.time_elapsed_ms()
                );
            }
        }
    }

    fn reset(&mut self) {
        self.high_water_mark = 0.0;
    }
}

/// Logs a line every time `solutions_count` strictly increases.
#[derive(Default)]
pub struct ResultsWatch {
    high_water_mark: usize,
}

impl Observer for ResultsWatch {
    fn notify(&mut self, handle: &mut dyn SolverHandle) {
        if handle.solutions_count() > self.high_water_mark {
            self.high_water_mark = handle.solutions_count();
            log::info!("solutions={} elapsed={}ms", handle.solutions_count(), handle.time_elapsed_ms());
        }
    }

    fn reset(&mut self) {
        self.high_water_mark = 0;
    }
}

/// Logs whenever `steps_count * 100 / steps_total` crosses into a new integer percentage.
pub struct ProgressWatch {
    steps_total: u64,
    last_percent: u64,
}

impl ProgressWatch {
    pub fn new(steps_total: u64) -> Self {
        ProgressWatch { steps_total, last_percent: 0 }
    }

    fn percent(&self, steps_count: u64) -> u64 {
        if self.steps_total == 0 {
            100
        } else {
            steps_count.saturating_mul(100) / self.steps_total
        }
    }
}

impl Observer for ProgressWatch {
    fn notify(&mut self, handle: &mut dyn SolverHandle) {
        let percent = self.percent(handle.steps_count());
        if percent != self.last_percent {
            self.last_percent = percent;
            log::info!("progress {percent}%");
        }
    }

    fn reset(&mut self) {
        self.last_percent = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeHandle {
        steps: u64,
        elapsed_ms: u64,
        solutions: usize,
        max_fitness: f32,
        stopped: bool,
        generation: u32,
    }

    impl SolverHandle for FakeHandle {
        fn steps_count(&self) -> u64 {
            self.steps
        }
        fn time_elapsed_ms(&self) -> u64 {
            self.elapsed_ms
        }
        fn solutions_count(&self) -> usize {
            self.solutions
        }
        fn max_fitness(&self) -> f32 {
            self.max_fitness
        }
        fn min_fitness(&self) -> f32 {
            0.0
        }
        fn avg_fitness(&self) -> f32 {
            0.0
        }
        fn generation(&self) -> u32 {
            self.generation
        }
        fn stop(&mut self) {
            self.stopped = true;
        }
    }

    fn handle() -> FakeHandle {
        FakeHandle { steps: 0, elapsed_ms: 0, solutions: 0, max_fitness: 0.0, stopped: false, generation: 0 }
    }

    #[test]
    fn timed_stop_fires_past_the_limit() {
        let mut obs = TimedStop::new(100);
        let mut h = handle();
        h.elapsed_ms = 50;
        obs.notify(&mut h);
        assert!(!h.stopped);
        h.elapsed_ms = 150;
        obs.notify(&mut h);
        assert!(h.stopped);
    }

    #[test]
    fn solutions_count_stop_fires_at_threshold() {
        let mut obs = SolutionsCountStop::new(3);
        let mut h = handle();
        h.solutions = 2;
        obs.notify(&mut h);
        assert!(!h.stopped);
        h.solutions = 3;
        obs.notify(&mut h);
        assert!(h.stopped);
    }

    #[test]
    fn fitness_watch_tracks_high_water_mark_and_resets() {
        let mut obs = FitnessWatch::default();
        let mut h = handle();
        h.max_fitness = 0.5;
        obs.notify(&mut h);
        assert_eq!(obs.high_water_mark, 0.5);
        h.max_fitness = 0.5;
        obs.notify(&mut h); // no strict increase, mark unchanged
        assert_eq!(obs.high_water_mark, 0.5);
        obs.reset();
        assert_eq!(obs.high_water_mark, 0.0);
    }

    #[test]
    fn progress_watch_only_logs_on_percent_change() {
        let mut obs = ProgressWatch::new(100);
        assert_eq!(obs.percent(0), 0);
        assert_eq!(obs.percent(50), 50);
        assert_eq!(obs.percent(100), 100);
    }
}
