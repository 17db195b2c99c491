//! Rolling statistics over recent tick durations.

use std::time::Duration;

use circular_buffer::CircularBuffer;
use thousands::Separable;

/// The number of tick durations kept for statistics.
pub const TIMING_WINDOW_SIZE: usize = 120;

#[derive(Debug, Default)]
pub struct TickTimings {
    buffer: CircularBuffer<TIMING_WINDOW_SIZE, Duration>,
    total_ticks: u64,
    late_ticks: u64,
}

impl TickTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records how long a tick took, counting it as late if it overran `budget`.
    pub fn record(&mut self, duration: Duration, budget: Duration) {
        self.buffer.push_back(duration);
        self.total_ticks += 1;
        if duration > budget {
            self.late_ticks += 1;
        }
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn late_ticks(&self) -> u64 {
        self.late_ticks
    }

    /// Mean and sample standard deviation of the window, using Welford's algorithm.
    pub fn stats(&self) -> (Duration, Duration) {
        let mut count = 0u32;
        let mut mean = 0.0f64;
        let mut sum_squared_diff = 0.0f64;

        for duration in self.buffer.iter() {
            let secs = duration.as_secs_f64();
            count += 1;
            let diff = secs - mean;
            mean += diff / count as f64;
            sum_squared_diff += diff * (secs - mean);
        }

        if count == 0 {
            return (Duration::ZERO, Duration::ZERO);
        }
        let variance = if count > 1 { sum_squared_diff / (count - 1) as f64 } else { 0.0 };
        (Duration::from_secs_f64(mean), Duration::from_secs_f64(variance.sqrt()))
    }

    /// A one-line summary for logging.
    pub fn summary(&self) -> String {
        let (mean, std_dev) = self.stats();
        format!(
            "{} ticks ({} late), mean {:.3}ms ± {:.3}ms",
            self.total_ticks.separate_with_commas(),
            self.late_ticks.separate_with_commas(),
            mean.as_secs_f64() * 1000.0,
            std_dev.as_secs_f64() * 1000.0
        )
    }
}
