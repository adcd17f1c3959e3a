//! # Completion Module - Results, Totals and Throughput
//!
//! Holds the values produced when an exercise is completed and the running totals across the
//! session. Throughput is measured in characters per second over correctly completed exercises.
//!
//! Division by zero never leaks out of this module: a zero elapsed time or an empty reference
//! produces no throughput at all instead of `inf` or `NaN`.

use std::fmt::Display;

use web_time::Duration;

use crate::Seconds;

/// Lifecycle of the active exercise
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Nothing correct has been typed yet, the clock isn't running
    #[default]
    NotStarted,
    /// The clock is running
    InProgress,
    /// The typed buffer equals the reference. Terminal
    Completed,
}

impl Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// Characters per second, or `None` when it can't be computed
pub fn throughput(characters: usize, seconds: Seconds) -> Option<f64> {
    (characters > 0 && seconds > 0.0 && seconds.is_finite())
        .then(|| characters as f64 / seconds)
}

/// Format a throughput for display, with two decimal places
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.2}")
}

/// The outcome of completing one exercise
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseResult {
    /// Index of the exercise in the session
    pub index: usize,
    /// Number of characters in the reference text
    pub characters: usize,
    pub elapsed: Duration,
    /// Characters per second
    pub throughput: f64,
    /// True if this was the last exercise of the session
    pub is_last: bool,
}

impl ExerciseResult {
    /// Build a result, returning `None` if the throughput can't be computed
    pub fn new(index: usize, characters: usize, elapsed: Duration, is_last: bool) -> Option<Self> {
        let throughput = throughput(characters, elapsed.as_secs_f64())?;

        Some(Self {
            index,
            characters,
            elapsed,
            throughput,
            is_last,
        })
    }

    pub fn elapsed_seconds(&self) -> Seconds {
        self.elapsed.as_secs_f64()
    }
}

/// Running totals across completed exercises. Never decreases
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Totals {
    pub characters: usize,
    pub seconds: Seconds,
}

impl Totals {
    /// Add a completed exercise to the totals
    pub fn record(&mut self, result: &ExerciseResult) {
        self.characters += result.characters;
        self.seconds += result.elapsed_seconds();
    }

    /// Mean throughput over everything recorded so far, `0.0` if nothing was timed
    pub fn mean_throughput(&self) -> f64 {
        if self.seconds > 0.0 {
            self.characters as f64 / self.seconds
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            characters: self.characters,
            seconds: self.seconds,
            mean_throughput: self.mean_throughput(),
        }
    }
}

/// Final numbers shown once every exercise is done
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub characters: usize,
    pub seconds: Seconds,
    pub mean_throughput: f64,
}

/// Something the learner should be told about
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// An exercise was completed
    ExerciseComplete(ExerciseResult),
    /// The last exercise was completed and its notification dismissed
    Summary(Summary),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throughput() {
        assert_eq!(throughput(100, 20.0), Some(5.0));
        assert_eq!(format_rate(throughput(100, 20.0).unwrap()), "5.00");
        assert_eq!(format_rate(10.0 / 3.0), "3.33");
    }

    #[test]
    fn test_throughput_guards_division_by_zero() {
        assert_eq!(throughput(100, 0.0), None);
        assert_eq!(throughput(0, 20.0), None);
        assert_eq!(throughput(10, f64::INFINITY), None);
    }

    #[test]
    fn test_exercise_result() {
        let result = ExerciseResult::new(0, 100, Duration::from_secs(20), false).unwrap();
        assert_eq!(result.throughput, 5.0);
        assert_eq!(result.elapsed_seconds(), 20.0);

        assert!(ExerciseResult::new(0, 100, Duration::ZERO, false).is_none());
    }

    #[test]
    fn test_totals_accumulate() {
        let mut totals = Totals::default();
        assert_eq!(totals.mean_throughput(), 0.0);

        totals.record(&ExerciseResult::new(0, 30, Duration::from_secs(10), false).unwrap());
        totals.record(&ExerciseResult::new(1, 70, Duration::from_secs(10), true).unwrap());

        assert_eq!(totals.characters, 100);
        assert_eq!(totals.seconds, 20.0);

        let summary = totals.summary();
        assert_eq!(summary.mean_throughput, 5.0);
        assert_eq!(format_rate(summary.mean_throughput), "5.00");
    }

    #[test]
    fn test_progress_display() {
        assert_eq!(Progress::default(), Progress::NotStarted);
        assert_eq!(Progress::InProgress.to_string(), "in progress");
    }
}
