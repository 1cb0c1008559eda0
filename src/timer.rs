use std::fmt;
use std::time::Instant;

/// Millisecond stopwatch for timing kernel runs.
///
/// ```
/// use tilegemm::MilliTimer;
///
/// let mut timer = MilliTimer::new();
/// timer.start();
/// // ... work ...
/// timer.stop();
/// assert!(timer.elapsed_ms() < 60_000);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MilliTimer {
    start: Option<Instant>,
    end: Option<Instant>,
}

impl MilliTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the start instant and discards any previous stop.
    pub fn start(&mut self) {
        self.start = Some(Instant::now());
        self.end = None;
    }

    /// Records the end instant. Has no effect before [`MilliTimer::start`].
    pub fn stop(&mut self) {
        if self.start.is_some() {
            self.end = Some(Instant::now());
        }
    }

    /// Whole milliseconds between `start` and `stop`, or 0 if either is missing.
    pub fn elapsed_ms(&self) -> u128 {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end.duration_since(start).as_millis(),
            _ => 0,
        }
    }

    /// Prints the elapsed time as `"<n> ms"`.
    pub fn show_gap(&self) {
        println!("{self}");
    }
}

impl fmt::Display for MilliTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.elapsed_ms())
    }
}
