//! Count reporting

use serde::Serialize;
use std::fmt;

/// Final object count, with accuracy against a known ground truth
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountReport {
    /// Number of components found
    pub count: u32,
    /// Ground-truth count, when one was supplied and positive
    pub expected: Option<u64>,
    /// `100 * count / expected`
    pub accuracy_percent: Option<f64>,
}

/// Build a count report
///
/// Accuracy is only computed against a positive expected count; a missing,
/// zero or negative expectation yields a report without accuracy.
pub fn report(count: u32, expected: Option<i64>) -> CountReport {
    let expected = expected.filter(|&e| e > 0).map(|e| e as u64);
    CountReport {
        count,
        expected,
        accuracy_percent: expected.map(|e| 100.0 * count as f64 / e as f64),
    }
}

impl fmt::Display for CountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "count: {}", self.count)?;
        if let (Some(expected), Some(accuracy)) = (self.expected, self.accuracy_percent) {
            write!(f, " (expected {expected}, accuracy {accuracy:.2}%)")?;
        }
        Ok(())
    }
}
