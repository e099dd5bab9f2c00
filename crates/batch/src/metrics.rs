use annotate::{AnnotationOutcome, AnnotationResult};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Per-run counters. The run is sequential, so plain fields are enough.
#[derive(Debug, Default)]
pub struct BatchMetrics {
    total_articles: usize,
    annotated: usize,
    no_match: usize,
    malformed: usize,
    failed: usize,
    total_request_time: Duration,
}

impl BatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &AnnotationResult) {
        self.total_articles += 1;
        self.total_request_time += result.elapsed;

        match result.outcome {
            AnnotationOutcome::Annotated => self.annotated += 1,
            AnnotationOutcome::NoMatch => self.no_match += 1,
            AnnotationOutcome::Malformed => self.malformed += 1,
            AnnotationOutcome::Failed => self.failed += 1,
        }
    }

    pub fn summary(&self, elapsed: Duration) -> BatchSummary {
        BatchSummary {
            total_articles: self.total_articles,
            annotated: self.annotated,
            no_match: self.no_match,
            malformed: self.malformed,
            failed: self.failed,
            avg_request_time_ms: self.avg_request_time_ms(),
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    fn avg_request_time_ms(&self) -> f64 {
        if self.total_articles > 0 {
            self.total_request_time.as_secs_f64() * 1000.0 / self.total_articles as f64
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchSummary {
    pub total_articles: usize,
    pub annotated: usize,
    pub no_match: usize,
    pub malformed: usize,
    pub failed: usize,
    pub avg_request_time_ms: f64,
    pub elapsed_ms: u64,
}

impl BatchSummary {
    /// Articles that ended up with empty lists for any reason.
    pub fn unannotated(&self) -> usize {
        self.no_match + self.malformed + self.failed
    }
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotate::Annotation;

    fn result(outcome: AnnotationOutcome, ms: u64) -> AnnotationResult {
        AnnotationResult {
            annotation: Annotation::empty(),
            outcome,
            elapsed: Duration::from_millis(ms),
        }
    }

    #[test]
    fn test_counts_by_outcome() {
        let mut metrics = BatchMetrics::new();
        metrics.record(&result(AnnotationOutcome::Annotated, 100));
        metrics.record(&result(AnnotationOutcome::Annotated, 300));
        metrics.record(&result(AnnotationOutcome::NoMatch, 200));
        metrics.record(&result(AnnotationOutcome::Failed, 0));

        let summary = metrics.summary(Duration::from_secs(5));
        assert_eq!(summary.total_articles, 4);
        assert_eq!(summary.annotated, 2);
        assert_eq!(summary.no_match, 1);
        assert_eq!(summary.malformed, 0);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.unannotated(), 2);
        assert!((summary.avg_request_time_ms - 150.0).abs() < 1e-6);
        assert_eq!(summary.elapsed_ms, 5000);
    }

    #[test]
    fn test_empty_run() {
        let summary = BatchMetrics::new().summary(Duration::ZERO);
        assert_eq!(summary.total_articles, 0);
        assert_eq!(summary.avg_request_time_ms, 0.0);
    }
}
