//! Timing instrumentation for the editor's hot paths.
//!
//! Hit testing runs on every pointer move and the overlay is rebuilt on every
//! redraw. Enable the `profiling` feature to log how long they take:
//!
//! ```toml
//! [dependencies]
//! fieldmap = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn hit_test() {
//!     profile_scope!("hit_test");
//!     // ... work ...
//! }
//! ```

use std::time::Instant;
use tracing::{trace, warn};

/// Budget for one pointer event or redraw at 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $crate::perf::TARGET_FRAME_MS);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

/// RAII timer: logs the elapsed time of its scope on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let ms = self.elapsed_ms();
        if ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{ms:.2}"),
                threshold_ms = self.threshold_ms,
                "Slow operation"
            );
        } else {
            trace!(operation = self.name, elapsed_ms = format!("{ms:.3}"), "timing");
        }
    }
}
