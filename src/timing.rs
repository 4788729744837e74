//! Workflow phase timing.
//!
//! The build workflow runs as named phases (staging, port build, artifact
//! copy). Each phase logs when it starts and how long it took, or how long
//! it ran before failing, so slow or broken steps stand out in CI logs.

use anyhow::Result;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// A step of the build workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    StageModules,
    BuildPort,
    CopyArtifacts,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::StageModules => "stage extra modules",
            Phase::BuildPort => "build port",
            Phase::CopyArtifacts => "copy artifacts",
        };
        f.write_str(name)
    }
}

/// Run `step` as `phase`, logging its outcome and duration.
///
/// The step's error is returned unchanged.
pub fn run_phase<T>(phase: Phase, step: impl FnOnce() -> Result<T>) -> Result<T> {
    info!("==> {}", phase);
    let start = Instant::now();
    let result = step();
    let elapsed = format_elapsed(start.elapsed());
    match &result {
        Ok(_) => info!(%phase, %elapsed, "phase finished"),
        Err(_) => warn!(%phase, %elapsed, "phase failed"),
    }
    result
}

/// Seconds below a minute, minutes above.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs >= 60.0 {
        format!("{:.1}m", secs / 60.0)
    } else {
        format!("{:.1}s", secs)
    }
}
