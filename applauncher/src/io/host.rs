//! Downstream hand-off of a resolved launch plan.
//!
//! Loading the runtime library and calling its entry point is platform
//! specific and lives outside this crate; [`RuntimeHost`] is the seam. The
//! bundled [`PlanPrinter`] writes the plan as JSON instead of starting
//! anything, which is what the `plan` command uses.

use std::io::Write;

use anyhow::{Context, Result};

use crate::exit_codes;
use crate::launch::LaunchPlan;

/// Receives the resolved plan and starts the runtime.
pub trait RuntimeHost {
    /// Start the runtime described by `plan`, returning the process exit code.
    fn launch(&self, plan: &LaunchPlan) -> Result<i32>;
}

/// Host that prints the plan as pretty JSON to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanPrinter;

impl RuntimeHost for PlanPrinter {
    fn launch(&self, plan: &LaunchPlan) -> Result<i32> {
        let mut payload = serde_json::to_string_pretty(plan).context("serialize launch plan")?;
        payload.push('\n');
        std::io::stdout()
            .lock()
            .write_all(payload.as_bytes())
            .context("write launch plan")?;
        Ok(exit_codes::OK)
    }
}
