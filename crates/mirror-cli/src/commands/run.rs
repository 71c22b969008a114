//! The mirror command: wire the engine, the activity log and the loop.

use colored::Colorize;
use mirror_core::{ActivityLog, CollisionPolicy, MirrorConfig, Operation, Scheduler, SyncEngine};
use std::io::IsTerminal;

use crate::error::{CliError, Result};
use crate::interactive::TerminalPrompt;

/// Start mirroring.
///
/// With `once`, runs a single pass and returns; otherwise loops until a
/// process-fatal error.
pub fn run_mirror(config: &MirrorConfig, once: bool) -> Result<()> {
    let mut engine = SyncEngine::new(config)?;
    if config.on_collision == CollisionPolicy::Prompt && std::io::stdin().is_terminal() {
        engine = engine.with_prompt(TerminalPrompt);
    }
    let log = ActivityLog::from_config(config)?;

    tracing::info!(
        source = %engine.source().display(),
        replica = %engine.replica().display(),
        interval = %config.interval,
        "Mirroring"
    );

    let mut scheduler = Scheduler::new(engine, log, config.interval.as_duration());
    if !once {
        match scheduler.run()? {}
    }

    let (report, _) = scheduler.run_pass()?;
    if !report.success {
        return Err(CliError::user(format!(
            "pass did not complete: {}",
            report.errors.join("; ")
        )));
    }

    if config.echo_to_console {
        println!(
            "{} {} copied, {} removed, {} created",
            "Done:".green().bold(),
            report.count(Operation::Copy),
            report.count(Operation::Removal),
            report.count(Operation::Creation),
        );
    }
    Ok(())
}
