//! Delete, move and copy commands

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use fileset::Context;

use crate::error::Result;

/// Run the delete command
pub fn run_delete(context: &Arc<Context>, pattern: &str) -> Result<()> {
    let mut set = context.resolve(pattern)?;
    let total = set.len();
    let removed = set.delete();
    report("Deleted", removed, total);
    Ok(())
}

/// Run the move command
pub fn run_move(context: &Arc<Context>, pattern: &str, destination: &Path) -> Result<()> {
    let mut set = context.resolve(pattern)?;
    let total = set.len();
    let moved = set.move_to(destination)?;
    report("Moved", moved, total);
    Ok(())
}

/// Run the copy command
pub fn run_copy(context: &Arc<Context>, pattern: &str, destination: &Path) -> Result<()> {
    let set = context.resolve(pattern)?;
    let copied = set.copy_to(destination)?;
    report("Copied", copied, set.len());
    Ok(())
}

fn report(verb: &str, done: usize, total: usize) {
    println!("{} {} entries", verb.green().bold(), done);
    if done < total {
        eprintln!(
            "{} {} of {} entries were skipped (run with {} for details)",
            "warning:".yellow().bold(),
            total - done,
            total,
            "-v".cyan()
        );
    }
}
