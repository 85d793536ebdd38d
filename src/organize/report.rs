//! Print the plan and ask for confirmation.

use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use itertools::Itertools;

use crate::organize::types::{Operation, Plan};
use crate::{color_diff, display_relative};

/// Counts shown before asking for confirmation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub moves: usize,
    pub deletes: usize,
    /// Moves that share their target with another move.
    pub overwrites: usize,
    /// Distinct move targets that already exist on disk and are not moved away first.
    pub existing_targets: usize,
    /// Distinct source files used by more than one operation.
    pub repeated_sources: usize,
}

impl Summary {
    #[must_use]
    pub fn from_plan(plan: &Plan) -> Self {
        Self {
            moves: plan.move_count(),
            deletes: plan.delete_count(),
            overwrites: overwrite_count(&plan.operations),
            existing_targets: existing_target_count(&plan.operations),
            repeated_sources: repeated_source_count(&plan.operations),
        }
    }
}

/// Count moves whose target is shared with at least one other move.
///
/// Every colliding move is counted, so two moves to the same path give two.
#[must_use]
pub fn overwrite_count(operations: &[Operation]) -> usize {
    let target_counts = operations.iter().filter_map(Operation::target).counts();
    operations
        .iter()
        .filter_map(Operation::target)
        .filter(|target| target_counts.get(target).is_some_and(|&count| count > 1))
        .count()
}

/// Count distinct move targets that already exist and are not a source of any operation.
#[must_use]
pub fn existing_target_count(operations: &[Operation]) -> usize {
    let sources: HashSet<&Path> = operations.iter().map(Operation::source).collect();
    operations
        .iter()
        .filter_map(Operation::target)
        .filter(|target| !sources.contains(target) && target.exists())
        .unique()
        .count()
}

/// Count distinct source files that appear in more than one operation.
///
/// Only the first of those operations can succeed.
#[must_use]
pub fn repeated_source_count(operations: &[Operation]) -> usize {
    operations
        .iter()
        .map(Operation::source)
        .counts()
        .values()
        .filter(|&&count| count > 1)
        .count()
}

/// Print every operation with paths relative to the root.
pub fn print_operations(out: &mut impl Write, root: &Path, operations: &[Operation]) -> Result<()> {
    for operation in operations {
        match operation {
            Operation::Move { from, to } => {
                let (old, new) = color_diff(&display_relative(from, root), &display_relative(to, root));
                writeln!(out, "↪️  {old}\n   {new}\n")?;
            }
            Operation::Delete { from } => {
                writeln!(out, "🗑  {}\n", display_relative(from, root).red())?;
            }
        }
    }
    Ok(())
}

/// Print collected warnings followed by the operation counts and overwrite warnings.
pub fn print_warnings(out: &mut impl Write, warnings: &[String], summary: &Summary) -> Result<()> {
    for warning in warnings {
        writeln!(out, "⚠️  {}", warning.yellow())?;
    }
    writeln!(
        out,
        "⚠️  Planned {} operations and {} operations",
        format!("{} DELETE", summary.deletes).red(),
        format!("{} MOVE", summary.moves).blue()
    )?;
    if summary.overwrites > 0 {
        writeln!(
            out,
            "⚠️  There will be {} overwrites. DATA LOSS WILL OCCUR!",
            summary.overwrites.to_string().yellow()
        )?;
    }
    if summary.existing_targets > 0 {
        writeln!(
            out,
            "⚠️  {} existing file(s) will be replaced",
            summary.existing_targets.to_string().yellow()
        )?;
    }
    if summary.repeated_sources > 0 {
        writeln!(
            out,
            "⚠️  {} file(s) are used by more than one operation, only the first one will succeed",
            summary.repeated_sources.to_string().yellow()
        )?;
    }
    Ok(())
}

/// Ask for confirmation. Only "y" proceeds, anything else declines.
pub fn confirm(input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "\n{}", "Proceed? (y/n): ".magenta())?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer).context("Failed to read answer")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
