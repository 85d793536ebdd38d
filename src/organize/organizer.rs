//! Run the whole organize flow for one season directory.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use crate::organize::config::OrganizeConfig;
use crate::organize::execute::{execute_operations, remove_empty_directories};
use crate::organize::plan::plan_operations;
use crate::organize::report::{Summary, confirm, print_operations, print_warnings};
use crate::organize::scan::scan_directory;
use crate::organize::subtitles::locate_subtitles;
use crate::organize::types::{Plan, ScanResult};

/// Organizes one season directory: scan, plan, confirm and apply.
#[derive(Debug)]
pub struct SeasonOrganizer {
    root: PathBuf,
    config: OrganizeConfig,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    NothingToDo,
    DryRun,
    Declined,
    Applied { modified: usize, cleaned: usize },
}

impl SeasonOrganizer {
    #[must_use]
    pub const fn new(root: PathBuf, config: OrganizeConfig) -> Self {
        Self { root, config }
    }

    /// Run interactively using stdin and stdout.
    ///
    /// # Errors
    /// Returns an error if reading the directory or applying an operation fails.
    pub fn run(&self) -> Result<RunOutcome> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with_io(&mut stdin.lock(), &mut stdout.lock())
    }

    /// Run with the given input for the confirmation prompt and output for printing.
    ///
    /// # Errors
    /// Returns an error if reading the directory or applying an operation fails.
    pub fn run_with_io(&self, input: &mut impl BufRead, out: &mut impl Write) -> Result<RunOutcome> {
        if self.config.debug {
            writeln!(out, "{}", self.config)?;
            writeln!(out, "Root: {}", self.root.display())?;
        }

        let plan = self.plan_with_output(out)?;
        let summary = Summary::from_plan(&plan);

        if plan.is_empty() {
            for warning in &plan.warnings {
                writeln!(out, "⚠️  {}", warning.yellow())?;
            }
            writeln!(out, "No files to organize")?;
            return Ok(RunOutcome::NothingToDo);
        }

        print_operations(out, &self.root, &plan.operations)?;
        print_warnings(out, &plan.warnings, &summary)?;

        if self.config.dryrun {
            writeln!(out, "Dryrun: would have modified {} files", plan.operations.len())?;
            return Ok(RunOutcome::DryRun);
        }

        let confirmed = self.config.auto || confirm(input, out)?;
        if !confirmed {
            writeln!(out, "{}", "Aborted, no changes made".yellow())?;
            return Ok(RunOutcome::Declined);
        }

        let modified = execute_operations(&plan.operations)?;
        writeln!(out, "{}", format!("Modified {modified} files").green())?;

        let cleaned = remove_empty_directories(&self.root)?;
        if cleaned > 0 {
            writeln!(out, "Cleaned up {cleaned} empty directories")?;
        }

        Ok(RunOutcome::Applied { modified, cleaned })
    }

    /// Scan the root, find subtitles and plan the operations.
    ///
    /// Warnings from scanning come before the planning warnings.
    /// Verbose output goes to stdout.
    ///
    /// # Errors
    /// Returns an error if a directory or file cannot be read.
    pub fn plan(&self) -> Result<Plan> {
        self.plan_with_output(&mut io::stdout().lock())
    }

    fn plan_with_output(&self, out: &mut impl Write) -> Result<Plan> {
        let ScanResult {
            episodes,
            trash,
            subtitle_dirs,
            warnings,
        } = scan_directory(&self.root, &self.config.trash_extensions)?;

        let episodes = if subtitle_dirs.is_empty() {
            episodes
        } else {
            let progress: Option<&mut dyn Write> = if self.config.verbose {
                writeln!(out, "{}", "Subtitles found".bold())?;
                Some(&mut *out)
            } else {
                None
            };
            locate_subtitles(episodes, &subtitle_dirs, &self.root, progress)?
        };

        let mut plan = plan_operations(&self.root, &episodes, &trash);
        let mut all_warnings = warnings;
        all_warnings.append(&mut plan.warnings);
        plan.warnings = all_warnings;
        Ok(plan)
    }
}
