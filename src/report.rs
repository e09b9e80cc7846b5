//! Human-readable run summary.
use std::path::PathBuf;

use colored::Colorize;

use crate::schema::Mode;

/// What happened to one candidate file.
#[derive(Debug, Clone, Default)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// non-fixable problems, including load and write failures
    pub errors: Vec<String>,
    pub fixable: Vec<String>,
    /// corrected document written back
    pub applied: bool,
}

impl FileOutcome {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    pub fn passed(&self) -> bool {
        self.errors.is_empty() && (self.applied || self.fixable.is_empty())
    }
}

/// Lines to print, in input order, and whether the whole run passed.
pub fn summarize(outcomes: &[FileOutcome], mode: Mode) -> (Vec<String>, bool) {
    let mut lines = Vec::new();

    for outcome in outcomes.iter().filter(|o| o.applied) {
        lines.push(format!("{} Applied fixes to {}", "✓".green(), outcome.path.display()));
        for msg in &outcome.fixable {
            lines.push(format!("  {}", msg.dimmed()));
        }
    }

    let mut problems = 0usize;
    for outcome in outcomes {
        for msg in &outcome.errors {
            lines.push(msg.red().to_string());
            problems += 1;
        }
        if !outcome.applied {
            for msg in &outcome.fixable {
                lines.push(format!("{} {msg}", "fixable, not applied:".yellow()));
                problems += 1;
            }
        }
    }

    let passed = outcomes.iter().all(FileOutcome::passed);
    if passed {
        let verb = match mode {
            Mode::Lint => "passed validation",
            Mode::Fix => "processed successfully",
        };
        lines.push(format!("{} All {} schema file(s) {verb}.", "✓".green(), outcomes.len()));
    } else {
        let failed = outcomes.iter().filter(|o| !o.passed()).count();
        lines.push(format!("{} {problems} problem(s) in {failed} file(s).", "✗".red()));
    }
    (lines, passed)
}

pub fn print_outcomes(outcomes: &[FileOutcome], mode: Mode) -> bool {
    let (lines, passed) = summarize(outcomes, mode);
    for line in lines {
        println!("{line}");
    }
    passed
}

pub fn print_error(message: &str) {
    println!("{}", message.red());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn all_passing_lint_run() {
        plain();
        let (lines, passed) = summarize(&[FileOutcome::new("a.json"), FileOutcome::new("b.json")], Mode::Lint);
        assert!(passed);
        assert_eq!(lines, ["✓ All 2 schema file(s) passed validation."]);
    }

    #[test]
    fn applied_fixes_are_listed_and_pass() {
        plain();
        let mut outcome = FileOutcome::new("a.json");
        outcome.fixable.push("a.json: Field Id: ...".into());
        outcome.applied = true;
        let (lines, passed) = summarize(&[outcome], Mode::Fix);
        assert!(passed);
        assert_eq!(
            lines,
            [
                "✓ Applied fixes to a.json",
                "  a.json: Field Id: ...",
                "✓ All 1 schema file(s) processed successfully.",
            ]
        );
    }

    #[test]
    fn unapplied_fixes_are_never_dropped() {
        plain();
        let mut outcome = FileOutcome::new("a.json");
        outcome.errors.push("a.json: Field x: Invalid type 'T'".into());
        outcome.fixable.push("a.json: Field X: naming".into());
        let (lines, passed) = summarize(&[outcome, FileOutcome::new("b.json")], Mode::Fix);
        assert!(!passed);
        assert_eq!(
            lines,
            [
                "a.json: Field x: Invalid type 'T'",
                "fixable, not applied: a.json: Field X: naming",
                "✗ 2 problem(s) in 1 file(s).",
            ]
        );
    }
}
