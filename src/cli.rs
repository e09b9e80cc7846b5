//! CLI: discover → validate → (persist fixes) → report
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::dialect;
use crate::naming::{self, CaseStyle};
use crate::report::{self, FileOutcome};
use crate::required::Position;
use crate::schema::{self, Mode, Options, ValidationResult};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// validate schema field lists against a dialect and a naming convention, optionally fixing names
#[derive(Parser, Debug)]
#[command(name = "schema-lint", version, args_conflicts_with_subcommands = true)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Option<Command>,

    #[command(flatten)]
    check: CheckSettings,

    /// debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// list supported dialects with their types, modes and attributes
    Dialects(DialectsOut),
    /// list naming conventions with an example each
    Cases,
}

#[derive(Args, Debug)]
struct DialectsOut {
    /// print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone, Default)]
struct CheckSettings {
    /// JSON settings file; flags given here win over it
    #[arg(long)]
    config: Option<PathBuf>,

    /// file extension to validate [default: json]
    #[arg(long)]
    file_type: Option<String>,

    /// regex filtering discovered file paths
    #[arg(long)]
    path_regex: Option<String>,

    /// schema dialect [default: bigquery]
    #[arg(long)]
    dialect: Option<String>,

    /// naming convention: snake, camel, pascal, upper, kebab, train, flat, cobol, title [default: snake]
    #[arg(long)]
    case: Option<String>,

    /// lint (check only) or fix (apply naming corrections) [default: lint]
    #[arg(long)]
    mode: Option<String>,

    /// comma-separated top-level field names that must be present, in this order
    #[arg(long)]
    required_fields: Option<String>,

    /// where the required names sit: any, beginning, end [default: any]
    #[arg(long)]
    position: Option<String>,

    /// when fixes are written: clean (no other errors) or always [default: clean]
    #[arg(long)]
    fix_policy: Option<String>,

    /// files to validate, literal paths or quoted glob patterns; discovered when omitted
    files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FixPolicy {
    /// write only when the file has no non-fixable errors
    #[default]
    Clean,
    Always,
}

impl FromStr for FixPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "clean" => Ok(FixPolicy::Clean),
            "always" => Ok(FixPolicy::Always),
            _ => bail!("Unsupported fix policy '{s}'. Supported: clean, always"),
        }
    }
}

impl FixPolicy {
    fn allows(self, result: &ValidationResult) -> bool {
        match self {
            FixPolicy::Clean => result.errors.is_empty(),
            FixPolicy::Always => true,
        }
    }
}

/// Flags, settings file and defaults merged and parsed.
#[derive(Debug)]
struct Run {
    file_type: String,
    path_regex: Option<Regex>,
    options: Options,
    fix_policy: FixPolicy,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run(&self) -> ExitCode {
        match &self.cmd {
            Some(Command::Dialects(target)) => print_dialects(target.json),
            Some(Command::Cases) => {
                for (style, example) in naming::examples() {
                    println!("{:<7} {example}", style.id());
                }
                ExitCode::SUCCESS
            }
            None => match self.check.run() {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::FAILURE,
                Err(error) => {
                    report::print_error(&format!("{error:#}"));
                    ExitCode::FAILURE
                }
            },
        }
    }
}

impl CheckSettings {
    fn resolve(&self) -> anyhow::Result<Run> {
        let file = match &self.config {
            Some(path) => Settings::from_path(path)?,
            None => Settings::default(),
        };
        let pick = |flag: &Option<String>, from_file: &Option<String>| {
            flag.clone().or_else(|| from_file.clone())
        };

        let dialect_name = pick(&self.dialect, &file.dialect).unwrap_or_else(|| "bigquery".into());
        dialect::resolve(&dialect_name)?;

        let case = match pick(&self.case, &file.case) {
            Some(s) => CaseStyle::from_str(&s)?,
            None => CaseStyle::Snake,
        };
        let mode = match pick(&self.mode, &file.mode) {
            Some(s) => Mode::from_str(&s)?,
            None => Mode::Lint,
        };
        let position = match pick(&self.position, &file.position) {
            Some(s) => Position::from_str(&s)?,
            None => Position::Any,
        };
        let fix_policy = match pick(&self.fix_policy, &file.fix_policy) {
            Some(s) => FixPolicy::from_str(&s)?,
            None => FixPolicy::Clean,
        };
        let path_regex = pick(&self.path_regex, &file.path_regex)
            .map(|rx| Regex::new(&rx).with_context(|| format!("invalid --path-regex '{rx}'")))
            .transpose()?;
        let required = pick(&self.required_fields, &file.required_fields);

        Ok(Run {
            file_type: pick(&self.file_type, &file.file_type).unwrap_or_else(|| "json".into()),
            path_regex,
            options: Options::new(dialect_name, case, mode).with_required(required.as_deref(), position),
            fix_policy,
        })
    }

    /// `Ok(true)` when every file passed (or was fully fixed).
    fn run(&self) -> anyhow::Result<bool> {
        let run = self.resolve()?;
        debug!(?run, "resolved settings");

        let candidates = if self.files.is_empty() {
            discover_files(Path::new("."), &run.file_type, run.path_regex.as_ref())?
        } else {
            resolve_file_path_patterns(&self.files)?
        };
        if candidates.is_empty() {
            println!("No {} files found matching the criteria.", run.file_type);
            return Ok(true);
        }

        let outcomes = candidates
            .par_iter()
            .map(|path| process_file(path, &run))
            .collect::<anyhow::Result<Vec<FileOutcome>>>()?;
        Ok(report::print_outcomes(&outcomes, run.options.mode))
    }
}

/// Load problems land in the outcome; configuration problems abort the run.
fn process_file(path: &Path, run: &Run) -> anyhow::Result<FileOutcome> {
    let mut outcome = FileOutcome::new(path);
    let result = match schema::validate_schema(path, &run.options) {
        Ok(result) => result,
        Err(error) if error.is_config() => return Err(error.into()),
        Err(error) => {
            warn!(path = %path.display(), %error, "skipping file");
            outcome.errors.push(error.to_string());
            return Ok(outcome);
        }
    };

    let mut write_error = None;
    if let Some(fixed) = result.fixes() {
        if run.fix_policy.allows(&result) {
            match write_fixes(path, fixed) {
                Ok(()) => {
                    info!(path = %path.display(), fixes = result.fixable.len(), "applied fixes");
                    outcome.applied = true;
                }
                Err(error) => {
                    write_error = Some(format!("Error writing fixes to {}: {error:#}", path.display()));
                }
            }
        } else {
            warn!(path = %path.display(), "not writing fixes: file has non-fixable errors");
        }
    }

    let ValidationResult { errors, fixable, .. } = result;
    outcome.errors = errors;
    outcome.errors.extend(write_error);
    outcome.fixable = fixable;
    Ok(outcome)
}

/// Pretty JSON, two-space indent, key order kept, trailing newline.
fn write_fixes(path: &Path, fixed: &[serde_json::Value]) -> anyhow::Result<()> {
    let mut out = serde_json::to_string_pretty(fixed)?;
    out.push('\n');
    std::fs::write(path, out).with_context(|| format!("writing {}", path.display()))
}

fn print_dialects(as_json: bool) -> ExitCode {
    let infos: Vec<_> = dialect::list_dialects()
        .into_iter()
        .filter_map(dialect::info)
        .collect();
    if as_json {
        match serde_json::to_string_pretty(&infos) {
            Ok(src) => println!("{src}"),
            Err(error) => {
                report::print_error(&error.to_string());
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }
    for info in infos {
        println!("{}", info.name);
        println!("  required attributes: {}", info.required_attrs.join(", "));
        println!("  optional attributes: {}", info.optional_attrs.join(", "));
        println!("  modes ({}): {}", info.modes_count, info.supported_modes.join(", "));
        println!("  types ({}): {}", info.types_count, info.supported_types.join(", "));
    }
    let drafts: Vec<_> = dialect::DRAFTS.iter().map(|d| d.name).collect();
    println!("not yet supported: {}", drafts.join(", "));
    ExitCode::SUCCESS
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Every `*.<file_type>` under `root` whose `./`-prefixed relative path
/// matches `path_regex` (searched, not anchored).
fn discover_files(root: &Path, file_type: &str, path_regex: Option<&Regex>) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = root.join(format!("**/*.{file_type}"));
    let pattern = pattern
        .to_str()
        .ok_or_else(|| anyhow!("search root is not valid UTF-8: {}", root.display()))?;
    let mut out = Vec::new();
    for entry in glob::glob(pattern)? {
        let found = match entry {
            Ok(p) => p,
            Err(error) => {
                warn!(%error, "skipping unreadable path during discovery");
                continue;
            }
        };
        if !found.is_file() {
            continue;
        }
        let relative = found.strip_prefix(root).unwrap_or(&found);
        let shown = Path::new(".").join(relative);
        if path_regex.is_some_and(|rx| !rx.is_match(&shown.to_string_lossy())) {
            continue;
        }
        out.push(root.join(relative));
    }
    out.sort();
    Ok(out)
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                return Err(anyhow!("glob pattern matched no files: {pattern}"));
            }
        } else {
            // missing literal paths are reported per file as "File not found"
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
