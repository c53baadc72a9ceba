//! Legible: Text Quality Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use legible::analyzer::{AggregateStats, AnalysisEngine};
use legible::cache::AnalysisCache;
use legible::config::{
    build_ignore_set, find_project_root, is_ignored, load_config, Config, CONFIG_FILENAME,
};
use legible::ocr::is_image_path;
use legible::reporter::{ConsoleReporter, JsonReporter};
use legible::watcher::{is_document, DocumentWatcher};
use legible::{AnalysisResult, SourceKind, TextInput};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Name used for documents read from standard input
const STDIN_NAME: &str = "<stdin>";

/// Legible: quality checks for OCR output
#[derive(Parser, Debug)]
#[command(name = "legible")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Document, directory or `-` for stdin (omit when using a subcommand)
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum readability score (exit 1 if below)
    #[arg(long, short, allow_negative_numbers = true)]
    threshold: Option<f64>,

    /// Exit 1 when a document is not well-formed or contains noisy lines
    #[arg(long)]
    strict: bool,

    /// Quiet mode (one line per document)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (also enables debug logging)
    #[arg(long, short)]
    verbose: bool,

    /// Treat the input as a JSON payload (a string or an array of lines)
    #[arg(long)]
    lines: bool,

    /// Path to config file (default: search .legiblerc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watch for file changes and re-analyze
    #[arg(long)]
    watch: bool,

    /// Disable caching (re-analyze all documents even if unchanged)
    #[arg(long)]
    no_cache: bool,

    /// Clear the analysis cache before running
    #[arg(long)]
    clear_cache: bool,

    /// Run analysis in parallel (default for directories with many documents)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .legiblerc.json with sensible defaults
    Init {
        /// Minimum readability score (e.g. 60)
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<f64>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

/// `RUST_LOG` directives (default `warn`), raised to debug by `--verbose`
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    if verbose {
        filter.add_directive(tracing::Level::DEBUG.into())
    } else {
        filter
    }
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Some(Commands::Init { threshold, dir }) = &args.command {
        return run_init(*threshold, dir.as_deref());
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("A document path (or `-` for stdin) is required");
    };

    if path.as_os_str() == "-" {
        return run_stdin(&args);
    }

    if args.watch {
        return run_watch(&args, &path);
    }

    let work_dir = work_dir_for(&path);

    // CLI flags override config file
    let config = load_config(work_dir, args.config.as_deref())?
        .merge_with_cli(args.threshold, args.strict);

    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let search_path = match config.text_root {
        Some(ref text_root) => work_dir.join(text_root),
        None => path.clone(),
    };

    let patterns = document_patterns(&config);
    let documents = collect_documents(&search_path, ignore_set.as_ref(), &patterns)?;

    if documents.is_empty() {
        eprintln!("{}: No documents found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    let project_root = find_project_root(work_dir).unwrap_or_else(|| work_dir.to_path_buf());
    let mut cache = if args.no_cache {
        AnalysisCache::disabled()
    } else {
        AnalysisCache::new(&project_root)
    };

    if args.clear_cache {
        cache.clear();
        if !args.quiet {
            eprintln!("{}: Cache cleared", "Info".blue());
        }
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let engine = AnalysisEngine::new();
    let use_parallel = args.parallel || documents.len() > 10;

    let (results, had_errors) =
        analyze_documents(&engine, &documents, &config, &mut cache, &args, use_parallel);

    // A walk of the whole project sees every document, so anything else is gone
    if same_dir(&search_path, &project_root) {
        cache.cleanup(&documents);
    }

    if let Err(e) = cache.save() {
        if !args.quiet {
            eprintln!("{}: Failed to save cache: {}", "Warning".yellow(), e);
        }
    }

    if results.is_empty() {
        eprintln!("{}: All documents failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = AnalysisEngine::aggregate_stats(&results);
    print_results(&args, &results, &stats);

    let failures = check_gates(&results, &stats, &config);
    if !failures.is_empty() {
        if !args.quiet && !args.json {
            for failure in &failures {
                eprintln!("{}: {}", "Failed".red().bold(), failure);
            }
        }
        return Ok(ExitCode::from(1));
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Analyze text piped on stdin
fn run_stdin(args: &Args) -> Result<ExitCode> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd, args.config.as_deref())?
        .merge_with_cli(args.threshold, args.strict);

    let engine = AnalysisEngine::new();
    let virtual_path = Path::new(STDIN_NAME);
    let result = if args.lines {
        let input = parse_lines_payload(&text).context("Invalid JSON on stdin")?;
        engine.analyze_input(&input, virtual_path, SourceKind::Stdin)
    } else {
        engine.analyze_source(&text, virtual_path, SourceKind::Stdin)
    };

    let results = vec![result];
    let stats = AnalysisEngine::aggregate_stats(&results);
    print_results(args, &results, &stats);

    let failures = check_gates(&results, &stats, &config);
    if !failures.is_empty() {
        if !args.quiet && !args.json {
            for failure in &failures {
                eprintln!("{}: {}", "Failed".red().bold(), failure);
            }
        }
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_lines_payload(text: &str) -> Result<TextInput> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(TextInput::from_json(&value))
}

fn work_dir_for(path: &Path) -> &Path {
    if path.is_file() {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    } else {
        path
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a.is_dir() && a == b,
        _ => false,
    }
}

fn document_patterns(config: &Config) -> Vec<String> {
    config
        .get_file_patterns()
        .into_iter()
        .chain(config.get_image_patterns())
        .map(str::to_string)
        .collect()
}

/// Analyze one document, reading it as a JSON payload when `--lines` is set
fn analyze_document(
    engine: &AnalysisEngine,
    file: &Path,
    config: &Config,
    lines: bool,
) -> Result<AnalysisResult> {
    if !lines {
        return engine.analyze(file, Some(config));
    }
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read text file: {}", file.display()))?;
    let input = parse_lines_payload(&text)
        .with_context(|| format!("Invalid JSON in {}", file.display()))?;
    Ok(engine.analyze_input(&input, file, SourceKind::Text))
}

/// Extra cache key for results that depend on more than the document bytes
fn cache_settings(file: &Path, config: &Config, lines: bool) -> Option<String> {
    if lines {
        Some("json-lines".to_string())
    } else if is_image_path(file, &config.get_image_patterns()) {
        Some(AnalysisCache::ocr_settings(&config.ocr_options()))
    } else {
        None
    }
}

fn report_failure(file: &Path, e: &anyhow::Error, quiet: bool) {
    if !quiet {
        eprintln!(
            "{}: Failed to analyze {}: {:#}",
            "Error".red(),
            file.display(),
            e
        );
    }
}

fn report_cache_hits(hits: usize, total: usize, quiet: bool) {
    if !quiet && hits > 0 {
        eprintln!(
            "{}: {} documents from cache, {} analyzed",
            "Cache".blue(),
            hits,
            total - hits
        );
    }
}

/// A document that missed the cache, with the bytes and settings it is keyed by
struct Pending {
    index: usize,
    content: Option<Vec<u8>>,
    settings: Option<String>,
}

/// Analyze documents, serving unchanged ones from the cache. Fresh results are
/// cached afterwards; output keeps the order of `files`.
fn analyze_documents(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    cache: &mut AnalysisCache,
    args: &Args,
    parallel: bool,
) -> (Vec<AnalysisResult>, bool) {
    let mut slots: Vec<Option<AnalysisResult>> = vec![None; files.len()];
    let mut pending = Vec::new();

    for (index, file) in files.iter().enumerate() {
        let content = std::fs::read(file).ok();
        let settings = cache_settings(file, config, args.lines);
        let cached = content
            .as_deref()
            .and_then(|bytes| cache.get(file, bytes, settings.as_deref()));
        match cached {
            Some(result) => slots[index] = Some(result),
            None => pending.push(Pending {
                index,
                content,
                settings,
            }),
        }
    }
    let cache_hits = files.len() - pending.len();

    let to_analyze: Vec<PathBuf> = pending.iter().map(|p| files[p.index].clone()).collect();
    let outcomes: Vec<Result<AnalysisResult>> = if args.lines {
        to_analyze
            .iter()
            .map(|file| analyze_document(engine, file, config, true))
            .collect()
    } else if parallel {
        engine.analyze_parallel(&to_analyze, Some(config))
    } else {
        let paths: Vec<&Path> = to_analyze.iter().map(PathBuf::as_path).collect();
        engine.analyze_many(&paths, Some(config))
    };

    let mut had_errors = false;
    for (doc, outcome) in pending.into_iter().zip(outcomes) {
        let file = &files[doc.index];
        match outcome {
            Ok(result) => {
                if let Some(content) = doc.content {
                    cache.set(file, &content, doc.settings.as_deref(), result.clone());
                }
                slots[doc.index] = Some(result);
            }
            Err(e) => {
                report_failure(file, &e, args.quiet);
                had_errors = true;
            }
        }
    }

    report_cache_hits(cache_hits, files.len(), args.quiet);
    (slots.into_iter().flatten().collect(), had_errors)
}

fn print_results(args: &Args, results: &[AnalysisResult], stats: &AggregateStats) {
    if args.json {
        let reporter = JsonReporter::new().pretty();
        if results.len() == 1 {
            println!("{}", reporter.report(&results[0]));
        } else {
            println!("{}", reporter.report_with_summary(results, stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for result in results {
            reporter.report_quiet(result);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        if results.len() == 1 {
            reporter.report(&results[0]);
        } else {
            reporter.report_many(results, stats);
        }
    }
}

/// Threshold and strict-mode failures. One document is checked against its own
/// effective threshold; many documents are checked by their average score.
fn check_gates(results: &[AnalysisResult], stats: &AggregateStats, config: &Config) -> Vec<String> {
    let mut failures = Vec::new();

    let (score, threshold) = match results {
        [single] => (
            single.report.readability.score(),
            config.effective_for_file(&single.file_path).threshold,
        ),
        _ => (stats.average_readability, config.threshold),
    };
    if let (Some(score), Some(threshold)) = (score, threshold) {
        if score < threshold {
            failures.push(format!(
                "Readability {:.2} is below threshold {}",
                score, threshold
            ));
        }
    }

    for result in results {
        if !config.effective_for_file(&result.file_path).strict {
            continue;
        }
        if !result.report.is_valid {
            failures.push(format!("{} is not well-formed", result.file_path.display()));
        }
        if !result.noise_free {
            failures.push(format!("{} contains noisy lines", result.file_path.display()));
        }
    }

    failures
}

fn run_init(threshold: Option<f64>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let threshold_value = threshold.unwrap_or(60.0);

    let json = format!(
        r#"{{
  "threshold": {},
  "strict": false,
  "filePatterns": [".txt", ".text", ".md"],
  "ignore": [
    "**/.git/**",
    "**/target/**"
  ],
  "ocr": {{
    "command": "tesseract",
    "language": "eng",
    "psm": 3
  }},
  "overrides": []
}}
"#,
        threshold_value
    );

    std::fs::write(&config_path, json)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        config_path.display(),
        threshold_value
    );
    Ok(ExitCode::SUCCESS)
}

fn run_watch(args: &Args, path: &Path) -> Result<ExitCode> {
    let work_dir = work_dir_for(path);

    let config = load_config(work_dir, args.config.as_deref())?
        .merge_with_cli(args.threshold, args.strict);
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let engine = AnalysisEngine::new();
    let watcher = DocumentWatcher::watch(path, document_patterns(&config))
        .context("Failed to create file watcher")?;
    eprintln!("{}: Watching for changes... (Ctrl+C to stop)", "Info".blue());

    loop {
        let changed = watcher.next_changes();
        for doc in changed.into_iter().filter(|p| {
            ignore_set
                .as_ref()
                .map(|set| !is_ignored(p, set))
                .unwrap_or(true)
        }) {
            match analyze_document(&engine, &doc, &config, args.lines) {
                Ok(result) => {
                    if args.json {
                        println!("{}", JsonReporter::new().report(&result));
                    } else if args.quiet {
                        ConsoleReporter::new().report_quiet(&result);
                    } else {
                        ConsoleReporter::new().report(&result);
                    }
                }
                Err(e) => {
                    eprintln!("{}: {}: {:#}", "Error".red(), doc.display(), e);
                }
            }
        }
    }
}

fn collect_documents(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
    patterns: &[String],
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if !entry.file_type().is_file() || !is_document(file_path, patterns) {
            continue;
        }
        if let Some(set) = ignore_set {
            if is_ignored(file_path, set) {
                continue;
            }
        }
        files.push(file_path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
