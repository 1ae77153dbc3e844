use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use miette::{Context, IntoDiagnostic, Result};

use scout_core::{OutputFormat, ScoutConfig};
use scout_graph::DependencyGraph;
use scout_history::HistoryMiner;

#[derive(Parser)]
#[command(
    name = "scout",
    version,
    about = "Codebase orientation for developers joining a project",
    long_about = "Scout analyzes a repository's structure, complexity, and git history to\n\
                   answer the questions every new developer asks: where do I start, what\n\
                   matters most, and what should I avoid touching first.\n\n\
                   Examples:\n  \
                     scout core --path .             Rank the modules worth learning first\n  \
                     scout learn authentication      Build a learning path for one area\n  \
                     scout entry 'fix payment bug'   Suggest files to start a task from\n  \
                     scout complexity                Map simple vs complex files\n  \
                     scout deps                      Summarize the dependency graph\n  \
                     scout history                   Show churn hotspots and contributors\n  \
                     scout doctor                    Check setup and environment"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .scout.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text      Human-readable report text (default)\n  \
                         json      Machine-readable JSON with camelCase keys\n  \
                         markdown  GitHub-flavored Markdown"
    )]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// When to use colors
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Subcommand)]
enum Command {
    /// Rank the core modules of the codebase
    #[command(long_about = "Rank the core modules of the codebase.\n\n\
        Fuses dependency-graph importance with git churn and authorship into a\n\
        single core score per module, and lists entry points and module clusters.\n\n\
        Examples:\n  scout core\n  scout core --path ../other-repo --format json")]
    Core {
        /// Repository path (default: current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },
    /// Generate a progressive learning path for one area
    #[command(long_about = "Generate a progressive learning path for one area.\n\n\
        Finds files matching the area keywords and orders them from simplest to\n\
        most complex, weighing complexity, dependencies, and dependency depth.\n\n\
        Examples:\n  scout learn authentication\n  scout learn 'payment processing' --path .")]
    Learn {
        /// Area or module to learn about (e.g. "authentication")
        area: String,

        /// Repository path (default: current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },
    /// Suggest entry points for a development task
    #[command(long_about = "Suggest entry points for a development task.\n\n\
        Matches task keywords against file paths and symbol names, weighs in each\n\
        file's graph importance, and returns the top candidates with reasons.\n\n\
        Examples:\n  scout entry 'add a new payment method'\n  scout entry 'fix login redirect'")]
    Entry {
        /// Task description (e.g. "fix authentication bug")
        task: String,

        /// Repository path (default: current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },
    /// Map the complexity landscape of the codebase
    #[command(long_about = "Map the complexity landscape of the codebase.\n\n\
        Scores every Python function's cyclomatic complexity, computes per-file\n\
        maintainability, and buckets files into simple, moderate, complex, and\n\
        high-risk groups.\n\n\
        Examples:\n  scout complexity\n  scout complexity --format json")]
    Complexity {
        /// Repository path (default: current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },
    /// Summarize the file dependency graph
    #[command(long_about = "Summarize the file dependency graph.\n\n\
        Builds the import graph and reports totals, core modules, entry points,\n\
        leaf modules, circular dependency chains, and directory clusters.\n\n\
        Examples:\n  scout deps\n  scout deps --format json")]
    Deps {
        /// Repository path (default: current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },
    /// Analyze git history for hotspots and contributors
    #[command(long_about = "Analyze git history for hotspots and contributors.\n\n\
        Mines commit history through the git binary: per-file churn hotspots,\n\
        contributor stats, and recent activity.\n\n\
        Examples:\n  scout history\n  scout history --limit 10 --since 30")]
    History {
        /// Repository path (default: current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Maximum hotspots to show (default: from config)
        #[arg(long)]
        limit: Option<usize>,

        /// Recent-activity window in days (default: from config)
        #[arg(long)]
        since: Option<u64>,
    },
    /// Create a default .scout.toml configuration file
    #[command(long_about = "Create a default .scout.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .scout.toml already exists.")]
    Init,
    /// Check your Scout setup and environment
    #[command(long_about = "Check your Scout setup and environment.\n\n\
        Runs diagnostics for the git repo, config file, LLM API key, and git\n\
        history. Use --format json for machine-readable output.")]
    Doctor,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

fn print_welcome(use_color: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if use_color {
        println!("\x1b[1m\x1b[33m🧭\x1b[0m \x1b[1mscout\x1b[0m v{version} — find your way around an unfamiliar codebase\n");

        println!("Quick start:");
        println!("  \x1b[36mscout init\x1b[0m                  Create a .scout.toml config file");
        println!("  \x1b[36mscout core\x1b[0m                  Rank the modules worth learning first");
        println!("  \x1b[36mscout learn <area>\x1b[0m          Build a learning path for one area\n");

        println!("All commands:");
        println!("  \x1b[32mcore\x1b[0m        Ranked core modules with churn and importance");
        println!("  \x1b[32mlearn\x1b[0m       Progressive learning path for an area");
        println!("  \x1b[32mentry\x1b[0m       Entry-point suggestions for a task");
        println!("  \x1b[32mcomplexity\x1b[0m  Complexity map of the codebase");
        println!("  \x1b[32mdeps\x1b[0m        Dependency graph summary");
        println!("  \x1b[32mhistory\x1b[0m     Churn hotspots and contributor stats");
        println!("  \x1b[32mdoctor\x1b[0m      Check your setup and environment");
        println!("  \x1b[32minit\x1b[0m        Create default configuration\n");
    } else {
        println!("scout v{version} — find your way around an unfamiliar codebase\n");

        println!("Quick start:");
        println!("  scout init                  Create a .scout.toml config file");
        println!("  scout core                  Rank the modules worth learning first");
        println!("  scout learn <area>          Build a learning path for one area\n");

        println!("All commands:");
        println!("  core        Ranked core modules with churn and importance");
        println!("  learn       Progressive learning path for an area");
        println!("  entry       Entry-point suggestions for a task");
        println!("  complexity  Complexity map of the codebase");
        println!("  deps        Dependency graph summary");
        println!("  history     Churn hotspots and contributor stats");
        println!("  doctor      Check your setup and environment");
        println!("  init        Create default configuration\n");
    }

    println!("Run 'scout <command> --help' for details.");
}

/// Hotspots for report fusion; empty when the path is not a git repository.
fn hotspots_if_tracked(path: &Path, limit: usize) -> Vec<scout_history::FileHistory> {
    match HistoryMiner::open(path) {
        Ok(miner) => miner.hotspots(limit),
        Err(_) => Vec::new(),
    }
}

#[derive(serde::Serialize)]
struct CheckResult {
    name: &'static str,
    status: &'static str,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: "pass",
            detail: detail.into(),
            hint: None,
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name,
            status: "fail",
            detail: detail.into(),
            hint: Some(hint.into()),
        }
    }

    fn info(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: "info",
            detail: detail.into(),
            hint: None,
        }
    }

    fn symbol(&self) -> &'static str {
        match self.status {
            "pass" => "\u{2713}",
            "fail" => "\u{2717}",
            _ => "~",
        }
    }

    fn colored_symbol(&self) -> String {
        match self.status {
            "pass" => "\x1b[32m\u{2713}\x1b[0m".into(),
            "fail" => "\x1b[31m\u{2717}\x1b[0m".into(),
            _ => "\x1b[33m~\x1b[0m".into(),
        }
    }
}

fn run_doctor(config: &ScoutConfig, format: OutputFormat, use_color: bool) -> Result<()> {
    let mut checks: Vec<CheckResult> = Vec::new();

    // 1. Git repository
    let mut git_root = None;
    let cwd = std::env::current_dir().into_diagnostic()?;
    let mut dir = cwd.as_path();
    loop {
        if dir.join(".git").exists() {
            git_root = Some(dir.to_path_buf());
            break;
        }
        let Some(parent) = dir.parent() else {
            break;
        };
        dir = parent;
    }
    match &git_root {
        Some(root) => checks.push(CheckResult::pass(
            "git_repository",
            format!("detected at {}", root.display()),
        )),
        None => checks.push(CheckResult::fail(
            "git_repository",
            "not a git repository",
            "run scout from inside a git repository",
        )),
    }

    // 2. Config file
    if Path::new(".scout.toml").exists() {
        checks.push(CheckResult::pass("config_file", ".scout.toml found"));
    } else {
        checks.push(CheckResult::fail(
            "config_file",
            ".scout.toml not found",
            "run 'scout init' to create a default config",
        ));
    }

    // 3. LLM provider + API key (used by the assistant layer, optional here)
    let llm_provider = &config.llm.provider;
    let llm_model = &config.llm.model;
    let llm_env_var = match llm_provider.as_str() {
        "openai" => "OPENAI_API_KEY",
        "anthropic" => "ANTHROPIC_API_KEY",
        _ => "GROQ_API_KEY",
    };
    checks.push(CheckResult::pass(
        "llm_provider",
        format!("{llm_provider} (model: {llm_model})"),
    ));
    if config.llm.api_key.is_some() || std::env::var(llm_env_var).is_ok() {
        checks.push(CheckResult::pass("llm_api_key", format!("{llm_env_var} set")));
    } else {
        checks.push(CheckResult::info(
            "llm_api_key",
            format!("{llm_env_var} not set (only needed for assistant features)"),
        ));
    }

    // 4. Git history
    if let Some(root) = &git_root {
        match HistoryMiner::open(root) {
            Ok(miner) => {
                let commits = miner.total_commits();
                let maintained = if miner.is_actively_maintained() {
                    "actively maintained"
                } else {
                    "no commits in 90 days"
                };
                checks.push(CheckResult::info(
                    "git_history",
                    format!("{commits} commits ({maintained})"),
                ));
            }
            Err(_) => {
                checks.push(CheckResult::info("git_history", "unable to read git history"));
            }
        }
    }

    // Output
    match format {
        OutputFormat::Json => {
            let version = env!("CARGO_PKG_VERSION");
            let json = serde_json::json!({
                "version": version,
                "checks": checks,
            });
            println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
        }
        _ => {
            let version = env!("CARGO_PKG_VERSION");
            println!("Scout v{version} — Environment Check\n");

            for check in &checks {
                let sym = if use_color {
                    check.colored_symbol()
                } else {
                    check.symbol().to_string()
                };
                let label = check.name.replace('_', " ");
                println!("  {sym} {label:<16} {}", check.detail);
                if let Some(hint) = &check.hint {
                    println!("    hint: {hint}");
                }
            }

            let passed = checks.iter().filter(|c| c.status == "pass").count();
            let failed = checks.iter().filter(|c| c.status == "fail").count();
            let info = checks.iter().filter(|c| c.status == "info").count();
            println!("\n{passed} checks passed, {failed} failed, {info} info");
        }
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Scout Configuration
# See: https://github.com/codescout-dev/codescout

[llm]
# provider = "groq"
# model = "llama-3.3-70b-versatile"
# temperature = 0.2
# max_tokens = 4000
# max_iterations = 5

[analysis]
# repo_path = "."
# core_modules = 15
# hotspot_limit = 20
# recent_days = 30
# simple_threshold = 5.0
# complex_threshold = 10.0
"#;

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScoutConfig::from_file(path)
            .into_diagnostic()
            .wrap_err(format!("loading config from {}", path.display()))?,
        None => {
            let default_path = Path::new(".scout.toml");
            if default_path.exists() {
                ScoutConfig::from_file(default_path)
                    .into_diagnostic()
                    .wrap_err("loading .scout.toml")?
            } else {
                ScoutConfig::default()
            }
        }
    };

    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    };

    if cli.verbose {
        eprintln!("format: {}", cli.format);
    }

    match cli.command {
        None => {
            print_welcome(use_color);
            return Ok(());
        }
        Some(Command::Core { ref path }) => {
            let analyses = scout_extract::analyze_repository(path)
                .into_diagnostic()
                .wrap_err(format!("analyzing {}", path.display()))?;
            let graph = DependencyGraph::build(&analyses);
            let hotspots = hotspots_if_tracked(path, config.analysis.hotspot_limit);

            match cli.format {
                OutputFormat::Json => {
                    let rows = scout_report::core_module_rows(
                        &graph,
                        &hotspots,
                        config.analysis.core_modules,
                    );
                    println!("{}", serde_json::to_string_pretty(&rows).into_diagnostic()?);
                }
                _ => {
                    print!(
                        "{}",
                        scout_report::core_modules_report(
                            &analyses,
                            &graph,
                            &hotspots,
                            config.analysis.core_modules,
                        )
                    );
                }
            }
        }
        Some(Command::Learn { ref area, ref path }) => {
            let analyses = scout_extract::analyze_repository(path)
                .into_diagnostic()
                .wrap_err(format!("analyzing {}", path.display()))?;
            let graph = DependencyGraph::build(&analyses);
            let complexity = scout_complexity::ComplexityAnalyzer::analyze(path)
                .into_diagnostic()
                .wrap_err("scoring complexity")?;

            match cli.format {
                OutputFormat::Json => {
                    let steps =
                        scout_report::learning_steps(area, &analyses, &graph, &complexity);
                    println!("{}", serde_json::to_string_pretty(&steps).into_diagnostic()?);
                }
                _ => {
                    print!(
                        "{}",
                        scout_report::learning_path(area, &analyses, &graph, &complexity)
                    );
                }
            }
        }
        Some(Command::Entry { ref task, ref path }) => {
            let analyses = scout_extract::analyze_repository(path)
                .into_diagnostic()
                .wrap_err(format!("analyzing {}", path.display()))?;
            let graph = DependencyGraph::build(&analyses);

            match cli.format {
                OutputFormat::Json => {
                    let suggestions = scout_report::entry_suggestions(task, &analyses, &graph);
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&suggestions).into_diagnostic()?
                    );
                }
                _ => {
                    print!("{}", scout_report::suggest_entry_points(task, &analyses, &graph));
                }
            }
        }
        Some(Command::Complexity { ref path }) => {
            let complexity = scout_complexity::ComplexityAnalyzer::analyze(path)
                .into_diagnostic()
                .wrap_err(format!("analyzing {}", path.display()))?;

            match cli.format {
                OutputFormat::Json => {
                    let report = complexity.report();
                    println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
                }
                _ => {
                    print!(
                        "{}",
                        scout_report::complexity_map(
                            &complexity,
                            config.analysis.simple_threshold,
                            config.analysis.complex_threshold,
                        )
                    );
                }
            }
        }
        Some(Command::Deps { ref path }) => {
            let analyses = scout_extract::analyze_repository(path)
                .into_diagnostic()
                .wrap_err(format!("analyzing {}", path.display()))?;
            let graph = DependencyGraph::build(&analyses);
            let report = graph.dependency_report();

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
                }
                _ => {
                    println!("# Dependency Graph\n");
                    println!("- **Total modules:** {}", report.total_modules);
                    println!("- **Leaf modules:** {}", report.leaf_modules_count);
                    println!("- **Circular dependencies:** {}\n", report.circular_dependencies);

                    println!("## Core Modules\n");
                    for path in &report.core_modules {
                        println!("- `{}`", path.display());
                    }

                    println!("\n## Entry Points\n");
                    for path in &report.entry_points {
                        println!("- `{}`", path.display());
                    }

                    if !report.circular_dependency_chains.is_empty() {
                        println!("\n## Circular Dependency Chains\n");
                        for chain in &report.circular_dependency_chains {
                            let rendered: Vec<String> =
                                chain.iter().map(|p| p.display().to_string()).collect();
                            println!("- {}", rendered.join(" -> "));
                        }
                    }

                    if !report.clusters.is_empty() {
                        println!("\n## Clusters\n");
                        for cluster in &report.clusters {
                            println!("- **{}**: {} modules", cluster.name, cluster.module_count);
                        }
                    }
                }
            }
        }
        Some(Command::History {
            ref path,
            limit,
            since,
        }) => {
            let miner = HistoryMiner::open(path).map_err(|_| {
                miette::miette!(
                    help = "Run scout from inside a git repository, or specify --path to one",
                    "Not a git repository: {}",
                    path.display()
                )
            })?;

            let limit = limit.unwrap_or(config.analysis.hotspot_limit);
            let since = since.unwrap_or(config.analysis.recent_days);

            eprintln!("Mining git history at {} ...", path.display());
            let hotspots = miner.hotspots(limit);
            let contributors = miner.contributor_stats();
            let recent = miner.recent_activity(since);

            match cli.format {
                OutputFormat::Json => {
                    let json = serde_json::json!({
                        "totalCommits": miner.total_commits(),
                        "branchCount": miner.branch_count(),
                        "activelyMaintained": miner.is_actively_maintained(),
                        "hotspots": hotspots,
                        "contributors": contributors,
                        "recentActivity": recent,
                    });
                    println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
                }
                _ => {
                    println!("# Git History Analysis\n");
                    println!("**Total commits:** {}", miner.total_commits());
                    println!("**Branches:** {}\n", miner.branch_count());

                    println!("## Hotspots\n");
                    if hotspots.is_empty() {
                        println!("No hotspots detected.\n");
                    } else {
                        println!("| Rank | File | Commits | Authors | Last Modified |");
                        println!("|------|------|---------|---------|---------------|");
                        for (i, h) in hotspots.iter().enumerate() {
                            let when = Utc
                                .timestamp_opt(h.last_modified, 0)
                                .single()
                                .map(|t| t.format("%Y-%m-%d").to_string())
                                .unwrap_or_else(|| "unknown".into());
                            println!(
                                "| {} | `{}` | {} | {} | {} |",
                                i + 1,
                                h.path.display(),
                                h.commit_count,
                                h.authors.len(),
                                when,
                            );
                        }
                        println!();
                    }

                    println!("## Contributors\n");
                    if contributors.is_empty() {
                        println!("No contributor data available.\n");
                    } else {
                        println!("| Name | Commits | Files | +Lines | -Lines |");
                        println!("|------|---------|-------|--------|--------|");
                        for c in &contributors {
                            println!(
                                "| {} | {} | {} | {} | {} |",
                                c.name, c.commit_count, c.files_touched, c.lines_added, c.lines_deleted,
                            );
                        }
                        println!();
                    }

                    println!("## Recent Activity (last {since} days)\n");
                    if recent.is_empty() {
                        println!("No recent commits.");
                    } else {
                        for (file, count) in &recent {
                            println!("- `{}`: {} commits", file.display(), count);
                        }
                    }
                }
            }
        }
        Some(Command::Init) => {
            let path = Path::new(".scout.toml");
            if path.exists() {
                miette::bail!(".scout.toml already exists; not overwriting");
            }
            std::fs::write(path, DEFAULT_CONFIG)
                .into_diagnostic()
                .wrap_err("writing .scout.toml")?;
            println!("Created .scout.toml");
        }
        Some(Command::Doctor) => {
            run_doctor(&config, cli.format, use_color)?;
        }
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}
