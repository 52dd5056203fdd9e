use anyhow::{bail, Context};
use atlas_aggregator::{
    aggregate, export_report, load_project_entries, write_outputs, AggregatorConfig, LocalSource,
    INDEX_FILE,
};
use atlas_model::ProjectSummary;
use chrono::{DateTime, Utc};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("atlas")
        .version(atlas_aggregator::VERSION)
        .about("Aggregate project documents into project data and insights")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("aggregate")
                .about("Parse every configured project and write JSON data files")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Project list, JSON or YAML"),
                )
                .arg(
                    Arg::new("reference-dir")
                        .long("reference-dir")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory holding the converted project documents"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Output directory for index.json and project files"),
                )
                .arg(
                    Arg::new("concurrency")
                        .long("concurrency")
                        .default_value("8")
                        .value_parser(value_parser!(usize))
                        .help("Documents loaded at the same time"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Render aggregated data as one markdown report")
                .arg(
                    Arg::new("data")
                        .long("data")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory written by `aggregate`"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Markdown file to write"),
                ),
        )
        .subcommand(
            Command::new("insights")
                .about("Print insights for aggregated data as JSON")
                .arg(
                    Arg::new("data")
                        .long("data")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory written by `aggregate`"),
                )
                .arg(
                    Arg::new("now")
                        .long("now")
                        .help("Reference time (RFC 3339), defaults to the current time"),
                ),
        )
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn path_arg<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a Path> {
    args.get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .with_context(|| format!("missing --{name}"))
}

async fn run_aggregate(args: &ArgMatches) -> anyhow::Result<()> {
    let config_path = path_arg(args, "config")?;
    let reference_dir = path_arg(args, "reference-dir")?;
    let out = path_arg(args, "out")?;
    let concurrency = args.get_one::<usize>("concurrency").copied().unwrap_or(8);

    let entries = load_project_entries(config_path)
        .with_context(|| format!("loading project list {}", config_path.display()))?;
    tracing::info!(projects = entries.len(), config = %config_path.display(), "loaded project list");

    let config = AggregatorConfig::new().with_concurrency(concurrency);
    let source = LocalSource::new(reference_dir, config.clone());
    let report = aggregate(&entries, &source, &config).await;

    if report.projects.is_empty() {
        tracing::warn!("no projects to write");
    } else {
        write_outputs(&report.projects, out)
            .await
            .with_context(|| format!("writing output to {}", out.display()))?;
    }

    if !report.is_success() {
        bail!("all {} project(s) failed", report.failures.len());
    }
    Ok(())
}

async fn run_export(args: &ArgMatches) -> anyhow::Result<()> {
    let data = path_arg(args, "data")?;
    let output = path_arg(args, "output")?;

    export_report(data, output, Utc::now())
        .await
        .with_context(|| format!("exporting {} to {}", data.display(), output.display()))?;
    Ok(())
}

async fn run_insights(args: &ArgMatches) -> anyhow::Result<()> {
    let data = path_arg(args, "data")?;
    let now = match args.get_one::<String>("now") {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("invalid --now {raw:?}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let index = data.join(INDEX_FILE);
    let content = tokio::fs::read_to_string(&index)
        .await
        .with_context(|| format!("reading {}", index.display()))?;
    let summaries: Vec<ProjectSummary> =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", index.display()))?;

    let insights = atlas_insights::calculate_insights(&summaries, now);
    println!("{}", serde_json::to_string_pretty(&insights)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let result = match matches.subcommand() {
        Some(("aggregate", args)) => run_aggregate(args).await,
        Some(("export", args)) => run_export(args).await,
        Some(("insights", args)) => run_insights(args).await,
        _ => Ok(()),
    };

    if let Err(err) = result {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}
