use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use semver_manager::cli::{
    run_fetch, run_filter, run_increment_stream, run_increment_version, run_promote,
    FilterOptions, HistoryOptions,
};
use semver_manager::config::{load_config, SourceConfig};
use semver_manager::source::{build_source, Platform, StaticSource, TagSource};
use semver_manager::{ui, Increment, Version, VersionPattern};

#[derive(clap::Parser)]
#[command(
    name = "smgr",
    version,
    about = "Manage Semantic Versioning compliant versions"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Never contact a tag source")]
    dry_run: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter a list of versions
    Filter(FilterCmd),

    /// Fetch SemVer tags from a repository or registry, highest first
    ///
    /// Supports every filter of the filter command. Versions passed with
    /// --versions are merged with the fetched ones.
    Fetch(FetchCmd),

    /// Compute a new version
    #[command(subcommand)]
    Increment(IncrementCmd),
}

#[derive(Subcommand)]
enum IncrementCmd {
    /// Increment the release of a version or of a release-only stream
    Release(ReleaseCmd),

    /// Promote a version onto another stream
    Promote(PromoteCmd),
}

#[derive(clap::Args)]
struct FilterFlags {
    #[arg(short, long, help = "Keep versions on this stream, e.g. 1.*.*-rc.*")]
    stream: Option<VersionPattern>,

    #[arg(long, help = "Keep release versions only")]
    release: bool,

    #[arg(short = 'H', long, help = "Keep only the highest version")]
    highest: bool,
}

impl FilterFlags {
    fn options(&self) -> FilterOptions {
        FilterOptions {
            stream: self.stream.clone(),
            release: self.release,
            highest: self.highest,
        }
    }
}

#[derive(clap::Args)]
struct SourceFlags {
    #[arg(short, long, help = "Owner of the repository or registry namespace")]
    owner: Option<String>,

    #[arg(short, long = "repo", help = "Repository or image to read tags from")]
    repository: Option<String>,

    #[arg(short, long, help = "Tag source: github, gitlab, oci, git")]
    platform: Option<Platform>,

    #[arg(short, long, help = "Token to access the repository")]
    token: Option<String>,

    #[arg(long, help = "API or registry base URL")]
    api_url: Option<String>,

    #[arg(long, help = "Local repository path for the git platform")]
    path: Option<PathBuf>,
}

impl SourceFlags {
    /// Flags win over the configuration file and the environment
    fn apply(&self, config: &mut SourceConfig) {
        if let Some(platform) = self.platform {
            config.platform = platform;
        }
        if let Some(owner) = &self.owner {
            config.owner = Some(owner.clone());
        }
        if let Some(repository) = &self.repository {
            config.repository = Some(repository.clone());
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = Some(api_url.clone());
        }
        if let Some(path) = &self.path {
            config.path = Some(path.clone());
        }
    }
}

#[derive(clap::Args)]
struct FilterCmd {
    #[arg(long, help = "Versions to filter, comma or space separated")]
    versions: String,

    #[command(flatten)]
    filters: FilterFlags,
}

#[derive(clap::Args)]
struct FetchCmd {
    #[arg(long, help = "Versions to merge with the fetched ones")]
    versions: Option<String>,

    #[command(flatten)]
    filters: FilterFlags,

    #[command(flatten)]
    source: SourceFlags,
}

#[derive(clap::Args)]
struct HistoryFlags {
    #[arg(long, help = "Existing versions, comma or space separated")]
    versions: Option<String>,

    #[arg(long, help = "Also read existing versions from the tag source")]
    fetch: bool,

    #[command(flatten)]
    source: SourceFlags,
}

impl HistoryFlags {
    fn options(&self) -> HistoryOptions {
        HistoryOptions {
            versions: self.versions.clone(),
            fetch: self.fetch,
        }
    }
}

#[derive(clap::Args)]
struct ReleaseCmd {
    #[arg(short, long, default_value_t = Increment::Patch, help = "major, minor or patch")]
    level: Increment,

    #[arg(
        short = 'V',
        long,
        conflicts_with = "stream",
        required_unless_present = "stream",
        help = "Version to increment"
    )]
    source_version: Option<Version>,

    #[arg(short, long, help = "Release-only stream to increment, e.g. 2.*.*")]
    stream: Option<VersionPattern>,

    #[command(flatten)]
    history: HistoryFlags,
}

#[derive(clap::Args)]
struct PromoteCmd {
    #[arg(short = 'V', long, help = "Version to promote")]
    source_version: Version,

    #[arg(long, help = "Stream to promote to, e.g. 1.*.*-rc.*")]
    target_stream: VersionPattern,

    #[command(flatten)]
    history: HistoryFlags,
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries results only
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    config.apply_env_overrides()?;

    match args.command {
        Command::Filter(cmd) => {
            let versions = run_filter(&cmd.versions, &cmd.filters.options())?;
            ui::display_versions(&versions);
        }
        Command::Fetch(cmd) => {
            cmd.source.apply(&mut config.source);
            let source = open_source(&config.source, args.dry_run, true)?;
            let versions = run_fetch(
                source.as_ref(),
                &config,
                cmd.versions.as_deref(),
                &cmd.filters.options(),
            )?;
            ui::display_versions(&versions);
        }
        Command::Increment(IncrementCmd::Release(cmd)) => {
            let next = match (&cmd.source_version, &cmd.stream) {
                (Some(version), _) => run_increment_version(version, cmd.level),
                (None, Some(stream)) => {
                    cmd.history.source.apply(&mut config.source);
                    let source = open_source(&config.source, args.dry_run, cmd.history.fetch)?;
                    run_increment_stream(
                        source.as_ref(),
                        &config,
                        stream,
                        cmd.level,
                        &cmd.history.options(),
                    )?
                }
                (None, None) => anyhow::bail!("either --source-version or --stream is required"),
            };
            println!("{}", next);
        }
        Command::Increment(IncrementCmd::Promote(cmd)) => {
            cmd.history.source.apply(&mut config.source);
            let source = open_source(&config.source, args.dry_run, cmd.history.fetch)?;
            let promoted = run_promote(
                source.as_ref(),
                &config,
                &cmd.source_version,
                &cmd.target_stream,
                &cmd.history.options(),
            )?;
            println!("{}", promoted);
        }
    }

    Ok(())
}

/// The configured tag source, or an empty one when nothing is to be fetched
fn open_source(
    config: &SourceConfig,
    dry_run: bool,
    fetch: bool,
) -> Result<Box<dyn TagSource>> {
    if !fetch {
        return Ok(Box::new(StaticSource::empty()));
    }
    if dry_run {
        ui::display_warning(&format!(
            "Dry run: skipping the {} tag source",
            config.platform
        ));
    } else {
        ui::display_status(&format!("Reading tags from {}", config.platform));
    }
    Ok(build_source(config, dry_run)?)
}
