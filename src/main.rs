use std::io::{self, Read};
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};

use release_version_filter::config::{self, FilterConfig};
use release_version_filter::logging;
use release_version_filter::version::filter::{FilterOutcome, SkipReason, filter_with_diagnostics};
use release_version_filter::version::registries::GitHubRegistry;
use release_version_filter::version::registries::github::DEFAULT_BASE_URL;
use release_version_filter::version::registry::Registry;
use release_version_filter::version::resolver::ReleaseResolver;
use release_version_filter::version::types::{ReleaseField, ReleaseList, RepositorySlug};

#[derive(Parser)]
#[command(name = "release-version-filter")]
#[command(version, about = "List GitHub releases and filter version strings")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write JSON logs to the data directory
    #[arg(long, global = true)]
    log_file: bool,

    /// Print results as a JSON array instead of one per line
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the releases of a GitHub repository
    Releases {
        /// Repository in OWNER/REPO form
        repository: String,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Select versions matching a criterion
    Filter(FilterArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Release attribute reported as the version
    #[arg(long, value_enum, default_value_t)]
    field: ReleaseField,

    /// GitHub API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[derive(Args)]
struct FilterArgs {
    /// Match criterion: latest, eq, gte or lte
    #[arg(long)]
    criteria: String,

    /// Partial version (x, x.y or x.y.z) compared against; required unless latest
    #[arg(long)]
    key: Option<String>,

    /// Keep versions with a -decorator suffix
    #[arg(long)]
    include_decorated: bool,

    /// Print matching versions as given instead of major.minor.patch
    #[arg(long)]
    no_normalize: bool,

    /// Print skipped entries to stderr
    #[arg(long)]
    show_skipped: bool,

    /// Fetch versions from this GitHub repository (OWNER/REPO)
    #[arg(long, conflicts_with = "versions")]
    repo: Option<String>,

    #[command(flatten)]
    source: SourceArgs,

    /// Versions to filter; read from stdin when omitted (JSON array or one per line)
    versions: Vec<String>,
}

impl FilterArgs {
    fn config(&self) -> FilterConfig {
        FilterConfig {
            criteria: Some(self.criteria.clone()),
            key: self.key.clone(),
            include_decorated_versions: self.include_decorated,
            normalize: !self.no_normalize,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.then(config::log_path);
    let _guard = logging::init(cli.verbose, log_path.as_deref())
        .context("Failed to initialize logging")?;

    match cli.command {
        Command::Releases { repository, source } => {
            let repository: RepositorySlug = repository.parse()?;
            let registry = registry(&source)?;
            let releases =
                runtime()?.block_on(async { registry.fetch_releases(&repository).await })?;
            print_versions(&releases.versions, cli.json)
        }
        Command::Filter(args) => {
            let (criterion, options) = args.config().resolve()?;

            let outcome = match &args.repo {
                Some(repo) => {
                    let repository: RepositorySlug = repo.parse()?;
                    let resolver = ReleaseResolver::new(Arc::new(registry(&args.source)?));
                    runtime()?.block_on(resolver.resolve(&repository, &criterion, options))?
                }
                None => {
                    let input = if args.versions.is_empty() {
                        read_stdin()?
                    } else {
                        ReleaseList::new(args.versions.clone())
                    };
                    filter_with_diagnostics(&input.versions, &criterion, options)
                }
            };

            if args.show_skipped {
                report_skipped(&outcome);
            }
            print_versions(&outcome.versions, cli.json)
        }
    }
}

fn registry(source: &SourceArgs) -> anyhow::Result<GitHubRegistry> {
    Ok(GitHubRegistry::new(&source.base_url)?.with_field(source.field))
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

fn read_stdin() -> anyhow::Result<ReleaseList> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read versions from stdin")?;

    if buf.trim_start().starts_with('[') {
        return Ok(ReleaseList::from_json(&buf)?);
    }

    Ok(buf
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect::<Vec<_>>()
        .into())
}

fn report_skipped(outcome: &FilterOutcome) {
    for entry in &outcome.skipped {
        match &entry.reason {
            SkipReason::Unparseable(e) => eprintln!("skipped '{}': {}", entry.input, e),
            SkipReason::Decorated => eprintln!("skipped '{}': decorated version", entry.input),
        }
    }
}

fn print_versions(versions: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(versions)?);
    } else {
        for version in versions {
            println!("{}", version);
        }
    }
    Ok(())
}
