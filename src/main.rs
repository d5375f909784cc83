use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use version_info::config::{
    DEFAULT_CONFIG_EXTENSION, MergePolicy, ParseErrorPolicy, ResolverOptions,
};
use version_info::metadata::{SetupCfg, SitePackagesIndex};
use version_info::{ConfigFileLocator, VersionInfo, logging};

#[derive(Parser)]
#[command(name = "version-info")]
#[command(version, about = "Print version and vendor information for a package")]
struct Cli {
    /// Package name, e.g. nova or python-novaclient
    package: String,

    /// Fact to print
    #[arg(short, long, value_enum, default_value_t = Field::All)]
    field: Field,

    /// Prefix for the short version
    #[arg(long, default_value = "")]
    prefix: String,

    /// Directory holding installed package metadata (repeatable)
    #[arg(long = "metadata-path", value_name = "DIR")]
    metadata_paths: Vec<PathBuf>,

    /// Source tree consulted when the package is not installed
    #[arg(long, value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// Program name used for `${prog}.conf` lookups
    #[arg(long)]
    program_name: Option<String>,

    /// Home directory used for `~/` lookups
    #[arg(long, value_name = "DIR")]
    home: Option<PathBuf>,

    /// System configuration directory
    #[arg(long, value_name = "DIR")]
    etc_dir: Option<PathBuf>,

    /// Extension of the release override file
    #[arg(long, default_value = DEFAULT_CONFIG_EXTENSION)]
    override_extension: String,

    /// How override values replace metadata values
    #[arg(long, value_enum, default_value_t = MergeArg::IfPresent)]
    merge_policy: MergeArg,

    /// Fail on unreadable or malformed override files instead of ignoring them
    #[arg(long)]
    strict: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Field {
    Release,
    Version,
    Vendor,
    Product,
    Suffix,
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum MergeArg {
    IfPresent,
    Always,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct Report {
    package: String,
    release: String,
    version: String,
    vendor: Option<String>,
    product: Option<String>,
    suffix: Option<String>,
}

fn build_version_info(cli: &Cli) -> VersionInfo {
    let index = if cli.metadata_paths.is_empty() {
        SitePackagesIndex::from_env()
    } else {
        SitePackagesIndex::new(cli.metadata_paths.clone())
    };
    let build = match &cli.project_root {
        Some(root) => SetupCfg::new(root),
        None => SetupCfg::in_current_dir(),
    };

    let mut locator = ConfigFileLocator::new();
    if let Some(home) = &cli.home {
        locator = locator.with_home(home);
    }
    if let Some(etc_dir) = &cli.etc_dir {
        locator = locator.with_etc_dir(etc_dir);
    }
    if let Some(program_name) = &cli.program_name {
        locator = locator.with_program_name(program_name);
    }

    let options = ResolverOptions {
        merge_policy: match cli.merge_policy {
            MergeArg::IfPresent => MergePolicy::OverwriteIfPresent,
            MergeArg::Always => MergePolicy::OverwriteAlways,
        },
        parse_error_policy: if cli.strict {
            ParseErrorPolicy::Propagate
        } else {
            ParseErrorPolicy::Ignore
        },
        override_extension: cli.override_extension.clone(),
    };

    VersionInfo::new(&cli.package)
        .with_index(Arc::new(index))
        .with_build_metadata(Some(Arc::new(build)))
        .with_locator(locator)
        .with_options(options)
}

fn print_report(cli: &Cli, info: &VersionInfo) -> anyhow::Result<()> {
    let strings = info.vendor_strings()?;
    let report = Report {
        package: cli.package.clone(),
        release: info.release()?,
        version: info.cached_version_string(&cli.prefix)?,
        vendor: strings.vendor,
        product: strings.product,
        suffix: strings.suffix,
    };

    match cli.format {
        Format::Text => {
            println!("release: {}", report.release);
            println!("version: {}", report.version);
            println!("vendor: {}", report.vendor.unwrap_or_default());
            println!("product: {}", report.product.unwrap_or_default());
            println!("suffix: {}", report.suffix.unwrap_or_default());
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard =
        logging::init(cli.log_json, cli.log_file.as_deref()).map_err(|e| anyhow::anyhow!(e))?;

    let info = build_version_info(&cli);
    let context = || format!("Failed to resolve version information for {}", cli.package);

    let value = match cli.field {
        Field::All => return print_report(&cli, &info).with_context(context),
        Field::Release => Some(info.release().with_context(context)?),
        Field::Version => Some(info.cached_version_string(&cli.prefix).with_context(context)?),
        Field::Vendor => info.vendor().with_context(context)?,
        Field::Product => info.product().with_context(context)?,
        Field::Suffix => info.suffix().with_context(context)?,
    };

    match cli.format {
        Format::Text => println!("{}", value.unwrap_or_default()),
        Format::Json => println!("{}", serde_json::to_string(&value)?),
    }

    Ok(())
}
