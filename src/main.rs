use clap::{Parser, Subcommand};
use post_index::{config, output, site};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "post-index")]
#[command(version, about = "Tag index and series navigation for static blog builds")]
#[command(long_about = "\
Tag index and series navigation for static blog builds

The host publishing tool exports its posts and series data as JSON into a
source directory. post-index groups the posts by tag, writes one index
artifact per tag for the host to render, and answers series navigation
lookups.

Source structure:

  site/
  ├── config.toml      # Optional: permalink patterns, data file names
  ├── posts.json       # [{ \"id\": \"...\", \"tags\": [\"...\"], ... }]
  └── series.json      # { \"name\": { \"entries\": [1, 3, 5] } }

Tag pages are written under the posts permalink prefix: with
permalink = \"posts/:title/\" the page for tag `rust` is posts/tag/rust/index.

Run 'post-index gen-config' to generate a documented config.toml.")]
struct Cli {
    /// Source directory with config.toml and the exported data
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory for the annotated posts and the tag index
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log at info level (otherwise RUST_LOG decides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate posts with tag data and write the tag index
    Tags,
    /// Look up previous/next keys in a series
    Series {
        /// Series name
        name: String,
        /// Position key, read as the same kind of key the series stores
        key: String,
        /// Only answer for keys that are entries of the series
        #[arg(long)]
        exact: bool,
    },
    /// Validate the source directory without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Tags => {
            println!("==> Indexing tags in {}", cli.source.display());
            let report = site::build_tag_index(&cli.source, &cli.output)?;
            output::print_tag_output(&report);
        }
        Command::Series { name, key, exact } => {
            let lookup = site::lookup_series(&cli.source, &name, &key, exact)?;
            output::print_navigation(&name, &lookup.key, lookup.navigation.as_ref());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let report = site::check(&cli.source)?;
            output::print_check_output(&report);
            if report.is_clean() {
                println!("==> Site data is valid");
            } else {
                println!("==> Site data has problems");
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
