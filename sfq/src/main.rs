//! sfq: Spectrum Filter Query - CLI for parsing and inspecting filter expressions.

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "sfq")]
#[command(about = "Spectrum Filter Query - parse and inspect Spectrum filter expressions")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a filter expression and print its filter tree as JSON
    #[command(visible_alias = "p")]
    Parse {
        /// Filter expression (reads stdin if omitted or "-")
        expression: Option<String>,

        /// Print JSON on a single line
        #[arg(short = 'c', long = "compact")]
        compact: bool,
    },

    /// Build a model search request (filter, attributes, throttle) as JSON
    #[command(visible_alias = "s")]
    Search {
        /// Filter expression (reads stdin if omitted or "-")
        expression: Option<String>,

        /// Additional attribute to request, by name or ID (repeatable)
        #[arg(short = 'a', long = "attr")]
        attrs: Vec<String>,

        /// Only return device models (overrides config)
        #[arg(short = 'd', long = "devices-only")]
        devices_only: bool,

        /// Maximum number of models to return (overrides config)
        #[arg(short = 't', long = "throttle", value_parser = clap::value_parser!(u32).range(1..))]
        throttle: Option<u32>,

        /// Print JSON on a single line
        #[arg(short = 'c', long = "compact")]
        compact: bool,
    },

    /// List known attribute names and IDs
    #[command(visible_alias = "a")]
    Attrs {
        /// Only show attributes whose name contains this text
        filter: Option<String>,
    },

    /// Resolve attribute names or IDs
    #[command(visible_alias = "r")]
    Resolve {
        /// Attribute names or literal IDs (e.g. model_name, 0x1006e)
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List filter operators
    #[command(visible_alias = "ops")]
    Operators,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },

    /// Quick reference for filter syntax
    #[command(name = "quick-help", visible_alias = "?")]
    QuickHelp,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse { expression, compact } => commands::parse(expression.as_deref(), compact),
        Commands::Search { expression, attrs, devices_only, throttle, compact } => {
            let opts = commands::SearchArgs {
                attrs,
                devices_only,
                throttle,
                compact,
            };
            commands::search(expression.as_deref(), &opts)
        }
        Commands::Attrs { filter } => commands::attrs(filter.as_deref()),
        Commands::Resolve { names } => commands::resolve(&names),
        Commands::Operators => commands::operators(),
        Commands::Init { force } => commands::init(force),
        Commands::QuickHelp => commands::quick_help(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
