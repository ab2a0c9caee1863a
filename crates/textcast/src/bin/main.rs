//! textcast command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use textcast::cli::output::{self, ColorMode, OutputFormat};
use textcast::cli::{convert, inspect, name};

/// Text-to-typed-value coercion tool
#[derive(Parser)]
#[command(name = "textcast")]
#[command(author, version, about = "Coerce text into typed values", long_about = None)]
struct Cli {
    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t, global = true)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output
    #[arg(long, value_enum, default_value_t, global = true)]
    color: ColorMode,

    /// Model file (.xml or .json); defaults to $TEXTCAST_MODEL
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Coerce text to a type
    Convert {
        /// Target type, e.g. `Int32?`, `List<Guid>`, `Acme.Status[]`
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Text to coerce
        text: String,

        /// Treat empty input as one empty token rather than an empty sequence
        #[arg(long)]
        single_token: bool,
    },

    /// Resolve serialized field names on a model type
    Name {
        /// Model type
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Field names
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Show numeric flag, interfaces and static fields of a type
    Inspect {
        /// Type to inspect
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Only list static fields assignable to this type (default: the type itself)
        #[arg(short, long)]
        element: Option<String>,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(cli.color);

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    let result = match cli.command {
        Commands::Convert {
            type_name,
            text,
            single_token,
        } => convert::convert(convert::ConvertConfig {
            type_name,
            text,
            model: cli.model,
            single_token,
            format: cli.format,
            output_file: cli.output,
        }),

        Commands::Name { type_name, fields } => name::name(name::NameConfig {
            type_name,
            fields,
            model: cli.model,
            format: cli.format,
            output_file: cli.output,
        }),

        Commands::Inspect { type_name, element } => inspect::inspect(inspect::InspectConfig {
            type_name,
            element,
            model: cli.model,
            format: cli.format,
            output_file: cli.output,
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
