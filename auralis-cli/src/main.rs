mod cli_options;
mod pretty_util;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use auralis_common::config::EngineConfig;
use auralis_common::log::tracing_factory::TracingFactory;
use auralis_common::pretty_util::{to_string_pretty, Format};

use crate::cli_options::CliOptions;
use crate::pretty_util::render_table;

#[derive(Parser, Debug)]
#[command(name = "auralis")]
#[command(version = "0.0.2")]
#[command(about = "a minimal relational database engine")]
#[command(long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,

    /// enable debug logging
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// output format: table | yaml | json
    #[arg(short, long, default_value = "table")]
    format: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// bootstrap the schema catalog under ./data
    Init,
    /// parse and execute a single query, printing the result dataset
    Query {
        /// the raw SQL-like query text
        sql: String,
    },
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    TracingFactory::init_log(args.debug);

    let format: Format = match args.format.parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("[INVALID_FORMAT] {}", e);
            return ExitCode::FAILURE;
        }
    };
    let options = CliOptions::new(args.debug, format);

    let cfg = EngineConfig::default();

    let result = match args.command {
        Commands::Init => auralis_storage::bootstrap(&cfg).map(|_| None),
        Commands::Query { sql } => auralis_engine::execute(&cfg, &sql).map(Some),
    };

    match result {
        Ok(None) => {
            println!("catalog initialized at {}", cfg.data_dir.display());
            ExitCode::SUCCESS
        }
        Ok(Some(dataset)) => {
            match options.format() {
                Format::Table => println!("{}", render_table(&dataset)),
                other => println!("{}", to_string_pretty(&other, &dataset)),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
