mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{Context, ViewArgs};
use sundial_core::config::SundialConfig;

#[derive(Parser)]
#[command(name = "sundial")]
#[command(about = "Compare the time across cities and find shared working hours")]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    view: ViewArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in cities
    Cities,
    /// Show the local time in every city
    Show,
    /// Show work hours on the home city's timeline and where they overlap
    Timeline,
    /// Move the reference time as if clicking a city's timeline bar
    Click {
        /// City whose bar is clicked (catalog id or name)
        city: String,

        /// Position along the bar, 0 is midnight and 0.5 is noon
        #[arg(allow_negative_numbers = true)]
        position: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = SundialConfig::load()?;

    match cli.command {
        Commands::Cities => {
            let context = Context::build(&cli.view, &config);
            if let Err(e) = &context {
                log::debug!("listing without selection: {e:#}");
            }
            commands::cities::run(context.ok().as_ref())
        }
        Commands::Show => commands::show::run(&Context::build(&cli.view, &config)?),
        Commands::Timeline => commands::timeline::run(&Context::build(&cli.view, &config)?),
        Commands::Click { city, position } => {
            let mut context = Context::build(&cli.view, &config)?;
            commands::click::run(&mut context, &city, position)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
