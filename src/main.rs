// src/main.rs

//! oubot: Open University module-code lookup bot CLI
//!
//! Local entry points: one-shot lookups, an interactive console session,
//! and config validation. The chat gateway itself is provided by whatever
//! adapter hosts the bot; the console session stands in for it here.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use oubot::{
    bot::{
        ModulesBot, format,
        console::{self, ConsoleChat},
    },
    config,
    error::Result,
    models::{Code, Config, Lookup, SeedCache},
    services::{CatalogResolver, LivenessChecker},
};

#[derive(Parser, Debug)]
#[command(
    name = "oubot",
    version,
    about = "Open University module code lookup bot"
)]

/// CLI Arguments
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[arg(long, default_value = "data/cache.json")]
    cache: String,

    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve one or more codes and print the result
    Lookup {
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Interactive session: stdin lines are treated as chat messages
    Console,
    /// Validate configuration and seed data
    Validate,
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let (config, seed) =
        config::load_runtime(&PathBuf::from(&cli.config), &PathBuf::from(&cli.cache))?;

    match cli.command {
        Command::Lookup { codes } => run_lookup(&config, seed, &codes).await?,
        Command::Console => {
            let bot = ModulesBot::new(&config, seed, ConsoleChat::new())?;
            console::run(bot).await?;
        }
        Command::Validate => run_validate(&config, &seed),
    }

    Ok(())
}

/// Resolve codes from the command line, one formatted line each.
async fn run_lookup(config: &Config, seed: SeedCache, codes: &[String]) -> Result<()> {
    let resolver = CatalogResolver::new(config, seed)?;
    let liveness = LivenessChecker::new(
        &config.catalog.courses_site,
        &config.http,
        config.bot.liveness_retries,
        Duration::from_millis(config.bot.retry_delay_ms),
    )?;

    for raw in codes.iter().take(config.bot.max_modules) {
        let code = Code::new(raw);
        let lookup = match resolver.resolve(&code).await {
            Some(record) => Lookup::Found(liveness.ensure_link(record).await),
            None => Lookup::NotFound(code),
        };
        println!("{}", format::render(&[lookup], "").content);
    }

    Ok(())
}

/// Print a summary of the loaded configuration and seed cache.
fn run_validate(config: &Config, seed: &SeedCache) {
    println!("configuration OK");
    println!("  sparql endpoint: {}", config.catalog.sparql_endpoint);
    println!("  archive base:    {}", config.catalog.archive_base);
    println!("  courses site:    {}", config.catalog.courses_site);
    println!("  command:         !{}", config.bot.command_name);
    println!("  seed entries:    {}", seed.len());
    match config::resolve_token(config) {
        Some(_) => println!("  chat token:      configured"),
        None => println!(
            "  chat token:      missing (set {} or bot.token)",
            config::TOKEN_ENV
        ),
    }
}
