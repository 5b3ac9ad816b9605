use anyhow::Result;
use clap::Parser;

use db_sdl::cli::{failure_message, Cli};
use db_sdl::db::Database;
use db_sdl::logging::init_tracing;
use db_sdl::schema::generate_sdl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli).await {
        Ok(sdl) => print!("{}", sdl),
        Err(err) => {
            // Printed directly, independent of the log filter
            eprintln!("{}", failure_message(&err));
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let mut config = cli.connection.load_config(cli.save)?;
    let target = cli.connection.resolve(&config, cli.save)?;

    let db = Database::connect(&target.connection_string, cli.tls).await?;
    let (columns, foreign_keys) = db.fetch_metadata(&target.profile.schema).await?;

    if cli.save {
        let name = target.profile.name.clone();
        config.upsert_connection(target.profile);
        config.set_last_connection(&name);
        config.save()?;
        tracing::info!(profile = %name, "saved connection profile");
    }

    Ok(generate_sdl(&columns, &foreign_keys))
}
