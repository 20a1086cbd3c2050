use chrono::Local;
use clap::Parser;
use kino_program::config::{Cli, Command};
use kino_program::{HttpFetcher, ProgramService, logger, server};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let fetcher = Arc::new(HttpFetcher::new(cli.user_agent.clone())?);
    let service = Arc::new(ProgramService::new(fetcher));

    match cli.command {
        Command::Serve { bind } => server::serve(bind, service).await?,
        Command::Program { cinema, date } => {
            let date = date
                .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
            match service.run(&cinema, &date).await {
                Ok(listings) => println!("{}", serde_json::to_string_pretty(&listings)?),
                Err(e) => {
                    eprintln!("{}", serde_json::to_string_pretty(&e.body())?);
                    std::process::exit(1);
                }
            }
        }
        Command::Cinemas => {
            for id in service.supported() {
                println!("{id}");
            }
        }
    }

    Ok(())
}
