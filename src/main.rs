use clap::Parser;

use release_actions::{
    Result,
    cli::{self, Command},
    command,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_actions")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    match &cli_args.command {
        Command::Generate(cmd) => command::generate::execute(&cli_args, cmd).await,
        Command::Extract(cmd) => command::extract::execute(&cli_args, cmd).await,
        Command::ExportCsv(cmd) => command::export::execute(cmd),
    }
}
