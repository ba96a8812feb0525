use clap::Parser;
use portaudit::cli::{init_logging, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    cli.execute().await
}
