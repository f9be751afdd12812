use crate::quote::{run_quote, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rent_to_sa::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "rent-to-sa",
    about = "Estimate nightly rates and rent-to-SA profit projections",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Price a single property from the command line
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["rent-to-sa"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_quote_arguments() {
        let cli = Cli::try_parse_from([
            "rent-to-sa",
            "quote",
            "--address",
            "45 Smith St, Liverpool L4 3XY",
            "--price",
            "£900 pcm",
            "--bedrooms",
            "3",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Quote(args)) => {
                assert_eq!(args.bedrooms, 3);
                assert_eq!(args.property_type, "house");
                assert!(args.json);
            }
            other => panic!("expected quote command, got {other:?}"),
        }
    }
}
