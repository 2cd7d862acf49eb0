use crate::demo::{run_badges, run_demo, BadgeArgs, DemoArgs};
use crate::server;
use bifl_catalog::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "BIFL Catalog",
    about = "Serve and explore the Buy It For Life product catalog from the command line",
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
    /// Compute badges for a set of scores and explain each rule
    Badges(BadgeArgs),
    /// Walk through a compare session against the seeded catalog
    Demo(DemoArgs),
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
        Command::Badges(args) => {
            run_badges(args);
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["bifl-catalog-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn badges_rejects_out_of_range_scores() {
        let result = Cli::try_parse_from(["bifl-catalog-api", "badges", "--total", "11"]);
        assert!(result.is_err());
    }

    #[test]
    fn badges_collects_repeated_certifications() {
        let cli = Cli::try_parse_from([
            "bifl-catalog-api",
            "badges",
            "--total",
            "9.5",
            "--certification",
            "EcoHero",
            "--certification",
            "Staff Pick",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Badges(args)) => {
                assert_eq!(args.total, Some(9.5));
                assert_eq!(args.certification, vec!["EcoHero", "Staff Pick"]);
            }
            other => panic!("expected badges command, got {other:?}"),
        }
    }
}
