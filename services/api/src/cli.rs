use crate::rank::{run_rank, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scholar_rank::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Scholarship Recommender",
    about = "Rank scholarship offers for an applicant, or serve rankings over HTTP",
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
    /// Rank the catalog for one applicant and print the top offers as JSON
    Rank(RankArgs),
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
        Command::Rank(args) => run_rank(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["scholar-rank"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn rank_accepts_optional_flags() {
        let cli = Cli::try_parse_from([
            "scholar-rank",
            "rank",
            "--email",
            "asha@example.com",
            "--catalog",
            "data/scholarships.csv",
            "--top",
            "3",
            "--today",
            "2025-10-16",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Rank(args)) => {
                assert_eq!(args.email.as_deref(), Some("asha@example.com"));
                assert_eq!(args.top, Some(3));
                assert!(args.applicants.is_none());
                assert!(args.today.is_some());
            }
            other => panic!("expected rank command, got {other:?}"),
        }
    }

    #[test]
    fn rank_rejects_malformed_dates() {
        let result = Cli::try_parse_from(["scholar-rank", "rank", "--today", "16/10/2025"]);
        assert!(result.is_err());
    }
}
