use crate::console::{run_diagnose, run_interview, run_questions, DiagnoseArgs, InterviewArgs, QuestionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mibyou::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Mibyou Salon Diagnosis",
    about = "Run the constitution questionnaire and scoring service from the command line",
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
    /// Print the question catalog
    Questions(QuestionsArgs),
    /// Score a JSON answer file and print the ranked results
    Diagnose(DiagnoseArgs),
    /// Answer the questionnaire interactively in the terminal
    Interview(InterviewArgs),
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
        Command::Questions(args) => run_questions(args),
        Command::Diagnose(args) => run_diagnose(args),
        Command::Interview(args) => run_interview(args),
    }
}
