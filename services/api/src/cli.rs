use crate::demo::{print_tables, run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use placement_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Placement Intake",
    about = "Run and demonstrate the placement intake workflow from the command line",
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
    /// Walk a record through the create and edit wizards against an in-memory store
    Demo(DemoArgs),
    /// Print the office, level-of-care and document category lookup tables
    Tables,
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
        Command::Demo(args) => run_demo(args),
        Command::Tables => {
            print_tables();
            Ok(())
        }
    }
}
