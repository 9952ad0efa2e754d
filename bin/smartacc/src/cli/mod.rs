use clap::{value_parser, Parser, Subcommand};

pub mod args;
pub mod commands;

/// The main smartacc CLI interface
#[derive(Debug, Parser)]
#[command(author, version, about = "smartacc", long_about = None)]
pub struct Cli {
    /// The command to execute
    #[clap(subcommand)]
    command: Commands,

    /// The verbosity level
    #[clap(long, short, global = true, default_value_t = 2, value_parser = value_parser!(u8).range(..=4))]
    verbosity: u8,
}

impl Cli {
    /// Get the log level based on the verbosity level
    pub fn get_log_level(&self) -> String {
        match self.verbosity {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
        .into()
    }
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Derive the counterfactual address of a Safe account
    #[command(name = "address")]
    Address(commands::AddressCommand),

    /// Build the init code deploying a Safe account
    #[command(name = "init-code")]
    InitCode(commands::InitCodeCommand),

    /// Sign a message with a Safe account
    #[command(name = "sign-message")]
    SignMessage(commands::SignMessageCommand),

    /// Create a new owner key
    #[command(name = "create-owner")]
    CreateOwner(commands::CreateOwnerCommand),
}

pub fn run() -> eyre::Result<()> {
    let cli = Cli::parse();

    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => format!("{val},smartacc={}", cli.get_log_level()),
        Err(_) => format!("smartacc={}", cli.get_log_level()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    rt.block_on(async move {
        match cli.command {
            Commands::Address(command) => command.execute().await,
            Commands::InitCode(command) => command.execute(),
            Commands::SignMessage(command) => command.execute().await,
            Commands::CreateOwner(command) => command.execute(),
        }
    })
}
