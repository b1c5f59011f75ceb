//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{self, Context};
use mentor_verify::config::AppConfig;
use mentor_verify::core::models::ProfileType;
use mentor_verify::output::OutputMode;

/// mentor-verify - Mentor verification and trust scoring
#[derive(Parser, Debug)]
#[command(
    name = "mentor-verify",
    version,
    about = "Mentor verification and trust scoring",
    long_about = "Verify mentor accounts from independent signals.\n\n\
                  A source-hosting profile, uploaded documents and an identity\n\
                  assertion combine into one trust score and status."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Never contact the source-hosting service
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage local profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Run verification for a user
    Verify {
        /// User ID
        user: String,

        /// Source-hosting handle to check
        #[arg(long)]
        handle: Option<String>,

        /// Document to validate (repeatable)
        #[arg(short, long = "document", value_name = "PATH")]
        documents: Vec<PathBuf>,

        /// Identity-proofing method to record
        #[arg(long, value_name = "METHOD")]
        identity_method: Option<String>,

        /// Mark the identity assertion as successful
        #[arg(long, requires = "identity_method")]
        identity_verified: bool,
    },

    /// Show verification status for a user
    Status {
        /// User ID
        user: String,
    },

    /// Check whether a user may start verification
    Eligibility {
        /// User ID
        user: String,
    },

    /// Serve the HTTP API
    #[cfg(feature = "server")]
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Create or replace a profile
    Set {
        /// User ID
        user: String,

        /// Profile type: mentor, student
        #[arg(short = 't', long = "type", default_value = "mentor")]
        profile_type: ProfileType,
    },

    /// Show a profile
    Show {
        /// User ID
        user: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    // `config init` must work even when the existing file is broken
    if let Some(Command::Config {
        action: ConfigAction::Init { force },
    }) = &cli.command
    {
        return commands::config_init(cli.config.as_deref(), *force, output_mode);
    }

    let ctx = Context {
        config: AppConfig::load(cli.config.as_deref())?,
        offline: cli.offline,
        mode: output_mode,
    };

    match cli.command {
        Some(Command::Profile { action }) => match action {
            ProfileAction::Set { user, profile_type } => {
                commands::block_on(commands::profile_set(&ctx, &user, profile_type))
            },
            ProfileAction::Show { user } => {
                commands::block_on(commands::profile_show(&ctx, &user))
            },
        },
        Some(Command::Verify {
            user,
            handle,
            documents,
            identity_method,
            identity_verified,
        }) => {
            let input = commands::VerifyInput {
                handle,
                documents,
                identity_method,
                identity_verified,
            };
            commands::block_on(commands::verify(&ctx, &user, input))
        },
        Some(Command::Status { user }) => commands::block_on(commands::status(&ctx, &user)),
        Some(Command::Eligibility { user }) => {
            commands::block_on(commands::eligibility(&ctx, &user))
        },
        #[cfg(feature = "server")]
        Some(Command::Serve { bind }) => commands::serve(&ctx, bind.as_deref()),
        Some(Command::Config { .. }) => commands::config_show(&ctx),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("mentor-verify v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("mentor-verify v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'mentor-verify --help' for usage");
            }
            Ok(())
        },
    }
}
