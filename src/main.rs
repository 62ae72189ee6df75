use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use trellis::di::ServiceContainer;
use trellis::TrellisError;

mod cli;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(about = "Interactive project scaffolding for Node.js")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a project in the current directory
    Init {
        /// Template to render into the project
        #[arg(short, long)]
        template: Option<String>,
        /// Skip interactive wizard (use defaults)
        #[arg(short, long)]
        yes: bool,
    },
    /// Create a new project in a new directory
    New {
        /// Name of the project (creates directory)
        name: String,
        /// Template to render into the project
        #[arg(short, long)]
        template: Option<String>,
        /// Skip interactive prompts
        #[arg(short, long)]
        yes: bool,
    },
    /// Add dependencies to the manifest and install them
    Add {
        /// Packages to add (name or name@version)
        #[arg(required = true)]
        packages: Vec<String>,
        /// Add as dev dependencies
        #[arg(short, long)]
        dev: bool,
    },
    /// Reconcile the manifest with the installed dependency tree
    Install {
        /// Package manager to use (npm or yarn)
        #[arg(short, long)]
        package_manager: Option<String>,
        /// Stream the package manager's full output
        #[arg(short, long)]
        verbose: bool,
    },
    /// Run a script from the manifest
    Run {
        /// Script name
        script: String,
        /// Treat a failing script as a no-op success
        #[arg(long)]
        ignore_error: bool,
    },
    /// Render a template into the current project
    Generate {
        /// Template name
        template: String,
        /// Template variables
        #[arg(short = 'v', long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,
    },
    /// List available templates
    Templates,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let container = match ServiceContainer::new() {
        Ok(container) => container,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Init { template, yes } => {
            cli::init::run(&container, cli::init::InitOptions { template, yes }).await
        }
        Commands::New {
            name,
            template,
            yes,
        } => cli::new::run(&container, name, cli::init::InitOptions { template, yes }).await,
        Commands::Add { packages, dev } => {
            cli::add::run(&container, cli::add::AddOptions { packages, dev }).await
        }
        Commands::Install {
            package_manager,
            verbose,
        } => {
            cli::install::run(
                &container,
                cli::install::InstallCliOptions {
                    package_manager,
                    verbose,
                },
            )
            .await
        }
        Commands::Run {
            script,
            ignore_error,
        } => cli::run::run(&container, script, ignore_error).await,
        Commands::Generate { template, vars } => {
            cli::generate::run(&container, cli::generate::GenerateOptions { template, vars }).await
        }
        Commands::Templates => cli::templates::run(&container),
    };

    // Handle result and exit codes
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(TrellisError::SubprocessExit(code)) => {
            // Subprocess failed - exit with its code
            // No error message (subprocess already printed it)
            ExitCode::from(code as u8)
        }
        Err(e) => {
            eprintln!("\n{}", e);
            if let Some(hint) = hint_for(&e) {
                eprintln!("  hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// A short actionable hint for common failure shapes.
fn hint_for(error: &TrellisError) -> Option<&'static str> {
    let message = error.to_string();
    if message.contains("not found in PATH") {
        Some("install the package manager or pick another with --package-manager")
    } else if message.contains("Template") && message.contains("not found") {
        Some("run `trellis templates` to list what is available")
    } else if message.contains("No package.json") {
        Some("run `trellis init` to scaffold a project here")
    } else {
        None
    }
}
