mod lens;

use clap::{Parser, Subcommand};
use refscope_core::LensSettings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "refscope",
    version,
    about = "Reference and implementation code lenses for Java workspaces",
    long_about = "Refscope places \"N references\" and \"N implementations\" lenses on Java \
                  declarations and fills in the counts on demand, either inside an editor \
                  over the Language Server Protocol or once from the command line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the code lenses of one Java file
    #[command(
        long_about = "Produces the lenses of FILE and, unless --no-resolve is given, resolves \
                            each one against every project found under the workspace root."
    )]
    Lens {
        /// Java source file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Workspace root. Defaults to the current directory.
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        /// Only place the lenses, do not count
        #[arg(long)]
        no_resolve: bool,
    },
    /// Start the Language Server Protocol (LSP) server
    Lsp,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on command
    let (component, to_stderr) = match &cli.command {
        Commands::Lsp => ("lsp", false),
        Commands::Lens { .. } => ("cli", true),
    };
    let _guard = refscope_runtime::init_logging(component, to_stderr);

    match cli.command {
        Commands::Lens {
            file,
            root,
            no_resolve,
        } => {
            let root = match root {
                Some(root) => root,
                None => std::env::current_dir()?,
            };
            lens::run(&file, root, !no_resolve)
        }
        Commands::Lsp => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async {
                refscope_lsp::run_server(|root| {
                    refscope_runtime::build_default_engine(root, LensSettings::default())
                })
                .await
            })?;
            Ok(())
        }
    }
}
