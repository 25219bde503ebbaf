use anyhow::Result;
use clap::{Parser, Subcommand};

use fixfetch::commands;

#[derive(Parser)]
#[clap(name = "fixfetch")]
#[clap(about = "Fetch and unpack remote source archives used as test fixtures")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Emit progress and timing observations as JSON lines on stdout
    #[clap(long, global = true)]
    json: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a remote archive into a directory
    Fetch {
        /// Archive URL (http or https)
        url: String,
        /// Directory to save the archive into
        destination: String,
    },
    /// Unpack a local archive into a directory
    Extract {
        /// Path to a .zip, .gz or .bz2 archive
        archive: String,
        /// Directory to unpack into
        destination: String,
    },
    /// Download an archive and unpack it in one step
    Get {
        /// Archive URL (http or https)
        url: String,
        /// Directory to download and unpack into
        destination: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch { url, destination } => commands::fetch::fetch(&url, &destination, cli.json),
        Commands::Extract {
            archive,
            destination,
        } => commands::extract::extract(&archive, &destination, cli.json),
        Commands::Get { url, destination } => commands::get::get(&url, &destination, cli.json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
