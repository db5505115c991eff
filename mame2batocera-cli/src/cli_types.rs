//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "mame2batocera", version)]
#[command(
    about = "Convert MAME DATs and extras into a Batocera gamelist.xml",
    long_about = None
)]
pub(crate) struct Cli {
    /// DAT zip, or a directory of DAT zips (defaults to the extras directory)
    #[arg(long, value_name = "PATH")]
    pub dat_zip: Option<PathBuf>,

    /// Directory holding snap.zip, flyers.zip and artwork.zip
    #[arg(long, value_name = "PATH")]
    pub extras_dir: Option<PathBuf>,

    /// Batocera ROMs directory receiving gamelist.xml and media/
    #[arg(long, value_name = "PATH")]
    pub roms_dir: Option<PathBuf>,

    /// Directory in which the temporary extraction folder is created
    #[arg(long, value_name = "PATH")]
    pub extract_temp: Option<PathBuf>,

    /// Ignore any existing gamelist.xml and rebuild it from the DATs
    #[arg(long)]
    pub no_merge: bool,

    /// Show what would be written without touching the ROMs directory
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Settings file (default: ~/.config/mame2batocera/settings.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
