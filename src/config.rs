//! Command-line configuration.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Cut square tiles out of an image")]
pub struct Cli {
    /// Source image (PNG or JPEG).
    pub image: PathBuf,

    /// Font file for the coordinate overlay. The built-in font is used when absent.
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Directory the cropped tiles are written to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

impl Cli {
    /// Parses `std::env::args`, exiting with status 1 on usage errors.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(err) if err.use_stderr() => {
                // Nothing left to report to if stderr itself is broken.
                let _ = err.print();
                std::process::exit(1);
            }
            // --help and --version
            Err(err) => err.exit(),
        }
    }
}
