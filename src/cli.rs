use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::convert::DEFAULT_OUTPUT_DIR;
use crate::plan::{NamingMode, DEFAULT_SCALE};

#[derive(Parser)]
#[command(name = "pdfpages")]
#[command(about = "Rasterize PDF pages into PNG images, with cover/back naming")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render every page to a PNG file
    Convert {
        /// PDF file to convert
        path: PathBuf,

        /// Directory the images are written to (created if missing)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        #[command(flatten)]
        naming: NamingArgs,

        /// Pdfium shared library to load instead of searching ./ and system paths
        #[arg(long, value_name = "PATH")]
        pdfium_lib: Option<PathBuf>,
    },

    /// Show which file each page would be written to, without rendering
    Plan {
        /// PDF file to inspect
        path: PathBuf,

        #[command(flatten)]
        naming: NamingArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run as MCP server over stdio
    Mcp,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct NamingArgs {
    /// Disable separate cover/back mode. All pages will be numbered sequentially (1.png, 2.png, ...)
    #[arg(long)]
    pub no_separate_cover_back: bool,

    /// Scale factor for image quality (higher = better quality, larger files)
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    pub scale: f32,
}

impl NamingArgs {
    pub fn mode(&self) -> NamingMode {
        NamingMode::from_separate_cover_back(!self.no_separate_cover_back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_defaults() {
        let cli = Cli::try_parse_from(["pdfpages", "convert", "portfolio.pdf"]).unwrap();
        match cli.command {
            Commands::Convert {
                path,
                output_dir,
                naming,
                pdfium_lib,
            } => {
                assert_eq!(path, PathBuf::from("portfolio.pdf"));
                assert_eq!(output_dir, PathBuf::from("pdf-pages"));
                assert_eq!(naming.mode(), NamingMode::SeparateCoverBack);
                assert_eq!(naming.scale, 2.0);
                assert!(pdfium_lib.is_none());
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_sequential_flag_and_scale() {
        let cli = Cli::try_parse_from([
            "pdfpages",
            "convert",
            "portfolio.pdf",
            "--no-separate-cover-back",
            "--scale",
            "1.5",
            "-o",
            "public/pdf-pages",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert {
                output_dir, naming, ..
            } => {
                assert_eq!(naming.mode(), NamingMode::Sequential);
                assert_eq!(naming.scale, 1.5);
                assert_eq!(output_dir, PathBuf::from("public/pdf-pages"));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_plan_json() {
        let cli = Cli::try_parse_from(["pdfpages", "plan", "portfolio.pdf", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Plan { json: true, .. }));
    }

    #[test]
    fn test_scale_must_be_a_number() {
        assert!(Cli::try_parse_from(["pdfpages", "convert", "a.pdf", "--scale", "big"]).is_err());
    }
}
