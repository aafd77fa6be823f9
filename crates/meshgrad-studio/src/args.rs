use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use meshgrad_engine::export::{ExportFormat, Quality};
use meshgrad_engine::model::GradientType;

/// Mesh, linear, radial and conic gradients from a handful of colored points.
#[derive(Debug, Clone, Parser)]
#[command(name = "meshgrad", version, author)]
pub struct CliArguments {
    #[command(subcommand)]
    pub command: Command,

    /// Logging verbosity: -v = info, -vv = debug, -vvv = trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generates a random gradient as JSON
    New(NewCommand),

    /// Renders a gradient file to PNG, JPEG, SVG or CSS
    #[command(visible_alias = "e")]
    Export(ExportCommand),

    /// Manages the saved-gradient collection
    #[command(subcommand)]
    Saved(SavedCommand),

    /// Shows a hex color as RGB, HSV and HSL
    Color(ColorCommand),
}

#[derive(Debug, Clone, Parser)]
pub struct NewCommand {
    /// Number of control points
    #[arg(long, short = 'n', default_value_t = 2)]
    pub points: usize,

    /// Gradient type
    #[arg(long = "type", short = 't', value_enum, default_value_t = KindArg::Mesh)]
    pub kind: KindArg,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
pub struct ExportCommand {
    /// Gradient JSON file, or `-` for stdin
    pub input: PathBuf,

    #[arg(long, short, value_enum)]
    pub format: FormatArg,

    /// Output width in pixels (keeps the configured aspect ratio if only one side is given)
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// JPEG quality (defaults to the configured quality)
    #[arg(long, value_enum)]
    pub quality: Option<QualityArg>,

    /// Output file (default: gradient-YYYY-MM-DD.<ext>; CSS goes to stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also copy SVG or CSS output to the clipboard
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum SavedCommand {
    /// Lists saved gradients
    List,
    /// Saves a gradient file into the collection
    Save(SavedFileArgs),
    /// Deletes a saved gradient
    Delete(SavedIdArgs),
    /// Prints a saved gradient as JSON
    Show(SavedIdArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SavedFileArgs {
    /// Gradient JSON file, or `-` for stdin
    pub file: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct SavedIdArgs {
    pub id: String,
}

#[derive(Debug, Clone, Parser)]
pub struct ColorCommand {
    /// `#rrggbb` or `rrggbb`
    pub value: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum KindArg {
    Mesh,
    Linear,
    Radial,
    Conic,
}

impl From<KindArg> for GradientType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Mesh => Self::Mesh,
            KindArg::Linear => Self::Linear,
            KindArg::Radial => Self::Radial,
            KindArg::Conic => Self::Conic,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum FormatArg {
    Png,
    #[value(alias = "jpg")]
    Jpeg,
    Svg,
    Css,
}

impl FormatArg {
    pub fn with_quality(self, quality: Quality) -> ExportFormat {
        match self {
            Self::Png => ExportFormat::Png,
            Self::Jpeg => ExportFormat::Jpeg(quality),
            Self::Svg => ExportFormat::Svg,
            Self::Css => ExportFormat::Css,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum QualityArg {
    Low,
    Normal,
    High,
}

impl From<QualityArg> for Quality {
    fn from(q: QualityArg) -> Self {
        match q {
            QualityArg::Low => Self::Low,
            QualityArg::Normal => Self::Normal,
            QualityArg::High => Self::High,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        CliArguments::command().debug_assert();
    }

    #[test]
    fn parses_export() {
        let args = CliArguments::parse_from([
            "meshgrad", "-vv", "export", "g.json", "--format", "jpg", "--width", "800",
            "--quality", "high",
        ]);
        assert_eq!(args.verbosity, 2);
        let Command::Export(cmd) = args.command else { panic!("expected export") };
        assert_eq!(cmd.format, FormatArg::Jpeg);
        assert_eq!(cmd.width, Some(800));
        assert_eq!(cmd.height, None);
        assert_eq!(cmd.quality, Some(QualityArg::High));
    }

    #[test]
    fn parses_saved_subcommands() {
        let args = CliArguments::parse_from(["meshgrad", "saved", "delete", "1700000000000"]);
        assert!(matches!(args.command, Command::Saved(SavedCommand::Delete(ref a)) if a.id == "1700000000000"));
    }
}
