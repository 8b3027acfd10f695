use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use pdfcompare::MethodKind;

/// Compare two PDF documents by text, appearance, structure and metadata.
///
/// Exit status: 0 if the files are identical, 2 if they differ, 1 on error.
#[derive(Debug, Parser)]
#[command(name = "pdfcompare", about, version)]
pub struct Cli {
    /// First PDF file, reported as pdf1
    #[arg(value_name = "PDF1", required_unless_present = "capabilities")]
    pub pdf1: Option<PathBuf>,

    /// Second PDF file, reported as pdf2
    #[arg(value_name = "PDF2", required_unless_present = "capabilities")]
    pub pdf2: Option<PathBuf>,

    /// Comparison methods to run. Default: text
    #[arg(
        short,
        long,
        value_enum,
        num_args = 1..,
        value_delimiter = ',',
        conflicts_with = "all"
    )]
    pub methods: Vec<MethodArg>,

    /// Run every method available in this environment
    #[arg(long)]
    pub all: bool,

    /// Report each changed line with its page and line number
    #[arg(long)]
    pub detailed: bool,

    /// Lines of surrounding context attached to each difference
    #[arg(long, value_name = "N", default_value_t = 2)]
    pub context: usize,

    /// Differences shown in the console report
    #[arg(long, value_name = "K", default_value_t = 10)]
    pub max_display: usize,

    /// Output format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the full report as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Rendering resolution for visual comparison
    #[arg(long, default_value_t = 150, value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: u32,

    /// Suppress progress messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print which comparison methods are available and exit
    #[arg(long)]
    pub capabilities: bool,
}

/// Comparison method names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Text,
    Visual,
    Structure,
    Metadata,
}

impl From<MethodArg> for MethodKind {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Text => MethodKind::Text,
            MethodArg::Visual => MethodKind::Visual,
            MethodArg::Structure => MethodKind::Structure,
            MethodArg::Metadata => MethodKind::Metadata,
        }
    }
}

/// Output format for stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_files_with_defaults() {
        let cli = Cli::try_parse_from(["pdfcompare", "a.pdf", "b.pdf"]).unwrap();
        assert_eq!(cli.pdf1, Some(PathBuf::from("a.pdf")));
        assert_eq!(cli.pdf2, Some(PathBuf::from("b.pdf")));
        assert!(cli.methods.is_empty());
        assert_eq!(cli.context, 2);
        assert_eq!(cli.max_display, 10);
        assert_eq!(cli.dpi, 150);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_method_list() {
        let cli = Cli::try_parse_from([
            "pdfcompare", "a.pdf", "b.pdf", "-m", "text", "metadata",
        ])
        .unwrap();
        assert_eq!(cli.methods, vec![MethodArg::Text, MethodArg::Metadata]);

        let cli = Cli::try_parse_from(["pdfcompare", "a.pdf", "b.pdf", "--methods=visual,structure"])
            .unwrap();
        assert_eq!(cli.methods, vec![MethodArg::Visual, MethodArg::Structure]);
    }

    #[test]
    fn methods_conflict_with_all() {
        assert!(Cli::try_parse_from(["pdfcompare", "a.pdf", "b.pdf", "--all", "-m", "text"]).is_err());
    }

    #[test]
    fn files_required_unless_capabilities() {
        assert!(Cli::try_parse_from(["pdfcompare", "a.pdf"]).is_err());
        let cli = Cli::try_parse_from(["pdfcompare", "--capabilities"]).unwrap();
        assert!(cli.capabilities);
        assert!(cli.pdf1.is_none());
    }

    #[test]
    fn verbose_is_counted() {
        let cli = Cli::try_parse_from(["pdfcompare", "a.pdf", "b.pdf", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn zero_dpi_is_rejected() {
        assert!(Cli::try_parse_from(["pdfcompare", "a.pdf", "b.pdf", "--dpi", "0"]).is_err());
    }

    #[test]
    fn method_arg_maps_to_kind() {
        assert_eq!(MethodKind::from(MethodArg::Visual), MethodKind::Visual);
        assert_eq!(MethodKind::from(MethodArg::Metadata), MethodKind::Metadata);
    }
}
