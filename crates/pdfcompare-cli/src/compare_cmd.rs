use std::path::Path;

use pdfcompare::{
    Capabilities, CompareOptions, Comparer, ComparisonReport, ExitStatus, MethodKind,
    detect_capabilities,
};

use crate::cli::{Cli, OutputFormat};
use crate::output::{self, ConsoleOptions};

/// Methods selected on the command line, in the order given.
pub fn selected_methods(cli: &Cli, caps: &Capabilities) -> Vec<MethodKind> {
    if cli.all {
        caps.iter().collect()
    } else if cli.methods.is_empty() {
        vec![MethodKind::Text]
    } else {
        cli.methods.iter().map(|m| MethodKind::from(*m)).collect()
    }
}

pub fn run(cli: &Cli) -> Result<ExitStatus, i32> {
    let (Some(pdf1), Some(pdf2)) = (cli.pdf1.as_deref(), cli.pdf2.as_deref()) else {
        eprintln!("Error: two PDF files are required");
        return Err(1);
    };

    let caps = detect_capabilities();
    let options = CompareOptions {
        methods: selected_methods(cli, &caps),
        detailed: cli.detailed,
        context_lines: cli.context,
        dpi: cli.dpi,
        ..CompareOptions::default()
    };
    if !cli.quiet {
        let names: Vec<&str> = options.methods.iter().map(|m| m.short_name()).collect();
        eprintln!(
            "Comparing {} and {} ({})",
            pdf1.display(),
            pdf2.display(),
            names.join(", ")
        );
    }

    let comparer = Comparer::new(caps, options);
    let report = comparer.compare(pdf1, pdf2).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    match cli.format {
        OutputFormat::Text => {
            let console = ConsoleOptions {
                detailed: cli.detailed,
                max_display: cli.max_display,
            };
            print!("{}", output::render_console(&report, &console));
        }
        OutputFormat::Json => println!("{}", to_json(&report)?),
    }

    if let Some(path) = cli.json.as_deref() {
        write_json(&report, path)?;
        if !cli.quiet {
            eprintln!("Report written to {}", path.display());
        }
    }

    Ok(report.exit_status())
}

fn to_json(report: &ComparisonReport) -> Result<String, i32> {
    serde_json::to_string_pretty(report).map_err(|e| {
        eprintln!("Error serializing report: {e}");
        1
    })
}

fn write_json(report: &ComparisonReport, path: &Path) -> Result<(), i32> {
    let json = to_json(report)?;
    std::fs::write(path, json + "\n").map_err(|e| {
        eprintln!("Error writing {}: {e}", path.display());
        1
    })
}

pub fn print_capabilities(format: OutputFormat) -> Result<(), i32> {
    let caps = detect_capabilities();
    match format {
        OutputFormat::Text => print!("{}", output::render_capabilities(&caps)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output::capabilities_json(&caps))
                .map_err(|e| {
                    eprintln!("Error serializing capabilities: {e}");
                    1
                })?;
            println!("{json}");
        }
    }
    Ok(())
}
