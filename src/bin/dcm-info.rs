//! dcm-info: print what a DCM calibration file contains.
//!
//! ```text
//! dcm-info calibration.dcm
//! dcm-info --json calibration.dcm
//! dcm-info --check --encoding latin1 calibration.dcm
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use dcmreader::dcm::{self, ReadOptions};
use dcmreader::{Diagnostic, Document, ElementKind};

#[derive(Parser)]
#[command(name = "dcm-info", about = "Print a summary of a DCM calibration file")]
struct Cli {
    /// DCM file to parse
    file: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// List warnings and unresolved axis mappings; exit with status 1 if there are any
    #[arg(long)]
    check: bool,

    /// Text encoding of the file (WHATWG label, e.g. utf-8, latin1)
    #[arg(short = 'e', long, default_value = "utf-8")]
    encoding: String,
}

#[derive(Debug, Serialize)]
struct Summary {
    file: String,
    format_version: String,
    functions: usize,
    parameters: usize,
    block_parameters: usize,
    characteristic_lines: usize,
    fixed_characteristic_lines: usize,
    group_characteristic_lines: usize,
    characteristic_maps: usize,
    fixed_characteristic_maps: usize,
    group_characteristic_maps: usize,
    distributions: usize,
    warnings: usize,
}

impl Summary {
    fn new(file: &Path, document: &Document, warnings: usize) -> Self {
        let count = |kind| document.elements_of(kind).count();
        Self {
            file: file.display().to_string(),
            format_version: document.format_version.to_string(),
            functions: document.functions.len(),
            parameters: count(ElementKind::Parameter),
            block_parameters: count(ElementKind::ParameterBlock),
            characteristic_lines: count(ElementKind::CharacteristicLine),
            fixed_characteristic_lines: count(ElementKind::FixedCharacteristicLine),
            group_characteristic_lines: count(ElementKind::GroupCharacteristicLine),
            characteristic_maps: count(ElementKind::CharacteristicMap),
            fixed_characteristic_maps: count(ElementKind::FixedCharacteristicMap),
            group_characteristic_maps: count(ElementKind::GroupCharacteristicMap),
            distributions: count(ElementKind::Distribution),
            warnings,
        }
    }

    fn print(&self) {
        let rows = [
            ("functions", self.functions),
            ("parameters", self.parameters),
            ("block parameters", self.block_parameters),
            ("characteristic lines", self.characteristic_lines),
            ("fixed characteristic lines", self.fixed_characteristic_lines),
            ("group characteristic lines", self.group_characteristic_lines),
            ("characteristic maps", self.characteristic_maps),
            ("fixed characteristic maps", self.fixed_characteristic_maps),
            ("group characteristic maps", self.group_characteristic_maps),
            ("distributions", self.distributions),
        ];

        println!();
        println!("Successfully parsed {}", self.file);
        println!("{}", "-".repeat(20 + self.file.len()));
        for (label, count) in rows {
            println!("{:<40}{}", format!("Number of {label}:"), count);
        }
        if self.warnings > 0 {
            println!("{:<40}{}", "Warnings:", self.warnings);
        }
        println!();
    }
}

fn report_problems(diagnostics: &[Diagnostic], mapping_errors: &[String]) {
    for diagnostic in diagnostics {
        println!("warning: {diagnostic}");
    }
    for error in mapping_errors {
        println!("warning: {error}");
    }
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.file.extension().and_then(|e| e.to_str()) != Some("dcm") {
        bail!("Input file not valid: {} is not a .dcm file", cli.file.display());
    }
    let options = ReadOptions::with_encoding_label(&cli.encoding)
        .with_context(|| format!("unknown encoding '{}'", cli.encoding))?;

    let result = dcm::read_with_options(&cli.file, options)
        .with_context(|| format!("failed to parse {}", cli.file.display()))?;
    let (document, diagnostics): (Document, Vec<Diagnostic>) = result.into();

    let summary = Summary::new(&cli.file, &document, diagnostics.len());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print();
    }

    if cli.check {
        let mapping_errors = document.validate();
        report_problems(&diagnostics, &mapping_errors);
        if !diagnostics.is_empty() || !mapping_errors.is_empty() {
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}
