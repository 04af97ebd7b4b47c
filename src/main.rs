mod cli;

use cli::{print_flush, CliOptions};
use eyre::{Context, Result};
use pngpadder::{pad_file, SizeDirective};
use std::path::Path;

fn main() -> Result<()> {
    let opts = CliOptions::parse();
    let directive = opts.directive()?;

    pad_image(&opts.input, &opts.output, directive, opts.quiet).context("Padding failed!")
}

fn pad_image(input: &Path, output: &Path, directive: SizeDirective, quiet: bool) -> Result<()> {
    if !quiet {
        print_flush!("Padding {} -> {}... ", input.display(), output.display());
    }

    let report = pad_file(input, output, directive);
    if !quiet {
        // Finish the progress line even on failure
        println!("{}", if report.is_ok() { "done" } else { "failed" });
    }
    let report = report?;

    if !quiet {
        println!(
            "Added {} bytes: {} -> {} bytes",
            report.pad_amount, report.input_size, report.output_size
        );
    }

    Ok(())
}
