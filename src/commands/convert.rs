use crate::convert::{convert_file, ConsoleProgress, ConvertOptions};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>>(input: P, options: &ConvertOptions) -> Result<()> {
    let input = input.as_ref();
    let summary = convert_file(input, options, &mut ConsoleProgress)
        .with_context(|| format!("Error converting PDF: {}", input.display()))?;

    println!();
    println!("Images saved to: {}", summary.output_dir.display());

    Ok(())
}
