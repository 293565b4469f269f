use crate::pdf::PdfDocument;
use crate::plan::{build_plan, NamingMode};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, mode: NamingMode, scale: f32, json: bool) -> Result<()> {
    let doc = PdfDocument::open(&path)?;
    let plan = build_plan(i64::from(doc.page_count()), mode, scale)?;

    if json {
        println!("{}", serde_json::to_string_pretty(plan.tasks())?);
        return Ok(());
    }

    println!("File: {}", doc.path.display());
    if let Some(title) = doc.title() {
        println!("Title: {}", title);
    }
    println!("Pages: {}", plan.total_pages());
    println!("Mode: {}", mode.describe());

    if plan.is_empty() {
        println!("Nothing to render.");
        return Ok(());
    }

    for task in plan.iter() {
        println!("  page {} → {}", task.page_number(), task.output_name);
    }

    Ok(())
}
