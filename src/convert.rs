use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::output::{DirectoryWriter, FileWriter};
use crate::pdf::document::ensure_exists;
use crate::pdf::render::bind_pdfium;
use crate::pdf::{PageRenderer, PdfiumRenderer};
use crate::plan::{build_plan, validate_scale, NamingMode, RenderPlan, RenderTask, DEFAULT_SCALE};

pub const DEFAULT_OUTPUT_DIR: &str = "pdf-pages";

pub struct ConvertOptions {
    pub output_dir: PathBuf,
    pub mode: NamingMode,
    pub scale: f32,
    /// pdfium shared library to bind instead of searching for one
    pub pdfium_library: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            mode: NamingMode::default(),
            scale: DEFAULT_SCALE,
            pdfium_library: None,
        }
    }
}

/// Receives progress while a plan is executed.
pub trait Progress {
    fn started(&mut self, source: &Path, title: Option<&str>, plan: &RenderPlan);
    fn page_done(&mut self, task: &RenderTask, total_pages: usize);
    fn finished(&mut self, summary: &ConversionSummary);
}

/// Prints progress lines to stdout.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn started(&mut self, source: &Path, title: Option<&str>, plan: &RenderPlan) {
        match title {
            Some(title) => println!(
                "Converting {} pages from {} (\"{}\")...",
                plan.total_pages(),
                source.display(),
                title
            ),
            None => println!(
                "Converting {} pages from {}...",
                plan.total_pages(),
                source.display()
            ),
        }
        println!("Mode: {}", plan.mode().describe());
    }

    fn page_done(&mut self, task: &RenderTask, total_pages: usize) {
        println!(
            "  ✓ Converted page {}/{} → {}",
            task.page_number(),
            total_pages,
            task.output_name
        );
    }

    fn finished(&mut self, summary: &ConversionSummary) {
        println!();
        println!(
            "Success! Converted {} pages to {}",
            summary.files.len(),
            summary.output_dir.display()
        );
    }
}

/// Discards progress; used where stdout is not ours to write to.
pub struct Quiet;

impl Progress for Quiet {
    fn started(&mut self, _: &Path, _: Option<&str>, _: &RenderPlan) {}
    fn page_done(&mut self, _: &RenderTask, _: usize) {}
    fn finished(&mut self, _: &ConversionSummary) {}
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub mode: NamingMode,
    pub scale: f32,
    pub total_pages: usize,
    pub files: Vec<PathBuf>,
}

/// Render every page of `renderer`'s document and hand the PNGs to `writer`,
/// named by [`build_plan`]. Stops at the first failure.
pub fn convert<R, W, P>(
    source: &Path,
    renderer: &R,
    writer: &W,
    mode: NamingMode,
    scale: f32,
    progress: &mut P,
) -> Result<ConversionSummary>
where
    R: PageRenderer + ?Sized,
    W: FileWriter + ?Sized,
    P: Progress + ?Sized,
{
    let total_pages = renderer.page_count();
    // A usize page count always fits in i64
    let plan = build_plan(total_pages as i64, mode, scale)?;
    let title = renderer.title();
    progress.started(source, title.as_deref(), &plan);

    let mut files = Vec::with_capacity(plan.len());
    for task in &plan {
        let png = renderer.render_png(task.page_index, plan.scale())?;
        let path = writer.write(&task.output_name, &png)?;
        tracing::debug!(page = task.page_index, path = %path.display(), "wrote page");
        progress.page_done(task, total_pages);
        files.push(path);
    }

    if plan.is_empty() {
        tracing::warn!(source = %source.display(), "document has no pages, nothing written");
    }

    let summary = ConversionSummary {
        source: source.to_path_buf(),
        output_dir: writer.location().to_path_buf(),
        mode,
        scale: plan.scale(),
        total_pages,
        files,
    };
    progress.finished(&summary);
    Ok(summary)
}

/// Convert the PDF at `input` into PNGs under `options.output_dir` using pdfium.
pub fn convert_file<P: Progress + ?Sized>(
    input: &Path,
    options: &ConvertOptions,
    progress: &mut P,
) -> Result<ConversionSummary> {
    let input = ensure_exists(input)?;
    let scale = validate_scale(options.scale)?;
    let writer = DirectoryWriter::create(&options.output_dir)?;

    let pdfium = bind_pdfium(options.pdfium_library.as_deref())?;
    let renderer = PdfiumRenderer::open(&pdfium, &input)?;
    tracing::info!(
        input = %input.display(),
        output = %options.output_dir.display(),
        scale,
        "converting"
    );

    convert(&input, &renderer, &writer, options.mode, scale, progress)
}
