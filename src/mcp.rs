use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::convert::{convert_file, ConvertOptions, Quiet};
use crate::pdf::PdfDocument;
use crate::plan::{build_plan, NamingMode, DEFAULT_SCALE};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenderPlanRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(
        description = "Name the first page Cover.png and the last back.png, numbering interior pages from 1 (default: true)"
    )]
    #[serde(default = "default_separate_cover_back")]
    pub separate_cover_back: bool,
    #[schemars(description = "Zoom factor relative to 72 dpi (default: 2.0)")]
    #[serde(default = "default_scale")]
    pub scale: f32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfToPngRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Directory to write PNG files to (created if missing)")]
    pub output_dir: String,
    #[schemars(
        description = "Name the first page Cover.png and the last back.png, numbering interior pages from 1 (default: true)"
    )]
    #[serde(default = "default_separate_cover_back")]
    pub separate_cover_back: bool,
    #[schemars(description = "Zoom factor relative to 72 dpi (default: 2.0)")]
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_separate_cover_back() -> bool {
    true
}

fn default_scale() -> f32 {
    DEFAULT_SCALE
}

#[derive(Debug, Clone)]
pub struct PdfPagesServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfPagesServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfPagesServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfPagesServer {
    #[tool(description = "List the PNG file name each page of a PDF would be written to, without rendering anything")]
    fn pdf_render_plan(&self, Parameters(req): Parameters<RenderPlanRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };
        let mode = NamingMode::from_separate_cover_back(req.separate_cover_back);

        match build_plan(i64::from(doc.page_count()), mode, req.scale) {
            Ok(plan) => {
                let result: Vec<RenderTaskResult> = plan
                    .into_tasks()
                    .into_iter()
                    .map(|t| RenderTaskResult {
                        page_index: t.page_index,
                        output_name: t.output_name,
                    })
                    .collect();
                to_json(&result)
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Render every page of a PDF to PNG files. By default the first page is Cover.png, the last back.png, and interior pages 1.png, 2.png, ...")]
    fn pdf_to_png(&self, Parameters(req): Parameters<PdfToPngRequest>) -> String {
        let options = ConvertOptions {
            output_dir: PathBuf::from(&req.output_dir),
            mode: NamingMode::from_separate_cover_back(req.separate_cover_back),
            scale: req.scale,
            pdfium_library: None,
        };

        // stdout carries the protocol, so progress stays quiet
        match convert_file(Path::new(&req.path), &options, &mut Quiet) {
            Ok(summary) => {
                let result = ConversionResult {
                    output_dir: req.output_dir,
                    total_pages: summary.total_pages,
                    files: summary
                        .files
                        .iter()
                        .map(|f| f.display().to_string())
                        .collect(),
                };
                to_json(&result)
            }
            Err(e) => format!("Error: {}", e),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("Error: {}", e))
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RenderTaskResult {
    pub page_index: usize,
    pub output_name: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ConversionResult {
    pub output_dir: String,
    pub total_pages: usize,
    pub files: Vec<String>,
}

impl ServerHandler for PdfPagesServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF to PNG page rendering. Use pdf_render_plan to preview which file each \
                 page becomes, and pdf_to_png to render the pages into a directory."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfPagesServer::new();

    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
    tracing::info!("MCP server ready on stdio");

    service.waiting().await?;

    Ok(())
}
