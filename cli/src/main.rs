//! unlayout CLI - document structure reconstruction tool

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use unlayout::{
    parse_file_with_options, reconstruct_document, Document, JsonFormat, JsonPageSource,
    LayoutOptions, PageSelection, RenderOptions, StructuralObject, Tolerance,
};

#[derive(Parser)]
#[command(name = "unlayout")]
#[command(version)]
#[command(about = "Rebuild paragraphs, lists and tables from extracted page geometry", long_about = None)]
struct Cli {
    /// Input page dump (JSON), or "-" for stdin
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory (HTML goes to stdout if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Layout settings shared by every command.
#[derive(clap::Args, Clone)]
struct LayoutArgs {
    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long, global = true)]
    pages: Option<String>,

    /// Process pages one at a time
    #[arg(long, global = true)]
    sequential: bool,

    /// Geometric tolerance in points
    #[arg(long, global = true, env = "UNLAYOUT_TOLERANCE")]
    tolerance: Option<f32>,

    /// Narrowest whitespace gap that separates columns, in points
    #[arg(long, global = true)]
    min_divider_width: Option<f32>,
}

impl LayoutArgs {
    fn page_selection(&self) -> Result<PageSelection, Box<dyn std::error::Error>> {
        match self.pages.as_deref() {
            Some(p) => Ok(PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?),
            None => Ok(PageSelection::All),
        }
    }

    fn layout_options(&self) -> Result<LayoutOptions, Box<dyn std::error::Error>> {
        let mut options = LayoutOptions::new()
            .with_pages(self.page_selection()?)
            .with_parallel(!self.sequential);
        if let Some(t) = self.tolerance {
            options = options.with_tolerance(Tolerance::uniform(t));
        }
        if let Some(w) = self.min_divider_width {
            options = options.with_min_divider_width(w);
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a page dump to all formats (HTML, text, JSON)
    Convert {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Convert a page dump to HTML
    Html {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Wrap each page in a <section>
        #[arg(long)]
        page_markers: bool,

        /// Prefix for image sources
        #[arg(long, default_value = "")]
        image_prefix: String,
    },

    /// Convert a page dump to plain text
    Text {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert a page dump to JSON
    Json {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show structure statistics
    Info {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let layout = cli.layout;

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output.as_deref(), &layout),
        Some(Commands::Html {
            input,
            output,
            page_markers,
            image_prefix,
        }) => cmd_html(&input, output.as_deref(), page_markers, &image_prefix, &layout),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref(), &layout),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &layout),
        Some(Commands::Info { input }) => cmd_info(&input, &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                match cli.output.as_deref() {
                    Some(dir) => cmd_convert(&input, Some(dir), &layout),
                    None => cmd_html(&input, None, false, "", &layout),
                }
            } else {
                println!("{}", "Usage: unlayout <FILE> [OUTPUT]".yellow());
                println!("       unlayout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(input: &Path, layout: &LayoutArgs) -> Result<Document, Box<dyn std::error::Error>> {
    let options = layout.layout_options()?;
    let doc = if input == Path::new("-") {
        log::debug!("Reading page dump from stdin");
        let source = JsonPageSource::from_reader(io::stdin().lock())?;
        reconstruct_document(&source, &options)?
    } else {
        parse_file_with_options(input, &options)?
    };
    log::info!(
        "Reconstructed {} pages from {}",
        doc.page_count(),
        input.display()
    );
    for skipped in &doc.skipped {
        eprintln!(
            "{} page {}: {}",
            "Skipped".yellow(),
            skipped.number,
            skipped.reason
        );
    }
    Ok(doc)
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });
    fs::create_dir_all(&output_dir)?;

    let doc = load(input, layout)?;
    let render_options = RenderOptions::new().with_pages(layout.page_selection()?);

    let html = unlayout::render::to_html(&doc, &render_options)?;
    fs::write(output_dir.join("extract.html"), &html)?;

    let text = unlayout::render::to_text(&doc, &render_options)?;
    fs::write(output_dir.join("extract.txt"), &text)?;

    let json = unlayout::render::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join("content.json"), &json)?;

    println!("{}", "Output files:".green().bold());
    println!("  {} extract.html", "├─".dimmed());
    println!("  {} extract.txt", "├─".dimmed());
    println!("  {} content.json", "└─".dimmed());

    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    page_markers: bool,
    image_prefix: &str,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input, layout)?;
    let render_options = RenderOptions::new()
        .with_page_markers(page_markers)
        .with_image_prefix(image_prefix)
        .with_pages(layout.page_selection()?);

    let html = unlayout::render::to_html(&doc, &render_options)?;
    write_or_print(output, &html)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input, layout)?;
    let render_options = RenderOptions::new().with_pages(layout.page_selection()?);

    let text = unlayout::render::to_text(&doc, &render_options)?;
    write_or_print(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input, layout)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = unlayout::render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

#[derive(Default)]
struct StructureCounts {
    paragraphs: usize,
    lists: usize,
    tables: usize,
    graphics: usize,
}

impl StructureCounts {
    fn visit(&mut self, element: &StructuralObject) {
        match element {
            StructuralObject::Paragraph(_) => self.paragraphs += 1,
            StructuralObject::Graphic(_) => self.graphics += 1,
            StructuralObject::List(list) => {
                self.lists += 1;
                for row in &list.rows {
                    row.content.iter().for_each(|e| self.visit(e));
                }
            }
            StructuralObject::Table(table) => {
                self.tables += 1;
                for cell in table.rows.iter().flat_map(|r| &r.cells) {
                    cell.content.iter().for_each(|e| self.visit(e));
                }
            }
        }
    }
}

fn cmd_info(input: &Path, layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input, layout)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Skipped".bold(), doc.skipped.len());

    let mut counts = StructureCounts::default();
    for element in doc.pages.iter().flat_map(|p| &p.elements) {
        counts.visit(element);
    }

    println!();
    println!("{}", "Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Paragraphs".bold(), counts.paragraphs);
    println!("{}: {}", "Lists".bold(), counts.lists);
    println!("{}: {}", "Tables".bold(), counts.tables);
    println!("{}: {}", "Graphics".bold(), counts.graphics);

    let text = doc.plain_text();
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unlayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document structure reconstruction tool");
    println!();
    println!("License: MIT");
}
