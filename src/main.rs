//! hintdown - help-center HTML to GitBook Markdown

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use serde::Serialize;

use hintdown::{BatchResult, ConvertOptions, SourceDocument, batch, dom};

#[derive(Parser)]
#[command(name = "hintdown")]
#[command(version, about = "Convert help-center HTML pages to GitBook Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    hintdown export/*.html                 Write .md files next to the pages
    hintdown -o book export/*.html         Write .md files, media/ and SUMMARY.md into book/
    hintdown --note-class tip --hint-style warning -o book export/*.html")]
struct Cli {
    /// HTML pages to convert
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory (default: next to each input)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Page whose links become the table of contents
    #[arg(long, value_name = "NAME", default_value = "index.html")]
    index: String,

    /// Do not generate a table of contents
    #[arg(long, conflicts_with = "index")]
    no_index: bool,

    /// Class that marks a note container (repeatable; default: note, callout)
    #[arg(long = "note-class", value_name = "CLASS")]
    note_classes: Vec<String>,

    /// Style of the generated hint blocks
    #[arg(long, value_name = "STYLE", default_value = "info")]
    hint_style: String,

    /// Do not prepend the page title as a heading
    #[arg(long)]
    no_title: bool,

    /// Print a JSON report to stdout
    #[arg(long)]
    json: bool,

    /// Log every page and copied image
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::new()
            .with_hint_style(&self.hint_style)
            .with_title_heading(!self.no_title)
            .with_index_page((!self.no_index).then_some(self.index.as_str()));
        if !self.note_classes.is_empty() {
            options = options.with_note_classes(&self.note_classes);
        }
        if let Some(output) = &self.output {
            let media_root = output.join(&options.media_dir);
            options = options.with_media_root(media_root);
        }
        options
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_module("hintdown", LevelFilter::Debug);
    } else if cli.quiet {
        builder.filter_level(LevelFilter::Error);
    }
    builder.format_timestamp(None).init();
}

/// Convert every input. Returns whether all of them made it.
fn run(cli: &Cli) -> Result<bool, String> {
    let options = cli.options();

    let mut unreadable = Vec::new();
    let mut pages = Vec::new();
    for input in &cli.inputs {
        match load(input, cli.output.is_some()) {
            Ok(page) => pages.push(page),
            Err(e) => {
                log::error!("{}: {e}", input.display());
                unreadable.push(Failure {
                    name: input.display().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    let result = batch::convert(&pages, &options);

    let out_dir = cli.output.as_deref().unwrap_or(Path::new(""));
    let written = result
        .write_to(out_dir, &options)
        .map_err(|e| format!("cannot write output: {e}"))?;

    let report = Report::new(&result, &written, unreadable);
    if cli.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{json}");
    } else if !cli.quiet {
        report.print();
    }

    Ok(report.failures.is_empty())
}

/// Read and parse one page.
///
/// With an output directory the page is named by its file name only, so all
/// outputs land flat in that directory. Otherwise it keeps its path and the
/// Markdown is written next to it.
fn load(path: &Path, flat: bool) -> std::io::Result<SourceDocument> {
    let bytes = fs::read(path)?;
    let name = match path.file_name() {
        Some(file_name) if flat => file_name.to_string_lossy().into_owned(),
        _ => path.to_string_lossy().into_owned(),
    };
    let base_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(SourceDocument::new(name, dom::parse_html_bytes(&bytes), base_dir))
}

#[derive(Serialize)]
struct Report {
    written: Vec<PathBuf>,
    assets: Vec<PathBuf>,
    omitted: Vec<String>,
    failures: Vec<Failure>,
}

#[derive(Serialize)]
struct Failure {
    name: String,
    message: String,
}

impl Report {
    fn new(result: &BatchResult, written: &[PathBuf], unreadable: Vec<Failure>) -> Self {
        let failures = unreadable
            .into_iter()
            .chain(result.failures.iter().map(|f| Failure {
                name: f.name.clone(),
                message: f.error.to_string(),
            }))
            .collect();

        Self {
            written: written.to_vec(),
            assets: result.assets.iter().map(|a| a.destination.clone()).collect(),
            omitted: result.omitted.clone(),
            failures,
        }
    }

    fn print(&self) {
        for path in &self.written {
            println!("Wrote {}", path.display());
        }
        println!(
            "{} files written, {} images copied, {} pages omitted, {} failed",
            self.written.len(),
            self.assets.len(),
            self.omitted.len(),
            self.failures.len()
        );
        for failure in &self.failures {
            eprintln!("error: {}: {}", failure.name, failure.message);
        }
    }
}
