//! Command-line interface for the structurer.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    validate_input_path, validate_max_pages, DuplicatePolicy, OrphanPolicy, ParserConfig,
};
use crate::error::Result;
use crate::normalize::LineNormalizer;
use crate::outline::{classify_line, is_excluded};
use crate::output::{render, save_output, OutputFormat};
use crate::pipeline::process_document;
use crate::source::{assemble_pages, source_for_path, PageTextProvider};

/// Kijun Structurer - Rebuild the outline of Japanese regulatory standards.
#[derive(Parser)]
#[command(name = "kijun-structurer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a document into a nested outline.
    Parse {
        /// Input file: a PDF, or text with form-feed page breaks
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,

        /// Orphan heading handling
        #[arg(long, value_enum, default_value_t = OrphanArg::Accept)]
        orphans: OrphanArg,

        /// Handling of headings that repeat a sibling title
        #[arg(long, value_enum, default_value_t = DuplicateArg::Replace)]
        duplicates: DuplicateArg,

        #[command(flatten)]
        pages: PageArgs,
    },

    /// Print how every line would be classified.
    Classify {
        /// Input file: a PDF, or text with form-feed page breaks
        input: PathBuf,

        #[command(flatten)]
        pages: PageArgs,
    },
}

/// Page selection and boilerplate removal options.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Only read the first N pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Do not strip the built-in page boilerplate
    #[arg(long)]
    pub no_default_strip: bool,

    /// Extra regex removed from every page (repeatable)
    #[arg(long = "strip", value_name = "REGEX")]
    pub strip: Vec<String>,
}

impl PageArgs {
    fn normalizer(&self) -> Result<LineNormalizer> {
        let base = if self.no_default_strip {
            LineNormalizer::empty()
        } else {
            LineNormalizer::default()
        };
        base.with_patterns(&self.strip)
    }

    fn validate(&self, input: &Path) -> Result<()> {
        validate_input_path(input)?;
        if let Some(max) = self.max_pages {
            validate_max_pages(max)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrphanArg {
    Accept,
    Warn,
    Reject,
}

impl From<OrphanArg> for OrphanPolicy {
    fn from(arg: OrphanArg) -> Self {
        match arg {
            OrphanArg::Accept => OrphanPolicy::Accept,
            OrphanArg::Warn => OrphanPolicy::Warn,
            OrphanArg::Reject => OrphanPolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicateArg {
    Replace,
    Reopen,
}

impl From<DuplicateArg> for DuplicatePolicy {
    fn from(arg: DuplicateArg) -> Self {
        match arg {
            DuplicateArg::Replace => DuplicatePolicy::Replace,
            DuplicateArg::Reopen => DuplicatePolicy::Reopen,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input,
            output,
            format,
            orphans,
            duplicates,
            pages,
        } => {
            let config = ParserConfig::new()
                .with_orphans(orphans.into())
                .with_duplicates(duplicates.into());
            parse_command(&input, output.as_deref(), format.into(), config, &pages)
        }
        Commands::Classify { input, pages } => classify_command(&input, &pages),
    }
}

/// Execute the parse command.
fn parse_command(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    config: ParserConfig,
    pages: &PageArgs,
) -> Result<()> {
    // Validate before spawning any extractor
    pages.validate(input)?;
    let normalizer = pages.normalizer()?;

    eprintln!(
        "{} {}",
        style("Parsing").bold(),
        style(input.display()).cyan()
    );

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Extracting and structuring pages...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let source = source_for_path(input);
    let document = match process_document(source.as_ref(), &normalizer, config, pages.max_pages)
    {
        Ok(document) => document,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Rendering...");
    let rendered = match render(&document.tree, format) {
        Ok(rendered) => rendered,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    eprintln!("  Nodes: {}", document.tree.len());
    eprintln!("  Headings: {}", document.stats.headings);
    if document.stats.dropped_lines > 0 {
        eprintln!("  Dropped preamble lines: {}", document.stats.dropped_lines);
    }
    if !document.warnings.is_empty() {
        eprintln!(
            "  Warnings: {}",
            style(document.warnings.len()).yellow().bold()
        );
        for warning in &document.warnings {
            eprintln!("    {}", style(warning).yellow());
        }
    }

    match output {
        Some(path) => {
            save_output(&rendered, path)?;
            eprintln!();
            eprintln!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Execute the classify command.
fn classify_command(input: &Path, pages: &PageArgs) -> Result<()> {
    pages.validate(input)?;
    let normalizer = pages.normalizer()?;

    let page_texts = source_for_path(input).page_texts(pages.max_pages)?;
    let text = assemble_pages(&page_texts, &normalizer);

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || is_excluded(line) {
            continue;
        }
        println!("{}", describe_line(index + 1, line));
    }

    Ok(())
}

/// One `classify` output row: line number, family, nominal level, title.
fn describe_line(line_number: usize, line: &str) -> String {
    match classify_line(line) {
        Some(heading) => format!(
            "{line_number:>5}  {:<20} {}  {}",
            heading.family.as_str(),
            heading.level,
            heading.title
        ),
        None => format!("{line_number:>5}  {:<20} -  {line}", "prose"),
    }
}
