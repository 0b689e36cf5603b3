//! lobboard CLI - Construction-site timeline boards
//!
//! Command-line interface for validating activity records and rendering
//! LOB / Pull-Planning boards.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lobboard_core::{ActivityRecord, validate_records};
use lobboard_layout::{
    BoardLayout, LayoutEngine, MarkerGranularity, SortDirection, WindowMode,
};
use lobboard_render::{BoardRenderer, HtmlBoardRenderer, SvgBoardRenderer, TextRenderer};

#[derive(Parser)]
#[command(name = "lobboard")]
#[command(author, version, about = "Construction-site timeline board engine", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a records file and report what would be laid out
    Check {
        /// Input records file (JSON array)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Compute the board layout and emit it as JSON
    Layout {
        /// Input records file (JSON array)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the board
    Board {
        /// Input records file (JSON array)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Output format
        #[arg(short, long, default_value = "html")]
        format: OutputFormat,

        /// Board title
        #[arg(long, default_value = "Timeline")]
        title: String,

        /// Use the light theme (HTML only)
        #[arg(long)]
        light: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Window mode
    #[arg(long, value_enum, default_value = "data")]
    window: WindowArg,

    /// Days of padding before the earliest start (data window)
    #[arg(long, default_value_t = 2)]
    pad_before: u64,

    /// Days of padding after the latest end (data window)
    #[arg(long, default_value_t = 5)]
    pad_after: u64,

    /// Weeks before today the rolling window starts
    #[arg(long, default_value_t = 4)]
    weeks_before: u64,

    /// Total weeks the rolling window spans
    #[arg(long, default_value_t = 16)]
    weeks: u64,

    /// Header marker granularity
    #[arg(long, value_enum, default_value = "month")]
    granularity: GranularityArg,

    /// List groups by descending order key (LOB floors top-down)
    #[arg(long)]
    descending: bool,

    /// Fix "today" for reproducible output (defaults to the current date)
    #[arg(long, value_name = "YYYY-MM-DD")]
    as_of: Option<NaiveDate>,
}

#[derive(Clone, Copy, ValueEnum)]
enum WindowArg {
    /// Derive the window from the data, plus padding
    Data,
    /// Fixed rolling window anchored to week starts
    Rolling,
}

#[derive(Clone, Copy, ValueEnum)]
enum GranularityArg {
    Month,
    Week,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Html,
    Svg,
    Text,
}

impl LayoutArgs {
    fn engine(&self) -> LayoutEngine {
        let mode = match self.window {
            WindowArg::Data => WindowMode::FromData {
                pad_before_days: self.pad_before,
                pad_after_days: self.pad_after,
            },
            WindowArg::Rolling => WindowMode::RollingWeeks {
                weeks_before: self.weeks_before,
                weeks_total: self.weeks,
            },
        };
        let granularity = match self.granularity {
            GranularityArg::Month => MarkerGranularity::Month,
            GranularityArg::Week => MarkerGranularity::Week,
        };
        let direction = if self.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        LayoutEngine::new()
            .mode(mode)
            .granularity(granularity)
            .direction(direction)
    }

    fn today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => check(&file),
        Commands::Layout { file, layout, output } => {
            let Some(board) = compute(&file, &layout)? else {
                println!("No data to display.");
                return Ok(());
            };
            let json = serde_json::to_string_pretty(&board)?;
            write_output(output.as_deref(), &json)
        }
        Commands::Board { file, layout, format, title, light, output } => {
            let Some(board) = compute(&file, &layout)? else {
                println!("No data to display.");
                return Ok(());
            };
            let rendered = match format {
                OutputFormat::Html => {
                    let mut renderer = HtmlBoardRenderer::new().title(title);
                    if light {
                        renderer = renderer.light_theme();
                    }
                    renderer.render(&board)?
                }
                OutputFormat::Svg => SvgBoardRenderer::new().render(&board)?,
                OutputFormat::Text => TextRenderer.render(&board)?,
            };
            write_output(output.as_deref(), &rendered)
        }
    }
}

fn load_records(file: &std::path::Path) -> Result<Vec<ActivityRecord>> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let records: Vec<ActivityRecord> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", file.display()))?;
    debug!(count = records.len(), "records loaded");
    Ok(records)
}

fn check(file: &std::path::Path) -> Result<()> {
    let records = load_records(file)?;
    let validated = validate_records(&records);
    println!("records:   {}", records.len());
    println!("intervals: {}", validated.intervals.len());
    println!("groups:    {}", validated.groups.len());
    println!("dropped:   {}", validated.dropped.len());
    for id in &validated.dropped {
        println!("  - {}", id);
    }
    Ok(())
}

fn compute(file: &std::path::Path, args: &LayoutArgs) -> Result<Option<BoardLayout>> {
    let records = load_records(file)?;
    Ok(args.engine().layout(&records, args.today()))
}

fn write_output(output: Option<&std::path::Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
