//! CLI binary for qr-stickers.
//!
//! A thin shim over the library crate that maps CLI flags to `SheetConfig`
//! and prints results. With no flags it produces the classic 24-sticker sheet.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use qr_stickers::{
    create_sheet, CompileError, PageGeometry, ProgressCallback, SheetConfig, SheetOutput,
    SheetProgressCallback,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar for sticker generation, then a
/// spinner while the compiler runs.
struct CliProgressCallback {
    bar: ProgressBar,
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Clearing workspace…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl SheetProgressCallback for CliProgressCallback {
    fn on_sheet_start(&self, total: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} stickers  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Generating");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Generating {total} stickers…"))
        ));
    }

    fn on_sticker_complete(&self, index: usize, total: usize, path: &Path) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}",
            green("✓"),
            index,
            total,
            dim(&path.display().to_string()),
        ));
        self.bar.inc(1);
    }

    fn on_layout_written(&self, path: &Path) {
        self.bar
            .println(format!("  {} layout  {}", green("✓"), dim(&path.display().to_string())));
    }

    fn on_compile_start(&self, program: &str) {
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);
        self.bar.set_style(spinner_style);
        self.bar.set_prefix("Compiling");
        self.bar.set_message(format!("running {program}…"));
    }

    fn on_sheet_complete(&self, _total: usize, _compiled: bool) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # The classic sheet: 24 stickers → qr_codes_stickers.pdf
  qr-stickers

  # Ten stickers into a separate directory
  qr-stickers -n 10 --images-dir out/images --source out/sheet.typ -o out/sheet.pdf

  # Machine-readable summary of identifiers and files
  qr-stickers --json > stickers.json

OUTPUT:
  images/QR_<uuid>.gif     one QR code per sticker (directory emptied first)
  qr_codes_stickers.typ    Typst layout source
  qr_codes_stickers.pdf    compiled sheet

EXIT STATUS:
  0  sheet generated and compiled
  1  fatal error (workspace, image generation, layout write)
  2  images and layout written, but the compiler failed

The images directory must sit inside the directory holding --source, since
typst only reads files below the document's own directory.

REQUIREMENTS:
  typst must be installed and on PATH (https://typst.app). Use --compiler to
  point at another binary that accepts `compile <source> <output>`.
"#;

/// Generate a printable sheet of QR-code stickers with unique identifiers.
#[derive(Parser, Debug)]
#[command(
    name = "qr-stickers",
    version,
    about = "Generate a printable sheet of QR-code stickers with unique identifiers",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Number of stickers to generate.
    #[arg(short = 'n', long, env = "QR_STICKERS_COUNT", default_value_t = qr_stickers::config::DEFAULT_COUNT)]
    count: usize,

    /// Directory for the QR images. Plain files inside it are deleted first.
    /// Must lie inside the layout source's directory.
    #[arg(long, env = "QR_STICKERS_IMAGES_DIR", default_value = qr_stickers::config::DEFAULT_IMAGES_DIR)]
    images_dir: PathBuf,

    /// Path of the generated Typst layout source.
    #[arg(long, env = "QR_STICKERS_SOURCE", default_value = qr_stickers::config::DEFAULT_SOURCE_PATH)]
    source: PathBuf,

    /// Path of the compiled document.
    #[arg(short, long, env = "QR_STICKERS_OUTPUT", default_value = qr_stickers::config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Compiler program, invoked as `<compiler> compile <source> <output>`.
    #[arg(long, env = "QR_STICKERS_COMPILER", default_value = qr_stickers::config::DEFAULT_COMPILER)]
    compiler: String,

    /// Minimum QR image edge in pixels (50–4000).
    #[arg(long, env = "QR_STICKERS_SIZE", default_value_t = 500,
          value_parser = clap::value_parser!(u32).range(50..=4000))]
    size: u32,

    /// Seconds the compiler may run before it is killed.
    #[arg(long, env = "QR_STICKERS_COMPILE_TIMEOUT", default_value_t = 120)]
    compile_timeout: u64,

    /// Grid columns on the page.
    #[arg(long, env = "QR_STICKERS_COLUMNS", default_value_t = 2)]
    columns: u32,

    /// Print a JSON summary (stickers, compile outcome, stats) to stdout.
    #[arg(long, env = "QR_STICKERS_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "QR_STICKERS_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "QR_STICKERS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "QR_STICKERS_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level logs; errors always get through.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn SheetProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run ──────────────────────────────────────────────────────────────
    let output = create_sheet(&config)
        .await
        .context("Sticker sheet generation failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    }

    if !cli.quiet {
        print_summary(&output);
    }

    Ok(match output.compile.error {
        None => ExitCode::SUCCESS,
        Some(_) => ExitCode::from(2),
    })
}

/// Map CLI args to `SheetConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<SheetConfig> {
    let geometry = PageGeometry {
        columns: cli.columns,
        ..PageGeometry::default()
    };

    let mut builder = SheetConfig::builder()
        .count(cli.count)
        .images_dir(&cli.images_dir)
        .source_path(&cli.source)
        .output_path(&cli.output)
        .compiler(&cli.compiler)
        .code_size(cli.size)
        .compile_timeout_secs(cli.compile_timeout)
        .geometry(geometry);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// One status line for the run.
fn print_summary(output: &SheetOutput) {
    let stats = &output.stats;
    let report = &output.compile;

    match &report.error {
        None => eprintln!(
            "{}  {} stickers  {}ms  →  {}",
            green("✔"),
            stats.generated,
            stats.total_duration_ms,
            bold(&report.output_path.display().to_string()),
        ),
        Some(CompileError::Launch { program, detail }) => {
            eprintln!(
                "{}  {} stickers written, but {} could not be started: {}",
                red("✘"),
                stats.generated,
                bold(program),
                detail
            );
            eprintln!(
                "   Layout kept at {}; install {} or pass --compiler.",
                bold(&report.source_path.display().to_string()),
                program
            );
        }
        // The diagnostics themselves were already logged by the library.
        Some(CompileError::Failed { program, code, .. }) => {
            eprintln!(
                "{}  {} stickers written, but {} failed to compile {} (exit {})",
                red("✘"),
                stats.generated,
                bold(program),
                report.source_path.display(),
                code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
            );
        }
        Some(e @ CompileError::TimedOut { .. }) => {
            eprintln!("{}  {} stickers written, but {}", red("✘"), stats.generated, e);
        }
    }
}
