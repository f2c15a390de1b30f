//! Versecheck CLI — check poems against a poetic form's meter and rhyme.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use versecheck_core::analyzer::{AnalyzeOptions, SonnetAnalyzer};
use versecheck_core::dict::ingest;
use versecheck_core::dict::store::{OverlayEntries, OverlayPort, PronunciationStore};
use versecheck_core::forms;
use versecheck_core::meter::Strictness;
use versecheck_core::types::{pattern_digits, SonnetAnalysis};

// ─── Top-level CLI ───────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "versecheck",
    about = "Check a poem against a poetic form's meter and rhyme scheme",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a poem against a form
    Analyze(AnalyzeArgs),
    /// Convert a raw CMU-format dictionary to the JSON table format
    ConvertDict(ConvertDictArgs),
}

// ─── Analyze ─────────────────────────────────────────────────────

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Poem file ("-" reads from stdin)
    poem: PathBuf,

    /// Pronunciation table (JSON, word -> phoneme sequence arrays)
    #[arg(long)]
    dict: PathBuf,

    /// Poetic form identifier
    #[arg(long, default_value = "shakespearean")]
    form: String,

    /// Fail lines on any syllable-count mismatch (no off-by-one fitting)
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// JSON file holding user-added pronunciations
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Emit the full report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

// ─── Convert-dict ────────────────────────────────────────────────

#[derive(Parser, Debug)]
struct ConvertDictArgs {
    /// Raw CMU-format dictionary file
    input: PathBuf,

    /// Output JSON table path
    output: PathBuf,
}

// ─── Overlay persistence ─────────────────────────────────────────

/// JSON-file implementation of the core overlay port.
struct JsonOverlayPort {
    path: PathBuf,
}

impl OverlayPort for JsonOverlayPort {
    fn load(&self) -> Result<OverlayEntries> {
        if !self.path.exists() {
            return Ok(OverlayEntries::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read overlay file: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed overlay file: {}", self.path.display()))
    }

    fn save(&self, entries: &OverlayEntries) -> Result<()> {
        let data = serde_json::to_string_pretty(entries)?;
        atomic_write(&self.path, data.as_bytes())
    }
}

/// Atomically write data to a file via temp file + rename.
fn atomic_write(target: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp_path = target.with_extension("tmp");
    std::fs::write(&tmp_path, data)?;
    std::fs::rename(&tmp_path, target)?;
    Ok(())
}

// ─── Report rendering ────────────────────────────────────────────

fn render_report(report: &SonnetAnalysis) {
    println!(
        "Form: {} ({} lines, {})",
        report.form.name, report.form.line_count, report.form.meter.name
    );
    println!(
        "Rhyme scheme: {}",
        report.form.rhyme_scheme.iter().collect::<String>()
    );
    println!();

    for line in &report.lines {
        let marker = if line.meter_valid { " " } else { "!" };
        println!(
            "{} {:>3}. [{:>width$}] {}",
            marker,
            line.line_number,
            pattern_digits(&line.stress_pattern),
            line.text.trim(),
            width = report.form.meter.syllable_count,
        );
    }
    println!();

    if report.meter_valid {
        println!("Meter: OK");
    } else {
        println!("Meter: {} issue(s)", report.meter_issues.len());
        for issue in &report.meter_issues {
            println!("  - {}", issue);
        }
    }

    if report.rhyme_scheme_valid {
        println!("Rhyme scheme: OK");
    } else {
        println!("Rhyme scheme: {} issue(s)", report.rhyme_issues.len());
        for issue in &report.rhyme_issues {
            println!("  - {}", issue);
        }
    }

    if !report.unknown_words.is_empty() {
        println!(
            "Note: {} word(s) not in the dictionary (syllables estimated): {}",
            report.unknown_words.len(),
            report.unknown_words.join(", ")
        );
    }
}

// ─── Runners ─────────────────────────────────────────────────────

fn read_poem(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read poem from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read poem file: {}", path.display()))
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let text = read_poem(&args.poem)?;
    if text.trim().is_empty() {
        bail!("Poem input is empty");
    }

    let form = forms::by_name(&args.form)?;

    log::info!("Loading pronunciation table: {}", args.dict.display());
    let dict_json = std::fs::read_to_string(&args.dict)
        .with_context(|| format!("Failed to read dictionary: {}", args.dict.display()))?;
    let mut store = PronunciationStore::from_json_str(&dict_json)?;
    if let Some(overlay_path) = args.overlay {
        store = store.with_port(Box::new(JsonOverlayPort { path: overlay_path }))?;
    }

    let options = AnalyzeOptions {
        strictness: if args.strict {
            Strictness::Exact
        } else {
            Strictness::Lenient
        },
        meter_family: None,
    };

    let analyzer = SonnetAnalyzer::new(&store);
    let report = analyzer.analyze_sonnet(&text, &form, options);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }

    Ok(())
}

fn run_convert_dict(args: ConvertDictArgs) -> Result<()> {
    log::info!("Converting raw dictionary: {}", args.input.display());
    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read raw dictionary: {}", args.input.display()))?;

    let table = ingest::parse_raw(&content);
    if table.is_empty() {
        bail!("No usable entries in {}", args.input.display());
    }

    atomic_write(&args.output, ingest::to_json_string(&table).as_bytes())?;
    println!("Wrote {} words to {}", table.len(), args.output.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::ConvertDict(args) => run_convert_dict(args),
    }
}
