use bzip2::read::BzDecoder;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod emit;
mod error;
mod features;
mod page;
mod reconcile;
mod scanner;
mod section;
mod table;

use error::Result;
use features::parse_features;
use page::parse_page;
use reconcile::reconcile;
use scanner::PageBlocks;
use section::{noun_template, russian_section};
use table::{DirectionTable, GenderTables};

#[derive(Parser)]
#[command(name = "wiktionary-gender-pairs")]
#[command(about = "Extract masculine/feminine Russian noun pairs from an English Wiktionary XML dump")]
struct Args {
    /// Input XML file (.xml or .xml.bz2)
    #[arg(default_value = "enwiktionary-latest-pages-articles.xml")]
    input: PathBuf,

    /// Output file for masculine -> feminine pairs
    #[arg(long, default_value = "masc_to_fem.txt")]
    masc_to_fem: PathBuf,

    /// Output file for feminine -> masculine pairs
    #[arg(long, default_value = "fem_to_masc.txt")]
    fem_to_masc: PathBuf,

    /// Also write reconciliation mismatches as JSONL
    #[arg(long)]
    mismatch_report: Option<PathBuf>,

    /// Limit number of pages to scan (for testing with raw dumps)
    #[arg(long)]
    page_limit: Option<usize>,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Default)]
pub struct Stats {
    pub pages_scanned: usize,
    pub no_text: usize,
    pub non_russian: usize,
    pub no_noun_template: usize,
    pub no_gender_features: usize,
    pub pages_matched: usize,
    pub masc_to_fem_entries: usize,
    pub fem_to_masc_entries: usize,
    pub inferred_entries: usize,
    pub mismatches: usize,
    pub elapsed: Duration,
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    Ok(if path.to_string_lossy().ends_with(".bz2") {
        Box::new(BufReader::with_capacity(256 * 1024, BzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(256 * 1024, file))
    })
}

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb
}

/// Fold one page block into the tables. Pages without a Russian noun entry
/// are counted and skipped.
fn process_page(page_xml: &str, tables: &mut GenderTables, stats: &mut Stats) -> Result<()> {
    let page = parse_page(page_xml)?;

    let Some(text) = page.text.as_deref() else {
        stats.no_text += 1;
        return Ok(());
    };
    let Some(section) = russian_section(text) else {
        stats.non_russian += 1;
        return Ok(());
    };
    let Some(template) = noun_template(section) else {
        debug!(title = %page.title, "Russian section without noun template");
        stats.no_noun_template += 1;
        return Ok(());
    };

    let forms = parse_features(template);
    if forms.is_empty() {
        stats.no_gender_features += 1;
        return Ok(());
    }

    debug!(title = %page.title, ?forms, "gender features");
    tables.add_page(&page.title, &forms)?;
    stats.pages_matched += 1;
    Ok(())
}

/// Single pass over the dump. Stops at the first contradiction.
fn extract_tables(
    reader: impl BufRead,
    page_limit: Option<usize>,
    pb: &ProgressBar,
) -> Result<(GenderTables, Stats)> {
    let start_time = Instant::now();
    let mut tables = GenderTables::default();
    let mut stats = Stats::default();

    for page_xml in PageBlocks::new(reader) {
        let page_xml = page_xml?;
        stats.pages_scanned += 1;

        process_page(&page_xml, &mut tables, &mut stats)?;

        if stats.pages_scanned % 1000 == 0 {
            let elapsed = start_time.elapsed().as_secs_f64();
            let rate = stats.pages_scanned as f64 / elapsed;
            pb.set_message(format!(
                "Pages: {} | Matched: {} | Rate: {:.0} pg/s",
                stats.pages_scanned, stats.pages_matched, rate
            ));
        }

        if page_limit.is_some_and(|limit| stats.pages_scanned >= limit) {
            break;
        }
    }

    Ok((tables, stats))
}

fn write_table_file(path: &Path, table: &DirectionTable) -> Result<usize> {
    let mut writer = BufWriter::new(File::create(path)?);
    let written = emit::write_table(table, &mut writer)?;
    info!(table = %table.direction(), path = %path.display(), entries = written, "table written");
    Ok(written)
}

fn run(args: &Args) -> Result<()> {
    if !args.quiet {
        println!("Parsing: {}", args.input.display());
        println!("Output: {} / {}", args.masc_to_fem.display(), args.fem_to_masc.display());
        if let Some(limit) = args.page_limit {
            println!("Page limit: {}", limit);
        }
        println!();
    }

    let start_time = Instant::now();
    let pb = progress_bar(args.quiet);

    let reader = open_input(&args.input)?;
    let (mut tables, mut stats) = extract_tables(reader, args.page_limit, &pb)?;
    pb.finish_and_clear();

    if tables.masc_to_fem.is_empty() && tables.fem_to_masc.is_empty() {
        warn!(input = %args.input.display(), "no Russian noun gender pairs found");
    }

    let before = tables.masc_to_fem.len() + tables.fem_to_masc.len();
    let mismatches = reconcile(&mut tables);
    stats.inferred_entries = tables.masc_to_fem.len() + tables.fem_to_masc.len() - before;
    for mismatch in &mismatches {
        warn!("{}", mismatch);
    }
    stats.mismatches = mismatches.len();

    if let Some(path) = &args.mismatch_report {
        let mut writer = BufWriter::new(File::create(path)?);
        emit::write_mismatch_report(&mismatches, &mut writer)?;
        info!(path = %path.display(), mismatches = mismatches.len(), "mismatch report written");
    }

    stats.masc_to_fem_entries = write_table_file(&args.masc_to_fem, &tables.masc_to_fem)?;
    stats.fem_to_masc_entries = write_table_file(&args.fem_to_masc, &tables.fem_to_masc)?;
    stats.elapsed = start_time.elapsed();

    if !args.quiet {
        print_stats(&stats);
    }

    Ok(())
}

fn print_stats(stats: &Stats) {
    println!();
    println!("============================================================");
    println!("Pages scanned: {}", stats.pages_scanned);
    println!("Pages matched: {}", stats.pages_matched);
    println!("------------------------------------------------------------");
    println!("No revision text: {}", stats.no_text);
    println!("No Russian section: {}", stats.non_russian);
    println!("No noun template: {}", stats.no_noun_template);
    println!("No gender features: {}", stats.no_gender_features);
    println!("------------------------------------------------------------");
    println!("masc_to_fem entries: {}", stats.masc_to_fem_entries);
    println!("fem_to_masc entries: {}", stats.fem_to_masc_entries);
    println!("Inferred by reconciliation: {}", stats.inferred_entries);
    println!("Mismatches: {}", stats.mismatches);
    println!("Time: {}m {}s", stats.elapsed.as_secs() / 60, stats.elapsed.as_secs() % 60);
    println!("Rate: {:.0} pages/sec", stats.pages_scanned as f64 / stats.elapsed.as_secs_f64());
    println!("============================================================");
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipeline tests over synthetic dumps
// ─────────────────────────────────────────────────────────────────────────────
