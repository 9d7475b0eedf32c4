use std::env;
use std::path::PathBuf;

use convoready::corpus::{CorpusProcessor, DEFAULT_MAX_LINES, DEFAULT_TOP_WORDS};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("convoready=info".parse()?))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut corpus_path: Option<PathBuf> = None;
    let mut max_lines = DEFAULT_MAX_LINES;
    let mut top_words = DEFAULT_TOP_WORDS;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--max-lines" | "-n" => {
                if i + 1 < args.len() {
                    max_lines = args[i + 1].parse().unwrap_or(DEFAULT_MAX_LINES);
                    i += 1;
                }
            }
            "--top" | "-t" => {
                if i + 1 < args.len() {
                    top_words = args[i + 1].parse().unwrap_or(DEFAULT_TOP_WORDS);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => corpus_path = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    let Some(corpus_path) = corpus_path else {
        print_help();
        anyhow::bail!("missing corpus path");
    };

    let report = CorpusProcessor::new(max_lines, top_words).process_file(&corpus_path)?;

    eprintln!("✅ Done!");
    eprintln!("   Total lines processed    : {}", report.total_lines);
    eprintln!(
        "   Lines matched to scenario: {} ({:.1}%)",
        report.matched_lines,
        report.match_rate() * 100.0
    );
    for scenario in &report.scenarios {
        eprintln!(
            "   {}: {} lines · {} tokens",
            scenario.category, scenario.lines, scenario.tokens
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_help() {
    println!("ConvoReady corpus frequency processor");
    println!();
    println!("Reads a subtitle corpus (one line per subtitle, optionally tab-separated");
    println!("with the Spanish text in the last column), assigns lines to scenarios by");
    println!("seed words and prints per-scenario word frequencies (per 100k tokens) as JSON.");
    println!();
    println!("Usage: convoready-corpus <path/to/es.txt> [options]");
    println!();
    println!("Options:");
    println!("  -n, --max-lines <N>  Stop after N input lines (default: {})", DEFAULT_MAX_LINES);
    println!("  -t, --top <N>        Words reported per scenario (default: {})", DEFAULT_TOP_WORDS);
    println!("  -h, --help           Show this help");
    println!();
    println!("Corpus source: https://opus.nlpl.eu/OpenSubtitles/corpus/version/OpenSubtitles");
}
