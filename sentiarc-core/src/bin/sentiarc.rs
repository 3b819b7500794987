//! sentiarc command-line tool
//!
//! Reads a directory of plain-text novels, scores them against a sentiment
//! lexicon and prints JSON lines for an external charting step.
//!
//! ## Usage
//!
//! ```bash
//! # Net sentiment per 80-line window, bing lexicon
//! sentiarc arc ./austen --kind bing --lexicon bing.csv
//!
//! # Same corpus through all three lexicons, 100-line windows
//! sentiarc --window 100 compare ./austen --afinn afinn.csv --bing bing.csv --nrc nrc.csv
//!
//! # Most common words after stop-word removal
//! sentiarc --top 20 words ./austen
//!
//! # Words that contribute most to each label
//! sentiarc contributions ./austen --kind bing --lexicon bing.csv
//!
//! # Most negative chapter of each novel
//! sentiarc chapters ./austen --kind bing --lexicon bing.csv
//!
//! # Label balance of a lexicon file
//! sentiarc lexicon --kind nrc --lexicon nrc.csv
//! ```
//!
//! Every row carries the document title. Logs go to stderr; set `RUST_LOG`
//! or `--log-level` to change verbosity.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sentiarc_core::analyzer::StopWords;
use sentiarc_core::config::load_config;
use sentiarc_core::counts::{
    chapter_negativity, most_negative_chapters, sentiment_word_counts, top_contributions,
    word_counts,
};
use sentiarc_core::{compare_lexicons, Corpus, Lexicon, LexiconKind, Pipeline};
use sentiarc_types::{ArcConfig, AggregationMode, DocId, PolarityCounts, Sentiment};

#[derive(Parser)]
#[command(name = "sentiarc")]
#[command(version)]
#[command(about = "Windowed lexicon sentiment analysis for novels", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level used when RUST_LOG is not set
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Lines per window (overrides the config file)
    #[arg(short, long, global = true)]
    window: Option<u32>,

    /// Rows per ranking (overrides the config file)
    #[arg(long, global = true)]
    top: Option<usize>,

    /// Stop-word file, one word per line (replaces the built-in list)
    #[arg(long, global = true)]
    stop_words: Option<PathBuf>,

    /// Do not remove stop words
    #[arg(long, global = true)]
    keep_stop_words: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Net sentiment per window for one lexicon
    Arc {
        /// Directory of *.txt documents
        corpus: PathBuf,
        /// Lexicon family: bing, nrc or afinn
        #[arg(long)]
        kind: LexiconKind,
        /// Lexicon file
        #[arg(long)]
        lexicon: PathBuf,
    },

    /// Net sentiment per window for several lexicons
    Compare {
        /// Directory of *.txt documents
        corpus: PathBuf,
        /// afinn lexicon file
        #[arg(long)]
        afinn: Option<PathBuf>,
        /// bing lexicon file
        #[arg(long)]
        bing: Option<PathBuf>,
        /// nrc lexicon file
        #[arg(long)]
        nrc: Option<PathBuf>,
    },

    /// Most common words
    Words {
        /// Directory of *.txt documents
        corpus: PathBuf,
    },

    /// Words contributing most to each label
    Contributions {
        /// Directory of *.txt documents
        corpus: PathBuf,
        /// Lexicon family: bing, nrc or afinn
        #[arg(long)]
        kind: LexiconKind,
        /// Lexicon file
        #[arg(long)]
        lexicon: PathBuf,
    },

    /// Chapter with the highest share of negative words, per document
    Chapters {
        /// Directory of *.txt documents
        corpus: PathBuf,
        /// Lexicon family: bing or nrc
        #[arg(long)]
        kind: LexiconKind,
        /// Lexicon file
        #[arg(long)]
        lexicon: PathBuf,
    },

    /// Label counts of a lexicon file
    Lexicon {
        /// Lexicon family: bing, nrc or afinn
        #[arg(long)]
        kind: LexiconKind,
        /// Lexicon file
        #[arg(long)]
        lexicon: PathBuf,
    },
}

/// A row tagged with its document title.
#[derive(Serialize)]
struct Titled<'a, T: Serialize> {
    title: &'a str,
    #[serde(flatten)]
    row: T,
}

#[derive(Serialize)]
struct LexiconSummary {
    kind: LexiconKind,
    words: usize,
    entries: usize,
    balance: PolarityCounts,
    labels: Vec<(Sentiment, usize)>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let pipeline = build_pipeline(&cli)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &cli.command {
        Commands::Arc {
            corpus,
            kind,
            lexicon,
        } => {
            let corpus = load_corpus(corpus)?;
            let lexicon = load_lexicon(*kind, lexicon)?;
            let arc = pipeline.arc(&corpus, &lexicon)?;
            for w in arc.windows {
                emit(&mut out, &corpus, w.doc_id, w)?;
            }
            info!(stats = %arc.stats, "done");
        }
        Commands::Compare {
            corpus,
            afinn,
            bing,
            nrc,
        } => {
            let corpus = load_corpus(corpus)?;
            let mut lexicons = Vec::new();
            for (kind, path) in [
                (LexiconKind::Afinn, afinn),
                (LexiconKind::Bing, bing),
                (LexiconKind::Nrc, nrc),
            ] {
                if let Some(path) = path {
                    lexicons.push(load_lexicon(kind, path)?);
                }
            }
            if lexicons.is_empty() {
                bail!("compare needs at least one of --afinn, --bing, --nrc");
            }
            let refs: Vec<&Lexicon> = lexicons.iter().collect();
            let tokens = pipeline.tokens(&corpus);
            let rows = compare_lexicons(&tokens, &refs, pipeline.config().window_size)?;
            for row in rows {
                emit(&mut out, &corpus, row.sentiment.doc_id, row)?;
            }
        }
        Commands::Words { corpus } => {
            let corpus = load_corpus(corpus)?;
            let tokens = pipeline.tokens(&corpus);
            for row in word_counts(&tokens).into_iter().take(pipeline.config().top_n) {
                write_row(&mut out, &row)?;
            }
        }
        Commands::Contributions {
            corpus,
            kind,
            lexicon,
        } => {
            let corpus = load_corpus(corpus)?;
            let lexicon = load_lexicon(*kind, lexicon)?;
            let scored = lexicon.join(&pipeline.tokens(&corpus))?;
            let rows = sentiment_word_counts(&scored);
            for row in top_contributions(&rows, pipeline.config().top_n) {
                write_row(&mut out, &row)?;
            }
        }
        Commands::Chapters {
            corpus,
            kind,
            lexicon,
        } => {
            if kind.mode() != AggregationMode::Categorical {
                bail!("chapters needs a lexicon with negative labels (bing or nrc), got {kind}");
            }
            let corpus = load_corpus(corpus)?;
            let lexicon = load_lexicon(*kind, lexicon)?;
            let rows = chapter_negativity(&pipeline.tokens(&corpus), &lexicon);
            for row in most_negative_chapters(&rows) {
                emit(&mut out, &corpus, row.doc_id, row)?;
            }
        }
        Commands::Lexicon { kind, lexicon } => {
            let lexicon = load_lexicon(*kind, lexicon)?;
            write_row(
                &mut out,
                &LexiconSummary {
                    kind: lexicon.kind(),
                    words: lexicon.len(),
                    entries: lexicon.entry_count(),
                    balance: lexicon.polarity_balance(),
                    labels: lexicon.label_counts(),
                },
            )?;
        }
    }

    out.flush().context("failed to flush output")?;
    Ok(())
}

fn build_pipeline(cli: &Cli) -> Result<Pipeline> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ArcConfig::default(),
    };
    if let Some(window) = cli.window {
        config.window_size = window;
    }
    if let Some(top) = cli.top {
        config.top_n = top;
    }
    if cli.keep_stop_words {
        config.remove_stop_words = false;
    }

    let mut pipeline = Pipeline::new(config).context("invalid configuration")?;
    if let Some(path) = &cli.stop_words {
        let stop_words = StopWords::from_path(path)
            .with_context(|| format!("failed to load stop words {}", path.display()))?;
        pipeline = pipeline.with_stop_words(stop_words);
    }
    Ok(pipeline)
}

fn load_corpus(dir: &Path) -> Result<Corpus> {
    let corpus = Corpus::from_dir(dir)
        .with_context(|| format!("failed to load corpus {}", dir.display()))?;
    if corpus.is_empty() {
        bail!("no .txt documents in {}", dir.display());
    }
    Ok(corpus)
}

fn load_lexicon(kind: LexiconKind, path: &Path) -> Result<Lexicon> {
    Lexicon::from_path(kind, path)
        .with_context(|| format!("failed to load {kind} lexicon {}", path.display()))
}

fn emit<W: Write, T: Serialize>(out: &mut W, corpus: &Corpus, doc_id: DocId, row: T) -> Result<()> {
    let title = corpus.title(doc_id).unwrap_or_default();
    write_row(out, &Titled { title, row })
}

fn write_row<W: Write, T: Serialize>(out: &mut W, row: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, row)?;
    out.write_all(b"\n")?;
    Ok(())
}
