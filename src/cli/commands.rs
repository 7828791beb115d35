//! Command implementations for the Halberd CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EngineConfig;
use crate::dedup::remove_duplicates;
use crate::document::{DocumentId, DocumentStatus};
use crate::engine::SearchEngine;
use crate::error::{HalberdError, Result};
use crate::request_queue::RequestQueue;
use crate::paginator::paginate;
use crate::search::ByStatus;
use crate::util::LogDuration;

/// One line of a JSON Lines corpus.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusRecord {
    pub id: DocumentId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Execute a CLI command.
pub fn execute_command(args: HalberdArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search_corpus(search_args, &args),
        Command::Match(match_args) => match_document(match_args, &args),
        Command::Dedup(dedup_args) => dedup_corpus(dedup_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// Build an engine from `--config` and `--stop-words`.
pub fn build_engine(cli_args: &HalberdArgs) -> Result<SearchEngine> {
    let mut config = match &cli_args.config {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };
    if let Some(stop_words) = &cli_args.stop_words {
        config.stop_words = stop_words.clone();
    }
    SearchEngine::with_config(config)
}

/// Add every record of a JSON Lines corpus to `engine`. Blank lines are
/// skipped. Returns the number of documents added.
pub fn load_corpus(engine: &mut SearchEngine, path: &Path) -> Result<usize> {
    let _timer = LogDuration::new(format!("load {}", path.display()));
    let reader = BufReader::new(File::open(path)?);

    let mut added = 0;
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let at_line = |e: HalberdError| {
            warn!("{}:{}: {e}", path.display(), line_num + 1);
            e
        };
        let record: CorpusRecord =
            serde_json::from_str(&line).map_err(|e| at_line(e.into()))?;
        engine
            .add_document(record.id, &record.text, record.status, &record.ratings)
            .map_err(at_line)?;
        added += 1;
    }

    info!("loaded {added} documents from {}", path.display());
    Ok(added)
}

fn open_corpus(corpus: &Path, cli_args: &HalberdArgs) -> Result<SearchEngine> {
    let mut engine = build_engine(cli_args)?;
    load_corpus(&mut engine, corpus)?;
    Ok(engine)
}

/// Rank the corpus against each query.
fn search_corpus(args: &SearchArgs, cli_args: &HalberdArgs) -> Result<()> {
    let engine = open_corpus(&args.corpus, cli_args)?;
    let page_size = args.page_size.unwrap_or(engine.config().max_results);

    let timer = LogDuration::new("search");
    let mut queue = RequestQueue::with_window(&engine, args.queries.len());
    let mut queries = Vec::with_capacity(args.queries.len());
    for query in &args.queries {
        let documents =
            queue.add_find_request_with(args.policy(), query, ByStatus(args.status))?;
        let pages = paginate(&documents, page_size)?
            .into_iter()
            .map(|page| page.items().to_vec())
            .collect();
        queries.push(QueryResults {
            query: query.clone(),
            total_hits: documents.len(),
            pages,
        });
    }
    let duration_ms = timer.elapsed().as_millis() as u64;

    let results = SearchResults {
        status: args.status,
        no_result_queries: queue.no_result_requests(),
        queries,
        duration_ms,
    };
    output_result("Search completed", &results, cli_args)
}

/// Report the query terms found in one document.
fn match_document(args: &MatchArgs, cli_args: &HalberdArgs) -> Result<()> {
    let engine = open_corpus(&args.corpus, cli_args)?;
    let (terms, status) = engine.match_document_with(args.policy(), &args.query, args.id)?;

    let output = MatchOutput {
        id: args.id,
        query: args.query.clone(),
        terms: terms.into_iter().map(str::to_string).collect(),
        status,
    };
    output_result("Match completed", &output, cli_args)
}

/// Remove duplicate documents and report them.
fn dedup_corpus(args: &DedupArgs, cli_args: &HalberdArgs) -> Result<()> {
    let mut engine = open_corpus(&args.corpus, cli_args)?;
    let documents_before = engine.document_count();
    let removed = remove_duplicates(&mut engine)?;

    let result = DedupResult {
        documents_before,
        documents_after: engine.document_count(),
        removed,
    };
    output_result("Duplicate removal completed", &result, cli_args)
}

/// Show corpus statistics.
fn show_stats(args: &StatsArgs, cli_args: &HalberdArgs) -> Result<()> {
    let engine = open_corpus(&args.corpus, cli_args)?;
    output_result("Corpus statistics", &collect_stats(&engine), cli_args)
}

/// Gather statistics about a loaded engine.
pub fn collect_stats(engine: &SearchEngine) -> CorpusStats {
    let mut ids = engine.document_ids();
    let min_id = ids.next();
    let max_id = ids.next_back().or(min_id);

    let documents_by_status = [
        DocumentStatus::Actual,
        DocumentStatus::Irrelevant,
        DocumentStatus::Banned,
        DocumentStatus::Removed,
    ]
    .into_iter()
    .map(|status| {
        let count = engine
            .document_ids()
            .filter(|&id| engine.document(id).is_some_and(|data| data.status == status))
            .count();
        (status, count)
    })
    .filter(|&(_, count)| count > 0)
    .collect();

    CorpusStats {
        total_documents: engine.document_count(),
        total_terms: engine.term_count(),
        min_id,
        max_id,
        documents_by_status,
    }
}
