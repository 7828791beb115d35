//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cli::args::{HalberdArgs, OutputFormat};
use crate::document::{Document, DocumentId, DocumentStatus};

/// Results of one query, split into pages.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResults {
    pub query: String,
    pub total_hits: usize,
    pub pages: Vec<Vec<Document>>,
}

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub status: DocumentStatus,
    pub queries: Vec<QueryResults>,
    pub no_result_queries: usize,
    pub duration_ms: u64,
}

/// Result structure for a match.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchOutput {
    pub id: DocumentId,
    pub query: String,
    pub terms: Vec<String>,
    pub status: DocumentStatus,
}

/// Result structure for duplicate removal.
#[derive(Debug, Serialize, Deserialize)]
pub struct DedupResult {
    pub documents_before: usize,
    pub documents_after: usize,
    pub removed: Vec<DocumentId>,
}

/// Corpus statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_documents: usize,
    pub total_terms: usize,
    pub min_id: Option<DocumentId>,
    pub max_id: Option<DocumentId>,
    pub documents_by_status: Vec<(DocumentStatus, usize)>,
}

/// Rendering for the `human` output format.
pub trait HumanOutput {
    fn to_human(&self) -> String;
}

impl HumanOutput for SearchResults {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for query in &self.queries {
            let _ = writeln!(out, "Query: {} ({} hits)", query.query, query.total_hits);
            let paged = query.pages.len() > 1;
            for (index, page) in query.pages.iter().enumerate() {
                if paged {
                    let _ = writeln!(out, "Page {}:", index + 1);
                }
                for document in page {
                    let _ = writeln!(out, "  {document}");
                }
            }
        }
        let _ = writeln!(out, "Status filter: {}", self.status);
        let _ = writeln!(out, "Queries without results: {}", self.no_result_queries);
        let _ = write!(out, "Search time: {}ms", self.duration_ms);
        out
    }
}

impl HumanOutput for MatchOutput {
    fn to_human(&self) -> String {
        format!(
            "Document {} ({}): [{}]",
            self.id,
            self.status,
            self.terms.join(", ")
        )
    }
}

impl HumanOutput for DedupResult {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for id in &self.removed {
            let _ = writeln!(out, "Found duplicate document id {id}");
        }
        let _ = write!(
            out,
            "Documents: {} -> {} ({} removed)",
            self.documents_before,
            self.documents_after,
            self.removed.len()
        );
        out
    }
}

impl HumanOutput for CorpusStats {
    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total documents: {}", self.total_documents);
        let _ = writeln!(out, "Total terms: {}", self.total_terms);
        match (self.min_id, self.max_id) {
            (Some(min), Some(max)) => {
                let _ = writeln!(out, "Id range: {min}..={max}");
            }
            _ => {
                let _ = writeln!(out, "Id range: none");
            }
        }
        for (status, count) in &self.documents_by_status {
            let _ = writeln!(out, "{status}: {count}");
        }
        out.trim_end().to_string()
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &HalberdArgs) -> crate::error::Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            println!("{}", result.to_human());
        }
        OutputFormat::Json => println!("{}", format_json(result, args.pretty)?),
    }
    Ok(())
}

/// Serialize a result as JSON.
pub fn format_json<T: Serialize>(result: &T, pretty: bool) -> crate::error::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
