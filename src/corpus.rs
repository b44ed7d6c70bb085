use crate::document::DocumentStatus;
use crate::engine::SearchServer;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One document record of a JSON corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub id: i32,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Load a corpus from a JSON array, gunzipping paths that end in `.gz`.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<CorpusEntry>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let reader: Box<dyn Read> = if path.extension().map_or(false, |ext| ext == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let entries: Vec<CorpusEntry> = serde_json::from_reader(BufReader::new(reader))
        .with_context(|| format!("Failed to parse corpus {}", path.display()))?;
    Ok(entries)
}

/// Add every entry to the server, stopping at the first rejected document.
pub fn index_corpus(server: &mut SearchServer, entries: &[CorpusEntry]) -> Result<()> {
    for entry in entries {
        server
            .add_document(entry.id, &entry.text, entry.status, &entry.ratings)
            .with_context(|| format!("Failed to add document {}", entry.id))?;
    }
    tracing::info!(documents = entries.len(), "corpus indexed");
    Ok(())
}
