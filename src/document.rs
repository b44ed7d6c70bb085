use crate::error::{IdRejection, Result, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Classification of a document, used only for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    #[default]
    #[serde(alias = "actual")]
    Actual,
    #[serde(alias = "irrelevant")]
    Irrelevant,
    #[serde(alias = "banned")]
    Banned,
    #[serde(alias = "removed")]
    Removed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Actual => "ACTUAL",
            DocumentStatus::Irrelevant => "IRRELEVANT",
            DocumentStatus::Banned => "BANNED",
            DocumentStatus::Removed => "REMOVED",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document status {0:?}")]
pub struct ParseStatusError(String);

impl FromStr for DocumentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTUAL" => Ok(DocumentStatus::Actual),
            "IRRELEVANT" => Ok(DocumentStatus::Irrelevant),
            "BANNED" => Ok(DocumentStatus::Banned),
            "REMOVED" => Ok(DocumentStatus::Removed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Per-document metadata retained after ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// A ranked search hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Document {
    pub id: i32,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: i32, relevance: f64, rating: i32) -> Self {
        Self {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id,
            significant_digits(self.relevance, RELEVANCE_DIGITS),
            self.rating
        )
    }
}

const RELEVANCE_DIGITS: usize = 6;

/// Format like C's `%g`: `digits` significant digits, trailing zeros dropped,
/// scientific notation when the exponent is below -4 or at least `digits`.
fn significant_digits(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = digits.max(1);
    // Rounding to `digits` may bump the exponent (9.999995 -> 1.00000e1)
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Truncating mean of the ratings, 0 when there are none.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    // |mean| never exceeds the largest |rating|, so it fits back into i32
    (sum / ratings.len() as i64) as i32
}

/// Document metadata keyed by id, plus the order in which ids were added.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: BTreeMap<i32, DocumentData>,
    document_ids: Vec<i32>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `id` may be added: non-negative and not yet present.
    pub fn check_new_id(&self, id: i32) -> Result<()> {
        let reason = if id < 0 {
            IdRejection::Negative
        } else if self.documents.contains_key(&id) {
            IdRejection::Duplicate
        } else {
            return Ok(());
        };
        Err(SearchError::InvalidDocumentId { id, reason })
    }

    /// Record a document. The id must have passed `check_new_id`.
    pub fn insert(&mut self, id: i32, data: DocumentData) {
        self.documents.insert(id, data);
        self.document_ids.push(id);
    }

    pub fn get(&self, id: i32) -> Result<&DocumentData> {
        self.documents
            .get(&id)
            .ok_or(SearchError::DocumentNotFound(id))
    }

    pub fn contains(&self, id: i32) -> bool {
        self.documents.contains_key(&id)
    }

    /// Id of the document added at `position` (0-based).
    pub fn id_at(&self, position: usize) -> Result<i32> {
        self.document_ids
            .get(position)
            .copied()
            .ok_or(SearchError::PositionOutOfRange {
                position,
                count: self.document_ids.len(),
            })
    }

    /// Ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.document_ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
