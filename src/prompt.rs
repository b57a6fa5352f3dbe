//! Ordered multi-source prompt aggregation.
//!
//! A query's prompt is assembled from up to three source categories, always
//! in the same order: piped stdin first, then each file or URL named on the
//! command line, left to right. The combined size is capped by
//! [`MAX_INPUT_TOTAL_BYTES`]; the first source that would cross the ceiling
//! aborts aggregation and nothing after it is read.

use std::path::Path;

use crate::constants::{DEFAULT_PROMPT, MAX_INPUT_TOTAL_BYTES};
use crate::error::{QueryError, SourceKind};
use crate::fetch::{FetchError, Fetcher};

/// Running total of input bytes against the fixed ceiling.
struct ByteBudget {
    used: usize,
    ceiling: usize,
}

impl ByteBudget {
    fn new(ceiling: usize) -> Self {
        Self { used: 0, ceiling }
    }

    /// Bytes still spendable, handed to fetch primitives as their limit.
    fn remaining(&self) -> usize {
        self.ceiling - self.used
    }

    /// Accounts for `n` more bytes, failing when the total would cross the
    /// ceiling.
    fn charge(
        &mut self,
        n: usize,
        category: SourceKind,
        reference: Option<&str>,
    ) -> Result<(), QueryError> {
        if self.used + n > self.ceiling {
            return Err(QueryError::InputTooLarge {
                category,
                reference: reference.map(str::to_string),
                limit: self.ceiling,
            });
        }
        self.used += n;
        Ok(())
    }
}

/// True when `reference` names something to fetch over HTTP rather than
/// read from disk. Only http(s) counts; other scheme-shaped strings (and
/// Windows drive paths, which parse as single-letter schemes) stay files.
fn is_web_url(reference: &str) -> bool {
    matches!(
        reqwest::Url::parse(reference),
        Ok(url) if matches!(url.scheme(), "http" | "https")
    )
}

/// Collects prompt blocks from stdin and the referenced files/URLs, in that
/// order, under the total input budget.
///
/// `stdin` is whatever the caller already read from its pipe; an empty or
/// absent pipe contributes no block. References are fetched one at a time
/// and the first failure aborts the scan. A gather that produces nothing at
/// all yields a single [`DEFAULT_PROMPT`] block rather than an empty
/// sequence.
pub async fn gather(
    stdin: Option<String>,
    references: &[String],
    fetcher: &dyn Fetcher,
) -> Result<Vec<String>, QueryError> {
    let mut budget = ByteBudget::new(MAX_INPUT_TOTAL_BYTES);
    let mut blocks = Vec::new();

    if let Some(text) = stdin {
        if !text.is_empty() {
            budget.charge(text.len(), SourceKind::Stdin, None)?;
            blocks.push(text);
        }
    }

    for reference in references {
        if is_web_url(reference) {
            let mut block = fetcher
                .fetch_url(reference, budget.remaining())
                .await
                .map_err(|e| url_error(reference, e))?;
            // Blank line after page content keeps adjacent sources apart.
            block.push_str("\n\n");
            budget.charge(block.len(), SourceKind::Urls, Some(reference))?;
            blocks.push(block);
        } else {
            let block = fetcher
                .read_file(Path::new(reference), budget.remaining())
                .await
                .map_err(|e| file_error(reference, e))?;
            budget.charge(block.len(), SourceKind::Files, Some(reference))?;
            blocks.push(block);
        }
    }

    if blocks.is_empty() {
        blocks.push(DEFAULT_PROMPT.to_string());
    }
    Ok(blocks)
}

fn url_error(url: &str, err: FetchError) -> QueryError {
    match err {
        FetchError::TooLarge => QueryError::InputTooLarge {
            category: SourceKind::Urls,
            reference: Some(url.to_string()),
            limit: MAX_INPUT_TOTAL_BYTES,
        },
        other => QueryError::Fetch {
            url: url.to_string(),
            source: other,
        },
    }
}

fn file_error(path: &str, err: FetchError) -> QueryError {
    match err {
        FetchError::TooLarge => QueryError::InputTooLarge {
            category: SourceKind::Files,
            reference: Some(path.to_string()),
            limit: MAX_INPUT_TOTAL_BYTES,
        },
        other => QueryError::File {
            path: path.to_string(),
            source: other,
        },
    }
}
