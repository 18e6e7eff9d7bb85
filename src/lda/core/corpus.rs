//! Corpus containers and providers for LDA.
//!
//! Purpose
//! -------
//! Normalize whatever the outside world hands us into a fixed integer
//! encoding: an immutable, ordered sequence of documents, each an ordered
//! sequence of word indices in `[0, V)`. Validation happens once, here, so
//! the sampler can index count tables without rechecking bounds.
//!
//! Key behaviors
//! -------------
//! - [`Corpus::new`] validates in-memory documents against a vocabulary size.
//! - [`CorpusProvider`] is the seam for loaders; [`LineCorpusProvider`] reads
//!   one document per line of whitespace-separated indices.
//!
//! Invariants & assumptions
//! ------------------------
//! - `vocab_size >= 1`.
//! - Every index is `< vocab_size`.
//! - Documents may be empty; the corpus itself may be empty here (the
//!   inference loop rejects an empty corpus as a configuration error).
//!
//! Conventions
//! -----------
//! - Line numbers in [`LoadError`] are 1-based, document and position
//!   indices 0-based.
//! - Lines starting with `#` are comments and do not produce documents.
use crate::lda::errors::{LoadError, LoadResult};
use std::path::Path;

/// Validated, immutable corpus of integer-encoded documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Vec<usize>>,
    vocab_size: usize,
    num_tokens: usize,
}

impl Corpus {
    /// Build a corpus, checking every index against `vocab_size`.
    ///
    /// Errors
    /// ------
    /// - `LoadError::EmptyVocabulary` when `vocab_size == 0`.
    /// - `LoadError::IndexOutOfRange` for the first index `>= vocab_size`.
    pub fn new(documents: Vec<Vec<usize>>, vocab_size: usize) -> LoadResult<Corpus> {
        if vocab_size == 0 {
            return Err(LoadError::EmptyVocabulary);
        }
        for (doc, words) in documents.iter().enumerate() {
            for (pos, &index) in words.iter().enumerate() {
                if index >= vocab_size {
                    return Err(LoadError::IndexOutOfRange { doc, pos, index, vocab_size });
                }
            }
        }
        let num_tokens = documents.iter().map(Vec::len).sum();
        Ok(Corpus { documents, vocab_size, num_tokens })
    }

    /// Build a corpus whose vocabulary size is `max index + 1`.
    ///
    /// Errors with `LoadError::EmptyVocabulary` if there are no tokens at all.
    pub fn with_inferred_vocab(documents: Vec<Vec<usize>>) -> LoadResult<Corpus> {
        let vocab_size = documents
            .iter()
            .flatten()
            .copied()
            .max()
            .map(|m| m + 1)
            .ok_or(LoadError::EmptyVocabulary)?;
        Corpus::new(documents, vocab_size)
    }

    pub fn documents(&self) -> &[Vec<usize>] {
        &self.documents
    }

    pub fn document(&self, doc: usize) -> &[usize] {
        &self.documents[doc]
    }

    pub fn num_documents(&self) -> usize {
        self.documents.len()
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Total number of token instances across all documents.
    pub fn num_tokens(&self) -> usize {
        self.num_tokens
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn doc_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.documents.iter().map(Vec::len)
    }
}

/// Source of corpora addressed by an opaque identifier (path, key, ...).
pub trait CorpusProvider {
    fn load(&self, identifier: &str) -> LoadResult<Corpus>;
}

/// Reads plain-text corpora: one document per line, whitespace-separated
/// non-negative word indices. Empty lines are empty documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCorpusProvider {
    /// Fixed vocabulary size; inferred as `max index + 1` when `None`.
    pub vocab_size: Option<usize>,
}

impl LineCorpusProvider {
    pub fn new(vocab_size: Option<usize>) -> LineCorpusProvider {
        LineCorpusProvider { vocab_size }
    }

    /// Parse corpus text without touching the filesystem.
    pub fn parse(&self, text: &str) -> LoadResult<Corpus> {
        let mut documents = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                continue;
            }
            let words = trimmed
                .split_whitespace()
                .map(|token| parse_index(token, line_no))
                .collect::<LoadResult<Vec<usize>>>()?;
            documents.push(words);
        }
        match self.vocab_size {
            Some(v) => Corpus::new(documents, v),
            None => Corpus::with_inferred_vocab(documents),
        }
    }
}

impl CorpusProvider for LineCorpusProvider {
    fn load(&self, identifier: &str) -> LoadResult<Corpus> {
        let path = Path::new(identifier);
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound { path: identifier.to_string() },
            _ => LoadError::Io { path: identifier.to_string(), reason: e.to_string() },
        })?;
        self.parse(&text)
    }
}

fn parse_index(token: &str, line: usize) -> LoadResult<usize> {
    let value: i64 = token
        .parse()
        .map_err(|_| LoadError::MalformedToken { line, token: token.to_string() })?;
    if value < 0 {
        return Err(LoadError::NegativeIndex { line, value });
    }
    usize::try_from(value).map_err(|_| LoadError::MalformedToken { line, token: token.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Corpus::new` bounds checks and token accounting.
    // - Text parsing (comments, empty documents, malformed and negative
    //   tokens, inferred vs fixed vocabulary).
    // - File loading through the `CorpusProvider` seam.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify construction of the reference three-document corpus.
    //
    // Given
    // -----
    // - doc0=[0,1,0,2], doc1=[3,4,3], doc2=[1,1,2,4,0], V = 5.
    //
    // Expect
    // ------
    // - 3 documents, 12 tokens, lengths [4, 3, 5].
    fn corpus_new_accepts_in_range_documents() {
        // Arrange
        let docs = vec![vec![0, 1, 0, 2], vec![3, 4, 3], vec![1, 1, 2, 4, 0]];

        // Act
        let corpus = Corpus::new(docs, 5).expect("indices are in range");

        // Assert
        assert_eq!(corpus.num_documents(), 3);
        assert_eq!(corpus.num_tokens(), 12);
        assert_eq!(corpus.doc_lengths().collect::<Vec<_>>(), vec![4, 3, 5]);
        assert_eq!(corpus.document(1), &[3, 4, 3]);
    }

    #[test]
    // Purpose
    // -------
    // Out-of-range indices and a zero vocabulary are rejected.
    fn corpus_new_rejects_out_of_range_and_empty_vocab() {
        let err = Corpus::new(vec![vec![0, 1], vec![5]], 5).unwrap_err();
        assert_eq!(err, LoadError::IndexOutOfRange { doc: 1, pos: 0, index: 5, vocab_size: 5 });

        assert_eq!(Corpus::new(vec![], 0).unwrap_err(), LoadError::EmptyVocabulary);
        assert_eq!(
            Corpus::with_inferred_vocab(vec![vec![], vec![]]).unwrap_err(),
            LoadError::EmptyVocabulary
        );
    }

    #[test]
    // Purpose
    // -------
    // Parsing keeps empty lines as empty documents, skips comments, and
    // infers V from the largest index.
    fn parse_handles_comments_and_empty_documents() {
        let provider = LineCorpusProvider::default();

        let corpus = provider.parse("# header\n0 1 0 2\n\n3 4 3\n").expect("valid text");

        assert_eq!(corpus.num_documents(), 3);
        assert_eq!(corpus.document(1), &[] as &[usize]);
        assert_eq!(corpus.vocab_size(), 5);
    }

    #[test]
    // Purpose
    // -------
    // Malformed, negative, and out-of-range tokens map to their LoadError.
    fn parse_reports_bad_tokens() {
        let provider = LineCorpusProvider::new(Some(4));

        assert_eq!(
            provider.parse("0 1\n2 x\n").unwrap_err(),
            LoadError::MalformedToken { line: 2, token: "x".to_string() }
        );
        assert_eq!(
            provider.parse("0 -3\n").unwrap_err(),
            LoadError::NegativeIndex { line: 1, value: -3 }
        );
        assert!(matches!(
            provider.parse("0 1\n4\n").unwrap_err(),
            LoadError::IndexOutOfRange { doc: 1, index: 4, vocab_size: 4, .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Loading from disk works and missing files report NotFound.
    fn load_reads_files_and_reports_missing() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "0 1 0 2\n3 4 3\n1 1 2 4 0").expect("write corpus");
        let provider = LineCorpusProvider::default();

        // Act
        let corpus = provider.load(file.path().to_str().expect("utf-8 path")).expect("load");
        let missing = provider.load("/definitely/not/here.txt").unwrap_err();

        // Assert
        assert_eq!(corpus.num_tokens(), 12);
        assert!(matches!(missing, LoadError::NotFound { .. }));
    }
}
