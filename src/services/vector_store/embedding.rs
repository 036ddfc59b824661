//! TF-IDF Embeddings
//!
//! Local text vectorization for similarity queries. A vocabulary is built
//! from a collection's documents at query time, so vectors never go stale
//! as records are added.

use std::collections::{HashMap, HashSet};

/// Maximum number of distinct tokens tracked by a vocabulary.
const MAX_VOCAB_SIZE: usize = 8192;

/// Tokens shorter than this are dropped.
const MIN_TOKEN_LEN: usize = 2;

/// Vocabulary learned from a corpus of documents.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    token_to_idx: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl Vocabulary {
    /// Build a vocabulary from `corpus`, one entry per document.
    pub fn build<S: AsRef<str>>(corpus: &[S]) -> Self {
        let num_docs = corpus.len().max(1);

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in corpus {
            let unique: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        // Most common tokens first so truncation keeps the shared vocabulary
        let mut entries: Vec<(String, usize)> = doc_freq.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(MAX_VOCAB_SIZE);

        let mut token_to_idx = HashMap::with_capacity(entries.len());
        let mut idf = Vec::with_capacity(entries.len());
        for (idx, (token, freq)) in entries.into_iter().enumerate() {
            token_to_idx.insert(token, idx);
            // log(N / df) + 1 keeps tokens present in every document non-zero
            idf.push((num_docs as f32 / freq as f32).ln() + 1.0);
        }

        Self { token_to_idx, idf }
    }

    /// Number of dimensions in produced vectors.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Embed `text` as an L2-normalised TF-IDF vector.
    ///
    /// Text sharing no tokens with the vocabulary yields a zero vector.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let dim = self.dimension();
        if dim == 0 {
            return Vec::new();
        }

        let tokens = tokenize(text);
        let total = tokens.len().max(1) as f32;

        let mut vector = vec![0.0f32; dim];
        for token in &tokens {
            if let Some(&idx) = self.token_to_idx.get(token.as_str()) {
                vector[idx] += 1.0 / total;
            }
        }
        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let magnitude = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }
        vector
    }
}

/// Lowercase `text` and split it on anything that is not alphanumeric.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Cosine similarity of two vectors.
///
/// Returns 0.0 when the lengths differ or either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut mag_a = 0.0f32;
    let mut mag_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
