//! Story → tile segmentation.
//!
//! The primary path parses the language model's numbered list. Model output
//! is untrusted text: the parser is strict (`<integer>. <text>` per line) and
//! anything short of [`TARGET_TILE_COUNT`] matches discards the parse in
//! favour of the deterministic sentence chunker.

use std::sync::LazyLock;

use regex::Regex;

use crate::comic::Tile;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of tiles the segmenter aims for.
pub const TARGET_TILE_COUNT: usize = 10;

/// Hard ceiling on tiles passed to rendering.
pub const MAX_TILE_COUNT: usize = 15;

/// Sentence used to pad short stories up to [`TARGET_TILE_COUNT`].
pub const FILLER_SENTENCE: &str = "The story continues...";

/// Compiled pattern for one numbered list line, anchored at the start.
static NUMBERED_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s*(.*)").expect("valid regex"));

/// Sentence terminator followed by the whitespace run that ends the sentence.
static SENTENCE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which path produced a [`Segmentation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSource {
    /// The model's numbered list had at least [`TARGET_TILE_COUNT`] entries.
    ModelList,
    /// The model output was rejected and the story was chunked by sentence.
    SentenceFallback,
}

/// Tiles produced from a story, tagged with the path that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub tiles: Vec<Tile>,
    pub source: SegmentSource,
}

// ---------------------------------------------------------------------------
// Primary path
// ---------------------------------------------------------------------------

/// Extract scenes from a numbered list, in order, ignoring non-matching lines.
///
/// Each line is trimmed before matching; the scene is everything after the
/// period and any whitespace that follows it.
pub fn parse_numbered_tiles(model_output: &str) -> Vec<Tile> {
    model_output
        .split('\n')
        .filter_map(|line| {
            NUMBERED_LINE_RE
                .captures(line.trim())
                .and_then(|caps| caps.get(2))
                .map(|scene| Tile::from_scene(scene.as_str()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fallback path
// ---------------------------------------------------------------------------

/// Split a story at `.`, `!` or `?` followed by whitespace.
///
/// Terminators stay attached to their sentence. Fragments are trimmed and
/// empty ones dropped, so a blank story has no sentences.
pub fn split_sentences(story: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK_RE.find_iter(story) {
        // The terminator is a single ASCII byte at the start of the match.
        sentences.push(&story[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&story[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Chunk a story into exactly [`TARGET_TILE_COUNT`] tiles without the model.
///
/// Short stories are padded with [`FILLER_SENTENCE`]. The chunk size is
/// `max(1, sentence_count / TARGET_TILE_COUNT)` and chunks are taken from the
/// front, so when the count does not divide evenly the trailing sentences are
/// dropped rather than redistributed.
// NOTE: the dropped-remainder behaviour is kept for compatibility with
// existing comics; it has never been confirmed as intended.
pub fn chunk_story(story: &str) -> Vec<Tile> {
    let mut sentences = split_sentences(story);
    while sentences.len() < TARGET_TILE_COUNT {
        sentences.push(FILLER_SENTENCE.to_string());
    }

    let step = (sentences.len() / TARGET_TILE_COUNT).max(1);

    sentences
        .chunks(step)
        .take(TARGET_TILE_COUNT)
        .map(|chunk| Tile::from_scene(chunk.join(" ")))
        .collect()
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Segment a story given the model's numbered-list response.
///
/// A parse with fewer than [`TARGET_TILE_COUNT`] tiles is discarded entirely
/// and replaced by [`chunk_story`]. A parse with more is accepted unchanged;
/// the ceiling is applied later by [`clamp_tiles`].
pub fn segment(model_output: &str, story: &str) -> Segmentation {
    let parsed = parse_numbered_tiles(model_output);
    if parsed.len() >= TARGET_TILE_COUNT {
        return Segmentation {
            tiles: parsed,
            source: SegmentSource::ModelList,
        };
    }

    Segmentation {
        tiles: chunk_story(story),
        source: SegmentSource::SentenceFallback,
    }
}

/// Truncate to at most `max` tiles, preserving order.
pub fn clamp_tiles(mut tiles: Vec<Tile>, max: usize) -> Vec<Tile> {
    tiles.truncate(max);
    tiles
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
