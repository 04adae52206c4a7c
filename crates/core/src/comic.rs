//! Comic tiles and title derivation.

use serde::{Deserialize, Serialize};

/// Number of leading prompt words used for a derived title.
pub const TITLE_WORD_COUNT: usize = 3;

/// Suffix appended to every derived title.
pub const TITLE_SUFFIX: &str = "...";

/// One scene of a comic: a text description plus the rendered image reference.
///
/// `image` is `None` between segmentation and rendering. Generation always
/// fills it with a rendered URL or the placeholder; tiles sent back through an
/// update are stored exactly as given, so a stored tile may lack an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub scene: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Tile {
    /// A tile holding only its scene description.
    pub fn from_scene(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            image: None,
        }
    }

    /// Attach an image reference, replacing any previous one.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Derive a title from the first few words of a prompt.
///
/// The first character is upper-cased and the remainder lower-cased, then
/// [`TITLE_SUFFIX`] is appended. An empty prompt yields just the suffix.
pub fn derive_title(prompt: &str) -> String {
    let head = prompt
        .split_whitespace()
        .take(TITLE_WORD_COUNT)
        .collect::<Vec<_>>()
        .join(" ");

    let mut chars = head.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };

    format!("{capitalized}{TITLE_SUFFIX}")
}

/// Use the caller's title when it has content, otherwise derive one from the prompt.
pub fn resolve_title(title: Option<&str>, prompt: &str) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => derive_title(prompt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_title_takes_three_words() {
        assert_eq!(
            derive_title("a knight rides into the storm"),
            "A knight rides..."
        );
    }

    #[test]
    fn derive_title_lowercases_the_rest() {
        assert_eq!(derive_title("THE LAST ROBOT on earth"), "The last robot...");
    }

    #[test]
    fn derive_title_collapses_whitespace() {
        assert_eq!(derive_title("  space   pirates\n"), "Space pirates...");
    }

    #[test]
    fn derive_title_empty_prompt() {
        assert_eq!(derive_title(""), "...");
    }

    #[test]
    fn resolve_title_prefers_explicit() {
        assert_eq!(resolve_title(Some("My Comic"), "ignored prompt"), "My Comic");
    }

    #[test]
    fn resolve_title_falls_back_on_blank() {
        assert_eq!(resolve_title(Some("   "), "dragons at dawn"), "Dragons at dawn...");
        assert_eq!(resolve_title(None, "dragons at dawn"), "Dragons at dawn...");
    }

    #[test]
    fn tile_without_image_omits_field() {
        let json = serde_json::to_value(Tile::from_scene("A hero appears")).unwrap();
        assert_eq!(json, serde_json::json!({ "scene": "A hero appears" }));
    }

    #[test]
    fn tile_with_image_round_trips() {
        let tile = Tile::from_scene("A villain attacks").with_image("http://x/1.png");
        let json = serde_json::to_string(&tile).unwrap();
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tile);
    }
}
