//! Prompt templates sent to the language model.

use crate::comic::Tile;
use crate::segmenter::TARGET_TILE_COUNT;

/// Ask the model to break a story into a numbered list of scenes.
pub fn tiles_prompt(story: &str) -> String {
    format!(
        "Convert the following story into a series of {TARGET_TILE_COUNT} comic book tiles. \
Each tile should represent a key scene or moment in the story. \
Provide a brief description for each tile.\n\n\
Story:\n{story}\n\n\
Format the output as a numbered list of scenes, like this:\n\
1. [Scene description]\n\
2. [Scene description]\n\
...\n\
{TARGET_TILE_COUNT}. [Scene description]\n"
    )
}

/// Ask the model which well-known film the story most resembles.
pub fn inspiration_prompt(story: &str) -> String {
    format!(
        "Based on the following comic book story, identify a recent (within the last 10 years) \
or highly popular movie that it most likely drew inspiration from. The movie should be \
well-known and widely recognized. Provide the movie title, its release year, and a brief \
explanation of the similarities.\n\n\
Story:\n{story}\n\n\
Focus on finding connections to movies that are:\n\
1. Released within the last 10 years\n\
2. Blockbusters or critically acclaimed films\n\
3. Well-known franchises or from famous directors\n\
4. Award-winning movies (Oscars, Golden Globes, etc.)\n\n\
If no recent movie fits well, you may choose an older classic that is universally recognized.\n\n\
Format your response as:\n\
Movie Title: [Title] ([Release Year])\n\
Explanation: [Brief explanation of similarities and why this movie is recent/popular]\n"
    )
}

/// Ask the model for a story that connects the given scenes in order.
pub fn story_from_tiles_prompt(tiles: &[Tile]) -> String {
    let scenes = tiles
        .iter()
        .map(|t| t.scene.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "Create a coherent story based on the following comic book tiles. \
Each tile represents a key scene or moment in the story.\n\n\
Tiles:\n{scenes}\n\n\
Create a detailed story that incorporates all these scenes in the given order. \
The story should flow naturally and provide context and connections between the scenes.\n"
    )
}
