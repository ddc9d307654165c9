//! Layout declarations in template front-matter.
//!
//! A template may open with a YAML preamble naming its layout:
//!
//! ```text
//! ---
//! layout: blog
//! title: Release notes
//! ---
//! <h1>...</h1>
//! ```
//!
//! Parsing goes through `gray_matter`. Anything short of a well-formed block
//! with a string `layout` key means "no layout declared".

use gray_matter::{Matter, engine::YAML};
use tracing::debug;

use crate::constants::LAYOUT_KEY;

const DELIMITER: &str = "---";

/// Whether `content` opens with a closed `---` block.
#[must_use]
pub fn has_frontmatter(content: &str) -> bool {
    if !content.starts_with(DELIMITER) {
        return false;
    }
    content.lines().skip(1).any(|line| line.trim_end() == DELIMITER)
}

/// The layout named in the front-matter of `content`, if any.
///
/// Returns `None` for a missing block, an unparsable block, a block that is
/// not a mapping, or a `layout` value that is not a string.
#[must_use]
pub fn declared_layout(content: &str) -> Option<String> {
    if !has_frontmatter(content) {
        return None;
    }

    let matter = Matter::<YAML>::new();
    let parsed = match matter.parse::<serde_yaml::Value>(content) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Ignoring unparsable front-matter: {e}");
            return None;
        }
    };

    parsed.data?.get(LAYOUT_KEY)?.as_str().map(str::to_string)
}
