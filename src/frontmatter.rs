//! YAML frontmatter helpers shared by the config file and markdown sample files.

/// Split `---` delimited YAML frontmatter from the markdown body.
///
/// Returns `(None, content)` when the content has no frontmatter block.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim_start();

    if !content.starts_with("---") {
        return (None, content);
    }

    let after_first = &content[3..];
    match after_first.find("\n---") {
        Some(end) => {
            let frontmatter = after_first[..end].trim();
            let body = after_first[end + 4..].trim_start_matches('\n');
            (Some(frontmatter.to_string()), body)
        }
        None => (None, content),
    }
}

/// YAML payload of a document: the frontmatter when present, else the whole text.
pub fn yaml_payload(content: &str) -> String {
    match split_frontmatter(content) {
        (Some(frontmatter), _) => frontmatter,
        (None, body) => body.to_string(),
    }
}
