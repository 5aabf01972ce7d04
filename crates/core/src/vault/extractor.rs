//! Attachment and remote-link extraction from raw note text.

use std::sync::LazyLock;

use regex::Regex;

// `![alt](target)`; non-greedy, single line.
pub(crate) static MARKDOWN_EMBED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\((.*?)\)").unwrap());

// `![[target]]`
pub(crate) static WIKI_EMBED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[(.*?)\]\]").unwrap());

/// Return every attachment target referenced by `text`.
///
/// All markdown embeds come first (document order), then all wiki embeds
/// (document order). Duplicates are kept.
pub fn extract_attachment_names(text: &str) -> Vec<String> {
    let markdown = MARKDOWN_EMBED_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()));
    let wiki = WIKI_EMBED_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()));

    markdown.chain(wiki).collect()
}

/// Patterns for links into one remote-storage domain.
#[derive(Debug, Clone)]
pub struct RemoteLinkPattern {
    domain: String,
    prefix: Regex,
    link: Regex,
}

impl RemoteLinkPattern {
    pub fn new(domain: &str) -> Result<Self, regex::Error> {
        let escaped = regex::escape(domain);
        Ok(Self {
            domain: domain.to_string(),
            prefix: Regex::new(&format!(r"https?://{escaped}/"))?,
            link: Regex::new(&format!(r#"https?://{escaped}/[^\s<>"']+"#))?,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// True if `text` contains at least one link into the domain.
    pub fn is_present(&self, text: &str) -> bool {
        self.prefix.is_match(text)
    }

    /// Every link occurrence in order, duplicates included.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.link.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}

/// Shorthand for [`RemoteLinkPattern::extract`].
pub fn extract_remote_links(text: &str, pattern: &RemoteLinkPattern) -> Vec<String> {
    pattern.extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> RemoteLinkPattern {
        RemoteLinkPattern::new("disk.example.ru").unwrap()
    }

    #[test]
    fn extracts_both_attachment_syntaxes() {
        let names = extract_attachment_names("![a](image.jpg)\n![[document.pdf]]");
        assert_eq!(names, vec!["image.jpg", "document.pdf"]);
    }

    #[test]
    fn markdown_targets_precede_wiki_targets() {
        let text = "![[first.pdf]]\nsome text\n![pic](second.png)\n![[third.zip]]";
        let names = extract_attachment_names(text);
        assert_eq!(names, vec!["second.png", "first.pdf", "third.zip"]);
    }

    #[test]
    fn keeps_duplicates() {
        let names = extract_attachment_names("![x](a.png) ![y](a.png) ![[b.pdf]] ![[b.pdf]]");
        assert_eq!(names, vec!["a.png", "a.png", "b.pdf", "b.pdf"]);
    }

    #[test]
    fn plain_links_are_not_attachments() {
        assert!(extract_attachment_names("[label](doc.md) and [[other note]]").is_empty());
    }

    #[test]
    fn extracts_three_remote_links() {
        let text = "
        link 1: https://disk.example.ru/d/abc123
        link 2: https://disk.example.ru/client/disk/folder1
        plain text
        link 3: https://disk.example.ru/folder2
        ";
        let links = extract_remote_links(text, &pattern());
        assert_eq!(
            links,
            vec![
                "https://disk.example.ru/d/abc123",
                "https://disk.example.ru/client/disk/folder1",
                "https://disk.example.ru/folder2",
            ]
        );
    }

    #[test]
    fn remote_links_stop_at_delimiters() {
        let text = r#"<a href="https://disk.example.ru/d/q1">x</a> 'https://disk.example.ru/d/q2'"#;
        assert_eq!(
            pattern().extract(text),
            vec!["https://disk.example.ru/d/q1", "https://disk.example.ru/d/q2"]
        );
    }

    #[test]
    fn remote_links_keep_duplicates_and_http() {
        let text = "http://disk.example.ru/d/a https://disk.example.ru/d/a";
        assert_eq!(pattern().extract(text).len(), 2);
    }

    #[test]
    fn domain_is_matched_literally() {
        let p = pattern();
        assert!(!p.is_present("https://diskXexampleXru/d/abc"));
        assert!(!p.is_present("https://disk.example.ru"));
        assert!(p.is_present("see https://disk.example.ru/"));
        assert_eq!(p.domain(), "disk.example.ru");
    }
}
