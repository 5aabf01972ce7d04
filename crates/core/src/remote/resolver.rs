//! Mapping remote-storage links to folder paths.

/// Derive the remote folder path a link points at.
///
/// The URL is percent-decoded, then the first marker found in this fixed
/// order is looked up: `<domain>/d/`, `<domain>/client/disk/`, `<domain>/`.
/// The path is the text between its first and second occurrence (or the
/// end of the URL), cut at the first `?`.
///
/// Returns `None` (and logs) when decoding fails, no marker is present or
/// the remaining path is empty.
pub fn resolve_remote_path(url: &str, domain: &str) -> Option<String> {
    let decoded = match urlencoding::decode(url) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!("Failed to decode URL {}: {}", url, e);
            return None;
        }
    };
    tracing::debug!("Decoded URL: {}", decoded);

    let markers =
        [format!("{domain}/d/"), format!("{domain}/client/disk/"), format!("{domain}/")];

    let Some(rest) = markers
        .iter()
        .find_map(|marker| decoded.split(marker.as_str()).nth(1))
    else {
        tracing::warn!("URL {} does not point into {}", url, domain);
        return None;
    };

    let path = rest.split_once('?').map_or(rest, |(path, _)| path);
    if path.is_empty() {
        tracing::warn!("URL {} has no folder path", url);
        return None;
    }

    tracing::debug!("Resolved folder path: {}", path);
    Some(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DOMAIN: &str = "disk.example.ru";

    #[rstest]
    #[case("https://disk.example.ru/d/abc123", "abc123")]
    #[case("https://disk.example.ru/client/disk/folder1", "folder1")]
    #[case("https://disk.example.ru/folder2", "folder2")]
    #[case("https://disk.example.ru/d/xyz789?param=value", "xyz789")]
    #[case("http://disk.example.ru/client/disk/a/b?x=1&y=2", "a/b")]
    #[case("https://disk.example.ru/client/disk/My%20Photos", "My Photos")]
    #[case("https://disk.example.ru/%D0%9F%D0%B0%D0%BF%D0%BA%D0%B0", "Папка")]
    fn resolves_known_shapes(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(resolve_remote_path(url, DOMAIN).as_deref(), Some(expected));
    }

    #[test]
    fn share_marker_wins_over_client_marker() {
        // Both markers present: the `/d/` form is checked first.
        let url = "https://disk.example.ru/client/disk/x?back=https://disk.example.ru/d/share1";
        assert_eq!(resolve_remote_path(url, DOMAIN).as_deref(), Some("share1"));
    }

    #[test]
    fn repeated_marker_ends_the_path() {
        let url = "https://disk.example.ru/d/a/disk.example.ru/d/b";
        assert_eq!(resolve_remote_path(url, DOMAIN).as_deref(), Some("a/"));
    }

    #[test]
    fn client_marker_wins_over_bare_domain() {
        let url = "https://disk.example.ru/client/disk/docs";
        assert_ne!(resolve_remote_path(url, DOMAIN).as_deref(), Some("client/disk/docs"));
    }

    #[rstest]
    #[case("https://other.example.com/d/abc")]
    #[case("https://disk.example.ru")]
    #[case("https://disk.example.ru/")]
    #[case("https://disk.example.ru/?only=query")]
    #[case("https://disk.example.ru/d/%FF%FE")]
    fn unresolvable_urls(#[case] url: &str) {
        assert_eq!(resolve_remote_path(url, DOMAIN), None);
    }
}
