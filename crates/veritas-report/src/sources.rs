//! Grounding source list rendering.
//!
//! Each grounding chunk with a web payload becomes one entry carrying its
//! hostname and an icon URL from the favicon lookup endpoint. Chunks with no
//! web payload are skipped and do not count towards the displayed total.

use serde::Serialize;
use url::Url;

use veritas_contracts::response::GroundingChunk;

/// The icon lookup endpoint; the hostname is appended.
pub const DEFAULT_FAVICON_ENDPOINT: &str = "https://www.google.com/s2/favicons?sz=64&domain=";

/// Domain whose icon is used when a source URI has no parseable host.
const FALLBACK_ICON_DOMAIN: &str = "google.com";

/// One displayable grounding source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceEntry {
    pub uri: String,
    /// The URI's hostname, or the raw URI when it cannot be parsed.
    pub hostname: String,
    pub title: String,
    pub icon_url: String,
}

/// Icon URL for `host`.
pub fn favicon_url(endpoint: &str, host: &str) -> String {
    format!("{endpoint}{host}")
}

/// Hostname of `uri`, if it parses as an absolute URL with a host.
pub fn hostname_of(uri: &str) -> Option<String> {
    Url::parse(uri)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
}

/// Build entries for every chunk that carries a web payload, in order.
pub fn render_sources(chunks: &[GroundingChunk], favicon_endpoint: &str) -> Vec<SourceEntry> {
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| {
            let (hostname, icon_url) = match hostname_of(&web.uri) {
                Some(host) => {
                    let icon = favicon_url(favicon_endpoint, &host);
                    (host, icon)
                }
                None => (
                    web.uri.clone(),
                    favicon_url(favicon_endpoint, FALLBACK_ICON_DOMAIN),
                ),
            };
            SourceEntry {
                uri: web.uri.clone(),
                hostname,
                title: web.title.clone(),
                icon_url,
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use veritas_contracts::response::WebSource;

    use super::*;

    fn web(uri: &str, title: &str) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebSource {
                uri: uri.to_string(),
                title: title.to_string(),
            }),
        }
    }

    #[test]
    fn chunks_without_web_are_skipped_and_not_counted() {
        let chunks = vec![
            web("https://www.reuters.com/world/story", "Reuters story"),
            GroundingChunk { web: None },
            web("https://apnews.com/article/1", "AP article"),
        ];

        let entries = render_sources(&chunks, DEFAULT_FAVICON_ENDPOINT);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].hostname, "www.reuters.com");
        assert_eq!(entries[0].title, "Reuters story");
        assert_eq!(
            entries[0].icon_url,
            "https://www.google.com/s2/favicons?sz=64&domain=www.reuters.com"
        );
        assert_eq!(entries[1].hostname, "apnews.com");
    }

    #[test]
    fn only_empty_chunks_render_nothing() {
        let chunks = vec![GroundingChunk { web: None }, GroundingChunk::default()];
        assert!(render_sources(&chunks, DEFAULT_FAVICON_ENDPOINT).is_empty());
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        let chunks = vec![
            web("https://b.example/1", "B"),
            web("https://a.example/1", "A"),
            web("https://b.example/1", "B"),
        ];
        let hosts: Vec<String> = render_sources(&chunks, DEFAULT_FAVICON_ENDPOINT)
            .into_iter()
            .map(|e| e.hostname)
            .collect();
        assert_eq!(hosts, vec!["b.example", "a.example", "b.example"]);
    }

    #[test]
    fn unparseable_uri_falls_back() {
        let entries = render_sources(&[web("not a url", "Odd")], "https://icons.test/?d=");
        assert_eq!(entries[0].hostname, "not a url");
        assert_eq!(entries[0].icon_url, "https://icons.test/?d=google.com");
    }

    #[test]
    fn vertex_redirect_hosts_are_kept_verbatim() {
        assert_eq!(
            hostname_of("https://vertexaisearch.cloud.google.com/grounding-api-redirect/abc"),
            Some("vertexaisearch.cloud.google.com".to_string())
        );
        assert_eq!(hostname_of("mailto:someone@example.org"), None);
    }
}
