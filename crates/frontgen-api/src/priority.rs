//! Section ordering for the generated reference.

use crate::descriptor::ApiDescriptor;

/// Curated URL-prefix ordering.
///
/// Each prefix gets a 1-based rank from its position in the table. URLs that match no
/// prefix rank after all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityTable {
    prefixes: Vec<String>,
}

impl PriorityTable {
    /// Create a table from prefixes in priority order.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Configured prefixes, highest priority first.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Rank of a URL. Lower sorts first.
    pub fn rank(&self, url: &str) -> usize {
        self.prefixes
            .iter()
            .position(|prefix| matches_prefix(url, prefix))
            .map(|i| i + 1)
            .unwrap_or(self.prefixes.len() + 1)
    }

    /// Stable sort by `(rank, url)`.
    pub fn sort(&self, apis: &mut [ApiDescriptor]) {
        apis.sort_by(|a, b| {
            self.rank(&a.url)
                .cmp(&self.rank(&b.url))
                .then_with(|| a.url.cmp(&b.url))
        });
    }
}

impl Default for PriorityTable {
    fn default() -> Self {
        Self::new([
            "/activity",
            "/leader",
            "/player",
            "/admin",
            "/sport",
            "/files",
        ])
    }
}

/// `/player` matches `/player` and `/player/info`, not `/players`.
fn matches_prefix(url: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match url.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(url: &str, description: &str) -> ApiDescriptor {
        ApiDescriptor {
            url: url.to_string(),
            description: description.to_string(),
            method: vec![],
            params: Default::default(),
            response: Default::default(),
            fail: Default::default(),
        }
    }

    #[test]
    fn ranks_by_table_position() {
        let table = PriorityTable::default();

        assert_eq!(table.rank("/activity/list"), 1);
        assert_eq!(table.rank("/player/info"), 3);
        assert_eq!(table.rank("/admin"), 4);
        assert_eq!(table.rank("/unknown/thing"), 7);
    }

    #[test]
    fn prefix_must_end_at_segment_boundary() {
        let table = PriorityTable::new(["/player"]);

        assert_eq!(table.rank("/player/info"), 1);
        assert_eq!(table.rank("/players/info"), 2);
    }

    #[test]
    fn player_sorts_before_admin() {
        let mut apis = vec![api("/admin/list", "a"), api("/player/info", "p")];

        PriorityTable::default().sort(&mut apis);

        assert_eq!(apis[0].url, "/player/info");
        assert_eq!(apis[1].url, "/admin/list");
    }

    #[test]
    fn unmatched_urls_sort_last_alphabetically() {
        let mut apis = vec![
            api("/zeta/x", "z"),
            api("/files/upload", "f"),
            api("/beta/x", "b"),
        ];

        PriorityTable::default().sort(&mut apis);

        let urls: Vec<&str> = apis.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["/files/upload", "/beta/x", "/zeta/x"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut apis = vec![api("/sport/a", "first"), api("/sport/a", "second")];

        PriorityTable::default().sort(&mut apis);

        assert_eq!(apis[0].description, "first");
        assert_eq!(apis[1].description, "second");
    }
}
