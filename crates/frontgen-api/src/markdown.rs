//! Markdown API reference builder.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::descriptor::ApiDescriptor;
use crate::priority::PriorityTable;

/// Configuration for building the API reference.
#[derive(Debug, Clone)]
pub struct DocConfig {
    /// Output directory, created if missing
    pub output_dir: PathBuf,

    /// File name inside the output directory
    pub file_name: String,

    /// Document title (level-one heading)
    pub title: String,

    /// Section ordering
    pub priority: PriorityTable,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            file_name: "api.auto.md".to_string(),
            title: "API Reference (auto-generated)".to_string(),
            priority: PriorityTable::default(),
        }
    }
}

impl DocConfig {
    /// Full path of the generated document.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

/// Result of a build.
#[derive(Debug)]
pub struct DocResult {
    /// Number of endpoint sections written
    pub endpoints: usize,

    /// Number of top-level groups
    pub groups: usize,

    /// Written file
    pub output_path: PathBuf,
}

/// Errors that can occur while building the reference.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("Failed to serialize example for {url}: {message}")]
    Serialize { url: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Builds the Markdown reference from a descriptor set.
pub struct DocBuilder {
    config: DocConfig,
}

impl DocBuilder {
    /// Create a new builder.
    pub fn new(config: DocConfig) -> Self {
        Self { config }
    }

    /// Render and write the document, replacing any previous file.
    pub fn build(&self, apis: &[ApiDescriptor]) -> Result<DocResult, DocError> {
        let (markdown, groups) = self.render_with_groups(apis)?;

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| DocError::WriteError(e.to_string()))?;

        let output_path = self.config.output_path();
        fs::write(&output_path, markdown).map_err(|e| {
            DocError::WriteError(format!("{}: {}", output_path.display(), e))
        })?;

        Ok(DocResult {
            endpoints: apis.len(),
            groups,
            output_path,
        })
    }

    /// Render the document without touching the filesystem.
    pub fn render(&self, apis: &[ApiDescriptor]) -> Result<String, DocError> {
        self.render_with_groups(apis).map(|(markdown, _)| markdown)
    }

    fn render_with_groups(&self, apis: &[ApiDescriptor]) -> Result<(String, usize), DocError> {
        let mut sorted = apis.to_vec();
        self.config.priority.sort(&mut sorted);

        let mut lines = vec![format!("# {}", self.config.title)];

        let mut last_group: Option<&str> = None;
        let mut group_id = 0;
        let mut api_id = 0;

        for api in &sorted {
            let group = top_level_segment(&api.url);
            if last_group != Some(group) {
                group_id += 1;
                api_id = 0;
                last_group = Some(group);
                lines.push(format!("## {}. {}  ", group_id, group));
            }
            api_id += 1;
            render_endpoint(api, &format!("{}.{}", group_id, api_id), &mut lines)?;
        }

        Ok((lines.join("\n"), group_id))
    }
}

/// The path component between the first two slashes (`/player/info` -> `player`).
pub fn top_level_segment(url: &str) -> &str {
    url.split('/').nth(1).unwrap_or("")
}

fn render_endpoint(
    api: &ApiDescriptor,
    index: &str,
    lines: &mut Vec<String>,
) -> Result<(), DocError> {
    lines.push(format!("### {} {}", index, api.description));
    lines.push(format!("- Endpoint: `{}`", api.url));
    lines.push(format!("- Method: `{}`", api.method.join(" ")));

    if !api.params.is_empty() {
        lines.push("- Params:".to_string());
        for (param, desc) in &api.params {
            lines.push(format!("  - `{}`: {}", param, param_text(desc)));
        }
    }

    lines.push("- Returns:  ".to_string());
    lines.push(String::new());
    lines.push("**Success**:".to_string());
    push_json_block(&api.url, &api.response, lines)?;
    lines.push("**Failure**:".to_string());
    push_json_block(&api.url, &api.fail, lines)?;
    lines.push(String::new());

    Ok(())
}

fn push_json_block(url: &str, value: &Value, lines: &mut Vec<String>) -> Result<(), DocError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| DocError::Serialize {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    lines.push("```json".to_string());
    lines.extend(json.lines().map(str::to_string));
    lines.push("```".to_string());

    Ok(())
}

fn param_text(desc: &Value) -> String {
    match desc {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Event, HeadingLevel, Parser, Tag};
    use serde_json::json;
    use tempfile::tempdir;

    fn api(url: &str, description: &str) -> ApiDescriptor {
        ApiDescriptor {
            url: url.to_string(),
            description: description.to_string(),
            method: vec!["GET".to_string()],
            params: Default::default(),
            response: json!({}),
            fail: json!({}),
        }
    }

    fn count_headings(markdown: &str, wanted: HeadingLevel) -> usize {
        Parser::new(markdown)
            .filter(|event| {
                matches!(event, Event::Start(Tag::Heading { level, .. }) if *level == wanted)
            })
            .count()
    }

    #[test]
    fn extracts_top_level_segment() {
        assert_eq!(top_level_segment("/player/info"), "player");
        assert_eq!(top_level_segment("/admin"), "admin");
        assert_eq!(top_level_segment("no-slash"), "");
    }

    #[test]
    fn renders_full_document() {
        let mut player = api("/player/info", "Player info");
        player.params.insert("id".to_string(), json!("player id"));
        player.response = json!({"code": 0});
        player.fail = json!({"code": 1, "msg": "不存在"});

        let mut admin = api("/admin/list", "List admins");
        admin.method = vec!["GET".to_string(), "POST".to_string()];
        admin.response = json!([]);
        admin.fail = Value::Null;

        let markdown = DocBuilder::new(DocConfig::default())
            .render(&[admin, player])
            .unwrap();

        let expected = [
            "# API Reference (auto-generated)",
            "## 1. player  ",
            "### 1.1 Player info",
            "- Endpoint: `/player/info`",
            "- Method: `GET`",
            "- Params:",
            "  - `id`: player id",
            "- Returns:  ",
            "",
            "**Success**:",
            "```json",
            "{",
            "  \"code\": 0",
            "}",
            "```",
            "**Failure**:",
            "```json",
            "{",
            "  \"code\": 1,",
            "  \"msg\": \"不存在\"",
            "}",
            "```",
            "",
            "## 2. admin  ",
            "### 2.1 List admins",
            "- Endpoint: `/admin/list`",
            "- Method: `GET POST`",
            "- Returns:  ",
            "",
            "**Success**:",
            "```json",
            "[]",
            "```",
            "**Failure**:",
            "```json",
            "null",
            "```",
            "",
        ]
        .join("\n");

        assert_eq!(markdown, expected);
    }

    #[test]
    fn one_heading_per_endpoint_and_group() {
        let apis = vec![
            api("/sport/a", "a"),
            api("/player/b", "b"),
            api("/sport/c", "c"),
            api("/custom/d", "d"),
            api("/player/e", "e"),
        ];

        let markdown = DocBuilder::new(DocConfig::default()).render(&apis).unwrap();

        assert_eq!(count_headings(&markdown, HeadingLevel::H3), 5);
        assert_eq!(count_headings(&markdown, HeadingLevel::H2), 3);
        assert!(markdown.contains("## 1. player"));
        assert!(markdown.contains("### 1.2 e"));
        assert!(markdown.contains("## 2. sport"));
        assert!(markdown.contains("## 3. custom"));
        assert!(markdown.contains("### 3.1 d"));
    }

    #[test]
    fn omits_params_section_when_empty() {
        let markdown = DocBuilder::new(DocConfig::default())
            .render(&[api("/files/upload", "Upload")])
            .unwrap();

        assert!(!markdown.contains("- Params:"));
    }

    #[test]
    fn build_creates_output_dir_and_overwrites() {
        let temp = tempdir().unwrap();
        let config = DocConfig {
            output_dir: temp.path().join("dist"),
            ..Default::default()
        };
        let builder = DocBuilder::new(config.clone());

        fs::create_dir_all(&config.output_dir).unwrap();
        fs::write(config.output_path(), "stale content that is longer than before").unwrap();

        let apis = vec![api("/player/a", "a"), api("/admin/b", "b")];
        let result = builder.build(&apis).unwrap();
        let first = fs::read_to_string(&result.output_path).unwrap();
        builder.build(&apis).unwrap();
        let second = fs::read_to_string(&result.output_path).unwrap();

        assert_eq!(result.endpoints, 2);
        assert_eq!(result.groups, 2);
        assert!(!first.contains("stale"));
        assert_eq!(first, second);
    }
}
