use std::path::{Path, PathBuf};

use glob::glob as glob_fs;
use log::warn;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::de::DeserializeOwned;

use super::{ContentEntry, highlight::CodeBlock, slugger::Slugger};
use crate::errors::ContentError;
use crate::permalink;

/// Represents a Markdown heading.
///
/// Can be used to generate a table of contents.
#[derive(Debug, Clone)]
pub struct MarkdownHeading {
    pub title: String,
    pub id: String,
    pub level: u8,
    pub classes: Vec<String>,
}

#[derive(Debug)]
struct InternalHeadingEvent {
    start: usize,
    end: usize,
    id: Option<String>,
    level: u32,
    classes: Vec<String>,
}

impl InternalHeadingEvent {
    fn new(start: usize, level: u32, id: Option<String>, classes: &[String]) -> Self {
        Self {
            start,
            end: 0,
            id,
            level,
            classes: classes.to_vec(),
        }
    }
}

#[doc(hidden)]
/// Used internally by Plume and should not be implemented by the user.
/// We expose it because [`plume_macros::markdown_entry`] implements it for the user behind the scenes.
pub trait MarkdownContent {
    fn get_headings(&self) -> &Vec<MarkdownHeading>;
}

#[doc(hidden)]
/// Used internally by Plume and should not be implemented by the user.
/// We expose it because [`plume_macros::markdown_entry`] implements it for the user behind the scenes.
pub trait InternalMarkdownContent {
    fn set_headings(&mut self, headings: Vec<MarkdownHeading>);
}

/// Options for [`glob_markdown`].
#[derive(Default)]
pub struct GlobOptions {
    /// The content root that permalinks are derived relative to. Defaults to
    /// the longest non-wildcard prefix of the glob pattern.
    pub base_dir: Option<PathBuf>,
}

/// Glob for Markdown files and return a vector of [`ContentEntry`]s.
///
/// Typically used by [`content_sources!`](crate::content_sources) to define a
/// Markdown content source in [`publish()`](crate::publish).
///
/// Each document must carry front-matter with at least a `title`; the entry's
/// permalink is derived from the title and the document's location under the
/// content root (see [`crate::permalink`]). A document with missing required
/// fields, unparsable front-matter, or a title that slugifies to nothing is
/// reported in the build log and skipped; the rest of the source still loads.
/// A content root that does not exist fails the whole pass.
///
/// ## Example
/// ```rs
/// use plume::{publish, content_sources, routes, BuildOptions, BuildOutput};
/// use plume::content::{markdown_entry, glob_markdown};
///
/// #[markdown_entry]
/// pub struct ArticleContent {
///   pub title: String,
///   pub description: String,
/// }
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///   publish(
///     routes![],
///     content_sources![
///       "articles" => glob_markdown::<ArticleContent>("content/articles/*.md", None)
///     ],
///     BuildOptions::default(),
///   )
/// }
/// ```
pub fn glob_markdown<T>(
    pattern: &str,
    options: Option<GlobOptions>,
) -> Result<Vec<ContentEntry<T>>, ContentError>
where
    T: DeserializeOwned + MarkdownContent + InternalMarkdownContent + Send + Sync + 'static,
{
    let options = options.unwrap_or_default();
    let base_dir = options.base_dir.unwrap_or_else(|| static_prefix(pattern));

    if !base_dir.is_dir() {
        return Err(ContentError::RootUnreachable { path: base_dir });
    }

    let mut entries = vec![];

    let paths = glob_fs(pattern).map_err(|source| ContentError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    for path in paths {
        let path = path.map_err(|err| {
            let path = err.path().to_path_buf();
            ContentError::ReadFailed {
                path,
                source: err.into_error(),
            }
        })?;

        if path.extension().is_none_or(|extension| extension != "md") {
            warn!(target: "content", "Ignoring {}, only Markdown files are supported", path.display());
            continue;
        }

        match read_entry::<T>(&path, &base_dir) {
            Ok(entry) => entries.push(entry),
            Err(err) if err.is_local() => {
                warn!(target: "content", "Skipping document: {}", err);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(entries)
}

/// The longest prefix of a glob pattern that contains no wildcard.
fn static_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();

    for component in Path::new(pattern).iter() {
        let Some(component) = component.to_str() else {
            break;
        };
        if component.contains(['*', '?', '[']) {
            break;
        }
        prefix.push(component);
    }

    // A wildcard-free pattern names a file, not a root
    if prefix == Path::new(pattern) {
        prefix.pop();
    }

    prefix
}

fn read_entry<T>(path: &Path, base_dir: &Path) -> Result<ContentEntry<T>, ContentError>
where
    T: DeserializeOwned + MarkdownContent + InternalMarkdownContent + Send + Sync + 'static,
{
    let raw_content = std::fs::read_to_string(path).map_err(|source| ContentError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut options = Options::empty();
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS | Options::ENABLE_HEADING_ATTRIBUTES);

    let mut frontmatter = String::new();
    let mut in_frontmatter = false;

    let mut content_events = Vec::new();
    for (event, _) in Parser::new_ext(&raw_content, options).into_offset_iter() {
        match event {
            Event::Start(Tag::MetadataBlock(_)) => in_frontmatter = true,
            Event::End(TagEnd::MetadataBlock(_)) => in_frontmatter = false,
            Event::Text(ref text) => {
                if in_frontmatter {
                    frontmatter.push_str(text);
                } else {
                    content_events.push(event);
                }
            }
            _ => content_events.push(event),
        }
    }

    // The title is required before anything else: without it there is no
    // permalink, and without a permalink the entry cannot be addressed
    let title = frontmatter_title(&frontmatter, path)?;

    let rel_path = path.strip_prefix(base_dir).unwrap_or(path);
    let permalink = permalink::derive_route(rel_path, &title)?;

    let mut data = parse_frontmatter::<T>(&frontmatter, path)?;

    let mut slugger = Slugger::new();
    let mut headings = vec![];
    for heading in find_headings(&content_events) {
        let heading_title = get_text_from_events(&content_events[heading.start..heading.end]);
        let slug = slugger.slugify(&heading_title);

        headings.push(MarkdownHeading {
            title: heading_title,
            id: heading.id.unwrap_or(slug),
            level: heading.level as u8,
            classes: heading.classes,
        });
    }
    data.set_headings(headings);

    Ok(ContentEntry::new(
        entry_id(rel_path),
        permalink,
        Some(Box::new(render_markdown)),
        Some(raw_content),
        data,
        Some(path.to_path_buf()),
    ))
}

fn entry_id(rel_path: &Path) -> String {
    rel_path
        .with_extension("")
        .iter()
        .filter_map(|segment| segment.to_str())
        .collect::<Vec<_>>()
        .join("/")
}

fn frontmatter_title(frontmatter: &str, path: &Path) -> Result<String, ContentError> {
    let value = serde_yaml::from_str::<serde_yaml::Value>(frontmatter).map_err(|source| {
        ContentError::Frontmatter {
            path: path.to_path_buf(),
            source,
        }
    })?;

    value
        .get("title")
        .and_then(|title| title.as_str())
        .map(str::to_string)
        .ok_or_else(|| ContentError::MissingField {
            path: path.to_path_buf(),
            field: "title".to_string(),
        })
}

fn parse_frontmatter<T: DeserializeOwned>(
    frontmatter: &str,
    path: &Path,
) -> Result<T, ContentError> {
    serde_yaml::from_str::<T>(frontmatter).map_err(|source| {
        // serde reports absent required fields as "missing field `name`"
        let message = source.to_string();
        match message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            Some(field) => ContentError::MissingField {
                path: path.to_path_buf(),
                field: field.to_string(),
            },
            None => ContentError::Frontmatter {
                path: path.to_path_buf(),
                source,
            },
        }
    })
}

fn get_text_from_events(parser_slice: &[Event]) -> String {
    let mut text = String::new();

    for event in parser_slice.iter() {
        match event {
            Event::Text(chunk) | Event::Code(chunk) => text += chunk,
            _ => continue,
        }
    }

    text
}

fn find_headings(events: &[Event]) -> Vec<InternalHeadingEvent> {
    let mut heading_refs = vec![];

    for (i, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading {
                level, id, classes, ..
            }) => {
                heading_refs.push(InternalHeadingEvent::new(
                    i,
                    *level as u32,
                    id.clone().map(String::from),
                    &classes
                        .iter()
                        .map(|c| c.to_string())
                        .collect::<Vec<String>>(),
                ));
            }
            Event::End(TagEnd::Heading { .. }) => {
                heading_refs
                    .last_mut()
                    .expect("Heading end before start?")
                    .end = i;
            }
            _ => (),
        }
    }

    heading_refs
}

/// Render Markdown content to HTML.
///
/// Front-matter is stripped, fenced code blocks are syntax-highlighted, and
/// headings get stable `id` attributes so they can be deep-linked.
///
/// ## Example
/// ```rs
/// use plume::content::render_markdown;
/// let markdown = r#"# Hello, world!"#;
/// let html = render_markdown(markdown);
/// ```
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS | Options::ENABLE_HEADING_ATTRIBUTES);

    let mut code_block: Option<CodeBlock> = None;
    let mut code_block_content = String::new();
    let mut in_frontmatter = false;
    let mut events = Vec::new();

    // First pass: collect events, handle frontmatter and code blocks
    for (event, _) in Parser::new_ext(content, options).into_offset_iter() {
        match event {
            Event::Start(Tag::MetadataBlock(_)) => {
                in_frontmatter = true;
            }
            Event::End(TagEnd::MetadataBlock(_)) => {
                in_frontmatter = false;
            }
            Event::Text(ref text) => {
                if !in_frontmatter {
                    if code_block.is_some() {
                        code_block_content.push_str(text);
                    } else {
                        events.push(event);
                    }
                }
            }
            Event::Start(Tag::CodeBlock(ref kind)) => {
                if let CodeBlockKind::Fenced(fence) = kind {
                    let (block, begin) = CodeBlock::new(fence);
                    code_block = Some(block);
                    events.push(Event::Html(begin.into()));
                } else {
                    events.push(event);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = code_block.take() {
                    match block.highlight(&code_block_content) {
                        Ok(html) => events.push(Event::Html(html.into())),
                        // Fall back to the plain source; push_html escapes it
                        Err(_) => events.push(Event::Text(code_block_content.clone().into())),
                    }
                    code_block_content.clear();
                    events.push(Event::Html("</code></pre>\n".into()));
                } else {
                    events.push(event);
                }
            }
            _ => {
                events.push(event);
            }
        }
    }

    // Second pass: give headings stable ids
    let events = anchor_headings(events);

    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, events.into_iter());
    html_output
}

fn anchor_headings(events: Vec<Event>) -> Vec<Event> {
    let mut slugger = Slugger::new();
    let mut transformed = Vec::with_capacity(events.len());

    for (i, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading {
                level, id, classes, ..
            }) => {
                let heading_text = find_matching_heading_end(&events, i)
                    .map(|end| get_text_from_events(&events[i + 1..end]))
                    .unwrap_or_default();
                let slug = slugger.slugify(&heading_text);
                let heading_id = id.as_ref().map(|s| s.as_ref()).unwrap_or(&slug);

                let class_attr = if classes.is_empty() {
                    String::new()
                } else {
                    let classes: Vec<&str> = classes.iter().map(|c| c.as_ref()).collect();
                    format!(" class=\"{}\"", classes.join(" "))
                };

                transformed.push(Event::Html(
                    format!("<h{} id=\"{}\"{}>", *level as u8, heading_id, class_attr).into(),
                ));
            }
            _ => transformed.push(event.clone()),
        }
    }

    transformed
}

fn find_matching_heading_end(events: &[Event], start_index: usize) -> Option<usize> {
    for (i, event) in events.iter().enumerate().skip(start_index + 1) {
        if matches!(event, Event::End(TagEnd::Heading(_))) {
            return Some(i);
        }
    }
    None
}

/// Extract the document body as plain text, without front-matter or markup.
pub fn plain_text(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut in_frontmatter = false;
    let mut text = String::new();

    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(Tag::MetadataBlock(_)) => in_frontmatter = true,
            Event::End(TagEnd::MetadataBlock(_)) => in_frontmatter = false,
            Event::Text(chunk) | Event::Code(chunk) => {
                if !in_frontmatter {
                    text.push_str(&chunk);
                }
            }
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::BlockQuote(_)
                | TagEnd::CodeBlock,
            ) => {
                if !text.ends_with(' ') {
                    text.push(' ');
                }
            }
            _ => (),
        }
    }

    text.trim().to_string()
}

/// The first words of the document body, cut at a word boundary and capped at
/// roughly `max_chars` characters.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let text = plain_text(content);

    if text.chars().count() <= max_chars {
        return text;
    }

    let mut cut = String::new();
    for word in text.split_whitespace() {
        let next_len = if cut.is_empty() {
            word.chars().count()
        } else {
            cut.chars().count() + 1 + word.chars().count()
        };

        if next_len > max_chars && !cut.is_empty() {
            break;
        }

        if !cut.is_empty() {
            cut.push(' ');
        }
        cut.push_str(word);

        if next_len > max_chars {
            break;
        }
    }

    format!("{cut}…")
}

/// Estimated reading time of the document in minutes, assuming around 200
/// words per minute. Never less than one minute.
pub fn reading_time(content: &str) -> usize {
    let words = plain_text(content).split_whitespace().count();
    words.div_ceil(200).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[derive(serde::Deserialize, Debug)]
    struct TestContent {
        title: String,
        #[serde(default)]
        published: bool,
        #[serde(skip)]
        headings: Vec<MarkdownHeading>,
    }

    impl MarkdownContent for TestContent {
        fn get_headings(&self) -> &Vec<MarkdownHeading> {
            &self.headings
        }
    }

    impl InternalMarkdownContent for TestContent {
        fn set_headings(&mut self, headings: Vec<MarkdownHeading>) {
            self.headings = headings;
        }
    }

    fn write_post(root: &Path, dir: &str, contents: &str) {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.md"), contents).unwrap();
    }

    #[test]
    fn test_glob_derives_permalinks() {
        let tmp = TempDir::new().unwrap();
        write_post(
            tmp.path(),
            "blog/part-one",
            "---\ntitle: Hello, World! (Part One)\n---\n\nBody.\n",
        );

        let pattern = tmp.path().join("blog/*/index.md");
        let entries = glob_markdown::<TestContent>(
            pattern.to_str().unwrap(),
            Some(GlobOptions {
                base_dir: Some(tmp.path().to_path_buf()),
            }),
        )
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].permalink, "/blog/hello-world-part-one");
        assert_eq!(entries[0].slug(), "hello-world-part-one");
        assert_eq!(entries[0].id, "blog/part-one/index");
        assert_eq!(entries[0].data.title, "Hello, World! (Part One)");
        assert!(!entries[0].data.published);
    }

    #[test]
    fn test_glob_skips_documents_with_missing_title() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "blog/good", "---\ntitle: Good Post\n---\n\nHi.\n");
        write_post(tmp.path(), "blog/untitled", "---\npublished: true\n---\n\nNo title.\n");

        let pattern = tmp.path().join("blog/*/index.md");
        let entries = glob_markdown::<TestContent>(
            pattern.to_str().unwrap(),
            Some(GlobOptions {
                base_dir: Some(tmp.path().to_path_buf()),
            }),
        )
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].data.title, "Good Post");
    }

    #[test]
    fn test_glob_skips_documents_with_degenerate_title() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "blog/yelling", "---\ntitle: \"!!!\"\n---\n\nHi.\n");

        let pattern = tmp.path().join("blog/*/index.md");
        let entries = glob_markdown::<TestContent>(
            pattern.to_str().unwrap(),
            Some(GlobOptions {
                base_dir: Some(tmp.path().to_path_buf()),
            }),
        )
        .unwrap();

        assert!(entries.is_empty());
    }

    #[test]
    fn test_glob_fails_on_missing_root() {
        let tmp = TempDir::new().unwrap();
        let pattern = tmp.path().join("no-such-dir/*/index.md");

        let err = glob_markdown::<TestContent>(pattern.to_str().unwrap(), None).unwrap_err();
        assert!(matches!(err, ContentError::RootUnreachable { .. }));
    }

    #[test]
    fn test_missing_required_field_is_classified() {
        #[derive(serde::Deserialize, Debug)]
        struct Dated {
            #[allow(dead_code)]
            title: String,
            #[allow(dead_code)]
            date: String,
        }

        let err =
            parse_frontmatter::<Dated>("title: Hello\n", Path::new("blog/one/index.md")).unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field, .. } if field == "date"));
    }

    #[test]
    fn test_frontmatter_title_missing() {
        let err = frontmatter_title("published: true\n", Path::new("a.md")).unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field, .. } if field == "title"));
    }

    #[test]
    fn test_render_strips_frontmatter() {
        let markdown = "---\ntitle: Hello\n---\n\nSome body text.\n";
        let html = render_markdown(markdown);

        assert!(html.contains("Some body text."));
        assert!(!html.contains("title"));
    }

    #[test]
    fn test_render_anchors_headings() {
        let markdown = "# Intro\n\nText.\n\n# Intro\n";
        let html = render_markdown(markdown);

        assert!(html.contains("<h1 id=\"intro\">"));
        assert!(html.contains("<h1 id=\"intro-1\">"));
    }

    #[test]
    fn test_render_respects_explicit_heading_ids() {
        let markdown = "# Getting Started {#setup}\n";
        let html = render_markdown(markdown);

        assert!(html.contains("<h1 id=\"setup\">"));
    }

    #[test]
    fn test_render_highlights_fenced_code() {
        let markdown = "```rs\nfn main() {}\n```\n";
        let html = render_markdown(markdown);

        assert!(html.contains("<pre data-language=\"rs\">"));
        assert!(html.contains("</code></pre>"));
    }

    #[test]
    fn test_plain_text_drops_markup_and_frontmatter() {
        let markdown = "---\ntitle: Hello\n---\n\n# Heading\n\nSome **bold** text.\n";
        let text = plain_text(markdown);

        assert_eq!(text, "Heading Some bold text.");
    }

    #[test]
    fn test_excerpt_cuts_at_word_boundary() {
        let markdown = "One two three four five six seven eight nine ten.\n";

        assert_eq!(excerpt(markdown, 12), "One two…");
        assert_eq!(excerpt(markdown, 1000), "One two three four five six seven eight nine ten.");
    }

    #[test]
    fn test_reading_time_has_a_floor() {
        assert_eq!(reading_time("A few words only.\n"), 1);

        let long = "word ".repeat(450);
        assert_eq!(reading_time(&long), 3);
    }
}
