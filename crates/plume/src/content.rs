//! Core functions and structs to define the content sources of your website.
//!
//! Content sources represent the content of your website, such as blog posts
//! or notes. They can be passed to [`publish()`](crate::publish), through the
//! [`content_sources!`](crate::content_sources) macro, to be loaded at the
//! start of every build.
use std::{
    any::Any,
    path::{Path, PathBuf},
};

mod highlight;
pub mod markdown;
mod slugger;

use crate::errors::ContentError;
use crate::permalink::RouteTable;
use crate::route::{Page, PageParams, Pages};
pub use markdown::*;

/// Helps implement a struct as a Markdown content entry.
///
/// ## Example
/// ```rs
/// use plume::content::markdown_entry;
///
/// #[markdown_entry]
/// pub struct ArticleContent {
///   pub title: String,
///   pub description: String,
/// }
/// ```
pub use plume_macros::markdown_entry;

/// Represents a single entry in a [`ContentSource`].
///
/// Carries the typed front-matter (`data`), the raw document, and the
/// entry's derived `permalink` (see [`crate::permalink`]).
pub struct ContentEntry<T> {
    /// Stable identity of the entry, derived from its path inside the
    /// content root, e.g. `blog/first-light/index`.
    pub id: String,
    /// The public route derived from the entry's location and title,
    /// e.g. `/blog/first-light`.
    pub permalink: String,
    pub data: T,
    pub raw_content: Option<String>,
    pub file_path: Option<PathBuf>,
    render: OptionalContentRenderFn,
}

type OptionalContentRenderFn = Option<Box<dyn Fn(&str) -> String + Send + Sync>>;

impl<T: std::fmt::Debug> std::fmt::Debug for ContentEntry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentEntry")
            .field("id", &self.id)
            .field("permalink", &self.permalink)
            .field("data", &self.data)
            .field("raw_content", &self.raw_content)
            .field("file_path", &self.file_path)
            .field("render", &self.render.as_ref().map(|_| "<render fn>"))
            .finish()
    }
}

impl<T> ContentEntry<T> {
    pub fn new(
        id: String,
        permalink: String,
        render: OptionalContentRenderFn,
        raw_content: Option<String>,
        data: T,
        file_path: Option<PathBuf>,
    ) -> Self {
        Self {
            id,
            permalink,
            data,
            raw_content,
            file_path,
            render,
        }
    }

    /// Render the entry's body to HTML.
    pub fn render(&self) -> String {
        let render = self.render.as_ref().expect("Entry has no renderer");
        let raw_content = self.raw_content.as_ref().expect("Entry has no raw content");
        render(raw_content)
    }

    /// The last segment of the entry's permalink.
    pub fn slug(&self) -> &str {
        self.permalink
            .rsplit('/')
            .next()
            .unwrap_or(&self.permalink)
    }
}

/// Represents a collection of content sources.
///
/// Mostly seen as the return type of
/// [`content_sources!`](crate::content_sources).
pub struct ContentSources(pub Vec<Box<dyn ContentSourceInternal>>);

impl From<Vec<Box<dyn ContentSourceInternal>>> for ContentSources {
    fn from(content_sources: Vec<Box<dyn ContentSourceInternal>>) -> Self {
        Self(content_sources)
    }
}

impl ContentSources {
    pub fn new(content_sources: Vec<Box<dyn ContentSourceInternal>>) -> Self {
        Self(content_sources)
    }

    pub(crate) fn sources_mut(&mut self) -> &mut [Box<dyn ContentSourceInternal>] {
        &mut self.0
    }

    pub fn get_source<T: 'static>(&self, name: &str) -> &ContentSource<T> {
        self.0
            .iter()
            .find_map(
                |source| match source.as_any().downcast_ref::<ContentSource<T>>() {
                    Some(source) if source.name == name => Some(source),
                    _ => None,
                },
            )
            .unwrap_or_else(|| panic!("Content source with name '{}' not found", name))
    }

    pub fn get_source_safe<T: 'static>(&self, name: &str) -> Option<&ContentSource<T>> {
        self.0.iter().find_map(|source| {
            match source.as_any().downcast_ref::<ContentSource<T>>() {
                Some(source) if source.name == name => Some(source),
                _ => None,
            }
        })
    }
}

type ContentSourceInitMethod<T> =
    Box<dyn Fn() -> Result<Vec<ContentEntry<T>>, ContentError> + Send + Sync>;

/// A source of content, such as the blog posts of a website.
pub struct ContentSource<T> {
    pub name: String,
    pub entries: Vec<ContentEntry<T>>,
    pub(crate) init_method: ContentSourceInitMethod<T>,
}

impl<T> ContentSource<T> {
    pub fn new<P>(name: P, entries: ContentSourceInitMethod<T>) -> Self
    where
        P: Into<String>,
    {
        Self {
            name: name.into(),
            entries: vec![],
            init_method: entries,
        }
    }

    pub fn get_entry(&self, id: &str) -> &ContentEntry<T> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .unwrap_or_else(|| panic!("Entry with id '{}' not found", id))
    }

    pub fn get_entry_safe(&self, id: &str) -> Option<&ContentEntry<T>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn get_entry_by_slug(&self, slug: &str) -> &ContentEntry<T> {
        self.entries
            .iter()
            .find(|entry| entry.slug() == slug)
            .unwrap_or_else(|| panic!("Entry with slug '{}' not found", slug))
    }

    pub fn into_pages<Params, Props>(
        &self,
        cb: impl Fn(&ContentEntry<T>) -> Page<Params, Props>,
    ) -> Pages<Params, Props>
    where
        Params: Into<PageParams>,
    {
        self.entries.iter().map(cb).collect()
    }
}

#[doc(hidden)]
/// Used internally by Plume and should not be implemented by the user.
/// We expose it because it's implemented for [`ContentSource`], which is public.
pub trait ContentSourceInternal: Send + Sync {
    fn init(&mut self, routes: &mut RouteTable) -> Result<(), ContentError>;
    fn get_name(&self) -> &str;
    fn as_any(&self) -> &dyn Any; // Used for type checking at runtime
}

impl<T: 'static + Sync + Send> ContentSourceInternal for ContentSource<T> {
    fn init(&mut self, routes: &mut RouteTable) -> Result<(), ContentError> {
        self.entries = (self.init_method)()?;

        for entry in &self.entries {
            let source = entry
                .file_path
                .as_deref()
                .unwrap_or_else(|| Path::new(&entry.id));
            routes.claim(&entry.permalink, source)?;
        }

        Ok(())
    }
    fn get_name(&self) -> &str {
        &self.name
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, permalink: &str, file: &str) -> ContentEntry<()> {
        ContentEntry::new(
            id.to_string(),
            permalink.to_string(),
            None,
            None,
            (),
            Some(PathBuf::from(file)),
        )
    }

    #[test]
    fn test_slug_is_last_permalink_segment() {
        let entry = entry("blog/one/index", "/blog/hello-world", "content/blog/one/index.md");
        assert_eq!(entry.slug(), "hello-world");
    }

    #[test]
    fn test_init_claims_routes() {
        let mut source = ContentSource::new(
            "blog",
            Box::new(|| {
                Ok(vec![
                    entry("blog/one/index", "/blog/one", "content/blog/one/index.md"),
                    entry("blog/two/index", "/blog/two", "content/blog/two/index.md"),
                ])
            }) as ContentSourceInitMethod<()>,
        );

        let mut routes = RouteTable::new();
        source.init(&mut routes).unwrap();
        assert_eq!(routes.len(), 2);
    }

    #[test]
    fn test_init_fails_closed_on_collision() {
        let mut source = ContentSource::new(
            "blog",
            Box::new(|| {
                Ok(vec![
                    entry("blog/one/index", "/blog/intro", "content/blog/one/index.md"),
                    entry("blog/two/index", "/blog/intro", "content/blog/two/index.md"),
                ])
            }) as ContentSourceInitMethod<()>,
        );

        let mut routes = RouteTable::new();
        let err = source.init(&mut routes).unwrap_err();
        assert!(matches!(err, ContentError::RouteCollision { .. }));

        let message = err.to_string();
        assert!(message.contains("content/blog/one/index.md"));
        assert!(message.contains("content/blog/two/index.md"));
    }
}
