//! Derivation of public routes for content entries.
//!
//! Every document discovered by a content source gets exactly one canonical,
//! URL-safe route, computed from its front-matter title and its location in
//! the content tree. The derivation is pure: the same document always maps to
//! the same route, no matter in which order the content tree is walked.
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::errors::ContentError;

/// Reduce a title to its URL-safe slug.
///
/// Lower-cases the input, turns every run of whitespace into a single hyphen
/// and deletes every other character that is not a lowercase letter, a digit
/// or a hyphen. Punctuation like `* + ~ . ( ) ' " ! : @` is removed outright,
/// not replaced, so `C++ Tips: A Guide` becomes `c-tips-a-guide`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_whitespace() {
            pending_hyphen = !slug.is_empty();
            continue;
        }

        let c = c.to_ascii_lowercase();
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            continue;
        }

        if pending_hyphen {
            slug.push('-');
            pending_hyphen = false;
        }
        slug.push(c);
    }

    slug
}

/// Compute the public route for a document.
///
/// `rel_path` is the document's path relative to the content root. Its last
/// two segments are structural, the document's own directory and its filename
/// stem, and carry no routing information; they are dropped and replaced with
/// the slugified title. `blog/first-light/index.md` with the title
/// `First Light` therefore maps to `/blog/first-light`.
///
/// Fails with [`ContentError::InvalidSlug`] when the title is made up
/// entirely of stripped characters and the slug would be empty.
pub fn derive_route(rel_path: &Path, title: &str) -> Result<String, ContentError> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(ContentError::InvalidSlug {
            path: rel_path.to_path_buf(),
            title: title.to_string(),
        });
    }

    let trimmed = rel_path.with_extension("");
    let mut segments: Vec<&str> = trimmed.iter().filter_map(|s| s.to_str()).collect();
    segments.truncate(segments.len().saturating_sub(2));
    segments.push(&slug);

    Ok(format!("/{}", segments.join("/")))
}

/// The build-wide mapping from derived route to the source document that
/// claimed it.
///
/// One table is produced per build and passed explicitly through the
/// pipeline. A route can only be claimed once: a second claim is a
/// [`ContentError::RouteCollision`] naming both documents, and fails the
/// build rather than letting the later document shadow the earlier one.
#[derive(Default)]
pub struct RouteTable {
    claimed: FxHashMap<String, PathBuf>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `route` for `source`.
    pub fn claim(&mut self, route: &str, source: &Path) -> Result<(), ContentError> {
        if let Some(first) = self.claimed.get(route) {
            return Err(ContentError::RouteCollision {
                route: route.to_string(),
                first: first.clone(),
                second: source.to_path_buf(),
            });
        }

        self.claimed.insert(route.to_string(), source.to_path_buf());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    /// Every claimed route and the document it belongs to.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.claimed
            .iter()
            .map(|(route, source)| (route.as_str(), source.as_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_removes_punctuation() {
        assert_eq!(slugify("Hello, World! (Part One)"), "hello-world-part-one");
        assert_eq!(slugify("C++ Tips: A Guide"), "c-tips-a-guide");
        assert_eq!(slugify("email@example.com"), "emailexamplecom");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("So   much \t whitespace"), "so-much-whitespace");
        assert_eq!(slugify("  padded title  "), "padded-title");
    }

    #[test]
    fn test_slugify_charset() {
        let titles = [
            "Hello, World! (Part One)",
            "C++ Tips: A Guide",
            "100 Days of Rust",
            "Ünïcödé titles are fine",
            "a*b+c~d.e(f)g'h\"i!j:k@l",
        ];

        for title in titles {
            let slug = slugify(title);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "{:?} produced {:?}",
                title,
                slug
            );
        }
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for title in ["hello-world", "c-tips-a-guide", "100-days-of-rust"] {
            assert_eq!(slugify(title), title);
        }
    }

    #[test]
    fn test_slugify_stripped_only_title_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("(...)"), "");
    }

    #[test]
    fn test_derive_route_drops_structural_segments() {
        let route = derive_route(Path::new("blog/first-light/index.md"), "First Light").unwrap();
        assert_eq!(route, "/blog/first-light");
    }

    #[test]
    fn test_derive_route_uses_title_over_directory_name() {
        let route = derive_route(
            Path::new("blog/post-2/index.md"),
            "Hello, World! (Part One)",
        )
        .unwrap();
        assert_eq!(route, "/blog/hello-world-part-one");
    }

    #[test]
    fn test_derive_route_keeps_nested_parents() {
        let route = derive_route(
            Path::new("blog/series/part-one/index.md"),
            "Part One: Setup",
        )
        .unwrap();
        assert_eq!(route, "/blog/series/part-one-setup");
    }

    #[test]
    fn test_derive_route_at_content_root() {
        let route = derive_route(Path::new("about/index.md"), "About Me").unwrap();
        assert_eq!(route, "/about-me");
    }

    #[test]
    fn test_derive_route_rejects_empty_slug() {
        let err = derive_route(Path::new("blog/yelling/index.md"), "!!!").unwrap_err();
        assert!(matches!(err, ContentError::InvalidSlug { title, .. } if title == "!!!"));
    }

    #[test]
    fn test_derive_route_is_deterministic() {
        let a = derive_route(Path::new("blog/one/index.md"), "Some Title").unwrap();
        let b = derive_route(Path::new("blog/one/index.md"), "Some Title").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_pairs_get_distinct_routes() {
        let mut table = RouteTable::new();
        let first = derive_route(Path::new("blog/one/index.md"), "Intro").unwrap();
        let second = derive_route(Path::new("notes/two/index.md"), "Intro").unwrap();

        assert_ne!(first, second);
        table.claim(&first, Path::new("blog/one/index.md")).unwrap();
        table
            .claim(&second, Path::new("notes/two/index.md"))
            .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_route_table_rejects_collisions() {
        let mut table = RouteTable::new();
        let first = derive_route(Path::new("blog/one/index.md"), "Intro").unwrap();
        let second = derive_route(Path::new("blog/two/index.md"), "Intro").unwrap();
        assert_eq!(first, second);

        table.claim(&first, Path::new("blog/one/index.md")).unwrap();
        let err = table
            .claim(&second, Path::new("blog/two/index.md"))
            .unwrap_err();

        match err {
            ContentError::RouteCollision {
                route,
                first,
                second,
            } => {
                assert_eq!(route, "/blog/intro");
                assert_eq!(first, Path::new("blog/one/index.md"));
                assert_eq!(second, Path::new("blog/two/index.md"));
            }
            other => panic!("expected RouteCollision, got {}", other),
        }
    }
}
