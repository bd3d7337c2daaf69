#![cfg_attr(docsrs, feature(doc_cfg))]
//! Plume is a library for generating personal static websites.
//!
//! Content is authored as Markdown documents with YAML front-matter, routes
//! are derived from each document's title and location in the content tree,
//! and pages are plain Rust structs implementing the
//! [`Route`](route::Route) trait. One call to [`publish()`] discovers the
//! content, derives and checks the route table, and writes every page of the
//! site to the output directory.

// Modules the end-user will interact directly or indirectly with
pub mod content;
pub mod errors;
pub mod permalink;
pub mod route;

mod routing;

// Exports for end-users
pub use build::metadata::{BuildOutput, ContentRouteOutput, PageOutput, StaticFileOutput};
pub use build::options::BuildOptions;

// Re-export FxHashMap so that macro-generated code can use it without requiring users to add it as a dependency.
#[doc(hidden)]
pub use rustc_hash::FxHashMap;

mod build;
mod logging;
mod templating;

#[cfg(feature = "maud")]
#[cfg_attr(docsrs, doc(cfg(feature = "maud")))]
pub mod maud {
    //! Traits and methods for [Maud](https://maud.lambda.xyz), a macro for writing HTML templates.
    //!
    //! ## Example
    //! ```rs
    //! use plume::route::prelude::*;
    //! use maud::{html, Markup};
    //!
    //! #[route("/")]
    //! pub struct Index;
    //!
    //! impl Route for Index {
    //!   fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
    //!     html! {
    //!       h1 { "Hello, world!" }
    //!     }
    //!   }
    //! }
    //! ```
    pub use crate::templating::maud_ext::*;
}

use build::execute_build;
use content::ContentSources;
use logging::init_logging;
use route::FullRoute;

#[macro_export]
/// Helps to define every route that should be built by [`publish()`].
///
/// ## Example
/// ```rs
/// use plume::{content_sources, publish, routes, BuildOptions, BuildOutput};
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///     publish(
///         routes![routes::Index, routes::Article],
///         content_sources![],
///         BuildOptions::default(),
///     )
/// }
/// ```
macro_rules! routes {
    [$($route:expr),*] => {
        &[$(&$route),*]
    };
}

/// Helps to define all sources of content that should be loaded by
/// [`publish()`].
///
/// ## Example
/// ```rs
/// use plume::{content_sources, publish, routes, BuildOptions, BuildOutput};
/// use plume::content::{glob_markdown, markdown_entry};
///
/// #[markdown_entry]
/// pub struct ArticleContent {
///   pub title: String,
///   pub description: String,
/// }
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///    publish(
///       routes![],
///       content_sources![
///         "articles" => glob_markdown::<ArticleContent>("content/articles/*.md", None)
///       ],
///       BuildOptions::default(),
///    )
/// }
/// ```
#[macro_export]
macro_rules! content_sources {
    ($($name:expr => $entries:expr),* $(,)?) => {
        plume::content::ContentSources::new(vec![$(Box::new(plume::content::ContentSource::new($name, Box::new(move || $entries)))),*])
    };
}

/// The version of Plume being used.
///
/// Can be used to create a generator tag in the output HTML.
///
/// ## Example
/// ```rs
/// use plume::GENERATOR;
///
/// format!("<meta name=\"generator\" content=\"{}\">", GENERATOR);
/// ```
pub const GENERATOR: &str = concat!("Plume v", env!("CARGO_PKG_VERSION"));

/// 🪶 Plume entrypoint. Starts the build process and generates the output
/// files.
///
/// ## Example
/// Should be called from the main function of the binary crate.
/// ```rs
/// use plume::{content_sources, publish, routes, BuildOptions, BuildOutput};
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///   publish(
///     routes![],
///     content_sources![],
///     BuildOptions::default(),
///   )
/// }
/// ```
pub fn publish(
    routes: &[&dyn FullRoute],
    mut content_sources: ContentSources,
    options: BuildOptions,
) -> Result<BuildOutput, Box<dyn std::error::Error>> {
    init_logging();

    execute_build(routes, &mut content_sources, &options)
}
