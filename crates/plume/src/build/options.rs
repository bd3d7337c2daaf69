use std::path::PathBuf;

/// Plume build options. Should be passed to [`publish()`](crate::publish()).
///
/// ## Examples
/// Default values:
/// ```rust
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
/// Custom values:
/// ```rust
/// use plume::{content_sources, publish, routes, BuildOptions, BuildOutput};
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///   publish(
///     routes![],
///     content_sources![],
///     BuildOptions {
///       base_url: Some("https://example.com".to_string()),
///       output_dir: "public".into(),
///       ..Default::default()
///     },
///   )
/// }
/// ```
pub struct BuildOptions {
    /// Base URL for the site, e.g. `https://example.com`.
    /// This value is used to generate canonical URLs and can be used wherever
    /// the full site URL is needed (e.g. in SEO meta tags) through
    /// [`PageContext::base_url`](crate::route::PageContext::base_url) in pages.
    pub base_url: Option<String>,

    pub output_dir: PathBuf,
    pub static_dir: PathBuf,

    /// Whether to clean the output directory before building.
    ///
    /// Not cleaning the output directory may offer a performance improvement
    /// at the cost of potentially serving stale content.
    pub clean_output_dir: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            output_dir: "dist".into(),
            static_dir: "static".into(),
            clean_output_dir: true,
        }
    }
}
