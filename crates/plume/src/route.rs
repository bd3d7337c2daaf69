//! Core traits and structs to define the pages of your website.
//!
//! Every route must implement the [`Route`] trait. Then, pages can be passed
//! to [`publish()`](crate::publish), through the [`routes!`](crate::routes)
//! macro, to be built.
use crate::content::ContentSources;
use crate::routing::{ParameterDef, extract_params_from_raw_route, guess_if_route_is_endpoint};
use rustc_hash::FxHashMap;
use std::any::Any;
use std::path::{Path, PathBuf};

/// The result of a page render, can be either text, raw bytes, or an error.
///
/// Typically used through the [`Into<RenderResult>`](std::convert::Into) and
/// [`From<RenderResult>`](std::convert::From) implementations for common
/// types. End users should rarely need to interact with this enum directly.
pub enum RenderResult {
    Text(String),
    Raw(Vec<u8>),
    Err(Box<dyn std::error::Error>),
}

impl<T> From<Result<T, Box<dyn std::error::Error>>> for RenderResult
where
    T: Into<RenderResult>,
{
    fn from(val: Result<T, Box<dyn std::error::Error>>) -> Self {
        match val {
            Ok(s) => s.into(),
            Err(e) => RenderResult::Err(e),
        }
    }
}

impl From<RenderResult> for Result<RenderResult, Box<dyn std::error::Error>> {
    fn from(val: RenderResult) -> Self {
        match val {
            RenderResult::Err(e) => Err(e),
            _ => Ok(val),
        }
    }
}

impl From<String> for RenderResult {
    fn from(val: String) -> Self {
        RenderResult::Text(val)
    }
}

impl From<&str> for RenderResult {
    fn from(val: &str) -> Self {
        RenderResult::Text(val.to_string())
    }
}

impl From<Vec<u8>> for RenderResult {
    fn from(val: Vec<u8>) -> Self {
        RenderResult::Raw(val)
    }
}

impl From<&[u8]> for RenderResult {
    fn from(val: &[u8]) -> Self {
        RenderResult::Raw(val.to_vec())
    }
}

pub type Pages<Params = PageParams, Props = ()> = Vec<Page<Params, Props>>;

/// Represents a page of a dynamic route: its parameters and associated props.
#[derive(Debug, Clone)]
pub struct Page<Params = PageParams, Props = ()>
where
    Params: Into<PageParams>,
{
    pub params: Params,
    pub props: Props,
}

impl<Params, Props> Page<Params, Props>
where
    Params: Into<PageParams>,
{
    pub fn new(params: Params, props: Props) -> Self {
        Self { params, props }
    }
}

impl<Params> Page<Params, ()>
where
    Params: Into<PageParams>,
{
    pub fn from_params(params: Params) -> Self {
        Self { params, props: () }
    }
}

/// Allows to access various data in a [`Route`] implementation.
pub struct PageContext<'a> {
    pub params: &'a dyn Any,
    pub props: &'a dyn Any,
    pub content: &'a ContentSources,
    /// The current path being rendered, e.g. `/blog/my-article`.
    pub current_path: &'a String,
    /// The base URL as defined in [`BuildOptions::base_url`](crate::BuildOptions::base_url)
    pub base_url: &'a Option<String>,
}

impl<'a> PageContext<'a> {
    pub fn from_static_route(
        content: &'a ContentSources,
        current_path: &'a String,
        base_url: &'a Option<String>,
    ) -> Self {
        Self {
            params: &(),
            props: &(),
            content,
            current_path,
            base_url,
        }
    }

    pub fn from_dynamic_route(
        dynamic_page: &'a PagesResult,
        content: &'a ContentSources,
        current_path: &'a String,
        base_url: &'a Option<String>,
    ) -> Self {
        Self {
            params: dynamic_page.1.as_ref(),
            props: dynamic_page.2.as_ref(),
            content,
            current_path,
            base_url,
        }
    }

    pub fn params<T: 'static + Clone>(&self) -> T {
        self.params
            .downcast_ref::<T>()
            .unwrap_or_else(|| panic!("Params type mismatch: got {}", std::any::type_name::<T>()))
            .clone()
    }

    pub fn props<T: 'static + Clone>(&self) -> T {
        self.props
            .downcast_ref::<T>()
            .unwrap_or_else(|| panic!("Props type mismatch: got {}", std::any::type_name::<T>()))
            .clone()
    }

    pub fn params_ref<T: 'static>(&self) -> &T {
        self.params
            .downcast_ref::<T>()
            .unwrap_or_else(|| panic!("Params type mismatch: got {}", std::any::type_name::<T>()))
    }

    pub fn props_ref<T: 'static>(&self) -> &T {
        self.props
            .downcast_ref::<T>()
            .unwrap_or_else(|| panic!("Props type mismatch: got {}", std::any::type_name::<T>()))
    }

    /// Returns the canonical URL for the current page. If
    /// [`BuildOptions::base_url`](crate::BuildOptions::base_url) is not set,
    /// this will return `None`.
    pub fn canonical_url(&self) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}{}", base, self.current_path))
    }
}

/// Allows to access the content sources in a dynamic route's
/// [`Route::pages`] method.
pub struct DynamicRouteContext<'a> {
    pub content: &'a ContentSources,
}

/// Must be implemented for every page of your website.
///
/// The struct implementing this trait can be passed to
/// [`publish()`](crate::publish), through the [`routes!`](crate::routes)
/// macro, to be built.
///
/// ## Example
/// ```rust
/// use plume::route::prelude::*;
///
/// #[route("/")]
/// pub struct Index;
///
/// impl Route for Index {
///    fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
///       "<h1>Hello, world!</h1>"
///   }
/// }
/// ```
pub trait Route<Params = PageParams, Props = ()>
where
    Params: Into<PageParams>,
    Props: 'static,
{
    fn pages(&self, _ctx: &mut DynamicRouteContext) -> Pages<Params, Props> {
        Vec::new()
    }
    fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult>;
}

/// Raw representation of the parameters passed to a page.
#[derive(Clone, Default, Debug)]
pub struct PageParams(pub FxHashMap<String, Option<String>>);

impl PageParams {
    pub fn from_vec<T>(params: Vec<T>) -> Vec<PageParams>
    where
        T: Into<PageParams>,
    {
        params.into_iter().map(|p| p.into()).collect()
    }
}

impl From<&PageParams> for PageParams {
    fn from(params: &PageParams) -> Self {
        params.clone()
    }
}

impl<T> FromIterator<T> for PageParams
where
    T: Into<PageParams>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = FxHashMap::default();
        for item in iter {
            let item = item.into();
            map.extend(item.0);
        }
        PageParams(map)
    }
}

#[derive(PartialEq, Eq, Debug)]
/// Used internally by Plume and should not be implemented by the user.
/// We expose it because [`plume_macros::route`] implements it for the user
/// behind the scenes.
pub enum RouteType {
    Static,
    Dynamic,
}

#[doc(hidden)]
/// Used internally by Plume and should not be implemented by the user.
/// We expose it because the derive macro implements it for the user behind
/// the scenes.
pub trait InternalRoute {
    fn route_raw(&self) -> Option<String>;

    fn is_endpoint(&self) -> bool {
        self.route_raw()
            .as_ref()
            .map(|path| guess_if_route_is_endpoint(path))
            .unwrap_or(false)
    }

    fn route_type(&self) -> RouteType {
        let path = self.route_raw().unwrap_or_default();
        if extract_params_from_raw_route(&path).is_empty() {
            RouteType::Static
        } else {
            RouteType::Dynamic
        }
    }

    fn url(&self, params: &PageParams) -> String {
        let route = self.route_raw().unwrap_or_default();
        let params_def = extract_params_from_raw_route(&route);
        build_url_with_params(&route, &params_def, params, self.is_endpoint())
    }

    fn file_path(&self, params: &PageParams, output_dir: &Path) -> PathBuf {
        let route = self.route_raw().unwrap_or_default();
        let params_def = extract_params_from_raw_route(&route);
        build_file_path_with_params(&route, &params_def, params, output_dir, self.is_endpoint())
    }
}

/// Extension trait providing generic convenience methods on an instance of a
/// route.
pub trait RouteExt<Params = PageParams, Props = ()>: Route<Params, Props> + InternalRoute
where
    Params: Into<PageParams>,
    Props: 'static,
{
    /// Get the URL for this page with the given parameters.
    ///
    /// Note that this method merely generates the URL based on the route
    /// pattern and parameters, it does not verify if a corresponding page
    /// actually exists.
    fn url(&self, params: Params) -> String {
        InternalRoute::url(self, &params.into())
    }
}

// Blanket implementation for all Route implementors that also implement InternalRoute
impl<U, Params, Props> RouteExt<Params, Props> for U
where
    U: Route<Params, Props> + InternalRoute,
    Params: Into<PageParams>,
    Props: 'static,
{
}

/// Internal trait implemented by all routes, used by Plume to render pages.
/// [`plume_macros::route`] implements it automatically for the user.
pub trait FullRoute: InternalRoute + Sync + Send {
    #[doc(hidden)]
    fn render_internal(
        &self,
        ctx: &mut PageContext,
    ) -> Result<RenderResult, Box<dyn std::error::Error>>;
    #[doc(hidden)]
    fn pages_internal(&self, ctx: &mut DynamicRouteContext) -> PagesResults;

    fn get_pages(&self, ctx: &mut DynamicRouteContext) -> PagesResults {
        self.pages_internal(ctx)
    }

    fn build(&self, ctx: &mut PageContext) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        match self.render_internal(ctx)? {
            RenderResult::Err(e) => Err(e),
            RenderResult::Text(html) => Ok(html.into_bytes()),
            RenderResult::Raw(content) => Ok(content),
        }
    }
}

// This function and the one below are performance-sensitive, as they are
// called for every single page during the build.
pub fn build_url_with_params(
    route_template: &str,
    params_def: &[ParameterDef],
    params: &PageParams,
    is_endpoint: bool,
) -> String {
    if params_def.is_empty() {
        return route_template.to_string();
    }

    let mut result = route_template.to_string();

    // Replace back to front so earlier parameter indices stay valid when a
    // replacement is longer or shorter than its placeholder
    for param_def in params_def.iter().rev() {
        let value = params.0.get(&param_def.key).unwrap_or_else(|| {
            panic!(
                "Route {:?} is missing parameter {:?}",
                route_template, param_def.key
            )
        });

        let replacement = value.as_deref().unwrap_or("");
        result.replace_range(
            param_def.index..param_def.index + param_def.length,
            replacement,
        );
    }

    // Collapse consecutive slashes
    let parts: Vec<&str> = result.split('/').filter(|s| !s.is_empty()).collect();
    result = parts.join("/");

    // Ensure leading slash
    if !result.starts_with('/') {
        result.insert(0, '/');
    }

    // Ensure trailing slash for non-endpoints
    if !is_endpoint && !result.ends_with('/') {
        result.push('/');
    }

    result
}

pub fn build_file_path_with_params(
    route_template: &str,
    params_def: &[ParameterDef],
    params: &PageParams,
    output_dir: &Path,
    is_endpoint: bool,
) -> PathBuf {
    let mut route = route_template.to_string();

    for param_def in params_def.iter().rev() {
        let value = params.0.get(&param_def.key).unwrap_or_else(|| {
            panic!(
                "Route {:?} is missing parameter {:?}",
                route_template, param_def.key
            )
        });

        let replacement = value.as_deref().unwrap_or("");
        route.replace_range(
            param_def.index..param_def.index + param_def.length,
            replacement,
        );
    }

    let mut path = PathBuf::from(output_dir);
    path.extend(route.split('/').filter(|s| !s.is_empty()));

    if !is_endpoint {
        path.push("index.html");
    }

    path
}

pub type PagesResult = (PageParams, PageTypedParams, PageProps);
pub type PagesResults = Vec<PagesResult>;

pub type PageProps = Box<dyn Any + Send + Sync>;
pub type PageTypedParams = Box<dyn Any + Send + Sync>;

pub mod prelude {
    //! Re-exports of the most commonly used types and traits for defining
    //! routes.
    //!
    //! This module is meant to be glob imported in your routes files.
    //!
    //! ## Example
    //! ```rust
    //! use plume::route::prelude::*;
    //! ```
    pub use super::{
        DynamicRouteContext, FullRoute, Page, PageContext, PageParams, Pages, RenderResult, Route,
        RouteExt,
    };
    pub use crate::content::{ContentEntry, ContentSource, ContentSources, MarkdownContent};
    pub use plume_macros::{Params, route};
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;
    use std::path::Path;

    struct TestRoute {
        route: String,
    }

    impl InternalRoute for TestRoute {
        fn route_raw(&self) -> Option<String> {
            Some(self.route.clone())
        }
    }

    #[test]
    fn test_url_single_parameter() {
        let page = TestRoute {
            route: "/blog/[slug]".to_string(),
        };

        let mut params = FxHashMap::default();
        params.insert("slug".to_string(), Some("hello-world".to_string()));
        let route_params = PageParams(params);

        assert_eq!(page.url(&route_params), "/blog/hello-world/");
    }

    #[test]
    fn test_url_multiple_parameters_different_lengths() {
        // Parameter replacement must not invalidate the indices of
        // subsequent parameters
        let page = TestRoute {
            route: "/blog/tags/[tag]/[page]".to_string(),
        };

        let mut params = FxHashMap::default();
        params.insert(
            "tag".to_string(),
            Some("development-experience".to_string()),
        );
        params.insert("page".to_string(), Some("1".to_string()));
        let route_params = PageParams(params);

        assert_eq!(
            page.url(&route_params),
            "/blog/tags/development-experience/1/"
        );
    }

    #[test]
    fn test_url_no_parameters() {
        let page = TestRoute {
            route: "/about".to_string(),
        };

        let route_params = PageParams(FxHashMap::default());

        assert_eq!(page.url(&route_params), "/about");
    }

    #[test]
    fn test_url_optional_parameter_none_collapses_slashes() {
        let page = TestRoute {
            route: "/blog/[category]/[slug]".to_string(),
        };

        let mut params = FxHashMap::default();
        params.insert("category".to_string(), None);
        params.insert("slug".to_string(), Some("hello-world".to_string()));
        let route_params = PageParams(params);

        assert_eq!(page.url(&route_params), "/blog/hello-world/");
    }

    #[test]
    fn test_file_path_single_parameter_non_endpoint() {
        let page = TestRoute {
            route: "/blog/[slug]".to_string(),
        };

        let mut params = FxHashMap::default();
        params.insert("slug".to_string(), Some("hello-world".to_string()));
        let route_params = PageParams(params);

        let output_dir = Path::new("/dist");
        let expected = Path::new("/dist/blog/hello-world/index.html");

        assert_eq!(page.file_path(&route_params, output_dir), expected);
    }

    #[test]
    fn test_file_path_root_route() {
        let page = TestRoute {
            route: "/".to_string(),
        };

        let route_params = PageParams(FxHashMap::default());
        let output_dir = Path::new("/dist");
        let expected = Path::new("/dist/index.html");

        assert_eq!(page.file_path(&route_params, output_dir), expected);
    }

    #[test]
    fn test_file_path_endpoint() {
        let page = TestRoute {
            route: "/feed.xml".to_string(),
        };

        let route_params = PageParams(FxHashMap::default());
        let output_dir = Path::new("/dist");
        let expected = Path::new("/dist/feed.xml");

        assert_eq!(page.file_path(&route_params, output_dir), expected);
    }

    #[test]
    fn test_route_type() {
        let static_route = TestRoute {
            route: "/blog/".to_string(),
        };
        let dynamic_route = TestRoute {
            route: "/blog/[slug]".to_string(),
        };

        assert_eq!(static_route.route_type(), RouteType::Static);
        assert_eq!(dynamic_route.route_type(), RouteType::Dynamic);
    }

    #[test]
    #[should_panic(expected = "Route \"/blog/[slug]\" is missing parameter \"slug\"")]
    fn test_url_missing_parameter_panics() {
        let page = TestRoute {
            route: "/blog/[slug]".to_string(),
        };

        let route_params = PageParams(FxHashMap::default());

        page.url(&route_params);
    }
}
