use std::{path::PathBuf, process::Termination, time::Instant};

use rustc_hash::FxHashMap;

/// Metadata returned by [`publish()`](crate::publish) for a single page after
/// a successful build.
#[derive(Debug)]
pub struct PageOutput {
    pub route: String,
    pub file_path: String,
    pub params: Option<FxHashMap<String, Option<String>>>,
}

/// Metadata returned by [`publish()`](crate::publish) for a single static
/// file after a successful build.
///
/// A static file is copied to the output directory without any processing.
#[derive(Debug)]
pub struct StaticFileOutput {
    pub file_path: String,
    pub original_path: String,
}

/// One entry of the content route table: a derived route and the source
/// document that claimed it.
#[derive(Debug)]
pub struct ContentRouteOutput {
    pub route: String,
    pub source_path: PathBuf,
}

/// Metadata returned by [`publish()`](crate::publish) after a successful
/// build.
#[derive(Debug)]
pub struct BuildOutput {
    pub start_time: Instant,
    pub pages: Vec<PageOutput>,
    pub static_files: Vec<StaticFileOutput>,
    /// The route table derived from content during this build.
    pub content_routes: Vec<ContentRouteOutput>,
}

impl BuildOutput {
    pub fn new(start_time: Instant) -> Self {
        Self {
            start_time,
            pages: Vec::new(),
            static_files: Vec::new(),
            content_routes: Vec::new(),
        }
    }

    pub(crate) fn add_page(
        &mut self,
        route: String,
        file_path: String,
        params: Option<FxHashMap<String, Option<String>>>,
    ) {
        self.pages.push(PageOutput {
            route,
            file_path,
            params,
        });
    }

    pub(crate) fn add_static_file(&mut self, file_path: String, original_path: String) {
        self.static_files.push(StaticFileOutput {
            file_path,
            original_path,
        });
    }

    pub(crate) fn add_content_route(&mut self, route: String, source_path: PathBuf) {
        self.content_routes.push(ContentRouteOutput { route, source_path });
    }
}

impl Default for BuildOutput {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Termination for BuildOutput {
    fn report(self) -> std::process::ExitCode {
        0.into()
    }
}
