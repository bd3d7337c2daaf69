use std::{
    fs,
    io::{self},
    path::{Path, PathBuf},
    time::Instant,
};

use colored::{ColoredString, Colorize};
use log::{info, trace, warn};
use rayon::prelude::*;

use crate::{
    BuildOptions, BuildOutput,
    content::ContentSources,
    logging::{FormatElapsedTimeOptions, format_elapsed_time, print_title},
    permalink::RouteTable,
    route::{DynamicRouteContext, FullRoute, PageContext, PageParams, RouteType},
};

pub mod metadata;
pub mod options;

pub fn execute_build(
    routes: &[&dyn FullRoute],
    content_sources: &mut ContentSources,
    options: &BuildOptions,
) -> Result<BuildOutput, Box<dyn std::error::Error>> {
    let build_start = Instant::now();
    let mut build_metadata = BuildOutput::new(build_start);

    trace!(target: "build", "Setting up required directories...");
    if options.clean_output_dir {
        let _ = fs::remove_dir_all(&options.output_dir);
    }
    fs::create_dir_all(&options.output_dir)?;

    info!(target: "build", "Output directory: {}", options.output_dir.display());

    let content_sources_start = Instant::now();
    print_title("initializing content sources");

    // One route table per build; every discovered entry claims its derived
    // route here, so a collision anywhere in the content tree fails the
    // build instead of silently overwriting a page.
    let mut route_table = RouteTable::new();

    for source in content_sources.sources_mut() {
        let source_start = Instant::now();
        source.init(&mut route_table)?;

        info!(target: "content", "{} initialized in {}", source.get_name(), format_elapsed_time(source_start.elapsed(), &FormatElapsedTimeOptions::default()));
    }

    info!(target: "content", "{}", format!("{} content routes derived in {}", route_table.len(), format_elapsed_time(
        content_sources_start.elapsed(),
        &FormatElapsedTimeOptions::default(),
    )).bold());

    print_title("generating pages");
    let pages_start = Instant::now();

    let route_format_options = FormatElapsedTimeOptions {
        additional_fn: Some(&|msg: ColoredString| {
            let formatted_msg = format!("(+{})", msg);
            if msg.fgcolor().is_none() {
                formatted_msg.dimmed()
            } else {
                formatted_msg.normal()
            }
        }),
        ..Default::default()
    };

    let section_format_options = FormatElapsedTimeOptions {
        sec_red_threshold: 5,
        sec_yellow_threshold: 1,
        millis_red_threshold: None,
        millis_yellow_threshold: None,
        ..Default::default()
    };

    let content_sources = &*content_sources;

    // Parallel processing of routes; every page render is independent
    let (page_count, all_metadata) = routes
        .par_iter()
        .map(|route| match route.route_type() {
            RouteType::Static => {
                let route_start = Instant::now();

                let params = PageParams::default();
                let url = route.url(&params);

                let output = route
                    .build(&mut PageContext::from_static_route(
                        content_sources,
                        &url,
                        &options.base_url,
                    ))
                    .expect("Failed to build static route");

                let file_path = route.file_path(&params, &options.output_dir);

                write_route_file(&output, &file_path).expect("Failed to write route file");

                info!(target: "pages", "{} -> {} {}", url, file_path.to_string_lossy().dimmed(), format_elapsed_time(route_start.elapsed(), &route_format_options));

                let metadata_entry = (
                    route.route_raw().unwrap_or_default(),
                    file_path.to_string_lossy().to_string(),
                    None,
                );

                (1, vec![metadata_entry])
            }
            RouteType::Dynamic => {
                let pages = route.get_pages(&mut DynamicRouteContext {
                    content: content_sources,
                });

                if pages.is_empty() {
                    warn!(target: "build", "{} is a dynamic route, but its implementation of Route::pages returned an empty Vec. No pages will be generated for this route.", route.route_raw().unwrap_or_default().bold());
                    return (0, vec![]);
                }

                info!(target: "build", "{}", route.route_raw().unwrap_or_default().bold());

                let page_results: Vec<_> = pages
                    .par_iter()
                    .map(|page| {
                        let route_start = Instant::now();

                        let url = route.url(&page.0);

                        let output = route
                            .build(&mut PageContext::from_dynamic_route(
                                page,
                                content_sources,
                                &url,
                                &options.base_url,
                            ))
                            .expect("Failed to build dynamic route");

                        let file_path = route.file_path(&page.0, &options.output_dir);

                        write_route_file(&output, &file_path)
                            .expect("Failed to write route file");

                        info!(target: "pages", "├─ {} {}", file_path.to_string_lossy().dimmed(), format_elapsed_time(route_start.elapsed(), &route_format_options));

                        (
                            route.route_raw().unwrap_or_default(),
                            file_path.to_string_lossy().to_string(),
                            Some(page.0.0.clone()),
                        )
                    })
                    .collect();

                (page_results.len(), page_results)
            }
        })
        .fold(
            || (0, Vec::new()),
            |mut acc, item| {
                acc.0 += item.0;
                acc.1.extend(item.1);
                acc
            },
        )
        .reduce(
            || (0, Vec::new()),
            |mut acc, item| {
                acc.0 += item.0;
                acc.1.extend(item.1);
                acc
            },
        );

    for (route_raw, file_path, params) in all_metadata {
        build_metadata.add_page(route_raw, file_path, params);
    }

    for (route, source) in route_table.entries() {
        build_metadata.add_content_route(route.to_string(), source.to_path_buf());
    }

    info!(target: "pages", "{}", format!("generated {} pages in {}", page_count, format_elapsed_time(pages_start.elapsed(), &section_format_options)).bold());

    // Check if static directory exists
    if options.static_dir.exists() {
        let static_start = Instant::now();
        print_title("copying static files");

        // Copy the static directory to the output directory
        copy_recursively(
            &options.static_dir,
            &options.output_dir,
            &mut build_metadata,
        )?;

        info!(target: "build", "{}", format!("Static files copied in {}", format_elapsed_time(static_start.elapsed(), &FormatElapsedTimeOptions::default())).bold());
    }

    info!(target: "SKIP_FORMAT", "{}", "");
    info!(target: "build", "{}", format!("Build completed in {}", format_elapsed_time(build_start.elapsed(), &section_format_options)).bold());

    Ok(build_metadata)
}

fn copy_recursively(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    build_metadata: &mut BuildOutput,
) -> io::Result<()> {
    fs::create_dir_all(&destination)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let filetype = entry.file_type()?;
        if filetype.is_dir() {
            copy_recursively(
                entry.path(),
                destination.as_ref().join(entry.file_name()),
                build_metadata,
            )?;
        } else {
            fs::copy(entry.path(), destination.as_ref().join(entry.file_name()))?;

            build_metadata.add_static_file(
                destination
                    .as_ref()
                    .join(entry.file_name())
                    .to_string_lossy()
                    .to_string(),
                entry.path().to_string_lossy().to_string(),
            );
        }
    }
    Ok(())
}

fn write_route_file(content: &[u8], file_path: &PathBuf) -> Result<(), io::Error> {
    // Create the parent directories if it doesn't exist
    if let Some(parent_dir) = file_path.parent() {
        fs::create_dir_all(parent_dir)?
    }

    fs::write(file_path, content)?;

    Ok(())
}
