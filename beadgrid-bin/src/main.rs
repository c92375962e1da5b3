//! Generate a bead weaving pattern and its color legend from an image.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc
)]

mod cli;
mod export;
mod font;
mod render;

use cli::Options;

use std::{
    fmt::{self, Display},
    path::Path,
    process::ExitCode,
    time::Instant,
};

use beadgrid::{Pattern, ValidationError};
use clap::Parser;
use image::RgbaImage;

/// Record the running time of a function and print the elapsed time
macro_rules! time {
    ($name: literal, $verbose: expr, $func_call: expr) => {{
        let start = Instant::now();
        let result = $func_call;
        if $verbose {
            println!("{} took {}ms", $name, start.elapsed().as_millis());
        }
        result
    }};
}

/// Error cases for loading an image, generating its pattern, and saving the result
#[derive(Debug)]
enum CliError {
    /// Failed to read or decode the image file
    ImageLoad(image::ImageError),
    /// The image or options cannot make a pattern
    Validation(ValidationError),
    /// Failed to encode or write the PNG file
    Export(image::ImageError),
    /// Failed to create the thread pool
    #[cfg(feature = "threads")]
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::ImageLoad(e) => write!(f, "Failed to load the image file: {e}"),
            CliError::Validation(e) => write!(f, "Cannot generate a pattern: {e}"),
            CliError::Export(e) => write!(f, "Failed to save the pattern image: {e}"),
            #[cfg(feature = "threads")]
            CliError::ThreadPool(e) => write!(f, "Failed to start the thread pool: {e}"),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        CliError::Validation(e)
    }
}

/// Prints library log records to stderr, used with --verbose
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// The logger installed by --verbose
static LOGGER: StderrLogger = StderrLogger;

fn main() -> ExitCode {
    let options = Options::parse();

    if options.verbose && log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }

    if options.no_color {
        colored::control::set_override(false);
    }

    let result = run_generate_and_print_pattern(&options);

    // Returning Result<_> uses Debug printing instead of Display
    if let Err(e) = result {
        eprintln!("{e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Builds a thread pool and then runs `generate_and_print_pattern`
#[cfg(feature = "threads")]
fn run_generate_and_print_pattern(options: &Options) -> Result<(), CliError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(usize::from(options.threads))
        .build()
        .map_err(CliError::ThreadPool)?;

    pool.install(|| generate_and_print_pattern(options))
}

/// Runs `generate_and_print_pattern` on a single thread
#[cfg(not(feature = "threads"))]
fn run_generate_and_print_pattern(options: &Options) -> Result<(), CliError> {
    generate_and_print_pattern(options)
}

/// Load an image, generate its pattern, and print or save the result using the given options
fn generate_and_print_pattern(options: &Options) -> Result<(), CliError> {
    // Input
    let image = time!("Image loading", options.verbose, load_image(&options.image))?;

    // Processing
    let pattern = time!(
        "Pattern generation",
        options.verbose,
        generate_pattern(&image, options)
    )?;

    if options.verbose {
        let kmeans = &pattern.kmeans;
        println!(
            "Pattern is {}x{} beads with {} distinct colors",
            pattern.grid.width(),
            pattern.grid.height(),
            pattern.legend.len()
        );
        if kmeans.converged {
            println!("k-means converged after {} iterations", kmeans.iterations);
        } else {
            println!(
                "k-means did not converge within {} iterations",
                kmeans.iterations
            );
        }
    }

    // Output
    render::print_pattern(&pattern, options.style, !options.no_grid, !options.no_color);

    if let Some(path) = &options.output {
        time!(
            "PNG export",
            options.verbose,
            export::save_png(&pattern, options.style, options.bead_size, path)
        )
        .map_err(CliError::Export)?;
    }

    Ok(())
}

/// Load the image at the given path as RGBA pixels
fn load_image(path: &Path) -> Result<RgbaImage, CliError> {
    image::open(path)
        .map(image::DynamicImage::into_rgba8)
        .map_err(CliError::ImageLoad)
}

/// Generate a pattern from the given image and options
fn generate_pattern(image: &RgbaImage, options: &Options) -> Result<Pattern, CliError> {
    let Options {
        beads,
        colors,
        max_iter,
        seed,
        verbose,
        ..
    } = *options;

    if verbose {
        println!(
            "Reducing {}x{} image to {beads} beads per row",
            image.width(),
            image.height()
        );
    }

    Ok(beadgrid::generate(image, beads, colors, max_iter, seed)?)
}
