// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(clippy::uninlined_format_args)]

use std::path::Path;

use svgbatch::{Config, Error, Report, Summary};

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn process() -> Result<(), String> {
    let args = match collect_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e.to_string());
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    let dir = std::env::current_dir().map_err(|e| e.to_string())?;

    let mut console = Console {
        perf: args.perf,
        now: None,
    };

    // Conversion constants are not configurable from the command line.
    match svgbatch::run(&dir, Config::default(), &mut console) {
        Ok(_) => Ok(()),
        Err(e @ Error::NoSvgFiles(_)) => Err(format!(
            "{}.\nMake sure to run svgbatch in the same directory as your SVG files",
            e
        )),
        Err(e) => Err(e.to_string()),
    }
}

const HELP: &str = "\
svgbatch converts every SVG file in the current directory into a PNG file.

USAGE:
  svgbatch [OPTIONS]

  cd icons && svgbatch

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version

  --perf                        Prints per-file conversion time
  --quiet                       Disables warnings
";

#[derive(Debug)]
struct CliArgs {
    perf: bool,
    quiet: bool,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    let args = CliArgs {
        perf: input.contains("--perf"),
        quiet: input.contains("--quiet"),
    };

    let rest = input.finish();
    if let Some(arg) = rest.first() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected argument '{}'", arg.to_string_lossy()),
        });
    }

    Ok(args)
}

const SEPARATOR: &str = "------------------------------------------------";

/// Prints batch progress to stdout and failures to stderr.
struct Console {
    perf: bool,
    now: Option<std::time::Instant>,
}

fn file_name(path: &Path) -> std::borrow::Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}

impl Report for Console {
    fn started(&mut self, total: usize, config: &Config) {
        println!("Found {} SVG files.", total);
        println!("Target resolution: {}x{}", config.target_width, config.target_height);
        println!("Using hybrid upscaling (x{} then up)", config.scale_factor);
        println!("{}", SEPARATOR);
    }

    fn converting(&mut self, index: usize, total: usize, input: &Path, output: &Path) {
        println!(
            "[{}/{}] Converting {} → {}...",
            index,
            total,
            file_name(input),
            file_name(output)
        );
        self.now = Some(std::time::Instant::now());
    }

    fn saved(&mut self, _: &Path, _: &Path) {
        println!("   Saved!");
        self.print_elapsed();
    }

    fn failed(&mut self, input: &Path, error: &Error) {
        eprintln!("   Error converting {}: {}.", file_name(input), error);
        self.print_elapsed();
    }

    fn finished(&mut self, summary: &Summary) {
        println!("{}", SEPARATOR);
        println!(
            "Batch complete! {} of {} files converted.",
            summary.converted, summary.total
        );
    }
}

impl Console {
    fn print_elapsed(&mut self) {
        if let (true, Some(now)) = (self.perf, self.now.take()) {
            println!("   {:.2}ms", now.elapsed().as_micros() as f64 / 1000.0);
        }
    }
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
