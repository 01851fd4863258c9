// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::{discover, Config, Converter, Error};

/// Receives batch progress.
///
/// Per-file calls come in the `converting` -> `saved` | `failed` order.
/// With `Config::jobs > 1` calls for different files may interleave.
pub trait Report {
    /// Called once, after discovery and before the first conversion.
    fn started(&mut self, total: usize, config: &Config);

    /// Called before a file conversion. `index` starts at 1.
    fn converting(&mut self, index: usize, total: usize, input: &Path, output: &Path);

    /// Called after a file was converted.
    fn saved(&mut self, input: &Path, output: &Path);

    /// Called after a file conversion failed.
    fn failed(&mut self, input: &Path, error: &Error);

    /// Called once, after every file was attempted.
    fn finished(&mut self, summary: &Summary);
}

/// A batch outcome.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Summary {
    /// Number of discovered SVG files.
    pub total: usize,
    /// Number of written PNG files.
    pub converted: usize,
    /// Inputs that failed to convert, in the reporting order.
    pub failed: Vec<PathBuf>,
}

/// Converts every SVG file in `dir` into a PNG file next to it.
///
/// A failed file is reported and skipped. Only discovery errors and an
/// invalid `config` abort the run, in which case `report` is never called.
pub fn run<R: Report + Send>(dir: &Path, config: Config, report: &mut R) -> Result<Summary, Error> {
    let converter = Converter::new(config)?;
    let files = discover::find_svg_files(dir)?;
    Ok(run_files(&converter, &files, report))
}

/// Converts `files` with a single converter.
pub fn run_files<R: Report + Send>(converter: &Converter, files: &[PathBuf], report: &mut R) -> Summary {
    let total = files.len();
    report.started(total, converter.config());

    let jobs = converter.config().jobs.clamp(1, total.max(1));
    let summary = if jobs == 1 {
        run_sequential(converter, files, report)
    } else {
        run_parallel(converter, files, jobs, report)
    };

    report.finished(&summary);
    summary
}

fn run_sequential<R: Report>(converter: &Converter, files: &[PathBuf], report: &mut R) -> Summary {
    let total = files.len();
    let mut summary = Summary { total, ..Summary::default() };

    for (i, input) in files.iter().enumerate() {
        let output = discover::output_path(input);
        report.converting(i + 1, total, input, &output);

        match converter.convert(input, &output) {
            Ok(()) => {
                summary.converted += 1;
                report.saved(input, &output);
            }
            Err(e) => {
                summary.failed.push(input.clone());
                report.failed(input, &e);
            }
        }
    }

    summary
}

fn run_parallel<R: Report + Send>(
    converter: &Converter,
    files: &[PathBuf],
    jobs: usize,
    report: &mut R,
) -> Summary {
    let total = files.len();
    let next = AtomicUsize::new(0);
    let state = Mutex::new((Summary { total, ..Summary::default() }, report));

    std::thread::scope(|s| {
        for _ in 0..jobs {
            s.spawn(|| loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                let input = match files.get(i) {
                    Some(v) => v,
                    None => break,
                };

                let output = discover::output_path(input);
                lock(&state).1.converting(i + 1, total, input, &output);

                let res = converter.convert(input, &output);

                let mut guard = lock(&state);
                let (summary, report) = &mut *guard;
                match res {
                    Ok(()) => {
                        summary.converted += 1;
                        report.saved(input, &output);
                    }
                    Err(e) => {
                        summary.failed.push(input.clone());
                        report.failed(input, &e);
                    }
                }
            });
        }
    });

    match state.into_inner() {
        Ok((summary, _)) => summary,
        Err(poisoned) => poisoned.into_inner().0,
    }
}

// A panicking reporter must not hide the results of other workers.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match m.lock() {
        Ok(v) => v,
        Err(poisoned) => poisoned.into_inner(),
    }
}
