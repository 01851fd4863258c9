// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use crate::Error;

/// Checks that the path has an `svg` extension, ignoring case.
pub fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// Returns the PNG path for an input: `dir/name.svg` -> `dir/name.png`.
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension("png")
}

/// Lists `.svg` files in `dir`, without recursion.
///
/// The result is sorted by file name.
/// Returns `Error::NoSvgFiles` when nothing matches.
pub fn find_svg_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(Error::ReadDir)? {
        let entry = entry.map_err(Error::ReadDir)?;
        let path = entry.path();
        if !is_svg(&path) {
            continue;
        }

        // Follows symlinks, so a linked SVG is still picked up.
        if !path.is_file() {
            log::debug!("Skipping '{}' since it's not a file.", path.display());
            continue;
        }

        files.push(path);
    }

    if files.is_empty() {
        return Err(Error::NoSvgFiles(dir.to_path_buf()));
    }

    files.sort();
    Ok(files)
}
