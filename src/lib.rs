// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgbatch` converts a directory of SVG files into fixed-resolution PNG files.

Each file is rendered by [resvg](https://github.com/RazrFalcon/resvg) at a
reduced size first and then resampled up to the target size. With a scale
factor of `1.0` the file is rendered directly at the target size.

```no_run
let summary = svgbatch::run(
    std::path::Path::new("."),
    svgbatch::Config::default(),
    &mut svgbatch::Quiet,
)
.unwrap();
println!("{}/{}", summary.converted, summary.total);
```
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::uninlined_format_args)]

pub use resvg::tiny_skia;
pub use resvg::usvg;

mod batch;
mod convert;
mod discover;
mod error;
mod options;

pub use crate::batch::{run, run_files, Report, Summary};
pub use crate::convert::{demultiply_alpha, render_stage, save_png, Converter};
pub use crate::discover::{find_svg_files, is_svg, output_path};
pub use crate::error::Error;
pub use crate::options::{Config, Fit, SCALE_FACTOR, TARGET_HEIGHT, TARGET_WIDTH};

/// A `Report` that ignores everything.
pub struct Quiet;

impl Report for Quiet {
    fn started(&mut self, _: usize, _: &Config) {}
    fn converting(&mut self, _: usize, _: usize, _: &std::path::Path, _: &std::path::Path) {}
    fn saved(&mut self, _: &std::path::Path, _: &std::path::Path) {}
    fn failed(&mut self, _: &std::path::Path, _: &Error) {}
    fn finished(&mut self, _: &Summary) {}
}
