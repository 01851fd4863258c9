// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use crate::usvg;

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// The scanned directory has no `.svg` files.
    ///
    /// This is the only error kind that stops a batch before it starts.
    NoSvgFiles(PathBuf),

    /// Failed to list the scanned directory.
    ReadDir(std::io::Error),

    /// `Config` has values that cannot produce an image.
    InvalidConfig(&'static str),

    /// Failed to read an input file.
    Read(std::io::Error),

    /// Failed to parse an SVG data.
    Parse(usvg::Error),

    /// Failed to allocate a canvas of the requested size.
    ///
    /// Occurs when a side is zero, or when it's too big for the available memory.
    CanvasAlloc,

    /// The resampled buffer does not match the requested size.
    Resample,

    /// Failed to encode or write the PNG output.
    Encode(png::EncodingError),
}

impl From<usvg::Error> for Error {
    fn from(e: usvg::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<png::EncodingError> for Error {
    fn from(e: png::EncodingError) -> Self {
        Error::Encode(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NoSvgFiles(ref dir) => {
                write!(f, "no SVG files found in '{}'", dir.display())
            }
            Error::ReadDir(ref e) => {
                write!(f, "failed to read the directory cause {}", e)
            }
            Error::InvalidConfig(msg) => {
                write!(f, "invalid configuration: {}", msg)
            }
            Error::Read(ref e) => {
                write!(f, "failed to read the file cause {}", e)
            }
            Error::Parse(ref e) => {
                write!(f, "{}", e)
            }
            Error::CanvasAlloc => {
                write!(f, "target canvas cannot be allocated")
            }
            Error::Resample => {
                write!(f, "resampled image has an unexpected size")
            }
            Error::Encode(ref e) => {
                write!(f, "failed to save PNG cause {}", e)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::ReadDir(ref e) | Error::Read(ref e) => Some(e),
            Error::Parse(ref e) => Some(e),
            Error::Encode(ref e) => Some(e),
            Error::NoSvgFiles(_)
            | Error::InvalidConfig(_)
            | Error::CanvasAlloc
            | Error::Resample => None,
        }
    }
}
