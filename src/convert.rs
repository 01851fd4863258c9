// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::path::Path;

use image::RgbaImage;
use once_cell::sync::OnceCell;

use crate::usvg::fontdb;
use crate::{tiny_skia, usvg, Config, Error};

/// Converts SVG files into PNG files of a fixed size.
///
/// Rendering happens in two stages. The SVG is rasterized at
/// `Config::stage_size` first and then resampled to `Config::target_size`.
/// When both sizes are the same, the second stage is skipped.
pub struct Converter {
    config: Config,
    system_fonts: OnceCell<fontdb::Database>,
    no_fonts: fontdb::Database,
}

impl Converter {
    /// Creates a new converter.
    ///
    /// Fails when `config` cannot produce an image.
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Converter {
            config,
            system_fonts: OnceCell::new(),
            no_fonts: fontdb::Database::new(),
        })
    }

    /// Returns the conversion options.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Converts one SVG file into a PNG file.
    ///
    /// An existing `output` is overwritten.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<(), Error> {
        let data = std::fs::read(input).map_err(Error::Read)?;

        // Get input file absolute directory.
        let resources_dir = std::fs::canonicalize(input)
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        let tree = self.parse(&data, resources_dir)?;
        let img = self.rasterize(&tree)?;
        save_png(&img, output)
    }

    /// Parses SVG or SVGZ data.
    pub fn parse(
        &self,
        data: &[u8],
        resources_dir: Option<std::path::PathBuf>,
    ) -> Result<usvg::Tree, Error> {
        let data = if data.starts_with(&[0x1f, 0x8b]) {
            std::borrow::Cow::Owned(usvg::decompress_svgz(data)?)
        } else {
            std::borrow::Cow::Borrowed(data)
        };

        let text = std::str::from_utf8(&data).map_err(|_| usvg::Error::NotAnUtf8Str)?;

        let xml_opt = usvg::roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let xml_tree = usvg::roxmltree::Document::parse_with_options(text, xml_opt)
            .map_err(usvg::Error::ParsingFailed)?;

        // fontdb initialization is pretty expensive, so perform it only when needed.
        let has_text_nodes = xml_tree
            .descendants()
            .any(|n| n.has_tag_name(("http://www.w3.org/2000/svg", "text")));

        let fontdb = if has_text_nodes {
            self.system_fonts.get_or_init(load_fonts)
        } else {
            &self.no_fonts
        };

        let mut opt = usvg::Options::default();
        opt.resources_dir = resources_dir;

        let tree = usvg::Tree::from_xmltree(&xml_tree, &opt, fontdb)?;
        Ok(tree)
    }

    /// Renders a tree into an RGBA image of exactly the target size.
    ///
    /// The returned image has a straight (not premultiplied) alpha.
    pub fn rasterize(&self, tree: &usvg::Tree) -> Result<RgbaImage, Error> {
        let target = self.config.target_size().ok_or(Error::CanvasAlloc)?;
        let stage = self.config.stage_size().ok_or(Error::CanvasAlloc)?;

        let pixmap = render_stage(tree, stage, self.config.fit)?;

        let mut img = if stage == target {
            log::debug!("Rendered at {}x{}, no resampling.", stage.width(), stage.height());
            to_image(pixmap)?
        } else {
            log::debug!(
                "Resampling {}x{} to {}x{}.",
                stage.width(),
                stage.height(),
                target.width(),
                target.height()
            );
            let small = to_image(pixmap)?;
            image::imageops::resize(&small, target.width(), target.height(), self.config.filter)
        };

        if img.dimensions() != (target.width(), target.height()) {
            return Err(Error::Resample);
        }

        demultiply_alpha(&mut img);
        Ok(img)
    }
}

/// Rasterizes the whole SVG onto a `size` canvas.
///
/// The produced pixmap has a premultiplied alpha.
pub fn render_stage(
    tree: &usvg::Tree,
    size: tiny_skia::IntSize,
    fit: crate::Fit,
) -> Result<tiny_skia::Pixmap, Error> {
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(Error::CanvasAlloc)?;
    let ts = fit.transform(tree.size(), size);
    resvg::render(tree, ts, &mut pixmap.as_mut());
    Ok(pixmap)
}

// Keeps the premultiplied data as is. Resampling is done in the premultiplied
// space so transparent pixels do not bleed their color into the edges.
fn to_image(pixmap: tiny_skia::Pixmap) -> Result<RgbaImage, Error> {
    let (w, h) = (pixmap.width(), pixmap.height());
    RgbaImage::from_raw(w, h, pixmap.take()).ok_or(Error::Resample)
}

/// Converts premultiplied RGBA pixels into straight RGBA in place.
///
/// Lanczos resampling can overshoot, so color channels are clamped by alpha.
pub fn demultiply_alpha(img: &mut RgbaImage) {
    for p in img.pixels_mut() {
        let a = p[3];
        if a == 0 {
            p.0 = [0, 0, 0, 0];
            continue;
        }

        if a == 255 {
            continue;
        }

        for c in &mut p.0[..3] {
            let v = (*c).min(a) as u32;
            *c = ((v * 255 + a as u32 / 2) / a as u32) as u8;
        }
    }
}

/// Saves an RGBA image as PNG at a provided path.
///
/// A partially written file is removed on failure.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<(), Error> {
    let file = std::fs::File::create(path).map_err(png::EncodingError::from)?;
    let mut w = std::io::BufWriter::new(file);

    let res = (|| -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(&mut w, img.width(), img.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(img.as_raw())?;
        writer.finish()?;

        w.flush()?;
        Ok(())
    })();

    if let Err(e) = res {
        drop(w);
        if let Err(rm) = std::fs::remove_file(path) {
            log::warn!("Failed to remove '{}' cause {}.", path.display(), rm);
        }
        return Err(e.into());
    }

    Ok(())
}

fn load_fonts() -> fontdb::Database {
    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();

    fontdb.set_serif_family("Times New Roman");
    fontdb.set_sans_serif_family("Arial");
    fontdb.set_cursive_family("Comic Sans MS");
    fontdb.set_fantasy_family("Impact");
    fontdb.set_monospace_family("Courier New");

    if fontdb.is_empty() {
        log::warn!("No system fonts found. Text elements will not be rendered.");
    }

    fontdb
}
