use std::path::{Path, PathBuf};

use rgb::{FromSlice, RGBA8};
use svgbatch::{Config, Error, Report, Summary};

mod cli;

const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 20 20">
    <rect width="20" height="20" fill="#ff0000"/>
</svg>"##;

const GREEN_CIRCLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="9">
    <rect width="16" height="9" fill="#ffffff"/>
    <circle cx="8" cy="4.5" r="3" fill="#00ff00"/>
</svg>"##;

const MALFORMED: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect"##;

pub fn config(w: u32, h: u32, scale_factor: f32) -> Config {
    Config {
        target_width: w,
        target_height: h,
        scale_factor,
        ..Config::default()
    }
}

pub fn write(dir: &Path, name: &str, data: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

pub fn list(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub struct Png {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Png {
    pub fn pixel(&self, x: u32, y: u32) -> RGBA8 {
        self.data.as_rgba()[(y * self.width + x) as usize]
    }
}

pub fn load_png(path: &Path) -> Png {
    let data = std::fs::read(path).unwrap();
    let decoder = png::Decoder::new(data.as_slice());
    let mut reader = decoder.read_info().unwrap();
    let mut img_data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut img_data).unwrap();
    assert_eq!(info.color_type, png::ColorType::Rgba);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    img_data.truncate(info.buffer_size());

    Png {
        width: info.width,
        height: info.height,
        data: img_data,
    }
}

pub fn is_pix_diff(c1: RGBA8, c2: RGBA8) -> bool {
    (c1.r as i32 - c2.r as i32).abs() > 1
        || (c1.g as i32 - c2.g as i32).abs() > 1
        || (c1.b as i32 - c2.b as i32).abs() > 1
        || (c1.a as i32 - c2.a as i32).abs() > 1
}

/// Records every report call as a line.
#[derive(Default)]
pub struct Recorder {
    pub lines: Vec<String>,
}

fn name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

impl Report for Recorder {
    fn started(&mut self, total: usize, config: &Config) {
        self.lines.push(format!(
            "started {} {}x{}",
            total, config.target_width, config.target_height
        ));
    }

    fn converting(&mut self, index: usize, total: usize, input: &Path, output: &Path) {
        self.lines.push(format!(
            "[{}/{}] {} -> {}",
            index,
            total,
            name(input),
            name(output)
        ));
    }

    fn saved(&mut self, input: &Path, _: &Path) {
        self.lines.push(format!("saved {}", name(input)));
    }

    fn failed(&mut self, input: &Path, error: &Error) {
        self.lines.push(format!("failed {}: {}", name(input), error));
    }

    fn finished(&mut self, summary: &Summary) {
        self.lines.push(format!("finished {}/{}", summary.converted, summary.total));
    }
}

impl Recorder {
    pub fn count(&self, prefix: &str) -> usize {
        self.lines.iter().filter(|l| l.starts_with(prefix)).count()
    }
}
