use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use canvas::{Canvas, PixelStore};
pub use cli::{CLIParser, LineSegment};
use color::Rgba;
use error::Error;
use image::{
    bmp::{BmpImageReader, BmpImageWriter},
    ImageReader, ImageWriter, PixelCoord,
};
use tool::{ImagePosition, ToolKind};

pub mod binary_stream;
pub mod canvas;
mod cli;
pub mod color;
pub mod error;
pub mod image;
mod logger;
pub mod raster;
pub mod tool;

pub type Result<T> = std::result::Result<T, error::Error>;

/// Side length of a canvas created without an input file.
pub const DEFAULT_CANVAS_SIZE: u32 = 32;

pub struct Arguments {
    output_file: PathBuf,
    input_file: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    color: Rgba,
    dots: Vec<PixelCoord>,
    lines: Vec<LineSegment>,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.to_string_lossy().into_owned(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.to_string_lossy().into_owned(), e)
        })
}

pub fn load_canvas(file_path: &Path) -> Result<Canvas> {
    let input_file = open_input_file(file_path)?;
    let mut reader = BmpImageReader::new(BufReader::new(input_file));
    let image = reader.read_image()?;
    log::info!(
        "Loaded {}x{} image from '{}'",
        image.width(),
        image.height(),
        file_path.display()
    );
    Canvas::from_image(&image)
}

pub fn save_canvas(canvas: &Canvas, file_path: &Path) -> Result<()> {
    let output_file = open_output_file(file_path)?;
    let image = canvas.to_image();
    let mut writer = BmpImageWriter::new(BufWriter::new(output_file), &image);
    writer.write_image()?;
    log::info!(
        "Saved {}x{} image to '{}'",
        image.width(),
        image.height(),
        file_path.display()
    );
    Ok(())
}

/// Position of the center of a pixel.
fn center_of(pixel: PixelCoord) -> ImagePosition {
    ImagePosition::new(pixel.x as f64 + 0.5, pixel.y as f64 + 0.5)
}

fn prepare_canvas(arguments: &Arguments) -> Result<Canvas> {
    match &arguments.input_file {
        Some(input_file) => {
            let mut canvas = load_canvas(input_file)?;
            let width = arguments.width.unwrap_or(canvas.width());
            let height = arguments.height.unwrap_or(canvas.height());
            canvas.resize(width, height);
            Ok(canvas)
        }
        None => Ok(Canvas::new(
            arguments.width.unwrap_or(DEFAULT_CANVAS_SIZE),
            arguments.height.unwrap_or(DEFAULT_CANVAS_SIZE),
        )),
    }
}

/// One press at `from` followed by one release at `to`.
fn apply_stroke(
    canvas: &mut Canvas,
    kind: ToolKind,
    from: PixelCoord,
    to: PixelCoord,
    color: Rgba,
) -> Result<()> {
    let mut tool = kind.create();
    tool.press(canvas, center_of(from), color)?;
    tool.release(canvas, center_of(to), color)
}

fn apply_tools(canvas: &mut Canvas, arguments: &Arguments) -> Result<()> {
    for dot in &arguments.dots {
        apply_stroke(canvas, ToolKind::Dot, *dot, *dot, arguments.color)?;
    }
    for line in &arguments.lines {
        apply_stroke(canvas, ToolKind::Line, line.start, line.end, arguments.color)?;
    }
    log::info!(
        "Painted {} dots and {} lines in {}",
        arguments.dots.len(),
        arguments.lines.len(),
        arguments.color
    );
    Ok(())
}

pub fn paint_canvas(arguments: &Arguments) -> Result<()> {
    let mut canvas = prepare_canvas(arguments)?;
    apply_tools(&mut canvas, arguments)?;
    save_canvas(&canvas, &arguments.output_file)
}
