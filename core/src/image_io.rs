//! Image I/O

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;
use exr::prelude as exrs;
use exr::prelude::*;
use image::*;
use std::path::Path;
use std::result::Result;

/// Stores RGB image data in row-major order, top row first.
#[derive(Clone, Debug)]
pub struct RGBImage {
    /// The pixels.
    pub pixels: Vec<RGBSpectrum>,

    /// Image resolution.
    pub resolution: Point2<usize>,
}

impl RGBImage {
    /// Creates a new `RGBImage` from pixel data.
    ///
    /// * `pixels` - RGB pixel data.
    /// * `width`  - Width of image.
    /// * `height` - Height of image.
    pub fn new(pixels: Vec<RGBSpectrum>, width: usize, height: usize) -> Self {
        assert_eq!(width * height, pixels.len());
        Self {
            pixels,
            resolution: Point2::new(width, height),
        }
    }
}

/// Read an image. 8-bit formats are converted from sRGB to linear values when
/// `gamma` is set; OpenEXR data is always linear.
///
/// * `path`  - Input file path.
/// * `gamma` - Indicates whether 8-bit texels are gamma encoded.
pub fn read_image(path: &str, gamma: bool) -> Result<RGBImage, String> {
    match get_extension_from_filename(path).as_deref() {
        Some("exr") => read_exr(path),
        Some(_extension) => read_8_bit(path, gamma),
        None => Err(format!("Can't determine file type from suffix of filename {path}.")),
    }
}

/// Read a single layer OpenEXR file.
///
/// * `path` - Input file path.
fn read_exr(path: &str) -> Result<RGBImage, String> {
    let reader = exrs::read()
        .no_deep_data()
        .largest_resolution_level()
        .rgba_channels(
            |resolution, _channels| {
                let width = resolution.width();
                let height = resolution.height();
                RGBImage {
                    pixels: vec![RGBSpectrum::default(); width * height],
                    resolution: Point2::new(width, height),
                }
            },
            |img, position, (r, g, b, _a): (f32, f32, f32, f32)| {
                let offset = position.y() * img.resolution.x + position.x();
                img.pixels[offset] = RGBSpectrum::from_rgb(&[r, g, b]);
            },
        )
        .first_valid_layer()
        .all_attributes();

    match reader.from_file(path) {
        Ok(image) => {
            let pixels = image.layer_data.channel_data.pixels;
            info!(
                "Read EXR image {path} ({} x {})",
                pixels.resolution.x, pixels.resolution.y,
            );
            Ok(pixels)
        }
        Err(err) => Err(format!("Error reading EXR image {path}: {err}")),
    }
}

/// Read an 8-bit image format.
///
/// * `path`  - Input file path.
/// * `gamma` - Indicates whether texels are gamma encoded.
fn read_8_bit(path: &str, gamma: bool) -> Result<RGBImage, String> {
    // Read image and convert to RGB.
    let img: RgbImage = match open(path) {
        Ok(i) => i.into_rgb8(),
        Err(err) => return Err(format!("Error reading image {path}: {err}")),
    };

    let width = img.width() as usize;
    let height = img.height() as usize;

    let decode = |v: u8| {
        let v = v as Float / 255.0;
        if gamma {
            inv_gamma_correct(v)
        } else {
            v
        }
    };
    let pixels: Vec<RGBSpectrum> = img
        .pixels()
        .map(|rgb_u8| RGBSpectrum::from_rgb(&[decode(rgb_u8[0]), decode(rgb_u8[1]), decode(rgb_u8[2])]))
        .collect();

    info!("Read 8-bit image {path} ({width} x {height})");

    Ok(RGBImage::new(pixels, width, height))
}

/// Write an image to given path. The format is chosen by extension.
///
/// * `path`   - Output file path.
/// * `rgb`    - Floating point RGB pixel data, 3 values per pixel.
/// * `width`  - Width of image.
/// * `height` - Height of image.
pub fn write_image(path: &str, rgb: &[Float], width: usize, height: usize) -> Result<(), String> {
    if rgb.len() != 3 * width * height {
        return Err(format!(
            "Image {path} has {} values; expected {} for {width}x{height}",
            rgb.len(),
            3 * width * height
        ));
    }

    let res_x = width as u32;
    let res_y = height as u32;
    match get_extension_from_filename(path).as_deref() {
        Some("exr") => write_exr(path, rgb, res_x, res_y),
        Some("tga") => write_8_bit(path, rgb, res_x, res_y, ImageFormat::Tga),
        Some("png") => write_8_bit(path, rgb, res_x, res_y, ImageFormat::Png),
        Some(extension) => Err(format!("Extension {extension} is not supported")),
        None => Err(format!("Can't determine file type from suffix of filename {path}")),
    }
}

/// Retrieve the lower-cased extension from a file path.
///
/// * `path` - The file path.
pub fn get_extension_from_filename(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Writes the image in OpenEXR format.
///
/// * `path`  - Output file path.
/// * `rgb`   - Floating point RGB pixel data.
/// * `res_x` - X resolution.
/// * `res_y` - Y resolution.
fn write_exr(path: &str, rgb: &[Float], res_x: u32, res_y: u32) -> Result<(), String> {
    info!("Writing image {} with resolution {}x{}", path, res_x, res_y);

    let size = Vec2(res_x as usize, res_y as usize);

    let layer1 = Layer::new(
        size,
        LayerAttributes::named("lobe"),
        Encoding::SMALL_LOSSLESS,
        SpecificChannels::rgb(|pos: Vec2<usize>| {
            let offset = 3 * (pos.1 * (res_x as usize) + pos.0);
            (rgb[offset], rgb[offset + 1], rgb[offset + 2])
        }),
    );

    let attributes = ImageAttributes::new(IntegerBounds::from_dimensions(size));
    match Image::empty(attributes).with_layer(layer1).write().to_file(path) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}")),
    }
}

/// Writes the image in an 8-bit image format.
///
/// * `path`         - Output file path.
/// * `rgb`          - Floating point RGB pixel data.
/// * `res_x`        - X resolution.
/// * `res_y`        - Y resolution.
/// * `image_format` - Image format.
fn write_8_bit(path: &str, rgb: &[Float], res_x: u32, res_y: u32, image_format: ImageFormat) -> Result<(), String> {
    info!("Writing image {path} with resolution {res_x}x{res_y}");

    let mut imgbuf = ImageBuffer::new(res_x, res_y);
    let mut offset = 0;
    for y in 0..res_y {
        for x in 0..res_x {
            // 8-bit format; apply gamma and clamp.
            let rgb = apply_gamma(&[rgb[offset], rgb[offset + 1], rgb[offset + 2]]);
            imgbuf.put_pixel(x, y, Rgb(rgb));
            offset += 3;
        }
    }

    match imgbuf.save_with_format(path, image_format) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}.")),
    }
}

/// Apply gamma correction to a RGB floating point pixel and return the clamped 8-bit values.
///
/// * `rgb` - RGB floating point pixel value.
#[inline]
fn apply_gamma(rgb: &[Float; 3]) -> [u8; 3] {
    [clamp_byte(rgb[0]), clamp_byte(rgb[1]), clamp_byte(rgb[2])]
}

/// Clamp floating point value to 8-bit range [0, 255].
///
/// * `v` - Value to clamp.
#[inline]
fn clamp_byte(v: Float) -> u8 {
    clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8
}
