/// Fit a map image into a bounding box and re-encode it as PNG
///
/// The windows only ever receive PNG, so JPEG, TIFF and BMP maps are
/// normalized here. Nothing is cached: every call decodes from scratch
/// and drops the decoded pixels before returning.
use base64::Engine as _;
use image::{imageops::FilterType, ColorType, DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

use crate::error::DecodeError;
use crate::state::data::{Bitmap, Dimensions, ImageSource};

/// Filter used when scaling maps (same quality as the thumbnail generator)
const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Largest bitmap handed to a window (64 megapixels)
pub const MAX_PIXELS: u64 = 1 << 26;

/// Decode `source`, fit it into `bounding_box` (if any) and encode the result as PNG
///
/// Without a bounding box the image keeps its natural size. A box whose
/// fitted result exceeds `MAX_PIXELS` is rejected with `DecodeError::TooLarge`.
pub fn present(
    source: &ImageSource,
    bounding_box: Option<Dimensions>,
) -> Result<Bitmap, DecodeError> {
    let img = decode(source)?;
    let natural = natural_size(&img);

    let img = match bounding_box {
        Some(bounds) => {
            let target = fit_within(natural, bounds);
            if u64::from(target.width) * u64::from(target.height) > MAX_PIXELS {
                return Err(DecodeError::TooLarge { requested: target });
            }
            if target == natural {
                img
            } else {
                img.resize_exact(target.width, target.height, RESIZE_FILTER)
            }
        }
        None => img,
    };

    let dimensions = natural_size(&img);
    let png = encode_png(img)?;

    log::debug!(
        "presented {} -> {} ({} bytes)",
        natural,
        dimensions,
        png.len()
    );

    Ok(Bitmap { png, dimensions })
}

/// Largest size with the aspect ratio of `natural` that fits in `bounds`
///
/// Each side is rounded to the nearest pixel and never collapses below 1.
pub fn fit_within(natural: Dimensions, bounds: Dimensions) -> Dimensions {
    let scale = f64::min(
        bounds.height as f64 / natural.height as f64,
        bounds.width as f64 / natural.width as f64,
    );
    let side = |natural_side: u32, limit: u32| {
        let scaled = (natural_side as f64 * scale).round() as u32;
        scaled.clamp(1, limit)
    };

    Dimensions {
        width: side(natural.width, bounds.width),
        height: side(natural.height, bounds.height),
    }
}

fn natural_size(img: &DynamicImage) -> Dimensions {
    Dimensions {
        width: img.width().max(1),
        height: img.height().max(1),
    }
}

/// Decode either interpretation of the source
fn decode(source: &ImageSource) -> Result<DynamicImage, DecodeError> {
    match source {
        ImageSource::Path(path) => {
            let reader = ImageReader::open(path)
                .map_err(|source| DecodeError::Read {
                    path: path.clone(),
                    source,
                })?
                .with_guessed_format()
                .map_err(|source| DecodeError::Read {
                    path: path.clone(),
                    source,
                })?;
            Ok(reader.decode()?)
        }
        ImageSource::Encoded(bytes) => match image::load_from_memory(bytes) {
            Ok(img) => Ok(img),
            Err(direct) => {
                // Not an encoded image, maybe base64 text of one
                let text: Vec<u8> = bytes
                    .iter()
                    .copied()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();
                let decoded = base64::engine::general_purpose::STANDARD
                    .decode(text)
                    .map_err(|err| {
                        log::debug!("buffer is not an image ({direct}) nor base64 ({err})");
                        err
                    })?;
                Ok(image::load_from_memory(&decoded)?)
            }
        },
    }
}

fn encode_png(img: DynamicImage) -> Result<Vec<u8>, DecodeError> {
    // PNG has no float pixel formats
    let img = match img.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => img,
    };

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(DecodeError::Encode)?;
    Ok(png)
}
