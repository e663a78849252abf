//! # Image to Raster Conversion
//!
//! Turns grayscale label images into a complete Brother QL print job.
//!
//! ## Pipeline (per image)
//!
//! ```text
//! rotate → check size against label → (600 dpi: halve width)
//!   → place in device-wide line at offset → black/white → mirror → pack
//! ```
//!
//! The offset puts the printable area against the right margin of the
//! print head:
//!
//! ```text
//! offset = pixel_width - printable_width - right_margin
//! QL-800, 29x90:  720 - 306 - 6 = 408
//! ```
//!
//! Rows are mirrored because the head's first dot is on the right when
//! looking at the label face up.

use image::{GrayImage, Luma};
use image::imageops::{self, FilterType};

use crate::error::ConvertError;
use crate::printer::labels::{self, FormFactor, Label};
use crate::printer::models::Model;
use crate::protocol::commands::{self, MEDIA_DIE_CUT, MEDIA_ENDLESS, PrintInfo};
use crate::render::dither::{self, Binarization};

/// Rotation applied before anything else. Angles are clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Rotate 90 degrees only when that makes the image fit the label.
    Auto,
    None,
    Cw90,
    Cw180,
    Cw270,
}

/// Conversion parameters.
///
/// The defaults are the name tag settings: 29x90 die-cut, rotated 90
/// degrees, 70% threshold, cut after printing.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub label: String,
    pub rotate: Rotation,
    /// Darkness percentage (0-100) at which a pixel prints.
    pub threshold: f32,
    /// Ordered dithering instead of a hard threshold.
    pub dither: bool,
    /// PackBits-compress raster lines.
    pub compress: bool,
    pub dpi_600: bool,
    pub hq: bool,
    pub cut: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            label: "29x90".to_string(),
            rotate: Rotation::Cw90,
            threshold: 70.0,
            dither: false,
            compress: false,
            dpi_600: false,
            hq: true,
            cut: true,
        }
    }
}

/// Build the print job for `images`, one page each.
pub fn convert(
    model: &Model,
    images: &[GrayImage],
    options: &ConvertOptions,
) -> Result<Vec<u8>, ConvertError> {
    let label = labels::by_name(&options.label)
        .ok_or_else(|| ConvertError::UnknownLabel(options.label.clone()))?;
    validate(model, options)?;

    let binarization = if options.dither {
        Binarization::Ordered
    } else {
        Binarization::Threshold(dither::threshold_level(options.threshold))
    };

    let mut data = Vec::new();
    data.extend(commands::invalidate(model.invalidate_bytes));
    data.extend(commands::initialize());
    data.extend(commands::status_request());

    for (page, image) in images.iter().enumerate() {
        let prepared = prepare_image(model, label, image, options)?;

        if model.mode_setting {
            data.extend(commands::switch_to_raster());
        }

        data.extend(commands::print_information(&print_info(
            label,
            prepared.height(),
            options.hq,
            page == 0,
        )));

        if model.cutting && options.cut {
            data.extend(commands::auto_cut(true));
            data.extend(commands::cut_every(1));
        }
        if model.expanded_mode {
            data.extend(commands::expanded_mode(options.cut, options.dpi_600));
        }
        data.extend(commands::margins(label.feed_margin));
        if model.compression {
            data.extend(commands::compression(options.compress));
        }

        for row in raster_rows(&prepared, binarization) {
            data.extend(commands::raster_line(&row, options.compress));
        }

        data.extend(commands::print_page(page + 1 == images.len()));
    }

    log::debug!(
        "Converted {} page(s) for {} on {} into {} bytes",
        images.len(),
        model.name,
        label.name,
        data.len()
    );

    Ok(data)
}

fn validate(model: &Model, options: &ConvertOptions) -> Result<(), ConvertError> {
    let unsupported = |option: &str| ConvertError::Unsupported {
        model: model.name.to_string(),
        option: option.to_string(),
    };

    if options.compress && !model.compression {
        return Err(unsupported("raster compression"));
    }
    if !(0.0..=100.0).contains(&options.threshold) {
        return Err(ConvertError::Invalid(format!(
            "threshold {} is outside 0-100",
            options.threshold
        )));
    }
    Ok(())
}

fn print_info(label: &Label, raster_lines: u32, high_quality: bool, first_page: bool) -> PrintInfo {
    let (width, length) = label.tape_size;
    let media_type = match label.form_factor {
        FormFactor::DieCut => MEDIA_DIE_CUT,
        FormFactor::Endless => MEDIA_ENDLESS,
    };
    PrintInfo {
        media_type: Some(media_type),
        media_width: Some(width),
        media_length: Some(length),
        raster_lines,
        high_quality,
        first_page,
    }
}

/// Rotate, size-check and place an image on a full-width white line.
fn prepare_image(
    model: &Model,
    label: &Label,
    image: &GrayImage,
    options: &ConvertOptions,
) -> Result<GrayImage, ConvertError> {
    let rotated = rotate(image, options.rotate, label);
    let (printable_width, printable_length) = label.printable;

    let mut fitted = match label.form_factor {
        FormFactor::DieCut => {
            if rotated.dimensions() != label.printable {
                return Err(ConvertError::Dimensions {
                    width: rotated.width(),
                    height: rotated.height(),
                    expected: format!("{}x{} for label {}", printable_width, printable_length, label.name),
                });
            }
            rotated
        }
        FormFactor::Endless => {
            if rotated.width() == printable_width {
                rotated
            } else {
                let height = (rotated.height() as u64 * printable_width as u64
                    / rotated.width().max(1) as u64) as u32;
                log::warn!(
                    "Resizing {}x{} image to {}x{} for label {}",
                    rotated.width(),
                    rotated.height(),
                    printable_width,
                    height,
                    label.name
                );
                imageops::resize(&rotated, printable_width, height.max(1), FilterType::Lanczos3)
            }
        }
    };

    if options.dpi_600 {
        let half = (fitted.width() / 2).max(1);
        fitted = imageops::resize(&fitted, half, fitted.height(), FilterType::Triangle);
    }

    let offset = model
        .pixel_width()
        .checked_sub(printable_width + label.right_margin)
        .ok_or_else(|| ConvertError::Unsupported {
            model: model.name.to_string(),
            option: format!("label {} is wider than the print head", label.name),
        })?;

    let mut line = GrayImage::from_pixel(model.pixel_width(), fitted.height(), Luma([255]));
    imageops::overlay(&mut line, &fitted, offset as i64, 0);
    Ok(line)
}

fn rotate(image: &GrayImage, rotation: Rotation, label: &Label) -> GrayImage {
    match rotation {
        Rotation::None => image.clone(),
        Rotation::Cw90 => imageops::rotate90(image),
        Rotation::Cw180 => imageops::rotate180(image),
        Rotation::Cw270 => imageops::rotate270(image),
        Rotation::Auto => {
            let (width, height) = image.dimensions();
            let needs_turn = match label.form_factor {
                FormFactor::DieCut => label.landscape_size() == Some((width, height)),
                FormFactor::Endless => width != label.printable.0 && height == label.printable.0,
            };
            if needs_turn {
                imageops::rotate90(image)
            } else {
                image.clone()
            }
        }
    }
}

/// Binarize, mirror and pack each row.
fn raster_rows(image: &GrayImage, binarization: Binarization) -> Vec<Vec<u8>> {
    let width = image.width() as usize;
    (0..image.height())
        .map(|y| {
            let dots: Vec<bool> = (0..width)
                .rev()
                .map(|x| binarization.prints(x, y as usize, image.get_pixel(x as u32, y).0[0]))
                .collect();
            dither::pack_row(&dots)
        })
        .collect()
}
