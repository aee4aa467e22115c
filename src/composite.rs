//! Composite thumbnail rasterizer.
//!
//! Layers up to four encoded item images onto a fixed-size canvas with a
//! cascading scale/offset, then flattens the result to a lossless PNG.
//! Thumbnails are generated once at save time and frozen, so nothing here
//! may depend on catalog state.
//!
//! Sources decode as independent parallel tasks; the draw pass starts only
//! once every task has settled. A source that fails to decode is skipped;
//! one bad layer never blocks or fails the composite.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::Error;
use crate::item::ImageData;

/// Default thumbnail width used by the save flow.
pub const THUMB_WIDTH: u32 = 400;
/// Default thumbnail height used by the save flow.
pub const THUMB_HEIGHT: u32 = 600;

/// At most this many sources are layered; extras are ignored.
const MAX_LAYERS: usize = 4;

/// Canvas background, a solid dark navy.
const BACKGROUND: Rgba<u8> = Rgba([0x0a, 0x0f, 0x1f, 0xff]);

/// The fraction of the canvas the first layer's box occupies.
const BASE_BOX: f32 = 0.7;

/// Per-layer shrink of the cascade.
const SCALE_STEP: f32 = 0.12;

/// Scale of the first layer relative to the base box.
const SCALE_START: f32 = 0.9;

/// Vertical start of the cascade, as a fraction of canvas height.
const TOP_OFFSET: f32 = 0.08;

/// Extra vertical pixels per layer.
const LAYER_DROP: f32 = 15.0;

/// Flattens up to four image sources into a single `width`×`height` PNG.
///
/// Sources are drawn in the order given (by convention top, bottom, shoes,
/// accessory, empties already filtered out). Layer `i` of the successfully
/// decoded set is stretched to a box scaled `0.9 - 0.12·i` of 70% of the
/// canvas, horizontally centered, dropped `8%·height + 15·i` pixels from
/// the top. Zero sources produce the bare background; undecodable sources
/// are skipped. The only failure mode is the final PNG encode.
///
/// ```
/// use wardrobe_planner::composite;
///
/// let thumb = composite(&[], 400, 600).unwrap();
/// assert!(!thumb.is_empty());
/// ```
pub fn composite(sources: &[&ImageData], width: u32, height: u32) -> Result<ImageData, Error> {
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

    let taken = &sources[..sources.len().min(MAX_LAYERS)];

    // Independent decode tasks; the collect is the join point, and a
    // failed task settles as None instead of aborting the others.
    let decoded: Vec<Option<RgbaImage>> = taken
        .par_iter()
        .map(|source| match image::load_from_memory(source.as_bytes()) {
            Ok(img) => Some(img.to_rgba8()),
            Err(err) => {
                warn!(error = %err, "skipping undecodable thumbnail layer");
                None
            }
        })
        .collect();

    for (index, layer) in decoded.into_iter().flatten().enumerate() {
        draw_layer(&mut canvas, &layer, index, width, height);
    }

    debug!(width, height, sources = taken.len(), "rendered composite thumbnail");

    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(ImageData::new(bytes))
}

/// Stretches `layer` into its cascade box and alpha-blends it onto the
/// canvas. `index` is the layer's position among the decoded set.
fn draw_layer(canvas: &mut RgbaImage, layer: &RgbaImage, index: usize, width: u32, height: u32) {
    let scale = SCALE_START - SCALE_STEP * index as f32;
    let box_w = (width as f32 * BASE_BOX * scale) as u32;
    let box_h = (height as f32 * BASE_BOX * scale) as u32;
    if box_w == 0 || box_h == 0 {
        return;
    }

    let x = ((width as f32 - box_w as f32) / 2.0) as i64;
    let y = (height as f32 * TOP_OFFSET + LAYER_DROP * index as f32) as i64;

    let resized = imageops::resize(layer, box_w, box_h, FilterType::Triangle);
    imageops::overlay(canvas, &resized, x, y);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Encodes a small solid-color PNG usable as an item image.
    fn solid_png(r: u8, g: u8, b: u8) -> ImageData {
        let img = RgbaImage::from_pixel(8, 8, Rgba([r, g, b, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        ImageData::new(bytes)
    }

    fn decode(thumb: &ImageData) -> RgbaImage {
        image::load_from_memory(thumb.as_bytes()).unwrap().to_rgba8()
    }

    #[test]
    fn empty_input_yields_background_only_canvas() {
        let thumb = composite(&[], 400, 600).unwrap();
        let img = decode(&thumb);

        assert_eq!(img.dimensions(), (400, 600));
        assert_eq!(img.get_pixel(0, 0), &BACKGROUND);
        assert_eq!(img.get_pixel(399, 599), &BACKGROUND);
        assert_eq!(img.get_pixel(200, 300), &BACKGROUND);
    }

    #[test]
    fn single_layer_lands_in_its_cascade_box() {
        let red = solid_png(255, 0, 0);
        let thumb = composite(&[&red], 400, 600).unwrap();
        let img = decode(&thumb);

        // Layer 0: 252x378 box at x=74, y=48.
        assert_eq!(img.get_pixel(200, 200), &Rgba([255, 0, 0, 255]));
        // Outside the box the background shows through.
        assert_eq!(img.get_pixel(10, 10), &BACKGROUND);
        assert_eq!(img.get_pixel(200, 580), &BACKGROUND);
    }

    #[test]
    fn failed_source_is_skipped_not_fatal() {
        let red = solid_png(255, 0, 0);
        let blue = solid_png(0, 0, 255);
        let garbage = ImageData::new(vec![0xde, 0xad, 0xbe, 0xef]);

        // The bad middle source must not shift or drop the good layers.
        let with_garbage = composite(&[&red, &garbage, &blue], 400, 600).unwrap();
        let without = composite(&[&red, &blue], 400, 600).unwrap();

        assert_eq!(with_garbage, without);
    }

    #[test]
    fn all_sources_failing_still_completes() {
        let garbage = ImageData::new(vec![1, 2, 3]);
        let thumb = composite(&[&garbage, &garbage], 400, 600).unwrap();
        let img = decode(&thumb);
        assert_eq!(img.get_pixel(200, 300), &BACKGROUND);
    }

    #[test]
    fn only_first_four_sources_are_layered() {
        let red = solid_png(255, 0, 0);
        let extra = solid_png(0, 255, 0);
        let four = [&red, &red, &red, &red];
        let five = [&red, &red, &red, &red, &extra];

        let a = composite(&four, 400, 600).unwrap();
        let b = composite(&five, 400, 600).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn later_layers_cascade_smaller_and_lower() {
        let red = solid_png(255, 0, 0);
        let blue = solid_png(0, 0, 255);
        let thumb = composite(&[&red, &blue], 400, 600).unwrap();
        let img = decode(&thumb);

        // Layer 1 (blue, 0.78 scale): 218x327 box at x=91, y=63 draws over
        // the red layer's center.
        assert_eq!(img.get_pixel(200, 200), &Rgba([0, 0, 255, 255]));
        // Red layer 0 still shows where the smaller blue box ends:
        // blue bottom edge is y=63+327=390, red's is y=48+378=426.
        assert_eq!(img.get_pixel(200, 410), &Rgba([255, 0, 0, 255]));
    }
}
