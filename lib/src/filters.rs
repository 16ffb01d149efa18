use image::{DynamicImage, GenericImageView, GrayImage, Luma, imageops::FilterType};

/// Calculate luminance from any raster image using ITU-R BT.601 weights
///
/// Formula: L = (299*R + 587*G + 114*B) / 1000, in integer math.
/// Alpha is ignored. Gray inputs come back unchanged since the weights sum to 1000.
///
/// # Arguments
/// * `img` - Input image in any color type
///
/// # Returns
/// Grayscale image with luminance values
pub fn calculate_luminance(img: &DynamicImage) -> GrayImage {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut output = GrayImage::new(width, height);

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let r = pixel[0] as u32;
        let g = pixel[1] as u32;
        let b = pixel[2] as u32;

        let luminance = (299 * r + 587 * g + 114 * b) / 1000;
        output.put_pixel(x, y, Luma([luminance as u8]));
    }

    output
}

/// Block pixelation by a nearest-neighbor round trip
///
/// Downsamples to `floor(w/block) x floor(h/block)` and scales each sample
/// back up to a `block x block` square. Remainder pixels on the right and
/// bottom edges are dropped, so the output is `block * floor(dim/block)`
/// along each axis.
///
/// # Arguments
/// * `img` - Input image, left untouched
/// * `block_size` - Edge length of one block in pixels, at least 1
///
/// # Returns
/// A new pixelated image with the input's color type
pub fn pixelate(img: &DynamicImage, block_size: u32) -> DynamicImage {
    assert!(block_size >= 1, "block_size must be at least 1");

    let (width, height) = img.dimensions();
    let small_width = width / block_size;
    let small_height = height / block_size;

    // Less than one block on an axis leaves nothing to sample
    if small_width == 0 || small_height == 0 {
        return DynamicImage::new_rgba8(small_width * block_size, small_height * block_size);
    }

    let small = img.resize_exact(small_width, small_height, FilterType::Nearest);
    small.resize_exact(
        small_width * block_size,
        small_height * block_size,
        FilterType::Nearest,
    )
}

/// Convert float sample buffers to 16-bit; integer buffers pass through
///
/// `1.0 - v` does not round-trip in `f32`, `max - v` does.
pub fn integer_samples(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb32F(_) => DynamicImage::ImageRgb16(img.to_rgb16()),
        DynamicImage::ImageRgba32F(_) => DynamicImage::ImageRgba16(img.to_rgba16()),
        other => other,
    }
}

/// Color inversion: every color channel `v` becomes `max - v`
///
/// Alpha is preserved. Float inputs come back as 16-bit (see
/// [`integer_samples`]). For integer inputs applying it twice yields the input.
pub fn invert(img: &DynamicImage) -> DynamicImage {
    let mut output = integer_samples(img.clone());
    output.invert();
    output
}
