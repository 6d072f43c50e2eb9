//! Accent color derivation from thumbnail images

use std::collections::HashMap;

use rand::Rng;

use crate::shared::errors::FetchError;

/// Dominant color of an encoded image, as 6 lowercase hex digits.
///
/// The image is downscaled, pixels are bucketed at 4 bits per channel, and
/// the mean color of the most populated bucket wins.
pub fn dominant_color(bytes: &[u8]) -> Result<String, FetchError> {
    let image = image::load_from_memory(bytes).map_err(|e| FetchError::Thumbnail(e.to_string()))?;
    let small = image.thumbnail(64, 64).to_rgb8();

    let mut buckets: HashMap<(u8, u8, u8), (u64, u64, u64, u64)> = HashMap::new();
    for pixel in small.pixels() {
        let [r, g, b] = pixel.0;
        let bucket = buckets.entry((r >> 4, g >> 4, b >> 4)).or_default();
        bucket.0 += u64::from(r);
        bucket.1 += u64::from(g);
        bucket.2 += u64::from(b);
        bucket.3 += 1;
    }

    let (_, (r, g, b, count)) = buckets
        .into_iter()
        .max_by_key(|(_, (_, _, _, count))| *count)
        .ok_or_else(|| FetchError::Thumbnail("image has no pixels".to_string()))?;
    Ok(format!("{:02x}{:02x}{:02x}", r / count, g / count, b / count))
}

/// Pseudo-random 24-bit fallback for products with no thumbnail
pub fn random_color() -> String {
    format!("{:06x}", rand::thread_rng().gen_range(0..=0xFF_FFFFu32))
}
