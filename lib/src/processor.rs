use crate::ascii::render_ascii;
use crate::config::TransformConfig;
use crate::error::{SessionError, SessionResult};
use crate::filters::{integer_samples, invert, pixelate};
use crate::palette::CharsetPalette;
use crate::reply::Reply;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};
use std::fmt;
use std::str::FromStr;

/// Transform a user can pick for the current image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformChoice {
    Pixelate,
    AsciiArt,
    Invert,
}

impl TransformChoice {
    pub const ALL: [TransformChoice; 3] = [
        TransformChoice::Pixelate,
        TransformChoice::AsciiArt,
        TransformChoice::Invert,
    ];

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            TransformChoice::Pixelate => "Pixelate",
            TransformChoice::AsciiArt => "ASCII Art",
            TransformChoice::Invert => "Inversion",
        }
    }

    /// Canonical command / callback payload
    pub fn command(&self) -> &'static str {
        match self {
            TransformChoice::Pixelate => "pixelate",
            TransformChoice::AsciiArt => "ascii",
            TransformChoice::Invert => "invert",
        }
    }

    /// Short notice shown while an immediate transform runs
    pub fn progress_notice(&self) -> Option<&'static str> {
        match self {
            TransformChoice::Pixelate => Some("Pixelating your image..."),
            TransformChoice::Invert => Some("Inverting colors..."),
            TransformChoice::AsciiArt => None,
        }
    }

    /// Whether choosing it runs the transform right away
    pub fn is_immediate(&self) -> bool {
        !matches!(self, TransformChoice::AsciiArt)
    }
}

impl fmt::Display for TransformChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

impl FromStr for TransformChoice {
    type Err = String;

    /// Accepts callback payloads, case-insensitive, with or without a leading `/`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = s.trim().trim_start_matches('/').to_ascii_lowercase();
        match payload.as_str() {
            "pixelate" => Ok(TransformChoice::Pixelate),
            "ascii" | "ascii_art" | "ascii-art" => Ok(TransformChoice::AsciiArt),
            "invert" | "inversion" => Ok(TransformChoice::Invert),
            _ => Err(format!(
                "Unknown transform '{}'. Available transforms: pixelate, ascii, invert",
                s
            )),
        }
    }
}

/// Decode fetched bytes into an image, guessing the format from its header
///
/// Float formats (HDR, EXR) are converted to 16-bit samples.
pub fn decode(bytes: &[u8]) -> SessionResult<DynamicImage> {
    image::load_from_memory(bytes)
        .map(integer_samples)
        .map_err(SessionError::Decode)
}

/// Encode an image as baseline RGB JPEG
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> SessionResult<Vec<u8>> {
    let rgb = img.to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode_image(&rgb)
        .map_err(SessionError::Encode)?;
    Ok(bytes)
}

/// Runs one transform on a decoded image and packages the result as a reply
///
/// # Arguments
/// * `input` - The decoded image, left untouched
/// * `choice` - Which transform to run
/// * `palette` - Glyph ramp, only used by `AsciiArt`
/// * `config` - Transform parameters
///
/// # Returns
/// `Reply::AsciiArt` for text rendering, `Reply::Image` (JPEG) otherwise
pub fn process_image(
    input: &DynamicImage,
    choice: TransformChoice,
    palette: &CharsetPalette,
    config: &TransformConfig,
) -> SessionResult<Reply> {
    match choice {
        TransformChoice::AsciiArt => Ok(Reply::AsciiArt(render_ascii(
            input,
            config.ascii_width,
            palette,
            config,
        ))),
        TransformChoice::Pixelate => {
            let output = pixelate(input, config.pixel_block_size);
            let (width, height) = output.dimensions();
            if width == 0 || height == 0 {
                let (in_width, in_height) = input.dimensions();
                return Err(SessionError::ImageTooSmall {
                    width: in_width,
                    height: in_height,
                    block_size: config.pixel_block_size,
                });
            }
            image_reply(&output, config)
        }
        TransformChoice::Invert => image_reply(&invert(input), config),
    }
}

fn image_reply(output: &DynamicImage, config: &TransformConfig) -> SessionResult<Reply> {
    let (width, height) = output.dimensions();
    Ok(Reply::Image {
        bytes: encode_jpeg(output, config.jpeg_quality)?,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, Rgb32FImage, RgbImage};
    use std::io::Cursor;

    fn sample(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 4) as u8, (y * 4) as u8, 100])
        }))
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!("pixelate".parse::<TransformChoice>(), Ok(TransformChoice::Pixelate));
        assert_eq!("ascii".parse::<TransformChoice>(), Ok(TransformChoice::AsciiArt));
        assert_eq!("inversion".parse::<TransformChoice>(), Ok(TransformChoice::Invert));
        assert_eq!("/Invert".parse::<TransformChoice>(), Ok(TransformChoice::Invert));
        assert!("sharpen".parse::<TransformChoice>().is_err());
    }

    #[test]
    fn test_command_round_trips_through_parse() {
        for choice in TransformChoice::ALL {
            assert_eq!(choice.command().parse::<TransformChoice>(), Ok(choice));
        }
    }

    #[test]
    fn test_only_ascii_is_deferred() {
        assert!(TransformChoice::Pixelate.is_immediate());
        assert!(TransformChoice::Invert.is_immediate());
        assert!(!TransformChoice::AsciiArt.is_immediate());
    }

    #[test]
    fn test_encode_jpeg_produces_jpeg() {
        let bytes = encode_jpeg(&sample(16, 16), 90).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(decode(&bytes).unwrap().dimensions(), (16, 16));
    }

    #[test]
    fn test_decode_float_image_as_16_bit() {
        let hdr = DynamicImage::ImageRgb32F(Rgb32FImage::from_pixel(4, 4, Rgb([0.1, 0.3, 0.7])));
        let mut bytes = Cursor::new(Vec::new());
        hdr.write_to(&mut bytes, ImageFormat::OpenExr).unwrap();

        let decoded = decode(bytes.get_ref()).unwrap();
        assert!(matches!(
            decoded,
            DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgba16(_)
        ));
        assert_eq!(invert(&invert(&decoded)), decoded);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(decode(b"not an image"), Err(SessionError::Decode(_))));
    }

    #[test]
    fn test_process_pixelate_reports_output_size() {
        let reply = process_image(
            &sample(64, 64),
            TransformChoice::Pixelate,
            &CharsetPalette::default(),
            &TransformConfig::default(),
        )
        .unwrap();

        match reply {
            Reply::Image { bytes, width, height } => {
                assert_eq!((width, height), (60, 60));
                assert_eq!(decode(&bytes).unwrap().dimensions(), (60, 60));
            }
            other => panic!("expected image reply, got {:?}", other),
        }
    }

    #[test]
    fn test_process_pixelate_too_small() {
        let result = process_image(
            &sample(10, 10),
            TransformChoice::Pixelate,
            &CharsetPalette::default(),
            &TransformConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SessionError::ImageTooSmall {
                width: 10,
                height: 10,
                block_size: 20
            })
        ));
    }

    #[test]
    fn test_process_invert_keeps_size() {
        let reply = process_image(
            &sample(33, 21),
            TransformChoice::Invert,
            &CharsetPalette::default(),
            &TransformConfig::default(),
        )
        .unwrap();
        assert!(matches!(reply, Reply::Image { width: 33, height: 21, .. }));
    }

    #[test]
    fn test_process_ascii_uses_configured_width() {
        let config = TransformConfig {
            ascii_width: 12,
            ..Default::default()
        };
        let reply = process_image(
            &sample(48, 48),
            TransformChoice::AsciiArt,
            &CharsetPalette::default(),
            &config,
        )
        .unwrap();
        match reply {
            Reply::AsciiArt(art) => assert_eq!(art.columns, 12),
            other => panic!("expected ascii reply, got {:?}", other),
        }
    }
}
