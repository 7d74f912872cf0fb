//! Image decoding and CLIP preprocessing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use candle_core::{DType, Device, Tensor};
use image::imageops::FilterType;

use super::error::ClassifierError;

/// Per-channel mean used by CLIP preprocessing.
const CLIP_MEAN: [f32; 3] = [0.481_454_66, 0.457_827_5, 0.408_210_73];
/// Per-channel standard deviation used by CLIP preprocessing.
const CLIP_STD: [f32; 3] = [0.268_629_54, 0.261_302_58, 0.275_777_1];

/// Decodes a `data:<mime>;base64,<payload>` URL or bare base64 into raw image bytes.
pub fn decode_image_payload(image: &str) -> Result<Vec<u8>, ClassifierError> {
    let image = image.trim();
    if image.is_empty() {
        return Err(ClassifierError::InvalidImage {
            reason: "empty image payload".to_string(),
        });
    }

    let payload = match image.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest.split_once(',').ok_or_else(|| ClassifierError::InvalidImage {
                reason: "data URL has no payload separator".to_string(),
            })?;
            if !header.ends_with(";base64") {
                return Err(ClassifierError::InvalidImage {
                    reason: format!("unsupported data URL encoding: {header}"),
                });
            }
            data
        }
        None => image,
    };

    Ok(STANDARD.decode(payload)?)
}

/// Encodes raw bytes as a base64 data URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decodes, resizes, and normalizes an image into a `(1, 3, size, size)` tensor.
pub fn load_image_tensor(
    bytes: &[u8],
    image_size: usize,
    device: &Device,
) -> Result<Tensor, ClassifierError> {
    let img = image::load_from_memory(bytes)?;
    let img = img.resize_to_fill(image_size as u32, image_size as u32, FilterType::Triangle);
    let raw = img.to_rgb8().into_raw();

    let mean = Tensor::new(&CLIP_MEAN, &Device::Cpu)?.reshape((3, 1, 1))?;
    let std = Tensor::new(&CLIP_STD, &Device::Cpu)?.reshape((3, 1, 1))?;

    let tensor = Tensor::from_vec(raw, (image_size, image_size, 3), &Device::Cpu)?
        .permute((2, 0, 1))?
        .to_dtype(DType::F32)?
        .affine(1.0 / 255.0, 0.0)?
        .broadcast_sub(&mean)?
        .broadcast_div(&std)?
        .unsqueeze(0)?
        .to_device(device)?;

    Ok(tensor)
}

/// Guesses an image MIME type from a file extension.
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => "image/png",
    }
}
