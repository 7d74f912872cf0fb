//! Shared fixtures: real encoded photos and scripted classifiers.

#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use snapcheck::classifier::preprocess::encode_data_url;
use snapcheck::{MockClassifier, MockClassifierLoader};

/// Solid-colour PNG, encoded as a data URL.
pub fn png_data_url(width: u32, height: u32, rgb: [u8; 3]) -> String {
    let img = RgbImage::from_pixel(width, height, Rgb(rgb));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode png");
    encode_data_url("image/png", out.get_ref())
}

pub fn asphalt_photo() -> String {
    png_data_url(16, 16, [60, 60, 64])
}

pub fn selfie_photo() -> String {
    png_data_url(16, 16, [224, 172, 150])
}

/// Scores a road-damage photo the way a confident model would.
pub fn road_damage_classifier() -> MockClassifier {
    MockClassifier::with_scores(&[
        ("pothole", 0.62),
        ("damaged road", 0.20),
        ("person face", 0.05),
    ])
}

pub fn loader_for(classifier: &MockClassifier) -> MockClassifierLoader {
    MockClassifierLoader::new(classifier.clone())
}
