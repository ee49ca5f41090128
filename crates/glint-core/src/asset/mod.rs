// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The asset seam: shader source text and decoded images.
//!
//! The engine never touches the filesystem or an image codec directly; it
//! asks an [`AssetStore`] by file name. `glint-infra` implements the store
//! over the shaders/images asset roots.

use crate::renderer::api::PixelFormat;
use std::fmt;

/// A decoded image, owned in CPU memory.
///
/// The engine holds one of these only transiently: the pixel buffer is
/// dropped as soon as the image is resident on the GPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub format: PixelFormat,
    /// Tightly packed rows, `width * height * bytes_per_pixel` bytes.
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// The byte length `pixels` must have for the stated dimensions.
    pub fn expected_len(&self) -> usize {
        (self.width * self.height * self.format.bytes_per_pixel()) as usize
    }
}

/// Loads shader sources and images by file name.
pub trait AssetStore {
    /// Reads a shader's GLSL source from the shaders root.
    fn load_shader_source(&self, file_name: &str) -> Result<String, AssetError>;

    /// Reads and decodes an image from the images root.
    fn load_image(&self, file_name: &str) -> Result<ImageData, AssetError>;
}

/// Errors raised while loading or decoding an asset.
#[derive(Debug)]
pub enum AssetError {
    /// The file does not exist.
    NotFound {
        /// The path that was probed.
        path: String,
    },
    /// The file exists but could not be read.
    Io {
        /// The path that was read.
        path: String,
        /// The underlying I/O error, stringified.
        details: String,
    },
    /// The bytes could not be decoded into pixels.
    Decode {
        /// The path the bytes came from.
        path: String,
        /// The decoder's error, stringified.
        details: String,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NotFound { path } => write!(f, "File '{path}' doesn't exist"),
            AssetError::Io { path, details } => {
                write!(f, "Failed to read '{path}': {details}")
            }
            AssetError::Decode { path, details } => {
                write!(f, "Unable to decode image '{path}': {details}")
            }
        }
    }
}

impl std::error::Error for AssetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_len_follows_the_format() {
        let image = ImageData {
            width: 4,
            height: 2,
            format: PixelFormat::Rgb8,
            pixels: vec![0; 24],
        };
        assert_eq!(image.expected_len(), 24);
        assert_eq!(image.pixels.len(), image.expected_len());
    }
}
