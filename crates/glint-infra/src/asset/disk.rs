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

//! An [`AssetStore`] over two directories on disk.
//!
//! Shader sources and images each live under their own root. Files are
//! read whole into memory first; images are then decoded from that buffer
//! with the `image` crate and normalized to RGB8 or RGBA8.

use glint_core::asset::{AssetError, AssetStore, ImageData};
use glint_core::renderer::api::PixelFormat;
use std::fs;
use std::path::{Path, PathBuf};

/// Default shaders root, relative to the working directory.
const SHADERS_ROOT: &str = "assets/shaders";

/// Default images root, relative to the working directory.
const IMAGES_ROOT: &str = "assets/images";

/// Loads shader text and images from the asset directories.
#[derive(Debug, Clone)]
pub struct DiskAssetStore {
    shaders_root: PathBuf,
    images_root: PathBuf,
}

impl DiskAssetStore {
    /// Creates a store over explicit roots.
    pub fn new(shaders_root: impl Into<PathBuf>, images_root: impl Into<PathBuf>) -> Self {
        Self {
            shaders_root: shaders_root.into(),
            images_root: images_root.into(),
        }
    }

    /// Creates a store over the fixed `assets/` layout.
    pub fn with_defaults() -> Self {
        Self::new(SHADERS_ROOT, IMAGES_ROOT)
    }

    fn read_bytes(path: &Path) -> Result<Vec<u8>, AssetError> {
        if !path.exists() {
            return Err(AssetError::NotFound {
                path: path.display().to_string(),
            });
        }
        fs::read(path).map_err(|error| AssetError::Io {
            path: path.display().to_string(),
            details: error.to_string(),
        })
    }
}

impl Default for DiskAssetStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl AssetStore for DiskAssetStore {
    fn load_shader_source(&self, file_name: &str) -> Result<String, AssetError> {
        let path = self.shaders_root.join(file_name);
        let bytes = Self::read_bytes(&path)?;
        String::from_utf8(bytes).map_err(|error| AssetError::Io {
            path: path.display().to_string(),
            details: error.to_string(),
        })
    }

    fn load_image(&self, file_name: &str) -> Result<ImageData, AssetError> {
        let path = self.images_root.join(file_name);
        let bytes = Self::read_bytes(&path)?;

        let decoded = image::load_from_memory(&bytes).map_err(|error| AssetError::Decode {
            path: path.display().to_string(),
            details: error.to_string(),
        })?;

        let width = decoded.width();
        let height = decoded.height();
        let (format, pixels) = if decoded.color().has_alpha() {
            (PixelFormat::Rgba8, decoded.into_rgba8().into_raw())
        } else {
            (PixelFormat::Rgb8, decoded.into_rgb8().into_raw())
        };

        log::debug!("decoded image {file_name}: {width}x{height} {format:?}");

        Ok(ImageData {
            width,
            height,
            format,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn store_in(dir: &Path) -> DiskAssetStore {
        DiskAssetStore::new(dir.join("shaders"), dir.join("images"))
    }

    #[test]
    fn shader_source_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("shaders")).unwrap();
        let source = "#version 330 core\nvoid main() {}\n";
        fs::write(dir.path().join("shaders/main.vert"), source).unwrap();

        let store = store_in(dir.path());
        assert_eq!(store.load_shader_source("main.vert").unwrap(), source);
    }

    #[test]
    fn missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let error = store.load_shader_source("absent.frag").unwrap_err();
        assert!(matches!(error, AssetError::NotFound { .. }));
        assert!(format!("{error}").contains("absent.frag"));
    }

    #[test]
    fn bmp_decodes_to_rgb8() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();

        let mut bytes = Vec::new();
        RgbImage::from_pixel(2, 2, Rgb([255, 0, 128]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Bmp)
            .unwrap();
        fs::write(dir.path().join("images/swatch.bmp"), bytes).unwrap();

        let store = store_in(dir.path());
        let image = store.load_image("swatch.bmp").unwrap();
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.format, PixelFormat::Rgb8);
        assert_eq!(image.pixels.len(), image.expected_len());
        assert_eq!(&image.pixels[..3], &[255, 0, 128]);
    }

    #[test]
    fn garbage_bytes_report_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("images/broken.png"), b"not an image").unwrap();

        let store = store_in(dir.path());
        let error = store.load_image("broken.png").unwrap_err();
        assert!(matches!(error, AssetError::Decode { .. }));
    }
}
