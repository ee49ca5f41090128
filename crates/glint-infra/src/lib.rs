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

//! # Glint Infra
//!
//! Concrete implementations of the `glint-core` seams: an SDL2 window with
//! an OpenGL 3.3 core context, a `gl`-backed [`GraphicsDevice`], and a
//! disk-backed asset store that decodes images with the `image` crate.
//!
//! [`GraphicsDevice`]: glint_core::renderer::traits::GraphicsDevice

pub mod asset;
pub mod graphics;
pub mod platform;

pub use asset::DiskAssetStore;
pub use graphics::GlGraphicsDevice;
pub use platform::SdlPlatform;
