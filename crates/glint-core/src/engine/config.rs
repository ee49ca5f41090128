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

//! Engine and window configuration.
//!
//! The defaults reproduce the harness's fixed setup: a windowed 1280x720
//! surface, a gray clear color, the `main.vert`/`main.frag` pair, and one
//! texture. The runtime binary may overlay a JSON file on top of these.

use crate::math::LinearRgba;
use serde::Deserialize;

/// How the window occupies the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum WindowMode {
    /// A regular desktop window.
    Windowed,
    /// Exclusive fullscreen.
    Fullscreen,
    /// A borderless window at the current desktop resolution.
    BorderlessDesktop,
}

/// Parameters handed to the platform when creating the window and context.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Drawable width in pixels.
    pub width: u32,
    /// Drawable height in pixels.
    pub height: u32,
    /// Screen mode.
    pub mode: WindowMode,
    /// Whether buffer swaps wait for the presentation interval.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Glint".to_string(),
            width: 1280,
            height: 720,
            mode: WindowMode::Windowed,
            vsync: true,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window and context parameters.
    pub window: WindowConfig,
    /// Background color set once during startup.
    pub clear_color: LinearRgba,
    /// Shader files to compile and link, stage keyed by file extension.
    /// Must include a `.vert` entry; see [`crate::renderer::ShaderStage`].
    pub shaders: Vec<String>,
    /// File name of the single texture, looked up in the images root.
    pub texture: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: LinearRgba::new(0.5, 0.5, 0.5, 1.0),
            shaders: vec!["main.vert".to_string(), "main.frag".to_string()],
            texture: "smiley.bmp".to_string(),
        }
    }
}
