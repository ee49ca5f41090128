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

// Glint runtime
// Brings up logging, loads the optional config overlay, and drives the
// engine to its exit code.

use anyhow::{Context, Result};
use glint_core::{Engine, EngineConfig};
use glint_infra::{DiskAssetStore, SdlPlatform};
use std::env;
use std::fs;
use std::process;

/// Environment variable naming a JSON file overlaid on the default config.
const CONFIG_ENV: &str = "GLINT_CONFIG";

fn load_config() -> Result<EngineConfig> {
    let Some(path) = env::var_os(CONFIG_ENV) else {
        return Ok(EngineConfig::default());
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("reading config file {}", path.to_string_lossy()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config file {}", path.to_string_lossy()))?;
    log::info!("loaded config overlay from {}", path.to_string_lossy());
    Ok(config)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let mut engine = Engine::new(
        Box::new(SdlPlatform::new()),
        Box::new(DiskAssetStore::with_defaults()),
        config,
    );

    process::exit(engine.start());
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::engine::WindowMode;

    #[test]
    fn overlay_replaces_only_the_given_fields() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "window": { "width": 800, "height": 600 } }"#).unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.mode, WindowMode::Windowed);
        assert_eq!(config.shaders, ["main.vert", "main.frag"]);
        assert_eq!(config.texture, "smiley.bmp");
    }
}
