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

//! # Glint Core
//!
//! Foundational crate for the Glint rendering harness: the engine lifecycle
//! state machine, the trait seams to every external collaborator (windowing,
//! graphics API, asset loading), and the exclusively-owned GPU resource
//! wrappers whose teardown ordering the engine enforces.
//!
//! Concrete backends (SDL2, OpenGL, disk assets) live in `glint-infra`.

#![warn(missing_docs)]

pub mod asset;
pub mod engine;
pub mod math;
pub mod mesh;
pub mod platform;
pub mod renderer;

pub use engine::{Engine, EngineConfig, EngineStatus};
