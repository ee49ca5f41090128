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

//! The backend-agnostic rendering contracts.
//!
//! This module is the common language between the engine and the graphics
//! backend: the abstract [`GraphicsDevice`] trait, the handle and
//! descriptor types, the error hierarchy, and the owned resource wrappers
//! built on top of the trait. The concrete OpenGL implementation lives in
//! the `glint-infra` crate.

pub mod api;
pub mod error;
pub mod resources;
pub mod shader;
pub mod traits;

pub use self::api::*;
pub use self::error::{ResourceError, ShaderError};
pub use self::resources::{GpuBuffer, GpuTexture, GpuVertexArray};
pub use self::shader::ShaderProgram;
pub use self::traits::GraphicsDevice;
