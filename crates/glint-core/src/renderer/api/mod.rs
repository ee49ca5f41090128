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

//! Backend-agnostic handle and descriptor types for the rendering seam.

pub mod buffer;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use buffer::{BufferId, BufferUsage};
pub use shader::{AttributeLocation, ProgramId, ShaderStage, StageId, UniformLocation};
pub use texture::{PixelFormat, TextureId, GUARANTEED_TEXTURE_UNITS};
pub use vertex::{
    PrimitiveTopology, VertexArrayId, VertexAttributeDescriptor, VertexFormat, VertexLayout,
};
