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

//! Vertex array handles and the explicit vertex layout descriptors.
//!
//! A [`VertexLayout`] states every attribute's name, component format, and
//! byte offset up front, computed once from the fixed vertex structure, so
//! the binding call needs no pointer arithmetic at the call site.

/// An opaque handle to a GPU vertex array object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayId(pub u32);

/// The component format of one vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    /// Two `f32` components.
    Float32x2,
    /// Three `f32` components.
    Float32x3,
}

impl VertexFormat {
    /// Number of components in the attribute.
    pub fn component_count(self) -> u32 {
        match self {
            VertexFormat::Float32x2 => 2,
            VertexFormat::Float32x3 => 3,
        }
    }
}

/// One attribute within a [`VertexLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttributeDescriptor {
    /// The attribute's name in the shader source.
    pub name: &'static str,
    /// Component format.
    pub format: VertexFormat,
    /// Byte offset from the start of a vertex.
    pub offset: u32,
}

/// The complete layout of one vertex structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Byte stride between consecutive vertices.
    pub stride: u32,
    /// Attributes in declaration order.
    pub attributes: Vec<VertexAttributeDescriptor>,
}

/// How buffered vertices assemble into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// One point per vertex.
    Points,
    /// One line per vertex pair.
    Lines,
    /// One triangle per vertex triple.
    Triangles,
}
