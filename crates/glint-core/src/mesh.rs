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

//! The fixed vertex structure and the full-screen quad it describes.

use crate::renderer::api::{VertexAttributeDescriptor, VertexFormat, VertexLayout};
use std::mem;

/// One vertex of the static quad: a position and a texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 3],
    /// Texture coordinate, origin at the bottom left.
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// The layout of this structure, offsets computed from the known field
    /// order rather than spelled out as literals.
    pub fn layout() -> VertexLayout {
        VertexLayout {
            stride: mem::size_of::<Vertex>() as u32,
            attributes: vec![
                VertexAttributeDescriptor {
                    name: "vPosition",
                    format: VertexFormat::Float32x3,
                    offset: 0,
                },
                VertexAttributeDescriptor {
                    name: "texCoord",
                    format: VertexFormat::Float32x2,
                    offset: mem::size_of::<[f32; 3]>() as u32,
                },
            ],
        }
    }
}

/// The full-screen quad: two triangles, six vertices, covering NDC.
pub fn fullscreen_quad() -> Vec<Vertex> {
    vec![
        // First triangle
        Vertex {
            position: [-1.0, -1.0, 0.0],
            tex_coords: [0.0, 0.0],
        }, // Bottom left
        Vertex {
            position: [-1.0, 1.0, 0.0],
            tex_coords: [0.0, 1.0],
        }, // Top left
        Vertex {
            position: [1.0, -1.0, 0.0],
            tex_coords: [1.0, 0.0],
        }, // Bottom right
        // Second triangle
        Vertex {
            position: [1.0, -1.0, 0.0],
            tex_coords: [1.0, 0.0],
        }, // Bottom right
        Vertex {
            position: [-1.0, 1.0, 0.0],
            tex_coords: [0.0, 1.0],
        }, // Top left
        Vertex {
            position: [1.0, 1.0, 0.0],
            tex_coords: [1.0, 1.0],
        }, // Top right
    ]
}
