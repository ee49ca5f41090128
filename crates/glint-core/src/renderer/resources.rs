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

//! Exclusive-ownership wrappers for the vertex array, vertex buffer, and
//! texture objects.
//!
//! Each wrapper keeps a handle to the device that created it and releases
//! the GPU object on drop, so scope exit can never leak a resource. The
//! engine still states its teardown order explicitly: the wrappers make
//! that order the drop order, they do not choose it.

use crate::asset::ImageData;
use crate::renderer::api::{BufferId, BufferUsage, TextureId, VertexArrayId};
use crate::renderer::error::ResourceError;
use crate::renderer::traits::GraphicsDevice;
use std::sync::Arc;

/// An owned vertex array object.
#[derive(Debug)]
pub struct GpuVertexArray {
    device: Arc<dyn GraphicsDevice>,
    id: VertexArrayId,
}

impl GpuVertexArray {
    /// Creates a vertex array on `device`.
    pub fn new(device: Arc<dyn GraphicsDevice>) -> Result<Self, ResourceError> {
        let id = device.create_vertex_array()?;
        Ok(Self { device, id })
    }

    /// The underlying handle.
    pub fn id(&self) -> VertexArrayId {
        self.id
    }

    /// Binds this vertex array.
    pub fn bind(&self) {
        self.device.bind_vertex_array(Some(self.id));
    }

    /// Unbinds whatever vertex array is bound.
    pub fn unbind(&self) {
        self.device.bind_vertex_array(None);
    }
}

impl Drop for GpuVertexArray {
    fn drop(&mut self) {
        self.device.delete_vertex_array(self.id);
    }
}

/// An owned vertex buffer object.
#[derive(Debug)]
pub struct GpuBuffer {
    device: Arc<dyn GraphicsDevice>,
    id: BufferId,
}

impl GpuBuffer {
    /// Creates a buffer on `device`.
    pub fn new(device: Arc<dyn GraphicsDevice>) -> Result<Self, ResourceError> {
        let id = device.create_buffer()?;
        Ok(Self { device, id })
    }

    /// The underlying handle.
    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Binds this buffer and uploads `data` with the given usage hint.
    pub fn upload(&self, data: &[u8], usage: BufferUsage) {
        self.bind();
        self.device.upload_array_buffer(data, usage);
    }

    /// Binds this buffer to the array target.
    pub fn bind(&self) {
        self.device.bind_array_buffer(Some(self.id));
    }

    /// Unbinds whatever buffer is bound to the array target.
    pub fn unbind(&self) {
        self.device.bind_array_buffer(None);
    }
}

impl Drop for GpuBuffer {
    fn drop(&mut self) {
        self.device.delete_buffer(self.id);
    }
}

/// An owned 2D texture object.
#[derive(Debug)]
pub struct GpuTexture {
    device: Arc<dyn GraphicsDevice>,
    id: TextureId,
}

impl GpuTexture {
    /// Creates a texture and uploads `image` to it, generating mipmaps.
    ///
    /// The decoded pixel buffer is consumed and freed here: once the image
    /// is resident on the GPU there is no CPU-side copy left.
    pub fn from_image(
        device: Arc<dyn GraphicsDevice>,
        image: ImageData,
    ) -> Result<Self, ResourceError> {
        let id = device.create_texture()?;
        let texture = Self { device, id };

        texture.bind();
        texture.device.upload_texture_2d(&image);
        texture.device.generate_mipmaps();
        texture.unbind();

        drop(image);
        Ok(texture)
    }

    /// The underlying handle.
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Binds this texture to the 2D target of the active unit.
    pub fn bind(&self) {
        self.device.bind_texture(Some(self.id));
    }

    /// Unbinds the 2D target of the active unit, so later state changes
    /// cannot accidentally touch this texture.
    pub fn unbind(&self) {
        self.device.bind_texture(None);
    }
}

impl Drop for GpuTexture {
    fn drop(&mut self) {
        self.device.delete_texture(self.id);
    }
}
