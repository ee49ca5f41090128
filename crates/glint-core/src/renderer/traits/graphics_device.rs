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

//! The graphics-API seam.
//!
//! Every GPU operation the harness issues goes through [`GraphicsDevice`],
//! at the granularity of the underlying API calls: the engine's contract is
//! the *sequence and ordering* of these calls, never their internals. Tests
//! verify ordering against a recording implementation; `glint-infra`
//! provides the OpenGL one.
//!
//! All handles returned by a device are only valid while the window/context
//! that produced the device is alive.

use crate::asset::ImageData;
use crate::math::LinearRgba;
use crate::renderer::api::{
    AttributeLocation, BufferId, BufferUsage, PrimitiveTopology, ProgramId, ShaderStage, StageId,
    TextureId, UniformLocation, VertexArrayId, VertexAttributeDescriptor,
};
use crate::renderer::error::ResourceError;
use std::fmt::Debug;

/// Issues GPU operations against one live graphics context.
///
/// Creation and query operations report failure; pure state-setting
/// operations (binds, uniform uploads, draws) cannot fail observably at
/// this seam and return nothing.
pub trait GraphicsDevice: Debug {
    /// Creates an empty shader program object.
    fn create_program(&self) -> Result<ProgramId, ResourceError>;

    /// Compiles one stage from source.
    ///
    /// ## Errors
    /// `ShaderError::CompilationFailed` carrying the compiler's info log.
    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<StageId, ResourceError>;

    /// Attaches a compiled stage to a program.
    fn attach_stage(&self, program: ProgramId, stage: StageId);

    /// Links the attached stages into an executable program.
    ///
    /// ## Errors
    /// `ShaderError::LinkFailed` carrying the linker's info log.
    fn link_program(&self, program: ProgramId) -> Result<(), ResourceError>;

    /// Validates the program against the current pipeline state.
    fn validate_program(&self, program: ProgramId) -> Result<(), ResourceError>;

    /// Detaches a stage from a program.
    fn detach_stage(&self, program: ProgramId, stage: StageId);

    /// Releases a compiled stage object.
    fn delete_stage(&self, stage: StageId);

    /// Releases a program object.
    fn delete_program(&self, program: ProgramId);

    /// Makes `program` current, or unbinds with `None`.
    fn use_program(&self, program: Option<ProgramId>);

    /// Looks up an active vertex attribute by name.
    ///
    /// ## Errors
    /// `ShaderError::AttributeNotFound` when the name is not active in the
    /// linked program.
    fn attribute_location(
        &self,
        program: ProgramId,
        name: &str,
    ) -> Result<AttributeLocation, ResourceError>;

    /// Looks up an active uniform by name.
    ///
    /// ## Errors
    /// `ShaderError::UniformNotFound` when the name is not active in the
    /// linked program.
    fn uniform_location(
        &self,
        program: ProgramId,
        name: &str,
    ) -> Result<UniformLocation, ResourceError>;

    /// Uploads a scalar float uniform to the current program.
    fn set_uniform_f32(&self, location: UniformLocation, value: f32);

    /// Uploads a scalar integer uniform (also used for sampler units).
    fn set_uniform_i32(&self, location: UniformLocation, value: i32);

    /// Uploads a vec4 uniform.
    fn set_uniform_vec4(&self, location: UniformLocation, value: [f32; 4]);

    /// Uploads a column-major mat4 uniform.
    fn set_uniform_mat4(&self, location: UniformLocation, value: &[f32; 16]);

    /// Creates a vertex array object.
    fn create_vertex_array(&self) -> Result<VertexArrayId, ResourceError>;

    /// Binds a vertex array, or unbinds with `None`.
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>);

    /// Releases a vertex array object.
    fn delete_vertex_array(&self, vertex_array: VertexArrayId);

    /// Creates a buffer object.
    fn create_buffer(&self) -> Result<BufferId, ResourceError>;

    /// Binds a buffer to the array-buffer target, or unbinds with `None`.
    fn bind_array_buffer(&self, buffer: Option<BufferId>);

    /// Uploads `data` to the buffer currently bound to the array target.
    fn upload_array_buffer(&self, data: &[u8], usage: BufferUsage);

    /// Releases a buffer object.
    fn delete_buffer(&self, buffer: BufferId);

    /// Enables `attribute` at `location` and describes its layout within
    /// the currently bound buffer. `stride` is the vertex byte stride.
    fn enable_vertex_attribute(
        &self,
        location: AttributeLocation,
        attribute: &VertexAttributeDescriptor,
        stride: u32,
    );

    /// Creates a texture object.
    fn create_texture(&self) -> Result<TextureId, ResourceError>;

    /// Binds a 2D texture, or unbinds with `None`.
    fn bind_texture(&self, texture: Option<TextureId>);

    /// Uploads decoded pixels to the currently bound 2D texture, including
    /// the harness's fixed sampling state (clamp to edge, linear filters).
    fn upload_texture_2d(&self, image: &ImageData);

    /// Generates the mipmap chain for the currently bound 2D texture.
    fn generate_mipmaps(&self);

    /// Selects the active texture unit for subsequent binds.
    fn set_active_texture_unit(&self, unit: u32);

    /// Releases a texture object.
    fn delete_texture(&self, texture: TextureId);

    /// Sets the color the framebuffer clears to.
    fn set_clear_color(&self, color: LinearRgba);

    /// Clears the color buffer.
    fn clear(&self);

    /// Draws `count` buffered vertices starting at `first`.
    fn draw_arrays(&self, topology: PrimitiveTopology, first: u32, count: u32);
}
