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

//! A [`GraphicsDevice`] over raw OpenGL 3.3 core calls.
//!
//! Valid only while the context that loaded the `gl` function pointers is
//! current; the engine guarantees that by dropping every resource before
//! the window.

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};
use glint_core::asset::{ImageData, PixelFormat};
use glint_core::math::LinearRgba;
use glint_core::renderer::api::{
    AttributeLocation, BufferId, BufferUsage, PrimitiveTopology, ProgramId, ShaderStage, StageId,
    TextureId, UniformLocation, VertexArrayId, VertexAttributeDescriptor,
};
use glint_core::renderer::error::{ResourceError, ShaderError};
use glint_core::renderer::traits::GraphicsDevice;
use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr;

/// Issues every GPU operation of the harness as a direct OpenGL call.
#[derive(Debug, Default)]
pub struct GlGraphicsDevice;

impl GlGraphicsDevice {
    /// Creates the device. The GL function pointers must already be loaded
    /// for the current context.
    pub fn new() -> Self {
        Self
    }
}

fn stage_kind(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        ShaderStage::Geometry => gl::GEOMETRY_SHADER,
        ShaderStage::Compute => gl::COMPUTE_SHADER,
        ShaderStage::TessControl => gl::TESS_CONTROL_SHADER,
        ShaderStage::TessEvaluation => gl::TESS_EVALUATION_SHADER,
    }
}

fn buffer_usage(usage: BufferUsage) -> GLenum {
    match usage {
        BufferUsage::Static => gl::STATIC_DRAW,
        BufferUsage::Dynamic => gl::DYNAMIC_DRAW,
        BufferUsage::Stream => gl::STREAM_DRAW,
    }
}

fn topology(topology: PrimitiveTopology) -> GLenum {
    match topology {
        PrimitiveTopology::Points => gl::POINTS,
        PrimitiveTopology::Lines => gl::LINES,
        PrimitiveTopology::Triangles => gl::TRIANGLES,
    }
}

fn pixel_format(format: PixelFormat) -> GLenum {
    match format {
        PixelFormat::Rgb8 => gl::RGB,
        PixelFormat::Rgba8 => gl::RGBA,
    }
}

/// Reads a shader object's info log after a failed compile.
fn stage_info_log(handle: GLuint) -> String {
    let mut log_len: GLint = 0;
    unsafe {
        gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);
        let mut log: Vec<u8> = Vec::with_capacity(log_len.max(0) as usize);
        gl::GetShaderInfoLog(handle, log_len, ptr::null_mut(), log.as_mut_ptr() as *mut GLchar);
        log.set_len(log_len.max(0) as usize);
        String::from_utf8_lossy(&log).trim_end_matches('\0').to_string()
    }
}

/// Reads a program object's info log after a failed link or validation.
fn program_info_log(handle: GLuint) -> String {
    let mut log_len: GLint = 0;
    unsafe {
        gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);
        let mut log: Vec<u8> = Vec::with_capacity(log_len.max(0) as usize);
        gl::GetProgramInfoLog(handle, log_len, ptr::null_mut(), log.as_mut_ptr() as *mut GLchar);
        log.set_len(log_len.max(0) as usize);
        String::from_utf8_lossy(&log).trim_end_matches('\0').to_string()
    }
}

impl GraphicsDevice for GlGraphicsDevice {
    fn create_program(&self) -> Result<ProgramId, ResourceError> {
        let handle = unsafe { gl::CreateProgram() };
        if handle == 0 {
            return Err(ShaderError::CreationFailed { object: "program" }.into());
        }
        Ok(ProgramId(handle))
    }

    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<StageId, ResourceError> {
        let handle = unsafe { gl::CreateShader(stage_kind(stage)) };
        if handle == 0 {
            return Err(ShaderError::CreationFailed { object: "stage" }.into());
        }

        let c_source = CString::new(source.as_bytes()).map_err(|_| {
            ShaderError::CompilationFailed {
                stage,
                details: "source contains a NUL byte".to_string(),
            }
        })?;

        let mut compiled: GLint = gl::FALSE.into();
        unsafe {
            gl::ShaderSource(handle, 1, [c_source.as_ptr()].as_ptr(), ptr::null());
            gl::CompileShader(handle);
            gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);
        }

        if compiled == gl::TRUE.into() {
            Ok(StageId(handle))
        } else {
            let details = stage_info_log(handle);
            unsafe { gl::DeleteShader(handle) };
            Err(ShaderError::CompilationFailed { stage, details }.into())
        }
    }

    fn attach_stage(&self, program: ProgramId, stage: StageId) {
        unsafe { gl::AttachShader(program.0, stage.0) };
    }

    fn link_program(&self, program: ProgramId) -> Result<(), ResourceError> {
        let mut linked: GLint = gl::FALSE.into();
        unsafe {
            gl::LinkProgram(program.0);
            gl::GetProgramiv(program.0, gl::LINK_STATUS, &mut linked);
        }
        if linked == gl::TRUE.into() {
            Ok(())
        } else {
            Err(ShaderError::LinkFailed {
                details: program_info_log(program.0),
            }
            .into())
        }
    }

    fn validate_program(&self, program: ProgramId) -> Result<(), ResourceError> {
        let mut valid: GLint = gl::FALSE.into();
        unsafe {
            gl::ValidateProgram(program.0);
            gl::GetProgramiv(program.0, gl::VALIDATE_STATUS, &mut valid);
        }
        if valid == gl::TRUE.into() {
            Ok(())
        } else {
            Err(ShaderError::ValidationFailed {
                details: program_info_log(program.0),
            }
            .into())
        }
    }

    fn detach_stage(&self, program: ProgramId, stage: StageId) {
        unsafe { gl::DetachShader(program.0, stage.0) };
    }

    fn delete_stage(&self, stage: StageId) {
        unsafe { gl::DeleteShader(stage.0) };
    }

    fn delete_program(&self, program: ProgramId) {
        unsafe { gl::DeleteProgram(program.0) };
    }

    fn use_program(&self, program: Option<ProgramId>) {
        unsafe { gl::UseProgram(program.map_or(0, |p| p.0)) };
    }

    fn attribute_location(
        &self,
        program: ProgramId,
        name: &str,
    ) -> Result<AttributeLocation, ResourceError> {
        let c_name = CString::new(name.as_bytes()).map_err(|_| ShaderError::AttributeNotFound {
            name: name.to_string(),
        })?;
        let location = unsafe { gl::GetAttribLocation(program.0, c_name.as_ptr() as *const GLchar) };
        if location < 0 {
            return Err(ShaderError::AttributeNotFound {
                name: name.to_string(),
            }
            .into());
        }
        Ok(AttributeLocation(location as u32))
    }

    fn uniform_location(
        &self,
        program: ProgramId,
        name: &str,
    ) -> Result<UniformLocation, ResourceError> {
        let c_name = CString::new(name.as_bytes()).map_err(|_| ShaderError::UniformNotFound {
            name: name.to_string(),
        })?;
        let location =
            unsafe { gl::GetUniformLocation(program.0, c_name.as_ptr() as *const GLchar) };
        if location < 0 {
            return Err(ShaderError::UniformNotFound {
                name: name.to_string(),
            }
            .into());
        }
        Ok(UniformLocation(location))
    }

    fn set_uniform_f32(&self, location: UniformLocation, value: f32) {
        unsafe { gl::Uniform1f(location.0, value) };
    }

    fn set_uniform_i32(&self, location: UniformLocation, value: i32) {
        unsafe { gl::Uniform1i(location.0, value) };
    }

    fn set_uniform_vec4(&self, location: UniformLocation, value: [f32; 4]) {
        unsafe { gl::Uniform4fv(location.0, 1, value.as_ptr()) };
    }

    fn set_uniform_mat4(&self, location: UniformLocation, value: &[f32; 16]) {
        unsafe { gl::UniformMatrix4fv(location.0, 1, gl::FALSE, value.as_ptr()) };
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, ResourceError> {
        let mut handle: GLuint = 0;
        unsafe { gl::GenVertexArrays(1, &mut handle) };
        if handle == 0 {
            return Err(ResourceError::BackendError(
                "glGenVertexArrays returned no name".to_string(),
            ));
        }
        Ok(VertexArrayId(handle))
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>) {
        unsafe { gl::BindVertexArray(vertex_array.map_or(0, |v| v.0)) };
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayId) {
        unsafe { gl::DeleteVertexArrays(1, &vertex_array.0) };
    }

    fn create_buffer(&self) -> Result<BufferId, ResourceError> {
        let mut handle: GLuint = 0;
        unsafe { gl::GenBuffers(1, &mut handle) };
        if handle == 0 {
            return Err(ResourceError::BackendError(
                "glGenBuffers returned no name".to_string(),
            ));
        }
        Ok(BufferId(handle))
    }

    fn bind_array_buffer(&self, buffer: Option<BufferId>) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, buffer.map_or(0, |b| b.0)) };
    }

    fn upload_array_buffer(&self, data: &[u8], usage: BufferUsage) {
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                buffer_usage(usage),
            );
        }
    }

    fn delete_buffer(&self, buffer: BufferId) {
        unsafe { gl::DeleteBuffers(1, &buffer.0) };
    }

    fn enable_vertex_attribute(
        &self,
        location: AttributeLocation,
        attribute: &VertexAttributeDescriptor,
        stride: u32,
    ) {
        unsafe {
            gl::EnableVertexAttribArray(location.0);
            gl::VertexAttribPointer(
                location.0,
                attribute.format.component_count() as GLint,
                gl::FLOAT,
                gl::FALSE,
                stride as GLsizei,
                attribute.offset as usize as *const c_void,
            );
        }
    }

    fn create_texture(&self) -> Result<TextureId, ResourceError> {
        let mut handle: GLuint = 0;
        unsafe { gl::GenTextures(1, &mut handle) };
        if handle == 0 {
            return Err(ResourceError::BackendError(
                "glGenTextures returned no name".to_string(),
            ));
        }
        Ok(TextureId(handle))
    }

    fn bind_texture(&self, texture: Option<TextureId>) {
        unsafe { gl::BindTexture(gl::TEXTURE_2D, texture.map_or(0, |t| t.0)) };
    }

    fn upload_texture_2d(&self, image: &ImageData) {
        let format = pixel_format(image.format);
        unsafe {
            // Non-power-of-two sources must clamp to edge.
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format as GLint,
                image.width as GLsizei,
                image.height as GLsizei,
                0,
                format,
                gl::UNSIGNED_BYTE,
                image.pixels.as_ptr() as *const c_void,
            );
        }
    }

    fn generate_mipmaps(&self) {
        unsafe { gl::GenerateMipmap(gl::TEXTURE_2D) };
    }

    fn set_active_texture_unit(&self, unit: u32) {
        unsafe { gl::ActiveTexture(gl::TEXTURE0 + unit) };
    }

    fn delete_texture(&self, texture: TextureId) {
        unsafe { gl::DeleteTextures(1, &texture.0) };
    }

    fn set_clear_color(&self, color: LinearRgba) {
        unsafe { gl::ClearColor(color.r, color.g, color.b, color.a) };
    }

    fn clear(&self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }

    fn draw_arrays(&self, primitive: PrimitiveTopology, first: u32, count: u32) {
        unsafe { gl::DrawArrays(topology(primitive), first as GLint, count as GLsizei) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_kinds_map_to_distinct_gl_enums() {
        let kinds = [
            stage_kind(ShaderStage::Vertex),
            stage_kind(ShaderStage::Fragment),
            stage_kind(ShaderStage::Geometry),
            stage_kind(ShaderStage::Compute),
            stage_kind(ShaderStage::TessControl),
            stage_kind(ShaderStage::TessEvaluation),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn usage_hints_map_to_draw_variants() {
        assert_eq!(buffer_usage(BufferUsage::Static), gl::STATIC_DRAW);
        assert_eq!(buffer_usage(BufferUsage::Dynamic), gl::DYNAMIC_DRAW);
        assert_eq!(buffer_usage(BufferUsage::Stream), gl::STREAM_DRAW);
    }
}
