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

//! The owned shader program resource.

use crate::math::LinearRgba;
use crate::renderer::api::{
    ProgramId, ShaderStage, StageId, TextureId, VertexLayout, GUARANTEED_TEXTURE_UNITS,
};
use crate::renderer::error::{ResourceError, ShaderError};
use crate::renderer::traits::GraphicsDevice;
use std::sync::Arc;

/// A shader program plus its not-yet-linked stage objects.
///
/// Up to one compiled object per [`ShaderStage`] kind may be held before
/// linking. Linking requires the vertex stage, and releases every per-stage
/// object afterwards: from then on only the linked program handle is alive.
/// The program object itself is released when the value drops.
#[derive(Debug)]
pub struct ShaderProgram {
    device: Arc<dyn GraphicsDevice>,
    program: ProgramId,
    stages: [Option<StageId>; ShaderStage::COUNT],
}

impl ShaderProgram {
    /// Creates an empty program on `device`.
    pub fn new(device: Arc<dyn GraphicsDevice>) -> Result<Self, ResourceError> {
        let program = device.create_program()?;
        Ok(Self {
            device,
            program,
            stages: [None; ShaderStage::COUNT],
        })
    }

    /// The program handle.
    pub fn id(&self) -> ProgramId {
        self.program
    }

    /// Compiles `source` and stores the stage object in its slot.
    /// A stage already occupying the slot is released first.
    pub fn add_stage_source(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<(), ResourceError> {
        let compiled = self.device.compile_stage(stage, source)?;
        if let Some(previous) = self.stages[stage.index()].take() {
            self.device.delete_stage(previous);
        }
        self.stages[stage.index()] = Some(compiled);
        Ok(())
    }

    /// Attaches every held stage, links, and validates.
    ///
    /// The per-stage objects are detached and released whether or not the
    /// link succeeds; a shader object attached to a program would only be
    /// flagged for deletion, so detach always comes first.
    pub fn link(&mut self) -> Result<(), ResourceError> {
        log::debug!("linking shaders");

        if self.stages[ShaderStage::Vertex.index()].is_none() {
            return Err(ShaderError::MissingVertexStage.into());
        }

        for stage in self.stages.iter().flatten() {
            self.device.attach_stage(self.program, *stage);
        }

        let outcome = self
            .device
            .link_program(self.program)
            .and_then(|()| self.device.validate_program(self.program));

        for slot in self.stages.iter_mut() {
            if let Some(stage) = slot.take() {
                self.device.detach_stage(self.program, stage);
                self.device.delete_stage(stage);
            }
        }

        outcome
    }

    /// Validates against the current state and makes the program current.
    /// Validation runs here because it is only meaningful just before a
    /// draw is issued.
    pub fn bind(&self) -> Result<(), ResourceError> {
        self.device.validate_program(self.program)?;
        self.device.use_program(Some(self.program));
        Ok(())
    }

    /// Unbinds whatever program is current.
    pub fn unbind(&self) {
        self.device.use_program(None);
    }

    /// Uploads a color to the named vec4 uniform.
    pub fn bind_uniform_color(&self, name: &str, color: LinearRgba) -> Result<(), ResourceError> {
        let location = self.device.uniform_location(self.program, name)?;
        self.device.set_uniform_vec4(location, color.to_array());
        Ok(())
    }

    /// Uploads a scalar to the named float uniform.
    pub fn bind_uniform_f32(&self, name: &str, value: f32) -> Result<(), ResourceError> {
        let location = self.device.uniform_location(self.program, name)?;
        self.device.set_uniform_f32(location, value);
        Ok(())
    }

    /// Uploads a column-major matrix to the named mat4 uniform.
    pub fn bind_uniform_mat4(&self, name: &str, value: &[f32; 16]) -> Result<(), ResourceError> {
        let location = self.device.uniform_location(self.program, name)?;
        self.device.set_uniform_mat4(location, value);
        Ok(())
    }

    /// Binds `texture` to texture unit `unit` and points the named sampler
    /// uniform at it. The unit index is checked against the guaranteed
    /// bound before any state changes.
    pub fn activate_texture_2d(
        &self,
        unit: u32,
        texture: TextureId,
        uniform_name: &str,
    ) -> Result<(), ResourceError> {
        if unit >= GUARANTEED_TEXTURE_UNITS {
            return Err(ResourceError::TextureUnitOutOfRange { unit });
        }
        self.device.set_active_texture_unit(unit);
        self.device.bind_texture(Some(texture));
        let location = self.device.uniform_location(self.program, uniform_name)?;
        self.device.set_uniform_i32(location, unit as i32);
        Ok(())
    }

    /// Enables and describes every attribute of `layout`, using this
    /// program's attribute locations. The target buffer and vertex array
    /// must be bound by the caller.
    pub fn configure_attributes(&self, layout: &VertexLayout) -> Result<(), ResourceError> {
        for attribute in &layout.attributes {
            let location = self
                .device
                .attribute_location(self.program, attribute.name)?;
            self.device
                .enable_vertex_attribute(location, attribute, layout.stride);
        }
        Ok(())
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        for slot in self.stages.iter_mut() {
            if let Some(stage) = slot.take() {
                self.device.detach_stage(self.program, stage);
                self.device.delete_stage(stage);
            }
        }
        self.device.delete_program(self.program);
    }
}
