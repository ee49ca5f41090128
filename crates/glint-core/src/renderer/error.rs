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

//! Defines the hierarchy of error types for the rendering seam.

use crate::renderer::api::ShaderStage;
use std::fmt;

/// An error related to building or querying a shader program.
#[derive(Debug)]
pub enum ShaderError {
    /// The backend returned a null handle for a new object.
    CreationFailed {
        /// What was being created (`"program"` or `"stage"`).
        object: &'static str,
    },
    /// A stage's source failed to compile.
    CompilationFailed {
        /// The stage that failed.
        stage: ShaderStage,
        /// The compiler's info log.
        details: String,
    },
    /// The attached stages failed to link into a program.
    LinkFailed {
        /// The linker's info log.
        details: String,
    },
    /// The linked program failed validation against the current state.
    ValidationFailed {
        /// The validator's info log.
        details: String,
    },
    /// Link was requested without a compiled vertex stage.
    MissingVertexStage,
    /// A named vertex attribute is not active in the linked program.
    AttributeNotFound {
        /// The attribute name that was looked up.
        name: String,
    },
    /// A named uniform is not active in the linked program.
    UniformNotFound {
        /// The uniform name that was looked up.
        name: String,
    },
    /// A shader file name carries no recognized stage extension.
    UnknownStage {
        /// The offending file name.
        file_name: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::CreationFailed { object } => {
                write!(f, "Could not create shader {object}")
            }
            ShaderError::CompilationFailed { stage, details } => {
                write!(f, "Failed to compile {stage:?} stage: {details}")
            }
            ShaderError::LinkFailed { details } => {
                write!(f, "Failed to link shader program: {details}")
            }
            ShaderError::ValidationFailed { details } => {
                write!(f, "Shader program failed validation: {details}")
            }
            ShaderError::MissingVertexStage => {
                write!(f, "At least a vertex stage must be set before linking")
            }
            ShaderError::AttributeNotFound { name } => {
                write!(f, "Could not get attribute location of '{name}'")
            }
            ShaderError::UniformNotFound { name } => {
                write!(f, "Could not get uniform location of '{name}'")
            }
            ShaderError::UnknownStage { file_name } => {
                write!(f, "Unknown shader type for '{file_name}'")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error related to creating or using a GPU resource.
#[derive(Debug)]
pub enum ResourceError {
    /// A shader-specific error occurred.
    Shader(ShaderError),
    /// A handle was used after the resource behind it was released.
    InvalidHandle,
    /// A texture unit index exceeded the guaranteed bound.
    TextureUnitOutOfRange {
        /// The rejected unit index.
        unit: u32,
    },
    /// An error originating from the concrete graphics backend.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Shader(err) => write!(f, "Shader resource error: {err}"),
            ResourceError::InvalidHandle => write!(f, "Invalid resource handle."),
            ResourceError::TextureUnitOutOfRange { unit } => {
                write!(f, "Texture unit {unit} out of range.")
            }
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Shader(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderError> for ResourceError {
    fn from(err: ShaderError) -> Self {
        ResourceError::Shader(err)
    }
}
