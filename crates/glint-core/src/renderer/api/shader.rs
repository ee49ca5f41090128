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

//! Shader stage kinds and the opaque program/stage handles.

/// A programmable pipeline stage.
///
/// The file extensions follow the OpenGL ES reference compiler convention:
/// `.vert`, `.frag`, `.geom`, `.comp`, `.tesc`, `.tese`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage. The only stage a program cannot link without.
    Vertex,
    /// Fragment stage.
    Fragment,
    /// Geometry stage.
    Geometry,
    /// Compute stage.
    Compute,
    /// Tessellation control stage.
    TessControl,
    /// Tessellation evaluation stage.
    TessEvaluation,
}

impl ShaderStage {
    /// Number of stage kinds; sizes the per-program stage slot array.
    pub const COUNT: usize = 6;

    /// The slot index of this stage kind.
    pub fn index(self) -> usize {
        match self {
            ShaderStage::Vertex => 0,
            ShaderStage::Fragment => 1,
            ShaderStage::Geometry => 2,
            ShaderStage::Compute => 3,
            ShaderStage::TessControl => 4,
            ShaderStage::TessEvaluation => 5,
        }
    }

    /// Maps a source file name to its stage kind via the file extension.
    /// Returns `None` for unknown or missing extensions.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension {
            "vert" => Some(ShaderStage::Vertex),
            "frag" => Some(ShaderStage::Fragment),
            "geom" => Some(ShaderStage::Geometry),
            "comp" => Some(ShaderStage::Compute),
            "tesc" => Some(ShaderStage::TessControl),
            "tese" => Some(ShaderStage::TessEvaluation),
            _ => None,
        }
    }
}

/// An opaque handle to a linked (or linkable) shader program object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// An opaque handle to one compiled shader stage object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageId(pub u32);

/// The location of a vertex attribute within a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeLocation(pub u32);

/// The location of a uniform within a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_selects_the_stage() {
        assert_eq!(
            ShaderStage::from_file_name("main.vert"),
            Some(ShaderStage::Vertex)
        );
        assert_eq!(
            ShaderStage::from_file_name("main.frag"),
            Some(ShaderStage::Fragment)
        );
        assert_eq!(
            ShaderStage::from_file_name("sky.geom"),
            Some(ShaderStage::Geometry)
        );
        assert_eq!(
            ShaderStage::from_file_name("cull.comp"),
            Some(ShaderStage::Compute)
        );
        assert_eq!(
            ShaderStage::from_file_name("patch.tesc"),
            Some(ShaderStage::TessControl)
        );
        assert_eq!(
            ShaderStage::from_file_name("patch.tese"),
            Some(ShaderStage::TessEvaluation)
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert_eq!(ShaderStage::from_file_name("main.glsl"), None);
        assert_eq!(ShaderStage::from_file_name("no_extension"), None);
    }

    #[test]
    fn stage_indices_are_distinct_slots() {
        let stages = [
            ShaderStage::Vertex,
            ShaderStage::Fragment,
            ShaderStage::Geometry,
            ShaderStage::Compute,
            ShaderStage::TessControl,
            ShaderStage::TessEvaluation,
        ];
        for (i, a) in stages.iter().enumerate() {
            assert!(a.index() < ShaderStage::COUNT);
            for b in &stages[i + 1..] {
                assert_ne!(a.index(), b.index());
            }
        }
    }
}
