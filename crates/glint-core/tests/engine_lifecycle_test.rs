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

//! Lifecycle tests driving the engine against recording mock collaborators.

use glint_core::asset::{AssetError, AssetStore, ImageData};
use glint_core::engine::{Engine, EngineConfig, EngineStatus, WindowConfig};
use glint_core::platform::{Platform, PlatformError, PlatformEvent, PlatformWindow};
use glint_core::renderer::api::{
    AttributeLocation, BufferId, BufferUsage, PixelFormat, PrimitiveTopology, ProgramId,
    ShaderStage, StageId, TextureId, UniformLocation, VertexArrayId, VertexAttributeDescriptor,
};
use glint_core::renderer::error::{ResourceError, ShaderError};
use glint_core::renderer::traits::GraphicsDevice;
use glint_core::math::LinearRgba;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

type CallLog = Arc<Mutex<Vec<String>>>;

fn record(log: &CallLog, entry: &str) {
    log.lock().unwrap().push(entry.to_string());
}

/// Index of the first `entry` in the log; panics when absent.
fn position(log: &CallLog, entry: &str) -> usize {
    let log = log.lock().unwrap();
    log.iter()
        .position(|e| e == entry)
        .unwrap_or_else(|| panic!("'{entry}' not recorded in {log:?}"))
}

fn count(log: &CallLog, entry: &str) -> usize {
    log.lock().unwrap().iter().filter(|e| *e == entry).count()
}

#[derive(Debug)]
struct MockGraphicsDevice {
    log: CallLog,
    next_id: Mutex<u32>,
    fail_compile: bool,
}

impl MockGraphicsDevice {
    fn new(log: CallLog, fail_compile: bool) -> Self {
        Self {
            log,
            next_id: Mutex::new(1),
            fail_compile,
        }
    }

    fn next(&self) -> u32 {
        let mut next_id = self.next_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;
        id
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_program(&self) -> Result<ProgramId, ResourceError> {
        record(&self.log, "create_program");
        Ok(ProgramId(self.next()))
    }

    fn compile_stage(&self, stage: ShaderStage, _source: &str) -> Result<StageId, ResourceError> {
        if self.fail_compile {
            return Err(ShaderError::CompilationFailed {
                stage,
                details: "mock compile failure".to_string(),
            }
            .into());
        }
        Ok(StageId(self.next()))
    }

    fn attach_stage(&self, _program: ProgramId, _stage: StageId) {}

    fn link_program(&self, _program: ProgramId) -> Result<(), ResourceError> {
        record(&self.log, "link_program");
        Ok(())
    }

    fn validate_program(&self, _program: ProgramId) -> Result<(), ResourceError> {
        Ok(())
    }

    fn detach_stage(&self, _program: ProgramId, _stage: StageId) {}

    fn delete_stage(&self, _stage: StageId) {
        record(&self.log, "delete_stage");
    }

    fn delete_program(&self, _program: ProgramId) {
        record(&self.log, "delete_program");
    }

    fn use_program(&self, _program: Option<ProgramId>) {}

    fn attribute_location(
        &self,
        _program: ProgramId,
        _name: &str,
    ) -> Result<AttributeLocation, ResourceError> {
        Ok(AttributeLocation(0))
    }

    fn uniform_location(
        &self,
        _program: ProgramId,
        _name: &str,
    ) -> Result<UniformLocation, ResourceError> {
        Ok(UniformLocation(0))
    }

    fn set_uniform_f32(&self, _location: UniformLocation, _value: f32) {}
    fn set_uniform_i32(&self, _location: UniformLocation, _value: i32) {}
    fn set_uniform_vec4(&self, _location: UniformLocation, _value: [f32; 4]) {}
    fn set_uniform_mat4(&self, _location: UniformLocation, _value: &[f32; 16]) {}

    fn create_vertex_array(&self) -> Result<VertexArrayId, ResourceError> {
        Ok(VertexArrayId(self.next()))
    }

    fn bind_vertex_array(&self, _vertex_array: Option<VertexArrayId>) {}

    fn delete_vertex_array(&self, _vertex_array: VertexArrayId) {
        record(&self.log, "delete_vertex_array");
    }

    fn create_buffer(&self) -> Result<BufferId, ResourceError> {
        Ok(BufferId(self.next()))
    }

    fn bind_array_buffer(&self, _buffer: Option<BufferId>) {}

    fn upload_array_buffer(&self, data: &[u8], _usage: BufferUsage) {
        record(&self.log, &format!("upload_array_buffer:{}", data.len()));
    }

    fn delete_buffer(&self, _buffer: BufferId) {
        record(&self.log, "delete_buffer");
    }

    fn enable_vertex_attribute(
        &self,
        _location: AttributeLocation,
        _attribute: &VertexAttributeDescriptor,
        _stride: u32,
    ) {
    }

    fn create_texture(&self) -> Result<TextureId, ResourceError> {
        Ok(TextureId(self.next()))
    }

    fn bind_texture(&self, _texture: Option<TextureId>) {}

    fn upload_texture_2d(&self, _image: &ImageData) {
        record(&self.log, "upload_texture_2d");
    }

    fn generate_mipmaps(&self) {}
    fn set_active_texture_unit(&self, _unit: u32) {}

    fn delete_texture(&self, _texture: TextureId) {
        record(&self.log, "delete_texture");
    }

    fn set_clear_color(&self, _color: LinearRgba) {}

    fn clear(&self) {
        record(&self.log, "clear");
    }

    fn draw_arrays(&self, _topology: PrimitiveTopology, _first: u32, count: u32) {
        record(&self.log, &format!("draw_arrays:{count}"));
    }
}

struct MockWindow {
    log: CallLog,
    events: Arc<Mutex<VecDeque<PlatformEvent>>>,
    held_keys: Arc<Mutex<HashSet<String>>>,
}

impl PlatformWindow for MockWindow {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        record(&self.log, "poll_events");
        self.events.lock().unwrap().drain(..).collect()
    }

    fn is_key_down(&self, key_code: &str) -> bool {
        self.held_keys.lock().unwrap().contains(key_code)
    }

    fn swap_buffers(&mut self) {
        record(&self.log, "swap_buffers");
    }

    fn size(&self) -> (u32, u32) {
        (640, 480)
    }

    fn set_title(&mut self, _title: &str) {}
}

impl Drop for MockWindow {
    fn drop(&mut self) {
        record(&self.log, "drop_window");
    }
}

struct MockPlatform {
    log: CallLog,
    events: Arc<Mutex<VecDeque<PlatformEvent>>>,
    held_keys: Arc<Mutex<HashSet<String>>>,
    fail_window: bool,
    fail_compile: bool,
}

impl Platform for MockPlatform {
    fn create_window(
        &mut self,
        _config: &WindowConfig,
    ) -> Result<(Box<dyn PlatformWindow>, Arc<dyn GraphicsDevice>), PlatformError> {
        if self.fail_window {
            return Err(PlatformError::WindowCreation(
                "mock window failure".to_string(),
            ));
        }
        let window = MockWindow {
            log: self.log.clone(),
            events: self.events.clone(),
            held_keys: self.held_keys.clone(),
        };
        let device = MockGraphicsDevice::new(self.log.clone(), self.fail_compile);
        Ok((Box::new(window), Arc::new(device)))
    }
}

struct MockAssets;

impl AssetStore for MockAssets {
    fn load_shader_source(&self, file_name: &str) -> Result<String, AssetError> {
        Ok(format!("// {file_name}\nvoid main() {{}}\n"))
    }

    fn load_image(&self, _file_name: &str) -> Result<ImageData, AssetError> {
        Ok(ImageData {
            width: 2,
            height: 2,
            format: PixelFormat::Rgba8,
            pixels: vec![0xff; 16],
        })
    }
}

struct Mocks {
    log: CallLog,
    events: Arc<Mutex<VecDeque<PlatformEvent>>>,
    held_keys: Arc<Mutex<HashSet<String>>>,
}

fn engine_with_mocks(fail_window: bool, fail_compile: bool) -> (Engine, Mocks) {
    let mocks = Mocks {
        log: Arc::new(Mutex::new(Vec::new())),
        events: Arc::new(Mutex::new(VecDeque::new())),
        held_keys: Arc::new(Mutex::new(HashSet::new())),
    };
    let platform = MockPlatform {
        log: mocks.log.clone(),
        events: mocks.events.clone(),
        held_keys: mocks.held_keys.clone(),
        fail_window,
        fail_compile,
    };
    let engine = Engine::new(
        Box::new(platform),
        Box::new(MockAssets),
        EngineConfig::default(),
    );
    (engine, mocks)
}

#[test]
fn frame_executes_the_four_step_order() {
    let (mut engine, mocks) = engine_with_mocks(false, false);
    engine.init().unwrap();

    engine.frame();

    assert!(position(&mocks.log, "poll_events") < position(&mocks.log, "clear"));
    assert!(position(&mocks.log, "clear") < position(&mocks.log, "draw_arrays:6"));
    assert!(position(&mocks.log, "draw_arrays:6") < position(&mocks.log, "swap_buffers"));
    assert!(engine.is_running());
}

#[test]
fn quit_event_short_circuits_the_frame() {
    let (mut engine, mocks) = engine_with_mocks(false, false);
    engine.init().unwrap();
    mocks.events.lock().unwrap().push_back(PlatformEvent::Quit);

    engine.frame();

    assert!(!engine.is_running());
    assert_eq!(engine.status(), EngineStatus::Error);
    assert_eq!(count(&mocks.log, "clear"), 0);
    assert_eq!(count(&mocks.log, "draw_arrays:6"), 0);
    assert_eq!(count(&mocks.log, "swap_buffers"), 0);
}

#[test]
fn held_quit_key_stops_without_drawing() {
    let (mut engine, mocks) = engine_with_mocks(false, false);
    engine.init().unwrap();
    mocks.held_keys.lock().unwrap().insert("Escape".to_string());

    engine.frame();

    assert!(!engine.is_running());
    assert_eq!(count(&mocks.log, "draw_arrays:6"), 0);
}

#[test]
fn close_releases_resources_in_reverse_dependency_order() {
    let (mut engine, mocks) = engine_with_mocks(false, false);
    engine.init().unwrap();

    // Startup never reached Running, so the final transition is rejected,
    // but the teardown must have run regardless.
    assert!(engine.close().is_err());
    assert_eq!(engine.status(), EngineStatus::Error);

    let vao = position(&mocks.log, "delete_vertex_array");
    let vbo = position(&mocks.log, "delete_buffer");
    let program = position(&mocks.log, "delete_program");
    let texture = position(&mocks.log, "delete_texture");
    let window = position(&mocks.log, "drop_window");
    assert!(vao < vbo && vbo < program && program < texture && texture < window);
}

#[test]
fn close_from_running_reports_success() {
    let (mut engine, _mocks) = engine_with_mocks(false, false);
    assert!(engine.set_status(EngineStatus::Starting));
    assert!(engine.set_status(EngineStatus::Running));

    assert!(engine.close().is_ok());
    assert_eq!(engine.status(), EngineStatus::Done);
    assert!(!engine.has_failed());
}

#[test]
fn status_ladder_succeeds_stepwise() {
    let (mut engine, _mocks) = engine_with_mocks(false, false);
    assert!(engine.set_status(EngineStatus::Starting));
    assert!(engine.set_status(EngineStatus::Running));
    assert!(engine.set_status(EngineStatus::Done));
    assert_eq!(engine.status(), EngineStatus::Done);
}

#[test]
fn skipping_starting_forces_error() {
    let (mut engine, _mocks) = engine_with_mocks(false, false);
    assert!(!engine.set_status(EngineStatus::Running));
    assert_eq!(engine.status(), EngineStatus::Error);
}

#[test]
fn stop_sets_the_quit_flag_and_is_idempotent() {
    let (mut engine, _mocks) = engine_with_mocks(false, false);

    engine.stop();
    assert!(!engine.is_running());
    assert_eq!(engine.status(), EngineStatus::Error);

    // The second call keeps the flag and applies its own code.
    engine.stop_with(EngineStatus::Crashed);
    assert!(!engine.is_running());
    assert_eq!(engine.status(), EngineStatus::Crashed);
}

#[test]
fn stop_with_a_legal_code_lands_on_that_code() {
    let (mut engine, _mocks) = engine_with_mocks(false, false);
    assert!(engine.set_status(EngineStatus::Starting));
    assert!(engine.set_status(EngineStatus::Running));

    engine.stop_with(EngineStatus::Done);
    assert!(!engine.is_running());
    assert_eq!(engine.status(), EngineStatus::Done);
}

#[test]
fn start_returns_one_when_window_creation_fails() {
    let (mut engine, _mocks) = engine_with_mocks(true, false);
    assert_eq!(engine.start(), 1);
    assert_eq!(engine.status(), EngineStatus::Error);
}

#[test]
fn start_returns_one_when_shader_compilation_fails() {
    let (mut engine, mocks) = engine_with_mocks(false, true);
    assert_eq!(engine.start(), 1);
    assert_eq!(engine.status(), EngineStatus::Error);

    // The window was created before the failure; dropping the engine must
    // still release it after the GPU-side objects.
    drop(engine);
    assert!(position(&mocks.log, "delete_program") < position(&mocks.log, "drop_window"));
}

#[test]
fn start_with_immediate_quit_tears_down_and_reports_failure() {
    let (mut engine, mocks) = engine_with_mocks(false, false);
    mocks.events.lock().unwrap().push_back(PlatformEvent::Quit);

    // The quit path transitions to Error before close runs, so the final
    // Running -> Done transition is rejected and start reports failure.
    assert_eq!(engine.start(), 1);
    assert_eq!(engine.status(), EngineStatus::Error);
    assert_eq!(count(&mocks.log, "draw_arrays:6"), 0);

    let vao = position(&mocks.log, "delete_vertex_array");
    let window = position(&mocks.log, "drop_window");
    assert!(vao < window);
}

#[test]
fn init_uploads_the_quad_and_the_texture() {
    let (mut engine, mocks) = engine_with_mocks(false, false);
    engine.init().unwrap();

    // Six vertices of 20 bytes each.
    assert_eq!(count(&mocks.log, "upload_array_buffer:120"), 1);
    assert_eq!(count(&mocks.log, "upload_texture_2d"), 1);
    assert!(position(&mocks.log, "link_program") < position(&mocks.log, "upload_array_buffer:120"));
    assert_eq!(engine.status(), EngineStatus::Starting);
}
