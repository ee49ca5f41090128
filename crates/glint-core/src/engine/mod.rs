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

//! The engine controller.
//!
//! [`Engine`] is the single top-level object of the harness: it owns the
//! window, the graphics device handle, and the four GPU resources, and it
//! drives them through a strict lifecycle of `init → run → close` guarded
//! by the [`EngineStatus`] transition table. It is constructed exactly once
//! at the program's entry point and passed explicitly; nothing reaches it
//! through global state.
//!
//! Failure handling follows one rule everywhere: detect close to the
//! source, log it, force the status to an error state via [`Engine::stop`],
//! and let the outer drive observe the status. Nothing panics and nothing
//! is retried.

pub mod config;
pub mod error;
pub mod status;

pub use config::{EngineConfig, WindowConfig, WindowMode};
pub use error::EngineError;
pub use status::{EngineStatus, Transition};

use crate::asset::AssetStore;
use crate::math::LinearRgba;
use crate::mesh::{self, Vertex};
use crate::platform::{Platform, PlatformEvent, PlatformWindow};
use crate::renderer::api::{BufferUsage, PrimitiveTopology, ShaderStage};
use crate::renderer::error::{ResourceError, ShaderError};
use crate::renderer::resources::{GpuBuffer, GpuTexture, GpuVertexArray};
use crate::renderer::shader::ShaderProgram;
use crate::renderer::traits::GraphicsDevice;
use std::sync::Arc;

/// Name of the vec4 color uniform in the fragment stage.
const COLOR_UNIFORM: &str = "color";

/// Name of the sampler uniform in the fragment stage.
const TEXTURE_UNIFORM: &str = "diffuseTexture";

/// Texture unit the single texture is bound to.
const TEXTURE_UNIT: u32 = 0;

/// The uniform color modulating the textured quad.
const QUAD_COLOR: LinearRgba = LinearRgba::MAGENTA;

/// Keys that request a quit while held.
const QUIT_KEYS: [&str; 2] = ["Escape", "Delete"];

/// The top-level engine controller.
///
/// Owns every resource of the harness for exactly its own active lifetime.
/// The GPU resource fields are declared in teardown order — vertex array,
/// vertex buffer, shader program, texture, device, window — so that even an
/// early drop of the whole engine releases them in the order [`Engine::close`]
/// states explicitly: the window/context must go last.
pub struct Engine {
    status: EngineStatus,
    quit_requested: bool,
    vao: Option<GpuVertexArray>,
    vbo: Option<GpuBuffer>,
    shader: Option<ShaderProgram>,
    texture: Option<GpuTexture>,
    device: Option<Arc<dyn GraphicsDevice>>,
    window: Option<Box<dyn PlatformWindow>>,
    platform: Box<dyn Platform>,
    assets: Box<dyn AssetStore>,
    config: EngineConfig,
    vertices: Vec<Vertex>,
}

impl Engine {
    /// Creates an uninitialized engine over its two collaborators.
    pub fn new(
        platform: Box<dyn Platform>,
        assets: Box<dyn AssetStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            status: EngineStatus::NotStarted,
            quit_requested: false,
            vao: None,
            vbo: None,
            shader: None,
            texture: None,
            device: None,
            window: None,
            platform,
            assets,
            config,
            vertices: Vec::new(),
        }
    }

    /// The current lifecycle status.
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// False once a quit has been requested.
    pub fn is_running(&self) -> bool {
        !self.quit_requested
    }

    /// True if the status marks a failed run.
    pub fn has_failed(&self) -> bool {
        self.status.is_failure()
    }

    /// Requests a status transition.
    ///
    /// Returns whether the transition was legal. On an illegal request the
    /// engine has already been forced into [`EngineStatus::Error`] when
    /// this returns: a caller that ignores the result still leaves the
    /// system in a well-defined state.
    pub fn set_status(&mut self, requested: EngineStatus) -> bool {
        let transition = EngineStatus::transition(self.status, requested);
        if !transition.allowed {
            log::error!(
                "Engine may not enter {:?} from {:?}; forcing {:?}",
                requested,
                self.status,
                transition.next
            );
        }
        self.status = transition.next;
        transition.allowed
    }

    /// Requests a quit and reports the run as failed.
    ///
    /// This is the channel for fatal errors detected anywhere in the
    /// harness, and — faithful to the original — also the path a
    /// user-initiated quit takes.
    pub fn stop(&mut self) {
        self.stop_with(EngineStatus::Error);
    }

    /// Requests a quit with an explicit terminal code. The transition to
    /// `code` is guarded like any other; an illegal code lands in
    /// [`EngineStatus::Error`].
    pub fn stop_with(&mut self, code: EngineStatus) {
        log::info!("Stopping engine");
        self.quit_requested = true;
        self.set_status(code);
    }

    /// Initializes every subsystem in dependency order.
    ///
    /// Fail-fast: the first failing step logs, forces an error status, and
    /// aborts the remaining steps.
    pub fn init(&mut self) -> Result<(), EngineError> {
        let current = self.status;
        if !self.set_status(EngineStatus::Starting) {
            return Err(EngineError::GuardViolation {
                current,
                requested: EngineStatus::Starting,
            });
        }

        log::debug!("Initializing engine subsystems");

        let (window, device) = match self.platform.create_window(&self.config.window) {
            Ok(created) => created,
            Err(error) => {
                log::error!("Failed to create window: {error}");
                self.stop();
                return Err(error.into());
            }
        };
        self.window = Some(window);
        self.device = Some(device.clone());

        self.vertices = mesh::fullscreen_quad();

        if let Err(error) = self.init_shader(&device) {
            log::error!("Failed to build shader program: {error}");
            self.stop();
            return Err(error);
        }

        if let Err(error) = self.init_vertex_state(&device) {
            log::error!("Failed to set up vertex state: {error}");
            self.stop();
            return Err(error);
        }

        if let Err(error) = self.init_texture(&device) {
            log::error!("Failed to load texture: {error}");
            self.stop();
            return Err(error);
        }

        device.set_clear_color(self.config.clear_color);

        log::debug!("Initialized all engine subsystems");
        Ok(())
    }

    /// Compiles and links the configured shader files, stage keyed by file
    /// extension.
    fn init_shader(&mut self, device: &Arc<dyn GraphicsDevice>) -> Result<(), EngineError> {
        let mut shader = ShaderProgram::new(device.clone())?;
        for file_name in &self.config.shaders {
            let stage = ShaderStage::from_file_name(file_name).ok_or_else(|| {
                ResourceError::from(ShaderError::UnknownStage {
                    file_name: file_name.clone(),
                })
            })?;
            log::debug!("adding shader {file_name}");
            let source = self.assets.load_shader_source(file_name)?;
            shader.add_stage_source(stage, &source)?;
        }
        shader.link()?;
        self.shader = Some(shader);
        Ok(())
    }

    /// Creates the vertex array and buffer, uploads the quad, and wires the
    /// attributes through the shader's locations. Unbinds buffer first,
    /// then array.
    fn init_vertex_state(&mut self, device: &Arc<dyn GraphicsDevice>) -> Result<(), EngineError> {
        let Some(shader) = self.shader.as_ref() else {
            return Err(ResourceError::InvalidHandle.into());
        };

        let vao = GpuVertexArray::new(device.clone())?;
        vao.bind();

        let vbo = GpuBuffer::new(device.clone())?;
        vbo.upload(bytemuck::cast_slice(&self.vertices), BufferUsage::Static);

        shader.configure_attributes(&Vertex::layout())?;

        vbo.unbind();
        vao.unbind();

        self.vao = Some(vao);
        self.vbo = Some(vbo);
        Ok(())
    }

    /// Decodes the configured image and uploads it; the pixel buffer is
    /// freed inside [`GpuTexture::from_image`] right after the upload.
    fn init_texture(&mut self, device: &Arc<dyn GraphicsDevice>) -> Result<(), EngineError> {
        let image = self.assets.load_image(&self.config.texture)?;
        let texture = GpuTexture::from_image(device.clone(), image)?;
        self.texture = Some(texture);
        Ok(())
    }

    /// Runs the main loop until a quit is requested.
    pub fn run(&mut self) -> Result<(), EngineError> {
        let current = self.status;
        if !self.set_status(EngineStatus::Running) {
            return Err(EngineError::GuardViolation {
                current,
                requested: EngineStatus::Running,
            });
        }

        while self.is_running() {
            self.frame();
        }

        Ok(())
    }

    /// One frame: poll events, clear, draw, present — in exactly that
    /// order. If the event poll observes a quit, the frame ends there: no
    /// clear, draw, or present happens on the frame a quit is detected.
    pub fn frame(&mut self) {
        self.handle_window_events();
        if self.quit_requested {
            return;
        }
        self.before_draw();
        self.draw_screen();
        self.after_draw();
    }

    /// Drains the event queue, then checks the held quit keys.
    fn handle_window_events(&mut self) {
        let events = match self.window.as_mut() {
            Some(window) => window.poll_events(),
            None => return,
        };

        for event in events {
            match event {
                PlatformEvent::Quit => {
                    self.stop();
                    return;
                }
                PlatformEvent::Resized { width, height } => {
                    log::debug!("window resized to {width}x{height}");
                }
                PlatformEvent::KeyPressed { key_code } => {
                    log::debug!("KEYDOWN: {key_code}");
                }
                PlatformEvent::KeyReleased { key_code } => {
                    log::debug!("KEYUP: {key_code}");
                }
                other => log::trace!("platform event: {other:?}"),
            }
        }

        let quit_key_held = self
            .window
            .as_ref()
            .is_some_and(|window| QUIT_KEYS.iter().any(|key| window.is_key_down(key)));
        if quit_key_held {
            self.stop();
        }
    }

    /// Clears the color buffer.
    fn before_draw(&mut self) {
        if let Some(device) = self.device.as_ref() {
            device.clear();
        }
    }

    /// Draws the textured quad. A failure (a uniform that went missing, a
    /// program that no longer validates) logs and stops the engine; the
    /// status is the channel the outer drive observes.
    fn draw_screen(&mut self) {
        let result = match (
            self.device.as_ref(),
            self.shader.as_ref(),
            self.vao.as_ref(),
            self.texture.as_ref(),
        ) {
            (Some(device), Some(shader), Some(vao), Some(texture)) => draw_quad(
                device.as_ref(),
                shader,
                vao,
                texture,
                self.vertices.len() as u32,
            ),
            _ => return,
        };

        if let Err(error) = result {
            log::error!("Failed to draw frame: {error}");
            self.stop();
        }
    }

    /// Presents the back buffer.
    fn after_draw(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.swap_buffers();
        }
    }

    /// Releases every owned resource, then attempts the final transition.
    ///
    /// Teardown runs unconditionally and in strict reverse dependency
    /// order; only afterwards is `Running → Done` attempted. When the
    /// engine was not in `Running` (startup aborted early, or a quit
    /// already moved it to an error state) that transition fails and is
    /// reported — but the resources are gone either way.
    pub fn close(&mut self) -> Result<(), EngineError> {
        drop(self.vao.take());
        drop(self.vbo.take());
        drop(self.shader.take());
        drop(self.texture.take());
        drop(self.device.take());
        // The window owns the context; it must outlive every GL object.
        drop(self.window.take());

        let current = self.status;
        if !self.set_status(EngineStatus::Done) {
            return Err(EngineError::GuardViolation {
                current,
                requested: EngineStatus::Done,
            });
        }
        Ok(())
    }

    /// Drives the full lifecycle and returns the process exit code.
    ///
    /// Four gates: a failed `init`, `run`, or `close` each yield 1, and a
    /// terminal error status yields 1 even when all three reported
    /// success.
    pub fn start(&mut self) -> i32 {
        if let Err(error) = self.init() {
            log::error!("Failed to initialize: {error}");
            return 1;
        }

        if let Err(error) = self.run() {
            log::error!("Failed to start main loop: {error}");
            return 1;
        }

        if let Err(error) = self.close() {
            log::error!("Failed to free resources and close window: {error}");
            return 1;
        }

        if self.has_failed() {
            return 1;
        }

        0
    }
}

/// The fixed draw sequence for the quad: program (validated) → uniforms →
/// vertex array → draw → unbind array → unbind program.
fn draw_quad(
    device: &dyn GraphicsDevice,
    shader: &ShaderProgram,
    vao: &GpuVertexArray,
    texture: &GpuTexture,
    vertex_count: u32,
) -> Result<(), ResourceError> {
    shader.bind()?;
    shader.bind_uniform_color(COLOR_UNIFORM, QUAD_COLOR)?;
    shader.activate_texture_2d(TEXTURE_UNIT, texture.id(), TEXTURE_UNIFORM)?;

    vao.bind();
    device.draw_arrays(PrimitiveTopology::Triangles, 0, vertex_count);
    vao.unbind();

    shader.unbind();
    Ok(())
}
