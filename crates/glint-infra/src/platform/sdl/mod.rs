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

//! An SDL2 implementation of the platform seam.
//!
//! Creates the window with an OpenGL 3.3 core, forward-compatible context
//! and translates SDL events into the engine's [`PlatformEvent`] type.

use crate::graphics::GlGraphicsDevice;
use glint_core::engine::config::{WindowConfig, WindowMode};
use glint_core::platform::{Platform, PlatformError, PlatformEvent, PlatformWindow};
use glint_core::renderer::traits::GraphicsDevice;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;
use sdl2::video::{GLProfile, SwapInterval};
use std::os::raw::c_void;
use std::sync::Arc;

/// Creates SDL2-backed windows. The SDL context itself is brought up
/// lazily inside [`Platform::create_window`] and owned by the window.
#[derive(Debug, Default)]
pub struct SdlPlatform;

impl SdlPlatform {
    /// Creates the platform factory.
    pub fn new() -> Self {
        Self
    }
}

impl Platform for SdlPlatform {
    fn create_window(
        &mut self,
        config: &WindowConfig,
    ) -> Result<(Box<dyn PlatformWindow>, Arc<dyn GraphicsDevice>), PlatformError> {
        let sdl = sdl2::init().map_err(PlatformError::Init)?;
        let video = sdl.video().map_err(PlatformError::Init)?;

        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_flags().forward_compatible().set();
        gl_attr.set_context_major_version(3);
        gl_attr.set_context_minor_version(3);

        let mut builder = video.window(&config.title, config.width, config.height);
        builder.opengl();
        match config.mode {
            WindowMode::Windowed => {
                builder.position_centered();
            }
            WindowMode::Fullscreen => {
                builder.fullscreen();
            }
            WindowMode::BorderlessDesktop => {
                builder.fullscreen_desktop();
            }
        }

        let window = builder
            .build()
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;

        // The context must be kept alive for as long as any GL object
        // exists; SdlWindow owns it for exactly that span.
        let gl_context = window
            .gl_create_context()
            .map_err(PlatformError::ContextCreation)?;

        gl::load_with(|symbol| video.gl_get_proc_address(symbol) as *const c_void);

        if config.vsync {
            if let Err(error) = video.gl_set_swap_interval(SwapInterval::VSync) {
                log::warn!("Failed to enable vsync: {error}");
            }
        }

        log::debug!(
            "created GL {}.{} core context",
            gl_attr.context_major_version(),
            gl_attr.context_minor_version()
        );
        log::debug!(
            "framebuffer channel sizes: R{} G{} B{}",
            gl_attr.red_size(),
            gl_attr.green_size(),
            gl_attr.blue_size()
        );

        let event_pump = sdl.event_pump().map_err(PlatformError::Init)?;

        let window = SdlWindow {
            _sdl: sdl,
            window,
            _gl_context: gl_context,
            event_pump,
        };
        let device: Arc<dyn GraphicsDevice> = Arc::new(GlGraphicsDevice::new());

        log::info!(
            "SDL window created: '{}' {}x{}",
            config.title,
            config.width,
            config.height
        );
        Ok((Box::new(window), device))
    }
}

/// An open SDL2 window owning its GL context and the event pump.
pub struct SdlWindow {
    _sdl: sdl2::Sdl,
    window: sdl2::video::Window,
    // Dropping this destroys the GL context. It stays alive until the
    // window itself is dropped, which the engine does last.
    _gl_context: sdl2::video::GLContext,
    event_pump: sdl2::EventPump,
}

impl PlatformWindow for SdlWindow {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        let (width, height) = self.window.drawable_size();
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(PlatformEvent::Quit),
                Event::Window {
                    win_event: WindowEvent::Resized(w, h),
                    ..
                } => events.push(PlatformEvent::Resized {
                    width: w.max(0) as u32,
                    height: h.max(0) as u32,
                }),
                Event::KeyDown {
                    scancode: Some(scancode),
                    ..
                } => events.push(PlatformEvent::KeyPressed {
                    key_code: scancode.name().to_string(),
                }),
                Event::KeyUp {
                    scancode: Some(scancode),
                    ..
                } => events.push(PlatformEvent::KeyReleased {
                    key_code: scancode.name().to_string(),
                }),
                Event::MouseMotion { x, y, .. } => {
                    events.push(PlatformEvent::MouseMoved { x, y })
                }
                Event::MouseWheel { x, y, .. } => events.push(PlatformEvent::MouseWheel {
                    delta_x: x,
                    delta_y: y,
                }),
                Event::FingerDown { x, y, .. } => events.push(PlatformEvent::FingerDown {
                    // SDL reports touch positions normalized to [0, 1].
                    x: x * width as f32,
                    y: y * height as f32,
                }),
                Event::JoyAxisMotion {
                    axis_idx, value, ..
                } => events.push(PlatformEvent::JoystickAxis {
                    axis: axis_idx,
                    value: f32::from(value) / f32::from(i16::MAX),
                }),
                Event::JoyButtonDown { button_idx, .. } => {
                    events.push(PlatformEvent::JoystickButton {
                        button: button_idx,
                        pressed: true,
                    })
                }
                Event::JoyButtonUp { button_idx, .. } => {
                    events.push(PlatformEvent::JoystickButton {
                        button: button_idx,
                        pressed: false,
                    })
                }
                _ => {}
            }
        }

        events
    }

    fn is_key_down(&self, key_code: &str) -> bool {
        match Scancode::from_name(key_code) {
            Some(scancode) => self.event_pump.keyboard_state().is_scancode_pressed(scancode),
            None => {
                log::error!("Unknown key {key_code}");
                false
            }
        }
    }

    fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
    }

    fn size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    fn set_title(&mut self, title: &str) {
        if let Err(error) = self.window.set_title(title) {
            log::warn!("Failed to set window title: {error}");
        }
    }
}
