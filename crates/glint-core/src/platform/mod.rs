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

//! The windowing/input seam.
//!
//! [`Platform`] creates the window together with the graphics device bound
//! to its context; [`PlatformWindow`] is the live window. Events are
//! backend-agnostic: the concrete backend (`glint-infra`'s SDL2
//! implementation) translates its own event type into [`PlatformEvent`].
//! Only [`PlatformEvent::Quit`] and key state affect engine control flow;
//! everything else is surfaced for logging and future consumers.

use crate::engine::config::WindowConfig;
use crate::renderer::traits::GraphicsDevice;
use std::fmt;
use std::sync::Arc;

/// A single event drained from the platform's queue.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// The user asked the application to quit (window close button, ...).
    Quit,
    /// The window's drawable area changed size.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// A keyboard key went down.
    KeyPressed {
        /// The backend's name for the physical key.
        key_code: String,
    },
    /// A keyboard key was released.
    KeyReleased {
        /// The backend's name for the physical key.
        key_code: String,
    },
    /// The pointer moved, coordinates in pixels.
    MouseMoved {
        /// Pointer x.
        x: i32,
        /// Pointer y.
        y: i32,
    },
    /// The wheel scrolled.
    MouseWheel {
        /// Horizontal scroll amount.
        delta_x: i32,
        /// Vertical scroll amount.
        delta_y: i32,
    },
    /// A touch point went down, coordinates in pixels.
    FingerDown {
        /// Touch x.
        x: f32,
        /// Touch y.
        y: f32,
    },
    /// A joystick axis moved.
    JoystickAxis {
        /// Axis index.
        axis: u8,
        /// Position normalized to `[-1, 1]`.
        value: f32,
    },
    /// A joystick button changed state.
    JoystickButton {
        /// Button index.
        button: u8,
        /// Whether the button is now down.
        pressed: bool,
    },
}

/// An open window together with its live graphics context.
pub trait PlatformWindow {
    /// Drains every pending event without blocking. An empty queue yields
    /// an empty vector immediately.
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    /// Whether the named key is currently held down. Unknown key names are
    /// reported and read as released.
    fn is_key_down(&self, key_code: &str) -> bool;

    /// Presents the back buffer. The only call that may block, and only on
    /// the presentation interval when vsync is on.
    fn swap_buffers(&mut self);

    /// Current drawable size in pixels.
    fn size(&self) -> (u32, u32);

    /// Replaces the window title.
    fn set_title(&mut self, title: &str);
}

/// Factory for the window/context pair.
pub trait Platform {
    /// Creates the window and the graphics device bound to its context.
    ///
    /// The returned window owns the context: it must outlive every object
    /// created through the returned device.
    fn create_window(
        &mut self,
        config: &WindowConfig,
    ) -> Result<(Box<dyn PlatformWindow>, Arc<dyn GraphicsDevice>), PlatformError>;
}

/// Errors raised while bringing the platform up.
#[derive(Debug)]
pub enum PlatformError {
    /// The windowing backend could not be initialized.
    Init(String),
    /// Window creation failed.
    WindowCreation(String),
    /// The graphics context could not be created or made current.
    ContextCreation(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Init(msg) => write!(f, "failed to initialize platform: {msg}"),
            PlatformError::WindowCreation(msg) => write!(f, "failed to create window: {msg}"),
            PlatformError::ContextCreation(msg) => {
                write!(f, "failed to create graphics context: {msg}")
            }
        }
    }
}

impl std::error::Error for PlatformError {}
