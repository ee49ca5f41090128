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

//! The engine-level error type.

use crate::asset::AssetError;
use crate::engine::status::EngineStatus;
use crate::platform::PlatformError;
use crate::renderer::error::ResourceError;
use std::fmt;

/// A failure observed by one of the engine's lifecycle stages.
///
/// By the time one of these reaches a caller the engine has already logged
/// the failure and moved itself into an error status; the value exists so
/// the current sequence aborts, not as a second reporting channel.
#[derive(Debug)]
pub enum EngineError {
    /// An illegal lifecycle transition was requested.
    GuardViolation {
        /// The state the engine was in when the request was made.
        current: EngineStatus,
        /// The state that was requested.
        requested: EngineStatus,
    },
    /// The platform failed to bring up the window or context.
    Platform(PlatformError),
    /// A GPU resource could not be created or prepared.
    Resource(ResourceError),
    /// An asset could not be loaded or decoded.
    Asset(AssetError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::GuardViolation { current, requested } => {
                write!(
                    f,
                    "illegal status transition from {current:?} to {requested:?}"
                )
            }
            EngineError::Platform(err) => write!(f, "platform error: {err}"),
            EngineError::Resource(err) => write!(f, "resource error: {err}"),
            EngineError::Asset(err) => write!(f, "asset error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Platform(err) => Some(err),
            EngineError::Resource(err) => Some(err),
            EngineError::Asset(err) => Some(err),
            EngineError::GuardViolation { .. } => None,
        }
    }
}

impl From<PlatformError> for EngineError {
    fn from(err: PlatformError) -> Self {
        EngineError::Platform(err)
    }
}

impl From<ResourceError> for EngineError {
    fn from(err: ResourceError) -> Self {
        EngineError::Resource(err)
    }
}

impl From<AssetError> for EngineError {
    fn from(err: AssetError) -> Self {
        EngineError::Asset(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn guard_violation_display() {
        let err = EngineError::GuardViolation {
            current: EngineStatus::NotStarted,
            requested: EngineStatus::Running,
        };
        assert_eq!(
            format!("{err}"),
            "illegal status transition from NotStarted to Running"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn wrapped_errors_keep_their_source() {
        let err: EngineError = PlatformError::Init("no video driver".to_string()).into();
        assert_eq!(
            format!("{err}"),
            "platform error: failed to initialize platform: no video driver"
        );
        assert!(err.source().is_some());
    }
}
