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

//! Engine lifecycle status codes and the legal-transition table.

/// The lifecycle state of the engine.
///
/// The variants form a strict main line `NotStarted → Starting → Running →
/// Done`; `Paused`, `Crashed`, and `Error` are escape states reachable from
/// anywhere. Legality of a transition depends only on the current state, see
/// [`EngineStatus::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineStatus {
    /// Nothing has been created yet.
    NotStarted,
    /// Creating and initializing subsystems.
    Starting,
    /// Working fine.
    Running,
    /// Paused, may continue working.
    Paused,
    /// Unhandled or unknown error.
    Crashed,
    /// Known error, handled.
    Error,
    /// All work finished.
    Done,
}

/// The outcome of resolving a transition request against the table.
///
/// On an illegal request `next` is [`EngineStatus::Error`], never the
/// requested target and never the untouched current state: a rejected
/// transition always leaves the engine in a well-defined error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Whether the request was legal from the current state.
    pub allowed: bool,
    /// The state the engine must be in after the request.
    pub next: EngineStatus,
}

impl EngineStatus {
    /// The only state a guarded target may be entered from. The escape
    /// states (and `NotStarted`) are unguarded.
    fn required_predecessor(self) -> Option<EngineStatus> {
        match self {
            EngineStatus::Starting => Some(EngineStatus::NotStarted),
            EngineStatus::Running => Some(EngineStatus::Starting),
            EngineStatus::Done => Some(EngineStatus::Running),
            _ => None,
        }
    }

    /// Resolves a transition request. Pure lookup: the caller applies
    /// `next` and interprets `allowed`; this function never touches state.
    pub fn transition(current: EngineStatus, requested: EngineStatus) -> Transition {
        match requested.required_predecessor() {
            Some(predecessor) if current != predecessor => Transition {
                allowed: false,
                next: EngineStatus::Error,
            },
            _ => Transition {
                allowed: true,
                next: requested,
            },
        }
    }

    /// True for the two terminal states that mark a failed run.
    pub fn is_failure(self) -> bool {
        matches!(self, EngineStatus::Error | EngineStatus::Crashed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_line_succeeds_stepwise() {
        let mut status = EngineStatus::NotStarted;
        for target in [
            EngineStatus::Starting,
            EngineStatus::Running,
            EngineStatus::Done,
        ] {
            let t = EngineStatus::transition(status, target);
            assert!(t.allowed, "{target:?} must be legal from {status:?}");
            status = t.next;
        }
        assert_eq!(status, EngineStatus::Done);
    }

    #[test]
    fn skipping_starting_forces_error() {
        let t = EngineStatus::transition(EngineStatus::NotStarted, EngineStatus::Running);
        assert!(!t.allowed);
        assert_eq!(t.next, EngineStatus::Error);
    }

    #[test]
    fn guarded_targets_reject_every_wrong_predecessor() {
        let all = [
            EngineStatus::NotStarted,
            EngineStatus::Starting,
            EngineStatus::Running,
            EngineStatus::Paused,
            EngineStatus::Crashed,
            EngineStatus::Error,
            EngineStatus::Done,
        ];
        let guarded = [
            (EngineStatus::Starting, EngineStatus::NotStarted),
            (EngineStatus::Running, EngineStatus::Starting),
            (EngineStatus::Done, EngineStatus::Running),
        ];
        for (target, predecessor) in guarded {
            for current in all {
                let t = EngineStatus::transition(current, target);
                if current == predecessor {
                    assert!(t.allowed);
                    assert_eq!(t.next, target);
                } else {
                    assert!(!t.allowed, "{target:?} must be illegal from {current:?}");
                    assert_eq!(t.next, EngineStatus::Error);
                }
            }
        }
    }

    #[test]
    fn escape_states_accepted_from_anywhere() {
        let all = [
            EngineStatus::NotStarted,
            EngineStatus::Starting,
            EngineStatus::Running,
            EngineStatus::Paused,
            EngineStatus::Crashed,
            EngineStatus::Error,
            EngineStatus::Done,
        ];
        for current in all {
            for target in [
                EngineStatus::Paused,
                EngineStatus::Crashed,
                EngineStatus::Error,
            ] {
                let t = EngineStatus::transition(current, target);
                assert!(t.allowed);
                assert_eq!(t.next, target);
            }
        }
    }

    #[test]
    fn failure_states() {
        assert!(EngineStatus::Error.is_failure());
        assert!(EngineStatus::Crashed.is_failure());
        assert!(!EngineStatus::Done.is_failure());
        assert!(!EngineStatus::Running.is_failure());
    }
}
