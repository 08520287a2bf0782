//! Tokens selecting which controller strategy drives the agent.

use serde::{Deserialize, Serialize};

/// The controller strategies a user can switch between.
///
/// The strategies themselves live outside this workspace; the narrator only
/// decides which one to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerToken {
    /// Stand still.
    Idle,
    /// The default autonomous player.
    Autonomous,
    /// The fastest autonomous player.
    Speedrun,
    /// Hand control to the human at the keyboard.
    Human,
}
