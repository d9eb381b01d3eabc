//! Connection state of the audio link

use std::fmt;

use serde::{Deserialize, Serialize};

/// Link state as reported by the Bluetooth collaborator. Read-only to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

impl ConnectionState {
    /// Map an A2DP connection state code (0..=3). Unknown codes are `None`.
    pub fn from_raw(code: u8) -> Option<Self> {
        match code {
            0 => Some(ConnectionState::Disconnected),
            1 => Some(ConnectionState::Connecting),
            2 => Some(ConnectionState::Connected),
            3 => Some(ConnectionState::Disconnecting),
            _ => None,
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            ConnectionState::Disconnected => 0,
            ConnectionState::Connecting => 1,
            ConnectionState::Connected => 2,
            ConnectionState::Disconnecting => 3,
        }
    }

    #[inline]
    pub fn is_connected(self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnecting => "disconnecting",
        };
        f.write_str(name)
    }
}
