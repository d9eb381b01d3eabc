//! One-line link status for a label next to the face

use emote_core::{ConnectionState, Loudness};

use crate::style::LEVEL_READOUT_THRESHOLD;

pub fn status_text(connection: ConnectionState, level: Loudness) -> String {
    match connection {
        ConnectionState::Disconnected => "Waiting...".to_string(),
        ConnectionState::Connecting => "Connecting...".to_string(),
        ConnectionState::Disconnecting => "Disconnecting...".to_string(),
        ConnectionState::Connected if level.value() > LEVEL_READOUT_THRESHOLD => {
            format!("Playing ♪ {level}")
        }
        ConnectionState::Connected => "Connected ✓".to_string(),
    }
}
