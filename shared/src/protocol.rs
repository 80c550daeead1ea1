use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::SimConfig;

/// Protocol version - increment when making breaking changes.
pub const PROTOCOL_VERSION: u32 = 1;

// === Input ===

/// Discrete intents sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct InputIntents {
    #[serde(default)]
    pub move_left: bool,
    #[serde(default)]
    pub move_right: bool,
    #[serde(default)]
    pub move_forward: bool,
    #[serde(default)]
    pub move_back: bool,
    #[serde(default)]
    pub power_up: bool,
    #[serde(default)]
    pub power_down: bool,
    #[serde(default)]
    pub shoot: bool,
    #[serde(default)]
    pub reset: bool,
}

impl InputIntents {
    /// Keep held intents from `self`, and carry over any trigger from `other`
    /// that has not been consumed yet.
    pub fn latch_triggers(&mut self, other: &InputIntents) {
        self.shoot |= other.shoot;
        self.reset |= other.reset;
    }

    pub fn clear_triggers(&mut self) {
        self.shoot = false;
        self.reset = false;
    }
}

// === Server -> Client ===

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(tag = "type")]
pub enum ServerMsg {
    #[serde(rename = "welcome")]
    Welcome(WelcomeMsg),
    #[serde(rename = "snapshot")]
    Snapshot(SimSnapshot),
    #[serde(rename = "shot_result")]
    ShotResult(ShotResultMsg),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMsg {
    pub protocol_version: u32,
    pub server_version: String,
    pub self_id: u32,
    pub config: SimConfig,
    pub snapshot: SimSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "snake_case")]
pub enum PhaseWire {
    NotAttempted,
    InFlight,
    Scored,
    Missed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct FeedbackWire {
    pub message: String,
    pub ticks_remaining: u32,
}

/// Read-only view of the simulation for renderers and UI panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct SimSnapshot {
    pub tick: u64,
    pub position: [f64; 3],
    /// Unit quaternion as [x, y, z, w]
    pub orientation: [f64; 4],
    pub in_flight: bool,
    pub phase: PhaseWire,
    pub score: u32,
    pub attempts: u32,
    pub makes: u32,
    pub shooting_percentage: f64,
    /// Current power, 0-100
    pub power: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub feedback: Option<FeedbackWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct ShotResultMsg {
    pub made: bool,
    pub score: u32,
    pub attempts: u32,
    pub makes: u32,
}

// === Client -> Server ===

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(tag = "type")]
pub enum ClientMsg {
    /// Full set of currently held intents
    #[serde(rename = "input")]
    Input(InputIntents),
    #[serde(rename = "shoot")]
    Shoot,
    #[serde(rename = "reset")]
    Reset,
}

// === Conversion helpers ===

/// Round to 4 decimal places (plenty for render positions, halves JSON size)
#[inline]
pub fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}
