use alloc::string::String;

use serde::{Deserialize, Serialize};

/// Parameters passed into a settlement run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of fractional digits carried by the internal fixed-point amounts.
    pub scale: u32,
    /// Label of the virtual source node (index `0`) in diagnostics.
    pub source_label: String,
    /// Label of the virtual sink node (index `n + 1`) in diagnostics.
    pub sink_label: String,
}

impl Config {
    pub fn with_scale(scale: u32) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: 2,
            source_label: "source".into(),
            sink_label: "destination".into(),
        }
    }
}
