use serde::{Deserialize, Serialize};

/// Network descriptor as reported by the connectivity source.
/// Replaced wholesale on every update, never merged field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub connection_type: Option<String>,
    /// "4g", "3g", "2g" or "slow-2g"; anything else is treated as unknown.
    pub effective_type: Option<String>,
    pub downlink_mbps: Option<f64>,
    pub rtt_ms: Option<u32>,
}

impl NetworkInfo {
    /// Synthesized descriptor for platforms without a network information API.
    pub fn fallback(is_online: bool) -> Self {
        Self {
            connection_type: Some("unknown".into()),
            effective_type: Some(if is_online { "unknown" } else { "offline" }.into()),
            downlink_mbps: None,
            rtt_ms: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionQuality {
    Excellent,
    Good,
    Poor,
    VeryPoor,
    Unknown,
}

impl ConnectionQuality {
    pub fn classify(info: Option<&NetworkInfo>) -> Self {
        let Some(effective_type) = info.and_then(|info| info.effective_type.as_deref()) else {
            return ConnectionQuality::Unknown;
        };

        match effective_type {
            "4g" => ConnectionQuality::Excellent,
            "3g" => ConnectionQuality::Good,
            "2g" => ConnectionQuality::Poor,
            "slow-2g" => ConnectionQuality::VeryPoor,
            _ => ConnectionQuality::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionQuality::Excellent => "Excellent",
            ConnectionQuality::Good => "Good",
            ConnectionQuality::Poor => "Poor",
            ConnectionQuality::VeryPoor => "Very Poor",
            ConnectionQuality::Unknown => "Unknown",
        }
    }

    /// Poor connections may delay GPS-assisted fixes, worth surfacing a warning.
    pub fn is_degraded(&self) -> bool {
        matches!(self, ConnectionQuality::Poor | ConnectionQuality::VeryPoor)
    }
}
