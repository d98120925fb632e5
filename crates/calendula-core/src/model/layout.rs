use serde::{Deserialize, Serialize};

/// Placement of a timed instance on a day timeline, in percent.
///
/// `top`/`height` run along the day's 24 hours, `left`/`width` across the
/// instance's overlap group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBox {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
    /// Size of the overlap group the instance belongs to.
    pub overlapping_events: usize,
}
