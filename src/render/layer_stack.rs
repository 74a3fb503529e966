use serde::{Deserialize, Serialize};

/// Paint order of the timeline canvas, bottom to top.
///
/// The derived `Ord` follows declaration order, which is the order frames
/// push their layers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Grid,
    NowMarker,
    Selection,
    DayHeader,
}
