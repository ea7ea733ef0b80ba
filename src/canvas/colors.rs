//! Chart palette, matched to the zinc page theme in style.css.

pub const PANEL_BG: &str = "#09090b";
pub const GRID: &str = "#27272a";
pub const AXIS_TEXT: &str = "#a1a1aa";
pub const HOVER_CURSOR: &str = "rgba(255, 255, 255, 0.04)";
