pub mod bar_chart;
pub mod colors;
