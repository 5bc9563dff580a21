/// UI module exports
pub mod chart;
pub mod components;
pub mod popup;
