//! Pixel selection for shape tools.

pub mod line;
