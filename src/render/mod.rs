//! Visual output of the dial

pub mod svg;

pub use svg::render_svg;
