//! Detection of SVG filter support inside backdrop effects.

pub(crate) mod cache;
pub(crate) mod provider;
