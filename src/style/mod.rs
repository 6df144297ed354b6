//! Strategy selection and the CSS the glass surface ends up with.

pub(crate) mod strategy;
pub(crate) mod template;
pub(crate) mod visual;
