//! SVG drawing primitives shared by the chart renderers.
//!
//! - [`StrokeDefinition`] and [`apply_stroke!`](crate::apply_stroke!) describe line appearance
//! - [`FillDefinition`] and [`apply_fill!`](crate::apply_fill!) describe area appearance
//! - [`RenderLayer`] and [`LayeredOutput`] keep SVG nodes in z-order

mod fill;
mod layer;
mod stroke;

pub use fill::FillDefinition;
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeDefinition, StrokeStyle};
