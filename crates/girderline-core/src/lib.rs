//! Girderline Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Girderline
//! dataset loader, series builder and renderer. It includes:
//!
//! - **Identifiers**: Element and node identifiers ([`identifier`] module)
//! - **Forces**: Named force components and force kinds ([`force`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Model-space and canvas-space geometric types ([`geometry`] module)
//! - **Draw**: SVG stroke, fill and layer primitives ([`draw`] module)

pub mod color;
pub mod draw;
pub mod force;
pub mod geometry;
pub mod identifier;
