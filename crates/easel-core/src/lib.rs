//! Easel Core Types and Definitions
//!
//! This crate provides the foundational types for the Easel layout compiler.
//! It includes:
//!
//! - **Locations**: positions of parse events in the source ([`location`] module)
//! - **Events**: the XML event model shared by the validator and the
//!   serializer ([`event`] module)
//! - **Numeric parsing**: integer/float/auto attribute parsers with the
//!   layout dialect's prefix and placeholder rules ([`numeric`] module)
//! - **Geometry**: the bounds rectangle attribute grammar ([`geometry`] module)
//! - **Colors**: color channel validation ([`color`] module)
//! - **Tags**: device tag syntax checks ([`tag`] module)

pub mod color;
pub mod event;
pub mod geometry;
pub mod location;
pub mod numeric;
pub mod tag;
