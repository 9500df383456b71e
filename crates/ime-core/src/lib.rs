//! # ime-core
//!
//! Core types for raster image editing.
//!
//! - [`Pixel`], [`Channel`] - RGBA pixel with integer channels
//! - [`Image`] - row-major pixel grid with fixed dimensions
//! - [`ChannelPlanes`] - per-channel integer matrices exchanged with codecs
//! - [`ImageStore`], [`MemoryStore`] - named image storage
//!
//! ## Crate Structure
//!
//! ```text
//! ime-core (this crate)
//!    ^
//!    +-- ime-ops (filters and commands)
//!    +-- ime-io  (PPM / PNG / JPEG codecs)
//!    +-- ime-cli (script runner)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;
pub mod planes;
pub mod store;

pub use error::{Error, Result};
pub use image::Image;
pub use pixel::{Channel, Pixel, clamp_channel};
pub use planes::ChannelPlanes;
pub use store::{ImageStore, MemoryStore};
