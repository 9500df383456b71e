//! # ime-ops
//!
//! Pixel-level image operations and the typed command layer that drives them.
//!
//! Every operation takes `&Image` and returns a new image; inputs are never
//! modified.
//!
//! # Modules
//!
//! - [`split`] - split-view compositing shared by most filters
//! - [`pixel_map`] - generic per-pixel transform and color matrices
//! - [`components`] - component extraction, brighten, sepia
//! - [`transform`] - flips
//! - [`filter`] - kernel convolution (blur, sharpen)
//! - [`histogram`] - histograms and their rendering
//! - [`color_correct`] - histogram peak alignment
//! - [`levels`] - quadratic levels adjustment
//! - [`compress`] - Haar wavelet compression
//! - [`resize`] - bilinear downscaling
//! - [`dither`] - Floyd-Steinberg dithering
//! - [`channels`] - RGB split and combine
//! - [`command`] - typed commands and the command registry
//!
//! # Example
//!
//! ```rust
//! use ime_core::{Image, ImageStore, MemoryStore, Pixel};
//!
//! let mut store = MemoryStore::new();
//! store.store("img", Image::filled(4, 4, Pixel::gray(90, 255)).unwrap());
//!
//! ime_ops::execute(&["blur", "img", "soft", "split", "50"], &mut store).unwrap();
//! assert_eq!(store.fetch("soft").unwrap().pixel(0, 2), Pixel::DIVIDER);
//! ```
//!
//! ## Direct calls
//!
//! ```rust,ignore
//! use ime_ops::filter::{convolve, Kernel};
//! use ime_ops::SplitPercent;
//!
//! let sharp = convolve(&image, &Kernel::sharpen(), SplitPercent::FULL);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod channels;
pub mod color_correct;
pub mod command;
pub mod components;
pub mod compress;
pub mod dither;
pub mod filter;
pub mod histogram;
pub mod levels;
pub mod pixel_map;
pub mod plane;
pub mod resize;
pub mod split;
pub mod transform;

pub use command::{Command, CommandKind, execute};
pub use components::Component;
pub use compress::CompressionPercent;
pub use error::{OpsError, OpsResult};
pub use split::SplitPercent;
