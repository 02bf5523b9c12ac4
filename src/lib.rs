//! Fadeloop is a looping crossfade slideshow engine.
//!
//! A folder of still images becomes a continuously looping slideshow: each
//! image is normalized onto one shared canvas, a fixed-timestep loop drives a
//! per-pixel linear crossfade between consecutive images, and finished frames
//! go to a pluggable [`PresentSink`]. The usual flow:
//!
//! - Load and normalize a folder into a [`Gallery`]
//! - Wrap it in a [`Blender`] with a transition duration in ticks
//! - Drive it with a [`Player`] (worker thread), [`play_blocking`] (calling
//!   thread, the home for window sinks), or [`render_ticks`] (offline)
#![forbid(unsafe_code)]

pub mod blend;
pub mod core;
pub mod driver;
pub mod error;
pub mod gallery;
pub mod loader;
pub mod screen;
pub mod sink;
#[cfg(feature = "window")]
#[cfg_attr(docsrs, doc(cfg(feature = "window")))]
pub mod sink_minifb;

pub use crate::blend::{crossfade_argb, Blender};
pub use crate::core::{pack_argb, unpack_argb, Canvas, TickRate, OPAQUE_BLACK};
pub use crate::driver::{play_blocking, render_ticks, Controls, DriverConfig, Player};
pub use crate::error::{FadeloopError, FadeloopResult};
pub use crate::gallery::{Gallery, SourceImage};
pub use crate::loader::{load_folder, load_gallery, LoadSummary};
pub use crate::screen::Screen;
pub use crate::sink::{MemorySink, PngSequenceSink, PresentSink, SinkConfig, SinkFlow};
#[cfg(feature = "window")]
pub use crate::sink_minifb::WindowSink;
