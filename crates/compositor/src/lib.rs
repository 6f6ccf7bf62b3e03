//! AdForge Compositor
//!
//! Post-processing for generated marketing images. Every step is a pure
//! function from an immutable buffer plus parameters to a new buffer;
//! [`Editor`] is the render stage that keeps the current surface in sync
//! with the editing state.
//!
//! # Pipeline
//!
//! ```text
//! source (data URL / http / file) ──► LoadedImage
//!                                         │
//!                              resize to state width × height
//!                                         │
//! logo (optional) ─────────────► overlay at anchored corner
//!                                         │
//!                                         ▼
//!                                   surface ──► export (PNG / JPEG / WebP data URL)
//! ```

pub mod asset;
pub mod compositor;
pub mod data_url;
pub mod editor;
pub mod export;

pub use asset::*;
pub use compositor::*;
pub use data_url::*;
pub use editor::*;
pub use export::*;
