//! AdForge Generation
//!
//! Turns a selected product into a marketing ad:
//! - **Options:** creative direction supplied by the user
//! - **Prompt:** provider prompts built from the product and options
//! - **Client:** the [`GenerationBackend`] seam and its Gemini HTTP implementation
//! - **Workflow:** image first, then caption; both must succeed
//! - **Session:** catalog, selection, and the current ad, with stale-result detection

pub mod ad;
pub mod client;
pub mod options;
pub mod prompt;
pub mod session;
pub mod workflow;

pub use ad::*;
pub use client::*;
pub use options::*;
pub use session::*;
pub use workflow::*;
