//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build tier → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or trigger() → Stop accepting → Drain in-flight requests → Exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
