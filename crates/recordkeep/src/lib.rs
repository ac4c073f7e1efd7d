//! `recordkeep` - small in-memory record managers
//!
//! Six independent demos (events, two book catalogs, inventory, and two
//! student managers), each a record type plus a manager that renders through
//! an injected [`Renderer`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod forms;
pub mod inventory;
pub mod library;
pub mod lms;
pub mod logging;
pub mod registration;
pub mod render;
pub mod roster;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use render::{ListId, Notice, NullRenderer, RecordingRenderer, Renderer, WriterRenderer};
pub use session::{Demo, ReplayReport, Workspace};
