//! Workspace facade crate.
//!
//! Re-exports the individual workspace crates so host applications can
//! depend on `cerebrum-drive` alone: `bridge_http` for the transport seam,
//! `drive_api` for the typed backend client, `drive_sync` for the sync
//! polling monitor, `drive_picker` for the file picker model, and
//! `drive_runtime` for configuration and logging bootstrap.

pub use bridge_http;
pub use drive_api;
pub use drive_picker;
pub use drive_runtime;
pub use drive_sync;
