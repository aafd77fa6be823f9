//! meshgrad editor: the headless interaction layer on top of `meshgrad-engine`.
//!
//! A front end owns an [`Editor`] and forwards user intent to it:
//!
//! ```rust,ignore
//! let mut editor = Editor::new(config, fastrand::Rng::new(), Box::new(SystemClipboard::new()));
//!
//! // pointer down / drag
//! editor.session.select_at(x, y, editor.preview.canvas());
//! editor.session.move_active(x, y)?;
//!
//! // once per frame
//! if let Some(job) = editor.preview.frame(Instant::now(), &editor.session) {
//!     let outcome = job.run(); // or on a worker thread
//!     editor.preview.finish(outcome);
//! }
//! ```

pub mod clipboard;
mod clock;
pub mod config;
pub mod editor;
pub mod error;
pub mod preview;
pub mod session;
pub mod status;
pub mod store;

pub use clock::{FrameClock, FrameTime};
pub use editor::Editor;

pub mod prelude {
    pub use crate::clipboard::{ClipboardSink, MemoryClipboard, SystemClipboard};
    pub use crate::config::EditorConfig;
    pub use crate::editor::Editor;
    pub use crate::error::{ClipboardError, ConfigError, CopyError, EditError, StoreError};
    pub use crate::preview::{Preview, RenderJob, RenderOutcome, RenderTicket};
    pub use crate::session::{GridSize, Locks, Session};
    pub use crate::status::{ExportStatus, StatusCell};
    pub use crate::store::{RemoveError, SavedGradients, Store};
}
