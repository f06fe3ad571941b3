mod clipboard;
mod session;

pub use clipboard::ClipboardSink;
pub use clipboard::CopyAck;
pub use clipboard::SystemClipboard;
pub use session::SessionManager;
pub use session::SessionState;
pub use session::StatsOutcome;
