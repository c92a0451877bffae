//! Terminal user-interface building blocks.
//!
//! Field editing, frame layout and painting are split so the layout stays
//! pure and testable while terminal I/O lives at the edges.

pub mod field;
pub mod input;
pub mod layout;
pub mod renderer;
pub mod settings;

pub use field::{FieldEdit, FieldEditor};
pub use input::{poll_terminal, translate_key, ScreenGuard, TerminalInput};
pub use layout::{layout_frame, terminal_size, Frame, FrameRow, RowKind};
pub use renderer::{Renderer, ScreenPainter};
