//! Tool input: the armed-tool resource, the click dispatch system, and
//! keyboard shortcuts. Cursor-to-tile resolution lives in `crate::picking`.

mod keyboard;
mod tool_handler;
mod types;

pub use keyboard::keyboard_tool_switch;
pub use tool_handler::handle_tool_input;
pub use types::ActiveTool;
