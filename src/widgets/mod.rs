pub mod resize_handle;
pub mod tool_button;

pub use resize_handle::ResizeHandle;
pub use tool_button::ToolButton;
