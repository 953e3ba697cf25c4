pub mod buffer;
pub mod event;
pub mod menu;
pub mod rect;
pub mod terminal;
pub mod text;
pub mod types;
pub mod window;

pub use buffer::{Buffer, Cell};
pub use event::{Input, Key, Modifiers};
pub use menu::{Menu, MenuError, MenuItem, MenuRequest};
pub use rect::Rect;
pub use terminal::Terminal;
pub use types::{Rgb, TextStyle};
pub use window::Window;
