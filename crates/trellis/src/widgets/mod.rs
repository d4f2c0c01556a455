//! The bundled widget set.
//!
//! - [`Frame`]: container with pack and place layout
//! - [`Label`]: one or more lines of text
//! - [`Button`]: clickable box around a child
//! - [`Window`]: top-level container with a title bar
//! - [`Menu`]: popup list shown as a modal
//!
//! Widgets that own other widgets build them in a `create` function that
//! inserts the whole group into the tree and returns the outer id. Their
//! operations are associated functions taking the tree and that id.

mod button;
mod frame;
mod label;
mod menu;
mod window;

pub use button::{Button, ButtonStyle};
pub use frame::Frame;
pub use label::Label;
pub use menu::{MENU_WIDTH, Menu};
pub use window::{Window, WindowButtons, WindowStyle};
