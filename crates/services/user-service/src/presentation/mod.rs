//! Presentation layer - selectable list of user rows.

mod image_loader;
mod user_list;

pub use image_loader::{BlobImageLoader, ImageLoader, ImageSource};
pub use user_list::{render_rows, RenderedRow, UserList, UserRow};
