//! Rendering: Markdown-to-HTML delegation + the static page shell.

pub mod html;

pub use html::render_page;
