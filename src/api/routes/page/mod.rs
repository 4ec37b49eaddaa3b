//! The single HTML page: request form on one side, response card on
//! the other.

mod router;
mod templates;
pub use router::router;
pub use templates::{PageData, render_page, templates};
