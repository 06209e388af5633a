pub mod form;
pub mod header;
pub mod status;
pub mod toasts;

pub use form::{render_checkbox, render_input, render_select, render_textarea, Field};
pub use header::render_header;
pub use status::{render_badge, render_button, render_empty, render_error, render_spinner};
pub use toasts::render_toasts;
