//! Response rendering.
//!
//! stdout carries model output only, so pipes stay clean; everything
//! diagnostic goes to stderr. Colorization happens only on a TTY and only
//! when `--raw` is not set.

pub mod banner;
pub mod markdown;
pub mod renderer;

pub use banner::banner;
pub use markdown::render_markdown;
pub use renderer::{is_stdout_tty, print_response, write_chunked};
