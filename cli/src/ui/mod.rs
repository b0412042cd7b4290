//! UI utilities for terminal output.

mod hint;
mod qr;

pub use hint::print_hint;
pub use qr::{print_qr_code, write_qr_png, FILE_STYLE, TERMINAL_STYLE};
