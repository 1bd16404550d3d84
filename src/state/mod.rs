//! Application state module

mod app_state;
mod field;
mod form;
mod validate;

pub use app_state::*;
pub use field::*;
pub use form::*;
pub use validate::*;
