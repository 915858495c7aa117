//! More-or-less general-purpose utility functions.

pub mod cur;
#[macro_use]
pub mod fields;
pub mod out_dir;
pub mod view;

pub use self::out_dir::OutDir;
