//! Command implementations for fileset-cli

pub mod batch;
pub mod content;
pub mod inspect;

pub use batch::{run_copy, run_delete, run_move};
pub use content::{run_append, run_cat, run_write};
pub use inspect::{run_hash, run_list, run_stat};
