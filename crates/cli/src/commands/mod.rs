//! One module per subcommand. Each `run` writes its user-facing output to `out`.

pub mod add;
pub mod clear;
pub mod delete;
pub mod items;
pub mod list;
pub mod summary;
