//! CLI subcommand implementations.

pub mod add;
pub mod conflicts;
pub mod day;
pub mod delete;
pub mod edit;
pub mod list;
pub mod month;
pub mod status;
pub mod upcoming;
pub mod util;
pub mod week;
