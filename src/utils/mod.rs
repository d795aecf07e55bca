//! Small helpers shared by the commands.

mod error;
mod plural;

pub use error::error_chain;
pub use plural::plural_count;
