//! Data shared between the game core and whatever hosts it: the history log, its stats, the export blob and the
//! shell commands.

pub use export::*;
pub use history::*;
pub use shell::*;
pub use stats::*;
pub use store::*;

mod export;
mod history;
mod shell;
mod stats;
mod store;
