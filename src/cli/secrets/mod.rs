//! Secret commands (add-secret, show-secret, change-secret).

mod add;
mod change;
mod show;

pub use add::execute as add;
pub use change::execute as change;
pub use show::execute as show;
