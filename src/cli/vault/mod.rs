//! Vault commands (create-vault, rotate-vault).

mod create;
mod rotate;

pub use create::execute as create;
pub use rotate::execute as rotate;
