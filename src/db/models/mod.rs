mod recipe;
mod user;

pub use recipe::*;
pub use user::*;
