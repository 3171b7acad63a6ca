mod admin;
mod login;
mod product;

pub use admin::*;
pub use login::*;
pub use product::*;
