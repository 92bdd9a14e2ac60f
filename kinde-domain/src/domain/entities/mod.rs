pub mod common;
pub mod identity;
pub mod mfa;
pub mod organization;
pub mod role;
pub mod token;
pub mod user;

pub use common::*;
pub use identity::*;
pub use mfa::*;
pub use organization::*;
pub use role::*;
pub use token::*;
pub use user::*;
