pub mod organization_management;
pub mod role_management;
pub mod user_management;

pub use organization_management::*;
pub use role_management::*;
pub use user_management::*;
