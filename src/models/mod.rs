pub mod window;
pub mod query;
pub mod top_user;

pub use window::*;
pub use query::*;
pub use top_user::*;
