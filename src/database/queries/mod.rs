mod teams;
mod users;

pub use teams::*;
pub use users::*;
