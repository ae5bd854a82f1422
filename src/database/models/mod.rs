pub mod reminder;
pub mod user;
pub mod web_session;

pub use reminder::*;
pub use user::*;
pub use web_session::*;
