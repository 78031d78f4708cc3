//! Request, response and status types of the Merchant API.

mod request;
mod response;
mod status;

pub use request::*;
pub use response::*;
pub use status::*;
