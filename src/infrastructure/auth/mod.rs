pub mod request_id;
pub mod token;

pub use request_id::{request_id_middleware, RequestId};
pub use token::{authorize, supplied_token, TOKEN_HEADER};
