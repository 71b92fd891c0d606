//! Transport layer: wire-format details (serialization/deserialization).

mod money;
mod request;
mod response;

pub use request::encode_request_json;
pub use response::{TransportError, decode_gateway_json_response};
