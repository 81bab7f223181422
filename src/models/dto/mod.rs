pub mod generation_payload;
pub mod request;
pub mod response;
