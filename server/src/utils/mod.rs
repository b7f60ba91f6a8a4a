pub mod dates;
pub mod error;
pub mod identity;
pub mod response;
