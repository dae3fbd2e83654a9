pub mod argon2;
pub mod errors;

pub use argon2::PasswordCodec;
pub use errors::PasswordError;
