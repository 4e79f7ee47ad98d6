mod password_encoder;

pub use password_encoder::{PasswordEncoder, PasswordEncodingError};
