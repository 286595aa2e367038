pub mod claims;
pub mod errors;
pub mod issuer;

pub use claims::TokenClaims;
pub use errors::JwtError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use issuer::TokenKey;
