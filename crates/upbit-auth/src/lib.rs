//! Credentials and request signing for the Upbit API
//!
//! Upbit authenticates each private request with a short-lived HS256 JWT
//! passed as `Authorization: Bearer <token>`. This crate builds those tokens
//! and owns the canonical query encoding the token hash is computed over.
//!
//! # Example
//!
//! ```
//! use upbit_auth::{Credentials, QueryParams, RequestSigner};
//!
//! let creds = Credentials::new("access-key", "secret-key");
//! let params = QueryParams::new().with("market", "KRW-BTC");
//!
//! let token = RequestSigner::new(&creds).sign(&params)?;
//! assert!(token.bearer().starts_with("Bearer "));
//! assert_eq!(token.claims().query_hash_alg.as_deref(), Some("SHA512"));
//! # Ok::<(), upbit_auth::AuthError>(())
//! ```

mod credentials;
mod error;
mod query;
mod token;

pub use credentials::{Credentials, ACCESS_KEY_ENV, SECRET_KEY_ENV};
pub use error::{AuthError, AuthResult};
pub use query::QueryParams;
pub use token::{Claims, RequestSigner, SignedToken, QUERY_HASH_ALG};
