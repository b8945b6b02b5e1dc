//! Per-request JWT signing
//!
//! Every authenticated call carries a fresh HS256 token:
//!
//! 1. `access_key`, a UUID v4 `nonce` and a millisecond `timestamp`
//! 2. when parameters are present, `query_hash` = hex(SHA-512(canonical query))
//!    and `query_hash_alg` = `"SHA512"`
//! 3. `base64url(header) . base64url(claims) . base64url(HMAC-SHA256(secret))`
//!
//! Tokens are never cached. A token that reuses a nonce is rejected by the
//! exchange with `nonce_used`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::trace;
use uuid::Uuid;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};
use crate::query::QueryParams;

type HmacSha256 = Hmac<Sha256>;

/// Hash algorithm name placed in `query_hash_alg`
pub const QUERY_HASH_ALG: &str = "SHA512";

#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

const HEADER: Header = Header {
    alg: "HS256",
    typ: "JWT",
};

/// Token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub access_key: String,
    pub nonce: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_hash_alg: Option<String>,
}

impl Claims {
    /// Decode the payload segment of a compact JWT without checking the signature
    ///
    /// Intended for diagnostics and tests.
    pub fn decode_unverified(token: &str) -> AuthResult<Self> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(AuthError::MalformedToken(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        }

        let payload = BASE64URL
            .decode(segments[1])
            .map_err(|e| AuthError::MalformedToken(format!("payload is not base64url: {}", e)))?;

        serde_json::from_slice(&payload)
            .map_err(|e| AuthError::MalformedToken(format!("payload is not claims JSON: {}", e)))
    }
}

/// A signed compact JWT and the claims inside it
#[derive(Clone)]
pub struct SignedToken {
    token: String,
    claims: Claims,
}

impl SignedToken {
    /// The compact `header.payload.signature` string
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn into_string(self) -> String {
        self.token
    }
}

impl std::fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedToken")
            .field("token", &"[REDACTED]")
            .field("nonce", &self.claims.nonce)
            .field("timestamp", &self.claims.timestamp)
            .finish()
    }
}

/// Request signer for building authenticated requests
#[derive(Debug, Clone, Copy)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Get the access key
    pub fn access_key(&self) -> &str {
        self.credentials.access_key()
    }

    /// Sign `params` with a fresh nonce and the current time
    pub fn sign(&self, params: &QueryParams) -> AuthResult<SignedToken> {
        let nonce = Uuid::new_v4().to_string();
        let timestamp = chrono::Utc::now().timestamp_millis();
        self.sign_with(params, nonce, timestamp)
    }

    /// Sign `params` with an explicit nonce and timestamp
    pub fn sign_with(
        &self,
        params: &QueryParams,
        nonce: impl Into<String>,
        timestamp: i64,
    ) -> AuthResult<SignedToken> {
        let query_hash = if params.is_empty() {
            None
        } else {
            Some(params.query_hash()?)
        };

        let claims = Claims {
            access_key: self.credentials.access_key().to_string(),
            nonce: nonce.into(),
            timestamp,
            query_hash_alg: query_hash.as_ref().map(|_| QUERY_HASH_ALG.to_string()),
            query_hash,
        };

        let header = serde_json::to_vec(&HEADER)
            .map_err(|e| AuthError::Signing(format!("header: {}", e)))?;
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::Signing(format!("claims: {}", e)))?;

        let signing_input = format!("{}.{}", BASE64URL.encode(header), BASE64URL.encode(payload));

        let mut mac = HmacSha256::new_from_slice(self.credentials.secret_bytes())
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        mac.update(signing_input.as_bytes());
        let signature = BASE64URL.encode(mac.finalize().into_bytes());

        trace!(nonce = %claims.nonce, hashed = claims.query_hash.is_some(), "Signed request token");

        Ok(SignedToken {
            token: format!("{}.{}", signing_input, signature),
            claims,
        })
    }
}
