// src/session/cookie.rs
//! Signed session cookie: `moodlift_session=<uuid>.<sig>`.
//!
//! `sig` is the hex HMAC-SHA256 of the uuid under the session secret.
//! Anything that fails verification is treated as no session at all.

use axum::http::{HeaderMap, HeaderValue, header};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "moodlift_session";

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct SessionKeys {
    secret: Vec<u8>,
}

impl SessionKeys {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Per-process secret; sessions do not survive a restart.
    pub fn random() -> Self {
        let bytes: [u8; 32] = rand::rng().random();
        Self::new(bytes)
    }

    fn mac(&self, session_id: &str) -> Option<HmacSha256> {
        // HMAC takes keys of any length
        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(session_id.as_bytes());
        Some(mac)
    }

    pub fn sign(&self, session_id: &str) -> String {
        let signature = self
            .mac(session_id)
            .map(|mac| hex::encode(mac.finalize().into_bytes()))
            .unwrap_or_default();
        format!("{}.{}", session_id, signature)
    }

    /// Session id from a signed value, if the signature checks out.
    /// The comparison is constant-time.
    pub fn verify(&self, value: &str) -> Option<String> {
        let (session_id, signature) = value.rsplit_once('.')?;
        if session_id.is_empty() {
            return None;
        }
        let signature = hex::decode(signature).ok()?;
        self.mac(session_id)?.verify_slice(&signature).ok()?;
        Some(session_id.to_string())
    }

    /// Verified session id carried by the request's `Cookie` headers.
    pub fn from_headers(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|raw| raw.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| self.verify(value))
    }

    /// `Set-Cookie` value for a session id.
    pub fn set_cookie(&self, session_id: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE,
            self.sign(session_id)
        ))
        .ok()
    }
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKeys(..)")
    }
}

pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_value_verifies() {
        let keys = SessionKeys::new("secret");
        let id = generate_session_id();
        assert_eq!(keys.verify(&keys.sign(&id)), Some(id));
    }

    #[test]
    fn tampered_or_foreign_values_are_rejected() {
        let keys = SessionKeys::new("secret");
        let signed = keys.sign("abc");

        assert_eq!(keys.verify(&signed.replace("abc", "abd")), None);
        assert_eq!(SessionKeys::new("other").verify(&signed), None);
        assert_eq!(keys.verify("no-signature"), None);
        assert_eq!(keys.verify(".deadbeef"), None);
        assert_eq!(keys.verify(&format!("{signed}00")), None);
        assert_eq!(keys.verify("abc.not-hex"), None);
    }

    #[test]
    fn signature_is_keyed_hmac_not_prefixed_hash() {
        use sha2::Digest;

        let keys = SessionKeys::new("secret");
        let signed = keys.sign("abc");
        let (_, signature) = signed.rsplit_once('.').unwrap();
        assert_eq!(signature.len(), 64);
        assert_ne!(signature, hex::encode(Sha256::digest(b"secret.abc")));
    }

    #[test]
    fn reads_cookie_among_others() {
        let keys = SessionKeys::new("secret");
        let mut headers = HeaderMap::new();
        let cookie = format!("theme=dark; {}={}", SESSION_COOKIE, keys.sign("abc"));
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());

        assert_eq!(keys.from_headers(&headers), Some("abc".to_string()));
        assert_eq!(keys.from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn set_cookie_is_http_only() {
        let keys = SessionKeys::random();
        let value = keys.set_cookie("abc").unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("moodlift_session=abc."));
        assert!(value.contains("HttpOnly"));
    }
}
