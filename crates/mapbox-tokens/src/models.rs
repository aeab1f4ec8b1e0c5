//! Token API models.

use serde::{Deserialize, Serialize};

/// Response of `GET tokens/v2` for the calling token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenCheck {
    /// `TokenValid`, `TokenInvalid`, `TokenExpired` or `TokenRevoked`.
    pub code: String,
    /// Decoded token details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenInfo>,
}

impl TokenCheck {
    /// Returns true for a valid token that is not secret.
    #[must_use]
    pub fn is_valid_public(&self) -> bool {
        self.code == "TokenValid" && self.token.as_ref().is_some_and(|t| t.usage != "sk")
    }
}

/// Decoded token details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenInfo {
    /// `pk`, `sk` or `tk`.
    pub usage: String,
    /// Owning account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Authorization identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<String>,
    /// Client that created the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

/// Token listed for an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenRecord {
    /// Token identifier.
    #[serde(default)]
    pub id: String,
    /// The token string.
    pub token: String,
    /// `pk` or `sk`.
    #[serde(default)]
    pub usage: String,
    /// Whether this is the account's default public token.
    #[serde(default)]
    pub default: bool,
    /// Granted scopes.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Free text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Newly created temporary token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemporaryToken {
    /// The `tk.` token string.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_check_public() {
        let check: TokenCheck = serde_json::from_value(json!({
            "code": "TokenValid",
            "token": {"usage": "pk", "user": "alice", "authorization": "default"}
        }))
        .unwrap();
        assert!(check.is_valid_public());
    }

    #[test]
    fn token_check_rejects_secret_and_invalid() {
        let secret: TokenCheck = serde_json::from_value(json!({
            "code": "TokenValid",
            "token": {"usage": "sk"}
        }))
        .unwrap();
        assert!(!secret.is_valid_public());

        let invalid: TokenCheck = serde_json::from_value(json!({"code": "TokenInvalid"})).unwrap();
        assert!(!invalid.is_valid_public());
    }

    #[test]
    fn token_record_defaults() {
        let record: TokenRecord =
            serde_json::from_value(json!({"token": "pk.abc", "default": true})).unwrap();
        assert!(record.default);
        assert!(record.scopes.is_empty());
    }
}
