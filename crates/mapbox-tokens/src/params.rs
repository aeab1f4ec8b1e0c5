//! Temporary token descriptor set.

use mapbox_core::param::rules;
use mapbox_core::{ParamSet, ParamSpec, ParamValue};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Minutes until expiry. Converted to a timestamp when the request is sent.
pub const EXPIRES: &str = "expires";
/// Token scopes.
pub const SCOPES: &str = "scopes";

/// Longest lifetime of a temporary token, in minutes.
pub const MAX_EXPIRES_MINUTES: f64 = 60.0;

/// Scopes a temporary token may carry.
pub const TEMPORARY_SCOPES: &[&str] = &[
    "styles:tiles",
    "styles:read",
    "fonts:read",
    "datasets:read",
    "vision:read",
];

/// Descriptors for temporary token creation, in positional order.
pub fn temporary_token_params() -> &'static ParamSet {
    static PARAMS: OnceLock<ParamSet> = OnceLock::new();
    PARAMS.get_or_init(|| {
        ParamSet::new(vec![
            ParamSpec::optional(
                EXPIRES,
                "Time in minutes until the temporary token will expire. Cannot be a time in the \
                 past or more than one hour in the future.",
            )
            .with_default(MAX_EXPIRES_MINUTES)
            .with_rule(|v| v.as_f64().is_some_and(|m| m > 0.0 && m <= MAX_EXPIRES_MINUTES)),
            ParamSpec::optional(
                SCOPES,
                "Specify the scopes that the new temporary token will have. The authorizing token \
                 needs to have the same scopes as, or more scopes than, the new temporary token.",
            )
            .keyed()
            .with_default(vec!["styles:read"])
            .with_rule(rules::list_subset_of(TEMPORARY_SCOPES)),
        ])
    })
}

/// Typed temporary token request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporaryTokenRequest {
    /// Minutes until expiry, at most 60
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_minutes: Option<f64>,
    /// Scopes of the new token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
}

impl TemporaryTokenRequest {
    /// Positional arguments in descriptor order.
    #[must_use]
    pub fn into_args(self) -> Vec<Option<ParamValue>> {
        vec![
            self.expires_minutes.map(Into::into),
            self.scopes.map(Into::into),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let bindings = temporary_token_params().bind();
        assert_eq!(
            bindings.require(EXPIRES).unwrap(),
            ParamValue::Number(60.0)
        );
        let body = bindings.assemble_body(None).unwrap();
        assert_eq!(body.get(SCOPES), Some(&serde_json::json!(["styles:read"])));
        assert!(body.get(EXPIRES).is_none());
    }

    #[test]
    fn expires_bounds() {
        for minutes in [0.0, -5.0, 61.0] {
            let request = TemporaryTokenRequest {
                expires_minutes: Some(minutes),
                ..TemporaryTokenRequest::default()
            };
            let bindings = temporary_token_params()
                .bind_args(request.into_args())
                .unwrap();
            assert!(bindings.require(EXPIRES).is_err(), "{minutes} accepted");
        }
    }

    #[test]
    fn scopes_must_be_known() {
        let request = TemporaryTokenRequest {
            scopes: Some(vec!["tokens:write".into()]),
            ..TemporaryTokenRequest::default()
        };
        let bindings = temporary_token_params()
            .bind_args(request.into_args())
            .unwrap();
        let err = bindings.assemble_body(None).unwrap_err();
        assert!(err.to_string().starts_with("Entered tokens:write..."));
    }
}
