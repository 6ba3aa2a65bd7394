use std::collections::{HashMap, HashSet};

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

/// Static bearer keys for the two roles. Admin keys come from
/// `ADMIN_API_KEYS` (comma-separated); judge keys from `JUDGE_API_KEYS` as
/// comma-separated `judge-uuid:key` pairs, binding each key to the judge
/// identity used on submitted scores.
#[derive(Clone)]
pub struct ApiKeys {
    admin: HashSet<String>,
    judges: HashMap<String, Uuid>,
}

impl ApiKeys {
    pub fn from_env_values(admin_keys: &str, judge_keys: &str) -> Self {
        let admin = admin_keys
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let mut judges = HashMap::new();
        for entry in judge_keys.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match entry.split_once(':') {
                Some((judge_id, key)) if !key.trim().is_empty() => {
                    match judge_id.trim().parse::<Uuid>() {
                        Ok(judge_id) => {
                            judges.insert(key.trim().to_string(), judge_id);
                        }
                        Err(_) => tracing::warn!("Ignoring judge API key with invalid judge id"),
                    }
                }
                _ => tracing::warn!("Ignoring malformed judge API key entry"),
            }
        }

        Self { admin, judges }
    }

    pub fn is_admin(&self, key: &str) -> bool {
        self.admin.contains(key)
    }

    pub fn judge_for(&self, key: &str) -> Option<Uuid> {
        self.judges.get(key).copied()
    }
}

/// Authenticated judge identity, injected by `require_judge`.
#[derive(Debug, Clone, Copy)]
pub struct JudgeIdentity(pub Uuid);

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(&req).ok_or(WebError::Unauthorized)?;

    if state.api_keys.is_admin(token) {
        Ok(next.run(req).await)
    } else if state.api_keys.judge_for(token).is_some() {
        Err(WebError::Forbidden)
    } else {
        tracing::warn!("Invalid API key attempt");
        Err(WebError::Unauthorized)
    }
}

pub async fn require_judge(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(&req).ok_or(WebError::Unauthorized)?.to_owned();

    if let Some(judge_id) = state.api_keys.judge_for(&token) {
        req.extensions_mut().insert(JudgeIdentity(judge_id));
        Ok(next.run(req).await)
    } else if state.api_keys.is_admin(&token) {
        Err(WebError::Forbidden)
    } else {
        tracing::warn!("Invalid API key attempt");
        Err(WebError::Unauthorized)
    }
}

/// Either role. Round reads and the live feed are visible to judges and
/// admins alike.
pub async fn require_any_role(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(&req).ok_or(WebError::Unauthorized)?;

    if state.api_keys.is_admin(token) || state.api_keys.judge_for(token).is_some() {
        Ok(next.run(req).await)
    } else {
        tracing::warn!("Invalid API key attempt");
        Err(WebError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_admin_keys() {
        let keys = ApiKeys::from_env_values("alpha, beta,,", "");
        assert!(keys.is_admin("alpha"));
        assert!(keys.is_admin("beta"));
        assert!(!keys.is_admin(""));
        assert!(!keys.is_admin("gamma"));
    }

    #[test]
    fn binds_judge_keys_to_identities() {
        let judge_id = Uuid::from_u128(7);
        let config = format!("{judge_id}:sk_judge");
        let keys = ApiKeys::from_env_values("", &config);

        assert_eq!(keys.judge_for("sk_judge"), Some(judge_id));
        assert_eq!(keys.judge_for("other"), None);
        assert!(!keys.is_admin("sk_judge"));
    }

    #[test]
    fn skips_malformed_judge_entries() {
        let judge_id = Uuid::from_u128(9);
        let config = format!("no-colon, not-a-uuid:key, {judge_id}:good");
        let keys = ApiKeys::from_env_values("", &config);

        assert_eq!(keys.judge_for("good"), Some(judge_id));
        assert_eq!(keys.judge_for("key"), None);
        assert_eq!(keys.judge_for("no-colon"), None);
    }

    #[test]
    fn roles_do_not_overlap() {
        let judge_id = Uuid::from_u128(3);
        let keys = ApiKeys::from_env_values("admin_key", &format!("{judge_id}:judge_key"));

        assert!(keys.is_admin("admin_key"));
        assert_eq!(keys.judge_for("admin_key"), None);
        assert_eq!(keys.judge_for("judge_key"), Some(judge_id));
        assert!(!keys.is_admin("judge_key"));
    }

    #[test]
    fn extracts_bearer_token() {
        let req = Request::builder()
            .header(AUTHORIZATION, "Bearer sk_test")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), Some("sk_test"));

        let req = Request::builder()
            .header(AUTHORIZATION, "Basic sk_test")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), None);

        let req = Request::builder().body(axum::body::Body::empty()).unwrap();
        assert_eq!(bearer_token(&req), None);
    }
}
