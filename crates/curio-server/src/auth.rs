//! Request-context identity and ownership checks.
//!
//! The authenticated principal is established upstream and forwarded as
//! the `x-user-id` header; this module only reads it.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use curio_core::repository::Document;

/// Header carrying the authenticated principal.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity attached to the current request.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    /// The authenticated principal, if any.
    pub principal: Option<String>,
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Ok(Self { principal })
    }
}

/// Assign a fresh server-side identifier, discarding any client-supplied
/// id.
pub fn set_id<T: Document>(entity: &mut T) {
    entity.set_id(Uuid::new_v4());
}

/// Stamp the record with the requesting principal as its owner.
pub fn set_owner<T: Document>(ctx: &AuthContext, entity: &mut T) {
    entity.set_owner_id(ctx.principal.clone().unwrap_or_default());
}

/// An operation on `entity` is forbidden unless the requesting principal
/// owns the record.
pub fn is_forbidden<T: Document>(ctx: &AuthContext, entity: &T) -> bool {
    ctx.principal.as_deref() != Some(entity.owner_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_core::models::resource::Resource;

    fn owned_by(owner: &str) -> Resource {
        Resource {
            id: Uuid::new_v4(),
            name: "Widget".into(),
            description: "x".into(),
            category_id: "c1".into(),
            owner_id: owner.into(),
        }
    }

    #[test]
    fn owner_is_not_forbidden() {
        let ctx = AuthContext {
            principal: Some("alice".into()),
        };
        assert!(!is_forbidden(&ctx, &owned_by("alice")));
    }

    #[test]
    fn non_owner_is_forbidden() {
        let ctx = AuthContext {
            principal: Some("bob".into()),
        };
        assert!(is_forbidden(&ctx, &owned_by("alice")));
    }

    #[test]
    fn anonymous_is_forbidden() {
        let ctx = AuthContext::default();
        assert!(is_forbidden(&ctx, &owned_by("alice")));
    }

    #[test]
    fn identity_assignment_overwrites_client_values() {
        let ctx = AuthContext {
            principal: Some("alice".into()),
        };
        let mut resource = owned_by("mallory");
        let client_id = resource.id;

        set_id(&mut resource);
        set_owner(&ctx, &mut resource);

        assert_ne!(resource.id, client_id);
        assert_eq!(resource.owner_id, "alice");
    }
}
