use async_trait::async_trait;

use mentora_shared::SessionUser;

use crate::error::ApiResult;

/// Accessor for the external auth provider's session. The returned identity
/// (or its absence) is an opaque precondition for guarded actions; the
/// coordinators receive it explicitly rather than reading ambient state.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self) -> ApiResult<Option<SessionUser>>;
}

/// Fixed identity, for wiring and tests.
pub struct StaticSessionProvider {
    user: Option<SessionUser>,
}

impl StaticSessionProvider {
    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_user(&self) -> ApiResult<Option<SessionUser>> {
        if let Some(user) = &self.user {
            tracing::debug!(user = %user.id, role = ?user.role, "session resolved");
        }
        Ok(self.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentora_shared::UserRole;

    #[tokio::test]
    async fn static_provider_returns_configured_identity() {
        let provider = StaticSessionProvider::signed_in(SessionUser {
            id: "u1".into(),
            role: UserRole::Student,
        });
        let user = provider.current_user().await.unwrap().unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, UserRole::Student);

        let signed_out = StaticSessionProvider::signed_out();
        assert!(signed_out.current_user().await.unwrap().is_none());
    }
}
