use std::sync::Arc;

use tracing::debug;

use shared_models::auth::{active_role, Role, TokenPair};

use crate::store::{SessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLES_KEY};

/// Typed access to the persisted session state.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<dyn SessionStore> {
        self.store.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY).await
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY).await
    }

    /// Persist a successful login: both tokens plus the JSON roles array.
    pub async fn store_login(&self, tokens: &TokenPair, roles: &[String]) {
        self.store.set(ACCESS_TOKEN_KEY, &tokens.access_token).await;
        self.store
            .set(REFRESH_TOKEN_KEY, &tokens.refresh_token)
            .await;
        let encoded = serde_json::to_string(roles).expect("roles serialize to JSON");
        self.store.set(ROLES_KEY, &encoded).await;
        debug!("Stored session for roles {:?}", roles);
    }

    pub async fn roles(&self) -> Vec<String> {
        match self.store.get(ROLES_KEY).await {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    pub async fn active_role(&self) -> Option<Role> {
        let roles = self.roles().await;
        active_role(&roles)
    }

    /// The expired-session path: drop the tokens, keep everything else.
    pub async fn clear_tokens(&self) {
        self.store.remove(ACCESS_TOKEN_KEY).await;
        self.store.remove(REFRESH_TOKEN_KEY).await;
    }

    /// The logout path: tokens and roles are all removed.
    pub async fn clear_all(&self) {
        self.store.remove(ACCESS_TOKEN_KEY).await;
        self.store.remove(REFRESH_TOKEN_KEY).await;
        self.store.remove(ROLES_KEY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;

    fn session() -> Session {
        Session::new(Arc::new(MemorySessionStore::new()))
    }

    fn tokens() -> TokenPair {
        TokenPair {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
        }
    }

    #[tokio::test]
    async fn login_persists_tokens_and_roles() {
        let session = session();
        session
            .store_login(&tokens(), &["DOCTOR".to_string(), "PATIENT".to_string()])
            .await;

        assert_eq!(session.access_token().await.as_deref(), Some("access"));
        assert_eq!(session.refresh_token().await.as_deref(), Some("refresh"));
        assert_eq!(session.roles().await, vec!["DOCTOR", "PATIENT"]);
        assert_eq!(session.active_role().await, Some(Role::Doctor));
    }

    #[tokio::test]
    async fn clear_tokens_keeps_roles() {
        let session = session();
        session.store_login(&tokens(), &["ADMIN".to_string()]).await;

        session.clear_tokens().await;

        assert_eq!(session.access_token().await, None);
        assert_eq!(session.refresh_token().await, None);
        assert_eq!(session.roles().await, vec!["ADMIN"]);
    }

    #[tokio::test]
    async fn clear_all_removes_everything() {
        let session = session();
        session.store_login(&tokens(), &["ADMIN".to_string()]).await;

        session.clear_all().await;

        assert_eq!(session.access_token().await, None);
        assert_eq!(session.refresh_token().await, None);
        assert!(session.roles().await.is_empty());
        assert_eq!(session.active_role().await, None);
    }
}
