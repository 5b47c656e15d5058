//! One-shot notifications carried across a redirect.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::session::keys;

/// Visual variant of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

/// A toast shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub title: String,
    pub description: String,
}

impl Flash {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == FlashKind::Error
    }

    /// Store the notification for the next page.
    ///
    /// A session store failure only loses the toast, so it is logged and
    /// otherwise ignored.
    pub async fn push(self, session: &Session) {
        if let Err(e) = session.insert(keys::FLASH, self).await {
            tracing::warn!(error = %e, "Failed to store flash message");
        }
    }

    /// Take the pending notification, if any.
    pub async fn take(session: &Session) -> Option<Self> {
        session.remove::<Self>(keys::FLASH).await.ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        let ok = Flash::success("Login realizado!", "Bem-vindo ao painel administrativo.");
        assert!(!ok.is_error());
        assert_eq!(ok.title, "Login realizado!");

        let err = Flash::error("Erro", "Não foi possível carregar os dados");
        assert!(err.is_error());
        assert_eq!(err.description, "Não foi possível carregar os dados");
    }
}
