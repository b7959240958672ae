/// Supplies the signed-in owner. Sign-in itself happens elsewhere.
pub(crate) trait SessionSource: Send + Sync {
    fn owner_id(&self) -> Option<String>;

    fn is_logged_in(&self) -> bool {
        self.owner_id().is_some()
    }
}

/// A session fixed for the life of the process.
#[derive(Debug, Clone, Default)]
pub(crate) struct StaticSession {
    owner_id: Option<String>,
}

impl StaticSession {
    pub(crate) fn new(owner_id: Option<String>) -> Self {
        Self { owner_id }
    }

    #[cfg(test)]
    pub(crate) fn signed_in(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
        }
    }

    #[cfg(test)]
    pub(crate) fn anonymous() -> Self {
        Self { owner_id: None }
    }
}

impl SessionSource for StaticSession {
    fn owner_id(&self) -> Option<String> {
        self.owner_id.clone()
    }
}
