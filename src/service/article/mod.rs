pub mod qiita;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Res;

// Traits.

/// Generic article source trait that clients must implement.
///
/// Implementing this trait allows different content platforms to be used as
/// the source of articles under review.
#[async_trait]
pub trait GenericArticleClient: Send + Sync + 'static {
    /// Fetch the raw markdown body of the article with the given ID.
    async fn fetch_body(&self, id: &str) -> Res<String>;
}

// Structs.

/// Article source client for the application.
///
/// This is trivially cloneable and can be passed around without the need for
/// `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ArticleClient {
    inner: Arc<dyn GenericArticleClient>,
}

impl Deref for ArticleClient {
    type Target = dyn GenericArticleClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ArticleClient {
    pub fn new(inner: Arc<dyn GenericArticleClient>) -> Self {
        Self { inner }
    }
}
