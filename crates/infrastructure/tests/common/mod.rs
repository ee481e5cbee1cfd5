#![allow(dead_code)]

use pressbase_domain::config::CacheConfig;
use pressbase_domain::{NewArticle, NewSite, TenantContext};
use pressbase_infrastructure::database::create_memory_pool;
use pressbase_infrastructure::{
    CacheStore, SqliteArticleRepository, SqliteMediaRepository, SqlitePageRepository,
    SqliteSiteRepository, SqliteSubscriberRepository, TenantGuard,
};
use std::sync::Arc;

pub struct TestApp {
    pub cache: Arc<CacheStore>,
    pub guard: Arc<TenantGuard>,
    pub sites: SqliteSiteRepository,
    pub articles: SqliteArticleRepository,
    pub pages: SqlitePageRepository,
    pub media: SqliteMediaRepository,
    pub subscribers: SqliteSubscriberRepository,
}

pub async fn setup() -> TestApp {
    setup_with_config(CacheConfig::default()).await
}

pub async fn setup_with_config(config: CacheConfig) -> TestApp {
    let pool = create_memory_pool().await.expect("in-memory pool");
    let guard = Arc::new(TenantGuard::new(pool));
    let cache = Arc::new(CacheStore::new());

    TestApp {
        cache: Arc::clone(&cache),
        guard: Arc::clone(&guard),
        sites: SqliteSiteRepository::new(Arc::clone(&guard), Arc::clone(&cache), config.clone()),
        articles: SqliteArticleRepository::new(
            Arc::clone(&guard),
            Arc::clone(&cache),
            config.clone(),
        ),
        pages: SqlitePageRepository::new(Arc::clone(&guard), Arc::clone(&cache), config.clone()),
        media: SqliteMediaRepository::new(Arc::clone(&guard), Arc::clone(&cache), config.clone()),
        subscribers: SqliteSubscriberRepository::new(guard, cache, config),
    }
}

impl TestApp {
    /// Provisions a site and returns its tenant context.
    pub async fn provision_site(&self, name: &str, host: &str) -> TenantContext {
        let site = self
            .sites
            .create_site(NewSite {
                name: name.to_string(),
                host: host.to_string(),
                description: None,
                theme: "default".to_string(),
            })
            .await
            .expect("site provisioned");
        TenantContext::from_str(&site.id).expect("valid tenant id")
    }

    /// Count of cache keys in one tenant's slice of a namespace.
    pub fn tenant_keys(&self, namespace: &str, ctx: &TenantContext) -> Vec<String> {
        let prefix = format!("{}:{}:", namespace, ctx.tenant_id());
        self.cache
            .list_keys()
            .into_iter()
            .filter(|key| key.starts_with(&prefix))
            .collect()
    }
}

pub fn new_article(slug: &str, title: &str) -> NewArticle {
    NewArticle {
        slug: slug.to_string(),
        title: title.to_string(),
        body: format!("Body of {title}"),
        published: true,
    }
}

pub use pressbase_application::ports::{
    ArticleRepository, MediaRepository, PageRepository, SiteRepository, SubscriberRepository,
};
