#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::mpsc;

use link_rotator::application::services::{
    AuthService, CacheInvalidator, LinkService, RedirectResolver,
};
use link_rotator::domain::click_event::ClickEvent;
use link_rotator::domain::entities::{Destination, Link, LinkUpdate, NewClick, NewLink};
use link_rotator::domain::repositories::{ClickRepository, LinkRepository};
use link_rotator::error::AppError;
use link_rotator::infrastructure::cache::{MemoryCache, RotationCache};
use link_rotator::state::AppState;

pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// In-memory [`LinkRepository`] with the same semantics as the PostgreSQL
/// implementation: unique keys, dense renumbered positions, counter reset on
/// wholesale destination replacement.
pub struct FakeLinkRepository {
    links: Mutex<Vec<Link>>,
    next_id: AtomicI64,
}

impl FakeLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn destinations_for(&self, link_id: i64, urls: &[String]) -> Vec<Destination> {
        urls.iter()
            .enumerate()
            .map(|(position, url)| Destination {
                id: self.next_id(),
                link_id,
                url: url.clone(),
                position: position as i32,
                click_count: 0,
            })
            .collect()
    }
}

#[async_trait]
impl LinkRepository for FakeLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.key == new_link.key) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "key": new_link.key }),
            ));
        }

        let id = self.next_id();
        let link = Link {
            id,
            key: new_link.key,
            name: new_link.name,
            is_active: true,
            total_clicks: 0,
            destinations: self.destinations_for(id, &new_link.destination_urls),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        links.push(link.clone());

        Ok(link)
    }

    async fn find_active_by_key(&self, key: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links
            .iter()
            .find(|l| l.key == key && l.is_active)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.iter().find(|l| l.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let links = self.links.lock().unwrap();
        let mut all: Vec<Link> = links.clone();
        all.reverse();
        Ok(all)
    }

    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Link, AppError> {
        let new_destinations = update
            .destination_urls
            .as_ref()
            .map(|urls| self.destinations_for(id, urls));

        let mut links = self.links.lock().unwrap();

        if let Some(new_key) = &update.key
            && links.iter().any(|l| l.id != id && &l.key == new_key)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "key": new_key }),
            ));
        }

        let link = links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        if let Some(key) = update.key {
            link.key = key;
        }
        if let Some(name) = update.name {
            link.name = name;
        }
        if let Some(is_active) = update.is_active {
            link.is_active = is_active;
        }
        if let Some(destinations) = new_destinations {
            link.destinations = destinations;
        }
        link.updated_at = Utc::now();

        Ok(link.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.id != id);
        Ok(links.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// In-memory [`ClickRepository`] recording every insert for assertions.
pub struct FakeClickRepository {
    pub inserts: Mutex<Vec<NewClick>>,
    pub increments: Mutex<Vec<(i64, i64)>>,
}

impl FakeClickRepository {
    pub fn new() -> Self {
        Self {
            inserts: Mutex::new(Vec::new()),
            increments: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ClickRepository for FakeClickRepository {
    async fn insert(&self, click: NewClick) -> Result<(), AppError> {
        self.inserts.lock().unwrap().push(click);
        Ok(())
    }

    async fn increment_counters(&self, link_id: i64, destination_id: i64) -> Result<(), AppError> {
        self.increments.lock().unwrap().push((link_id, destination_id));
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let mut inserts = self.inserts.lock().unwrap();
        let before = inserts.len();
        let _ = cutoff;
        inserts.clear();
        Ok(before as u64)
    }
}

/// Builds an [`AppState`] over the given repository and cache, returning the
/// receiving end of the click channel for assertions.
pub fn create_test_state(
    links: Arc<FakeLinkRepository>,
    cache: Arc<MemoryCache>,
    click_queue_capacity: usize,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(click_queue_capacity);

    let links: Arc<dyn LinkRepository> = links;
    let cache_dyn: Arc<dyn RotationCache> = cache;

    let resolver = Arc::new(RedirectResolver::new(links.clone(), cache_dyn.clone(), 3600));
    let invalidator = Arc::new(CacheInvalidator::new(cache_dyn.clone()));
    let link_service = Arc::new(LinkService::new(links.clone(), invalidator));
    let auth_service = Arc::new(AuthService::new(
        TEST_ADMIN_TOKEN,
        "test-signing-secret".to_string(),
    ));

    let state = AppState {
        resolver,
        link_service,
        auth_service,
        links,
        cache: cache_dyn,
        click_sender: tx,
        behind_proxy: false,
    };

    (state, rx)
}

/// Injects a fixed peer address so handlers using `ConnectInfo` work under
/// `axum_test::TestServer`, which has no real socket.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: std::net::SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut()
            .insert(axum::extract::ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// Seeds a link with the given destination URLs, returning its id.
pub async fn seed_link(repo: &FakeLinkRepository, key: &str, urls: &[&str]) -> i64 {
    let link = repo
        .create(NewLink {
            key: key.to_string(),
            name: String::new(),
            destination_urls: urls.iter().map(|u| u.to_string()).collect(),
        })
        .await
        .unwrap();
    link.id
}
