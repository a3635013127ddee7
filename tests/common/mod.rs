//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use folio::api::services::{AppStartTime, AppState, rewrite_rate_limit_config};
use folio::config::{BackgroundConfig, RewriteConfig};
use folio::errors::{FolioError, Result};
use folio::services::blog::{BlogSource, BlogTransformer, EntryStore, MemoryEntryStore};
use folio::services::client_info::IpInfo;
use folio::services::{
    BackgroundGenerator, BlogService, ClientInfoService, IpInfoLookup, RewriteService,
    TextGenerator,
};
use folio::utils::time::{Clock, ManualClock};

pub const START: i64 = 1_700_000_000_000;
pub const TTL: Duration = Duration::from_secs(300);

/// Blog source whose response can be swapped between calls
pub struct ScriptedSource {
    response: Mutex<std::result::Result<Value, String>>,
    pub calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn ok(raw: Value) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(raw)),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(msg: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Err(msg.to_string())),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set_ok(&self, raw: Value) {
        *self.response.lock() = Ok(raw);
    }

    pub fn set_failing(&self, msg: &str) {
        *self.response.lock() = Err(msg.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlogSource for ScriptedSource {
    async fn fetch(&self) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.lock().clone().map_err(FolioError::upstream)
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// Text generator that upper-cases the prompt or fails
pub struct FakeGenerator {
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FolioError::upstream("model unavailable"));
        }
        Ok(format!("REWRITTEN: {}", prompt))
    }

    fn name(&self) -> &'static str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

/// IP lookup with a fixed answer
pub struct StaticIpLookup;

#[async_trait]
impl IpInfoLookup for StaticIpLookup {
    async fn lookup(&self, _ip: &str) -> Option<IpInfo> {
        Some(IpInfo {
            city: Some("Sacramento".to_string()),
            region: Some("California".to_string()),
            country: Some("US".to_string()),
            org: Some("Example ISP".to_string()),
            latitude: Some(38.58),
            longitude: Some(-121.49),
        })
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

pub fn sample_raw() -> Value {
    json!({
        "blog": {
            "posts": [
                {
                    "title": "Scaling Rollups",
                    "tags": ["Scaling", "Web3"],
                    "content": [{ "type": "paragraph", "text": "rollups batch transactions" }]
                },
                {
                    "title": "Auditing Smart Contracts",
                    "tags": ["Security", "Smart Contracts"],
                    "featured": true
                }
            ]
        }
    })
}

pub fn blog_service(
    source: Arc<ScriptedSource>,
    store: Arc<dyn EntryStore>,
    clock: Arc<ManualClock>,
) -> BlogService {
    let clock: Arc<dyn Clock> = clock;
    BlogService::new(
        source,
        store,
        clock,
        BlogTransformer::new("Tester", "https://img.example/default.png"),
        TTL,
    )
}

pub struct TestApp {
    pub state: AppState,
    pub source: Arc<ScriptedSource>,
    pub generator: Arc<FakeGenerator>,
}

pub fn test_state_with(rewrite_config: RewriteConfig, generator_fails: bool) -> TestApp {
    let source = ScriptedSource::ok(sample_raw());
    let clock = Arc::new(ManualClock::new(START));
    let blog = Arc::new(blog_service(
        source.clone(),
        Arc::new(MemoryEntryStore::new()),
        clock,
    ));

    let generator = FakeGenerator::new(generator_fails);
    let rewrite = Arc::new(RewriteService::new(generator.clone(), &rewrite_config));

    let state = AppState {
        blog,
        rewrite,
        background: Arc::new(BackgroundGenerator::new(&BackgroundConfig::default())),
        client_info: Arc::new(ClientInfoService::new(Arc::new(StaticIpLookup))),
        start_time: AppStartTime {
            start_datetime: chrono::Utc::now(),
        },
        rewrite_limiter: rewrite_rate_limit_config(&rewrite_config),
        api_prefix: "/api".to_string(),
        health_prefix: "/health".to_string(),
    };

    TestApp {
        state,
        source,
        generator,
    }
}

pub fn test_state() -> TestApp {
    test_state_with(RewriteConfig::default(), false)
}

pub fn peer() -> std::net::SocketAddr {
    "203.0.113.7:40000".parse().unwrap()
}

/// Build the full application service for a state
#[macro_export]
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(folio::api::middleware::RequestIdMiddleware)
                .configure(|cfg| folio::api::services::configure_app(cfg, &$state)),
        )
        .await
    };
}
