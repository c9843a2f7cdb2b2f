//! Test harness with testcontainers for integration testing.
//!
//! A single Postgres container is shared by every test in the binary.
//! The container starts and migrations run on first use.

use anyhow::{Context, Result};
use axum::Router;
use followup_core::config::ScanSettings;
use followup_core::kernel::{BaseAI, MockAI, MockFetcher, ServerDeps};
use followup_core::server::build_app;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Per-test context: a fresh pool on the shared database plus mock services.
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &mut TestHarness) {
///     let (status, body) = send(ctx.app(), "GET", "/api/contacts", None).await;
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub ai: Option<MockAI>,
    pub fetcher: MockFetcher,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self {
            db_pool,
            ai: None,
            fetcher: MockFetcher::new(),
        })
    }

    /// Route completions through `ai` for subsequent `app()` calls.
    pub fn with_ai(&mut self, ai: MockAI) {
        self.ai = Some(ai);
    }

    pub fn deps(&self) -> ServerDeps {
        test_deps(self.ai.as_ref(), &self.fetcher)
    }

    pub fn app(&self) -> Router {
        build_app(self.db_pool.clone(), self.deps())
    }
}

pub fn test_deps(ai: Option<&MockAI>, fetcher: &MockFetcher) -> ServerDeps {
    ServerDeps::new(
        ai.map(|a| Arc::new(a.clone()) as Arc<dyn BaseAI>),
        Arc::new(fetcher.clone()),
        ScanSettings::default(),
    )
}
