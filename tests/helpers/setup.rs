use skolero_api::Application;
use skolero_infra::SkoleroContext;

pub struct TestApp {
    pub address: String,
    pub ctx: SkoleroContext,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

pub async fn spawn_app() -> TestApp {
    let mut ctx = SkoleroContext::create_inmemory();
    ctx.config.port = 0;
    spawn_app_with(ctx).await
}

/// Boots the application against a caller-prepared context. Used by tests
/// that replace collaborators or seed the store before startup.
pub async fn spawn_app_with(ctx: SkoleroContext) -> TestApp {
    let app = Application::new(ctx.clone())
        .await
        .expect("Failed to build application");
    let address = format!("http://localhost:{}/api/v1", app.port());
    tokio::spawn(async move {
        app.start().await.expect("Server to run");
    });

    TestApp {
        address,
        ctx,
        client: reqwest::Client::new(),
    }
}
