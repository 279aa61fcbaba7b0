#[path = "autoeval/app/mod.rs"]
mod app;
#[path = "autoeval/args.rs"]
mod args;
#[path = "autoeval/config/mod.rs"]
mod config;
#[path = "autoeval/logging.rs"]
mod logging;
#[path = "autoeval/progress.rs"]
mod progress;
#[path = "autoeval/wizard.rs"]
mod wizard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
