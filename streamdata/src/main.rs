use anyhow::{Context, Result};
use streamdata::log_buffer::LogBuffer;
use streamdata::logging::init_logging_with_buffer;
use streamdata::App;
use streamdata_auth::{AuthSession, BrowserLauncher, Settings};

const LOG_CAPACITY: usize = 5000;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let log_buffer = LogBuffer::new(LOG_CAPACITY);
    let log_path = init_logging_with_buffer(log_buffer.clone())?;

    tracing::info!(log_path = %log_path.display(), "streamdata starting");

    let settings = Settings::new().context("CLIENT_ID and REDIRECT_URI must be set")?;
    settings.validate().map_err(anyhow::Error::msg)?;

    let launcher = BrowserLauncher::new(&settings.redirect_uri)?;
    let session = AuthSession::new(settings, launcher)?;

    App::new(session, log_buffer).run().await?;

    Ok(())
}
