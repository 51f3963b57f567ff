use axum::{
    extract::{Query, Request, State},
    response::Html,
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::Span;
use url::{Host, Url};

use super::{pages, AuthorizationLauncher, AuthorizationOutcome};
use crate::error::AuthError;

/// Path the forwarding page sends the redirect parameters to
const COMPLETE_PATH: &str = "/complete";
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

type RedirectSender = Arc<Mutex<Option<oneshot::Sender<HashMap<String, String>>>>>;
type Opener = fn(&str) -> std::io::Result<()>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn open_in_browser(url: &str) -> std::io::Result<()> {
    open::that(url)
}

/// Opens the system browser and listens on the loopback redirect URI.
///
/// The implicit grant returns the token in the URL fragment, which never
/// reaches the server, so the redirect path serves a small page that forwards
/// the fragment to [`COMPLETE_PATH`] as a query string.
pub struct BrowserLauncher {
    host: String,
    port: u16,
    redirect_path: String,
    opener: Opener,
    cancel: Mutex<Option<oneshot::Sender<()>>>,
}

impl BrowserLauncher {
    pub fn new(redirect_uri: &str) -> Result<Self, AuthError> {
        let url = Url::parse(redirect_uri)
            .map_err(|e| AuthError::Configuration(format!("Invalid redirect URI: {}", e)))?;

        if url.scheme() != "http" {
            return Err(AuthError::Configuration(
                "The browser flow needs an http:// loopback redirect URI".to_string(),
            ));
        }

        let host = match url.host() {
            Some(Host::Domain(domain)) if domain == "localhost" => domain.to_string(),
            Some(Host::Ipv4(addr)) if addr.is_loopback() => addr.to_string(),
            Some(Host::Ipv6(addr)) if addr.is_loopback() => addr.to_string(),
            _ => {
                return Err(AuthError::Configuration(format!(
                    "Redirect URI host must be a loopback address, got {:?}",
                    url.host_str()
                )))
            }
        };

        let redirect_path = url.path().to_string();
        if redirect_path == COMPLETE_PATH {
            return Err(AuthError::Configuration(format!(
                "Redirect URI path cannot be {}",
                COMPLETE_PATH
            )));
        }

        Ok(Self {
            host,
            port: url.port_or_known_default().unwrap_or(80),
            redirect_path,
            opener: open_in_browser,
            cancel: Mutex::new(None),
        })
    }

    /// Replace the function used to show the authorization page
    pub fn with_opener(mut self, opener: Opener) -> Self {
        self.opener = opener;
        self
    }

    /// Abandon the flow in progress. Returns false when nothing was pending.
    pub fn cancel(&self) -> bool {
        match lock(&self.cancel).take() {
            Some(tx) => {
                let _ = tx.send(());
                tracing::info!("Authorization flow cancelled");
                true
            }
            None => false,
        }
    }

    async fn run(&self, url: &Url) -> Result<AuthorizationOutcome, AuthError> {
        // Armed before binding so an early cancel is not lost
        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        *lock(&self.cancel) = Some(cancel_tx);

        let result = self.listen(url, &mut cancel_rx).await;
        lock(&self.cancel).take();
        result
    }

    async fn listen(
        &self,
        url: &Url,
        cancel_rx: &mut oneshot::Receiver<()>,
    ) -> Result<AuthorizationOutcome, AuthError> {
        let listener = tokio::select! {
            biased;
            _ = &mut *cancel_rx => return Ok(AuthorizationOutcome::Cancelled),
            bound = TcpListener::bind((self.host.as_str(), self.port)) => bound?,
        };
        tracing::debug!(addr = ?listener.local_addr(), "Listening for authorization redirect");

        let (redirect_tx, redirect_rx) = oneshot::channel();

        let state = CallbackState {
            redirect_tx: Arc::new(Mutex::new(Some(redirect_tx))),
        };
        let app = Router::new()
            .route(&self.redirect_path, get(forward_fragment))
            .route(COMPLETE_PATH, get(complete))
            .layer(TraceLayer::new_for_http().make_span_with(redirect_span))
            .with_state(state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        if let Err(e) = (self.opener)(url.as_str()) {
            tracing::warn!("Failed to open browser automatically: {}", e);
        }
        tracing::info!("Open this URL to authorize the application: {}", url);

        let outcome = tokio::select! {
            params = redirect_rx => match params {
                Ok(params) => AuthorizationOutcome::from_redirect(&params),
                Err(_) => AuthorizationOutcome::Error(
                    "Redirect listener stopped unexpectedly".to_string(),
                ),
            },
            _ = cancel_rx => AuthorizationOutcome::Cancelled,
        };

        let _ = shutdown_tx.send(());
        match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
            Ok(Ok(Ok(()))) => tracing::debug!("Redirect listener stopped"),
            Ok(Ok(Err(e))) => tracing::warn!("Redirect listener failed: {}", e),
            Ok(Err(e)) => tracing::warn!("Redirect listener task failed: {}", e),
            Err(_) => {
                tracing::warn!("Redirect listener did not stop in time, aborting");
                server.abort();
            }
        }

        Ok(outcome)
    }
}

impl AuthorizationLauncher for BrowserLauncher {
    async fn authorize(&self, url: &Url) -> AuthorizationOutcome {
        match self.run(url).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Browser authorization failed: {}", e);
                AuthorizationOutcome::Error(e.to_string())
            }
        }
    }
}

/// Request span without the query string, which carries the access token
fn redirect_span(request: &Request) -> Span {
    tracing::debug_span!(
        "redirect",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

#[derive(Clone)]
struct CallbackState {
    redirect_tx: RedirectSender,
}

async fn forward_fragment() -> Html<&'static str> {
    Html(pages::FORWARD_HTML)
}

async fn complete(
    State(state): State<CallbackState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let page = match AuthorizationOutcome::from_redirect(&params) {
        AuthorizationOutcome::Success { .. } => pages::success_page(),
        AuthorizationOutcome::Denied { .. } => pages::error_page("Authorization was denied."),
        AuthorizationOutcome::Error(msg) => pages::error_page(&msg),
        AuthorizationOutcome::Cancelled => pages::error_page("Authorization was cancelled."),
    };

    match lock(&state.redirect_tx).take() {
        Some(tx) => {
            let _ = tx.send(params);
        }
        None => tracing::debug!("Ignoring repeated redirect"),
    }

    Html(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use tracing_subscriber::fmt::MakeWriter;

    /// In-memory sink for formatted log output
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&lock(&self.0)).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            lock(&self.0).extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn no_browser(_: &str) -> std::io::Result<()> {
        Ok(())
    }

    fn free_port() -> u16 {
        std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port()
    }

    async fn get_when_ready(url: &str) -> String {
        for _ in 0..50 {
            if let Ok(response) = reqwest::get(url).await {
                return response.text().await.unwrap();
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("listener never came up at {}", url);
    }

    fn launcher(port: u16) -> Arc<BrowserLauncher> {
        Arc::new(
            BrowserLauncher::new(&format!("http://127.0.0.1:{}/callback", port))
                .unwrap()
                .with_opener(no_browser),
        )
    }

    fn authorization_url() -> Url {
        Url::parse("https://id.twitch.tv/oauth2/authorize?state=abc").unwrap()
    }

    #[test]
    fn test_rejects_non_loopback_redirects() {
        assert!(BrowserLauncher::new("https://localhost:3000/callback").is_err());
        assert!(BrowserLauncher::new("http://example.com/callback").is_err());
        assert!(BrowserLauncher::new("http://localhost:3000/complete").is_err());
        assert!(BrowserLauncher::new("http://localhost:3000/callback").is_ok());
        assert!(BrowserLauncher::new("http://[::1]:3000/callback").is_ok());
    }

    #[tokio::test]
    async fn test_forwarded_fragment_completes_flow() {
        let port = free_port();
        let launcher = launcher(port);

        let flow = tokio::spawn({
            let launcher = launcher.clone();
            async move { launcher.authorize(&authorization_url()).await }
        });

        let page = get_when_ready(&format!("http://127.0.0.1:{}/callback", port)).await;
        assert!(page.contains("/complete?"));

        let page = get_when_ready(&format!(
            "http://127.0.0.1:{}/complete?access_token=tok1&state=abc&token_type=bearer",
            port
        ))
        .await;
        assert!(page.contains("Authentication Successful"));

        match flow.await.unwrap() {
            AuthorizationOutcome::Success {
                access_token,
                state,
            } => {
                assert_eq!(access_token.expose_secret(), "tok1");
                assert_eq!(state, "abc");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_denied_redirect_is_reported() {
        let port = free_port();
        let launcher = launcher(port);

        let flow = tokio::spawn({
            let launcher = launcher.clone();
            async move { launcher.authorize(&authorization_url()).await }
        });

        let page = get_when_ready(&format!(
            "http://127.0.0.1:{}/complete?error=access_denied&error_description=denied&state=abc",
            port
        ))
        .await;
        assert!(page.contains("Authentication Failed"));

        assert!(matches!(
            flow.await.unwrap(),
            AuthorizationOutcome::Denied { .. }
        ));
    }

    #[tokio::test]
    async fn test_cancel_resolves_pending_flow() {
        let port = free_port();
        let launcher = launcher(port);
        assert!(!launcher.cancel());

        let flow = tokio::spawn({
            let launcher = launcher.clone();
            async move { launcher.authorize(&authorization_url()).await }
        });

        get_when_ready(&format!("http://127.0.0.1:{}/callback", port)).await;
        assert!(launcher.cancel());

        assert!(matches!(
            flow.await.unwrap(),
            AuthorizationOutcome::Cancelled
        ));
    }

    #[tokio::test]
    async fn test_access_token_stays_out_of_debug_logs() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let port = free_port();
        let launcher = launcher(port);
        let flow = tokio::spawn({
            let launcher = launcher.clone();
            async move { launcher.authorize(&authorization_url()).await }
        });

        get_when_ready(&format!(
            "http://127.0.0.1:{}/complete?access_token=tok1secretvalue&state=abc",
            port
        ))
        .await;
        assert!(flow.await.unwrap().is_success());

        let output = logs.contents();
        assert!(output.contains("path=/complete"));
        assert!(!output.contains("tok1secretvalue"));
    }

    #[tokio::test]
    async fn test_cancel_before_listener_is_bound() {
        let port = free_port();
        // A host name needs resolving before the bind completes
        let launcher = Arc::new(
            BrowserLauncher::new(&format!("http://localhost:{}/callback", port))
                .unwrap()
                .with_opener(no_browser),
        );

        let flow = tokio::spawn({
            let launcher = launcher.clone();
            async move { launcher.authorize(&authorization_url()).await }
        });
        tokio::task::yield_now().await;

        assert!(launcher.cancel());
        assert!(matches!(
            flow.await.unwrap(),
            AuthorizationOutcome::Cancelled
        ));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = pages::error_page("<script>alert(1)</script>");
        assert!(!page.contains("<script>alert(1)"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
