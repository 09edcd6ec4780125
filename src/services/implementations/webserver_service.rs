use crate::logger::{self, LogTag};
use crate::services::Service;
use crate::webserver::{self, AppState};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub struct WebserverService {
    state: Arc<AppState>,
    host: String,
    port: u16,
    listener: Option<TcpListener>,
    local_addr: Option<SocketAddr>,
}

impl WebserverService {
    pub fn new(state: Arc<AppState>, host: String, port: u16) -> Self {
        Self {
            state,
            host,
            port,
            listener: None,
            local_addr: None,
        }
    }

    /// Address actually bound, available after `initialize`
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

#[async_trait]
impl Service for WebserverService {
    fn name(&self) -> &'static str {
        "webserver"
    }

    fn priority(&self) -> i32 {
        30
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["price_updater"]
    }

    /// Bind the port up front so failures stop startup
    async fn initialize(&mut self) -> Result<(), String> {
        let listener = webserver::bind_listener(&self.host, self.port).await?;
        self.local_addr = listener.local_addr().ok();
        self.listener = Some(listener);
        Ok(())
    }

    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String> {
        let listener = self
            .listener
            .take()
            .ok_or_else(|| "webserver listener was not bound".to_string())?;

        let state = self.state.clone();
        let shutdown_signal = shutdown.notified_owned();
        let handle = tokio::spawn(async move {
            if let Err(e) = webserver::serve(listener, state, shutdown_signal).await {
                logger::error(LogTag::Webserver, &format!("Webserver failed: {}", e));
            }
        });

        let endpoint = match self.local_addr {
            Some(addr) => format!("http://{}", addr),
            None => format!("http://{}:{}", self.host, self.port),
        };
        logger::info(LogTag::Webserver, &format!("Listening on {}", endpoint));

        Ok(vec![handle])
    }
}
