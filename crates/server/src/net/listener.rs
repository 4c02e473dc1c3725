//! TCP listener: accepts clients and registers their sessions.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::{TcpListener, TcpSocket};
use tracing::{info, warn};

use crate::net::session::Session;
use crate::tick::SessionSet;

pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind the API port. Failure here is fatal to startup, so it is
    /// returned rather than logged.
    pub fn bind(addr: &str) -> Result<Listener> {
        let addr: SocketAddr = addr.parse().with_context(|| format!("bad bind address {addr:?}"))?;
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .context("create listener socket")?;
        // Lets a restarted server rebind while old connections linger in
        // TIME_WAIT.
        socket.set_reuseaddr(true).context("set SO_REUSEADDR")?;
        socket
            .bind(addr)
            .with_context(|| format!("bind {addr}"))?;
        let inner = socket.listen(1024).context("listen")?;
        Ok(Listener { inner })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.inner.local_addr().context("listener local address")
    }

    /// Accept clients forever. Individual accept or handshake failures are
    /// logged and the loop keeps serving.
    pub async fn run(self, sessions: Arc<SessionSet>) {
        match self.local_addr() {
            Ok(addr) => info!(%addr, "listening"),
            Err(_) => info!("listening"),
        }
        loop {
            match self.inner.accept().await {
                Ok((stream, _)) => match Session::open(stream, sessions.allocate_id()) {
                    Ok(session) => sessions.register(session),
                    Err(err) => warn!(error = %err, "failed to open session"),
                },
                Err(err) => warn!(error = %err, "accept failed"),
            }
        }
    }
}
