//! One client connection: reader task, writer task, and the tick-drained
//! command queue between them.
//!
//! The reader task turns the socket into a FIFO of inbound lines; nothing is
//! executed until the simulation tick calls `drain`, which dispatches up to
//! the per-tick limit and queues replies for the writer task. A session that
//! hit EOF keeps draining until its queue is empty, then marks itself for
//! removal so no queued command is ever lost.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use socket2::SockRef;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::command;
use crate::events::EventStore;
use crate::host::HostWorld;

/// How long `close` waits for each I/O task before aborting it.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

pub struct Session {
    id: u64,
    peer: SocketAddr,
    inbound: UnboundedReceiver<String>,
    /// Dropped on close so the writer task drains its queue and exits.
    outbound: Option<UnboundedSender<String>>,
    running: Arc<AtomicBool>,
    pending_removal: bool,
    closed: bool,
    reader: Option<JoinHandle<()>>,
    writer: Option<JoinHandle<()>>,
}

impl Session {
    /// Take ownership of an accepted stream and spawn its I/O tasks.
    pub fn open(stream: TcpStream, id: u64) -> Result<Session> {
        let peer = stream.peer_addr().context("peer address unavailable")?;
        stream.set_nodelay(true).context("set TCP_NODELAY")?;
        SockRef::from(&stream)
            .set_keepalive(true)
            .context("set SO_KEEPALIVE")?;

        let (read_half, write_half) = stream.into_split();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let running = Arc::new(AtomicBool::new(true));

        let reader = tokio::spawn(read_loop(read_half, inbound_tx, running.clone(), peer));
        let writer = tokio::spawn(write_loop(outbound_rx, write_half, running.clone(), peer));

        info!(%peer, id, "opened connection");
        Ok(Session {
            id,
            peer,
            inbound: inbound_rx,
            outbound: Some(outbound_tx),
            running,
            pending_removal: false,
            closed: false,
            reader: Some(reader),
            writer: Some(writer),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// True once the session has nothing left to do and should be closed
    /// and dropped by the next sweep.
    pub fn pending_removal(&self) -> bool {
        self.pending_removal
    }

    /// Dispatch up to `limit` queued commands in arrival order.
    ///
    /// A failing line is logged and skipped; it never tears down the session
    /// or stops the batch. Commands beyond the limit stay queued for the
    /// next tick.
    pub fn drain(&mut self, world: &dyn HostWorld, events: &EventStore, limit: usize) {
        let mut processed = 0;
        while processed < limit {
            let Ok(line) = self.inbound.try_recv() else {
                break;
            };
            match command::dispatch(&line, world, events) {
                Ok(Some(reply)) => self.enqueue_reply(reply),
                Ok(None) => {}
                Err(err) => {
                    warn!(peer = %self.peer, line, error = %err, "command failed");
                }
            }
            processed += 1;
        }

        if processed >= limit && !self.inbound.is_empty() {
            warn!(
                peer = %self.peer,
                deferred = self.inbound.len(),
                "per-tick command limit reached, deferring the rest to next tick"
            );
        }

        if !self.running.load(Ordering::Relaxed) && self.inbound.is_empty() {
            self.pending_removal = true;
        }
    }

    /// Queue a line for the writer task. Dropped silently once the session
    /// is pending removal.
    pub fn enqueue_reply(&self, text: String) {
        if self.pending_removal {
            return;
        }
        if let Some(outbound) = &self.outbound {
            // A send error means the writer already exited; the reply has
            // nowhere to go either way.
            let _ = outbound.send(text);
        }
    }

    /// Stop both I/O tasks, waiting up to the shutdown grace per task.
    /// Idempotent.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.pending_removal = true;
        self.running.store(false, Ordering::Relaxed);
        // Ends the writer once it has drained any queued replies.
        self.outbound = None;

        for (name, handle) in [
            ("reader", self.reader.take()),
            ("writer", self.writer.take()),
        ] {
            let Some(mut handle) = handle else { continue };
            if timeout(SHUTDOWN_GRACE, &mut handle).await.is_err() {
                warn!(peer = %self.peer, task = name, "task did not stop in time, aborting");
                handle.abort();
            }
        }
        info!(peer = %self.peer, id = self.id, "closed connection");
    }
}

async fn read_loop(
    read_half: OwnedReadHalf,
    inbound: UnboundedSender<String>,
    running: Arc<AtomicBool>,
    peer: SocketAddr,
) {
    let mut lines = BufReader::new(read_half).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if inbound.send(line).is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(err) => {
                // A reset from an impatient client is routine; anything else
                // is worth a warning, but only while we were still running.
                if running.load(Ordering::Relaxed) {
                    if err.kind() == io::ErrorKind::ConnectionReset {
                        info!(%peer, "connection reset by peer");
                    } else {
                        warn!(%peer, error = %err, "read failed");
                    }
                }
                break;
            }
        }
    }
    running.store(false, Ordering::Relaxed);
}

async fn write_loop(
    mut queue: UnboundedReceiver<String>,
    mut write_half: OwnedWriteHalf,
    running: Arc<AtomicBool>,
    peer: SocketAddr,
) {
    while let Some(line) = queue.recv().await {
        let mut result = write_line(&mut write_half, &line).await;
        // Push the whole backlog before flushing once.
        while result.is_ok() {
            match queue.try_recv() {
                Ok(next) => result = write_line(&mut write_half, &next).await,
                Err(_) => break,
            }
        }
        if result.is_ok() {
            result = write_half.flush().await;
        }
        if let Err(err) = result {
            if running.load(Ordering::Relaxed) {
                warn!(%peer, error = %err, "write failed");
            }
            running.store(false, Ordering::Relaxed);
            return;
        }
    }
}

async fn write_line(write_half: &mut OwnedWriteHalf, line: &str) -> io::Result<()> {
    write_half.write_all(line.as_bytes()).await?;
    write_half.write_all(b"\n").await
}
