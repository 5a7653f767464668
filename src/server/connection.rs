// Connection handling module
// Accepts a single TCP connection and serves it with hyper

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::AppState;
use crate::http;
use crate::logger;

/// Accept and process a connection, enforcing `performance.max_connections`.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
    shutdown: watch::Receiver<bool>,
) {
    // Increment first, then check, so concurrent accepts cannot both slip under the limit
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. \
                 Connection from {peer_addr} rejected."
            ));
            drop(stream);
            return;
        }
    }

    handle_connection(
        stream,
        peer_addr,
        Arc::clone(state),
        Arc::clone(conn_counter),
        shutdown,
    );
}

/// Serve one connection on the local task set.
///
/// The whole connection is bounded by `performance.request_timeout`; the
/// counter is decremented however it ends. Once `shutdown` flips, hyper
/// finishes the in-flight request (if any) and closes the connection instead
/// of waiting for the next keep-alive request.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
    mut shutdown: watch::Receiver<bool>,
) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);
        let timeout = std::time::Duration::from_secs(state.config.performance.request_timeout);

        let mut builder = http1::Builder::new();
        builder
            .timer(TokioTimer::new())
            .keep_alive(state.config.performance.keep_alive);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                http::handle_request(req, Arc::clone(&service_state), peer_addr)
            }),
        );
        tokio::pin!(conn);

        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);
        let mut closing = false;

        loop {
            tokio::select! {
                result = conn.as_mut() => {
                    if let Err(err) = result {
                        logger::log_connection_error(&err);
                    }
                    break;
                }
                _ = shutdown.wait_for(|requested| *requested), if !closing => {
                    closing = true;
                    conn.as_mut().graceful_shutdown();
                }
                () = &mut deadline => {
                    logger::log_warning(&format!(
                        "Connection from {peer_addr} timed out after {} seconds",
                        timeout.as_secs()
                    ));
                    break;
                }
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}
