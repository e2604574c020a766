//! Accept loop behavior when the process runs out of file descriptors.
//!
//! Lowers `RLIMIT_NOFILE` for the whole process, so it lives in its own test
//! binary with a single test.

#![cfg(target_os = "linux")]

use std::fs::File;
use std::io;
use std::mem;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};

use user_store_api::router::Router;
use user_store_api::server::Server;
use user_store_core::UserStore;

const ANSWER_TIMEOUT: Duration = Duration::from_secs(5);

fn open_fd_count() -> usize {
    std::fs::read_dir("/proc/self/fd")
        .map(|dir| dir.count())
        .unwrap_or(0)
}

fn nofile_limit() -> libc::rlimit {
    let mut limit: libc::rlimit = unsafe { mem::zeroed() };
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut limit) } == -1 {
        panic!("getrlimit failed: {}", io::Error::last_os_error());
    }
    limit
}

fn set_nofile_limit(limit: &libc::rlimit) {
    if unsafe { libc::setrlimit(libc::RLIMIT_NOFILE, limit) } == -1 {
        panic!("setrlimit failed: {}", io::Error::last_os_error());
    }
}

async fn get_users(addr: SocketAddr) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET /api/users HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        addr
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    timeout(ANSWER_TIMEOUT, stream.read_to_string(&mut response))
        .await
        .expect("server did not answer in time")
        .unwrap();
    response
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_serve_survives_fd_exhaustion() {
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let router = Router::new(Arc::new(UserStore::new()));
    let server = Server::bind(addr, router).await.unwrap();
    let addr = server.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let stopped = async {
        let _ = shutdown_rx.await;
    };
    let handle = tokio::spawn(server.serve(stopped));

    // Fill the descriptor table, then free exactly one slot for the client
    // socket so the server's accept has nothing left to allocate.
    let original = nofile_limit();
    let lowered = libc::rlimit {
        rlim_cur: (open_fd_count() + 16) as libc::rlim_t,
        rlim_max: original.rlim_max,
    };
    set_nofile_limit(&lowered);

    let mut files = Vec::new();
    while let Ok(file) = File::open("/dev/null") {
        files.push(file);
    }
    assert!(!files.is_empty());
    files.pop();

    let client = TcpStream::connect(addr).await;
    sleep(Duration::from_millis(300)).await;
    let serve_exited = handle.is_finished();

    drop(files);
    set_nofile_limit(&original);

    assert!(client.is_ok(), "client socket was not created");
    assert!(!serve_exited, "serve exited on accept error");
    drop(client);

    let response = get_users(addr).await;
    assert!(response.starts_with("HTTP/1.1 200 OK"), "{}", response);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
