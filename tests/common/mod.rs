use pivot_frame::api::{serve_listener, AppState};
use std::time::Duration;

/// Start a server on an ephemeral port and return its base URL.
///
/// The listener is bound before this returns, so requests made right away
/// queue until the runtime starts accepting.
pub fn spawn_server() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().expect("listener address");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("test runtime");

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            serve_listener(listener, AppState::new(Duration::from_secs(5)), std::future::pending())
                .await
                .expect("test server");
        });
    });

    format!("http://{}", addr)
}
