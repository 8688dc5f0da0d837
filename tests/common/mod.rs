//! tests/common/mod.rs
//! A shared test helper to spawn the Axum app on an ephemeral port.

#![allow(dead_code)]

use axum::{serve, Router};
use restapi::{create_app, AppState, EnvironmentVariables, ModuleConfig};
use tokio::net::TcpListener as TokioTcpListener;

pub const TOKEN: &str = "integration-token";

/// Spawns the built-in module with authentication disabled.
pub fn spawn_app() -> String {
    spawn_app_with(EnvironmentVariables::default(), ModuleConfig::builtin())
}

/// Spawns the built-in module accepting only `TOKEN`.
pub fn spawn_authenticated_app() -> String {
    let env: EnvironmentVariables = EnvironmentVariables {
        api_tokens: vec![TOKEN.to_string()],
        ..EnvironmentVariables::default()
    };

    spawn_app_with(env, ModuleConfig::builtin())
}

/// Spawns the app on a random unused port and returns its base URL.
pub fn spawn_app_with(env: EnvironmentVariables, module: ModuleConfig) -> String {
    let state: AppState = AppState::new(env, &module).expect("Module should compile");
    let app: Router = create_app(state);

    // * Bind an ephemeral port using std::net::TcpListener.
    let std_listener: std::net::TcpListener = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    std_listener.set_nonblocking(true).unwrap();

    // * Convert std::net::TcpListener to tokio::net::TcpListener.
    let tokio_listener: TokioTcpListener = TokioTcpListener::from_std(std_listener)
        .expect("Failed to convert to tokio listener");

    let addr: std::net::SocketAddr = tokio_listener.local_addr().unwrap();

    // * Spawn the server in a background task.
    tokio::spawn(async move {
        serve(tokio_listener, app)
            .await
            .expect("Server failed");
    });

    // * Return the base URL, e.g. "http://127.0.0.1:12345".
    format!("http://{}", addr)
}
