use chrono::Local;
use hyper::{Method, Uri};
use std::net::SocketAddr;

use crate::config::Config;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Tink gateway started successfully");
    println!("Listening on: http://{addr}");
    println!("Upstream API: {}", config.upstream.base_url);
    println!("Static directory: {}", config.resources.static_dir);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

pub fn log_request(method: &Method, uri: &Uri) {
    println!(
        "[{}] {method}: {uri}",
        Local::now().format("%d/%b/%Y %H:%M:%S")
    );
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
