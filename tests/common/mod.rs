#![allow(dead_code)]

use lazy_static::lazy_static;
use statuspage::configuration::{ProberSettings, Settings};
use statuspage::health::{HttpMethod, Target};
use statuspage::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;

pub const TEST_USER_AGENT: &str = "statuspage-test/1.0";

// Set TEST_LOG=1 to see the bunyan output of a test run.
lazy_static! {
    static ref TRACING: () = {
        let name = "test".to_string();
        let filter = "debug".to_string();
        if std::env::var("TEST_LOG").is_ok() {
            init_subscriber(get_subscriber(name, filter, std::io::stdout));
        } else {
            init_subscriber(get_subscriber(name, filter, std::io::sink));
        }
    };
}

pub fn init_tracing() {
    lazy_static::initialize(&TRACING);
}

pub fn prober_settings(targets: Vec<Target>, timeout_ms: u64) -> ProberSettings {
    ProberSettings {
        timeout_ms,
        user_agent: TEST_USER_AGENT.to_string(),
        targets,
    }
}

pub fn target(key: &str, url: String) -> Target {
    Target::new(key, &key.to_uppercase(), &url, HttpMethod::Get)
}

/// A URL on a port nobody listens on: the listener is bound and dropped.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

pub struct TestApp {
    pub address: String,
}

// we have to run server in another task
pub async fn spawn_app(prober: ProberSettings) -> TestApp {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let settings = Settings {
        app_host: "127.0.0.1".to_string(),
        app_port: port,
        prober,
    };

    let server = statuspage::startup::run(listener, settings).expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp { address }
}
