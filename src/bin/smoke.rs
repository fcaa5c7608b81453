use anyhow::Result;
use clap::Parser;
use reqwest::{Client, StatusCode, header};
use serde_json::json;

/// Smoke checks against a deployed environment.
///
/// Runs health, search, empty-query and CORS checks against the backend and
/// frontend, plus optional dispatcher/worker health checks. Exits non-zero
/// when any required check fails.
#[derive(Parser, Debug)]
#[command(name = "smoke")]
struct Args {
    /// Backend API base URL
    backend_url: String,
    /// Frontend gateway base URL
    frontend_url: String,
    /// Dispatcher service base URL
    dispatcher_url: Option<String>,
    /// Worker service base URL
    worker_url: Option<String>,
    /// Bearer token for the authenticated search check
    #[arg(long, env = "SMOKE_AUTH_TOKEN")]
    token: Option<String>,
}

struct Check {
    name: String,
    required: bool,
    result: Result<String, String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = Client::new();

    let backend = args.backend_url.trim_end_matches('/');
    let frontend = args.frontend_url.trim_end_matches('/');

    let mut checks = vec![
        check_health(&client, backend, "backend health", true).await,
        check_search(&client, backend, args.token.as_deref()).await,
        check_empty_query(&client, backend).await,
        check_health(&client, frontend, "frontend health", true).await,
        check_cors_preflight(&client, frontend).await,
    ];

    if let Some(url) = &args.dispatcher_url {
        checks.push(check_health(&client, url.trim_end_matches('/'), "dispatcher health", false).await);
    }
    if let Some(url) = &args.worker_url {
        checks.push(check_health(&client, url.trim_end_matches('/'), "worker health", false).await);
    }

    let mut failed_required = 0;
    for check in &checks {
        match &check.result {
            Ok(msg) => println!("PASS  {}: {}", check.name, msg),
            Err(msg) => {
                println!("FAIL  {}: {}", check.name, msg);
                if check.required {
                    failed_required += 1;
                }
            }
        }
    }

    println!(
        "\n{} of {} checks passed",
        checks.iter().filter(|c| c.result.is_ok()).count(),
        checks.len()
    );

    if failed_required > 0 {
        std::process::exit(1);
    }
    Ok(())
}

async fn check_health(client: &Client, base_url: &str, name: &str, required: bool) -> Check {
    let url = format!("{base_url}/health");
    let result = match client.get(&url).send().await {
        Ok(r) if r.status().is_success() => Ok(format!("{} returned {}", url, r.status())),
        Ok(r) => Err(format!("{} returned {}", url, r.status())),
        Err(e) => Err(format!("{url} unreachable: {e}")),
    };
    Check {
        name: name.to_string(),
        required,
        result,
    }
}

async fn check_search(client: &Client, backend_url: &str, token: Option<&str>) -> Check {
    let url = format!("{backend_url}/api/v1/search");
    let mut request = client.post(&url).json(&json!({ "query": "test" }));
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    let result = match request.send().await {
        Ok(r) if r.status().is_success() => Ok(format!("search returned {}", r.status())),
        Ok(r) => Err(format!("search returned {}", r.status())),
        Err(e) => Err(format!("search request failed: {e}")),
    };
    Check {
        name: "backend search".to_string(),
        required: true,
        result,
    }
}

/// The backend rejects an empty query with 400 ("Search query cannot be
/// empty"). That contract belongs to the backend; the gateway only mirrors
/// it.
async fn check_empty_query(client: &Client, backend_url: &str) -> Check {
    let url = format!("{backend_url}/api/v1/search");
    let result = match client.post(&url).json(&json!({ "query": "" })).send().await {
        Ok(r) if r.status() == StatusCode::BAD_REQUEST => {
            Ok("empty query rejected with 400".to_string())
        }
        Ok(r) => Err(format!("empty query returned {} instead of 400", r.status())),
        Err(e) => Err(format!("empty query request failed: {e}")),
    };
    Check {
        name: "backend empty-query rejection".to_string(),
        required: true,
        result,
    }
}

async fn check_cors_preflight(client: &Client, frontend_url: &str) -> Check {
    let url = format!("{frontend_url}/api/v1/subscriptions");
    let request = client
        .request(reqwest::Method::OPTIONS, &url)
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST");

    let result = match request.send().await {
        Ok(r) if r.status().is_success() => {
            if r.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
                Ok(format!("preflight returned {}", r.status()))
            } else {
                Err("preflight response missing access-control-allow-origin".to_string())
            }
        }
        Ok(r) => Err(format!("preflight returned {}", r.status())),
        Err(e) => Err(format!("preflight request failed: {e}")),
    };
    Check {
        name: "frontend CORS preflight".to_string(),
        required: true,
        result,
    }
}
