//! Registry reachability check

use log::debug;
use tokio::net::lookup_host;
use tokio::process::Command;
use url::Url;

const REGISTRY_HOST: &str = "registry.yarnpkg.com";

async fn resolves(host: &str) -> bool {
    lookup_host((host, 443))
        .await
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false)
}

/// Host part of a proxy URL
pub fn proxy_host(proxy: &str) -> Option<String> {
    Url::parse(proxy.trim())
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
}

/// Proxy configured through the environment or npm
async fn configured_proxy() -> Option<String> {
    if let Ok(proxy) = std::env::var("https_proxy").or_else(|_| std::env::var("HTTPS_PROXY")) {
        return Some(proxy);
    }

    let output = Command::new("npm")
        .args(["config", "get", "https-proxy"])
        .output()
        .await
        .ok()?;
    let proxy = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if output.status.success() && !proxy.is_empty() && proxy != "null" {
        Some(proxy)
    } else {
        None
    }
}

/// Whether the package registry (or the configured proxy) resolves
pub async fn is_online() -> bool {
    if resolves(REGISTRY_HOST).await {
        return true;
    }
    debug!("{} did not resolve, checking proxy", REGISTRY_HOST);

    match configured_proxy().await.as_deref().and_then(proxy_host) {
        Some(host) => resolves(&host).await,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_host() {
        assert_eq!(
            proxy_host("http://proxy.example.com:8080"),
            Some("proxy.example.com".to_string())
        );
        assert_eq!(proxy_host("not a url"), None);
    }
}
