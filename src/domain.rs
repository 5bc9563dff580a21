/// Domain extraction for the active tab's URL
use url::Url;

/// Extract the lookup domain from a tab URL
///
/// Algorithm:
/// 1. Parse the URL and take its host
/// 2. Lowercase it
/// 3. Strip one leading "www."
///
/// URLs without a host (about:blank, file://, plain text) yield `None`.
///
/// Examples:
/// - https://www.google.com/search → google.com
/// - https://news.bbc.co.uk/article → news.bbc.co.uk
/// - http://localhost:3000 → localhost
pub fn extract_domain(url: &str) -> Option<String> {
    let hostname = extract_hostname(url)?;
    let domain = hostname.strip_prefix("www.").unwrap_or(&hostname);

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}

/// Hostname of a URL, without port
fn extract_hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_lowercase();

    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain_basic() {
        assert_eq!(extract_domain("https://www.google.com"), Some("google.com".to_string()));
        assert_eq!(extract_domain("https://google.com"), Some("google.com".to_string()));
        assert_eq!(extract_domain("http://google.com"), Some("google.com".to_string()));
    }

    #[test]
    fn test_extract_domain_keeps_subdomains() {
        assert_eq!(extract_domain("https://ai.microsoft.com"), Some("ai.microsoft.com".to_string()));
        assert_eq!(extract_domain("https://news.bbc.co.uk/news"), Some("news.bbc.co.uk".to_string()));
    }

    #[test]
    fn test_extract_domain_strips_only_leading_www() {
        assert_eq!(extract_domain("https://www.www.example.com"), Some("www.example.com".to_string()));
        assert_eq!(extract_domain("https://shop.www.example.com"), Some("shop.www.example.com".to_string()));
        assert_eq!(extract_domain("https://wwwexample.com"), Some("wwwexample.com".to_string()));
    }

    #[test]
    fn test_extract_domain_with_path_and_port() {
        assert_eq!(extract_domain("https://www.google.com/search?q=rust"), Some("google.com".to_string()));
        assert_eq!(extract_domain("https://localhost:3000/app"), Some("localhost".to_string()));
        assert_eq!(extract_domain("http://127.0.0.1:8080"), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_extract_domain_lowercases() {
        assert_eq!(extract_domain("HTTPS://WWW.Example.COM/Path"), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_domain_edge_cases() {
        assert_eq!(extract_domain(""), None);
        assert_eq!(extract_domain("not-a-url"), None);
        assert_eq!(extract_domain("about:blank"), None);
        assert_eq!(extract_domain("file:///home/user/index.html"), None);
        assert_eq!(extract_domain("https://www."), None);
    }
}
