#[derive(Clone)]
pub struct Config {
    pub agenda_endpoint: String,
    pub news_url: String,
    pub news_source_url: String,
    pub news_out_path: String,
    pub lims_api_url: String,
    /// Absent key means the summarizer falls back to placeholders.
    pub gemini_api_key: Option<String>,
    pub sqlite_path: String,
    pub bind_addr: String,
    pub page_out_path: String,
    /// Viewport breakpoint below which the feed and sidebar are mutually exclusive.
    pub mobile_breakpoint: u32,
    /// Viewport width assumed when assembling the static page.
    pub viewport_width: u32,
    /// Container width handed to the matrix renderer, in px.
    pub matrix_width: f64,
    /// "votes" draws correlations from the ledger; anything else mocks.
    pub matrix_source: String,
    pub max_headlines: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            agenda_endpoint: std::env::var("AGENDA_ENDPOINT")
                .unwrap_or_else(|_| "http://127.0.0.1:8787/api/agenda".to_string()),
            news_url: std::env::var("NEWS_URL").unwrap_or_else(|_| "news.json".to_string()),
            news_source_url: std::env::var("NEWS_SOURCE_URL")
                .unwrap_or_else(|_| "https://www.axios.com/local/twin-cities/news".to_string()),
            news_out_path: std::env::var("NEWS_OUT").unwrap_or_else(|_| "news.json".to_string()),
            lims_api_url: std::env::var("LIMS_API_URL")
                .unwrap_or_else(|_| "https://lims.minneapolismn.gov/api/Meetings".to_string()),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            sqlite_path: std::env::var("SQLITE_PATH").unwrap_or_else(|_| "./ledger.sqlite".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8787".to_string()),
            page_out_path: std::env::var("PAGE_OUT").unwrap_or_else(|_| "./out/index.html".to_string()),
            mobile_breakpoint: std::env::var("MOBILE_BREAKPOINT").ok().and_then(|v| v.parse().ok()).unwrap_or(1024),
            viewport_width: std::env::var("VIEWPORT_WIDTH").ok().and_then(|v| v.parse().ok()).unwrap_or(1280),
            matrix_width: std::env::var("MATRIX_WIDTH").ok().and_then(|v| v.parse().ok()).unwrap_or(520.0),
            matrix_source: std::env::var("MATRIX_SOURCE").unwrap_or_else(|_| "mock".to_string()),
            max_headlines: std::env::var("MAX_HEADLINES").ok().and_then(|v| v.parse().ok()).unwrap_or(8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_sane() {
        let cfg = Config::from_env();
        assert_eq!(cfg.mobile_breakpoint, 1024);
        assert!(cfg.matrix_width > 0.0);
        assert!(cfg.agenda_endpoint.contains("/api/agenda"));
    }
}
