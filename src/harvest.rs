//! News harvester: scrapes headline/link pairs out of the local-news
//! page and writes `news.json` for the ticker. When the page cannot be
//! fetched or parsed (bot blocking, markup drift), the built-in mock
//! list keeps the ticker alive.

use anyhow::Result;
use regex::Regex;
use reqwest::Client;
use std::collections::HashSet;

use crate::config::Config;
use crate::logging::{log, obj, v_num, v_str, Domain, Level};
use crate::model::Headline;

const MIN_TITLE_LEN: usize = 20;
const CHROME_TITLES: [&str; 2] = ["Twin Cities", "Axios"];

pub fn mock_headlines() -> Vec<Headline> {
    let url = "https://www.axios.com/local/twin-cities/news";
    [
        "Minnesota's Olympic gold drought ends with thrilling women's hockey win",
        "Nicollet Avenue bridge over Minnehaha to close for 2 years",
        "Twin Cities weather: Expect rapid cool-down this week",
        "Mayor signs new zoning ordinance for affordable housing",
    ]
    .iter()
    .map(|title| Headline {
        title: (*title).to_string(),
        url: url.to_string(),
    })
    .collect()
}

fn strip_tags(raw: &str) -> String {
    let tags = Regex::new(r"<[^>]+>").unwrap();
    let ws = Regex::new(r"\s+").unwrap();
    ws.replace_all(tags.replace_all(raw, "").trim(), " ").to_string()
}

fn absolutize(href: &str, base: &str) -> Option<String> {
    if href.starts_with("http") {
        Some(href.to_string())
    } else if href.starts_with('/') {
        let origin: String = base
            .splitn(4, '/')
            .take(3)
            .collect::<Vec<_>>()
            .join("/");
        Some(format!("{}{}", origin, href))
    } else {
        None
    }
}

/// Pull headline candidates from h1/h2/h3 markup: an anchor wrapping a
/// heading, a heading wrapping an anchor, or a bare heading (which
/// falls back to the page URL). Short titles and site chrome are
/// skipped; duplicates are dropped preserving first-seen order.
pub fn extract_headlines(html: &str, page_url: &str, max: usize) -> Vec<Headline> {
    // The gap between the anchor open tag and the heading may hold
    // text and non-anchor tags only, so a match never crosses </a>
    // into a neighboring card.
    let anchor_heading = Regex::new(
        r#"(?s)<a[^>]*href="([^"]+)"[^>]*>(?:[^<]|<[^/a>][^>]*>|</[^a>][^>]*>)*?<h[1-3][^>]*>(.+?)</h[1-3]>"#,
    )
    .unwrap();
    let heading_anchor = Regex::new(
        r#"(?s)<h[1-3][^>]*>\s*<a[^>]*href="([^"]+)"[^>]*>(.+?)</a>"#,
    )
    .unwrap();
    let bare_heading = Regex::new(r"(?s)<h[1-3][^>]*>(.+?)</h[1-3]>").unwrap();

    let mut candidates: Vec<Headline> = Vec::new();
    for caps in anchor_heading.captures_iter(html).chain(heading_anchor.captures_iter(html)) {
        let title = strip_tags(&caps[2]);
        if title.len() <= MIN_TITLE_LEN {
            continue;
        }
        if let Some(url) = absolutize(&caps[1], page_url) {
            candidates.push(Headline { title, url });
        }
    }
    for caps in bare_heading.captures_iter(html) {
        let title = strip_tags(&caps[1]);
        if title.len() <= MIN_TITLE_LEN || CHROME_TITLES.iter().any(|c| title.contains(c)) {
            continue;
        }
        candidates.push(Headline {
            title,
            url: page_url.to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for h in candidates {
        if seen.insert(h.title.clone()) {
            unique.push(h);
        }
        if unique.len() == max {
            break;
        }
    }
    unique
}

/// Fetch the source page and extract headlines, falling back to the
/// mock list on any failure or an empty parse.
pub async fn harvest(cfg: &Config) -> Vec<Headline> {
    let client = Client::new();
    let fetched = async {
        let resp = client
            .get(&cfg.news_source_url)
            .header("User-Agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64)")
            .send()
            .await?;
        let html = resp.text().await?;
        anyhow::Ok(extract_headlines(&html, &cfg.news_source_url, cfg.max_headlines))
    }
    .await;

    match fetched {
        Ok(headlines) if !headlines.is_empty() => {
            log(
                Level::Info,
                Domain::Harvest,
                "harvested",
                obj(&[
                    ("source", v_str(&cfg.news_source_url)),
                    ("headlines", v_num(headlines.len() as f64)),
                ]),
            );
            headlines
        }
        Ok(_) => {
            log(
                Level::Warn,
                Domain::Harvest,
                "empty_parse_fallback",
                obj(&[("source", v_str(&cfg.news_source_url))]),
            );
            mock_headlines()
        }
        Err(err) => {
            log(
                Level::Warn,
                Domain::Harvest,
                "fetch_failed_fallback",
                obj(&[("error", v_str(&err.to_string()))]),
            );
            mock_headlines()
        }
    }
}

pub fn write_news_json(path: &str, headlines: &[Headline]) -> Result<()> {
    let json = serde_json::to_string_pretty(headlines)?;
    std::fs::write(path, json)?;
    Ok(())
}
