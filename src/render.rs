//! HTML fragment rendering for the feed and ticker.
//!
//! The class strings mirror the production stylesheet; data fields are
//! escaped before interpolation.

use crate::model::{AgendaItem, Headline};

pub const TICKER_FALLBACK_MSG: &str = "Unable to load Twin Cities live news. Check pipeline.";
pub const AGENDA_FALLBACK_MSG: &str = "Unable to load council agenda. Check pipeline.";

const DEFAULT_TAG_CLASS: &str = "bg-gray-100 text-gray-700";

/// Fixed category color table; anything unlisted gets the gray default.
pub fn category_tag_class(category: &str) -> &'static str {
    match category {
        "Transit" => "bg-blue-50 text-blue-700",
        "Housing" => "bg-purple-50 text-purple-700",
        "Public Safety" => "bg-red-50 text-red-700",
        _ => DEFAULT_TAG_CLASS,
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_card(item: &AgendaItem) -> String {
    let color_class = category_tag_class(&item.category);
    format!(
        concat!(
            r#"<article class="bg-white p-7 rounded-2xl border border-gray-200 shadow-sm hover:shadow-md transition-shadow duration-300">"#,
            r#"<div class="flex items-center justify-between mb-4">"#,
            r#"<span class="text-xs font-bold uppercase tracking-wider px-3 py-1 rounded-full {color}">{category}</span>"#,
            r#"<span class="text-sm font-semibold text-gray-500 flex items-center gap-2">{date}</span>"#,
            r#"</div>"#,
            r#"<h3 class="text-2xl font-bold mb-3 leading-snug text-gray-900">{title}</h3>"#,
            r#"<div class="bg-gray-50 p-4 rounded-xl mb-4 border border-gray-100">"#,
            r#"<div class="flex items-center gap-2 mb-2">"#,
            r#"<span class="text-sm font-bold text-indigo-900">Gemini 3 Pro Summary</span>"#,
            r#"</div>"#,
            r#"<p class="text-gray-700 leading-relaxed text-[15px]">{summary}</p>"#,
            r#"</div>"#,
            r#"<div class="flex justify-between items-center text-sm font-medium">"#,
            r#"<span class="text-gray-500">Status: <span class="text-gray-900 font-bold ml-1">{status}</span></span>"#,
            r#"<button class="text-blue-600 hover:text-blue-800 transition-colors font-bold">Read Full Text &rarr;</button>"#,
            r#"</div>"#,
            r#"</article>"#
        ),
        color = color_class,
        category = escape_html(&item.category),
        date = escape_html(&item.date),
        title = escape_html(&item.title),
        summary = escape_html(&item.ai_summary),
        status = escape_html(&item.status),
    )
}

/// Full rebuild of the feed fragment: the loader is dropped and one
/// card is emitted per item, in input order.
pub fn render_agenda_feed(items: &[AgendaItem]) -> String {
    items.iter().map(render_card).collect()
}

/// Explicit feed failure fragment, same contract as the ticker's.
pub fn render_agenda_fallback() -> String {
    format!(
        concat!(
            r#"<article class="bg-white p-7 rounded-2xl border border-gray-200 shadow-sm">"#,
            r#"<p class="text-gray-500 text-sm uppercase tracking-wide">{msg}</p>"#,
            r#"</article>"#
        ),
        msg = AGENDA_FALLBACK_MSG,
    )
}

pub fn render_ticker(headlines: &[Headline]) -> String {
    let mut html = String::new();
    for news in headlines {
        html.push_str(r#"<span class="mx-3 text-blue-300">&bull;</span>"#);
        html.push_str(&format!(
            concat!(
                r#"<a href="{url}" target="_blank" rel="noopener noreferrer" "#,
                r#"class="hover:text-amber-300 transition-colors uppercase cursor-pointer hover:underline text-[13px] tracking-wide">{title}</a>"#
            ),
            url = escape_html(&news.url),
            title = escape_html(&news.title),
        ));
    }
    html
}

pub fn render_ticker_fallback() -> String {
    format!(
        concat!(
            r#"<span class="mx-3 text-blue-300">&bull;</span>"#,
            r#"<span class="text-white text-[13px] uppercase tracking-wide">{msg}</span>"#
        ),
        msg = TICKER_FALLBACK_MSG,
    )
}

/// Assemble the whole page from the independently produced fragments.
pub fn render_page(ticker: &str, feed: &str, matrix_svg: &str, tabs: crate::ui::TabClasses) -> String {
    format!(
        concat!(
            "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>MPLS Ledger</title></head>\n<body>\n",
            r#"<div id="news-ticker-content">{ticker}</div>"#,
            "\n",
            r#"<nav><button id="tab-summaries" class="{tab_summaries}">Summaries</button>"#,
            r#"<button id="tab-tracker" class="{tab_tracker}">Tracker</button></nav>"#,
            "\n",
            r#"<main id="agenda-feed">{feed}</main>"#,
            "\n",
            r#"<aside id="right-sidebar"><div id="d3-placeholder">{matrix}</div></aside>"#,
            "\n</body>\n</html>\n"
        ),
        ticker = ticker,
        tab_summaries = tabs.summaries,
        tab_tracker = tabs.tracker,
        feed = feed,
        matrix = matrix_svg,
    )
}
