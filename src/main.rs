//! Dashboard assembly: the four view components initialize
//! independently and concurrently, each into its own page slot, and
//! the finished page is written to disk. A failed fetch degrades that
//! slot, never the page.

use anyhow::Result;
use mpls_ledger::config::Config;
use mpls_ledger::feed::agenda::{load_feed_fragment, HttpAgendaSource};
use mpls_ledger::feed::news::{
    load_ticker_fragment, FileHeadlineSource, HeadlineSource, HttpHeadlineSource,
};
use mpls_ledger::logging::{log, obj, v_num, v_str, Domain, Level};
use mpls_ledger::matrix::svg::render_matrix_svg;
use mpls_ledger::matrix::{provider_from, CorrelationProvider, MEMBERS};
use mpls_ledger::render::render_page;
use mpls_ledger::ui::{pane_visibility, tab_classes, Tab};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("agenda_endpoint", v_str(&cfg.agenda_endpoint)),
            ("news_url", v_str(&cfg.news_url)),
            ("matrix_source", v_str(&cfg.matrix_source)),
            ("viewport_width", v_num(cfg.viewport_width as f64)),
        ]),
    );

    let agenda_source = HttpAgendaSource::new(cfg.agenda_endpoint.clone());
    // news.json may be a relative static resource or a full URL.
    let news_source: Box<dyn HeadlineSource> = if cfg.news_url.starts_with("http") {
        Box::new(HttpHeadlineSource::new(cfg.news_url.clone()))
    } else {
        Box::new(FileHeadlineSource {
            path: cfg.news_url.clone(),
        })
    };

    // The two fetch-bound components run concurrently; neither depends
    // on the other's output.
    let (feed, ticker) = tokio::join!(
        load_feed_fragment(&agenda_source),
        load_ticker_fragment(news_source.as_ref()),
    );

    let provider = provider_from(&cfg.matrix_source, &cfg.sqlite_path);
    let cells = provider.correlations(&MEMBERS)?;
    let matrix_svg = render_matrix_svg(&cells, &MEMBERS, cfg.matrix_width);
    let tabs = tab_classes(Tab::Summaries);
    if let Some(panes) = pane_visibility(Tab::Summaries, cfg.viewport_width, cfg.mobile_breakpoint) {
        log(
            Level::Debug,
            Domain::Tabs,
            "narrow_viewport_panes",
            obj(&[
                ("feed_visible", v_str(if panes.feed_visible { "yes" } else { "no" })),
                ("sidebar_visible", v_str(if panes.sidebar_visible { "yes" } else { "no" })),
            ]),
        );
    }

    let page = render_page(&ticker, &feed, &matrix_svg, tabs);
    if let Some(parent) = std::path::Path::new(&cfg.page_out_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&cfg.page_out_path, &page)?;

    log(
        Level::Info,
        Domain::System,
        "page_written",
        obj(&[
            ("path", v_str(&cfg.page_out_path)),
            ("bytes", v_num(page.len() as f64)),
        ]),
    );
    Ok(())
}
