//! End-to-end rendering checks: the properties the dashboard promises
//! about its fragments, independent of any network.

use mpls_ledger::matrix::svg::{diverging_color, render_matrix_svg};
use mpls_ledger::matrix::{CorrelationProvider, MockCorrelationProvider, MEMBERS};
use mpls_ledger::model::{AgendaItem, Headline};
use mpls_ledger::render::{
    render_agenda_feed, render_page, render_ticker, render_ticker_fallback, TICKER_FALLBACK_MSG,
};
use mpls_ledger::ui::{pane_visibility, tab_classes, Tab, TAB_ACTIVE_CLASS, TAB_INACTIVE_CLASS};

fn parse_items(raw: &str) -> Vec<AgendaItem> {
    serde_json::from_str(raw).expect("agenda JSON should parse")
}

// ---------------------------------------------------------------------------
// Feed: N items in, N cards out, input order preserved
// ---------------------------------------------------------------------------
#[test]
fn feed_card_count_matches_endpoint_array() {
    for n in [0usize, 1, 3, 10] {
        let items: Vec<AgendaItem> = (0..n)
            .map(|i| AgendaItem {
                category: "Transit".to_string(),
                date: format!("2026-01-{:02}", i + 1),
                title: format!("Item {}", i),
                ai_summary: "...".to_string(),
                status: "Pending".to_string(),
            })
            .collect();
        let html = render_agenda_feed(&items);
        assert_eq!(html.matches("<article").count(), n, "n={}", n);
    }
}

#[test]
fn feed_preserves_input_order() {
    let items: Vec<AgendaItem> = (0..5)
        .map(|i| AgendaItem {
            category: "Housing".to_string(),
            date: "2026-01-01".to_string(),
            title: format!("ordered-title-{}", i),
            ai_summary: "...".to_string(),
            status: "Pending".to_string(),
        })
        .collect();
    let html = render_agenda_feed(&items);
    let mut last = 0;
    for i in 0..5 {
        let pos = html
            .find(&format!("ordered-title-{}", i))
            .expect("title missing");
        assert!(pos >= last, "title {} out of order", i);
        last = pos;
    }
}

// ---------------------------------------------------------------------------
// Scenario from the service contract: one Transit row
// ---------------------------------------------------------------------------
#[test]
fn transit_scenario_renders_blue_tag_card() {
    let items = parse_items(
        r#"[{"category":"Transit","date":"2024-01-01","title":"Light Rail Review","ai_summary":"...","status":"Pending"}]"#,
    );
    let html = render_agenda_feed(&items);
    assert_eq!(html.matches("<article").count(), 1);
    assert!(html.contains("bg-blue-50 text-blue-700"));
    assert!(html.contains("Light Rail Review"));
}

#[test]
fn unlisted_category_falls_back_to_gray() {
    let items = parse_items(
        r#"[{"category":"Elections","date":"2024-01-01","title":"Ranked Choice Audit","ai_summary":"...","status":"Pending"}]"#,
    );
    let html = render_agenda_feed(&items);
    assert!(html.contains("bg-gray-100 text-gray-700"));
}

// ---------------------------------------------------------------------------
// Ticker
// ---------------------------------------------------------------------------
#[test]
fn empty_headlines_render_no_bullets() {
    let html = render_ticker(&[]);
    assert!(html.is_empty());
}

#[test]
fn ticker_fallback_appears_exactly_once() {
    let html = render_ticker_fallback();
    assert_eq!(html.matches(TICKER_FALLBACK_MSG).count(), 1);
}

#[test]
fn ticker_links_open_in_new_tab() {
    let headlines = vec![Headline {
        title: "Council passes budget amendment".to_string(),
        url: "https://example.org/budget".to_string(),
    }];
    let html = render_ticker(&headlines);
    assert!(html.contains(r#"target="_blank""#));
    assert!(html.contains(r#"rel="noopener noreferrer""#));
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------
#[test]
fn tracker_click_below_breakpoint_swaps_panes() {
    let panes = pane_visibility(Tab::Tracker, 1023, 1024).expect("panes should be touched");
    assert!(!panes.feed_visible);
    assert!(panes.sidebar_visible);
    assert!(panes.sidebar_flex_column);

    let back = pane_visibility(Tab::Summaries, 1023, 1024).expect("panes should be touched");
    assert!(back.feed_visible);
    assert!(!back.sidebar_visible);
}

#[test]
fn wide_viewport_click_touches_nothing() {
    assert!(pane_visibility(Tab::Tracker, 1024, 1024).is_none());
    assert!(pane_visibility(Tab::Summaries, 2560, 1024).is_none());
}

#[test]
fn tab_classes_are_mutually_exclusive() {
    for tab in [Tab::Summaries, Tab::Tracker] {
        let c = tab_classes(tab);
        assert_ne!(c.summaries, c.tracker);
        assert!(c.summaries == TAB_ACTIVE_CLASS || c.summaries == TAB_INACTIVE_CLASS);
    }
}

// ---------------------------------------------------------------------------
// Matrix
// ---------------------------------------------------------------------------
#[test]
fn matrix_diagonal_is_one_off_diagonal_bounded() {
    let cells = MockCorrelationProvider.correlations(&MEMBERS).unwrap();
    assert_eq!(cells.len(), MEMBERS.len() * MEMBERS.len());
    for cell in &cells {
        if cell.member_a == cell.member_b {
            assert_eq!(cell.value, 1.0);
        } else {
            assert!((-1.0..=1.0).contains(&cell.value));
        }
    }
}

#[test]
fn matrix_regenerates_per_initialization() {
    // With 56 off-diagonal uniform draws, two runs colliding on every
    // cell is not a thing.
    let a = MockCorrelationProvider.correlations(&MEMBERS).unwrap();
    let b = MockCorrelationProvider.correlations(&MEMBERS).unwrap();
    let differs = a
        .iter()
        .zip(&b)
        .any(|(ca, cb)| ca.member_a != ca.member_b && ca.value != cb.value);
    assert!(differs);
}

#[test]
fn matrix_svg_diagonal_cells_are_blue() {
    assert_eq!(diverging_color(1.0), "#3b82f6");
    let cells = MockCorrelationProvider.correlations(&MEMBERS).unwrap();
    let svg = render_matrix_svg(&cells, &MEMBERS, 640.0);
    // 8 diagonal cells at value 1.0 produce at least 8 pure-blue fills
    assert!(svg.matches("#3b82f6").count() >= 8);
}

// ---------------------------------------------------------------------------
// Page assembly
// ---------------------------------------------------------------------------
#[test]
fn page_slots_are_independent() {
    let cells = MockCorrelationProvider.correlations(&MEMBERS).unwrap();
    let svg = render_matrix_svg(&cells, &MEMBERS, 640.0);
    let page = render_page(
        &render_ticker_fallback(),
        &render_agenda_feed(&[]),
        &svg,
        tab_classes(Tab::Summaries),
    );
    // A dead ticker and an empty feed still yield a complete page with
    // the matrix drawn.
    assert!(page.contains(TICKER_FALLBACK_MSG));
    assert!(page.contains("<svg"));
    assert!(page.contains(r#"id="agenda-feed""#));
}
