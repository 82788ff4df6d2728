//! Tab state and pane visibility.
//!
//! The original page kept this state implicitly in DOM classes; here
//! it is an explicit two-valued state with pure functions mapping a
//! click to class assignments and pane visibility. Viewport width is
//! read at click time, never cached, so a resize between clicks does
//! not reconcile pane visibility until the next click.

use crate::logging::{log, obj, v_num, v_str, Domain, Level};

pub const TAB_ACTIVE_CLASS: &str = "tab-active pb-1 transition-colors";
pub const TAB_INACTIVE_CLASS: &str = "tab-inactive pb-1 transition-colors";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Summaries,
    Tracker,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Summaries => "summaries",
            Tab::Tracker => "tracker",
        }
    }
}

/// Class strings for the two tab elements, mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabClasses {
    pub summaries: &'static str,
    pub tracker: &'static str,
}

pub fn tab_classes(selected: Tab) -> TabClasses {
    match selected {
        Tab::Summaries => TabClasses {
            summaries: TAB_ACTIVE_CLASS,
            tracker: TAB_INACTIVE_CLASS,
        },
        Tab::Tracker => TabClasses {
            summaries: TAB_INACTIVE_CLASS,
            tracker: TAB_ACTIVE_CLASS,
        },
    }
}

/// Which of the two content panes is visible on narrow viewports.
/// `sidebar_flex_column` mirrors the flex/flex-col classes the sidebar
/// gets when shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneVisibility {
    pub feed_visible: bool,
    pub sidebar_visible: bool,
    pub sidebar_flex_column: bool,
}

/// Pane visibility after a tab click. Returns None at or above the
/// breakpoint: wide viewports show both panes and a click must not
/// touch either one.
pub fn pane_visibility(selected: Tab, viewport_width: u32, breakpoint: u32) -> Option<PaneVisibility> {
    if viewport_width >= breakpoint {
        return None;
    }
    Some(match selected {
        Tab::Summaries => PaneVisibility {
            feed_visible: true,
            sidebar_visible: false,
            sidebar_flex_column: false,
        },
        Tab::Tracker => PaneVisibility {
            feed_visible: false,
            sidebar_visible: true,
            sidebar_flex_column: true,
        },
    })
}

/// Apply a click: log the transition and return the new class and pane
/// assignments together.
pub fn on_tab_click(selected: Tab, viewport_width: u32, breakpoint: u32) -> (TabClasses, Option<PaneVisibility>) {
    let classes = tab_classes(selected);
    let panes = pane_visibility(selected, viewport_width, breakpoint);
    log(
        Level::Debug,
        Domain::Tabs,
        "tab_click",
        obj(&[
            ("tab", v_str(selected.as_str())),
            ("viewport_width", v_num(viewport_width as f64)),
            ("panes_touched", v_str(if panes.is_some() { "yes" } else { "no" })),
        ]),
    );
    (classes, panes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAKPOINT: u32 = 1024;

    #[test]
    fn test_tab_classes_mutually_exclusive() {
        let c = tab_classes(Tab::Summaries);
        assert_eq!(c.summaries, TAB_ACTIVE_CLASS);
        assert_eq!(c.tracker, TAB_INACTIVE_CLASS);

        let c = tab_classes(Tab::Tracker);
        assert_eq!(c.summaries, TAB_INACTIVE_CLASS);
        assert_eq!(c.tracker, TAB_ACTIVE_CLASS);
    }

    #[test]
    fn test_tracker_click_narrow_swaps_panes() {
        let panes = pane_visibility(Tab::Tracker, 800, BREAKPOINT).unwrap();
        assert!(!panes.feed_visible);
        assert!(panes.sidebar_visible);
        assert!(panes.sidebar_flex_column);
    }

    #[test]
    fn test_summaries_click_narrow_restores_feed() {
        let panes = pane_visibility(Tab::Summaries, 800, BREAKPOINT).unwrap();
        assert!(panes.feed_visible);
        assert!(!panes.sidebar_visible);
        assert!(!panes.sidebar_flex_column);
    }

    #[test]
    fn test_wide_viewport_leaves_panes_alone() {
        assert!(pane_visibility(Tab::Tracker, 1024, BREAKPOINT).is_none());
        assert!(pane_visibility(Tab::Summaries, 1920, BREAKPOINT).is_none());
    }

    #[test]
    fn test_boundary_just_below_breakpoint() {
        assert!(pane_visibility(Tab::Tracker, 1023, BREAKPOINT).is_some());
    }

    #[test]
    fn test_on_tab_click_combines_both() {
        let (classes, panes) = on_tab_click(Tab::Tracker, 640, BREAKPOINT);
        assert_eq!(classes.tracker, TAB_ACTIVE_CLASS);
        assert!(panes.is_some());
    }
}
