use logmonitor::{LogMonitor, MonitorError, Pattern, Severity};

fn seeded() -> LogMonitor {
    let mon = LogMonitor::capture_all();
    logmonitor::info!("user 42 logged in");
    logmonitor::info!("user 7 logged out");
    logmonitor::error!("user 42 failed");
    mon
}

#[test]
fn pattern_must_cover_the_whole_text() {
    let mon = seeded();
    let partial = Pattern::new("user 42").unwrap();
    assert!(mon.statements_matching(Severity::Info, &partial).is_empty());

    let whole = Pattern::new(r"user \d+ logged (in|out)").unwrap();
    assert_eq!(
        mon.statements_matching(Severity::Info, &whole),
        vec!["user 42 logged in", "user 7 logged out"]
    );
    // severity is still exact
    assert!(mon.statements_matching(Severity::Warn, &whole).is_empty());
}

#[test]
fn raw_pattern_text_is_compiled() {
    let mon = seeded();
    assert_eq!(
        mon.statements_matching_str(Severity::Error, r"user \d+ failed").unwrap(),
        vec!["user 42 failed"]
    );
    assert!(mon
        .statements_matching_str(Severity::Error, "failed")
        .unwrap()
        .is_empty());
}

#[test]
fn verbose_raw_pattern_with_trailing_comment() {
    let mon = seeded();
    let src = "(?x) user \\s \\d+ \\s failed # numeric id";
    assert_eq!(
        mon.statements_matching_str(Severity::Error, src).unwrap(),
        vec!["user 42 failed"]
    );
    assert!(mon
        .statements_matching_str(Severity::Info, "(?x) user \\s \\d+ # id only")
        .unwrap()
        .is_empty());
}

#[test]
fn invalid_raw_pattern_fails() {
    let mon = seeded();
    let err = mon.statements_matching_str(Severity::Info, "user (").unwrap_err();
    assert!(matches!(err, MonitorError::PatternSyntax(_)), "{err}");
    assert!(err.to_string().starts_with("invalid pattern"));
}

#[test]
fn absent_arguments_give_empty_results() {
    let mon = seeded();
    let any = Pattern::new("(?s).*").unwrap();
    assert!(mon.statements_matching(None, &any).is_empty());
    assert!(mon.statements_matching(Severity::Info, None).is_empty());
    assert!(mon
        .statements_matching_str(Severity::Info, None)
        .unwrap()
        .is_empty());
    assert_eq!(mon.statements_matching(Severity::Info, &any).len(), 2);
}

#[test]
fn is_statement_takes_text_or_pattern() {
    let mon = seeded();
    let p = Pattern::new(r"user \d+ failed").unwrap();

    assert!(mon.is_statement(Severity::Info, "user 7 logged out"));
    assert!(!mon.is_statement(Severity::Info, "user 7"));
    assert!(mon.is_statement(Severity::Error, &p));
    assert!(!mon.is_statement(Severity::Info, &p));

    assert!(mon.is_info_statement("user 42 logged in"));
    assert!(mon.is_error_statement(&p));
    assert!(!mon.is_debug_statement(&p));
    assert!(!mon.is_warn_statement("user 42 failed"));
    assert!(!mon.is_fatal_statement("user 42 failed"));

    let owned = String::from("user 42 failed");
    assert!(mon.is_error_statement(&owned));
}

#[test]
fn level_agnostic_lookup() {
    let mon = seeded();
    assert!(mon.is_any_statement("user 42 failed"));
    assert!(mon.is_any_statement(&Pattern::new(r"user 7 .*").unwrap()));
    assert!(!mon.is_any_statement("user 42"));
    assert!(!mon.is_any_statement(&Pattern::new("nobody.*").unwrap()));
}
