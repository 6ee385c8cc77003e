use super::LineMode;

#[test]
fn line_mode_conversions_round_trip() {
    assert_eq!(LineMode::from(true), LineMode::WithNewline);
    assert_eq!(LineMode::from(false), LineMode::WithoutNewline);

    let append: bool = LineMode::WithNewline.into();
    assert!(append);

    let append: bool = LineMode::WithoutNewline.into();
    assert!(!append);
}

#[test]
fn default_mode_appends_newlines() {
    assert_eq!(LineMode::default(), LineMode::WithNewline);
}

#[test]
fn terminator_skips_lines_that_already_end_with_newline() {
    assert_eq!(LineMode::WithNewline.terminator_for("ready"), "\n");
    assert_eq!(LineMode::WithNewline.terminator_for("ready\n"), "");
    assert_eq!(LineMode::WithNewline.terminator_for(""), "\n");
}

#[test]
fn terminator_is_empty_without_newline_mode() {
    assert_eq!(LineMode::WithoutNewline.terminator_for("ready"), "");
    assert_eq!(LineMode::WithoutNewline.terminator_for("ready\n"), "");
}
