use scholia::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_hyphenated_line_break_when_sanitizing_then_word_is_rejoined() {
    assert_eq!(sanitize_extracted_text("osmo-\nsis"), "osmosis");
}

#[test]
fn given_blank_runs_and_spaces_when_sanitizing_then_they_collapse() {
    let raw = "  Cell   membrane \n\n\n\nWater\tmoves ";

    assert_eq!(sanitize_extracted_text(raw), "Cell membrane\n\nWater moves");
}

#[test]
fn given_ligatures_and_form_feeds_when_sanitizing_then_text_is_normalized() {
    assert_eq!(sanitize_extracted_text("\u{c}ef\u{FB01}cient"), "efficient");
}
