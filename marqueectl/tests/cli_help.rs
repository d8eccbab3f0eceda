use assert_cmd::cargo::cargo_bin_cmd;

fn help_text(args: &[&str]) -> String {
    let mut cmd = cargo_bin_cmd!("marqueectl");
    let output = cmd
        .args(args)
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&output).into_owned()
}

#[test]
fn top_level_help_lists_commands() {
    let text = help_text(&[]);
    for command in ["trending", "discover", "search", "login", "favorite"] {
        assert!(text.contains(command), "help missing '{command}'");
    }
    assert!(text.contains("--config"), "help missing --config");
}

#[test]
fn favorite_help_documents_session_and_remove() {
    let text = help_text(&["favorite"]);
    assert!(text.contains("--session"), "favorite help missing --session");
    assert!(text.contains("--remove"), "favorite help missing --remove");
}

#[test]
fn discover_help_mentions_page_limit() {
    let text = help_text(&["discover"]);
    assert!(text.contains("--pages"), "discover help missing --pages");
    assert!(text.contains("movie"), "discover help missing kinds");
}

#[test]
fn unknown_media_kind_is_rejected() {
    let mut cmd = cargo_bin_cmd!("marqueectl");
    cmd.args(["details", "person", "1"]).assert().failure();
}
