use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn chatstats_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("chatstats");
    path
}

const EXPORT: &str = r#"{
  "name": "Weekend Plans",
  "type": "private_group",
  "id": 4242,
  "messages": [
    {"id": 1, "type": "service", "date": "2023-05-01T09:00:00", "actor": "Alice", "text": ""},
    {"id": 2, "type": "message", "date": "2023-05-01T09:01:00", "from": "Alice",
     "text": "Are you coming to the hike?"},
    {"id": 3, "type": "message", "date": "2023-05-01T09:02:00", "from": "Bob",
     "reply_to_message_id": 2, "text": "Yes"},
    {"id": 4, "type": "message", "date": "2023-05-01T09:03:00", "from": "Carol",
     "reply_to_message_id": 2, "text": "Sure"},
    {"id": 5, "type": "message", "date": "2023-05-01T09:04:00", "from": "Alice",
     "text": "The hike starts at the lake"},
    {"id": 6, "type": "message", "date": "2023-05-01T09:05:00", "from": "Bob",
     "reply_to_message_id": 5, "text": "Great, the lake is lovely"},
    {"id": 7, "type": "message", "date": "2023-05-01T09:06:00", "from": "Carol",
     "reply_to_message_id": 5, "text": ["bring ", {"type": "bold", "text": "snacks"}]},
    {"id": 8, "type": "message", "date": "2023-05-01T09:07:00", "from": "Bob",
     "reply_to_message_id": 5, "text": "hike hike hike"}
  ]
}"#;

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("result.json"), EXPORT).unwrap();
    fs::write(data_dir.join("stop_words.txt"), "the\nis\nat\nto\nyou\nare\n").unwrap();
    fs::write(data_dir.join("font.ttf"), b"not-really-a-font").unwrap();

    let config_content = format!(
        r#"[input]
chat_json = "{root}/data/result.json"

[data]
dir = "{root}/data"

[output]
dir = "{root}/out"

[ranking]
top_n = 10

[logging]
level = "warn"
"#,
        root = root.display()
    );

    let config_path = config_dir.join("chatstats.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_chatstats(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = chatstats_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run chatstats binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_wordcloud_writes_svg() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_chatstats(&config_path, &["wordcloud"]);
    assert!(success, "wordcloud failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("wordcloud.svg"));

    let svg = fs::read_to_string(tmp.path().join("out/wordcloud.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">hike</text>"));
    assert!(svg.contains(">lake</text>"));
    // stop word
    assert!(!svg.contains(">the</text>"));
    // composite message excluded from the corpus
    assert!(!svg.contains(">snacks</text>"));
}

#[test]
fn test_wordcloud_output_dir_override() {
    let (tmp, config_path) = setup_test_env();
    let target = tmp.path().join("elsewhere");

    let (stdout, stderr, success) = run_chatstats(
        &config_path,
        &["wordcloud", "--output-dir", target.to_str().unwrap()],
    );
    assert!(success, "wordcloud failed: stdout={}, stderr={}", stdout, stderr);
    assert!(target.join("wordcloud.svg").exists());
    assert!(!tmp.path().join("out/wordcloud.svg").exists());
}

#[test]
fn test_top_users_default_filter() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_chatstats(&config_path, &["top-users", "--json"]);
    assert!(success, "top-users failed: stdout={}, stderr={}", stdout, stderr);

    let ranked: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let ranked = ranked.as_array().unwrap();
    // Replies to the question (id 2) are skipped; replies to id 5 count.
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["user"], "Bob");
    assert_eq!(ranked[0]["count"], 2);
    assert_eq!(ranked[1]["user"], "Carol");
    assert_eq!(ranked[1]["count"], 1);
}

#[test]
fn test_top_users_question_filter_and_limit() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_chatstats(
        &config_path,
        &[
            "top-users",
            "--reply-filter",
            "questions",
            "--top-n",
            "1",
            "--json",
        ],
    );
    assert!(success, "top-users failed: stdout={}, stderr={}", stdout, stderr);

    let ranked: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let ranked = ranked.as_array().unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0]["user"], "Bob");
}

#[test]
fn test_top_users_table() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_chatstats(&config_path, &["top-users"]);
    assert!(success);
    assert!(stdout.contains("RANK"));
    assert!(stdout.contains("Bob"));
}

#[test]
fn test_top_users_rejects_unknown_filter() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success) = run_chatstats(&config_path, &["top-users", "--reply-filter", "all"]);
    assert!(!success);
}

#[test]
fn test_corpus_is_stable_across_runs() {
    let (_tmp, config_path) = setup_test_env();

    let (first, _, ok1) = run_chatstats(&config_path, &["corpus"]);
    let (second, _, ok2) = run_chatstats(&config_path, &["corpus"]);
    assert!(ok1 && ok2);
    assert_eq!(first.as_bytes(), second.as_bytes());
    assert!(first.contains("hike"));
    assert!(!first.split_whitespace().any(|t| t == "the"));
}

#[test]
fn test_corpus_to_file() {
    let (tmp, config_path) = setup_test_env();
    let out = tmp.path().join("corpus/blob.txt");

    let (_, stderr, success) =
        run_chatstats(&config_path, &["corpus", "--output", out.to_str().unwrap()]);
    assert!(success, "corpus failed: {}", stderr);
    let blob = fs::read_to_string(&out).unwrap();
    assert!(blob.contains("lake"));
}

#[test]
fn test_stats_json() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_chatstats(&config_path, &["stats", "--json"]);
    assert!(success, "stats failed: stdout={}, stderr={}", stdout, stderr);

    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["name"], "Weekend Plans");
    assert_eq!(summary["messages"], 8);
    assert_eq!(summary["service_messages"], 1);
    assert_eq!(summary["composite_text"], 1);
    assert_eq!(summary["senders"], 3);
    assert_eq!(summary["replies"], 5);
    assert_eq!(summary["questions"], 1);
    assert_eq!(summary["first_message"], "2023-05-01 09:00");
    assert_eq!(summary["last_message"], "2023-05-01 09:07");
}

#[test]
fn test_chat_flag_overrides_config() {
    let (tmp, config_path) = setup_test_env();
    let other = tmp.path().join("other.json");
    fs::write(
        &other,
        r#"{"messages": [{"id": 1, "from": "Zoe", "text": "hello"}]}"#,
    )
    .unwrap();

    let (stdout, _, success) = run_chatstats(
        &config_path,
        &["--chat", other.to_str().unwrap(), "stats", "--json"],
    );
    assert!(success);
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["messages"], 1);
}

#[test]
fn test_missing_export_fails() {
    let (tmp, config_path) = setup_test_env();
    let missing = tmp.path().join("missing.json");

    let (_, stderr, success) = run_chatstats(
        &config_path,
        &["--chat", missing.to_str().unwrap(), "stats"],
    );
    assert!(!success);
    assert!(stderr.contains("missing.json"));
}

#[test]
fn test_malformed_export_fails() {
    let (tmp, config_path) = setup_test_env();
    let broken = tmp.path().join("broken.json");
    fs::write(&broken, "{\"messages\": [").unwrap();

    let (_, stderr, success) =
        run_chatstats(&config_path, &["--chat", broken.to_str().unwrap(), "stats"]);
    assert!(!success);
    assert!(stderr.contains("Failed to parse chat export"));
}

#[test]
fn test_builtin_defaults_without_font() {
    let tmp = TempDir::new().unwrap();
    let data_dir = tmp.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("result.json"), EXPORT).unwrap();
    fs::write(
        data_dir.join("stop_words.txt"),
        fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("data/stop_words.txt"))
            .unwrap(),
    )
    .unwrap();

    // No config file and no font: defaults apply, rendering uses sans-serif.
    for args in [&["top-users", "--json"][..], &["stats"][..], &["wordcloud"][..]] {
        let output = Command::new(chatstats_binary())
            .current_dir(tmp.path())
            .args(args)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "{:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let svg = fs::read_to_string(data_dir.join("wordcloud.svg")).unwrap();
    assert!(svg.contains(">hike</text>"));
    assert!(!svg.contains("@font-face"));
}

#[test]
fn test_invalid_config_fails() {
    let (tmp, _) = setup_test_env();
    let bad = tmp.path().join("config/bad.toml");
    fs::write(&bad, "[ranking]\ntop_n = 0\n").unwrap();

    let (_, stderr, success) = run_chatstats(&bad, &["stats"]);
    assert!(!success);
    assert!(stderr.contains("top_n"));
}
