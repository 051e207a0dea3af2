use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MARKER: &str = r#"<div class="post-list">"#;

fn docpost() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_docpost"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_index(dir: &Path) -> String {
    let index = format!(
        "<html>\n<body>\n  {MARKER}\n    <a href=\"older.html\" class=\"post-item\"></a>\n  </div>\n</body>\n</html>\n"
    );
    fs::write(dir.join("index.html"), &index).unwrap();
    index
}

fn write_source(dir: &Path) -> std::path::PathBuf {
    let source = dir.join("draft.md");
    fs::write(
        &source,
        "# 大模型推理：KV Cache\n\n摘要：缓存键值对以加速解码。\n\n## 背景\n\n正文。\n\n### 细节\n\n更多内容。\n",
    )
    .unwrap();
    source
}

#[test]
fn publishes_post_and_updates_index() {
    let temp = TempDir::new().unwrap();
    let source = write_source(temp.path());
    write_index(temp.path());

    docpost()
        .arg(&source)
        .args(["--renderer", "builtin", "--tags", "llm,data", "--date", "2025-02-01"])
        .arg("--out")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Published"))
        .stdout(predicate::str::contains("git commit -m 'post: 大模型推理：KV Cache'"));

    let post_path = temp.path().join("大模型推理-kv-cache.html");
    let page = fs::read_to_string(&post_path).unwrap();
    assert!(page.contains("<h1 class=\"post-title\">大模型推理：KV Cache</h1>"));
    assert!(page.contains("<div class=\"post-desc\">缓存键值对以加速解码。</div>"));
    assert!(page.contains("<a href=\"#背景\">背景</a>"));
    assert!(page.contains("<h3 id=\"细节\">细节</h3>"));
    assert!(page.contains("2025-02-01"));
    assert_eq!(page.matches("<span class=\"tag hl\">").count(), 2);

    let index = fs::read_to_string(temp.path().join("index.html")).unwrap();
    assert!(index.contains("<div class=\"post-date\">02 · 01</div>"));
    assert!(index.contains("data-tags=\"llm data\""));
    assert!(
        index.find("大模型推理-kv-cache.html").unwrap() < index.find("older.html").unwrap()
    );
}

#[test]
fn slug_flag_sets_filename() {
    let temp = TempDir::new().unwrap();
    let source = write_source(temp.path());

    docpost()
        .arg(&source)
        .args(["--renderer", "builtin", "--slug", "kv-cache", "--no-index"])
        .arg("--out")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("git add kv-cache.html\n"));

    assert!(temp.path().join("kv-cache.html").exists());
}

#[test]
fn missing_source_fails() {
    let temp = TempDir::new().unwrap();

    docpost()
        .arg(temp.path().join("nope.docx"))
        .arg("--out")
        .arg(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("source document not found"));

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn missing_marker_leaves_index_untouched() {
    let temp = TempDir::new().unwrap();
    let source = write_source(temp.path());
    let original = "<html><body><ul class=\"posts\"></ul></body></html>";
    fs::write(temp.path().join("index.html"), original).unwrap();

    docpost()
        .arg(&source)
        .args(["--renderer", "builtin"])
        .arg("--out")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("marker"));

    assert_eq!(fs::read_to_string(temp.path().join("index.html")).unwrap(), original);
    assert!(temp.path().join("大模型推理-kv-cache.html").exists());
}

#[test]
fn missing_index_is_a_warning() {
    let temp = TempDir::new().unwrap();
    let source = write_source(temp.path());

    docpost()
        .arg(&source)
        .args(["--renderer", "builtin"])
        .arg("--out")
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("index"));

    assert!(!temp.path().join("index.html").exists());
}

#[test]
fn config_file_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let source = write_source(temp.path());
    fs::write(
        temp.path().join("docpost.yaml"),
        "site:\n  name: Test Lab\nconverter:\n  renderer: builtin\nindex:\n  file: posts.html\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("posts.html"),
        format!("{MARKER}\n</div>"),
    )
    .unwrap();

    docpost()
        .arg(&source)
        .arg("--out")
        .arg(temp.path())
        .assert()
        .success();

    let page = fs::read_to_string(temp.path().join("大模型推理-kv-cache.html")).unwrap();
    assert!(page.contains("<title>大模型推理：KV Cache · Test Lab</title>"));

    let listing = fs::read_to_string(temp.path().join("posts.html")).unwrap();
    assert!(listing.contains("大模型推理-kv-cache.html"));
}

#[test]
fn unavailable_converter_fails() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("article.docx");
    fs::write(&source, b"binary").unwrap();

    docpost()
        .arg(&source)
        .arg("--out")
        .arg(temp.path())
        .env("DOCPOST_CONVERTER__PROGRAM", "docpost-no-such-converter-xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("docpost-no-such-converter-xyz"));
}
