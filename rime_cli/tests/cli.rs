use std::{fs, process::Command};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rime-pro"));
    cmd.env_remove("RIME_PRO_AUX_CODE").env("RUST_LOG", "warn");
    cmd
}

const DICT: &str = "---\nname: base\nversion: \"1\"\n...\n不能同意更多\tbu neng tong yi geng duo\n中国\tzhong guo\n";
const AUX: &str = "不\t;a;a;kx;\n能\t;a;a;bq;\n同\t;a;a;u;\n意\t;a;a;pw;\n更\t;a;a;a;\n多\t;a;a;e;\n";
const PHRASES: &str = "不能同意更多\tbù néng tóng yì gèng duō\n";

#[test]
fn converts_with_all_resources() {
    let dir = tempfile::tempdir().unwrap();
    let p = |name: &str| dir.path().join(name);
    fs::write(p("base.dict.yaml"), DICT).unwrap();
    fs::write(p("aux.yaml"), AUX).unwrap();
    fs::write(p("phrases.dict.yaml"), PHRASES).unwrap();

    let status = bin()
        .arg(p("base.dict.yaml"))
        .arg(p("out.dict.yaml"))
        .arg("--aux-code")
        .arg(p("aux.yaml"))
        .arg("--phrase-dict")
        .arg(p("phrases.dict.yaml"))
        .arg("--rewrite-header")
        .args(["--version-date", "2025.03.04"])
        .status()
        .unwrap();
    assert!(status.success());

    let out = fs::read_to_string(p("out.dict.yaml")).unwrap();
    assert_eq!(
        out,
        "---\nname: base.pro\nversion: \"2025.03.04\"\n...\n\
         不能同意更多\tbù;kx néng;bq tóng;u yì;pw gèng;a duō;e\n\
         中国\tzhōng guó\n"
    );
}

#[test]
fn missing_aux_source_exits_2_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("base.dict.yaml");
    let output = dir.path().join("out.dict.yaml");
    fs::write(&input, DICT).unwrap();

    let result = bin()
        .arg(&input)
        .arg(&output)
        .arg("--aux-code")
        .arg(dir.path().join("nope.yaml"))
        .output()
        .unwrap();
    assert_eq!(result.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&result.stderr).contains("辅助码表"));
    assert!(!output.exists());
}

#[test]
fn malformed_input_exits_1_and_names_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.dict.yaml");
    let output = dir.path().join("out.dict.yaml");
    fs::write(&input, "---\n...\n中国\tzhong guo\n坏行\n").unwrap();

    let result = bin().arg(&input).arg(&output).arg("--no-aux").output().unwrap();
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("第 4 行"));
    assert!(!output.exists());
}

#[test]
fn batch_mode_writes_pro_names() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("base.dict.yaml");
    fs::write(&input, DICT).unwrap();
    let out_dir = dir.path().join("pro");

    let status = bin()
        .arg("--no-aux")
        .arg("--out-dir")
        .arg(&out_dir)
        .arg(&input)
        .status()
        .unwrap();
    assert!(status.success());
    let out = fs::read_to_string(out_dir.join("base.pro.dict.yaml")).unwrap();
    assert!(out.starts_with("---\nname: base\n"));
    assert!(out.ends_with("中国\tzhōng guó\n"));
}
