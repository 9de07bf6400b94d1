use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_console-race")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "console-race.exe"
            } else {
                "console-race"
            });
            p
        })
}

fn fixture_path() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("three_gens.json")
        .to_string_lossy()
        .to_string()
}

#[test]
fn cli_frames_prints_keyframes() {
    let data = fixture_path();
    let output = std::process::Command::new(exe())
        .args(["frames", "--data", data.as_str(), "--from", "1", "--to", "2"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let keyframes: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(keyframes.len(), 31);
    assert_eq!(keyframes[30]["entries"][1]["company"], "Sega");
}

#[test]
fn cli_play_streams_json_lines() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let config_path = dir.join("race.json");
    std::fs::write(
        &config_path,
        r#"{"frames_per_transition": 2, "min_generation": 1, "max_generation": 3}"#,
    )
    .unwrap();

    let data = fixture_path();
    let config_arg = config_path.to_string_lossy().to_string();
    let output = std::process::Command::new(exe())
        .args(["play", "--data", data.as_str(), "--config", config_arg.as_str()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    // three transitions: reveal of 1, then 1 -> 2 and 2 -> 3
    let labels: Vec<u64> = events
        .iter()
        .filter(|e| e["event"] == "generation_label")
        .map(|e| e["generation"].as_u64().unwrap())
        .collect();
    assert_eq!(labels, vec![1, 2, 3]);
    assert_eq!(events.len(), 3 * 7);
}

#[test]
fn cli_rejects_unknown_generation() {
    let data = fixture_path();
    let status = std::process::Command::new(exe())
        .args(["frames", "--data", data.as_str(), "--from", "1", "--to", "7"])
        .output()
        .unwrap()
        .status;
    assert!(!status.success());
}
