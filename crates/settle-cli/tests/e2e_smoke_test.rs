use std::{fs, path::PathBuf};

use tempfile::tempdir;

use settle_cli::{Args, run};

/// Demo exports live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

fn args(input: &PathBuf, output: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        positions: None,
        max_ticks: None,
        render_every: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demos = collect_json_files(demos_path());
    assert!(!demos.is_empty(), "No demo exports found in demos/");

    let mut failed = Vec::new();

    for demo_path in &demos {
        let output_path = temp_dir.path().join(format!(
            "{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if let Err(e) = run(&args(demo_path, output_path.clone())) {
            failed.push((demo_path.clone(), e));
            continue;
        }

        let svg = fs::read_to_string(&output_path).expect("Output SVG was written");
        assert!(svg.contains("<svg"), "{} produced no SVG", demo_path.display());
        assert!(svg.contains("<circle"), "{} rendered no nodes", demo_path.display());
    }

    if !failed.is_empty() {
        eprintln!("\nDemo exports that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo export(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_json_files(demos_path().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error exports found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args(demo_path, output_path.clone())).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(!output_path.exists());
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError exports that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error export(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_positions_and_overrides() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("activity.json");
    let positions_path = temp_dir.path().join("positions.json");
    let config_path = temp_dir.path().join("config.toml");

    fs::write(
        &config_path,
        "[canvas]\nwidth = 800.0\nheight = 600.0\n\n[simulation]\nepsilon = 0.0\n",
    )
    .unwrap();

    let mut args = args(&input, temp_dir.path().join("activity.svg"));
    args.config = Some(config_path.to_string_lossy().to_string());
    args.positions = Some(positions_path.to_string_lossy().to_string());
    args.max_ticks = Some(30);
    args.render_every = Some(10);

    run(&args).expect("Layout with overrides succeeds");

    let svg = fs::read_to_string(temp_dir.path().join("activity.svg")).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 800 600""#));

    // Frames 10 and 20, plus the final frame 30
    let frames: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&positions_path).unwrap()).unwrap();
    let ticks: Vec<u64> = frames
        .as_array()
        .unwrap()
        .iter()
        .map(|frame| frame["tick"].as_u64().unwrap())
        .collect();
    assert_eq!(ticks, vec![10, 20, 30]);

    for frame in frames.as_array().unwrap() {
        for position in frame["positions"].as_object().unwrap().values() {
            let x = position["x"].as_f64().unwrap();
            let y = position["y"].as_f64().unwrap();
            assert!((40.0..=760.0).contains(&x));
            assert!((40.0..=560.0).contains(&y));
        }
    }
}
