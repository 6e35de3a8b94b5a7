// tests/pipeline_integration_test.rs

use std::fs;
use std::path::{Path, PathBuf};

use attitude_csv_render::config::AnalysisConfig;
use attitude_csv_render::error::AnalysisError;
use attitude_csv_render::orchestrator::{analyze_source, RenderSink};
use attitude_csv_render::sinks::{EpisodeCsvSink, OutputLocation};

fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn no_sinks() -> Vec<Box<dyn RenderSink>> {
    Vec::new()
}

#[test]
fn test_episodes_from_time_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(
        dir.path(),
        "late_training_attitude_0.csv",
        "time,pitch,roll,pitch_deg,roll_deg\n\
         0.00,0.0,0.0,0.0,0.0\n\
         0.02,0.0,0.0,0.0,0.0\n\
         0.04,0.0,0.0,0.0,0.0\n\
         1.00,0.0,0.0,0.0,0.0\n\
         1.02,0.0,0.0,0.0,0.0\n",
    );

    let analysis = analyze_source(&path, &AnalysisConfig::default(), &mut no_sinks()).unwrap();
    assert_eq!(analysis.boundaries.indices, vec![3]);
    assert_eq!(analysis.episode_count(), 2);
    assert_eq!(analysis.boundary_times(), vec![1.00]);
    assert!(!analysis.degrees_derived);
}

#[test]
fn test_uniform_sampling_is_one_episode() {
    let dir = tempfile::tempdir().unwrap();
    let mut content = String::from("time,pitch,roll\n");
    for i in 0..5 {
        content.push_str(&format!("{:.2},0.1,-0.1\n", i as f64 * 0.05));
    }
    let path = write_source(dir.path(), "uniform.csv", &content);

    let analysis = analyze_source(&path, &AnalysisConfig::default(), &mut no_sinks()).unwrap();
    assert!(analysis.boundaries.indices.is_empty());
    assert_eq!(analysis.episode_count(), 1);
    assert!(analysis.degrees_derived);
    assert!((analysis.stats_deg.pitch.mean - 0.1_f64.to_degrees()).abs() < 1e-9);
}

#[test]
fn test_reset_rows_are_dropped_before_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(
        dir.path(),
        "with_resets.csv",
        "time,pitch,roll,pitch_deg,roll_deg\n\
         0.00,0.1,0.2,10.0,20.0\n\
         nan,NaN,nan,nan,nan\n\
         0.50,-0.1,0.2,-10.0,20.0\n",
    );

    let analysis = analyze_source(&path, &AnalysisConfig::default(), &mut no_sinks()).unwrap();
    assert_eq!(analysis.raw_row_count, 3);
    assert_eq!(analysis.reset_count, 1);
    assert_eq!(analysis.record_count(), 2);
    assert_eq!(analysis.episode_count(), 2);
    assert!(analysis.stats_deg.pitch.mean.abs() < 1e-9);
    assert!((analysis.stats_deg.pitch.std - 10.0).abs() < 1e-9);
    assert!((analysis.stats_deg.pitch.max_abs - 10.0).abs() < 1e-9);
    assert!(analysis.stats_deg.roll.std.abs() < 1e-9);
    assert!(analysis.agreement.is_consistent());
}

#[test]
fn test_configured_threshold_changes_segmentation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(
        dir.path(),
        "slow.csv",
        "time,pitch,roll\n0.0,0.0,0.0\n0.2,0.0,0.0\n0.4,0.0,0.0\n",
    );

    let default_run = analyze_source(&path, &AnalysisConfig::default(), &mut no_sinks()).unwrap();
    assert_eq!(default_run.episode_count(), 3);

    let config = AnalysisConfig::from_toml_str("[segmentation]\ngap_threshold_s = 0.5\n").unwrap();
    let relaxed = analyze_source(&path, &config, &mut no_sinks()).unwrap();
    assert_eq!(relaxed.episode_count(), 1);
}

#[test]
fn test_only_reset_rows_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "empty.csv", "time,pitch,roll\n0.0,nan,0.0\n0.1,nan,0.0\n");

    let result = analyze_source(&path, &AnalysisConfig::default(), &mut no_sinks());
    assert!(matches!(result, Err(AnalysisError::EmptySequence)));
}

#[test]
fn test_missing_pitch_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "no_pitch.csv", "time,roll\n0.0,0.0\n");

    let result = analyze_source(&path, &AnalysisConfig::default(), &mut no_sinks());
    assert!(matches!(result, Err(AnalysisError::MissingColumn(ref c)) if c == "pitch"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let result = analyze_source(&path, &AnalysisConfig::default(), &mut no_sinks());
    assert!(matches!(result, Err(AnalysisError::Io { .. })));
}

#[test]
fn test_episode_export_beside_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(
        dir.path(),
        "run_3.csv",
        "time,pitch,roll\n0.00,0.0,0.0\n0.02,0.0,0.0\n2.00,0.0,0.0\n",
    );

    let mut sinks: Vec<Box<dyn RenderSink>> =
        vec![Box::new(EpisodeCsvSink { output: OutputLocation::BesideSource })];
    analyze_source(&path, &AnalysisConfig::default(), &mut sinks).unwrap();

    let export_path = dir.path().join("analysis").join("episodes_run_3.csv");
    let exported = fs::read_to_string(export_path).unwrap();
    let lines: Vec<&str> = exported.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("0,0,2,2,"));
    assert!(lines[2].starts_with("1,2,3,1,"));
}
