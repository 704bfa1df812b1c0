// tests/cli.rs
//
// End-to-end checks of the `heat-sim` binary: argument validation, the
// stdout report and the run directory.

use std::path::PathBuf;
use std::process::{Command, Output};

fn heat_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_heat-sim"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch heat-sim")
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).into_owned()
}

fn stderr(o: &Output) -> String {
    String::from_utf8_lossy(&o.stderr).into_owned()
}

#[test]
fn zero_n_is_rejected_before_any_work() {
    let o = heat_sim(&["0", "5"]);
    assert!(!o.status.success());
    assert!(stderr(&o).contains("n must be positive"), "stderr: {}", stderr(&o));
    assert!(!stdout(&o).contains("Results"), "no work should run");
}

#[test]
fn negative_nsteps_is_rejected() {
    let o = heat_sim(&["8", "-2"]);
    assert!(!o.status.success());
    assert!(stderr(&o).contains("nsteps must be positive"), "stderr: {}", stderr(&o));
}

#[test]
fn small_serial_run_prints_full_report() {
    let o = heat_sim(&["12", "3", "--serial"]);
    assert!(o.status.success(), "stderr: {}", stderr(&o));
    let s = stdout(&o);
    for needle in [
        "MMS heat equation",
        " Grid size: 12 x 12",
        " Steps: 3",
        " Device: CPU (serial)",
        " r value: ",
        "(L2norm): ",
        "Solve time (s): ",
        "Total time (s): ",
        "Bandwidth (GB/s): ",
    ] {
        assert!(s.contains(needle), "missing {needle:?} in:\n{s}");
    }
    assert!(!s.contains("Warning: unstable"));
}

#[test]
fn list_devices_shows_serial_and_pool() {
    let o = heat_sim(&["--list-devices"]);
    assert!(o.status.success());
    let s = stdout(&o);
    assert!(s.contains("CPU (serial)"), "{s}");
    assert!(s.contains("CPU thread pool"), "{s}");
}

#[test]
fn plot_without_out_dir_fails() {
    let o = heat_sim(&["8", "2", "--plot"]);
    assert!(!o.status.success());
    assert!(stderr(&o).contains("output directory"), "stderr: {}", stderr(&o));
}

#[test]
fn out_dir_receives_config_and_results() {
    let root: PathBuf = std::env::temp_dir().join(format!("heat_sim_cli_{}", std::process::id()));
    let root_str = root.to_string_lossy().into_owned();

    let o = heat_sim(&["10", "2", "--threads", "2", "--out", &root_str, "--run", "cli run/1", "--plot"]);
    assert!(o.status.success(), "stderr: {}", stderr(&o));

    // Run id is sanitised: ' ' and '/' become '_'
    let dir = root.join("cli_run_1");
    for f in ["config.json", "results.json", "field.png", "error.png"] {
        assert!(dir.join(f).is_file(), "missing {}", dir.join(f).display());
    }

    let results: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("results.json")).unwrap()).unwrap();
    assert_eq!(results["n"], 10);
    assert_eq!(results["nsteps"], 2);

    std::fs::remove_dir_all(&root).ok();
}
