use super::{scratch_dir, CUBE_OBJ};
use std::process::Command;

fn meshvox() -> Command {
    Command::new(env!("CARGO_BIN_EXE_meshvox"))
}

#[test]
fn voxelize_cube_file() {
    let dir = scratch_dir("cli");
    let input = dir.join("cube.obj");
    let output = dir.join("out.vox");
    std::fs::write(&input, CUBE_OBJ).unwrap();

    let status = meshvox()
        .arg("-dim")
        .arg("8")
        .arg("-in")
        .arg(&input)
        .arg("-out")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "8");
    assert_eq!(lines[1].parse::<usize>().unwrap(), lines.len() - 2);
    assert_eq!(lines.len() - 2, 8 * 8 * 8 - 6 * 6 * 6);
}

#[test]
fn usage_errors() {
    let out = meshvox().args(["-dim", "0", "-in", "a.obj", "-out", "b"]).output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));

    let out = meshvox().args(["-dim", "8"]).output().unwrap();
    assert_eq!(out.status.code(), Some(2));

    let out = meshvox().arg("--help").output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("-dim"));
}

#[test]
fn pipeline_errors() {
    let dir = scratch_dir("cli-errors");
    let out = meshvox()
        .arg("-dim")
        .arg("8")
        .arg("-in")
        .arg(dir.join("missing.obj"))
        .arg("-out")
        .arg(dir.join("out.vox"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[cfg(unix)]
#[test]
fn non_unicode_flag_is_a_usage_error() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let out = meshvox()
        .arg(OsString::from_vec(vec![b'-', b'd', 0xff]))
        .arg("8")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}
