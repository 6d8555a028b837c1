use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::path::Path;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

// Compress a file and expand it again in a temporary directory,
// the result must match the original byte for byte.
fn round_trip_test(base_name: &str,xext: &str,order: &str) -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = Path::new("tests").join([base_name,".",xext].concat());
    let cmp_path = temp_dir.path().join([base_name,".hf"].concat());
    let out_path = temp_dir.path().join([base_name,".",xext].concat());
    Command::cargo_bin("huffpack")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&cmp_path)
        .arg("--order").arg(order)
        .assert()
        .success()
        .stderr(predicate::str::starts_with("compressed"));
    Command::cargo_bin("huffpack")?
        .arg("expand")
        .arg("-i").arg(&cmp_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();
    match (std::fs::read(in_path),std::fs::read(cmp_path),std::fs::read(out_path)) {
        (Ok(v1),Ok(c),Ok(v2)) => {
            assert!(c.len() < v1.len());
            assert_eq!(v1,v2);
        },
        _ => panic!("unable to compare output with reference")
    }
    Ok(())
}

#[test]
fn round_trip_msb0() -> STDRESULT {
    round_trip_test("sonnet_18","txt","msb0")
}

#[test]
fn round_trip_lsb0() -> STDRESULT {
    round_trip_test("sonnet_18","txt","lsb0")
}

#[test]
fn known_vector() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("aaabbc.txt");
    let out_path = temp_dir.path().join("aaabbc.hf");
    std::fs::write(&in_path,"aaabbc")?;
    Command::cargo_bin("huffpack")?
        .arg("codes")
        .arg("-i").arg(&in_path)
        .assert()
        .success()
        .stdout("61 3 0\n62 2 11\n63 1 10\n");
    Command::cargo_bin("huffpack")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();
    let huff_str = "48 46 00 03 00 61 01 00 62 02 C0 63 02 80 09 00 00 00 00 00 00 00 1F 00";
    assert_eq!(std::fs::read(out_path)?,hex::decode(huff_str.replace(" ",""))?);
    Ok(())
}

#[test]
fn empty_file_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("empty.txt");
    std::fs::write(&in_path,"")?;
    Command::cargo_bin("huffpack")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(temp_dir.path().join("empty.hf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("EmptyInput"));
    Ok(())
}

#[test]
fn foreign_file_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    Command::cargo_bin("huffpack")?
        .arg("expand")
        .arg("-i").arg(Path::new("tests").join("sonnet_18.txt"))
        .arg("-o").arg(temp_dir.path().join("sonnet_18.out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("FileFormatMismatch"));
    Ok(())
}

#[test]
fn failure_keeps_existing_output() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("empty.txt");
    let out_path = temp_dir.path().join("keep.hf");
    std::fs::write(&in_path,"")?;
    std::fs::write(&out_path,"keep me")?;
    assert_cmd::Command::cargo_bin("huffpack")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&out_path)
        .write_stdin("y\n")
        .assert()
        .failure();
    assert_eq!(std::fs::read(&out_path)?,b"keep me".to_vec());
    assert_cmd::Command::cargo_bin("huffpack")?
        .arg("expand")
        .arg("-i").arg(Path::new("tests").join("sonnet_18.txt"))
        .arg("-o").arg(&out_path)
        .write_stdin("y\n")
        .assert()
        .failure();
    assert_eq!(std::fs::read(&out_path)?,b"keep me".to_vec());
    Ok(())
}
