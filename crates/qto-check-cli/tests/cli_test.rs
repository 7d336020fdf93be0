// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the qto-check binary.
// cargo_bin is deprecated in favor of the cargo_bin! macro; both work.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CATALOG: &str = r#"{
    "Wall": [
        { "keys": ["Qto_WallBaseQuantities.NetVolume", "Volume"], "displayName": "Volume" }
    ],
    "Door": [
        { "keys": ["Qto_DoorBaseQuantities.Area"], "displayName": "Area" }
    ]
}"#;

const MODEL: &str = r#"{
    "elements": [
        { "id": "w1", "ifcType": "IfcWallStandardCase", "properties": { "Qto_WallBaseQuantities.NetVolume": 0 } },
        { "id": "w2", "ifcType": "IfcWallStandardCase", "properties": { "Qto_WallBaseQuantities.NetVolume": 12.5 } },
        { "id": "w3", "ifcType": "IfcWallStandardCase", "properties": { "Qto_WallBaseQuantities.NetVolume": -3 } }
    ]
}"#;

fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Basequantities.json"), CATALOG).unwrap();
    fs::write(temp.path().join("model.json"), MODEL).unwrap();
    temp
}

fn qto_check(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("qto-check"));
    cmd.current_dir(temp.path())
        .env_remove("QTO_CATALOG")
        .env_remove("QTO_MODEL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_runs_every_category() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup();
    qto_check(&temp)
        .args(["--model", "model.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Wall elements with zero, negative, or undefined values added to their respective selection sets.",
        ))
        .stdout(predicate::str::contains("Door not present in the model."));
    Ok(())
}

#[test]
fn cli_lists_checks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup();
    qto_check(&temp)
        .arg("--list")
        .assert()
        .success()
        .stdout("Check Wall Base Quantities\nCheck Door Base Quantities\n");
    Ok(())
}

#[test]
fn cli_reads_paths_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup();
    fs::rename(
        temp.path().join("Basequantities.json"),
        temp.path().join("quantities.json"),
    )?;
    qto_check(&temp)
        .env("QTO_CATALOG", "quantities.json")
        .env("QTO_MODEL", "model.json")
        .args(["--category", "Door"])
        .assert()
        .success()
        .stdout("Door not present in the model.\n");
    Ok(())
}

#[test]
fn cli_writes_selection_sets() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup();
    qto_check(&temp)
        .args(["-m", "model.json", "-C", "Wall", "-o", "state.json"])
        .assert()
        .success();

    let state: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("state.json"))?)?;
    assert_eq!(state["selectionSets"][0]["name"], "Wall with zero Volume");
    assert_eq!(state["selectionSets"][0]["ids"], serde_json::json!(["w1"]));
    assert_eq!(state["selectionSets"][1]["name"], "Wall with negative Volume");
    Ok(())
}

#[test]
fn cli_unknown_category_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup();
    qto_check(&temp)
        .args(["-m", "model.json", "-C", "Roof"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unknown category Roof"));
    Ok(())
}

#[test]
fn cli_missing_catalog_offers_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup();
    qto_check(&temp)
        .args(["-c", "nope.json", "-m", "model.json"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Could not load base quantities catalog"));
    Ok(())
}

#[test]
fn cli_requires_model() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup();
    qto_check(&temp).assert().failure();
    Ok(())
}
