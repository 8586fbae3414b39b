//! Shared helpers for componentize integration tests

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Directory holding the fixture bundles
pub fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/components")
}

/// Copies the named fixture bundles into `dest`
pub fn copy_fixtures(dest: &Path, names: &[&str]) {
    for name in names {
        let from = fixtures().join(name);
        let to = dest.join(name);
        std::fs::create_dir_all(&to).unwrap();
        for entry in std::fs::read_dir(&from).unwrap() {
            let entry = entry.unwrap();
            std::fs::copy(entry.path(), to.join(entry.file_name())).unwrap();
        }
    }
}

/// Writes a stand-in codec that echoes the chunk JSON it receives
#[cfg(unix)]
pub fn install_echo_codec(lib: &Path) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::create_dir_all(lib).unwrap();
    let program = lib.join("ghio-encode");
    std::fs::write(&program, "#!/bin/sh\ncat\n").unwrap();
    std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Reads a written file produced by the echo codec
pub fn read_output(path: &Path) -> Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

/// Finds an unindexed item value on a chunk
pub fn item<'a>(chunk: &'a Value, name: &str) -> &'a Value {
    chunk["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["name"] == name && item["index"].is_null())
        .map(|item| &item["value"])
        .unwrap_or_else(|| panic!("item {name} not found"))
}

/// Finds a child chunk by name and index
pub fn child<'a>(chunk: &'a Value, name: &str, index: Option<u64>) -> &'a Value {
    chunk["chunks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == name && c["index"].as_u64() == index)
        .unwrap_or_else(|| panic!("chunk {name}[{index:?}] not found"))
}

/// Decodes the script body stored in the root's `Object` byte array
pub fn script_body(root: &Value) -> Value {
    let encoded = item(root, "Object").as_str().unwrap();
    let bytes = STANDARD.decode(encoded).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
