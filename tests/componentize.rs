//! End-to-end tests of the componentize binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn componentize() -> Command {
    let mut cmd = Command::cargo_bin("componentize").unwrap();
    cmd.env_remove("COMPONENTIZE_CODEC_LIB");
    cmd
}

#[test]
fn missing_codec_aborts_before_any_bundle() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("src");
    let target = tmp.path().join("out");
    let empty_lib = tmp.path().join("lib");
    std::fs::create_dir_all(&empty_lib).unwrap();
    common::copy_fixtures(&source, &["Add"]);

    componentize()
        .arg(&source)
        .arg(&target)
        .arg("--codec-lib")
        .arg(&empty_lib)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghio-encode"))
        .stderr(predicate::function(|err: &str| {
            err.matches("Cannot find the chunk codec").count() == 1
        }));

    assert!(!target.join("Add.ghuser").exists());
}

#[test]
fn missing_positional_arguments_fail() {
    componentize().assert().failure();
}

#[cfg(unix)]
mod with_codec {
    use super::*;
    use crate::common::{child, item, read_output, script_body};

    const AUTHORED_GUID: &str = "11111111-1111-1111-1111-111111111111";

    fn setup(bundles: &[&str]) -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("src");
        let lib = tmp.path().join("lib");
        common::copy_fixtures(&source, bundles);
        common::install_echo_codec(&lib);
        (tmp, source, lib)
    }

    #[test]
    fn builds_add_component() {
        let (tmp, source, lib) = setup(&["Add", "Loft"]);
        let target = tmp.path().join("out");

        componentize()
            .arg(&source)
            .arg(&target)
            .arg("--codec-lib")
            .arg(&lib)
            .arg("--version")
            .arg("1.4.0")
            .assert()
            .success()
            .stdout(predicate::str::contains("[ ] Add\n"))
            .stdout(predicate::str::contains("[ ] Loft\n"))
            .stdout(predicate::str::contains("2 written, 0 failed"));

        let root = read_output(&target.join("Add.ghuser"));
        assert_eq!(root["name"], "UserObject");
        assert_eq!(item(&root, "BaseID"), "410755b1-224a-4c1e-a407-bf32fb45ea7e");
        assert_eq!(item(&root, "Name"), "Add");
        assert_eq!(item(&root, "Exposure"), 2);
        assert_eq!(item(&root, "InstanceGuid"), AUTHORED_GUID);

        let body = script_body(&root);
        let code = item(&body, "CodeInput").as_str().unwrap();
        assert!(code.contains("Add v1.4.0 (Add.ghuser)"));

        let params = child(&body, "ParameterData", None);
        assert_eq!(item(params, "InputCount"), 2);
        assert_eq!(item(params, "OutputCount"), 1);

        let a = child(params, "InputParam", Some(0));
        assert_eq!(item(a, "ScriptParamAccess"), 0);
        assert_eq!(item(a, "Optional"), true);
        assert_eq!(item(a, "SourceCount"), 0);

        let result = child(params, "OutputParam", Some(0));
        assert_eq!(item(result, "Optional"), false);
        assert_eq!(item(result, "SourceCount"), 0);
    }

    #[test]
    fn aliases_are_resolved_in_output() {
        let (tmp, source, lib) = setup(&["Loft"]);
        let target = tmp.path().join("out");

        componentize()
            .arg(&source)
            .arg(&target)
            .arg("--codec-lib")
            .arg(&lib)
            .assert()
            .success();

        let root = read_output(&target.join("Loft.ghuser"));
        assert_eq!(item(&root, "Exposure"), 4);
        assert_eq!(item(&root, "Description"), "Lofts section curves into a brep.");

        let body = script_body(&root);
        assert_eq!(item(&body, "IsAdvancedMode"), true);
        let code = item(&body, "CodeInput").as_str().unwrap();
        assert!(code.contains("# Loft Sections"));

        let params = child(&body, "ParameterData", None);
        let curves = child(params, "InputParam", Some(0));
        assert_eq!(item(curves, "NickName"), "C");
        assert_eq!(item(curves, "ScriptParamAccess"), 1);
        assert_eq!(item(curves, "WireDisplay"), 1);
        assert_eq!(item(curves, "TypeHintID"), "9ba89ec2-5315-435f-a621-b66c5fa2f301");
    }

    #[test]
    fn failing_bundle_does_not_stop_the_run() {
        let (tmp, source, lib) = setup(&["Add"]);
        let target = tmp.path().join("out");
        let broken = source.join("Broken");
        std::fs::create_dir_all(&broken).unwrap();
        std::fs::write(broken.join("code.py"), "pass").unwrap();
        std::fs::write(broken.join("metadata.json"), "{}").unwrap();
        std::fs::create_dir_all(source.join(".git")).unwrap();

        componentize()
            .arg(&source)
            .arg(&target)
            .arg("--codec-lib")
            .arg(&lib)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("icon.png missing"))
            .stdout(predicate::str::contains("1 written, 1 failed"));

        assert!(target.join("Add.ghuser").exists());
        assert!(!target.join("Broken.ghuser").exists());
        assert!(!target.join(".git.ghuser").exists());
    }

    #[test]
    fn rebuilds_differ_only_in_generated_identities() {
        let (tmp, source, lib) = setup(&["Add"]);
        let metadata = source.join("Add").join("metadata.json");
        let text = std::fs::read_to_string(&metadata).unwrap();
        let unpinned = text.replace(
            &format!("\"instanceGuid\": \"{AUTHORED_GUID}\","),
            "",
        );
        assert_ne!(unpinned, text);
        std::fs::write(&metadata, unpinned).unwrap();

        let mut roots = Vec::new();
        for run in ["first", "second"] {
            let target = tmp.path().join(run);
            componentize()
                .arg(&source)
                .arg(&target)
                .arg("--codec-lib")
                .arg(&lib)
                .assert()
                .success();
            roots.push(read_output(&target.join("Add.ghuser")));
        }

        assert_ne!(item(&roots[0], "InstanceGuid"), item(&roots[1], "InstanceGuid"));
        for name in ["Name", "NickName", "Description", "Exposure", "Category", "SubCategory", "Icon"] {
            assert_eq!(item(&roots[0], name), item(&roots[1], name), "{name}");
        }

        let bodies: Vec<_> = roots.iter().map(script_body).collect();
        assert_eq!(item(&bodies[0], "CodeInput"), item(&bodies[1], "CodeInput"));
        let params: Vec<_> = bodies.iter().map(|b| child(b, "ParameterData", None)).collect();
        for name in ["InputCount", "OutputCount"] {
            assert_eq!(item(params[0], name), item(params[1], name));
        }
    }

    #[test]
    fn empty_source_warns_and_succeeds() {
        let (tmp, source, lib) = setup(&[]);
        std::fs::create_dir_all(&source).unwrap();
        let target = tmp.path().join("out");

        componentize()
            .arg(&source)
            .arg(&target)
            .arg("--codec-lib")
            .arg(&lib)
            .assert()
            .success()
            .stderr(predicate::str::contains("[!] No component bundles found"))
            .stdout(predicate::str::contains("0 written, 0 failed"));

        assert!(target.is_dir());
    }

    #[test]
    fn custom_extension_names_outputs() {
        let (tmp, source, lib) = setup(&["Add"]);
        let target = tmp.path().join("out");

        componentize()
            .arg(&source)
            .arg(&target)
            .arg("--codec-lib")
            .arg(&lib)
            .arg("--extension")
            .arg("ghuserx")
            .arg("--quiet")
            .assert()
            .success();

        let root = read_output(&target.join("Add.ghuserx"));
        let body = script_body(&root);
        let code = item(&body, "CodeInput").as_str().unwrap();
        assert!(code.contains("(Add.ghuserx)"));
        // untagged runs keep the version placeholder
        assert!(code.contains("v{{version}}"));
    }

    #[test]
    fn codec_lib_can_come_from_environment() {
        let (tmp, source, lib) = setup(&["Add"]);
        let target = tmp.path().join("out");

        Command::cargo_bin("componentize")
            .unwrap()
            .env("COMPONENTIZE_CODEC_LIB", &lib)
            .arg(&source)
            .arg(&target)
            .assert()
            .success();

        assert!(target.join("Add.ghuser").exists());
    }
}
