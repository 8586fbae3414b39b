//! Per-bundle pipeline and run coordination.

use super::Settings;
use crate::chunk::{ChunkNode, GuidSource, RandomGuids, build_user_object};
use crate::codec::{ChunkCodec, encode_user_object};
use crate::error::{ComponentizeError, Result};
use crate::source::{self, SourceBundle};
use crate::template::{TemplateValues, replace_templates};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// A user-object file written for one bundle.
#[derive(Clone, Debug)]
pub struct Component {
    /// Bundle directory name.
    pub name: String,
    /// Written file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 of the file contents.
    pub checksum: String,
}

/// A bundle that could not be componentized.
#[derive(Debug)]
pub struct BundleFailure {
    /// Bundle directory name.
    pub name: String,
    /// Bundle directory.
    pub directory: PathBuf,
    /// What went wrong.
    pub error: ComponentizeError,
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub components: Vec<Component>,
    pub failures: Vec<BundleFailure>,
}

impl RunReport {
    /// True when every bundle was written.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives bundles through validate, template, build, encode and write.
///
/// Bundles are processed one at a time. A failing bundle is recorded and
/// the run continues; outputs already written are left in place.
pub struct Componentizer<C> {
    settings: Settings,
    codec: C,
}

impl<C: ChunkCodec> Componentizer<C> {
    /// Creates a componentizer writing through `codec`.
    pub fn new(settings: Settings, codec: C) -> Self {
        Self { settings, codec }
    }

    /// Returns a reference to the run settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Lists the bundles this run will process.
    pub fn bundles(&self) -> Result<Vec<PathBuf>> {
        source::discover_bundles(self.settings.source_dir())
    }

    /// Componentizes every bundle in the source directory.
    pub async fn run(&self) -> Result<RunReport> {
        let bundles = self.bundles()?;
        self.prepare_target().await?;
        self.run_bundles(&bundles, |_| Ok(())).await
    }

    /// Componentizes already discovered bundles in order.
    ///
    /// `on_start` is called with each bundle name before it is processed.
    /// The target directory must already exist.
    pub async fn run_bundles<F>(&self, bundles: &[PathBuf], mut on_start: F) -> Result<RunReport>
    where
        F: FnMut(&str) -> std::io::Result<()>,
    {
        let mut report = RunReport::default();
        for directory in bundles {
            let name = source::bundle_name(directory);
            on_start(&name)?;
            match self.componentize(directory).await {
                Ok(component) => {
                    log::info!("{} => {}", name, component.path.display());
                    report.components.push(component);
                }
                Err(error) if error.is_recoverable() => {
                    log::warn!("{}: {}", name, error);
                    report.failures.push(BundleFailure {
                        name,
                        directory: directory.clone(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(report)
    }

    /// Creates the target directory if it does not exist.
    pub async fn prepare_target(&self) -> Result<()> {
        tokio::fs::create_dir_all(self.settings.target_dir()).await?;
        Ok(())
    }

    /// Componentizes a single bundle directory and writes its output.
    pub async fn componentize(&self, directory: &Path) -> Result<Component> {
        let bundle = source::load_bundle(directory).await?;
        let name = bundle.directory_name();
        let path = self.settings.output_path(&name);

        let root = self.build_tree(&bundle, &mut RandomGuids);
        let bytes = encode_user_object(&self.codec, root).await?;
        write_atomically(&path, &bytes).await?;

        Ok(Component {
            name,
            path,
            size: bytes.len() as u64,
            checksum: format!("{:x}", Sha256::digest(&bytes)),
        })
    }

    /// Templates the bundle code and builds its chunk tree.
    pub fn build_tree(&self, bundle: &SourceBundle, guids: &mut impl GuidSource) -> ChunkNode {
        let ghuser_name = self.settings.output_file_name(&bundle.directory_name());
        let code = replace_templates(
            &bundle.code,
            &TemplateValues {
                version: self.settings.version(),
                name: &bundle.metadata.name,
                ghuser_name: &ghuser_name,
            },
        );
        build_user_object(&bundle.metadata, &bundle.icon, &code, guids)
    }
}

/// Writes `bytes` next to `path` and renames over it, so readers never see
/// a half-written file.
async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    if let Err(e) = tokio::fs::write(&staging, bytes).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&staging, path).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::componentizer::SettingsBuilder;
    use crate::error::BundleError;

    /// Encodes chunks as their JSON wire form.
    struct JsonCodec;

    impl ChunkCodec for JsonCodec {
        async fn encode(&self, chunk: &ChunkNode) -> Result<Vec<u8>> {
            serde_json::to_vec(chunk).map_err(|e| ComponentizeError::Encode {
                reason: e.to_string(),
            })
        }
    }

    fn write_bundle(root: &Path, name: &str, metadata: &str, code: &str) -> PathBuf {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("icon.png"), b"\x89PNG").unwrap();
        std::fs::write(dir.join("code.py"), code).unwrap();
        std::fs::write(dir.join("metadata.json"), metadata).unwrap();
        dir
    }

    fn componentizer(source: &Path, target: &Path) -> Componentizer<JsonCodec> {
        let settings = SettingsBuilder::new()
            .source_dir(source)
            .target_dir(target)
            .version("2.0.1")
            .build()
            .unwrap();
        Componentizer::new(settings, JsonCodec)
    }

    const ADD: &str = r#"{"name":"Add","nickname":"Add","category":"Math","subcategory":"Operators",
        "ghpython":{"inputParameters":[{"name":"A"},{"name":"B"}],"outputParameters":[{"name":"Result"}]}}"#;

    #[tokio::test]
    async fn code_is_templated_before_building() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = write_bundle(
            tmp.path(),
            "AddBundle",
            ADD,
            "# {{name}} {{version}} {{ghuser_name}}",
        );
        let componentizer = componentizer(tmp.path(), &tmp.path().join("out"));
        let bundle = source::load_bundle(&dir).await.unwrap();

        let root = componentizer.build_tree(&bundle, &mut RandomGuids);
        let body = root.chunk("UserObject").unwrap();
        assert_eq!(
            body.get_string("CodeInput"),
            Some("# Add 2.0.1 AddBundle.ghuser")
        );
    }

    #[tokio::test]
    async fn run_writes_good_bundles_and_reports_bad_ones() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("src");
        let target = tmp.path().join("out");
        write_bundle(&source, "Add", ADD, "print(1)");
        write_bundle(
            &source,
            "BadExposure",
            r#"{"name":"B","nickname":"B","category":"C","subcategory":"S","exposure":3,"ghpython":{}}"#,
            "",
        );
        std::fs::create_dir_all(source.join("NoFiles")).unwrap();
        std::fs::create_dir_all(source.join("__pycache__")).unwrap();

        let report = componentizer(&source, &target).run().await.unwrap();
        assert!(!report.is_success());

        assert_eq!(report.components.len(), 1);
        let add = &report.components[0];
        assert_eq!(add.path, target.join("Add.ghuser"));
        assert_eq!(add.checksum.len(), 64);
        let written = std::fs::read(&add.path).unwrap();
        assert_eq!(written.len() as u64, add.size);
        assert!(!target.join("Add.ghuser.tmp").exists());

        let failed: Vec<_> = report.failures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(failed, ["BadExposure", "NoFiles"]);
        assert!(matches!(
            report.failures[1].error,
            ComponentizeError::Bundle(BundleError::MissingArtifact { artifact: "icon.png", .. })
        ));
        assert!(!target.join("BadExposure.ghuser").exists());
    }

    #[tokio::test]
    async fn written_file_embeds_body_as_object() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("src");
        let target = tmp.path().join("out");
        let dir = write_bundle(&source, "Add", ADD, "print(1)");

        let component = componentizer(&source, &target)
            .componentize(&dir)
            .await
            .unwrap();
        let root: serde_json::Value =
            serde_json::from_slice(&std::fs::read(component.path).unwrap()).unwrap();
        assert_eq!(root["chunks"], serde_json::json!([]));
        let object = root["items"]
            .as_array()
            .unwrap()
            .iter()
            .find(|item| item["name"] == "Object")
            .unwrap();
        assert_eq!(object["type"], "byte_array");
    }

    #[tokio::test]
    async fn run_bundles_processes_only_the_given_list() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("src");
        let target = tmp.path().join("out");
        let add = write_bundle(&source, "Add", ADD, "print(1)");
        let sub = write_bundle(&source, "Sub", ADD, "print(2)");
        write_bundle(&source, "Skipped", ADD, "print(3)");

        let componentizer = componentizer(&source, &target);
        componentizer.prepare_target().await.unwrap();

        let mut started = Vec::new();
        let report = componentizer
            .run_bundles(&[sub, add], |name| {
                started.push(name.to_string());
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(started, ["Sub", "Add"]);
        let written: Vec<_> = report.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(written, ["Sub", "Add"]);
        assert!(!target.join("Skipped.ghuser").exists());
    }
}
