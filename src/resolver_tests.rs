//! Tests for GraalVM home auto-discovery.

use super::*;
use crate::environment::{EnvironmentSnapshot, MockEnvironmentProbe};
use rstest::{fixture, rstest};
use tempfile::TempDir;

/// Scratch area holding fake installations.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn root(&self) -> Utf8PathBuf {
        Utf8PathBuf::try_from(self.dir.path().to_path_buf()).expect("utf-8 temp dir")
    }

    /// Creates `<name>/bin` and places the given binaries inside it.
    fn installation(&self, name: &str, binaries: &[&str]) -> Utf8PathBuf {
        let home = self.root().join(name);
        let bin = home.join("bin");
        std::fs::create_dir_all(&bin).expect("create bin");
        for binary in binaries {
            std::fs::write(bin.join(binary), b"").expect("create binary");
        }
        home
    }

    fn directory(&self, name: &str) -> Utf8PathBuf {
        let dir = self.root().join(name);
        std::fs::create_dir_all(&dir).expect("create directory");
        dir
    }
}

#[fixture]
fn sandbox() -> Sandbox {
    Sandbox {
        dir: TempDir::new().expect("temp dir"),
    }
}

fn path_list(entries: &[&Utf8Path]) -> String {
    std::env::join_paths(entries.iter().map(|entry| entry.as_std_path()))
        .expect("joinable path list")
        .into_string()
        .expect("utf-8 path list")
}

#[rstest]
fn path_entry_with_gu_resolves_grandparent(sandbox: Sandbox) {
    let graal = sandbox.installation("graalvm", &["gu"]);
    let unrelated = sandbox.directory("usr/bin");
    let env = EnvironmentSnapshot::new().with_env(
        PATH_VARIABLE,
        path_list(&[&unrelated, &graal.join("bin")]),
    );

    let home = HomeResolver::new(&env).resolve();

    assert_eq!(home, Some(GraalVmHome::new(graal)));
}

#[test]
fn relative_path_entry_resolves_to_absolute_root() {
    let dir = TempDir::new_in(".").expect("temp dir under the working directory");
    let relative = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf-8 temp dir");
    let bin = relative.join("graalvm").join("bin");
    std::fs::create_dir_all(&bin).expect("create bin");
    std::fs::write(bin.join("gu"), b"").expect("create gu");
    std::fs::write(bin.join("native-image"), b"").expect("create native-image");
    assert!(bin.is_relative());
    let env = EnvironmentSnapshot::new().with_env(PATH_VARIABLE, bin.as_str());

    let home = HomeResolver::new(&env).resolve().expect("home should resolve");

    assert!(home.root().is_absolute(), "root {} is relative", home.root());
    assert_eq!(
        home.root().canonicalize_utf8().expect("canonical root"),
        relative.join("graalvm").canonicalize_utf8().expect("canonical install")
    );
    let native_image = home.native_image().expect("native-image present");
    assert!(native_image.is_absolute());
}

#[rstest]
fn path_takes_precedence_over_java_home(sandbox: Sandbox) {
    let on_path = sandbox.installation("graalvm-path", &["gu"]);
    let java_home = sandbox.installation("graalvm-java-home", &["gu"]);
    let env = EnvironmentSnapshot::new()
        .with_env(PATH_VARIABLE, path_list(&[&on_path.join("bin")]))
        .with_env(JAVA_HOME_VARIABLE, java_home.as_str());

    let home = HomeResolver::new(&env).resolve();

    assert_eq!(home, Some(GraalVmHome::new(on_path)));
}

#[rstest]
fn java_home_used_when_path_has_no_component_manager(sandbox: Sandbox) {
    let plain = sandbox.directory("usr/bin");
    let java_home = sandbox.installation("graalvm", &["gu"]);
    let env = EnvironmentSnapshot::new()
        .with_env(PATH_VARIABLE, path_list(&[&plain]))
        .with_env(JAVA_HOME_VARIABLE, java_home.as_str());

    let home = HomeResolver::new(&env).resolve();

    assert_eq!(home, Some(GraalVmHome::new(java_home)));
}

#[rstest]
fn java_home_property_used_after_invalid_java_home(sandbox: Sandbox) {
    let property_home = sandbox.installation("graalvm", &["gu"]);
    let env = EnvironmentSnapshot::new()
        .with_env(JAVA_HOME_VARIABLE, sandbox.root().join("missing").as_str())
        .with_property(JAVA_HOME_PROPERTY, property_home.as_str());

    let home = HomeResolver::new(&env).resolve();

    assert_eq!(home, Some(GraalVmHome::new(property_home)));
}

#[rstest]
fn java_home_wins_over_property(sandbox: Sandbox) {
    let java_home = sandbox.installation("graalvm-env", &["gu"]);
    let property_home = sandbox.installation("graalvm-property", &["gu"]);
    let env = EnvironmentSnapshot::new()
        .with_env(JAVA_HOME_VARIABLE, java_home.as_str())
        .with_property(JAVA_HOME_PROPERTY, property_home.as_str());

    let home = HomeResolver::new(&env).resolve();

    assert_eq!(home, Some(GraalVmHome::new(java_home)));
}

#[rstest]
fn sdkman_candidates_are_a_last_resort(sandbox: Sandbox) {
    sandbox.installation("candidates/java/11.0.2-open", &["java"]);
    let graal = sandbox.installation("candidates/java/21-graal", &["gu", "native-image"]);
    let env = EnvironmentSnapshot::new()
        .with_env(SDKMAN_CANDIDATES_VARIABLE, sandbox.root().join("candidates").as_str());

    let home = HomeResolver::new(&env).resolve();

    assert_eq!(home, Some(GraalVmHome::new(graal)));
}

#[rstest]
fn command_shell_component_manager_is_recognised(sandbox: Sandbox) {
    let graal = sandbox.installation("graalvm", &["gu.cmd"]);
    let env = EnvironmentSnapshot::new().with_env(JAVA_HOME_VARIABLE, graal.as_str());

    let home = HomeResolver::new(&env).resolve();

    assert_eq!(home, Some(GraalVmHome::new(graal)));
}

#[rstest]
fn java_home_without_bin_is_skipped(sandbox: Sandbox) {
    let bare = sandbox.directory("not-a-jdk");
    let env = EnvironmentSnapshot::new().with_env(JAVA_HOME_VARIABLE, bare.as_str());

    assert!(HomeResolver::new(&env).candidate_bin_dirs().is_empty());
    assert_eq!(HomeResolver::new(&env).resolve(), None);
}

#[test]
fn no_signals_resolve_nothing() {
    let env = EnvironmentSnapshot::new();

    assert_eq!(HomeResolver::new(&env).resolve(), None);
}

#[rstest]
fn candidates_follow_priority_order(sandbox: Sandbox) {
    let path_entry = sandbox.directory("path-entry");
    let java_home = sandbox.installation("java-home", &[]);
    let property_home = sandbox.installation("property-home", &[]);
    let sdk_a = sandbox.installation("candidates/java/a", &[]);
    let sdk_b = sandbox.installation("candidates/java/b", &[]);
    let env = EnvironmentSnapshot::new()
        .with_env(PATH_VARIABLE, path_list(&[&path_entry]))
        .with_env(JAVA_HOME_VARIABLE, java_home.as_str())
        .with_property(JAVA_HOME_PROPERTY, property_home.as_str())
        .with_env(SDKMAN_CANDIDATES_VARIABLE, sandbox.root().join("candidates").as_str());

    let candidates = HomeResolver::new(&env).candidate_bin_dirs();

    assert_eq!(
        candidates,
        vec![
            path_entry,
            java_home.join("bin"),
            property_home.join("bin"),
            sdk_a.join("bin"),
            sdk_b.join("bin"),
        ]
    );
}

#[test]
fn every_source_is_consulted_once() {
    let mut probe = MockEnvironmentProbe::new();
    probe
        .expect_env()
        .withf(|name| name == PATH_VARIABLE)
        .times(1)
        .returning(|_| None);
    probe
        .expect_env()
        .withf(|name| name == JAVA_HOME_VARIABLE)
        .times(1)
        .returning(|_| None);
    probe
        .expect_env()
        .withf(|name| name == SDKMAN_CANDIDATES_VARIABLE)
        .times(1)
        .returning(|_| None);
    probe
        .expect_property()
        .withf(|name| name == JAVA_HOME_PROPERTY)
        .times(1)
        .returning(|_| None);

    assert_eq!(HomeResolver::new(&probe).resolve(), None);
}

#[test]
fn split_path_list_drops_empty_entries() {
    let value = path_list(&[Utf8Path::new("/usr/bin"), Utf8Path::new(""), Utf8Path::new("/opt/bin")]);

    assert_eq!(
        split_path_list(&value),
        vec![Utf8PathBuf::from("/usr/bin"), Utf8PathBuf::from("/opt/bin")]
    );
}
