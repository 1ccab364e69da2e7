//! Behaviour-driven tests for GraalVM home resolution.
//!
//! Each scenario builds fake installations in a temporary directory and
//! resolves against an environment snapshot, so the real process
//! environment is never consulted.

use camino::Utf8PathBuf;
use graalvm_native_image::environment::{
    EnvironmentSnapshot, JAVA_HOME_PROPERTY, JAVA_HOME_VARIABLE, PATH_VARIABLE,
    SDKMAN_CANDIDATES_VARIABLE,
};
use graalvm_native_image::home::GraalVmHome;
use graalvm_native_image::{HomeResolver, NativeImageError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

struct ResolutionWorld {
    sandbox: TempDir,
    env: RefCell<EnvironmentSnapshot>,
    resolved: RefCell<Option<Option<GraalVmHome>>>,
    gu_lookup: RefCell<Option<graalvm_native_image::Result<Utf8PathBuf>>>,
    native_image: RefCell<Option<Option<Utf8PathBuf>>>,
}

impl ResolutionWorld {
    fn root(&self) -> Utf8PathBuf {
        Utf8PathBuf::try_from(self.sandbox.path().to_path_buf()).expect("utf-8 temp dir")
    }

    fn installation(&self, name: &str) -> Utf8PathBuf {
        self.root().join(name)
    }

    fn sdkman_candidates(&self) -> Utf8PathBuf {
        self.root().join("sdkman/candidates")
    }

    fn set_env(&self, name: &str, value: &str) {
        let env = self.env.take();
        self.env.replace(env.with_env(name, value));
    }

    fn resolved_home(&self) -> Option<GraalVmHome> {
        self.resolved
            .borrow()
            .clone()
            .expect("the home should have been resolved")
    }
}

#[fixture]
fn resolution_world() -> ResolutionWorld {
    ResolutionWorld {
        sandbox: TempDir::new().expect("temp dir"),
        env: RefCell::new(EnvironmentSnapshot::new()),
        resolved: RefCell::new(None),
        gu_lookup: RefCell::new(None),
        native_image: RefCell::new(None),
    }
}

fn create_installation(root: &Utf8PathBuf, binary: &str) {
    std::fs::create_dir_all(root.join("bin")).expect("create bin");
    std::fs::write(root.join("bin").join(binary), b"").expect("create binary");
}

#[given("a GraalVM installation {name} providing {binary}")]
fn given_installation(resolution_world: &ResolutionWorld, name: String, binary: String) {
    create_installation(&resolution_world.installation(&name), &binary);
}

#[given("an SDKMAN java candidate {name} providing {binary}")]
fn given_sdkman_candidate(resolution_world: &ResolutionWorld, name: String, binary: String) {
    let candidates = resolution_world.sdkman_candidates();
    create_installation(&candidates.join("java").join(name), &binary);
    resolution_world.set_env(SDKMAN_CANDIDATES_VARIABLE, candidates.as_str());
}

#[given("PATH lists the bin directory of {name}")]
fn given_path_entry(resolution_world: &ResolutionWorld, name: String) {
    let bin = resolution_world.installation(&name).join("bin");
    resolution_world.set_env(PATH_VARIABLE, bin.as_str());
}

#[given("JAVA_HOME points at {name}")]
fn given_java_home(resolution_world: &ResolutionWorld, name: String) {
    let home = resolution_world.installation(&name);
    resolution_world.set_env(JAVA_HOME_VARIABLE, home.as_str());
}

#[given("the java.home property points at {name}")]
fn given_java_home_property(resolution_world: &ResolutionWorld, name: String) {
    let home = resolution_world.installation(&name);
    let env = resolution_world.env.take();
    resolution_world
        .env
        .replace(env.with_property(JAVA_HOME_PROPERTY, home.as_str()));
}

#[when("the GraalVM home is resolved")]
fn when_resolved(resolution_world: &ResolutionWorld) {
    let env = resolution_world.env.borrow();
    let resolved = HomeResolver::new(&*env).resolve();
    resolution_world.resolved.replace(Some(resolved));
}

#[when("the component manager of {name} is looked up")]
fn when_gu_looked_up(resolution_world: &ResolutionWorld, name: String) {
    let home = GraalVmHome::new(resolution_world.installation(&name));
    resolution_world.gu_lookup.replace(Some(home.gu()));
}

#[when("native-image is looked up in {name}")]
fn when_native_image_looked_up(resolution_world: &ResolutionWorld, name: String) {
    let home = GraalVmHome::new(resolution_world.installation(&name));
    resolution_world.native_image.replace(Some(home.native_image()));
}

#[then("the SDKMAN candidate {name} is the resolved home")]
fn then_resolved_sdkman(resolution_world: &ResolutionWorld, name: String) {
    let expected = resolution_world.sdkman_candidates().join("java").join(name);
    let home = resolution_world
        .resolved_home()
        .expect("a home should be found");

    assert_eq!(home.root(), expected.as_path());
}

#[then("the resolved home is {name}")]
fn then_resolved(resolution_world: &ResolutionWorld, name: String) {
    let expected = resolution_world.installation(&name);
    let home = resolution_world
        .resolved_home()
        .expect("a home should be found");

    assert_eq!(home.root(), expected.as_path());
}

#[then("no GraalVM home is found")]
fn then_no_home(resolution_world: &ResolutionWorld) {
    assert_eq!(resolution_world.resolved_home(), None);
}

#[then("an invalid installation error names {binary}")]
fn then_invalid_installation(resolution_world: &ResolutionWorld, binary: String) {
    let lookup = resolution_world.gu_lookup.borrow();
    match lookup.as_ref() {
        Some(Err(error @ NativeImageError::InvalidInstallation { .. })) => {
            assert!(
                error.to_string().contains(&binary),
                "expected '{error}' to name {binary}"
            );
        }
        Some(other) => panic!("expected an invalid installation error, got {other:?}"),
        None => panic!("the component manager should have been looked up"),
    }
}

#[then("native-image is reported as absent")]
fn then_native_image_absent(resolution_world: &ResolutionWorld) {
    let lookup = resolution_world.native_image.borrow();
    assert_eq!(*lookup, Some(None));
}

// Bindings are index-based; keep them in feature-file order.
#[scenario(path = "tests/features/home_resolution.feature", index = 0)]
fn scenario_path_entry(resolution_world: ResolutionWorld) {
    let _ = resolution_world;
}

#[scenario(path = "tests/features/home_resolution.feature", index = 1)]
fn scenario_path_beats_java_home(resolution_world: ResolutionWorld) {
    let _ = resolution_world;
}

#[scenario(path = "tests/features/home_resolution.feature", index = 2)]
fn scenario_java_home_property(resolution_world: ResolutionWorld) {
    let _ = resolution_world;
}

#[scenario(path = "tests/features/home_resolution.feature", index = 3)]
fn scenario_sdkman_candidate(resolution_world: ResolutionWorld) {
    let _ = resolution_world;
}

#[scenario(path = "tests/features/home_resolution.feature", index = 4)]
fn scenario_nothing_found(resolution_world: ResolutionWorld) {
    let _ = resolution_world;
}

#[scenario(path = "tests/features/home_resolution.feature", index = 5)]
fn scenario_invalid_installation(resolution_world: ResolutionWorld) {
    let _ = resolution_world;
}

#[scenario(path = "tests/features/home_resolution.feature", index = 6)]
fn scenario_native_image_optional(resolution_world: ResolutionWorld) {
    let _ = resolution_world;
}
