//! GraalVM installation roots and the binaries they contain.
//!
//! A [`GraalVmHome`] is only a path; nothing is checked when it is built.
//! Binary lookups probe the filesystem on every call and try the bare name
//! before the `.cmd` variant used by command-shell distributions.

use crate::error::{NativeImageError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// File name of the ahead-of-time compiler.
pub const NATIVE_IMAGE: &str = "native-image";

/// File name of the component manager.
pub const GU: &str = "gu";

/// Suffix carried by binaries in command-shell distributions.
pub const COMMAND_SHELL_SUFFIX: &str = ".cmd";

/// Returns the file names probed for `binary`, in lookup order.
///
/// # Examples
///
/// ```
/// use graalvm_native_image::home::binary_variants;
///
/// assert_eq!(binary_variants("gu"), ["gu".to_owned(), "gu.cmd".to_owned()]);
/// ```
#[must_use]
pub fn binary_variants(binary: &str) -> [String; 2] {
    [binary.to_owned(), format!("{binary}{COMMAND_SHELL_SUFFIX}")]
}

/// Root directory of a GraalVM distribution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraalVmHome {
    root: Utf8PathBuf,
}

impl GraalVmHome {
    /// Wraps an installation root without validating it.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Installation root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// The `bin` directory under the root.
    #[must_use]
    pub fn bin_dir(&self) -> Utf8PathBuf {
        self.root.join("bin")
    }

    /// Path a binary has on this platform, whether or not it exists.
    ///
    /// On Windows this is the `.cmd` variant; elsewhere it is the bare name.
    #[must_use]
    pub fn binary_path(&self, binary: &str) -> Utf8PathBuf {
        if cfg!(windows) {
            self.bin_dir().join(format!("{binary}{COMMAND_SHELL_SUFFIX}"))
        } else {
            self.bin_dir().join(binary)
        }
    }

    /// Finds an existing variant of `binary` under `bin`.
    #[must_use]
    pub fn find_binary(&self, binary: &str) -> Option<Utf8PathBuf> {
        let bin_dir = self.bin_dir();
        binary_variants(binary)
            .into_iter()
            .map(|name| bin_dir.join(name))
            .find(|candidate| candidate.exists())
    }

    /// Path to `native-image`, or `None` when the tool is not installed.
    #[must_use]
    pub fn native_image(&self) -> Option<Utf8PathBuf> {
        self.find_binary(NATIVE_IMAGE)
    }

    /// Path to the `gu` component manager.
    ///
    /// # Errors
    ///
    /// Returns [`NativeImageError::InvalidInstallation`] when neither `gu` nor
    /// `gu.cmd` exists under `bin`.
    pub fn gu(&self) -> Result<Utf8PathBuf> {
        self.find_binary(GU)
            .ok_or_else(|| NativeImageError::InvalidInstallation {
                home: self.root.clone(),
                binary: GU,
            })
    }
}

impl fmt::Display for GraalVmHome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
