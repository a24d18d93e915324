//! Shared helpers for working with `figment::Jail` in tests.
//!
//! A jail gives each test its own working directory and a restorable
//! environment, which is exactly what configuration-layering tests need. The
//! helpers here write the requested files and variables before running the
//! test body and convert failures into `anyhow::Error`.

use anyhow::{Result, anyhow};

/// Files and environment variables to install in a jail before the test body
/// runs.
#[derive(Clone, Debug, Default)]
pub struct JailSetup<'a> {
    files: Vec<(&'a str, &'a str)>,
    env: Vec<(&'a str, &'a str)>,
}

impl<'a> JailSetup<'a> {
    /// An empty setup.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Write `contents` to `name`, relative to the jail directory.
    #[must_use]
    pub fn file(mut self, name: &'a str, contents: &'a str) -> Self {
        self.files.push((name, contents));
        self
    }

    /// Set the environment variable `key` for the duration of the jail.
    #[must_use]
    pub fn env(mut self, key: &'a str, value: &'a str) -> Self {
        self.env.push((key, value));
        self
    }
}

/// Executes `f` inside a [`figment::Jail`] prepared from `setup`, returning
/// the closure's output.
///
/// The jail restores the working directory and environment once the closure
/// completes, even when it fails.
///
/// # Errors
///
/// Returns an error if a file cannot be written or the closure fails.
pub fn with_jail<F, T>(setup: &JailSetup<'_>, f: F) -> Result<T>
where
    F: FnOnce(&figment::Jail) -> Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        for (name, contents) in &setup.files {
            jail.create_file(name, contents)?;
        }
        for (key, value) in &setup.env {
            jail.set_env(key, value);
        }
        output = Some(f(jail).map_err(|err| figment::Error::from(err.to_string()))?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}
