// Tue Jan 13 2026 - Alex

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reflection snapshot (JSON).
    pub snapshot: PathBuf,
    /// Target policy (JSON); built-in defaults when absent.
    pub policy: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Module image mapped over the snapshot memory for virtual table probing.
    pub image: Option<PathBuf>,
    pub image_base: Option<u64>,
    pub max_threads: usize,
    pub enable_progress_bars: bool,
    pub enable_verbose_output: bool,
    pub write_manifest: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::new(),
            policy: None,
            output_dir: PathBuf::from("sdk_out"),
            image: None,
            image_base: None,
            max_threads: num_cpus::get(),
            enable_progress_bars: true,
            enable_verbose_output: false,
            write_manifest: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
        serde_json::from_str(&content).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
    }

    pub fn with_snapshot(mut self, snapshot: PathBuf) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn with_policy(mut self, policy: PathBuf) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_output_dir(mut self, output: PathBuf) -> Self {
        self.output_dir = output;
        self
    }

    pub fn with_image(mut self, image: PathBuf, base: Option<u64>) -> Self {
        self.image = Some(image);
        self.image_base = base;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.max_threads = threads;
        self
    }

    pub fn with_progress_bars(mut self, enabled: bool) -> Self {
        self.enable_progress_bars = enabled;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.enable_verbose_output = verbose;
        self
    }

    pub fn with_manifest(mut self, enabled: bool) -> Self {
        self.write_manifest = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.snapshot.as_os_str().is_empty() {
            return Err("snapshot must be set".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("output_dir must not be empty".to_string());
        }
        if self.max_threads == 0 {
            return Err("max_threads must be greater than 0".to_string());
        }
        if self.image_base.is_some() && self.image.is_none() {
            return Err("image_base requires image".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_needs_snapshot() {
        let config = Config::default();
        assert!(config.max_threads > 0);
        assert!(config.write_manifest);
        assert!(config.validate().is_err());
        assert!(config.with_snapshot(PathBuf::from("objects.json")).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = Config::new().with_snapshot(PathBuf::from("objects.json"));
        assert!(base.clone().with_threads(0).validate().is_err());
        assert!(base.clone().with_output_dir(PathBuf::new()).validate().is_err());

        let mut orphan_base = base.clone();
        orphan_base.image_base = Some(0x140000000);
        assert!(orphan_base.validate().is_err());
        assert!(base.with_image(PathBuf::from("game.exe"), Some(0x140000000)).validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"snapshot": "dump.json", "write_manifest": false}"#).unwrap();
        assert_eq!(config.snapshot, PathBuf::from("dump.json"));
        assert!(!config.write_manifest);
        assert_eq!(config.output_dir, PathBuf::from("sdk_out"));
        assert!(config.policy.is_none());
    }
}
