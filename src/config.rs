use crate::output::FileNaming;
use crate::session::BatchPolicy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// One camera, files named `<counter>.jpg`
    Single,
    /// Several cameras, files named `camera_<index>_<counter>.jpg`
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BatchPolicyArg {
    /// Validate every camera's label before saving anything
    AllOrNothing,
    /// Save camera by camera, stopping at the first invalid label
    StopAtFirstInvalid,
}

impl From<BatchPolicyArg> for BatchPolicy {
    fn from(arg: BatchPolicyArg) -> Self {
        match arg {
            BatchPolicyArg::AllOrNothing => BatchPolicy::AllOrNothing,
            BatchPolicyArg::StopAtFirstInvalid => BatchPolicy::StopAtFirstInvalid,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Single- or multi-camera controller
    #[arg(long, value_enum, default_value_t = Mode::Single)]
    mode: Mode,

    /// Camera device indices (default: 0 for single, 0,1,2 for multi)
    #[arg(long, value_delimiter = ',')]
    cameras: Vec<u32>,

    /// What a capture does when one camera's label is invalid
    #[arg(long, value_enum, default_value_t = BatchPolicyArg::AllOrNothing)]
    batch_policy: BatchPolicyArg,

    /// Preview refresh period in milliseconds
    #[arg(long, default_value_t = 20)]
    preview_interval_ms: u64,

    /// Start with this save directory instead of choosing one
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub cameras: Vec<u32>,
    pub naming: FileNaming,
    pub batch_policy: BatchPolicy,
    pub preview_interval: Duration,
    pub output_dir: Option<PathBuf>,
    pub title: &'static str,
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        let (default_cameras, naming, title) = match args.mode {
            Mode::Single => (
                vec![0],
                FileNaming::Counter,
                "Camera Controller with Save Path",
            ),
            Mode::Multi => (
                vec![0, 1, 2],
                FileNaming::CameraPrefixed,
                "Multi-Camera Controller with Save Path",
            ),
        };

        let cameras = if args.cameras.is_empty() {
            default_cameras
        } else {
            dedup_cameras(&args.cameras)
        };

        Self {
            cameras,
            naming,
            batch_policy: args.batch_policy.into(),
            preview_interval: Duration::from_millis(args.preview_interval_ms.max(1)),
            output_dir: args.output_dir.clone(),
            title,
        }
    }
}

/// Keep the first occurrence of each index. Two slots on one device would
/// compute the same file names.
fn dedup_cameras(requested: &[u32]) -> Vec<u32> {
    let mut cameras = Vec::with_capacity(requested.len());
    for &index in requested {
        if cameras.contains(&index) {
            tracing::warn!("Camera {} listed more than once, ignoring the repeat", index);
        } else {
            cameras.push(index);
        }
    }
    cameras
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(argv: &[&str]) -> AppConfig {
        let argv = std::iter::once("expression-capture").chain(argv.iter().copied());
        let args = Args::try_parse_from(argv).unwrap();
        AppConfig::from(&args)
    }

    #[test]
    fn single_mode_defaults() {
        let config = config(&[]);
        assert_eq!(config.cameras, vec![0]);
        assert_eq!(config.naming, FileNaming::Counter);
        assert_eq!(config.batch_policy, BatchPolicy::AllOrNothing);
        assert_eq!(config.preview_interval, Duration::from_millis(20));
        assert_eq!(config.output_dir, None);
    }

    #[test]
    fn multi_mode_opens_three_cameras() {
        let config = config(&["--mode", "multi"]);
        assert_eq!(config.cameras, vec![0, 1, 2]);
        assert_eq!(config.naming, FileNaming::CameraPrefixed);
    }

    #[test]
    fn explicit_cameras_and_policy() {
        let config = config(&[
            "--mode",
            "multi",
            "--cameras",
            "2,4",
            "--batch-policy",
            "stop-at-first-invalid",
            "--output-dir",
            "/tmp/out",
        ]);
        assert_eq!(config.cameras, vec![2, 4]);
        assert_eq!(config.batch_policy, BatchPolicy::StopAtFirstInvalid);
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn repeated_cameras_open_once() {
        let config = config(&["--mode", "multi", "--cameras", "0,0,1,0,2,1"]);
        assert_eq!(config.cameras, vec![0, 1, 2]);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Args::try_parse_from(["expression-capture", "--mode", "dual"]).is_err());
    }
}
