use super::{ensure_non_empty, FrameSource, PhotoId, PhotoLocation};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Still-capture settings.
///
/// `command` is the program and its arguments; the literal `{path}` in any
/// argument is replaced with the destination file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub photo_dir: PathBuf,
    pub command: Vec<String>,
    pub extension: String,
    pub id_prefix: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            photo_dir: PathBuf::from("photos"),
            command: [
                "raspistill", "-n", "-t", "1", "-w", "640", "-h", "480", "-o", "{path}",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            extension: "jpg".to_string(),
            id_prefix: "ph".to_string(),
        }
    }
}

/// Captures by running an external still-capture command.
#[derive(Debug)]
pub struct CommandCamera {
    config: CameraConfig,
    counter: u64,
}

impl CommandCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self { config, counter: 0 }
    }

    fn next_id(&mut self) -> PhotoId {
        self.counter += 1;
        PhotoId(format!("{}{:06}", self.config.id_prefix, self.counter))
    }
}

impl FrameSource for CommandCamera {
    fn make_photo(&mut self) -> Option<PhotoId> {
        let id = self.next_id();
        let (program, args) = match self.config.command.split_first() {
            Some(parts) => parts,
            None => {
                warn!("camera command is empty");
                return None;
            }
        };
        if let Err(e) = fs::create_dir_all(&self.config.photo_dir) {
            warn!(
                "cannot create photo dir {}: {e}",
                self.config.photo_dir.display()
            );
            return None;
        }

        let target = self.get_path(&id).path();
        let target_str = target.to_string_lossy();
        let args: Vec<String> = args
            .iter()
            .map(|a| a.replace("{path}", &target_str))
            .collect();

        debug!("capture {program} {}", args.join(" "));
        let status = match Command::new(program).args(&args).status() {
            Ok(status) => status,
            Err(e) => {
                warn!("failed to run {program}: {e}");
                return None;
            }
        };
        if !status.success() {
            warn!("{program} exited with {status}");
            return None;
        }
        if let Err(e) = ensure_non_empty(&target) {
            warn!("{e}");
            return None;
        }
        Some(id)
    }

    fn get_path(&self, id: &PhotoId) -> PhotoLocation {
        PhotoLocation::new(
            self.config.photo_dir.clone(),
            format!("{}.{}", id.as_str(), self.config.extension),
        )
    }
}
