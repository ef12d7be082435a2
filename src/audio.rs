//! Audio collaborator contract
//!
//! The scene starts one looping ambient track when it is built and never
//! polls playback afterwards. Failure leaves the game silent, nothing more.

use serde::{Deserialize, Serialize};

use crate::error::AquariumError;

/// Handle to a loaded sound, issued by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundHandle(pub u32);

/// Whatever actually plays sound
pub trait AudioBackend {
    fn load(&mut self, path: &str) -> Result<SoundHandle, AquariumError>;
    fn set_loop(&mut self, sound: SoundHandle, looping: bool);
    /// Volume (0.0 - 1.0)
    fn set_volume(&mut self, sound: SoundHandle, volume: f32);
    fn play(&mut self, sound: SoundHandle);
}

/// Ambient track configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientSound {
    pub path: String,
    pub volume: f32,
    pub looping: bool,
}

impl Default for AmbientSound {
    fn default() -> Self {
        Self {
            path: "sounds/underwater_loop.mp3".to_string(),
            volume: 0.5,
            looping: true,
        }
    }
}

/// Load and start the ambient track. Returns the handle when playing.
pub fn start_ambient(backend: &mut dyn AudioBackend, ambient: &AmbientSound) -> Option<SoundHandle> {
    match backend.load(&ambient.path) {
        Ok(sound) => {
            backend.set_loop(sound, ambient.looping);
            backend.set_volume(sound, ambient.volume.clamp(0.0, 1.0));
            backend.play(sound);
            Some(sound)
        }
        Err(err) => {
            log::error!("Failed to load ambient sound: {}", err);
            None
        }
    }
}

/// Backend for headless runs: accepts everything, plays nothing
#[derive(Debug, Default)]
pub struct SilentAudio {
    loaded: u32,
}

impl AudioBackend for SilentAudio {
    fn load(&mut self, path: &str) -> Result<SoundHandle, AquariumError> {
        self.loaded += 1;
        log::debug!("Silent audio: pretending to load {}", path);
        Ok(SoundHandle(self.loaded))
    }

    fn set_loop(&mut self, _sound: SoundHandle, _looping: bool) {}

    fn set_volume(&mut self, _sound: SoundHandle, _volume: f32) {}

    fn play(&mut self, _sound: SoundHandle) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingAudio {
        fail: bool,
        calls: Vec<String>,
    }

    impl AudioBackend for RecordingAudio {
        fn load(&mut self, path: &str) -> Result<SoundHandle, AquariumError> {
            self.calls.push(format!("load {path}"));
            if self.fail {
                return Err(AquariumError::Audio {
                    path: path.to_string(),
                    reason: "missing file".to_string(),
                });
            }
            Ok(SoundHandle(7))
        }
        fn set_loop(&mut self, _sound: SoundHandle, looping: bool) {
            self.calls.push(format!("loop {looping}"));
        }
        fn set_volume(&mut self, _sound: SoundHandle, volume: f32) {
            self.calls.push(format!("volume {volume}"));
        }
        fn play(&mut self, _sound: SoundHandle) {
            self.calls.push("play".to_string());
        }
    }

    #[test]
    fn test_ambient_starts_looping() {
        let mut audio = RecordingAudio::default();
        let handle = start_ambient(&mut audio, &AmbientSound::default());
        assert_eq!(handle, Some(SoundHandle(7)));
        assert_eq!(
            audio.calls,
            [
                "load sounds/underwater_loop.mp3",
                "loop true",
                "volume 0.5",
                "play"
            ]
        );
    }

    #[test]
    fn test_ambient_failure_stays_silent() {
        let mut audio = RecordingAudio {
            fail: true,
            ..Default::default()
        };
        assert_eq!(start_ambient(&mut audio, &AmbientSound::default()), None);
        assert_eq!(audio.calls.len(), 1);
    }
}
