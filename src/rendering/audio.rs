//! # Audio
//!
//! Plays the session's sound cues through macroquad. Missing sound files are
//! skipped and the game runs the same without them.

use crate::game::SoundCue;
use crate::generation::{AssetCatalog, DirectoryCatalog};
use log::{debug, warn};
use macroquad::audio::{load_sound, play_sound, play_sound_once, stop_sound, PlaySoundParams, Sound};
use std::collections::HashMap;

/// Looping background music file.
pub const MUSIC_FILE: &str = "bgm.ogg";

/// File played for a cue. Walk start and stop share the looping walk sound.
pub fn cue_file(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::WalkStart | SoundCue::WalkStop => "walk.wav",
        SoundCue::Hit => "hit.wav",
        SoundCue::LevelUp => "level.wav",
    }
}

/// Loaded sounds keyed by file name.
pub struct AudioSink {
    sounds: HashMap<&'static str, Sound>,
}

impl AudioSink {
    /// Loads every sound file that exists in the asset directory.
    pub async fn load(catalog: &DirectoryCatalog) -> Self {
        let mut sounds = HashMap::new();
        let files = [
            cue_file(SoundCue::WalkStart),
            cue_file(SoundCue::Hit),
            cue_file(SoundCue::LevelUp),
            MUSIC_FILE,
        ];

        for file in files {
            if !catalog.contains(file) {
                debug!("Sound {} not found, skipping", file);
                continue;
            }
            let path = catalog.path_of(file);
            match load_sound(&path.to_string_lossy()).await {
                Ok(sound) => {
                    sounds.insert(file, sound);
                }
                Err(e) => warn!("Failed to load sound {}: {}", file, e),
            }
        }

        Self { sounds }
    }

    pub fn start_music(&self) {
        if let Some(music) = self.sounds.get(MUSIC_FILE) {
            play_sound(
                music,
                PlaySoundParams {
                    looped: true,
                    volume: 0.4,
                },
            );
        }
    }

    pub fn play(&self, cue: SoundCue) {
        let Some(sound) = self.sounds.get(cue_file(cue)) else {
            return;
        };

        match cue {
            SoundCue::WalkStart => play_sound(
                sound,
                PlaySoundParams {
                    looped: true,
                    volume: 0.5,
                },
            ),
            SoundCue::WalkStop => stop_sound(sound),
            SoundCue::Hit | SoundCue::LevelUp => play_sound_once(sound),
        }
    }
}
