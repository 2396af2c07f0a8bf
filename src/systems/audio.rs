//! Audio playback
//!
//! Drains `PlaySoundEffect` requests every tick, fire-and-forget. The
//! clip lookup is memoized on first use from the `SoundEffect`
//! components the asset loader parked in the store. A request for a
//! clip that failed to load is silently dropped.

use crate::ecs::{ComponentKind, ComponentStore, PhaseControl, SoundId, System};
use macroquad::audio::{play_sound_once, Sound};
use std::collections::HashMap;

pub struct AudioSystem {
    clips: Option<HashMap<SoundId, Sound>>,
}

impl AudioSystem {
    pub fn new() -> Self {
        Self { clips: None }
    }

    fn clips<'a>(&'a mut self, store: &ComponentStore) -> &'a HashMap<SoundId, Sound> {
        self.clips.get_or_insert_with(|| {
            store
                .sound_effects
                .iter()
                .map(|(_, effect)| (effect.id, effect.sound.clone()))
                .collect()
        })
    }
}

impl System for AudioSystem {
    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        let requests: Vec<SoundId> = store
            .sound_requests
            .iter()
            .map(|(_, request)| request.sound)
            .collect();

        if !requests.is_empty() {
            let clips = self.clips(store);
            for sound_id in requests {
                if let Some(sound) = clips.get(&sound_id) {
                    play_sound_once(sound);
                }
            }
        }

        store.remove_all_instances(ComponentKind::PlaySoundEffect);
    }
}
