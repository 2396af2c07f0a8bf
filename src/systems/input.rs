//! Input systems
//!
//! Both systems translate raw device state into components, so the rest
//! of the game reads input purely through the store: one `KeyPress`
//! entity per held key, one `GamepadButtonPress` entity per held
//! (pad, button). The `handled` latch lets a consumer eat a press so it
//! does not retrigger while the key stays down; releasing and pressing
//! again mints a fresh component with the latch cleared.

use crate::ecs::{
    ComponentStore, EntityId, GamepadButtonPress, KeyPress, PadButton, PhaseControl, System,
};
use macroquad::prelude::{is_key_down, KeyCode};
use std::collections::HashSet;

/// The keys the game reacts to. Polling a fixed set keeps the store
/// free of components for keys nothing reads.
const TRACKED_KEYS: [KeyCode; 9] = [
    KeyCode::A,
    KeyCode::D,
    KeyCode::W,
    KeyCode::S,
    KeyCode::Space,
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key5,
    KeyCode::Q,
];

/// Keys currently held and not yet consumed.
pub fn keys_down(store: &ComponentStore) -> HashSet<KeyCode> {
    store
        .key_presses
        .iter()
        .filter(|(_, press)| !press.handled)
        .map(|(_, press)| press.key)
        .collect()
}

/// Buttons currently held on one pad and not yet consumed.
pub fn buttons_down(store: &ComponentStore, pad: usize) -> HashSet<PadButton> {
    store
        .gamepad_buttons
        .iter()
        .filter(|(_, press)| !press.handled && press.pad == pad)
        .map(|(_, press)| press.button)
        .collect()
}

/// The unconsumed press component for a key, if the key is held. The
/// caller may set `handled` to eat the press.
pub fn unhandled_key(store: &mut ComponentStore, key: KeyCode) -> Option<&mut KeyPress> {
    store
        .key_presses
        .iter_mut()
        .map(|(_, press)| press)
        .find(|press| press.key == key && !press.handled)
}

/// Polls macroquad's keyboard state and mirrors it into the store.
pub struct KeyboardInputSystem;

impl KeyboardInputSystem {
    pub fn new() -> Self {
        Self
    }

    fn held_entity(store: &ComponentStore, key: KeyCode) -> Option<EntityId> {
        store
            .key_presses
            .iter()
            .find(|(_, press)| press.key == key)
            .map(|(entity, _)| entity)
    }
}

impl System for KeyboardInputSystem {
    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        for key in TRACKED_KEYS {
            let existing = Self::held_entity(store, key);
            if is_key_down(key) {
                if existing.is_none() {
                    let entity = store.create_entity();
                    store.key_presses.insert(
                        entity,
                        KeyPress {
                            key,
                            handled: false,
                        },
                    );
                }
            } else if let Some(entity) = existing {
                store.remove_entity(entity);
            }
        }
    }
}

/// Polls gilrs and mirrors pad state into the store. Stick deflection
/// past +-0.5 counts as the matching direction button, so gameplay only
/// ever deals in logical buttons.
#[cfg(not(target_arch = "wasm32"))]
pub struct GamepadInputSystem {
    gilrs: Option<gilrs::Gilrs>,
}

#[cfg(not(target_arch = "wasm32"))]
impl GamepadInputSystem {
    pub fn new() -> Self {
        let gilrs = match gilrs::Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(err) => {
                println!("Gamepad support unavailable: {}", err);
                None
            }
        };
        Self { gilrs }
    }

    fn sync_button(store: &mut ComponentStore, pad: usize, button: PadButton, down: bool) {
        let existing = store
            .gamepad_buttons
            .iter()
            .find(|(_, press)| press.pad == pad && press.button == button)
            .map(|(entity, _)| entity);

        if down {
            if existing.is_none() {
                let entity = store.create_entity();
                store.gamepad_buttons.insert(
                    entity,
                    GamepadButtonPress {
                        pad,
                        button,
                        handled: false,
                    },
                );
            }
        } else if let Some(entity) = existing {
            store.remove_entity(entity);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl System for GamepadInputSystem {
    fn update(&mut self, store: &mut ComponentStore, _phases: &mut PhaseControl, _frame: u64) {
        use gilrs::{Axis, Button};

        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };
        // Drain the event queue so cached gamepad state is current.
        while gilrs.next_event().is_some() {}

        let mut states: Vec<(usize, PadButton, bool)> = Vec::new();
        for (pad, (_id, gamepad)) in gilrs.gamepads().enumerate() {
            let x = gamepad.value(Axis::LeftStickX);
            let y = gamepad.value(Axis::LeftStickY);
            states.push((
                pad,
                PadButton::Left,
                x < -0.5 || gamepad.is_pressed(Button::DPadLeft),
            ));
            states.push((
                pad,
                PadButton::Right,
                x > 0.5 || gamepad.is_pressed(Button::DPadRight),
            ));
            states.push((
                pad,
                PadButton::Up,
                y > 0.5 || gamepad.is_pressed(Button::DPadUp),
            ));
            states.push((
                pad,
                PadButton::Down,
                y < -0.5 || gamepad.is_pressed(Button::DPadDown),
            ));
            states.push((pad, PadButton::Fire, gamepad.is_pressed(Button::South)));
        }

        for (pad, button, down) in states {
            Self::sync_button(store, pad, button, down);
        }
    }
}
