//! Input management system
//!
//! Raw key events arrive from the platform layer through
//! [`InputManager::handle_key_input`]. Game code only ever asks about named
//! actions (`"jump"`, `"move_left"`), which are bound to keys by configuration.
//!
//! Each action moves through four states per frame:
//!
//! ```text
//! Inactive -> PressedThisFrame -> HeldDown -> ReleasedThisFrame -> Inactive
//! ```
//!
//! [`InputManager::update`] advances the edge states and must run once at the
//! start of every frame, before new events are fed in.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Per-frame state of a named action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    /// Not held
    #[default]
    Inactive,
    /// Went down this frame
    PressedThisFrame,
    /// Held since an earlier frame
    HeldDown,
    /// Went up this frame
    ReleasedThisFrame,
}

impl ActionState {
    /// True while the action is held, including the frame it went down
    pub const fn is_down(self) -> bool {
        matches!(self, Self::PressedThisFrame | Self::HeldDown)
    }
}

/// Input manager
#[derive(Debug, Default)]
pub struct InputManager {
    key_bindings: HashMap<KeyCode, Vec<String>>,
    action_states: HashMap<String, ActionState>,
    held_keys: HashSet<KeyCode>,
    quit_requested: bool,
}

impl InputManager {
    /// Create an input manager with no bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input manager from action-to-key-name mappings.
    ///
    /// Unknown key names are logged and skipped so a typo in a config file
    /// does not prevent the game from starting.
    pub fn from_mappings(mappings: &BTreeMap<String, Vec<String>>) -> Self {
        let mut manager = Self::new();
        for (action, keys) in mappings {
            for key_name in keys {
                match key_name.parse::<KeyCode>() {
                    Ok(key) => manager.bind(action, key),
                    Err(err) => log::warn!("Skipping binding for action '{action}': {err}"),
                }
            }
        }
        log::debug!("Input manager created with {} actions", manager.action_states.len());
        manager
    }

    /// Bind a key to an action. A key may drive several actions.
    pub fn bind(&mut self, action: &str, key: KeyCode) {
        let actions = self.key_bindings.entry(key).or_default();
        if !actions.iter().any(|existing| existing == action) {
            actions.push(action.to_string());
        }
        self.action_states.entry(action.to_string()).or_default();
    }

    /// Update the input manager: advance edge states from the previous frame
    pub fn update(&mut self) {
        for state in self.action_states.values_mut() {
            *state = match *state {
                ActionState::PressedThisFrame => ActionState::HeldDown,
                ActionState::ReleasedThisFrame => ActionState::Inactive,
                other => other,
            };
        }
    }

    /// Handle key input from the platform layer.
    ///
    /// An action bound to several keys stays down until the last of its
    /// held keys goes up.
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.held_keys.insert(key);
        } else {
            self.held_keys.remove(&key);
        }
        let Some(actions) = self.key_bindings.get(&key) else {
            return;
        };
        for action in actions.clone() {
            if !pressed && self.is_held_by_other_key(&action) {
                continue;
            }
            self.set_action(&action, pressed);
        }
    }

    fn is_held_by_other_key(&self, action: &str) -> bool {
        self.held_keys.iter().any(|held| {
            self.key_bindings
                .get(held)
                .is_some_and(|actions| actions.iter().any(|bound| bound == action))
        })
    }

    /// Drive an action directly, bypassing key bindings.
    ///
    /// Scripted input and replays use this; unbound actions are created on
    /// first use.
    pub fn set_action(&mut self, action: &str, active: bool) {
        let state = self.action_states.entry(action.to_string()).or_default();
        *state = match (*state, active) {
            (ActionState::Inactive | ActionState::ReleasedThisFrame, true) => {
                ActionState::PressedThisFrame
            }
            (ActionState::PressedThisFrame | ActionState::HeldDown, false) => {
                ActionState::ReleasedThisFrame
            }
            (current, _) => current,
        };
    }

    /// Release every action, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held_keys.clear();
        for state in self.action_states.values_mut() {
            if state.is_down() {
                *state = ActionState::ReleasedThisFrame;
            }
        }
    }

    /// Current state of an action; unknown actions are inactive
    pub fn action_state(&self, action: &str) -> ActionState {
        self.action_states.get(action).copied().unwrap_or_default()
    }

    /// True while the action is held
    pub fn is_action_down(&self, action: &str) -> bool {
        self.action_state(action).is_down()
    }

    /// True only on the frame the action went down
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.action_state(action) == ActionState::PressedThisFrame
    }

    /// True only on the frame the action went up
    pub fn is_action_released(&self, action: &str) -> bool {
        self.action_state(action) == ActionState::ReleasedThisFrame
    }

    /// Ask the main loop to stop after the current frame
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Whether a quit was requested
    pub const fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

macro_rules! key_codes {
    ($($(#[$doc:meta])* $variant:ident => $name:literal),+ $(,)?) => {
        /// Key codes
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum KeyCode {
            $($(#[$doc])* $variant,)+
        }

        impl KeyCode {
            /// Configuration name of the key
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for KeyCode {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    other => Err(ConfigError::InvalidValue {
                        key: "input_mappings".to_string(),
                        reason: format!("unknown key name '{other}'"),
                    }),
                }
            }
        }
    };
}

key_codes! {
    /// A key
    A => "A",
    /// B key
    B => "B",
    /// C key
    C => "C",
    /// D key
    D => "D",
    /// E key
    E => "E",
    /// F key
    F => "F",
    /// G key
    G => "G",
    /// H key
    H => "H",
    /// I key
    I => "I",
    /// J key
    J => "J",
    /// K key
    K => "K",
    /// L key
    L => "L",
    /// M key
    M => "M",
    /// N key
    N => "N",
    /// O key
    O => "O",
    /// P key
    P => "P",
    /// Q key
    Q => "Q",
    /// R key
    R => "R",
    /// S key
    S => "S",
    /// T key
    T => "T",
    /// U key
    U => "U",
    /// V key
    V => "V",
    /// W key
    W => "W",
    /// X key
    X => "X",
    /// Y key
    Y => "Y",
    /// Z key
    Z => "Z",
    /// Space key
    Space => "Space",
    /// Enter key
    Enter => "Enter",
    /// Escape key
    Escape => "Escape",
    /// Up arrow
    Up => "Up",
    /// Down arrow
    Down => "Down",
    /// Left arrow
    Left => "Left",
    /// Right arrow
    Right => "Right",
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
