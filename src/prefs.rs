use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Upgrades;
use crate::error::PrefsError;

const APP_DIR_NAME: &str = "grid-snake";
const PREFS_FILE_NAME: &str = "prefs.json";

pub const KEY_HIGH_SCORE: &str = "highscore";
pub const KEY_ATTEMPTS: &str = "attempts";
pub const KEY_DOUBLE_FRUIT: &str = "dupgrade";
pub const KEY_EXTENDED_TIMER: &str = "eupgrade";
pub const KEY_WRAP_WALLS: &str = "wupgrade";

/// Integer key-value persistence supplied by the host.
pub trait PreferenceStore {
    fn get_int(&self, key: &str, default: i32) -> i32;

    fn set_int(&mut self, key: &str, value: i32) -> Result<(), PrefsError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        (**self).get_int(key, default)
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<(), PrefsError> {
        (**self).set_int(key, value)
    }
}

/// Volatile store, handy for tests and `--no-save` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, i32>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<(), PrefsError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    values: BTreeMap<String, i32>,
}

/// JSON file store; every write rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    file: PrefsFile,
}

impl JsonPreferenceStore {
    /// Opens the store at the platform-correct location.
    pub fn open_default() -> Result<Self, PrefsError> {
        Self::open(prefs_path())
    }

    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: PathBuf) -> Result<Self, PrefsError> {
        let file = load_prefs_from_path(&path)?;
        Ok(Self { path, file })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.file.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<(), PrefsError> {
        self.file.values.insert(key.to_owned(), value);
        save_prefs_to_path(&self.path, &self.file)
    }
}

/// Returns the platform-correct preference file path.
#[must_use]
pub fn prefs_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(PREFS_FILE_NAME);
    base
}

fn load_prefs_from_path(path: &Path) -> Result<PrefsFile, PrefsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(PrefsFile::default()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&raw)?)
}

fn save_prefs_to_path(path: &Path, file: &PrefsFile) -> Result<(), PrefsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(file)?;
    fs::write(path, json)?;
    Ok(())
}

/// Player profile views over a preference store: high score, attempt
/// counter, and upgrade flags.
pub struct Profile<S> {
    store: S,
}

impl<S: PreferenceStore> Profile<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        u32::try_from(self.store.get_int(KEY_HIGH_SCORE, 0)).unwrap_or(0)
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        u32::try_from(self.store.get_int(KEY_ATTEMPTS, 0)).unwrap_or(0)
    }

    /// Upgrade flags, stored as 0/1 integers.
    #[must_use]
    pub fn upgrades(&self) -> Upgrades {
        Upgrades {
            double_fruit: self.store.get_int(KEY_DOUBLE_FRUIT, 0) != 0,
            extended_timer: self.store.get_int(KEY_EXTENDED_TIMER, 0) != 0,
            wrap_walls: self.store.get_int(KEY_WRAP_WALLS, 0) != 0,
        }
    }

    pub fn set_upgrades(&mut self, upgrades: Upgrades) -> Result<(), PrefsError> {
        self.store
            .set_int(KEY_DOUBLE_FRUIT, i32::from(upgrades.double_fruit))?;
        self.store
            .set_int(KEY_EXTENDED_TIMER, i32::from(upgrades.extended_timer))?;
        self.store
            .set_int(KEY_WRAP_WALLS, i32::from(upgrades.wrap_walls))
    }

    /// Counts a new round and returns its number.
    pub fn begin_attempt(&mut self) -> Result<u32, PrefsError> {
        let attempt = self.attempts().saturating_add(1);
        self.store
            .set_int(KEY_ATTEMPTS, i32::try_from(attempt).unwrap_or(i32::MAX))?;
        Ok(attempt)
    }

    /// Stores `score` when it beats the high score. Returns true if it did.
    pub fn record_game_over(&mut self, score: u32) -> Result<bool, PrefsError> {
        if score <= self.high_score() {
            return Ok(false);
        }

        log::info!("new high score {score}");
        self.store
            .set_int(KEY_HIGH_SCORE, i32::try_from(score).unwrap_or(i32::MAX))?;
        Ok(true)
    }
}
