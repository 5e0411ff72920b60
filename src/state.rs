use crate::booking::{BookingError, Event};
use crate::config::Config;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const STATE_DIR: &str = ".bookboard";
const EVENTS_FILE: &str = "events.json";
const SUPPLIERS_FILE: &str = "suppliers.json";
const SERVICES_FILE: &str = "services.json";
// Maximum allowed size for state files (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
const MAX_ITEMS: usize = 100_000;

// Trait for items that can be persisted
pub trait Persistent: Sized + Serialize + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;
}

impl Persistent for Event {
    fn filename() -> &'static str {
        EVENTS_FILE
    }
}

/// Entry in the supplier master list
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SupplierEntry {
    pub name: String,
}

/// Entry in the service master list
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServiceEntry {
    pub name: String,
}

impl Persistent for SupplierEntry {
    fn filename() -> &'static str {
        SUPPLIERS_FILE
    }
}

impl Persistent for ServiceEntry {
    fn filename() -> &'static str {
        SERVICES_FILE
    }
}

/// Handle to the on-disk booking board.
///
/// Every operation loads and rewrites whole files; writes go through a temp
/// file and a rename so a batch is either fully stored or not at all.
#[derive(Debug, Clone)]
pub struct BoardStore {
    state_dir: PathBuf,
}

impl BoardStore {
    pub fn open(state_dir: impl Into<PathBuf>) -> Result<Self> {
        let state_dir = state_dir.into();
        std::fs::create_dir_all(&state_dir).with_context(|| {
            format!("Failed to create state directory {}", state_dir.display())
        })?;
        Ok(Self { state_dir })
    }

    /// Open the store named by the config, falling back to `~/.bookboard`.
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.storage.data_dir {
            Some(dir) => Self::open(dir),
            None => {
                let home_dir =
                    dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
                Self::open(home_dir.join(STATE_DIR))
            }
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn load<T: Persistent>(&self) -> Result<Vec<T>> {
        let path = self.state_dir.join(T::filename());
        if !path.exists() {
            return Ok(Vec::new());
        }

        let metadata = std::fs::metadata(&path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(anyhow!("{} exceeds the {} byte limit", T::filename(), MAX_FILE_SIZE));
        }

        let reader = BufReader::new(File::open(&path)?);
        let json_value: serde_json::Value = serde_json::from_reader(reader)
            .map_err(|e| anyhow!("Failed to parse {}: {}", T::filename(), e))?;

        if let Some(array) = json_value.as_array() {
            if array.len() > MAX_ITEMS {
                return Err(anyhow!("Too many items in {} (maximum {})", T::filename(), MAX_ITEMS));
            }
        }

        serde_json::from_value(json_value)
            .map_err(|e| anyhow!("Failed to deserialize {}: {}", T::filename(), e))
    }

    pub fn save<T: Persistent>(&self, items: &[T]) -> Result<()> {
        let path = self.state_dir.join(T::filename());
        let tmp_path = path.with_extension("json.tmp");

        let guard = scopeguard::guard(tmp_path.clone(), |tmp| {
            let _ = std::fs::remove_file(tmp);
        });

        let file = OpenOptions::new().write(true).create(true).truncate(true).open(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, items)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);

        std::fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        scopeguard::ScopeGuard::into_inner(guard);
        Ok(())
    }

    pub fn load_events(&self) -> Result<Vec<Event>> {
        self.load()
    }

    pub fn find_event(&self, event_id: &str) -> Result<Option<Event>> {
        Ok(self.load_events()?.into_iter().find(|e| e.event_id == event_id))
    }

    /// Append a batch in one write. Any id clash rejects the whole batch.
    pub fn append_events(&self, batch: &[Event]) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut events = self.load_events()?;
        let mut seen: HashSet<&str> = events.iter().map(|e| e.event_id.as_str()).collect();
        for event in batch {
            if !seen.insert(event.event_id.as_str()) {
                return Err(BookingError::DuplicateEventId(event.event_id.clone()).into());
            }
        }

        events.extend_from_slice(batch);
        self.save(&events)?;
        log::debug!("Appended {} events to {}", batch.len(), EVENTS_FILE);
        Ok(())
    }

    /// Replace the row with the same id (delete then re-insert) in one write.
    pub fn replace_event(&self, event: Event) -> Result<()> {
        let mut events = self.load_events()?;
        let before = events.len();
        events.retain(|e| e.event_id != event.event_id);
        if events.len() == before {
            return Err(BookingError::EventNotFound(event.event_id).into());
        }
        events.push(event);
        self.save(&events)
    }

    pub fn remove_event(&self, event_id: &str) -> Result<Event> {
        let mut events = self.load_events()?;
        let position = events
            .iter()
            .position(|e| e.event_id == event_id)
            .ok_or_else(|| BookingError::EventNotFound(event_id.to_string()))?;
        let removed = events.remove(position);
        self.save(&events)?;
        Ok(removed)
    }

    pub fn suppliers(&self) -> Result<Vec<String>> {
        Ok(self.load::<SupplierEntry>()?.into_iter().map(|s| s.name).collect())
    }

    pub fn services(&self) -> Result<Vec<String>> {
        Ok(self.load::<ServiceEntry>()?.into_iter().map(|s| s.name).collect())
    }

    /// Insert supplier names that are not yet listed. Returns how many were added.
    pub fn register_suppliers<'a, I>(&self, names: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut known: BTreeSet<String> = self.suppliers()?.into_iter().collect();
        let added = insert_names(&mut known, names);
        if added > 0 {
            let entries: Vec<SupplierEntry> =
                known.into_iter().map(|name| SupplierEntry { name }).collect();
            self.save(&entries)?;
        }
        Ok(added)
    }

    /// Insert service names that are not yet listed. Returns how many were added.
    pub fn register_services<'a, I>(&self, names: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut known: BTreeSet<String> = self.services()?.into_iter().collect();
        let added = insert_names(&mut known, names);
        if added > 0 {
            let entries: Vec<ServiceEntry> =
                known.into_iter().map(|name| ServiceEntry { name }).collect();
            self.save(&entries)?;
        }
        Ok(added)
    }
}

fn insert_names<'a>(known: &mut BTreeSet<String>, names: impl IntoIterator<Item = &'a String>) -> usize {
    names
        .into_iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| known.insert(name.to_string()))
        .count()
}
