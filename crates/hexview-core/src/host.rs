//! Host seams.
//!
//! The engine never talks to a platform directly. Everything outside the state machine sits
//! behind a small trait: [`Clipboard`], [`Virtualizer`], [`SettingsStorage`] and the cell
//! surface ([`CellSurface`]). A [`ViewerHost`] bundles one of each, and
//! [`execute`] maps an [`Effect`] onto it.
//!
//! In-memory implementations ship here for tests and headless use: [`MemoryClipboard`],
//! [`RecordingVirtualizer`], [`MemoryStorage`] and [`HeadlessHost`]. [`FileStorage`] keeps
//! the settings blob as a JSON file.

use crate::error::{ClipboardError, HostError, SettingsError};
use crate::layout::{ScrollAlign, ScrollRequest};
use crate::pipeline::Effect;
use crate::render::{CellSurface, HeadlessSurface};
use crate::settings::{SETTINGS_STORAGE_KEY, SettingsBlob};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// System clipboard.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Row virtualizer that owns the actual scroll position.
pub trait Virtualizer {
    /// Scroll so that `row` lands according to `align`.
    fn scroll_to_row(&mut self, row: usize, align: ScrollAlign);
}

/// Key/value storage for the settings blob.
pub trait SettingsStorage {
    /// Read the stored blob. `Ok(None)` when nothing was saved yet.
    fn load(&mut self) -> Result<Option<SettingsBlob>, SettingsError>;

    /// Replace the stored blob.
    fn save(&mut self, blob: &SettingsBlob) -> Result<(), SettingsError>;
}

/// Everything the viewer needs from its embedding.
pub trait ViewerHost {
    /// Clipboard.
    fn clipboard(&mut self) -> &mut dyn Clipboard;
    /// Virtualizer.
    fn virtualizer(&mut self) -> &mut dyn Virtualizer;
    /// Settings storage.
    fn storage(&mut self) -> &mut dyn SettingsStorage;
    /// Cell surface that receives highlight patches.
    fn surface(&mut self) -> &mut dyn CellSurface;

    /// Publish a location string (e.g. replace the page URL). Ignored by default.
    fn publish_location(&mut self, _location: &str) {}
}

/// Run one effect against `host`.
pub fn execute<H: ViewerHost + ?Sized>(effect: &Effect, host: &mut H) -> Result<(), HostError> {
    match effect {
        Effect::WriteClipboard(text) => host.clipboard().write_text(text)?,
        Effect::ScrollTo(ScrollRequest { row, align }) => {
            host.virtualizer().scroll_to_row(*row, *align)
        }
        Effect::SaveSettings(blob) => host.storage().save(blob)?,
        Effect::PublishLocation(location) => host.publish_location(location),
    }
    Ok(())
}

/// Clipboard kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
    writes: usize,
    unavailable: bool,
}

impl MemoryClipboard {
    /// A clipboard that rejects every write, like a page without clipboard permission.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Last text written.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::Unavailable);
        }
        self.text = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Virtualizer that records requests instead of scrolling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingVirtualizer {
    requests: Vec<ScrollRequest>,
}

impl RecordingVirtualizer {
    /// Requests received, oldest first.
    pub fn requests(&self) -> &[ScrollRequest] {
        &self.requests
    }

    /// Most recent request.
    pub fn last(&self) -> Option<ScrollRequest> {
        self.requests.last().copied()
    }
}

impl Virtualizer for RecordingVirtualizer {
    fn scroll_to_row(&mut self, row: usize, align: ScrollAlign) {
        self.requests.push(ScrollRequest { row, align });
    }
}

/// Storage backed by a string map, holding the blob as JSON under
/// [`SETTINGS_STORAGE_KEY`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    saves: usize,
}

impl MemoryStorage {
    /// Storage pre-filled with raw JSON.
    pub fn with_json(json: impl Into<String>) -> Self {
        let mut storage = Self::default();
        storage
            .values
            .insert(SETTINGS_STORAGE_KEY.to_string(), json.into());
        storage
    }

    /// The raw stored JSON.
    pub fn json(&self) -> Option<&str> {
        self.values.get(SETTINGS_STORAGE_KEY).map(String::as_str)
    }

    /// Number of saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SettingsStorage for MemoryStorage {
    fn load(&mut self) -> Result<Option<SettingsBlob>, SettingsError> {
        self.json().map(SettingsBlob::from_json).transpose()
    }

    fn save(&mut self, blob: &SettingsBlob) -> Result<(), SettingsError> {
        let json = blob.to_json()?;
        self.values.insert(SETTINGS_STORAGE_KEY.to_string(), json);
        self.saves += 1;
        Ok(())
    }
}

/// Storage in a JSON file. A missing file reads as "nothing saved".
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SettingsStorage for FileStorage {
    fn load(&mut self) -> Result<Option<SettingsBlob>, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => SettingsBlob::from_json(&json).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, blob: &SettingsBlob) -> Result<(), SettingsError> {
        let json = blob.to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }
}

/// Host assembled from the in-memory pieces.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    /// Clipboard.
    pub clipboard: MemoryClipboard,
    /// Virtualizer.
    pub virtualizer: RecordingVirtualizer,
    /// Storage.
    pub storage: MemoryStorage,
    /// Cell surface.
    pub surface: HeadlessSurface,
    /// Published locations, oldest first.
    pub locations: Vec<String>,
}

impl ViewerHost for HeadlessHost {
    fn clipboard(&mut self) -> &mut dyn Clipboard {
        &mut self.clipboard
    }

    fn virtualizer(&mut self) -> &mut dyn Virtualizer {
        &mut self.virtualizer
    }

    fn storage(&mut self) -> &mut dyn SettingsStorage {
        &mut self.storage
    }

    fn surface(&mut self) -> &mut dyn CellSurface {
        &mut self.surface
    }

    fn publish_location(&mut self, location: &str) {
        self.locations.push(location.to_string());
    }
}
