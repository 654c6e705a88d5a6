use stave_ports::storage::{SheetEntry, StorageError, StoragePort};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

const SHEET_EXTENSION: &str = "stave";

/// Sheet storage in one fixed directory; every sheet is a single
/// `<name>.stave` text file.
pub struct FsSheetStorage {
    base_dir: PathBuf,
}

impl FsSheetStorage {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn default_base_dir() -> Result<PathBuf, StorageError> {
        let base = dirs_next::data_dir()
            .ok_or_else(|| StorageError::Io("data dir not found".to_string()))?;
        Ok(base.join("stave").join("sheets"))
    }

    fn sheet_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.{SHEET_EXTENSION}"))
    }
}

impl Default for FsSheetStorage {
    fn default() -> Self {
        let base_dir = Self::default_base_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { base_dir }
    }
}

impl StoragePort for FsSheetStorage {
    fn list_sheets(&self) -> Result<Vec<SheetEntry>, StorageError> {
        let entries = match fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            // No directory yet means no sheets, not a failure.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        let mut sheets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::Io(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SHEET_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let size = entry
                .metadata()
                .map_err(|e| StorageError::Io(e.to_string()))?
                .len();
            sheets.push(SheetEntry {
                name: name.to_string(),
                size,
            });
        }
        sheets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sheets)
    }

    fn read_sheet(&self, name: &str) -> Result<String, StorageError> {
        let path = self.sheet_path(name);
        fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound(name.to_string())
            } else {
                StorageError::Io(e.to_string())
            }
        })
    }

    fn write_sheet(&self, name: &str, contents: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_dir).map_err(|e| StorageError::Io(e.to_string()))?;
        fs::write(self.sheet_path(name), contents).map_err(|e| StorageError::Io(e.to_string()))
    }
}
