//! Reading and replacing the persisted configuration store.
//!
//! The store is a small `KEY=value` file (see
//! [`witness_config_core::format`]) read by the bot runtime, by default
//! `.env` in the working directory.
//!
//! # Write sequence
//!
//! ```text
//! store exists?  ── yes ──►  copy to <name>.backup.<YYYYMMDD_HHMMSS>[.<n>]
//!      │                               (create-new, never overwrites)
//!      ▼
//! render record ──► <name>.tmp ──► fsync ──► chmod 600 ──► rename over <name>
//! ```
//!
//! The rename is the commit point: an interrupted run leaves either the old
//! store or the new one, never a half-written file.
//!
//! Two writes inside the same wall-clock second would want the same backup
//! name; the second one gets a `.1` suffix (then `.2`, ...).  The store is
//! not locked: a bot runtime reading it during a reconfiguration may see
//! either version.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, info, warn};
use witness_config_core::{format, ConfigurationRecord, PartialConfigurationRecord};

/// Default store file name, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = ".env";

/// Timestamp layout embedded in backup names.
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Upper bound on same-second collision suffixes before giving up.
const MAX_BACKUP_ATTEMPTS: u32 = 1000;

/// Error type for store file operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What a successful [`ConfigStore::write`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// The store that now holds the new record.
    pub path: PathBuf,
    /// Where the previous store was copied, if there was one.
    pub backup: Option<PathBuf>,
}

/// The configuration store at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the raw values of the existing store, if there is one.
    ///
    /// Nothing is validated; unknown keys and comments are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for read failures other than "not found",
    /// including a file that is not valid UTF-8.
    pub fn load_existing(&self) -> Result<Option<PartialConfigurationRecord>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let partial = format::parse(&content);
                debug!(path = %self.path.display(), ?partial, "loaded existing configuration");
                Ok(Some(partial))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no existing configuration");
                Ok(None)
            }
            Err(e) => Err(StoreError::io(&self.path)(e)),
        }
    }

    /// Backs up the current store (if any) and replaces it with `record`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the backup, the temporary file, or the
    /// final rename fails.  When the backup fails the store is untouched.
    pub fn write(&self, record: &ConfigurationRecord) -> Result<WriteReport, StoreError> {
        self.write_at(record, Local::now().naive_local())
    }

    /// [`ConfigStore::write`] with an explicit clock reading for the backup name.
    pub fn write_at(
        &self,
        record: &ConfigurationRecord,
        now: NaiveDateTime,
    ) -> Result<WriteReport, StoreError> {
        if let Some(dir) = self.parent_dir() {
            fs::create_dir_all(dir).map_err(StoreError::io(dir))?;
        }

        let backup = self.backup(now)?;
        if let Some(backup) = &backup {
            info!(backup = %backup.display(), "previous configuration backed up");
        }

        replace_private(&self.path, format::render(record).as_bytes())?;

        info!(path = %self.path.display(), "configuration written");
        Ok(WriteReport {
            path: self.path.clone(),
            backup,
        })
    }

    /// Copies the current store to a fresh, timestamped backup file.
    fn backup(&self, now: NaiveDateTime) -> Result<Option<PathBuf>, StoreError> {
        let mut source = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path)(e)),
        };

        for attempt in 0..MAX_BACKUP_ATTEMPTS {
            let candidate = backup_path(&self.path, now, attempt);
            let mut target = match create_private(&candidate) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(candidate = %candidate.display(), "backup name taken, trying next");
                    continue;
                }
                Err(e) => return Err(StoreError::io(&candidate)(e)),
            };
            let copied = io::copy(&mut source, &mut target).and_then(|_| target.sync_all());
            if let Err(e) = copied {
                // A partial backup must not hold the reserved name.
                discard(&candidate);
                return Err(StoreError::io(&candidate)(e));
            }
            return Ok(Some(candidate));
        }

        Err(StoreError::Io {
            path: backup_path(&self.path, now, 0),
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                "no free backup name for this timestamp",
            ),
        })
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

/// Backup file name for `store` at `now`; `attempt > 0` adds a `.N` suffix.
///
/// `.env` at 2024-03-01 12:00:05 → `.env.backup.20240301_120005`.
pub fn backup_path(store: &Path, now: NaiveDateTime, attempt: u32) -> PathBuf {
    let stamp = now.format(BACKUP_TIMESTAMP_FORMAT);
    let suffix = if attempt == 0 {
        format!(".backup.{stamp}")
    } else {
        format!(".backup.{stamp}.{attempt}")
    };
    sibling(store, &suffix)
}

/// `path` with `suffix` appended to its file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Creates `path` exclusively, readable by its owner only.
fn create_private(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

/// Writes `contents` to `<path>.tmp` and renames it over `path`.
///
/// The temporary file is removed again if any step fails.
fn replace_private(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let tmp = sibling(path, ".tmp");
    let result = write_private(&tmp, contents)
        .and_then(|()| fs::rename(&tmp, path).map_err(StoreError::io(path)));
    if result.is_err() {
        discard(&tmp);
    }
    result
}

/// Best-effort removal of a file left by a failed write.
fn discard(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed partial file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "could not remove partial file"),
    }
}

/// Writes `contents` to `path` (truncating), syncs, and restricts permissions.
fn write_private(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path).map_err(StoreError::io(path))?;
    file.write_all(contents).map_err(StoreError::io(path))?;
    file.sync_all().map_err(StoreError::io(path))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(StoreError::io(path))?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;
    use witness_config_core::{FeedInterval, RpcNodes};

    const KEY: &str = "5JbVhzSegwLwLpRqUkTPfh7Ap7NjHzDw5qe4ZBsDAdWWcBnbU1R";

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("witness_cfg_test_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn record(account: &str) -> ConfigurationRecord {
        ConfigurationRecord {
            witness_account: account.to_string(),
            signing_key: KEY.to_string(),
            feed_interval: FeedInterval::TenMinutes,
            rpc_nodes: RpcNodes::default(),
        }
    }

    fn backups_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.contains(".backup."))
            .collect();
        names.sort();
        names
    }

    // ── Naming ────────────────────────────────────────────────────────────────

    #[test]
    fn test_backup_path_embeds_timestamp() {
        let path = backup_path(Path::new("/srv/bot/.env"), at(12, 0, 5), 0);
        assert_eq!(path, PathBuf::from("/srv/bot/.env.backup.20240301_120005"));
    }

    #[test]
    fn test_backup_path_adds_counter_on_retry() {
        let path = backup_path(Path::new(".env"), at(9, 8, 7), 2);
        assert_eq!(path, PathBuf::from(".env.backup.20240301_090807.2"));
    }

    #[test]
    fn test_default_store_is_dot_env() {
        assert_eq!(ConfigStore::new(DEFAULT_STORE_FILE).path(), Path::new(".env"));
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    #[test]
    fn test_load_existing_returns_none_when_absent() {
        let dir = temp_dir();
        let store = ConfigStore::new(dir.join(".env"));

        assert_eq!(store.load_existing().unwrap(), None);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_existing_extracts_known_keys() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join(".env");
        fs::write(&path, "# hi\nHIVE_WITNESS_ACCOUNT=bob\nOTHER=1\n").unwrap();

        // Act
        let loaded = ConfigStore::new(&path).load_existing().unwrap().unwrap();

        // Assert
        assert_eq!(loaded.witness_account.as_deref(), Some("bob"));
        assert_eq!(loaded.signing_key, None);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_existing_rejects_non_utf8_file() {
        let dir = temp_dir();
        let path = dir.join(".env");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let result = ConfigStore::new(&path).load_existing();

        assert!(matches!(result, Err(StoreError::Io { .. })));
        fs::remove_dir_all(&dir).ok();
    }

    // ── Writing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_first_write_creates_store_without_backup() {
        // Arrange
        let dir = temp_dir();
        let store = ConfigStore::new(dir.join(".env"));

        // Act
        let report = store.write_at(&record("alice"), at(1, 2, 3)).unwrap();

        // Assert
        assert_eq!(report.backup, None);
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("HIVE_WITNESS_ACCOUNT=alice\n"));
        assert!(backups_in(&dir).is_empty());
        assert!(!dir.join(".env.tmp").exists(), "temp file must be renamed away");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_overwrite_backs_up_previous_contents() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join(".env");
        fs::write(&path, "HIVE_WITNESS_ACCOUNT=old\n# hand-written note\n").unwrap();
        let store = ConfigStore::new(&path);

        // Act
        let report = store.write_at(&record("alice"), at(1, 2, 3)).unwrap();

        // Assert
        let backup = report.backup.expect("a backup must be made");
        assert_eq!(backup, dir.join(".env.backup.20240301_010203"));
        assert_eq!(
            fs::read_to_string(&backup).unwrap(),
            "HIVE_WITNESS_ACCOUNT=old\n# hand-written note\n"
        );
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("HIVE_WITNESS_ACCOUNT=alice\n"));
        assert!(!text.contains("hand-written note"), "store is fully regenerated");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_two_writes_in_same_second_keep_both_backups() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join(".env");
        fs::write(&path, "HIVE_WITNESS_ACCOUNT=original\n").unwrap();
        let store = ConfigStore::new(&path);

        // Act
        store.write_at(&record("first"), at(4, 5, 6)).unwrap();
        let second = store.write_at(&record("second"), at(4, 5, 6)).unwrap();

        // Assert
        assert_eq!(second.backup, Some(dir.join(".env.backup.20240301_040506.1")));
        assert_eq!(
            backups_in(&dir),
            vec![".env.backup.20240301_040506", ".env.backup.20240301_040506.1"]
        );
        let original = fs::read_to_string(dir.join(".env.backup.20240301_040506")).unwrap();
        assert_eq!(original, "HIVE_WITNESS_ACCOUNT=original\n");
        let first = fs::read_to_string(dir.join(".env.backup.20240301_040506.1")).unwrap();
        assert!(first.contains("HIVE_WITNESS_ACCOUNT=first\n"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_writes_in_different_seconds_get_distinct_backups() {
        let dir = temp_dir();
        let path = dir.join(".env");
        fs::write(&path, "x\n").unwrap();
        let store = ConfigStore::new(&path);

        store.write_at(&record("first"), at(4, 5, 6)).unwrap();
        store.write_at(&record("second"), at(4, 5, 7)).unwrap();

        assert_eq!(
            backups_in(&dir),
            vec![".env.backup.20240301_040506", ".env.backup.20240301_040507"]
        );
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_creates_missing_parent_directory() {
        let dir = temp_dir();
        let store = ConfigStore::new(dir.join("nested").join("bot.env"));

        store.write_at(&record("alice"), at(0, 0, 0)).unwrap();

        assert!(store.path().exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_written_store_loads_back_as_same_record() {
        let dir = temp_dir();
        let store = ConfigStore::new(dir.join(".env"));
        let original = record("alice");

        store.write_at(&original, at(0, 0, 0)).unwrap();
        let loaded = store.load_existing().unwrap().unwrap();

        assert_eq!(loaded.to_record(), Some(original));
        fs::remove_dir_all(&dir).ok();
    }

    #[cfg(unix)]
    #[test]
    fn test_store_and_backup_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = temp_dir();
        let path = dir.join(".env");
        fs::write(&path, "x\n").unwrap();
        let store = ConfigStore::new(&path);

        let report = store.write_at(&record("alice"), at(0, 0, 0)).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), 0o600);
        assert_eq!(mode(&report.backup.unwrap()), 0o600);
        fs::remove_dir_all(&dir).ok();
    }

    // ── Failure cleanup ───────────────────────────────────────────────────────

    #[cfg(unix)]
    #[test]
    fn test_failed_backup_copy_leaves_no_partial_backup() {
        // Arrange: a directory where the store file should be opens but cannot be read
        let dir = temp_dir();
        let path = dir.join(".env");
        fs::create_dir_all(path.join("nested")).unwrap();
        let store = ConfigStore::new(&path);

        // Act
        let result = store.write_at(&record("alice"), at(1, 2, 3));

        // Assert
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(backups_in(&dir).is_empty(), "partial backup left: {:?}", backups_in(&dir));
        assert!(!dir.join(".env.tmp").exists());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_failed_rename_removes_temporary_file() {
        // Arrange: the target is a non-empty directory, so the rename fails
        let dir = temp_dir();
        let target = dir.join(".env");
        fs::create_dir_all(target.join("nested")).unwrap();

        // Act
        let result = replace_private(&target, b"HIVE_WITNESS_ACCOUNT=alice\n");

        // Assert
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(!dir.join(".env.tmp").exists(), "temporary file must be removed");
        fs::remove_dir_all(&dir).ok();
    }
}
