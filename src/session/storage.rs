use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// How document text reaches disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and write the destination in place.
    #[default]
    Direct,
    /// Write a sibling temporary file and rename it over the destination.
    Atomic,
}

/// An open write stream to a document location.
///
/// Dropping a sink without calling [`FileSink::commit`] releases the
/// handle; for atomic sinks it also deletes the temporary file, leaving
/// the destination untouched.
#[derive(Debug)]
pub enum FileSink {
    Direct(BufWriter<File>),
    Atomic { temp: NamedTempFile, dest: PathBuf },
}

impl FileSink {
    /// Open a write stream to `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from creating the destination (direct) or the
    /// temporary file (atomic).
    pub fn create(path: &Path, mode: WriteMode) -> io::Result<Self> {
        match mode {
            WriteMode::Direct => Ok(Self::Direct(BufWriter::new(File::create(path)?))),
            WriteMode::Atomic => {
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                Ok(Self::Atomic {
                    temp: NamedTempFile::new_in(dir)?,
                    dest: path.to_path_buf(),
                })
            }
        }
    }

    /// Write all of `text`, flush, and close the stream.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error. A direct sink may leave a partially
    /// written destination behind; an atomic sink never does.
    pub fn commit(self, text: &str) -> io::Result<()> {
        match self {
            Self::Direct(mut writer) => {
                writer.write_all(text.as_bytes())?;
                writer.flush()?;
                writer.get_ref().sync_all()
            }
            Self::Atomic { mut temp, dest } => {
                temp.write_all(text.as_bytes())?;
                temp.flush()?;
                // The temp file is created 0600; keep the destination's mode.
                match fs::metadata(&dest) {
                    Ok(meta) => temp.as_file().set_permissions(meta.permissions())?,
                    Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                    Err(err) => return Err(err),
                }
                temp.as_file().sync_all()?;
                temp.persist(&dest).map_err(|err| err.error)?;
                Ok(())
            }
        }
    }
}

/// Read a whole stream as UTF-8 text.
///
/// Returns `Ok(Err(bytes))` when the stream was read but is not UTF-8.
pub(crate) fn read_text(reader: &mut dyn Read) -> io::Result<Result<String, Vec<u8>>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(String::from_utf8(bytes).map_err(std::string::FromUtf8Error::into_bytes))
}
