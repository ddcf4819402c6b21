use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::Result;


/// A store of named byte-stream resources.
///
/// Streams are closed when dropped, on every exit path.
/// Writers should be flushed by the caller so that
/// write errors are not lost in `drop`.
pub trait StorageManager {
    /// Open the resource `name` for reading.
    /// Returns `Err` if the resource does not exist.
    fn input_stream(&self, name: &str) -> Result<Box<dyn Read + '_>>;


    /// Open the resource `name` for writing, truncating it.
    fn output_stream(&self, name: &str) -> Result<Box<dyn Write + '_>>;


    /// Returns `true` if the resource `name` exists.
    fn exists(&self, name: &str) -> bool;
}


/// Stores each resource as a file under a root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}


impl FileStorage {
    /// Construct a new instance of [`FileStorage`] rooted at `root`.
    /// The directory is created on the first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }


    /// Returns the path of the resource `name`.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}


impl StorageManager for FileStorage {
    fn input_stream(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        let file = File::open(self.path_of(name))?;
        Ok(Box::new(BufReader::new(file)))
    }


    fn output_stream(&self, name: &str) -> Result<Box<dyn Write + '_>> {
        fs::create_dir_all(&self.root)?;
        let file = File::create(self.path_of(name))?;
        Ok(Box::new(BufWriter::new(file)))
    }


    fn exists(&self, name: &str) -> bool {
        self.path_of(name).is_file()
    }
}


/// Stores resources in memory.
/// Clones share the same resources.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    resources: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}


impl MemoryStorage {
    /// Construct an empty [`MemoryStorage`].
    pub fn new() -> Self {
        Self::default()
    }


    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.resources.lock()
            .unwrap_or_else(PoisonError::into_inner)
    }


    /// Returns a copy of the bytes of resource `name`.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.lock().get(name).cloned()
    }


    /// Replace the bytes of resource `name`.
    pub fn put(&self, name: &str, bytes: Vec<u8>) {
        self.lock().insert(name.to_string(), bytes);
    }


    /// Remove the resource `name`.
    pub fn remove(&self, name: &str) -> Option<Vec<u8>> {
        self.lock().remove(name)
    }


    /// Returns the names of the stored resources, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names = self.lock().keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}


impl StorageManager for MemoryStorage {
    fn input_stream(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        let bytes = self.get(name)
            .ok_or_else(|| {
                let message = format!("resource `{name}` does not exist");
                io::Error::new(io::ErrorKind::NotFound, message)
            })?;
        Ok(Box::new(Cursor::new(bytes)))
    }


    fn output_stream(&self, name: &str) -> Result<Box<dyn Write + '_>> {
        self.put(name, Vec::new());
        let writer = MemoryWriter {
            storage: self,
            name: name.to_string(),
            buffer: Vec::new(),
        };
        Ok(Box::new(writer))
    }


    fn exists(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }
}


/// Buffers the written bytes and publishes them on `flush` and `drop`.
struct MemoryWriter<'a> {
    storage: &'a MemoryStorage,
    name: String,
    buffer: Vec<u8>,
}


impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }


    fn flush(&mut self) -> io::Result<()> {
        self.storage.put(&self.name, self.buffer.clone());
        Ok(())
    }
}


impl Drop for MemoryWriter<'_> {
    fn drop(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        self.storage.put(&self.name, buffer);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        {
            let mut out = storage.output_stream("a").unwrap();
            out.write_all(b"hello").unwrap();
        }
        let mut bytes = Vec::new();
        storage.input_stream("a").unwrap().read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, b"hello");
        assert!(storage.exists("a"));
    }

    #[test]
    fn test_memory_storage_missing_resource() {
        let storage = MemoryStorage::new();
        assert!(storage.input_stream("missing").is_err());
        assert!(!storage.exists("missing"));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("models"));
        {
            let mut out = storage.output_stream("m.header").unwrap();
            out.write_all(&[1, 2, 3]).unwrap();
            out.flush().unwrap();
        }
        let mut bytes = Vec::new();
        storage.input_stream("m.header").unwrap().read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
        assert!(storage.exists("m.header"));
        assert!(!storage.exists("m.discretization"));
    }
}
