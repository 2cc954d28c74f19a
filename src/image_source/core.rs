use std::fmt;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u64);

impl ImageId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, PartialEq)]
pub struct Upload {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl Upload {
    pub fn new(name: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            bytes: Arc::from(bytes),
        }
    }

    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(&name, bytes))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Upload(Upload),
    Url(String),
}

/// A selected image. Never mutated; two selections of the same URL are
/// distinct references with distinct ids.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    pub id: ImageId,
    pub source: ImageSource,
}

impl ImageRef {
    pub fn describe(&self) -> &str {
        match &self.source {
            ImageSource::Upload(upload) => &upload.name,
            ImageSource::Url(url) => url,
        }
    }
}

/// The current image plus the most-recent-first history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSources {
    current: Option<ImageRef>,
    history: Vec<ImageRef>,
    next_id: u64,
}

impl ImageSources {
    pub fn current(&self) -> Option<&ImageRef> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[ImageRef] {
        &self.history
    }

    /// An empty selection clears the current image.
    pub fn select_from_upload(&mut self, upload: Option<Upload>) -> Option<&ImageRef> {
        match upload.filter(|upload| !upload.is_empty()) {
            Some(upload) => {
                let image = self.new_ref(ImageSource::Upload(upload));
                self.record_current(image);
            }
            None => self.current = None,
        }
        self.current.as_ref()
    }

    /// The text is taken as-is, whitespace included; reachability is only
    /// discovered on load. Only an empty string clears the current image.
    pub fn select_from_text(&mut self, text: String) -> Option<&ImageRef> {
        if text.is_empty() {
            self.current = None;
        } else {
            let image = self.new_ref(ImageSource::Url(text));
            self.record_current(image);
        }
        self.current.as_ref()
    }

    /// Moves the current pointer to an existing history entry without
    /// prepending it again. Returns `None` for an out-of-range index.
    pub fn select_from_history(&mut self, index: usize) -> Option<&ImageRef> {
        let picked = self.history.get(index)?.clone();
        self.current = Some(picked);
        self.current.as_ref()
    }

    pub fn record_current(&mut self, image: ImageRef) {
        self.history.insert(0, image.clone());
        self.current = Some(image);
    }

    fn new_ref(&mut self, source: ImageSource) -> ImageRef {
        self.next_id += 1;
        ImageRef {
            id: ImageId(self.next_id),
            source,
        }
    }
}
