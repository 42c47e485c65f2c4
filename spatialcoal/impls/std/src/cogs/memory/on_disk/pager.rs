use core::fmt;
use std::{
    collections::BTreeSet,
    fs::{File, OpenOptions},
    io::{self, BufReader, BufWriter},
    mem,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use spatialcoal_core::{Generation, StorageError};

/// The stores that page their layers through the same directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    PopulationSizes,
    ForwardFlows,
    BackwardFlows,
}

impl LayerKind {
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::PopulationSizes => "N",
            Self::ForwardFlows => "M-forward",
            Self::BackwardFlows => "M-backward",
        }
    }
}

pub trait Layer: Default + Serialize + DeserializeOwned {}

impl<L: Default + Serialize + DeserializeOwned> Layer for L {}

/// Window of two consecutive generation layers, the rest of the history
/// lives in one file per generation.
///
/// Moving the window by one generation in either direction costs one write
/// and one read. Any other access reloads the whole window.
pub struct LayerPager<L: Layer> {
    directory: PathBuf,
    kind: LayerKind,
    window: (Generation, Generation),
    lo: L,
    hi: L,
    persisted: BTreeSet<Generation>,
}

impl<L: Layer> LayerPager<L> {
    /// Starts with the empty layers of generations 0 and 1. Files of earlier
    /// runs are never read back.
    #[must_use]
    pub fn new(directory: &Path, kind: LayerKind) -> Self {
        Self {
            directory: directory.to_owned(),
            kind,
            window: (0, 1),
            lo: L::default(),
            hi: L::default(),
            persisted: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn window(&self) -> (Generation, Generation) {
        self.window
    }

    #[must_use]
    pub fn layer_path(&self, t: Generation) -> PathBuf {
        self.directory
            .join(format!("{}-{}.archive", self.kind.prefix(), t))
    }

    /// # Errors
    ///
    /// Fails if a layer cannot be evicted or paged in.
    pub fn layer(&mut self, t: Generation) -> Result<&L, StorageError> {
        self.page_in(t)?;

        Ok(if t == self.window.0 { &self.lo } else { &self.hi })
    }

    /// # Errors
    ///
    /// Fails if a layer cannot be evicted or paged in.
    pub fn layer_mut(&mut self, t: Generation) -> Result<&mut L, StorageError> {
        self.page_in(t)?;

        Ok(if t == self.window.0 {
            &mut self.lo
        } else {
            &mut self.hi
        })
    }

    /// Writes both resident layers without evicting them.
    ///
    /// # Errors
    ///
    /// Fails if a layer cannot be written.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        let (lo, hi) = self.window;

        self.persist(lo, Resident::Lo)?;
        self.persist(hi, Resident::Hi)
    }

    #[debug_ensures(
        ret.is_ok() -> (self.window.0 == t || self.window.1 == t),
        "generation t is resident"
    )]
    #[debug_ensures(
        ret.is_ok() -> (self.window.0 + 1 == self.window.1),
        "the window spans two consecutive generations"
    )]
    fn page_in(&mut self, t: Generation) -> Result<(), StorageError> {
        let (lo, hi) = self.window;

        if t == lo || t == hi {
            return Ok(());
        }

        if hi.checked_add(1) == Some(t) {
            self.persist(lo, Resident::Lo)?;

            self.lo = mem::take(&mut self.hi);
            self.window = (hi, t);

            // The next generation might not have been simulated yet
            self.hi = match self.load(t) {
                Ok(layer) => layer,
                Err(err) => {
                    debug!(
                        "Starting an empty {:?} layer for generation {} after failing to read \
                         it: {}",
                        self.kind, t, err
                    );

                    L::default()
                },
            };
        } else if lo.checked_sub(1) == Some(t) {
            self.persist(hi, Resident::Hi)?;

            let layer = self.load(t)?;

            self.hi = mem::replace(&mut self.lo, layer);
            self.window = (t, lo);
        } else {
            debug!(
                "Random access to the {:?} layer of generation {} reloads the window ({}, {}).",
                self.kind, t, lo, hi
            );

            self.flush()?;

            let window = if t == 0 { (0, 1) } else { (t - 1, t) };

            // The resident window stays intact unless both layers were read
            let lo_layer = self.load(window.0)?;
            let hi_layer = self.load(window.1)?;

            self.lo = lo_layer;
            self.hi = hi_layer;
            self.window = window;
        }

        Ok(())
    }

    fn persist(&mut self, t: Generation, resident: Resident) -> Result<(), StorageError> {
        let path = self.layer_path(t);

        let layer = match resident {
            Resident::Lo => &self.lo,
            Resident::Hi => &self.hi,
        };

        trace!("Writing the {:?} layer of generation {} to {:?}.", self.kind, t, path);

        write_layer(&path, layer)?;

        self.persisted.insert(t);

        Ok(())
    }

    fn load(&self, t: Generation) -> Result<L, StorageError> {
        if !self.persisted.contains(&t) {
            return Ok(L::default());
        }

        let path = self.layer_path(t);

        trace!("Reading the {:?} layer of generation {} from {:?}.", self.kind, t, path);

        read_layer(&path)
    }
}

impl<L: Layer> Drop for LayerPager<L> {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            warn!("Failed to flush the {:?} layers: {}", self.kind, err);
        }
    }
}

impl<L: Layer> fmt::Debug for LayerPager<L> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct(stringify!(LayerPager))
            .field("directory", &self.directory)
            .field("kind", &self.kind)
            .field("window", &self.window)
            .field("persisted", &self.persisted.len())
            .finish()
    }
}

#[derive(Clone, Copy)]
enum Resident {
    Lo,
    Hi,
}

fn write_layer<L: Serialize>(path: &Path, layer: &L) -> Result<(), StorageError> {
    let io_error = |source: io::Error| StorageError::Io {
        path: path.to_owned(),
        source,
    };

    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)
        .map_err(io_error)?;

    let mut buf_writer = BufWriter::new(file);

    bincode::serialize_into(&mut buf_writer, layer).map_err(|source| StorageError::Codec {
        path: path.to_owned(),
        source,
    })?;

    buf_writer
        .into_inner()
        .map_err(|err| io_error(err.into_error()))?;

    Ok(())
}

fn read_layer<L: DeserializeOwned + Default>(path: &Path) -> Result<L, StorageError> {
    let file = match File::open(path) {
        Ok(file) => file,
        // A layer that was removed has no content
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(L::default()),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_owned(),
                source,
            })
        },
    };

    bincode::deserialize_from(BufReader::new(file)).map_err(|source| StorageError::Codec {
        path: path.to_owned(),
        source,
    })
}
