use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::satellite::{Propagator, Satellite};

const TLE_LINE_LENGTH: usize = 69;
const MAX_NAME_LENGTH: usize = 24;

/// Satellites loaded from a TLE file, in file order.
#[derive(Clone, Default)]
pub struct Catalog {
    satellites: Vec<Satellite>,
}

impl Catalog {
    /// Reads element sets from text. A line-1/line-2 pair may be preceded by
    /// a name line of at most 24 characters; any other line drops whatever
    /// was pending.
    pub fn from_tle_str(text: &str) -> Result<Catalog> {
        let mut satellites = Vec::new();
        let mut name: Option<&str> = None;
        let mut line1: Option<&str> = None;
        for raw in text.lines() {
            let line = raw.trim_end();
            let is_element_line = line.len() == TLE_LINE_LENGTH;
            match line1 {
                Some(first) if is_element_line && line.starts_with("2 ") => {
                    satellites.push(Satellite::from_tle(name, first, line)?);
                    name = None;
                    line1 = None;
                }
                _ if is_element_line && line.starts_with("1 ") => line1 = Some(line),
                _ => {
                    line1 = None;
                    name = None;
                    if line.len() <= MAX_NAME_LENGTH {
                        name = Some(line.trim()).filter(|n| !n.is_empty());
                    } else {
                        warn!(line, "skipping unrecognised TLE line");
                    }
                }
            }
        }
        debug!(count = satellites.len(), "loaded element sets");
        Ok(Catalog { satellites })
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Catalog> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_tle_str(&text)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Catalog> {
        Self::from_tle_str(&std::fs::read_to_string(path)?)
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Satellite> {
        self.satellites.get(index)
    }

    pub fn by_name(&self, name: &str) -> Option<&Satellite> {
        self.satellites.iter().find(|sat| sat.name() == name)
    }

    /// The named satellite, or the first one when no name is given
    pub fn select(&self, name: Option<&str>) -> Option<&Satellite> {
        match name {
            Some(name) => self.by_name(name),
            None => self.satellites.first(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Satellite> {
        self.satellites.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Satellite;
    type IntoIter = std::slice::Iter<'a, Satellite>;

    fn into_iter(self) -> Self::IntoIter {
        self.satellites.iter()
    }
}
