//! Providers of the two country reference documents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use custmig_model::CountryDataSource;

use crate::error::{CountryError, Result};

/// File name of the ISO2 to ISO3 document in a country data directory.
pub const ISO3_FILE: &str = "iso3.json";

/// File name of the ISO2 to display name document in a country data directory.
pub const NAMES_FILE: &str = "names.json";

/// The raw reference documents, both keyed by ISO2 code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryData {
    /// ISO2 code to ISO3 code.
    pub iso3: BTreeMap<String, String>,
    /// ISO2 code to display name.
    pub names: BTreeMap<String, String>,
}

/// Anything that can supply [`CountryData`].
pub trait CountrySource {
    /// Fetches both documents. Fails if either is unavailable or malformed.
    fn fetch(&self) -> Result<CountryData>;
}

/// Fetches the documents over HTTP.
pub struct HttpCountrySource {
    client: Client,
    iso3_url: String,
    names_url: String,
}

impl HttpCountrySource {
    pub fn new(
        iso3_url: impl Into<String>,
        names_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CountryError::Client)?;
        Ok(Self {
            client,
            iso3_url: iso3_url.into(),
            names_url: names_url.into(),
        })
    }

    fn get_document(&self, url: &str) -> Result<BTreeMap<String, String>> {
        debug!(url, "fetching country document");
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, concat!("custmig/", env!("CARGO_PKG_VERSION")))
            .send()
            .map_err(|source| CountryError::Request {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(CountryError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().map_err(|source| CountryError::Request {
            url: url.to_string(),
            source,
        })?;
        parse_document(&body, url)
    }
}

impl CountrySource for HttpCountrySource {
    fn fetch(&self) -> Result<CountryData> {
        Ok(CountryData {
            iso3: self.get_document(&self.iso3_url)?,
            names: self.get_document(&self.names_url)?,
        })
    }
}

/// Reads `iso3.json` and `names.json` from a directory.
pub struct DirectoryCountrySource {
    dir: PathBuf,
}

impl DirectoryCountrySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_document(&self, file_name: &str) -> Result<BTreeMap<String, String>> {
        let path = self.dir.join(file_name);
        let body = std::fs::read_to_string(&path).map_err(|source| CountryError::Read {
            path: path.clone(),
            source,
        })?;
        parse_document(&body, &path.display().to_string())
    }
}

impl CountrySource for DirectoryCountrySource {
    fn fetch(&self) -> Result<CountryData> {
        Ok(CountryData {
            iso3: self.read_document(ISO3_FILE)?,
            names: self.read_document(NAMES_FILE)?,
        })
    }
}

/// Serves fixed data; used when the table is known up front.
#[derive(Debug, Clone, Default)]
pub struct StaticCountrySource {
    data: CountryData,
}

impl StaticCountrySource {
    pub fn new(data: CountryData) -> Self {
        Self { data }
    }

    /// Builds data from `(iso2, iso3, name)` triples.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let mut data = CountryData::default();
        for (iso2, iso3, name) in entries {
            data.iso3.insert(iso2.to_string(), iso3.to_string());
            data.names.insert(iso2.to_string(), name.to_string());
        }
        Self { data }
    }
}

impl CountrySource for StaticCountrySource {
    fn fetch(&self) -> Result<CountryData> {
        Ok(self.data.clone())
    }
}

/// Picks the source configured in the migration options.
pub fn source_for(config: &CountryDataSource, timeout: Duration) -> Result<Box<dyn CountrySource>> {
    match config {
        CountryDataSource::Http {
            iso3_url,
            names_url,
        } => Ok(Box::new(HttpCountrySource::new(
            iso3_url.as_str(),
            names_url.as_str(),
            timeout,
        )?)),
        CountryDataSource::Directory(dir) => Ok(Box::new(DirectoryCountrySource::new(dir))),
    }
}

fn parse_document(body: &str, origin: &str) -> Result<BTreeMap<String, String>> {
    serde_json::from_str(body).map_err(|source| CountryError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Writes `data` as a country data directory readable by [`DirectoryCountrySource`].
pub fn write_directory(dir: &Path, data: &CountryData) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let iso3 = serde_json::to_string_pretty(&data.iso3).map_err(std::io::Error::other)?;
    let names = serde_json::to_string_pretty(&data.names).map_err(std::io::Error::other)?;
    std::fs::write(dir.join(ISO3_FILE), iso3)?;
    std::fs::write(dir.join(NAMES_FILE), names)?;
    Ok(())
}
