//! Almanac download and local caching
//!
//! Almanacs are cached as `yumaAlmanac_YYYY-MM-DD.alm` so the table reader can
//! recover the epoch from the filename. The HTTP client itself sits behind
//! [`AlmanacTransport`].

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use crate::constants::{
    ALMANAC_FILE_EXTENSION, ALMANAC_FILENAME_PREFIX, HTTP_OK, NAVCEN_ALMANAC_BASE_URL,
};
use crate::{Error, Result};

/// Raw HTTP response as seen by the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Performs the GET request for an almanac URL
pub trait AlmanacTransport {
    fn get(&self, url: &str) -> Result<TransportResponse>;
}

/// Cache and failure policy for downloads
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FetchOptions {
    /// Archive root holding `{year}/Yuma/{doy}.alm`
    pub base_url: String,

    /// Download again even when the cached file exists
    pub overwrite: bool,

    /// Return an error on failure instead of `Ok(None)`
    pub raise_on_fail: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: NAVCEN_ALMANAC_BASE_URL.to_string(),
            overwrite: false,
            raise_on_fail: false,
        }
    }
}

/// URL of the almanac for a date: `{base}/{year}/Yuma/{day of year:03}.alm`
pub fn almanac_url(base_url: &str, date: NaiveDate) -> String {
    format!(
        "{}/{}/Yuma/{:03}.alm",
        base_url.trim_end_matches('/'),
        date.year(),
        date.ordinal()
    )
}

/// Cache filename for a date, e.g. `yumaAlmanac_2024-03-05.alm`
pub fn almanac_filename(date: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        ALMANAC_FILENAME_PREFIX,
        date.format("%Y-%m-%d"),
        ALMANAC_FILE_EXTENSION
    )
}

/// Downloads almanacs into a local directory
#[derive(Debug, Clone)]
pub struct AlmanacFetcher<T> {
    transport: T,
    options: FetchOptions,
}

impl<T: AlmanacTransport> AlmanacFetcher<T> {
    pub fn new(transport: T, options: FetchOptions) -> Self {
        Self { transport, options }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Fetch the almanac for `date` into `save_dir`
    ///
    /// Returns the local path, or `Ok(None)` on failure unless
    /// `raise_on_fail` is set. An existing file is reused without a request
    /// unless `overwrite` is set.
    pub fn fetch(&self, date: NaiveDate, save_dir: &Path) -> Result<Option<PathBuf>> {
        match self.try_fetch(date, save_dir) {
            Ok(path) => Ok(Some(path)),
            Err(e) if self.options.raise_on_fail => Err(e),
            Err(e) => {
                warn!("{}", e);
                Ok(None)
            }
        }
    }

    fn try_fetch(&self, date: NaiveDate, save_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(save_dir).map_err(|e| {
            Error::io(
                format!("Failed to create directory {}", save_dir.display()),
                e,
            )
        })?;

        let path = save_dir.join(almanac_filename(date));
        if path.exists() && !self.options.overwrite {
            info!("File already exists: {}", path.display());
            return Ok(path);
        }

        let url = almanac_url(&self.options.base_url, date);
        debug!("Requesting {}", url);

        let response = self.transport.get(&url)?;
        let blank = response.body.iter().all(u8::is_ascii_whitespace);
        if response.status != HTTP_OK || blank {
            return Err(Error::fetch(format!(
                "Failed to download file (HTTP {}) from: {}",
                response.status, url
            )));
        }

        std::fs::write(&path, &response.body)
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

        info!("Downloaded: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// In-memory transport recording every requested URL
    struct MockTransport {
        response: std::result::Result<TransportResponse, String>,
        requests: RefCell<Vec<String>>,
    }

    impl MockTransport {
        fn ok(body: &str) -> Self {
            Self::status(200, body)
        }

        fn status(status: u16, body: &str) -> Self {
            Self {
                response: Ok(TransportResponse {
                    status,
                    body: body.as_bytes().to_vec(),
                }),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl AlmanacTransport for &MockTransport {
        fn get(&self, url: &str) -> Result<TransportResponse> {
            self.requests.borrow_mut().push(url.to_string());
            self.response.clone().map_err(Error::fetch)
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_almanac_url_uses_day_of_year() {
        assert_eq!(
            almanac_url(NAVCEN_ALMANAC_BASE_URL, date()),
            "https://navcen.uscg.gov/sites/default/files/gps/almanac/2024/Yuma/065.alm"
        );
        assert_eq!(
            almanac_url("http://mirror/", NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()),
            "http://mirror/2023/Yuma/365.alm"
        );
    }

    #[test]
    fn test_almanac_filename_round_trips_epoch() {
        let name = almanac_filename(date());
        assert_eq!(name, "yumaAlmanac_2024-03-05.alm");
        assert!(crate::app::services::table_reader::epoch_from_name(&name).is_some());
    }

    #[test]
    fn test_fetch_writes_body() {
        let dir = TempDir::new().unwrap();
        let transport = MockTransport::ok("ID: 01\n");
        let fetcher = AlmanacFetcher::new(&transport, FetchOptions::default());

        let path = fetcher.fetch(date(), dir.path()).unwrap().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ID: 01\n");
        assert_eq!(transport.requests.borrow().len(), 1);
    }

    #[test]
    fn test_existing_file_is_reused_unless_overwrite() {
        let dir = TempDir::new().unwrap();
        let cached = dir.path().join(almanac_filename(date()));
        std::fs::write(&cached, "cached").unwrap();

        let transport = MockTransport::ok("fresh");
        let fetcher = AlmanacFetcher::new(&transport, FetchOptions::default());
        assert_eq!(fetcher.fetch(date(), dir.path()).unwrap(), Some(cached.clone()));
        assert!(transport.requests.borrow().is_empty());
        assert_eq!(std::fs::read_to_string(&cached).unwrap(), "cached");

        let overwrite = FetchOptions {
            overwrite: true,
            ..Default::default()
        };
        let fetcher = AlmanacFetcher::new(&transport, overwrite);
        fetcher.fetch(date(), dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&cached).unwrap(), "fresh");
    }

    #[test]
    fn test_http_failure_policy() {
        let dir = TempDir::new().unwrap();
        let transport = MockTransport::status(404, "not found");

        let quiet = AlmanacFetcher::new(&transport, FetchOptions::default());
        assert_eq!(quiet.fetch(date(), dir.path()).unwrap(), None);

        let raising = AlmanacFetcher::new(
            &transport,
            FetchOptions {
                raise_on_fail: true,
                ..Default::default()
            },
        );
        let err = raising.fetch(date(), dir.path()).unwrap_err();
        assert!(err.to_string().contains("HTTP 404"));
        assert!(!dir.path().join(almanac_filename(date())).exists());
    }

    #[test]
    fn test_blank_body_is_a_failure() {
        let dir = TempDir::new().unwrap();
        let transport = MockTransport::ok("  \n\t");
        let fetcher = AlmanacFetcher::new(&transport, FetchOptions::default());

        assert_eq!(fetcher.fetch(date(), dir.path()).unwrap(), None);
    }

    #[test]
    fn test_transport_error_policy() {
        let dir = TempDir::new().unwrap();
        let transport = MockTransport::failing("connection refused");

        let quiet = AlmanacFetcher::new(&transport, FetchOptions::default());
        assert_eq!(quiet.fetch(date(), dir.path()).unwrap(), None);

        let raising = AlmanacFetcher::new(
            &transport,
            FetchOptions {
                raise_on_fail: true,
                ..Default::default()
            },
        );
        assert!(matches!(
            raising.fetch(date(), dir.path()),
            Err(Error::Fetch { .. })
        ));
    }
}
