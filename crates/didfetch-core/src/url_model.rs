//! Request URL and output filename for a region.
//!
//! The query parameters select the 2020 census DID layer (survey
//! D002005112020) as a per-prefecture shapefile in JGD2011.

use crate::region::RegionCode;
use url::Url;

/// Census survey identifier (2020 population census, DID).
pub const SURVEY_ID: &str = "D002005112020";
/// Coordinate system: world geodetic system.
pub const COORD_SYS: &str = "1";
pub const FORMAT: &str = "shape";
/// Download granularity: one archive per prefecture.
pub const DOWNLOAD_TYPE: &str = "5";
pub const DATUM: &str = "2011";

/// Query parameters in request order. Only `code` varies.
pub fn query_params(code: RegionCode) -> [(&'static str, String); 6] {
    [
        ("dlserveyId", SURVEY_ID.to_string()),
        ("code", code.to_string()),
        ("coordSys", COORD_SYS.to_string()),
        ("format", FORMAT.to_string()),
        ("downloadType", DOWNLOAD_TYPE.to_string()),
        ("datum", DATUM.to_string()),
    ]
}

/// Builds the download URL for `code`. Any query already on `base` is replaced.
pub fn build_url(base: &Url, code: RegionCode) -> String {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(query_params(code));
    url.to_string()
}

/// Local archive name, e.g. `did_2020_05.zip`.
pub fn output_file_name(code: RegionCode) -> String {
    format!("did_2020_{}.zip", code)
}
