//! Column names and table-level constants.

/// Canonical identifier column carried by every reconciled table.
pub const FIPS_CODE: &str = "fips_code";

/// County name column produced by splitting the vendor `NAME` field.
pub const COUNTY_NAME: &str = "County Name";

/// State name column produced by splitting the vendor `NAME` field.
pub const STATE_NAME: &str = "State Name";

/// Vendor descriptive name field, always requested first.
pub const NAME_VARIABLE: &str = "NAME";

/// Vendor state code column.
pub const STATE_VARIABLE: &str = "state";

/// Vendor county code column.
pub const COUNTY_VARIABLE: &str = "county";

/// Header of the state code column in a fetched table.
pub const STATE_HEADER: &str = "State";

/// Header of the county code column in a fetched table.
pub const COUNTY_HEADER: &str = "County";

/// Header of the descriptive name column in a fetched table.
pub const NAME_HEADER: &str = "Name";

/// Number of U.S. counties in the canonical table (Puerto Rico excluded).
pub const EXPECTED_COUNTY_COUNT: usize = 3144;

/// State whose counties are removed from the canonical set.
pub const EXCLUDED_STATE: &str = "Puerto Rico";

/// Capitalizes the first character and lowercases the rest.
///
/// Applied to vendor headers that have no entry in the column mapping.
/// Multi-word headers are not split: `"estimate!!total"` becomes
/// `"Estimate!!total"`.
///
/// # Examples
///
/// ```
/// use fips_model::title_case_header;
///
/// assert_eq!(title_case_header("state"), "State");
/// assert_eq!(title_case_header("NAME"), "Name");
/// assert_eq!(title_case_header(""), "");
/// ```
pub fn title_case_header(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
