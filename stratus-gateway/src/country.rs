//! Country calling-code table
//!
//! The cloud service publishes a mapping of ISO region keys to the
//! dial codes in use there (most regions have one, some territories
//! share several). The verification screen uses the table to
//! auto-select the device's region and to feed the country picker,
//! which consumes entries in the encoded `KEY:code1,code2,` form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// A selected country: region key, display name, and dial code
///
/// The three fields are always set together; a partial selection never
/// exists. `dial_code` carries the leading `+`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySelection {
    /// ISO region key, e.g. `"US"`
    pub country_code: String,
    /// Display name as shown in the country field
    pub country_name: String,
    /// `+`-prefixed calling code, e.g. `"+1"`
    pub dial_code: String,
}

impl CountrySelection {
    pub fn new(
        country_code: impl Into<String>,
        country_name: impl Into<String>,
        dial_code: impl Into<String>,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            country_name: country_name.into(),
            dial_code: dial_code.into(),
        }
    }

    /// Field label in the form the original screens render: `Name (+1)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.country_name, self.dial_code)
    }
}

/// Country calling codes as fetched from the service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryCallingCodes {
    codes: BTreeMap<String, Vec<String>>,
}

impl CountryCallingCodes {
    pub fn from_map(codes: BTreeMap<String, Vec<String>>) -> Self {
        Self { codes }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Case-insensitive lookup of a region key
    ///
    /// Returns a selection built from the first dial code listed for
    /// the region. Display-name localization is the host's concern;
    /// the region key stands in for the name until a picker result
    /// overwrites it.
    pub fn match_region(&self, region: &str) -> Option<CountrySelection> {
        if region.is_empty() {
            return None;
        }
        let (key, dial_codes) = self
            .codes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(region))?;
        let code = dial_codes.first()?;
        debug!("Matched region {} to dial code +{}", key, code);
        Some(CountrySelection::new(
            key.clone(),
            key.clone(),
            format!("+{}", code),
        ))
    }

    /// Encode the table for the country-picker navigation contract
    ///
    /// One entry per region: the key, a colon, then every dial code
    /// followed by a comma (`US:1,`).
    pub fn picker_entries(&self) -> Vec<String> {
        self.codes
            .iter()
            .map(|(key, dial_codes)| {
                let mut entry = format!("{}:", key);
                for code in dial_codes {
                    entry.push_str(code);
                    entry.push(',');
                }
                entry
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CountryCallingCodes {
        let mut map = BTreeMap::new();
        map.insert("GB".to_string(), vec!["44".to_string()]);
        map.insert("US".to_string(), vec!["1".to_string()]);
        map.insert(
            "XK".to_string(),
            vec!["377".to_string(), "381".to_string(), "386".to_string()],
        );
        CountryCallingCodes::from_map(map)
    }

    #[test]
    fn test_match_region_case_insensitive() {
        let codes = sample();
        let selection = codes.match_region("us").unwrap();
        assert_eq!(selection.country_code, "US");
        assert_eq!(selection.dial_code, "+1");

        assert!(codes.match_region("DE").is_none());
        assert!(codes.match_region("").is_none());
    }

    #[test]
    fn test_match_region_takes_first_dial_code() {
        let codes = sample();
        let selection = codes.match_region("xk").unwrap();
        assert_eq!(selection.dial_code, "+377");
    }

    #[test]
    fn test_picker_entries_encoding() {
        let codes = sample();
        let entries = codes.picker_entries();
        assert_eq!(entries.len(), 3);
        assert!(entries.contains(&"US:1,".to_string()));
        assert!(entries.contains(&"GB:44,".to_string()));
        assert!(entries.contains(&"XK:377,381,386,".to_string()));
    }

    #[test]
    fn test_selection_label() {
        let selection = CountrySelection::new("US", "United States", "+1");
        assert_eq!(selection.label(), "United States (+1)");
    }
}
