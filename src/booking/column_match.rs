//! Column guessing for loosely-structured booking exports.
//
// Exports from different booking systems name the same column differently
// ("Supplier: Supplier Name", "Guide", "Resource", ...). Each semantic role
// carries an ordered synonym list and is resolved against the header row once
// per import.

use std::collections::HashMap;
use std::fmt;

/// Find the column matching one of `candidates`.
///
/// An exact case-insensitive match on any candidate wins, tried in candidate
/// order. Otherwise the first column (in header order) whose lowercased name
/// contains any candidate is returned.
pub fn match_column<S: AsRef<str>>(available: &[S], candidates: &[&str]) -> Option<usize> {
    let mut lookup: HashMap<String, usize> = HashMap::with_capacity(available.len());
    for (index, column) in available.iter().enumerate() {
        // Later duplicates overwrite earlier ones, matching a dict built from the header row.
        lookup.insert(column.as_ref().to_lowercase(), index);
    }

    for candidate in candidates {
        if let Some(&index) = lookup.get(&candidate.to_lowercase()) {
            return Some(index);
        }
    }

    available.iter().position(|column| {
        let lowered = column.as_ref().to_lowercase();
        candidates.iter().any(|candidate| lowered.contains(&candidate.to_lowercase()))
    })
}

/// Semantic roles the import normalizer needs to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Supplier,
    Date,
    Time,
    Client,
    Service,
    Pax,
    Status,
}

impl ColumnRole {
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::Supplier => &["Supplier: Supplier Name", "Supplier", "Guide", "Resource"],
            ColumnRole::Date => &["Booking Start Date", "Service Date", "Date"],
            ColumnRole::Time => &["Start Time", "Time"],
            ColumnRole::Client => &["Trip: Client Name", "Client", "Account", "Contact"],
            ColumnRole::Service => &["Service", "Product", "Service Name", "Task"],
            ColumnRole::Pax => &["Number of Travelers", "PAX", "Guests"],
            ColumnRole::Status => &["Status", "Booking Status"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Supplier => "supplier",
            ColumnRole::Date => "date",
            ColumnRole::Time => "time",
            ColumnRole::Client => "client",
            ColumnRole::Service => "service",
            ColumnRole::Pax => "pax",
            ColumnRole::Status => "status",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when one or more required roles have no matching column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required columns in CSV: {}", join_roles(.missing))]
pub struct MissingColumnsError {
    pub missing: Vec<ColumnRole>,
}

fn join_roles(roles: &[ColumnRole]) -> String {
    roles.iter().map(ColumnRole::as_str).collect::<Vec<_>>().join(", ")
}

impl MissingColumnsError {
    pub fn names(&self) -> Vec<&'static str> {
        self.missing.iter().map(ColumnRole::as_str).collect()
    }
}

/// Header positions of every resolved role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub supplier: usize,
    pub date: usize,
    pub time: usize,
    pub client: usize,
    pub service: usize,
    pub pax: usize,
    pub status: Option<usize>,
}

impl ColumnMap {
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, MissingColumnsError> {
        let mut missing = Vec::new();
        let mut locate = |role: ColumnRole| {
            let found = match_column(headers, role.synonyms());
            if found.is_none() {
                missing.push(role);
            }
            found.unwrap_or_default()
        };

        let map = Self {
            supplier: locate(ColumnRole::Supplier),
            date: locate(ColumnRole::Date),
            time: locate(ColumnRole::Time),
            client: locate(ColumnRole::Client),
            service: locate(ColumnRole::Service),
            pax: locate(ColumnRole::Pax),
            status: match_column(headers, ColumnRole::Status.synonyms()),
        };

        if missing.is_empty() {
            Ok(map)
        } else {
            Err(MissingColumnsError { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_match_beats_substring() {
        let headers = ["Preferred Supplier Notes", "Supplier"];
        assert_eq!(match_column(&headers, ColumnRole::Supplier.synonyms()), Some(1));
    }

    #[test]
    fn test_first_candidate_wins_over_first_column() {
        // "Guide" appears first in the header, but "Supplier" is the earlier candidate.
        let headers = ["Guide", "Supplier"];
        assert_eq!(match_column(&headers, ColumnRole::Supplier.synonyms()), Some(1));
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let headers = ["pax", "NUMBER OF TRAVELERS"];
        assert_eq!(match_column(&headers, ColumnRole::Pax.synonyms()), Some(1));
    }

    #[test]
    fn test_substring_fallback_uses_column_order() {
        let headers = ["Lead Guide", "Backup Resource"];
        assert_eq!(match_column(&headers, ColumnRole::Supplier.synonyms()), Some(0));
    }

    #[test]
    fn test_no_match() {
        let headers = ["foo", "bar"];
        assert_eq!(match_column(&headers, ColumnRole::Client.synonyms()), None);
    }

    #[test]
    fn test_resolve_salesforce_headers() {
        let headers = [
            "Supplier: Supplier Name",
            "Booking Start Date",
            "Start Time",
            "Trip: Client Name",
            "Service",
            "Number of Travelers",
            "Booking Status",
        ];
        let map = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(map.supplier, 0);
        assert_eq!(map.date, 1);
        assert_eq!(map.time, 2);
        assert_eq!(map.client, 3);
        assert_eq!(map.service, 4);
        assert_eq!(map.pax, 5);
        assert_eq!(map.status, Some(6));
    }

    #[test]
    fn test_resolve_names_every_missing_role() {
        let headers = ["Guide", "Date", "Time"];
        let err = ColumnMap::resolve(&headers).unwrap_err();
        assert_eq!(err.names(), vec!["client", "service", "pax"]);
        assert_eq!(err.to_string(), "Missing required columns in CSV: client, service, pax");
    }

    #[test]
    fn test_status_is_optional() {
        let headers = ["Guide", "Date", "Time", "Client", "Product", "Guests"];
        let map = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(map.status, None);
    }
}
