//! Package version parsing and comparison.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z.-]+))?").expect("valid regex")
});

/// A `major.minor.patch` version with an optional pre-release tag.
///
/// Missing minor or patch components parse as zero, so `"3"` and `"3.0.0"`
/// compare equal. A pre-release sorts before the release it precedes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
}

impl Version {
    /// Create a release version.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Parse a concrete version such as `3.9.2`, `v18.17.0` or `4.0.0-beta.1`.
    pub fn parse(input: &str) -> Option<Self> {
        let caps = VERSION_RE.captures(input.trim())?;
        let component = |i: usize| -> Option<u64> {
            match caps.get(i) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(0),
            }
        };

        Some(Self {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            pre: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }

    /// Extract the base version of an npm range such as `^3.1.0` or `>=2.0`.
    ///
    /// Returns `None` for ranges that do not pin a base version
    /// (`latest`, `*`, git or file specifiers).
    pub fn from_range(range: &str) -> Option<Self> {
        let trimmed = range
            .trim()
            .trim_start_matches(['^', '~', '>', '<', '=', ' ']);
        Self::parse(trimmed)
    }

    /// Whether this version is strictly older than `other`.
    pub fn is_older_than(&self, other: &Version) -> bool {
        self < other
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid version: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_version() {
        let v = Version::parse("3.9.2").unwrap();
        assert_eq!(v, Version::new(3, 9, 2));
    }

    #[test]
    fn parse_with_v_prefix() {
        assert_eq!(Version::parse("v18.17.0"), Some(Version::new(18, 17, 0)));
    }

    #[test]
    fn parse_partial_version() {
        assert_eq!(Version::parse("3"), Some(Version::new(3, 0, 0)));
        assert_eq!(Version::parse("3.1"), Some(Version::new(3, 1, 0)));
    }

    #[test]
    fn parse_prerelease() {
        let v = Version::parse("4.0.0-beta.1").unwrap();
        assert_eq!(v.pre.as_deref(), Some("beta.1"));
        assert_eq!(v.to_string(), "4.0.0-beta.1");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Version::parse("latest").is_none());
        assert!(Version::parse("").is_none());
    }

    #[test]
    fn from_range_strips_operators() {
        assert_eq!(Version::from_range("^3.1.0"), Some(Version::new(3, 1, 0)));
        assert_eq!(Version::from_range("~3.2.4"), Some(Version::new(3, 2, 4)));
        assert_eq!(Version::from_range(">=2.0"), Some(Version::new(2, 0, 0)));
        assert_eq!(Version::from_range("= 1.2.3"), Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn from_range_without_base_is_none() {
        assert!(Version::from_range("*").is_none());
        assert!(Version::from_range("github:ionic-team/ionic").is_none());
    }

    #[test]
    fn ordering_by_components() {
        assert!(Version::new(3, 1, 0) < Version::new(3, 2, 0));
        assert!(Version::new(10, 0, 0) > Version::new(9, 99, 99));
        assert!(Version::new(1, 0, 5).is_older_than(&Version::new(1, 1, 0)));
        assert!(!Version::new(1, 1, 0).is_older_than(&Version::new(1, 1, 0)));
    }

    #[test]
    fn prerelease_sorts_before_release() {
        let beta = Version::parse("4.0.0-beta.1").unwrap();
        assert!(beta < Version::new(4, 0, 0));
        assert!(beta > Version::new(3, 9, 9));
    }

    #[test]
    fn from_str_round_trips_display() {
        let v: Version = "6.1.0".parse().unwrap();
        assert_eq!(v.to_string(), "6.1.0");
        assert!("nope".parse::<Version>().is_err());
    }
}
