//! Debian version ordering.
//!
//! Versions have the form `[epoch:]upstream[-revision]`. The epoch compares
//! numerically; upstream and revision compare with the dpkg algorithm where
//! digit runs compare as numbers and everything else compares by character
//! class, with `~` sorting before the end of the string.

use std::cmp::Ordering;
use std::fmt;

/// Compare two Debian version strings.
pub fn compare(a: &str, b: &str) -> Ordering {
    let a = Parts::split(a);
    let b = Parts::split(b);

    a.epoch
        .cmp(&b.epoch)
        .then_with(|| verrevcmp(a.upstream, b.upstream))
        .then_with(|| verrevcmp(a.revision, b.revision))
}

/// Return the highest version of the iterator, or `None` if it is empty.
///
/// On ties the first candidate wins.
pub fn max_version<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions.into_iter().fold(None, |best, v| match best {
        Some(b) if compare(v, b) != Ordering::Greater => Some(b),
        _ => Some(v),
    })
}

/// A Debian version string ordered by [`compare`].
///
/// Equality follows the ordering, so `1.0` and `1.00` are equal.
#[derive(Debug, Clone)]
pub struct DebianVersion(String);

impl DebianVersion {
    pub fn new(version: impl Into<String>) -> Self {
        DebianVersion(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for DebianVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DebianVersion {}

impl PartialOrd for DebianVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DebianVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.0, &other.0)
    }
}

impl fmt::Display for DebianVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct Parts<'a> {
    epoch: u64,
    upstream: &'a str,
    revision: &'a str,
}

impl<'a> Parts<'a> {
    fn split(version: &'a str) -> Self {
        let version = version.trim();

        // A non-numeric prefix before ':' is not an epoch; keep it in upstream.
        let (epoch, rest) = match version.split_once(':') {
            Some((e, rest)) => match e.parse::<u64>() {
                Ok(epoch) => (epoch, rest),
                Err(_) => (0, version),
            },
            None => (0, version),
        };

        let (upstream, revision) = match rest.rsplit_once('-') {
            Some((up, rev)) => (up, rev),
            None => (rest, ""),
        };

        Parts {
            epoch,
            upstream,
            revision,
        }
    }
}

/// Sort weight of a non-digit position. `None` is the end of the string.
fn order(c: Option<u8>) -> i32 {
    match c {
        None => 0,
        Some(b'~') => -1,
        Some(c) if c.is_ascii_digit() => 0,
        Some(c) if c.is_ascii_alphabetic() => i32::from(c),
        Some(c) => i32::from(c) + 256,
    }
}

fn verrevcmp(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let (mut i, mut j) = (0, 0);
    let is_digit = |s: &[u8], k: usize| s.get(k).is_some_and(u8::is_ascii_digit);

    while i < a.len() || j < b.len() {
        // Non-digit prefix
        while (i < a.len() && !is_digit(a, i)) || (j < b.len() && !is_digit(b, j)) {
            let ac = order(a.get(i).copied());
            let bc = order(b.get(j).copied());
            if ac != bc {
                return ac.cmp(&bc);
            }
            i += 1;
            j += 1;
        }

        while a.get(i) == Some(&b'0') {
            i += 1;
        }
        while b.get(j) == Some(&b'0') {
            j += 1;
        }

        // Digit run: longer run wins, otherwise first differing digit
        let mut first_diff = Ordering::Equal;
        while is_digit(a, i) && is_digit(b, j) {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }
        if is_digit(a, i) {
            return Ordering::Greater;
        }
        if is_digit(b, j) {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }

    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs_not_lexical() {
        assert_eq!(compare("10", "9"), Ordering::Greater);
        assert_eq!(compare("9", "10"), Ordering::Less);
        assert_eq!(compare("1.10", "1.9"), Ordering::Greater);
        assert_eq!(compare("2.0.10", "2.0.2"), Ordering::Greater);
    }

    #[test]
    fn test_equal_versions() {
        assert_eq!(compare("1.0", "1.0"), Ordering::Equal);
        assert_eq!(compare("1.0", "1.00"), Ordering::Equal);
        assert_eq!(compare("0:1.0", "1.0"), Ordering::Equal);
        assert_eq!(compare("1.0-0", "1.0"), Ordering::Equal);
    }

    #[test]
    fn test_epoch_dominates() {
        assert_eq!(compare("1:1.0", "2.0"), Ordering::Greater);
        assert_eq!(compare("1:1.0", "2:0.1"), Ordering::Less);
    }

    #[test]
    fn test_revision() {
        assert_eq!(compare("1.0-1", "1.0-2"), Ordering::Less);
        assert_eq!(compare("1.0-10", "1.0-9"), Ordering::Greater);
        assert_eq!(compare("1.0-2", "1.1-1"), Ordering::Less);
        // Only the last hyphen separates the revision
        assert_eq!(compare("1.0-beta-2", "1.0-beta-1"), Ordering::Greater);
    }

    #[test]
    fn test_tilde_sorts_first() {
        assert_eq!(compare("1.0~rc1", "1.0"), Ordering::Less);
        assert_eq!(compare("1.0~rc1", "1.0~rc2"), Ordering::Less);
        assert_eq!(compare("1.0~~", "1.0~"), Ordering::Less);
    }

    #[test]
    fn test_letters_before_symbols() {
        assert_eq!(compare("1.0a", "1.0"), Ordering::Greater);
        assert_eq!(compare("1.0a", "1.0+"), Ordering::Less);
        assert_eq!(compare("1.0+dfsg", "1.0"), Ordering::Greater);
    }

    #[test]
    fn test_max_version() {
        assert_eq!(max_version(["9", "10", "2"]), Some("10"));
        assert_eq!(max_version(["1.0~rc1", "1.0"]), Some("1.0"));
        assert_eq!(max_version(Vec::<&str>::new()), None);
        // First of equal candidates is kept
        assert_eq!(max_version(["1.0", "1.00"]), Some("1.0"));
    }

    #[test]
    fn test_debian_version_ord() {
        let mut versions: Vec<_> = ["10", "9", "1:0.1", "9~beta"]
            .into_iter()
            .map(DebianVersion::new)
            .collect();
        versions.sort();

        let sorted: Vec<_> = versions.iter().map(DebianVersion::as_str).collect();
        assert_eq!(sorted, vec!["9~beta", "9", "10", "1:0.1"]);
    }
}
