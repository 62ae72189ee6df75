use crate::core::error::{TrellisError, TrellisResult};
use std::cmp::Ordering;
use std::fmt;

/// A parsed semantic version: MAJOR.MINOR.PATCH with optional
/// pre-release and build metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Pre-release identifiers (e.g., "alpha.1", "beta.2", "rc.1")
    pub prerelease: Option<String>,
    /// Build metadata (e.g., "build.123"); ignored for precedence
    pub build: Option<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Parse a full version string (e.g., "1.2.3", "v1.2.3",
    /// "1.2.3-alpha.1", "1.2.3+build.5", "1.2.3-rc.1+build.5").
    pub fn parse(s: &str) -> TrellisResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('=').unwrap_or(s);
        let s = s.strip_prefix('v').unwrap_or(s);

        // Build metadata comes after '+', pre-release after the first '-'
        let (rest, build) = match s.split_once('+') {
            Some((rest, build)) if !build.is_empty() => (rest, Some(build.to_string())),
            Some(_) => return Err(invalid(s)),
            None => (s, None),
        };
        let (core, prerelease) = match rest.split_once('-') {
            Some((core, pre)) if is_prerelease(pre) => (core, Some(pre.to_string())),
            Some(_) => return Err(invalid(s)),
            None => (rest, None),
        };

        let mut parts = core.split('.');
        let major = parse_component(parts.next(), s)?;
        let minor = parse_component(parts.next(), s)?;
        let patch = parse_component(parts.next(), s)?;
        if parts.next().is_some() {
            return Err(invalid(s));
        }

        Ok(Self {
            major,
            minor,
            patch,
            prerelease,
            build,
        })
    }

    fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple()
            .cmp(&other.triple())
            .then_with(|| compare_prerelease(self.prerelease.as_deref(), other.prerelease.as_deref()))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pre-release precedence: a released version outranks any pre-release of
/// the same triple; identifiers compare piecewise, numeric before
/// alphanumeric, numerics numerically, the rest lexically.
fn compare_prerelease(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let mut left = a.split('.');
            let mut right = b.split('.');
            loop {
                match (left.next(), right.next()) {
                    (None, None) => return Ordering::Equal,
                    (None, Some(_)) => return Ordering::Less,
                    (Some(_), None) => return Ordering::Greater,
                    (Some(l), Some(r)) => {
                        let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                            (Ok(ln), Ok(rn)) => ln.cmp(&rn),
                            (Ok(_), Err(_)) => Ordering::Less,
                            (Err(_), Ok(_)) => Ordering::Greater,
                            (Err(_), Err(_)) => l.cmp(r),
                        };
                        if ord != Ordering::Equal {
                            return ord;
                        }
                    }
                }
            }
        }
    }
}

fn is_prerelease(s: &str) -> bool {
    !s.is_empty()
        && s.split('.')
            .all(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
}

fn parse_component(part: Option<&str>, original: &str) -> TrellisResult<u64> {
    part.filter(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| invalid(original))
}

fn invalid(s: &str) -> TrellisError {
    TrellisError::Version(format!("Invalid version format: {}", s))
}

/// Comparison operators of the npm range grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    /// Exact match on the specified components: "1.2.3", "1.2", "1.x"
    Exact,
    /// Greater than: ">1.2.3"
    Greater,
    /// Greater than or equal: ">=1.2.3"
    GreaterEq,
    /// Less than: "<2.0.0"
    Less,
    /// Less than or equal: "<=2.0.0"
    LessEq,
    /// Compatible within the leftmost non-zero component: "^1.2.3"
    Caret,
    /// Patch-level changes: "~1.2.3"
    Tilde,
}

/// One comparator of a range. Unspecified components are wildcards, so
/// "1.2" and "1.2.x" parse to the same comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    prerelease: Option<String>,
}

impl Comparator {
    fn lower(&self) -> Version {
        Version {
            major: self.major.unwrap_or(0),
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            prerelease: self.prerelease.clone(),
            build: None,
        }
    }

    fn matches(&self, v: &Version) -> bool {
        match self.op {
            Op::Exact => {
                self.major.map_or(true, |m| m == v.major)
                    && self.minor.map_or(true, |m| m == v.minor)
                    && self.patch.map_or(true, |p| p == v.patch)
                    && self.prerelease == v.prerelease
            }
            Op::Greater => v > &self.lower(),
            Op::GreaterEq => v >= &self.lower(),
            Op::Less => v < &self.lower(),
            Op::LessEq => v <= &self.lower(),
            Op::Caret => {
                let lower = self.lower();
                let upper = if lower.major > 0 || self.minor.is_none() {
                    Version::new(lower.major + 1, 0, 0)
                } else if lower.minor > 0 || self.patch.is_none() {
                    Version::new(0, lower.minor + 1, 0)
                } else {
                    Version::new(0, 0, lower.patch + 1)
                };
                v >= &lower && v.triple() < upper.triple()
            }
            Op::Tilde => {
                let lower = self.lower();
                let upper = if self.minor.is_some() {
                    Version::new(lower.major, lower.minor + 1, 0)
                } else {
                    Version::new(lower.major + 1, 0, 0)
                };
                v >= &lower && v.triple() < upper.triple()
            }
        }
    }

    /// Pre-release versions only match comparators that name a
    /// pre-release of the same triple.
    fn admits_prerelease_of(&self, v: &Version) -> bool {
        self.prerelease.is_some()
            && self.major == Some(v.major)
            && self.minor == Some(v.minor)
            && self.patch == Some(v.patch)
    }

    fn parse(token: &str) -> TrellisResult<Self> {
        let (op, rest) = if let Some(rest) = token.strip_prefix(">=") {
            (Op::GreaterEq, rest)
        } else if let Some(rest) = token.strip_prefix("<=") {
            (Op::LessEq, rest)
        } else if let Some(rest) = token.strip_prefix('>') {
            (Op::Greater, rest)
        } else if let Some(rest) = token.strip_prefix('<') {
            (Op::Less, rest)
        } else if let Some(rest) = token.strip_prefix('^') {
            (Op::Caret, rest)
        } else if let Some(rest) = token.strip_prefix('~') {
            (Op::Tilde, rest)
        } else if let Some(rest) = token.strip_prefix('=') {
            (Op::Exact, rest)
        } else {
            (Op::Exact, token)
        };

        let (major, minor, patch, prerelease) = parse_partial(rest.trim())?;
        Ok(Self {
            op,
            major,
            minor,
            patch,
            prerelease,
        })
    }
}

type Partial = (Option<u64>, Option<u64>, Option<u64>, Option<String>);

/// Parse a possibly-partial version: "1", "1.2", "1.2.3", "1.x", "1.2.*",
/// "*", "" (empty matches everything), with an optional pre-release tag
/// when all three components are given.
fn parse_partial(s: &str) -> TrellisResult<Partial> {
    let s = s.strip_prefix('v').unwrap_or(s);
    if s.is_empty() || s == "*" || s == "x" || s == "X" {
        return Ok((None, None, None, None));
    }

    let (core, prerelease) = match s.split_once('-') {
        Some((core, pre)) if is_prerelease(pre) => (core, Some(pre.to_string())),
        Some(_) => return Err(invalid(s)),
        None => (s, None),
    };
    // Build metadata is accepted and discarded
    let core = core.split_once('+').map_or(core, |(c, _)| c);

    let mut components = [None, None, None];
    let mut parts = core.split('.');
    for slot in components.iter_mut() {
        match parts.next() {
            None => break,
            Some("x") | Some("X") | Some("*") => break,
            Some(p) if !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()) => {
                *slot = Some(p.parse().map_err(|_| invalid(s))?);
            }
            Some(_) => return Err(invalid(s)),
        }
    }
    if parts.next().is_some() {
        return Err(invalid(s));
    }

    let [major, minor, patch] = components;
    if major.is_none() && (minor.is_some() || patch.is_some()) {
        return Err(invalid(s));
    }
    if prerelease.is_some() && patch.is_none() {
        return Err(invalid(s));
    }
    Ok((major, minor, patch, prerelease))
}

/// A version requirement: an OR-union of comparator sets, npm style.
///
/// "^1.2.3", ">=1.0.0 <2.0.0", "1.2.3 - 2.0.0" and "1.x || >=2.5.0" all
/// parse; dist-tags such as "latest" or "next" do not, which is exactly
/// the property the manifest layer's partitioning relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionReq {
    sets: Vec<Vec<Comparator>>,
}

impl VersionReq {
    /// Match-anything requirement ("*")
    pub fn any() -> Self {
        Self {
            sets: vec![vec![Comparator {
                op: Op::Exact,
                major: None,
                minor: None,
                patch: None,
                prerelease: None,
            }]],
        }
    }

    pub fn parse(s: &str) -> TrellisResult<Self> {
        let mut sets = Vec::new();
        for alternative in s.split("||") {
            sets.push(Self::parse_set(alternative.trim())?);
        }
        Ok(Self { sets })
    }

    fn parse_set(s: &str) -> TrellisResult<Vec<Comparator>> {
        if s.is_empty() {
            return Ok(vec![Comparator {
                op: Op::Exact,
                major: None,
                minor: None,
                patch: None,
                prerelease: None,
            }]);
        }

        // Hyphen range: "1.2.3 - 2.0.0" (the spaces are significant)
        if let Some((lower, upper)) = s.split_once(" - ") {
            let (major, minor, patch, prerelease) = parse_partial(lower.trim())?;
            let lower_cmp = Comparator {
                op: Op::GreaterEq,
                major,
                minor,
                patch,
                prerelease,
            };
            let (major, minor, patch, prerelease) = parse_partial(upper.trim())?;
            // A partial upper bound excludes the next boundary: "- 2.3"
            // means "<2.4.0" and "- 2" means "<3.0.0", while a full
            // "- 2.3.4" means "<=2.3.4".
            let upper_cmp = match (major, minor, patch) {
                (_, _, Some(_)) | (None, _, _) => Comparator {
                    op: Op::LessEq,
                    major,
                    minor,
                    patch,
                    prerelease,
                },
                (Some(major), Some(minor), None) => Comparator {
                    op: Op::Less,
                    major: Some(major),
                    minor: Some(minor + 1),
                    patch: Some(0),
                    prerelease: None,
                },
                (Some(major), None, None) => Comparator {
                    op: Op::Less,
                    major: Some(major + 1),
                    minor: Some(0),
                    patch: Some(0),
                    prerelease: None,
                },
            };
            return Ok(vec![lower_cmp, upper_cmp]);
        }

        s.split_whitespace().map(Comparator::parse).collect()
    }

    pub fn matches(&self, v: &Version) -> bool {
        self.sets.iter().any(|set| {
            let all = set.iter().all(|c| c.matches(v));
            if !all {
                return false;
            }
            if v.prerelease.is_some() {
                return set.iter().any(|c| c.admits_prerelease_of(v));
            }
            true
        })
    }
}

/// Whether a declared version specifier is resolvable: a valid semantic
/// version or range. Everything else (dist-tags, unsubstituted template
/// tokens, URLs) is a placeholder that must be handed to the package
/// manager as an install target instead of being persisted.
pub fn is_valid_spec(spec: &str) -> bool {
    VersionReq::parse(spec.trim()).is_ok()
}
