//! `@support` value parser.
//!
//! `android(8080-), ios(8081-8082), web` → [`PlatformSupport`].

use crate::error::CommentError;
use crate::model::{PlatformSupport, VersionRange};
use regex::Regex;
use std::sync::LazyLock;

// platform name, optional parenthesized range
static RE_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\s(),]*)\s*(?:\((.*)\))?$").unwrap());

static RE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]+)\s*-\s*([0-9]*)\s*$").unwrap());

/// Parse the value of a `@support` directive.
pub fn parse(value: &str) -> Result<PlatformSupport, CommentError> {
    let mut support = PlatformSupport::default();
    let mut web_seen = false;

    for clause in value.split(',') {
        let clause = clause.trim();
        let (platform, range) = split_clause(clause)?;

        match platform {
            "android" => {
                if support.android.is_some() {
                    return Err(CommentError::DuplicateSupportPlatform(platform.into()));
                }
                support.android = Some(parse_range(platform, range)?);
            }
            "ios" => {
                if support.ios.is_some() {
                    return Err(CommentError::DuplicateSupportPlatform(platform.into()));
                }
                support.ios = Some(parse_range(platform, range)?);
            }
            "web" => {
                if web_seen {
                    return Err(CommentError::DuplicateSupportPlatform(platform.into()));
                }
                if range.is_some() {
                    return Err(CommentError::malformed(
                        platform,
                        "web does not take a version range",
                    ));
                }
                web_seen = true;
                support.web = true;
            }
            other => return Err(CommentError::UnknownPlatform(other.to_string())),
        }
    }

    Ok(support)
}

/// Split `name(range)` into its parts. The platform name is validated by the
/// caller so unknown platforms are reported before range syntax.
fn split_clause(clause: &str) -> Result<(&str, Option<&str>), CommentError> {
    match RE_CLAUSE.captures(clause) {
        Some(caps) => {
            let platform = caps.get(1).map_or("", |m| m.as_str());
            let range = caps.get(2).map(|m| m.as_str());
            Ok((platform, range))
        }
        None => {
            let platform = clause.split('(').next().unwrap_or(clause).trim();
            if !matches!(platform, "android" | "ios" | "web") {
                return Err(CommentError::UnknownPlatform(platform.to_string()));
            }
            Err(CommentError::malformed(
                platform,
                format!("cannot parse clause {:?}", clause),
            ))
        }
    }
}

/// Parse `min-max` where `max` may be empty.
fn parse_range(platform: &str, range: Option<&str>) -> Result<VersionRange, CommentError> {
    let range = range.ok_or_else(|| {
        CommentError::malformed(platform, "expected a version range like (1-) or (1-5)")
    })?;
    let caps = RE_RANGE.captures(range).ok_or_else(|| {
        CommentError::malformed(platform, format!("expected min-max, got {:?}", range))
    })?;

    let min = parse_version(platform, &caps[1])?;
    let max = match &caps[2] {
        "" => None,
        s => Some(parse_version(platform, s)?),
    };

    if let Some(max) = max {
        if max < min {
            return Err(CommentError::malformed(
                platform,
                format!("max version {} is lower than min version {}", max, min),
            ));
        }
    }

    Ok(VersionRange { min, max })
}

fn parse_version(platform: &str, s: &str) -> Result<u32, CommentError> {
    s.parse()
        .map_err(|_| CommentError::malformed(platform, format!("invalid version {:?}", s)))
}
