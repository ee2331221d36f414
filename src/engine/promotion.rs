//! Release increments and cross-stream promotion of prerelease versions

use crate::domain::{Identifier, Increment, Segment, Version, VersionPattern};
use crate::engine::filter::highest_on_stream;
use crate::error::{Result, SmgrError};
use tracing::debug;

/// Increment the release of `source`, dropping prerelease and build metadata
pub fn increment_release(source: &Version, kind: Increment) -> Version {
    source.increment_release(kind)
}

/// The release increment that leads from `lower` to `higher`
///
/// Prerelease and build identifiers are ignored. Returns `Increment::None`
/// when `higher` does not have a greater release.
pub fn increment_kind_between(lower: &Version, higher: &Version) -> Increment {
    Increment::between(lower.release(), higher.release())
}

/// Compute the next release on a release-only stream
///
/// A stream with no versions yet starts at `stream.first_version()` with no
/// increment applied; otherwise the highest version on the stream is
/// incremented.
///
/// # Returns
/// * `Ok(Version)` - The next release of the stream
/// * `Err(PatternNotReleaseOnly)` - `stream` has prerelease identifiers or is empty
/// * `Err(Overflow)` - The incremented digit is already `u64::MAX`
pub fn increment_release_from_stream(
    versions: &[Version],
    stream: &VersionPattern,
    kind: Increment,
) -> Result<Version> {
    if !stream.is_release_only() {
        return Err(SmgrError::PatternNotReleaseOnly(stream.to_string()));
    }

    match highest_on_stream(versions, stream) {
        Ok(current) => {
            debug!(%current, %kind, "incrementing highest release on stream");
            let next = increment_release(&current, kind);
            if kind != Increment::None && !next.is_higher_than(&current) {
                return Err(SmgrError::Overflow(current.to_string()));
            }
            Ok(next)
        }
        Err(SmgrError::EmptyVersionList) => {
            debug!(%stream, "stream has no versions yet, seeding it");
            Ok(stream.first_version())
        }
        Err(e) => Err(e),
    }
}

/// Promote `source` onto the stream denoted by `target`
///
/// The source is first projected onto the target: literal pattern values
/// win, wildcards take the source's value, and wildcard positions the
/// source does not have become `0`. Source identifiers beyond the length of
/// the target pattern are dropped so the result stays on the stream.
///
/// On a new stream the projection stands, with a numeric last identifier
/// reset to `0` unless the target fixes it to a literal. Otherwise the projection is merged with the stream's
/// current highest version and, if needed, its last identifier advanced, so
/// the result is always strictly higher than every version already on the
/// stream.
///
/// # Returns
/// * `Ok(Version)` - The promoted version
/// * `Err(EmptyPattern)` - `target` is the empty pattern
/// * `Err(PromotionCollision)` - A release-only target already holds the
///   projected release or a higher one, or the target's last prerelease
///   identifier is a literal that cannot be advanced
/// * `Err(PromotionOffStream)` - The result would not be matched by `target`
/// * `Err(UnsupportedIdentifierShape | Overflow)` - The last identifier
///   could not be advanced
pub fn promote_prerelease(
    source: &Version,
    target: &VersionPattern,
    versions: &[Version],
) -> Result<Version> {
    if target.is_empty() {
        return Err(SmgrError::EmptyPattern);
    }

    let projected = project_onto(target, source);
    debug!(%source, %projected, %target, "projected source onto target stream");

    let promoted = match highest_on_stream(versions, target) {
        Err(SmgrError::EmptyVersionList) => seed_stream(target, projected),
        Err(e) => return Err(e),
        Ok(current) if target.is_release_only() => {
            if !projected.is_higher_than(&current) {
                return Err(SmgrError::PromotionCollision {
                    version: current.to_string(),
                    stream: target.to_string(),
                });
            }
            projected
        }
        Ok(current) => promote_above(target, &current, projected)?,
    };

    if !target.matches(&promoted) {
        return Err(SmgrError::PromotionOffStream {
            version: promoted.to_string(),
            stream: target.to_string(),
        });
    }
    Ok(promoted)
}

fn project_onto(target: &VersionPattern, source: &Version) -> Version {
    let release = target
        .release()
        .map(|pattern| pattern.project(source.release()))
        .unwrap_or(*source.release());

    Version::new(release)
        .with_prerelease(project_identifiers(target.prerelease(), source.prerelease()))
        .with_build(project_identifiers(target.build(), source.build()))
}

fn project_identifiers(
    segments: &[Segment<Identifier>],
    source: &[Identifier],
) -> Vec<Identifier> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| match segment {
            Segment::Literal(id) => id.clone(),
            Segment::Wildcard => source.get(i).cloned().unwrap_or_else(Identifier::zero),
        })
        .collect()
}

/// True when the last prerelease position of `target` takes any identifier
fn last_is_wildcard(target: &VersionPattern) -> bool {
    matches!(target.prerelease().last(), Some(Segment::Wildcard))
}

fn seed_stream(target: &VersionPattern, projected: Version) -> Version {
    if !last_is_wildcard(target) {
        return projected;
    }
    let mut prerelease = projected.prerelease().to_vec();
    match prerelease.last_mut() {
        Some(last) if last.is_numeric() => *last = Identifier::zero(),
        _ => return projected,
    }
    let build = projected.build().to_vec();
    Version::new(*projected.release())
        .with_prerelease(prerelease)
        .with_build(build)
}

fn promote_above(
    target: &VersionPattern,
    current: &Version,
    projected: Version,
) -> Result<Version> {
    // The stream moved past the source's release; promoting below it would
    // not be monotonic.
    let release = (*projected.release()).max(*current.release());

    let mut prerelease = projected.prerelease().to_vec();
    for (i, id) in current.prerelease().iter().enumerate() {
        match prerelease.get_mut(i) {
            None => prerelease.push(id.clone()),
            Some(slot) if id > slot => *slot = id.clone(),
            Some(_) => {}
        }
    }

    let build = projected.build().to_vec();
    let merged = Version::new(release)
        .with_prerelease(prerelease.clone())
        .with_build(build.clone());
    if merged.is_higher_than(current) {
        return Ok(merged);
    }

    // A literal last position pins every version of the stream to one value.
    if !last_is_wildcard(target) {
        return Err(SmgrError::PromotionCollision {
            version: current.to_string(),
            stream: target.to_string(),
        });
    }
    if let Some(last) = prerelease.last_mut() {
        *last = last.increment()?;
    }
    debug!(%current, "advanced last identifier above current stream version");
    Ok(Version::new(release)
        .with_prerelease(prerelease)
        .with_build(build))
}
