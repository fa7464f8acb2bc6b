//! Name validation and URL construction
//!
//! Container and object names are checked here before any request is built,
//! so violations never reach the network.

use crate::{Error, Result};
use url::Url;

/// Maximum container name length in characters accepted by the API
pub const MAX_CONTAINER_NAME_LENGTH: usize = 256;
/// Maximum object name length in characters accepted by the API
pub const MAX_OBJECT_NAME_LENGTH: usize = 1024;

/// Validate a container name: non-empty, within the character limit,
/// and free of `/` and `?`.
pub fn validate_container_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyArgument("container name"));
    }
    if name.chars().count() > MAX_CONTAINER_NAME_LENGTH || name.contains('/') || name.contains('?')
    {
        return Err(Error::InvalidContainerName(name.to_string()));
    }
    Ok(())
}

/// Validate an object name: non-empty after stripping a leading slash,
/// within the character limit, and free of `?`.
pub fn validate_object_name(name: &str) -> Result<()> {
    let name = clean_object_name(name);
    if name.is_empty() {
        return Err(Error::EmptyArgument("object name"));
    }
    if name.chars().count() > MAX_OBJECT_NAME_LENGTH || name.contains('?') {
        return Err(Error::InvalidObjectName(name.to_string()));
    }
    Ok(())
}

/// Object names are path-like; a leading slash is not part of the name.
pub fn clean_object_name(name: &str) -> &str {
    name.strip_prefix('/').unwrap_or(name)
}

fn base_url(raw: &str) -> Result<Url> {
    if raw.is_empty() {
        return Err(Error::EmptyArgument("storage URL"));
    }
    Ok(Url::parse(raw)?)
}

/// `{base}/{container}` with the container name percent-encoded as a
/// single path segment.
pub fn container_url(base: &str, container: &str) -> Result<Url> {
    let mut url = base_url(base)?;
    url.path_segments_mut()
        .map_err(|_| Error::InvalidResponse(format!("URL cannot be a base: {base}")))?
        .pop_if_empty()
        .push(container);
    Ok(url)
}

/// `{base}/{container}/{object}` with every path segment percent-encoded.
/// The `/` separators inside the object name survive as segment boundaries.
pub fn object_url(base: &str, container: &str, object: &str) -> Result<Url> {
    let mut url = container_url(base, container)?;
    url.path_segments_mut()
        .map_err(|_| Error::InvalidResponse(format!("URL cannot be a base: {base}")))?
        .extend(clean_object_name(object).split('/'));
    Ok(url)
}
