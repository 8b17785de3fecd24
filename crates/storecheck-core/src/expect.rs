//! Assertions over resolution results.
//!
//! Each helper returns an [`ExpectationFailure`] carrying what was expected and
//! what was observed, so a failed case can report the diff.

use crate::element::ElementHandle;
use crate::resolution::Resolution;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{description}: expected {expected}, but {actual}")]
pub struct ExpectationFailure {
    pub description: String,
    pub expected: String,
    pub actual: String,
}

fn fail(
    description: &str,
    expected: impl Into<String>,
    actual: impl Into<String>,
) -> ExpectationFailure {
    ExpectationFailure {
        description: description.to_string(),
        expected: expected.into(),
        actual: actual.into(),
    }
}

fn describe(resolution: &Resolution) -> String {
    match resolution.selector() {
        Some(sel) => format!("'{}' matched {} element(s)", sel, resolution.count),
        None => "no candidate matched".to_string(),
    }
}

/// At least one element matched.
pub fn present(resolution: &Resolution, description: &str) -> Result<(), ExpectationFailure> {
    if resolution.count > 0 {
        Ok(())
    } else {
        Err(fail(description, "at least one element", describe(resolution)))
    }
}

/// At least one matched element is rendered visibly; returns it.
pub fn visible<'a>(
    resolution: &'a Resolution,
    description: &str,
) -> Result<&'a ElementHandle, ExpectationFailure> {
    present(resolution, description)?;
    resolution.first_visible().ok_or_else(|| {
        fail(
            description,
            "a visible element",
            format!("{}, none visible", describe(resolution)),
        )
    })
}

/// Some matched element carries `name`; an empty value still counts.
pub fn has_attr<'a>(
    resolution: &'a Resolution,
    name: &str,
    description: &str,
) -> Result<&'a ElementHandle, ExpectationFailure> {
    present(resolution, description)?;
    resolution
        .elements
        .iter()
        .find(|el| el.attr(name).is_some())
        .ok_or_else(|| {
            fail(
                description,
                format!("attribute '{}'", name),
                format!("{}, none with '{}'", describe(resolution), name),
            )
        })
}

/// Some matched element carries a non-empty `name`.
pub fn attr_not_empty<'a>(
    resolution: &'a Resolution,
    name: &str,
    description: &str,
) -> Result<&'a ElementHandle, ExpectationFailure> {
    has_attr(resolution, name, description)?;
    resolution
        .elements
        .iter()
        .find(|el| el.attr(name).is_some_and(|v| !v.trim().is_empty()))
        .ok_or_else(|| {
            fail(
                description,
                format!("non-empty attribute '{}'", name),
                format!("every '{}' is empty", name),
            )
        })
}

/// `element` itself carries a non-empty `name`.
pub fn element_attr_not_empty(
    element: &ElementHandle,
    name: &str,
    description: &str,
) -> Result<(), ExpectationFailure> {
    match element.attr(name) {
        Some(value) if !value.trim().is_empty() => Ok(()),
        Some(_) => Err(fail(
            description,
            format!("non-empty attribute '{}'", name),
            format!("<{}> #{} has an empty '{}'", element.tag, element.index, name),
        )),
        None => Err(fail(
            description,
            format!("non-empty attribute '{}'", name),
            format!("<{}> #{} has no '{}'", element.tag, element.index, name),
        )),
    }
}

pub fn url_contains(url: &str, needle: &str, description: &str) -> Result<(), ExpectationFailure> {
    if url.contains(needle) {
        Ok(())
    } else {
        Err(fail(
            description,
            format!("URL containing '{}'", needle),
            format!("URL was '{}'", url),
        ))
    }
}

pub fn url_not_contains(
    url: &str,
    needle: &str,
    description: &str,
) -> Result<(), ExpectationFailure> {
    if url.contains(needle) {
        Err(fail(
            description,
            format!("URL without '{}'", needle),
            format!("URL was '{}'", url),
        ))
    } else {
        Ok(())
    }
}

/// The rendered text of some visible matched element contains `needle`.
pub fn text_visible(
    resolution: &Resolution,
    needle: &str,
    description: &str,
) -> Result<(), ExpectationFailure> {
    if resolution.visible().any(|el| el.text.contains(needle)) {
        Ok(())
    } else {
        Err(fail(
            description,
            format!("visible text '{}'", needle),
            describe(resolution),
        ))
    }
}

/// The rendered text of some matched element contains any of `needles`.
pub fn text_contains_any(
    resolution: &Resolution,
    needles: &[String],
    description: &str,
) -> Result<(), ExpectationFailure> {
    let found = resolution
        .elements
        .iter()
        .any(|el| needles.iter().any(|n| el.text.contains(n.as_str())));
    if found {
        Ok(())
    } else {
        Err(fail(
            description,
            format!("text containing one of {:?}", needles),
            describe(resolution),
        ))
    }
}
