//! Load and save the plain-text joint layout file.
//!
//! The format is one float per line: the height divisor, the span, then each
//! joint position after the implicit left support in ascending order. The
//! right support at `x = span` is stored like any other position.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::chain::Chain;
use crate::errors::LayoutError;
use crate::geometry::ArchProfile;

/// Parsed contents of a layout file.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Height divisor of the deck parabola.
    pub height_scale: f64,
    /// Full horizontal extent of the bridge.
    pub span: f64,
    /// Joint positions after the implicit `x = 0` support, ascending.
    pub positions: Vec<f64>,
}

impl Layout {
    /// The layout used when the file is missing or unreadable: a bare
    /// two-support bridge with a 1000-unit span.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            height_scale: 1.0,
            span: 1000.0,
            positions: vec![1000.0],
        }
    }

    /// Split the layout into its profile and chain.
    #[must_use]
    pub fn into_bridge(self) -> (ArchProfile, Chain) {
        let profile = ArchProfile::new(self.height_scale, self.span);
        let chain = Chain::new(&self.positions);
        (profile, chain)
    }
}

/// Parse layout text.
///
/// # Errors
///
/// Returns [`LayoutError`] when the header is missing, a line is not a
/// number, or a header value is not positive.
pub fn parse(text: &str) -> Result<Layout, LayoutError> {
    let mut values = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| LayoutError::InvalidNumber {
                line: index + 1,
                value: trimmed.to_owned(),
            })?;
        values.push(value);
    }
    if values.len() < 2 {
        return Err(LayoutError::MissingHeader);
    }
    let height_scale = values[0];
    let span = values[1];
    if height_scale <= 0.0 {
        return Err(LayoutError::NonPositiveHeader {
            name: "height scale",
            value: height_scale,
        });
    }
    if span <= 0.0 {
        return Err(LayoutError::NonPositiveHeader {
            name: "span",
            value: span,
        });
    }
    Ok(Layout {
        height_scale,
        span,
        positions: values.split_off(2),
    })
}

/// Read a layout file, falling back to [`Layout::fallback`] when the file is
/// missing or malformed.
///
/// Load failures are recovered locally rather than surfaced: the editor is
/// still useful on an empty default bridge, and the reason is logged.
#[must_use]
pub fn load_or_default(path: &Path) -> Layout {
    match fs::read_to_string(path) {
        Ok(text) => match parse(&text) {
            Ok(layout) => layout,
            Err(error) => {
                warn!("layout file {} is malformed ({error}); using the default bridge", path.display());
                Layout::fallback()
            }
        },
        Err(error) => {
            warn!("cannot read layout file {} ({error}); using the default bridge", path.display());
            Layout::fallback()
        }
    }
}

/// Write the chain back to a layout file in load order.
///
/// The synthetic `x = 0` support is never written; the right support is,
/// matching the load format.
///
/// # Errors
///
/// Returns [`LayoutError::Io`] when the file cannot be written.
pub fn save(path: &Path, profile: &ArchProfile, chain: &Chain) -> Result<(), LayoutError> {
    let mut text = format!("{:.6}\n{:.6}\n", profile.height_scale(), profile.span());
    for x in chain.saved_positions() {
        text.push_str(&format!("{x:.6}\n"));
    }
    fs::write(path, text)?;
    info!(
        "saved {} joint position(s) to {}",
        chain.len() - 1,
        path.display()
    );
    Ok(())
}
