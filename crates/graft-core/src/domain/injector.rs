//! Marker-based fragment injection.
//!
//! ```text
//! before                           after
//! ──────                           ─────
//! import (                         import (
//!     "os"                             "os"
//!     // +graft:...:imports            batchv1 "example.com/op/api/v1"
//! )                                    // +graft:...:imports
//!                                  )
//! ```
//!
//! Every declared marker is located before anything is inserted, so a
//! missing or duplicated anchor fails without producing half-updated text.
//! Fragments land directly above their marker, take its indentation and line
//! ending, and keep registration order. The marker line itself stays put so
//! later runs can find it again.
//!
//! A fragment whose lines already form a contiguous block in the marker's
//! section (the lines between the previous scaffold marker, or the top of
//! the file, and this one) is skipped, which makes repeated runs converge.
//!
//! The check is textual and works on trimmed lines. A fragment that is a
//! sub-block of something already in the section, such as a lone `return`
//! under an earlier `if ok { return }`, counts as present and is not
//! written, even when it was registered in the same run. Fragments that
//! must appear on their own need text no other block in the section holds.

use crate::domain::{
    entities::{
        common::RelativePath,
        inserter::InserterSpec,
        marker::{MARKER_PREFIX, Marker},
    },
    error::DomainError,
};

/// Result of injecting fragments into a file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    pub content: String,
    /// Fragments written.
    pub inserted: usize,
    /// Fragments skipped because they were already present.
    pub deduplicated: usize,
}

impl Injection {
    pub fn changed(&self) -> bool {
        self.inserted > 0
    }
}

/// Insert `spec`'s emitted fragments into `content`, the text of the file at
/// `path`.
pub fn inject(
    content: &str,
    path: &RelativePath,
    spec: &InserterSpec,
) -> Result<Injection, DomainError> {
    spec.validate()?;

    let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();

    let mut anchors = Vec::with_capacity(spec.markers().len());
    for name in spec.markers() {
        let marker = Marker::new(path.clone(), name.as_str())?;
        let hits: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| marker.matches(line))
            .map(|(i, _)| i)
            .collect();
        match hits.as_slice() {
            [] => {
                return Err(DomainError::MarkerNotFound {
                    path: path.as_path().to_path_buf(),
                    marker: name.clone(),
                });
            }
            [index] => anchors.push((*index, name.as_str())),
            many => {
                return Err(DomainError::DuplicateMarker {
                    path: path.as_path().to_path_buf(),
                    marker: name.clone(),
                    count: many.len(),
                });
            }
        }
    }

    // Bottom-up keeps the remaining anchor indices valid.
    anchors.sort_by(|a, b| b.0.cmp(&a.0));

    let mut inserted = 0;
    let mut deduplicated = 0;
    for (index, name) in anchors {
        let (indent, eol) = line_shape(&lines[index]);
        let mut at = index;
        for fragment in spec.fragments_for(name) {
            if already_present(&lines[..at], fragment.lines()) {
                deduplicated += 1;
                continue;
            }
            let block: Vec<String> = fragment
                .lines()
                .iter()
                .map(|line| {
                    if line.trim().is_empty() {
                        eol.to_string()
                    } else {
                        format!("{indent}{line}{eol}")
                    }
                })
                .collect();
            let len = block.len();
            lines.splice(at..at, block);
            at += len;
            inserted += 1;
        }
    }

    Ok(Injection {
        content: lines.concat(),
        inserted,
        deduplicated,
    })
}

fn line_shape(line: &str) -> (String, &'static str) {
    let indent: String = line
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    let eol = if line.ends_with("\r\n") { "\r\n" } else { "\n" };
    (indent, eol)
}

fn already_present(above: &[String], fragment: &[String]) -> bool {
    if fragment.is_empty() {
        return true;
    }
    let start = above
        .iter()
        .rposition(|line| line.contains(MARKER_PREFIX))
        .map_or(0, |i| i + 1);
    let section: Vec<&str> = above[start..].iter().map(|l| l.trim()).collect();
    let needle: Vec<&str> = fragment.iter().map(|l| l.trim()).collect();
    section.windows(needle.len()).any(|w| w == needle.as_slice())
}
