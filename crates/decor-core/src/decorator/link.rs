//! Attaching comments and line breaks to decoration slots

use super::fragment::Fragment;
use super::{DecorationMap, NodeId};
use crate::dst::{NEWLINE, Slot};
use crate::error::DecorError;
use crate::result::Result;

/// A way of looking for the slot a comment or line break belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Search {
    /// Nearest slot before the fragment
    Backward { stop_newline: bool, stop_code: bool },
    /// Nearest slot after the fragment
    Forward { stop_code: bool },
}

const COMMENT_SEARCHES: [Search; 5] = [
    Search::Backward {
        stop_newline: true,
        stop_code: true,
    },
    Search::Forward { stop_code: true },
    Search::Backward {
        stop_newline: false,
        stop_code: true,
    },
    Search::Forward { stop_code: false },
    Search::Backward {
        stop_newline: false,
        stop_code: false,
    },
];

const NEWLINE_SEARCHES: [Search; 4] = [
    Search::Backward {
        stop_newline: false,
        stop_code: true,
    },
    Search::Forward { stop_code: true },
    Search::Forward { stop_code: false },
    Search::Backward {
        stop_newline: false,
        stop_code: false,
    },
];

impl Search {
    /// Index of the decoration fragment this search finds from `index`
    fn run(self, fragments: &[Fragment<'_>], index: usize) -> Option<usize> {
        match self {
            Search::Backward {
                stop_newline,
                stop_code,
            } => {
                for i in (0..index).rev() {
                    match fragments[i] {
                        Fragment::Decoration { .. } => return Some(i),
                        Fragment::Newline { .. } if stop_newline => return None,
                        fragment if stop_code && fragment.is_code() => return None,
                        _ => {}
                    }
                }
                None
            }
            Search::Forward { stop_code } => {
                for (i, fragment) in fragments.iter().enumerate().skip(index + 1) {
                    match fragment {
                        Fragment::Decoration { .. } => return Some(i),
                        fragment if stop_code && fragment.is_code() => return None,
                        _ => {}
                    }
                }
                None
            }
        }
    }
}

/// Link every comment and line break of `fragments` to a decoration slot
///
/// Entries are appended to their slot in source order. A fragment is never
/// linked to a slot that comes before the slot of an earlier fragment, so
/// decorations keep their left-to-right order.
pub fn link(fragments: &[Fragment<'_>]) -> Result<DecorationMap> {
    let mut map = DecorationMap::new();
    let mut last_target: Option<usize> = None;

    for (index, fragment) in fragments.iter().enumerate() {
        let (entry, searches): (&str, &[Search]) = match fragment {
            Fragment::Comment { text, .. } => (*text, &COMMENT_SEARCHES[..]),
            Fragment::Newline { .. } => (NEWLINE, &NEWLINE_SEARCHES[..]),
            _ => continue,
        };

        let found = searches
            .iter()
            .find_map(|search| search.run(fragments, index))
            .ok_or_else(|| {
                DecorError::internal_error(format!(
                    "no decoration slot reachable from offset {}",
                    fragment.offset()
                ))
            })?;
        let target = last_target.map_or(found, |last| last.max(found));
        last_target = Some(target);

        let (node, slot) = slot_at(fragments, target)?;
        tracing::trace!(
            "Linked {:?} at {} to {:?}.{}",
            entry,
            fragment.offset(),
            node.kind(),
            slot
        );
        map.entry((node, slot)).or_default().push(entry);
    }

    tracing::debug!("Linked {} decorated slots", map.len());
    Ok(map)
}

fn slot_at(fragments: &[Fragment<'_>], index: usize) -> Result<(NodeId, Slot)> {
    match fragments.get(index) {
        Some(Fragment::Decoration { node, slot, .. }) => Ok((*node, *slot)),
        _ => Err(DecorError::internal_error(format!(
            "fragment {index} is not a decoration slot"
        ))),
    }
}
