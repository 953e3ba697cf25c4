//! Indented outline files.
//!
//! One entry per line. Each level of nesting is two spaces or one tab
//! deeper than its parent. Blank lines and lines starting with `#` are
//! skipped.

use std::fs;
use std::path::Path;

use regtree::{NodeId, Tree};
use thiserror::Error;

use crate::error::Error;

/// Spaces making up one level of indentation.
const INDENT: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutlineError {
    #[error("line {line}: entry is nested more than one level below the one above it")]
    TooDeep { line: usize },

    #[error("line {line}: indentation is not a whole number of levels")]
    Ragged { line: usize },

    #[error("outline has no entries")]
    Empty,

    #[error(transparent)]
    Tree(#[from] regtree::Error),
}

/// A parsed outline: top-level entries hang off `root`, which is named after
/// the source and never shown.
#[derive(Debug)]
pub struct Outline {
    pub tree: Tree,
    pub root: NodeId,
}

/// Read and parse the outline at `path`.
pub fn load(path: &Path) -> Result<Outline, Error> {
    let text = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse(&name, &text).map_err(|source| Error::Outline {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse(name: &str, text: &str) -> Result<Outline, OutlineError> {
    let mut tree = Tree::new();
    let root = tree.create(None, name)?;

    // Most recent entry at each depth along the current branch.
    let mut branch: Vec<NodeId> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let body = raw.trim_start_matches([' ', '\t']);
        let entry = body.trim_end();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }

        let depth = depth_of(&raw[..raw.len() - body.len()]).ok_or(OutlineError::Ragged { line })?;
        if depth > branch.len() {
            return Err(OutlineError::TooDeep { line });
        }

        let parent = if depth == 0 { root } else { branch[depth - 1] };
        let id = tree.create(Some(parent), entry)?;
        if let Some(&previous) = branch.get(depth) {
            tree.append(previous, id);
        }
        branch.truncate(depth);
        branch.push(id);
    }

    if tree.child_head(root).is_none() {
        return Err(OutlineError::Empty);
    }
    log::debug!("parsed outline {:?}: {} nodes", name, tree.len());
    Ok(Outline { tree, root })
}

fn depth_of(indent: &str) -> Option<usize> {
    let columns: usize = indent.chars().map(|c| if c == '\t' { INDENT } else { 1 }).sum();
    (columns % INDENT == 0).then_some(columns / INDENT)
}
