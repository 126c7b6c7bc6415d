//! Path segment splitting.

use std::ops::Range;

/// Split `path` into its slash-delimited segments.
///
/// Leading and trailing slashes are trimmed; interior runs of slashes are kept,
/// so `a//b` yields `["a", "", "b"]`. A path that is empty or made only of
/// slashes yields a single empty segment, which stands for the root.
pub fn split_path(path: &str) -> Vec<&str> {
    let mut bounds = Vec::new();
    split_bounds(path, &mut bounds);
    bounds.into_iter().map(|range| &path[range]).collect()
}

/// Append the byte ranges of the segments of `path` to `out`.
///
/// Same semantics as [`split_path`]; the caller owns the buffer so it can be
/// reused across requests.
pub(crate) fn split_bounds(path: &str, out: &mut Vec<Range<usize>>) {
    let bytes = path.as_bytes();

    let mut begin = 0;
    while begin < bytes.len() && bytes[begin] == b'/' {
        begin += 1;
    }
    let mut end = bytes.len();
    while end > begin && bytes[end - 1] == b'/' {
        end -= 1;
    }

    if begin >= end {
        out.push(begin..begin);
        return;
    }

    let mut start = begin;
    for (i, &byte) in bytes.iter().enumerate().take(end).skip(begin) {
        if byte == b'/' {
            out.push(start..i);
            start = i + 1;
        }
    }
    out.push(start..end);
}
