//! Key path helpers.
//!
//! Keys look like `~/dir/sub/file.md`. All comparisons are ASCII
//! case-insensitive and prefix checks respect segment boundaries, so `~/a` is
//! a prefix of `~/a/b` but not of `~/ab`.

use rl_corpus::ROOT_MARKER;

/// Directory part of a key: everything before the final `/`, or `~`.
#[must_use]
pub fn rooted_dir(key: &str) -> &str {
    key.rfind('/').map_or(ROOT_MARKER, |i| &key[..i])
}

/// Filename part of a key: everything after the final `/`, or empty.
#[must_use]
pub fn file_name(key: &str) -> &str {
    key.rfind('/').map_or("", |i| &key[i + 1..])
}

/// Last directory segment of a key (`~/a/b/c.md` → `b`, `~/c.md` → `~`).
#[must_use]
pub fn directory_name(key: &str) -> &str {
    let dir = match key.rfind('/') {
        Some(i) => &key[..i],
        None => return "",
    };
    dir.rfind('/').map_or(dir, |i| &dir[i + 1..])
}

/// Join a relative path onto a rooted key with exactly one `/` between them.
#[must_use]
pub fn append_keys(key: &str, addon: &str) -> String {
    let addon = addon.strip_prefix('/').unwrap_or(addon);
    if key.ends_with('/') {
        format!("{key}{addon}")
    } else {
        format!("{key}/{addon}")
    }
}

/// Whether `dir` equals `outer` or lies below it.
#[must_use]
pub fn is_within(outer: &str, dir: &str) -> bool {
    dir.len() >= outer.len()
        && dir.is_char_boundary(outer.len())
        && dir[..outer.len()].eq_ignore_ascii_case(outer)
        && (dir.len() == outer.len() || dir.as_bytes()[outer.len()] == b'/')
}

/// Signed nesting distance between the directories of two keys.
///
/// `0` for the same directory, the number of extra segments when one
/// directory contains the other, `-1` when neither contains the other.
/// Symmetric in its arguments.
///
/// # Example
///
/// ```
/// use rl_lists::depth_between;
///
/// assert_eq!(depth_between("~/file1.txt", "~/sub-dir/file2.txt"), 1);
/// assert_eq!(depth_between("~/home/me/file2.txt", "~/file1.txt"), 2);
/// assert_eq!(depth_between("~/batman/a.md", "~/superman/b.md"), -1);
/// ```
#[must_use]
pub fn depth_between(a: &str, b: &str) -> i32 {
    let dir_a = rooted_dir(a);
    let dir_b = rooted_dir(b);

    let (outer, inner) = if is_within(dir_a, dir_b) {
        (dir_a, dir_b)
    } else if is_within(dir_b, dir_a) {
        (dir_b, dir_a)
    } else {
        return -1;
    };

    let levels = slashes(inner) - slashes(outer);
    i32::try_from(levels).unwrap_or(i32::MAX)
}

fn slashes(s: &str) -> usize {
    s.bytes().filter(|&b| b == b'/').count()
}
