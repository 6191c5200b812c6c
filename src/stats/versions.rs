//! Major-version extraction from release names.

use core::cmp::Ordering;

/// Pick one release per major version and order the result newest first.
///
/// Releases are grouped by the text before the first `.`, and the earliest-listed
/// release of each group represents it. Groups are ordered with [`reverse_semver_cmp`]
/// applied to their comma-joined member lists, then every representative gets a `v`
/// prefix and the list is sorted again in descending string order. The second pass
/// decides the final order, so `10.x` sorts after `9.x`.
#[must_use]
pub fn major_versions<S: AsRef<str>>(release_names: &[S]) -> Vec<String> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for name in release_names {
        let name = name.as_ref();
        let major = name.split('.').next().unwrap_or_default();
        match groups.iter_mut().find(|(m, _)| *m == major) {
            Some((_, members)) => members.push(name),
            None => groups.push((major, vec![name])),
        }
    }

    let mut joined: Vec<(String, &str)> = groups
        .into_iter()
        .map(|(_, members)| (members.join(","), members[0]))
        .collect();
    insertion_sort_by(&mut joined, |a, b| reverse_semver_cmp(&a.0, &b.0));

    let mut versions: Vec<String> = joined
        .into_iter()
        .map(|(_, first)| if first.starts_with('v') { first.to_string() } else { format!("v{first}") })
        .collect();
    // byte order, not locale collation; the two agree on ASCII release tags
    versions.sort_by(|a, b| b.cmp(a));
    versions
}

/// Compare dot-separated versions segment by segment as integers, larger first.
///
/// Only the segments of `a` are walked. The first segment that differs decides, and
/// when either side of it is not a number (or `b` has run out of segments) the two
/// versions compare as equal.
#[must_use]
pub fn reverse_semver_cmp(a: &str, b: &str) -> Ordering {
    let b_parts: Vec<&str> = b.split('.').collect();

    for (i, a_part) in a.split('.').enumerate() {
        let b_part = b_parts.get(i).copied();
        if b_part == Some(a_part) {
            continue;
        }

        return match (parse_int_prefix(a_part), b_part.and_then(parse_int_prefix)) {
            (Some(x), Some(y)) => y.cmp(&x),
            _ => Ordering::Equal,
        };
    }

    Ordering::Equal
}

/// Parse the leading integer of `s`, ignoring whatever follows it.
///
/// Leading whitespace and a single sign are accepted. Returns `None` when no digit follows.
#[must_use]
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = s
        .strip_prefix('-')
        .map_or_else(|| (false, s.strip_prefix('+').unwrap_or(s)), |rest| (true, rest));

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

// The comparator is not a total order, which the std sorts are allowed to reject.
fn insertion_sort_by<T>(items: &mut [T], mut cmp: impl FnMut(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
