//! Registry name normalization

/// Rewrite an arbitrary string into a legal container registry name.
///
/// Applied in order: lowercase the whole string, replace every
/// character outside `[a-z0-9._/-]` with `-`, strip leading and
/// trailing `.`/`_`/`-` runs, collapse interior runs of two or more
/// `.`/`_`/`-` characters into a single `-`. Idempotent: normalizing
/// an already-normalized string returns it unchanged.
pub fn normalize_for_registry(name: &str) -> String {
    let replaced: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '/' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c| matches!(c, '.' | '_' | '-'));

    // A lone separator survives as-is; a run of two or more becomes '-'.
    let mut out = String::with_capacity(trimmed.len());
    let mut run: Option<(char, usize)> = None;
    for c in trimmed.chars() {
        if matches!(c, '.' | '_' | '-') {
            run = Some(match run {
                Some((first, count)) => (first, count + 1),
                None => (c, 1),
            });
        } else {
            if let Some((first, count)) = run.take() {
                out.push(if count >= 2 { '-' } else { first });
            }
            out.push(c);
        }
    }
    if let Some((first, count)) = run {
        out.push(if count >= 2 { '-' } else { first });
    }
    out
}
