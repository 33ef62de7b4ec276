//! Name tokenization for the name index

/// Camel-case words of a name, lowercased
///
/// An uppercase letter starts a new word; whitespace, underscores and digits
/// end one. Words shorter than `min_len` characters are dropped, so
/// `K2_DestroyActor` yields `destroy` and `actor`.
pub fn camel_words(name: &str, min_len: usize) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut flush = |current: &mut String| {
        if current.chars().count() >= min_len.max(1) {
            words.push(current.to_lowercase());
        }
        current.clear();
    };

    for c in name.chars() {
        if c.is_whitespace() || c == '_' || c.is_ascii_digit() {
            flush(&mut current);
        } else if c.is_ascii_uppercase() {
            flush(&mut current);
            current.push(c);
        } else {
            current.push(c);
        }
    }
    flush(&mut current);
    words
}

/// Prefixes of `lower` with `min..=max` characters
pub fn prefixes(lower: &str, min: usize, max: usize) -> Vec<&str> {
    let boundaries: Vec<usize> = lower
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .chain(std::iter::once(lower.len()))
        .collect();

    (min.max(1)..=max)
        .filter_map(|len| boundaries.get(len - 1).map(|&end| &lower[..end]))
        .collect()
}

/// First `max` characters of `text`
pub fn char_prefix(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
