/// Turn a schema key or platform id into a human label.
///
/// Underscores become spaces, camelCase humps are split, and every word is
/// capitalized: `forciblySetPlatformId` -> `Forcibly Set Platform Id`,
/// `game_distribution` -> `Game Distribution`.
pub fn format_label(raw: &str) -> String {
    let mut spaced = String::with_capacity(raw.len() + 4);
    for ch in raw.chars() {
        if ch == '_' {
            spaced.push(' ');
        } else if ch.is_ascii_uppercase() {
            spaced.push(' ');
            spaced.push(ch);
        } else {
            spaced.push(ch);
        }
    }

    spaced
        .trim()
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
