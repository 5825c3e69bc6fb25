//! Text measurement and line breaking for the built-in Helvetica faces.

use super::layout::FontStyle;

const MM_PER_POINT: f32 = 0.352_778;
const BOLD_WIDTH_FACTOR: f32 = 1.06;

/// Non-Latin-1 characters the built-in fonts encode through WinAnsi.
const WIN_ANSI_EXTRAS: &[char] = &[
    '\u{20AC}', '\u{0192}', '\u{02C6}', '\u{2020}', '\u{2021}', '\u{2030}', '\u{0160}',
    '\u{2039}', '\u{0152}', '\u{017D}', '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}',
    '\u{0153}', '\u{017E}', '\u{0178}',
];

/// Maps typographic punctuation onto plain ASCII and drops what WinAnsi cannot encode.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2022}' | '\u{00B7}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\u{2009}' | '\u{202F}' | '\t' => out.push(' '),
            '\r' | '\n' => out.push(' '),
            ' '..='~' | '\u{00A1}'..='\u{00FF}' => out.push(ch),
            ch if WIN_ANSI_EXTRAS.contains(&ch) => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Keeps at most `limit` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn glyph_em(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' | '\'' | '|' => 0.22,
        ' ' | '.' | ',' | ':' | ';' | '!' | 'f' | 't' | 'I' | '/' | '(' | ')' | '[' | ']' => 0.28,
        'r' | '-' | '"' => 0.33,
        'm' | 'M' | 'W' => 0.83,
        'w' | '%' => 0.78,
        'A'..='Z' => 0.68,
        ch if ch.is_uppercase() => 0.68,
        '0'..='9' | '$' | '?' | '_' => 0.556,
        _ => 0.5,
    }
}

pub fn text_width_mm(text: &str, size_pt: f32, style: FontStyle) -> f32 {
    let em: f32 = text.chars().map(glyph_em).sum();
    let factor = match style {
        FontStyle::Bold => BOLD_WIDTH_FACTOR,
        FontStyle::Regular | FontStyle::Italic => 1.0,
    };
    em * size_pt * MM_PER_POINT * factor
}

/// Greedy word wrap; words wider than the line are split by character.
pub fn wrap(text: &str, size_pt: f32, style: FontStyle, max_width_mm: f32) -> Vec<String> {
    let fits = |candidate: &str| text_width_mm(candidate, size_pt, style) <= max_width_mm;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if fits(word) {
            current = word.to_string();
            continue;
        }
        for ch in word.chars() {
            current.push(ch);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_typography() {
        assert_eq!(
            sanitize("“Quotes” – it’s done…✅ ok"),
            "\"Quotes\" - it's done... ok"
        );
        assert_eq!(sanitize("line\nbreak"), "line break");
    }

    #[test]
    fn sanitize_keeps_win_ansi_letters_and_symbols() {
        assert_eq!(sanitize("Zürich Café Señor"), "Zürich Café Señor");
        assert_eq!(
            sanitize("2 000 € from Müller GmbH™, Œuvre Straße"),
            "2 000 € from Müller GmbH™, Œuvre Straße"
        );
        assert_eq!(sanitize("北京 Ω ok"), "  ok");
    }

    #[test]
    fn truncate_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("ééé", 2), "éé...");
    }

    #[test]
    fn wrapped_lines_respect_width() {
        let text = "Recurring revenue from clinics grew steadily across every region we serve ".repeat(4);
        let lines = wrap(&text, 10.0, FontStyle::Regular, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 10.0, FontStyle::Regular) <= 60.0, "{line}");
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn overlong_words_are_split() {
        let lines = wrap(&"x".repeat(200), 10.0, FontStyle::Bold, 30.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat().len(), 200);
    }
}
