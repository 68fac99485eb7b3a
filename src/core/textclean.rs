/// Normalizes a single CSV cell value before it is written back: trims,
/// collapses the `nan` / `""` sentinels the catalog accumulated over time to
/// the empty string, and strips one level of wrapping quotes.
pub fn clean_cell(value: &str) -> String {
    let value = value.trim();
    if value == "nan" || value == "\"\"" {
        return String::new();
    }
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return value[1..value.len() - 1].to_string();
    }
    value.to_string()
}

/// Save-time cleanup for the comma-joined list fields: split on commas, trim
/// each tag, drop quote characters, drop empties, rejoin. Spaces inside tags
/// are preserved.
pub fn clean_comma_list(value: &str) -> String {
    value
        .split(',')
        .map(|tag| tag.trim().replace(['"', '\''], ""))
        .filter(|tag| !tag.trim().is_empty())
        .map(|tag| tag.trim().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Cleanup for raw generation-service output destined for a list field:
/// quotes dropped, newlines and bullet markers become separators, each piece
/// loses leading enumeration markers (digits, dots, brackets, dashes), empty
/// pieces are dropped.
pub fn normalize_generated_list(raw: &str) -> String {
    let flat = raw.replace('"', "").replace(['\n', '\r', '•'], ",");
    flat.split(',')
        .map(|piece| {
            piece
                .trim()
                .trim_start_matches(|c: char| {
                    c.is_ascii_digit() || matches!(c, '.' | ')' | '(' | '-' | ' ')
                })
                .trim()
        })
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_cell_strips_sentinels_and_quotes() {
        assert_eq!(clean_cell("nan"), "");
        assert_eq!(clean_cell("\"\""), "");
        assert_eq!(clean_cell("\"quoted value\""), "quoted value");
        assert_eq!(clean_cell("  plain  "), "plain");
        assert_eq!(clean_cell(""), "");
    }

    #[test]
    fn clean_comma_list_preserves_inner_spaces() {
        assert_eq!(clean_comma_list(" low fees , 'staking' ,,"), "low fees,staking");
        assert_eq!(clean_comma_list("a\"b\""), "ab");
        assert_eq!(clean_comma_list(""), "");
    }

    #[test]
    fn normalize_generated_list_strips_enumeration_markers() {
        assert_eq!(normalize_generated_list(" 1. Fast,,  -Secure , 2) Cheap "), "Fast,Secure,Cheap");
    }

    #[test]
    fn normalize_generated_list_flattens_newlines_and_bullets() {
        assert_eq!(
            normalize_generated_list("\"Fast trades\"\n• Deep liquidity\n2. Low fees"),
            "Fast trades,Deep liquidity,Low fees"
        );
    }

    #[test]
    fn normalize_generated_list_drops_all_empty_input() {
        assert_eq!(normalize_generated_list(",,\n••"), "");
    }
}
