//! Text helpers for building storefront URLs and titles.

/// Fold a Latin accented character to its ASCII base letter(s).
fn fold_accent(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'œ' => "oe",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'ß' => "ss",
        _ => return None,
    };
    Some(folded)
}

/// Turn a display name into a URL path segment.
///
/// Lowercases, folds Latin accents (`"Calçados"` → `"calcados"`) and collapses
/// every run of other characters into a single `-`, trimming dashes at both
/// ends.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        let piece = if c.is_ascii_alphanumeric() {
            Some(c.to_string())
        } else {
            fold_accent(c).map(str::to_string)
        };

        match piece {
            Some(piece) => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push_str(&piece);
            }
            None => pending_dash = true,
        }
    }

    slug
}

/// Lowercase a text and uppercase the first letter of every word.
#[must_use]
pub fn capitalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for c in input.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Camiseta Básica Azul"), "camiseta-basica-azul");
    }

    #[test]
    fn test_slugify_collapses_and_trims() {
        assert_eq!(slugify("  Tênis -- Corrida / 2024!  "), "tenis-corrida-2024");
    }

    #[test]
    fn test_slugify_folds_ligatures() {
        assert_eq!(slugify("Straße Œuvre"), "strasse-oeuvre");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize("tênis de CORRIDA"), "Tênis De Corrida");
    }

    #[test]
    fn test_capitalize_keeps_spacing() {
        assert_eq!(capitalize("  red  shoes"), "  Red  Shoes");
    }
}
