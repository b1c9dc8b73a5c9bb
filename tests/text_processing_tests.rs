#[cfg(test)]
mod tests {
    use recipe_ingredient_parser::text_processing::{
        clean_characters, collapse_whitespace, extract_comma_additional, extract_dash_clause,
        extract_parenthetical_segments, normalize_ampersand_fractions, remove_leading_dashes, remove_list_markers,
    };

    #[test]
    fn test_clean_characters_repairs_fractions() {
        let cases = vec![
            ("1 â„ 4 cup kefir", "1/4 cup kefir"),
            ("1 \u{200B}/ 2 cup milk", "1/2 cup milk"),
            ("3\u{2044}4 cup sugar", "3/4 cup sugar"),
            ("2 & 1/4 cups stock", "2 1/4 cups stock"),
            ("½ cup milk", "½ cup milk"),
            ("\u{FEFF}1 egg\r\n", "1 egg"),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_characters(input), expected, "cleaning {input:?}");
        }
    }

    #[test]
    fn test_whitespace_and_markers() {
        assert_eq!(collapse_whitespace("  2   cups \t flour "), "2 cups flour");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(remove_list_markers("  - 1 onion"), "1 onion");
        assert_eq!(remove_list_markers("1 onion - diced"), "1 onion - diced");
        assert_eq!(remove_leading_dashes("–– 4 cloves"), "4 cloves");
        assert_eq!(normalize_ampersand_fractions("2&3/4 cup"), "2 3/4 cup");
    }

    #[test]
    fn test_parenthetical_segments() {
        let cases = vec![
            ("2 cups rice (cooked)", "2 cups rice", vec!["cooked"]),
            ("1 (15 oz) can beans (rinsed) (drained)", "1 can beans", vec!["15 oz", "rinsed", "drained"]),
            ("butter ( ( softened ) )", "butter", vec!["( softened )"]),
            ("()  3 eggs", "3 eggs", vec![]),
            ("stray ) paren", "stray paren", vec![]),
        ];
        for (input, line, segments) in cases {
            let (cleaned, found) = extract_parenthetical_segments(input);
            assert_eq!(cleaned, line, "line of {input:?}");
            assert_eq!(found, segments, "segments of {input:?}");
        }
    }

    #[test]
    fn test_comma_clauses() {
        let cases = vec![
            ("1 onion, peeled, diced", "1 onion", vec!["peeled", "diced"]),
            ("1,5 kg Mehl", "1,5 kg Mehl", vec![]),
            ("salt,", "salt", vec![]),
            ("pepper", "pepper", vec![]),
        ];
        for (input, line, parts) in cases {
            let (cleaned, found) = extract_comma_additional(input);
            assert_eq!(cleaned, line, "line of {input:?}");
            assert_eq!(found, parts, "parts of {input:?}");
        }
    }

    #[test]
    fn test_dash_clauses() {
        let cases = vec![
            ("2 leeks - white part only", "2 leeks", Some("white part only")),
            ("10 - 20 teaspoon water", "10 - 20 teaspoon water", None),
            ("1/4 - 1/2 cup flour", "1/4 - 1/2 cup flour", None),
            ("ready-made pastry", "ready-made pastry", None),
            ("- 2 eggs", "- 2 eggs", None),
        ];
        for (input, line, clause) in cases {
            let (head, tail) = extract_dash_clause(input);
            assert_eq!(head, line, "head of {input:?}");
            assert_eq!(tail.as_deref(), clause, "clause of {input:?}");
        }
    }
}
