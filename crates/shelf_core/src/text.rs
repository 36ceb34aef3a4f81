/// Lowercases a category name and capitalizes each word for display.
pub fn title_case(s: &str) -> String {
    s.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns a backend receipt id (`Siparis_07`) into its display tag (`#07`).
pub fn receipt_tag(receipt_id: &str) -> String {
    receipt_id.replace("Siparis_", "#")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_basic() {
        assert_eq!(title_case("süt ürünleri"), "Süt Ürünleri");
        assert_eq!(title_case("atıştırmalık"), "Atıştırmalık");
    }

    #[test]
    fn test_title_case_empty() {
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("a  b"), "A  B");
    }

    #[test]
    fn test_receipt_tag() {
        assert_eq!(receipt_tag("Siparis_07"), "#07");
        assert_eq!(receipt_tag("other"), "other");
    }
}
