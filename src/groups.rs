// 🐄 Animal groups - 25 groups of the jogo do bicho
//
// Group g covers dezenas 4g-3 .. 4g; group 25 (Vaca) covers 97, 98, 99, 00.
// Names are for display only; computation uses the group number.

use crate::valendo::group_from_last2;

pub const GROUP_COUNT: u8 = 25;

pub const GROUP_NAMES: [&str; 25] = [
    "Avestruz",
    "Águia",
    "Burro",
    "Borboleta",
    "Cachorro",
    "Cabra",
    "Carneiro",
    "Camelo",
    "Cobra",
    "Coelho",
    "Cavalo",
    "Elefante",
    "Galo",
    "Gato",
    "Jacaré",
    "Leão",
    "Macaco",
    "Porco",
    "Pavão",
    "Peru",
    "Touro",
    "Tigre",
    "Urso",
    "Veado",
    "Vaca",
];

/// Animal name of a group (1–25)
pub fn group_name(group: u8) -> Option<&'static str> {
    if (1..=GROUP_COUNT).contains(&group) {
        Some(GROUP_NAMES[(group - 1) as usize])
    } else {
        None
    }
}

/// The four dezenas of a group, as 2-digit strings
pub fn dezenas_of_group(group: u8) -> Option<[String; 4]> {
    if !(1..=GROUP_COUNT).contains(&group) {
        return None;
    }

    let last = group as u16 * 4;
    Some([
        format!("{:02}", (last - 3) % 100),
        format!("{:02}", (last - 2) % 100),
        format!("{:02}", (last - 1) % 100),
        format!("{:02}", last % 100),
    ])
}

/// Group of a drawn number, by its last two digits
///
/// Non-digit characters are ignored, so "1.234" and "1234" agree.
pub fn group_of_number(number: &str) -> Option<u8> {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(2);
    group_from_last2(&digits[start..])
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_names() {
        assert_eq!(group_name(1), Some("Avestruz"));
        assert_eq!(group_name(16), Some("Leão"));
        assert_eq!(group_name(25), Some("Vaca"));
        assert_eq!(group_name(0), None);
        assert_eq!(group_name(26), None);
    }

    #[test]
    fn test_dezenas_of_group() {
        assert_eq!(dezenas_of_group(1).unwrap(), ["01", "02", "03", "04"]);
        assert_eq!(dezenas_of_group(23).unwrap(), ["89", "90", "91", "92"]);
        assert_eq!(dezenas_of_group(25).unwrap(), ["97", "98", "99", "00"]);
        assert!(dezenas_of_group(0).is_none());
    }

    #[test]
    fn test_dezenas_agree_with_formula() {
        for group in 1..=GROUP_COUNT {
            for dezena in dezenas_of_group(group).unwrap() {
                assert_eq!(group_from_last2(&dezena), Some(group));
            }
        }
    }

    #[test]
    fn test_group_of_number() {
        assert_eq!(group_of_number("2690"), Some(23));
        assert_eq!(group_of_number("1.200"), Some(25));
        assert_eq!(group_of_number("5"), Some(2));
        assert_eq!(group_of_number(""), None);
        assert_eq!(group_of_number("abc"), None);
    }
}
