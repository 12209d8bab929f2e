// 🔁 Valendo - Derive bet lines of other modalities from a base set
//
// A base is the set of 3-digit (Centena) or 4-digit (Milhar) numbers already
// on the bet. Every base number is left-padded to 4 digits and sliced by
// position, so "123" is read as "0123".

use crate::modality::Modality;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const PADDED_WIDTH: usize = 4;

// ============================================================================
// GROUP FORMULA
// ============================================================================

/// Animal group (1–25) of a 2-digit dezena
///
/// "00" stands for 100 and maps to group 25. Anything that is not one or two
/// ASCII digits has no group.
///
/// # Examples:
/// ```
/// use panda_loterias::group_from_last2;
/// assert_eq!(group_from_last2("00"), Some(25));
/// assert_eq!(group_from_last2("05"), Some(2));
/// assert_eq!(group_from_last2("9a"), None);
/// ```
pub fn group_from_last2(last2: &str) -> Option<u8> {
    if last2.is_empty() || last2.len() > 2 || !last2.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let n: u8 = last2.parse().ok()?;
    if n == 0 {
        Some(25)
    } else {
        Some(n.div_ceil(4))
    }
}

// ============================================================================
// POSITIONAL SLICES
// ============================================================================

/// One padded base number, sliced once
struct BaseSlices<'a> {
    full: &'a str,
    first3: &'a str,
    last3: &'a str,
    first2: &'a str,
    mid2: &'a str,
    last2: &'a str,
    last1: &'a str,
}

impl<'a> BaseSlices<'a> {
    /// `padded` must be exactly 4 ASCII digits
    fn new(padded: &'a str) -> Self {
        BaseSlices {
            full: padded,
            first3: &padded[0..3],
            last3: &padded[1..4],
            first2: &padded[0..2],
            mid2: &padded[1..3],
            last2: &padded[2..4],
            last1: &padded[3..4],
        }
    }

    fn value_for(&self, target: Modality) -> Option<String> {
        let slice = match target {
            Modality::Milhar | Modality::MilharInv | Modality::MilharECt => self.full,
            Modality::Centena | Modality::CentenaInv => self.last3,
            Modality::CentenaEsquerda | Modality::CentenaInvEsq => self.first3,
            Modality::Dezena => self.last2,
            Modality::DezenaEsq => self.first2,
            Modality::DezenaMeio => self.mid2,
            Modality::Unidade => self.last1,
            Modality::Grupo => return group_from_last2(self.last2).map(|g| g.to_string()),
        };
        Some(slice.to_string())
    }
}

/// Keep only ASCII digits
fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Strip, drop empties, de-duplicate (first occurrence wins)
fn clean_numbers<S: AsRef<str>>(numbers: &[S]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(numbers.len());
    for raw in numbers {
        let digits = digits_only(raw.as_ref());
        if !digits.is_empty() && !cleaned.contains(&digits) {
            cleaned.push(digits);
        }
    }
    cleaned
}

fn fits_target(value: &str, target: Modality) -> bool {
    match target.digits() {
        Some(width) => value.len() == width && value.bytes().all(|b| b.is_ascii_digit()),
        None => matches!(value.parse::<u8>(), Ok(g) if (1..=25).contains(&g)),
    }
}

// ============================================================================
// DERIVATION
// ============================================================================

/// Derive palpites for a typed target modality
///
/// One value per base number, then de-duplicated in first-occurrence order
/// and filtered to the target's width (or to 1–25 for Grupo).
///
/// Base numbers longer than 4 digits are skipped rather than sliced: the
/// width filter alone would let "12345" through as Centena "234", a
/// well-formed value taken from the wrong positions.
pub fn derive_for<S: AsRef<str>>(base_numbers: &[S], target: Modality) -> Vec<String> {
    let mut derived: Vec<String> = Vec::new();
    let mut skipped = 0usize;

    for digits in clean_numbers(base_numbers) {
        if digits.len() > PADDED_WIDTH {
            skipped += 1;
            continue;
        }

        let padded = format!("{:0>width$}", digits, width = PADDED_WIDTH);
        let slices = BaseSlices::new(&padded);

        if let Some(value) = slices.value_for(target) {
            if !derived.contains(&value) {
                derived.push(value);
            }
        }
    }

    derived.retain(|value| fits_target(value, target));

    debug!(
        target_modality = target.label(),
        bases = base_numbers.len(),
        skipped,
        derived = derived.len(),
        "valendo derivation"
    );

    derived
}

/// Derive palpites for a target given by its canonical label
///
/// Unknown labels yield an empty list.
///
/// # Examples:
/// ```
/// use panda_loterias::derive_valendo_palpites;
/// assert_eq!(derive_valendo_palpites(&["1234", "1234", "5678"], "CENTENA"), vec!["234", "678"]);
/// assert_eq!(derive_valendo_palpites(&["2690"], "GRUPO"), vec!["23"]);
/// ```
pub fn derive_valendo_palpites<S: AsRef<str>>(base_numbers: &[S], target_modality: &str) -> Vec<String> {
    match Modality::from_canonical(target_modality) {
        Some(target) => derive_for(base_numbers, target),
        None => {
            warn!(target_modality, "unsupported Valendo target");
            Vec::new()
        }
    }
}

// ============================================================================
// BASE SESSION
// ============================================================================

/// Digit width of a Valendo base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseWidth {
    /// 3-digit base
    Centena,

    /// 4-digit base
    Milhar,
}

impl BaseWidth {
    pub fn from_digits(len: usize) -> Option<BaseWidth> {
        match len {
            3 => Some(BaseWidth::Centena),
            4 => Some(BaseWidth::Milhar),
            _ => None,
        }
    }

    pub fn digits(&self) -> usize {
        match self {
            BaseWidth::Centena => 3,
            BaseWidth::Milhar => 4,
        }
    }

    /// Modality the base was placed as
    pub fn origin_modality(&self) -> Modality {
        match self {
            BaseWidth::Centena => Modality::Centena,
            BaseWidth::Milhar => Modality::Milhar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValendoError {
    #[error("base has no digits")]
    Empty,

    #[error("base numbers must have 3 or 4 digits, found {0}")]
    UnsupportedWidth(usize),

    #[error("base mixes 3-digit and 4-digit numbers")]
    MixedWidths,

    #[error("base is locked to {} digits, found {found}", .locked.digits())]
    WidthLocked { locked: BaseWidth, found: usize },
}

/// Base numbers with their digit width locked at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StoredBase")]
pub struct ValendoBase {
    width: BaseWidth,
    numbers: Vec<String>,
}

/// Wire form of a base; rebuilt through `ValendoBase::new` on the way in
#[derive(Deserialize)]
struct StoredBase {
    width: BaseWidth,
    numbers: Vec<String>,
}

impl TryFrom<StoredBase> for ValendoBase {
    type Error = ValendoError;

    fn try_from(stored: StoredBase) -> Result<Self, Self::Error> {
        let base = ValendoBase::new(&stored.numbers)?;
        if base.width != stored.width {
            return Err(ValendoError::WidthLocked {
                locked: stored.width,
                found: base.width.digits(),
            });
        }
        Ok(base)
    }
}

impl ValendoBase {
    /// Build a base, inferring its width from content
    pub fn new<S: AsRef<str>>(numbers: &[S]) -> Result<Self, ValendoError> {
        let numbers = clean_numbers(numbers);
        let first = numbers.first().ok_or(ValendoError::Empty)?;
        let width = BaseWidth::from_digits(first.len())
            .ok_or(ValendoError::UnsupportedWidth(first.len()))?;

        if numbers.iter().any(|n| n.len() != width.digits()) {
            return Err(ValendoError::MixedWidths);
        }

        Ok(ValendoBase { width, numbers })
    }

    /// Add numbers of the locked width. All-or-nothing; returns how many were new.
    pub fn extend<S: AsRef<str>>(&mut self, numbers: &[S]) -> Result<usize, ValendoError> {
        let incoming = clean_numbers(numbers);

        if let Some(bad) = incoming.iter().find(|n| n.len() != self.width.digits()) {
            return Err(ValendoError::WidthLocked {
                locked: self.width,
                found: bad.len(),
            });
        }

        let before = self.numbers.len();
        for number in incoming {
            if !self.numbers.contains(&number) {
                self.numbers.push(number);
            }
        }

        Ok(self.numbers.len() - before)
    }

    pub fn width(&self) -> BaseWidth {
        self.width
    }

    pub fn numbers(&self) -> &[String] {
        &self.numbers
    }

    pub fn derive(&self, target: Modality) -> Vec<String> {
        derive_for(&self.numbers, target)
    }

    pub fn targets(&self) -> Vec<Modality> {
        Modality::valendo_targets(self.width)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_formula_boundaries() {
        assert_eq!(group_from_last2("00"), Some(25));
        assert_eq!(group_from_last2("01"), Some(1));
        assert_eq!(group_from_last2("04"), Some(1));
        assert_eq!(group_from_last2("05"), Some(2));
        assert_eq!(group_from_last2("96"), Some(24));
        assert_eq!(group_from_last2("97"), Some(25));
        assert_eq!(group_from_last2("99"), Some(25));
        assert_eq!(group_from_last2("7"), Some(2));
    }

    #[test]
    fn test_group_formula_rejects_garbage() {
        assert_eq!(group_from_last2(""), None);
        assert_eq!(group_from_last2("100"), None);
        assert_eq!(group_from_last2("-1"), None);
        assert_eq!(group_from_last2("ab"), None);
    }

    #[test]
    fn test_every_dezena_has_a_group() {
        for n in 0..100u8 {
            let g = group_from_last2(&format!("{:02}", n)).unwrap();
            assert!((1..=25).contains(&g), "dezena {} → {}", n, g);
        }
    }

    #[test]
    fn test_derive_dedup_first_occurrence() {
        let derived = derive_valendo_palpites(&["1234", "1234", "5678"], "CENTENA");
        assert_eq!(derived, vec!["234", "678"]);
    }

    #[test]
    fn test_derive_grupo() {
        assert_eq!(derive_valendo_palpites(&["2690"], "GRUPO"), vec!["23"]);
        assert_eq!(derive_valendo_palpites(&["1200"], "GRUPO"), vec!["25"]);
        // 01 and 02 are both group 1
        assert_eq!(derive_valendo_palpites(&["1201", "1202", "1205"], "GRUPO"), vec!["1", "2"]);
    }

    #[test]
    fn test_derive_every_slice_from_milhar() {
        let base = ["1234"];
        assert_eq!(derive_valendo_palpites(&base, "MILHAR"), vec!["1234"]);
        assert_eq!(derive_valendo_palpites(&base, "MILHAR INV"), vec!["1234"]);
        assert_eq!(derive_valendo_palpites(&base, "MILHAR E CT"), vec!["1234"]);
        assert_eq!(derive_valendo_palpites(&base, "CENTENA"), vec!["234"]);
        assert_eq!(derive_valendo_palpites(&base, "CENTENA INV"), vec!["234"]);
        assert_eq!(derive_valendo_palpites(&base, "CENTENA ESQUERDA"), vec!["123"]);
        assert_eq!(derive_valendo_palpites(&base, "CENTENA INV ESQ"), vec!["123"]);
        assert_eq!(derive_valendo_palpites(&base, "DEZENA"), vec!["34"]);
        assert_eq!(derive_valendo_palpites(&base, "DEZENA ESQ"), vec!["12"]);
        assert_eq!(derive_valendo_palpites(&base, "DEZENA MEIO"), vec!["23"]);
        assert_eq!(derive_valendo_palpites(&base, "UNIDADE"), vec!["4"]);
        assert_eq!(derive_valendo_palpites(&base, "GRUPO"), vec!["9"]);
    }

    #[test]
    fn test_three_digit_base_is_padded_documented_quirk() {
        // "123" is read as "0123": the left slices pick up the padding zero
        let base = ["123"];
        assert_eq!(derive_valendo_palpites(&base, "CENTENA"), vec!["123"]);
        assert_eq!(derive_valendo_palpites(&base, "CENTENA ESQUERDA"), vec!["012"]);
        assert_eq!(derive_valendo_palpites(&base, "DEZENA ESQ"), vec!["01"]);
        assert_eq!(derive_valendo_palpites(&base, "DEZENA MEIO"), vec!["12"]);
        assert_eq!(derive_valendo_palpites(&base, "MILHAR"), vec!["0123"]);
    }

    #[test]
    fn test_derive_strips_non_digits() {
        assert_eq!(derive_valendo_palpites(&["12-34", " 5678 "], "DEZENA"), vec!["34", "78"]);
        assert_eq!(derive_valendo_palpites(&["abc", "4321"], "UNIDADE"), vec!["1"]);
    }

    #[test]
    fn test_derive_skips_oversized_base() {
        assert_eq!(derive_valendo_palpites(&["12345", "6789"], "CENTENA"), vec!["789"]);
    }

    #[test]
    fn test_derive_empty_and_unsupported() {
        let empty: [&str; 0] = [];
        assert!(derive_valendo_palpites(&empty, "CENTENA").is_empty());
        assert!(derive_valendo_palpites(&["1234"], "QUINA").is_empty());
        assert!(derive_valendo_palpites(&["1234"], "GP").is_empty());
        assert!(derive_valendo_palpites(&["1234"], "").is_empty());
    }

    #[test]
    fn test_derive_is_deterministic() {
        let base = vec!["2690".to_string(), "1480".to_string(), "3290".to_string()];
        for modality in Modality::ALL {
            assert_eq!(derive_for(&base, modality), derive_for(&base, modality));
        }
    }

    #[test]
    fn test_derived_width_invariant() {
        let base = ["0001", "9999", "4500", "123", "7"];
        for modality in Modality::ALL {
            for value in derive_for(&base, modality) {
                assert!(fits_target(&value, modality), "{} → {}", modality, value);
            }
        }
    }

    #[test]
    fn test_base_infers_width() {
        let base = ValendoBase::new(&["2690", "1480"]).unwrap();
        assert_eq!(base.width(), BaseWidth::Milhar);
        assert_eq!(base.width().origin_modality(), Modality::Milhar);

        let base = ValendoBase::new(&["269", "148", "269"]).unwrap();
        assert_eq!(base.width(), BaseWidth::Centena);
        assert_eq!(base.numbers(), &["269".to_string(), "148".to_string()]);
    }

    #[test]
    fn test_base_rejects_bad_input() {
        let empty: [&str; 0] = [];
        assert_eq!(ValendoBase::new(&empty).unwrap_err(), ValendoError::Empty);
        assert_eq!(ValendoBase::new(&["--"]).unwrap_err(), ValendoError::Empty);
        assert_eq!(ValendoBase::new(&["12"]).unwrap_err(), ValendoError::UnsupportedWidth(2));
        assert_eq!(ValendoBase::new(&["123", "1234"]).unwrap_err(), ValendoError::MixedWidths);
    }

    #[test]
    fn test_base_width_is_locked() {
        let mut base = ValendoBase::new(&["2690"]).unwrap();

        assert_eq!(base.extend(&["1480", "2690"]).unwrap(), 1);

        let err = base.extend(&["5555", "123"]).unwrap_err();
        assert_eq!(
            err,
            ValendoError::WidthLocked {
                locked: BaseWidth::Milhar,
                found: 3
            }
        );
        // Nothing from the rejected batch was added
        assert_eq!(base.numbers().len(), 2);
        assert_eq!(err.to_string(), "base is locked to 4 digits, found 3");
    }

    #[test]
    fn test_base_json_roundtrip_keeps_width() {
        let base = ValendoBase::new(&["2690", "1480"]).unwrap();
        let json = serde_json::to_string(&base).unwrap();

        let back: ValendoBase = serde_json::from_str(&json).unwrap();
        assert_eq!(back.width(), BaseWidth::Milhar);
        assert_eq!(back.numbers(), base.numbers());
    }

    #[test]
    fn test_base_json_cannot_bypass_width_lock() {
        // Numbers that would never pass `new`
        let bad = r#"{"width":"Milhar","numbers":["12","123456"]}"#;
        assert!(serde_json::from_str::<ValendoBase>(bad).is_err());

        // Declared width disagrees with the numbers
        let mismatched = r#"{"width":"Milhar","numbers":["123","456"]}"#;
        let err = serde_json::from_str::<ValendoBase>(mismatched).unwrap_err();
        assert!(err.to_string().contains("locked to 4 digits, found 3"));

        let empty = r#"{"width":"Centena","numbers":[]}"#;
        assert!(serde_json::from_str::<ValendoBase>(empty).is_err());
    }

    #[test]
    fn test_base_derive_and_targets() {
        let base = ValendoBase::new(&["123", "456"]).unwrap();
        assert_eq!(base.derive(Modality::Dezena), vec!["23", "56"]);
        assert!(!base.targets().contains(&Modality::Milhar));
    }
}
