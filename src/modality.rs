// 🎯 Modality - Closed set of bet modalities + free-text label resolver
//
// Labels arrive as free text ("GP", "M C", "MILHAR E CT", "ganhe um milhar").
// A wrong digit width corrupts the bet, so resolution is two-stage:
// alias table first, then substring containment, with Milhar taking priority.

use crate::valendo::BaseWidth;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z0-9]+").unwrap());

// "M C", "M-C", "M/C", "MC" anywhere in the label
static HYBRID_MC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"M[-/ ]?C").unwrap());

static DEFAULT_RESOLVER: LazyLock<ModalityResolver> = LazyLock::new(ModalityResolver::new);

/// Built-in aliases: token → family
const DEFAULT_ALIASES: &[(&str, Modality)] = &[
    ("GP", Modality::Grupo),
    ("GRP", Modality::Grupo),
    ("DZ", Modality::Dezena),
    ("CT", Modality::Centena),
    ("MC", Modality::Milhar),
    ("UN", Modality::Unidade),
    ("U", Modality::Unidade),
];

// ============================================================================
// MODALITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    #[serde(rename = "MILHAR")]
    Milhar,
    #[serde(rename = "MILHAR INV")]
    MilharInv,
    #[serde(rename = "MILHAR E CT")]
    MilharECt,
    #[serde(rename = "CENTENA")]
    Centena,
    #[serde(rename = "CENTENA INV")]
    CentenaInv,
    #[serde(rename = "CENTENA ESQUERDA")]
    CentenaEsquerda,
    #[serde(rename = "CENTENA INV ESQ")]
    CentenaInvEsq,
    #[serde(rename = "DEZENA")]
    Dezena,
    #[serde(rename = "DEZENA ESQ")]
    DezenaEsq,
    #[serde(rename = "DEZENA MEIO")]
    DezenaMeio,
    #[serde(rename = "UNIDADE")]
    Unidade,
    #[serde(rename = "GRUPO")]
    Grupo,
}

/// What a modality's palpites look like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetShape {
    /// Fixed-width digit string (4, 3, 2 or 1 digits)
    Digits(usize),

    /// Animal group, integer 1–25
    Group,
}

impl Modality {
    pub const ALL: [Modality; 12] = [
        Modality::Milhar,
        Modality::MilharInv,
        Modality::MilharECt,
        Modality::Centena,
        Modality::CentenaInv,
        Modality::CentenaEsquerda,
        Modality::CentenaInvEsq,
        Modality::Dezena,
        Modality::DezenaEsq,
        Modality::DezenaMeio,
        Modality::Unidade,
        Modality::Grupo,
    ];

    /// Families in containment priority order
    pub const FAMILIES: [Modality; 5] = [
        Modality::Milhar,
        Modality::Centena,
        Modality::Dezena,
        Modality::Unidade,
        Modality::Grupo,
    ];

    /// Canonical label, as stored on a bet
    pub fn label(&self) -> &'static str {
        match self {
            Modality::Milhar => "MILHAR",
            Modality::MilharInv => "MILHAR INV",
            Modality::MilharECt => "MILHAR E CT",
            Modality::Centena => "CENTENA",
            Modality::CentenaInv => "CENTENA INV",
            Modality::CentenaEsquerda => "CENTENA ESQUERDA",
            Modality::CentenaInvEsq => "CENTENA INV ESQ",
            Modality::Dezena => "DEZENA",
            Modality::DezenaEsq => "DEZENA ESQ",
            Modality::DezenaMeio => "DEZENA MEIO",
            Modality::Unidade => "UNIDADE",
            Modality::Grupo => "GRUPO",
        }
    }

    pub fn shape(&self) -> BetShape {
        match self.family() {
            Modality::Milhar => BetShape::Digits(4),
            Modality::Centena => BetShape::Digits(3),
            Modality::Dezena => BetShape::Digits(2),
            Modality::Unidade => BetShape::Digits(1),
            _ => BetShape::Group,
        }
    }

    /// Digit width, `None` for Grupo
    pub fn digits(&self) -> Option<usize> {
        match self.shape() {
            BetShape::Digits(n) => Some(n),
            BetShape::Group => None,
        }
    }

    pub fn is_group(&self) -> bool {
        self.shape() == BetShape::Group
    }

    /// Base family: MILHAR, CENTENA, DEZENA, UNIDADE or GRUPO
    pub fn family(&self) -> Modality {
        match self {
            Modality::Milhar | Modality::MilharInv | Modality::MilharECt => Modality::Milhar,
            Modality::Centena
            | Modality::CentenaInv
            | Modality::CentenaEsquerda
            | Modality::CentenaInvEsq => Modality::Centena,
            Modality::Dezena | Modality::DezenaEsq | Modality::DezenaMeio => Modality::Dezena,
            Modality::Unidade => Modality::Unidade,
            Modality::Grupo => Modality::Grupo,
        }
    }

    /// Exact lookup of a canonical label (case and spacing insensitive)
    ///
    /// # Examples:
    /// ```
    /// use panda_loterias::Modality;
    /// assert_eq!(Modality::from_canonical(" centena  esquerda "), Some(Modality::CentenaEsquerda));
    /// assert_eq!(Modality::from_canonical("GP"), None);
    /// ```
    pub fn from_canonical(label: &str) -> Option<Modality> {
        let normalized = label
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        Modality::ALL
            .iter()
            .copied()
            .find(|m| m.label() == normalized)
    }

    /// Targets a Valendo line may use on top of a base of the given width
    ///
    /// A Centena base has no thousands digit, so the Milhar family is left out.
    pub fn valendo_targets(width: BaseWidth) -> Vec<Modality> {
        Modality::ALL
            .iter()
            .copied()
            .filter(|m| match (width, m.digits()) {
                (BaseWidth::Milhar, _) => true,
                (BaseWidth::Centena, Some(d)) => d <= 3,
                (BaseWidth::Centena, None) => true,
            })
            .collect()
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolves free-text modality labels to one of the five families
#[derive(Debug, Clone)]
pub struct ModalityResolver {
    aliases: HashMap<String, Modality>,
}

impl ModalityResolver {
    /// Resolver with the built-in alias table
    pub fn new() -> Self {
        let aliases = DEFAULT_ALIASES
            .iter()
            .map(|(token, modality)| (token.to_string(), *modality))
            .collect();

        ModalityResolver { aliases }
    }

    /// Add (or replace) an alias token. The target is reduced to its family.
    pub fn add_alias(&mut self, token: &str, target: Modality) {
        let token = token.trim().to_uppercase();
        if !token.is_empty() {
            self.aliases.insert(token, target.family());
        }
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Resolve a raw label
    ///
    /// # Strategy:
    /// 1. Milhar priority: token MILHAR or MC, or "M C"/"M-C"/"M/C" anywhere
    /// 2. First alias token (len >= 2, or exactly "U") wins
    /// 3. Substring containment: MILHAR, CENTENA, DEZENA, UNIDADE, GRUPO
    ///
    /// # Examples:
    /// ```
    /// use panda_loterias::{Modality, ModalityResolver};
    /// let resolver = ModalityResolver::new();
    /// assert_eq!(resolver.resolve("M C"), Some(Modality::Milhar));
    /// assert_eq!(resolver.resolve("gp"), Some(Modality::Grupo));
    /// assert_eq!(resolver.resolve("quina"), None);
    /// ```
    pub fn resolve(&self, raw_label: &str) -> Option<Modality> {
        let upper = raw_label.trim().to_uppercase();
        if upper.is_empty() {
            return None;
        }

        let tokens: Vec<&str> = TOKEN_RE.find_iter(&upper).map(|m| m.as_str()).collect();

        if tokens.iter().any(|t| *t == "MILHAR" || *t == "MC") || HYBRID_MC_RE.is_match(&upper) {
            return Some(Modality::Milhar);
        }

        let aliased = tokens
            .iter()
            .filter(|t| t.len() >= 2 || **t == "U")
            .find_map(|t| self.aliases.get(*t));

        let label = match aliased {
            Some(target) => target.label(),
            None => upper.as_str(),
        };

        Modality::FAMILIES
            .iter()
            .copied()
            .find(|family| label.contains(family.label()))
    }
}

impl Default for ModalityResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve with the built-in alias table
pub fn resolve_modality(raw_label: &str) -> Option<Modality> {
    DEFAULT_RESOLVER.resolve(raw_label)
}

// ============================================================================
// TESTS
// ============================================================================
