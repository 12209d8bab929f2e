// 🧾 Bet Parser - Free text (WhatsApp / Excel paste) → palpites
//
// Two modes:
// - Fixed width (Milhar 4, Centena 3, Dezena 2, Unidade 1): strip every
//   non-digit and cut the stream into chunks, "26901234" → ["2690", "1234"]
// - Grupo: split on non-digit runs, keep integers 1–25

use crate::config::ParserConfig;
use crate::modality::{BetShape, ModalityResolver};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Recoverable parse failure, reported inside `ParseMeta`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseError {
    #[serde(rename = "MODALIDADE_NAO_SUPORTADA")]
    UnsupportedModality,
}

impl ParseError {
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnsupportedModality => "MODALIDADE_NAO_SUPORTADA",
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseMeta {
    /// Fixed width: leftover digits. Grupo: rejected tokens.
    pub discarded: usize,

    /// Fixed width: chunks including a trailing partial one. Grupo: tokens.
    pub total_processed: usize,

    pub total_valid: usize,
    pub is_group: bool,
    pub error: Option<ParseError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Palpites in input order, duplicates kept
    pub valid: Vec<String>,
    pub meta: ParseMeta,
}

impl ParseResult {
    fn unsupported() -> Self {
        ParseResult {
            valid: Vec::new(),
            meta: ParseMeta {
                error: Some(ParseError::UnsupportedModality),
                ..ParseMeta::default()
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.meta.error.is_none()
    }

    pub fn has_discards(&self) -> bool {
        self.meta.discarded > 0
    }

    /// Soft warning for the bettor, if anything was dropped or rejected
    pub fn warning(&self) -> Option<String> {
        if self.meta.error.is_some() {
            return Some("Modalidade não suportada para colar palpites".to_string());
        }

        match (self.meta.discarded, self.meta.is_group) {
            (0, _) => None,
            (n, true) => Some(format!("{} entrada(s) fora de 1 a 25 descartada(s)", n)),
            (n, false) => Some(format!("{} dígito(s) sobrando descartado(s)", n)),
        }
    }
}

// ============================================================================
// PARSER
// ============================================================================

pub struct BetParser {
    resolver: ModalityResolver,
}

impl BetParser {
    /// Parser with the built-in alias table
    pub fn new() -> Self {
        BetParser {
            resolver: ModalityResolver::new(),
        }
    }

    pub fn with_resolver(resolver: ModalityResolver) -> Self {
        BetParser { resolver }
    }

    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        Ok(BetParser::with_resolver(config.resolver()?))
    }

    pub fn resolver(&self) -> &ModalityResolver {
        &self.resolver
    }

    /// Parse pasted text for a modality label
    ///
    /// Empty text is not an error. An unresolvable label comes back with
    /// `meta.error = MODALIDADE_NAO_SUPORTADA` and nothing valid.
    pub fn parse(&self, raw_text: &str, modalidade: &str) -> ParseResult {
        if raw_text.trim().is_empty() {
            return ParseResult::default();
        }

        let modality = match self.resolver.resolve(modalidade) {
            Some(m) => m,
            None => {
                warn!(modalidade, "unsupported modality for bet paste");
                return ParseResult::unsupported();
            }
        };

        let result = match modality.shape() {
            BetShape::Group => parse_groups(raw_text),
            BetShape::Digits(width) => parse_chunks(raw_text, width),
        };

        debug!(
            modality = modality.label(),
            valid = result.meta.total_valid,
            discarded = result.meta.discarded,
            processed = result.meta.total_processed,
            "parsed bet input"
        );

        result
    }
}

impl Default for BetParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse with the built-in alias table
///
/// # Examples:
/// ```
/// use panda_loterias::parse_bet_input;
/// let result = parse_bet_input("1234", "CENTENA");
/// assert_eq!(result.valid, vec!["123"]);
/// assert_eq!(result.meta.discarded, 1);
/// ```
pub fn parse_bet_input(raw_text: &str, modalidade: &str) -> ParseResult {
    BetParser::new().parse(raw_text, modalidade)
}

/// Grupo: delimiter-separated integers 1–25, zero-padded to 2
fn parse_groups(raw_text: &str) -> ParseResult {
    let mut valid = Vec::new();
    let mut processed = 0usize;

    for token in raw_text.split(|c: char| !c.is_ascii_digit()).filter(|t| !t.is_empty()) {
        processed += 1;
        match token.parse::<u32>() {
            Ok(group) if (1..=25).contains(&group) => valid.push(format!("{:02}", group)),
            _ => {}
        }
    }

    ParseResult {
        meta: ParseMeta {
            discarded: processed - valid.len(),
            total_processed: processed,
            total_valid: valid.len(),
            is_group: true,
            error: None,
        },
        valid,
    }
}

/// Fixed width: chunk the digit stream left to right, drop the partial tail
fn parse_chunks(raw_text: &str, width: usize) -> ParseResult {
    let digits: String = raw_text.chars().filter(|c| c.is_ascii_digit()).collect();

    let valid: Vec<String> = digits
        .as_bytes()
        .chunks_exact(width)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect();

    ParseResult {
        meta: ParseMeta {
            discarded: digits.len() % width,
            total_processed: digits.len().div_ceil(width),
            total_valid: valid.len(),
            is_group: false,
            error: None,
        },
        valid,
    }
}

// ============================================================================
// TESTS
// ============================================================================
