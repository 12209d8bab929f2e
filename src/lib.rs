// Panda Loterias - Bet input core
// Free-text bet parsing + Valendo derivation, pure functions over strings

pub mod modality;
pub mod parser;
pub mod valendo;
pub mod groups;
pub mod config;

// Re-export commonly used types
pub use modality::{
    Modality, BetShape, ModalityResolver,
    resolve_modality,
};
pub use parser::{
    BetParser, ParseResult, ParseMeta, ParseError,
    parse_bet_input,
};
pub use valendo::{
    ValendoBase, BaseWidth, ValendoError,
    derive_valendo_palpites, derive_for, group_from_last2,
};
pub use groups::{
    GROUP_NAMES, group_name, dezenas_of_group, group_of_number,
};
pub use config::{ParserConfig, ALIASES_FILE_ENV};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
