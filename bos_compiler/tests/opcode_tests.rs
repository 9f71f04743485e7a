//! Instruction catalog and keyword resolution tests.

use bos_compiler::{InvalidOpcode, Opcode};
use bos_parser::Keyword;
use std::collections::HashSet;

/// The complete resolver table: every reserved word with a direct,
/// single-instruction correspondence, paired with its instruction.
const DIRECT: [(Keyword, Opcode); 25] = [
    (Keyword::Move, Opcode::Move),
    (Keyword::Turn, Opcode::Turn),
    (Keyword::Spin, Opcode::Spin),
    (Keyword::StopSpin, Opcode::StopSpin),
    (Keyword::WaitForTurn, Opcode::WaitForTurn),
    (Keyword::WaitForMove, Opcode::WaitForMove),
    (Keyword::Sleep, Opcode::Sleep),
    (Keyword::Set, Opcode::Set),
    (Keyword::Get, Opcode::Get),
    (Keyword::CallScript, Opcode::CallScript),
    (Keyword::StartScript, Opcode::StartScript),
    (Keyword::EmitSfx, Opcode::EmitSfx),
    (Keyword::Show, Opcode::Show),
    (Keyword::Hide, Opcode::Hide),
    (Keyword::Explode, Opcode::Explode),
    (Keyword::Signal, Opcode::Signal),
    (Keyword::SetSignalMask, Opcode::SetSignalMask),
    (Keyword::AttachUnit, Opcode::AttachUnit),
    (Keyword::DropUnit, Opcode::DropUnit),
    (Keyword::Return, Opcode::Return),
    (Keyword::Cache, Opcode::Cache),
    (Keyword::DontCache, Opcode::DontCache),
    (Keyword::DontShade, Opcode::DontShade),
    (Keyword::DontShadow, Opcode::DontShade),
    (Keyword::PlaySound, Opcode::PlaySound),
];

/// Every reserved word the resolver deliberately leaves to the code
/// generator's multi-instruction lowering.
const UNMAPPED: [Keyword; 20] = [
    Keyword::Piece,
    Keyword::StaticVar,
    Keyword::Var,
    Keyword::If,
    Keyword::Else,
    Keyword::While,
    Keyword::For,
    Keyword::Shade,
    Keyword::Rand,
    Keyword::To,
    Keyword::From,
    Keyword::Now,
    Keyword::Speed,
    Keyword::Accelerate,
    Keyword::Decelerate,
    Keyword::Around,
    Keyword::Along,
    Keyword::XAxis,
    Keyword::YAxis,
    Keyword::ZAxis,
];

// =============================================================================
// Catalog Properties
// =============================================================================

#[test]
fn test_codes_are_pairwise_distinct() {
    let mut seen = HashSet::new();
    for op in Opcode::ALL {
        assert!(seen.insert(op.code()), "duplicate code for {:?}", op);
    }
    assert_eq!(seen.len(), Opcode::ALL.len());
}

#[test]
fn test_mnemonics_are_pairwise_distinct() {
    let mut seen = HashSet::new();
    for op in Opcode::ALL {
        assert!(seen.insert(op.mnemonic()), "duplicate mnemonic for {:?}", op);
    }
}

#[test]
fn test_published_code_values() {
    assert_eq!(Opcode::Move.code(), 0x10001000);
    assert_eq!(Opcode::Turn.code(), 0x10002000);
    assert_eq!(Opcode::PushConstant.code(), 0x10021001);
    assert_eq!(Opcode::Div.code(), 0x10034000);
    assert_eq!(Opcode::Mod.code(), 0x10034001);
    assert_eq!(Opcode::LuaCall.code(), 0x10062002);
    assert_eq!(Opcode::Set.code(), 0x10082000);
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_resolve_move_and_turn() {
    let op = Opcode::from_keyword(Keyword::Move).expect("move resolves");
    assert_eq!(op.code(), 0x10001000);
    let op = Opcode::from_keyword(Keyword::Turn).expect("turn resolves");
    assert_eq!(op.code(), 0x10002000);
}

#[test]
fn test_resolver_table() {
    for (keyword, expected) in DIRECT {
        assert_eq!(
            Opcode::from_keyword(keyword),
            Some(expected),
            "wrong resolution for {:?}",
            keyword
        );
    }
}

#[test]
fn test_unmapped_keywords_resolve_to_none() {
    for keyword in UNMAPPED {
        assert_eq!(
            Opcode::from_keyword(keyword),
            None,
            "{:?} should have no direct instruction",
            keyword
        );
    }
}

#[test]
fn test_resolver_sweep_is_exhaustive() {
    // DIRECT and UNMAPPED together cover the whole vocabulary exactly once.
    let mut words: HashSet<Keyword> = HashSet::new();
    for (keyword, _) in DIRECT {
        assert!(words.insert(keyword), "{:?} listed twice", keyword);
    }
    for keyword in UNMAPPED {
        assert!(words.insert(keyword), "{:?} listed twice", keyword);
    }
    assert_eq!(words.len(), 45);
}

#[test]
fn test_shading_synonyms_share_one_instruction() {
    let shade = Opcode::from_keyword(Keyword::DontShade);
    let shadow = Opcode::from_keyword(Keyword::DontShadow);
    assert_eq!(shade, shadow);
    assert_eq!(shade, Some(Opcode::DontShade));
    assert_eq!(shade.map(Opcode::code), Some(0x1000E000));
}

// =============================================================================
// Decoding
// =============================================================================

#[test]
fn test_decode_known_word() {
    assert_eq!(Opcode::try_from(0x10001000u32), Ok(Opcode::Move));
    assert_eq!(Opcode::try_from(0x10034001u32), Ok(Opcode::Mod));
}

#[test]
fn test_decode_unknown_word_fails() {
    let err = Opcode::try_from(0xFFFFFFFFu32).unwrap_err();
    assert_eq!(err, InvalidOpcode { code: 0xFFFFFFFF });
    assert!(err.to_string().contains("0xFFFFFFFF"));
}

#[test]
fn test_decode_rejects_near_misses() {
    // Marker alone, family alone, and a spent variant slot are all invalid.
    assert!(Opcode::try_from(0x10000000u32).is_err());
    assert!(Opcode::try_from(0x10030000u32).is_err());
    assert!(Opcode::try_from(0x10021003u32).is_err());
}

#[test]
fn test_every_resolved_instruction_decodes_back() {
    for (keyword, _) in DIRECT {
        let op = Opcode::from_keyword(keyword).expect("direct keyword");
        assert_eq!(Opcode::try_from(op.code()), Ok(op));
    }
}
