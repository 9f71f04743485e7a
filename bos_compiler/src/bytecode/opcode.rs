//! The COB instruction catalog and the keyword resolver.
//!
//! Every numeric value below is read back by the COB interpreter; the
//! catalog is a wire format and a published value must never change.
//!
//! A code word is structured: bits 31-24 carry the fixed marker `0x10`,
//! bits 19-16 select the functional family, bits 15-12 the operation
//! within the family, and bits 11-0 a variant of the base operation
//! (DIV and MOD differ only in the low bit).

use bos_parser::Keyword;
use std::fmt;

// =============================================================================
// Opcode
// =============================================================================

/// A COB instruction code.
///
/// The catalog is closed: no value outside this enumeration is a valid
/// instruction code. Decoding untrusted numeric data goes through
/// [`Opcode::try_from`], which rejects anything else with
/// [`InvalidOpcode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Opcode {
    // Piece control
    /// Start a piece translation.
    Move = 0x1000_1000,
    /// Start a piece rotation.
    Turn = 0x1000_2000,
    /// Start a continuous piece rotation.
    Spin = 0x1000_3000,
    /// Stop a continuous rotation.
    StopSpin = 0x1000_4000,
    /// Make a piece visible.
    Show = 0x1000_5000,
    /// Make a piece invisible.
    Hide = 0x1000_6000,
    /// Restore a piece to the render cache.
    Cache = 0x1000_7000,
    /// Exclude a piece from the render cache.
    DontCache = 0x1000_8000,
    /// Translate a piece instantly.
    MoveNow = 0x1000_B000,
    /// Rotate a piece instantly.
    TurnNow = 0x1000_C000,
    /// Enable shading for a piece.
    Shade = 0x1000_D000,
    /// Disable shading for a piece.
    DontShade = 0x1000_E000,
    /// Spawn a special effect at a piece.
    EmitSfx = 0x1000_F000,

    // Waits
    /// Block until a rotation completes.
    WaitForTurn = 0x1001_1000,
    /// Block until a translation completes.
    WaitForMove = 0x1001_2000,
    /// Block for a duration.
    Sleep = 0x1001_3000,

    // Stack
    /// Push a constant from the instruction stream.
    PushConstant = 0x1002_1001,
    /// Push a local variable.
    PushLocalVar = 0x1002_1002,
    /// Push a static variable.
    PushStatic = 0x1002_1004,
    /// Reserve a local variable slot.
    CreateLocalVar = 0x1002_2000,
    /// Pop into a local variable.
    PopLocalVar = 0x1002_3002,
    /// Pop into a static variable.
    PopStatic = 0x1002_3004,
    /// Discard the top of stack.
    PopStack = 0x1002_4000,

    // Arithmetic
    /// Integer addition.
    Add = 0x1003_1000,
    /// Integer subtraction.
    Sub = 0x1003_2000,
    /// Integer multiplication.
    Mul = 0x1003_3000,
    /// Integer division.
    Div = 0x1003_4000,
    /// Integer remainder.
    Mod = 0x1003_4001,
    /// Bitwise AND.
    BitwiseAnd = 0x1003_5000,
    /// Bitwise OR.
    BitwiseOr = 0x1003_6000,
    /// Bitwise XOR.
    BitwiseXor = 0x1003_7000,
    /// Bitwise complement.
    BitwiseNot = 0x1003_8000,

    // Queries
    /// Push a random value from an inclusive range.
    Rand = 0x1004_1000,
    /// Read a unit value by index.
    GetUnitValue = 0x1004_2000,
    /// Read a unit value with arguments.
    Get = 0x1004_3000,

    // Comparison and logic
    /// Push lhs < rhs.
    SetLess = 0x1005_1000,
    /// Push lhs <= rhs.
    SetLessOrEqual = 0x1005_2000,
    /// Push lhs > rhs.
    SetGreater = 0x1005_3000,
    /// Push lhs >= rhs.
    SetGreaterOrEqual = 0x1005_4000,
    /// Push lhs == rhs.
    SetEqual = 0x1005_5000,
    /// Push lhs != rhs.
    SetNotEqual = 0x1005_6000,
    /// Logical AND.
    LogicalAnd = 0x1005_7000,
    /// Logical OR.
    LogicalOr = 0x1005_8000,
    /// Logical XOR.
    LogicalXor = 0x1005_9000,
    /// Logical negation.
    LogicalNot = 0x1005_A000,

    // Control flow and calls
    /// Spawn a script thread.
    StartScript = 0x1006_1000,
    /// Call a script and wait for it.
    CallScript = 0x1006_2000,
    /// Call a native handler.
    RealCall = 0x1006_2001,
    /// Call a Lua handler.
    LuaCall = 0x1006_2002,
    /// Unconditional jump.
    Jump = 0x1006_4000,
    /// Return from the current script.
    Return = 0x1006_5000,
    /// Jump when the top of stack is false.
    JumpNotEqual = 0x1006_6000,
    /// Raise a signal on the unit's threads.
    Signal = 0x1006_7000,
    /// Set the current thread's signal mask.
    SetSignalMask = 0x1006_8000,

    // Effects
    /// Detach a piece as debris.
    Explode = 0x1007_1000,
    /// Play a sound sample.
    PlaySound = 0x1007_2000,

    // Unit interaction
    /// Write a unit value by index.
    Set = 0x1008_2000,
    /// Attach a unit to a piece.
    AttachUnit = 0x1008_3000,
    /// Release an attached unit.
    DropUnit = 0x1008_4000,
}

impl Opcode {
    /// Marker carried in the top byte of every code word, distinguishing
    /// instruction codes from unrelated numeric data.
    pub const MARKER: u32 = 0x1000_0000;

    /// Every catalog member, in declaration order.
    pub const ALL: [Opcode; 59] = [
        Opcode::Move,
        Opcode::Turn,
        Opcode::Spin,
        Opcode::StopSpin,
        Opcode::Show,
        Opcode::Hide,
        Opcode::Cache,
        Opcode::DontCache,
        Opcode::MoveNow,
        Opcode::TurnNow,
        Opcode::Shade,
        Opcode::DontShade,
        Opcode::EmitSfx,
        Opcode::WaitForTurn,
        Opcode::WaitForMove,
        Opcode::Sleep,
        Opcode::PushConstant,
        Opcode::PushLocalVar,
        Opcode::PushStatic,
        Opcode::CreateLocalVar,
        Opcode::PopLocalVar,
        Opcode::PopStatic,
        Opcode::PopStack,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::BitwiseAnd,
        Opcode::BitwiseOr,
        Opcode::BitwiseXor,
        Opcode::BitwiseNot,
        Opcode::Rand,
        Opcode::GetUnitValue,
        Opcode::Get,
        Opcode::SetLess,
        Opcode::SetLessOrEqual,
        Opcode::SetGreater,
        Opcode::SetGreaterOrEqual,
        Opcode::SetEqual,
        Opcode::SetNotEqual,
        Opcode::LogicalAnd,
        Opcode::LogicalOr,
        Opcode::LogicalXor,
        Opcode::LogicalNot,
        Opcode::StartScript,
        Opcode::CallScript,
        Opcode::RealCall,
        Opcode::LuaCall,
        Opcode::Jump,
        Opcode::Return,
        Opcode::JumpNotEqual,
        Opcode::Signal,
        Opcode::SetSignalMask,
        Opcode::Explode,
        Opcode::PlaySound,
        Opcode::Set,
        Opcode::AttachUnit,
        Opcode::DropUnit,
    ];

    /// The 32-bit code word.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// The instruction's mnemonic, as it appears in disassembly.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Move => "MOVE",
            Opcode::Turn => "TURN",
            Opcode::Spin => "SPIN",
            Opcode::StopSpin => "STOP_SPIN",
            Opcode::Show => "SHOW",
            Opcode::Hide => "HIDE",
            Opcode::Cache => "CACHE",
            Opcode::DontCache => "DONT_CACHE",
            Opcode::MoveNow => "MOVE_NOW",
            Opcode::TurnNow => "TURN_NOW",
            Opcode::Shade => "SHADE",
            Opcode::DontShade => "DONT_SHADE",
            Opcode::EmitSfx => "EMIT_SFX",
            Opcode::WaitForTurn => "WAIT_FOR_TURN",
            Opcode::WaitForMove => "WAIT_FOR_MOVE",
            Opcode::Sleep => "SLEEP",
            Opcode::PushConstant => "PUSH_CONSTANT",
            Opcode::PushLocalVar => "PUSH_LOCAL_VAR",
            Opcode::PushStatic => "PUSH_STATIC",
            Opcode::CreateLocalVar => "CREATE_LOCAL_VAR",
            Opcode::PopLocalVar => "POP_LOCAL_VAR",
            Opcode::PopStatic => "POP_STATIC",
            Opcode::PopStack => "POP_STACK",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::BitwiseAnd => "BITWISE_AND",
            Opcode::BitwiseOr => "BITWISE_OR",
            Opcode::BitwiseXor => "BITWISE_XOR",
            Opcode::BitwiseNot => "BITWISE_NOT",
            Opcode::Rand => "RAND",
            Opcode::GetUnitValue => "GET_UNIT_VALUE",
            Opcode::Get => "GET",
            Opcode::SetLess => "SET_LESS",
            Opcode::SetLessOrEqual => "SET_LESS_OR_EQUAL",
            Opcode::SetGreater => "SET_GREATER",
            Opcode::SetGreaterOrEqual => "SET_GREATER_OR_EQUAL",
            Opcode::SetEqual => "SET_EQUAL",
            Opcode::SetNotEqual => "SET_NOT_EQUAL",
            Opcode::LogicalAnd => "LOGICAL_AND",
            Opcode::LogicalOr => "LOGICAL_OR",
            Opcode::LogicalXor => "LOGICAL_XOR",
            Opcode::LogicalNot => "LOGICAL_NOT",
            Opcode::StartScript => "START_SCRIPT",
            Opcode::CallScript => "CALL_SCRIPT",
            Opcode::RealCall => "REAL_CALL",
            Opcode::LuaCall => "LUA_CALL",
            Opcode::Jump => "JUMP",
            Opcode::Return => "RETURN",
            Opcode::JumpNotEqual => "JUMP_NOT_EQUAL",
            Opcode::Signal => "SIGNAL",
            Opcode::SetSignalMask => "SET_SIGNAL_MASK",
            Opcode::Explode => "EXPLODE",
            Opcode::PlaySound => "PLAY_SOUND",
            Opcode::Set => "SET",
            Opcode::AttachUnit => "ATTACH_UNIT",
            Opcode::DropUnit => "DROP_UNIT",
        }
    }

    /// The functional family this instruction belongs to.
    ///
    /// Always agrees with bits 19-16 of the code word.
    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Opcode::Move
            | Opcode::Turn
            | Opcode::Spin
            | Opcode::StopSpin
            | Opcode::Show
            | Opcode::Hide
            | Opcode::Cache
            | Opcode::DontCache
            | Opcode::MoveNow
            | Opcode::TurnNow
            | Opcode::Shade
            | Opcode::DontShade
            | Opcode::EmitSfx => Family::PieceControl,

            Opcode::WaitForTurn | Opcode::WaitForMove | Opcode::Sleep => Family::Wait,

            Opcode::PushConstant
            | Opcode::PushLocalVar
            | Opcode::PushStatic
            | Opcode::CreateLocalVar
            | Opcode::PopLocalVar
            | Opcode::PopStatic
            | Opcode::PopStack => Family::Stack,

            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Mod
            | Opcode::BitwiseAnd
            | Opcode::BitwiseOr
            | Opcode::BitwiseXor
            | Opcode::BitwiseNot => Family::Arithmetic,

            Opcode::Rand | Opcode::GetUnitValue | Opcode::Get => Family::Query,

            Opcode::SetLess
            | Opcode::SetLessOrEqual
            | Opcode::SetGreater
            | Opcode::SetGreaterOrEqual
            | Opcode::SetEqual
            | Opcode::SetNotEqual
            | Opcode::LogicalAnd
            | Opcode::LogicalOr
            | Opcode::LogicalXor
            | Opcode::LogicalNot => Family::Logic,

            Opcode::StartScript
            | Opcode::CallScript
            | Opcode::RealCall
            | Opcode::LuaCall
            | Opcode::Jump
            | Opcode::Return
            | Opcode::JumpNotEqual
            | Opcode::Signal
            | Opcode::SetSignalMask => Family::Flow,

            Opcode::Explode | Opcode::PlaySound => Family::Effect,

            Opcode::Set | Opcode::AttachUnit | Opcode::DropUnit => Family::Unit,
        }
    }

    /// Resolve a reserved word to the instruction it denotes directly.
    ///
    /// Only words with a context-free, single-instruction correspondence
    /// resolve; everything else returns `None` and is lowered by the code
    /// generator instead. `None` is a normal outcome, not an error.
    ///
    /// `dont-shade` and `dont-shadow` are an accepted synonym pair and
    /// both resolve to [`Opcode::DontShade`].
    #[must_use]
    pub const fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Turn => Some(Opcode::Turn),
            Keyword::Move => Some(Opcode::Move),
            Keyword::Spin => Some(Opcode::Spin),
            Keyword::StopSpin => Some(Opcode::StopSpin),
            Keyword::WaitForTurn => Some(Opcode::WaitForTurn),
            Keyword::WaitForMove => Some(Opcode::WaitForMove),
            Keyword::Set => Some(Opcode::Set),
            Keyword::Get => Some(Opcode::Get),
            Keyword::CallScript => Some(Opcode::CallScript),
            Keyword::StartScript => Some(Opcode::StartScript),
            Keyword::EmitSfx => Some(Opcode::EmitSfx),
            Keyword::Sleep => Some(Opcode::Sleep),
            Keyword::Hide => Some(Opcode::Hide),
            Keyword::Show => Some(Opcode::Show),
            Keyword::Explode => Some(Opcode::Explode),
            Keyword::Signal => Some(Opcode::Signal),
            Keyword::SetSignalMask => Some(Opcode::SetSignalMask),
            Keyword::AttachUnit => Some(Opcode::AttachUnit),
            Keyword::DropUnit => Some(Opcode::DropUnit),
            Keyword::Return => Some(Opcode::Return),
            Keyword::Cache => Some(Opcode::Cache),
            Keyword::DontCache => Some(Opcode::DontCache),
            Keyword::DontShadow => Some(Opcode::DontShade),
            Keyword::DontShade => Some(Opcode::DontShade),
            Keyword::PlaySound => Some(Opcode::PlaySound),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:08X})", self.mnemonic(), self.code())
    }
}

impl TryFrom<u32> for Opcode {
    type Error = InvalidOpcode;

    fn try_from(raw: u32) -> Result<Self, InvalidOpcode> {
        let op = match raw {
            0x1000_1000 => Opcode::Move,
            0x1000_2000 => Opcode::Turn,
            0x1000_3000 => Opcode::Spin,
            0x1000_4000 => Opcode::StopSpin,
            0x1000_5000 => Opcode::Show,
            0x1000_6000 => Opcode::Hide,
            0x1000_7000 => Opcode::Cache,
            0x1000_8000 => Opcode::DontCache,
            0x1000_B000 => Opcode::MoveNow,
            0x1000_C000 => Opcode::TurnNow,
            0x1000_D000 => Opcode::Shade,
            0x1000_E000 => Opcode::DontShade,
            0x1000_F000 => Opcode::EmitSfx,
            0x1001_1000 => Opcode::WaitForTurn,
            0x1001_2000 => Opcode::WaitForMove,
            0x1001_3000 => Opcode::Sleep,
            0x1002_1001 => Opcode::PushConstant,
            0x1002_1002 => Opcode::PushLocalVar,
            0x1002_1004 => Opcode::PushStatic,
            0x1002_2000 => Opcode::CreateLocalVar,
            0x1002_3002 => Opcode::PopLocalVar,
            0x1002_3004 => Opcode::PopStatic,
            0x1002_4000 => Opcode::PopStack,
            0x1003_1000 => Opcode::Add,
            0x1003_2000 => Opcode::Sub,
            0x1003_3000 => Opcode::Mul,
            0x1003_4000 => Opcode::Div,
            0x1003_4001 => Opcode::Mod,
            0x1003_5000 => Opcode::BitwiseAnd,
            0x1003_6000 => Opcode::BitwiseOr,
            0x1003_7000 => Opcode::BitwiseXor,
            0x1003_8000 => Opcode::BitwiseNot,
            0x1004_1000 => Opcode::Rand,
            0x1004_2000 => Opcode::GetUnitValue,
            0x1004_3000 => Opcode::Get,
            0x1005_1000 => Opcode::SetLess,
            0x1005_2000 => Opcode::SetLessOrEqual,
            0x1005_3000 => Opcode::SetGreater,
            0x1005_4000 => Opcode::SetGreaterOrEqual,
            0x1005_5000 => Opcode::SetEqual,
            0x1005_6000 => Opcode::SetNotEqual,
            0x1005_7000 => Opcode::LogicalAnd,
            0x1005_8000 => Opcode::LogicalOr,
            0x1005_9000 => Opcode::LogicalXor,
            0x1005_A000 => Opcode::LogicalNot,
            0x1006_1000 => Opcode::StartScript,
            0x1006_2000 => Opcode::CallScript,
            0x1006_2001 => Opcode::RealCall,
            0x1006_2002 => Opcode::LuaCall,
            0x1006_4000 => Opcode::Jump,
            0x1006_5000 => Opcode::Return,
            0x1006_6000 => Opcode::JumpNotEqual,
            0x1006_7000 => Opcode::Signal,
            0x1006_8000 => Opcode::SetSignalMask,
            0x1007_1000 => Opcode::Explode,
            0x1007_2000 => Opcode::PlaySound,
            0x1008_2000 => Opcode::Set,
            0x1008_3000 => Opcode::AttachUnit,
            0x1008_4000 => Opcode::DropUnit,
            _ => return Err(InvalidOpcode { code: raw }),
        };
        Ok(op)
    }
}

// =============================================================================
// Family
// =============================================================================

/// Functional family of an instruction, encoded in bits 19-16 of its
/// code word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Piece movement, visibility and shading.
    PieceControl,
    /// Blocking waits.
    Wait,
    /// Value stack manipulation.
    Stack,
    /// Integer and bitwise arithmetic.
    Arithmetic,
    /// Unit and engine state queries.
    Query,
    /// Comparisons and boolean logic.
    Logic,
    /// Jumps, calls and signals.
    Flow,
    /// World-visible effects.
    Effect,
    /// Unit attachment and state writes.
    Unit,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::PieceControl => "piece control",
            Family::Wait => "wait",
            Family::Stack => "stack",
            Family::Arithmetic => "arithmetic",
            Family::Query => "query",
            Family::Logic => "logic",
            Family::Flow => "flow",
            Family::Effect => "effect",
            Family::Unit => "unit",
        };
        f.write_str(name)
    }
}

// =============================================================================
// InvalidOpcode
// =============================================================================

/// A raw 32-bit word that does not name any catalog member.
///
/// Returned by [`Opcode::try_from`] when decoding untrusted numeric data;
/// carries the rejected word so the decoder can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOpcode {
    /// The rejected word.
    pub code: u32,
}

impl fmt::Display for InvalidOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a recognized instruction code: 0x{:08X}", self.code)
    }
}

impl std::error::Error for InvalidOpcode {}

// =============================================================================
// Tests
// =============================================================================
