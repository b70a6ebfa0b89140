// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Reserved-word recognition for EasyCode.
//!
//! Keywords are recognized by a precomputed deterministic finite-state
//! machine rather than a lookup table: classification runs in O(word
//! length) with at most 26 outgoing edges per state, independent of how
//! many reserved words exist. State 0 is the start state; any character
//! with no matching edge falls through to a dead state from which every
//! suffix classifies as a plain identifier.
//!
//! The machine is a static table with process-wide immutable lifetime.
//! Each state lists its explicit lowercase-letter edges; the default
//! edge to [`S_IDENT`] is implicit in [`step`].

use super::TokenKind;

/// Index of a state in [`STATES`].
type StateId = u16;

/// One state of the keyword automaton.
struct StateNode {
    /// This state's own index; checked against its position by tests.
    id: StateId,
    /// The keyword recognized when a word ends in this state, if any.
    output: Option<TokenKind>,
    /// Explicit transitions on lowercase letters.
    edges: &'static [(u8, StateId)],
}

/// Classifies a word as a reserved-word token kind.
///
/// Returns `None` when the word is a plain identifier. Input is
/// case-folded one character at a time; any character outside `a..=z`
/// (after folding) immediately forces identifier classification, even
/// if later characters would otherwise complete a keyword.
///
/// # Examples
///
/// ```
/// use easycode_core::source_analysis::{keyword_kind, TokenKind};
///
/// assert_eq!(keyword_kind("show"), Some(TokenKind::Show));
/// assert_eq!(keyword_kind("SHOW"), Some(TokenKind::Show));
/// assert_eq!(keyword_kind("shows"), None);
/// assert_eq!(keyword_kind("sh0w"), None);
/// ```
#[must_use]
pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    let mut state = S_START;
    for byte in word.bytes() {
        let c = byte.to_ascii_lowercase();
        if !c.is_ascii_lowercase() {
            return None;
        }
        if state == S_IDENT {
            // Dead state: no suffix can recover a keyword match.
            break;
        }
        state = step(state, c);
    }
    STATES[state as usize].output.clone()
}

/// Follows the edge for `c` out of `state`, defaulting to the dead state.
fn step(state: StateId, c: u8) -> StateId {
    STATES[state as usize]
        .edges
        .iter()
        .find(|&&(input, _)| input == c)
        .map_or(S_IDENT, |&(_, next)| next)
}

const S_START: StateId = 0;
const S_IDENT: StateId = 1;

const S_A: StateId = 2;
const S_AN: StateId = 3;
const S_AND: StateId = 4;
const S_AS: StateId = 5;
const S_ASK: StateId = 6;
const S_AL: StateId = 7;
const S_ALS: StateId = 8;
const S_ALSO: StateId = 9;

const S_B: StateId = 10;
const S_BO: StateId = 11;
const S_BOO: StateId = 12;
const S_BOOL: StateId = 13;

const S_C: StateId = 14;
const S_CO: StateId = 15;
const S_CON: StateId = 16;
const S_CONS: StateId = 17;
const S_CONST: StateId = 18;
const S_CONT: StateId = 19;
const S_CONTI: StateId = 20;
const S_CONTIN: StateId = 21;
const S_CONTINU: StateId = 22;
const S_CONTINUE: StateId = 23;

const S_D: StateId = 24;
const S_DE: StateId = 25;
const S_DEC: StateId = 26;
const S_DECI: StateId = 27;
const S_DECIM: StateId = 28;
const S_DECIMA: StateId = 29;
const S_DECIMAL: StateId = 30;

const S_E: StateId = 31;
const S_EN: StateId = 32;
const S_END: StateId = 33;
const S_EL: StateId = 34;
const S_ELS: StateId = 35;
const S_ELSE: StateId = 36;
const S_EX: StateId = 37;
const S_EXI: StateId = 38;
const S_EXIT: StateId = 39;
const S_EA: StateId = 40;
const S_EAC: StateId = 41;
const S_EACH: StateId = 42;

const S_F: StateId = 43;
const S_FA: StateId = 44;
const S_FAL: StateId = 45;
const S_FALS: StateId = 46;
const S_FALSE: StateId = 47;

const S_G: StateId = 48;
const S_GO: StateId = 49;
const S_GOT: StateId = 50;
const S_GOTO: StateId = 51;
const S_GR: StateId = 52;
const S_GRE: StateId = 53;
const S_GREA: StateId = 54;
const S_GREAT: StateId = 55;
const S_GREATE: StateId = 56;
const S_GREATER: StateId = 57;

const S_I: StateId = 58;
const S_IF: StateId = 59;
const S_IM: StateId = 60;
const S_IMP: StateId = 61;
const S_IMPO: StateId = 62;
const S_IMPOR: StateId = 63;
const S_IMPORT: StateId = 64;

const S_L: StateId = 65;
const S_LO: StateId = 66;
const S_LOO: StateId = 67;
const S_LOOP: StateId = 68;
const S_LE: StateId = 69;
const S_LET: StateId = 70;
const S_LETT: StateId = 71;
const S_LETTE: StateId = 72;
const S_LETTER: StateId = 73;
const S_LES: StateId = 74;
const S_LESS: StateId = 75;

const S_M: StateId = 76;
const S_MA: StateId = 77;
const S_MAI: StateId = 78;
const S_MAIN: StateId = 79;

const S_N: StateId = 80;
const S_NO: StateId = 81;
const S_NOT: StateId = 82;
const S_NU: StateId = 83;
const S_NUL: StateId = 84;
const S_NULL: StateId = 85;
const S_NUM: StateId = 86;
const S_NUMB: StateId = 87;
const S_NUMBE: StateId = 88;
const S_NUMBER: StateId = 89;

const S_O: StateId = 90;
const S_OR: StateId = 91;
const S_OF: StateId = 92;

const S_R: StateId = 93;
const S_RE: StateId = 94;
const S_REP: StateId = 95;
const S_REPE: StateId = 96;
const S_REPEA: StateId = 97;
const S_REPEAT: StateId = 98;
const S_RET: StateId = 99;
const S_RETU: StateId = 100;
const S_RETUR: StateId = 101;
const S_RETURN: StateId = 102;

const S_S: StateId = 103;
const S_SH: StateId = 104;
const S_SHO: StateId = 105;
const S_SHOW: StateId = 106;
const S_SI: StateId = 107;
const S_SIZ: StateId = 108;
const S_SIZE: StateId = 109;
const S_SIZEO: StateId = 110;
const S_SIZEOF: StateId = 111;
const S_ST: StateId = 112;
const S_STA: StateId = 113;
const S_STAR: StateId = 114;
const S_START_KW: StateId = 115;
const S_STO: StateId = 116;
const S_STOP: StateId = 117;

const S_T: StateId = 118;
const S_TH: StateId = 119;
const S_THE: StateId = 120;
const S_THEN: StateId = 121;
const S_TR: StateId = 122;
const S_TRU: StateId = 123;
const S_TRUE: StateId = 124;

const S_W: StateId = 125;
const S_WH: StateId = 126;
const S_WHI: StateId = 127;
const S_WHIL: StateId = 128;
const S_WHILE: StateId = 129;
const S_WO: StateId = 130;
const S_WOR: StateId = 131;
const S_WORD: StateId = 132;

/// The automaton itself, ordered by [`StateId`].
static STATES: &[StateNode] = &[
    StateNode {
        id: S_START,
        output: None,
        edges: &[
            (b'a', S_A),
            (b'b', S_B),
            (b'c', S_C),
            (b'd', S_D),
            (b'e', S_E),
            (b'f', S_F),
            (b'g', S_G),
            (b'i', S_I),
            (b'l', S_L),
            (b'm', S_M),
            (b'n', S_N),
            (b'o', S_O),
            (b'r', S_R),
            (b's', S_S),
            (b't', S_T),
            (b'w', S_W),
        ],
    },
    // Dead state: everything stays a plain identifier.
    StateNode { id: S_IDENT, output: None, edges: &[] },
    // "a..."
    StateNode { id: S_A, output: None, edges: &[(b'n', S_AN), (b's', S_AS), (b'l', S_AL)] },
    StateNode { id: S_AN, output: None, edges: &[(b'd', S_AND)] },
    StateNode { id: S_AND, output: Some(TokenKind::And), edges: &[] },
    StateNode { id: S_AS, output: None, edges: &[(b'k', S_ASK)] },
    StateNode { id: S_ASK, output: Some(TokenKind::Ask), edges: &[] },
    StateNode { id: S_AL, output: None, edges: &[(b's', S_ALS)] },
    StateNode { id: S_ALS, output: None, edges: &[(b'o', S_ALSO)] },
    StateNode { id: S_ALSO, output: Some(TokenKind::Also), edges: &[] },
    // "b..."
    StateNode { id: S_B, output: None, edges: &[(b'o', S_BO)] },
    StateNode { id: S_BO, output: None, edges: &[(b'o', S_BOO)] },
    StateNode { id: S_BOO, output: None, edges: &[(b'l', S_BOOL)] },
    StateNode { id: S_BOOL, output: Some(TokenKind::Bool), edges: &[] },
    // "c..."
    StateNode { id: S_C, output: None, edges: &[(b'o', S_CO)] },
    StateNode { id: S_CO, output: None, edges: &[(b'n', S_CON)] },
    StateNode { id: S_CON, output: None, edges: &[(b's', S_CONS), (b't', S_CONT)] },
    StateNode { id: S_CONS, output: None, edges: &[(b't', S_CONST)] },
    StateNode { id: S_CONST, output: Some(TokenKind::Const), edges: &[] },
    StateNode { id: S_CONT, output: None, edges: &[(b'i', S_CONTI)] },
    StateNode { id: S_CONTI, output: None, edges: &[(b'n', S_CONTIN)] },
    StateNode { id: S_CONTIN, output: None, edges: &[(b'u', S_CONTINU)] },
    StateNode { id: S_CONTINU, output: None, edges: &[(b'e', S_CONTINUE)] },
    StateNode { id: S_CONTINUE, output: Some(TokenKind::Continue), edges: &[] },
    // "d..."
    StateNode { id: S_D, output: None, edges: &[(b'e', S_DE)] },
    StateNode { id: S_DE, output: None, edges: &[(b'c', S_DEC)] },
    StateNode { id: S_DEC, output: None, edges: &[(b'i', S_DECI)] },
    StateNode { id: S_DECI, output: None, edges: &[(b'm', S_DECIM)] },
    StateNode { id: S_DECIM, output: None, edges: &[(b'a', S_DECIMA)] },
    StateNode { id: S_DECIMA, output: None, edges: &[(b'l', S_DECIMAL)] },
    StateNode { id: S_DECIMAL, output: Some(TokenKind::Decimal), edges: &[] },
    // "e..."
    StateNode {
        id: S_E,
        output: None,
        edges: &[(b'n', S_EN), (b'l', S_EL), (b'x', S_EX), (b'a', S_EA)],
    },
    StateNode { id: S_EN, output: None, edges: &[(b'd', S_END)] },
    StateNode { id: S_END, output: Some(TokenKind::End), edges: &[] },
    StateNode { id: S_EL, output: None, edges: &[(b's', S_ELS)] },
    StateNode { id: S_ELS, output: None, edges: &[(b'e', S_ELSE)] },
    StateNode { id: S_ELSE, output: Some(TokenKind::Else), edges: &[] },
    StateNode { id: S_EX, output: None, edges: &[(b'i', S_EXI)] },
    StateNode { id: S_EXI, output: None, edges: &[(b't', S_EXIT)] },
    StateNode { id: S_EXIT, output: Some(TokenKind::Exit), edges: &[] },
    StateNode { id: S_EA, output: None, edges: &[(b'c', S_EAC)] },
    StateNode { id: S_EAC, output: None, edges: &[(b'h', S_EACH)] },
    StateNode { id: S_EACH, output: Some(TokenKind::Each), edges: &[] },
    // "f..."
    StateNode { id: S_F, output: None, edges: &[(b'a', S_FA)] },
    StateNode { id: S_FA, output: None, edges: &[(b'l', S_FAL)] },
    StateNode { id: S_FAL, output: None, edges: &[(b's', S_FALS)] },
    StateNode { id: S_FALS, output: None, edges: &[(b'e', S_FALSE)] },
    StateNode { id: S_FALSE, output: Some(TokenKind::False), edges: &[] },
    // "g..."
    StateNode { id: S_G, output: None, edges: &[(b'o', S_GO), (b'r', S_GR)] },
    StateNode { id: S_GO, output: None, edges: &[(b't', S_GOT)] },
    StateNode { id: S_GOT, output: None, edges: &[(b'o', S_GOTO)] },
    StateNode { id: S_GOTO, output: Some(TokenKind::Goto), edges: &[] },
    StateNode { id: S_GR, output: None, edges: &[(b'e', S_GRE)] },
    StateNode { id: S_GRE, output: None, edges: &[(b'a', S_GREA)] },
    StateNode { id: S_GREA, output: None, edges: &[(b't', S_GREAT)] },
    StateNode { id: S_GREAT, output: None, edges: &[(b'e', S_GREATE)] },
    StateNode { id: S_GREATE, output: None, edges: &[(b'r', S_GREATER)] },
    StateNode { id: S_GREATER, output: Some(TokenKind::Greater), edges: &[] },
    // "i..."
    StateNode { id: S_I, output: None, edges: &[(b'f', S_IF), (b'm', S_IM)] },
    StateNode { id: S_IF, output: Some(TokenKind::If), edges: &[] },
    StateNode { id: S_IM, output: None, edges: &[(b'p', S_IMP)] },
    StateNode { id: S_IMP, output: None, edges: &[(b'o', S_IMPO)] },
    StateNode { id: S_IMPO, output: None, edges: &[(b'r', S_IMPOR)] },
    StateNode { id: S_IMPOR, output: None, edges: &[(b't', S_IMPORT)] },
    StateNode { id: S_IMPORT, output: Some(TokenKind::Import), edges: &[] },
    // "l..."
    StateNode { id: S_L, output: None, edges: &[(b'o', S_LO), (b'e', S_LE)] },
    StateNode { id: S_LO, output: None, edges: &[(b'o', S_LOO)] },
    StateNode { id: S_LOO, output: None, edges: &[(b'p', S_LOOP)] },
    StateNode { id: S_LOOP, output: Some(TokenKind::Loop), edges: &[] },
    StateNode { id: S_LE, output: None, edges: &[(b't', S_LET), (b's', S_LES)] },
    StateNode { id: S_LET, output: None, edges: &[(b't', S_LETT)] },
    StateNode { id: S_LETT, output: None, edges: &[(b'e', S_LETTE)] },
    StateNode { id: S_LETTE, output: None, edges: &[(b'r', S_LETTER)] },
    StateNode { id: S_LETTER, output: Some(TokenKind::Letter), edges: &[] },
    StateNode { id: S_LES, output: None, edges: &[(b's', S_LESS)] },
    StateNode { id: S_LESS, output: Some(TokenKind::Less), edges: &[] },
    // "m..."
    StateNode { id: S_M, output: None, edges: &[(b'a', S_MA)] },
    StateNode { id: S_MA, output: None, edges: &[(b'i', S_MAI)] },
    StateNode { id: S_MAI, output: None, edges: &[(b'n', S_MAIN)] },
    StateNode { id: S_MAIN, output: Some(TokenKind::Main), edges: &[] },
    // "n..."
    StateNode { id: S_N, output: None, edges: &[(b'o', S_NO), (b'u', S_NU)] },
    StateNode { id: S_NO, output: None, edges: &[(b't', S_NOT)] },
    StateNode { id: S_NOT, output: Some(TokenKind::Not), edges: &[] },
    StateNode { id: S_NU, output: None, edges: &[(b'l', S_NUL), (b'm', S_NUM)] },
    StateNode { id: S_NUL, output: None, edges: &[(b'l', S_NULL)] },
    StateNode { id: S_NULL, output: Some(TokenKind::Null), edges: &[] },
    StateNode { id: S_NUM, output: None, edges: &[(b'b', S_NUMB)] },
    StateNode { id: S_NUMB, output: None, edges: &[(b'e', S_NUMBE)] },
    StateNode { id: S_NUMBE, output: None, edges: &[(b'r', S_NUMBER)] },
    StateNode { id: S_NUMBER, output: Some(TokenKind::Number), edges: &[] },
    // "o..."
    StateNode { id: S_O, output: None, edges: &[(b'r', S_OR), (b'f', S_OF)] },
    StateNode { id: S_OR, output: Some(TokenKind::Or), edges: &[] },
    StateNode { id: S_OF, output: Some(TokenKind::Of), edges: &[] },
    // "r..."
    StateNode { id: S_R, output: None, edges: &[(b'e', S_RE)] },
    StateNode { id: S_RE, output: None, edges: &[(b'p', S_REP), (b't', S_RET)] },
    StateNode { id: S_REP, output: None, edges: &[(b'e', S_REPE)] },
    StateNode { id: S_REPE, output: None, edges: &[(b'a', S_REPEA)] },
    StateNode { id: S_REPEA, output: None, edges: &[(b't', S_REPEAT)] },
    StateNode { id: S_REPEAT, output: Some(TokenKind::Repeat), edges: &[] },
    StateNode { id: S_RET, output: None, edges: &[(b'u', S_RETU)] },
    StateNode { id: S_RETU, output: None, edges: &[(b'r', S_RETUR)] },
    StateNode { id: S_RETUR, output: None, edges: &[(b'n', S_RETURN)] },
    StateNode { id: S_RETURN, output: Some(TokenKind::Return), edges: &[] },
    // "s..."
    StateNode {
        id: S_S,
        output: None,
        edges: &[(b'h', S_SH), (b'i', S_SI), (b't', S_ST)],
    },
    StateNode { id: S_SH, output: None, edges: &[(b'o', S_SHO)] },
    StateNode { id: S_SHO, output: None, edges: &[(b'w', S_SHOW)] },
    StateNode { id: S_SHOW, output: Some(TokenKind::Show), edges: &[] },
    StateNode { id: S_SI, output: None, edges: &[(b'z', S_SIZ)] },
    StateNode { id: S_SIZ, output: None, edges: &[(b'e', S_SIZE)] },
    StateNode { id: S_SIZE, output: None, edges: &[(b'o', S_SIZEO)] },
    StateNode { id: S_SIZEO, output: None, edges: &[(b'f', S_SIZEOF)] },
    StateNode { id: S_SIZEOF, output: Some(TokenKind::Sizeof), edges: &[] },
    StateNode { id: S_ST, output: None, edges: &[(b'a', S_STA), (b'o', S_STO)] },
    StateNode { id: S_STA, output: None, edges: &[(b'r', S_STAR)] },
    StateNode { id: S_STAR, output: None, edges: &[(b't', S_START_KW)] },
    StateNode { id: S_START_KW, output: Some(TokenKind::Start), edges: &[] },
    StateNode { id: S_STO, output: None, edges: &[(b'p', S_STOP)] },
    StateNode { id: S_STOP, output: Some(TokenKind::Stop), edges: &[] },
    // "t..."
    StateNode { id: S_T, output: None, edges: &[(b'h', S_TH), (b'r', S_TR)] },
    StateNode { id: S_TH, output: None, edges: &[(b'e', S_THE)] },
    StateNode { id: S_THE, output: None, edges: &[(b'n', S_THEN)] },
    StateNode { id: S_THEN, output: Some(TokenKind::Then), edges: &[] },
    StateNode { id: S_TR, output: None, edges: &[(b'u', S_TRU)] },
    StateNode { id: S_TRU, output: None, edges: &[(b'e', S_TRUE)] },
    StateNode { id: S_TRUE, output: Some(TokenKind::True), edges: &[] },
    // "w..."
    StateNode { id: S_W, output: None, edges: &[(b'h', S_WH), (b'o', S_WO)] },
    StateNode { id: S_WH, output: None, edges: &[(b'i', S_WHI)] },
    StateNode { id: S_WHI, output: None, edges: &[(b'l', S_WHIL)] },
    StateNode { id: S_WHIL, output: None, edges: &[(b'e', S_WHILE)] },
    StateNode { id: S_WHILE, output: Some(TokenKind::While), edges: &[] },
    StateNode { id: S_WO, output: None, edges: &[(b'r', S_WOR)] },
    StateNode { id: S_WOR, output: None, edges: &[(b'd', S_WORD)] },
    StateNode { id: S_WORD, output: Some(TokenKind::Word), edges: &[] },
];
