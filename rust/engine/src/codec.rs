//! Compact, URL-safe hand tokens.
//!
//! A [`Token`] is the base64url (unpadded) form of a `|`-separated payload:
//!
//! ```text
//! v1|variant|id|table|stakes|button|timestamp|players|preflop|flop|turn|river|pot|winners
//! ```
//!
//! - cards are one letter each: `A..Z` then `a..z` for codes `0..52`
//! - an action is `{seat}{letter}{amount}` with letters `F X C B R A`
//! - a player is `{seat}:{name}:{stack}:{*|-}{hole cards}`
//! - a street is `{board}.{actions}`; an unreached street is empty
//! - chip amounts and the timestamp are base 36, seats are decimal
//! - free text is base64url so separators never leak out of a field
//!
//! [`decode`] is the left inverse of [`encode`] for every hand whose player
//! names fit within [`MAX_NAME_CHARS`]. Id, table name and stakes are kept
//! whole at any length.
//!
//! ```rust
//! use handreel_engine::codec::{decode, encode};
//! use handreel_engine::sample::random_hand;
//!
//! let hand = random_hand(7);
//! let token = encode(&hand);
//! assert!(token.as_str().bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
//! assert_eq!(decode(token.as_str()).unwrap(), hand);
//! ```

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::action::{Action, ActionKind, Chips, Seat};
use crate::cards::Card;
use crate::errors::DecodeError;
use crate::hand::{Hand, Player, Street, StreetRecord, Streets, Variant, Winner};

/// Format marker of the current token generation.
pub const VERSION_TAG: &str = "v1";

/// Player names are cut to this many characters before encoding. Longer
/// names do not survive a round trip.
pub const MAX_NAME_CHARS: usize = 16;

/// Most community cards a single street can deal.
pub const MAX_STREET_BOARD: usize = 3;

const FIELD_SEP: &str = "|";
const LIST_SEP: &str = ";";
const PART_SEP: &str = ":";
const ACTION_SEP: &str = ",";
const BOARD_SEP: char = '.';

const FIELD_COUNT: usize = 14;
const AMOUNT_RADIX: u32 = 36;
const SEAT_RADIX: u32 = 10;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const WINNER_FLAG: char = '*';
const PLAYER_FLAG: char = '-';

/// Serialized form of exactly one hand. Safe to place in a URL query value
/// without further escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Maps a card to its single code unit.
pub fn encode_card(card: Card) -> char {
    let code = card.code();
    if code < 26 {
        (b'A' + code) as char
    } else {
        (b'a' + code - 26) as char
    }
}

/// Inverse of [`encode_card`]; `None` for anything outside the 52 code units.
pub fn decode_card(unit: char) -> Option<Card> {
    let code = match unit {
        'A'..='Z' => unit as u8 - b'A',
        'a'..='z' => unit as u8 - b'a' + 26,
        _ => return None,
    };
    Card::from_code(code)
}

/// Longest prefix of `text` with at most `cap` characters.
pub fn capped(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Serializes a hand. Pure: equal hands always give byte-identical tokens.
pub fn encode(hand: &Hand) -> Token {
    let mut fields: Vec<String> = Vec::with_capacity(FIELD_COUNT);
    fields.push(VERSION_TAG.to_string());
    fields.push(variant_code(hand.variant).to_string());
    fields.push(encode_text(&hand.id));
    fields.push(encode_text(&hand.table_name));
    fields.push(encode_text(&hand.stakes));
    fields.push(hand.button_seat.to_string());
    fields.push(to_base36(hand.timestamp));
    fields.push(
        hand.players
            .iter()
            .map(encode_player)
            .collect::<Vec<_>>()
            .join(LIST_SEP),
    );
    for street in Street::ALL {
        fields.push(
            hand.streets
                .get(street)
                .map(encode_street)
                .unwrap_or_default(),
        );
    }
    fields.push(to_base36(hand.pot_total));
    fields.push(
        hand.winners
            .iter()
            .map(|w| format!("{}{}{}", w.seat, PART_SEP, to_base36(w.amount)))
            .collect::<Vec<_>>()
            .join(LIST_SEP),
    );
    Token(URL_SAFE_NO_PAD.encode(fields.join(FIELD_SEP)))
}

/// Parses a token back into a hand, rejecting anything structurally or
/// semantically invalid. Never yields a partially built hand.
pub fn decode(token: &str) -> Result<Hand, DecodeError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|_| DecodeError::InvalidEncoding { segment: "token" })?;

    let version = bytes
        .split(|b| *b == FIELD_SEP.as_bytes()[0])
        .next()
        .unwrap_or_default();
    if version != VERSION_TAG.as_bytes() {
        return Err(DecodeError::UnsupportedVersion {
            found: String::from_utf8_lossy(version).into_owned(),
        });
    }

    let payload =
        String::from_utf8(bytes).map_err(|_| DecodeError::InvalidEncoding { segment: "token" })?;
    let fields: Vec<&str> = payload.split(FIELD_SEP).collect();
    if fields.len() != FIELD_COUNT {
        return Err(DecodeError::TruncatedSegment {
            segment: "token",
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let variant = parse_variant(fields[1])?;
    let id = decode_text(fields[2], "id")?;
    let table_name = decode_text(fields[3], "table name")?;
    let stakes = decode_text(fields[4], "stakes")?;
    let button_seat = parse_seat(fields[5], "button")?;
    let timestamp = parse_chips(fields[6], "timestamp")?;
    let players = split_list(fields[7])
        .map(parse_player)
        .collect::<Result<Vec<_>, _>>()?;

    let preflop = parse_street(fields[8], Street::Preflop)?.ok_or(
        DecodeError::TruncatedSegment {
            segment: "preflop",
            expected: 2,
            found: 0,
        },
    )?;
    let streets = Streets {
        preflop,
        flop: parse_street(fields[9], Street::Flop)?,
        turn: parse_street(fields[10], Street::Turn)?,
        river: parse_street(fields[11], Street::River)?,
    };

    let pot_total = parse_chips(fields[12], "pot")?;
    let winners = split_list(fields[13])
        .map(parse_winner)
        .collect::<Result<Vec<_>, _>>()?;

    let hand = Hand {
        id,
        table_name,
        variant,
        stakes,
        timestamp,
        button_seat,
        players,
        streets,
        pot_total,
        winners,
    };
    check_hand(&hand)?;
    Ok(hand)
}

/// Checks the hand-level invariants that a decoded token must satisfy:
/// positive unique seats, hole card counts matching the variant, known seats
/// for every action and winner, amounts that fit each action kind, and
/// winners adding up to the pot.
pub fn check_hand(hand: &Hand) -> Result<(), DecodeError> {
    if hand.button_seat == 0 {
        return Err(zero_seat("button"));
    }
    let mut seats = HashSet::with_capacity(hand.players.len());
    for p in &hand.players {
        if p.seat == 0 {
            return Err(zero_seat("player"));
        }
        if !seats.insert(p.seat) {
            return Err(DecodeError::DuplicateSeat { seat: p.seat });
        }
        if let Some(cards) = &p.hole_cards {
            if cards.len() != hand.variant.hole_cards() {
                return Err(DecodeError::MalformedCard {
                    segment: "hole cards",
                    detail: format!(
                        "seat {} shows {} cards, expected {}",
                        p.seat,
                        cards.len(),
                        hand.variant.hole_cards()
                    ),
                });
            }
        }
    }

    for (street, record) in hand.streets.iter() {
        if record.board.len() > MAX_STREET_BOARD {
            return Err(DecodeError::MalformedCard {
                segment: street_segment(street),
                detail: format!("{} board cards on one street", record.board.len()),
            });
        }
        for action in &record.actions {
            if !seats.contains(&action.seat) {
                return Err(DecodeError::UnknownSeat {
                    segment: "action",
                    seat: action.seat,
                });
            }
            if !action.has_valid_amount() {
                return Err(DecodeError::UnknownAction(encode_action(action)));
            }
        }
    }

    for w in &hand.winners {
        if !seats.contains(&w.seat) {
            return Err(DecodeError::UnknownSeat {
                segment: "winner",
                seat: w.seat,
            });
        }
    }

    let awarded = hand
        .winners
        .iter()
        .try_fold(0 as Chips, |acc, w| acc.checked_add(w.amount))
        .unwrap_or(Chips::MAX);
    if awarded != hand.pot_total {
        return Err(DecodeError::PotMismatch {
            pot: hand.pot_total,
            awarded,
        });
    }
    Ok(())
}

fn variant_code(variant: Variant) -> char {
    match variant {
        Variant::Holdem => 'H',
        Variant::Omaha => 'O',
    }
}

fn parse_variant(s: &str) -> Result<Variant, DecodeError> {
    match s {
        "H" => Ok(Variant::Holdem),
        "O" => Ok(Variant::Omaha),
        other => Err(DecodeError::UnknownVariant(other.to_string())),
    }
}

fn action_letter(kind: ActionKind) -> char {
    match kind {
        ActionKind::Fold => 'F',
        ActionKind::Check => 'X',
        ActionKind::Call => 'C',
        ActionKind::Bet => 'B',
        ActionKind::Raise => 'R',
        ActionKind::AllIn => 'A',
    }
}

fn action_kind(letter: char) -> Option<ActionKind> {
    match letter {
        'F' => Some(ActionKind::Fold),
        'X' => Some(ActionKind::Check),
        'C' => Some(ActionKind::Call),
        'B' => Some(ActionKind::Bet),
        'R' => Some(ActionKind::Raise),
        'A' => Some(ActionKind::AllIn),
        _ => None,
    }
}

fn street_segment(street: Street) -> &'static str {
    match street {
        Street::Preflop => "preflop",
        Street::Flop => "flop",
        Street::Turn => "turn",
        Street::River => "river",
    }
}

fn encode_text(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(text)
}

fn decode_text(s: &str, segment: &'static str) -> Result<String, DecodeError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(s)
        .map_err(|_| DecodeError::InvalidEncoding { segment })?;
    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidEncoding { segment })
}

fn encode_cards(cards: &[Card]) -> String {
    cards.iter().map(|c| encode_card(*c)).collect()
}

fn decode_cards(s: &str, segment: &'static str) -> Result<Vec<Card>, DecodeError> {
    s.chars()
        .map(|unit| {
            decode_card(unit).ok_or_else(|| DecodeError::MalformedCard {
                segment,
                detail: format!("code unit {unit:?}"),
            })
        })
        .collect()
}

fn encode_player(p: &Player) -> String {
    let flag = if p.is_winner { WINNER_FLAG } else { PLAYER_FLAG };
    let cards = p.hole_cards.as_deref().map(encode_cards).unwrap_or_default();
    format!(
        "{seat}{sep}{name}{sep}{stack}{sep}{flag}{cards}",
        seat = p.seat,
        sep = PART_SEP,
        name = encode_text(capped(&p.name, MAX_NAME_CHARS)),
        stack = to_base36(p.starting_stack),
    )
}

fn parse_player(s: &str) -> Result<Player, DecodeError> {
    let parts: Vec<&str> = s.split(PART_SEP).collect();
    let &[seat, name, stack, tail] = parts.as_slice() else {
        return Err(DecodeError::TruncatedSegment {
            segment: "player",
            expected: 4,
            found: parts.len(),
        });
    };
    let mut tail = tail.chars();
    let is_winner = match tail.next() {
        Some(WINNER_FLAG) => true,
        Some(PLAYER_FLAG) => false,
        _ => {
            return Err(DecodeError::InvalidEncoding {
                segment: "player flag",
            })
        }
    };
    let cards = decode_cards(tail.as_str(), "hole cards")?;
    Ok(Player {
        seat: parse_seat(seat, "player")?,
        name: decode_text(name, "player name")?,
        starting_stack: parse_chips(stack, "stack")?,
        hole_cards: (!cards.is_empty()).then_some(cards),
        is_winner,
    })
}

fn encode_action(a: &Action) -> String {
    let amount = a.amount.map(to_base36).unwrap_or_default();
    format!("{}{}{}", a.seat, action_letter(a.kind), amount)
}

fn parse_action(s: &str) -> Result<Action, DecodeError> {
    let split = s.find(|c: char| !c.is_ascii_digit()).ok_or(
        DecodeError::TruncatedSegment {
            segment: "action",
            expected: 2,
            found: 1,
        },
    )?;
    let seat = parse_seat(&s[..split], "action")?;
    let mut rest = s[split..].chars();
    let kind = rest
        .next()
        .and_then(action_kind)
        .ok_or_else(|| DecodeError::UnknownAction(s.to_string()))?;
    let amount = match rest.as_str() {
        "" => None,
        digits => Some(parse_chips(digits, "action amount")?),
    };
    let action = Action { seat, kind, amount };
    if !action.has_valid_amount() {
        return Err(DecodeError::UnknownAction(s.to_string()));
    }
    Ok(action)
}

fn encode_street(r: &StreetRecord) -> String {
    let actions: Vec<String> = r.actions.iter().map(encode_action).collect();
    format!(
        "{}{}{}",
        encode_cards(&r.board),
        BOARD_SEP,
        actions.join(ACTION_SEP)
    )
}

fn parse_street(s: &str, street: Street) -> Result<Option<StreetRecord>, DecodeError> {
    if s.is_empty() {
        return Ok(None);
    }
    let segment = street_segment(street);
    let (board, actions) = s
        .split_once(BOARD_SEP)
        .ok_or(DecodeError::TruncatedSegment {
            segment,
            expected: 2,
            found: 1,
        })?;
    let board = decode_cards(board, segment)?;
    if board.len() > MAX_STREET_BOARD {
        return Err(DecodeError::MalformedCard {
            segment,
            detail: format!("{} board cards on one street", board.len()),
        });
    }
    let actions = if actions.is_empty() {
        Vec::new()
    } else {
        actions
            .split(ACTION_SEP)
            .map(parse_action)
            .collect::<Result<Vec<_>, _>>()?
    };
    Ok(Some(StreetRecord { board, actions }))
}

fn parse_winner(s: &str) -> Result<Winner, DecodeError> {
    let parts: Vec<&str> = s.split(PART_SEP).collect();
    let &[seat, amount] = parts.as_slice() else {
        return Err(DecodeError::TruncatedSegment {
            segment: "winner",
            expected: 2,
            found: parts.len(),
        });
    };
    Ok(Winner {
        seat: parse_seat(seat, "winner")?,
        amount: parse_chips(amount, "winner amount")?,
    })
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(LIST_SEP).filter(|item| !item.is_empty())
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % AMOUNT_RADIX as u64) as usize]);
        n /= AMOUNT_RADIX as u64;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

fn is_canonical_digit(b: u8, radix: u32) -> bool {
    DIGITS[..radix as usize].contains(&b)
}

fn invalid_numeral(s: &str, segment: &'static str, radix: u32) -> DecodeError {
    DecodeError::InvalidNumeral {
        segment,
        value: s.to_string(),
        radix,
    }
}

fn parse_chips(s: &str, segment: &'static str) -> Result<Chips, DecodeError> {
    if s.is_empty() || !s.bytes().all(|b| is_canonical_digit(b, AMOUNT_RADIX)) {
        return Err(invalid_numeral(s, segment, AMOUNT_RADIX));
    }
    Chips::from_str_radix(s, AMOUNT_RADIX).map_err(|_| invalid_numeral(s, segment, AMOUNT_RADIX))
}

fn parse_seat(s: &str, segment: &'static str) -> Result<Seat, DecodeError> {
    if s.is_empty() || !s.bytes().all(|b| is_canonical_digit(b, SEAT_RADIX)) {
        return Err(invalid_numeral(s, segment, SEAT_RADIX));
    }
    match s.parse::<Seat>() {
        Ok(0) => Err(zero_seat(segment)),
        Ok(seat) => Ok(seat),
        Err(_) => Err(invalid_numeral(s, segment, SEAT_RADIX)),
    }
}

/// Seats are numbered from 1.
fn zero_seat(segment: &'static str) -> DecodeError {
    invalid_numeral("0", segment, SEAT_RADIX)
}
