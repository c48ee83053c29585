//! Monetary amount extraction from receipt OCR text.
//!
//! Receipts print several numbers (line items, subtotal, tax, total), so a
//! currency-tagged match on a total/payment keyword line outranks any bare
//! number. The bare-number fallback exists for receipts without English
//! keywords.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, trace};

use super::patterns::{is_keyword_tagged, LOOSE_AMOUNT, STRICT_AMOUNT, TIME_OF_DAY, YEAR_DECIMAL};

/// Candidate tier. Primary always wins over fallback, regardless of value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    /// Currency-tagged match on a keyword line.
    Primary,
    /// Bare numeric match on any line.
    Fallback,
}

/// A reject validator applied to a matched token and its line.
struct RejectRule {
    name: &'static str,
    applies: fn(token: &str, line: &str) -> bool,
}

fn rejects_year_decimal(token: &str, _line: &str) -> bool {
    YEAR_DECIMAL.is_match(token)
}

fn rejects_time_of_day(_token: &str, line: &str) -> bool {
    TIME_OF_DAY.is_match(line)
}

/// One entry of the ordered amount-rule table.
struct AmountRule {
    name: &'static str,
    pattern: &'static Regex,
    tier: Tier,
    /// Only fires on lines containing a total/payment keyword.
    requires_keyword: bool,
    rejects: &'static [RejectRule],
}

static LOOSE_REJECTS: [RejectRule; 2] = [
    RejectRule {
        name: "year-decimal artifact",
        applies: rejects_year_decimal,
    },
    RejectRule {
        name: "time-of-day line",
        applies: rejects_time_of_day,
    },
];

lazy_static! {
    static ref AMOUNT_RULES: [AmountRule; 2] = [
        AmountRule {
            name: "strict currency match",
            pattern: &STRICT_AMOUNT,
            tier: Tier::Primary,
            requires_keyword: true,
            rejects: &[],
        },
        AmountRule {
            name: "loose bare number",
            pattern: &LOOSE_AMOUNT,
            tier: Tier::Fallback,
            requires_keyword: false,
            rejects: &LOOSE_REJECTS,
        },
    ];
}

/// Per-tier running maxima accumulated by the line fold.
#[derive(Debug, Default, Clone, Copy)]
struct Candidates {
    primary: Option<Decimal>,
    fallback: Option<Decimal>,
}

impl Candidates {
    fn offer(&mut self, tier: Tier, value: Decimal) {
        let slot = match tier {
            Tier::Primary => &mut self.primary,
            Tier::Fallback => &mut self.fallback,
        };
        if slot.is_none_or(|current| value > current) {
            *slot = Some(value);
        }
    }

    fn resolve(self) -> Option<Decimal> {
        self.primary.or(self.fallback)
    }
}

/// Monetary amount extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the most likely receipt total, if any.
    ///
    /// Implemented as a pure fold over lowercased lines; no state survives
    /// the call, so identical text always yields an identical result.
    pub fn extract(&self, text: &str) -> Option<Decimal> {
        let lowered = text.to_lowercase();

        let candidates = lowered
            .lines()
            .map(str::trim)
            .fold(Candidates::default(), |mut acc, line| {
                let tagged = is_keyword_tagged(line);

                for rule in AMOUNT_RULES.iter() {
                    if rule.requires_keyword && !tagged {
                        continue;
                    }

                    let Some(caps) = rule.pattern.captures(line) else {
                        continue;
                    };
                    let token = caps.get(0).map_or("", |m| m.as_str());

                    if let Some(reject) = rule.rejects.iter().find(|r| (r.applies)(token, line)) {
                        trace!("rejected {token:?} on {:?}: {}", line, reject.name);
                        continue;
                    }

                    if let Some(value) = parse_amount(&caps[1]) {
                        trace!("{} candidate {value} on {line:?}", rule.name);
                        acc.offer(rule.tier, value);
                    }
                }

                acc
            });

        let amount = candidates.resolve();
        debug!(?amount, "amount extraction finished");
        amount
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a matched numeric token, normalizing the comma separator.
/// Non-positive values are discarded.
fn parse_amount(token: &str) -> Option<Decimal> {
    let normalized = token.replace(',', ".");
    Decimal::from_str(&normalized)
        .ok()
        .filter(|value| value.is_sign_positive() && !value.is_zero())
}
