/// Placeholder expansion for suggestion templates.
///
/// Templates carry `{token}` slots that are filled at render time. Context
/// tokens pull from the live session; pool tokens draw from fixed word lists
/// so repeated renders of one template stay varied.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Audience or beneficiary slot fillers.
const TARGETS: [&str; 10] = [
    "beginners",
    "busy professionals",
    "local communities",
    "small teams",
    "students",
    "remote workers",
    "families",
    "hobbyists",
    "first-time users",
    "experts",
];

/// Constraint slot fillers.
const CONSTRAINTS: [&str; 10] = [
    "a zero budget",
    "one week of time",
    "no internet access",
    "only existing tools",
    "a single person",
    "half the usual resources",
    "strict privacy rules",
    "no new hardware",
    "a fixed deadline",
    "minimal training",
];

/// Scaling slot fillers.
const MULTIPLIERS: [&str; 5] = ["10x", "100x", "half", "double", "one tenth"];

/// Assumption slot fillers.
const ASSUMPTIONS: [&str; 8] = [
    "users want more features",
    "faster is always better",
    "everyone uses it daily",
    "price drives the decision",
    "the current workflow is fixed",
    "more data helps",
    "automation saves time",
    "people read instructions",
];

/// Tokens the expander understands, in `{token}` form. Catalog lint checks
/// template text against this list.
pub const RECOGNIZED_TOKENS: [&str; 7] = [
    "domain",
    "last",
    "target",
    "constraint",
    "multiplier",
    "assumption",
    "number",
];

/// Lists the distinct placeholder tokens appearing in `text`, in order of
/// first appearance. Unrecognized tokens are included so callers can flag
/// them.
pub fn placeholder_tokens(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        rest = &rest[open + 1..];
        let Some(close) = rest.find('}') else {
            break;
        };
        let token = &rest[..close];
        if !token.is_empty() && !found.iter().any(|t| t == token) {
            found.push(token.to_string());
        }
        rest = &rest[close + 1..];
    }
    found
}

/// Pool-token draws cached for the duration of one render, so every
/// occurrence of a token inside one template resolves identically.
struct Draws {
    target: Option<&'static str>,
    constraint: Option<&'static str>,
    multiplier: Option<&'static str>,
    assumption: Option<&'static str>,
    number: Option<u32>,
}

impl Draws {
    fn new() -> Self {
        Draws {
            target: None,
            constraint: None,
            multiplier: None,
            assumption: None,
            number: None,
        }
    }

    fn pick(pool: &'static [&'static str], rng: &mut StdRng) -> &'static str {
        // Pools are compile-time non-empty arrays.
        pool.choose(rng).copied().unwrap_or("")
    }

    fn target(&mut self, rng: &mut StdRng) -> &'static str {
        *self.target.get_or_insert_with(|| Self::pick(&TARGETS, rng))
    }

    fn constraint(&mut self, rng: &mut StdRng) -> &'static str {
        *self
            .constraint
            .get_or_insert_with(|| Self::pick(&CONSTRAINTS, rng))
    }

    fn multiplier(&mut self, rng: &mut StdRng) -> &'static str {
        *self
            .multiplier
            .get_or_insert_with(|| Self::pick(&MULTIPLIERS, rng))
    }

    fn assumption(&mut self, rng: &mut StdRng) -> &'static str {
        *self
            .assumption
            .get_or_insert_with(|| Self::pick(&ASSUMPTIONS, rng))
    }

    fn number(&mut self, rng: &mut StdRng) -> u32 {
        *self.number.get_or_insert_with(|| rng.gen_range(1..=20))
    }
}

/// Renders `text` by substituting every recognized `{token}`.
///
/// `{domain}` and `{last}` come from session context; `{last}` falls back to
/// the domain before any choice has been accepted. Substituted values are
/// never re-scanned, and unknown tokens pass through verbatim.
pub fn expand(
    text: &str,
    domain: &str,
    last_choice: Option<&str>,
    rng: &mut StdRng,
) -> String {
    let mut draws = Draws::new();
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open + 1..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let token = &rest[open + 1..open + 1 + close];
        match token {
            "domain" => out.push_str(domain),
            "last" => out.push_str(last_choice.unwrap_or(domain)),
            "target" => out.push_str(draws.target(rng)),
            "constraint" => out.push_str(draws.constraint(rng)),
            "multiplier" => out.push_str(draws.multiplier(rng)),
            "assumption" => out.push_str(draws.assumption(rng)),
            "number" => out.push_str(&draws.number(rng).to_string()),
            _ => {
                out.push('{');
                out.push_str(token);
                out.push('}');
            }
        }
        rest = &rest[open + 1 + close + 1..];
    }
    out.push_str(rest);
    out
}
