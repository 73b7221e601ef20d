//! Canned replies that answer certain chat inputs without consulting the
//! provider. Rules are evaluated in table order against the lower-cased
//! message; the first rule that produces a reply wins.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use regex::Regex;

pub const JOKES: [&str; 3] = [
    "Why don\u{2019}t scientists trust atoms? Because they make up everything!",
    "Why did the math book look sad? Because it had too many problems.",
    "Parallel lines have so much in common. It\u{2019}s a shame they\u{2019}ll never meet.",
];

pub const QUOTES: [&str; 3] = [
    "Believe in yourself and all that you are.",
    "You are stronger than you think.",
    "Every day is a fresh start.",
];

pub const TRIVIA: [&str; 3] = [
    "Honey never spoils. Archaeologists have found 3000-year-old honey and it\u{2019}s still good.",
    "Bananas are berries, but strawberries aren\u{2019}t.",
    "Octopuses have three hearts.",
];

static ADDITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"what is (\d+) \+ (\d+)").expect("addition pattern is valid"));

type Responder = fn(&str, &mut dyn RngCore) -> Option<String>;

pub struct InterceptRule {
    pub name: &'static str,
    respond: Responder,
}

impl InterceptRule {
    pub fn respond(&self, lowered: &str, rng: &mut dyn RngCore) -> Option<String> {
        (self.respond)(lowered, rng)
    }
}

pub static INTERCEPT_RULES: [InterceptRule; 6] = [
    InterceptRule {
        name: "joke",
        respond: tell_joke,
    },
    InterceptRule {
        name: "coin_flip",
        respond: flip_coin,
    },
    InterceptRule {
        name: "dice_roll",
        respond: roll_dice,
    },
    InterceptRule {
        name: "addition",
        respond: add_numbers,
    },
    InterceptRule {
        name: "motivation",
        respond: motivate,
    },
    InterceptRule {
        name: "trivia",
        respond: share_trivia,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intercepted {
    pub rule: &'static str,
    pub reply: String,
}

pub fn intercept(message: &str, rng: &mut dyn RngCore) -> Option<Intercepted> {
    let lowered = message.to_lowercase();
    INTERCEPT_RULES.iter().find_map(|rule| {
        rule.respond(&lowered, rng).map(|reply| Intercepted {
            rule: rule.name,
            reply,
        })
    })
}

fn pick(options: &[&str], rng: &mut dyn RngCore) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}

fn tell_joke(message: &str, rng: &mut dyn RngCore) -> Option<String> {
    message
        .contains("tell me a joke")
        .then(|| pick(&JOKES, rng))
}

fn flip_coin(message: &str, rng: &mut dyn RngCore) -> Option<String> {
    if !message.contains("flip a coin") {
        return None;
    }
    let side = if rng.gen_bool(0.5) { "Heads!" } else { "Tails!" };
    Some(side.to_string())
}

fn roll_dice(message: &str, rng: &mut dyn RngCore) -> Option<String> {
    message
        .contains("roll a dice")
        .then(|| format!("You rolled a {}", rng.gen_range(1..=6)))
}

fn add_numbers(message: &str, _rng: &mut dyn RngCore) -> Option<String> {
    let captures = ADDITION.captures(message)?;
    let (lhs, rhs) = (&captures[1], &captures[2]);
    // Operands too large for u128 fall through to the provider.
    let sum = lhs.parse::<u128>().ok()?.checked_add(rhs.parse().ok()?)?;
    Some(format!("{} + {} = {}", lhs, rhs, sum))
}

fn motivate(message: &str, rng: &mut dyn RngCore) -> Option<String> {
    (message.contains("motivate me") || message.contains("inspire me")).then(|| pick(&QUOTES, rng))
}

fn share_trivia(message: &str, rng: &mut dyn RngCore) -> Option<String> {
    message.contains("trivia").then(|| pick(&TRIVIA, rng))
}
